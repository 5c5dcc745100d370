//! Token types produced by the scanner.

use serde::Serialize;
use strum_macros::Display;

/// Lexical class of a [`Symbol`].
///
/// Leading whitespace is folded into [`TokenType::LBrace`],
/// [`TokenType::Plus`], [`TokenType::Greater`] and [`TokenType::Comma`], so
/// `a , b` scans as `IDENT COMMA S IDENT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "UPPERCASE")]
pub enum TokenType {
    /// No token; returned by cursor lookups outside the symbol list.
    None,
    /// Whitespace or a comment.
    S,
    /// `<!--`
    Cdo,
    /// `-->`
    Cdc,
    /// `~=`
    Includes,
    /// `|=`
    DashMatch,
    /// `{`, with any leading whitespace.
    LBrace,
    /// `+`, with any leading whitespace.
    Plus,
    /// `>`, with any leading whitespace.
    Greater,
    /// `,`, with any leading whitespace.
    Comma,
    /// A quoted string, quotes included.
    String,
    /// An unterminated string or an unexpected character.
    Invalid,
    /// An identifier.
    Ident,
    /// `#name`
    Hash,
    /// `@ident`
    AtKeyword,
    /// `!`
    Exclamation,
    /// A number directly followed by an identifier (`4px`, `2un`).
    Length,
    /// A number followed by `%`.
    Percentage,
    /// A plain number.
    Number,
    /// An identifier followed by `(`, the parenthesis included.
    Function,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `}`
    RBrace,
    /// `/`
    Slash,
    /// `-`
    Minus,
    /// `.`
    Dot,
    /// `*`
    Star,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `=`
    Equal,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `|`
    Or,
}

/// A scanned token: its class and the span it covers in the scanned text.
///
/// Spans are measured in `char`s, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Symbol {
    /// Lexical class.
    pub token: TokenType,
    /// Index of the first character.
    pub start: usize,
    /// Number of characters.
    pub len: usize,
}

impl Symbol {
    /// The raw source text covered by this symbol.
    #[must_use]
    pub fn raw(&self, text: &[char]) -> String {
        text.get(self.start..self.start + self.len)
            .map(|chars| chars.iter().collect())
            .unwrap_or_default()
    }

    /// The symbol's lexeme: its source text with escape backslashes removed.
    ///
    /// A backslash followed by another character inside the span is dropped
    /// and the following character kept verbatim; a trailing backslash is
    /// kept.
    #[must_use]
    pub fn lexem(&self, text: &[char]) -> String {
        let Some(chars) = text.get(self.start..self.start + self.len) else {
            return String::new();
        };
        let mut result = String::with_capacity(chars.len());
        let mut i = 0;
        while i < chars.len() {
            if chars[i] == '\\' && i + 1 < chars.len() {
                i += 1;
            }
            result.push(chars[i]);
            i += 1;
        }
        result
    }
}
