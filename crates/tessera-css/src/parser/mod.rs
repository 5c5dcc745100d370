//! Recursive-descent stylesheet parser.
//!
//! The parser walks the symbol list produced by the [scanner](crate::scanner)
//! with a single cursor. Every `test_*` helper consumes the symbol it checks
//! only on a match, so a failed test leaves the cursor where it was.
//!
//! Malformed declarations are dropped and parsing resumes at the next `;` or
//! the closing `}` of the block. Structural errors at sheet level abort the
//! parse with [`ParseError::Syntax`].

use std::path::{Path, PathBuf};

use tessera_common::warning::warn_once;

use crate::model::{StorageKind, StyleSheet};
use crate::scanner::{Scanner, Symbol, TokenType, preprocess};

mod error;
mod rules;
mod selectors;
mod terms;

pub use error::{ErrorCode, ParseError};
pub(crate) use error::{Failure, Step, push};

/// Stylesheet parser over one source text.
pub struct Parser {
    /// Preprocessed source characters
    text: Vec<char>,
    /// Scanned symbols
    symbols: Vec<Symbol>,
    /// Cursor into `symbols`
    index: usize,
    /// Symbol index of the last recorded syntax error
    error_index: Option<usize>,
    error_code: ErrorCode,
    has_escape_sequences: bool,
    /// Directory relative `url()` references resolve against
    source_dir: Option<PathBuf>,
    source_file: Option<PathBuf>,
}

impl Parser {
    /// Create a parser over `css`, resolving escapes and scanning it.
    #[must_use]
    pub fn new(css: &str) -> Self {
        let (text, has_escape_sequences) = preprocess(css);
        let mut scanner = Scanner::new(text);
        scanner.run();
        let text = scanner.input().to_vec();
        Self {
            text,
            symbols: scanner.into_symbols(),
            index: 0,
            error_index: None,
            error_code: ErrorCode::UnknownError,
            has_escape_sequences,
            source_dir: None,
            source_file: None,
        }
    }

    /// Create a parser over the contents of `path`.
    ///
    /// Relative `url()` references in the sheet are resolved against the
    /// file's directory, and parsed sheets remember the file name.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Io`] when the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let css = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        let mut parser = Self::new(&css);
        parser.source_dir = absolute.parent().map(Path::to_path_buf);
        parser.source_file = Some(absolute);
        Ok(parser)
    }

    /// Parse the whole input into `sheet`, appending to its rule lists.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Syntax`] for an unrecoverable structural error
    /// and [`ParseError::OutOfMemory`] when building the rule model fails
    /// to allocate. On error `sheet` may hold the rules parsed before the
    /// failure.
    pub fn parse(&mut self, sheet: &mut StyleSheet) -> Result<(), ParseError> {
        self.index = 0;
        self.error_index = None;
        if sheet.file_name.is_none() {
            sheet.file_name.clone_from(&self.source_file);
        }

        match self.parse_sheet_rules(sheet) {
            Ok(()) => {
                self.error_code = ErrorCode::NoError;
                tracing::debug!(
                    symbols = self.symbols.len(),
                    rules = sheet.style_rule_count(),
                    "parsed stylesheet"
                );
                Ok(())
            }
            Err(Failure::OutOfMemory) => {
                self.error_code = ErrorCode::OutOfMemoryError;
                Err(ParseError::OutOfMemory)
            }
            Err(Failure::Syntax) => {
                self.error_code = ErrorCode::UnknownError;
                let index = self.error_index.unwrap_or(self.index);
                let (token, lexeme) = self.symbols.get(index).map_or_else(
                    || (TokenType::None, String::new()),
                    |symbol| (symbol.token, symbol.lexem(&self.text)),
                );
                tracing::debug!(index, %token, "stylesheet syntax error");
                Err(ParseError::Syntax {
                    index,
                    token,
                    lexeme,
                })
            }
        }
    }

    /// Parse the whole input into a fresh sheet in `storage`.
    ///
    /// # Errors
    ///
    /// See [`Parser::parse`].
    pub fn parse_sheet(&mut self, storage: StorageKind) -> Result<StyleSheet, ParseError> {
        let mut sheet = StyleSheet::new(storage);
        self.parse(&mut sheet)?;
        Ok(sheet)
    }

    /// Diagnostic code of the last [`Parser::parse`] call.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        self.error_code
    }

    /// The symbol at which the last syntax error was recorded.
    #[must_use]
    pub fn error_symbol(&self) -> Option<Symbol> {
        self.error_index
            .and_then(|index| self.symbols.get(index).copied())
    }

    /// All scanned symbols.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// The preprocessed text the symbol spans refer to.
    #[must_use]
    pub fn text(&self) -> &[char] {
        &self.text
    }

    /// Whether the source contained a malformed escape sequence.
    #[must_use]
    pub const fn has_escape_sequences(&self) -> bool {
        self.has_escape_sequences
    }

    // Cursor primitives

    pub(crate) fn has_next(&self) -> bool {
        self.index < self.symbols.len()
    }

    /// Consume the current symbol and return its token.
    pub(crate) fn advance(&mut self) -> TokenType {
        let token = self
            .symbols
            .get(self.index)
            .map_or(TokenType::None, |symbol| symbol.token);
        self.index += 1;
        token
    }

    /// Consume the current symbol if it is a `token`.
    pub(crate) fn test(&mut self, token: TokenType) -> bool {
        if self.has_next() && self.symbols[self.index].token == token {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Consume a `token` or record a syntax error at the offending symbol.
    fn expect(&mut self, token: TokenType) -> Step {
        if !self.has_next() {
            return Err(self.record_error());
        }
        if self.advance() == token {
            Ok(())
        } else {
            self.error_index = Some(self.index - 1);
            Err(Failure::Syntax)
        }
    }

    fn record_error(&mut self) -> Failure {
        self.error_index = Some(self.index);
        Failure::Syntax
    }

    fn prev(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Token of the most recently consumed symbol.
    fn lookup(&self) -> TokenType {
        self.index
            .checked_sub(1)
            .and_then(|at| self.symbols.get(at))
            .map_or(TokenType::None, |symbol| symbol.token)
    }

    /// Lexeme of the most recently consumed symbol.
    pub(crate) fn lexem(&self) -> String {
        self.index
            .checked_sub(1)
            .and_then(|at| self.symbols.get(at))
            .map(|symbol| symbol.lexem(&self.text))
            .unwrap_or_default()
    }

    fn unquoted_lexem(&self) -> String {
        let lexem = self.lexem();
        if self.lookup() == TokenType::String {
            remove_quotes(&lexem).to_string()
        } else {
            lexem
        }
    }

    pub(crate) fn skip_space(&mut self) {
        while self.test(TokenType::S) {}
    }

    fn skip_space_and_markup(&mut self) {
        while self.test(TokenType::S) || self.test(TokenType::Cdo) || self.test(TokenType::Cdc) {}
    }

    /// Advance past the next `target` at the current nesting level.
    ///
    /// Nesting is tracked for braces, brackets and parentheses and seeded
    /// from the most recently consumed symbol. Returns `false` at end of
    /// input, or, with the cursor on the closer, when an enclosing block
    /// closes first.
    fn until(&mut self, target: TokenType) -> bool {
        let (mut braces, mut brackets, mut parens) = (0_i32, 0_i32, 0_i32);
        match self.lookup() {
            TokenType::LBrace => braces += 1,
            TokenType::LBracket => brackets += 1,
            TokenType::Function | TokenType::LParen => parens += 1,
            _ => {}
        }
        self.until_nested(target, (braces, brackets, parens))
    }

    /// Like [`Parser::until`], but starting at the nesting level of the
    /// enclosing block whatever symbol was consumed last.
    fn until_in_block(&mut self, target: TokenType) -> bool {
        self.until_nested(target, (0, 0, 0))
    }

    fn until_nested(&mut self, target: TokenType, nesting: (i32, i32, i32)) -> bool {
        let (mut braces, mut brackets, mut parens) = nesting;
        while self.has_next() {
            let token = self.advance();
            match token {
                TokenType::LBrace => braces += 1,
                TokenType::RBrace => braces -= 1,
                TokenType::LBracket => brackets += 1,
                TokenType::RBracket => brackets -= 1,
                TokenType::Function | TokenType::LParen => parens += 1,
                TokenType::RParen => parens -= 1,
                _ => {}
            }
            if token == target && braces <= 0 && brackets <= 0 && parens <= 0 {
                return true;
            }
            if braces < 0 || brackets < 0 || parens < 0 {
                self.prev();
                break;
            }
        }
        false
    }

    /// Consume an at-keyword whose name ends with `name`.
    fn test_at_keyword(&mut self, name: &str) -> bool {
        if !self.test(TokenType::AtKeyword) {
            return false;
        }
        if self.lexem().to_ascii_lowercase().ends_with(name) {
            true
        } else {
            self.prev();
            false
        }
    }

    fn warn(&self, message: &str) {
        let location = self
            .source_file
            .as_ref()
            .map_or_else(String::new, |file| format!("{}: ", file.display()));
        let _ = warn_once("CSS", &format!("{location}{message}"));
    }
}

/// Strip one pair of matching outer quotes, if present.
pub(crate) fn remove_quotes(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() >= 2
        && matches!(bytes[0], b'"' | b'\'')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        &text[1..text.len() - 1]
    } else {
        text
    }
}
