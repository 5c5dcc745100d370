use super::token::{Symbol, TokenType};

/// Replace hexadecimal escapes (`\41`, `\0000E9`) with the characters they
/// denote.
///
/// Returns the rewritten text and whether any non-hex escape (a backslash
/// followed by something other than a hex digit) was left in place for the
/// scanner to handle. At most six hex digits are consumed; an escape whose
/// value is not a valid character is left untouched.
#[must_use]
pub fn preprocess(input: &str) -> (String, bool) {
    let mut output: Vec<char> = input.chars().collect();
    let mut has_escapes = false;
    let mut i = 0;
    while i < output.len() {
        if output[i] != '\\' {
            i += 1;
            continue;
        }

        i += 1;
        let hex_start = i;
        let mut hex_count = 0;
        while hex_count < 7 && output.get(i).is_some_and(char::is_ascii_hexdigit) {
            i += 1;
            hex_count += 1;
        }
        if hex_count == 0 {
            has_escapes = true;
            continue;
        }

        let hex_count = hex_count.min(6);
        let digits: String = output[hex_start..hex_start + hex_count].iter().collect();
        let decoded = u32::from_str_radix(&digits, 16)
            .ok()
            .and_then(char::from_u32);
        if let Some(c) = decoded {
            let _ = output.splice(hex_start - 1..hex_start + hex_count, [c]);
        }
        i = hex_start;
    }
    (output.into_iter().collect(), has_escapes)
}

/// Scan `input` into symbols whose spans index the chars of `input`.
#[must_use]
pub fn scan(input: &str) -> Vec<Symbol> {
    let mut scanner = Scanner::new(input);
    scanner.run();
    scanner.into_symbols()
}

/// Stylesheet scanner producing [`Symbol`]s with longest-match semantics.
pub struct Scanner {
    /// The characters being scanned
    input: Vec<char>,
    /// Current position in the input
    position: usize,
    /// Collected symbols
    symbols: Vec<Symbol>,
}

impl Scanner {
    /// Create a scanner over the given (already preprocessed) text.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into().chars().collect(),
            position: 0,
            symbols: Vec::new(),
        }
    }

    /// Scan the whole input.
    pub fn run(&mut self) {
        while self.position < self.input.len() {
            let start = self.position;
            let token = self.consume_token();
            debug_assert!(self.position > start);
            self.symbols.push(Symbol {
                token,
                start,
                len: self.position - start,
            });
        }
    }

    /// The scanned characters.
    #[must_use]
    pub fn input(&self) -> &[char] {
        &self.input
    }

    /// Return the collected symbols.
    #[must_use]
    pub fn into_symbols(self) -> Vec<Symbol> {
        self.symbols
    }

    fn consume_token(&mut self) -> TokenType {
        let c = self.input[self.position];

        if is_whitespace(c) {
            self.consume_whitespace();
            return match self.peek(0) {
                Some(next @ ('{' | '+' | '>' | ',')) => {
                    self.position += 1;
                    absorbing_token(next)
                }
                _ => TokenType::S,
            };
        }

        if let Some(len) = self.match_ident(self.position) {
            self.position += len;
            if self.peek(0) == Some('(') {
                self.position += 1;
                return TokenType::Function;
            }
            return TokenType::Ident;
        }

        if let Some(len) = self.match_number(self.position) {
            self.position += len;
            if self.peek(0) == Some('%') {
                self.position += 1;
                return TokenType::Percentage;
            }
            if let Some(unit) = self.match_ident(self.position) {
                self.position += unit;
                return TokenType::Length;
            }
            return TokenType::Number;
        }

        match c {
            '"' | '\'' => self.consume_string(c),
            '/' if self.peek(1) == Some('*') => {
                self.consume_comment();
                TokenType::S
            }
            '<' if self.starts_with("<!--") => self.advance(4, TokenType::Cdo),
            '-' if self.starts_with("-->") => self.advance(3, TokenType::Cdc),
            '~' if self.peek(1) == Some('=') => self.advance(2, TokenType::Includes),
            '|' if self.peek(1) == Some('=') => self.advance(2, TokenType::DashMatch),
            '#' => match self.match_name(self.position + 1) {
                Some(len) => self.advance(1 + len, TokenType::Hash),
                None => self.advance(1, TokenType::Invalid),
            },
            '@' => match self.match_ident(self.position + 1) {
                Some(len) => self.advance(1 + len, TokenType::AtKeyword),
                None => self.advance(1, TokenType::Invalid),
            },
            '{' | '+' | '>' | ',' => self.advance(1, absorbing_token(c)),
            _ => self.advance(1, single_char_token(c)),
        }
    }

    const fn advance(&mut self, len: usize, token: TokenType) -> TokenType {
        self.position += len;
        token
    }

    fn consume_whitespace(&mut self) {
        while self.peek(0).is_some_and(is_whitespace) {
            self.position += 1;
        }
    }

    /// Consume a comment; an unterminated comment runs to the end of input.
    fn consume_comment(&mut self) {
        self.position += 2;
        while self.position < self.input.len() {
            if self.starts_with("*/") {
                self.position += 2;
                return;
            }
            self.position += 1;
        }
    }

    /// Consume a quoted string. A raw newline or the end of input before the
    /// closing quote yields [`TokenType::Invalid`].
    fn consume_string(&mut self, quote: char) -> TokenType {
        self.position += 1;
        while let Some(c) = self.peek(0) {
            match c {
                c if c == quote => {
                    self.position += 1;
                    return TokenType::String;
                }
                '\n' | '\r' | '\x0C' => return TokenType::Invalid,
                '\\' => {
                    self.position += 1;
                    if self.starts_with("\r\n") {
                        self.position += 2;
                    } else if self.peek(0).is_some() {
                        self.position += 1;
                    }
                }
                _ => self.position += 1,
            }
        }
        TokenType::Invalid
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn starts_with(&self, pattern: &str) -> bool {
        let mut at = self.position;
        for expected in pattern.chars() {
            if self.input.get(at) != Some(&expected) {
                return false;
            }
            at += 1;
        }
        true
    }

    /// Length of an escape sequence starting at `at`, if one starts there.
    fn match_escape(&self, at: usize) -> Option<usize> {
        if self.input.get(at) != Some(&'\\') {
            return None;
        }
        let next = *self.input.get(at + 1)?;
        if next.is_ascii_hexdigit() {
            let mut len = 1;
            while len <= 6 && self.input.get(at + len).is_some_and(char::is_ascii_hexdigit) {
                len += 1;
            }
            if self.input.get(at + len) == Some(&'\r') && self.input.get(at + len + 1) == Some(&'\n')
            {
                len += 2;
            } else if self.input.get(at + len).copied().is_some_and(is_whitespace) {
                len += 1;
            }
            return Some(len);
        }
        match next {
            '\r' | '\n' | '\x0C' => None,
            _ => Some(2),
        }
    }

    fn match_nmstart(&self, at: usize) -> Option<usize> {
        match self.input.get(at).copied() {
            Some(c) if c == '_' || c.is_ascii_alphabetic() || !c.is_ascii() => Some(1),
            Some('\\') => self.match_escape(at),
            _ => None,
        }
    }

    fn match_nmchar(&self, at: usize) -> Option<usize> {
        match self.input.get(at).copied() {
            Some(c) if c == '-' || c.is_ascii_digit() => Some(1),
            _ => self.match_nmstart(at),
        }
    }

    /// `-?nmstart nmchar*`
    fn match_ident(&self, at: usize) -> Option<usize> {
        let sign = usize::from(self.input.get(at) == Some(&'-'));
        let mut len = sign + self.match_nmstart(at + sign)?;
        while let Some(n) = self.match_nmchar(at + len) {
            len += n;
        }
        Some(len)
    }

    /// `nmchar+`
    fn match_name(&self, at: usize) -> Option<usize> {
        let mut len = 0;
        while let Some(n) = self.match_nmchar(at + len) {
            len += n;
        }
        (len > 0).then_some(len)
    }

    /// `[0-9]+ | [0-9]* "." [0-9]+`
    fn match_number(&self, at: usize) -> Option<usize> {
        let digits_from = |from: usize| {
            self.input[from.min(self.input.len())..]
                .iter()
                .take_while(|c| c.is_ascii_digit())
                .count()
        };
        let integer = digits_from(at);
        if self.input.get(at + integer) == Some(&'.') {
            let fraction = digits_from(at + integer + 1);
            if fraction > 0 {
                return Some(integer + 1 + fraction);
            }
        }
        (integer > 0).then_some(integer)
    }
}

const fn absorbing_token(c: char) -> TokenType {
    match c {
        '{' => TokenType::LBrace,
        '+' => TokenType::Plus,
        '>' => TokenType::Greater,
        _ => TokenType::Comma,
    }
}

const fn single_char_token(c: char) -> TokenType {
    match c {
        '!' => TokenType::Exclamation,
        ':' => TokenType::Colon,
        ';' => TokenType::Semicolon,
        '}' => TokenType::RBrace,
        '/' => TokenType::Slash,
        '-' => TokenType::Minus,
        '.' => TokenType::Dot,
        '*' => TokenType::Star,
        '[' => TokenType::LBracket,
        ']' => TokenType::RBracket,
        '=' => TokenType::Equal,
        '(' => TokenType::LParen,
        ')' => TokenType::RParen,
        '|' => TokenType::Or,
        _ => TokenType::Invalid,
    }
}

const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0C')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<TokenType> {
        scan(input).into_iter().map(|s| s.token).collect()
    }

    #[test]
    fn test_whitespace_folds_into_brace() {
        assert_eq!(
            tokens("a {"),
            vec![TokenType::Ident, TokenType::LBrace]
        );
    }

    #[test]
    fn test_comment_is_whitespace() {
        assert_eq!(
            tokens("a/* note */b"),
            vec![TokenType::Ident, TokenType::S, TokenType::Ident]
        );
    }

    #[test]
    fn test_negative_ident_function() {
        assert_eq!(tokens("-var("), vec![TokenType::Function]);
    }

    #[test]
    fn test_preprocess_hex_escape() {
        assert_eq!(preprocess(r"\41 b"), ("A b".to_string(), false));
        assert_eq!(preprocess(r"a\:b"), (r"a\:b".to_string(), true));
    }
}
