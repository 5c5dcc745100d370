//! Integration tests for the stylesheet scanner.

use quickcheck_macros::quickcheck;
use tessera_css::scanner::{Scanner, Symbol, TokenType, preprocess, scan};

fn tokens(input: &str) -> Vec<TokenType> {
    scan(input).into_iter().map(|symbol| symbol.token).collect()
}

fn lexemes(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    scan(input)
        .into_iter()
        .filter(|symbol| symbol.token != TokenType::S)
        .map(|symbol| symbol.lexem(&chars))
        .collect()
}

#[test]
fn test_simple_rule() {
    use TokenType::{Colon, Ident, LBrace, Length, RBrace, S, Semicolon};
    assert_eq!(
        tokens("Label { width: 4px; }"),
        [Ident, LBrace, S, Ident, Colon, S, Length, Semicolon, S, RBrace]
    );
}

#[test]
fn test_combinators_absorb_leading_whitespace() {
    use TokenType::{Comma, Greater, Ident, Plus, S};
    assert_eq!(
        tokens("a > b + c , d"),
        [Ident, Greater, S, Ident, Plus, S, Ident, Comma, S, Ident]
    );
    assert_eq!(tokens("a b"), [Ident, S, Ident]);
}

#[test]
fn test_numbers_lengths_and_percentages() {
    use TokenType::{Length, Number, Percentage, S};
    assert_eq!(
        tokens("12 1.5 .5 4un 2mm 50%"),
        [Number, S, Number, S, Number, S, Length, S, Length, S, Percentage]
    );
    assert_eq!(lexemes("1.5em"), ["1.5em"]);
}

#[test]
fn test_functions_and_at_keywords() {
    use TokenType::{AtKeyword, Function, Ident, RParen, S};
    assert_eq!(
        tokens("@variables var(gap)"),
        [AtKeyword, S, Function, Ident, RParen]
    );
    assert_eq!(lexemes("rgb("), ["rgb("]);
}

#[test]
fn test_hash_and_selector_punctuation() {
    use TokenType::{Colon, Dot, Exclamation, Hash, Ident, LBracket, RBracket, Star};
    assert_eq!(
        tokens("*#ok.wide[flat]:!hover"),
        [
            Star, Hash, Dot, Ident, LBracket, Ident, RBracket, Colon, Exclamation, Ident
        ]
    );
    assert_eq!(tokens("#"), [TokenType::Invalid]);
}

#[test]
fn test_attribute_operators() {
    use TokenType::{DashMatch, Equal, Ident, Includes};
    assert_eq!(
        tokens("a~=b|=c=d"),
        [Ident, Includes, Ident, DashMatch, Ident, Equal, Ident]
    );
}

#[test]
fn test_strings() {
    assert_eq!(
        tokens("\"a b\" 'c'"),
        [TokenType::String, TokenType::S, TokenType::String]
    );
    assert_eq!(lexemes(r#""say \"hi\"""#), [r#""say "hi"""#]);
    assert_eq!(tokens("\"open\nx"), [TokenType::Invalid, TokenType::S, TokenType::Ident]);
    assert_eq!(tokens("'unterminated"), [TokenType::Invalid]);
}

#[test]
fn test_cdo_cdc() {
    use TokenType::{Cdc, Cdo, S};
    assert_eq!(tokens("<!-- -->"), [Cdo, S, Cdc]);
}

#[test]
fn test_unterminated_comment_runs_to_end() {
    assert_eq!(tokens("a/* open"), [TokenType::Ident, TokenType::S]);
    assert_eq!(tokens("a /* b */"), [TokenType::Ident, TokenType::S, TokenType::S]);
}

#[test]
fn test_escaped_identifier() {
    let (text, has_escapes) = preprocess(r"Label\:x");
    assert!(has_escapes);
    assert_eq!(tokens(&text), [TokenType::Ident]);
    assert_eq!(lexemes(&text), ["Label:x"]);
}

#[test]
fn test_preprocess_replaces_hex_escapes() {
    assert_eq!(preprocess(r"\E9t\E9"), ("été".to_string(), false));
    assert_eq!(preprocess("plain"), ("plain".to_string(), false));
    // an out-of-range escape stays as written
    assert_eq!(preprocess(r"\110000"), (r"\110000".to_string(), false));
}

#[test]
fn test_scanner_exposes_input() {
    let mut scanner = Scanner::new("é {");
    scanner.run();
    assert_eq!(scanner.input(), ['é', ' ', '{']);
    let symbols = scanner.into_symbols();
    assert_eq!(
        symbols,
        [
            Symbol {
                token: TokenType::Ident,
                start: 0,
                len: 1
            },
            Symbol {
                token: TokenType::LBrace,
                start: 1,
                len: 2
            }
        ]
    );
}

#[quickcheck]
fn prop_symbols_cover_input(input: String) -> bool {
    let chars: Vec<char> = input.chars().collect();
    let symbols = scan(&input);
    let mut next = 0;
    for symbol in &symbols {
        if symbol.start != next || symbol.len == 0 {
            return false;
        }
        next += symbol.len;
    }
    let rebuilt: String = symbols.iter().map(|symbol| symbol.raw(&chars)).collect();
    next == chars.len() && rebuilt == input
}

#[quickcheck]
fn prop_preprocess_without_backslash_is_identity(input: String) -> bool {
    let input = input.replace('\\', "");
    preprocess(&input) == (input, false)
}
