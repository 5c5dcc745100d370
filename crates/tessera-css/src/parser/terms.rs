//! Declarations, value expressions and terms.

use tessera_common::path::resolve_reference;

use super::{Failure, Parser, Step, push, remove_quotes};
use crate::model::{Declaration, Value};
use crate::scanner::TokenType;
use crate::tables::{KNOWN_VALUES, KnownValue, find_known_value};
use crate::values::{Color, expression};

impl Parser {
    /// `property: expr [!important]`.
    ///
    /// Anything but an identifier at the cursor yields an empty declaration
    /// without consuming input.
    pub(super) fn parse_next_declaration(&mut self) -> Step<Declaration> {
        if !self.test(TokenType::Ident) {
            return Ok(Declaration::default());
        }
        let mut decl = Declaration::new(self.lexem(), Vec::new());
        self.skip_space();
        self.expect(TokenType::Colon)?;
        self.skip_space();
        if !self.test_expr() {
            return Err(self.record_error());
        }
        decl.values = self.parse_expr()?;
        if self.test_prio() {
            decl.important = true;
            self.skip_space();
        }
        Ok(decl)
    }

    /// `! important`, case-insensitive. The cursor is restored on a miss.
    fn test_prio(&mut self) -> bool {
        let rewind = self.index;
        if !self.test(TokenType::Exclamation) {
            return false;
        }
        self.skip_space();
        if self.test(TokenType::Ident) && self.lexem().eq_ignore_ascii_case("important") {
            return true;
        }
        self.index = rewind;
        false
    }

    /// Consume a symbol that can start a term.
    pub(crate) fn test_expr(&mut self) -> bool {
        self.test(TokenType::Plus)
            || self.test(TokenType::Minus)
            || self.test(TokenType::Number)
            || self.test(TokenType::Percentage)
            || self.test(TokenType::Length)
            || self.test(TokenType::String)
            || self.test(TokenType::Ident)
            || self.test(TokenType::Hash)
            || self.test(TokenType::Function)
    }

    /// Terms separated by optional `/` or `,` operators, the first term's
    /// symbol already consumed by [`Parser::test_expr`].
    pub(crate) fn parse_expr(&mut self) -> Step<Vec<Value>> {
        let mut values = Vec::new();
        push(&mut values, self.parse_term()?)?;
        loop {
            if let Some(operator) = self.parse_next_operator() {
                push(&mut values, operator)?;
            }
            if !self.test_expr() {
                break;
            }
            push(&mut values, self.parse_term()?)?;
        }
        Ok(values)
    }

    fn parse_next_operator(&mut self) -> Option<Value> {
        if !self.has_next() {
            return None;
        }
        let operator = match self.advance() {
            TokenType::Slash => Value::TermOperatorSlash,
            TokenType::Comma => Value::TermOperatorComma,
            _ => {
                self.prev();
                return None;
            }
        };
        self.skip_space();
        Some(operator)
    }

    /// One term whose first symbol has already been consumed.
    ///
    /// A leading `+` or `-` applies to numbers, percentages and lengths only.
    pub(crate) fn parse_term(&mut self) -> Step<Value> {
        let mut text = self.lexem();
        let mut unary = false;
        if matches!(self.lookup(), TokenType::Plus | TokenType::Minus) {
            unary = true;
            if !self.has_next() {
                return Err(self.record_error());
            }
            let _ = self.advance();
            text.push_str(&self.lexem());
        }

        let value = match self.lookup() {
            TokenType::Number => Value::Number(text.parse().unwrap_or_default()),
            TokenType::Percentage => {
                let _ = text.pop();
                Value::Percentage(text.parse().unwrap_or_default())
            }
            TokenType::Length => Value::Length(text),
            TokenType::String if !unary => Value::String(remove_quotes(&text).to_string()),
            TokenType::Ident if !unary => match find_known_value(&text, KNOWN_VALUES) {
                KnownValue::Unknown => Value::Identifier(text),
                id => Value::KnownIdentifier { id, original: text },
            },
            _ if unary => return Err(self.record_error()),
            _ => {
                self.prev();
                return self.parse_color_or_function();
            }
        };
        self.skip_space();
        Ok(value)
    }

    fn parse_color_or_function(&mut self) -> Step<Value> {
        if self.test(TokenType::Hash) {
            let Some(color) = Color::from_hex(&self.lexem()) else {
                return Err(Failure::Syntax);
            };
            self.skip_space();
            return Ok(Value::Color(color));
        }
        if !self.test(TokenType::Function) {
            return Err(self.record_error());
        }

        let (name, args) = self.parse_function()?;
        Ok(match name.as_str() {
            "url" => {
                let reference = remove_quotes(&args);
                Value::Uri(resolve_reference(reference, self.source_dir.as_deref()))
            }
            "var" => Value::Variable(args),
            "-var" => Value::VariableNegative(args),
            "expr" | "-expr" => {
                if !expression::is_valid(&args) {
                    return Err(self.record_error());
                }
                if name == "expr" {
                    Value::Expression(args)
                } else {
                    Value::ExpressionNegative(args)
                }
            }
            _ => Value::Function { name, args },
        })
    }

    /// Name and trimmed raw argument text of a function whose `name(` symbol
    /// has been consumed. The cursor ends after the closing parenthesis and
    /// any whitespace.
    pub(super) fn parse_function(&mut self) -> Step<(String, String)> {
        let mut name = self.lexem();
        let _ = name.pop();
        // still on the `name(` symbol, so nesting starts inside the call
        let start = self.index;
        if !self.until(TokenType::RParen) {
            return Err(self.record_error());
        }
        let args: String = self.symbols[start..self.index - 1]
            .iter()
            .map(|symbol| symbol.lexem(&self.text))
            .collect();
        self.skip_space();
        Ok((name, args.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(css: &str) -> Vec<Value> {
        let mut parser = Parser::new(css);
        assert!(parser.test_expr());
        parser.parse_expr().unwrap()
    }

    #[test]
    fn test_unary_length() {
        assert_eq!(terms("-4px"), vec![Value::Length("-4px".into())]);
        assert_eq!(terms("+2"), vec![Value::Number(2.0)]);
    }

    #[test]
    fn test_operators_between_terms() {
        assert_eq!(
            terms("1px / 2px, red"),
            vec![
                Value::Length("1px".into()),
                Value::TermOperatorSlash,
                Value::Length("2px".into()),
                Value::TermOperatorComma,
                Value::Identifier("red".into()),
            ]
        );
    }

    #[test]
    fn test_function_arguments_are_raw_text() {
        assert_eq!(
            terms("rgb(1, 2, 3)"),
            vec![Value::Function {
                name: "rgb".into(),
                args: "1, 2, 3".into(),
            }]
        );
        assert_eq!(terms("var( gap )"), vec![Value::Variable("gap".into())]);
    }

    #[test]
    fn test_unary_before_identifier_fails() {
        let mut parser = Parser::new("-bold");
        assert!(parser.test_expr());
        // `-bold` scans as one identifier
        assert_eq!(parser.parse_expr().unwrap(), vec![Value::Identifier("-bold".into())]);

        let mut parser = Parser::new("- bold");
        assert!(parser.test_expr());
        assert!(parser.parse_expr().is_err());
    }
}
