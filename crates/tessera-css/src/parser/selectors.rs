//! Selector grammar.
//!
//! ```text
//! selector   : simple_selector [ combinator simple_selector ]*
//! simple     : [ IDENT | '*' ] [ HASH | '.' IDENT | attrib | pseudo ]*
//! attrib     : '[' S* '!'? IDENT S* [ [ '=' | '~=' | '|=' ] S* [ IDENT | STRING ] S* ]? ']'
//! pseudo     : ':' ':'? '!'? [ IDENT | FUNCTION S* IDENT S* ')' ]
//! combinator : '+' S* | '>' S* | S+
//! ```

use super::{Failure, Parser, Step, push};
use crate::model::{AttributeSelector, BasicSelector, Pseudo, Relation, Selector, ValueMatch};
use crate::scanner::TokenType;
use crate::tables::{PSEUDO_CLASSES, find_known_value};

impl Parser {
    /// Consume a symbol that can start a compound selector.
    pub(super) fn test_simple_selector_start(&mut self) -> bool {
        self.test(TokenType::Ident)
            || self.test(TokenType::Star)
            || self.test(TokenType::Hash)
            || self.test(TokenType::Dot)
            || self.test(TokenType::LBracket)
            || self.test(TokenType::Colon)
    }

    fn test_combinator(&mut self) -> bool {
        self.test(TokenType::Plus) || self.test(TokenType::Greater) || self.test(TokenType::S)
    }

    /// A full selector whose first symbol has already been consumed.
    pub(super) fn parse_selector(&mut self) -> Step<Selector> {
        let mut selector = Selector::default();
        let mut basic = BasicSelector::default();
        self.parse_simple_selector(&mut basic)?;
        while self.test_combinator() {
            basic.relation_to_next = self.parse_combinator();
            if !self.test_simple_selector_start() {
                // trailing whitespace before `{` or `,`
                basic.relation_to_next = Relation::None;
                break;
            }
            push(&mut selector.basic_selectors, std::mem::take(&mut basic))?;
            self.parse_simple_selector(&mut basic)?;
        }
        push(&mut selector.basic_selectors, basic)?;
        Ok(selector)
    }

    /// One compound selector. The symbol that started it has been consumed.
    fn parse_simple_selector(&mut self, basic: &mut BasicSelector) -> Step {
        let mut min_count = 0;
        match self.lookup() {
            TokenType::Ident => basic.element_name = self.lexem(),
            TokenType::Star => basic.element_name.clear(),
            _ => {
                self.prev();
                min_count = 1;
            }
        }

        let mut count = 0;
        loop {
            if self.test(TokenType::Hash) {
                let lexem = self.lexem();
                let id = lexem.strip_prefix('#').unwrap_or(&lexem).to_string();
                push(&mut basic.ids, id)?;
            } else if self.test(TokenType::Dot) {
                self.expect(TokenType::Ident)?;
                let class = AttributeSelector {
                    name: "class".to_string(),
                    value: self.lexem(),
                    match_kind: ValueMatch::Contains,
                    negated: false,
                };
                push(&mut basic.attribute_selectors, class)?;
            } else if self.test(TokenType::LBracket) {
                let attribute = self.parse_attribute()?;
                push(&mut basic.attribute_selectors, attribute)?;
            } else if self.test(TokenType::Colon) {
                let pseudo = self.parse_pseudo()?;
                push(&mut basic.pseudos, pseudo)?;
            } else {
                break;
            }
            count += 1;
        }

        if count >= min_count {
            Ok(())
        } else {
            Err(Failure::Syntax)
        }
    }

    /// `[...]` with the opening bracket consumed.
    fn parse_attribute(&mut self) -> Step<AttributeSelector> {
        let mut attribute = AttributeSelector::default();
        self.skip_space();
        if self.test(TokenType::Exclamation) {
            attribute.negated = true;
        }
        self.expect(TokenType::Ident)?;
        attribute.name = self.lexem();
        self.skip_space();
        if self.test(TokenType::Exclamation) {
            attribute.negated = !attribute.negated;
        }

        attribute.match_kind = if self.test(TokenType::Equal) {
            ValueMatch::Equal
        } else if self.test(TokenType::Includes) {
            ValueMatch::Contains
        } else if self.test(TokenType::DashMatch) {
            ValueMatch::BeginsWith
        } else {
            self.expect(TokenType::RBracket)?;
            return Ok(attribute);
        };

        self.skip_space();
        if !self.test(TokenType::Ident) {
            self.expect(TokenType::String)?;
        }
        attribute.value = self.unquoted_lexem();
        self.skip_space();
        self.expect(TokenType::RBracket)?;
        Ok(attribute)
    }

    /// `:name`, `::name`, `:!name` or `:name(arg)` with the first colon
    /// consumed.
    fn parse_pseudo(&mut self) -> Step<Pseudo> {
        let mut pseudo = Pseudo::default();
        let _ = self.test(TokenType::Colon);
        pseudo.negated = self.test(TokenType::Exclamation);
        if self.test(TokenType::Ident) {
            pseudo.name = self.lexem();
            pseudo.kind = find_known_value(&pseudo.name, PSEUDO_CLASSES);
            return Ok(pseudo);
        }

        self.expect(TokenType::Function)?;
        let mut function = self.lexem();
        let _ = function.pop();
        pseudo.function = function;
        self.skip_space();
        if !self.test(TokenType::Ident) {
            return Err(self.record_error());
        }
        pseudo.name = self.lexem();
        self.skip_space();
        self.expect(TokenType::RParen)?;
        Ok(pseudo)
    }

    fn parse_combinator(&mut self) -> Relation {
        let mut relation = Relation::None;
        if self.lookup() == TokenType::S {
            relation = Relation::Ancestor;
            self.skip_space();
        } else {
            self.prev();
        }
        if self.test(TokenType::Plus) {
            relation = Relation::PrecedingSibling;
        } else if self.test(TokenType::Greater) {
            relation = Relation::Parent;
        }
        self.skip_space();
        relation
    }
}
