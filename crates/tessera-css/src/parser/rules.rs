//! Sheet-level rules: `@charset`, `@import`, `@variables`, `@media`,
//! `@page` and style rules.

use super::{Failure, Parser, Step, push, remove_quotes};
use crate::model::{
    Declaration, ImportRule, MediaRule, PageRule, StyleRule, StyleSheet, VariableRule,
};
use crate::scanner::TokenType;

impl Parser {
    pub(super) fn parse_sheet_rules(&mut self, sheet: &mut StyleSheet) -> Step {
        if self.test_at_keyword("charset") {
            self.skip_space_and_markup();
            self.expect(TokenType::String)?;
            self.expect(TokenType::Semicolon)?;
        }
        self.skip_space_and_markup();

        while self.test_at_keyword("import") {
            let rule = self.parse_import()?;
            push(&mut sheet.import_rules, rule)?;
            self.skip_space_and_markup();
        }

        loop {
            if self.test_at_keyword("variables") {
                let rule = self.parse_variable_set()?;
                push(&mut sheet.variable_rules, rule)?;
            } else if self.test_at_keyword("media") {
                let rule = self.parse_media()?;
                push(&mut sheet.media_rules, rule)?;
            } else if self.test_at_keyword("page") {
                let rule = self.parse_page()?;
                push(&mut sheet.page_rules, rule)?;
            } else if self.test_simple_selector_start() {
                let rule = self.parse_ruleset()?;
                file_style_rule(sheet, rule);
            } else if self.test(TokenType::AtKeyword) {
                self.warn(&format!("skipping unsupported at-rule {}", self.lexem()));
                if !self.until(TokenType::RBrace) {
                    return Err(Failure::Syntax);
                }
            } else if self.has_next() {
                return Err(self.record_error());
            }
            self.skip_space_and_markup();
            if !self.has_next() {
                break;
            }
        }
        Ok(())
    }

    /// `@import url("x.css") screen, print;` with the at-keyword consumed.
    fn parse_import(&mut self) -> Step<ImportRule> {
        let mut rule = ImportRule::default();
        self.skip_space();
        if self.test(TokenType::String) {
            rule.href = self.unquoted_lexem();
        } else {
            let Some(href) = self.test_and_parse_uri()? else {
                return Err(self.record_error());
            };
            rule.href = remove_quotes(&href).to_string();
        }
        self.skip_space();

        if self.test(TokenType::Ident) {
            push(&mut rule.media, self.lexem())?;
            self.skip_space();
            while self.test(TokenType::Comma) {
                self.skip_space();
                self.expect(TokenType::Ident)?;
                push(&mut rule.media, self.lexem())?;
                self.skip_space();
            }
        }
        self.expect(TokenType::Semicolon)?;
        self.skip_space();
        Ok(rule)
    }

    /// A `url(...)` function; the cursor is restored when the next symbol is
    /// some other function.
    fn test_and_parse_uri(&mut self) -> Step<Option<String>> {
        let rewind = self.index;
        if !self.test(TokenType::Function) {
            return Ok(None);
        }
        let (name, args) = self.parse_function()?;
        if name.eq_ignore_ascii_case("url") {
            Ok(Some(args))
        } else {
            self.index = rewind;
            Ok(None)
        }
    }

    /// `@media print, screen { rules }` with the at-keyword consumed.
    ///
    /// Rules inside a media block keep all of their selectors.
    fn parse_media(&mut self) -> Step<MediaRule> {
        let mut rule = MediaRule::default();
        loop {
            self.skip_space();
            self.expect(TokenType::Ident)?;
            push(&mut rule.media, self.lexem())?;
            self.skip_space();
            if !self.test(TokenType::Comma) {
                break;
            }
        }
        self.expect(TokenType::LBrace)?;
        self.skip_space();
        while self.test_simple_selector_start() {
            let style_rule = self.parse_ruleset()?;
            push(&mut rule.style_rules, style_rule)?;
        }
        self.expect(TokenType::RBrace)?;
        self.skip_space();
        Ok(rule)
    }

    /// `@page [:name] { declarations }` with the at-keyword consumed.
    fn parse_page(&mut self) -> Step<PageRule> {
        let mut rule = PageRule::default();
        self.skip_space();
        if self.test(TokenType::Colon) {
            self.expect(TokenType::Ident)?;
            rule.selector = self.lexem();
        }
        self.skip_space();
        self.expect(TokenType::LBrace)?;
        loop {
            self.skip_space();
            let decl = self.parse_next_declaration()?;
            if !decl.is_empty() {
                push(&mut rule.declarations, decl)?;
            }
            if !self.test(TokenType::Semicolon) {
                break;
            }
        }
        self.expect(TokenType::RBrace)?;
        self.skip_space();
        Ok(rule)
    }

    /// `@variables { name: value; ... }` with the at-keyword consumed.
    fn parse_variable_set(&mut self) -> Step<VariableRule> {
        let mut rule = VariableRule::default();
        self.skip_space();
        self.expect(TokenType::LBrace)?;
        self.parse_declaration_block(&mut rule.declarations)?;
        Ok(rule)
    }

    /// A style rule whose first selector symbol was consumed by
    /// [`Parser::test_simple_selector_start`].
    pub(super) fn parse_ruleset(&mut self) -> Step<StyleRule> {
        let mut rule = StyleRule::default();
        let selector = self.parse_selector()?;
        push(&mut rule.selectors, selector)?;
        while self.test(TokenType::Comma) {
            self.skip_space();
            if !self.test_simple_selector_start() {
                return Err(self.record_error());
            }
            let selector = self.parse_selector()?;
            push(&mut rule.selectors, selector)?;
        }
        self.skip_space();
        self.expect(TokenType::LBrace)?;
        self.parse_declaration_block(&mut rule.declarations)?;
        Ok(rule)
    }

    /// Declarations up to and including the closing `}`, the opening `{`
    /// already consumed.
    ///
    /// A declaration that fails to parse is dropped and parsing resumes after
    /// the next `;` of the same block. When no such `;` exists the block is
    /// closed early and the declarations read so far are kept.
    fn parse_declaration_block(&mut self, declarations: &mut Vec<Declaration>) -> Step {
        let block_start = self.index;
        loop {
            self.skip_space();
            let rewind = self.index;
            let decl = match self.parse_next_declaration() {
                Ok(decl) => decl,
                Err(Failure::Syntax) => {
                    self.index = rewind;
                    let found_semicolon = self.until_in_block(TokenType::Semicolon);
                    let semicolon_index = self.index;
                    self.index = block_start;
                    let found_rbrace = self.until(TokenType::RBrace);
                    if found_semicolon && semicolon_index < self.index {
                        self.warn_dropped_declaration(rewind);
                        self.index = semicolon_index - 1;
                        Declaration::default()
                    } else {
                        self.warn_dropped_declaration(rewind);
                        self.skip_space();
                        return if found_rbrace {
                            Ok(())
                        } else {
                            Err(Failure::Syntax)
                        };
                    }
                }
                Err(failure) => return Err(failure),
            };
            if !decl.is_empty() {
                push(declarations, decl)?;
            }
            if !self.test(TokenType::Semicolon) {
                break;
            }
        }
        while self.test(TokenType::Semicolon) {}
        self.expect(TokenType::RBrace)?;
        self.skip_space();
        Ok(())
    }

    fn warn_dropped_declaration(&self, at: usize) {
        let name = self
            .symbols
            .get(at)
            .map(|symbol| symbol.lexem(&self.text))
            .unwrap_or_default();
        self.warn(&format!("dropping malformed declaration '{name}'"));
    }
}

/// Split a parsed rule per selector and file each copy under the class
/// name of that selector's last compound.
fn file_style_rule(sheet: &mut StyleSheet, rule: StyleRule) {
    for selector in rule.selectors {
        let bucket = selector.bucket_name().to_string();
        sheet.add_style_rule(
            &bucket,
            StyleRule {
                selectors: vec![selector],
                declarations: rule.declarations.clone(),
            },
        );
    }
}
