//! Selectors.

use serde::Serialize;
use strum_macros::Display;

use crate::tables::PseudoClass;

/// A `:pseudo` or `::pseudo-element` entry of a compound selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pseudo {
    /// Whether the entry was written `:!name`.
    pub negated: bool,
    /// Pseudo-class bit, [`PseudoClass::UNKNOWN`] for pseudo-elements and
    /// unrecognized names.
    pub kind: PseudoClass,
    /// Name as written.
    pub name: String,
    /// Argument of a functional pseudo (`:name(arg)`), empty otherwise.
    pub function: String,
}

/// How an attribute selector compares the attribute value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize)]
pub enum ValueMatch {
    /// `[attr]`: the attribute is set.
    #[default]
    NoMatch,
    /// `[attr=value]`
    Equal,
    /// `[attr~=value]`: a space-separated word equals the value.
    Contains,
    /// `[attr|=value]`: the attribute starts with the value.
    BeginsWith,
}

/// `[name op value]`, or `.class` as a `class` attribute with
/// [`ValueMatch::Contains`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttributeSelector {
    /// Attribute name.
    pub name: String,
    /// Value to compare against.
    pub value: String,
    /// Comparison.
    pub match_kind: ValueMatch,
    /// Whether the result is inverted (`[!attr]`).
    pub negated: bool,
}

/// Relation of a compound selector to the one that follows it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize)]
pub enum Relation {
    /// Last compound in the chain.
    #[default]
    None,
    /// Whitespace combinator.
    Ancestor,
    /// `>` combinator.
    Parent,
    /// `+` combinator.
    PrecedingSibling,
}

/// A compound selector: element name plus id, attribute and pseudo
/// predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BasicSelector {
    /// Element (class) name, `*` or empty.
    pub element_name: String,
    /// Required ids.
    pub ids: Vec<String>,
    /// Pseudo-classes and pseudo-elements.
    pub pseudos: Vec<Pseudo>,
    /// Attribute predicates, all of which must match.
    pub attribute_selectors: Vec<AttributeSelector>,
    /// Relation to the next compound.
    pub relation_to_next: Relation,
}

/// A chain of compound selectors joined by combinators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selector {
    /// Compound selectors in source order; only the last has
    /// [`Relation::None`].
    pub basic_selectors: Vec<BasicSelector>,
}

impl Selector {
    /// One per named compound, 16 per pseudo or attribute predicate and 256
    /// per id.
    #[must_use]
    pub fn specificity(&self) -> i32 {
        self.basic_selectors
            .iter()
            .map(|sel| {
                let named = i32::from(!sel.element_name.is_empty());
                let predicates = (sel.pseudos.len() + sel.attribute_selectors.len()) as i32;
                named + predicates * 0x10 + sel.ids.len() as i32 * 0x100
            })
            .sum()
    }

    /// Name of the pseudo-element of the last compound, empty if none.
    ///
    /// A pseudo-element is an unrecognized pseudo name in the first pseudo
    /// slot.
    #[must_use]
    pub fn pseudo_element(&self) -> &str {
        self.basic_selectors
            .last()
            .and_then(|sel| sel.pseudos.first())
            .filter(|pseudo| pseudo.kind == PseudoClass::UNKNOWN)
            .map_or("", |pseudo| pseudo.name.as_str())
    }

    /// Positive and negated pseudo-class masks of the last compound.
    ///
    /// A compound without pseudos reports [`PseudoClass::UNSPECIFIED`]; one
    /// with an unrecognized pseudo-class (outside the pseudo-element slot)
    /// reports [`PseudoClass::UNKNOWN`].
    #[must_use]
    pub fn pseudo_class(&self) -> (PseudoClass, PseudoClass) {
        let mut negated = PseudoClass::UNKNOWN;
        let Some(last) = self.basic_selectors.last() else {
            return (PseudoClass::UNSPECIFIED, negated);
        };
        if last.pseudos.is_empty() {
            return (PseudoClass::UNSPECIFIED, negated);
        }
        let skip = usize::from(!self.pseudo_element().is_empty());
        let mut positive = PseudoClass::UNKNOWN;
        for pseudo in &last.pseudos[skip..] {
            if pseudo.kind == PseudoClass::UNKNOWN {
                return (PseudoClass::UNKNOWN, negated);
            }
            if pseudo.negated {
                negated |= pseudo.kind;
            } else {
                positive |= pseudo.kind;
            }
        }
        (positive, negated)
    }

    /// Element name of the last compound, or `*` when it has none.
    #[must_use]
    pub fn bucket_name(&self) -> &str {
        self.basic_selectors
            .last()
            .map(|sel| sel.element_name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(super::GLOBAL_SELECTOR)
    }
}
