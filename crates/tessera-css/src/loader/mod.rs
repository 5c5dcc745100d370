//! Layered stylesheet loading.
//!
//! Sheets are grouped into priority layers, from the engine's core rules up
//! to operator overrides. Each layer has its own [`StyleSelector`]; queries
//! merge the layers so that the cascade weight decides first and, between
//! equal weights, the higher layer wins.
//!
//! Core, theme and operator sheets are parsed once into a
//! [`SharedSheetPool`] keyed by their canonical path and reused by every
//! loader sharing the pool. Application sheets always get private copies.
//!
//! [`ConcernStacks`] keeps a separate loader per styling [`Concern`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};
use tessera_common::warning::clear_warnings;
use thiserror::Error;

use crate::cascade::{
    Orientation, SheetId, StyleNode, StyleSelector, WeightedDeclaration, WeightedRule,
};
use crate::model::{Declaration, SharedSheetPool, StorageKind, StyleRule, StyleSheet};
use crate::parser::{ParseError, Parser};
use crate::tables::PseudoClass;

mod concern;

pub use concern::{Concern, ConcernStacks};

/// Extension of the files [`LayeredStyleLoader::load_dir`] picks up.
const SHEET_EXTENSION: &str = "css";

/// Stylesheet layers, lowest priority first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, Serialize,
)]
pub enum LayerPriority {
    /// Built-in engine rules. Their variables are the defaults.
    Core,
    /// The platform theme.
    Theme,
    /// Theme rules shipped by an application.
    AppTheme,
    /// Application rules.
    Application,
    /// Operator customization.
    Operator,
}

impl LayerPriority {
    const COUNT: usize = 5;

    const fn index(self) -> usize {
        self as usize
    }

    /// Storage used for sheets of this layer.
    #[must_use]
    pub const fn storage(self) -> StorageKind {
        match self {
            Self::AppTheme | Self::Application => StorageKind::Heap,
            Self::Core | Self::Theme | Self::Operator => StorageKind::Shared,
        }
    }
}

/// Failure to load a stylesheet.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The sheet could not be read or parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A stylesheet directory could not be listed.
    #[error("failed to read stylesheet directory {}: {source}", .path.display())]
    Io {
        /// Directory that was being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// A sheet loaded into a layer, for [`LayeredStyleLoader::unload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SheetHandle(SheetId);

impl SheetHandle {
    /// The sheet's id in its layer's selector.
    #[must_use]
    pub const fn id(self) -> SheetId {
        self.0
    }
}

/// Stylesheets organised into [`LayerPriority`] layers.
#[derive(Debug, Default)]
pub struct LayeredStyleLoader {
    layers: [StyleSelector; LayerPriority::COUNT],
    pool: Arc<SharedSheetPool>,
}

impl LayeredStyleLoader {
    /// An empty loader with its own sheet pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty loader reusing sheets from `pool`.
    #[must_use]
    pub fn with_pool(pool: Arc<SharedSheetPool>) -> Self {
        Self {
            pool,
            ..Self::default()
        }
    }

    /// The pool shared sheets are kept in.
    #[must_use]
    pub const fn pool(&self) -> &Arc<SharedSheetPool> {
        &self.pool
    }

    /// The selector of one layer.
    #[must_use]
    pub const fn layer(&self, priority: LayerPriority) -> &StyleSelector {
        &self.layers[priority.index()]
    }

    /// Set the `@media` medium of every layer.
    pub fn set_medium(&mut self, medium: &str) {
        for layer in &mut self.layers {
            layer.set_medium(medium);
        }
    }

    /// Parse the sheet at `path` and add it to a layer.
    ///
    /// Relative `url()` references are resolved against the file's
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Parse`] if the file cannot be read or parsed.
    pub fn load(
        &mut self,
        path: impl AsRef<Path>,
        priority: LayerPriority,
    ) -> Result<SheetHandle, LoadError> {
        let path = path.as_ref();
        let sheet = match priority.storage() {
            StorageKind::Shared => {
                let key = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
                if let Some(sheet) = self.pool.get(&key) {
                    tracing::debug!(path = %key.display(), "reusing pooled stylesheet");
                    sheet
                } else {
                    let sheet = Parser::from_file(path)?.parse_sheet(StorageKind::Shared)?;
                    self.pool.insert(&key, &sheet)
                }
            }
            StorageKind::Heap => {
                Arc::new(Parser::from_file(path)?.parse_sheet(StorageKind::Heap)?)
            }
        };
        tracing::debug!(path = %path.display(), layer = %priority, "loaded stylesheet");
        Ok(self.add(sheet, priority))
    }

    /// Parse `css` and add it to a layer.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Parse`] if the text cannot be parsed.
    pub fn load_str(
        &mut self,
        css: &str,
        priority: LayerPriority,
    ) -> Result<SheetHandle, LoadError> {
        let sheet = Parser::new(css).parse_sheet(priority.storage())?;
        Ok(self.add(Arc::new(sheet), priority))
    }

    /// Load several files into a layer, in order.
    ///
    /// # Errors
    ///
    /// Stops at the first file that fails to load; the files before it stay
    /// loaded.
    pub fn load_all<I, P>(
        &mut self,
        paths: I,
        priority: LayerPriority,
    ) -> Result<Vec<SheetHandle>, LoadError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        paths
            .into_iter()
            .map(|path| self.load(path, priority))
            .collect()
    }

    /// Load every `*.css` file of `dir` into a layer, in file-name order.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the directory cannot be listed and
    /// otherwise behaves like [`LayeredStyleLoader::load_all`].
    pub fn load_dir(
        &mut self,
        dir: impl AsRef<Path>,
        priority: LayerPriority,
    ) -> Result<Vec<SheetHandle>, LoadError> {
        let dir = dir.as_ref();
        let io_error = |source| LoadError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            let is_sheet = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(SHEET_EXTENSION));
            if is_sheet && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();
        self.load_all(paths, priority)
    }

    /// Remove a sheet from a layer.
    pub fn unload(&mut self, handle: SheetHandle, priority: LayerPriority) -> bool {
        self.layers[priority.index()].remove_style_sheet(handle.0)
    }

    /// Remove several sheets from a layer.
    pub fn unload_all<I>(&mut self, handles: I, priority: LayerPriority)
    where
        I: IntoIterator<Item = SheetHandle>,
    {
        for handle in handles {
            let _ = self.unload(handle, priority);
        }
    }

    /// Remove every sheet from every layer and reset deduplicated warnings.
    pub fn clear(&mut self) {
        for layer in &mut self.layers {
            layer.clear();
        }
        clear_warnings();
    }

    /// Remove every sheet from one layer.
    pub fn clear_layer(&mut self, priority: LayerPriority) {
        self.layers[priority.index()].clear();
    }

    /// Declarations active in the static pass across all layers, in cascade
    /// order.
    #[must_use]
    pub fn declarations_for_node<N: StyleNode>(
        &self,
        node: N,
        orientation: Orientation,
        extra_pseudo: Option<&str>,
    ) -> Vec<Declaration> {
        self.view()
            .declarations_for_node(node, orientation, extra_pseudo)
    }

    /// Declarations active for an interactive `state` across all layers, in
    /// cascade order.
    #[must_use]
    pub fn declarations_for_state<N: StyleNode>(
        &self,
        node: N,
        orientation: Orientation,
        extra_pseudo: Option<&str>,
        state: PseudoClass,
    ) -> Vec<Declaration> {
        self.view()
            .declarations_for_state(node, orientation, extra_pseudo, state)
    }

    /// Matching rules across all layers, in cascade order.
    #[must_use]
    pub fn style_rules_for_node<N: StyleNode>(
        &self,
        node: N,
        orientation: Orientation,
    ) -> Vec<StyleRule> {
        self.view().style_rules_for_node(node, orientation)
    }

    /// Whether any layer has orientation-specific rules for the node's
    /// class chain.
    #[must_use]
    pub fn has_orientation_specific_style_rules<N: StyleNode>(&self, node: N) -> bool {
        self.view().has_orientation_specific_style_rules(node)
    }

    /// Variables of every layer above [`LayerPriority::Core`], keyed by name.
    /// A higher layer replaces a definition from a lower one.
    #[must_use]
    pub fn variable_rule_sets(&self) -> HashMap<String, Declaration> {
        self.view().variable_rule_sets()
    }

    /// Variables of the [`LayerPriority::Core`] layer, the fallback for
    /// `var()` lookups.
    #[must_use]
    pub fn default_variables(&self) -> HashMap<String, Declaration> {
        self.view().default_variables()
    }

    /// A default variable by name.
    #[must_use]
    pub fn find_in_default_variables(&self, name: &str) -> Option<Declaration> {
        self.view().find_in_default_variables(name)
    }

    fn add(&mut self, sheet: Arc<StyleSheet>, priority: LayerPriority) -> SheetHandle {
        SheetHandle(self.layers[priority.index()].add_style_sheet(sheet))
    }

    const fn view(&self) -> StackView<'_> {
        StackView {
            primary: Some(self),
            shared: None,
        }
    }
}

/// The layers a query reads: one stack and, optionally, a shared stack
/// read alongside it.
///
/// Within each [`LayerPriority`] the primary stack's selector comes before
/// the shared one, so between equal weights the shared sheets win.
#[derive(Debug, Clone, Copy)]
pub struct StackView<'a> {
    primary: Option<&'a LayeredStyleLoader>,
    shared: Option<&'a LayeredStyleLoader>,
}

impl<'a> StackView<'a> {
    /// Declarations active in the static pass, in cascade order.
    #[must_use]
    pub fn declarations_for_node<N: StyleNode>(
        self,
        node: N,
        orientation: Orientation,
        extra_pseudo: Option<&str>,
    ) -> Vec<Declaration> {
        let weighted: Vec<WeightedDeclaration> = self.merge(|layer| {
            layer.weighted_declarations_for_node(node, orientation, extra_pseudo)
        });
        weighted.into_iter().map(|decl| decl.declaration).collect()
    }

    /// Declarations active for an interactive `state`, in cascade order.
    #[must_use]
    pub fn declarations_for_state<N: StyleNode>(
        self,
        node: N,
        orientation: Orientation,
        extra_pseudo: Option<&str>,
        state: PseudoClass,
    ) -> Vec<Declaration> {
        let weighted: Vec<WeightedDeclaration> = self.merge(|layer| {
            layer.weighted_declarations_for_state(node, orientation, extra_pseudo, state)
        });
        weighted.into_iter().map(|decl| decl.declaration).collect()
    }

    /// Matching rules, in cascade order.
    #[must_use]
    pub fn style_rules_for_node<N: StyleNode>(
        self,
        node: N,
        orientation: Orientation,
    ) -> Vec<StyleRule> {
        let weighted: Vec<WeightedRule> =
            self.merge(|layer| layer.weighted_style_rules_for_node(node, orientation));
        weighted.into_iter().map(|rule| rule.rule).collect()
    }

    /// Whether any layer has orientation-specific rules for the node's
    /// class chain.
    #[must_use]
    pub fn has_orientation_specific_style_rules<N: StyleNode>(self, node: N) -> bool {
        self.selectors()
            .any(|layer| layer.has_orientation_specific_style_rules(node))
    }

    /// Variables of every layer above [`LayerPriority::Core`], keyed by name.
    #[must_use]
    pub fn variable_rule_sets(self) -> HashMap<String, Declaration> {
        let mut variables = HashMap::new();
        for priority in LayerPriority::iter().filter(|p| *p != LayerPriority::Core) {
            for layer in self.selectors_at(priority) {
                layer.variable_rule_sets(&mut variables);
            }
        }
        variables
    }

    /// Variables of the [`LayerPriority::Core`] layers.
    #[must_use]
    pub fn default_variables(self) -> HashMap<String, Declaration> {
        let mut variables = HashMap::new();
        for layer in self.selectors_at(LayerPriority::Core) {
            layer.variable_rule_sets(&mut variables);
        }
        variables
    }

    /// A default variable by name.
    #[must_use]
    pub fn find_in_default_variables(self, name: &str) -> Option<Declaration> {
        self.default_variables().remove(name)
    }

    fn selectors_at(self, priority: LayerPriority) -> impl Iterator<Item = &'a StyleSelector> {
        [self.primary, self.shared]
            .into_iter()
            .flatten()
            .map(move |stack| stack.layer(priority))
    }

    fn selectors(self) -> impl Iterator<Item = &'a StyleSelector> {
        LayerPriority::iter().flat_map(move |priority| self.selectors_at(priority))
    }

    /// Collect weighted items from every layer, lowest first, and
    /// stable-sort them by weight.
    fn merge<T: Weighted>(self, collect: impl FnMut(&StyleSelector) -> Vec<T>) -> Vec<T> {
        let mut merged: Vec<T> = self.selectors().flat_map(collect).collect();
        merged.sort_by_key(|item| item.weight());
        merged
    }
}

trait Weighted {
    fn weight(&self) -> i64;
}

impl Weighted for WeightedRule {
    fn weight(&self) -> i64 {
        self.weight
    }
}

impl Weighted for WeightedDeclaration {
    fn weight(&self) -> i64 {
        self.weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_per_layer() {
        assert_eq!(LayerPriority::Core.storage(), StorageKind::Shared);
        assert_eq!(LayerPriority::Application.storage(), StorageKind::Heap);
        assert_eq!(LayerPriority::AppTheme.storage(), StorageKind::Heap);
        assert_eq!(LayerPriority::Operator.storage(), StorageKind::Shared);
    }

    #[test]
    fn test_layers_are_ordered() {
        let layers: Vec<_> = LayerPriority::iter().collect();
        assert_eq!(layers.len(), LayerPriority::COUNT);
        assert!(layers.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(layers.last().map(|l| l.index()), Some(LayerPriority::COUNT - 1));
    }
}
