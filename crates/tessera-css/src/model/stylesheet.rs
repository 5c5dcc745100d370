//! Stylesheets and the shared sheet pool.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use strum_macros::Display;

use super::rules::{ImportRule, MediaRule, PageRule, StyleRule, VariableRule, WidgetStyleRules};

/// Where a sheet's rule storage lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize)]
pub enum StorageKind {
    /// Private to one owner.
    #[default]
    Heap,
    /// Held in a [`SharedSheetPool`] and reused by several owners.
    Shared,
}

/// Cascade origin of a sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize)]
#[allow(missing_docs)]
pub enum SheetOrigin {
    #[default]
    Unspecified,
    UserAgent,
    User,
    Author,
    Inline,
}

/// A parsed stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StyleSheet {
    /// Storage the sheet was built in.
    pub storage: StorageKind,
    /// `@variables` blocks.
    pub variable_rules: Vec<VariableRule>,
    /// Style rules bucketed by the class name of their last compound
    /// selector.
    pub widget_rules: BTreeMap<String, WidgetStyleRules>,
    /// `@media` blocks.
    pub media_rules: Vec<MediaRule>,
    /// `@page` blocks.
    pub page_rules: Vec<PageRule>,
    /// `@import` rules.
    pub import_rules: Vec<ImportRule>,
    /// Cascade origin.
    pub origin: SheetOrigin,
    /// Nesting depth of an inline sheet.
    pub depth: i32,
    /// File the sheet was read from.
    pub file_name: Option<PathBuf>,
}

impl StyleSheet {
    /// An empty sheet in the given storage.
    #[must_use]
    pub fn new(storage: StorageKind) -> Self {
        Self {
            storage,
            ..Self::default()
        }
    }

    /// A deep copy of this sheet in `storage`. The receiver is left as is.
    #[must_use]
    pub fn copy_into(&self, storage: StorageKind) -> Self {
        Self {
            storage,
            ..self.clone()
        }
    }

    /// The rule bucket for `class_name`.
    #[must_use]
    pub fn widget_stack(&self, class_name: &str) -> Option<&WidgetStyleRules> {
        self.widget_rules.get(class_name)
    }

    /// File `rule` into the bucket for `class_name`, creating the bucket if
    /// needed.
    ///
    /// Rules gated on `:portrait` (or `:!landscape`) and `:landscape` (or
    /// `:!portrait`) go to the orientation lists.
    pub fn add_style_rule(&mut self, class_name: &str, rule: StyleRule) {
        let bucket = self
            .widget_rules
            .entry(class_name.to_string())
            .or_insert_with(|| WidgetStyleRules::new(class_name));
        if !bucket.depends_on_screen {
            bucket.depends_on_screen = rule.depends_on_screen();
        }
        bucket.list_for(&rule).push(rule);
    }

    /// Number of style rules across all buckets and media blocks.
    #[must_use]
    pub fn style_rule_count(&self) -> usize {
        self.widget_rules.values().map(WidgetStyleRules::len).sum::<usize>()
            + self
                .media_rules
                .iter()
                .map(|media| media.style_rules.len())
                .sum::<usize>()
    }
}

/// Process-wide pool of parsed sheets keyed by source path.
///
/// Sheets in the pool are stored with [`StorageKind::Shared`] and handed out
/// as `Arc`s; the pool is the owner and every loader holds a reference.
#[derive(Debug, Default)]
pub struct SharedSheetPool {
    sheets: Mutex<HashMap<PathBuf, Arc<StyleSheet>>>,
}

impl SharedSheetPool {
    /// An empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The pooled sheet for `path`, if any.
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<Arc<StyleSheet>> {
        self.sheets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }

    /// Store a copy of `sheet` for `path` and return the pooled instance. An
    /// existing entry wins.
    #[must_use]
    pub fn insert(&self, path: &Path, sheet: &StyleSheet) -> Arc<StyleSheet> {
        let mut sheets = self.sheets.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            sheets
                .entry(path.to_path_buf())
                .or_insert_with(|| Arc::new(sheet.copy_into(StorageKind::Shared))),
        )
    }

    /// Drop the pool entry for `path`. Holders of the sheet keep their
    /// reference.
    #[must_use]
    pub fn remove(&self, path: &Path) -> bool {
        self.sheets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path)
            .is_some()
    }

    /// Number of pooled sheets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sheets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the pool is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
