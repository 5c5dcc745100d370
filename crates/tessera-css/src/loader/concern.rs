//! Loader stacks kept apart per styling concern.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use strum_macros::{Display, EnumString};

use super::{LayeredStyleLoader, StackView};
use crate::model::SharedSheetPool;

/// What the sheets of a stack style.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    Serialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Concern {
    /// Widget layouts and geometry.
    Layouts,
    /// Colors.
    Colors,
    /// Rules read by queries on every other stack.
    All,
}

/// One [`LayeredStyleLoader`] per [`Concern`], created on first use.
///
/// Every stack shares the registry's sheet pool. A query on any stack but
/// [`Concern::All`] also reads the `All` stack, so a sheet loaded there
/// reaches every concern while a sheet loaded for one concern stays in its
/// own stack.
#[derive(Debug, Default)]
pub struct ConcernStacks {
    stacks: BTreeMap<Concern, LayeredStyleLoader>,
    pool: Arc<SharedSheetPool>,
    medium: Option<String>,
}

impl ConcernStacks {
    /// An empty registry with its own sheet pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty registry whose stacks reuse sheets from `pool`.
    #[must_use]
    pub fn with_pool(pool: Arc<SharedSheetPool>) -> Self {
        Self {
            pool,
            ..Self::default()
        }
    }

    /// The pool shared by every stack.
    #[must_use]
    pub const fn pool(&self) -> &Arc<SharedSheetPool> {
        &self.pool
    }

    /// The stack of `concern`, if anything created it yet.
    #[must_use]
    pub fn stack(&self, concern: Concern) -> Option<&LayeredStyleLoader> {
        self.stacks.get(&concern)
    }

    /// The stack of `concern`, created on first use.
    pub fn stack_mut(&mut self, concern: Concern) -> &mut LayeredStyleLoader {
        let Self {
            stacks,
            pool,
            medium,
        } = self;
        stacks.entry(concern).or_insert_with(|| {
            tracing::debug!(%concern, "creating stylesheet stack");
            let mut stack = LayeredStyleLoader::with_pool(Arc::clone(pool));
            if let Some(medium) = medium {
                stack.set_medium(medium);
            }
            stack
        })
    }

    /// The layers a query for `concern` reads.
    #[must_use]
    pub fn view(&self, concern: Concern) -> StackView<'_> {
        let shared = match concern {
            Concern::All => None,
            Concern::Layouts | Concern::Colors => self.stack(Concern::All),
        };
        StackView {
            primary: self.stack(concern),
            shared,
        }
    }

    /// Set the `@media` medium of every stack, including ones created later.
    pub fn set_medium(&mut self, medium: &str) {
        for stack in self.stacks.values_mut() {
            stack.set_medium(medium);
        }
        self.medium = Some(medium.to_string());
    }

    /// Remove every sheet from every stack.
    pub fn clear(&mut self) {
        for stack in self.stacks.values_mut() {
            stack.clear();
        }
    }
}
