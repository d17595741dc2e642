use indexmap::IndexMap;
use rustc_hash::FxHashSet;

use crate::base::Cost;

/// A dialect component tag, e.g. the `British` or `formal-you` component
/// of a dialect file (original source: `dict-common/dialect.c`).
///
/// §5.3 of SPEC_FULL.md: plain data describing the *shape* of a dialect
/// cost overlay; parsing the dialect file itself stays external (§1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DialectTag(pub u32);

/// Cost overlay consulted by [`super::ops::copy`] (§4.2 "a symbolic tag
/// carries a cost drawn from the dialect table").
///
/// Component costs are kept in an [`IndexMap`] so iteration (e.g. when
/// listing enabled components for diagnostics) is deterministic and
/// insertion-ordered, matching the teacher's use of `IndexMap` for
/// reproducible output (`src/interchange/model.rs`).
#[derive(Debug, Default, Clone)]
pub struct DialectTable {
    costs: IndexMap<DialectTag, Cost>,
    enabled: FxHashSet<DialectTag>,
}

impl DialectTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_component(&mut self, tag: DialectTag, cost: Cost, enabled: bool) {
        self.costs.insert(tag, cost);
        if enabled {
            self.enabled.insert(tag);
        } else {
            self.enabled.remove(&tag);
        }
    }

    pub fn is_enabled(&self, tag: DialectTag) -> bool {
        self.enabled.contains(&tag)
    }

    /// The additive cost for `tag`, or `0.0` if the component is
    /// disabled or unknown (a disabled component contributes no cost —
    /// its subtree is simply not favored, but expressions carrying its
    /// tag are not otherwise special-cased here; see DESIGN.md for the
    /// "disabled subtree removal" open question).
    pub fn cost_for(&self, tag: DialectTag) -> Cost {
        if self.is_enabled(tag) {
            self.costs.get(&tag).copied().unwrap_or(0.0)
        } else {
            0.0
        }
    }
}
