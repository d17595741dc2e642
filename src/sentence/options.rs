use std::time::Duration;

use crate::base::Cost;
use crate::expr::DialectTable;

/// The options bundle a caller builds once and passes to every parse
/// (§5, §6 "options" / "an options bundle"). Typed fields throughout —
/// no stringly-typed config, matching the ambient-stack decision in
/// SPEC_FULL.md §1.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseOptions {
    /// How many non-optional words may end up null-linked before
    /// pruning reports "no parse at this null count" (§4.4.6, §7).
    pub null_budget: usize,
    /// Per-sentence override of the dictionary's default disjunct-cost
    /// cutoff (§4.3 "Cost cutoff").
    pub max_disjunct_cost: Cost,
    /// Cap on the number of linkages the enumerator returns (§4.5
    /// `linkage_limit`).
    pub linkage_limit: usize,
    /// Accept a linkage with more than one connected component (§4.5).
    pub allow_islands: bool,
    /// Deterministic linkage ordering with a stable tie-break; when
    /// `false`, a sentence-local randomized tie-break is used instead
    /// (§5).
    pub repeatable_rand: bool,
    /// Process-wide 32-bit state seeded at options-create time (§5),
    /// consulted only when `repeatable_rand` is `false`.
    pub rand_seed: u32,
    /// `short_length` (§4.4.1's length-limit default, §8 scenario 6).
    pub short_length: u8,
    /// Force every connector to the `short_length` cap, even ones the
    /// dictionary otherwise marked `UNLIMITED` (§4.1 `set_unlimited`).
    pub all_short: bool,
    /// Wall-clock budget for a single sentence parse (§5 `max_parse_time`).
    #[cfg_attr(feature = "config", serde(with = "duration_secs", default))]
    pub max_parse_time: Option<Duration>,
    /// Approximate working-memory budget in bytes (§5 `max_memory`).
    pub max_memory: Option<usize>,
    /// Optional dialect cost overlay consulted while copying each
    /// word's expression into sentence-local working memory (§4.2,
    /// §6 "Optional dialect configuration").
    #[cfg_attr(feature = "config", serde(skip))]
    pub dialect: Option<DialectTable>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            null_budget: 0,
            max_disjunct_cost: 2.7,
            linkage_limit: 1000,
            allow_islands: false,
            repeatable_rand: true,
            rand_seed: 0,
            short_length: 16,
            all_short: false,
            max_parse_time: None,
            max_memory: None,
            dialect: None,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_null_budget(mut self, n: usize) -> Self {
        self.null_budget = n;
        self
    }

    pub fn with_max_disjunct_cost(mut self, cost: Cost) -> Self {
        self.max_disjunct_cost = cost;
        self
    }

    pub fn with_linkage_limit(mut self, limit: usize) -> Self {
        self.linkage_limit = limit;
        self
    }

    pub fn with_allow_islands(mut self, allow: bool) -> Self {
        self.allow_islands = allow;
        self
    }

    pub fn with_repeatable_rand(mut self, repeatable: bool) -> Self {
        self.repeatable_rand = repeatable;
        self
    }

    pub fn with_rand_seed(mut self, seed: u32) -> Self {
        self.rand_seed = seed;
        self
    }

    pub fn with_short_length(mut self, len: u8) -> Self {
        self.short_length = len;
        self
    }

    pub fn with_all_short(mut self, all_short: bool) -> Self {
        self.all_short = all_short;
        self
    }

    pub fn with_max_parse_time(mut self, d: Duration) -> Self {
        self.max_parse_time = Some(d);
        self
    }

    pub fn with_max_memory(mut self, bytes: usize) -> Self {
        self.max_memory = Some(bytes);
        self
    }

    pub fn with_dialect(mut self, dialect: DialectTable) -> Self {
        self.dialect = Some(dialect);
        self
    }
}

#[cfg(feature = "config")]
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        value.map(|d| d.as_secs_f64()).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<f64>::deserialize(d)?.map(Duration::from_secs_f64))
    }
}
