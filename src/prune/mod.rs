//! Pruner (§4.4 of SPEC_FULL.md).
//!
//! Drives expression pruning, power pruning, mandatory-link pruning and
//! contains-one pp-pruning to a fixed point, in that order, rerunning
//! earlier passes whenever a later one changes anything (§4.4.6).

pub mod expression;
pub mod matching;
pub mod mlink;
pub mod power;
pub mod ppprune;

use crate::base::WordId;
use crate::cdt::ConnectorTable;
use crate::disjunct::{Disjunct, TraconPool};
use crate::expr::ExprArena;
use crate::postprocess::PpKnowledge;

pub use expression::WordExpr;

/// Everything the full pruning pipeline needs across all four passes.
pub struct PruneInput<'a> {
    pub arena: &'a mut ExprArena,
    pub table: &'a ConnectorTable,
    pub pool: &'a mut TraconPool,
    pub pp: Option<&'a PpKnowledge>,
    pub optional: &'a [bool],
    pub null_budget: usize,
}

/// Run the full fixed-point loop (§4.4.6): expression pruning to
/// quiescence, then disjuncts are built by the caller from the purged
/// expressions, then power + mlink + pp pruning alternate until none of
/// them change anything in a full round.
///
/// This function only covers the expression-pruning stage, since it
/// operates on [`WordExpr`] trees before disjuncts exist. The
/// disjunct-level stage ([`run_disjunct_stage`]) is driven separately
/// once the caller has built disjuncts from the purged expressions.
pub fn run_expression_stage(arena: &mut ExprArena, table: &ConnectorTable, words: &mut [WordExpr]) {
    expression::run_to_fixed_point(arena, table, words);
}

/// Disjunct-level stage: power pruning, mlink pruning (dropped once
/// quiet), and pp-pruning, alternating until a full round changes
/// nothing (§4.4.6).
///
/// Returns `Err(words)` naming the non-optional words that end up with
/// zero disjuncts beyond `null_budget` — "no parse at this null count"
/// (§4.4.3, §7).
pub fn run_disjunct_stage(input: &mut PruneInput, words: &mut [Vec<Disjunct>]) -> Result<(), Vec<WordId>> {
    power::run_to_fixed_point(input.table, input.pool, words, input.optional, input.null_budget)?;

    let mut mlink_live = true;
    let mut round = 0u32;
    loop {
        let mut changed = false;

        if mlink_live {
            let crossings = mlink::mlink_prune_pass(input.table, input.pool, words);
            if crossings == 0 {
                mlink_live = false;
            } else {
                changed = true;
                power::run_to_fixed_point(input.table, input.pool, words, input.optional, input.null_budget)?;
            }
        }

        if let Some(pp) = input.pp {
            let rejected = ppprune::contains_one_prune_pass(pp, input.table, input.pool, words);
            if rejected > 0 {
                changed = true;
                power::run_to_fixed_point(input.table, input.pool, words, input.optional, input.null_budget)?;
            }
        }

        let forced_nulls: Vec<WordId> = words
            .iter()
            .enumerate()
            .filter(|(i, d)| d.is_empty() && !input.optional[*i])
            .map(|(i, _)| WordId::new(i))
            .collect();
        if forced_nulls.len() > input.null_budget {
            return Err(forced_nulls);
        }

        round += 1;
        tracing::debug!(round, changed, mlink_live, "disjunct pruning round");
        if !changed {
            return Ok(());
        }
    }
}
