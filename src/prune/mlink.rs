use super::power::{disjunct_is_valid, power_prune_pass};
use crate::cdt::ConnectorTable;
use crate::disjunct::{Disjunct, TraconId, TraconPool};

/// Per-word mandatory-link interval (§4.4.4): the absolute word-index
/// range outside which no other word may draw a crossing link.
///
/// Simplification from spec.md §4.4.4, recorded in DESIGN.md: the
/// distinction between disjuncts with connectors on both sides versus
/// only one is folded into a single per-side bound rather than tracked
/// as four separate quantities — the per-side `max(nearest_word)` over
/// that word's surviving shallow connectors already gives the tightest
/// forced-reach bound this pruning step needs.
pub type Interval = (usize, usize);

fn compute_intervals(pool: &TraconPool, words: &[Vec<Disjunct>]) -> Vec<Option<Interval>> {
    words
        .iter()
        .enumerate()
        .map(|(wi, disjuncts)| {
            let mut minus_bound: Option<u16> = None;
            let mut plus_bound: Option<u16> = None;

            for d in disjuncts {
                if let Some(h) = d.left {
                    let c = pool.get(h);
                    if c.is_valid() {
                        let near = c.nearest_word.unwrap();
                        minus_bound = Some(minus_bound.map_or(near, |b| b.max(near)));
                    }
                }
                if let Some(h) = d.right {
                    let c = pool.get(h);
                    if c.is_valid() {
                        let near = c.nearest_word.unwrap();
                        plus_bound = Some(plus_bound.map_or(near, |b| b.max(near)));
                    }
                }
            }

            let lo = minus_bound.map(|b| wi.saturating_sub(b as usize));
            let hi = plus_bound.map(|b| (wi + b as usize).min(words.len().saturating_sub(1)));
            match (lo, hi) {
                (Some(l), Some(h)) => Some((l, h)),
                (Some(l), None) => Some((l, wi)),
                (None, Some(h)) => Some((wi, h)),
                (None, None) => None,
            }
        })
        .collect()
}

/// One mlink-pruning pass (§4.4.4): disqualify a connector if every
/// word it could still reach would force a crossing over some other
/// word's mandatory interval. Returns the number of connectors
/// disqualified — callers drop the mlink table once a pass returns 0.
pub fn mlink_prune_pass(_table: &ConnectorTable, pool: &mut TraconPool, words: &mut [Vec<Disjunct>]) -> usize {
    let intervals = compute_intervals(pool, words);
    let n = words.len();
    let mut disqualified = 0usize;

    for wi in 0..n {
        let heads: Vec<TraconId> = words[wi].iter().flat_map(|d| [d.left, d.right]).flatten().collect();

        for head in heads {
            let chain: Vec<(usize, TraconId)> = pool.chain(head).collect();
            for (_depth, tid) in chain {
                let c = pool.get(tid).clone();
                if !c.is_valid() {
                    continue;
                }
                let near = c.nearest_word.unwrap() as usize;
                let far = c.farthest_word.map(|f| f as usize).unwrap_or(n);

                let mut any_clear = false;
                'dist: for dist in near..=far.max(near) {
                    for wj in [wi.checked_add(dist), wi.checked_sub(dist)].into_iter().flatten() {
                        if wj >= n || wj == wi {
                            continue;
                        }
                        let lo = wi.min(wj);
                        let hi = wi.max(wj);
                        let crosses = (lo + 1..hi).any(|w| matches!(intervals[w], Some((l, h)) if l < lo || h > hi));
                        if !crosses {
                            any_clear = true;
                            break 'dist;
                        }
                    }
                }

                if !any_clear {
                    pool.get_mut(tid).invalidate();
                    disqualified += 1;
                }
            }
        }
    }

    for disjuncts in words.iter_mut() {
        disjuncts.retain(|d| disjunct_is_valid(pool, d));
    }

    disqualified
}

/// Run mlink pruning between power-pruning passes until a round finds
/// no crossings, at which point the table is dropped for the rest of
/// pruning (§4.4.4 "effectiveness is monitored").
pub fn run_until_quiet(table: &ConnectorTable, pool: &mut TraconPool, words: &mut [Vec<Disjunct>], pass_dir_seed: crate::base::Direction) {
    use crate::base::Direction;
    let mut dir = pass_dir_seed;
    let mut pass_id = 1_000_000u32;
    loop {
        let crossings = mlink_prune_pass(table, pool, words);
        tracing::debug!(crossings, "mlink pruning pass");
        if crossings == 0 {
            break;
        }
        power_prune_pass(table, pool, words, dir, pass_id);
        dir = if dir == Direction::Plus { Direction::Minus } else { Direction::Plus };
        pass_id += 1;
    }
}
