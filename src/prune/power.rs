use rustc_hash::FxHashMap;

use super::matching;
use crate::base::{Direction, WordId};
use crate::cdt::ConnectorTable;
use crate::disjunct::{Disjunct, TraconId, TraconPool};

/// A live connector discovered while building a pass's per-word
/// per-side bucket (§4.4.3 "Per-word, per-side hash tables keyed on
/// `uc_num`").
#[derive(Debug, Clone, Copy)]
struct LiveRef {
    tracon: TraconId,
    /// True iff this connector is the outermost on its chain — i.e.
    /// `depth_from_start == 0` for the disjunct that referenced it.
    shallow: bool,
}

type Bucket = FxHashMap<u32, Vec<LiveRef>>;

fn side_head(d: &Disjunct, side: Direction) -> Option<TraconId> {
    match side {
        Direction::Plus => d.right,
        Direction::Minus => d.left,
    }
}

fn build_buckets(table: &ConnectorTable, pool: &TraconPool, words: &[Vec<Disjunct>], side: Direction) -> Vec<Bucket> {
    words
        .iter()
        .map(|disjuncts| {
            let mut bucket = Bucket::default();
            for d in disjuncts {
                let Some(head) = side_head(d, side) else { continue };
                for (depth, tid) in pool.chain(head) {
                    let c = pool.get(tid);
                    if !c.is_valid() {
                        continue;
                    }
                    let uc = table.get(c.descriptor).uc_num;
                    bucket.entry(uc).or_default().push(LiveRef { tracon: tid, shallow: depth == 0 });
                }
            }
            bucket
        })
        .collect()
}

pub(crate) fn chain_all_valid(pool: &TraconPool, head: Option<TraconId>) -> bool {
    match head {
        None => true,
        Some(h) => pool.chain(h).all(|(_, id)| pool.get(id).is_valid()),
    }
}

pub(crate) fn disjunct_is_valid(pool: &TraconPool, d: &Disjunct) -> bool {
    chain_all_valid(pool, d.left) && chain_all_valid(pool, d.right)
}

/// One power-pruning pass in `pass_dir`: for every connector facing
/// `pass_dir` on every word, look for a matching opposite-facing
/// connector on some other word within its current `[nearest, farthest]`
/// bound, tightening the bound on success or invalidating the
/// connector on failure (§4.4.3).
///
/// Adjacency rule, from the glossary's shallow/deep split: adjacent
/// words must link through both connectors' shallow (outermost) slot;
/// non-adjacent words must link through exactly one shallow and one
/// deep slot (never two deep — "two deep connectors can never link").
pub fn power_prune_pass(table: &ConnectorTable, pool: &mut TraconPool, words: &mut [Vec<Disjunct>], pass_dir: Direction, pass_id: u32) -> bool {
    let n = words.len();
    let opposite = build_buckets(table, pool, words, pass_dir.flip());
    let mut changed = false;

    let order: Vec<usize> = match pass_dir {
        Direction::Plus => (0..n).collect(),
        Direction::Minus => (0..n).rev().collect(),
    };

    for &wi in &order {
        let heads: Vec<TraconId> = words[wi].iter().filter_map(|d| side_head(d, pass_dir)).collect();

        for head in heads {
            let chain: Vec<(usize, TraconId)> = pool.chain(head).collect();
            for (depth, tid) in chain {
                if pool.get(tid).pass_mark == pass_id {
                    continue;
                }
                pool.get_mut(tid).pass_mark = pass_id;

                let c = pool.get(tid).clone();
                if !c.is_valid() {
                    continue;
                }
                let uc = table.get(c.descriptor).uc_num;
                let shallow = depth == 0;
                let nearest = c.nearest_word.unwrap();
                let farthest = c.farthest_word;

                let mut best_near: Option<u16> = None;
                let mut best_far: Option<u16> = None;

                for dist in nearest..=farthest.unwrap_or(n as u16) {
                    let wj = match pass_dir {
                        Direction::Plus => wi.checked_add(dist as usize),
                        Direction::Minus => wi.checked_sub(dist as usize),
                    };
                    let Some(wj) = wj else { continue };
                    if wj >= n || wj == wi {
                        continue;
                    }

                    let Some(candidates) = opposite[wj].get(&uc) else { continue };
                    for cand in candidates {
                        let cand_descriptor = pool.get(cand.tracon).descriptor;
                        if !matching::matches(table, c.descriptor, cand_descriptor) {
                            continue;
                        }
                        let adjacent = dist == 1;
                        let ok = if adjacent { shallow && cand.shallow } else { shallow != cand.shallow };
                        if !ok {
                            continue;
                        }
                        best_near = Some(best_near.map_or(dist, |b| b.min(dist)));
                        best_far = Some(best_far.map_or(dist, |b| b.max(dist)));
                    }
                }

                let conn = pool.get_mut(tid);
                match (best_near, best_far) {
                    (Some(near), Some(far)) => {
                        let new_near = conn.nearest_word.map_or(near, |old| old.max(near));
                        let new_far = conn.farthest_word.map_or(far, |old| old.min(far));
                        if conn.nearest_word != Some(new_near) || conn.farthest_word != Some(new_far) {
                            changed = true;
                        }
                        conn.nearest_word = Some(new_near);
                        conn.farthest_word = Some(new_far);
                    }
                    _ => {
                        conn.invalidate();
                        conn.refcount = conn.refcount.saturating_sub(1);
                        changed = true;
                    }
                }
            }
        }
    }

    for disjuncts in words.iter_mut() {
        let before = disjuncts.len();
        disjuncts.retain(|d| disjunct_is_valid(pool, d));
        if disjuncts.len() != before {
            changed = true;
        }
    }

    changed
}

/// Iterate alternating power-pruning passes to a fixed point (§4.4.3
/// "Fixed point"). `null_budget` bounds how many non-optional words may
/// end up with zero disjuncts before this reports failure.
pub fn run_to_fixed_point(
    table: &ConnectorTable,
    pool: &mut TraconPool,
    words: &mut [Vec<Disjunct>],
    optional: &[bool],
    null_budget: usize,
) -> Result<(), Vec<WordId>> {
    let mut pass_id = 0u32;
    loop {
        let dir = if pass_id % 2 == 0 { Direction::Plus } else { Direction::Minus };
        let changed = power_prune_pass(table, pool, words, dir, pass_id);
        tracing::debug!(pass_id, dir = ?dir, changed, "power pruning pass");
        pass_id += 1;

        let forced_nulls: Vec<WordId> = words
            .iter()
            .enumerate()
            .filter(|(i, d)| d.is_empty() && !optional[*i])
            .map(|(i, _)| WordId::new(i))
            .collect();

        if forced_nulls.len() > null_budget {
            tracing::debug!(count = forced_nulls.len(), null_budget, "forced nulls exceed budget, pruning fails fast");
            return Err(forced_nulls);
        }

        if !changed && pass_id >= 2 {
            return Ok(());
        }
    }
}
