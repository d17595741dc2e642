use crate::base::{Cost, WordId};
use crate::cdt::{ConnectorTable, DescriptorId};
use crate::disjunct::{Disjunct, TraconPool};
use crate::prune::matching;

use super::link::{Link, Linkage};

/// Enumerator configuration (§4.5, §5).
#[derive(Debug, Clone)]
pub struct EnumOptions {
    /// Cap on the number of linkages returned (§4.5 "up to a configured
    /// limit (`linkage_limit`)").
    pub linkage_limit: usize,
    /// Accept linkages with more than one connected component (§4.5
    /// "unless islands are explicitly allowed").
    pub allow_islands: bool,
    /// Deterministic cost ordering with stable tie-break (§5 "when
    /// `repeatable_rand` is set") vs. a sentence-local randomized
    /// tie-break otherwise.
    pub repeatable_rand: bool,
    /// Process-wide 32-bit state seeded at options-create time (§5),
    /// advanced by the tie-break shuffle.
    pub rand_seed: u32,
    /// Backstop against combinatorial blowup on pathological inputs —
    /// not part of spec.md's contract, but required so a single
    /// enumerate call can't run forever; see DESIGN.md.
    pub max_candidates: usize,
}

impl Default for EnumOptions {
    fn default() -> Self {
        Self {
            linkage_limit: 1000,
            allow_islands: false,
            repeatable_rand: true,
            rand_seed: 0,
            max_candidates: 200_000,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ExpandedConn {
    descriptor: DescriptorId,
    multi: bool,
}

#[derive(Debug, Clone)]
struct ExpandedDisjunct {
    left: Vec<ExpandedConn>,
    right: Vec<ExpandedConn>,
    cost: Cost,
}

fn expand_disjunct(pool: &TraconPool, d: &Disjunct) -> ExpandedDisjunct {
    let expand_side = |head: Option<crate::disjunct::TraconId>| -> Vec<ExpandedConn> {
        match head {
            None => Vec::new(),
            Some(h) => pool
                .chain(h)
                .map(|(_, id)| {
                    let c = pool.get(id);
                    ExpandedConn {
                        descriptor: c.descriptor,
                        multi: c.multi,
                    }
                })
                .collect(),
        }
    };
    ExpandedDisjunct {
        left: expand_side(d.left),
        right: expand_side(d.right),
        cost: d.cost,
    }
}

#[derive(Debug, Clone, Copy)]
struct StackItem {
    word: WordId,
    descriptor: DescriptorId,
    multi: bool,
}

/// Try to satisfy `word`'s left connectors against the top of `stack`,
/// in shallow-to-deep order, each one consuming the most recently
/// opened still-unclosed provider — this is what makes the resulting
/// link set structurally planar (§4.5 "the search imposes planarity
/// structurally"), the line-matching equivalent of balanced brackets.
///
/// Returns the formed links and the (possibly shrunk, possibly
/// unchanged for `multi` providers) stack on success, or `None` if some
/// left connector has no provider.
fn match_left(table: &ConnectorTable, word: WordId, left: &[ExpandedConn], stack: &[StackItem]) -> Option<(Vec<Link>, Vec<StackItem>)> {
    let mut stack = stack.to_vec();
    let mut links = Vec::with_capacity(left.len());

    for conn in left {
        let Some(top) = stack.last().copied() else { return None };
        if !matching::matches(table, conn.descriptor, top.descriptor) {
            return None;
        }
        let name = matching::try_match(table, conn.descriptor, top.descriptor)?;
        links.push(Link {
            left_word: top.word,
            right_word: word,
            left_descriptor: top.descriptor,
            right_descriptor: conn.descriptor,
            name,
        });
        if !top.multi {
            stack.pop();
        }
    }

    Some((links, stack))
}

/// Push `word`'s right connectors onto `stack`, deepest first so the
/// shallowest ends on top — the next word to look for a provider sees
/// the nearest attachment first (§3 "Shallow / deep connector").
fn push_right(stack: &mut Vec<StackItem>, word: WordId, right: &[ExpandedConn]) {
    for conn in right.iter().rev() {
        stack.push(StackItem {
            word,
            descriptor: conn.descriptor,
            multi: conn.multi,
        });
    }
}

struct Search<'a> {
    table: &'a ConnectorTable,
    words: &'a [Vec<ExpandedDisjunct>],
    optional: &'a [bool],
    budget: usize,
    results: Vec<(Vec<Link>, Vec<Option<usize>>, Cost)>,
}

impl<'a> Search<'a> {
    fn run(
        &mut self,
        idx: usize,
        stack: Vec<StackItem>,
        links_acc: Vec<Link>,
        chosen: Vec<Option<usize>>,
        cost_acc: Cost,
    ) {
        if self.budget == 0 {
            return;
        }

        if idx == self.words.len() {
            self.budget -= 1;
            if stack.is_empty() {
                self.results.push((links_acc, chosen, cost_acc));
            }
            return;
        }

        let disjuncts = &self.words[idx];
        let word = WordId::new(idx);

        // An optional word may also be skipped outright (no chosen
        // disjunct, no connectors) even if it has surviving disjuncts,
        // since a null word is always a legal choice for an optional
        // position.
        if self.optional[idx] {
            let mut chosen_next = chosen.clone();
            chosen_next.push(None);
            self.run(idx + 1, stack.clone(), links_acc.clone(), chosen_next, cost_acc);
        }

        for (choice_idx, d) in disjuncts.iter().enumerate() {
            let Some((mut new_links, new_stack)) = match_left(self.table, word, &d.left, &stack) else {
                continue;
            };
            let mut stack_after = new_stack;
            push_right(&mut stack_after, word, &d.right);

            let mut links_next = links_acc.clone();
            links_next.append(&mut new_links);
            let mut chosen_next = chosen.clone();
            chosen_next.push(Some(choice_idx));

            self.run(idx + 1, stack_after, links_next, chosen_next, cost_acc + d.cost);

            if self.budget == 0 {
                return;
            }
        }
    }
}

fn lcg_next(state: &mut u32) -> u32 {
    *state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
    *state
}

/// Enumerate linkages over the surviving disjunct lists (§4.5).
///
/// Exhaustive backtracking search bounded by `opts.max_candidates`,
/// rather than the original's memoized interval chart parser — a
/// deliberate simplification recorded in DESIGN.md (spec.md §9 licenses
/// substituting any enumerator satisfying §4.5's contract). Correct on
/// every property §8 requires: planarity (by construction), matching,
/// connectivity (checked post hoc), and non-decreasing cost order.
pub fn enumerate(table: &ConnectorTable, pool: &TraconPool, words: &[Vec<Disjunct>], optional: &[bool], opts: &EnumOptions) -> Vec<Linkage> {
    let expanded: Vec<Vec<ExpandedDisjunct>> = words
        .iter()
        .map(|ds| {
            let mut v: Vec<ExpandedDisjunct> = ds.iter().map(|d| expand_disjunct(pool, d)).collect();
            v.sort_by(|a, b| a.cost.partial_cmp(&b.cost).unwrap_or(std::cmp::Ordering::Equal));
            v
        })
        .collect();

    let mut search = Search {
        table,
        words: &expanded,
        optional,
        budget: opts.max_candidates,
        results: Vec::new(),
    };
    search.run(0, Vec::new(), Vec::new(), Vec::new(), 0.0);

    let mut linkages: Vec<Linkage> = search
        .results
        .into_iter()
        .map(|(links, disjuncts, cost)| Linkage {
            links,
            disjuncts,
            cost,
            violations: Vec::new(),
        })
        .filter(|l| opts.allow_islands || l.is_connected(optional))
        .collect();

    linkages.sort_by(|a, b| a.cost.partial_cmp(&b.cost).unwrap_or(std::cmp::Ordering::Equal));

    if !opts.repeatable_rand {
        let mut state = opts.rand_seed | 1;
        let mut i = 0usize;
        while i < linkages.len() {
            let mut j = i + 1;
            while j < linkages.len() && linkages[j].cost == linkages[i].cost {
                j += 1;
            }
            for k in (i + 1..j).rev() {
                let swap_with = i + (lcg_next(&mut state) as usize % (k - i + 1));
                linkages.swap(k, swap_with);
            }
            i = j;
        }
    }

    linkages.truncate(opts.linkage_limit);
    linkages
}
