use rustc_hash::FxHashMap;

use super::matching;
use crate::cdt::{ConnectorTable, DescriptorId};
use crate::disjunct::{Disjunct, TraconId, TraconPool};
use crate::postprocess::{pp_match, pp_match_any, PpKnowledge};

/// Postprocessing pruning (§4.4.5): reject a connector if the sentence's
/// surviving connectors can never realize a criterion link for any
/// contains-one rule it triggers.
///
/// Builds the uppercase-prefix-bucketed multiset once per pass, then
/// for each rule determines whether *any* pair of live connectors in
/// the sentence can match and whose realized name satisfies one of the
/// rule's criterion patterns. Connectors that trigger a rule with no
/// realizable criterion are invalidated.
///
/// Simplification recorded in DESIGN.md: the stronger wildcard check
/// described in spec.md §4.4.5 ("every sentence connector the trigger
/// connector could link to preserves wildcards in the same positions")
/// is not implemented — left disabled pending rule-system redesign, per
/// spec.md §9's Design Notes on the source's own disabled stricter rule
/// block.
pub fn contains_one_prune_pass(
    pp: &PpKnowledge,
    table: &ConnectorTable,
    pool: &mut TraconPool,
    words: &mut [Vec<Disjunct>],
) -> usize {
    if pp.contains_one_rules.is_empty() {
        return 0;
    }

    let mut by_uc: FxHashMap<u32, Vec<DescriptorId>> = FxHashMap::default();
    let mut live: Vec<(usize, TraconId)> = Vec::new();

    for (wi, disjuncts) in words.iter().enumerate() {
        for d in disjuncts {
            for head in [d.left, d.right].into_iter().flatten() {
                for (_depth, tid) in pool.chain(head) {
                    let c = pool.get(tid);
                    if !c.is_valid() {
                        continue;
                    }
                    let uc = table.get(c.descriptor).uc_num;
                    by_uc.entry(uc).or_default().push(c.descriptor);
                    live.push((wi, tid));
                }
            }
        }
    }
    for ids in by_uc.values_mut() {
        ids.sort_by_key(|d| d.index());
        ids.dedup();
    }

    // For each rule, is there a realizable criterion link anywhere in
    // the sentence (§4.4.5 "there exist two connectors whose
    // intersection post-process-matches a member of the criterion
    // set")?
    let realizable: Vec<bool> = pp
        .contains_one_rules
        .iter()
        .map(|rule| {
            by_uc.values().any(|bucket| {
                bucket.iter().enumerate().any(|(i, &a)| {
                    bucket[i..].iter().any(|&b| {
                        matching::try_match(table, a, b)
                            .is_some_and(|name| pp_match_any(&rule.link_set, &name))
                    })
                })
            })
        })
        .collect();

    if realizable.iter().all(|&r| r) {
        return 0;
    }

    let mut disqualified = 0usize;
    for &(_wi, tid) in &live {
        let descriptor = pool.get(tid).descriptor;
        let name = table.get(descriptor).string.clone();
        let triggers_unrealized_rule = pp
            .contains_one_rules
            .iter()
            .zip(&realizable)
            .any(|(rule, &ok)| !ok && pp_match(&rule.selector, &name));

        if triggers_unrealized_rule && pool.get(tid).is_valid() {
            pool.get_mut(tid).invalidate();
            disqualified += 1;
        }
    }

    for disjuncts in words.iter_mut() {
        disjuncts.retain(|d| super::power::disjunct_is_valid(pool, d));
    }

    disqualified
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{Direction, Interner};
    use crate::disjunct::build_and_intern;
    use crate::expr::ExprArena;
    use crate::postprocess::PpRule;

    #[test]
    fn invalidates_trigger_when_criterion_unrealizable() {
        let mut interner = Interner::new();
        let mut table = ConnectorTable::new();
        let trig = table.add(&mut interner, "T");
        table.finalize();

        let mut arena = ExprArena::new();
        let leaf = arena.make_leaf(trig, Direction::Plus, false, 0.0);

        let mut pool = TraconPool::new();
        let mut words = vec![build_and_intern(&arena, &table, &mut pool, leaf, 1000.0, None, None)];

        let pp = PpKnowledge::new().with_contains_one(vec![PpRule::new(
            "T",
            vec!["Z".to_string()],
            "T requires a Z somewhere",
        )]);

        let disqualified = contains_one_prune_pass(&pp, &table, &mut pool, &mut words);
        assert_eq!(disqualified, 1);
        assert!(words[0].is_empty());
    }

    #[test]
    fn keeps_trigger_when_criterion_realizable_elsewhere() {
        let mut interner = Interner::new();
        let mut table = ConnectorTable::new();
        let trig = table.add(&mut interner, "T");
        let a = table.add(&mut interner, "Z");
        let b = table.add(&mut interner, "Z");
        table.finalize();

        let mut arena = ExprArena::new();
        let leaf_t = arena.make_leaf(trig, Direction::Plus, false, 0.0);
        let leaf_a = arena.make_leaf(a, Direction::Plus, false, 0.0);
        let leaf_b = arena.make_leaf(b, Direction::Minus, false, 0.0);

        let mut pool = TraconPool::new();
        let mut words = vec![
            build_and_intern(&arena, &table, &mut pool, leaf_t, 1000.0, None, None),
            build_and_intern(&arena, &table, &mut pool, leaf_a, 1000.0, None, None),
            build_and_intern(&arena, &table, &mut pool, leaf_b, 1000.0, None, None),
        ];

        let pp = PpKnowledge::new().with_contains_one(vec![PpRule::new(
            "T",
            vec!["Z".to_string()],
            "T requires a Z somewhere",
        )]);

        let disqualified = contains_one_prune_pass(&pp, &table, &mut pool, &mut words);
        assert_eq!(disqualified, 0);
        assert_eq!(words[0].len(), 1);
    }
}
