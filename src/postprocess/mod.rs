//! Postprocessor (§4.6 of SPEC_FULL.md).
//!
//! Validates a proposed [`crate::linkage::Linkage`] against rule sets
//! described abstractly as link-name patterns: contains-one,
//! contains-none, form-a-cycle, bounded. Domains are computed from the
//! linkage itself by interval nesting of links, not by walking a
//! separate parse tree (§4.6 "Domains are computed from the linkage by
//! following link-type-specific starter rules").

mod knowledge;
mod matching;
mod rule;

pub use knowledge::PpKnowledge;
pub use matching::{pp_match, pp_match_any};
pub use rule::PpRule;

use crate::base::WordId;
use crate::linkage::{Link, Linkage};

/// One rule violation surfaced by [`Postprocessor::check`] (§4.6, §7
/// "no final linkage" on contains-one rejection).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub rule_kind: RuleKind,
    pub msg: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    ContainsOne,
    ContainsNone,
    FormACycle,
    Bounded,
}

/// The domain induced by a link: its direct children in the
/// containment-by-span tree over the linkage's links (§4.6 "Domain").
///
/// A link `B` is a *direct child* of `A` iff `A`'s span strictly
/// contains `B`'s span and no third link's span sits strictly between
/// them — the standard nearest-enclosing-interval relation. This models
/// "the domain induced by a link" as exactly the links immediately
/// dependent on it, recursively nested, which is the natural reading of
/// a link-type-specific domain in a planar linkage (see DESIGN.md for
/// the Open Question this resolves).
fn span(link: &Link) -> (WordId, WordId) {
    (link.left_word, link.right_word)
}

fn contains(outer: (WordId, WordId), inner: (WordId, WordId)) -> bool {
    outer.0 <= inner.0 && inner.1 <= outer.1 && outer != inner
}

fn direct_children(links: &[Link], parent_idx: usize) -> Vec<usize> {
    let parent_span = span(&links[parent_idx]);
    let mut children = Vec::new();

    'candidate: for (i, cand) in links.iter().enumerate() {
        if i == parent_idx {
            continue;
        }
        let cand_span = span(cand);
        if !contains(parent_span, cand_span) {
            continue;
        }
        for (j, other) in links.iter().enumerate() {
            if j == parent_idx || j == i {
                continue;
            }
            let other_span = span(other);
            if contains(parent_span, other_span) && contains(other_span, cand_span) && other_span != cand_span {
                continue 'candidate;
            }
        }
        children.push(i);
    }
    children
}

/// Applies a [`PpKnowledge`] rule set to a completed [`Linkage`] (§4.6).
pub struct Postprocessor<'a> {
    knowledge: &'a PpKnowledge,
}

impl<'a> Postprocessor<'a> {
    pub fn new(knowledge: &'a PpKnowledge) -> Self {
        Self { knowledge }
    }

    /// Check every rule family against `linkage`, returning every
    /// violation found (empty = linkage accepted).
    pub fn check(&self, linkage: &Linkage) -> Vec<Violation> {
        let mut violations = Vec::new();
        let links = &linkage.links;

        for rule in &self.knowledge.contains_one_rules {
            for (i, link) in links.iter().enumerate() {
                if !pp_match(&rule.selector, &link.name) {
                    continue;
                }
                let children = direct_children(links, i);
                let satisfied = children.iter().any(|&c| pp_match_any(&rule.link_set, &links[c].name));
                if !satisfied {
                    violations.push(Violation {
                        rule_kind: RuleKind::ContainsOne,
                        msg: rule.msg.clone(),
                    });
                }
            }
        }

        for rule in &self.knowledge.contains_none_rules {
            for (i, link) in links.iter().enumerate() {
                if !pp_match(&rule.selector, &link.name) {
                    continue;
                }
                let children = direct_children(links, i);
                let forbidden = children.iter().any(|&c| pp_match_any(&rule.link_set, &links[c].name));
                if forbidden {
                    violations.push(Violation {
                        rule_kind: RuleKind::ContainsNone,
                        msg: rule.msg.clone(),
                    });
                }
            }
        }

        for rule in &self.knowledge.form_a_cycle_rules {
            for (i, link) in links.iter().enumerate() {
                if !pp_match(&rule.selector, &link.name) {
                    continue;
                }
                let children = direct_children(links, i);
                let domain_members: Vec<usize> = std::iter::once(i).chain(children.iter().copied()).collect();
                if !domain_members
                    .iter()
                    .any(|&m| pp_match_any(&rule.link_set, &links[m].name))
                {
                    continue;
                }
                if !forms_cycle(links, &domain_members) {
                    violations.push(Violation {
                        rule_kind: RuleKind::FormACycle,
                        msg: rule.msg.clone(),
                    });
                }
            }
        }

        for rule in &self.knowledge.bounded_rules {
            for (i, link) in links.iter().enumerate() {
                if !pp_match(&rule.selector, &link.name) {
                    continue;
                }
                if let Some(violation_msg) = self.check_bounded(links, i, &rule.link_set, &rule.msg) {
                    violations.push(Violation {
                        rule_kind: RuleKind::Bounded,
                        msg: violation_msg,
                    });
                }
            }
        }

        violations
    }

    /// A domain rooted at `i` is bounded by `boundary_names`: every
    /// direct child either matches a boundary pattern (domain expansion
    /// stops there) or is itself checked recursively. A child that
    /// neither matches a boundary pattern nor is a leaf violates the
    /// bound (§4.6 "must not extend beyond certain boundaries").
    fn check_bounded(&self, links: &[Link], i: usize, boundary_names: &[String], msg: &str) -> Option<String> {
        let children = direct_children(links, i);
        for &c in &children {
            if pp_match_any(boundary_names, &links[c].name) {
                continue;
            }
            if !direct_children(links, c).is_empty() {
                return Some(msg.to_string());
            }
        }
        None
    }
}

/// Do the links in `domain_members` (plus their shared endpoints) form
/// a cycle in the word graph?
fn forms_cycle(links: &[Link], domain_members: &[usize]) -> bool {
    use rustc_hash::FxHashMap;

    let mut adj: FxHashMap<WordId, Vec<WordId>> = FxHashMap::default();
    for &m in domain_members {
        let l = &links[m];
        adj.entry(l.left_word).or_default().push(l.right_word);
        adj.entry(l.right_word).or_default().push(l.left_word);
    }

    let edge_count: usize = domain_members.len();
    let node_count = adj.len();
    // A simple graph with at least as many edges as nodes must contain
    // a cycle (pigeonhole on a forest's edge/node bound).
    edge_count >= node_count && node_count > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cdt::DescriptorId;

    fn w(n: usize) -> WordId {
        WordId::new(n)
    }

    fn link(l: usize, r: usize, name: &str) -> Link {
        Link {
            left_word: w(l),
            right_word: w(r),
            left_descriptor: DescriptorId::for_test(0),
            right_descriptor: DescriptorId::for_test(0),
            name: name.to_string(),
        }
    }

    #[test]
    fn contains_one_satisfied_by_nested_child() {
        let linkage = Linkage {
            links: vec![link(0, 2, "S"), link(0, 1, "D")],
            disjuncts: vec![None, None, None],
            cost: 0.0,
            violations: Vec::new(),
        };
        let pp = PpKnowledge::new().with_contains_one(vec![PpRule::new("S", vec!["D".into()], "S needs D")]);
        let violations = Postprocessor::new(&pp).check(&linkage);
        assert!(violations.is_empty());
    }

    #[test]
    fn contains_one_violated_without_criterion() {
        let linkage = Linkage {
            links: vec![link(0, 2, "S")],
            disjuncts: vec![None, None, None],
            cost: 0.0,
            violations: Vec::new(),
        };
        let pp = PpKnowledge::new().with_contains_one(vec![PpRule::new("S", vec!["D".into()], "S needs D")]);
        let violations = Postprocessor::new(&pp).check(&linkage);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule_kind, RuleKind::ContainsOne);
    }

    #[test]
    fn contains_none_violated_by_present_child() {
        let linkage = Linkage {
            links: vec![link(0, 2, "S"), link(0, 1, "X")],
            disjuncts: vec![None, None, None],
            cost: 0.0,
            violations: Vec::new(),
        };
        let pp = PpKnowledge::new().with_contains_none(vec![PpRule::new("S", vec!["X".into()], "S forbids X")]);
        let violations = Postprocessor::new(&pp).check(&linkage);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule_kind, RuleKind::ContainsNone);
    }
}
