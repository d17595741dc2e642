use crate::base::{Cost, WordId};
use crate::cdt::DescriptorId;

/// An established match between two connectors (§3 "Link").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub left_word: WordId,
    pub right_word: WordId,
    pub left_descriptor: DescriptorId,
    pub right_descriptor: DescriptorId,
    /// The conservative intersection of the two connectors' strings
    /// (§4.4.1 "the realized link name").
    pub name: String,
}

/// A full assignment of disjuncts and links across a sentence (§3
/// "Linkage").
#[derive(Debug, Clone)]
pub struct Linkage {
    pub links: Vec<Link>,
    /// The chosen disjunct index per word, `None` for an (optional)
    /// null word that was not linked.
    pub disjuncts: Vec<Option<usize>>,
    /// Sum of the chosen disjuncts' costs (§3 "a cost vector" —
    /// collapsed to a single scalar since spec.md §4.3's disjunct cost
    /// is itself already the sum of every contributing node; see
    /// DESIGN.md).
    pub cost: Cost,
    /// Postprocessing-rule violation messages, filled in once
    /// [`crate::postprocess::Postprocessor::check`] runs. Empty means
    /// either no postprocessing knowledge was supplied, or the linkage
    /// passed every rule.
    pub violations: Vec<String>,
}

impl Linkage {
    /// Does every non-optional word participate in at least one link?
    pub fn is_connected(&self, optional: &[bool]) -> bool {
        let n = self.disjuncts.len();
        if n == 0 {
            return true;
        }
        let mut parent: Vec<usize> = (0..n).collect();

        fn find(parent: &mut [usize], x: usize) -> usize {
            if parent[x] != x {
                parent[x] = find(parent, parent[x]);
            }
            parent[x]
        }

        for link in &self.links {
            let a = link.left_word.index();
            let b = link.right_word.index();
            let ra = find(&mut parent, a);
            let rb = find(&mut parent, b);
            if ra != rb {
                parent[ra] = rb;
            }
        }

        let participating: Vec<usize> = (0..n)
            .filter(|&i| self.disjuncts[i].is_some() || !optional[i])
            .collect();
        let Some(&anchor) = participating.iter().find(|&&i| !optional[i]) else {
            return true;
        };
        let anchor_root = find(&mut parent, anchor);
        participating
            .iter()
            .filter(|&&i| !optional[i])
            .all(|&i| find(&mut parent, i) == anchor_root)
    }
}
