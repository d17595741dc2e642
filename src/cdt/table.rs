use rustc_hash::FxHashMap;

use super::descriptor::{jenkins_hash, pack_lc, split_connector_string};
use super::{ConnectorDescriptor, DescriptorId, LengthLimit};
use crate::base::Interner;
use crate::expr::{Expr, ExprArena, ExprKind};

/// Interns connector strings into canonical descriptors (§4.1).
#[derive(Debug, Default)]
pub struct ConnectorTable {
    descriptors: Vec<ConnectorDescriptor>,
    by_string: FxHashMap<Box<str>, DescriptorId>,
    finalized: bool,
}

impl ConnectorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotently intern a connector string, returning its descriptor.
    ///
    /// Computes the Jenkins hash over the uppercase prefix, the packed
    /// lowercase encoding, and a default (unbounded) length limit —
    /// `uc_num` is assigned later by [`Self::finalize`].
    pub fn add(&mut self, interner: &mut Interner, string: &str) -> DescriptorId {
        if let Some(&id) = self.by_string.get(string) {
            return id;
        }

        let (head_dependent, uc, lc) = split_connector_string(string);
        let (lc_letters, lc_mask) = pack_lc(lc);
        let uc_hash = jenkins_hash(uc);

        let istr = interner.intern(string);
        let uc_start = string.len() - uc.len() - lc.len();

        let id = DescriptorId(self.descriptors.len() as u32);
        self.descriptors.push(ConnectorDescriptor {
            string: istr,
            uc_num: 0,
            lc_letters,
            lc_mask,
            head_dependent,
            length_limit: LengthLimit::Unlimited,
            uc_hash,
            uc_start,
            uc_len: uc.len(),
        });
        self.by_string.insert(string.into(), id);
        id
    }

    pub fn get(&self, id: DescriptorId) -> &ConnectorDescriptor {
        &self.descriptors[id.index()]
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DescriptorId, &ConnectorDescriptor)> {
        self.descriptors
            .iter()
            .enumerate()
            .map(|(i, d)| (DescriptorId(i as u32), d))
    }

    /// Sort descriptors by uppercase prefix (shorter-prefix-first under
    /// prefix equality — the natural `Ord` on `&str`) and assign
    /// sequential `uc_num`s, bumping on every prefix change.
    ///
    /// After this call, for any two descriptors `a`, `b`:
    /// `uc_prefix(a) == uc_prefix(b) iff a.uc_num == b.uc_num`.
    pub fn finalize(&mut self) {
        let mut order: Vec<usize> = (0..self.descriptors.len()).collect();
        order.sort_by(|&a, &b| {
            self.descriptors[a]
                .uc_prefix()
                .cmp(self.descriptors[b].uc_prefix())
        });

        let mut uc_num = 0u32;
        for (rank, &idx) in order.iter().enumerate() {
            if rank > 0 {
                let prev = &self.descriptors[order[rank - 1]];
                let cur_prefix = self.descriptors[idx].uc_prefix().to_string();
                if prev.uc_prefix() != cur_prefix {
                    uc_num += 1;
                }
            }
            self.descriptors[idx].uc_num = uc_num;
        }

        self.finalized = true;
        tracing::debug!(
            distinct_uc = uc_num + 1,
            total = self.descriptors.len(),
            "connector descriptor table finalized"
        );
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Number of distinct uppercase prefixes after [`Self::finalize`].
    pub fn num_uc(&self) -> u32 {
        self.descriptors.iter().map(|d| d.uc_num).max().map_or(0, |m| m + 1)
    }

    /// Mark descriptors `UNLIMITED` (§4.1 `set_unlimited`).
    ///
    /// If `unlimited_expr` names an expression (the dictionary's
    /// `UNLIMITED-CONNECTORS` entry), only descriptors whose string
    /// matches some leaf of it are marked unlimited. Otherwise every
    /// descriptor is unlimited.
    pub fn set_unlimited(&mut self, arena: &ExprArena, unlimited_expr: Option<Expr>) {
        let Some(root) = unlimited_expr else {
            for d in &mut self.descriptors {
                d.length_limit = LengthLimit::Unlimited;
            }
            return;
        };

        let mut marked_ids = Vec::new();
        collect_leaf_descriptors(arena, root, &mut marked_ids);

        for id in marked_ids {
            self.descriptors[id.index()].length_limit = LengthLimit::Unlimited;
        }
    }

    /// Set the default (non-unlimited) length limit for every descriptor
    /// that hasn't been marked unlimited, per the dictionary's
    /// `short-length`/`all-short` defines.
    pub fn set_default_length_limit(&mut self, short_length: u8, all_short: bool) {
        for d in &mut self.descriptors {
            match d.length_limit {
                LengthLimit::Unlimited if !all_short => {}
                _ => d.length_limit = LengthLimit::Bounded(short_length),
            }
        }
    }
}

fn collect_leaf_descriptors(arena: &ExprArena, e: Expr, out: &mut Vec<DescriptorId>) {
    let mut stack = vec![e];
    while let Some(node) = stack.pop() {
        match &arena.get(node).kind {
            ExprKind::Leaf(leaf) => out.push(leaf.descriptor),
            ExprKind::And(children) | ExprKind::Or(children) => {
                stack.extend(children.iter().copied());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_idempotent() {
        let mut interner = Interner::new();
        let mut table = ConnectorTable::new();
        let a = table.add(&mut interner, "AB");
        let b = table.add(&mut interner, "AB");
        assert_eq!(a, b);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn finalize_assigns_equal_uc_num_to_equal_prefixes() {
        let mut interner = Interner::new();
        let mut table = ConnectorTable::new();
        let a = table.add(&mut interner, "ABx");
        let b = table.add(&mut interner, "ABy");
        let c = table.add(&mut interner, "CD");
        table.finalize();

        assert_eq!(table.get(a).uc_num, table.get(b).uc_num);
        assert_ne!(table.get(a).uc_num, table.get(c).uc_num);
    }

    #[test]
    fn finalize_orders_shorter_prefix_first_under_prefix_equality() {
        let mut interner = Interner::new();
        let mut table = ConnectorTable::new();
        // "A" is a prefix of "AB" — shorter sorts first, so it gets the
        // smaller uc_num.
        let short = table.add(&mut interner, "A");
        let long = table.add(&mut interner, "ABx");
        table.finalize();
        assert!(table.get(short).uc_num < table.get(long).uc_num);
    }
}
