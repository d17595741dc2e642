use rustc_hash::FxHashMap;

use super::disjunct::Disjunct;
use super::tracon::{TraconId, TraconPool};
use crate::base::{Cost, Direction, IStr};
use crate::cdt::{ConnectorTable, DescriptorId, LengthLimit};
use crate::expr::{Expr, ExprArena, ExprKind, LeafNode};

/// A connector not yet bound into a tracon chain — produced while
/// enumerating an expression, consumed by [`intern_disjuncts`].
#[derive(Debug, Clone)]
struct RawConn {
    descriptor: DescriptorId,
    multi: bool,
    length_limit: LengthLimit,
}

/// One enumerated derivation, before its connector sequences are
/// hash-consed into the sentence's [`TraconPool`].
#[derive(Debug, Clone)]
struct RawDisjunct {
    left: Vec<RawConn>,
    right: Vec<RawConn>,
    cost: Cost,
}

/// Lower bound on the cost of any derivation rooted at each expression
/// node reachable from `root`: a LEAF contributes its own cost, an AND
/// sums its children's bounds, an OR takes the minimum. Used to skip
/// whole OR branches during enumeration (§4.3 "Cost cutoff").
///
/// Iterative post-order (explicit stack) — see the Expression Engine's
/// `copy`/`size` for the same pattern.
fn min_cost_map(arena: &ExprArena, root: Expr) -> FxHashMap<Expr, Cost> {
    struct Frame {
        node: Expr,
        children: Vec<Expr>,
        next: usize,
    }

    impl Frame {
        fn new(arena: &ExprArena, node: Expr) -> Self {
            let children = match &arena.get(node).kind {
                ExprKind::Leaf(_) => Vec::new(),
                ExprKind::And(c) | ExprKind::Or(c) => c.clone(),
            };
            Self {
                node,
                children,
                next: 0,
            }
        }
    }

    let mut memo: FxHashMap<Expr, Cost> = FxHashMap::default();
    let mut stack = vec![Frame::new(arena, root)];

    while let Some(top) = stack.last_mut() {
        if top.next < top.children.len() {
            let child = top.children[top.next];
            top.next += 1;
            if !memo.contains_key(&child) {
                stack.push(Frame::new(arena, child));
            }
            continue;
        }

        let frame = stack.pop().unwrap();
        let node = arena.get(frame.node);
        let cost = match &node.kind {
            ExprKind::Leaf(leaf) => node.cost + leaf.cost,
            ExprKind::And(children) => node.cost + children.iter().map(|c| memo[c]).sum::<Cost>(),
            ExprKind::Or(children) => {
                node.cost
                    + children
                        .iter()
                        .map(|c| memo[c])
                        .fold(Cost::INFINITY, Cost::min)
            }
        };
        memo.insert(frame.node, cost);
    }

    memo
}

struct GFrame {
    node: Expr,
    children: Vec<Expr>,
    next: usize,
    done: Vec<Vec<RawDisjunct>>,
}

impl GFrame {
    fn new(arena: &ExprArena, node: Expr) -> Self {
        let children = match &arena.get(node).kind {
            ExprKind::Leaf(_) => Vec::new(),
            ExprKind::And(c) | ExprKind::Or(c) => c.clone(),
        };
        Self {
            node,
            children,
            next: 0,
            done: Vec::new(),
        }
    }
}

/// Expand `root` into the flat set of derivations permitted within
/// `cutoff` (§4.3 "Algorithm (design level)").
///
/// Iterative post-order (explicit stack), same shape as
/// [`crate::expr::ops::copy`]. A running sum of already-committed
/// ancestor costs (`ancestor_cost`, mirrored 1:1 with the frame stack)
/// lets an OR node skip descending into a child whose minimal cost
/// would already blow the cutoff, without ever recomputing that sum
/// from scratch.
fn build_disjuncts(arena: &ExprArena, table: &ConnectorTable, root: Expr, cutoff: Cost, length_cap: Option<(u8, bool)>) -> Vec<RawDisjunct> {
    let mins = min_cost_map(arena, root);
    if mins.get(&root).copied().unwrap_or(0.0) > cutoff {
        return Vec::new();
    }

    let mut stack = vec![GFrame::new(arena, root)];
    let mut ancestor_cost = vec![arena.get(root).cost];

    loop {
        let top = stack.last_mut().expect("frame stack never empties before returning");
        let is_or = matches!(arena.get(top.node).kind, ExprKind::Or(_));

        if top.next < top.children.len() {
            let child = top.children[top.next];
            top.next += 1;

            if is_or {
                let budget = *ancestor_cost.last().unwrap();
                if budget + mins[&child] > cutoff {
                    top.done.push(Vec::new());
                    continue;
                }
            }

            let parent_running = *ancestor_cost.last().unwrap();
            ancestor_cost.push(parent_running + arena.get(child).cost);
            stack.push(GFrame::new(arena, child));
            continue;
        }

        let frame = stack.pop().unwrap();
        ancestor_cost.pop();
        let node = arena.get(frame.node);

        let result = match &node.kind {
            ExprKind::Leaf(leaf) => vec![leaf_disjunct(table, leaf, node.cost, length_cap)],
            ExprKind::And(_) => and_product(&frame.done, node.cost, cutoff),
            ExprKind::Or(_) => or_union(frame.done, node.cost, cutoff),
        };

        match stack.last_mut() {
            Some(parent) => parent.done.push(result),
            None => return result,
        }
    }
}

/// Apply a sentence-local `(short_length, all_short)` override on top of
/// the dictionary's own per-descriptor length limit (§6 `short_length`,
/// §8 scenario 6), without mutating the shared, read-only
/// [`ConnectorTable`] (§5 "the dictionary's descriptor table ... are
/// read-only during parsing"). Mirrors
/// [`crate::cdt::ConnectorTable::set_default_length_limit`]'s own rule
/// — `all_short` additionally caps an otherwise-`UNLIMITED` connector —
/// but computed fresh per sentence instead of baked into the table.
fn capped_length_limit(table_limit: LengthLimit, cap: Option<(u8, bool)>) -> LengthLimit {
    let Some((short_length, all_short)) = cap else {
        return table_limit;
    };
    match table_limit {
        LengthLimit::Unlimited if !all_short => LengthLimit::Unlimited,
        LengthLimit::Unlimited => LengthLimit::Bounded(short_length),
        LengthLimit::Bounded(max) => LengthLimit::Bounded(max.min(short_length)),
    }
}

fn leaf_disjunct(table: &ConnectorTable, leaf: &LeafNode, node_cost: Cost, length_cap: Option<(u8, bool)>) -> RawDisjunct {
    let length_limit = capped_length_limit(table.get(leaf.descriptor).length_limit, length_cap);
    let conn = RawConn {
        descriptor: leaf.descriptor,
        multi: leaf.multi,
        length_limit,
    };
    let cost = node_cost + leaf.cost;
    match leaf.dir {
        Direction::Minus => RawDisjunct {
            left: vec![conn],
            right: Vec::new(),
            cost,
        },
        Direction::Plus => RawDisjunct {
            left: Vec::new(),
            right: vec![conn],
            cost,
        },
    }
}

/// Cartesian product across an AND's children, inner-first: child 0's
/// connectors are shallower than child 1's (§3 "Ordering invariant").
/// Partial combinations already over `cutoff` are dropped as they're
/// built, rather than after the full product is materialized.
fn and_product(children: &[Vec<RawDisjunct>], node_cost: Cost, cutoff: Cost) -> Vec<RawDisjunct> {
    let mut partial = vec![RawDisjunct {
        left: Vec::new(),
        right: Vec::new(),
        cost: 0.0,
    }];

    for child_list in children {
        if child_list.is_empty() {
            return Vec::new();
        }

        let mut next = Vec::with_capacity(partial.len() * child_list.len());
        for p in &partial {
            for c in child_list {
                let cost = p.cost + c.cost;
                if cost + node_cost > cutoff {
                    continue;
                }
                let mut left = p.left.clone();
                left.extend(c.left.iter().cloned());
                let mut right = p.right.clone();
                right.extend(c.right.iter().cloned());
                next.push(RawDisjunct { left, right, cost });
            }
        }

        if next.is_empty() {
            return Vec::new();
        }
        partial = next;
    }

    for p in &mut partial {
        p.cost += node_cost;
    }
    partial
}

/// Union across an OR's children, adding this node's own cost to every
/// surviving derivation (§3 "Cost semantics": "every ancestor's cost
/// along the chosen OR branch").
fn or_union(children: Vec<Vec<RawDisjunct>>, node_cost: Cost, cutoff: Cost) -> Vec<RawDisjunct> {
    let mut out = Vec::new();
    for mut branch in children {
        for d in &mut branch {
            d.cost += node_cost;
        }
        out.extend(branch.into_iter().filter(|d| d.cost <= cutoff));
    }
    out
}

/// Hash-cons each raw disjunct's left/right sequences into `pool`,
/// producing the [`Disjunct`]s the pruner and enumerator operate on.
///
/// Interning proceeds from the deepest connector toward the shallowest
/// so identical suffixes (built first, as the chain's tail) are found
/// and shared before their prefixes are constructed.
fn intern_disjuncts(pool: &mut TraconPool, raws: Vec<RawDisjunct>, provenance: Option<IStr>) -> Vec<Disjunct> {
    raws.into_iter()
        .map(|raw| Disjunct {
            left: intern_side(pool, &raw.left, provenance.clone()),
            right: intern_side(pool, &raw.right, provenance.clone()),
            cost: raw.cost,
            provenance: provenance.clone(),
            category: None,
        })
        .collect()
}

fn intern_side(pool: &mut TraconPool, conns: &[RawConn], provenance: Option<IStr>) -> Option<TraconId> {
    let mut tail: Option<TraconId> = None;
    for (depth, rc) in conns.iter().enumerate().rev() {
        tail = Some(pool.intern(
            rc.descriptor,
            rc.multi,
            rc.length_limit,
            provenance.clone(),
            depth as u16,
            tail,
        ));
    }
    tail
}

/// Build disjuncts for `root` and intern them into `pool` in one step.
///
/// `length_cap` is the sentence's `(short_length, all_short)` override,
/// if any — see [`capped_length_limit`].
pub fn build_and_intern(
    arena: &ExprArena,
    table: &ConnectorTable,
    pool: &mut TraconPool,
    root: Expr,
    cutoff: Cost,
    length_cap: Option<(u8, bool)>,
    provenance: Option<IStr>,
) -> Vec<Disjunct> {
    let raws = build_disjuncts(arena, table, root, cutoff, length_cap);
    intern_disjuncts(pool, raws, provenance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Interner;

    fn setup_table() -> (ExprArena, ConnectorTable) {
        (ExprArena::new(), ConnectorTable::new())
    }

    #[test]
    fn leaf_expands_to_one_disjunct_on_the_right_side() {
        let (mut arena, mut table) = setup_table();
        let mut interner = Interner::new();
        let d = table.add(&mut interner, "S");
        let leaf = arena.make_leaf(d, Direction::Plus, false, 0.0);

        let raws = build_disjuncts(&arena, &table, leaf, 1000.0, None);
        assert_eq!(raws.len(), 1);
        assert!(raws[0].left.is_empty());
        assert_eq!(raws[0].right.len(), 1);
    }

    #[test]
    fn and_concatenates_inner_first() {
        let (mut arena, mut table) = setup_table();
        let mut interner = Interner::new();
        let outer = table.add(&mut interner, "A");
        let inner = table.add(&mut interner, "B");
        let a = arena.make_leaf(outer, Direction::Plus, false, 0.0);
        let b = arena.make_leaf(inner, Direction::Plus, false, 0.0);
        let and_node = arena.make_and(vec![a, b], 0.0);

        let raws = build_disjuncts(&arena, &table, and_node, 1000.0, None);
        assert_eq!(raws.len(), 1);
        assert_eq!(raws[0].right.len(), 2);
        assert_eq!(raws[0].right[0].descriptor, outer);
        assert_eq!(raws[0].right[1].descriptor, inner);
    }

    #[test]
    fn or_yields_union_of_branches() {
        let (mut arena, mut table) = setup_table();
        let mut interner = Interner::new();
        let x = table.add(&mut interner, "X");
        let y = table.add(&mut interner, "Y");
        let a = arena.make_leaf(x, Direction::Plus, false, 0.0);
        let b = arena.make_leaf(y, Direction::Plus, false, 0.0);
        let or_node = arena.make_or(vec![a, b], 0.0);

        let raws = build_disjuncts(&arena, &table, or_node, 1000.0, None);
        assert_eq!(raws.len(), 2);
    }

    #[test]
    fn cutoff_prunes_expensive_or_branch() {
        let (mut arena, mut table) = setup_table();
        let mut interner = Interner::new();
        let cheap = table.add(&mut interner, "X");
        let expensive = table.add(&mut interner, "Y");
        let a = arena.make_leaf(cheap, Direction::Plus, false, 0.0);
        let b = arena.make_leaf(expensive, Direction::Plus, false, 5.0);
        let or_node = arena.make_or(vec![a, b], 0.0);

        let raws = build_disjuncts(&arena, &table, or_node, 1.0, None);
        assert_eq!(raws.len(), 1);
        assert_eq!(raws[0].right[0].descriptor, cheap);
    }

    #[test]
    fn zeroary_and_yields_single_empty_disjunct() {
        let (mut arena, table) = setup_table();
        let empty = arena.make_empty();
        let raws = build_disjuncts(&arena, &table, empty, 1000.0, None);
        assert_eq!(raws.len(), 1);
        assert!(raws[0].left.is_empty());
        assert!(raws[0].right.is_empty());
        assert_eq!(raws[0].cost, 0.0);
    }

    #[test]
    fn intern_shares_identical_tail_across_disjuncts() {
        let (mut arena, mut table) = setup_table();
        let mut interner = Interner::new();
        let shared = table.add(&mut interner, "B");
        let alt1 = table.add(&mut interner, "A1");
        let alt2 = table.add(&mut interner, "A2");

        let tail1 = arena.make_leaf(shared, Direction::Plus, false, 0.0);
        let head1 = arena.make_leaf(alt1, Direction::Plus, false, 0.0);
        let and1 = arena.make_and(vec![head1, tail1], 0.0);

        let tail2 = arena.make_leaf(shared, Direction::Plus, false, 0.0);
        let head2 = arena.make_leaf(alt2, Direction::Plus, false, 0.0);
        let and2 = arena.make_and(vec![head2, tail2], 0.0);

        let or_node = arena.make_or(vec![and1, and2], 0.0);

        let mut pool = TraconPool::new();
        let disjuncts = build_and_intern(&arena, &table, &mut pool, or_node, 1000.0, None, None);
        assert_eq!(disjuncts.len(), 2);

        let right0 = disjuncts[0].right.unwrap();
        let right1 = disjuncts[1].right.unwrap();
        let tail_of_0 = pool.next(right0).unwrap();
        let tail_of_1 = pool.next(right1).unwrap();
        assert_eq!(tail_of_0, tail_of_1);
        assert_eq!(pool.get(tail_of_0).refcount, 2);
    }

    #[test]
    fn short_length_cap_tightens_an_unlimited_connector_only_under_all_short() {
        let (mut arena, mut table) = setup_table();
        let mut interner = Interner::new();
        let d = table.add(&mut interner, "D");
        let leaf = arena.make_leaf(d, Direction::Plus, false, 0.0);

        let mut pool = TraconPool::new();
        let without_all_short = build_and_intern(&arena, &table, &mut pool, leaf, 1000.0, Some((5, false)), None);
        let head = without_all_short[0].right.unwrap();
        assert_eq!(pool.get(head).length_limit, LengthLimit::Unlimited);

        let mut pool2 = TraconPool::new();
        let with_all_short = build_and_intern(&arena, &table, &mut pool2, leaf, 1000.0, Some((5, true)), None);
        let head2 = with_all_short[0].right.unwrap();
        assert_eq!(pool2.get(head2).length_limit, LengthLimit::Bounded(5));
    }

    #[test]
    fn short_length_cap_narrows_an_already_bounded_connector() {
        let (mut arena, mut table) = setup_table();
        let mut interner = Interner::new();
        let d = table.add(&mut interner, "D");
        // `all_short = true` forces the table's default-unlimited
        // descriptor down to `Bounded(20)` first, so the per-sentence
        // cap below has something tighter than `Unlimited` to narrow.
        table.set_default_length_limit(20, true);
        let leaf = arena.make_leaf(d, Direction::Plus, false, 0.0);

        let mut pool = TraconPool::new();
        let disjuncts = build_and_intern(&arena, &table, &mut pool, leaf, 1000.0, Some((5, false)), None);
        let head = disjuncts[0].right.unwrap();
        assert_eq!(pool.get(head).length_limit, LengthLimit::Bounded(5));
    }
}
