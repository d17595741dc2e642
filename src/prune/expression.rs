use rustc_hash::FxHashMap;

use super::matching;
use crate::base::Direction;
use crate::cdt::{ConnectorTable, DescriptorId};
use crate::expr::{ops, Expr, ExprArena, ExprKind};

/// A word's expression root during pruning — `None` once the word has
/// lost every disjunct (§4.4.2, §4.4.6 "a word becomes empty").
pub type WordExpr = Option<Expr>;

/// Forward-facing connectors accumulated while scanning a sentence in
/// one direction (§4.4.2 "a set `S` of connectors that appear somewhere
/// in the sentence pointing in direction `d`").
///
/// Bucketed by `uc_num` so a match test only compares against
/// same-prefix candidates instead of the whole set.
#[derive(Debug, Default)]
pub struct SeenSet {
    by_uc: FxHashMap<u32, Vec<DescriptorId>>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, table: &ConnectorTable, d: DescriptorId) {
        let uc = table.get(d).uc_num;
        self.by_uc.entry(uc).or_default().push(d);
    }

    pub fn matches_any(&self, table: &ConnectorTable, d: DescriptorId) -> bool {
        let uc = table.get(d).uc_num;
        match self.by_uc.get(&uc) {
            Some(candidates) => candidates.iter().any(|&s| matching::matches(table, d, s)),
            None => false,
        }
    }
}

/// Purge `root`'s LEAFs facing `backward` that no member of `seen`
/// matches (§4.4.2 "Purge semantics").
///
/// Iterative post-order (explicit stack) — the same shape as
/// [`crate::expr::ops::copy`]. Surviving AND/OR nodes are rebuilt as
/// fresh arena entries rather than mutated in place, since expression
/// nodes are otherwise immutable after construction; a deleted AND
/// child takes its whole parent AND down with it, and an OR loses only
/// the deleted branch.
pub fn purge(
    arena: &mut ExprArena,
    root: Expr,
    backward: Direction,
    seen: &SeenSet,
    table: &ConnectorTable,
) -> Option<Expr> {
    struct Frame {
        node: Expr,
        children: Vec<Expr>,
        next: usize,
        done: Vec<Option<Expr>>,
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
                done: Vec::new(),
            }
        }
    }

    let mut stack = vec![Frame::new(arena, root)];

    loop {
        let top = stack.last_mut().expect("frame stack never empties before returning");
        if top.next < top.children.len() {
            let child = top.children[top.next];
            top.next += 1;
            stack.push(Frame::new(arena, child));
            continue;
        }

        let frame = stack.pop().unwrap();
        let original = arena.get(frame.node).clone();

        let outcome = match &original.kind {
            ExprKind::Leaf(leaf) => {
                if leaf.dir == backward && !seen.matches_any(table, leaf.descriptor) {
                    None
                } else {
                    Some(frame.node)
                }
            }
            ExprKind::And(_) => {
                if frame.done.iter().any(Option::is_none) {
                    None
                } else {
                    let survivors: Vec<Expr> = frame.done.into_iter().flatten().collect();
                    Some(arena.make_and(survivors, original.cost))
                }
            }
            ExprKind::Or(_) => {
                let survivors: Vec<Expr> = frame.done.into_iter().flatten().collect();
                if survivors.is_empty() {
                    None
                } else {
                    Some(arena.make_or(survivors, original.cost))
                }
            }
        };

        match stack.last_mut() {
            Some(parent) => parent.done.push(outcome),
            None => return outcome,
        }
    }
}

/// Record every forward-facing (`pass_dir`) LEAF reachable from `root`
/// into `seen`, for the next word the pass visits.
fn collect_forward_leaves(arena: &ExprArena, root: Expr, pass_dir: Direction, seen: &mut SeenSet, table: &ConnectorTable) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        match &arena.get(node).kind {
            ExprKind::Leaf(leaf) => {
                if leaf.dir == pass_dir {
                    seen.insert(table, leaf.descriptor);
                }
            }
            ExprKind::And(children) | ExprKind::Or(children) => stack.extend(children.iter().copied()),
        }
    }
}

/// One full expression-pruning pass over the sentence in `pass_dir`
/// (§4.4.2). Returns whether any word's surviving LEAF count shrank.
pub fn expression_prune_pass(arena: &mut ExprArena, table: &ConnectorTable, words: &mut [WordExpr], pass_dir: Direction) -> bool {
    let mut changed = false;
    let mut seen = SeenSet::new();
    let backward = pass_dir.flip();

    let order: Vec<usize> = match pass_dir {
        Direction::Plus => (0..words.len()).collect(),
        Direction::Minus => (0..words.len()).rev().collect(),
    };

    for i in order {
        let Some(root) = words[i] else { continue };
        let before = ops::size(arena, root);
        let purged = purge(arena, root, backward, &seen, table);
        let after = purged.map_or(0, |e| ops::size(arena, e));
        if after < before {
            changed = true;
        }
        words[i] = purged;
        if let Some(new_root) = words[i] {
            collect_forward_leaves(arena, new_root, pass_dir, &mut seen, table);
        }
    }

    changed
}

/// Run alternating passes to a fixed point (§4.4.2 "Iterate passes
/// until a full round deletes nothing").
pub fn run_to_fixed_point(arena: &mut ExprArena, table: &ConnectorTable, words: &mut [WordExpr]) {
    let mut pass = 0u32;
    loop {
        let dir = if pass % 2 == 0 { Direction::Plus } else { Direction::Minus };
        let changed = expression_prune_pass(arena, table, words, dir);
        tracing::debug!(pass, dir = ?dir, changed, "expression pruning pass");
        pass += 1;
        if !changed && pass >= 2 {
            break;
        }
    }
}
