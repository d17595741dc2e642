use super::arena::{Expr, ExprArena, ExprKind, LeafNode, Tag};
use super::dialect::DialectTable;

/// Options for [`copy`] — currently just the dialect cost overlay to
/// apply (§4.2 "Cost semantics").
#[derive(Debug, Default)]
pub struct CopyOptions<'a> {
    pub dialect: Option<&'a DialectTable>,
}

impl<'a> CopyOptions<'a> {
    fn tag_cost(&self, tag: Option<Tag>) -> f32 {
        match (tag, self.dialect) {
            (Some(Tag::Dialect(d)), Some(table)) => table.cost_for(d),
            _ => 0.0,
        }
    }
}

/// Count the LEAFs in the subtree rooted at `root` (§4.2 `size`).
///
/// Iterative (explicit stack) per the Design Notes' guidance to avoid
/// deep recursion on large grammars.
pub fn size(arena: &ExprArena, root: Expr) -> usize {
    let mut stack = vec![root];
    let mut count = 0usize;
    while let Some(node) = stack.pop() {
        match &arena.get(node).kind {
            ExprKind::Leaf(_) => count += 1,
            ExprKind::And(children) | ExprKind::Or(children) => {
                stack.extend(children.iter().copied());
            }
        }
    }
    count
}

/// One stack frame of the iterative post-order copy in [`copy`].
struct Frame {
    node: Expr,
    children: Vec<Expr>,
    next: usize,
    done: Vec<Expr>,
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

/// Deep-copy the subtree rooted at `root` from `src` into `dst`,
/// additively applying the dialect cost overlay (§4.2 `copy`).
///
/// Iterative post-order traversal (explicit stack) — see the Design
/// Notes' guidance on deep expression recursion.
pub fn copy(src: &ExprArena, dst: &mut ExprArena, root: Expr, opts: &CopyOptions) -> Expr {
    let mut stack = vec![Frame::new(src, root)];

    loop {
        let top = stack.last_mut().expect("frame stack never empties before returning");
        if top.next < top.children.len() {
            let child = top.children[top.next];
            top.next += 1;
            stack.push(Frame::new(src, child));
            continue;
        }

        let frame = stack.pop().unwrap();
        let original = src.get(frame.node);
        let extra = opts.tag_cost(original.tag);

        let new_id = match &original.kind {
            ExprKind::Leaf(leaf) => push_leaf(dst, leaf, extra, original.tag),
            ExprKind::And(_) => push_combinator(dst, true, frame.done, original.cost + extra, original.tag),
            ExprKind::Or(_) => push_combinator(dst, false, frame.done, original.cost + extra, original.tag),
        };

        match stack.last_mut() {
            Some(parent) => parent.done.push(new_id),
            None => return new_id,
        }
    }
}

fn push_leaf(dst: &mut ExprArena, leaf: &LeafNode, extra: f32, tag: Option<Tag>) -> Expr {
    let id = dst.make_leaf(leaf.descriptor, leaf.dir, leaf.multi, leaf.cost + extra);
    if let Some(tag) = tag {
        dst.set_tag(id, tag);
    }
    id
}

fn push_combinator(dst: &mut ExprArena, is_and: bool, children: Vec<Expr>, cost: f32, tag: Option<Tag>) -> Expr {
    let id = if is_and {
        dst.make_and(children, cost)
    } else {
        dst.make_or(children, cost)
    };
    if let Some(tag) = tag {
        dst.set_tag(id, tag);
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Direction;
    use crate::cdt::DescriptorId;
    use crate::expr::dialect::DialectTag;

    fn desc(n: u32) -> DescriptorId {
        DescriptorId::for_test(n)
    }

    #[test]
    fn size_counts_leaves_across_and_or() {
        let mut arena = ExprArena::new();
        let a = arena.make_leaf(desc(0), Direction::Plus, false, 0.0);
        let b = arena.make_leaf(desc(1), Direction::Minus, false, 0.0);
        let c = arena.make_leaf(desc(2), Direction::Plus, false, 0.0);
        let or_node = arena.make_or(vec![a, b], 0.0);
        let and_node = arena.make_and(vec![or_node, c], 0.0);
        assert_eq!(size(&arena, and_node), 3);
    }

    #[test]
    fn copy_applies_dialect_cost_to_tagged_leaf() {
        let mut arena = ExprArena::new();
        let leaf = arena.make_leaf(desc(0), Direction::Plus, false, 1.0);
        arena.set_tag(leaf, Tag::Dialect(DialectTag(7)));

        let mut dialect = DialectTable::new();
        dialect.set_component(DialectTag(7), 2.5, true);

        let mut out = ExprArena::new();
        let copied = copy(
            &arena,
            &mut out,
            leaf,
            &CopyOptions {
                dialect: Some(&dialect),
            },
        );

        match &out.get(copied).kind {
            ExprKind::Leaf(l) => assert_eq!(l.cost, 3.5),
            _ => panic!("expected leaf"),
        }
    }

    #[test]
    fn copy_preserves_structure() {
        let mut arena = ExprArena::new();
        let a = arena.make_leaf(desc(0), Direction::Plus, false, 0.5);
        let b = arena.make_leaf(desc(1), Direction::Minus, false, 0.25);
        let and_node = arena.make_and(vec![a, b], 0.1);

        let mut out = ExprArena::new();
        let copied = copy(&arena, &mut out, and_node, &CopyOptions::default());
        assert_eq!(size(&out, copied), 2);
        match &out.get(copied).kind {
            ExprKind::And(children) => assert_eq!(children.len(), 2),
            _ => panic!("expected And"),
        }
    }
}
