use crate::base::{Cost, Direction};
use crate::cdt::DescriptorId;

/// Handle into an [`ExprArena`] — a node of an expression tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Expr(pub(crate) u32);

impl Expr {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Macro or dialect-component tag annotating a node (§3 "An optional tag
/// ... may annotate any node").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Dialect(super::DialectTag),
    Macro(u32),
}

/// A leaf connector reference (§3 "Expression node", LEAF case).
#[derive(Debug, Clone)]
pub struct LeafNode {
    pub descriptor: DescriptorId,
    pub dir: Direction,
    /// May satisfy arbitrarily many matching partners.
    pub multi: bool,
    pub cost: Cost,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    Leaf(LeafNode),
    /// Ordered child sequence — order encodes grammatical "deepness"
    /// used by the Disjunct Builder (§4.3).
    And(Vec<Expr>),
    /// Unordered-semantically child sequence.
    Or(Vec<Expr>),
}

/// One node of an expression tree, plus its additive cost contribution
/// and optional tag.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: ExprKind,
    /// Additive cost contributed by this node itself (e.g. a bracket
    /// level, or a numeric cost suffix) — not the subtree total.
    pub cost: Cost,
    pub tag: Option<Tag>,
}

/// Owns every expression node built for a dictionary. Trees are shared
/// by reference ([`Expr`] handles) across words.
#[derive(Debug, Default)]
pub struct ExprArena {
    nodes: Vec<Node>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, e: Expr) -> &Node {
        &self.nodes[e.index()]
    }

    fn push(&mut self, node: Node) -> Expr {
        let id = Expr(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn make_leaf(
        &mut self,
        descriptor: DescriptorId,
        dir: Direction,
        multi: bool,
        cost: Cost,
    ) -> Expr {
        self.push(Node {
            kind: ExprKind::Leaf(LeafNode {
                descriptor,
                dir,
                multi,
                cost,
            }),
            cost: 0.0,
            tag: None,
        })
    }

    /// The zeroary AND: "always satisfied with zero connectors".
    pub fn make_empty(&mut self) -> Expr {
        self.push(Node {
            kind: ExprKind::And(Vec::new()),
            cost: 0.0,
            tag: None,
        })
    }

    /// `and(children...)`, with additive node cost (e.g. a bracket
    /// level). A single-child AND needs no explicit "collapse": the
    /// general n-ary cartesian-product evaluation in [`crate::disjunct`]
    /// already reduces a 1-child AND to exactly "child's disjuncts plus
    /// this node's cost", so no special case is required here (see
    /// DESIGN.md).
    pub fn make_and(&mut self, children: Vec<Expr>, cost: Cost) -> Expr {
        self.push(Node {
            kind: ExprKind::And(children),
            cost,
            tag: None,
        })
    }

    /// `or(children...)`.
    pub fn make_or(&mut self, children: Vec<Expr>, cost: Cost) -> Expr {
        self.push(Node {
            kind: ExprKind::Or(children),
            cost,
            tag: None,
        })
    }

    /// `optional(e) := or(zeroary_and, e)`.
    pub fn optional(&mut self, e: Expr) -> Expr {
        let empty = self.make_empty();
        self.make_or(vec![empty, e], 0.0)
    }

    pub fn set_tag(&mut self, e: Expr, tag: Tag) {
        self.nodes[e.index()].tag = Some(tag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Direction;
    use crate::cdt::DescriptorId;

    fn desc(n: u32) -> DescriptorId {
        DescriptorId::for_test(n)
    }

    #[test]
    fn optional_wraps_empty_and_and_expr() {
        let mut arena = ExprArena::new();
        let leaf = arena.make_leaf(desc(0), Direction::Plus, false, 0.0);
        let opt = arena.optional(leaf);
        match &arena.get(opt).kind {
            ExprKind::Or(children) => assert_eq!(children.len(), 2),
            _ => panic!("expected Or"),
        }
    }
}
