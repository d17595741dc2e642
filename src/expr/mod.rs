//! Expression Engine (§4.2 of SPEC_FULL.md).
//!
//! Per-word boolean expressions over connectors: OR/AND/LEAF trees,
//! shared by reference across words when built from a shared dictionary
//! entry. Expressions live in an [`ExprArena`] owned by the dictionary —
//! hash-consed the way the teacher arena-allocates symbols
//! (`src/semantic/symbol_table/table.rs`'s `arena: Vec<Symbol>`), so a
//! tree is a handle ([`Expr`]) into a flat `Vec<Node>`, never an owned
//! recursive structure.

mod arena;
mod dialect;
pub mod ops;

pub use arena::{Expr, ExprArena, ExprKind, LeafNode, Node, Tag};
pub use dialect::{DialectTable, DialectTag};
pub use ops::{copy, size, CopyOptions};
