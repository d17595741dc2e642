//! Disjunct Builder and tracon sharing pool (§4.3 of SPEC_FULL.md).
//!
//! Expands a word's expression tree into a flat list of [`Disjunct`]s —
//! pairs of left/right connector sequences — and hash-conses identical
//! connector-sequence suffixes across disjuncts and words into a shared
//! [`TraconPool`], the arena the Pruner mutates in place.

mod builder;
mod connector;
mod disjunct;
mod tracon;

pub use builder::build_and_intern;
pub use connector::Connector;
pub use disjunct::Disjunct;
pub use tracon::{TraconId, TraconPool};
