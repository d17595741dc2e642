//! Linkage Enumerator (§4.5 of SPEC_FULL.md).
//!
//! Enumerates linkages honoring planarity, connectivity, connector
//! matching and one-disjunct-per-word, in non-decreasing cost order up
//! to a configured limit.

mod enumerator;
mod link;

pub use enumerator::{enumerate, EnumOptions};
pub use link::{Link, Linkage};
