//! Sentence-level orchestration (§5 of SPEC_FULL.md).
//!
//! Wires the Expression Engine, Disjunct Builder, Pruner, Linkage
//! Enumerator and Postprocessor into the single-sentence and
//! batch-of-sentences entry points. Everything below this module is
//! single-threaded; parallelism happens only across independent
//! sentences, via [`parse_batch`]'s `rayon` fan-out.

mod options;
mod parse;
mod resource;

pub use options::ParseOptions;
pub use parse::{parse_batch, sentence_parse, Sentence};
pub use resource::Deadline;
