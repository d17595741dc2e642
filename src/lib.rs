//! `linkparse` — a dependency-grammar parsing core.
//!
//! Given a dictionary (connector expressions per word, supplied by an
//! external collaborator through [`dict::DictionaryLookup`]) and a
//! tokenized sentence, this crate prunes each word's expression down to
//! the disjuncts consistent with the rest of the sentence, enumerates
//! the planar, connected linkages those disjuncts support, and checks
//! each candidate against a postprocessing rule set.
//!
//! Pipeline, in order: [`cdt`] interns connector strings into
//! [`cdt::ConnectorDescriptor`]s; [`expr`] holds each word's expression
//! tree; [`disjunct`] expands a tree into [`disjunct::Disjunct`]s with
//! hash-consed connector-sequence sharing; [`prune`] removes disjuncts
//! that can never participate in a valid linkage; [`linkage`] enumerates
//! surviving candidates; [`postprocess`] validates them against a rule
//! set. [`sentence`] drives all of the above for one or many sentences.
//!
//! Tokenization, morphology splitting and dictionary file parsing are
//! explicitly out of scope — see [`dict::DictionaryLookup`] for the
//! seam a caller implements to supply them.

pub mod base;
pub mod cdt;
pub mod dict;
pub mod disjunct;
pub mod error;
pub mod expr;
pub mod linkage;
pub mod postprocess;
pub mod prune;
pub mod sentence;

pub use base::{Cost, Direction, HeadDependent, IStr, Interner, WordId};
pub use cdt::{ConnectorDescriptor, ConnectorTable, DescriptorId};
pub use dict::{AffixTable, DictEntry, DictionaryDefines, DictionaryLookup, MapAffixTable, MapDictionary};
pub use disjunct::{build_and_intern, Connector, Disjunct, TraconId, TraconPool};
pub use error::{ConfigError, LinkGrammarError, Result};
pub use expr::{DialectTable, Expr, ExprArena, ExprKind};
pub use linkage::{enumerate, EnumOptions, Link, Linkage};
pub use postprocess::{PpKnowledge, PpRule, Postprocessor, RuleKind, Violation};
pub use sentence::{parse_batch, sentence_parse, ParseOptions, Sentence};
