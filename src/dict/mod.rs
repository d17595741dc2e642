//! External collaborator seams (§6 of SPEC_FULL.md / spec.md §6).
//!
//! Dictionary file parsing, tokenization and morphology splitting are
//! explicitly out of scope (§1) — this module defines only the traits
//! and plain-data types the parsing core consumes across that
//! boundary, plus the small amount of supplemental shape (idiom
//! naming, affix classes, dialect overlay) needed by any dictionary
//! builder, including test fixtures.

mod affix;
mod config;
mod idiom;
mod lookup;

pub use affix::{AffixClass, AffixTable, MapAffixTable};
pub use config::DictionaryDefines;
pub use idiom::{IdiomCounter, IdiomTag};
pub use lookup::{DictEntry, DictionaryLookup, MapDictionary};
