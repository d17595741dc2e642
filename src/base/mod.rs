//! Foundation types for the linkparse core.
//!
//! This module provides fundamental types used throughout the parsing
//! pipeline:
//! - [`WordId`] — a word's position in a sentence
//! - [`Cost`] — the additive cost type used by expressions, disjuncts and
//!   linkages
//! - [`Direction`] — left (`-`) vs right (`+`) linking connectors
//! - [`Interner`], [`IStr`] — string interning for connector strings and
//!   provenance text
//!
//! This module has no dependencies on other linkparse modules.

mod interner;
mod word;

pub use interner::{IStr, Interner};
pub use word::{WordId, MAX_SENTENCE};

/// The additive cost type used by expression nodes, disjuncts and
/// linkages (§3, §4.2 of SPEC_FULL.md).
pub type Cost = f32;

/// A connector's linking direction: `+` reaches toward later words,
/// `-` reaches toward earlier words (§3 "Expression node").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `-` — left-linking: connects to an earlier word.
    Minus,
    /// `+` — right-linking: connects to a later word.
    Plus,
}

impl Direction {
    /// The opposite direction.
    pub fn flip(self) -> Self {
        match self {
            Direction::Minus => Direction::Plus,
            Direction::Plus => Direction::Minus,
        }
    }

    /// `0` for left, `1` for right — used to index the two-sided
    /// per-word power-pruning tables (§4.4.3).
    pub fn side(self) -> usize {
        match self {
            Direction::Minus => 0,
            Direction::Plus => 1,
        }
    }
}

/// Head/dependent tag on a connector's leading lowercase letter
/// (§4.4.1: "if both carry the same non-empty head/dependent tag, they
/// do not match; opposite tags match").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadDependent {
    Head,
    Dependent,
}

impl HeadDependent {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'h' => Some(HeadDependent::Head),
            'd' => Some(HeadDependent::Dependent),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            HeadDependent::Head => 'h',
            HeadDependent::Dependent => 'd',
        }
    }
}
