use super::tracon::TraconId;
use crate::base::{Cost, IStr};

/// A word-bound parse option: one complete left and one complete right
/// connector sequence, plus an accumulated cost (§3 "Disjunct").
///
/// The sequences themselves are not stored inline — `left`/`right` are
/// the head of a (possibly shared) tracon chain in the sentence's
/// [`super::tracon::TraconPool`], `None` meaning "no connectors on that
/// side".
#[derive(Debug, Clone)]
pub struct Disjunct {
    pub left: Option<TraconId>,
    pub right: Option<TraconId>,
    pub cost: Cost,
    /// Originating dictionary entry, carried onto every connector built
    /// for this disjunct.
    pub provenance: Option<IStr>,
    /// Category index used by generation; unset for plain parsing.
    pub category: Option<u32>,
}
