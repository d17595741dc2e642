use crate::base::IStr;
use crate::cdt::{DescriptorId, LengthLimit};

/// A runtime connector bound into a disjunct's connector sequence (§3
/// "Connector (post-pack)").
///
/// One [`Connector`] may be shared by many disjuncts through tracon
/// interning (see [`super::tracon::TraconPool`]) — `nearest_word`,
/// `farthest_word`, `refcount` and `pass_mark` are therefore properties
/// of the shared tail, not of any one disjunct's use of it. The
/// "shallow" flag described alongside these fields in the original
/// design is *not* stored here: because the same physical tail can be
/// the outermost connector for one disjunct and an inner one for
/// another (that's the whole point of sharing), shallowness is
/// recomputed per traversal by [`super::tracon::TraconPool::chain`]
/// instead of cached on the node.
#[derive(Debug, Clone)]
pub struct Connector {
    pub descriptor: DescriptorId,
    pub multi: bool,
    /// Effective per-sentence length limit, seeded from the
    /// descriptor's own limit at construction time.
    pub length_limit: LengthLimit,
    /// Smallest word-distance (from this connector's own word) it could
    /// still link across, or `None` once the pruner has invalidated it
    /// (§4.4.3 "mark `c.nearest_word` as invalid").
    pub nearest_word: Option<u16>,
    /// Largest word-distance it could still link across.
    pub farthest_word: Option<u16>,
    /// Count of disjuncts currently referencing this tail via any
    /// sharing chain starting at or beyond it.
    pub refcount: u32,
    /// Pass-number stamp so a pruning pass visits a shared tail once
    /// regardless of how many disjuncts reach it.
    pub pass_mark: u32,
    /// Originating dictionary entry, for diagnostics.
    pub provenance: Option<IStr>,
}

impl Connector {
    /// Build the pre-pruning state for a connector at `depth` (0 =
    /// shallowest) within its disjunct's side sequence.
    ///
    /// `nearest_word` starts at `depth + 1` words away — the chain must
    /// have been satisfied through `depth` shallower connectors first,
    /// each consuming at least one word of run-up. `farthest_word`
    /// comes straight from the descriptor's length limit.
    pub fn initial(
        descriptor: DescriptorId,
        multi: bool,
        length_limit: LengthLimit,
        provenance: Option<IStr>,
        depth: u16,
    ) -> Self {
        let farthest_word = match length_limit {
            LengthLimit::Bounded(max) => Some(max as u16),
            LengthLimit::Unlimited => None,
        };
        Self {
            descriptor,
            multi,
            length_limit,
            nearest_word: Some(depth + 1),
            farthest_word,
            refcount: 0,
            pass_mark: 0,
            provenance,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.nearest_word.is_some()
    }

    pub fn invalidate(&mut self) {
        self.nearest_word = None;
    }
}
