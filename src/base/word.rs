/// Maximum number of words in a sentence.
///
/// Mirrors the original engine's `MAX_SENTENCE` cap (connectors.h):
/// word indices must leave room for a `BAD_WORD` sentinel one past the
/// last legal index.
pub const MAX_SENTENCE: usize = 254;

/// A word's position within a sentence (0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WordId(u16);

impl WordId {
    pub fn new(index: usize) -> Self {
        debug_assert!(index < MAX_SENTENCE, "word index out of range");
        Self(index as u16)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn checked_sub(self, n: usize) -> Option<Self> {
        self.index().checked_sub(n).map(Self::new)
    }

    pub fn checked_add(self, n: usize, sentence_len: usize) -> Option<Self> {
        let next = self.index() + n;
        (next < sentence_len).then(|| Self::new(next))
    }
}

impl std::fmt::Display for WordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
