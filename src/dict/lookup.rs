use crate::expr::{Expr, ExprArena};

/// One dictionary sense for a word: the display name under which it was
/// filed (usually the word itself, or a `word.subscript` variant) and
/// the expression tree governing its connectors.
#[derive(Debug, Clone, Copy)]
pub struct DictEntry {
    pub expr: Expr,
}

/// External collaborator (§1, §6): the dictionary file parser,
/// tokenizer and morphology splitter live outside this crate's scope.
/// This trait is the seam the core calls across — `lookup`/`lookup_wild`
/// — without knowing whether the backend is a plain-text file, SQL
/// database or AtomSpace.
pub trait DictionaryLookup {
    /// The arena every [`DictEntry::expr`] returned by this dictionary
    /// is a handle into.
    fn arena(&self) -> &ExprArena;

    /// Exact-token lookup (§6 `lookup(word) -> list of (string,
    /// expression)`).
    fn lookup(&self, word: &str) -> Vec<DictEntry>;

    /// Wildcard pattern lookup, used by the external CLI's debugging
    /// commands (§6 `lookup_wild(pattern) -> list`) — `*` matches any
    /// run of characters. Most callers never need this; it exists so a
    /// dictionary implementation has a single trait surface instead of
    /// two unrelated entry points.
    fn lookup_wild(&self, pattern: &str) -> Vec<DictEntry>;
}

/// A minimal in-memory [`DictionaryLookup`] — what a test fixture or a
/// small embedded grammar builds directly, without any file-format
/// backend. Mirrors the teacher's in-test `cached_stdlib`-style fixture
/// dictionaries (`src/project/cached_stdlib.rs`): built once, read many
/// times.
#[derive(Debug, Default)]
pub struct MapDictionary {
    arena: ExprArena,
    entries: rustc_hash::FxHashMap<String, Vec<Expr>>,
}

impl MapDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arena_mut(&mut self) -> &mut ExprArena {
        &mut self.arena
    }

    /// File `expr` under `word`'s exact-token bucket.
    pub fn insert(&mut self, word: impl Into<String>, expr: Expr) {
        self.entries.entry(word.into()).or_default().push(expr);
    }
}

impl DictionaryLookup for MapDictionary {
    fn arena(&self) -> &ExprArena {
        &self.arena
    }

    fn lookup(&self, word: &str) -> Vec<DictEntry> {
        self.entries
            .get(word)
            .map(|exprs| exprs.iter().map(|&expr| DictEntry { expr }).collect())
            .unwrap_or_default()
    }

    fn lookup_wild(&self, pattern: &str) -> Vec<DictEntry> {
        self.entries
            .iter()
            .filter(|(word, _)| crate::postprocess::pp_match(pattern, word))
            .flat_map(|(_, exprs)| exprs.iter().map(|&expr| DictEntry { expr }))
            .collect()
    }
}
