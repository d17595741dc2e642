//! Error taxonomy (§7 of SPEC_FULL.md / spec.md §7).

use thiserror::Error;

/// Resource axis exhausted while pruning or enumerating a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Time,
    Memory,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Time => write!(f, "time"),
            ResourceKind::Memory => write!(f, "memory"),
        }
    }
}

/// Dictionary-open / configuration failures (§7 "Configuration error").
///
/// These always surface before parsing begins — a sentence never starts
/// with a dictionary in an invalid configuration state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown dictionary define `{0}`")]
    UnknownDefine(String),
    #[error("malformed dialect entry: {0}")]
    MalformedDialectEntry(String),
    #[error("unknown locale `{0}`")]
    UnknownLocale(String),
    #[error("invalid option: {0}")]
    InvalidOption(String),
}

/// Top-level error returned from the public parsing API (§7).
///
/// `NoParse` is deliberately absent: per spec.md, "no parse at this null
/// count" is success with zero linkages, not an error variant — callers
/// read it off `Sentence::linkage_count()` returning `0`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LinkGrammarError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("resource exhausted ({kind}) during {phase}")]
    ResourceExhausted { kind: ResourceKind, phase: &'static str },

    /// A token had no dictionary entry, no affix match, and no
    /// configured unknown-word fallback. The external tokenizer
    /// boundary normally absorbs this; it reaches the core only when a
    /// caller hands in a token list bypassing that boundary.
    #[error("unrecognized token `{0}`")]
    UnrecognizedToken(String),
}

/// A contract breakage internal to the pipeline (§7 "Internal invariant
/// violation"): a connector string exceeding limits, a zero `uc_num`
/// surviving finalize, a tracon chain cycle, etc. These are programming
/// errors, not recoverable conditions, so they panic rather than return
/// a `Result` — matching spec.md's "Fatal; aborts the process."
pub fn invariant_violation(what: &str) -> ! {
    panic!("linkparse internal invariant violated: {what}");
}

pub type Result<T> = std::result::Result<T, LinkGrammarError>;
