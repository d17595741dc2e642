use std::time::Instant;

use crate::error::{LinkGrammarError, ResourceKind};

use super::options::ParseOptions;

/// Tracks the wall-clock and (approximate) memory budget across a
/// single sentence's pipeline stages (§5 "checked between passes /
/// iterations").
///
/// Checked at macro-stage boundaries (expression pruning, disjunct-level
/// pruning, enumeration) rather than inside every individual pass —
/// a coarser granularity than spec.md's per-pass wording, recorded as a
/// simplification in DESIGN.md. Memory is approximated by counting live
/// disjuncts times their in-memory size, since this crate has no
/// allocator-level accounting hook.
pub struct Deadline {
    start: Instant,
    max_time: Option<std::time::Duration>,
    max_memory: Option<usize>,
}

impl Deadline {
    pub fn new(options: &ParseOptions) -> Self {
        Self {
            start: Instant::now(),
            max_time: options.max_parse_time,
            max_memory: options.max_memory,
        }
    }

    pub fn check_time(&self, phase: &'static str) -> Result<(), LinkGrammarError> {
        if let Some(max) = self.max_time
            && self.start.elapsed() > max
        {
            return Err(LinkGrammarError::ResourceExhausted {
                kind: ResourceKind::Time,
                phase,
            });
        }
        Ok(())
    }

    pub fn check_memory(&self, approx_bytes: usize, phase: &'static str) -> Result<(), LinkGrammarError> {
        if let Some(max) = self.max_memory
            && approx_bytes > max
        {
            return Err(LinkGrammarError::ResourceExhausted {
                kind: ResourceKind::Memory,
                phase,
            });
        }
        Ok(())
    }
}
