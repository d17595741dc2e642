use std::sync::atomic::{AtomicU32, Ordering};

/// A synthetic uppercase connector prefix generated for one idiom
/// occurrence during dictionary construction (§5.1 of SPEC_FULL.md,
/// grounded on `dict-common/idiom.c`'s rolling `current_idiom` counter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdiomTag(u32);

impl IdiomTag {
    /// Render as a base-26 string: `IDA`, `IDB`, ..., `IDZ`, `IDAA`, ...
    /// The `ID` prefix keeps synthetic idiom connectors from ever
    /// colliding with a real grammar's uppercase connector types, which
    /// by convention don't start with a bare letter sequence this short
    /// composed purely from a counter.
    pub fn as_string(self) -> String {
        let mut n = self.0;
        let mut letters = Vec::new();
        loop {
            letters.push((b'A' + (n % 26) as u8) as char);
            n /= 26;
            if n == 0 {
                break;
            }
            n -= 1;
        }
        letters.reverse();
        format!("ID{}", letters.into_iter().collect::<String>())
    }
}

/// Per-dictionary counter advanced atomically during dictionary build
/// only (spec.md §9 Design Notes: "Model this as a per-dictionary
/// counter advanced atomically during dictionary build only").
#[derive(Debug, Default)]
pub struct IdiomCounter(AtomicU32);

impl IdiomCounter {
    pub fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    pub fn next(&self) -> IdiomTag {
        IdiomTag(self.0.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_advances_and_renders_base26() {
        let counter = IdiomCounter::new();
        assert_eq!(counter.next().as_string(), "IDA");
        assert_eq!(counter.next().as_string(), "IDB");
    }

    #[test]
    fn wraps_to_two_letters_after_z() {
        let counter = IdiomCounter::new();
        for _ in 0..26 {
            counter.next();
        }
        assert_eq!(counter.next().as_string(), "IDAA");
    }
}
