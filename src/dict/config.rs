use crate::base::Cost;

/// The named `#define` configuration values a dictionary exposes (§6
/// "Configuration `#define` values consulted by name").
///
/// Typed fields rather than a stringly-typed map — matching spec.md
/// §6's list exactly, since these are read by name throughout the
/// pipeline (max-disjunct-cost feeds the Disjunct Builder's cutoff,
/// empty-connector feeds idiom/optional-word handling, and so on).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub struct DictionaryDefines {
    pub locale: String,
    pub version: String,
    pub max_disjunct_cost: Cost,
    pub max_disjuncts: Option<usize>,
    pub disable_downcasing: bool,
    pub empty_connector: Option<String>,
    pub allow_duplicate_words: bool,
}

impl Default for DictionaryDefines {
    fn default() -> Self {
        Self {
            locale: "en_US.UTF-8".to_string(),
            version: "0".to_string(),
            max_disjunct_cost: 2.7,
            max_disjuncts: None,
            disable_downcasing: false,
            empty_connector: Some("ZZZ".to_string()),
            allow_duplicate_words: false,
        }
    }
}
