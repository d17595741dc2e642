use rustc_hash::FxHashSet;

use super::rule::PpRule;

/// Postprocessing rule sets and auxiliary link-name sets (§4.6), loaded
/// from an external knowledge file but held here as pure data —
/// grounded on `pp_knowledge_s` in `post-process/pp-structures.h`,
/// trimmed to the rule families and link-sets spec.md §4.6 names
/// (`urfl_*` and cost-annotated variants are a file-format concern this
/// core does not parse).
#[derive(Debug, Clone, Default)]
pub struct PpKnowledge {
    /// Link names whose occurrence starts a new domain (§4.6 "Domains
    /// are computed ... by following link-type-specific starter rules").
    pub domain_starter_links: FxHashSet<String>,
    pub contains_one_rules: Vec<PpRule>,
    pub contains_none_rules: Vec<PpRule>,
    pub form_a_cycle_rules: Vec<PpRule>,
    pub bounded_rules: Vec<PpRule>,
}

impl PpKnowledge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_domain_starters(mut self, starters: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.domain_starter_links = starters.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_contains_one(mut self, rules: Vec<PpRule>) -> Self {
        self.contains_one_rules = rules;
        self
    }

    pub fn with_contains_none(mut self, rules: Vec<PpRule>) -> Self {
        self.contains_none_rules = rules;
        self
    }

    pub fn with_form_a_cycle(mut self, rules: Vec<PpRule>) -> Self {
        self.form_a_cycle_rules = rules;
        self
    }

    pub fn with_bounded(mut self, rules: Vec<PpRule>) -> Self {
        self.bounded_rules = rules;
        self
    }

    pub fn is_domain_starter(&self, link_name: &str) -> bool {
        self.domain_starter_links.contains(link_name)
    }
}
