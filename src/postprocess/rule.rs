/// A single post-processing rule (§4.6), grounded on `pp_rule` in
/// `post-process/pp-structures.h`: a selector naming the link the rule
/// triggers on, a criterion set of link-name patterns, and an
/// explanatory message reported on violation.
#[derive(Debug, Clone)]
pub struct PpRule {
    pub selector: String,
    pub link_set: Vec<String>,
    pub msg: String,
}

impl PpRule {
    pub fn new(selector: impl Into<String>, link_set: Vec<String>, msg: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            link_set,
            msg: msg.into(),
        }
    }
}
