/// Conservative post-process match (§4.4.1) extended to full link names
/// (§4.6 "Pattern matching is the conservative post-process match
/// extended to full link names"): `*` matches any single character,
/// and a pattern shorter than the candidate name matches a prefix with
/// the remainder treated as don't-care, mirroring how a connector's
/// uppercase prefix binds while its lowercase subscript tolerates
/// trailing wildcards.
pub fn pp_match(pattern: &str, name: &str) -> bool {
    let mut p = pattern.chars();
    let mut n = name.chars();
    loop {
        match (p.next(), n.next()) {
            (None, _) => return true,
            (Some(_), None) => return false,
            (Some(pc), Some(nc)) => {
                if pc != '*' && pc != nc {
                    return false;
                }
            }
        }
    }
}

/// Does `name` match any pattern in `patterns`?
pub fn pp_match_any(patterns: &[String], name: &str) -> bool {
    patterns.iter().any(|p| pp_match(p, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_pattern_matches_exact_name() {
        assert!(pp_match("Ss", "Ss"));
    }

    #[test]
    fn wildcard_position_matches_any_letter() {
        assert!(pp_match("S*", "Ss"));
        assert!(pp_match("S*", "Sp"));
    }

    #[test]
    fn shorter_pattern_is_a_prefix_match() {
        assert!(pp_match("S", "Ssab"));
    }

    #[test]
    fn longer_pattern_never_matches_shorter_name() {
        assert!(!pp_match("Ssab", "Ss"));
    }

    #[test]
    fn mismatched_letter_does_not_match() {
        assert!(!pp_match("Ss", "Sp"));
    }
}
