use crate::cdt::{lc_letter_at, ConnectorDescriptor, ConnectorTable, DescriptorId, LC_BITS};

/// Cheap boolean form of the connector matching algebra (§4.4.1), used
/// on the hot pruning paths where the realized link name is discarded.
pub fn matches(table: &ConnectorTable, a: DescriptorId, b: DescriptorId) -> bool {
    let da = table.get(a);
    let db = table.get(b);
    da.uc_num == db.uc_num
        && (da.lc_letters ^ db.lc_letters) & da.lc_mask & db.lc_mask == 0
        && !matches!((da.head_dependent, db.head_dependent), (Some(x), Some(y)) if x == y)
}

/// Full matching algebra (§4.4.1): `Some(name)` with the realized link
/// name if `a` and `b` can link, `None` otherwise.
pub fn try_match(table: &ConnectorTable, a: DescriptorId, b: DescriptorId) -> Option<String> {
    if !matches(table, a, b) {
        return None;
    }
    Some(realize(table.get(a), table.get(b)))
}

/// Conservative intersection of two matching connectors' strings:
/// uppercase prefix verbatim, and for each lowercase position the
/// wildcard side takes the other's letter (§4.4.1 "the realized link
/// name"). A position where both sides are wildcard stays a wildcard
/// in the result rather than truncating the name. The two subscripts
/// can differ in length, so the realized name runs out to the longer
/// of the two, not to the first unresolved position.
fn realize(da: &ConnectorDescriptor, db: &ConnectorDescriptor) -> String {
    let mut out = da.uc_prefix().to_string();
    let max_positions = (64 / LC_BITS) as usize;
    let len = da.lc_subscript_len().max(db.lc_subscript_len()).min(max_positions);
    for pos in 0..len as u32 {
        let letter =
            lc_letter_at(da.lc_letters, da.lc_mask, pos).or_else(|| lc_letter_at(db.lc_letters, db.lc_mask, pos));
        out.push(letter.unwrap_or('*'));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{HeadDependent, Interner};

    fn table_with(strings: &[&str]) -> (ConnectorTable, Vec<DescriptorId>) {
        let mut table = ConnectorTable::new();
        let mut interner = Interner::new();
        let ids = strings.iter().map(|s| table.add(&mut interner, s)).collect();
        table.finalize();
        (table, ids)
    }

    #[test]
    fn matching_is_symmetric() {
        let (table, ids) = table_with(&["Ss*b", "Ssab"]);
        assert_eq!(matches(&table, ids[0], ids[1]), matches(&table, ids[1], ids[0]));
    }

    #[test]
    fn wildcard_tolerant_subscript_matches() {
        let (table, ids) = table_with(&["Ss*b", "Ssab"]);
        assert!(matches(&table, ids[0], ids[1]));
    }

    #[test]
    fn conflicting_letters_do_not_match() {
        let (table, ids) = table_with(&["Ssab", "Sscb"]);
        assert!(!matches(&table, ids[0], ids[1]));
    }

    #[test]
    fn different_uc_prefix_never_matches() {
        let (table, ids) = table_with(&["A", "B"]);
        assert!(!matches(&table, ids[0], ids[1]));
    }

    #[test]
    fn same_head_dependent_tag_does_not_match() {
        let mut table = ConnectorTable::new();
        let mut interner = Interner::new();
        let a = table.add(&mut interner, "hAB");
        let b = table.add(&mut interner, "hAB");
        table.finalize();
        assert!(!matches(&table, a, b));
        assert_eq!(table.get(a).head_dependent, Some(HeadDependent::Head));
    }

    #[test]
    fn opposite_head_dependent_tags_match() {
        let mut table = ConnectorTable::new();
        let mut interner = Interner::new();
        let h = table.add(&mut interner, "hAB");
        let d = table.add(&mut interner, "dAB");
        table.finalize();
        assert!(matches(&table, h, d));
    }

    #[test]
    fn realized_name_has_no_wildcard_where_either_side_was_concrete() {
        let (table, ids) = table_with(&["Ss*b", "Ssab"]);
        let name = try_match(&table, ids[0], ids[1]).unwrap();
        assert_eq!(name, "Ssab");
    }

    #[test]
    fn realized_name_keeps_letters_past_a_shared_wildcard_position() {
        let (table, ids) = table_with(&["Ss*b", "Ss*b"]);
        let name = try_match(&table, ids[0], ids[1]).unwrap();
        assert_eq!(name, "Ss*b");
    }
}
