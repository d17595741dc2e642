//! §8 scenario 5: the enumerator finds a structurally valid candidate,
//! but postprocessing rejects it for missing a required nested link —
//! the final sentence has no accepted linkage at all.

use linkparse::{sentence_parse, ConnectorTable, Direction, Interner, MapDictionary, ParseOptions, PpKnowledge, PpRule};

fn cat_ran_dict() -> (ConnectorTable, MapDictionary) {
    let mut interner = Interner::new();
    let mut table = ConnectorTable::new();
    let s = table.add(&mut interner, "S");
    table.finalize();

    let mut dict = MapDictionary::new();
    {
        let arena = dict.arena_mut();
        let cat = arena.make_leaf(s, Direction::Plus, false, 0.0);
        dict.insert("cat", cat);
    }
    {
        let arena = dict.arena_mut();
        let ran = arena.make_leaf(s, Direction::Minus, false, 0.0);
        dict.insert("ran", ran);
    }
    (table, dict)
}

#[test]
fn candidate_without_pp_knowledge_is_accepted() {
    let (table, dict) = cat_ran_dict();
    let tokens = vec!["cat".to_string(), "ran".to_string()];
    let optional = vec![false, false];
    let options = ParseOptions::default();

    let sentence = sentence_parse(&tokens, &optional, &table, &dict, None, &options).unwrap();
    assert_eq!(sentence.linkage_count(), 1);
}

#[test]
fn contains_one_rule_without_a_criterion_link_rejects_every_candidate() {
    let (table, dict) = cat_ran_dict();
    let tokens = vec!["cat".to_string(), "ran".to_string()];
    let optional = vec![false, false];
    let options = ParseOptions::default();

    // "S" links must nest a "D" link somewhere underneath them; this
    // tiny dictionary never produces one, so every "S"-only linkage
    // violates the rule.
    let pp = PpKnowledge::new().with_contains_one(vec![PpRule::new("S", vec!["D".into()], "S requires a nested D")]);

    let sentence = sentence_parse(&tokens, &optional, &table, &dict, Some(&pp), &options).unwrap();
    assert_eq!(sentence.linkage_count(), 0);
}
