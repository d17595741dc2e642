//! §8 scenario 3: a structurally unmatchable word is pruned to zero
//! disjuncts, and `null_budget` gates whether that's tolerated.

mod common;

use linkparse::{sentence_parse, ParseOptions};

#[test]
fn zero_null_budget_rejects_an_unmatchable_word() {
    let (table, dict) = common::the_cat_ran_dict(true);
    let tokens = ["foo", "the", "cat", "ran"].map(String::from).to_vec();
    let optional = vec![false, false, false, false];
    let options = ParseOptions::default().with_null_budget(0);

    let sentence = sentence_parse(&tokens, &optional, &table, &dict, None, &options).unwrap();
    assert_eq!(sentence.linkage_count(), 0);
}

#[test]
fn one_null_budget_links_around_the_unmatchable_word() {
    let (table, dict) = common::the_cat_ran_dict(true);
    let tokens = ["foo", "the", "cat", "ran"].map(String::from).to_vec();
    let optional = vec![false, false, false, false];
    let options = ParseOptions::default().with_null_budget(1);

    let sentence = sentence_parse(&tokens, &optional, &table, &dict, None, &options).unwrap();
    assert_eq!(sentence.linkage_count(), 1);
    assert_eq!(sentence.null_count, 1);

    let linkage = sentence.best_linkage().unwrap();
    assert_eq!(linkage.links.len(), 2);
    // "foo" (word 0) never appears as either endpoint — it contributed
    // no disjuncts and was skipped entirely.
    assert!(linkage
        .links
        .iter()
        .all(|l| l.left_word.index() != 0 && l.right_word.index() != 0));
}
