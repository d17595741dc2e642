//! Shared fixtures for the end-to-end scenario tests (§8 of SPEC_FULL.md).
//!
//! Not compiled as its own test binary — `tests/common/mod.rs` is the
//! usual way to share code across separate `tests/*.rs` integration
//! crates without Cargo treating the helper file itself as a test.

use linkparse::{ConnectorTable, Direction, Interner, MapDictionary};

/// "the" (D+), "cat" (AND(D-,S+)), "ran" (S-) — enough to link a
/// three-word sentence with two connector families.
///
/// `with_unmatchable_word` additionally files a word "foo" under an
/// `X-` connector that no other word in the dictionary ever offers as
/// `X+` — expression pruning always empties "foo" out before disjunct
/// building even starts, independent of sentence position, making it a
/// deterministic stand-in for "a word that must end up forced null."
pub fn the_cat_ran_dict(with_unmatchable_word: bool) -> (ConnectorTable, MapDictionary) {
    let mut interner = Interner::new();
    let mut table = ConnectorTable::new();
    let d = table.add(&mut interner, "D");
    let s = table.add(&mut interner, "S");
    let x = with_unmatchable_word.then(|| table.add(&mut interner, "X"));
    table.finalize();

    let mut dict = MapDictionary::new();
    {
        let arena = dict.arena_mut();
        let the = arena.make_leaf(d, Direction::Plus, false, 0.0);
        dict.insert("the", the);
    }
    {
        let arena = dict.arena_mut();
        let left_d = arena.make_leaf(d, Direction::Minus, false, 0.0);
        let right_s = arena.make_leaf(s, Direction::Plus, false, 0.0);
        let cat = arena.make_and(vec![left_d, right_s], 0.0);
        dict.insert("cat", cat);
    }
    {
        let arena = dict.arena_mut();
        let ran = arena.make_leaf(s, Direction::Minus, false, 0.0);
        dict.insert("ran", ran);
    }
    if let Some(x) = x {
        let arena = dict.arena_mut();
        let foo = arena.make_leaf(x, Direction::Minus, false, 0.0);
        dict.insert("foo", foo);
    }
    (table, dict)
}
