use crate::cdt::ConnectorTable;
use crate::dict::DictionaryLookup;
use crate::disjunct::{build_and_intern, Disjunct, TraconPool};
use crate::error::{LinkGrammarError, Result};
use crate::expr::{copy, CopyOptions, Expr, ExprArena};
use crate::linkage::{enumerate, EnumOptions, Linkage};
use crate::postprocess::{Postprocessor, PpKnowledge};
use crate::prune::{expression, run_disjunct_stage, run_expression_stage, PruneInput, WordExpr};

use super::options::ParseOptions;
use super::resource::Deadline;

/// The outcome of parsing one sentence (§5 of SPEC_FULL.md).
///
/// `linkages` is empty both when pruning detects "no parse at this
/// null count" (§4.4.6, §7 — a pruning failure, not an error) and when
/// pruning succeeds but the enumerator finds no connected, planar
/// linkage; `null_count` distinguishes a successful parse that used
/// forced-null words from one that used none.
#[derive(Debug, Clone)]
pub struct Sentence {
    pub tokens: Vec<String>,
    pub optional: Vec<bool>,
    pub null_count: usize,
    pub linkages: Vec<Linkage>,
}

impl Sentence {
    pub fn linkage_count(&self) -> usize {
        self.linkages.len()
    }

    pub fn num_words(&self) -> usize {
        self.tokens.len()
    }

    pub fn best_linkage(&self) -> Option<&Linkage> {
        self.linkages.first()
    }
}

/// Combine every dictionary sense of `word` into one OR'd expression
/// copied into the sentence-local `arena`, applying the optional
/// dialect cost overlay as it's copied (§4.2 `copy`, §6 "an options
/// bundle ... consulted by name").
fn build_word_expr<D: DictionaryLookup>(dict: &D, arena: &mut ExprArena, word: &str, copy_opts: &CopyOptions) -> Option<Expr> {
    let entries = dict.lookup(word);
    if entries.is_empty() {
        return None;
    }
    let copied: Vec<Expr> = entries
        .iter()
        .map(|entry| copy(dict.arena(), arena, entry.expr, copy_opts))
        .collect();
    if copied.len() == 1 {
        Some(copied[0])
    } else {
        Some(arena.make_or(copied, 0.0))
    }
}

/// Parse one sentence end to end (§5's pipeline): dictionary lookup,
/// expression pruning, disjunct building, disjunct-level pruning,
/// linkage enumeration, postprocessing.
///
/// `optional` marks words a caller already knows may be null-linked
/// (e.g. a dictionary-flagged optional word) independent of what
/// pruning discovers; forced nulls discovered during pruning (a word
/// left with zero disjuncts but still within `null_budget`) are folded
/// into the enumerator's own optional set so they're treated as legal
/// skips rather than parse failures (§4.4.6, §8 scenario 3).
pub fn sentence_parse<D: DictionaryLookup>(
    tokens: &[String],
    optional: &[bool],
    table: &ConnectorTable,
    dict: &D,
    pp: Option<&PpKnowledge>,
    options: &ParseOptions,
) -> Result<Sentence> {
    let deadline = Deadline::new(options);

    let mut arena = ExprArena::new();
    let copy_opts = CopyOptions { dialect: options.dialect.as_ref() };

    let mut word_exprs: Vec<WordExpr> = Vec::with_capacity(tokens.len());
    for token in tokens {
        match build_word_expr(dict, &mut arena, token, &copy_opts) {
            Some(root) => word_exprs.push(Some(root)),
            None => return Err(LinkGrammarError::UnrecognizedToken(token.clone())),
        }
    }

    deadline.check_time("expression pruning")?;
    run_expression_stage(&mut arena, table, &mut word_exprs);

    let length_cap = Some((options.short_length, options.all_short));
    let mut disjuncts: Vec<Vec<Disjunct>> = Vec::with_capacity(tokens.len());
    let mut pool = TraconPool::new();
    for root in &word_exprs {
        let list = match root {
            Some(r) => build_and_intern(&arena, table, &mut pool, *r, options.max_disjunct_cost, length_cap, None),
            None => Vec::new(),
        };
        disjuncts.push(list);
    }

    let approx_bytes: usize = disjuncts.iter().map(|ds| ds.len() * std::mem::size_of::<Disjunct>()).sum();
    deadline.check_memory(approx_bytes, "disjunct building")?;

    deadline.check_time("disjunct pruning")?;
    let mut prune_input = PruneInput {
        arena: &mut arena,
        table,
        pool: &mut pool,
        pp,
        optional,
        null_budget: options.null_budget,
    };

    if let Err(forced_nulls) = run_disjunct_stage(&mut prune_input, &mut disjuncts) {
        tracing::debug!(count = forced_nulls.len(), "no parse within null budget");
        return Ok(Sentence {
            tokens: tokens.to_vec(),
            optional: optional.to_vec(),
            null_count: forced_nulls.len(),
            linkages: Vec::new(),
        });
    }

    let effective_nullable: Vec<bool> = optional
        .iter()
        .zip(disjuncts.iter())
        .map(|(&opt, ds)| opt || ds.is_empty())
        .collect();
    let null_count = effective_nullable
        .iter()
        .zip(optional.iter())
        .filter(|(&eff, &opt)| eff && !opt)
        .count();

    deadline.check_time("linkage enumeration")?;
    let enum_opts = EnumOptions {
        linkage_limit: options.linkage_limit,
        allow_islands: options.allow_islands,
        repeatable_rand: options.repeatable_rand,
        rand_seed: options.rand_seed,
        ..EnumOptions::default()
    };
    let mut linkages = enumerate(table, &pool, &disjuncts, &effective_nullable, &enum_opts);

    if let Some(knowledge) = pp {
        let post = Postprocessor::new(knowledge);
        for linkage in &mut linkages {
            linkage.violations = post.check(linkage).into_iter().map(|v| v.msg).collect();
        }
        linkages.retain(|l| l.violations.is_empty());
    }

    Ok(Sentence {
        tokens: tokens.to_vec(),
        optional: optional.to_vec(),
        null_count,
        linkages,
    })
}

/// Parse a batch of independent sentences in parallel (§5 "Parallelism
/// ... across independent sentences, via `rayon`"). Single-threaded
/// within each sentence — the pipeline stages above share no state
/// across sentences, so each sentence gets its own arena, pool and
/// disjunct lists.
pub fn parse_batch<D>(
    sentences: &[(Vec<String>, Vec<bool>)],
    table: &ConnectorTable,
    dict: &D,
    pp: Option<&PpKnowledge>,
    options: &ParseOptions,
) -> Vec<Result<Sentence>>
where
    D: DictionaryLookup + Sync,
{
    use rayon::prelude::*;

    sentences
        .par_iter()
        .map(|(tokens, optional)| sentence_parse(tokens, optional, table, dict, pp, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{Direction, Interner};
    use crate::dict::MapDictionary;

    fn build_dict() -> (ConnectorTable, MapDictionary) {
        let mut interner = Interner::new();
        let mut table = ConnectorTable::new();
        let d = table.add(&mut interner, "D");
        let s = table.add(&mut interner, "S");
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
        (table, dict)
    }

    #[test]
    fn the_cat_ran_yields_two_links() {
        let (table, dict) = build_dict();
        let tokens = vec!["the".to_string(), "cat".to_string(), "ran".to_string()];
        let optional = vec![false, false, false];
        let options = ParseOptions::default();

        let sentence = sentence_parse(&tokens, &optional, &table, &dict, None, &options).unwrap();
        assert_eq!(sentence.linkage_count(), 1);
        let linkage = sentence.best_linkage().unwrap();
        assert_eq!(linkage.links.len(), 2);
        assert!(linkage.is_connected(&optional));
    }

    #[test]
    fn unrecognized_token_surfaces_as_error() {
        let (table, dict) = build_dict();
        let tokens = vec!["the".to_string(), "zzzqx".to_string()];
        let optional = vec![false, false];
        let options = ParseOptions::default();

        let err = sentence_parse(&tokens, &optional, &table, &dict, None, &options).unwrap_err();
        assert!(matches!(err, LinkGrammarError::UnrecognizedToken(ref t) if t == "zzzqx"));
    }

    #[test]
    fn ungrammatical_order_fails_within_zero_null_budget() {
        let (table, dict) = build_dict();
        // "cat the ran" has no way to link every word with zero nulls:
        // "the" only has a rightward D connector, but "cat"'s D
        // connector points leftward looking for an even earlier word.
        let tokens = vec!["cat".to_string(), "the".to_string(), "ran".to_string()];
        let optional = vec![false, false, false];
        let options = ParseOptions::default().with_null_budget(0);

        let sentence = sentence_parse(&tokens, &optional, &table, &dict, None, &options).unwrap();
        assert_eq!(sentence.linkage_count(), 0);
    }
}
