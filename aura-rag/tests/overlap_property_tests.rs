//! Property tests for answer/evidence overlap scoring.

use aura_rag::document::{Document, ScoredDocument};
use aura_rag::overlap::{compute_overlap, jaccard, tokenize};
use proptest::prelude::*;

/// Text over a tiny vocabulary so overlaps and ties are frequent.
fn arb_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(prop_oneof!["ohm", "OHM", "volt", "amp", "v=ir", "probe"], 0..6)
        .prop_map(|words| words.join(" "))
}

fn arb_ranked() -> impl Strategy<Value = Vec<ScoredDocument>> {
    proptest::collection::vec((arb_text(), 0.0f32..1.0f32), 0..12).prop_map(|docs| {
        docs.into_iter()
            .map(|(text, score)| ScoredDocument::new(Document::new(text), score))
            .collect()
    })
}

/// **Property: one evidence entry per passage, sorted by overlap, ids preserved**
mod prop_compute_overlap {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn scores_are_within_unit_interval(answer in arb_text(), ranked in arb_ranked()) {
            for evidence in compute_overlap(&answer, &ranked) {
                prop_assert!((0.0..=1.0).contains(&evidence.overlap_score));
            }
        }

        #[test]
        fn one_entry_per_passage_with_permuted_ids(answer in arb_text(), ranked in arb_ranked()) {
            let evidence = compute_overlap(&answer, &ranked);
            prop_assert_eq!(evidence.len(), ranked.len());

            let mut ids: Vec<usize> = evidence.iter().map(|e| e.id).collect();
            ids.sort_unstable();
            prop_assert_eq!(ids, (1..=ranked.len()).collect::<Vec<_>>());

            for e in &evidence {
                prop_assert_eq!(e.retrieval_score, ranked[e.id - 1].score);
            }
        }

        #[test]
        fn sorted_descending_with_stable_ties(answer in arb_text(), ranked in arb_ranked()) {
            let evidence = compute_overlap(&answer, &ranked);
            for window in evidence.windows(2) {
                prop_assert!(window[0].overlap_score >= window[1].overlap_score);
                if window[0].overlap_score == window[1].overlap_score {
                    prop_assert!(window[0].id < window[1].id, "ties must keep rerank order");
                }
            }
        }

        #[test]
        fn disjoint_vocabularies_score_zero(
            answer in "[a-m]{1,6}( [a-m]{1,6}){0,4}",
            passage in "[n-z]{1,6}( [n-z]{1,6}){0,4}",
        ) {
            prop_assert_eq!(jaccard(&tokenize(&answer), &tokenize(&passage)), 0.0);
        }

        #[test]
        fn case_and_order_do_not_matter(words in proptest::collection::vec("[a-z]{1,6}", 1..8)) {
            let answer = words.join(" ");
            let mut shuffled: Vec<String> = words.iter().rev().map(|w| w.to_uppercase()).collect();
            shuffled.push(words[0].clone());
            prop_assert_eq!(jaccard(&tokenize(&answer), &tokenize(&shuffled.join("\n"))), 1.0);
        }

        #[test]
        fn score_one_only_for_identical_sets(a in arb_text(), b in arb_text()) {
            let (wa, wb) = (tokenize(&a), tokenize(&b));
            if jaccard(&wa, &wb) == 1.0 {
                prop_assert!(!wa.is_empty());
                prop_assert_eq!(wa, wb);
            }
        }
    }
}

#[test]
fn empty_answer_and_passage_score_zero() {
    let ranked = vec![ScoredDocument::new(Document::new("   "), 0.5)];
    let evidence = compute_overlap("", &ranked);
    assert_eq!(evidence.len(), 1);
    assert_eq!(evidence[0].overlap_score, 0.0);
}

#[test]
fn no_passages_yield_no_evidence() {
    assert!(compute_overlap("anything", &[]).is_empty());
}
