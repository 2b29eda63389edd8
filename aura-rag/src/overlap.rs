//! Lexical overlap between a generated answer and its evidence.
//!
//! The overlap score is the Jaccard similarity of lower-cased,
//! whitespace-separated word sets. It is a cheap attribution hint: a high
//! score means the answer shares much of a passage's vocabulary, not that
//! the passage was provably used.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::document::ScoredDocument;

/// A retrieved passage annotated with how much the answer overlaps it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Evidence {
    /// 1-based position of the passage in rerank order.
    pub id: usize,
    /// Source identifier of the passage.
    pub source: String,
    /// Page of the passage within its source.
    pub page: String,
    /// Ranking score the passage was presented to the generator with.
    pub retrieval_score: f32,
    /// Jaccard similarity between answer and passage words, in `[0, 1]`.
    pub overlap_score: f32,
}

/// Lower-case `text` and split it on whitespace into a set of words.
pub fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase().split_whitespace().map(str::to_string).collect()
}

/// `|a ∩ b| / |a ∪ b|`, or `0.0` when both sets are empty.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f32 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f32 / union as f32
}

/// Score every ranked passage against `answer`.
///
/// Returns one [`Evidence`] per passage, stable-sorted by descending overlap
/// so passages with equal overlap keep their rerank order. `id` preserves
/// the rerank position.
pub fn compute_overlap(answer: &str, ranked: &[ScoredDocument]) -> Vec<Evidence> {
    let answer_words = tokenize(answer);

    let mut evidence: Vec<Evidence> = ranked
        .iter()
        .enumerate()
        .map(|(i, scored)| {
            let doc_words = tokenize(scored.content());
            Evidence {
                id: i + 1,
                source: scored.document.source().to_string(),
                page: scored.document.page().to_string(),
                retrieval_score: scored.score,
                overlap_score: jaccard(&answer_words, &doc_words),
            }
        })
        .collect();

    evidence.sort_by(|a, b| b.overlap_score.total_cmp(&a.overlap_score));
    evidence
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    #[test]
    fn tokenize_lowercases_and_collapses_duplicates() {
        let words = tokenize("V=IR  v=ir\tOhm");
        assert_eq!(words.len(), 2);
        assert!(words.contains("v=ir"));
        assert!(words.contains("ohm"));
    }

    #[test]
    fn empty_sets_score_zero() {
        assert_eq!(jaccard(&tokenize(""), &tokenize("   ")), 0.0);
    }

    #[test]
    fn identical_sets_score_one() {
        assert_eq!(jaccard(&tokenize("a b c"), &tokenize("C b A a")), 1.0);
    }

    #[test]
    fn ids_follow_rerank_order_after_sorting() {
        let ranked = vec![
            ScoredDocument::new(Document::new("resistor color bands"), 0.9),
            ScoredDocument::new(Document::new("ohm law relates voltage"), 0.8),
        ];
        let evidence = compute_overlap("voltage ohm law", &ranked);
        assert_eq!(evidence[0].id, 2);
        assert_eq!(evidence[1].id, 1);
        assert_eq!(evidence[1].overlap_score, 0.0);
        assert_eq!(evidence[0].overlap_score, 0.75);
    }
}
