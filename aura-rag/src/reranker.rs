//! Reranker trait for re-scoring retrieved documents.

use async_trait::async_trait;

use crate::document::ScoredDocument;
use crate::error::Result;

/// Default cap on the length bonus.
pub const DEFAULT_MAX_BONUS: f32 = 0.1;

/// Default content length (in characters) at which the bonus saturates.
pub const DEFAULT_SATURATION_CHARS: usize = 10_000;

/// A reranker that re-scores and reorders retrieved documents.
///
/// Implementations must return the same documents they were given,
/// possibly with updated `score` values and in a new order.
#[async_trait]
pub trait Reranker: Send + Sync {
    /// Rerank retrieved documents given the original query.
    async fn rerank(
        &self,
        query: &str,
        results: Vec<ScoredDocument>,
    ) -> Result<Vec<ScoredDocument>>;
}

/// A no-op reranker that returns results unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpReranker;

#[async_trait]
impl Reranker for NoOpReranker {
    async fn rerank(
        &self,
        _query: &str,
        results: Vec<ScoredDocument>,
    ) -> Result<Vec<ScoredDocument>> {
        Ok(results)
    }
}

/// Bonus for a passage of the given content, using the default cap and
/// saturation length: `min(0.1, chars / 10000 * 0.1)`.
pub fn length_bonus(content: &str) -> f32 {
    LengthBonusReranker::default().bonus(content)
}

/// Weakly prefers longer passages.
///
/// Each document's `score` becomes `retrieval_score + bonus`, where the bonus
/// grows linearly with the content's character count and is capped at
/// `max_bonus` once the content reaches `saturation_chars`. Documents are then
/// stable-sorted by descending score, so equal scores keep their retrieval
/// order. A NaN retrieval score sorts last.
///
/// The bonus is always computed from the untouched `retrieval_score`, so
/// reranking already reranked output leaves it unchanged.
///
/// # Example
///
/// ```rust,ignore
/// use aura_rag::{LengthBonusReranker, Reranker};
///
/// let reranker = LengthBonusReranker::default();
/// let ranked = reranker.rerank("query", retrieved).await?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthBonusReranker {
    max_bonus: f32,
    saturation_chars: usize,
}

impl Default for LengthBonusReranker {
    fn default() -> Self {
        Self { max_bonus: DEFAULT_MAX_BONUS, saturation_chars: DEFAULT_SATURATION_CHARS }
    }
}

impl LengthBonusReranker {
    /// Create a reranker with a custom cap and saturation length.
    ///
    /// A `saturation_chars` of zero awards the full bonus to every passage.
    pub fn new(max_bonus: f32, saturation_chars: usize) -> Self {
        Self { max_bonus, saturation_chars }
    }

    /// The bonus awarded to `content`.
    pub fn bonus(&self, content: &str) -> f32 {
        if self.saturation_chars == 0 {
            return self.max_bonus;
        }
        let chars = content.chars().count() as f32;
        (chars / self.saturation_chars as f32 * self.max_bonus).min(self.max_bonus)
    }

    /// Apply the bonus and sort. This is the synchronous core of [`Reranker::rerank`].
    pub fn apply(&self, mut results: Vec<ScoredDocument>) -> Vec<ScoredDocument> {
        for result in &mut results {
            result.score = result.retrieval_score + self.bonus(result.content());
        }
        results.sort_by(|a, b| rank_key(b.score).total_cmp(&rank_key(a.score)));
        results
    }
}

/// Sort key for descending order: NaN ranks below every real score and
/// `-0.0` ties with `0.0`.
fn rank_key(score: f32) -> f32 {
    if score.is_nan() { f32::NEG_INFINITY } else { score + 0.0 }
}

#[async_trait]
impl Reranker for LengthBonusReranker {
    async fn rerank(
        &self,
        _query: &str,
        results: Vec<ScoredDocument>,
    ) -> Result<Vec<ScoredDocument>> {
        Ok(self.apply(results))
    }
}
