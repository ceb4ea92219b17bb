use std::fmt;
use std::sync::Arc;

use crate::core::{
    encoder::{FeatureEncoder, FeatureVector},
    error::MatchError,
    reasons::{overlaps, template_reason, ReasonDecorator},
    similarity::{cosine_similarity, similarity_to_score},
    vocabulary::Vocabulary,
};
use crate::models::{PostingRecord, RankedMatch, UserProfile};

/// Result of ranking candidates for one profile
#[derive(Debug)]
pub struct RankResult {
    pub matches: Vec<RankedMatch>,
    pub total_candidates: usize,
    pub active_candidates: usize,
}

/// Recommendation orchestrator
///
/// # Pipeline Stages
/// 1. Drop inactive postings
/// 2. Encode and score every remaining posting against the profile
/// 3. Stable sort by score, descending
/// 4. Truncate to `top_k`
/// 5. Attach reasons (template, then the optional decorator)
///
/// Holds no per-request state. Cloning is cheap and a single ranker can be
/// shared across threads.
#[derive(Clone)]
pub struct Ranker {
    vocabulary: Arc<Vocabulary>,
    decorator: Option<Arc<dyn ReasonDecorator>>,
}

impl Ranker {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self {
            vocabulary,
            decorator: None,
        }
    }

    pub fn with_standard_vocabulary() -> Self {
        Self::new(Arc::new(Vocabulary::standard()))
    }

    /// Attach a reason decorator that may rewrite explanations
    pub fn with_decorator(mut self, decorator: Arc<dyn ReasonDecorator>) -> Self {
        self.decorator = Some(decorator);
        self
    }

    /// Rank candidate postings for a profile
    ///
    /// # Arguments
    /// * `profile` - The user's declared profile
    /// * `candidates` - Postings supplied by the storage collaborator
    /// * `top_k` - Maximum number of matches to return
    ///
    /// # Returns
    /// RankResult with at most `top_k` active postings, highest score first.
    /// Postings with equal scores keep their input order. No active
    /// candidates yields an empty list, not an error.
    pub fn rank(
        &self,
        profile: &UserProfile,
        candidates: Vec<PostingRecord>,
        top_k: usize,
    ) -> Result<RankResult, MatchError> {
        let total_candidates = candidates.len();
        let encoder = FeatureEncoder::new(&self.vocabulary);
        let profile_vector = encoder.encode_profile(profile);

        let mut scored: Vec<(PostingRecord, FeatureVector, u8)> = candidates
            .into_iter()
            // Stage 1: only active postings are eligible
            .filter(|posting| posting.active)
            // Stage 2: score
            .map(|posting| -> Result<(PostingRecord, FeatureVector, u8), MatchError> {
                let vector = encoder.encode_posting(&posting);
                let similarity = cosine_similarity(&profile_vector, &vector)?;
                Ok((posting, vector, similarity_to_score(similarity)))
            })
            .collect::<Result<_, _>>()?;

        let active_candidates = scored.len();

        // Stage 3: sort_by is stable, ties keep input order
        scored.sort_by(|a, b| b.2.cmp(&a.2));

        // Stage 4
        scored.truncate(top_k);

        // Stage 5
        let mut matches: Vec<RankedMatch> = scored
            .into_iter()
            .map(|(posting, vector, score)| {
                let found = overlaps(&self.vocabulary, &profile_vector, &vector);
                RankedMatch {
                    posting,
                    match_score: score,
                    reason: Some(template_reason(score, &found)),
                }
            })
            .collect();

        if let Some(decorator) = &self.decorator {
            let mut enriched = decorator.decorate(profile, &matches);
            for m in &mut matches {
                if let Some(reason) = enriched.remove(&m.posting.id) {
                    m.reason = Some(reason);
                }
            }
        }

        tracing::debug!(
            "Ranked {} of {} active candidates ({} total)",
            matches.len(),
            active_candidates,
            total_candidates
        );

        Ok(RankResult {
            matches,
            total_candidates,
            active_candidates,
        })
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::with_standard_vocabulary()
    }
}

impl fmt::Debug for Ranker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ranker")
            .field("dimension", &self.vocabulary.dimension())
            .field("decorated", &self.decorator.is_some())
            .finish()
    }
}
