use std::collections::HashMap;

use crate::core::encoder::FeatureVector;
use crate::core::vocabulary::{Category, Vocabulary};
use crate::models::{RankedMatch, UserProfile};

/// Vocabulary terms set in both the profile and the posting vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlap {
    pub category: Category,
    pub terms: Vec<String>,
}

/// Collect overlapping terms per category, skipping empty categories
pub fn overlaps(vocabulary: &Vocabulary, profile: &FeatureVector, posting: &FeatureVector) -> Vec<Overlap> {
    Category::ALL
        .iter()
        .filter_map(|&category| {
            let range = vocabulary.block_range(category);
            let terms: Vec<String> = vocabulary
                .terms(category)
                .iter()
                .zip(&profile.as_slice()[range.clone()])
                .zip(&posting.as_slice()[range])
                .filter(|((_, p), q)| **p > 0.0 && **q > 0.0)
                .map(|((term, _), _)| term.clone())
                .collect();

            if terms.is_empty() {
                None
            } else {
                Some(Overlap { category, terms })
            }
        })
        .collect()
}

/// Default explanation attached to every ranked match
pub fn template_reason(score: u8, overlaps: &[Overlap]) -> String {
    if overlaps.is_empty() {
        return format!("{}% match: no overlap with your education, skills, sectors or location", score);
    }

    let parts = overlaps
        .iter()
        .map(|o| format!("{} ({})", o.category.label(), o.terms.join(", ")))
        .collect::<Vec<_>>()
        .join("; ");

    format!("{}% match based on cosine similarity of your profile: {}", score, parts)
}

/// Optional collaborator that rewrites match explanations
///
/// Receives the ranked list after ordering and truncation and returns new
/// reasons keyed by posting id. Postings missing from the returned map keep
/// their template reason. A decorator can only change `reason`; scores and
/// ordering are fixed before it runs.
pub trait ReasonDecorator: Send + Sync {
    fn decorate(&self, profile: &UserProfile, matches: &[RankedMatch]) -> HashMap<String, String>;
}

impl<F> ReasonDecorator for F
where
    F: Fn(&UserProfile, &[RankedMatch]) -> HashMap<String, String> + Send + Sync,
{
    fn decorate(&self, profile: &UserProfile, matches: &[RankedMatch]) -> HashMap<String, String> {
        self(profile, matches)
    }
}
