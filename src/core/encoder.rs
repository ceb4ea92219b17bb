use crate::core::vocabulary::{Category, Vocabulary};
use crate::models::{PostingRecord, UserProfile};

/// Numeric encoding of a profile or posting over a vocabulary
///
/// One coordinate per vocabulary dimension, each in [0, 1]. The layout is
/// education, skills, sectors, locations.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn zeros(len: usize) -> Self {
        Self(vec![0.0; len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        self.0.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    /// True when no dimension matched anything
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|x| *x == 0.0)
    }

    fn set(&mut self, index: usize) {
        self.0[index] = 1.0;
    }
}

/// Bidirectional, case-insensitive substring match
///
/// `term` must already be lowercase. Blank values match nothing, since the
/// empty string is a substring of every term.
#[inline]
pub fn partial_match(term: &str, value: &str) -> bool {
    let value = value.trim().to_lowercase();
    if value.is_empty() || term.is_empty() {
        return false;
    }
    value.contains(term) || term.contains(value.as_str())
}

#[inline]
fn is_remote(location: &str) -> bool {
    location.trim().eq_ignore_ascii_case("remote")
}

/// Maps profiles and postings onto the dimensions of one vocabulary
///
/// Both encodings borrow the same vocabulary, so their vectors always have
/// the same length and are directly comparable.
#[derive(Debug, Clone, Copy)]
pub struct FeatureEncoder<'a> {
    vocabulary: &'a Vocabulary,
}

impl<'a> FeatureEncoder<'a> {
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Encode a user profile
    pub fn encode_profile(&self, profile: &UserProfile) -> FeatureVector {
        let vocab = self.vocabulary;
        let mut vector = FeatureVector::zeros(vocab.dimension());

        // Education: exact level, case-insensitive
        let education = profile.education.trim();
        self.fill(&mut vector, Category::Education, |level| {
            level.eq_ignore_ascii_case(education)
        });

        self.fill(&mut vector, Category::Skills, |skill| {
            profile.skills.iter().any(|s| partial_match(skill, s))
        });

        self.fill(&mut vector, Category::Sectors, |sector| {
            profile.sectors.iter().any(|s| partial_match(sector, s))
        });

        // A remote candidate is willing to work from any listed location
        let remote = is_remote(&profile.location);
        self.fill(&mut vector, Category::Locations, |location| {
            remote || partial_match(location, &profile.location)
        });

        vector
    }

    /// Encode a posting record
    ///
    /// Education levels are inferred from the posting's text, which is a
    /// heuristic and may over-report (e.g. "undergraduate" also contains
    /// "graduate").
    pub fn encode_posting(&self, posting: &PostingRecord) -> FeatureVector {
        let vocab = self.vocabulary;
        let mut vector = FeatureVector::zeros(vocab.dimension());
        let text = posting.combined_text();

        self.fill(&mut vector, Category::Education, |level| text.contains(level));

        self.fill(&mut vector, Category::Skills, |skill| {
            posting.requirements.iter().any(|r| partial_match(skill, r)) || text.contains(skill)
        });

        self.fill(&mut vector, Category::Sectors, |sector| {
            partial_match(sector, &posting.sector)
        });

        let remote = is_remote(&posting.location);
        self.fill(&mut vector, Category::Locations, |location| {
            remote || partial_match(location, &posting.location)
        });

        vector
    }

    fn fill<F>(&self, vector: &mut FeatureVector, category: Category, mut matches: F)
    where
        F: FnMut(&str) -> bool,
    {
        let start = self.vocabulary.block_range(category).start;
        for (offset, term) in self.vocabulary.terms(category).iter().enumerate() {
            if matches(term.as_str()) {
                vector.set(start + offset);
            }
        }
    }
}

/// Encode a profile against a vocabulary
pub fn encode_profile(vocabulary: &Vocabulary, profile: &UserProfile) -> FeatureVector {
    FeatureEncoder::new(vocabulary).encode_profile(profile)
}

/// Encode a posting against a vocabulary
pub fn encode_posting(vocabulary: &Vocabulary, posting: &PostingRecord) -> FeatureVector {
    FeatureEncoder::new(vocabulary).encode_posting(posting)
}
