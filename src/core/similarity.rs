use crate::core::encoder::{FeatureEncoder, FeatureVector};
use crate::core::error::MatchError;
use crate::core::vocabulary::Vocabulary;
use crate::models::{PostingRecord, UserProfile};

/// Cosine similarity of two feature vectors
///
/// Returns a value in [0, 1] for vectors with non-negative coordinates.
/// A zero-norm vector has no measurable overlap with anything, so the result
/// is 0 rather than an error.
///
/// # Errors
/// `MatchError::DimensionMismatch` when the vectors differ in length.
pub fn cosine_similarity(a: &FeatureVector, b: &FeatureVector) -> Result<f64, MatchError> {
    if a.len() != b.len() {
        return Err(MatchError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let norm_a = a.norm();
    let norm_b = b.norm();
    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    let dot: f64 = a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(x, y)| x * y)
        .sum();

    Ok((dot / (norm_a * norm_b)).clamp(0.0, 1.0))
}

/// Convert a similarity into an integer percentage in [0, 100]
#[inline]
pub fn similarity_to_score(similarity: f64) -> u8 {
    (similarity * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Score a posting for a profile (0-100)
pub fn match_score(
    vocabulary: &Vocabulary,
    profile: &UserProfile,
    posting: &PostingRecord,
) -> Result<u8, MatchError> {
    let encoder = FeatureEncoder::new(vocabulary);
    let similarity = cosine_similarity(
        &encoder.encode_profile(profile),
        &encoder.encode_posting(posting),
    )?;

    Ok(similarity_to_score(similarity))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(values: &[f64]) -> FeatureVector {
        FeatureVector::new(values.to_vec())
    }

    #[test]
    fn test_self_similarity_is_one() {
        let v = vector(&[1.0, 0.0, 1.0, 1.0]);
        let sim = cosine_similarity(&v, &v).unwrap();
        assert!((sim - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_symmetry() {
        let a = vector(&[1.0, 1.0, 0.0, 0.0]);
        let b = vector(&[1.0, 0.0, 1.0, 1.0]);

        assert_eq!(
            cosine_similarity(&a, &b).unwrap(),
            cosine_similarity(&b, &a).unwrap()
        );
    }

    #[test]
    fn test_orthogonal_vectors() {
        let a = vector(&[1.0, 0.0]);
        let b = vector(&[0.0, 1.0]);
        assert_eq!(cosine_similarity(&a, &b).unwrap(), 0.0);
    }

    #[test]
    fn test_zero_vector_scores_zero() {
        let zero = FeatureVector::zeros(3);
        let v = vector(&[1.0, 1.0, 1.0]);
        assert_eq!(cosine_similarity(&zero, &v).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero).unwrap(), 0.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = vector(&[1.0, 0.0, 1.0]);
        let b = vector(&[1.0, 0.0]);

        assert_eq!(
            cosine_similarity(&a, &b),
            Err(MatchError::DimensionMismatch { left: 3, right: 2 })
        );
    }

    #[test]
    fn test_known_value() {
        // 1 shared of 2 and 4 active dims: 1 / (sqrt(2) * 2)
        let a = vector(&[1.0, 1.0, 0.0, 0.0, 0.0]);
        let b = vector(&[1.0, 0.0, 1.0, 1.0, 1.0]);
        let sim = cosine_similarity(&a, &b).unwrap();
        assert!((sim - 0.353_553).abs() < 1e-6);
        assert_eq!(similarity_to_score(sim), 35);
    }

    #[test]
    fn test_score_rounding_and_bounds() {
        assert_eq!(similarity_to_score(0.0), 0);
        assert_eq!(similarity_to_score(0.005), 1);
        assert_eq!(similarity_to_score(0.994), 99);
        assert_eq!(similarity_to_score(1.0), 100);
        assert_eq!(similarity_to_score(1.2), 100);
    }
}
