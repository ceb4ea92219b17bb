// Core algorithm exports
pub mod encoder;
pub mod error;
pub mod ranker;
pub mod reasons;
pub mod similarity;
pub mod validation;
pub mod vocabulary;

pub use encoder::{encode_posting, encode_profile, partial_match, FeatureEncoder, FeatureVector};
pub use error::MatchError;
pub use ranker::{RankResult, Ranker};
pub use reasons::{template_reason, Overlap, ReasonDecorator};
pub use similarity::{cosine_similarity, match_score, similarity_to_score};
pub use validation::validate_profile;
pub use vocabulary::{Category, Vocabulary};
