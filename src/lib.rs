//! Intern Match - internship recommendation engine
//!
//! This library encodes user profiles and internship postings as feature
//! vectors over a shared vocabulary and ranks postings by cosine similarity.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Ranker, RankResult, MatchError, Vocabulary, FeatureEncoder, FeatureVector, cosine_similarity, match_score, validate_profile};
pub use crate::models::{UserProfile, PostingRecord, RankedMatch, RecommendRequest, RecommendResponse};
