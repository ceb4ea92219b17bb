// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{UserProfile, PostingRecord, RankedMatch};
pub use requests::RecommendRequest;
pub use responses::{RecommendResponse, InternshipsResponse, HealthResponse, ErrorResponse};
