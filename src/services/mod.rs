// Service exports
pub mod cache;
pub mod source;
pub mod supabase;

pub use cache::{CandidateCache, CacheKey};
pub use source::{CandidateSource, CandidateSourceError, FileSource};
pub use supabase::{SupabaseClient, SupabaseError};
