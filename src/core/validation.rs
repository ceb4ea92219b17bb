use validator::Validate;

use crate::core::error::MatchError;
use crate::models::UserProfile;

/// Check a profile against the request-level business rules
///
/// Education must name a known level, at least one skill and one to three
/// sectors are required, and location must be present. Blank entries do
/// not count. The ranker itself
/// accepts any profile; callers run this first so a bad submission is
/// rejected before any computation.
pub fn validate_profile(profile: &UserProfile) -> Result<(), MatchError> {
    profile
        .validate()
        .map_err(|errors| MatchError::InvalidProfile(errors.to_string()))
}
