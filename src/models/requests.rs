use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::UserProfile;

/// Request for internship recommendations
///
/// Profile rules are checked separately by `validate_profile`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[serde(alias = "user_profile", rename = "userProfile")]
    pub user_profile: UserProfile,
    /// Falls back to `matching.default_limit` when absent
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_optional() {
        let req: RecommendRequest = serde_json::from_str(
            r#"{"userProfile": {"education": "graduate", "skills": ["sql"], "sectors": ["finance"], "location": "Remote"}}"#,
        )
        .unwrap();
        assert_eq!(req.limit, None);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_zero_limit_rejected() {
        let req: RecommendRequest = serde_json::from_str(
            r#"{"userProfile": {"education": "graduate", "skills": ["sql"], "sectors": ["finance"], "location": "Remote"}, "limit": 0}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }
}
