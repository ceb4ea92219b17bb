use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::core::vocabulary::EDUCATION_LEVELS;

/// Profile a user submits for a single recommendation request
///
/// Every field defaults to empty on deserialization. An empty profile is a
/// valid input to the ranker; the request-level rules below are enforced by
/// the calling boundary through `validate_profile`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct UserProfile {
    #[serde(default)]
    #[validate(custom(function = "validate_education"))]
    pub education: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "at least one skill is required"),
        custom(function = "validate_terms")
    )]
    pub skills: Vec<String>,
    #[serde(default)]
    #[validate(
        length(min = 1, max = 3, message = "between one and three sectors are required"),
        custom(function = "validate_terms")
    )]
    pub sectors: Vec<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_location"))]
    pub location: String,
}

fn validate_education(education: &str) -> Result<(), ValidationError> {
    let education = education.trim();
    if EDUCATION_LEVELS
        .iter()
        .any(|level| level.eq_ignore_ascii_case(education))
    {
        Ok(())
    } else {
        let mut err = ValidationError::new("education");
        err.message = Some(format!("education must be one of: {}", EDUCATION_LEVELS.join(", ")).into());
        Err(err)
    }
}

// Blank entries encode to nothing, so they do not count towards the minimum
fn validate_terms(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().any(|v| v.trim().is_empty()) {
        let mut err = ValidationError::new("blank");
        err.message = Some("entries must not be blank".into());
        return Err(err);
    }
    Ok(())
}

fn validate_location(location: &str) -> Result<(), ValidationError> {
    if location.trim().is_empty() {
        let mut err = ValidationError::new("location");
        err.message = Some("location is required".into());
        return Err(err);
    }
    Ok(())
}

/// Internship posting as stored by the listings collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostingRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub stipend: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub sector: String,
    #[serde(rename = "applicantCount", alias = "applicants", alias = "applicant_count", default)]
    pub applicant_count: u32,
    #[serde(alias = "is_active", alias = "isActive", default = "default_true")]
    pub active: bool,
    #[serde(rename = "createdAt", alias = "created_at", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl PostingRecord {
    /// Title, description and requirements joined into one lowercase string
    pub fn combined_text(&self) -> String {
        format!(
            "{} {} {}",
            self.title,
            self.description,
            self.requirements.join(" ")
        )
        .to_lowercase()
    }
}

fn default_true() -> bool { true }

/// A posting paired with its score for one recommendation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    #[serde(flatten)]
    pub posting: PostingRecord,
    #[serde(rename = "matchScore")]
    pub match_score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posting_accepts_storage_aliases() {
        let json = r#"{
            "id": "p1",
            "title": "Data Intern",
            "location": "Mumbai",
            "requirements": ["SQL"],
            "sector": "Finance",
            "applicants": 120,
            "is_active": false
        }"#;

        let posting: PostingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(posting.applicant_count, 120);
        assert!(!posting.active);
        assert!(posting.created_at.is_none());
    }

    #[test]
    fn test_posting_active_by_default() {
        let posting: PostingRecord = serde_json::from_str(r#"{"id": "p2"}"#).unwrap();
        assert!(posting.active);
        assert!(posting.requirements.is_empty());
    }

    #[test]
    fn test_combined_text_lowercased() {
        let posting: PostingRecord = serde_json::from_str(
            r#"{"id": "p3", "title": "ML Intern", "description": "Graduate role", "requirements": ["Python", "SQL"]}"#,
        )
        .unwrap();
        assert_eq!(posting.combined_text(), "ml intern graduate role python sql");
    }

    #[test]
    fn test_ranked_match_flattens_posting() {
        let posting: PostingRecord = serde_json::from_str(r#"{"id": "p4", "title": "Intern"}"#).unwrap();
        let ranked = RankedMatch {
            posting,
            match_score: 42,
            reason: None,
        };

        let value = serde_json::to_value(&ranked).unwrap();
        assert_eq!(value["id"], "p4");
        assert_eq!(value["matchScore"], 42);
        assert!(value.get("reason").is_none());
    }

    #[test]
    fn test_profile_validation() {
        let profile = UserProfile {
            education: "Graduate".to_string(),
            skills: vec!["Python".to_string()],
            sectors: vec!["Technology".to_string()],
            location: "Remote".to_string(),
        };
        assert!(profile.validate().is_ok());

        let too_many_sectors = UserProfile {
            sectors: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            ..profile.clone()
        };
        assert!(too_many_sectors.validate().is_err());

        let unknown_level = UserProfile {
            education: "kindergarten".to_string(),
            ..profile
        };
        assert!(unknown_level.validate().is_err());
    }
}
