use crate::config::{SourceKind, SourceSettings};
use crate::models::PostingRecord;
use crate::services::supabase::{SupabaseClient, SupabaseError};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while loading candidate postings
#[derive(Debug, Error)]
pub enum CandidateSourceError {
    #[error("Supabase error: {0}")]
    Supabase(#[from] SupabaseError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid postings file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Candidate source timed out after {0:?}")]
    Timeout(Duration),

    #[error("Candidate source not configured: {0}")]
    NotConfigured(String),
}

/// Postings stored as a JSON array on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file and keep the active postings
    pub async fn fetch_active_postings(&self) -> Result<Vec<PostingRecord>, CandidateSourceError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| CandidateSourceError::Io {
                path: self.path.clone(),
                source,
            })?;

        let postings: Vec<PostingRecord> = serde_json::from_slice(&bytes)?;

        Ok(postings.into_iter().filter(|p| p.active).collect())
    }
}

/// Supplier of raw candidate postings for the ranker
pub enum CandidateSource {
    Supabase(SupabaseClient),
    File(FileSource),
}

impl CandidateSource {
    pub fn from_settings(settings: &SourceSettings) -> Result<Self, CandidateSourceError> {
        match settings.kind {
            SourceKind::Supabase => {
                if settings.supabase_url.is_empty() || settings.supabase_key.is_empty() {
                    return Err(CandidateSourceError::NotConfigured(
                        "supabase source requires SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY".to_string(),
                    ));
                }

                let client = SupabaseClient::new(
                    settings.supabase_url.clone(),
                    settings.supabase_key.clone(),
                    settings.table.clone(),
                )?;
                Ok(CandidateSource::Supabase(client))
            }
            SourceKind::File => Ok(CandidateSource::File(FileSource::new(settings.file_path.clone()))),
        }
    }

    /// Fetch all active postings
    pub async fn fetch_active_postings(&self) -> Result<Vec<PostingRecord>, CandidateSourceError> {
        match self {
            CandidateSource::Supabase(client) => Ok(client.fetch_active_postings().await?),
            CandidateSource::File(file) => file.fetch_active_postings().await,
        }
    }

    /// Fetch active postings, giving up after `timeout`
    pub async fn fetch_with_timeout(
        &self,
        timeout: Duration,
    ) -> Result<Vec<PostingRecord>, CandidateSourceError> {
        tokio::time::timeout(timeout, self.fetch_active_postings())
            .await
            .map_err(|_| CandidateSourceError::Timeout(timeout))?
    }

    pub fn describe(&self) -> String {
        match self {
            CandidateSource::Supabase(client) => format!("supabase table {}", client.table()),
            CandidateSource::File(file) => format!("file {}", file.path().display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_postings(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_file_source_filters_inactive() {
        let path = write_postings(
            "intern_match_source_test.json",
            r#"[{"id": "1", "active": true}, {"id": "2", "active": false}, {"id": "3"}]"#,
        );

        let source = FileSource::new(&path);
        let postings = tokio_test::block_on(source.fetch_active_postings()).unwrap();
        let ids: Vec<&str> = postings.iter().map(|p| p.id.as_str()).collect();

        assert_eq!(ids, vec!["1", "3"]);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_file_source_missing_file() {
        let source = FileSource::new("/nonexistent/intern_match/postings.json");
        let result = tokio_test::block_on(source.fetch_active_postings());

        assert!(matches!(result, Err(CandidateSourceError::Io { .. })));
    }

    #[test]
    fn test_file_source_invalid_json() {
        let path = write_postings("intern_match_invalid_test.json", "{not json");

        let source = FileSource::new(&path);
        let result = tokio_test::block_on(source.fetch_active_postings());

        assert!(matches!(result, Err(CandidateSourceError::Json(_))));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_supabase_requires_credentials() {
        let settings = SourceSettings {
            kind: SourceKind::Supabase,
            ..SourceSettings::default()
        };

        assert!(matches!(
            CandidateSource::from_settings(&settings),
            Err(CandidateSourceError::NotConfigured(_))
        ));
    }

    #[test]
    fn test_describe_file_source() {
        let settings = SourceSettings::default();
        let source = CandidateSource::from_settings(&settings).unwrap();

        assert_eq!(source.describe(), "file data/internships.json");
    }
}
