use crate::models::PostingRecord;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Supabase
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid service key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Supabase (PostgREST) client for the internship listings table
pub struct SupabaseClient {
    base_url: String,
    api_key: String,
    table: String,
    client: Client,
}

impl SupabaseClient {
    /// Create a new Supabase client
    pub fn new(base_url: String, api_key: String, table: String) -> Result<Self, SupabaseError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            table,
            client,
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Fetch every active posting
    ///
    /// Rows that do not deserialize into a `PostingRecord` are skipped with a
    /// warning rather than failing the whole batch.
    pub async fn fetch_active_postings(&self) -> Result<Vec<PostingRecord>, SupabaseError> {
        let url = format!(
            "{}/rest/v1/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&self.table)
        );

        tracing::debug!("Fetching active postings from: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("select", "*"), ("is_active", "eq.true")])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(SupabaseError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to fetch postings: {} - {}", status, body);
            return Err(SupabaseError::ApiError(format!(
                "Failed to fetch postings: {}",
                status
            )));
        }

        let json: Value = response.json().await?;

        let rows = json
            .as_array()
            .ok_or_else(|| SupabaseError::InvalidResponse("Expected an array of rows".into()))?;

        let postings: Vec<PostingRecord> = rows
            .iter()
            .filter_map(|row| match serde_json::from_value::<PostingRecord>(row.clone()) {
                Ok(posting) => Some(posting),
                Err(e) => {
                    tracing::warn!("Skipping malformed posting row: {}", e);
                    None
                }
            })
            .filter(|p| p.active)
            .collect();

        tracing::debug!("Fetched {} active postings (rows: {})", postings.len(), rows.len());

        Ok(postings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supabase_client_creation() {
        let client = SupabaseClient::new(
            "https://project.supabase.co".to_string(),
            "service_key".to_string(),
            "internship_listings".to_string(),
        )
        .unwrap();

        assert_eq!(client.table(), "internship_listings");
    }

    #[tokio::test]
    async fn test_fetch_active_postings() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/v1/internship_listings")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("select".into(), "*".into()),
                mockito::Matcher::UrlEncoded("is_active".into(), "eq.true".into()),
            ]))
            .match_header("apikey", "service_key")
            .match_header("authorization", "Bearer service_key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {"id": "1", "title": "Data Intern", "sector": "Technology", "location": "Bangalore", "requirements": ["SQL"], "applicants": 80, "is_active": true},
                    {"id": "2", "title": "Old Intern", "is_active": false},
                    {"title": "missing id"}
                ]"#,
            )
            .create_async()
            .await;

        let client = SupabaseClient::new(server.url(), "service_key".to_string(), "internship_listings".to_string()).unwrap();
        let postings = client.fetch_active_postings().await.unwrap();

        mock.assert_async().await;
        assert_eq!(postings.len(), 1);
        assert_eq!(postings[0].id, "1");
        assert_eq!(postings[0].applicant_count, 80);
    }

    #[tokio::test]
    async fn test_fetch_unauthorized() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/rest/v1/internship_listings")
            .match_query(mockito::Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let client = SupabaseClient::new(server.url(), "bad".to_string(), "internship_listings".to_string()).unwrap();
        let result = client.fetch_active_postings().await;

        assert!(matches!(result, Err(SupabaseError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_fetch_server_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/rest/v1/internship_listings")
            .match_query(mockito::Matcher::Any)
            .with_status(503)
            .with_body("unavailable")
            .create_async()
            .await;

        let client = SupabaseClient::new(server.url(), "key".to_string(), "internship_listings".to_string()).unwrap();
        let result = client.fetch_active_postings().await;

        assert!(matches!(result, Err(SupabaseError::ApiError(_))));
    }
}
