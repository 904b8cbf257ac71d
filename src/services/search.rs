use crate::core::matching;
use crate::models::{GradeEligibility, MajorEligibility, Posting, ProfileRecord, StudentProfile};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the search cluster
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Search index client
///
/// Handles all communication with the search cluster including:
/// - Matching open postings to a student profile
/// - Matching active students to a posting
/// - Keyword scans over posting text fields
pub struct SearchClient {
    endpoint: String,
    username: String,
    password: String,
    posting_index: String,
    profile_index: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    #[serde(default)]
    hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_source")]
    source: Value,
}

fn parse_posting(hit: SearchHit) -> Option<Posting> {
    match serde_json::from_value(hit.source) {
        Ok(posting) => Some(posting),
        Err(e) => {
            tracing::debug!("Dropping malformed posting document {}: {}", hit.id, e);
            None
        }
    }
}

impl SearchClient {
    /// Create a new search index client
    pub fn new(
        endpoint: String,
        username: String,
        password: String,
        posting_index: String,
        profile_index: String,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint,
            username,
            password,
            posting_index,
            profile_index,
            client,
        }
    }

    async fn search(&self, index: &str, query: &Value) -> Result<Vec<SearchHit>, SearchError> {
        let url = format!("{}/{}/_search", self.endpoint.trim_end_matches('/'), index);

        tracing::debug!("Searching {} with query: {}", index, query);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.username, Some(&self.password))
            .json(query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SearchError::ApiError(format!(
                "Search on {} failed: {}",
                index,
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let parsed: SearchResponse = serde_json::from_value(json)
            .map_err(|e| SearchError::InvalidResponse(format!("Malformed search envelope: {}", e)))?;

        Ok(parsed.hits.hits)
    }

    /// Find open postings whose major and grade rules fit one student
    pub async fn find_postings_for_profile(
        &self,
        profile: &StudentProfile,
    ) -> Result<Vec<Posting>, SearchError> {
        let query =
            matching::postings_for_profile(&profile.majors, profile.grade, matching::today_kst());
        let hits = self.search(&self.posting_index, &query).await?;

        Ok(hits.into_iter().filter_map(parse_posting).collect())
    }

    /// Find active students eligible under one posting's major and grade rules
    pub async fn find_profiles_for_posting(
        &self,
        majors: &MajorEligibility,
        grades: &GradeEligibility,
    ) -> Result<Vec<StudentProfile>, SearchError> {
        let query = matching::profiles_for_posting(majors, grades);
        let hits = self.search(&self.profile_index, &query).await?;

        let profiles = hits
            .into_iter()
            .filter_map(|hit| {
                let record: ProfileRecord = match serde_json::from_value(hit.source) {
                    Ok(record) => record,
                    Err(e) => {
                        tracing::debug!("Dropping malformed profile document {}: {}", hit.id, e);
                        return None;
                    }
                };
                match StudentProfile::try_from(record) {
                    Ok(profile) => Some(profile),
                    Err(e) => {
                        tracing::info!("Skipping incomplete profile {}: {}", hit.id, e);
                        None
                    }
                }
            })
            .collect();

        Ok(profiles)
    }

    /// Keyword scan over posting text fields, deduplicated by document id
    pub async fn find_postings_by_tags(
        &self,
        tags: &[String],
    ) -> Result<Vec<Posting>, SearchError> {
        let query = matching::postings_by_keywords(tags, matching::today_kst());
        let hits = self.search(&self.posting_index, &query).await?;

        let keyed: Vec<(String, SearchHit)> = hits
            .into_iter()
            .map(|hit| (hit.id.clone(), hit))
            .collect();

        Ok(matching::dedup_by_id(keyed)
            .into_iter()
            .filter_map(parse_posting)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_client_creation() {
        let client = SearchClient::new(
            "https://search.test:9200".to_string(),
            "admin".to_string(),
            "admin".to_string(),
            "postings-dev".to_string(),
            "students-dev".to_string(),
        );

        assert_eq!(client.endpoint, "https://search.test:9200");
        assert_eq!(client.posting_index, "postings-dev");
        assert_eq!(client.profile_index, "students-dev");
    }

    #[test]
    fn test_parse_posting_drops_malformed() {
        let good = SearchHit {
            id: "p1".to_string(),
            source: serde_json::json!({
                "organizationName": "네오 로보틱스",
                "majors": ["무관"],
                "grades": [3, 4],
            }),
        };
        assert!(parse_posting(good).is_some());

        let bad = SearchHit {
            id: "p2".to_string(),
            source: serde_json::json!({ "majors": ["무관"] }),
        };
        assert!(parse_posting(bad).is_none());
    }
}
