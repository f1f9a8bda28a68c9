use crate::models::{Slot, TherapistProfile, TherapyType};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the therapist directory
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Therapist directory API client
///
/// Handles all communication with the practice directory backend including:
/// - Listing active accredited therapists for a therapy type
/// - Fetching a single therapist profile
/// - Fetching calendar slots for the scheduler
pub struct DirectoryClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl DirectoryClient {
    /// Create a new directory client
    pub fn new(base_url: String, api_key: String) -> Result<Self, DirectoryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    /// List active therapists accredited for the given therapy type
    pub async fn list_therapists(
        &self,
        therapy_type: TherapyType,
    ) -> Result<Vec<TherapistProfile>, DirectoryError> {
        let filters = serde_json::to_string(&vec![
            "equal(\"isActive\", true)".to_string(),
            format!("contains(\"therapyTypes\", \"{}\")", therapy_type.as_str()),
        ])
        .unwrap_or_default();
        let encoded = urlencoding::encode(&filters);

        let url = format!(
            "{}/therapists?query={}",
            self.base_url.trim_end_matches('/'),
            encoded
        );

        tracing::debug!("Fetching therapists from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DirectoryError::ApiError(format!(
                "Failed to list therapists: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| DirectoryError::InvalidResponse("Missing documents array".into()))?;

        let therapists: Vec<TherapistProfile> = documents
            .iter()
            .filter_map(|doc| serde_json::from_value(doc.clone()).ok())
            .filter(|t: &TherapistProfile| t.supports(therapy_type))
            .collect();

        tracing::debug!(
            "Queried {} therapists for {}",
            therapists.len(),
            therapy_type.as_str()
        );

        Ok(therapists)
    }

    /// Get a single therapist profile by ID
    pub async fn get_therapist(&self, therapist_id: &str) -> Result<TherapistProfile, DirectoryError> {
        let url = format!(
            "{}/therapists/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(therapist_id)
        );

        tracing::debug!("Fetching therapist: {}", therapist_id);

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DirectoryError::NotFound(format!(
                "Therapist not found: {}",
                therapist_id
            )));
        }

        if !response.status().is_success() {
            return Err(DirectoryError::ApiError(format!(
                "Failed to fetch therapist: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        serde_json::from_value(json)
            .map_err(|e| DirectoryError::InvalidResponse(format!("Failed to parse therapist: {}", e)))
    }

    /// Fetch published calendar slots for all active therapists
    pub async fn fetch_calendar_slots(&self) -> Result<Vec<Slot>, DirectoryError> {
        let url = format!("{}/calendar/slots", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DirectoryError::ApiError(format!(
                "Failed to fetch calendar slots: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| DirectoryError::InvalidResponse("Missing documents array".into()))?;

        let slots: Vec<Slot> = documents
            .iter()
            .filter_map(|doc| serde_json::from_value(doc.clone()).ok())
            .collect();

        tracing::debug!("Fetched {} calendar slots", slots.len());
        Ok(slots)
    }
}
