use reqwest::Client;
use std::time::Duration;

use crate::adapters::http::ApiResponse;
use crate::domain::model::{GuestRecord, RsvpSubmission};
use crate::utils::error::{Result, RsvpError};
use crate::utils::validation::validate_url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client for the RSVP endpoint.
#[derive(Debug, Clone)]
pub struct RsvpClient {
    endpoint: String,
    client: Client,
}

impl RsvpClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        validate_url("endpoint", &endpoint)?;

        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetches a guest record. Unknown guests come back as `None`, the same
    /// way the invitation page simply stays generic for them.
    pub async fn fetch_guest(&self, guest_id: &str) -> Result<Option<GuestRecord>> {
        tracing::debug!("Making API request to: {}", self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("guest", guest_id)])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let body: ApiResponse = response.json().await?;
        match body {
            ApiResponse {
                success: true,
                guest: Some(guest),
                ..
            } => Ok(Some(guest)),
            ApiResponse { error, .. } => {
                tracing::warn!(
                    "No guest data for '{}': {}",
                    guest_id,
                    error.as_deref().unwrap_or("empty response")
                );
                Ok(None)
            }
        }
    }

    pub async fn submit(&self, submission: &RsvpSubmission) -> Result<()> {
        tracing::debug!("Posting RSVP to: {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        let body: ApiResponse = response.json().await?;
        if body.success {
            Ok(())
        } else {
            Err(RsvpError::RemoteError {
                message: body.error.unwrap_or_else(|| status.to_string()),
            })
        }
    }
}
