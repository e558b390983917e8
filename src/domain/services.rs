use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::model::{GuestRecord, RsvpStatus, RsvpSubmission, SubmitReceipt};
use crate::domain::ports::{GuestStore, ResponseStore};
use crate::utils::error::{Result, RsvpError};

/// Request-level RSVP operations over the two stores.
#[derive(Clone)]
pub struct RsvpService {
    guests: Arc<dyn GuestStore>,
    responses: Arc<dyn ResponseStore>,
}

impl RsvpService {
    pub fn new(guests: Arc<dyn GuestStore>, responses: Arc<dyn ResponseStore>) -> Self {
        Self { guests, responses }
    }

    /// Workbook-backed service where one store serves both sheets.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: GuestStore + ResponseStore + 'static,
    {
        Self {
            guests: store.clone(),
            responses: store,
        }
    }

    pub async fn get_guest(&self, guest_id: Option<&str>) -> Result<GuestRecord> {
        let guest_id = guest_id
            .filter(|id| !id.is_empty())
            .ok_or(RsvpError::MissingGuestId)?;

        tracing::debug!("Looking up guest {}", guest_id);
        match self.guests.find_guest(guest_id).await? {
            Some(guest) => {
                tracing::info!("👋 Guest {} opened the invitation", guest_id);
                Ok(guest)
            }
            None => {
                tracing::warn!("Guest {} not found", guest_id);
                Err(RsvpError::GuestNotFound {
                    guest_id: guest_id.to_string(),
                })
            }
        }
    }

    pub async fn submit(&self, submission: &RsvpSubmission) -> Result<SubmitReceipt> {
        self.submit_at(submission, Utc::now()).await
    }

    /// Writes the guest row, the partner row when the guest comes with a
    /// partner, and marks the guest as responded. All rows share `timestamp`.
    pub async fn submit_at(
        &self,
        submission: &RsvpSubmission,
        timestamp: DateTime<Utc>,
    ) -> Result<SubmitReceipt> {
        let primary_row = submission.primary_row(timestamp);
        let primary = self.responses.upsert_response(&primary_row).await?;
        tracing::info!(
            "📝 Saved response for '{}' ({}): {:?}",
            primary_row.name,
            primary_row.attendance,
            primary
        );

        let partner = match submission.partner_row(timestamp) {
            Some(row) => {
                let outcome = self.responses.upsert_response(&row).await?;
                tracing::info!("📝 Saved partner response for '{}': {:?}", row.name, outcome);
                Some(outcome)
            }
            None => None,
        };

        let status_updated = match submission.guest_id() {
            Some(guest_id) => {
                let updated = self
                    .guests
                    .update_rsvp_status(guest_id, RsvpStatus::Responded)
                    .await?;
                if !updated {
                    tracing::debug!("No guest row to mark as responded for {}", guest_id);
                }
                updated
            }
            None => false,
        };

        Ok(SubmitReceipt {
            primary,
            partner,
            status_updated,
        })
    }
}
