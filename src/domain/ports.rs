use crate::domain::model::{GuestRecord, ResponseRow, RsvpStatus, UpsertOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Raw file access for the workbook. Paths are relative to the storage root.
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = Result<bool>> + Send;
}

pub trait StoreConfigProvider: Send + Sync {
    fn data_dir(&self) -> &str;
    fn guests_sheet(&self) -> &str;
    fn responses_sheet(&self) -> &str;
}

#[async_trait]
pub trait GuestStore: Send + Sync {
    async fn find_guest(&self, guest_id: &str) -> Result<Option<GuestRecord>>;

    /// Returns `false` when there was nothing to update (no sheet, no
    /// status column or no such guest).
    async fn update_rsvp_status(&self, guest_id: &str, status: RsvpStatus) -> Result<bool>;
}

#[async_trait]
pub trait ResponseStore: Send + Sync {
    /// Overwrites the row with the same non-empty guest id, appends otherwise.
    async fn upsert_response(&self, row: &ResponseRow) -> Result<UpsertOutcome>;
}
