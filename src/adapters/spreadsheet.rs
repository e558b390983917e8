use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::adapters::sheet::Sheet;
use crate::domain::model::{
    GuestGroup, GuestRecord, InvitationType, ResponseRow, RsvpStatus, UpsertOutcome,
    GUEST_HEADERS, GUEST_ID_HEADER,
};
use crate::domain::ports::{GuestStore, ResponseStore, Storage, StoreConfigProvider};
use crate::utils::error::Result;

pub const DEFAULT_GUESTS_SHEET: &str = "Guests";
pub const DEFAULT_RESPONSES_SHEET: &str = "Responses";

/// Guest and response stores backed by a workbook of CSV sheets
/// (`<sheet name>.csv` under the storage root).
pub struct SpreadsheetStore<S: Storage> {
    storage: S,
    guests_sheet: String,
    responses_sheet: String,
    // Serializes every read-modify-write of the workbook.
    lock: Mutex<()>,
}

impl<S: Storage> SpreadsheetStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_sheet_names(storage, DEFAULT_GUESTS_SHEET, DEFAULT_RESPONSES_SHEET)
    }

    pub fn with_sheet_names(
        storage: S,
        guests_sheet: impl Into<String>,
        responses_sheet: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            guests_sheet: guests_sheet.into(),
            responses_sheet: responses_sheet.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn from_config<C: StoreConfigProvider>(storage: S, config: &C) -> Self {
        Self::with_sheet_names(storage, config.guests_sheet(), config.responses_sheet())
    }

    fn sheet_file(name: &str) -> String {
        format!("{}.csv", name)
    }

    async fn load_sheet(&self, name: &str) -> Result<Option<Sheet>> {
        let file = Self::sheet_file(name);
        if !self.storage.exists(&file).await? {
            return Ok(None);
        }
        let data = self.storage.read_file(&file).await?;
        Sheet::parse(name, &data).map(Some)
    }

    async fn save_sheet(&self, sheet: &Sheet) -> Result<()> {
        let data = sheet.to_bytes()?;
        self.storage
            .write_file(&Self::sheet_file(sheet.name()), &data)
            .await
    }

    /// Writes a fresh Guests sheet. Used to seed a workbook.
    pub async fn write_guests(&self, guests: &[GuestRecord]) -> Result<()> {
        let _guard = self.lock.lock().await;

        let headers: Vec<String> = GUEST_HEADERS.iter().map(|h| h.to_string()).collect();
        let mut sheet = Sheet::new(self.guests_sheet.clone(), headers.clone());
        let columns = sheet.ensure_columns(&headers);
        for guest in guests {
            sheet.append_row(&columns, guest_cells(guest));
        }
        self.save_sheet(&sheet).await?;

        tracing::info!("Wrote {} guests to sheet '{}'", guests.len(), self.guests_sheet);
        Ok(())
    }

    /// The Responses sheet, or `None` before the first response is saved.
    pub async fn responses(&self) -> Result<Option<Sheet>> {
        let _guard = self.lock.lock().await;
        self.load_sheet(&self.responses_sheet).await
    }
}

fn guest_cells(guest: &GuestRecord) -> Vec<String> {
    vec![
        guest.guest_id.clone(),
        guest.name.clone(),
        guest.full_name.clone(),
        String::from(guest.invitation_type.clone()),
        guest.partner_name.clone(),
        guest.partner_full_name.clone(),
        String::from(guest.group.clone()),
        guest.custom_message.clone(),
        flag_cell(guest.show_accommodation),
        flag_cell(guest.show_alcohol),
        guest.rsvp_status.as_str().to_string(),
    ]
}

fn flag_cell(value: bool) -> String {
    let cell = if value { "TRUE" } else { "FALSE" };
    cell.to_string()
}

/// Only an explicit FALSE hides a section; empty cells keep it visible.
fn parse_flag(cell: &str) -> bool {
    !cell.trim().eq_ignore_ascii_case("false")
}

fn read_guest(sheet: &Sheet, row: usize) -> GuestRecord {
    let text = |header: &str| -> String {
        sheet
            .column(header)
            .map(|col| sheet.cell(row, col).to_string())
            .unwrap_or_default()
    };

    GuestRecord {
        guest_id: text("guest_id"),
        name: text("name"),
        full_name: text("full_name"),
        invitation_type: InvitationType::from(text("invitation_type")),
        partner_name: text("partner_name"),
        partner_full_name: text("partner_full_name"),
        group: GuestGroup::from(text("group")),
        custom_message: text("custom_message"),
        show_accommodation: parse_flag(&text("show_accommodation")),
        show_alcohol: parse_flag(&text("show_alcohol")),
        rsvp_status: RsvpStatus::from(text("rsvp_status")),
    }
}

#[async_trait]
impl<S: Storage> GuestStore for SpreadsheetStore<S> {
    async fn find_guest(&self, guest_id: &str) -> Result<Option<GuestRecord>> {
        let _guard = self.lock.lock().await;

        let Some(sheet) = self.load_sheet(&self.guests_sheet).await? else {
            tracing::warn!("Sheet '{}' does not exist", self.guests_sheet);
            return Ok(None);
        };
        let Some(id_col) = sheet.column("guest_id") else {
            tracing::warn!("Sheet '{}' has no guest_id column", self.guests_sheet);
            return Ok(None);
        };

        Ok(sheet
            .find_row(id_col, guest_id)
            .map(|row| read_guest(&sheet, row)))
    }

    async fn update_rsvp_status(&self, guest_id: &str, status: RsvpStatus) -> Result<bool> {
        let _guard = self.lock.lock().await;

        let Some(mut sheet) = self.load_sheet(&self.guests_sheet).await? else {
            return Ok(false);
        };
        let (Some(id_col), Some(status_col)) = (sheet.column("guest_id"), sheet.column("rsvp_status"))
        else {
            return Ok(false);
        };
        let Some(row) = sheet.find_row(id_col, guest_id) else {
            return Ok(false);
        };

        sheet.set_cell(row, status_col, status.as_str());
        self.save_sheet(&sheet).await?;
        tracing::debug!("Guest {} marked as {}", guest_id, status.as_str());
        Ok(true)
    }
}

#[async_trait]
impl<S: Storage> ResponseStore for SpreadsheetStore<S> {
    async fn upsert_response(&self, row: &ResponseRow) -> Result<UpsertOutcome> {
        let _guard = self.lock.lock().await;

        let headers = ResponseRow::headers();
        let mut sheet = match self.load_sheet(&self.responses_sheet).await? {
            Some(sheet) if !sheet.headers().is_empty() => sheet,
            _ => {
                tracing::info!("Creating sheet '{}'", self.responses_sheet);
                Sheet::new(self.responses_sheet.clone(), headers.clone())
            }
        };
        let columns = sheet.ensure_columns(&headers);

        let existing = if row.guest_id.is_empty() {
            None
        } else {
            sheet
                .column(GUEST_ID_HEADER)
                .and_then(|col| sheet.find_row(col, &row.guest_id))
        };

        let outcome = match existing {
            Some(idx) => {
                sheet.write_row(idx, &columns, row.to_cells());
                UpsertOutcome::Updated
            }
            None => {
                sheet.append_row(&columns, row.to_cells());
                UpsertOutcome::Inserted
            }
        };

        self.save_sheet(&sheet).await?;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag(""));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("yes"));
        assert!(!parse_flag("FALSE"));
        assert!(!parse_flag(" false "));
    }

    #[test]
    fn test_read_guest_applies_defaults() {
        let csv = "name,guest_id\nАнна,anna\n";
        let sheet = Sheet::parse("Guests", csv.as_bytes()).unwrap();
        let guest = read_guest(&sheet, 0);

        assert_eq!(guest.guest_id, "anna");
        assert_eq!(guest.name, "Анна");
        assert_eq!(guest.invitation_type, InvitationType::Single);
        assert_eq!(guest.group, GuestGroup::Friends);
        assert_eq!(guest.rsvp_status, RsvpStatus::Pending);
        assert!(guest.show_alcohol);
    }

    #[test]
    fn test_guest_cells_match_headers() {
        let guest = GuestRecord::new("igor", "Игорь");
        assert_eq!(guest_cells(&guest).len(), GUEST_HEADERS.len());
    }
}
