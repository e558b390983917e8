//! Guest-personalized wedding RSVP backed by a CSV workbook.
//!
//! - [`domain::declension`] declines Russian given names for greetings and titles.
//! - [`adapters::spreadsheet`] keeps guests and responses in `Guests.csv` / `Responses.csv`.
//! - [`adapters::http`] exposes the RSVP endpoint, [`adapters::client`] consumes it.
//! - [`app`] derives the visible strings and form state from a guest record.

pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{client::RsvpClient, spreadsheet::SpreadsheetStore, storage::LocalStorage};
pub use app::{GuestView, RsvpForm};
pub use config::TomlConfig;
pub use domain::declension::{decline, infer_gender, Gender, GrammaticalCase};
pub use domain::model::{Attendance, DrinkOption, DrinkSelection, GuestRecord, RsvpSubmission};
pub use domain::services::RsvpService;
pub use utils::error::{Result, RsvpError};
