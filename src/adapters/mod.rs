// Adapters layer: concrete implementations for external systems (files, sheets, http).

pub mod client;
pub mod http;
pub mod sheet;
pub mod spreadsheet;
pub mod storage;
