//! In-memory view of one CSV sheet: a header row plus data rows.
//! Columns are always addressed by header name.

use crate::utils::error::{Result, RsvpError};

const BOM: char = '\u{feff}';

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows: Vec::new(),
        }
    }

    /// Parses CSV bytes. The first record is the header row; an empty file
    /// yields a sheet without headers or rows.
    pub fn parse(name: impl Into<String>, data: &[u8]) -> Result<Self> {
        let name = name.into();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(data);

        let mut records = reader.records();
        let headers: Vec<String> = match records.next() {
            Some(record) => record?
                .iter()
                .map(|h| h.trim_start_matches(BOM).trim().to_string())
                .collect(),
            None => Vec::new(),
        };

        let mut rows = Vec::new();
        for record in records {
            rows.push(record?.iter().map(str::to_string).collect());
        }

        tracing::debug!("Parsed sheet '{}': {} rows", name, rows.len());
        Ok(Self {
            name,
            headers,
            rows,
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());

        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }

        writer
            .into_inner()
            .map_err(|e| RsvpError::IoError(e.into_error()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Column indexes for `headers`, appending any header the sheet lacks.
    pub fn ensure_columns(&mut self, headers: &[String]) -> Vec<usize> {
        headers
            .iter()
            .map(|header| match self.column(header) {
                Some(idx) => idx,
                None => {
                    self.headers.push(header.clone());
                    self.headers.len() - 1
                }
            })
            .collect()
    }

    /// Cell text; cells past the end of a short row read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Index of the first row whose `col` cell equals `value` exactly.
    pub fn find_row(&self, col: usize, value: &str) -> Option<usize> {
        (0..self.rows.len()).find(|&row| self.cell(row, col) == value)
    }

    pub fn set_cell(&mut self, row: usize, col: usize, value: impl Into<String>) {
        let width = self.headers.len().max(col + 1);
        if let Some(cells) = self.rows.get_mut(row) {
            if cells.len() < width {
                cells.resize(width, String::new());
            }
            cells[col] = value.into();
        }
    }

    /// Writes `cells[i]` into column `columns[i]` of `row`.
    pub fn write_row(&mut self, row: usize, columns: &[usize], cells: Vec<String>) {
        for (col, value) in columns.iter().zip(cells) {
            self.set_cell(row, *col, value);
        }
    }

    /// Appends a row laid out by `columns`; returns its index.
    pub fn append_row(&mut self, columns: &[usize], cells: Vec<String>) -> usize {
        self.rows.push(vec![String::new(); self.headers.len()]);
        let row = self.rows.len() - 1;
        self.write_row(row, columns, cells);
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reads_headers_and_rows() {
        let csv = "\u{feff}guest_id, name\nanna,Анна\nigor,Игорь\n";
        let sheet = Sheet::parse("Guests", csv.as_bytes()).unwrap();
        assert_eq!(sheet.headers(), &["guest_id".to_string(), "name".to_string()]);
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.cell(1, 1), "Игорь");
        assert_eq!(sheet.find_row(0, "igor"), Some(1));
        assert_eq!(sheet.find_row(0, "IGOR"), None);
    }

    #[test]
    fn test_short_rows_read_as_empty_and_grow_on_write() {
        let csv = "a,b,c\n1\n";
        let mut sheet = Sheet::parse("S", csv.as_bytes()).unwrap();
        assert_eq!(sheet.cell(0, 2), "");
        sheet.set_cell(0, 2, "x");
        assert_eq!(sheet.rows()[0], vec!["1", "", "x"]);
    }

    #[test]
    fn test_empty_file() {
        let sheet = Sheet::parse("S", b"").unwrap();
        assert!(sheet.headers().is_empty());
        assert!(sheet.is_empty());
        assert_eq!(sheet.column("guest_id"), None);
    }

    #[test]
    fn test_ensure_columns_appends_missing_headers() {
        let mut sheet = Sheet::new("Responses", vec!["Name".to_string(), "Guest ID".to_string()]);
        let cols = sheet.ensure_columns(&["Guest ID".to_string(), "Dietary".to_string()]);
        assert_eq!(cols, vec![1, 2]);
        assert_eq!(sheet.headers().len(), 3);

        let row = sheet.append_row(&cols, vec!["g1".to_string(), "—".to_string()]);
        assert_eq!(sheet.rows()[row], vec!["", "g1", "—"]);
    }

    #[test]
    fn test_round_trip_keeps_quoted_cells() {
        let mut sheet = Sheet::new("S", vec!["message".to_string()]);
        sheet.append_row(&[0], vec!["Ждём вас, \"друзья\"".to_string()]);
        let parsed = Sheet::parse("S", &sheet.to_bytes().unwrap()).unwrap();
        assert_eq!(parsed, sheet);
    }
}
