//! 班表匯出 (CSV)
//!
//! One header row, then one row per shift in store order. Rows are derived
//! from the collections each time [`ShiftAssignmentStore::export_rows`] is
//! called, so two calls without a mutation in between yield the same rows.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use shared::models::Shift;

use super::store::ShiftAssignmentStore;

pub const EXPORT_HEADER: [&str; 6] = ["日期", "時段", "職務", "需求人數", "已排人員", "狀態"];

/// UTF-8 byte-order mark so spreadsheet apps detect the encoding
pub const BOM: char = '\u{FEFF}';

const ASSIGNEE_SEPARATOR: &str = " / ";

pub type ExportRow = [String; 6];

/// CSV file ready to be written or offered for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// `排班表_{unix_millis}.csv`
    pub file_name: String,
    /// BOM + comma-separated rows joined by `\n`
    pub contents: String,
}

impl ExportArtifact {
    pub fn write_to(&self, dir: impl AsRef<Path>) -> std::io::Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, self.contents.as_bytes())?;
        Ok(path)
    }
}

impl ShiftAssignmentStore {
    /// Header row followed by one row per shift
    pub fn export_rows(&self) -> impl Iterator<Item = ExportRow> + '_ {
        std::iter::once(EXPORT_HEADER.map(String::from))
            .chain(self.shifts().iter().map(move |shift| self.export_row(shift)))
    }

    fn export_row(&self, shift: &Shift) -> ExportRow {
        [
            shift.date.clone(),
            shift.display_name(),
            shift.role.clone(),
            shift.staff_needed.to_string(),
            self.assignee_names(shift)
                .collect::<Vec<_>>()
                .join(ASSIGNEE_SEPARATOR),
            shift.status.label().to_string(),
        ]
    }

    /// `None` when there are no shifts to export
    pub fn export_csv(&self) -> Option<ExportArtifact> {
        self.export_csv_at(shared::util::now_millis())
    }

    pub fn export_csv_at(&self, timestamp_millis: i64) -> Option<ExportArtifact> {
        if self.shifts().is_empty() {
            return None;
        }

        let body = self
            .export_rows()
            .map(|row| {
                row.iter()
                    .map(|cell| escape_cell(cell))
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect::<Vec<_>>()
            .join("\n");

        tracing::info!(
            shifts = self.shifts().len(),
            "Schedule exported to CSV"
        );
        Some(ExportArtifact {
            file_name: format!("排班表_{timestamp_millis}.csv"),
            contents: format!("{BOM}{body}"),
        })
    }
}

/// Quote a cell containing a delimiter, quote or line break
fn escape_cell(cell: &str) -> Cow<'_, str> {
    if cell.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", cell.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(cell)
    }
}
