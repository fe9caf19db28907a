//! Wire types exchanged with the generation backend.
//!
//! Every record here mirrors a JSON body produced or consumed by the REST
//! API. The client holds no authoritative state: these are read-mostly
//! snapshots refreshed on demand (files, rows) or on every accepted poll
//! (process status).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::progress::percent;

/// Lifecycle of an uploaded file, as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Pending,
    Processing,
    Completed,
    Error,
}

impl Default for FileStatus {
    fn default() -> Self {
        FileStatus::Pending
    }
}

impl FileStatus {
    /// Short label for status tags in the UI.
    pub fn label(self) -> &'static str {
        match self {
            FileStatus::Pending => "Pending",
            FileStatus::Processing => "Processing",
            FileStatus::Completed => "Completed",
            FileStatus::Error => "Error",
        }
    }
}

/// One uploaded CSV file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    pub file_id: String,
    pub filename: String,
    pub created_at: String,
    pub row_count: usize,
    #[serde(default)]
    pub processed_count: usize,
    #[serde(default)]
    pub status: FileStatus,
}

impl FileInfo {
    /// Completion percentage of server-side processing, 0 when the file is empty.
    pub fn completion_percent(&self) -> u8 {
        percent(self.processed_count, self.row_count)
    }
}

/// One row of a file as returned by the paginated listing.
///
/// The backend truncates `sanskrit` and `english` to short previews for
/// this shape; the full text comes from [`RowDetail`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowSummary {
    pub id: usize,
    #[serde(default)]
    pub file_id: String,
    #[serde(default)]
    pub sanskrit: String,
    #[serde(default)]
    pub english: String,
    #[serde(default)]
    pub tags: String,
}

/// A full row, including whatever generated-Q&A columns the CSV carries.
///
/// The backend returns the raw CSV record as one flat JSON object, so the
/// Q&A columns (`q_en_1`, `a_hi_3`, ...) land in [`RowDetail::columns`].
/// [`crate::qa::collect_generated`] reassembles them into per-language
/// arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowDetail {
    pub id: usize,
    #[serde(default)]
    pub file_id: String,
    #[serde(default)]
    pub sanskrit: String,
    #[serde(default)]
    pub english: String,
    #[serde(default)]
    pub tags: String,
    #[serde(flatten)]
    pub columns: BTreeMap<String, serde_json::Value>,
}

/// Generated Q&A content: six parallel arrays, one entry per pair.
///
/// Index `k` across the arrays is one question/answer pair rendered in
/// English, Hindi, and Sanskrit. The generation endpoint returns arrays of
/// equal length; rows read back from CSV may be ragged, which the pair
/// accessors in [`crate::qa`] tolerate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedQa {
    #[serde(default)]
    pub q_en: Vec<String>,
    #[serde(default)]
    pub a_en: Vec<String>,
    #[serde(default)]
    pub q_hi: Vec<String>,
    #[serde(default)]
    pub a_hi: Vec<String>,
    #[serde(default)]
    pub q_sa: Vec<String>,
    #[serde(default)]
    pub a_sa: Vec<String>,
}

/// One generated row inside a batch job's results.
///
/// Serializes with the Q&A arrays flattened to top-level keys, which is
/// the shape the save endpoints expect back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub id: usize,
    pub file_id: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub sanskrit: String,
    #[serde(default)]
    pub english: String,
    #[serde(flatten)]
    pub qa: GeneratedQa,
}

/// Aggregate state of a batch job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Initializing,
    Running,
    Completed,
    Error,
}

impl RunStatus {
    /// Terminal states end the poll loop.
    pub fn is_terminal(self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Error)
    }
}

/// Per-file counters inside the simple process status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileSubProgress {
    #[serde(default)]
    pub processed: usize,
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub status: FileStatus,
}

/// Status of a batch job started through the simple endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessStatus {
    pub process_id: String,
    pub status: RunStatus,
    #[serde(default)]
    pub current_file: String,
    #[serde(default)]
    pub current_row: usize,
    #[serde(default)]
    pub total_rows: usize,
    #[serde(default)]
    pub total_files: usize,
    #[serde(default)]
    pub processed_files: usize,
    #[serde(default)]
    pub current_sanskrit: String,
    #[serde(default)]
    pub error_message: String,
    #[serde(default)]
    pub results: BTreeMap<String, Vec<ResultRow>>,
    #[serde(default)]
    pub progress: BTreeMap<String, FileSubProgress>,
}

impl ProcessStatus {
    /// Rows processed so far, summed across files.
    pub fn processed_rows(&self) -> usize {
        self.progress.values().map(|p| p.processed).sum()
    }

    /// Total rows across files, from the per-file counters.
    pub fn total_rows(&self) -> usize {
        self.progress.values().map(|p| p.total).sum()
    }

    /// Overall completion percentage, 0 when the job covers no rows.
    pub fn overall_percent(&self) -> u8 {
        percent(self.processed_rows(), self.total_rows())
    }
}

/// Per-file progress inside the detailed process status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileProgress {
    pub file_id: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub current_row: usize,
    #[serde(default)]
    pub total_rows: usize,
    #[serde(default)]
    pub current_sanskrit: String,
    #[serde(default)]
    pub status: FileStatus,
    #[serde(default)]
    pub processed_rows: usize,
    #[serde(default)]
    pub error_message: String,
}

impl FileProgress {
    /// Completion percentage for this file, 0 when it has no rows.
    pub fn percent(&self) -> u8 {
        percent(self.processed_rows, self.total_rows)
    }
}

/// Status of a batch job started through the detailed endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedProcessStatus {
    pub process_id: String,
    pub status: RunStatus,
    #[serde(default)]
    pub current_operation: String,
    #[serde(default)]
    pub total_files: usize,
    #[serde(default)]
    pub processed_files: usize,
    #[serde(default)]
    pub total_rows: usize,
    #[serde(default)]
    pub processed_rows: usize,
    #[serde(default)]
    pub file_progress: BTreeMap<String, FileProgress>,
    #[serde(default)]
    pub results: BTreeMap<String, Vec<ResultRow>>,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub estimated_completion: String,
    #[serde(default = "default_qa_count")]
    pub qa_count: usize,
}

fn default_qa_count() -> usize {
    4
}

impl DetailedProcessStatus {
    /// Overall completion percentage, 0 when the job covers no rows.
    pub fn overall_percent(&self) -> u8 {
        percent(self.processed_rows, self.total_rows)
    }

    /// First file id (in stable map order) that produced any results.
    ///
    /// Used to auto-select the active review tab once the run finishes.
    pub fn first_file_with_results(&self) -> Option<&str> {
        self.results
            .iter()
            .find(|(_, rows)| !rows.is_empty())
            .map(|(file_id, _)| file_id.as_str())
    }

    /// Total number of generated rows across all files.
    pub fn result_count(&self) -> usize {
        self.results.values().map(Vec::len).sum()
    }
}

/// Acknowledgement returned when a batch job is started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchStarted {
    pub process_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub file_count: usize,
    #[serde(default)]
    pub total_rows: usize,
}

/// Outcome of a batch-save call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveOutcome {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub saved: usize,
    #[serde(default)]
    pub errors: usize,
    #[serde(default)]
    pub message: String,
}

/// Plain `{status, message}` acknowledgement (delete, save-row, ensure-headers).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_status_round_trips_lowercase() {
        let json = serde_json::to_string(&FileStatus::Processing).unwrap();
        assert_eq!(json, "\"processing\"");
        let back: FileStatus = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(back, FileStatus::Error);
    }

    #[test]
    fn fresh_upload_is_pending_at_zero_percent() {
        // The backend's upload response for a 10-row sample.csv.
        let info: FileInfo = serde_json::from_value(serde_json::json!({
            "file_id": "3d1a6a2e",
            "filename": "sample.csv",
            "created_at": "2026-01-12T10:04:00",
            "row_count": 10,
            "processed_count": 0,
            "status": "pending"
        }))
        .unwrap();

        assert_eq!(info.row_count, 10);
        assert_eq!(info.processed_count, 0);
        assert_eq!(info.status, FileStatus::Pending);
        assert_eq!(info.completion_percent(), 0);
    }

    #[test]
    fn file_info_defaults_optional_fields() {
        let info: FileInfo = serde_json::from_value(serde_json::json!({
            "file_id": "f",
            "filename": "a.csv",
            "created_at": "2026-01-12T10:04:00",
            "row_count": 3
        }))
        .unwrap();
        assert_eq!(info.processed_count, 0);
        assert_eq!(info.status, FileStatus::Pending);
    }

    #[test]
    fn row_detail_keeps_qa_columns_in_flat_map() {
        let row: RowDetail = serde_json::from_value(serde_json::json!({
            "id": 2,
            "file_id": "f",
            "sanskrit": "धर्मो रक्षति रक्षितः",
            "english": "Dharma protects those who protect it",
            "tags": "dharma, niti",
            "q_en_1": "What protects its protector?",
            "a_en_1": "Dharma."
        }))
        .unwrap();

        assert_eq!(row.columns.len(), 2);
        assert_eq!(
            row.columns["q_en_1"],
            serde_json::json!("What protects its protector?")
        );
    }

    #[test]
    fn result_row_serializes_qa_arrays_at_top_level() {
        let row = ResultRow {
            id: 0,
            file_id: "f".into(),
            filename: String::new(),
            sanskrit: "s".into(),
            english: "e".into(),
            qa: GeneratedQa {
                q_en: vec!["q".into()],
                a_en: vec!["a".into()],
                ..Default::default()
            },
        };

        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["q_en"], serde_json::json!(["q"]));
        assert_eq!(value["a_en"], serde_json::json!(["a"]));
        assert!(value.get("qa").is_none());
    }

    #[test]
    fn run_status_terminality() {
        assert!(!RunStatus::Initializing.is_terminal());
        assert!(!RunStatus::Running.is_terminal());
        assert!(RunStatus::Completed.is_terminal());
        assert!(RunStatus::Error.is_terminal());
    }

    #[test]
    fn simple_status_sums_per_file_counters() {
        let status: ProcessStatus = serde_json::from_value(serde_json::json!({
            "process_id": "p",
            "status": "running",
            "progress": {
                "a": {"processed": 2, "total": 5, "status": "processing"},
                "b": {"processed": 3, "total": 5, "status": "pending"}
            }
        }))
        .unwrap();

        assert_eq!(status.processed_rows(), 5);
        assert_eq!(status.total_rows(), 10);
        assert_eq!(status.overall_percent(), 50);
    }

    #[test]
    fn first_file_with_results_skips_empty_entries() {
        let status: DetailedProcessStatus = serde_json::from_value(serde_json::json!({
            "process_id": "p",
            "status": "completed",
            "results": {
                "aaa": [],
                "bbb": [{"id": 0, "file_id": "bbb"}]
            }
        }))
        .unwrap();

        assert_eq!(status.first_file_with_results(), Some("bbb"));
        assert_eq!(status.result_count(), 1);
        assert_eq!(status.qa_count, 4);
    }
}
