//! End-to-end tests for the batch curation flow, against backend-shaped
//! JSON fixtures:
//!
//! 1. Poll response → progress figures shown while the job runs
//! 2. Terminal response → review tab selection and result grouping
//! 3. Row selection → versioned and legacy save bodies
//!
//! Run with: `cargo test -p granthika-core --test curation_flow`

use granthika_core::payload::{group_rows_by_file, BatchSaveRequest};
use granthika_core::progress::estimated_remaining_secs;
use granthika_core::selection::{validate_save_selection, RowSelection};
use granthika_core::types::{DetailedProcessStatus, FileStatus, RunStatus};
use serde_json::json;

/// Mid-run poll body for a job over two files of five rows each, with the
/// first file done and the second untouched.
fn mid_run_status() -> DetailedProcessStatus {
    serde_json::from_value(json!({
        "process_id": "2f6b1f34-5f3e-4e61-9f3f-3a4c9d8e0c11",
        "status": "running",
        "current_operation": "Processing gita.csv: Row 5/5",
        "total_files": 2,
        "processed_files": 1,
        "total_rows": 10,
        "processed_rows": 5,
        "file_progress": {
            "gita": {
                "file_id": "gita",
                "filename": "gita.csv",
                "current_row": 5,
                "total_rows": 5,
                "current_sanskrit": "धर्मक्षेत्रे कुरुक्षेत्रे...",
                "status": "completed",
                "processed_rows": 5
            },
            "upanishad": {
                "file_id": "upanishad",
                "filename": "upanishad.csv",
                "current_row": 0,
                "total_rows": 5,
                "current_sanskrit": "",
                "status": "pending",
                "processed_rows": 0
            }
        },
        "start_time": "2026-01-12T10:00:00",
        "qa_count": 2
    }))
    .unwrap()
}

fn completed_status() -> DetailedProcessStatus {
    serde_json::from_value(json!({
        "process_id": "2f6b1f34-5f3e-4e61-9f3f-3a4c9d8e0c11",
        "status": "completed",
        "current_operation": "Batch processing completed successfully",
        "total_files": 2,
        "processed_files": 2,
        "total_rows": 10,
        "processed_rows": 10,
        "file_progress": {},
        "results": {
            "gita": [
                {
                    "id": 0,
                    "file_id": "gita",
                    "filename": "gita.csv",
                    "sanskrit": "धर्मक्षेत्रे कुरुक्षेत्रे",
                    "english": "On the field of dharma",
                    "q_en": ["Where did the armies assemble?", "Who narrates the scene?"],
                    "a_en": ["On Kurukshetra.", "Sanjaya."],
                    "q_hi": ["सेनाएँ कहाँ एकत्र हुईं?", "दृश्य कौन सुनाता है?"],
                    "a_hi": ["कुरुक्षेत्र में।", "संजय।"],
                    "q_sa": ["सेनाः कुत्र समवेताः?", "कः दृश्यं वदति?"],
                    "a_sa": ["कुरुक्षेत्रे।", "सञ्जयः।"]
                },
                {
                    "id": 1,
                    "file_id": "gita",
                    "filename": "gita.csv",
                    "sanskrit": "...",
                    "english": "...",
                    "q_en": ["Second row question?"],
                    "a_en": ["Second row answer."],
                    "q_hi": ["..?"], "a_hi": ["..."],
                    "q_sa": ["..?"], "a_sa": ["..."]
                }
            ],
            "upanishad": [
                {
                    "id": 0,
                    "file_id": "upanishad",
                    "filename": "upanishad.csv",
                    "sanskrit": "ईशावास्यमिदं सर्वम्",
                    "english": "All this is pervaded by the Lord",
                    "q_en": ["What pervades everything?"],
                    "a_en": ["The Lord."],
                    "q_hi": ["..?"], "a_hi": ["..."],
                    "q_sa": ["..?"], "a_sa": ["..."]
                }
            ]
        },
        "start_time": "2026-01-12T10:00:00",
        "qa_count": 2
    }))
    .unwrap()
}

#[test]
fn mid_run_progress_figures() {
    let status = mid_run_status();

    assert_eq!(status.status, RunStatus::Running);
    assert!(!status.status.is_terminal());
    assert_eq!(status.overall_percent(), 50);

    let gita = &status.file_progress["gita"];
    assert_eq!(gita.percent(), 100);
    assert_eq!(gita.status, FileStatus::Completed);
    assert_eq!(status.file_progress["upanishad"].percent(), 0);

    // 5 rows in 20s -> 0.25 rows/s -> 5 remaining rows in 20s.
    let eta = estimated_remaining_secs(20.0, status.processed_rows, status.total_rows).unwrap();
    assert!((eta - 20.0).abs() < 1e-9);

    // Nothing processed yet: the UI shows "calculating…".
    assert_eq!(estimated_remaining_secs(2.0, 0, status.total_rows), None);
}

#[test]
fn terminal_status_picks_first_review_tab() {
    let status = completed_status();

    assert!(status.status.is_terminal());
    assert_eq!(status.overall_percent(), 100);
    assert_eq!(status.result_count(), 3);
    assert_eq!(status.first_file_with_results(), Some("gita"));
}

#[test]
fn selected_rows_become_a_versioned_save_body() {
    let status = completed_status();

    let mut selection = RowSelection::new();
    selection.toggle("gita", 0);
    selection.toggle("upanishad", 0);

    assert!(validate_save_selection(selection.count()).is_ok());

    let rows = selection.pick_all(&status.results);
    assert_eq!(rows.len(), 2);

    let request = BatchSaveRequest::new(&status.process_id, rows);
    let body = serde_json::to_value(&request).unwrap();

    assert_eq!(body["process_id"], status.process_id.as_str());
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    // Q&A arrays sit at the top level of each row, ready for the backend's
    // column mapping.
    assert_eq!(
        rows[0]["q_en"][0],
        json!("Where did the armies assemble?")
    );
    assert_eq!(rows[1]["file_id"], "upanishad");
}

#[test]
fn legacy_body_groups_the_same_rows_by_file() {
    let status = completed_status();

    let mut selection = RowSelection::new();
    selection.toggle("gita", 0);
    selection.toggle("gita", 1);
    selection.toggle("upanishad", 0);

    let rows = selection.pick_all(&status.results);
    let grouped = group_rows_by_file(&rows);

    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped["gita"].len(), 2);
    assert_eq!(grouped["upanishad"].len(), 1);

    let body = serde_json::to_value(&grouped).unwrap();
    assert_eq!(body["gita"][1]["id"], 1);
}

#[test]
fn empty_selection_never_reaches_a_request_body() {
    let selection = RowSelection::new();
    assert!(validate_save_selection(selection.count()).is_err());
}
