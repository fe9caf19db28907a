//! Request bodies for the save endpoints.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::qa::join_tags;
use crate::selection::{retain_selected_pairs, PairSelection};
use crate::types::{GeneratedQa, ResultRow};

/// Body of the single-row save endpoint.
///
/// Carries the current source fields, the rejoined tag list, and only the
/// selected generated pairs. The Q&A arrays flatten to top-level `q_*` /
/// `a_*` keys, which is how the backend maps them onto CSV columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveRowPayload {
    pub sanskrit: String,
    pub english: String,
    pub tags: String,
    #[serde(flatten)]
    pub qa: GeneratedQa,
}

impl SaveRowPayload {
    pub fn new(
        sanskrit: String,
        english: String,
        tags: &[String],
        qa: &GeneratedQa,
        keep: &PairSelection,
    ) -> Self {
        Self {
            sanskrit,
            english,
            tags: join_tags(tags),
            qa: retain_selected_pairs(qa, keep),
        }
    }
}

/// Versioned batch-save body: the process id plus a flat row list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSaveRequest {
    pub process_id: String,
    pub rows: Vec<ResultRow>,
}

impl BatchSaveRequest {
    pub fn new(process_id: &str, rows: Vec<ResultRow>) -> Self {
        Self {
            process_id: process_id.to_string(),
            rows,
        }
    }
}

/// Legacy per-job save shape: the same rows grouped by file id.
///
/// Only sent when the versioned endpoint reports itself unsupported.
pub fn group_rows_by_file(rows: &[ResultRow]) -> BTreeMap<String, Vec<ResultRow>> {
    let mut grouped: BTreeMap<String, Vec<ResultRow>> = BTreeMap::new();
    for row in rows {
        grouped
            .entry(row.file_id.clone())
            .or_default()
            .push(row.clone());
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_row_payload_filters_and_rejoins() {
        let qa = GeneratedQa {
            q_en: vec!["q0".into(), "q1".into(), "q2".into(), "q3".into()],
            a_en: vec!["a0".into(), "a1".into(), "a2".into(), "a3".into()],
            q_hi: vec!["h0".into(), "h1".into(), "h2".into(), "h3".into()],
            a_hi: vec!["i0".into(), "i1".into(), "i2".into(), "i3".into()],
            q_sa: vec!["s0".into(), "s1".into(), "s2".into(), "s3".into()],
            a_sa: vec!["t0".into(), "t1".into(), "t2".into(), "t3".into()],
        };
        let mut keep = PairSelection::all(4);
        keep.toggle(2);

        let payload = SaveRowPayload::new(
            "sanskrit text".into(),
            "english text".into(),
            &["dharma".to_string(), "niti".to_string()],
            &qa,
            &keep,
        );

        assert_eq!(payload.tags, "dharma, niti");
        assert_eq!(payload.qa.q_en, vec!["q0", "q1", "q3"]);

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["sanskrit"], "sanskrit text");
        assert_eq!(value["q_en"], serde_json::json!(["q0", "q1", "q3"]));
        assert_eq!(value["a_sa"], serde_json::json!(["t0", "t1", "t3"]));
        assert!(value.get("qa").is_none());
    }

    fn row(file_id: &str, id: usize) -> ResultRow {
        ResultRow {
            id,
            file_id: file_id.into(),
            filename: String::new(),
            sanskrit: String::new(),
            english: String::new(),
            qa: GeneratedQa::default(),
        }
    }

    #[test]
    fn batch_save_request_shape() {
        let request = BatchSaveRequest::new("proc-1", vec![row("a", 0), row("b", 3)]);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["process_id"], "proc-1");
        assert_eq!(value["rows"].as_array().unwrap().len(), 2);
        assert_eq!(value["rows"][1]["file_id"], "b");
    }

    #[test]
    fn legacy_grouping_preserves_order_within_files() {
        let rows = vec![row("b", 0), row("a", 1), row("b", 2)];
        let grouped = group_rows_by_file(&rows);

        assert_eq!(grouped.len(), 2);
        let ids: Vec<usize> = grouped["b"].iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 2]);
        assert_eq!(grouped["a"][0].id, 1);
    }
}
