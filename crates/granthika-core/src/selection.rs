//! Selection bookkeeping for batch results and single-row pairs.
//!
//! Batch-result selection is indexed by *position in the result ordering*
//! of the most recent accepted poll, not by row id: the interface gives no
//! stable row identity across polls, so the indices are discarded together
//! with the results whenever a new run starts.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::SelectionError;
use crate::types::{GeneratedQa, ResultRow};

/// Rows marked for saving, per file: file id → ordered result indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSelection {
    selected: BTreeMap<String, BTreeSet<usize>>,
}

impl RowSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one (file, index) pair in or out of the selection.
    pub fn toggle(&mut self, file_id: &str, index: usize) {
        let indices = self.selected.entry(file_id.to_string()).or_default();
        if !indices.remove(&index) {
            indices.insert(index);
        }
    }

    pub fn is_selected(&self, file_id: &str, index: usize) -> bool {
        self.selected
            .get(file_id)
            .is_some_and(|indices| indices.contains(&index))
    }

    /// Mark every index in `0..count` for `file_id`.
    pub fn select_all(&mut self, file_id: &str, count: usize) {
        self.selected
            .insert(file_id.to_string(), (0..count).collect());
    }

    /// Drop the selection for one file.
    pub fn clear_file(&mut self, file_id: &str) {
        self.selected.remove(file_id);
    }

    /// Drop everything (new batch run, view closed).
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Selected indices across all files.
    pub fn count(&self) -> usize {
        self.selected.values().map(BTreeSet::len).sum()
    }

    /// Selected indices for one file.
    pub fn count_file(&self, file_id: &str) -> usize {
        self.selected.get(file_id).map_or(0, BTreeSet::len)
    }

    /// Gather the selected rows across every file, in file order then
    /// result order, skipping indices that fell out of range since they
    /// were marked.
    pub fn pick_all(&self, results: &BTreeMap<String, Vec<ResultRow>>) -> Vec<ResultRow> {
        self.selected
            .iter()
            .flat_map(|(file_id, indices)| {
                let rows = results.get(file_id);
                indices
                    .iter()
                    .filter_map(move |&i| rows.and_then(|r| r.get(i)).cloned())
            })
            .collect()
    }

    /// Gather the selected rows of one file, in result order.
    pub fn pick_file(&self, file_id: &str, rows: &[ResultRow]) -> Vec<ResultRow> {
        self.selected
            .get(file_id)
            .map(|indices| {
                indices
                    .iter()
                    .filter_map(|&i| rows.get(i).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Generated-pair selection for a single row in the editor.
///
/// Every pair starts selected after a generation; deselected indices are
/// filtered out of the arrays at save time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairSelection {
    selected: BTreeSet<usize>,
}

impl PairSelection {
    /// All of `0..count` selected — the state right after generation.
    pub fn all(count: usize) -> Self {
        Self {
            selected: (0..count).collect(),
        }
    }

    pub fn toggle(&mut self, index: usize) {
        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn indices(&self) -> &BTreeSet<usize> {
        &self.selected
    }
}

/// Gate for the batch-start action: at least one file must be selected,
/// otherwise the start endpoint must not be called.
pub fn validate_batch_start(selected_files: &BTreeSet<String>) -> Result<(), SelectionError> {
    if selected_files.is_empty() {
        return Err(SelectionError::NoFilesSelected);
    }
    Ok(())
}

/// Gate for every save action (single-row, simple batch, detailed batch):
/// an empty selection is rejected before any request is issued.
pub fn validate_save_selection(selected_rows: usize) -> Result<(), SelectionError> {
    if selected_rows == 0 {
        return Err(SelectionError::NoRowsSelected);
    }
    Ok(())
}

/// Keep only the selected pair indices of each Q&A array.
///
/// Arrays are filtered independently by position, so deselecting pair 2 of
/// 4 yields arrays of length 3 with index 2's content gone from all six.
pub fn retain_selected_pairs(qa: &GeneratedQa, keep: &PairSelection) -> GeneratedQa {
    let keep_indices = |items: &[String]| -> Vec<String> {
        items
            .iter()
            .enumerate()
            .filter(|(i, _)| keep.is_selected(*i))
            .map(|(_, item)| item.clone())
            .collect()
    };
    GeneratedQa {
        q_en: keep_indices(&qa.q_en),
        a_en: keep_indices(&qa.a_en),
        q_hi: keep_indices(&qa.q_hi),
        a_hi: keep_indices(&qa.a_hi),
        q_sa: keep_indices(&qa.q_sa),
        a_sa: keep_indices(&qa.a_sa),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_row(file_id: &str, id: usize) -> ResultRow {
        ResultRow {
            id,
            file_id: file_id.into(),
            filename: String::new(),
            sanskrit: format!("s{id}"),
            english: format!("e{id}"),
            qa: GeneratedQa::default(),
        }
    }

    #[test]
    fn toggle_twice_restores_original_state() {
        let mut selection = RowSelection::new();
        assert!(!selection.is_selected("f", 3));

        selection.toggle("f", 3);
        assert!(selection.is_selected("f", 3));

        selection.toggle("f", 3);
        assert!(!selection.is_selected("f", 3));
        assert_eq!(selection.count(), 0);
    }

    #[test]
    fn selection_is_scoped_per_file() {
        let mut selection = RowSelection::new();
        selection.toggle("a", 0);
        selection.toggle("b", 0);
        selection.toggle("b", 1);

        assert_eq!(selection.count_file("a"), 1);
        assert_eq!(selection.count_file("b"), 2);
        assert_eq!(selection.count(), 3);

        selection.clear_file("b");
        assert_eq!(selection.count(), 1);
    }

    #[test]
    fn pick_all_walks_files_in_order_and_skips_stale_indices() {
        let mut results = BTreeMap::new();
        results.insert("a".to_string(), vec![result_row("a", 0), result_row("a", 1)]);
        results.insert("b".to_string(), vec![result_row("b", 0)]);

        let mut selection = RowSelection::new();
        selection.toggle("b", 0);
        selection.toggle("a", 1);
        selection.toggle("a", 7); // stale index from an older poll

        let picked = selection.pick_all(&results);
        let ids: Vec<(String, usize)> = picked
            .iter()
            .map(|r| (r.file_id.clone(), r.id))
            .collect();
        assert_eq!(ids, vec![("a".to_string(), 1), ("b".to_string(), 0)]);
    }

    #[test]
    fn pick_file_only_returns_that_file() {
        let rows = vec![result_row("a", 0), result_row("a", 1), result_row("a", 2)];
        let mut selection = RowSelection::new();
        selection.toggle("a", 0);
        selection.toggle("a", 2);
        selection.toggle("b", 1);

        let picked = selection.pick_file("a", &rows);
        assert_eq!(picked.len(), 2);
        assert_eq!(picked[1].id, 2);
    }

    #[test]
    fn pair_selection_starts_full_after_generation() {
        let pairs = PairSelection::all(4);
        assert_eq!(pairs.count(), 4);
        assert!(pairs.is_selected(0));
        assert!(pairs.is_selected(3));
        assert!(!pairs.is_selected(4));
    }

    #[test]
    fn empty_batch_start_is_rejected() {
        let none = BTreeSet::new();
        assert_eq!(
            validate_batch_start(&none),
            Err(SelectionError::NoFilesSelected)
        );

        let some: BTreeSet<String> = ["f".to_string()].into();
        assert!(validate_batch_start(&some).is_ok());
    }

    #[test]
    fn empty_save_selection_is_rejected() {
        assert_eq!(
            validate_save_selection(0),
            Err(SelectionError::NoRowsSelected)
        );
        assert!(validate_save_selection(1).is_ok());
    }

    #[test]
    fn deselecting_one_pair_filters_all_six_arrays() {
        let qa = GeneratedQa {
            q_en: vec!["q0".into(), "q1".into(), "q2".into(), "q3".into()],
            a_en: vec!["a0".into(), "a1".into(), "a2".into(), "a3".into()],
            q_hi: vec!["हq0".into(), "हq1".into(), "हq2".into(), "हq3".into()],
            a_hi: vec!["हa0".into(), "हa1".into(), "हa2".into(), "हa3".into()],
            q_sa: vec!["सq0".into(), "सq1".into(), "सq2".into(), "सq3".into()],
            a_sa: vec!["सa0".into(), "सa1".into(), "सa2".into(), "सa3".into()],
        };

        let mut keep = PairSelection::all(4);
        keep.toggle(2);

        let kept = retain_selected_pairs(&qa, &keep);
        assert_eq!(kept.q_en, vec!["q0", "q1", "q3"]);
        assert_eq!(kept.a_en, vec!["a0", "a1", "a3"]);
        assert_eq!(kept.q_hi.len(), 3);
        assert_eq!(kept.a_sa, vec!["सa0", "सa1", "सa3"]);
        assert!(!kept.q_sa.contains(&"सq2".to_string()));
    }
}
