//! Tag lists, Q&A column collection, and pair assembly.
//!
//! The CSV schema stores one column per question or answer, named
//! `q_{lang}_{i}` / `a_{lang}_{i}` with 1-based indices for `en`, `hi`,
//! and `sa`. The generation API speaks per-language arrays instead. This
//! module converts between the two and between arrays and the per-pair
//! view the editor renders.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::types::{GeneratedQa, RowDetail};

/// Languages a pair is generated in, in column order.
pub const LANGS: [&str; 3] = ["en", "hi", "sa"];

/// Split a comma-joined tag string into trimmed, non-empty tags.
pub fn split_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join tags back into the comma-delimited storage form.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// One generated pair across all three languages, as edited in the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QaPairSet {
    pub q_en: String,
    pub a_en: String,
    pub q_hi: String,
    pub a_hi: String,
    pub q_sa: String,
    pub a_sa: String,
}

impl GeneratedQa {
    /// Number of pairs, tolerating ragged arrays read back from CSV.
    pub fn pair_count(&self) -> usize {
        [
            self.q_en.len(),
            self.a_en.len(),
            self.q_hi.len(),
            self.a_hi.len(),
            self.q_sa.len(),
            self.a_sa.len(),
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.pair_count() == 0
    }

    /// Per-pair view for rendering and editing; missing entries of ragged
    /// arrays become empty strings.
    pub fn to_pairs(&self) -> Vec<QaPairSet> {
        let at = |items: &[String], i: usize| items.get(i).cloned().unwrap_or_default();
        (0..self.pair_count())
            .map(|i| QaPairSet {
                q_en: at(&self.q_en, i),
                a_en: at(&self.a_en, i),
                q_hi: at(&self.q_hi, i),
                a_hi: at(&self.a_hi, i),
                q_sa: at(&self.q_sa, i),
                a_sa: at(&self.a_sa, i),
            })
            .collect()
    }

    /// Rebuild the array form from edited pairs.
    pub fn from_pairs(pairs: &[QaPairSet]) -> Self {
        GeneratedQa {
            q_en: pairs.iter().map(|p| p.q_en.clone()).collect(),
            a_en: pairs.iter().map(|p| p.a_en.clone()).collect(),
            q_hi: pairs.iter().map(|p| p.q_hi.clone()).collect(),
            a_hi: pairs.iter().map(|p| p.a_hi.clone()).collect(),
            q_sa: pairs.iter().map(|p| p.q_sa.clone()).collect(),
            a_sa: pairs.iter().map(|p| p.a_sa.clone()).collect(),
        }
    }
}

/// CSV cells come back as whatever pandas inferred; render them all as text.
fn cell_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Collect the `q_{lang}_{i}` / `a_{lang}_{i}` columns of a row back into
/// per-language arrays, ordered by index.
///
/// Array length per language is the highest index present for it, so a
/// row saved with 4 pairs round-trips to arrays of length 4 even when
/// some cells are empty.
pub fn collect_generated(row: &RowDetail) -> GeneratedQa {
    let mut qa = GeneratedQa::default();
    for lang in LANGS {
        let questions = indexed_cells(&row.columns, &format!("q_{lang}_"));
        let answers = indexed_cells(&row.columns, &format!("a_{lang}_"));
        let count = questions
            .keys()
            .chain(answers.keys())
            .copied()
            .max()
            .unwrap_or(0);

        let to_vec = |cells: BTreeMap<usize, String>| -> Vec<String> {
            (1..=count)
                .map(|i| cells.get(&i).cloned().unwrap_or_default())
                .collect()
        };
        match lang {
            "en" => {
                qa.q_en = to_vec(questions);
                qa.a_en = to_vec(answers);
            }
            "hi" => {
                qa.q_hi = to_vec(questions);
                qa.a_hi = to_vec(answers);
            }
            _ => {
                qa.q_sa = to_vec(questions);
                qa.a_sa = to_vec(answers);
            }
        }
    }
    qa
}

fn indexed_cells(columns: &BTreeMap<String, Value>, prefix: &str) -> BTreeMap<usize, String> {
    columns
        .iter()
        .filter_map(|(name, value)| {
            let index: usize = name.strip_prefix(prefix)?.parse().ok()?;
            Some((index, cell_to_string(value)))
        })
        .collect()
}

/// True when the row already carries any generated question text.
pub fn has_generated_content(row: &RowDetail) -> bool {
    row.columns.iter().any(|(name, value)| {
        LANGS
            .iter()
            .any(|lang| name.starts_with(&format!("q_{lang}_")))
            && !cell_to_string(value).trim().is_empty()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tags_split_and_trim() {
        assert_eq!(split_tags("dharma, niti ,  yoga"), vec!["dharma", "niti", "yoga"]);
        assert_eq!(split_tags(""), Vec::<String>::new());
        assert_eq!(split_tags(" , ,"), Vec::<String>::new());
    }

    #[test]
    fn tags_round_trip_through_storage_form() {
        let tags = split_tags("dharma,niti");
        assert_eq!(join_tags(&tags), "dharma, niti");
        assert_eq!(split_tags(&join_tags(&tags)), tags);
    }

    #[test]
    fn pair_count_uses_longest_array() {
        let qa = GeneratedQa {
            q_en: vec!["a".into(), "b".into()],
            a_sa: vec!["x".into(), "y".into(), "z".into()],
            ..Default::default()
        };
        assert_eq!(qa.pair_count(), 3);
        assert!(!qa.is_empty());
        assert!(GeneratedQa::default().is_empty());
    }

    #[test]
    fn pairs_round_trip() {
        let qa = GeneratedQa {
            q_en: vec!["q1".into(), "q2".into()],
            a_en: vec!["a1".into(), "a2".into()],
            q_hi: vec!["हq1".into(), "हq2".into()],
            a_hi: vec!["हa1".into(), "हa2".into()],
            q_sa: vec!["सq1".into(), "सq2".into()],
            a_sa: vec!["सa1".into(), "सa2".into()],
        };
        let pairs = qa.to_pairs();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1].q_hi, "हq2");
        assert_eq!(GeneratedQa::from_pairs(&pairs), qa);
    }

    #[test]
    fn ragged_arrays_pad_with_empty_strings() {
        let qa = GeneratedQa {
            q_en: vec!["q1".into(), "q2".into()],
            a_en: vec!["a1".into()],
            ..Default::default()
        };
        let pairs = qa.to_pairs();
        assert_eq!(pairs[1].q_en, "q2");
        assert_eq!(pairs[1].a_en, "");
        assert_eq!(pairs[1].q_sa, "");
    }

    fn detail_with(columns: serde_json::Value) -> RowDetail {
        let mut base = json!({
            "id": 0,
            "file_id": "f",
            "sanskrit": "s",
            "english": "e",
            "tags": ""
        });
        base.as_object_mut()
            .unwrap()
            .extend(columns.as_object().unwrap().clone());
        serde_json::from_value(base).unwrap()
    }

    #[test]
    fn collects_columns_in_index_order() {
        let row = detail_with(json!({
            "q_en_2": "second q",
            "q_en_1": "first q",
            "a_en_1": "first a",
            "a_en_2": "second a",
            "q_hi_1": "हिंदी प्रश्न",
            "a_hi_1": "हिंदी उत्तर"
        }));

        let qa = collect_generated(&row);
        assert_eq!(qa.q_en, vec!["first q", "second q"]);
        assert_eq!(qa.a_en, vec!["first a", "second a"]);
        assert_eq!(qa.q_hi, vec!["हिंदी प्रश्न"]);
        assert_eq!(qa.q_sa, Vec::<String>::new());
    }

    #[test]
    fn gaps_and_non_string_cells_are_tolerated() {
        // pandas turns empty cells into NaN -> backend cleans to "" but a
        // numeric-looking column can still arrive as a number.
        let row = detail_with(json!({
            "q_en_1": "q",
            "q_en_3": "later q",
            "a_en_1": 42
        }));

        let qa = collect_generated(&row);
        assert_eq!(qa.q_en, vec!["q", "", "later q"]);
        assert_eq!(qa.a_en, vec!["42", "", ""]);
    }

    #[test]
    fn detects_existing_generated_content() {
        let empty = detail_with(json!({ "q_en_1": "  " }));
        assert!(!has_generated_content(&empty));

        let filled = detail_with(json!({ "q_sa_1": "प्रश्न" }));
        assert!(has_generated_content(&filled));

        let none = detail_with(json!({}));
        assert!(!has_generated_content(&none));
    }
}
