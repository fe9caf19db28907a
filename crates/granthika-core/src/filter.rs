//! Client-side text filtering over row summaries.

use crate::types::RowSummary;

/// True when the filter matches the row's Sanskrit text, English text, or
/// tags, case-insensitively. An empty (or whitespace) filter matches
/// every row.
pub fn matches_filter(row: &RowSummary, filter: &str) -> bool {
    let needle = filter.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    row.sanskrit.to_lowercase().contains(&needle)
        || row.english.to_lowercase().contains(&needle)
        || row.tags.to_lowercase().contains(&needle)
}

/// Rows matching the filter, in their original order.
pub fn filter_rows<'a>(rows: &'a [RowSummary], filter: &str) -> Vec<&'a RowSummary> {
    rows.iter().filter(|row| matches_filter(row, filter)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(sanskrit: &str, english: &str, tags: &str) -> RowSummary {
        RowSummary {
            id: 0,
            file_id: "f".into(),
            sanskrit: sanskrit.into(),
            english: english.into(),
            tags: tags.into(),
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let r = row("", "", "");
        assert!(matches_filter(&r, ""));
        assert!(matches_filter(&r, "   "));
    }

    #[test]
    fn matches_any_of_the_three_fields() {
        let r = row("धर्मो रक्षति", "Dharma protects", "niti, dharma");
        assert!(matches_filter(&r, "धर्मो"));
        assert!(matches_filter(&r, "protects"));
        assert!(matches_filter(&r, "niti"));
        assert!(!matches_filter(&r, "karma"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let r = row("", "Dharma Protects", "NITI");
        assert!(matches_filter(&r, "dharma pro"));
        assert!(matches_filter(&r, "niti"));
        assert!(matches_filter(&r, "PROTECTS"));
    }

    #[test]
    fn filter_rows_preserves_order() {
        let rows = vec![
            row("a", "alpha", ""),
            row("b", "beta", ""),
            row("c", "alphabet", ""),
        ];
        let matched = filter_rows(&rows, "alpha");
        let englishes: Vec<&str> = matched.iter().map(|r| r.english.as_str()).collect();
        assert_eq!(englishes, vec!["alpha", "alphabet"]);
    }
}
