//! Catalog search and filtering.
//!
//! Filtering is plain case-insensitive substring membership over the resolved
//! name, description and category of each entry. There is no ranking: the
//! result is always a subsequence of the catalog in its original order.

use crate::domain::MedicalExample;

/// Filters the catalog by a free-text query.
///
/// The query is trimmed and lower-cased. A blank query returns the whole
/// catalog. Otherwise an entry is kept when any of its resolved name,
/// description or category contains the query.
///
/// # Example
///
/// ```
/// use medsimplifier::catalog::{fallback_examples, filter};
///
/// let catalog = fallback_examples();
/// let hits = filter(&catalog, "  DIABET ");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id, "diabetes-mellitus");
/// ```
#[must_use]
pub fn filter(examples: &[MedicalExample], query: &str) -> Vec<MedicalExample> {
    let needle = query.trim().to_lowercase();

    let _span = tracing::debug_span!(
        "filter_catalog",
        total = examples.len(),
        query_len = needle.len()
    )
    .entered();

    if needle.is_empty() {
        return examples.to_vec();
    }

    let filtered: Vec<MedicalExample> = examples
        .iter()
        .filter(|example| {
            let fields = example.display_fields();
            [fields.name.as_ref(), fields.description, fields.category]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect();

    tracing::debug!(filtered_count = filtered.len(), "catalog filter applied");
    filtered
}

/// Character range `(start, end)` of the first case-insensitive occurrence
/// of `query` in `text`, for match highlighting.
///
/// Returns `None` for a blank query or when there is no match. Indices are in
/// characters, not bytes.
#[must_use]
pub fn match_range(text: &str, query: &str) -> Option<(usize, usize)> {
    let needle: Vec<char> = query.trim().to_lowercase().chars().collect();
    if needle.is_empty() {
        return None;
    }

    // Compare per character so indices stay aligned with `text` even when
    // lower-casing changes a character's byte length.
    let haystack: Vec<char> = text
        .chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect();

    haystack
        .windows(needle.len())
        .position(|window| window == needle.as_slice())
        .map(|start| (start, start + needle.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> Vec<MedicalExample> {
        [
            json!({ "id": 1, "name": "Diabetes Mellitus", "category": "Endocrine" }),
            json!({ "id": 2, "name": "Hypertension", "description": "High blood pressure" }),
            json!({ "id": 3, "term": "Retinopati", "definition": "Komplikasi diabetes pada mata" }),
            json!({ "id": 4, "name": "Asthma", "type": "Respiratory" }),
            json!({ "id": 5, "name": "Gestational diabetes", "category": "Obstetrics" }),
        ]
        .iter()
        .enumerate()
        .map(|(idx, value)| MedicalExample::from_feed_value(value, idx + 1))
        .collect()
    }

    fn ids(examples: &[MedicalExample]) -> Vec<&str> {
        examples.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn empty_query_returns_full_catalog_in_order() {
        let catalog = catalog();
        assert_eq!(filter(&catalog, ""), catalog);
        assert_eq!(filter(&catalog, "   "), catalog);
    }

    #[test]
    fn substring_matches_across_fields_preserve_order() {
        let catalog = catalog();
        assert_eq!(ids(&filter(&catalog, "diabet")), vec!["1", "3", "5"]);
        assert_eq!(ids(&filter(&catalog, "DIABET")), vec!["1", "3", "5"]);
    }

    #[test]
    fn synonym_fields_are_searched() {
        let catalog = catalog();
        assert_eq!(ids(&filter(&catalog, "respir")), vec!["4"]);
        assert_eq!(ids(&filter(&catalog, "retino")), vec!["3"]);
    }

    #[test]
    fn placeholders_are_searchable_like_rendered_values() {
        let catalog = catalog();
        // Entries without a category render as "General".
        assert_eq!(ids(&filter(&catalog, "general")), vec!["2", "3"]);
    }

    #[test]
    fn no_match_yields_empty_result() {
        assert!(filter(&catalog(), "zzz").is_empty());
    }

    #[test]
    fn match_range_is_case_insensitive_and_char_based() {
        assert_eq!(match_range("Diabetes Mellitus", "mell"), Some((9, 13)));
        assert_eq!(match_range("Épilepsie", "pil"), Some((1, 4)));
        assert_eq!(match_range("Asthma", ""), None);
        assert_eq!(match_range("Asthma", "xyz"), None);
    }
}
