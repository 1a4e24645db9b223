//! Medical example domain model.
//!
//! A [`MedicalExample`] is one catalog entry: an example medical condition with
//! display metadata and a sample sentence the user can load into the editor.
//!
//! Feed entries are loosely shaped. Every display field has a synonym and a
//! placeholder, and [`MedicalExample::display_fields`] is the only place that
//! resolves them. Both the catalog listing and the search engine go through it,
//! so they always agree on what a field's effective value is.

use serde_json::Value;
use std::borrow::Cow;

/// Placeholder shown when neither `description` nor `definition` is present.
pub const DESCRIPTION_PLACEHOLDER: &str = "No description available";

/// Placeholder shown when an entry has no `example` text.
pub const EXAMPLE_PLACEHOLDER: &str = "No example text available";

/// Placeholder shown when neither `category` nor `type` is present.
pub const CATEGORY_PLACEHOLDER: &str = "General";

/// One example medical condition as delivered by the catalog feed.
///
/// Source fields are kept as they arrived (blank strings already dropped) so
/// that fallback resolution happens in exactly one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicalExample {
    /// Opaque identifier. Falls back to the 1-based feed position.
    pub id: String,
    /// 1-based position in the feed, used for generated names.
    pub position: usize,
    pub name: Option<String>,
    pub term: Option<String>,
    pub description: Option<String>,
    pub definition: Option<String>,
    pub example: Option<String>,
    pub category: Option<String>,
    pub kind: Option<String>,
}

/// Effective display values of a [`MedicalExample`] after fallback resolution.
///
/// Every field is guaranteed to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFields<'a> {
    pub name: Cow<'a, str>,
    pub description: &'a str,
    pub example: &'a str,
    pub category: &'a str,
}

impl MedicalExample {
    /// Builds a fully populated entry. Used for the built-in fallback list.
    #[must_use]
    pub fn new(
        id: &str,
        position: usize,
        name: &str,
        description: &str,
        example: &str,
        category: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            position,
            name: non_blank(name),
            term: None,
            description: non_blank(description),
            definition: None,
            example: non_blank(example),
            category: non_blank(category),
            kind: None,
        }
    }

    /// Reads an entry from one element of the feed array.
    ///
    /// Lenient by design of the feed: wrong-typed or blank fields are treated
    /// as absent, and non-object elements produce an entry made only of
    /// placeholders. `id` may be a string or a number.
    ///
    /// # Parameters
    ///
    /// * `value` - One element of the feed array
    /// * `position` - 1-based position of the element in the feed
    ///
    /// # Example
    ///
    /// ```
    /// use medsimplifier::domain::MedicalExample;
    ///
    /// let value = serde_json::json!({ "id": 7, "term": "Anemia", "type": "Blood" });
    /// let example = MedicalExample::from_feed_value(&value, 1);
    /// assert_eq!(example.id, "7");
    /// assert_eq!(example.display_fields().name, "Anemia");
    /// assert_eq!(example.display_fields().category, "Blood");
    /// ```
    #[must_use]
    pub fn from_feed_value(value: &Value, position: usize) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).and_then(non_blank);

        let id = match value.get("id") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            _ => position.to_string(),
        };

        Self {
            id,
            position,
            name: text("name"),
            term: text("term"),
            description: text("description"),
            definition: text("definition"),
            example: text("example"),
            category: text("category"),
            kind: text("type"),
        }
    }

    /// Resolves the effective display values through the fallback chains.
    ///
    /// - name: `name` → `term` → `"Entry N"`
    /// - description: `description` → `definition` → placeholder
    /// - example: `example` → placeholder
    /// - category: `category` → `type` → placeholder
    #[must_use]
    pub fn display_fields(&self) -> DisplayFields<'_> {
        let name = self
            .name
            .as_deref()
            .or(self.term.as_deref())
            .map_or_else(|| Cow::Owned(format!("Entry {}", self.position)), Cow::Borrowed);

        DisplayFields {
            name,
            description: self
                .description
                .as_deref()
                .or(self.definition.as_deref())
                .unwrap_or(DESCRIPTION_PLACEHOLDER),
            example: self.example.as_deref().unwrap_or(EXAMPLE_PLACEHOLDER),
            category: self
                .category
                .as_deref()
                .or(self.kind.as_deref())
                .unwrap_or(CATEGORY_PLACEHOLDER),
        }
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
