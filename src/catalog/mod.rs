//! Catalog of example medical conditions.
//!
//! [`CatalogStore`] owns the example list for the lifetime of the plugin. It is
//! loaded exactly once from the remote feed; any failure installs the built-in
//! fallback list instead, so the catalog is never empty once loading finishes.
//!
//! # Feed Shapes
//!
//! ```json
//! [ { "id": 1, "name": "...", ... } ]
//! { "diseases": [ ... ] }
//! { "medicalExamples": [ ... ] }
//! ```
//!
//! Any other document normalizes to an empty list, which is treated as a
//! failed load.

pub mod search;

pub use search::{filter, match_range};

use crate::domain::{MedicalExample, Result, SimplifierError};
use crate::service::ServiceRequest;
use serde_json::Value;

/// Where the current catalog contents came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    /// Entries parsed from the remote feed.
    Feed,
    /// The built-in fallback list.
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    NotStarted,
    Pending,
    Loaded(CatalogSource),
}

/// Load-once, read-many owner of the example catalog.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    examples: Vec<MedicalExample>,
    state: LoadState,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    /// Creates an empty, not yet loaded store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            examples: Vec::new(),
            state: LoadState::NotStarted,
        }
    }

    /// Starts the one and only catalog load.
    ///
    /// Returns the feed request on the first call and `None` afterwards.
    pub fn begin_load(&mut self, feed_url: &str) -> Option<ServiceRequest> {
        if self.state != LoadState::NotStarted {
            tracing::debug!(state = ?self.state, "catalog load already started");
            return None;
        }
        self.state = LoadState::Pending;
        Some(ServiceRequest::fetch_catalog(feed_url))
    }

    /// Finishes loading with the feed body, or with the failure that
    /// prevented fetching it.
    ///
    /// The new contents are fully built before being installed. On any
    /// failure (including an empty feed) the fallback list is installed and
    /// the error is returned for logging only. Calls after the catalog is
    /// loaded are ignored.
    ///
    /// # Errors
    ///
    /// Returns the reason the feed could not be used. The store is populated
    /// with the fallback list in that case.
    pub fn complete_load(&mut self, feed: Result<&[u8]>) -> Result<usize> {
        if let LoadState::Loaded(source) = self.state {
            tracing::debug!(source = ?source, "ignoring duplicate catalog load");
            return Ok(self.examples.len());
        }

        match feed.and_then(normalize_payload) {
            Ok(examples) => {
                let count = examples.len();
                self.examples = examples;
                self.state = LoadState::Loaded(CatalogSource::Feed);
                tracing::debug!(count, "catalog loaded from feed");
                Ok(count)
            }
            Err(e) => {
                self.examples = fallback_examples();
                self.state = LoadState::Loaded(CatalogSource::Fallback);
                tracing::warn!(error = %e, count = self.examples.len(), "catalog feed unusable, using fallback");
                Err(e)
            }
        }
    }

    /// Current catalog contents. Empty only before loading finishes.
    #[must_use]
    pub fn get(&self) -> &[MedicalExample] {
        &self.examples
    }

    /// Source of the current contents, once loaded.
    #[must_use]
    pub const fn source(&self) -> Option<CatalogSource> {
        match self.state {
            LoadState::Loaded(source) => Some(source),
            LoadState::NotStarted | LoadState::Pending => None,
        }
    }

    /// Whether loading has finished.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self.state, LoadState::Loaded(_))
    }
}

/// Normalizes a feed document into catalog entries.
///
/// # Errors
///
/// Returns an error if the body is not JSON or yields no entries.
pub fn normalize_payload(body: &[u8]) -> Result<Vec<MedicalExample>> {
    let document: Value = serde_json::from_slice(body)?;

    let items: &[Value] = match &document {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => map
            .get("diseases")
            .or_else(|| map.get("medicalExamples"))
            .and_then(Value::as_array)
            .map_or(&[][..], Vec::as_slice),
        _ => &[],
    };

    if items.is_empty() {
        return Err(SimplifierError::Catalog("feed contained no examples".to_string()));
    }

    Ok(items
        .iter()
        .enumerate()
        .map(|(idx, value)| MedicalExample::from_feed_value(value, idx + 1))
        .collect())
}

/// The built-in catalog used whenever the feed cannot be loaded.
#[must_use]
pub fn fallback_examples() -> Vec<MedicalExample> {
    vec![
        MedicalExample::new(
            "hypertension",
            1,
            "Hypertension",
            "Persistently elevated arterial blood pressure",
            "Pasien didiagnosis hipertensi dengan tekanan darah 160/100 mmHg dan diberikan terapi antihipertensi.",
            "Cardiovascular",
        ),
        MedicalExample::new(
            "diabetes-mellitus",
            2,
            "Diabetes Mellitus",
            "Chronic metabolic disorder marked by high blood glucose",
            "Pasien dengan diabetes mellitus tipe 2 mengalami hiperglikemia dan poliuria sejak dua minggu terakhir.",
            "Endocrine",
        ),
        MedicalExample::new(
            "febrile-seizure",
            3,
            "Febrile Seizure",
            "Convulsion in a young child triggered by fever",
            "Anak berusia dua tahun mengalami kejang demam setelah suhu tubuh mencapai 39 derajat Celsius.",
            "Neurology",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(store: &CatalogStore) -> Vec<String> {
        store
            .get()
            .iter()
            .map(|e| e.display_fields().name.into_owned())
            .collect()
    }

    #[test]
    fn begin_load_issues_exactly_one_request() {
        let mut store = CatalogStore::new();
        assert!(store.begin_load("http://svc/feed.json").is_some());
        assert!(store.begin_load("http://svc/feed.json").is_none());
        assert!(store.get().is_empty());
        assert!(!store.is_loaded());
    }

    #[test]
    fn bare_array_feed_is_used_directly() {
        let mut store = CatalogStore::new();
        let body: &[u8] = br#"[{"id":1,"name":"Anemia"},{"id":2,"term":"Asma"}]"#;

        assert_eq!(store.complete_load(Ok(body)).ok(), Some(2));
        assert_eq!(names(&store), vec!["Anemia", "Asma"]);
        assert_eq!(store.source(), Some(CatalogSource::Feed));
    }

    #[test]
    fn diseases_key_takes_precedence_over_medical_examples() {
        let body = br#"{"medicalExamples":[{"name":"B"}],"diseases":[{"name":"A"}]}"#;
        let examples = normalize_payload(body).expect("valid feed");
        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].display_fields().name, "A");

        let body = br#"{"medicalExamples":[{"name":"B"}]}"#;
        let examples = normalize_payload(body).expect("valid feed");
        assert_eq!(examples[0].display_fields().name, "B");
    }

    #[test]
    fn unreachable_feed_installs_three_entry_fallback() {
        let mut store = CatalogStore::new();
        let _request = store.begin_load("http://svc/feed.json");

        let failure = Err(SimplifierError::Service {
            status: 400,
            body: "connection refused".to_string(),
        });
        assert!(store.complete_load(failure).is_err());

        assert_eq!(store.get().len(), 3);
        assert_eq!(names(&store), vec!["Hypertension", "Diabetes Mellitus", "Febrile Seizure"]);
        assert_eq!(store.source(), Some(CatalogSource::Fallback));
    }

    #[test]
    fn malformed_or_empty_feeds_fall_back() {
        let bodies: [&[u8]; 5] = [b"not json", b"{}", b"[]", b"{\"diseases\":\"nope\"}", b"42"];
        for body in bodies {
            let mut store = CatalogStore::new();
            assert!(store.complete_load(Ok(body)).is_err(), "body {body:?}");
            assert_eq!(store.get().len(), 3);
        }
    }

    #[test]
    fn loaded_catalog_is_not_replaced() {
        let mut store = CatalogStore::new();
        let first: &[u8] = br#"[{"name":"Anemia"}]"#;
        let second: &[u8] = br#"[{"name":"Other"},{"name":"More"}]"#;
        store.complete_load(Ok(first)).expect("valid feed");
        let _ = store.complete_load(Ok(second));

        assert_eq!(names(&store), vec!["Anemia"]);
    }

    #[test]
    fn fallback_examples_are_fully_populated() {
        for example in fallback_examples() {
            assert!(example.name.is_some());
            assert!(example.description.is_some());
            assert!(example.example.is_some());
            assert!(example.category.is_some());
            assert!(crate::validation::validate(example.display_fields().example).is_valid);
        }
    }
}
