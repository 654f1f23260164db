//! Email → photos assignment bookkeeping.
//!
//! [`AssignmentLedger`] keeps, for every email address, the photos assigned
//! to it in the order they were assigned. Entries are only ever created by a
//! first assignment, so every email present has at least one photo.
//!
//! Observers registered with [`AssignmentLedger::add_observer`] are called
//! synchronously after each assignment with the email and its complete,
//! updated photo list.
//!
//! # Persistence format
//!
//! [`AssignmentLedger::serialize`] writes a JSON object whose keys are the
//! emails in insertion order, each mapping to an array of photo records.
//! [`AssignmentLedger::deserialize`] also reads the older tagged form
//! `{"dataType":"Map","value":[[email, [photo, ...]], ...]}`.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::CoreError;
use crate::photo::PhotoRecord;
use crate::store::KeyValueStore;

/// Store key the ledger is persisted under.
pub const STORAGE_KEY: &str = "assignedDogs";

/// Tag marking the legacy map envelope.
const LEGACY_MAP_TAG: &str = "Map";

/// Handle returned by [`AssignmentLedger::add_observer`], used to remove the
/// observer again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Box<dyn FnMut(&str, &[PhotoRecord]) + Send>;

#[derive(Default)]
pub struct AssignmentLedger {
    assignments: IndexMap<String, Vec<PhotoRecord>>,
    observers: Vec<(ObserverId, Observer)>,
    next_observer_id: u64,
}

impl std::fmt::Debug for AssignmentLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssignmentLedger")
            .field("assignments", &self.assignments)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl AssignmentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `photo` to the photos assigned to `email`, then notify every
    /// observer in registration order.
    ///
    /// Email syntax is not checked here.
    pub fn assign(&mut self, email: &str, photo: PhotoRecord) {
        let photos = self.assignments.entry(email.to_string()).or_default();
        photos.push(photo);

        tracing::debug!(email, count = photos.len(), "Photo assigned");

        for (_, observer) in &mut self.observers {
            observer(email, photos.as_slice());
        }
    }

    /// Register a callback run after every assignment.
    pub fn add_observer<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&str, &[PhotoRecord]) + Send + 'static,
    {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Unregister an observer. Unknown ids are ignored.
    pub fn remove_observer(&mut self, id: ObserverId) {
        self.observers.retain(|(existing, _)| *existing != id);
    }

    pub fn has_assignments(&self, email: &str) -> bool {
        self.assignments
            .get(email)
            .is_some_and(|photos| !photos.is_empty())
    }

    /// Every email with at least one assignment, in the order first assigned.
    pub fn list_emails(&self) -> Vec<&str> {
        self.assignments.keys().map(String::as_str).collect()
    }

    /// Photos assigned to `email`, oldest first. Empty if there are none.
    pub fn list_assignments(&self, email: &str) -> &[PhotoRecord] {
        self.assignments
            .get(email)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterate `(email, photos)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PhotoRecord])> {
        self.assignments
            .iter()
            .map(|(email, photos)| (email.as_str(), photos.as_slice()))
    }

    /// Number of emails with assignments.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn serialize(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(&self.assignments)?)
    }

    /// Replace the current assignments with those encoded in `input`.
    ///
    /// Returns `false`, leaving the ledger untouched, when `input` is blank
    /// or cannot be decoded. Emails with no photos in the input are skipped.
    /// Observers are not notified.
    pub fn deserialize(&mut self, input: &str) -> bool {
        if input.trim().is_empty() {
            return false;
        }

        let decoded = match serde_json::from_str::<PersistedLedger>(input) {
            Ok(PersistedLedger::Current(map)) => map,
            Ok(PersistedLedger::Legacy(envelope)) if envelope.data_type == LEGACY_MAP_TAG => {
                envelope
                    .value
                    .into_iter()
                    .map(|(email, photos)| {
                        (email, photos.into_iter().map(PhotoRecord::from).collect())
                    })
                    .collect()
            }
            Ok(PersistedLedger::Legacy(envelope)) => {
                tracing::warn!(
                    data_type = %envelope.data_type,
                    "Ignoring persisted assignments with unknown data type"
                );
                return false;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed persisted assignments");
                return false;
            }
        };

        self.assignments = decoded
            .into_iter()
            .filter(|(_, photos)| !photos.is_empty())
            .collect();
        true
    }

    /// Load from `store`. A missing or malformed entry leaves the ledger as
    /// it was and returns `Ok(false)`.
    pub fn read_from_store(&mut self, store: &dyn KeyValueStore) -> Result<bool, CoreError> {
        let Some(stored) = store.get(STORAGE_KEY)? else {
            tracing::debug!("No persisted assignments found");
            return Ok(false);
        };
        let loaded = self.deserialize(&stored);
        if loaded {
            tracing::info!(emails = self.len(), "Loaded persisted assignments");
        }
        Ok(loaded)
    }

    pub fn write_to_store(&self, store: &mut dyn KeyValueStore) -> Result<(), CoreError> {
        let encoded = self.serialize()?;
        store.set(STORAGE_KEY, &encoded)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Wire formats
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum PersistedLedger {
    Legacy(LegacyEnvelope),
    Current(IndexMap<String, Vec<PhotoRecord>>),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyEnvelope {
    data_type: String,
    value: Vec<(String, Vec<LegacyPhoto>)>,
}

/// Photo as written by the browser version of the app.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyPhoto {
    url: String,
    #[serde(default)]
    thumbnail_url: Option<String>,
    #[serde(default)]
    alt_text: Option<String>,
    #[serde(default)]
    creator_name: Option<String>,
    #[serde(default)]
    creator_url: Option<String>,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
}

impl From<LegacyPhoto> for PhotoRecord {
    fn from(legacy: LegacyPhoto) -> Self {
        let mut photo = PhotoRecord::new(
            legacy.url,
            legacy.alt_text.unwrap_or_default(),
            legacy.creator_name.unwrap_or_default(),
            legacy.creator_url.unwrap_or_default(),
        );
        if let Some(thumbnail) = legacy.thumbnail_url {
            photo = photo.with_thumbnail(thumbnail);
        }
        if let (Some(width), Some(height)) = (legacy.width, legacy.height) {
            photo = photo.with_dimensions(width, height);
        }
        photo
    }
}
