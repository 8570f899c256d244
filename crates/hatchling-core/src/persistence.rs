//! Persistence adapter for the pet snapshot.
//!
//! The pet is stored as a JSON envelope `{ "state": <snapshot>, "version": 0 }`
//! under a single key (default `pet-storage`) in a [`KeyValueStore`].
//! [`PetRepository`] handles the envelope, tolerates bare snapshots and
//! missing fields, and repairs out-of-range values on load. A snapshot that
//! cannot be read at all is replaced by a freshly hatched pet; losing a save
//! is never fatal.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use hatchling_pet::{PetRules, leveling, vitals::MS_PER_DAY};
use hatchling_types::{DEFAULT_PET_NAME, DEFAULT_SPECIES, PetState};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Envelope version written by this crate.
pub const SNAPSHOT_VERSION: u32 = 0;

/// Errors that can occur while reading or writing persisted data.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// Filesystem I/O failed.
    #[error("storage I/O failed: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The snapshot could not be encoded or decoded.
    #[error("snapshot JSON invalid: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// The key cannot be mapped to a file name.
    #[error("invalid storage key: {key:?}")]
    InvalidKey {
        /// The rejected key.
        key: String,
    },
}

// ---------------------------------------------------------------------------
// Key-value stores
// ---------------------------------------------------------------------------

/// A string-keyed store of string values.
pub trait KeyValueStore: Send {
    /// Read the value under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// Write `value` under `key`, replacing what was there.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError>;

    /// Delete `key`. Deleting a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), PersistError>;
}

/// Stores each key as `<directory>/<key>.json`.
///
/// Writes go to a temporary file that is then renamed over the target, so a
/// crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `directory`. The directory is created on the
    /// first write.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// The root directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, PersistError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(PersistError::InvalidKey {
                key: key.to_owned(),
            });
        }
        Ok(self.directory.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.directory)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        debug!(path = %path.display(), bytes = value.len(), "snapshot written");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests and ephemeral runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistError> {
        self.entries.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct Envelope<'a> {
    state: &'a PetState,
    version: u32,
}

/// Loads and saves the pet snapshot through a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct PetRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> PetRepository<S> {
    /// Create a repository storing the pet under `key`.
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Restore the saved pet, or hatch a new one if there is none or it is
    /// unreadable.
    ///
    /// Returns the pet and whether it was restored from storage.
    pub fn load_or_initialize(&self, rules: &PetRules, now: i64) -> (PetState, bool) {
        match self.load(rules, now) {
            Ok(Some(state)) => {
                info!(key = %self.key, name = %state.name, level = state.level, "pet restored");
                (state, true)
            }
            Ok(None) => {
                info!(key = %self.key, "no saved pet, hatching a new one");
                (PetState::hatch(None, None, now), false)
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "saved pet unreadable, hatching a new one");
                (PetState::hatch(None, None, now), false)
            }
        }
    }

    /// Read and repair the saved pet.
    ///
    /// Returns `Ok(None)` if nothing is stored under the key.
    pub fn load(&self, rules: &PetRules, now: i64) -> Result<Option<PetState>, PersistError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        let state = decode_snapshot(&raw)?;
        Ok(Some(sanitize(state, rules, now)))
    }

    /// Write the pet under the repository key.
    pub fn save(&mut self, state: &PetState) -> Result<(), PersistError> {
        let json = encode_snapshot(state)?;
        self.store.set(&self.key, &json)
    }
}

/// Encode a pet as a versioned envelope.
pub fn encode_snapshot(state: &PetState) -> Result<String, PersistError> {
    let envelope = Envelope {
        state,
        version: SNAPSHOT_VERSION,
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Decode a versioned envelope or a bare snapshot. Missing fields take
/// their initialization defaults.
pub fn decode_snapshot(raw: &str) -> Result<PetState, PersistError> {
    let mut value: serde_json::Value = serde_json::from_str(raw)?;
    let inner = value
        .as_object_mut()
        .filter(|obj| obj.get("state").is_some_and(serde_json::Value::is_object))
        .and_then(|obj| obj.remove("state"));
    let snapshot = inner.unwrap_or(value);
    Ok(serde_json::from_value(snapshot)?)
}

/// Bring a decoded snapshot back within the model's invariants.
///
/// - Vitals clamped to [0, 100], skills to [0, 100]
/// - Blank name or species replaced by the default
/// - Level at least 1; banked experience converted into levels
/// - Negative or non-finite sleep totals and age carry reset
/// - A missing or non-positive `lastUpdate` replaced by `now`
pub fn sanitize(mut state: PetState, rules: &PetRules, now: i64) -> PetState {
    state.vitals.clamp_all();
    state.skills.clamp_all();

    if state.name.trim().is_empty() {
        DEFAULT_PET_NAME.clone_into(&mut state.name);
    }
    if state.species.trim().is_empty() {
        DEFAULT_SPECIES.clone_into(&mut state.species);
    }

    if !state.total_sleep_minutes.is_finite() || state.total_sleep_minutes < 0.0 {
        state.total_sleep_minutes = 0.0;
    }
    state.age_carry_ms = state.age_carry_ms.clamp(0, MS_PER_DAY.saturating_sub(1));

    if state.last_update <= 0 {
        state.last_update = now;
    }

    if let Err(e) = leveling::apply_level_ups(&mut state, rules, now) {
        warn!(error = %e, "experience could not be normalized, resetting it");
        state.experience = 0;
    }

    state
}
