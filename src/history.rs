use chrono::NaiveDateTime;
use log::{error, info, warn};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::errors::EngineError;
use crate::file_utils::FileManager;

// @module: Append/merge/dedupe history log with full-rewrite persistence

/// Timestamp format for history entries, second precision.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One persisted record of a completed action.
///
/// `time` is the identity key within a store: the engine never produces
/// two entries in the same second, but merges from external files must
/// still defend against collisions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    /// Timestamp in `TIME_FORMAT`
    #[serde(default)]
    pub time: String,
    /// Provider display name, possibly tagged (e.g. "DeepL (Rephrase)")
    #[serde(default)]
    pub provider: String,
    /// The original input text
    #[serde(default)]
    pub original: String,
    /// The translated text
    #[serde(default)]
    pub translated: String,
    /// The rephrased text or a placeholder
    #[serde(default)]
    pub rephrased: String,
    /// Direction string, "SOURCE -> TARGET"
    #[serde(default)]
    pub direction: String,
}

impl HistoryEntry {
    /// Build an entry stamped with the current local time.
    pub fn now(
        provider: impl Into<String>,
        original: impl Into<String>,
        translated: impl Into<String>,
        rephrased: impl Into<String>,
        direction: impl Into<String>,
    ) -> Self {
        Self {
            time: chrono::Local::now().format(TIME_FORMAT).to_string(),
            provider: provider.into(),
            original: original.into(),
            translated: translated.into(),
            rephrased: rephrased.into(),
            direction: direction.into(),
        }
    }

    /// Parse the timestamp, falling back to the epoch for malformed times
    /// so sorting never fails.
    fn sort_key(&self) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&self.time, TIME_FORMAT)
            .unwrap_or(NaiveDateTime::UNIX_EPOCH)
    }
}

/// Root container for the persisted file.
///
/// The `history` key is the file's marker: a JSON document without it is
/// rejected as corrupt in full, never partially loaded.
#[derive(Debug, Serialize, Deserialize)]
struct HistoryFile {
    history: Vec<HistoryEntry>,
}

/// In-memory history with full-rewrite JSON persistence.
///
/// The collection is kept sorted by time descending after every mutation.
/// One mutex per store serializes the read-modify-write of the backing
/// file across concurrent callers.
pub struct HistoryStore {
    /// Backing file path
    path: PathBuf,
    /// Entries, newest first; the lock also guards file access
    entries: Mutex<Vec<HistoryEntry>>,
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("path", &self.path)
            .field("entries", &self.entries.lock().len())
            .finish()
    }
}

/// Parse a history document, discarding records without a usable time.
fn parse_history(content: &str, origin: &Path) -> Result<Vec<HistoryEntry>, EngineError> {
    let file: HistoryFile = serde_json::from_str(content).map_err(|e| {
        EngineError::FileCorrupt(format!("invalid history file {:?}: {}", origin, e))
    })?;

    let total = file.history.len();
    let entries: Vec<HistoryEntry> = file
        .history
        .into_iter()
        .filter(|entry| !entry.time.trim().is_empty())
        .collect();
    if entries.len() < total {
        warn!(
            "Discarded {} history record(s) without a timestamp from {:?}",
            total - entries.len(),
            origin
        );
    }
    Ok(entries)
}

impl HistoryStore {
    /// Open a store, loading the backing file if it exists.
    ///
    /// A corrupt backing file is moved aside to a timestamped sibling and
    /// replaced with a fresh empty one; the store always opens.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let path = path.as_ref().to_path_buf();

        let entries = if FileManager::file_exists(&path) {
            let content = FileManager::read_to_string(&path)
                .map_err(|e| EngineError::File(e.to_string()))?;
            match parse_history(&content, &path) {
                Ok(mut entries) => {
                    entries.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
                    entries
                }
                Err(e) => {
                    error!("{}", e);
                    let aside = FileManager::move_aside(&path, "corrupt")
                        .map_err(|e| EngineError::File(e.to_string()))?;
                    warn!("Corrupt history moved to {:?}; starting fresh", aside);
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        let store = Self {
            path,
            entries: Mutex::new(entries),
        };
        store.persist(&store.entries.lock())?;
        Ok(store)
    }

    /// Append one entry and rewrite the backing file.
    pub fn append(&self, entry: HistoryEntry) -> Result<(), EngineError> {
        let mut entries = self.entries.lock();
        entries.push(entry);
        entries.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
        self.persist(&entries)
    }

    /// Merge entries from an external history file.
    ///
    /// The external file must carry the expected root marker; otherwise
    /// the whole merge is rejected with a parse error. Records whose
    /// timestamp already exists in the store are dropped, so importing
    /// the same file twice is a no-op. Returns how many entries were
    /// actually merged.
    pub fn merge_from<P: AsRef<Path>>(&self, path: P) -> Result<usize, EngineError> {
        let path = path.as_ref();
        if !FileManager::file_exists(path) {
            return Err(EngineError::File(format!("history file not found: {:?}", path)));
        }

        let content =
            FileManager::read_to_string(path).map_err(|e| EngineError::File(e.to_string()))?;
        let imported = parse_history(&content, path)?;

        let mut entries = self.entries.lock();
        let existing_times: HashSet<String> =
            entries.iter().map(|entry| entry.time.clone()).collect();

        let fresh: Vec<HistoryEntry> = imported
            .into_iter()
            .filter(|entry| !existing_times.contains(&entry.time))
            .collect();
        let merged = fresh.len();

        if merged > 0 {
            entries.extend(fresh);
            entries.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
            self.persist(&entries)?;
        }

        info!("Merged {} entries from {:?}", merged, path);
        Ok(merged)
    }

    /// Back up the current file to a timestamped sibling and clear the
    /// store, on disk and in memory.
    ///
    /// Returns the backup path, or `None` when there was no file to move.
    pub fn backup_and_clear(&self) -> Result<Option<PathBuf>, EngineError> {
        let mut entries = self.entries.lock();

        let backup = if FileManager::file_exists(&self.path) {
            let backup = FileManager::move_aside(&self.path, "")
                .map_err(|e| EngineError::File(e.to_string()))?;
            info!("History backed up to {:?}", backup);
            Some(backup)
        } else {
            None
        };

        entries.clear();
        self.persist(&entries)?;
        Ok(backup)
    }

    /// Snapshot of the entries, newest first.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.lock().clone()
    }

    /// Number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the full collection to the backing file. Callers hold the
    /// entry lock, which is what serializes file access.
    fn persist(&self, entries: &[HistoryEntry]) -> Result<(), EngineError> {
        let file = HistoryFile {
            history: entries.to_vec(),
        };
        let content = serde_json::to_string_pretty(&file)
            .map_err(|e| EngineError::Unknown(e.to_string()))?;
        FileManager::write_to_file(&self.path, &content)
            .map_err(|e| EngineError::File(e.to_string()))
    }
}
