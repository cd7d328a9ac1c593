/*!
 * Tests for the persistent history store
 */

use anyhow::Result;
use std::fs;

use yatr::errors::ErrorKind;
use yatr::history::{HistoryEntry, HistoryStore};

use crate::common::{create_temp_dir, create_test_file, history_json};

fn entry(time: &str, provider: &str) -> HistoryEntry {
    HistoryEntry {
        time: time.to_string(),
        provider: provider.to_string(),
        original: "Good morning".to_string(),
        translated: "Günaydın".to_string(),
        rephrased: "Good morning to you".to_string(),
        direction: "English -> Turkish".to_string(),
    }
}

#[test]
fn test_open_withMissingFile_shouldStartEmptyAndCreateFile() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    let path = temp_dir.path().join("history.json");

    let store = HistoryStore::open(&path)?;

    assert!(store.is_empty());
    assert!(path.exists());
    Ok(())
}

#[test]
fn test_append_withEntries_shouldPersistNewestFirst() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    let path = temp_dir.path().join("history.json");
    let store = HistoryStore::open(&path)?;

    store.append(entry("2026-08-01 10:00:00", "DeepL"))?;
    store.append(entry("2026-08-03 10:00:00", "OpenAI"))?;
    store.append(entry("2026-08-02 10:00:00", "DeepSeek"))?;

    let entries = store.entries();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].provider, "OpenAI");
    assert_eq!(entries[1].provider, "DeepSeek");
    assert_eq!(entries[2].provider, "DeepL");

    // A reopened store sees the same persisted order
    drop(store);
    let reopened = HistoryStore::open(&path)?;
    assert_eq!(reopened.entries(), entries);
    Ok(())
}

#[test]
fn test_open_withRecordsMissingTime_shouldDiscardThem() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    let content = serde_json::json!({
        "history": [
            { "time": "2026-08-01 10:00:00", "provider": "DeepL" },
            { "provider": "OpenAI", "original": "orphan record" },
            { "time": "", "provider": "DeepSeek" },
        ]
    })
    .to_string();
    let path = create_test_file(temp_dir.path(), "history.json", &content)?;

    let store = HistoryStore::open(&path)?;

    assert_eq!(store.len(), 1);
    assert_eq!(store.entries()[0].provider, "DeepL");
    Ok(())
}

#[test]
fn test_open_withCorruptFile_shouldMoveItAsideAndStartFresh() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    let path = create_test_file(temp_dir.path(), "history.json", "{ not json at all")?;

    let store = HistoryStore::open(&path)?;

    assert!(store.is_empty());
    // The corrupt file was moved to a timestamped sibling
    let siblings: Vec<_> = fs::read_dir(temp_dir.path())?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|name| name.starts_with("history_corrupt_"))
        .collect();
    assert_eq!(siblings.len(), 1);
    Ok(())
}

#[test]
fn test_open_withWrongRootMarker_shouldTreatFileAsCorrupt() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    let content = serde_json::json!({ "items": [] }).to_string();
    let path = create_test_file(temp_dir.path(), "history.json", &content)?;

    let store = HistoryStore::open(&path)?;

    assert!(store.is_empty());
    Ok(())
}

#[test]
fn test_mergeFrom_withOverlappingTimes_shouldDedupeByTime() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    let path = temp_dir.path().join("history.json");
    let store = HistoryStore::open(&path)?;
    store.append(entry("2026-08-01 10:00:00", "DeepL"))?;
    store.append(entry("2026-08-02 10:00:00", "DeepL"))?;

    let external = create_test_file(
        temp_dir.path(),
        "other.json",
        &history_json(&[
            (
                "2026-08-01 10:00:00",
                "OpenAI",
                "dupe",
                "dupe",
                "dupe",
                "English -> Turkish",
            ),
            (
                "2026-08-03 10:00:00",
                "OpenAI",
                "fresh",
                "fresh",
                "fresh",
                "English -> Turkish",
            ),
        ]),
    )?;

    let merged = store.merge_from(&external)?;

    assert_eq!(merged, 1);
    let entries = store.entries();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].time, "2026-08-03 10:00:00");
    // The existing record for the duplicated time wins
    assert_eq!(entries[2].provider, "DeepL");
    Ok(())
}

#[test]
fn test_mergeFrom_appliedTwice_shouldBeIdempotent() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    let store = HistoryStore::open(temp_dir.path().join("history.json"))?;

    let external = create_test_file(
        temp_dir.path(),
        "other.json",
        &history_json(&[(
            "2026-08-03 10:00:00",
            "OpenAI",
            "o",
            "t",
            "r",
            "English -> Turkish",
        )]),
    )?;

    assert_eq!(store.merge_from(&external)?, 1);
    assert_eq!(store.merge_from(&external)?, 0);
    assert_eq!(store.len(), 1);
    Ok(())
}

#[test]
fn test_mergeFrom_withWrongRootMarker_shouldRejectWholeMerge() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    let store = HistoryStore::open(temp_dir.path().join("history.json"))?;
    store.append(entry("2026-08-01 10:00:00", "DeepL"))?;

    let external = create_test_file(
        temp_dir.path(),
        "other.json",
        &serde_json::json!({ "records": [] }).to_string(),
    )?;

    let error = store.merge_from(&external).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::FileCorrupt);
    assert_eq!(store.len(), 1);
    Ok(())
}

#[test]
fn test_mergeFrom_withMissingFile_shouldFail() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    let store = HistoryStore::open(temp_dir.path().join("history.json"))?;

    assert!(store.merge_from(temp_dir.path().join("nope.json")).is_err());
    Ok(())
}

#[test]
fn test_backupAndClear_withEntries_shouldMoveFileAndEmptyStore() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    let path = temp_dir.path().join("history.json");
    let store = HistoryStore::open(&path)?;
    store.append(entry("2026-08-01 10:00:00", "DeepL"))?;

    let backup = store.backup_and_clear()?;

    let backup = backup.expect("a backup path");
    assert!(backup.exists());
    assert!(
        backup
            .file_name()
            .map(|n| n.to_string_lossy().starts_with("history_"))
            .unwrap_or(false)
    );
    assert!(store.is_empty());

    // The original path holds a fresh empty file
    let reopened = HistoryStore::open(&path)?;
    assert!(reopened.is_empty());
    Ok(())
}

#[test]
fn test_persistedFile_shouldCarryHistoryRootKey() -> Result<()> {
    let temp_dir = create_temp_dir()?;
    let path = temp_dir.path().join("history.json");
    let store = HistoryStore::open(&path)?;
    store.append(entry("2026-08-01 10:00:00", "DeepL"))?;

    let content = fs::read_to_string(&path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    assert!(value.get("history").is_some());
    assert_eq!(value["history"].as_array().map(|a| a.len()), Some(1));
    Ok(())
}
