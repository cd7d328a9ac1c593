use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

// @module: File helpers shared by config and history persistence

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Parent directory if needed
    pub fn ensure_parent_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file, creating the parent directory if needed
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        Self::ensure_parent_dir(&path)?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Build a timestamped sibling path for a file.
    ///
    /// `history.json` with suffix `""` becomes `history_20250101_120000.json`;
    /// a non-empty suffix is inserted before the timestamp
    /// (`history_corrupt_20250101_120000.json`). Used for both backups and
    /// corrupt-file recovery so the original path can be rewritten fresh.
    pub fn timestamped_sibling<P: AsRef<Path>>(path: P, suffix: &str) -> PathBuf {
        let path = path.as_ref();
        let stem = path
            .file_stem()
            .map_or_else(|| "file".to_string(), |s| s.to_string_lossy().to_string());
        let ext = path
            .extension()
            .map_or_else(String::new, |e| format!(".{}", e.to_string_lossy()));
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");

        let file_name = if suffix.is_empty() {
            format!("{}_{}{}", stem, timestamp, ext)
        } else {
            format!("{}_{}_{}{}", stem, suffix, timestamp, ext)
        };

        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(file_name),
            _ => PathBuf::from(file_name),
        }
    }

    /// Move a file to a timestamped sibling path and return that path.
    pub fn move_aside<P: AsRef<Path>>(path: P, suffix: &str) -> Result<PathBuf> {
        let path = path.as_ref();
        let target = Self::timestamped_sibling(path, suffix);
        fs::rename(path, &target)
            .with_context(|| format!("Failed to move {:?} to {:?}", path, target))?;
        Ok(target)
    }
}
