//! JSON file I/O with atomic replacement
//!
//! Collections are rewritten as a whole on every save; writing to a sibling
//! temp file and renaming it over the target keeps a crash from leaving a
//! half-written collection behind.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::TourdeskError;

fn persistence_err(action: &str, path: &Path, err: impl std::fmt::Display) -> TourdeskError {
    TourdeskError::Persistence(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// Read JSON from a file, returning `T::default()` if the file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, TourdeskError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(T::default());
    }
    read_json_required(path)
}

/// Read JSON from a file that must exist
pub fn read_json_required<T, P>(path: P) -> Result<T, TourdeskError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| persistence_err("open", path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| persistence_err("parse", path, e))
}

/// Write JSON to `path` atomically
///
/// The data is written and synced to `<file name>.tmp` next to the target,
/// then renamed over it. On failure the target is left untouched.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), TourdeskError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| persistence_err("create directory", parent, e))?;
    }

    let temp_path = temp_path_for(path);
    let result = write_synced(&temp_path, data).and_then(|()| {
        fs::rename(&temp_path, path).map_err(|e| persistence_err("replace", path, e))
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_synced<T: Serialize>(path: &Path, data: &T) -> Result<(), TourdeskError> {
    let file = File::create(path).map_err(|e| persistence_err("create", path, e))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| persistence_err("serialize", path, e))?;
    writer.flush().map_err(|e| persistence_err("flush", path, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| persistence_err("sync", path, e))
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("data"));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct TestData {
        name: String,
        value: i32,
    }

    fn sample() -> TestData {
        TestData {
            name: "wallets".to_string(),
            value: 42,
        }
    }

    #[test]
    fn test_read_nonexistent_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let data: TestData = read_json(temp_dir.path().join("missing.json")).unwrap();
        assert_eq!(data, TestData::default());
    }

    #[test]
    fn test_read_required_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_json_required::<TestData, _>(temp_dir.path().join("missing.json"))
            .unwrap_err();
        assert!(err.is_persistence());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("test.json");

        write_json_atomic(&path, &sample()).unwrap();

        let loaded: TestData = read_json(&path).unwrap();
        assert_eq!(loaded, sample());
        assert!(!temp_dir.path().join("nested").join("test.json.tmp").exists());
    }

    #[test]
    fn test_failed_replace_cleans_up_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blocked.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let err = write_json_atomic(&path, &sample()).unwrap_err();
        assert!(err.is_persistence());
        assert!(!temp_dir.path().join("blocked.json.tmp").exists());
        assert!(path.join("keep").exists());
    }

    #[test]
    fn test_parse_error_is_persistence_failure() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, "not json").unwrap();

        let err = read_json::<TestData, _>(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
