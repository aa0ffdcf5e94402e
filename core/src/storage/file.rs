use crate::error::StorageError;
use crate::host::StorageArea;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::PoisonError;
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::debug;

/// Storage area persisted as a single JSON object on disk.
///
/// Every write replaces the file through a temp file in the same directory,
/// so readers never observe a partially written map. The in-memory map is
/// updated before the write starts, so a caller that stops waiting cannot
/// leave it behind the file.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    entries: Mutex<Entries>,
    /// Version of the map last written to disk. Writers that finish out of
    /// order skip older versions.
    written: Arc<std::sync::Mutex<u64>>,
}

#[derive(Debug, Default)]
struct Entries {
    map: BTreeMap<String, Value>,
    version: u64,
}

impl JsonFileStorage {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let map: BTreeMap<String, Value> = match tokio::fs::read_to_string(&path).await {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|err| StorageError::json("failed to parse storage file", err))?,
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(StorageError::io("failed to read storage file", err)),
        };
        debug!(path = %path.display(), entries = map.len(), "Opened storage file");
        Ok(Self {
            path,
            entries: Mutex::new(Entries { map, version: 0 }),
            written: Arc::new(std::sync::Mutex::new(0)),
        })
    }

    async fn persist(&self, entries: &Entries) -> Result<(), StorageError> {
        let serialized = serde_json::to_vec_pretty(&entries.map)
            .map_err(|err| StorageError::json("failed to serialize storage", err))?;
        let path = self.path.clone();
        let written = Arc::clone(&self.written);
        let version = entries.version;
        tokio::task::spawn_blocking(move || {
            let mut written = written.lock().unwrap_or_else(PoisonError::into_inner);
            if *written >= version {
                return Ok(());
            }
            write_atomically(&path, &serialized)?;
            *written = version;
            Ok(())
        })
        .await
        .map_err(|err| StorageError::Unavailable(format!("storage writer panicked: {err}")))?
    }
}

fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), StorageError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)
        .map_err(|err| StorageError::io("failed to create storage directory", err))?;
    let mut tmp_file = NamedTempFile::new_in(&dir)
        .map_err(|err| StorageError::io("failed to create temp storage file", err))?;
    tmp_file
        .write_all(contents)
        .map_err(|err| StorageError::io("failed to write temp storage file", err))?;
    tmp_file
        .persist(path)
        .map_err(|err| StorageError::io("failed to replace storage file", err.error))?;
    Ok(())
}

/// Puts `previous` back under `key` after a failed write.
fn restore(map: &mut BTreeMap<String, Value>, key: &str, previous: Option<Value>) {
    match previous {
        Some(value) => {
            map.insert(key.to_string(), value);
        }
        None => {
            map.remove(key);
        }
    }
}

#[async_trait]
impl StorageArea for JsonFileStorage {
    async fn get_all(&self) -> Result<BTreeMap<String, Value>, StorageError> {
        Ok(self.entries.lock().await.map.clone())
    }

    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.entries.lock().await.map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().await;
        let previous = entries.map.insert(key.to_string(), value);
        entries.version += 1;
        if let Err(err) = self.persist(&entries).await {
            restore(&mut entries.map, key, previous);
            return Err(err);
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().await;
        let Some(previous) = entries.map.remove(key) else {
            return Ok(());
        };
        entries.version += 1;
        if let Err(err) = self.persist(&entries).await {
            restore(&mut entries.map, key, Some(previous));
            return Err(err);
        }
        Ok(())
    }
}
