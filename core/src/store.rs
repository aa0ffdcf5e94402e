use crate::error::StorageError;
use crate::host::StorageArea;
use folder_containers_protocol::BookmarkId;
use folder_containers_protocol::ContainerId;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use tracing::info;

/// Point-in-time copy of every bookmark → container mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingSnapshot {
    entries: HashMap<BookmarkId, ContainerId>,
}

impl MappingSnapshot {
    pub fn get(&self, id: &BookmarkId) -> Option<&ContainerId> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(BookmarkId, ContainerId)> for MappingSnapshot {
    fn from_iter<I: IntoIterator<Item = (BookmarkId, ContainerId)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Typed view over the storage area: keys are bookmark ids, values are
/// cookie store ids.
#[derive(Clone)]
pub struct MappingStore {
    storage: Arc<dyn StorageArea>,
}

impl MappingStore {
    pub fn new(storage: Arc<dyn StorageArea>) -> Self {
        Self { storage }
    }

    pub async fn get(&self, id: &BookmarkId) -> Result<Option<ContainerId>, StorageError> {
        let value = self.storage.get(id.as_str()).await?;
        Ok(value.and_then(|value| container_from_value(id.as_str(), value)))
    }

    pub async fn set(&self, id: &BookmarkId, container: &ContainerId) -> Result<(), StorageError> {
        self.storage
            .set(id.as_str(), Value::String(container.as_str().to_string()))
            .await?;
        info!(bookmark_id = %id, container = %container, "Mapped bookmark to container");
        Ok(())
    }

    pub async fn remove(&self, id: &BookmarkId) -> Result<(), StorageError> {
        self.storage.remove(id.as_str()).await?;
        info!(bookmark_id = %id, "Removed container mapping");
        Ok(())
    }

    pub async fn snapshot(&self) -> Result<MappingSnapshot, StorageError> {
        let raw = self.storage.get_all().await?;
        Ok(raw
            .into_iter()
            .filter_map(|(key, value)| {
                let container = container_from_value(&key, value)?;
                Some((BookmarkId::new(key), container))
            })
            .collect())
    }
}

fn container_from_value(key: &str, value: Value) -> Option<ContainerId> {
    match value {
        Value::String(raw) => match ContainerId::new(raw) {
            Ok(container) => Some(container),
            Err(err) => {
                debug!(key, error = %err, "Ignoring empty mapping value");
                None
            }
        },
        other => {
            debug!(key, value = %other, "Ignoring non-string mapping value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use pretty_assertions::assert_eq;

    fn container(id: &str) -> ContainerId {
        ContainerId::new(id).expect("valid container id")
    }

    #[tokio::test]
    async fn set_get_remove_single_key() {
        let store = MappingStore::new(Arc::new(MemoryStorage::default()));
        let b1 = BookmarkId::new("b1");

        assert_eq!(store.get(&b1).await.expect("get"), None);

        store.set(&b1, &container("firefox-container-1")).await.expect("set");
        assert_eq!(
            store.get(&b1).await.expect("get"),
            Some(container("firefox-container-1"))
        );

        store.set(&b1, &container("firefox-container-2")).await.expect("overwrite");
        assert_eq!(
            store.get(&b1).await.expect("get"),
            Some(container("firefox-container-2"))
        );

        store.remove(&b1).await.expect("remove");
        assert_eq!(store.get(&b1).await.expect("get"), None);
    }

    #[tokio::test]
    async fn snapshot_skips_values_that_are_not_container_ids() {
        let storage = Arc::new(MemoryStorage::default());
        storage
            .set("f1", Value::String("firefox-container-1".to_string()))
            .await
            .expect("seed");
        storage
            .set("empty", Value::String(String::new()))
            .await
            .expect("seed");
        storage
            .set("unrelated", serde_json::json!({ "version": 2 }))
            .await
            .expect("seed");
        let store = MappingStore::new(storage);

        let snapshot = store.snapshot().await.expect("snapshot");

        assert_eq!(snapshot.len(), 1);
        assert_eq!(
            snapshot.get(&BookmarkId::new("f1")),
            Some(&container("firefox-container-1"))
        );
        assert_eq!(snapshot.get(&BookmarkId::new("empty")), None);
        assert_eq!(store.get(&BookmarkId::new("unrelated")).await.expect("get"), None);
    }
}
