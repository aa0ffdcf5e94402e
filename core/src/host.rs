//! Seams to the browser host.
//!
//! Each trait mirrors one host API namespace. Implementations are expected to
//! be thin bridges; all policy lives in the callers.

use crate::error::HostError;
use crate::error::StorageError;
use async_trait::async_trait;
use folder_containers_protocol::BookmarkId;
use folder_containers_protocol::BookmarkNode;
use folder_containers_protocol::ContextualIdentity;
use folder_containers_protocol::CreateTab;
use folder_containers_protocol::MenuEntry;
use folder_containers_protocol::Tab;
use folder_containers_protocol::TabId;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Flat, schema-less key-value area (the host's extension-local storage).
#[async_trait]
pub trait StorageArea: Send + Sync {
    async fn get_all(&self) -> Result<BTreeMap<String, Value>, StorageError>;

    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;

    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[async_trait]
pub trait BookmarkTree: Send + Sync {
    /// `Ok(None)` when the node does not exist (anymore).
    async fn get(&self, id: &BookmarkId) -> Result<Option<BookmarkNode>, HostError>;

    /// Bookmarks whose stored URL equals `url`, in host search order.
    async fn search_by_url(&self, url: &str) -> Result<Vec<BookmarkNode>, HostError>;
}

#[async_trait]
pub trait TabHost: Send + Sync {
    async fn get(&self, id: TabId) -> Result<Tab, HostError>;

    async fn create(&self, params: CreateTab) -> Result<Tab, HostError>;

    async fn remove(&self, id: TabId) -> Result<(), HostError>;
}

#[async_trait]
pub trait ContextualIdentities: Send + Sync {
    async fn query(&self) -> Result<Vec<ContextualIdentity>, HostError>;
}

#[async_trait]
pub trait MenuHost: Send + Sync {
    async fn remove_all(&self) -> Result<(), HostError>;

    async fn create(&self, entry: MenuEntry) -> Result<(), HostError>;
}

/// Handles to every host collaborator the extension talks to.
#[derive(Clone)]
pub struct HostServices {
    pub storage: Arc<dyn StorageArea>,
    pub bookmarks: Arc<dyn BookmarkTree>,
    pub tabs: Arc<dyn TabHost>,
    pub identities: Arc<dyn ContextualIdentities>,
    pub menus: Arc<dyn MenuHost>,
}
