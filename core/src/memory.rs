//! In-process host implementation. Backs the test suites and embedders that
//! drive the extension logic without a real browser.

use crate::error::HostError;
use crate::host::BookmarkTree;
use crate::host::ContextualIdentities;
use crate::host::HostServices;
use crate::host::MenuHost;
use crate::host::TabHost;
use crate::storage::MemoryStorage;
use async_trait::async_trait;
use folder_containers_protocol::BookmarkId;
use folder_containers_protocol::BookmarkNode;
use folder_containers_protocol::ContainerId;
use folder_containers_protocol::ContextualIdentity;
use folder_containers_protocol::CreateTab;
use folder_containers_protocol::MenuEntry;
use folder_containers_protocol::Tab;
use folder_containers_protocol::TabId;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use tokio::sync::Mutex;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryBookmarks {
    nodes: RwLock<Vec<BookmarkNode>>,
}

impl MemoryBookmarks {
    pub async fn insert(&self, node: BookmarkNode) {
        let mut nodes = self.nodes.write().await;
        nodes.retain(|existing| existing.id != node.id);
        nodes.push(node);
    }

    pub async fn remove(&self, id: &BookmarkId) {
        self.nodes.write().await.retain(|node| &node.id != id);
    }
}

#[async_trait]
impl BookmarkTree for MemoryBookmarks {
    async fn get(&self, id: &BookmarkId) -> Result<Option<BookmarkNode>, HostError> {
        Ok(self
            .nodes
            .read()
            .await
            .iter()
            .find(|node| &node.id == id)
            .cloned())
    }

    async fn search_by_url(&self, url: &str) -> Result<Vec<BookmarkNode>, HostError> {
        Ok(self
            .nodes
            .read()
            .await
            .iter()
            .filter(|node| node.url.as_deref() == Some(url))
            .cloned()
            .collect())
    }
}

#[derive(Debug, Default)]
struct TabStrip {
    tabs: Vec<Tab>,
    next_id: i64,
    created: Vec<CreateTab>,
    removed: Vec<TabId>,
}

impl TabStrip {
    fn reindex(&mut self) {
        for (index, tab) in self.tabs.iter_mut().enumerate() {
            tab.index = index;
        }
    }
}

/// A single window's tab strip.
#[derive(Debug, Default)]
pub struct MemoryTabs {
    strip: Mutex<TabStrip>,
    fail_create: AtomicBool,
    fail_remove: AtomicBool,
}

impl MemoryTabs {
    /// Appends a tab showing `url` in `container` and returns its id.
    pub async fn open(&self, url: &str, container: ContainerId) -> TabId {
        let mut strip = self.strip.lock().await;
        strip.next_id += 1;
        let id = TabId::new(strip.next_id);
        let index = strip.tabs.len();
        strip.tabs.push(Tab {
            id,
            index,
            cookie_store_id: container,
            url: Some(url.to_string()),
            active: false,
        });
        id
    }

    pub async fn tabs(&self) -> Vec<Tab> {
        self.strip.lock().await.tabs.clone()
    }

    /// Every successful `create` call, in order.
    pub async fn created(&self) -> Vec<CreateTab> {
        self.strip.lock().await.created.clone()
    }

    /// Every successful `remove` call, in order.
    pub async fn removed(&self) -> Vec<TabId> {
        self.strip.lock().await.removed.clone()
    }

    pub fn fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn fail_remove(&self, fail: bool) {
        self.fail_remove.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl TabHost for MemoryTabs {
    async fn get(&self, id: TabId) -> Result<Tab, HostError> {
        self.strip
            .lock()
            .await
            .tabs
            .iter()
            .find(|tab| tab.id == id)
            .cloned()
            .ok_or(HostError::TabNotFound(id))
    }

    async fn create(&self, params: CreateTab) -> Result<Tab, HostError> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(HostError::operation("tabs.create", "tab creation refused"));
        }
        let mut strip = self.strip.lock().await;
        strip.next_id += 1;
        let tab = Tab {
            id: TabId::new(strip.next_id),
            index: params.index.min(strip.tabs.len()),
            cookie_store_id: params.cookie_store_id.clone(),
            url: Some(params.url.clone()),
            active: params.active,
        };
        if tab.active {
            for other in &mut strip.tabs {
                other.active = false;
            }
        }
        strip.tabs.insert(tab.index, tab.clone());
        strip.reindex();
        strip.created.push(params);
        Ok(tab)
    }

    async fn remove(&self, id: TabId) -> Result<(), HostError> {
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(HostError::operation("tabs.remove", "tab removal refused"));
        }
        let mut strip = self.strip.lock().await;
        let Some(position) = strip.tabs.iter().position(|tab| tab.id == id) else {
            return Err(HostError::TabNotFound(id));
        };
        strip.tabs.remove(position);
        strip.reindex();
        strip.removed.push(id);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryIdentities {
    identities: RwLock<Vec<ContextualIdentity>>,
}

impl MemoryIdentities {
    pub fn new(identities: Vec<ContextualIdentity>) -> Self {
        Self {
            identities: RwLock::new(identities),
        }
    }

    pub async fn replace(&self, identities: Vec<ContextualIdentity>) {
        *self.identities.write().await = identities;
    }
}

#[async_trait]
impl ContextualIdentities for MemoryIdentities {
    async fn query(&self) -> Result<Vec<ContextualIdentity>, HostError> {
        Ok(self.identities.read().await.clone())
    }
}

#[derive(Debug, Default)]
pub struct MemoryMenus {
    entries: Mutex<Vec<MenuEntry>>,
}

impl MemoryMenus {
    pub async fn entries(&self) -> Vec<MenuEntry> {
        self.entries.lock().await.clone()
    }
}

#[async_trait]
impl MenuHost for MemoryMenus {
    async fn remove_all(&self) -> Result<(), HostError> {
        self.entries.lock().await.clear();
        Ok(())
    }

    async fn create(&self, entry: MenuEntry) -> Result<(), HostError> {
        let mut entries = self.entries.lock().await;
        if let Some(id) = entry.id.as_deref() {
            if entries.iter().any(|existing| existing.id.as_deref() == Some(id)) {
                return Err(HostError::DuplicateMenuId(id.to_string()));
            }
        }
        entries.push(entry);
        Ok(())
    }
}

/// Every collaborator, in memory, with concrete handles kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    pub storage: Arc<MemoryStorage>,
    pub bookmarks: Arc<MemoryBookmarks>,
    pub tabs: Arc<MemoryTabs>,
    pub identities: Arc<MemoryIdentities>,
    pub menus: Arc<MemoryMenus>,
}

impl MemoryHost {
    pub fn services(&self) -> HostServices {
        HostServices {
            storage: self.storage.clone(),
            bookmarks: self.bookmarks.clone(),
            tabs: self.tabs.clone(),
            identities: self.identities.clone(),
            menus: self.menus.clone(),
        }
    }
}
