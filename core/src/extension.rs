use crate::config::ExtensionConfig;
use crate::error::Result;
use crate::host::HostServices;
use crate::interceptor::NavigationInterceptor;
use crate::interceptor::NavigationOutcome;
use crate::menu::ContextMenuBuilder;
use crate::menu::MenuClickHandler;
use crate::menu::MenuClickOutcome;
use crate::menu::RebuildOutcome;
use crate::resolver::AncestorResolver;
use crate::storage::JsonFileStorage;
use crate::store::MappingStore;
use folder_containers_protocol::HostEvent;
use std::sync::Arc;
use tracing::debug;
use tracing::info;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Menu(RebuildOutcome),
    MenuClick(MenuClickOutcome),
    Navigation(NavigationOutcome),
}

/// Wires the components together and routes host events to them.
///
/// Each call to [`FolderContainers::handle`] is independent: failures are
/// logged and returned, never retried or remembered.
pub struct FolderContainers {
    store: MappingStore,
    resolver: AncestorResolver,
    interceptor: NavigationInterceptor,
    clicks: MenuClickHandler,
    menu: ContextMenuBuilder,
}

impl FolderContainers {
    pub fn new(host: HostServices, config: &ExtensionConfig) -> Result<Self> {
        config.validate()?;

        let store = MappingStore::new(host.storage);
        let resolver =
            AncestorResolver::with_max_depth(host.bookmarks.clone(), config.max_ancestor_depth);
        let interceptor =
            NavigationInterceptor::new(host.bookmarks, host.tabs, store.clone(), resolver.clone());
        let clicks = MenuClickHandler::new(store.clone());
        let menu = ContextMenuBuilder::new(host.menus, host.identities, config.menu.clone());

        Ok(Self {
            store,
            resolver,
            interceptor,
            clicks,
            menu,
        })
    }

    /// Like [`Self::new`], but swaps in a JSON-file storage area when the
    /// config names a `storage_path`.
    pub async fn open(mut host: HostServices, config: &ExtensionConfig) -> Result<Self> {
        if let Some(path) = config.storage_path.as_ref() {
            let storage = JsonFileStorage::open(path).await?;
            info!(path = %path.display(), "Using file-backed mapping storage");
            host.storage = Arc::new(storage);
        }
        Self::new(host, config)
    }

    /// Initial menu build, done once when the background context loads.
    pub async fn start(&self) -> RebuildOutcome {
        self.menu.request_rebuild().await
    }

    pub async fn handle(&self, event: HostEvent) -> Result<EventOutcome> {
        let kind = event.kind();
        debug!(event = kind, "Dispatching host event");

        let result: Result<EventOutcome> = match event {
            HostEvent::Installed | HostEvent::Startup => {
                Ok(EventOutcome::Menu(self.menu.request_rebuild().await))
            }
            HostEvent::MenuClicked(click) => self
                .clicks
                .on_clicked(&click)
                .await
                .map(EventOutcome::MenuClick)
                .map_err(Into::into),
            HostEvent::NavigationCommitted(details) => self
                .interceptor
                .on_committed(&details)
                .await
                .map(EventOutcome::Navigation)
                .map_err(Into::into),
        };

        if let Err(err) = &result {
            warn!(event = kind, error = %err, "Host event handler failed");
        }
        result
    }

    pub fn store(&self) -> &MappingStore {
        &self.store
    }

    pub fn resolver(&self) -> &AncestorResolver {
        &self.resolver
    }
}
