use crate::error::HostError;
use crate::host::BookmarkTree;
use crate::host::TabHost;
use crate::resolver::AncestorResolver;
use crate::store::MappingStore;
use folder_containers_protocol::BookmarkId;
use folder_containers_protocol::ContainerId;
use folder_containers_protocol::CreateTab;
use folder_containers_protocol::NavigationCommit;
use folder_containers_protocol::TabId;
use std::sync::Arc;
use tracing::debug;
use tracing::info;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Reload,
    SubFrame,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    Skipped(SkipReason),
    /// No bookmark stores this URL.
    NoBookmark,
    /// Bookmarks exist, but none of them (or their folders) is mapped.
    Unmapped,
    AlreadyInContainer {
        bookmark_id: BookmarkId,
        container: ContainerId,
    },
    Reopened {
        bookmark_id: BookmarkId,
        container: ContainerId,
        closed_tab: TabId,
        new_tab: TabId,
    },
}

/// Reopens committed top-level navigations in the container their bookmark
/// is mapped to.
///
/// Replacement is create-then-close: the new tab exists before the original
/// is removed. A failed create leaves the original untouched; a failed close
/// leaves both tabs open. The user never ends up with zero tabs.
#[derive(Clone)]
pub struct NavigationInterceptor {
    bookmarks: Arc<dyn BookmarkTree>,
    tabs: Arc<dyn TabHost>,
    store: MappingStore,
    resolver: AncestorResolver,
}

impl NavigationInterceptor {
    pub fn new(
        bookmarks: Arc<dyn BookmarkTree>,
        tabs: Arc<dyn TabHost>,
        store: MappingStore,
        resolver: AncestorResolver,
    ) -> Self {
        Self {
            bookmarks,
            tabs,
            store,
            resolver,
        }
    }

    pub async fn on_committed(
        &self,
        details: &NavigationCommit,
    ) -> Result<NavigationOutcome, HostError> {
        // Reloads never switch containers.
        if details.transition_type.is_reload() {
            return Ok(NavigationOutcome::Skipped(SkipReason::Reload));
        }
        if !details.frame_id.is_top_level() {
            return Ok(NavigationOutcome::Skipped(SkipReason::SubFrame));
        }

        let candidates = self.bookmarks.search_by_url(&details.url).await?;
        if candidates.is_empty() {
            return Ok(NavigationOutcome::NoBookmark);
        }

        let snapshot = match self.store.snapshot().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(
                    url = %details.url,
                    error = %err,
                    "Mapping storage unreadable; leaving navigation alone"
                );
                return Ok(NavigationOutcome::Unmapped);
            }
        };

        for candidate in &candidates {
            let Some(container) = self.resolver.resolve(&candidate.id, &snapshot).await else {
                continue;
            };
            // First mapped candidate wins; later same-URL bookmarks are not consulted.
            return self
                .ensure_container(details, candidate.id.clone(), container)
                .await;
        }

        debug!(
            url = %details.url,
            candidates = candidates.len(),
            "No mapped bookmark for navigation"
        );
        Ok(NavigationOutcome::Unmapped)
    }

    async fn ensure_container(
        &self,
        details: &NavigationCommit,
        bookmark_id: BookmarkId,
        container: ContainerId,
    ) -> Result<NavigationOutcome, HostError> {
        // Always read the tab right before deciding; earlier state may be stale.
        let tab = self.tabs.get(details.tab_id).await?;
        if tab.cookie_store_id == container {
            debug!(
                tab_id = %tab.id,
                container = %container,
                "Tab already in mapped container"
            );
            return Ok(NavigationOutcome::AlreadyInContainer {
                bookmark_id,
                container,
            });
        }

        let replacement = self
            .tabs
            .create(CreateTab::after(&tab, details.url.clone(), container.clone()))
            .await?;
        self.tabs.remove(tab.id).await?;

        info!(
            url = %details.url,
            bookmark_id = %bookmark_id,
            from = %tab.cookie_store_id,
            to = %container,
            closed_tab = %tab.id,
            new_tab = %replacement.id,
            "Reopened navigation in mapped container"
        );
        Ok(NavigationOutcome::Reopened {
            bookmark_id,
            container,
            closed_tab: tab.id,
            new_tab: replacement.id,
        })
    }
}
