#![allow(dead_code)]

use folder_containers_core::ExtensionConfig;
use folder_containers_core::FolderContainers;
use folder_containers_core::memory::MemoryHost;
use folder_containers_core::protocol::BookmarkId;
use folder_containers_core::protocol::BookmarkNode;
use folder_containers_core::protocol::ContainerId;
use folder_containers_core::protocol::FrameId;
use folder_containers_core::protocol::HostEvent;
use folder_containers_core::protocol::MenuClick;
use folder_containers_core::protocol::NavigationCommit;
use folder_containers_core::protocol::TabId;
use folder_containers_core::protocol::TransitionType;

pub const ROOT: &str = "root________";
pub const TOOLBAR: &str = "toolbar_____";
pub const DASHBOARD_URL: &str = "https://work.example/dashboard";

pub fn container(id: &str) -> ContainerId {
    match ContainerId::new(id) {
        Ok(container) => container,
        Err(err) => panic!("invalid container id {id:?}: {err}"),
    }
}

pub fn bookmark_id(id: &str) -> BookmarkId {
    BookmarkId::new(id)
}

/// Host with the tree `root > toolbar > f1 > b1`, where `b1` points at
/// [`DASHBOARD_URL`], plus the extension wired to it with default config.
pub async fn fixture() -> (MemoryHost, FolderContainers) {
    let host = MemoryHost::default();
    host.bookmarks
        .insert(BookmarkNode::folder(ROOT, None, ""))
        .await;
    host.bookmarks
        .insert(BookmarkNode::folder(TOOLBAR, Some(bookmark_id(ROOT)), "Bookmarks Toolbar"))
        .await;
    host.bookmarks
        .insert(BookmarkNode::folder("f1", Some(bookmark_id(TOOLBAR)), "Work"))
        .await;
    host.bookmarks
        .insert(BookmarkNode::bookmark(
            "b1",
            bookmark_id("f1"),
            "Dashboard",
            DASHBOARD_URL,
        ))
        .await;

    let extension = match FolderContainers::new(host.services(), &ExtensionConfig::default()) {
        Ok(extension) => extension,
        Err(err) => panic!("default config should always be valid: {err}"),
    };
    (host, extension)
}

pub fn commit(url: &str, tab_id: TabId, transition: &str) -> NavigationCommit {
    NavigationCommit {
        url: url.to_string(),
        tab_id,
        frame_id: FrameId::TOP_LEVEL,
        transition_type: TransitionType::from(transition),
    }
}

pub fn assign(bookmark: &str, container: &str) -> HostEvent {
    HostEvent::MenuClicked(MenuClick {
        menu_item_id: format!("container-{container}"),
        bookmark_id: Some(bookmark_id(bookmark)),
    })
}

pub fn clear(bookmark: &str) -> HostEvent {
    HostEvent::MenuClicked(MenuClick {
        menu_item_id: "no-container".to_string(),
        bookmark_id: Some(bookmark_id(bookmark)),
    })
}
