//! Value types shared between the folder-containers core and the host bridge.
//!
//! Nothing in this crate performs I/O. Every type is serde-serializable in the
//! host's camelCase shape so events can be forwarded as JSON.

pub mod bookmarks;
pub mod events;
pub mod ids;
pub mod menus;
pub mod tabs;

pub use bookmarks::BookmarkNode;
pub use events::HostEvent;
pub use events::MenuClick;
pub use events::NavigationCommit;
pub use events::TransitionType;
pub use ids::BookmarkId;
pub use ids::ContainerId;
pub use ids::FrameId;
pub use ids::IdError;
pub use ids::TabId;
pub use menus::MenuEntry;
pub use menus::MenuEntryKind;
pub use menus::MenuSelection;
pub use tabs::ContextualIdentity;
pub use tabs::CreateTab;
pub use tabs::Tab;
