//! Bookmark-to-container mapping and navigation interception.
//!
//! Bookmarks (or whole folders) are mapped to contextual identities. When a
//! top-level navigation commits to a bookmarked URL, the tab is reopened in
//! the container its nearest mapped ancestor names.

pub mod config;
pub mod error;
pub mod extension;
pub mod host;
pub mod interceptor;
pub mod logging;
pub mod memory;
pub mod menu;
pub mod resolver;
pub mod storage;
pub mod store;

pub use config::ExtensionConfig;
pub use error::ContainersError;
pub use error::HostError;
pub use error::Result;
pub use error::StorageError;
pub use extension::EventOutcome;
pub use extension::FolderContainers;
pub use host::HostServices;
pub use interceptor::NavigationInterceptor;
pub use interceptor::NavigationOutcome;
pub use interceptor::SkipReason;
pub use resolver::AncestorResolver;
pub use store::MappingSnapshot;
pub use store::MappingStore;

pub use folder_containers_protocol as protocol;
