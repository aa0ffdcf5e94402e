use crate::error::StorageError;
use crate::store::MappingStore;
use folder_containers_protocol::BookmarkId;
use folder_containers_protocol::ContainerId;
use folder_containers_protocol::MenuClick;
use folder_containers_protocol::MenuSelection;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuClickOutcome {
    Assigned {
        bookmark_id: BookmarkId,
        container: ContainerId,
    },
    Cleared {
        bookmark_id: BookmarkId,
    },
    /// The click was on one of our entries but the event carried no bookmark.
    MissingBookmark,
    /// Not an actionable entry of this extension.
    Ignored,
}

/// The only writer of the mapping store.
#[derive(Clone)]
pub struct MenuClickHandler {
    store: MappingStore,
}

impl MenuClickHandler {
    pub fn new(store: MappingStore) -> Self {
        Self { store }
    }

    pub async fn on_clicked(&self, click: &MenuClick) -> Result<MenuClickOutcome, StorageError> {
        // `None` means "back to the default container".
        let target = match MenuSelection::parse(&click.menu_item_id) {
            MenuSelection::NoContainer => None,
            MenuSelection::Container(container) => Some(container),
            MenuSelection::Root | MenuSelection::Inert | MenuSelection::Foreign => {
                debug!(menu_item_id = %click.menu_item_id, "Ignoring menu click");
                return Ok(MenuClickOutcome::Ignored);
            }
        };

        let Some(bookmark_id) = click.bookmark_id.clone() else {
            debug!(menu_item_id = %click.menu_item_id, "Menu click without a bookmark");
            return Ok(MenuClickOutcome::MissingBookmark);
        };

        match target {
            Some(container) => {
                self.store.set(&bookmark_id, &container).await?;
                Ok(MenuClickOutcome::Assigned {
                    bookmark_id,
                    container,
                })
            }
            None => {
                self.store.remove(&bookmark_id).await?;
                Ok(MenuClickOutcome::Cleared { bookmark_id })
            }
        }
    }
}
