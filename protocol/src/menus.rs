use crate::ids::ContainerId;
use serde::Deserialize;
use serde::Serialize;

pub const ROOT_MENU_ID: &str = "folder-containers-root";
pub const NO_CONTAINER_MENU_ID: &str = "no-container";
pub const NO_CONTAINERS_WARNING_MENU_ID: &str = "no-containers-warning";
pub const CONTAINER_MENU_PREFIX: &str = "container-";

/// Menu context in which every entry of this extension is shown.
pub const BOOKMARK_CONTEXT: &str = "bookmark";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuEntryKind {
    Normal,
    Separator,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    /// Separators are created without an id; the host assigns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: MenuEntryKind,
    pub enabled: bool,
    pub contexts: Vec<String>,
}

impl MenuEntry {
    pub fn item(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            parent_id: None,
            title: Some(title.into()),
            kind: MenuEntryKind::Normal,
            enabled: true,
            contexts: vec![BOOKMARK_CONTEXT.to_string()],
        }
    }

    pub fn separator() -> Self {
        Self {
            id: None,
            parent_id: None,
            title: None,
            kind: MenuEntryKind::Separator,
            enabled: true,
            contexts: vec![BOOKMARK_CONTEXT.to_string()],
        }
    }

    pub fn under(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Menu id of the entry that assigns `container`.
pub fn container_menu_id(container: &ContainerId) -> String {
    format!("{CONTAINER_MENU_PREFIX}{container}")
}

/// What a clicked menu id means to this extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuSelection {
    Root,
    NoContainer,
    Container(ContainerId),
    /// Ours, but carries no action (the "no containers" warning, or a
    /// malformed container id).
    Inert,
    /// Not an entry created by this extension.
    Foreign,
}

impl MenuSelection {
    pub fn parse(menu_item_id: &str) -> Self {
        if menu_item_id == NO_CONTAINER_MENU_ID {
            return Self::NoContainer;
        }
        if menu_item_id == NO_CONTAINERS_WARNING_MENU_ID {
            return Self::Inert;
        }
        if let Some(cookie_store_id) = menu_item_id.strip_prefix(CONTAINER_MENU_PREFIX) {
            return match ContainerId::new(cookie_store_id) {
                Ok(container) => Self::Container(container),
                Err(_) => Self::Inert,
            };
        }
        if menu_item_id.starts_with(ROOT_MENU_ID) {
            return Self::Root;
        }
        Self::Foreign
    }
}
