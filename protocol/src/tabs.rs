use crate::ids::ContainerId;
use crate::ids::TabId;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: TabId,
    /// Zero-based position within the tab strip of its window.
    pub index: usize,
    pub cookie_store_id: ContainerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub active: bool,
}

/// Arguments for opening a tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTab {
    pub url: String,
    pub cookie_store_id: ContainerId,
    pub index: usize,
    pub active: bool,
}

impl CreateTab {
    /// A foreground tab at `url` in `container`, placed right after `tab`.
    pub fn after(tab: &Tab, url: impl Into<String>, container: ContainerId) -> Self {
        Self {
            url: url.into(),
            cookie_store_id: container,
            index: tab.index + 1,
            active: true,
        }
    }
}

/// A container as enumerated by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextualIdentity {
    pub cookie_store_id: ContainerId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl ContextualIdentity {
    pub fn new(cookie_store_id: ContainerId, name: impl Into<String>) -> Self {
        Self {
            cookie_store_id,
            name: name.into(),
            color: None,
            icon: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn create_tab_lands_right_after_the_source_tab() {
        let tab = Tab {
            id: TabId::new(12),
            index: 3,
            cookie_store_id: ContainerId::default_store(),
            url: Some("https://example.com/".to_string()),
            active: true,
        };
        let work = ContainerId::new("firefox-container-2").expect("valid id");

        let params = CreateTab::after(&tab, "https://example.com/", work.clone());

        assert_eq!(
            params,
            CreateTab {
                url: "https://example.com/".to_string(),
                cookie_store_id: work,
                index: 4,
                active: true,
            }
        );
    }
}
