use crate::ids::BookmarkId;
use crate::ids::FrameId;
use crate::ids::TabId;
use serde::Deserialize;
use serde::Serialize;

/// How the user (or page) initiated a navigation, in the host's vocabulary.
/// Unknown values are kept verbatim so newer hosts do not break parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransitionType {
    Link,
    Typed,
    AutoBookmark,
    AutoSubframe,
    ManualSubframe,
    Generated,
    StartPage,
    FormSubmit,
    Reload,
    Keyword,
    KeywordGenerated,
    Other(String),
}

impl TransitionType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Link => "link",
            Self::Typed => "typed",
            Self::AutoBookmark => "auto_bookmark",
            Self::AutoSubframe => "auto_subframe",
            Self::ManualSubframe => "manual_subframe",
            Self::Generated => "generated",
            Self::StartPage => "start_page",
            Self::FormSubmit => "form_submit",
            Self::Reload => "reload",
            Self::Keyword => "keyword",
            Self::KeywordGenerated => "keyword_generated",
            Self::Other(other) => other,
        }
    }

    pub fn is_reload(&self) -> bool {
        matches!(self, Self::Reload)
    }
}

impl From<String> for TransitionType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "link" => Self::Link,
            "typed" => Self::Typed,
            "auto_bookmark" => Self::AutoBookmark,
            "auto_subframe" => Self::AutoSubframe,
            "manual_subframe" => Self::ManualSubframe,
            "generated" => Self::Generated,
            "start_page" => Self::StartPage,
            "form_submit" => Self::FormSubmit,
            "reload" => Self::Reload,
            "keyword" => Self::Keyword,
            "keyword_generated" => Self::KeywordGenerated,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for TransitionType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<TransitionType> for String {
    fn from(value: TransitionType) -> Self {
        match value {
            TransitionType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

/// A frame finished committing to `url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationCommit {
    pub url: String,
    pub tab_id: TabId,
    pub frame_id: FrameId,
    pub transition_type: TransitionType,
}

/// A menu entry was clicked. `bookmark_id` is only present when the menu was
/// opened on a bookmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuClick {
    pub menu_item_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookmark_id: Option<BookmarkId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    Installed,
    Startup,
    MenuClicked(MenuClick),
    NavigationCommitted(NavigationCommit),
}

impl HostEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Installed => "installed",
            Self::Startup => "startup",
            Self::MenuClicked(_) => "menu_clicked",
            Self::NavigationCommitted(_) => "navigation_committed",
        }
    }
}
