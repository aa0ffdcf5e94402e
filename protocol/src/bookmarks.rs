use crate::ids::BookmarkId;
use serde::Deserialize;
use serde::Serialize;

/// A node of the host's bookmark tree. Folders carry no `url`; the implicit
/// root is the only node without a `parent_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkNode {
    pub id: BookmarkId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<BookmarkId>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl BookmarkNode {
    pub fn folder(
        id: impl Into<BookmarkId>,
        parent_id: Option<BookmarkId>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            parent_id,
            title: title.into(),
            url: None,
        }
    }

    pub fn bookmark(
        id: impl Into<BookmarkId>,
        parent_id: BookmarkId,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            parent_id: Some(parent_id),
            title: title.into(),
            url: Some(url.into()),
        }
    }

    pub fn is_folder(&self) -> bool {
        self.url.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_host_shape() {
        let node: BookmarkNode = serde_json::from_str(
            r#"{"id":"b1","parentId":"f1","title":"Docs","url":"https://example.com/"}"#,
        )
        .expect("parse bookmark node");
        assert_eq!(
            node,
            BookmarkNode::bookmark("b1", BookmarkId::new("f1"), "Docs", "https://example.com/")
        );
        assert!(!node.is_folder());
    }

    #[test]
    fn root_has_no_parent() {
        let node: BookmarkNode =
            serde_json::from_str(r#"{"id":"root________"}"#).expect("parse root node");
        assert_eq!(node.parent_id, None);
        assert!(node.is_folder());
    }
}
