use crate::config::DEFAULT_MAX_ANCESTOR_DEPTH;
use crate::error::StorageError;
use crate::host::BookmarkTree;
use crate::store::MappingSnapshot;
use crate::store::MappingStore;
use folder_containers_protocol::BookmarkId;
use folder_containers_protocol::ContainerId;
use std::sync::Arc;
use tracing::debug;

/// Finds the container a bookmark inherits: its own mapping, else the
/// mapping of its closest mapped ancestor folder.
#[derive(Clone)]
pub struct AncestorResolver {
    bookmarks: Arc<dyn BookmarkTree>,
    max_depth: usize,
}

impl AncestorResolver {
    pub fn new(bookmarks: Arc<dyn BookmarkTree>) -> Self {
        Self::with_max_depth(bookmarks, DEFAULT_MAX_ANCESTOR_DEPTH)
    }

    pub fn with_max_depth(bookmarks: Arc<dyn BookmarkTree>, max_depth: usize) -> Self {
        Self {
            bookmarks,
            max_depth: max_depth.max(1),
        }
    }

    /// Walks at most `max_depth` nodes upward from `bookmark_id`. Missing
    /// nodes and lookup failures end the walk with `None`; they never
    /// propagate, since an unresolved mapping must not hold up navigation.
    pub async fn resolve(
        &self,
        bookmark_id: &BookmarkId,
        snapshot: &MappingSnapshot,
    ) -> Option<ContainerId> {
        if snapshot.is_empty() {
            return None;
        }

        let mut current = bookmark_id.clone();
        for depth in 0..self.max_depth {
            if let Some(container) = snapshot.get(&current) {
                debug!(
                    bookmark_id = %bookmark_id,
                    mapped_at = %current,
                    depth,
                    container = %container,
                    "Resolved container mapping"
                );
                return Some(container.clone());
            }

            let node = match self.bookmarks.get(&current).await {
                Ok(Some(node)) => node,
                Ok(None) => {
                    debug!(bookmark_id = %bookmark_id, missing = %current, "Ancestor walk hit a missing node");
                    return None;
                }
                Err(err) => {
                    debug!(
                        bookmark_id = %bookmark_id,
                        node = %current,
                        error = %err,
                        "Ancestor walk stopped on lookup failure"
                    );
                    return None;
                }
            };

            match node.parent_id {
                Some(parent_id) => current = parent_id,
                None => return None,
            }
        }

        debug!(
            bookmark_id = %bookmark_id,
            max_depth = self.max_depth,
            "Ancestor walk exhausted its bound"
        );
        None
    }

    /// Like [`Self::resolve`], against a fresh snapshot of `store`.
    pub async fn resolve_from_store(
        &self,
        bookmark_id: &BookmarkId,
        store: &MappingStore,
    ) -> Result<Option<ContainerId>, StorageError> {
        let snapshot = store.snapshot().await?;
        Ok(self.resolve(bookmark_id, &snapshot).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HostError;
    use crate::memory::MemoryBookmarks;
    use async_trait::async_trait;
    use folder_containers_protocol::BookmarkNode;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    /// Tree where every node `n{i}` has parent `n{i+1}`, forever.
    #[derive(Default)]
    struct EndlessChain {
        lookups: AtomicUsize,
    }

    #[async_trait]
    impl BookmarkTree for EndlessChain {
        async fn get(&self, id: &BookmarkId) -> Result<Option<BookmarkNode>, HostError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            let index: usize = id.as_str().trim_start_matches('n').parse().unwrap_or(0);
            Ok(Some(BookmarkNode::folder(
                id.clone(),
                Some(BookmarkId::new(format!("n{}", index + 1))),
                "",
            )))
        }

        async fn search_by_url(&self, _url: &str) -> Result<Vec<BookmarkNode>, HostError> {
            Ok(Vec::new())
        }
    }

    struct FixedTree {
        nodes: HashMap<BookmarkId, BookmarkNode>,
        failing: Option<BookmarkId>,
    }

    impl FixedTree {
        fn new(nodes: Vec<BookmarkNode>) -> Self {
            Self {
                nodes: nodes.into_iter().map(|node| (node.id.clone(), node)).collect(),
                failing: None,
            }
        }
    }

    #[async_trait]
    impl BookmarkTree for FixedTree {
        async fn get(&self, id: &BookmarkId) -> Result<Option<BookmarkNode>, HostError> {
            if self.failing.as_ref() == Some(id) {
                return Err(HostError::operation("bookmarks.get", "transient failure"));
            }
            Ok(self.nodes.get(id).cloned())
        }

        async fn search_by_url(&self, _url: &str) -> Result<Vec<BookmarkNode>, HostError> {
            Ok(Vec::new())
        }
    }

    fn id(raw: &str) -> BookmarkId {
        BookmarkId::new(raw)
    }

    fn container(raw: &str) -> ContainerId {
        ContainerId::new(raw).expect("valid container id")
    }

    /// root > toolbar > work > projects > b1
    fn nested_tree() -> FixedTree {
        FixedTree::new(vec![
            BookmarkNode::folder("root________", None, ""),
            BookmarkNode::folder("toolbar_____", Some(id("root________")), "Toolbar"),
            BookmarkNode::folder("work", Some(id("toolbar_____")), "Work"),
            BookmarkNode::folder("projects", Some(id("work")), "Projects"),
            BookmarkNode::bookmark("b1", id("projects"), "Tracker", "https://tracker.example/"),
        ])
    }

    fn snapshot(entries: &[(&str, &str)]) -> MappingSnapshot {
        entries
            .iter()
            .map(|(bookmark, cookie_store)| (id(bookmark), container(cookie_store)))
            .collect()
    }

    #[tokio::test]
    async fn self_mapping_overrides_ancestors() {
        let resolver = AncestorResolver::new(Arc::new(nested_tree()));
        let mappings = snapshot(&[("b1", "personal"), ("work", "work")]);

        assert_eq!(
            resolver.resolve(&id("b1"), &mappings).await,
            Some(container("personal"))
        );
    }

    #[tokio::test]
    async fn closest_mapped_ancestor_wins() {
        let resolver = AncestorResolver::new(Arc::new(nested_tree()));
        let mappings = snapshot(&[("toolbar_____", "banking"), ("work", "work")]);

        assert_eq!(
            resolver.resolve(&id("b1"), &mappings).await,
            Some(container("work"))
        );
        assert_eq!(
            resolver.resolve(&id("toolbar_____"), &mappings).await,
            Some(container("banking"))
        );
    }

    #[tokio::test]
    async fn unmapped_chain_resolves_to_none() {
        let resolver = AncestorResolver::new(Arc::new(nested_tree()));
        let mappings = snapshot(&[("elsewhere", "work")]);

        assert_eq!(resolver.resolve(&id("b1"), &mappings).await, None);
    }

    #[tokio::test]
    async fn missing_or_failing_nodes_fail_open() {
        let mut tree = nested_tree();
        tree.failing = Some(id("projects"));
        let resolver = AncestorResolver::new(Arc::new(tree));
        let mappings = snapshot(&[("work", "work")]);

        assert_eq!(resolver.resolve(&id("b1"), &mappings).await, None);
        assert_eq!(resolver.resolve(&id("deleted"), &mappings).await, None);
    }

    /// Deletes `doomed` from the tree as soon as `trigger` is looked up.
    struct DeletesDuringWalk {
        tree: Arc<MemoryBookmarks>,
        trigger: BookmarkId,
        doomed: BookmarkId,
    }

    #[async_trait]
    impl BookmarkTree for DeletesDuringWalk {
        async fn get(&self, id: &BookmarkId) -> Result<Option<BookmarkNode>, HostError> {
            let node = self.tree.get(id).await?;
            if *id == self.trigger {
                self.tree.remove(&self.doomed).await;
            }
            Ok(node)
        }

        async fn search_by_url(&self, url: &str) -> Result<Vec<BookmarkNode>, HostError> {
            self.tree.search_by_url(url).await
        }
    }

    #[tokio::test]
    async fn parent_deleted_mid_walk_fails_open() {
        let tree = Arc::new(MemoryBookmarks::default());
        for node in [
            BookmarkNode::folder("root________", None, ""),
            BookmarkNode::folder("work", Some(id("root________")), "Work"),
            BookmarkNode::folder("projects", Some(id("work")), "Projects"),
            BookmarkNode::bookmark("b1", id("projects"), "Tracker", "https://tracker.example/"),
        ] {
            tree.insert(node).await;
        }
        let mappings = snapshot(&[("work", "work")]);
        assert_eq!(
            AncestorResolver::new(tree.clone())
                .resolve(&id("b1"), &mappings)
                .await,
            Some(container("work"))
        );

        let resolver = AncestorResolver::new(Arc::new(DeletesDuringWalk {
            tree: tree.clone(),
            trigger: id("b1"),
            doomed: id("projects"),
        }));

        assert_eq!(resolver.resolve(&id("b1"), &mappings).await, None);
        assert_eq!(tree.get(&id("projects")).await.expect("lookup"), None);
    }

    #[tokio::test]
    async fn walk_never_exceeds_its_bound() {
        let tree = Arc::new(EndlessChain::default());
        let resolver = AncestorResolver::new(tree.clone());
        let mappings = snapshot(&[("unrelated", "work")]);

        assert_eq!(resolver.resolve(&id("n0"), &mappings).await, None);
        assert_eq!(tree.lookups.load(Ordering::SeqCst), 50);
    }

    #[tokio::test]
    async fn mapping_beyond_the_bound_is_not_found() {
        let tree = Arc::new(EndlessChain::default());
        let resolver = AncestorResolver::with_max_depth(tree.clone(), 3);

        assert_eq!(
            resolver
                .resolve(&id("n0"), &snapshot(&[("n2", "work")]))
                .await,
            Some(container("work"))
        );
        assert_eq!(
            resolver
                .resolve(&id("n0"), &snapshot(&[("n3", "work")]))
                .await,
            None
        );
        assert!(tree.lookups.load(Ordering::SeqCst) <= 5);
    }
}
