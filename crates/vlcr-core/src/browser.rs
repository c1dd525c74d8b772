//! Lazily-loaded view of the player's file system (`browse.json`).

use crate::bus::{AddMode, BusEvent};
use crate::media;
use crate::protocol::{DirectoryNode, NodeKind};

pub type NodeId = usize;

pub const ROOT: NodeId = 0;
pub const ROOT_DIR: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub entry: DirectoryNode,
    pub depth: usize,
    pub expanded: bool,
    pub load: LoadState,
    pub parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl TreeNode {
    fn new(entry: DirectoryNode, depth: usize, parent: Option<NodeId>) -> Self {
        Self {
            entry,
            depth,
            expanded: false,
            load: LoadState::NotLoaded,
            parent,
            children: Vec::new(),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.entry.is_dir()
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena of nodes; ids stay valid for the tree's lifetime.
#[derive(Debug, Clone)]
pub struct FileTree {
    nodes: Vec<TreeNode>,
}

impl Default for FileTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FileTree {
    pub fn new() -> Self {
        let root = DirectoryNode {
            name: ROOT_DIR.to_string(),
            path: ROOT_DIR.to_string(),
            uri: "file:///".to_string(),
            kind: NodeKind::Directory,
        };
        Self {
            nodes: vec![TreeNode::new(root, 0, None)],
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first list of what is currently shown.
    pub fn visible_rows(&self) -> Vec<NodeId> {
        let mut rows = Vec::new();
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            rows.push(id);
            let node = &self.nodes[id];
            if node.expanded {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        rows
    }

    /// Open a directory. Returns the path to fetch when its children were
    /// never loaded (or the last load failed); `None` when cached.
    pub fn expand(&mut self, id: NodeId) -> Option<String> {
        let node = self.nodes.get_mut(id)?;
        if !node.is_dir() {
            return None;
        }
        node.expanded = true;
        match node.load {
            LoadState::NotLoaded | LoadState::Failed(_) => {
                node.load = LoadState::Loading;
                Some(node.entry.path.clone())
            }
            LoadState::Loading | LoadState::Loaded => None,
        }
    }

    pub fn collapse(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.expanded = false;
        }
    }

    pub fn toggle(&mut self, id: NodeId) -> Option<String> {
        match self.nodes.get(id) {
            Some(node) if node.expanded => {
                self.collapse(id);
                None
            }
            Some(_) => self.expand(id),
            None => None,
        }
    }

    /// Install a listing for `id`. `.` and `..` are dropped. Ignored unless a
    /// load for `id` is outstanding, so late answers never duplicate children.
    pub fn attach_children(&mut self, id: NodeId, entries: Vec<DirectoryNode>) -> usize {
        let Some(parent) = self.nodes.get(id) else {
            return 0;
        };
        if parent.load != LoadState::Loading {
            return 0;
        }
        let depth = parent.depth + 1;
        let mut added = Vec::new();
        for entry in entries {
            if entry.name == "." || entry.name == ".." {
                continue;
            }
            added.push(self.nodes.len());
            self.nodes.push(TreeNode::new(entry, depth, Some(id)));
        }
        let count = added.len();
        let parent = &mut self.nodes[id];
        parent.children = added;
        parent.load = LoadState::Loaded;
        count
    }

    pub fn mark_failed(&mut self, id: NodeId, reason: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.load = LoadState::Failed(reason.into());
            node.expanded = false;
        }
    }

    /// The add event for a media file; directories and other files give `None`.
    pub fn select(&self, id: NodeId) -> Option<BusEvent> {
        let node = self.nodes.get(id)?;
        if node.entry.kind != NodeKind::File || !media::is_media_uri(&node.entry.uri) {
            return None;
        }
        Some(BusEvent::AddItem {
            mode: AddMode::Enqueue,
            id: String::new(),
            title: node.entry.uri.clone(),
            src: node.entry.uri.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, kind: NodeKind) -> DirectoryNode {
        DirectoryNode {
            name: name.into(),
            path: format!("/music/{name}"),
            uri: format!("file:///music/{name}"),
            kind,
        }
    }

    fn loaded_tree() -> FileTree {
        let mut tree = FileTree::new();
        assert_eq!(tree.expand(ROOT).as_deref(), Some("/"));
        tree.attach_children(
            ROOT,
            vec![
                entry("..", NodeKind::Directory),
                entry("albums", NodeKind::Directory),
                entry("song.mp3", NodeKind::File),
                entry("notes.txt", NodeKind::File),
            ],
        );
        tree
    }

    #[test]
    fn test_dot_entries_are_skipped() {
        let tree = loaded_tree();
        assert_eq!(tree.node(ROOT).unwrap().children().len(), 3);
        assert_eq!(tree.visible_rows(), vec![0, 1, 2, 3]);
        assert_eq!(tree.node(1).unwrap().depth, 1);
    }

    #[test]
    fn test_expand_loads_once() {
        let mut tree = loaded_tree();
        assert_eq!(tree.expand(1).as_deref(), Some("/music/albums"));
        assert_eq!(tree.attach_children(1, vec![entry("a.flac", NodeKind::File)]), 1);
        assert_eq!(tree.visible_rows(), vec![0, 1, 4, 2, 3]);

        tree.collapse(1);
        assert_eq!(tree.visible_rows(), vec![0, 1, 2, 3]);
        assert_eq!(tree.expand(1), None);
        // a stray second answer is ignored
        assert_eq!(tree.attach_children(1, vec![entry("b.flac", NodeKind::File)]), 0);
        assert_eq!(tree.node(1).unwrap().children().len(), 1);
    }

    #[test]
    fn test_failed_load_can_retry() {
        let mut tree = loaded_tree();
        tree.expand(1);
        tree.mark_failed(1, "timeout");
        assert!(matches!(tree.node(1).unwrap().load, LoadState::Failed(_)));
        assert!(tree.expand(1).is_some());
    }

    #[test]
    fn test_select_media_only() {
        let mut tree = loaded_tree();
        assert_eq!(
            tree.select(2),
            Some(BusEvent::AddItem {
                mode: AddMode::Enqueue,
                id: String::new(),
                title: "file:///music/song.mp3".into(),
                src: "file:///music/song.mp3".into(),
            })
        );
        assert_eq!(tree.select(3), None);
        assert_eq!(tree.select(1), None);
        assert_eq!(tree.expand(2), None);
    }
}
