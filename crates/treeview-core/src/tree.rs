use serde::{Deserialize, Serialize};

// ── Node types ───────────────────────────────────────────────────────

/// Node type: page or folder (a folder is a path prefix with no page of its own).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    #[default]
    Page,
    Folder,
}

/// A node of the page tree, as produced by the page-tree provider.
///
/// The panel never restructures these; they are serialized straight into
/// the client payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TreeNode {
    /// Full page name (path), unique within the tree.
    pub name: String,
    /// Last path segment, shown in the tree.
    pub title: String,
    pub node_type: NodeType,
    pub is_current: bool,
    pub children: Vec<TreeNode>,
}

/// The page tree plus the page currently open in the editor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageTree {
    pub current_page: Option<String>,
    pub nodes: Vec<TreeNode>,
}

impl PageTree {
    /// Number of page nodes (folders excluded) in the whole tree.
    pub fn page_count(&self) -> usize {
        fn count(nodes: &[TreeNode]) -> usize {
            nodes
                .iter()
                .map(|n| usize::from(n.node_type == NodeType::Page) + count(&n.children))
                .sum()
        }
        count(&self.nodes)
    }

    /// Find a node by its full name.
    pub fn find(&self, name: &str) -> Option<&TreeNode> {
        find_node(&self.nodes, name)
    }
}

/// Depth-first search for a node by full name.
pub fn find_node<'a>(nodes: &'a [TreeNode], name: &str) -> Option<&'a TreeNode> {
    for node in nodes {
        if node.name == name {
            return Some(node);
        }
        if let Some(found) = find_node(&node.children, name) {
            return Some(found);
        }
    }
    None
}

// ── Tests ────────────────────────────────────────────────────────────
