pub mod config;
pub mod db;
pub mod error;
pub mod host;
pub mod prefs;
pub mod tree;

pub use config::{DragAndDropConfig, Position, TreeViewConfig};
pub use error::TreeViewError;
pub use host::{
    AssetStore, ConfigProvider, Environment, HostEnv, PageTreeProvider, PanelHost,
    PreferenceStore, TreeViewHost,
};
pub use tree::{NodeType, PageTree, TreeNode};

/// Plugin identifier used for asset lookups and log targets.
pub const PLUGIN_ID: &str = "treeview";
