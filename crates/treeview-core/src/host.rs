//! The host surface the tree view is driven against.
//!
//! Each collaborator is its own trait so hosts (and test doubles) can be
//! assembled from independent parts. [`TreeViewHost`] bundles them for the
//! panel controller.

use anyhow::Result;
use async_trait::async_trait;

use crate::config::{Position, TreeViewConfig};
use crate::tree::PageTree;

/// Execution context reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEnv {
    /// Interactive client with a viewport.
    Client,
    /// Headless/server context. No panel can be shown.
    Server,
}

/// Read-only access to files bundled with a plugin.
#[async_trait]
pub trait AssetStore {
    /// Read an asset. Fails if the path does not exist.
    async fn read_asset(&self, plugin_id: &str, path: &str) -> Result<String>;
}

/// The host's panel surface.
#[async_trait]
pub trait PanelHost {
    async fn show_panel(&self, position: Position, size: f64, html: &str, script: &str)
    -> Result<()>;

    async fn hide_panel(&self, position: Position) -> Result<()>;
}

#[async_trait]
pub trait Environment {
    async fn env(&self) -> Result<HostEnv>;

    /// Current viewport width in pixels, `None` when there is no viewport.
    fn viewport_width(&self) -> Option<u32>;
}

#[async_trait]
pub trait PageTreeProvider {
    async fn page_tree(&self, config: &TreeViewConfig) -> Result<PageTree>;
}

#[async_trait]
pub trait ConfigProvider {
    async fn plug_config(&self) -> Result<TreeViewConfig>;

    /// User style overrides appended after the bundled styles.
    async fn custom_styles(&self) -> Result<Option<String>>;
}

/// Storage for the "tree view is enabled" preference.
#[async_trait]
pub trait PreferenceStore {
    async fn is_tree_view_enabled(&self) -> Result<bool>;

    async fn set_tree_view_enabled(&self, enabled: bool) -> Result<()>;
}

/// Everything the panel controller needs from its host.
pub trait TreeViewHost:
    AssetStore + PanelHost + Environment + PageTreeProvider + ConfigProvider + PreferenceStore
{
}

impl<T> TreeViewHost for T where
    T: AssetStore + PanelHost + Environment + PageTreeProvider + ConfigProvider + PreferenceStore
{
}
