//! Static files bundled into the panel payload.

use anyhow::{Context, Result};
use futures::future::try_join_all;

use treeview_core::{AssetStore, PLUGIN_ID};

pub const WIDGET_STYLES: &str = "assets/widget/tree-widget.css";
pub const WIDGET_SCRIPT: &str = "assets/widget/tree-widget.js";
pub const PLUGIN_STYLES: &str = "assets/treeview.css";
pub const PLUGIN_SCRIPT: &str = "assets/treeview.js";

// ── Toolbar ──────────────────────────────────────────────────────────

/// Buttons in the panel header. The client runtime dispatches on [`ToolbarAction::id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    ExpandAll,
    CollapseAll,
    RevealCurrentPage,
    Refresh,
    ClosePanel,
}

impl ToolbarAction {
    /// Header order, left to right.
    pub const ALL: [ToolbarAction; 5] = [
        ToolbarAction::ExpandAll,
        ToolbarAction::CollapseAll,
        ToolbarAction::RevealCurrentPage,
        ToolbarAction::Refresh,
        ToolbarAction::ClosePanel,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ToolbarAction::ExpandAll => "expand-all",
            ToolbarAction::CollapseAll => "collapse-all",
            ToolbarAction::RevealCurrentPage => "reveal-current-page",
            ToolbarAction::Refresh => "refresh",
            ToolbarAction::ClosePanel => "close-panel",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ToolbarAction::ExpandAll => "Expand all",
            ToolbarAction::CollapseAll => "Collapse all",
            ToolbarAction::RevealCurrentPage => "Reveal current page",
            ToolbarAction::Refresh => "Refresh",
            ToolbarAction::ClosePanel => "Close",
        }
    }

    pub fn icon_path(&self) -> &'static str {
        match self {
            ToolbarAction::ExpandAll => "assets/icons/chevrons-down.svg",
            ToolbarAction::CollapseAll => "assets/icons/chevrons-up.svg",
            ToolbarAction::RevealCurrentPage => "assets/icons/crosshair.svg",
            ToolbarAction::Refresh => "assets/icons/refresh-cw.svg",
            ToolbarAction::ClosePanel => "assets/icons/x.svg",
        }
    }
}

// ── Loaded assets ────────────────────────────────────────────────────

/// Contents of every bundled file the payload needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelAssets {
    pub widget_styles: String,
    pub widget_script: String,
    pub plugin_styles: String,
    pub plugin_script: String,
    /// One SVG per toolbar action, in [`ToolbarAction::ALL`] order.
    pub icons: Vec<(ToolbarAction, String)>,
}

impl PanelAssets {
    pub fn icon(&self, action: ToolbarAction) -> Option<&str> {
        self.icons
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, svg)| svg.as_str())
    }
}

/// Every asset path the payload reads, in load order.
pub fn asset_paths() -> Vec<&'static str> {
    let mut paths = vec![WIDGET_STYLES, WIDGET_SCRIPT, PLUGIN_STYLES, PLUGIN_SCRIPT];
    paths.extend(ToolbarAction::ALL.iter().map(|a| a.icon_path()));
    paths
}

/// Fetch all assets concurrently. Any missing file fails the whole load.
pub async fn load_assets<S>(store: &S) -> Result<PanelAssets>
where
    S: AssetStore + ?Sized,
{
    let reads = asset_paths().into_iter().map(|path| async move {
        store
            .read_asset(PLUGIN_ID, path)
            .await
            .with_context(|| format!("Failed to load asset {path}"))
    });
    let mut contents = try_join_all(reads).await?.into_iter();

    // Order matches asset_paths().
    let mut next = || contents.next().unwrap_or_default();
    let widget_styles = next();
    let widget_script = next();
    let plugin_styles = next();
    let plugin_script = next();
    let icons = ToolbarAction::ALL.iter().map(|a| (*a, next())).collect();

    Ok(PanelAssets {
        widget_styles,
        widget_script,
        plugin_styles,
        plugin_script,
        icons,
    })
}

// ── Tests ────────────────────────────────────────────────────────────
