//! File-backed host for running the panel outside an editor.
//!
//! Panels are rendered as standalone HTML documents under
//! `<data>/panels/<position>.html`; hiding deletes the file.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use rusqlite::Connection;

use treeview_core::config::{load_config, load_custom_styles};
use treeview_core::{
    AssetStore, ConfigProvider, Environment, HostEnv, PLUGIN_ID, PageTree, PageTreeProvider,
    PanelHost, Position, PreferenceStore, TreeViewConfig, TreeViewError, db, prefs,
};

use crate::embedded;

/// Where the local host reads and writes.
#[derive(Debug, Clone)]
pub struct HostPaths {
    pub data_dir: PathBuf,
    pub config_file: PathBuf,
    pub custom_styles_file: PathBuf,
    pub tree_file: PathBuf,
    /// Plugin root to read assets from; embedded defaults when `None`.
    pub assets_dir: Option<PathBuf>,
}

impl HostPaths {
    /// Paths rooted in a single directory.
    #[cfg(test)]
    pub fn in_dir(dir: &std::path::Path) -> Self {
        Self {
            data_dir: dir.to_path_buf(),
            config_file: dir.join("treeview.toml"),
            custom_styles_file: dir.join("custom.css"),
            tree_file: dir.join("tree.json"),
            assets_dir: None,
        }
    }

    pub fn panels_dir(&self) -> PathBuf {
        self.data_dir.join("panels")
    }

    pub fn panel_file(&self, position: Position) -> PathBuf {
        self.panels_dir().join(format!("{position}.html"))
    }
}

pub struct LocalHost {
    paths: HostPaths,
    conn: Mutex<Connection>,
    server: bool,
    viewport: Mutex<Option<u32>>,
}

impl LocalHost {
    pub fn open(paths: HostPaths, server: bool, viewport_width: Option<u32>) -> Result<Self> {
        let conn = db::open_db(&paths.data_dir)?;
        prefs::init_db(&conn)?;
        Ok(Self {
            paths,
            conn: Mutex::new(conn),
            server,
            viewport: Mutex::new(viewport_width),
        })
    }

    pub fn paths(&self) -> &HostPaths {
        &self.paths
    }

    pub fn set_viewport_width(&self, width: Option<u32>) {
        if let Ok(mut viewport) = self.viewport.lock() {
            *viewport = width;
        }
    }

    /// The panel this host currently has on disk, if any.
    pub fn rendered_position(&self) -> Option<Position> {
        Position::ALL
            .into_iter()
            .find(|p| self.paths.panel_file(*p).exists())
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| anyhow!("Preferences connection lock poisoned"))?;
        f(&conn)
    }
}

/// Wrap the panel markup and script into a document a browser can open.
fn panel_document(position: Position, size: f64, html: &str, script: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<title>treeview ({position})</title>
</head>
<body data-panel-position="{position}" data-panel-size="{size}">
{html}<script>
function syscall(name, ...args) {{ console.log("syscall", name, args); }}
{script}</script>
</body>
</html>
"#
    )
}

#[async_trait]
impl AssetStore for LocalHost {
    async fn read_asset(&self, plugin_id: &str, path: &str) -> Result<String> {
        let not_found = || TreeViewError::AssetNotFound {
            plugin: plugin_id.to_string(),
            path: path.to_string(),
        };
        if plugin_id != PLUGIN_ID {
            return Err(not_found().into());
        }

        match &self.paths.assets_dir {
            Some(dir) => {
                let file = dir.join(path);
                match tokio::fs::read_to_string(&file).await {
                    Ok(content) => Ok(content),
                    Err(e) if e.kind() == ErrorKind::NotFound => Err(not_found().into()),
                    Err(e) => {
                        Err(e).with_context(|| format!("Failed to read asset {}", file.display()))
                    }
                }
            }
            None => embedded::asset(path)
                .map(str::to_string)
                .ok_or_else(|| not_found().into()),
        }
    }
}

#[async_trait]
impl PanelHost for LocalHost {
    async fn show_panel(&self, position: Position, size: f64, html: &str, script: &str) -> Result<()> {
        let dir = self.paths.panels_dir();
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create panel directory: {}", dir.display()))?;
        let file = self.paths.panel_file(position);
        tokio::fs::write(&file, panel_document(position, size, html, script))
            .await
            .with_context(|| format!("Failed to write panel {}", file.display()))?;
        tracing::info!(path = %file.display(), "panel rendered");
        Ok(())
    }

    async fn hide_panel(&self, position: Position) -> Result<()> {
        let file = self.paths.panel_file(position);
        match tokio::fs::remove_file(&file).await {
            Ok(()) => Ok(()),
            // Already gone counts as hidden.
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove panel {}", file.display())),
        }
    }
}

#[async_trait]
impl Environment for LocalHost {
    async fn env(&self) -> Result<HostEnv> {
        Ok(if self.server {
            HostEnv::Server
        } else {
            HostEnv::Client
        })
    }

    fn viewport_width(&self) -> Option<u32> {
        if self.server {
            return None;
        }
        self.viewport.lock().ok().and_then(|v| *v)
    }
}

#[async_trait]
impl PageTreeProvider for LocalHost {
    async fn page_tree(&self, _config: &TreeViewConfig) -> Result<PageTree> {
        let file = &self.paths.tree_file;
        let text = match tokio::fs::read_to_string(file).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(PageTree::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read page tree {}", file.display()));
            }
        };
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid page tree JSON in {}", file.display()))
    }
}

#[async_trait]
impl ConfigProvider for LocalHost {
    async fn plug_config(&self) -> Result<TreeViewConfig> {
        load_config(&self.paths.config_file)
    }

    async fn custom_styles(&self) -> Result<Option<String>> {
        load_custom_styles(&self.paths.custom_styles_file)
    }
}

#[async_trait]
impl PreferenceStore for LocalHost {
    async fn is_tree_view_enabled(&self) -> Result<bool> {
        self.with_conn(prefs::is_tree_view_enabled)
    }

    async fn set_tree_view_enabled(&self, enabled: bool) -> Result<()> {
        self.with_conn(|conn| prefs::set_tree_view_enabled(conn, enabled))
    }
}

// ── Tests ────────────────────────────────────────────────────────────
