//! Recording host double shared by the panel tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use tokio::sync::Barrier;

use treeview_core::{
    AssetStore, ConfigProvider, Environment, HostEnv, NodeType, PageTree, PageTreeProvider,
    PanelHost, Position, PreferenceStore, TreeNode, TreeViewConfig, TreeViewError,
};

use crate::assets::asset_paths;

/// Host calls with an observable effect, in the order they succeeded.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ShowPanel(Position),
    HidePanel(Position),
    SetEnabled(bool),
}

struct Inner {
    calls: Vec<Call>,
    config: TreeViewConfig,
    enabled: bool,
    server: bool,
    viewport: Option<u32>,
    assets: HashMap<String, String>,
    tree: PageTree,
    custom_styles: Option<String>,
    fail_env: Option<String>,
    fail_page_tree: Option<String>,
    fail_show_panel: Option<String>,
    fail_hide_panel: Option<String>,
    fail_set_enabled: Option<String>,
    last_payload: Option<(String, String)>,
    last_size: Option<f64>,
    barrier: Option<Arc<Barrier>>,
}

pub struct MockHost {
    inner: Mutex<Inner>,
}

impl MockHost {
    pub fn new() -> Self {
        let assets = asset_paths()
            .into_iter()
            .map(|p| (p.to_string(), format!("/* {p} */")))
            .collect();
        let tree = PageTree {
            current_page: Some("index".into()),
            nodes: vec![TreeNode {
                name: "index".into(),
                title: "index".into(),
                node_type: NodeType::Page,
                is_current: true,
                children: vec![],
            }],
        };
        Self {
            inner: Mutex::new(Inner {
                calls: Vec::new(),
                config: TreeViewConfig::default(),
                enabled: false,
                server: false,
                viewport: Some(1280),
                assets,
                tree,
                custom_styles: None,
                fail_env: None,
                fail_page_tree: None,
                fail_show_panel: None,
                fail_hide_panel: None,
                fail_set_enabled: None,
                last_payload: None,
                last_size: None,
                barrier: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.lock().calls.iter().filter(|c| pred(*c)).count()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    pub fn enabled(&self) -> bool {
        self.lock().enabled
    }

    pub fn last_payload(&self) -> Option<(String, String)> {
        self.lock().last_payload.clone()
    }

    pub fn last_size(&self) -> Option<f64> {
        self.lock().last_size
    }

    pub fn set_config(&self, config: TreeViewConfig) {
        self.lock().config = config;
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.lock().enabled = enabled;
    }

    pub fn set_server(&self, server: bool) {
        self.lock().server = server;
    }

    pub fn set_viewport(&self, width: Option<u32>) {
        self.lock().viewport = width;
    }

    pub fn set_barrier(&self, barrier: Arc<Barrier>) {
        self.lock().barrier = Some(barrier);
    }

    pub fn remove_asset(&self, path: &str) {
        self.lock().assets.remove(path);
    }

    pub fn fail_env(&self, msg: &str) {
        self.lock().fail_env = Some(msg.to_string());
    }

    pub fn fail_page_tree(&self, msg: &str) {
        self.lock().fail_page_tree = Some(msg.to_string());
    }

    pub fn fail_show_panel(&self, msg: &str) {
        self.lock().fail_show_panel = Some(msg.to_string());
    }

    pub fn fail_hide_panel(&self, msg: &str) {
        self.lock().fail_hide_panel = Some(msg.to_string());
    }

    pub fn fail_set_enabled(&self, msg: &str) {
        self.lock().fail_set_enabled = Some(msg.to_string());
    }

    async fn rendezvous(&self) {
        let barrier = self.lock().barrier.clone();
        if let Some(barrier) = barrier {
            barrier.wait().await;
        }
    }
}

#[async_trait]
impl AssetStore for MockHost {
    async fn read_asset(&self, plugin_id: &str, path: &str) -> Result<String> {
        self.lock()
            .assets
            .get(path)
            .cloned()
            .ok_or_else(|| {
                TreeViewError::AssetNotFound {
                    plugin: plugin_id.to_string(),
                    path: path.to_string(),
                }
                .into()
            })
    }
}

#[async_trait]
impl PanelHost for MockHost {
    async fn show_panel(&self, position: Position, size: f64, html: &str, script: &str) -> Result<()> {
        let mut inner = self.lock();
        if let Some(msg) = &inner.fail_show_panel {
            return Err(anyhow!(msg.clone()));
        }
        inner.calls.push(Call::ShowPanel(position));
        inner.last_payload = Some((html.to_string(), script.to_string()));
        inner.last_size = Some(size);
        Ok(())
    }

    async fn hide_panel(&self, position: Position) -> Result<()> {
        let mut inner = self.lock();
        if let Some(msg) = &inner.fail_hide_panel {
            return Err(anyhow!(msg.clone()));
        }
        inner.calls.push(Call::HidePanel(position));
        Ok(())
    }
}

#[async_trait]
impl Environment for MockHost {
    async fn env(&self) -> Result<HostEnv> {
        let inner = self.lock();
        if let Some(msg) = &inner.fail_env {
            return Err(anyhow!(msg.clone()));
        }
        Ok(if inner.server {
            HostEnv::Server
        } else {
            HostEnv::Client
        })
    }

    fn viewport_width(&self) -> Option<u32> {
        let inner = self.lock();
        if inner.server { None } else { inner.viewport }
    }
}

#[async_trait]
impl PageTreeProvider for MockHost {
    async fn page_tree(&self, _config: &TreeViewConfig) -> Result<PageTree> {
        self.rendezvous().await;
        let inner = self.lock();
        if let Some(msg) = &inner.fail_page_tree {
            return Err(anyhow!(msg.clone()));
        }
        Ok(inner.tree.clone())
    }
}

#[async_trait]
impl ConfigProvider for MockHost {
    async fn plug_config(&self) -> Result<TreeViewConfig> {
        Ok(self.lock().config.clone())
    }

    async fn custom_styles(&self) -> Result<Option<String>> {
        self.rendezvous().await;
        Ok(self.lock().custom_styles.clone())
    }
}

#[async_trait]
impl PreferenceStore for MockHost {
    async fn is_tree_view_enabled(&self) -> Result<bool> {
        Ok(self.lock().enabled)
    }

    async fn set_tree_view_enabled(&self, enabled: bool) -> Result<()> {
        let mut inner = self.lock();
        if let Some(msg) = &inner.fail_set_enabled {
            return Err(anyhow!(msg.clone()));
        }
        inner.enabled = enabled;
        inner.calls.push(Call::SetEnabled(enabled));
        Ok(())
    }
}
