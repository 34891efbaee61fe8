//! Panel lifecycle: show, hide, toggle and the startup/navigation hook.
//!
//! ```text
//! Hidden   --show() ok-------------> Shown(P)
//! Shown(P) --hide() ok-------------> Hidden
//! Shown(P) --show() resolving P'---> hide(); show() --> Shown(P')
//! Shown(P) --show() resolving P----> Shown(P), re-rendered
//! ```
//!
//! A failed step leaves the state as it was before that step. The host is
//! assumed to serialize UI-triggered commands; `&mut self` keeps a single
//! writer per controller.

use anyhow::{Context, Result};
use tracing::{debug, warn};

use treeview_core::{HostEnv, Position, TreeViewHost};

use crate::assets::load_assets;
use crate::payload::assemble_payload;
use crate::position::resolve_position;
use crate::state::VisibilityState;

/// Result of [`PanelController::show_if_enabled`].
///
/// Keeps "did nothing on purpose" apart from "failed and was swallowed".
#[derive(Debug)]
pub enum ShowIfEnabled {
    /// Headless host, nothing to render.
    SkippedHeadless,
    /// Preference is off.
    SkippedDisabled,
    Shown(Position),
    /// Something failed; already logged.
    Suppressed(anyhow::Error),
}

impl ShowIfEnabled {
    pub fn is_suppressed(&self) -> bool {
        matches!(self, ShowIfEnabled::Suppressed(_))
    }
}

/// Owns the visibility state and drives the host panel.
pub struct PanelController<H> {
    host: H,
    state: VisibilityState,
}

impl<H: TreeViewHost> PanelController<H> {
    pub fn new(host: H) -> Self {
        Self::with_state(host, VisibilityState::new())
    }

    /// Resume with a panel the host is already showing.
    pub fn with_state(host: H, state: VisibilityState) -> Self {
        Self { host, state }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn current_position(&self) -> Option<Position> {
        self.state.current()
    }

    /// Flip the persisted preference: enabled hides, disabled shows.
    pub async fn toggle(&mut self) -> Result<()> {
        let enabled = self
            .host
            .is_tree_view_enabled()
            .await
            .context("Failed to read treeview preference")?;
        if enabled {
            self.hide().await?;
        } else {
            self.show().await?;
        }
        Ok(())
    }

    /// Render the panel at the position resolved for the current viewport.
    ///
    /// Returns the position shown. Fetches run concurrently and the first
    /// failure aborts before anything is rendered.
    pub async fn show(&mut self) -> Result<Position> {
        let config = self
            .host
            .plug_config()
            .await
            .context("Failed to load treeview config")?;
        let position = resolve_position(&config, self.host.viewport_width());

        if let Some(current) = self.state.current().filter(|p| *p != position) {
            debug!(from = %current, to = %position, "treeview moving panel");
            self.hide().await?;
        }

        let host = &self.host;
        let (assets, tree, custom_styles) = tokio::try_join!(
            load_assets(host),
            async {
                host.page_tree(&config)
                    .await
                    .context("Failed to load page tree")
            },
            async {
                host.custom_styles()
                    .await
                    .context("Failed to load custom styles")
            },
        )?;

        let payload = assemble_payload(&tree, &config, &assets, custom_styles.as_deref())?;

        self.host
            .show_panel(position, config.size, &payload.html, &payload.script)
            .await
            .with_context(|| format!("Failed to show treeview panel at {position}"))?;
        self.state.mark_shown(position);
        debug!(%position, pages = tree.page_count(), "treeview panel shown");

        self.host
            .set_tree_view_enabled(true)
            .await
            .context("Treeview panel shown but the preference was not saved")?;

        Ok(position)
    }

    /// Hide the panel. Returns `false` when nothing was shown (no host calls).
    pub async fn hide(&mut self) -> Result<bool> {
        let Some(position) = self.state.current() else {
            return Ok(false);
        };

        self.host
            .hide_panel(position)
            .await
            .with_context(|| format!("Failed to hide treeview panel at {position}"))?;
        self.state.mark_hidden();
        debug!(%position, "treeview panel hidden");

        self.host
            .set_tree_view_enabled(false)
            .await
            .context("Treeview panel hidden but the preference was not saved")?;

        Ok(true)
    }

    /// Startup/navigation hook: show the panel if the user left it open.
    ///
    /// Never fails. Errors are logged and reported as
    /// [`ShowIfEnabled::Suppressed`].
    pub async fn show_if_enabled(&mut self) -> ShowIfEnabled {
        match self.try_show_if_enabled().await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(target: "treeview", error = %format!("{err:#}"), "[treeview] show_if_enabled failed");
                ShowIfEnabled::Suppressed(err)
            }
        }
    }

    async fn try_show_if_enabled(&mut self) -> Result<ShowIfEnabled> {
        let env = self
            .host
            .env()
            .await
            .context("Failed to query host environment")?;
        if env == HostEnv::Server {
            return Ok(ShowIfEnabled::SkippedHeadless);
        }

        let enabled = self
            .host
            .is_tree_view_enabled()
            .await
            .context("Failed to read treeview preference")?;
        if !enabled {
            return Ok(ShowIfEnabled::SkippedDisabled);
        }

        let position = self.show().await?;
        Ok(ShowIfEnabled::Shown(position))
    }
}

// ── Tests ────────────────────────────────────────────────────────────
