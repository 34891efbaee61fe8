use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::TreeViewError;

// ── Position ─────────────────────────────────────────────────────────

/// Where the host renders the tree panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Position {
    /// Left-hand side panel.
    #[default]
    Lhs,
    /// Right-hand side panel.
    Rhs,
    /// Bottom panel.
    Bhs,
    /// Modal overlay. Used as the fallback on narrow viewports.
    Modal,
}

impl Position {
    pub const ALL: [Position; 4] = [Position::Lhs, Position::Rhs, Position::Bhs, Position::Modal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Lhs => "lhs",
            Position::Rhs => "rhs",
            Position::Bhs => "bhs",
            Position::Modal => "modal",
        }
    }
}

/// Accepts `left`/`right`/`bottom` as aliases, case-insensitively.
impl FromStr for Position {
    type Err = TreeViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lhs" | "left" => Ok(Position::Lhs),
            "rhs" | "right" => Ok(Position::Rhs),
            "bhs" | "bottom" => Ok(Position::Bhs),
            "modal" => Ok(Position::Modal),
            _ => Err(TreeViewError::InvalidPosition(s.to_string())),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Position {
    type Error = TreeViewError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Position> for String {
    fn from(value: Position) -> Self {
        value.as_str().to_string()
    }
}

// ── Config ───────────────────────────────────────────────────────────

/// Drag-and-drop settings forwarded to the client runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DragAndDropConfig {
    pub enabled: bool,
    pub confirm_on_rename: bool,
}

impl Default for DragAndDropConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            confirm_on_rename: true,
        }
    }
}

/// User-facing tree view settings.
///
/// Every key is optional in the config file; missing keys take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TreeViewConfig {
    pub position: Position,
    /// Relative panel size handed to the host.
    pub size: f64,
    /// Switch to a modal on narrow viewports.
    pub auto_mobile_mode: bool,
    /// Viewport width in pixels at or below which the modal is used.
    pub mobile_threshold: u32,
    pub drag_and_drop: DragAndDropConfig,
}

impl Default for TreeViewConfig {
    fn default() -> Self {
        Self {
            position: Position::Lhs,
            size: 1.0,
            auto_mobile_mode: false,
            mobile_threshold: 600,
            drag_and_drop: DragAndDropConfig::default(),
        }
    }
}

impl TreeViewConfig {
    /// Parse and validate a TOML config document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: TreeViewConfig = toml::from_str(s).context("Failed to parse treeview config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), TreeViewError> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(TreeViewError::InvalidConfig(format!(
                "size must be a positive number, got {}",
                self.size
            )));
        }
        Ok(())
    }
}

/// Load the config file, falling back to defaults when it does not exist.
pub fn load_config(path: &Path) -> Result<TreeViewConfig> {
    if !path.exists() {
        return Ok(TreeViewConfig::default());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    TreeViewConfig::from_toml_str(&text)
        .with_context(|| format!("Invalid config at {}", path.display()))
}

/// Load user style overrides. A missing or blank file means no overrides.
pub fn load_custom_styles(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let css = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read custom styles at {}", path.display()))?;
    if css.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(css))
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let config = TreeViewConfig::from_toml_str("").unwrap();
        assert_eq!(config, TreeViewConfig::default());
        assert_eq!(config.position, Position::Lhs);
        assert!(config.drag_and_drop.enabled);
    }

    #[test]
    fn test_camel_case_keys() {
        let config = TreeViewConfig::from_toml_str(
            r#"
            position = "rhs"
            size = 2.5
            autoMobileMode = true
            mobileThreshold = 900

            [dragAndDrop]
            enabled = false
            "#,
        )
        .unwrap();
        assert_eq!(config.position, Position::Rhs);
        assert_eq!(config.size, 2.5);
        assert!(config.auto_mobile_mode);
        assert_eq!(config.mobile_threshold, 900);
        assert!(!config.drag_and_drop.enabled);
        assert!(config.drag_and_drop.confirm_on_rename);
    }

    #[test]
    fn test_position_aliases() {
        assert_eq!("left".parse::<Position>().unwrap(), Position::Lhs);
        assert_eq!("RIGHT".parse::<Position>().unwrap(), Position::Rhs);
        assert_eq!(" bottom ".parse::<Position>().unwrap(), Position::Bhs);
        assert_eq!("modal".parse::<Position>().unwrap(), Position::Modal);
        assert!(matches!(
            "top".parse::<Position>(),
            Err(TreeViewError::InvalidPosition(ref s)) if s == "top"
        ));
    }

    #[test]
    fn test_invalid_position_rejected() {
        let err = TreeViewConfig::from_toml_str(r#"position = "top""#).unwrap_err();
        assert!(format!("{err:#}").contains("invalid panel position"));
    }

    #[test]
    fn test_invalid_size_rejected() {
        let err = TreeViewConfig::from_toml_str("size = 0.0").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TreeViewError>(),
            Some(TreeViewError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_position_serializes_lowercase() {
        let json = serde_json::to_string(&Position::Modal).unwrap();
        assert_eq!(json, "\"modal\"");
    }

    #[test]
    fn test_load_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("treeview.toml")).unwrap();
        assert_eq!(config, TreeViewConfig::default());
        assert!(load_custom_styles(&dir.path().join("custom.css")).unwrap().is_none());
    }

    #[test]
    fn test_load_custom_styles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.css");
        std::fs::write(&path, "   \n").unwrap();
        assert!(load_custom_styles(&path).unwrap().is_none());

        std::fs::write(&path, ".treeview-root { color: red; }").unwrap();
        assert_eq!(
            load_custom_styles(&path).unwrap().as_deref(),
            Some(".treeview-root { color: red; }")
        );
    }
}
