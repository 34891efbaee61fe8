use treeview_core::{Position, TreeViewConfig};

/// Pick the panel position for the current viewport.
///
/// `viewport_width` is `None` in headless contexts, which never count as
/// mobile. With adaptive mode on, a width at or below the threshold forces
/// the modal.
pub fn resolve_position(config: &TreeViewConfig, viewport_width: Option<u32>) -> Position {
    if !config.auto_mobile_mode {
        return config.position;
    }
    match viewport_width {
        Some(width) if width <= config.mobile_threshold => Position::Modal,
        _ => config.position,
    }
}
