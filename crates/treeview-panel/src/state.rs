use treeview_core::Position;

/// What the panel is currently rendered as, for this session.
///
/// Independent of the persisted preference: after a restart the preference
/// may say "enabled" while nothing is shown yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibilityState {
    current: Option<Position>,
}

impl VisibilityState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a panel the host already shows (e.g. restored from disk).
    pub fn shown_at(position: Position) -> Self {
        Self {
            current: Some(position),
        }
    }

    pub fn current(&self) -> Option<Position> {
        self.current
    }

    pub(crate) fn mark_shown(&mut self, position: Position) {
        self.current = Some(position);
    }

    pub(crate) fn mark_hidden(&mut self) {
        self.current = None;
    }
}
