//! Entry points the host can invoke, and the host events bound to them.

use anyhow::Result;

use treeview_core::{Position, TreeViewHost};

use crate::controller::{PanelController, ShowIfEnabled};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeViewCommand {
    Toggle,
    Show,
    Hide,
    ShowIfEnabled,
}

impl TreeViewCommand {
    pub const ALL: [TreeViewCommand; 4] = [
        TreeViewCommand::Toggle,
        TreeViewCommand::Show,
        TreeViewCommand::Hide,
        TreeViewCommand::ShowIfEnabled,
    ];

    /// Name the host (and the client runtime) invokes the command by.
    pub fn function_name(&self) -> &'static str {
        match self {
            TreeViewCommand::Toggle => "treeview.toggle",
            TreeViewCommand::Show => "treeview.show",
            TreeViewCommand::Hide => "treeview.hide",
            TreeViewCommand::ShowIfEnabled => "treeview.showIfEnabled",
        }
    }

    /// Command palette label. `ShowIfEnabled` is event-only and has none.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            TreeViewCommand::Toggle => Some("Tree View: Toggle"),
            TreeViewCommand::Show => Some("Tree View: Show"),
            TreeViewCommand::Hide => Some("Tree View: Hide"),
            TreeViewCommand::ShowIfEnabled => None,
        }
    }

    pub fn key_binding(&self) -> Option<&'static str> {
        match self {
            TreeViewCommand::Toggle => Some("Ctrl-Alt-b"),
            _ => None,
        }
    }

    pub fn from_function_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.function_name() == name)
    }

    /// Parse the short form used on the command line (`show-if-enabled`).
    pub fn from_cli_word(word: &str) -> Option<Self> {
        match word {
            "toggle" => Some(TreeViewCommand::Toggle),
            "show" => Some(TreeViewCommand::Show),
            "hide" => Some(TreeViewCommand::Hide),
            "show-if-enabled" => Some(TreeViewCommand::ShowIfEnabled),
            _ => None,
        }
    }
}

/// Host lifecycle events the tree view listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    EditorInit,
    PageLoaded,
}

impl HostEvent {
    pub fn event_name(&self) -> &'static str {
        match self {
            HostEvent::EditorInit => "editor:init",
            HostEvent::PageLoaded => "editor:pageLoaded",
        }
    }

    pub fn from_event_name(name: &str) -> Option<Self> {
        match name {
            "editor:init" => Some(HostEvent::EditorInit),
            "editor:pageLoaded" => Some(HostEvent::PageLoaded),
            _ => None,
        }
    }

    /// Both events re-render an enabled tree.
    pub fn command(&self) -> TreeViewCommand {
        TreeViewCommand::ShowIfEnabled
    }
}

/// What a dispatched command left behind.
#[derive(Debug)]
pub enum CommandOutcome {
    /// Interactive command finished; panel position afterwards.
    Done(Option<Position>),
    Hook(ShowIfEnabled),
}

impl CommandOutcome {
    pub fn position(&self) -> Option<Position> {
        match self {
            CommandOutcome::Done(position) => *position,
            CommandOutcome::Hook(ShowIfEnabled::Shown(position)) => Some(*position),
            CommandOutcome::Hook(_) => None,
        }
    }
}

/// Run a command against the controller.
///
/// Interactive commands surface their errors; the hook never does.
pub async fn dispatch<H: TreeViewHost>(
    controller: &mut PanelController<H>,
    command: TreeViewCommand,
) -> Result<CommandOutcome> {
    match command {
        TreeViewCommand::Toggle => controller.toggle().await?,
        TreeViewCommand::Show => {
            controller.show().await?;
        }
        TreeViewCommand::Hide => {
            controller.hide().await?;
        }
        TreeViewCommand::ShowIfEnabled => {
            return Ok(CommandOutcome::Hook(controller.show_if_enabled().await));
        }
    }
    Ok(CommandOutcome::Done(controller.current_position()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockHost;

    #[test]
    fn test_function_name_round_trip() {
        for command in TreeViewCommand::ALL {
            assert_eq!(
                TreeViewCommand::from_function_name(command.function_name()),
                Some(command)
            );
        }
        assert_eq!(TreeViewCommand::from_function_name("treeview.nope"), None);
    }

    #[test]
    fn test_cli_words() {
        assert_eq!(
            TreeViewCommand::from_cli_word("show-if-enabled"),
            Some(TreeViewCommand::ShowIfEnabled)
        );
        assert_eq!(TreeViewCommand::from_cli_word("Toggle"), None);
    }

    #[test]
    fn test_events_map_to_hook() {
        for name in ["editor:init", "editor:pageLoaded"] {
            let event = HostEvent::from_event_name(name).unwrap();
            assert_eq!(event.event_name(), name);
            assert_eq!(event.command(), TreeViewCommand::ShowIfEnabled);
        }
    }

    #[test]
    fn test_only_toggle_has_binding() {
        assert_eq!(TreeViewCommand::Toggle.key_binding(), Some("Ctrl-Alt-b"));
        assert!(TreeViewCommand::ShowIfEnabled.label().is_none());
        assert!(TreeViewCommand::Hide.key_binding().is_none());
    }

    #[tokio::test]
    async fn test_dispatch() {
        let mut controller = PanelController::new(MockHost::new());

        let outcome = dispatch(&mut controller, TreeViewCommand::Show).await.unwrap();
        assert_eq!(outcome.position(), Some(Position::Lhs));

        let outcome = dispatch(&mut controller, TreeViewCommand::Hide).await.unwrap();
        assert_eq!(outcome.position(), None);

        let outcome = dispatch(&mut controller, TreeViewCommand::ShowIfEnabled)
            .await
            .unwrap();
        assert!(matches!(outcome, CommandOutcome::Hook(ShowIfEnabled::SkippedDisabled)));
    }

    #[tokio::test]
    async fn test_dispatch_surfaces_interactive_errors() {
        let mut controller = PanelController::new(MockHost::new());
        controller.host().fail_page_tree("boom");
        assert!(dispatch(&mut controller, TreeViewCommand::Toggle).await.is_err());

        let outcome = dispatch(&mut controller, TreeViewCommand::ShowIfEnabled)
            .await
            .unwrap();
        assert!(matches!(outcome, CommandOutcome::Hook(ShowIfEnabled::SkippedDisabled)));
    }
}
