pub mod assets;
pub mod commands;
pub mod controller;
pub mod debounce;
pub mod payload;
pub mod position;
pub mod state;

#[cfg(test)]
mod test_support;

pub use commands::{CommandOutcome, HostEvent, TreeViewCommand, dispatch};
pub use controller::{PanelController, ShowIfEnabled};
pub use debounce::{RESIZE_DEBOUNCE, ResizeDebouncer, ResizeSettled};
pub use payload::{Payload, assemble_payload};
pub use position::resolve_position;
pub use state::VisibilityState;
