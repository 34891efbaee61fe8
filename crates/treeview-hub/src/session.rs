//! Interactive session: read commands from stdin, coalesce resizes.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use treeview_panel::{
    CommandOutcome, HostEvent, PanelController, RESIZE_DEBOUNCE, ResizeDebouncer, ResizeSettled,
    ShowIfEnabled, TreeViewCommand, dispatch,
};

use crate::host::LocalHost;

/// One parsed line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionInput {
    Command(TreeViewCommand),
    Event(HostEvent),
    Resize(u32),
    Status,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse_line(line: &str) -> SessionInput {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return SessionInput::Empty;
    };
    match (head, words.next()) {
        ("quit" | "exit", None) => SessionInput::Quit,
        ("status", None) => SessionInput::Status,
        ("help", None) => SessionInput::Help,
        ("resize", Some(width)) => match width.parse() {
            Ok(width) => SessionInput::Resize(width),
            Err(_) => SessionInput::Unknown(line.trim().to_string()),
        },
        ("invoke", Some(name)) => match TreeViewCommand::from_function_name(name) {
            Some(command) => SessionInput::Command(command),
            None => SessionInput::Unknown(line.trim().to_string()),
        },
        ("event", Some(name)) => match HostEvent::from_event_name(name) {
            Some(event) => SessionInput::Event(event),
            None => SessionInput::Unknown(line.trim().to_string()),
        },
        (word, None) => match TreeViewCommand::from_cli_word(word) {
            Some(command) => SessionInput::Command(command),
            None => SessionInput::Unknown(line.trim().to_string()),
        },
        _ => SessionInput::Unknown(line.trim().to_string()),
    }
}

/// Run until stdin closes or `quit`.
///
/// Starts with the `editor:init` hook. `resize <px>` updates the viewport
/// immediately but only re-places the panel once resizing goes quiet.
pub async fn run(controller: &mut PanelController<LocalHost>) -> Result<()> {
    let (mut debouncer, mut settled) = ResizeDebouncer::new(RESIZE_DEBOUNCE);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_hook(&controller.show_if_enabled().await);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle_input(controller, &mut debouncer, parse_line(&line)).await {
                    break;
                }
            }
            Some(ResizeSettled) = settled.recv() => {
                print_hook(&controller.show_if_enabled().await);
            }
        }
    }

    debouncer.cancel();
    Ok(())
}

/// Apply one input line. Returns `false` when the session should end.
///
/// Failures are printed and the session keeps going.
async fn handle_input(
    controller: &mut PanelController<LocalHost>,
    debouncer: &mut ResizeDebouncer,
    input: SessionInput,
) -> bool {
    match input {
        SessionInput::Command(command) => run_command(controller, command).await,
        SessionInput::Event(event) => run_command(controller, event.command()).await,
        SessionInput::Resize(width) => {
            controller.host().set_viewport_width(Some(width));
            debouncer.notify();
        }
        SessionInput::Status => {
            if let Err(err) = crate::print_status(controller).await {
                eprintln!("Error: {err:#}");
            }
        }
        SessionInput::Help => print_help(),
        SessionInput::Quit => return false,
        SessionInput::Empty => {}
        SessionInput::Unknown(input) => eprintln!("Unknown input: {input}"),
    }
    true
}

async fn run_command(controller: &mut PanelController<LocalHost>, command: TreeViewCommand) {
    match dispatch(controller, command).await {
        Ok(CommandOutcome::Hook(outcome)) => print_hook(&outcome),
        Ok(outcome) => crate::print_outcome(&outcome),
        Err(err) => eprintln!("Error: {err:#}"),
    }
}

fn print_help() {
    for command in TreeViewCommand::ALL {
        let label = command.label().unwrap_or("(event hook)");
        match command.key_binding() {
            Some(keys) => println!("  invoke {:<24} {label} [{keys}]", command.function_name()),
            None => println!("  invoke {:<24} {label}", command.function_name()),
        }
    }
    println!("  resize <px> | event <name> | status | quit");
}

fn print_hook(outcome: &ShowIfEnabled) {
    match outcome {
        ShowIfEnabled::Shown(position) => println!("tree view shown ({position})"),
        ShowIfEnabled::SkippedDisabled => println!("tree view disabled"),
        ShowIfEnabled::SkippedHeadless => println!("headless host, tree view skipped"),
        // Already logged by the controller.
        ShowIfEnabled::Suppressed(_) => {}
    }
}
