//! Line-oriented event loop: one render cycle per line of input.

use std::io::{self, BufRead};

use crate::app::{ChatApp, ChatEvent};
use crate::commands::{parse_slash_command, SlashCommand, HELP_TEXT};
use crate::display::{Display, RenderCommand, INPUT_PLACEHOLDER};
use crate::personality::Personality;

pub const EMPTY_EXPORT_NOTICE: &str = "Nothing to export yet.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Renders the first page, then handles `input` line by line until EOF or `/quit`.
pub fn run<R: BufRead>(app: &mut ChatApp, input: R, display: &mut dyn Display) -> io::Result<()> {
    app.handle_event(ChatEvent::Refresh, display);
    prompt(display);

    for line in input.lines() {
        let line = line?;
        if dispatch_line(app, &line, display) == LoopControl::Exit {
            break;
        }
        prompt(display);
    }

    log::debug!("input loop finished");
    Ok(())
}

/// Maps one input line to a render cycle.
pub fn dispatch_line(app: &mut ChatApp, line: &str, display: &mut dyn Display) -> LoopControl {
    let Some(command) = parse_slash_command(line) else {
        app.handle_event(ChatEvent::UserInput(line.to_string()), display);
        return LoopControl::Continue;
    };

    match command {
        SlashCommand::Help => {
            app.handle_event(ChatEvent::Refresh, display);
            notice(display, HELP_TEXT.to_string());
        }
        SlashCommand::Clear => {
            app.handle_event(ChatEvent::Clear, display);
        }
        SlashCommand::Personality(Some(label)) => {
            app.handle_event(ChatEvent::SelectPersonality(label), display);
        }
        SlashCommand::Personality(None) => {
            app.handle_event(ChatEvent::Refresh, display);
            notice(
                display,
                format!(
                    "Personalities: {} (current: {})",
                    Personality::labels().join(", "),
                    app.personality()
                ),
            );
        }
        SlashCommand::Export => {
            app.handle_event(ChatEvent::Refresh, display);
            notice(display, export_text(app));
        }
        SlashCommand::Quit => return LoopControl::Exit,
        SlashCommand::Unknown(name) => {
            app.handle_event(ChatEvent::Refresh, display);
            notice(display, format!("Unknown command {name}. {HELP_TEXT}"));
        }
    }

    LoopControl::Continue
}

/// Transcript as pretty JSON, or a short note when there is nothing to export.
fn export_text(app: &ChatApp) -> String {
    let Some(store) = app.store().filter(|store| !store.is_empty()) else {
        return EMPTY_EXPORT_NOTICE.to_string();
    };

    match store.to_json() {
        Ok(json) => json,
        Err(error) => {
            log::error!("failed to export transcript: {error}");
            format!("Export failed: {error}")
        }
    }
}

fn notice(display: &mut dyn Display, text: String) {
    display.render(RenderCommand::Notice { text });
}

fn prompt(display: &mut dyn Display) {
    display.render(RenderCommand::InputPrompt {
        placeholder: INPUT_PLACEHOLDER.to_string(),
    });
}
