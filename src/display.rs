//! Display boundary: the controller describes each page as an ordered list of
//! render commands and a [`Display`] turns them into output.

use std::io::Write;

use conversation_store::Role;

pub const PAGE_TITLE: &str = "💡 Personal AI Chatbot";
pub const SETTINGS_HEADER: &str = "⚙️ Chat Settings";
pub const PERSONALITY_PROMPT: &str = "Choose Chatbot Personality:";
pub const CLEAR_BUTTON_LABEL: &str = "🗑️ Clear Chat";
pub const SPINNER_LABEL: &str = "Thinking...";
pub const INPUT_PLACEHOLDER: &str = "What is up?";

const SPINNER_FRAME: &str = "⠋";
const DIVIDER_WIDTH: usize = 48;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const CLEAR_LINE: &str = "\r\x1b[2K";
const BOLD: &str = "\x1b[1m";
const DIM_ITALIC: &str = "\x1b[2;3m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCommand {
    /// Starts a new page.
    Header { title: String },
    Divider,
    PersonalitySelector { labels: Vec<String>, selected: String },
    ClearButton { label: String },
    ChatMessage {
        role: Role,
        caption: String,
        body: String,
    },
    SpinnerStart { label: String },
    SpinnerStop,
    ErrorBanner { message: String },
    Notice { text: String },
    /// Marks where the next line of input is read.
    InputPrompt { placeholder: String },
}

/// Render-command sink. Rendering never fails the cycle; sinks that can fail
/// report it on their own.
pub trait Display {
    fn render(&mut self, command: RenderCommand);
}

/// ANSI renderer over any writer.
pub struct TerminalDisplay<W: Write> {
    out: W,
    spinner_active: bool,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            spinner_active: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn format(&mut self, command: RenderCommand) -> String {
        match command {
            RenderCommand::Header { title } => {
                format!("{CLEAR_SCREEN}{BOLD}{title}{RESET}\n")
            }
            RenderCommand::Divider => format!("{}\n", "─".repeat(DIVIDER_WIDTH)),
            RenderCommand::PersonalitySelector { labels, selected } => {
                let choices = labels
                    .iter()
                    .map(|label| {
                        if *label == selected {
                            format!("{BOLD}[{label}]{RESET}")
                        } else {
                            label.clone()
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("  ");
                format!("{SETTINGS_HEADER}  {PERSONALITY_PROMPT} {choices}\n")
            }
            RenderCommand::ClearButton { label } => format!("{label} (/clear)\n"),
            RenderCommand::ChatMessage {
                role,
                caption,
                body,
            } => {
                let marker = match role {
                    Role::User => "🧑",
                    Role::Assistant => "🤖",
                };
                let body = body
                    .lines()
                    .map(|line| format!("   {line}"))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("\n{marker} {DIM_ITALIC}{caption}{RESET}\n{body}\n")
            }
            RenderCommand::SpinnerStart { label } => {
                self.spinner_active = true;
                format!("{CYAN}{SPINNER_FRAME}{RESET} {label}")
            }
            RenderCommand::SpinnerStop => {
                if std::mem::take(&mut self.spinner_active) {
                    CLEAR_LINE.to_string()
                } else {
                    String::new()
                }
            }
            RenderCommand::ErrorBanner { message } => format!("{RED}{message}{RESET}\n"),
            RenderCommand::Notice { text } => format!("{YELLOW}{text}{RESET}\n"),
            RenderCommand::InputPrompt { placeholder } => {
                format!("\n{DIM_ITALIC}{placeholder}{RESET}\n› ")
            }
        }
    }
}

impl<W: Write> Display for TerminalDisplay<W> {
    fn render(&mut self, command: RenderCommand) {
        let text = self.format(command);
        if text.is_empty() {
            return;
        }

        if let Err(error) = self
            .out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush())
        {
            log::warn!("failed to write to terminal: {error}");
        }
    }
}
