#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Help,
    Clear,
    Personality(Option<String>),
    Export,
    Quit,
    Unknown(String),
}

pub const HELP_TEXT: &str =
    "Commands: /help, /clear, /personality [Friendly|Professional|Funny], /export, /quit";

pub fn parse_slash_command(input: &str) -> Option<SlashCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let mut words = trimmed.split_whitespace();
    let command = words.next().unwrap_or(trimmed).to_string();
    let argument = words.collect::<Vec<_>>().join(" ");
    let argument = (!argument.is_empty()).then_some(argument);

    let parsed = match command.as_str() {
        "/help" => SlashCommand::Help,
        "/clear" => SlashCommand::Clear,
        "/personality" => SlashCommand::Personality(argument),
        "/export" => SlashCommand::Export,
        "/quit" | "/exit" => SlashCommand::Quit,
        _ => SlashCommand::Unknown(command),
    };

    Some(parsed)
}
