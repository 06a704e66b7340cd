use std::io;
use std::sync::Arc;

use persona_chat::app::{ChatApp, ClientBoundary};
use persona_chat::config::AppConfig;
use persona_chat::display::TerminalDisplay;
use persona_chat::logging::init_logging;
use persona_chat::runtime;

fn main() -> io::Result<()> {
    // Read while still single-threaded.
    let offset = conversation_store::local_offset();
    let dotenv = dotenvy::dotenv();

    let config = AppConfig::from_env().map_err(io::Error::other)?;
    init_logging(&config.log)?;
    match dotenv {
        Ok(path) => log::debug!("loaded environment from {}", path.display()),
        Err(error) if error.not_found() => {}
        Err(error) => log::warn!("failed to load .env: {error}"),
    }
    log::info!(
        "starting persona_chat (provider={}, mode={}, utc_offset={offset})",
        config.provider,
        config.mode
    );

    let boundary = Arc::new(ClientBoundary::from_config(&config));
    let mut app = ChatApp::new(boundary, config.mode);

    let stdout = io::stdout();
    let mut display = TerminalDisplay::new(stdout.lock());
    let stdin = io::stdin();
    runtime::run(&mut app, stdin.lock(), &mut display)
}
