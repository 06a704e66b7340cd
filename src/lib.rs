//! Terminal chat client for Gemini.
//!
//! ## Configuration
//!
//! The API key is read from `GEMINI_API_KEY`, first in the secrets file
//! (`.persona_chat/secrets.json`, override with `PERSONA_CHAT_SECRETS_PATH`),
//! then in the process environment. A `.env` file in the working directory is
//! loaded at startup.
//!
//! ```json
//! { "GEMINI_API_KEY": "<key>" }
//! ```
//!
//! Optional settings:
//!
//! - `PERSONA_CHAT_PROVIDER=gemini|mock` (the mock echoes input; a key is still required)
//! - `PERSONA_CHAT_MODE=session|stateless`
//! - `PERSONA_CHAT_MODEL`, `PERSONA_CHAT_BASE_URL`, `PERSONA_CHAT_TIMEOUT_SEC`
//! - `PERSONA_CHAT_LOG` (env_logger filter, default `warn`), `PERSONA_CHAT_LOG_FILE`
//!
//! Conversation memory contract: in `session` mode the generator's session
//! handle replays every committed turn to the model; `stateless` mode sends
//! each message on its own. `/clear` drops both the transcript and the handle.

pub mod app;
pub mod commands;
pub mod config;
pub mod display;
pub mod logging;
pub mod personality;
pub mod providers;
pub mod runtime;
pub mod session;
pub mod transcript;
