#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chat_provider::{GenerationMode, ModelTransport};
use chat_provider_mock::ScriptedTransport;
use persona_chat::app::{ChatApp, ClientBoundary};
use persona_chat::config::{resolve_credential, ConfigError, API_KEY_NAME};
use persona_chat::display::{Display, RenderCommand};

#[derive(Default)]
pub struct RecordingDisplay {
    pub commands: Vec<RenderCommand>,
}

impl Display for RecordingDisplay {
    fn render(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }
}

impl RecordingDisplay {
    pub fn take(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    /// `(caption, body)` of every chat block, in render order.
    pub fn chat_blocks(&self) -> Vec<(String, String)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                RenderCommand::ChatMessage { caption, body, .. } => {
                    Some((caption.clone(), body.clone()))
                }
                _ => None,
            })
            .collect()
    }

    pub fn error_banners(&self) -> Vec<String> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                RenderCommand::ErrorBanner { message } => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn notices(&self) -> Vec<String> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                RenderCommand::Notice { text } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

/// Client boundary over `transport`, with the API key looked up through `env`.
pub struct Harness {
    pub transport: Arc<ScriptedTransport>,
    pub init_calls: Arc<AtomicUsize>,
    pub boundary: Arc<ClientBoundary>,
}

impl Harness {
    pub fn with_env(
        transport: ScriptedTransport,
        env: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        let transport = Arc::new(transport);
        let init_calls = Arc::new(AtomicUsize::new(0));

        let boundary = ClientBoundary::new(
            Box::new(move || resolve_credential(API_KEY_NAME, None, &env)),
            Box::new({
                let transport = Arc::clone(&transport);
                let init_calls = Arc::clone(&init_calls);
                move |_api_key| {
                    init_calls.fetch_add(1, Ordering::SeqCst);
                    Ok(Arc::clone(&transport) as Arc<dyn ModelTransport>)
                }
            }),
        );

        Self {
            transport,
            init_calls,
            boundary: Arc::new(boundary),
        }
    }

    pub fn configured(transport: ScriptedTransport) -> Self {
        Self::with_env(transport, |name| {
            (name == API_KEY_NAME).then(|| "test-key".to_string())
        })
    }

    pub fn unconfigured(transport: ScriptedTransport) -> Self {
        Self::with_env(transport, |_| None)
    }

    pub fn app(&self, mode: GenerationMode) -> ChatApp {
        ChatApp::new(Arc::clone(&self.boundary), mode)
    }

    pub fn init_count(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }
}

pub fn missing_credential_banner() -> String {
    ConfigError::MissingCredential {
        name: API_KEY_NAME.to_string(),
    }
    .to_string()
}
