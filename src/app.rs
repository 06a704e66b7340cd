use std::sync::Arc;

use chat_provider::{
    generator_for_mode, GenerationError, GenerationMode, GenerationRequest, ModelTransport,
    ProviderInitError,
};
use conversation_store::{ConversationStore, Role};
use once_cell::sync::OnceCell;

use crate::config::{resolve_api_key, AppConfig, ConfigError, ResolvedCredential};
use crate::display::{Display, RenderCommand, CLEAR_BUTTON_LABEL, PAGE_TITLE, SPINNER_LABEL};
use crate::personality::Personality;
use crate::providers;
use crate::session::SessionContext;
use crate::transcript::{message_command, render_transcript};

pub const BLOCKED_REPLY: &str = "Sorry, my response was blocked due to safety settings.";
pub const STATELESS_API_ERROR_PREFIX: &str =
    "API Error: Could not get a response. Please check your API key and connection. Details: ";
pub const SESSION_API_ERROR_REPLY: &str =
    "Sorry, I ran into a problem reaching the model. Please try again.";

pub type CredentialLoader = Box<dyn Fn() -> Result<ResolvedCredential, ConfigError> + Send + Sync>;
pub type TransportFactory =
    Box<dyn Fn(&str) -> Result<Arc<dyn ModelTransport>, ProviderInitError> + Send + Sync>;

/// Process-wide LLM client: the credential is checked on every call, the
/// transport is built at most once and then shared.
///
/// A failed attempt leaves the boundary uninitialized so the next cycle can
/// try again.
pub struct ClientBoundary {
    load_credential: CredentialLoader,
    build_transport: TransportFactory,
    transport: OnceCell<Arc<dyn ModelTransport>>,
}

impl ClientBoundary {
    #[must_use]
    pub fn new(load_credential: CredentialLoader, build_transport: TransportFactory) -> Self {
        Self {
            load_credential,
            build_transport,
            transport: OnceCell::new(),
        }
    }

    /// Secrets file, then environment, then the provider named in `config`.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let secrets_path = config.secrets_path.clone();
        let config = config.clone();
        Self::new(
            Box::new(move || resolve_api_key(&secrets_path)),
            Box::new(move |api_key| providers::transport_for(&config, api_key)),
        )
    }

    /// Resolves the credential, then returns the shared transport.
    ///
    /// Errors when the credential is missing or unreadable, even after the
    /// transport has been built.
    pub fn transport(&self) -> Result<Arc<dyn ModelTransport>, ConfigError> {
        let credential = (self.load_credential)()?;

        self.transport
            .get_or_try_init(|| -> Result<Arc<dyn ModelTransport>, ConfigError> {
                log::info!("API key resolved from {:?}", credential.source);

                let transport = (self.build_transport)(&credential.value)
                    .map_err(|error| ConfigError::ClientInit(error.to_string()))?;
                let profile = transport.profile();
                log::info!(
                    "client initialized (provider={}, model={})",
                    profile.provider_id,
                    profile.model_id
                );
                Ok(transport)
            })
            .map(Arc::clone)
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.transport.get().is_some()
    }
}

/// One user interaction; each event drives exactly one render cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    Refresh,
    UserInput(String),
    SelectPersonality(String),
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Rendered,
    /// The configuration gate failed; nothing below the sidebar was rendered.
    Halted,
}

/// Maps a generation failure to the assistant text stored in the transcript.
#[must_use]
pub fn error_reply(mode: GenerationMode, error: &GenerationError) -> String {
    match (error, mode) {
        (GenerationError::Blocked { .. }, _) => BLOCKED_REPLY.to_string(),
        (GenerationError::Api(message), GenerationMode::Stateless) => {
            format!("{STATELESS_API_ERROR_PREFIX}{message}")
        }
        (GenerationError::Api(_), GenerationMode::SessionBound) => {
            SESSION_API_ERROR_REPLY.to_string()
        }
    }
}

pub struct ChatApp {
    boundary: Arc<ClientBoundary>,
    mode: GenerationMode,
    personality: Personality,
    session: Option<SessionContext>,
}

impl ChatApp {
    #[must_use]
    pub fn new(boundary: Arc<ClientBoundary>, mode: GenerationMode) -> Self {
        Self {
            boundary,
            mode,
            personality: Personality::default(),
            session: None,
        }
    }

    #[must_use]
    pub fn mode(&self) -> GenerationMode {
        self.mode
    }

    #[must_use]
    pub fn personality(&self) -> Personality {
        self.personality
    }

    #[must_use]
    pub fn session(&self) -> Option<&SessionContext> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn store(&self) -> Option<&ConversationStore> {
        self.session.as_ref().map(SessionContext::store)
    }

    pub fn handle_event(&mut self, event: ChatEvent, display: &mut dyn Display) -> CycleOutcome {
        display.render(RenderCommand::Header {
            title: PAGE_TITLE.to_string(),
        });
        display.render(RenderCommand::Divider);

        let mut notice = None;
        let mut user_text = None;
        match event {
            ChatEvent::Refresh => {}
            ChatEvent::SelectPersonality(label) => match label.parse::<Personality>() {
                Ok(personality) => {
                    log::debug!("personality set to {personality}");
                    self.personality = personality;
                }
                Err(message) => notice = Some(message),
            },
            ChatEvent::Clear => {
                if let Some(session) = self.session.as_mut() {
                    session.clear();
                    log::info!("conversation cleared");
                }
            }
            ChatEvent::UserInput(text) => {
                if !text.trim().is_empty() {
                    user_text = Some(text);
                }
            }
        }

        display.render(RenderCommand::PersonalitySelector {
            labels: Personality::labels(),
            selected: self.personality.label().to_string(),
        });
        display.render(RenderCommand::ClearButton {
            label: CLEAR_BUTTON_LABEL.to_string(),
        });
        display.render(RenderCommand::Divider);
        if let Some(text) = notice {
            display.render(RenderCommand::Notice { text });
        }

        let transport = match self.boundary.transport() {
            Ok(transport) => transport,
            Err(error) => {
                log::warn!("configuration gate failed: {error}");
                display.render(RenderCommand::ErrorBanner {
                    message: error.to_string(),
                });
                return CycleOutcome::Halted;
            }
        };

        let mode = self.mode;
        let session = self
            .session
            .get_or_insert_with(|| SessionContext::new(generator_for_mode(mode, transport)));
        render_transcript(session.store(), display);

        if let Some(text) = user_text {
            respond(session, mode, self.personality, text, display);
        }

        CycleOutcome::Rendered
    }
}

fn respond(
    session: &mut SessionContext,
    mode: GenerationMode,
    personality: Personality,
    text: String,
    display: &mut dyn Display,
) {
    match session.store_mut().push(Role::User, text.clone()) {
        Ok(message) => display.render(message_command(message)),
        Err(error) => {
            log::error!("failed to record user message: {error}");
            display.render(RenderCommand::ErrorBanner {
                message: format!("Error: {error}"),
            });
            return;
        }
    }

    display.render(RenderCommand::SpinnerStart {
        label: SPINNER_LABEL.to_string(),
    });
    let request = GenerationRequest::new(personality.directive(), text);
    let reply = match session.generator_mut().generate(&request) {
        Ok(reply) => reply,
        Err(error) => {
            log::warn!("generation failed ({mode}): {error}");
            error_reply(mode, &error)
        }
    };
    display.render(RenderCommand::SpinnerStop);

    match session.store_mut().push(Role::Assistant, reply) {
        Ok(message) => display.render(message_command(message)),
        Err(error) => {
            log::error!("failed to record assistant message: {error}");
            display.render(RenderCommand::ErrorBanner {
                message: format!("Error: {error}"),
            });
        }
    }
}
