use std::sync::Arc;

use crate::{
    GenerationError, GenerationMode, GenerationRequest, ModelTransport, ProviderProfile,
    ResponseGenerator, Turn,
};

/// Leading instruction of every stateless prompt.
pub const BREVITY_INSTRUCTION: &str = "Respond briefly.";

/// Builds the self-contained prompt used by [`StatelessGenerator`].
#[must_use]
pub fn stateless_prompt(personality: &str, user_text: &str) -> String {
    format!("{BREVITY_INSTRUCTION} {personality} {user_text}")
}

/// Builds the single session message used by [`SessionBoundGenerator`].
#[must_use]
pub fn session_turn_text(personality: &str, user_text: &str) -> String {
    format!("{personality}\n\n{user_text}")
}

/// Returns a boxed generator for `mode` bound to `transport`.
#[must_use]
pub fn generator_for_mode(
    mode: GenerationMode,
    transport: Arc<dyn ModelTransport>,
) -> Box<dyn ResponseGenerator> {
    match mode {
        GenerationMode::Stateless => Box::new(StatelessGenerator::new(transport)),
        GenerationMode::SessionBound => Box::new(SessionBoundGenerator::new(transport)),
    }
}

/// One prompt per call, no memory of prior turns.
pub struct StatelessGenerator {
    transport: Arc<dyn ModelTransport>,
}

impl StatelessGenerator {
    #[must_use]
    pub fn new(transport: Arc<dyn ModelTransport>) -> Self {
        Self { transport }
    }
}

impl ResponseGenerator for StatelessGenerator {
    fn mode(&self) -> GenerationMode {
        GenerationMode::Stateless
    }

    fn profile(&self) -> ProviderProfile {
        self.transport.profile()
    }

    fn generate(&mut self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let prompt = stateless_prompt(&request.personality, &request.user_text);
        let reply = self.transport.send(&[Turn::user(prompt)])?;
        non_empty_reply(reply)
    }
}

/// Opaque conversational memory reused across calls until reset.
///
/// Only the id and the number of committed turns are observable.
#[derive(Debug)]
pub struct SessionHandle {
    id: u64,
    history: Vec<Turn>,
}

impl SessionHandle {
    fn new(id: u64) -> Self {
        Self {
            id,
            history: Vec::new(),
        }
    }

    /// Returns the handle identifier; a new id is issued on every reset.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the number of turns (user and model) the handle remembers.
    #[must_use]
    pub fn turn_count(&self) -> usize {
        self.history.len()
    }

    fn send(
        &mut self,
        transport: &dyn ModelTransport,
        text: String,
    ) -> Result<String, GenerationError> {
        let mut turns = self.history.clone();
        turns.push(Turn::user(text));

        let reply = non_empty_reply(transport.send(&turns)?)?;

        // The exchange is only remembered once the model has answered it.
        self.history = turns;
        self.history.push(Turn::model(reply.clone()));
        Ok(reply)
    }
}

/// Routes every call through a [`SessionHandle`] so the model sees prior turns.
pub struct SessionBoundGenerator {
    transport: Arc<dyn ModelTransport>,
    handle: SessionHandle,
}

impl SessionBoundGenerator {
    #[must_use]
    pub fn new(transport: Arc<dyn ModelTransport>) -> Self {
        Self {
            transport,
            handle: SessionHandle::new(1),
        }
    }

    #[must_use]
    pub fn handle(&self) -> &SessionHandle {
        &self.handle
    }
}

impl ResponseGenerator for SessionBoundGenerator {
    fn mode(&self) -> GenerationMode {
        GenerationMode::SessionBound
    }

    fn profile(&self) -> ProviderProfile {
        self.transport.profile()
    }

    fn generate(&mut self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let text = session_turn_text(&request.personality, &request.user_text);
        self.handle.send(self.transport.as_ref(), text)
    }

    fn reset(&mut self) {
        self.handle = SessionHandle::new(self.handle.id + 1);
    }
}

fn non_empty_reply(reply: String) -> Result<String, GenerationError> {
    if reply.trim().is_empty() {
        return Err(GenerationError::api("the model returned an empty response"));
    }

    Ok(reply)
}
