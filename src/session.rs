use chat_provider::ResponseGenerator;
use conversation_store::ConversationStore;

/// Per-user state that survives across render cycles: the transcript and the
/// generator bound to the shared client.
pub struct SessionContext {
    store: ConversationStore,
    generator: Box<dyn ResponseGenerator>,
}

impl SessionContext {
    #[must_use]
    pub fn new(generator: Box<dyn ResponseGenerator>) -> Self {
        Self {
            store: ConversationStore::new(),
            generator,
        }
    }

    #[must_use]
    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ConversationStore {
        &mut self.store
    }

    pub fn generator_mut(&mut self) -> &mut dyn ResponseGenerator {
        self.generator.as_mut()
    }

    /// Empties the transcript and drops every turn the generator remembers.
    pub fn clear(&mut self) {
        self.store.clear();
        self.generator.reset();
    }
}
