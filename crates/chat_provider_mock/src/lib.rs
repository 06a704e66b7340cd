//! Deterministic mock implementation of the `chat_provider` transport boundary.
//!
//! This crate contains no network logic and is intended for local development
//! and contract-level testing. Every payload it receives is recorded so callers
//! can assert exactly what would have left the process.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use chat_provider::{GenerationError, ModelTransport, ProviderProfile, Turn};

/// Stable provider identifier used for explicit startup selection.
pub const MOCK_PROVIDER_ID: &str = "mock";

/// Transport that answers from a script and records every request.
#[derive(Debug)]
pub struct ScriptedTransport {
    model_id: String,
    script: Mutex<VecDeque<Result<String, GenerationError>>>,
    sent: Mutex<Vec<Vec<Turn>>>,
}

impl ScriptedTransport {
    /// Creates a transport that echoes the latest user turn once the script runs out.
    #[must_use]
    pub fn new() -> Self {
        Self::with_script(Vec::new())
    }

    /// Creates a transport that returns `script` outcomes in order.
    #[must_use]
    pub fn with_script(script: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            model_id: "mock".to_string(),
            script: Mutex::new(script.into()),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Creates a transport whose replies are the given texts, in order.
    #[must_use]
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_script(replies.into_iter().map(|reply| Ok(reply.into())).collect())
    }

    /// Queues one more outcome after the current script.
    pub fn push_outcome(&self, outcome: Result<String, GenerationError>) {
        lock_unpoisoned(&self.script).push_back(outcome);
    }

    /// Returns every payload received so far, oldest first.
    #[must_use]
    pub fn sent_payloads(&self) -> Vec<Vec<Turn>> {
        lock_unpoisoned(&self.sent).clone()
    }

    /// Returns the most recent payload, if any call was made.
    #[must_use]
    pub fn last_payload(&self) -> Option<Vec<Turn>> {
        lock_unpoisoned(&self.sent).last().cloned()
    }

    /// Returns the number of calls made through this transport.
    #[must_use]
    pub fn call_count(&self) -> usize {
        lock_unpoisoned(&self.sent).len()
    }
}

impl Default for ScriptedTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelTransport for ScriptedTransport {
    fn profile(&self) -> ProviderProfile {
        ProviderProfile {
            provider_id: MOCK_PROVIDER_ID.to_string(),
            model_id: self.model_id.clone(),
        }
    }

    fn send(&self, turns: &[Turn]) -> Result<String, GenerationError> {
        lock_unpoisoned(&self.sent).push(turns.to_vec());

        if let Some(outcome) = lock_unpoisoned(&self.script).pop_front() {
            return outcome;
        }

        let latest = turns.last().map(|turn| turn.text.as_str()).unwrap_or("");
        Ok(format!("(mock) You said: {}", last_line(latest)))
    }
}

fn last_line(text: &str) -> &str {
    text.lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .unwrap_or(text)
        .trim()
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_exposes_explicit_mock_provider_identity() {
        let profile = ScriptedTransport::new().profile();

        assert_eq!(profile.provider_id, MOCK_PROVIDER_ID);
        assert_eq!(profile.model_id, "mock");
    }

    #[test]
    fn scripted_outcomes_are_returned_in_order_then_echo() {
        let transport = ScriptedTransport::with_script(vec![
            Ok("Hi there!".to_string()),
            Err(GenerationError::blocked("SAFETY")),
        ]);

        assert_eq!(transport.send(&[Turn::user("Hello")]), Ok("Hi there!".to_string()));
        assert_eq!(
            transport.send(&[Turn::user("bad")]),
            Err(GenerationError::blocked("SAFETY"))
        );
        assert_eq!(
            transport.send(&[Turn::user("Be kind.\n\nagain")]),
            Ok("(mock) You said: again".to_string())
        );
    }

    #[test]
    fn every_payload_is_recorded() {
        let transport = ScriptedTransport::with_replies(["a", "b"]);

        transport
            .send(&[Turn::user("first")])
            .expect("scripted reply");
        transport
            .send(&[Turn::user("first"), Turn::model("a"), Turn::user("second")])
            .expect("scripted reply");

        assert_eq!(transport.call_count(), 2);
        assert_eq!(transport.sent_payloads()[0], vec![Turn::user("first")]);
        assert_eq!(
            transport.last_payload().map(|turns| turns.len()),
            Some(3)
        );
    }

    #[test]
    fn pushed_outcomes_extend_the_script() {
        let transport = ScriptedTransport::new();
        transport.push_outcome(Err(GenerationError::api("boom")));

        assert_eq!(
            transport.send(&[Turn::user("x")]),
            Err(GenerationError::api("boom"))
        );
    }
}
