use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConversationStoreError {
    #[error("cannot append a {role} message with empty content")]
    EmptyContent { role: &'static str },

    #[error("failed to format current local timestamp as RFC3339: {0}")]
    ClockFormat(#[source] time::error::Format),

    #[error("failed to serialize transcript: {0}")]
    JsonSerialize(#[source] serde_json::Error),
}
