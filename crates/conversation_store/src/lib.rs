mod error;
mod replay;
mod schema;
mod store;

pub use error::ConversationStoreError;
pub use replay::Replay;
pub use schema::{local_offset, now_timestamp, parse_timestamp, Message, Role};
pub use store::ConversationStore;
