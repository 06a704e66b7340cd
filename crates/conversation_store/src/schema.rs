use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::error::ConversationStoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }

    /// Speaker name shown in transcript captions.
    #[must_use]
    pub fn caption_label(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Assistant => "Bot",
        }
    }
}

/// One transcript entry. Content is opaque to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub timestamp: String,
}

impl Message {
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Wall-clock time the message was stamped with, if the stored string parses.
    #[must_use]
    pub fn parsed_timestamp(&self) -> Option<PrimitiveDateTime> {
        parse_timestamp(&self.timestamp)
    }
}

/// Parses an RFC3339 timestamp, or an ISO-8601 date-time without offset.
///
/// The result keeps the wall-clock fields as written; no offset conversion
/// takes place.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<PrimitiveDateTime> {
    let value = value.trim();
    if let Ok(with_offset) = OffsetDateTime::parse(value, &Rfc3339) {
        return Some(PrimitiveDateTime::new(with_offset.date(), with_offset.time()));
    }

    PrimitiveDateTime::parse(value, &Iso8601::DEFAULT).ok()
}

/// Local UTC offset, determined once per process.
///
/// The offset can only be read reliably while the process is single-threaded,
/// so binaries call this before starting any runtime. UTC is used when it
/// cannot be determined.
pub fn local_offset() -> UtcOffset {
    static OFFSET: OnceLock<UtcOffset> = OnceLock::new();
    *OFFSET.get_or_init(|| UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC))
}

/// Current local time as RFC3339.
pub fn now_timestamp() -> Result<String, ConversationStoreError> {
    OffsetDateTime::now_utc()
        .to_offset(local_offset())
        .format(&Rfc3339)
        .map_err(ConversationStoreError::ClockFormat)
}
