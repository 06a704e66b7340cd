//! Replays the conversation store into the display.

use conversation_store::{parse_timestamp, ConversationStore, Message, Role};
use time::PrimitiveDateTime;

use crate::display::{Display, RenderCommand};

pub const TIME_FALLBACK: &str = "Time N/A";

/// `"{Role} at {HH:MM}"`, or `"{Role} at Time N/A"` when `timestamp` does not parse.
#[must_use]
pub fn caption(role: Role, timestamp: &str) -> String {
    let at = parse_timestamp(timestamp)
        .map(clock_label)
        .unwrap_or_else(|| TIME_FALLBACK.to_string());
    format!("{} at {at}", role.caption_label())
}

fn clock_label(at: PrimitiveDateTime) -> String {
    format!("{:02}:{:02}", at.hour(), at.minute())
}

#[must_use]
pub fn message_command(message: &Message) -> RenderCommand {
    RenderCommand::ChatMessage {
        role: message.role,
        caption: caption(message.role, &message.timestamp),
        body: message.content.clone(),
    }
}

/// Emits one chat block per stored message, in insertion order.
pub fn render_transcript(store: &ConversationStore, display: &mut dyn Display) {
    for message in store.replay() {
        display.render(message_command(message));
    }
}
