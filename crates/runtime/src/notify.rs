use std::sync::Arc;

use crate::api::ChatChannel;
use crate::events::{AgentEvent, EventBus};

/// Says things in chat and mirrors them on the event bus.
///
/// Chat failures are logged and swallowed: a lost status message never
/// aborts the work it describes.
#[derive(Clone)]
pub(crate) struct Notifier {
    chat: Arc<dyn ChatChannel>,
    bus: EventBus,
}

impl Notifier {
    pub(crate) fn new(chat: Arc<dyn ChatChannel>, bus: EventBus) -> Self {
        Self { chat, bus }
    }

    pub(crate) async fn say(&self, text: &str) {
        if let Err(error) = self.chat.say(text).await {
            tracing::warn!(%error, text, "chat message not sent");
        }
        self.bus.publish(AgentEvent::Notified(text.to_string()));
    }
}
