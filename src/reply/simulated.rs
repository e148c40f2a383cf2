// Local reply simulation
// Answers every message with a fixed template after a short delay

use super::{ReplyBackend, ReplyHandle};
use crate::state::{Agent, Message};
use std::time::{Duration, Instant};

/// Delay before a simulated reply appears
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

/// Text of a simulated reply from `agent_name` to `text`
pub fn simulated_reply_text(agent_name: &str, text: &str) -> String {
    format!(
        "{} yanıtı: Bu bir demo uygulamasıdır. Gerçek AI entegrasyonu için API anahtarı gereklidir. Mesajınız: \"{}\"",
        agent_name, text
    )
}

/// Reply backend that never leaves the process
#[derive(Debug, Clone)]
pub struct SimulatedReply {
    delay: Duration,
}

impl SimulatedReply {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedReply {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY_DELAY)
    }
}

impl ReplyBackend for SimulatedReply {
    fn request(&self, agent: &Agent, _transcript: &[Message], text: &str) -> ReplyHandle {
        tracing::debug!(agent_id = %agent.id, delay_ms = self.delay.as_millis(), "Scheduling simulated reply");
        ReplyHandle::Scheduled {
            due: Instant::now() + self.delay,
            message: Message::assistant(simulated_reply_text(&agent.name, text)),
        }
    }
}
