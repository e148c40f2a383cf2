// Conversation session
// Transcript, input buffer, edit mode and the replies still in flight

use crate::reply::{ReplyError, ReplyHandle, ReplyPoll};
use crate::state::agent::{Agent, AgentId, EditDraft};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user
    User,
    /// Message from the agent
    Assistant,
}

impl MessageRole {
    /// Convert the role to its string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// A single transcript entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Whether the main panel shows the chat or the edit form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Viewing,
    Editing,
}

/// A reply requested by a send, tagged with the conversation it belongs to
#[derive(Debug)]
struct PendingReply {
    generation: u64,
    agent_id: AgentId,
    handle: ReplyHandle,
}

/// What a call to [`ConversationSession::poll_replies`] did
#[derive(Debug, Default)]
pub struct PollSummary {
    /// Replies appended to the transcript
    pub delivered: usize,
    /// Replies dropped because their conversation is gone
    pub discarded: usize,
    /// Replies that failed
    pub errors: Vec<ReplyError>,
}

/// State of the conversation with the selected agent
#[derive(Debug, Default)]
pub struct ConversationSession {
    transcript: Vec<Message>,
    /// Text currently typed into the chat input
    pub input: String,
    mode: EditMode,
    draft: Option<EditDraft>,
    generation: u64,
    pending: Vec<PendingReply>,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn draft(&self) -> Option<&EditDraft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut EditDraft> {
        self.draft.as_mut()
    }

    /// Identifies the current conversation; bumped on every reset
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a fresh conversation
    /// Clears the transcript, drops any draft and returns to viewing.
    /// Replies still in flight belong to the old generation and are discarded on arrival.
    pub fn reset(&mut self) {
        self.transcript.clear();
        self.mode = EditMode::Viewing;
        self.draft = None;
        self.generation += 1;
    }

    /// Enter edit mode with the given draft
    pub fn begin_edit(&mut self, draft: EditDraft) {
        self.draft = Some(draft);
        self.mode = EditMode::Editing;
    }

    /// Leave edit mode, handing back the draft if there was one
    pub fn finish_edit(&mut self) -> Option<EditDraft> {
        self.mode = EditMode::Viewing;
        self.draft.take()
    }

    /// Flip between viewing and editing `agent`
    /// Entering seeds the draft from the agent; leaving discards it.
    pub fn toggle_edit(&mut self, agent: &Agent) -> EditMode {
        match self.mode {
            EditMode::Viewing => self.begin_edit(EditDraft::from(agent)),
            EditMode::Editing => {
                self.finish_edit();
            }
        }
        self.mode
    }

    pub fn push_message(&mut self, message: Message) {
        self.transcript.push(message);
    }

    /// Remember a reply requested for the current conversation
    pub fn track_reply(&mut self, agent_id: AgentId, handle: ReplyHandle) {
        self.pending.push(PendingReply {
            generation: self.generation,
            agent_id,
            handle,
        });
    }

    pub fn has_pending_replies(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Earliest moment a scheduled reply becomes due, if any
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.iter().filter_map(|p| p.handle.due()).min()
    }

    /// Deliver every reply that is ready at `now`
    pub fn poll_replies(&mut self, now: Instant) -> PollSummary {
        let mut summary = PollSummary::default();
        let mut still_pending = Vec::with_capacity(self.pending.len());

        for mut pending in self.pending.drain(..) {
            let result = match pending.handle.poll(now) {
                ReplyPoll::Pending => {
                    still_pending.push(pending);
                    continue;
                }
                ReplyPoll::Ready(result) => result,
            };

            if pending.generation != self.generation {
                tracing::debug!(
                    agent_id = %pending.agent_id,
                    reply_generation = pending.generation,
                    current_generation = self.generation,
                    "Discarding reply for a previous conversation"
                );
                summary.discarded += 1;
                continue;
            }

            match result {
                Ok(message) => {
                    self.transcript.push(message);
                    summary.delivered += 1;
                }
                Err(e) => {
                    tracing::warn!(agent_id = %pending.agent_id, error = %e, "Reply failed");
                    summary.errors.push(e);
                }
            }
        }

        self.pending = still_pending;
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn scheduled(due: Instant, content: &str) -> ReplyHandle {
        ReplyHandle::Scheduled {
            due,
            message: Message::assistant(content),
        }
    }

    #[test]
    fn test_message_role_serialization() {
        let json = serde_json::to_string(&Message::user("hi")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hi"}"#);
        assert_eq!(MessageRole::Assistant.as_str(), "assistant");
    }

    #[test]
    fn test_toggle_edit_seeds_and_discards_draft() {
        let agent = Agent::with_defaults("1".to_string());
        let mut session = ConversationSession::new();
        assert_eq!(session.mode(), EditMode::Viewing);

        assert_eq!(session.toggle_edit(&agent), EditMode::Editing);
        assert_eq!(session.draft(), Some(&EditDraft::from(&agent)));

        session.draft_mut().unwrap().name = Some("Changed".to_string());
        assert_eq!(session.toggle_edit(&agent), EditMode::Viewing);
        assert!(session.draft().is_none());
    }

    #[test]
    fn test_reset_clears_transcript_and_mode() {
        let agent = Agent::with_defaults("1".to_string());
        let mut session = ConversationSession::new();
        session.push_message(Message::user("hello"));
        session.toggle_edit(&agent);
        let generation = session.generation();

        session.reset();

        assert!(session.transcript().is_empty());
        assert_eq!(session.mode(), EditMode::Viewing);
        assert!(session.draft().is_none());
        assert_eq!(session.generation(), generation + 1);
    }

    #[test]
    fn test_poll_delivers_only_due_replies() {
        let now = Instant::now();
        let mut session = ConversationSession::new();
        session.track_reply("1".to_string(), scheduled(now + Duration::from_secs(1), "late"));
        session.track_reply("1".to_string(), scheduled(now, "now"));

        let summary = session.poll_replies(now);
        assert_eq!(summary.delivered, 1);
        assert_eq!(session.transcript(), &[Message::assistant("now")]);
        assert!(session.has_pending_replies());
        assert_eq!(session.next_due(), Some(now + Duration::from_secs(1)));

        let summary = session.poll_replies(now + Duration::from_secs(1));
        assert_eq!(summary.delivered, 1);
        assert_eq!(session.transcript().len(), 2);
        assert!(!session.has_pending_replies());
    }

    #[test]
    fn test_stale_reply_is_discarded() {
        let now = Instant::now();
        let mut session = ConversationSession::new();
        session.track_reply("1".to_string(), scheduled(now, "stale"));

        session.reset();
        let summary = session.poll_replies(now);

        assert_eq!(summary.delivered, 0);
        assert_eq!(summary.discarded, 1);
        assert!(session.transcript().is_empty());
        assert!(!session.has_pending_replies());
    }

    #[test]
    fn test_failed_reply_reports_error() {
        let (tx, rx) = std::sync::mpsc::channel();
        tx.send(Err(ReplyError::Status(500))).unwrap();

        let mut session = ConversationSession::new();
        session.track_reply("1".to_string(), ReplyHandle::InFlight(rx));
        let summary = session.poll_replies(Instant::now());

        assert_eq!(summary.delivered, 0);
        assert_eq!(summary.errors.len(), 1);
        assert!(session.transcript().is_empty());
    }
}
