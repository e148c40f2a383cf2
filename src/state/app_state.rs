// Application state management
// Contains the agent store, the conversation session, and UI state

use crate::config::Config;
use crate::reply::{backend_from_config, ReplyBackend, SimulatedReply};
use crate::state::agent::{Agent, AgentId, AgentValidationError, EditDraft};
use crate::state::session::{ConversationSession, Message, PollSummary};
use std::time::Instant;

/// Ordered collection of agents plus the current selection
#[derive(Debug, Clone, Default)]
pub struct AgentStore {
    /// Agents in creation order
    agents: Vec<Agent>,
    /// ID of the currently selected agent, if any
    selected_agent_id: Option<AgentId>,
}

impl AgentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// All agents in creation order
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Get the number of agents in the store
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Get an agent by ID
    pub fn get(&self, id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn selected_agent_id(&self) -> Option<&AgentId> {
        self.selected_agent_id.as_ref()
    }

    /// Get a reference to the selected agent, if any
    pub fn selected_agent(&self) -> Option<&Agent> {
        self.selected_agent_id
            .as_deref()
            .and_then(|id| self.get(id))
    }

    /// Add an agent to the store
    /// Returns true if the agent was added (false if ID already exists)
    pub fn add_agent(&mut self, agent: Agent) -> bool {
        if self.get(&agent.id).is_some() {
            false
        } else {
            self.agents.push(agent);
            true
        }
    }

    /// Insert a new agent with default fields and select it
    /// Returns the new agent's ID
    pub fn create(&mut self) -> AgentId {
        let mut id = Agent::generate_id();
        while self.get(&id).is_some() {
            id = Agent::generate_id();
        }
        self.agents.push(Agent::with_defaults(id.clone()));
        self.selected_agent_id = Some(id.clone());
        id
    }

    /// Select an agent by ID
    /// Returns true if the agent was found and selected
    pub fn select(&mut self, id: &str) -> bool {
        if self.get(id).is_some() {
            self.selected_agent_id = Some(id.to_string());
            true
        } else {
            false
        }
    }

    /// Remove an agent from the store
    /// If the removed agent was selected, the first remaining agent becomes selected.
    /// Returns the removed agent if it existed
    pub fn delete(&mut self, id: &str) -> Option<Agent> {
        let index = self.agents.iter().position(|a| a.id == id)?;
        let removed = self.agents.remove(index);
        if self.selected_agent_id.as_deref() == Some(id) {
            self.selected_agent_id = self.agents.first().map(|a| a.id.clone());
        }
        Some(removed)
    }

    /// Merge `draft` over the selected agent and store the result
    /// Returns the merged agent, or `None` if nothing is selected
    pub fn save(&mut self, draft: &EditDraft) -> Option<Agent> {
        let id = self.selected_agent_id.as_deref()?;
        let agent = self.agents.iter_mut().find(|a| a.id == id)?;
        *agent = draft.apply_to(agent);
        Some(agent.clone())
    }
}

/// UI-specific state
#[derive(Debug, Clone)]
pub struct UiState {
    /// Whether the sidebar is visible
    pub sidebar_visible: bool,
    /// Last problem worth showing to the user
    pub status_line: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            sidebar_visible: true,
            status_line: None,
        }
    }
}

/// Main application state
/// All mutations go through the methods below
pub struct AppState {
    /// Agent definitions and selection
    pub store: AgentStore,
    /// Conversation with the selected agent
    pub session: ConversationSession,
    /// UI state preferences
    pub ui_state: UiState,
    backend: Box<dyn ReplyBackend>,
    strict_save: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Box::new(SimulatedReply::default()))
    }
}

impl AppState {
    /// Create an empty state backed by `backend`
    pub fn new(backend: Box<dyn ReplyBackend>) -> Self {
        Self {
            store: AgentStore::new(),
            session: ConversationSession::new(),
            ui_state: UiState::default(),
            backend,
            strict_save: false,
        }
    }

    /// Build the startup state: configured backend plus the selected code assistant
    pub fn from_config(config: &Config) -> Self {
        let mut state =
            Self::new(backend_from_config(&config.reply)).with_strict_save(config.strict_save);
        let assistant = Agent::code_assistant();
        let id = assistant.id.clone();
        state.store.add_agent(assistant);
        state.store.select(&id);
        state
    }

    /// Reject saves that fail [`Agent::validate`]
    pub fn with_strict_save(mut self, strict: bool) -> Self {
        self.strict_save = strict;
        self
    }

    /// Create a default agent, select it and open it for editing
    pub fn create_agent(&mut self) -> AgentId {
        let id = self.store.create();
        self.session.reset();
        if let Some(agent) = self.store.selected_agent() {
            self.session.begin_edit(EditDraft::from(agent));
        }
        tracing::info!(agent_id = %id, "Agent created");
        id
    }

    /// Delete an agent; unknown IDs are ignored
    pub fn delete_agent(&mut self, id: &str) -> Option<Agent> {
        let was_selected = self.store.selected_agent_id().map(String::as_str) == Some(id);
        let Some(removed) = self.store.delete(id) else {
            tracing::debug!(agent_id = %id, "Delete ignored, no such agent");
            return None;
        };
        if was_selected {
            self.session.reset();
        }
        tracing::info!(agent_id = %id, remaining = self.store.agent_count(), "Agent deleted");
        Some(removed)
    }

    /// Select an agent and start a fresh conversation with it
    ///
    /// Any unsaved draft is dropped without prompting; the UI can check
    /// [`AppState::has_unsaved_changes`] first if it wants to warn.
    pub fn select_agent(&mut self, id: &str) -> bool {
        if self.store.get(id).is_none() {
            tracing::debug!(agent_id = %id, "Select ignored, no such agent");
            return false;
        }
        if self.has_unsaved_changes() {
            tracing::info!(agent_id = %id, "Discarding unsaved edits on selection change");
        }
        self.store.select(id);
        self.session.reset();
        true
    }

    /// True while editing with a draft that would change the selected agent
    pub fn has_unsaved_changes(&self) -> bool {
        match (self.session.draft(), self.store.selected_agent()) {
            (Some(draft), Some(agent)) => draft.differs_from(agent),
            _ => false,
        }
    }

    /// Toggle between chat and the edit form for the selected agent
    pub fn toggle_edit(&mut self) {
        if let Some(agent) = self.store.selected_agent() {
            let mode = self.session.toggle_edit(agent);
            tracing::debug!(agent_id = %agent.id, ?mode, "Edit mode toggled");
        }
    }

    /// Mutable access to the draft while editing
    pub fn draft_mut(&mut self) -> Option<&mut EditDraft> {
        self.session.draft_mut()
    }

    /// Commit the current draft into the selected agent and return to chat
    ///
    /// With strict saving enabled an invalid result is rejected and the
    /// session stays in edit mode. Returns `Ok(None)` when not editing.
    pub fn save_draft(&mut self) -> Result<Option<Agent>, AgentValidationError> {
        let Some(draft) = self.session.draft() else {
            return Ok(None);
        };
        if self.strict_save {
            if let Some(agent) = self.store.selected_agent() {
                draft.apply_to(agent).validate()?;
            }
        }
        let saved = self.store.save(draft);
        self.session.finish_edit();
        if let Some(agent) = &saved {
            tracing::info!(agent_id = %agent.id, name = %agent.name, "Agent saved");
        }
        Ok(saved)
    }

    /// Send the text in the input buffer, clearing it on success
    pub fn send_message(&mut self) -> bool {
        let text = self.session.input.clone();
        if !self.send_text(&text) {
            return false;
        }
        self.session.input.clear();
        true
    }

    /// Append `text` as a user message and request the agent's reply
    /// Blank text or no selection is a no-op
    pub fn send_text(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        let Some(agent) = self.store.selected_agent() else {
            return false;
        };

        self.session.push_message(Message::user(text));
        let handle = self
            .backend
            .request(agent, self.session.transcript(), text);
        tracing::debug!(
            agent_id = %agent.id,
            generation = self.session.generation(),
            "Message sent"
        );
        self.session.track_reply(agent.id.clone(), handle);
        true
    }

    /// Deliver replies that are ready at `now`
    pub fn poll_replies(&mut self, now: Instant) -> PollSummary {
        let summary = self.session.poll_replies(now);
        if let Some(error) = summary.errors.last() {
            self.ui_state.status_line = Some(error.to_string());
        }
        summary
    }
}
