// Agent definitions
// Agent descriptor, model labels, and the edit draft that is merged back on save

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for an agent
pub type AgentId = String;

/// Temperature range offered by the edit form
pub const TEMPERATURE_RANGE: RangeInclusive<f32> = 0.0..=2.0;

pub const DEFAULT_AGENT_NAME: &str = "Yeni Ajan";
pub const DEFAULT_AGENT_DESCRIPTION: &str = "Ajan açıklaması";
pub const DEFAULT_AGENT_PROMPT: &str = "Sen yardımcı bir asistansın.";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Model an agent is configured to run against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AgentModel {
    #[default]
    #[serde(rename = "gpt-4")]
    Gpt4,
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
    #[serde(rename = "claude-3")]
    Claude3,
}

impl AgentModel {
    /// Every selectable model, in the order the form lists them
    pub const ALL: [AgentModel; 3] = [AgentModel::Gpt4, AgentModel::Gpt35Turbo, AgentModel::Claude3];

    /// Wire label of the model
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentModel::Gpt4 => "gpt-4",
            AgentModel::Gpt35Turbo => "gpt-3.5-turbo",
            AgentModel::Claude3 => "claude-3",
        }
    }

    /// Human-readable name shown in the model picker
    pub fn display_name(&self) -> &'static str {
        match self {
            AgentModel::Gpt4 => "GPT-4",
            AgentModel::Gpt35Turbo => "GPT-3.5 Turbo",
            AgentModel::Claude3 => "Claude 3",
        }
    }
}

/// Reasons an agent fails validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AgentValidationError {
    #[error("Agent name cannot be empty")]
    EmptyName,
    #[error("Temperature {0} is outside 0.0-2.0")]
    TemperatureOutOfRange(f32),
    #[error("Max tokens must be positive")]
    ZeroMaxTokens,
}

/// A configurable chat persona
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// Unique identifier for the agent
    pub id: AgentId,
    /// Display name of the agent
    pub name: String,
    /// Short description shown under the name
    pub description: String,
    /// System prompt text
    pub prompt: String,
    /// Model the agent targets
    pub model: AgentModel,
    /// Sampling temperature, intended range 0.0-2.0
    pub temperature: f32,
    /// Token budget for a reply
    pub max_tokens: u32,
    /// When the agent was created
    pub created_at: DateTime<Utc>,
}

impl Agent {
    /// Create a new agent with the given ID and name
    /// All other fields take their defaults
    pub fn new(id: AgentId, name: String) -> Self {
        Self {
            id,
            name,
            description: DEFAULT_AGENT_DESCRIPTION.to_string(),
            prompt: DEFAULT_AGENT_PROMPT.to_string(),
            model: AgentModel::default(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            created_at: Utc::now(),
        }
    }

    /// Agent created by the "new agent" action
    pub fn with_defaults(id: AgentId) -> Self {
        Self::new(id, DEFAULT_AGENT_NAME.to_string())
    }

    /// The code assistant every session starts with
    pub fn code_assistant() -> Self {
        Self {
            description: "Yazılım geliştirme ve kod inceleme uzmanı".to_string(),
            prompt: "Sen deneyimli bir yazılım geliştiricisisin. Kullanıcılara kod yazma, \
                     hata ayıklama ve en iyi uygulamaları öğretme konusunda yardımcı olursun."
                .to_string(),
            ..Self::new(Self::generate_id(), "Kod Asistanı".to_string())
        }
    }

    /// Generate a new unique ID for an agent
    /// Uses UUID v4 so IDs are never reused
    pub fn generate_id() -> AgentId {
        Uuid::new_v4().to_string()
    }

    /// Check the agent's generation parameters
    pub fn validate(&self) -> Result<(), AgentValidationError> {
        if self.name.trim().is_empty() {
            return Err(AgentValidationError::EmptyName);
        }
        if !TEMPERATURE_RANGE.contains(&self.temperature) {
            return Err(AgentValidationError::TemperatureOutOfRange(self.temperature));
        }
        if self.max_tokens == 0 {
            return Err(AgentValidationError::ZeroMaxTokens);
        }
        Ok(())
    }
}

/// Scratch copy of an agent's editable fields
///
/// `None` means the field was never touched and the agent's value is kept on save.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub prompt: Option<String>,
    pub model: Option<AgentModel>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl EditDraft {
    /// Merge the present fields over `agent`
    pub fn apply_to(&self, agent: &Agent) -> Agent {
        let mut merged = agent.clone();
        if let Some(name) = &self.name {
            merged.name = name.clone();
        }
        if let Some(description) = &self.description {
            merged.description = description.clone();
        }
        if let Some(prompt) = &self.prompt {
            merged.prompt = prompt.clone();
        }
        if let Some(model) = self.model {
            merged.model = model;
        }
        if let Some(temperature) = self.temperature {
            merged.temperature = temperature;
        }
        if let Some(max_tokens) = self.max_tokens {
            merged.max_tokens = max_tokens;
        }
        merged
    }

    /// True if saving this draft would change `agent`
    pub fn differs_from(&self, agent: &Agent) -> bool {
        self.apply_to(agent) != *agent
    }
}

impl From<&Agent> for EditDraft {
    fn from(agent: &Agent) -> Self {
        Self {
            name: Some(agent.name.clone()),
            description: Some(agent.description.clone()),
            prompt: Some(agent.prompt.clone()),
            model: Some(agent.model),
            temperature: Some(agent.temperature),
            max_tokens: Some(agent.max_tokens),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_defaults() {
        let agent = Agent::with_defaults("1".to_string());
        assert_eq!(agent.id, "1");
        assert_eq!(agent.name, "Yeni Ajan");
        assert_eq!(agent.description, "Ajan açıklaması");
        assert_eq!(agent.prompt, "Sen yardımcı bir asistansın.");
        assert_eq!(agent.model, AgentModel::Gpt4);
        assert_eq!(agent.temperature, 0.7);
        assert_eq!(agent.max_tokens, 2000);
    }

    #[test]
    fn test_code_assistant() {
        let agent = Agent::code_assistant();
        assert_eq!(agent.name, "Kod Asistanı");
        assert_eq!(agent.model, AgentModel::Gpt4);
        assert!(agent.validate().is_ok());
    }

    #[test]
    fn test_agent_generate_id() {
        let id1 = Agent::generate_id();
        let id2 = Agent::generate_id();
        assert_ne!(id1, id2);
        assert!(!id1.is_empty());
    }

    #[test]
    fn test_agent_validate() {
        let mut agent = Agent::with_defaults("1".to_string());
        assert!(agent.validate().is_ok());

        agent.name = "   ".to_string();
        assert_eq!(agent.validate(), Err(AgentValidationError::EmptyName));

        agent.name = "Bot".to_string();
        agent.temperature = 2.5;
        assert_eq!(
            agent.validate(),
            Err(AgentValidationError::TemperatureOutOfRange(2.5))
        );

        agent.temperature = 2.0;
        agent.max_tokens = 0;
        assert_eq!(agent.validate(), Err(AgentValidationError::ZeroMaxTokens));
    }

    #[test]
    fn test_draft_merges_only_present_fields() {
        let mut agent = Agent::with_defaults("1".to_string());
        agent.temperature = 0.9;

        let draft = EditDraft {
            name: Some("X".to_string()),
            ..Default::default()
        };
        let merged = draft.apply_to(&agent);

        assert_eq!(merged.name, "X");
        assert_eq!(merged.temperature, 0.9);
        assert_eq!(merged.id, agent.id);
        assert_eq!(merged.created_at, agent.created_at);
    }

    #[test]
    fn test_draft_from_agent_is_noop() {
        let agent = Agent::code_assistant();
        let draft = EditDraft::from(&agent);
        assert!(!draft.differs_from(&agent));
        assert!(!EditDraft::default().differs_from(&agent));

        let draft = EditDraft {
            model: Some(AgentModel::Claude3),
            ..draft
        };
        assert!(draft.differs_from(&agent));
    }

    #[test]
    fn test_agent_serializes_camel_case() {
        let agent = Agent::with_defaults("1".to_string());
        let json = serde_json::to_value(&agent).unwrap();
        assert_eq!(json["maxTokens"], 2000);
        assert_eq!(json["model"], "gpt-4");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_model_labels() {
        assert_eq!(AgentModel::Gpt35Turbo.as_str(), "gpt-3.5-turbo");
        assert_eq!(AgentModel::Claude3.display_name(), "Claude 3");
        assert_eq!(AgentModel::ALL.len(), 3);
    }
}
