//! Demo reply template
//!
//! Stands in for a real inference call.

use crate::chat::models::ChatMessage;

/// Build the demo reply of `agent_name` to the last message of `messages`
///
/// An empty transcript leaves the quoted part empty.
pub fn demo_reply(agent_name: &str, messages: &[ChatMessage]) -> String {
    let last = messages.last().map(|m| m.content.as_str()).unwrap_or("");
    format!(
        "{} demo yanıtı: Gerçek AI entegrasyonu için API anahtarları gereklidir. Son mesajınız: \"{}\"",
        agent_name, last
    )
}
