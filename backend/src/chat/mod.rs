//! Chat module
//!
//! Wire types of the reply endpoint and the templated demo reply.

pub mod models;
pub mod reply;

pub use models::{AgentDescriptor, ChatMessage, ChatRequest, ChatResponse, MessageRole};
pub use reply::demo_reply;
