//! Chat API
//!
//! Answers a conversation with a templated demo reply instead of calling a
//! real model. The body is parsed by hand so that every parse failure maps to
//! the generic error payload rather than axum's extractor rejections.

use crate::chat::{demo_reply, ChatMessage, ChatRequest, ChatResponse};
use crate::error::AppError;
use axum::{body::Bytes, Json};
use tracing::info;

/// POST /api/chat - Reply to the last message of a conversation
pub async fn chat(body: Bytes) -> Result<Json<ChatResponse>, AppError> {
    let request: ChatRequest =
        serde_json::from_slice(&body).map_err(|e| AppError::MalformedRequest(e.to_string()))?;

    let content = demo_reply(&request.agent.name, &request.messages);

    info!(
        agent = %request.agent.name,
        messages = request.messages.len(),
        "Demo reply generated"
    );

    Ok(Json(ChatResponse {
        message: ChatMessage::assistant(content),
    }))
}
