// Remote reply client
// Posts the transcript to the backend's chat endpoint from a worker thread

use super::{ReplyBackend, ReplyError, ReplyHandle};
use crate::state::{Agent, Message};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::sync::mpsc;
use std::thread;

/// Body of `POST /api/chat`
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    pub agent: Agent,
}

/// Success body of `POST /api/chat`
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub message: Message,
}

/// Reply backend that round-trips through the HTTP service
#[derive(Debug, Clone)]
pub struct RemoteReply {
    endpoint: String,
    client: Client,
}

impl RemoteReply {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::new(),
        }
    }

    /// Send one chat request and wait for the answer
    pub fn fetch(&self, request: &ChatRequest) -> Result<Message, ReplyError> {
        let response = self.client.post(&self.endpoint).json(request).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ReplyError::Status(status.as_u16()));
        }
        let body: ChatResponse = response.json()?;
        Ok(body.message)
    }
}

impl ReplyBackend for RemoteReply {
    fn request(&self, agent: &Agent, transcript: &[Message], _text: &str) -> ReplyHandle {
        let (tx, rx) = mpsc::channel();
        let backend = self.clone();
        let request = ChatRequest {
            messages: transcript.to_vec(),
            agent: agent.clone(),
        };

        tracing::debug!(
            agent_id = %agent.id,
            endpoint = %self.endpoint,
            messages = request.messages.len(),
            "Requesting remote reply"
        );

        thread::spawn(move || {
            let result = backend.fetch(&request);
            if let Err(e) = &result {
                tracing::warn!(endpoint = %backend.endpoint, error = %e, "Remote reply failed");
            }
            // The session may have been dropped meanwhile; nothing to deliver to then.
            let _ = tx.send(result);
        });

        ReplyHandle::InFlight(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reply::ReplyPoll;
    use mockito::Matcher;
    use serde_json::json;
    use std::time::{Duration, Instant};

    fn chat_request(content: &str) -> ChatRequest {
        ChatRequest {
            messages: vec![Message::user(content)],
            agent: Agent::new("1".to_string(), "Bot".to_string()),
        }
    }

    #[test]
    fn test_fetch_returns_assistant_message() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/api/chat")
            .match_body(Matcher::PartialJson(json!({
                "messages": [{"role": "user", "content": "test"}],
                "agent": {"name": "Bot", "maxTokens": 2000}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":{"role":"assistant","content":"Bot demo yanıtı"}}"#)
            .create();

        let backend = RemoteReply::new(format!("{}/api/chat", server.url()));
        let message = backend.fetch(&chat_request("test")).unwrap();

        assert_eq!(message, Message::assistant("Bot demo yanıtı"));
        mock.assert();
    }

    #[test]
    fn test_fetch_maps_server_error_to_status() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(500)
            .with_body(r#"{"error":"Bir hata oluştu"}"#)
            .create();

        let backend = RemoteReply::new(format!("{}/api/chat", server.url()));
        match backend.fetch(&chat_request("test")) {
            Err(ReplyError::Status(500)) => {}
            other => panic!("Expected status error, got: {:?}", other),
        }
    }

    #[test]
    fn test_fetch_rejects_undecodable_body() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body("not json")
            .create();

        let backend = RemoteReply::new(format!("{}/api/chat", server.url()));
        assert!(matches!(
            backend.fetch(&chat_request("test")),
            Err(ReplyError::Transport(_))
        ));
    }

    #[test]
    fn test_request_delivers_through_handle() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body(r#"{"message":{"role":"assistant","content":"pong"}}"#)
            .create();

        let backend = RemoteReply::new(format!("{}/api/chat", server.url()));
        let agent = Agent::new("1".to_string(), "Bot".to_string());
        let mut handle = backend.request(&agent, &[Message::user("ping")], "ping");

        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            match handle.poll(Instant::now()) {
                ReplyPoll::Ready(result) => {
                    assert_eq!(result.unwrap().content, "pong");
                    break;
                }
                ReplyPoll::Pending if Instant::now() < deadline => {
                    std::thread::sleep(Duration::from_millis(10));
                }
                ReplyPoll::Pending => panic!("Remote reply did not arrive in time"),
            }
        }
    }
}
