// Reply collaborators
// Produce the agent's answer to a sent message, either locally or over HTTP

pub mod remote;
pub mod simulated;

pub use remote::RemoteReply;
pub use simulated::SimulatedReply;

use crate::config::{ReplyConfig, ReplyMode};
use crate::state::{Agent, Message};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Instant;
use thiserror::Error;

/// Failures of the reply collaborator
#[derive(Debug, Error)]
pub enum ReplyError {
    /// The HTTP round-trip failed or the body could not be decoded
    #[error("Reply request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("Reply endpoint returned status {0}")]
    Status(u16),

    /// The worker went away without answering
    #[error("Reply worker disconnected")]
    Disconnected,
}

/// A reply that has been requested but not yet consumed
#[derive(Debug)]
pub enum ReplyHandle {
    /// Reply known up front, released once `due` has passed
    Scheduled { due: Instant, message: Message },
    /// Reply being fetched on a worker thread
    InFlight(Receiver<Result<Message, ReplyError>>),
}

/// Outcome of polling a [`ReplyHandle`]
#[derive(Debug)]
pub enum ReplyPoll {
    Pending,
    Ready(Result<Message, ReplyError>),
}

impl ReplyHandle {
    /// Check whether the reply is available at `now`
    pub fn poll(&mut self, now: Instant) -> ReplyPoll {
        match self {
            ReplyHandle::Scheduled { due, message } => {
                if now >= *due {
                    ReplyPoll::Ready(Ok(message.clone()))
                } else {
                    ReplyPoll::Pending
                }
            }
            ReplyHandle::InFlight(rx) => match rx.try_recv() {
                Ok(result) => ReplyPoll::Ready(result),
                Err(TryRecvError::Empty) => ReplyPoll::Pending,
                Err(TryRecvError::Disconnected) => ReplyPoll::Ready(Err(ReplyError::Disconnected)),
            },
        }
    }

    /// When a scheduled reply is released; `None` for in-flight requests
    pub fn due(&self) -> Option<Instant> {
        match self {
            ReplyHandle::Scheduled { due, .. } => Some(*due),
            ReplyHandle::InFlight(_) => None,
        }
    }
}

/// Source of agent replies
pub trait ReplyBackend {
    /// Request a reply to `text`, which is already the last entry of `transcript`
    fn request(&self, agent: &Agent, transcript: &[Message], text: &str) -> ReplyHandle;
}

/// Build the backend selected by the configuration
pub fn backend_from_config(config: &ReplyConfig) -> Box<dyn ReplyBackend> {
    match config.mode {
        ReplyMode::Simulated => Box::new(SimulatedReply::new(config.delay)),
        ReplyMode::Remote => Box::new(RemoteReply::new(config.endpoint.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn test_scheduled_handle_waits_for_due() {
        let now = Instant::now();
        let mut handle = ReplyHandle::Scheduled {
            due: now + Duration::from_millis(500),
            message: Message::assistant("done"),
        };

        assert!(matches!(handle.poll(now), ReplyPoll::Pending));
        match handle.poll(now + Duration::from_millis(500)) {
            ReplyPoll::Ready(Ok(message)) => assert_eq!(message.content, "done"),
            other => panic!("Expected ready reply, got: {:?}", other),
        }
    }

    #[test]
    fn test_in_flight_handle_reports_disconnect() {
        let (tx, rx) = mpsc::channel::<Result<Message, ReplyError>>();
        let mut handle = ReplyHandle::InFlight(rx);
        assert!(matches!(handle.poll(Instant::now()), ReplyPoll::Pending));
        assert!(handle.due().is_none());

        drop(tx);
        assert!(matches!(
            handle.poll(Instant::now()),
            ReplyPoll::Ready(Err(ReplyError::Disconnected))
        ));
    }
}
