//! Event types.

use bailiff_ghapi_interface::types::GhIssueCommentEvent;
use serde::de::IgnoredAny;

use crate::{Result, ServerError};

/// Event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventType {
    /// Issue comment event.
    IssueComment,
    /// Ping event.
    Ping,
    /// Any other event.
    Other(String),
}

impl EventType {
    /// Convert event type to str.
    pub fn as_str(&self) -> &str {
        match self {
            EventType::IssueComment => "issue_comment",
            EventType::Ping => "ping",
            EventType::Other(name) => name,
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for EventType {
    fn from(value: &str) -> Self {
        match value {
            "issue_comment" => Self::IssueComment,
            "ping" => Self::Ping,
            name => Self::Other(name.to_owned()),
        }
    }
}

/// Parsed webhook event.
#[derive(Debug)]
pub enum WebhookEvent {
    /// Issue comment event.
    IssueComment(Box<GhIssueCommentEvent>),
    /// Ping event.
    Ping,
    /// Received but unsupported event.
    Unhandled(String),
}

impl WebhookEvent {
    /// Parse a webhook payload for an event type.
    pub fn parse(event_type: &EventType, body: &[u8]) -> Result<Self> {
        let parse_error = |e| ServerError::EventParseError {
            event_type: event_type.to_string(),
            source: e,
        };

        match event_type {
            EventType::IssueComment => serde_json::from_slice(body)
                .map(|event| Self::IssueComment(Box::new(event)))
                .map_err(parse_error),
            EventType::Ping => serde_json::from_slice::<IgnoredAny>(body)
                .map(|_| Self::Ping)
                .map_err(parse_error),
            EventType::Other(name) => serde_json::from_slice::<IgnoredAny>(body)
                .map(|_| Self::Unhandled(name.clone()))
                .map_err(parse_error),
        }
    }
}
