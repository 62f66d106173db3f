use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Success,
    Error,
}

/// Transient notice shown above the tables until it expires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlashMessage {
    pub text: String,
    pub kind: MessageKind,
    pub shown_at: DateTime<Utc>,
}

impl FlashMessage {
    pub fn success(text: impl Into<String>, shown_at: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Success,
            shown_at,
        }
    }

    pub fn error(text: impl Into<String>, shown_at: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Error,
            shown_at,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }

    pub fn is_visible_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now >= self.shown_at && now - self.shown_at < ttl
    }
}
