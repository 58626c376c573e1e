use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Success,
}

/// A transient inline message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    /// None means it stays until replaced or cleared
    pub expires_at: Option<Instant>,
}

impl Notice {
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Holds at most one notice; errors dismiss themselves
#[derive(Debug, Clone)]
pub struct NoticeSlot {
    current: Option<Notice>,
    error_ttl: Duration,
}

impl NoticeSlot {
    pub fn new(error_ttl: Duration) -> Self {
        Self {
            current: None,
            error_ttl,
        }
    }

    pub fn error(&mut self, text: impl Into<String>, now: Instant) {
        self.current = Some(Notice {
            kind: NoticeKind::Error,
            text: text.into(),
            expires_at: Some(now + self.error_ttl),
        });
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.current = Some(Notice {
            kind: NoticeKind::Success,
            text: text.into(),
            expires_at: None,
        });
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Drop the notice if it has expired. Returns true when something was dismissed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let expired = self
            .current
            .as_ref()
            .and_then(|n| n.expires_at)
            .is_some_and(|at| now >= at);
        if expired {
            self.current = None;
        }
        expired
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    pub fn error_text(&self) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|n| n.is_error())
            .map(|n| n.text.as_str())
    }

    pub fn success_text(&self) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|n| !n.is_error())
            .map(|n| n.text.as_str())
    }
}
