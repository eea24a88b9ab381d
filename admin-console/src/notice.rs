//! Transient user-facing notifications

use std::fmt;

use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Info => "info",
            NoticeLevel::Error => "error",
        };
        write!(f, "[{tag}] {}", self.message)
    }
}

/// Queue of notices waiting to be shown
#[derive(Debug, Default)]
pub struct Notices {
    queue: Mutex<Vec<Notice>>,
}

impl Notices {
    pub fn push(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => tracing::debug!(message = %notice.message, "Error notice"),
            _ => tracing::trace!(message = %notice.message, "Notice"),
        }
        self.queue.lock().push(notice);
    }

    /// Take every pending notice, oldest first
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.queue.lock())
    }

    pub fn last(&self) -> Option<Notice> {
        self.queue.lock().last().cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }
}
