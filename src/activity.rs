//! # Module: Activity Log
//!
//! ## Responsibility
//! A bounded, timestamped record of what happened in the dashboard: users
//! added and updated, ignored updates, feature modules that failed to load.
//! The terminal UI shows its tail; the newest entry doubles as a status line.
//!
//! ## Guarantees
//! - Never holds more than [`ACTIVITY_CAP`] entries (oldest evicted first)
//! - Newest entry is at the back

use std::collections::VecDeque;

/// Maximum number of entries retained.
pub const ACTIVITY_CAP: usize = 50;

/// Severity of an activity entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    /// Normal event.
    Info,
    /// Something was ignored or looked suspicious.
    Warn,
    /// Something failed.
    Error,
}

impl ActivityLevel {
    /// Fixed-width display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "INFO ",
            Self::Warn => "WARN ",
            Self::Error => "ERROR",
        }
    }
}

/// One activity entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEntry {
    /// Local wall-clock time, e.g. "14:32:01".
    pub timestamp: String,
    /// Severity.
    pub level: ActivityLevel,
    /// Message text.
    pub message: String,
}

/// Bounded activity ring.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
}

impl ActivityLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(ACTIVITY_CAP),
        }
    }

    /// Appends an entry stamped with the current local time.
    pub fn push(&mut self, level: ActivityLevel, message: impl Into<String>) {
        self.push_entry(ActivityEntry {
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
            level,
            message: message.into(),
        });
    }

    /// Appends a prepared entry, evicting the oldest if at capacity.
    pub fn push_entry(&mut self, entry: ActivityEntry) {
        if self.entries.len() >= ACTIVITY_CAP {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Shorthand for an info entry.
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ActivityLevel::Info, message);
    }

    /// Shorthand for a warning entry.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(ActivityLevel::Warn, message);
    }

    /// Shorthand for an error entry.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ActivityLevel::Error, message);
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &ActivityEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    /// The newest entry.
    pub fn latest(&self) -> Option<&ActivityEntry> {
        self.entries.back()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
