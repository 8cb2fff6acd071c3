//! Structured in-memory trace for bridge diagnostics
//!
//! The bridge never prints; it records bounded, structured entries that
//! hosts and tests can inspect. This is how silently-dropped traffic
//! stays observable.

use std::collections::VecDeque;

/// Trace severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TraceLevel {
    /// Debug information
    Debug,
    /// Informational messages
    Info,
    /// Warnings
    Warn,
    /// Errors
    Error,
}

/// A structured trace entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    /// Severity
    pub level: TraceLevel,
    /// Human-readable message
    pub message: String,
    /// Structured fields
    pub fields: Vec<(String, String)>,
}

impl TraceEntry {
    /// Creates a new trace entry
    pub fn new(level: TraceLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Adds a field to the entry
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }
}

/// Bounded FIFO log of trace entries
///
/// Oldest entries are discarded once the capacity is reached.
#[derive(Debug)]
pub struct TraceLog {
    capacity: usize,
    entries: VecDeque<TraceEntry>,
}

impl TraceLog {
    /// Default capacity used by the bridge components
    pub const DEFAULT_CAPACITY: usize = 256;

    /// Creates a log with the specified capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::new(),
        }
    }

    /// Records an entry, evicting the oldest if full
    pub fn record(&mut self, entry: TraceEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Returns the recorded entries, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &TraceEntry> {
        self.entries.iter()
    }

    /// Returns the number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks whether any entry's message contains `needle`
    pub fn any_message_contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|e| e.message.contains(needle))
    }
}

impl Default for TraceLog {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}
