//! Editor position records remembered per (script, environment, file)

use serde::{Deserialize, Serialize};

/// A cursor location within a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorPosition {
    /// Zero-based line
    pub line: u64,
    /// Zero-based column
    pub column: u64,
}

/// An inclusive selection between two cursor locations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRange {
    /// Selection start
    pub start: CursorPosition,
    /// Selection end
    pub end: CursorPosition,
}

/// What a caller asks to remember for a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRecord {
    /// Cursor location
    pub cursor: CursorPosition,
    /// Selection, if one was active
    pub selection: Option<SelectionRange>,
}

/// A stored position, stamped with its last use
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionEntry {
    /// Cursor location
    pub cursor: CursorPosition,
    /// Selection, if one was active
    pub selection: Option<SelectionRange>,
    /// Host-supplied timestamp of the last save; drives LRU eviction
    pub last_used: u64,
}
