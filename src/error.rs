//! Error types for the ac-match library
use std::fmt;

/// Result type alias for automaton operations
pub type Result<T> = std::result::Result<T, MatchError>;

/// Main error type for automaton construction and search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// An allocation failed (state array, output table, or pattern storage)
    OutOfMemory,

    /// `add_pattern` was called after `max_patterns` patterns were stored
    Capacity,

    /// `build` ran out of room in the state array
    CapacityExceeded,

    /// `add_pattern` was called with a zero-length pattern
    EmptyPattern,

    /// `build` was called with no patterns in the set
    NoPatterns,

    /// A caller-supplied argument was invalid (null pointer, zero-length
    /// output buffer where one was required, etc.)
    BadArgument,

    /// `search` was called before `build`, or after a pattern was added
    /// without rebuilding
    NotInitialized,

    /// `add_pattern` was called on an automaton that is already built;
    /// the caller must rebuild before searching again
    NotMutable,

    /// An I/O error surfaced from the pattern loader
    Io(String),
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::OutOfMemory => write!(f, "allocation failed"),
            MatchError::Capacity => write!(f, "pattern capacity exceeded"),
            MatchError::CapacityExceeded => write!(f, "state capacity exceeded during build"),
            MatchError::EmptyPattern => write!(f, "pattern must not be empty"),
            MatchError::NoPatterns => write!(f, "no patterns were added before build"),
            MatchError::BadArgument => write!(f, "invalid argument"),
            MatchError::NotInitialized => write!(f, "automaton has not been built"),
            MatchError::NotMutable => write!(f, "automaton is already built; call rebuild"),
            MatchError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for MatchError {}

impl From<std::io::Error> for MatchError {
    fn from(err: std::io::Error) -> Self {
        MatchError::Io(err.to_string())
    }
}
