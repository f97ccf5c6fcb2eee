//! ac-match - SIMD-accelerated multi-pattern byte matching
//!
//! `ac-match` compiles a dictionary of byte patterns into a deterministic
//! Aho-Corasick automaton and scans buffers for every occurrence of any
//! pattern, reporting `(offset, length, pattern_id)` triples. Matching is
//! case-insensitive over ASCII bytes only; there is no regex support, no
//! Unicode normalization, and no persistence of a built automaton to disk.
//!
//! # Quick start
//!
//! ```rust
//! use ac_match::{Automaton, MatchRecord};
//!
//! let mut automaton = Automaton::new();
//! automaton.add_pattern(b"he")?;
//! automaton.add_pattern(b"she")?;
//! automaton.add_pattern(b"his")?;
//! automaton.add_pattern(b"hers")?;
//! automaton.build()?;
//!
//! let mut out = vec![MatchRecord::new(0, 0, 0); 16];
//! let n = automaton.search(b"ushers", &mut out)?;
//! assert_eq!(n, 3);
//! # Ok::<(), ac_match::MatchError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  PatternSet (C3) — owned, lowercased bytes   │
//! ├─────────────────────────────────────────────┤
//! │  Builder (C5) — goto / failure / outputs     │
//! ├─────────────────────────────────────────────┤
//! │  StateArray (C4) — 256-way transitions       │
//! ├───────────────────┬───────────────────────────┤
//! │  scalar matcher    │  SIMD matcher (C7)        │
//! │  (C6, reference)   │  AVX-512 / AVX2 / NEON    │
//! └───────────────────┴───────────────────────────┘
//!          ↓ dispatch (C8), by length + CPU features
//! ┌─────────────────────────────────────────────┐
//! │  matches + atomic stats                      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! A C-compatible surface is available in [`c_api`] for embedding in
//! non-Rust hosts.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod alloc;
/// The top-level [`Automaton`] type and its construction limits.
pub mod automaton;
/// Trie construction, failure-link BFS, and output propagation (C5).
pub mod builder;
/// Public C ABI surface.
pub mod c_api;
/// Runtime CPU feature detection (C2).
pub mod cpu_features;
/// Dispatcher selecting a scalar or SIMD matcher variant (C8).
pub mod dispatch;
/// Error types for automaton construction and search.
pub mod error;
/// Pattern-source loader (C9).
pub mod loader;
/// The wire-stable match record type.
pub mod match_record;
/// Owned, lowercased pattern storage (C3).
pub mod patterns;
/// Scalar and SIMD search loops (C6, C7).
pub mod search;
/// Automaton storage: states, transitions, and outputs (C4).
pub mod state;
/// Atomic search statistics (part of C8).
pub mod stats;

pub use crate::automaton::{Automaton, Limits};
pub use crate::cpu_features::CpuFeatures;
pub use crate::error::{MatchError, Result};
pub use crate::match_record::MatchRecord;
pub use crate::stats::StatsSnapshot;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library major version.
pub const VERSION_MAJOR: u32 = 0;

/// Library minor version.
pub const VERSION_MINOR: u32 = 1;

/// Library patch version.
pub const VERSION_PATCH: u32 = 0;
