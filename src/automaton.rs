//! The top-level `Automaton` type: owns the pattern set, the built state
//! array, and the stats, and enforces the create -> add_pattern* -> build ->
//! search -> destroy lifecycle from §2/§5 of the design.

use crate::builder;
use crate::dispatch;
use crate::error::{MatchError, Result};
use crate::match_record::MatchRecord;
use crate::patterns::PatternSet;
use crate::state::StateArray;
use crate::stats::{Stats, StatsSnapshot};

/// Construction capacity ceilings. Defaults match the "simple engine"
/// bounds from the external interface table; [`Limits::extended`] gives the
/// "extended engine" bounds. The two historical engines are unified into
/// this one configurable struct (see DESIGN.md, Open Question (i)).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_patterns: usize,
    pub max_states: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_patterns: 100_000,
            max_states: 200_000,
        }
    }
}

impl Limits {
    /// The "extended engine" bounds from the external interface table.
    pub fn extended() -> Self {
        Limits {
            max_patterns: 2_000_000,
            max_states: 10_000_000,
        }
    }
}

/// A multi-pattern matching automaton.
///
/// Lifecycle: `new`/`with_limits` (uninitialized) -> any number of
/// `add_pattern` calls -> `build` -> any number of `search` calls. Calling
/// `add_pattern` again after `build` clears the built state; `search` then
/// returns [`MatchError::NotInitialized`] until `build` runs again.
pub struct Automaton {
    patterns: PatternSet,
    limits: Limits,
    states: Option<StateArray>,
    stats: Stats,
}

impl Automaton {
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    pub fn with_limits(limits: Limits) -> Self {
        Automaton {
            patterns: PatternSet::new(limits.max_patterns),
            limits,
            states: None,
            stats: Stats::default(),
        }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.count()
    }

    pub fn is_initialized(&self) -> bool {
        self.states.is_some()
    }

    /// The stored (lowercased) bytes for a pattern id, if it exists.
    pub fn pattern(&self, id: u32) -> Option<&[u8]> {
        self.patterns.get(id)
    }

    /// Add a pattern, returning its dense id. If the automaton was already
    /// built, this clears the built state (§3: "adding a pattern after
    /// build clears the initialized flag and requires rebuild").
    pub fn add_pattern(&mut self, bytes: &[u8]) -> Result<u32> {
        let id = self.patterns.add(bytes)?;
        self.states = None;
        Ok(id)
    }

    /// Run the three-phase build (C5) over the current pattern set.
    ///
    /// On [`MatchError::CapacityExceeded`] the automaton is left
    /// unbuilt — any previous built state was already cleared by the
    /// `add_pattern` calls that invalidated it, and a failed build here
    /// never leaves `states` populated.
    pub fn build(&mut self) -> Result<()> {
        let states = builder::build(&self.patterns, self.limits.max_states)?;
        self.states = Some(states);
        Ok(())
    }

    /// Search `text`, writing up to `out.len()` matches and returning how
    /// many were written, in nondecreasing end-position order.
    pub fn search(&self, text: &[u8], out: &mut [MatchRecord]) -> Result<usize> {
        let states = self.states.as_ref().ok_or(MatchError::NotInitialized)?;
        let (count, _variant) = dispatch::search(
            states,
            text,
            out,
            |id| self.patterns.get(id).map(|p| p.len() as u64).unwrap_or(0),
            &self.stats,
        );
        Ok(count)
    }

    pub fn get_stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub fn reset_stats(&self) {
        self.stats.reset();
    }
}

impl Default for Automaton {
    fn default() -> Self {
        Self::new()
    }
}
