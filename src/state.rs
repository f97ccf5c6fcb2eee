//! Automaton storage (C4): the state array and output table.
//!
//! State id 0 is the root and doubles as the "no edge" sentinel in `next`,
//! per §3 of the data model. Outputs are stored inline up to
//! [`INLINE_OUTPUT_CAP`] ids; a state accumulating more (through failure-chain
//! propagation) spills into the shared `output_table` instead of truncating —
//! no output id is ever dropped, regardless of how many terminals share a
//! state.
//!
//! `next` rows also have a cache-line-aligned view built lazily through
//! [`StateArray::next_row_ptr`], which the SIMD matcher in
//! [`crate::search::simd`] uses to prefetch a state's row one step ahead of
//! the scalar walk.

use crate::alloc::AlignedBuffer;
use std::sync::OnceLock;

/// Inline output capacity before a state spills into the output table.
pub const INLINE_OUTPUT_CAP: usize = 8;

/// Cache-line size used to align the state array.
pub const CACHE_LINE: usize = 64;

/// A state's output set: either inline pattern ids or a slice of the shared
/// output table.
#[derive(Debug, Clone, Copy)]
pub enum Outputs {
    Inline { ids: [u32; INLINE_OUTPUT_CAP], len: u8 },
    Table { offset: u32, count: u32 },
}

impl Default for Outputs {
    fn default() -> Self {
        Outputs::Inline {
            ids: [0; INLINE_OUTPUT_CAP],
            len: 0,
        }
    }
}

/// One automaton node: a 256-way transition row, a failure link, and its
/// output set.
#[derive(Debug, Clone)]
pub struct State {
    pub next: [u32; 256],
    pub failure: u32,
    pub outputs: Outputs,
}

impl Default for State {
    fn default() -> Self {
        State {
            next: [0; 256],
            failure: 0,
            outputs: Outputs::default(),
        }
    }
}

/// The root state's id; also the sentinel for "no transition".
pub const ROOT: u32 = 0;

/// Growable state storage bounded by `max_states`, plus the shared output
/// table used once a state's inline output set overflows.
#[derive(Debug)]
pub struct StateArray {
    states: Vec<State>,
    output_table: Vec<u32>,
    max_states: usize,
    aligned_next: OnceLock<AlignedBuffer<u32>>,
}

impl StateArray {
    pub fn new(max_states: usize) -> Self {
        let mut states = Vec::with_capacity(1.min(max_states));
        states.push(State::default()); // root
        StateArray {
            states,
            output_table: Vec::new(),
            max_states,
            aligned_next: OnceLock::new(),
        }
    }

    /// Allocate a new zero-initialized state, returning its id.
    pub fn allocate(&mut self) -> Option<u32> {
        if self.states.len() >= self.max_states {
            return None;
        }
        let id = self.states.len() as u32;
        self.states.push(State::default());
        Some(id)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn get(&self, id: u32) -> &State {
        &self.states[id as usize]
    }

    pub fn get_mut(&mut self, id: u32) -> &mut State {
        &mut self.states[id as usize]
    }

    /// Append `id` to a state's own (terminal) output set, spilling to the
    /// output table if the inline cap is exceeded.
    pub fn push_output(&mut self, state: u32, id: u32) {
        let outputs = self.states[state as usize].outputs;
        match outputs {
            Outputs::Inline { mut ids, len } if (len as usize) < INLINE_OUTPUT_CAP => {
                ids[len as usize] = id;
                self.states[state as usize].outputs = Outputs::Inline {
                    ids,
                    len: len + 1,
                };
            }
            Outputs::Inline { ids, len } => {
                let offset = self.output_table.len() as u32;
                self.output_table.extend_from_slice(&ids[..len as usize]);
                self.output_table.push(id);
                self.states[state as usize].outputs = Outputs::Table {
                    offset,
                    count: len as u32 + 1,
                };
            }
            Outputs::Table { offset, count } => {
                // Only grow in place if we're still the last occupant of the
                // table; otherwise relocate to the end.
                if offset as usize + count as usize == self.output_table.len() {
                    self.output_table.push(id);
                    self.states[state as usize].outputs = Outputs::Table {
                        offset,
                        count: count + 1,
                    };
                } else {
                    let existing: Vec<u32> = self.output_table
                        [offset as usize..offset as usize + count as usize]
                        .to_vec();
                    let new_offset = self.output_table.len() as u32;
                    self.output_table.extend_from_slice(&existing);
                    self.output_table.push(id);
                    self.states[state as usize].outputs = Outputs::Table {
                        offset: new_offset,
                        count: count + 1,
                    };
                }
            }
        }
    }

    /// Extend a state's output set with ids propagated from its failure
    /// chain, appended after its own terminal ids (§4.5 tie-breaking).
    pub fn extend_outputs(&mut self, state: u32, ids: &[u32]) {
        for &id in ids {
            self.push_output(state, id);
        }
    }

    pub fn output_ids(&self, state: u32) -> OutputIds<'_> {
        match self.states[state as usize].outputs {
            Outputs::Inline { ids, len } => OutputIds::Inline { ids, len, pos: 0 },
            Outputs::Table { offset, count } => OutputIds::Table {
                table: &self.output_table,
                offset,
                count,
                pos: 0,
            },
        }
    }

    /// Copy a state's output ids into an owned vector (used while building,
    /// before the failure chain for a later state has been propagated).
    pub fn output_ids_vec(&self, state: u32) -> Vec<u32> {
        self.output_ids(state).collect()
    }
}

/// Iterator over a state's output pattern ids, in stored order.
pub enum OutputIds<'a> {
    Inline {
        ids: [u32; INLINE_OUTPUT_CAP],
        len: u8,
        pos: u8,
    },
    Table {
        table: &'a [u32],
        offset: u32,
        count: u32,
        pos: u32,
    },
}

impl<'a> Iterator for OutputIds<'a> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        match self {
            OutputIds::Inline { ids, len, pos } => {
                if *pos < *len {
                    let v = ids[*pos as usize];
                    *pos += 1;
                    Some(v)
                } else {
                    None
                }
            }
            OutputIds::Table {
                table,
                offset,
                count,
                pos,
            } => {
                if *pos < *count {
                    let v = table[(*offset + *pos) as usize];
                    *pos += 1;
                    Some(v)
                } else {
                    None
                }
            }
        }
    }
}

/// Build a cache-line-aligned copy of a finished state array's `next` tables.
fn build_aligned_next_rows(states: &[State]) -> AlignedBuffer<u32> {
    let mut buf = AlignedBuffer::<u32>::new(CACHE_LINE, states.len() * 256)
        .expect("allocation of state transition table failed");
    let slice = buf.as_mut_slice();
    for (i, s) in states.iter().enumerate() {
        slice[i * 256..(i + 1) * 256].copy_from_slice(&s.next);
    }
    buf
}

impl StateArray {
    /// Cache-line-aligned view of every state's 256-entry transition row,
    /// built on first use and cached for the array's lifetime (a rebuild
    /// always constructs a fresh `StateArray`, so the cache never goes
    /// stale underneath a live search).
    fn aligned_next(&self) -> &AlignedBuffer<u32> {
        self.aligned_next
            .get_or_init(|| build_aligned_next_rows(&self.states))
    }

    /// Pointer to the start of `state`'s 256-entry transition row in the
    /// cache-line-aligned buffer. The SIMD matcher prefetches through this
    /// pointer one state ahead of where the scalar walk would need it.
    pub fn next_row_ptr(&self, state: u32) -> *const u32 {
        self.aligned_next().as_slice()[state as usize * 256..].as_ptr()
    }
}
