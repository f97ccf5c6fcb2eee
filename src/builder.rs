//! Builder (C5): trie construction, BFS failure links, output propagation.
//!
//! Grounded in `build_goto_function`/`build_failure_function`/
//! `build_output_function` from the C reference implementation, adapted to
//! the table/output-set layout in [`crate::state`].

use std::collections::VecDeque;

use crate::error::{MatchError, Result};
use crate::patterns::PatternSet;
use crate::state::{StateArray, ROOT};

/// Run all three build phases over `patterns`, returning a ready-to-search
/// state array or a [`MatchError::CapacityExceeded`]/[`MatchError::NoPatterns`].
pub fn build(patterns: &PatternSet, max_states: usize) -> Result<StateArray> {
    if patterns.is_empty() {
        return Err(MatchError::NoPatterns);
    }

    let mut states = StateArray::new(max_states);
    goto_phase(patterns, &mut states)?;
    failure_phase(&mut states);
    output_propagation_phase(&mut states);
    Ok(states)
}

/// Phase A: walk each pattern from the root, allocating states for missing
/// edges, and record its id in the terminal state's own output set.
fn goto_phase(patterns: &PatternSet, states: &mut StateArray) -> Result<()> {
    for (id, bytes) in patterns.iter() {
        let mut cur = ROOT;
        for &b in bytes {
            let next = states.get(cur).next[b as usize];
            cur = if next != ROOT {
                next
            } else {
                let new_state = states.allocate().ok_or(MatchError::CapacityExceeded)?;
                states.get_mut(cur).next[b as usize] = new_state;
                new_state
            };
        }
        states.push_output(cur, id);
    }
    Ok(())
}

/// Phase B: BFS over depth-1 states (whose failure is the root by
/// definition), filling in `failure` for every deeper state in strict BFS
/// order so that `failure(r)` is already known when a child `u` of `r` is
/// processed.
fn failure_phase(states: &mut StateArray) {
    let mut queue = VecDeque::new();

    for b in 0..256usize {
        let child = states.get(ROOT).next[b];
        if child != ROOT {
            states.get_mut(child).failure = ROOT;
            queue.push_back(child);
        }
    }

    while let Some(r) = queue.pop_front() {
        for b in 0..256usize {
            let u = states.get(r).next[b];
            if u == ROOT {
                continue;
            }
            let mut cur = states.get(r).failure;
            while cur != ROOT && states.get(cur).next[b] == ROOT {
                cur = states.get(cur).failure;
            }
            let candidate = states.get(cur).next[b];
            states.get_mut(u).failure = if candidate != ROOT && candidate != u {
                candidate
            } else {
                ROOT
            };
            queue.push_back(u);
        }
    }
}

/// Phase C: in BFS order, union each state's failure-chain outputs into its
/// own output set so that matching only ever reads one state's local list.
fn output_propagation_phase(states: &mut StateArray) {
    let mut queue = VecDeque::new();
    for b in 0..256usize {
        let child = states.get(ROOT).next[b];
        if child != ROOT {
            queue.push_back(child);
        }
    }

    while let Some(s) = queue.pop_front() {
        let failure = states.get(s).failure;
        let inherited = states.output_ids_vec(failure);
        states.extend_outputs(s, &inherited);

        for b in 0..256usize {
            let u = states.get(s).next[b];
            if u != ROOT {
                queue.push_back(u);
            }
        }
    }
}
