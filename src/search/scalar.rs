//! Scalar matcher (C6): the reference search loop.
//!
//! Folds each byte, walks failure links until a transition exists, and
//! emits matches from the arrival state's output set, in offset order. This
//! is the ground truth the SIMD matcher must reproduce byte-for-byte.

use crate::match_record::MatchRecord;
use crate::patterns::ascii_lowercase_byte;
use crate::state::{StateArray, ROOT};

/// Run the scalar search loop over `text`, starting from `start_state` (0
/// for a fresh search), writing matches into `out` and returning `(match
/// count, final state)`. Pattern lengths are resolved through `length_of`,
/// since the state array itself stores ids, not lengths.
///
/// At most `out.len()` matches are written; once full, scanning continues
/// (to keep the state-walk semantics correct) but further matches are
/// dropped rather than written out of bounds.
pub fn search_with_lengths(
    states: &StateArray,
    text: &[u8],
    start_state: u32,
    out: &mut [MatchRecord],
    length_of: impl Fn(u32) -> u64,
) -> (usize, u32) {
    let mut state = start_state;
    let mut count = 0usize;

    for (i, &raw) in text.iter().enumerate() {
        let b = ascii_lowercase_byte(raw);

        while state != ROOT && states.get(state).next[b as usize] == ROOT {
            state = states.get(state).failure;
        }
        state = states.get(state).next[b as usize];

        for id in states.output_ids(state) {
            if count < out.len() {
                let length = length_of(id);
                out[count] = MatchRecord::new(i as u64 + 1 - length, length, id);
                count += 1;
            }
        }
    }

    (count, state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use crate::patterns::PatternSet;

    fn setup(words: &[&[u8]]) -> (PatternSet, StateArray) {
        let mut set = PatternSet::new(1000);
        for w in words {
            set.add(w).unwrap();
        }
        let states = build(&set, 10_000).unwrap();
        (set, states)
    }

    fn run(set: &PatternSet, states: &StateArray, text: &[u8]) -> Vec<(u64, u64, u32)> {
        let mut out = vec![MatchRecord::new(0, 0, 0); 1000];
        let (n, _) = search_with_lengths(states, text, ROOT, &mut out, |id| {
            set.get(id).unwrap().len() as u64
        });
        out[..n].iter().map(|m| (m.offset, m.length, m.pattern_id)).collect()
    }

    #[test]
    fn ushers_scenario() {
        let (set, states) = setup(&[b"he", b"she", b"his", b"hers"]);
        let mut got = run(&set, &states, b"ushers");
        got.sort();
        let mut want = vec![(1, 3, 1), (2, 2, 0), (2, 4, 3)];
        want.sort();
        assert_eq!(got, want);
    }

    #[test]
    fn case_insensitive_scenario() {
        let (set, states) = setup(&[b"abc"]);
        let got = run(&set, &states, b"ABCabcAbC");
        assert_eq!(got, vec![(0, 3, 0), (3, 3, 0), (6, 3, 0)]);
    }

    #[test]
    fn empty_text_yields_no_matches() {
        let (set, states) = setup(&[b"a"]);
        assert!(run(&set, &states, b"").is_empty());
    }

    #[test]
    fn zero_capacity_buffer_writes_nothing() {
        let (set, states) = setup(&[b"a"]);
        let mut out: Vec<MatchRecord> = Vec::new();
        let (n, _) = search_with_lengths(&states, b"aaa", ROOT, &mut out, |id| {
            set.get(id).unwrap().len() as u64
        });
        assert_eq!(n, 0);
    }
}
