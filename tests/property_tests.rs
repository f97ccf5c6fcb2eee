//! Property tests for the universal invariants of the matching engine:
//! output correctness against the stored patterns, equivalence to a
//! trivial reference matcher, scalar/SIMD equivalence, ordering, and
//! build idempotence/incrementality.

use proptest::prelude::*;

use ac_match::{Automaton, MatchRecord};
use ac_match::builder;
use ac_match::patterns::PatternSet;
use ac_match::search::{scalar, simd};
use ac_match::state::ROOT;

fn ascii_lower(b: u8) -> u8 {
    if b.wrapping_sub(b'A') < 26 {
        b + 32
    } else {
        b
    }
}

fn fold(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().copied().map(ascii_lower).collect()
}

/// The trivial O(|text| * sum(|pattern|)) reference matcher: try every
/// pattern at every offset.
fn reference_matches(patterns: &[Vec<u8>], text: &[u8]) -> Vec<(u64, u64, u32)> {
    let folded_text = fold(text);
    let mut out = Vec::new();
    for (id, pattern) in patterns.iter().enumerate() {
        if pattern.is_empty() || pattern.len() > folded_text.len() {
            continue;
        }
        for offset in 0..=(folded_text.len() - pattern.len()) {
            if &folded_text[offset..offset + pattern.len()] == pattern.as_slice() {
                out.push((offset as u64, pattern.len() as u64, id as u32));
            }
        }
    }
    out
}

fn multiset_eq(mut a: Vec<(u64, u64, u32)>, mut b: Vec<(u64, u64, u32)>) -> bool {
    a.sort();
    b.sort();
    a == b
}

fn build_automaton(patterns: &[Vec<u8>]) -> Automaton {
    let mut automaton = Automaton::new();
    for p in patterns {
        automaton.add_pattern(p).unwrap();
    }
    automaton.build().unwrap();
    automaton
}

fn run_search(automaton: &Automaton, text: &[u8]) -> Vec<(u64, u64, u32)> {
    let mut out = vec![MatchRecord::new(0, 0, 0); 100_000];
    let n = automaton.search(text, &mut out).unwrap();
    out[..n].iter().map(|m| (m.offset, m.length, m.pattern_id)).collect()
}

fn arb_pattern() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 1..6)
}

fn arb_patterns() -> impl Strategy<Value = Vec<Vec<u8>>> {
    proptest::collection::vec(arb_pattern(), 1..8)
}

fn arb_text() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..64)
}

proptest! {
    /// Invariant 1: every emitted match's bytes, case-folded, equal the
    /// stored (already-folded) pattern.
    #[test]
    fn matches_reflect_stored_pattern(patterns in arb_patterns(), text in arb_text()) {
        let automaton = build_automaton(&patterns);
        let folded_text = fold(&text);
        let matches = run_search(&automaton, &text);

        for (offset, length, id) in matches {
            let stored = automaton.pattern(id).unwrap();
            let slice = &folded_text[offset as usize..(offset + length) as usize];
            prop_assert_eq!(slice, stored);
        }
    }

    /// Invariant 2: the match set equals the trivial reference matcher's.
    #[test]
    fn matches_equal_reference_matcher(patterns in arb_patterns(), text in arb_text()) {
        let automaton = build_automaton(&patterns);
        let folded_patterns: Vec<Vec<u8>> = patterns.iter().map(|p| fold(p)).collect();

        let got = run_search(&automaton, &text);
        let want = reference_matches(&folded_patterns, &text);

        prop_assert!(multiset_eq(got, want));
    }

    /// Invariant 4: matches are emitted in nondecreasing end-position order.
    #[test]
    fn matches_are_end_position_ordered(patterns in arb_patterns(), text in arb_text()) {
        let automaton = build_automaton(&patterns);
        let matches = run_search(&automaton, &text);

        let mut last_end = 0u64;
        for (offset, length, _) in matches {
            let end = offset + length;
            prop_assert!(end >= last_end);
            last_end = end;
        }
    }

    /// Invariant 5: building a second time over an unmodified pattern set
    /// produces the same match sequences.
    #[test]
    fn build_is_idempotent(patterns in arb_patterns(), text in arb_text()) {
        let mut automaton = build_automaton(&patterns);
        let first = run_search(&automaton, &text);

        automaton.build().unwrap();
        let second = run_search(&automaton, &text);

        prop_assert_eq!(first, second);
    }

    /// Invariant 3: the scalar and SIMD matchers produce byte-identical
    /// match sequences for the same (automaton, text) pair.
    #[test]
    fn scalar_and_simd_are_byte_identical(patterns in arb_patterns(), text in arb_text()) {
        let mut set = PatternSet::new(1000);
        let mut lengths = Vec::new();
        for p in &patterns {
            if let Ok(id) = set.add(p) {
                prop_assert_eq!(id as usize, lengths.len());
                lengths.push(set.get(id).unwrap().len() as u64);
            }
        }
        prop_assume!(!set.is_empty());
        let states = builder::build(&set, 100_000).unwrap();
        let length_of = |id: u32| lengths[id as usize];

        let mut scalar_out = vec![MatchRecord::new(0, 0, 0); 10_000];
        let (scalar_n, _) = scalar::search_with_lengths(&states, &text, ROOT, &mut scalar_out, length_of);

        let mut simd_out = vec![MatchRecord::new(0, 0, 0); 10_000];
        let simd_n = simd::search(&states, &text, &mut simd_out, length_of);

        prop_assert_eq!(scalar_n, simd_n);
        for i in 0..scalar_n {
            prop_assert_eq!(
                (scalar_out[i].offset, scalar_out[i].length, scalar_out[i].pattern_id),
                (simd_out[i].offset, simd_out[i].length, simd_out[i].pattern_id)
            );
        }
    }

    /// Invariant 6: adding patterns after a build and rebuilding matches a
    /// from-scratch build with all patterns present from the start.
    #[test]
    fn incremental_build_matches_from_scratch(
        initial in arb_patterns(),
        more in arb_patterns(),
        text in arb_text(),
    ) {
        let mut incremental = build_automaton(&initial);
        for p in &more {
            incremental.add_pattern(p).unwrap();
        }
        incremental.build().unwrap();

        let mut all = initial.clone();
        all.extend(more);
        let fresh = build_automaton(&all);

        let got = run_search(&incremental, &text);
        let want = run_search(&fresh, &text);
        prop_assert!(multiset_eq(got, want));
    }
}
