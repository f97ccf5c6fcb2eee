//! Dispatcher & stats (C8): picks a matcher variant by buffer length and
//! detected CPU features, times it, and updates the automaton's stats.

use crate::cpu_features::{self, CpuFeatures};
use crate::match_record::MatchRecord;
use crate::search::{scalar, simd};
use crate::state::{StateArray, ROOT};
use crate::stats::Stats;

/// Which variant actually ran; returned alongside the match count so
/// callers (and tests) can assert on dispatch decisions directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Avx512,
    Avx2,
    Neon,
    Scalar,
}

impl Variant {
    fn is_simd(self) -> bool {
        !matches!(self, Variant::Scalar)
    }
}

fn choose(len: usize, features: CpuFeatures) -> Variant {
    if features.avx512f && len >= simd::AVX512_WIDTH {
        Variant::Avx512
    } else if features.avx2 && len >= simd::AVX2_WIDTH {
        Variant::Avx2
    } else if features.neon && len >= simd::NEON_WIDTH {
        Variant::Neon
    } else {
        Variant::Scalar
    }
}

/// Run a search, recording stats, and return `(match count, variant used)`.
pub fn search(
    states: &StateArray,
    text: &[u8],
    out: &mut [MatchRecord],
    length_of: impl Fn(u32) -> u64,
    stats: &Stats,
) -> (usize, Variant) {
    let variant = choose(text.len(), cpu_features::detected());
    let start = std::time::Instant::now();

    let count = match variant {
        Variant::Avx512 | Variant::Avx2 | Variant::Neon => simd::search(states, text, out, length_of),
        Variant::Scalar => scalar::search_with_lengths(states, text, ROOT, out, length_of).0,
    };

    let elapsed = start.elapsed().as_nanos().min(u64::MAX as u128) as u64;
    stats.record(count as u64, text.len() as u64, variant.is_simd(), elapsed);
    (count, variant)
}
