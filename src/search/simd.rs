//! SIMD matcher (C7): block-wise case-fold ahead of the scalar state walk.
//!
//! State transitions still run byte-at-a-time over the folded block — the
//! SIMD value here is in the fold and in prefetching upcoming `next` rows
//! out of [`crate::state::StateArray`]'s cache-line-aligned view, not in
//! vectorizing the automaton walk itself. The match set this produces must
//! be byte-identical to [`crate::search::scalar`] for every input; the
//! property tests in `tests/property_tests.rs` check that directly.
//!
//! The fold intrinsics build on the same lane-mask technique as
//! `ascii_lowercase_simd_x86`/`ascii_lowercase_simd_arm`, widened to
//! AVX-512/AVX2 and folding one block straight into the automaton walk
//! instead of into a side buffer.

use crate::match_record::MatchRecord;
use crate::patterns::ascii_lowercase_byte;
use crate::state::{StateArray, ROOT};

pub const AVX512_WIDTH: usize = 64;
pub const AVX2_WIDTH: usize = 32;
pub const NEON_WIDTH: usize = 16;

/// Case-fold `block` in place using the lane-mask scheme (`'A'..='Z'` maps
/// to `+32`, everything else untouched) on whichever SIMD ISA is available,
/// falling back to the scalar fold for widths with no vector implementation
/// on this target.
#[inline]
fn fold_block(block: &mut [u8]) {
    #[cfg(target_arch = "x86_64")]
    {
        if crate::cpu_features::detected().avx512f && block.len() >= AVX512_WIDTH {
            unsafe { fold_avx512(block) };
            return;
        }
        if crate::cpu_features::detected().avx2 && block.len() >= AVX2_WIDTH {
            unsafe { fold_avx2(block) };
            return;
        }
    }
    #[cfg(target_arch = "aarch64")]
    {
        if crate::cpu_features::detected().neon && block.len() >= NEON_WIDTH {
            unsafe { fold_neon(block) };
            return;
        }
    }
    fold_scalar(block);
}

fn fold_scalar(block: &mut [u8]) {
    for b in block.iter_mut() {
        *b = crate::patterns::ascii_lowercase_byte(*b);
    }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx512f,avx512bw")]
unsafe fn fold_avx512(block: &mut [u8]) {
    use std::arch::x86_64::*;

    let mut i = 0;
    while i + 64 <= block.len() {
        let ptr = block.as_mut_ptr().add(i);
        let v = _mm512_loadu_si512(ptr as *const __m512i);
        let ge_a = _mm512_cmpge_epu8_mask(v, _mm512_set1_epi8(b'A' as i8));
        let le_z = _mm512_cmple_epu8_mask(v, _mm512_set1_epi8(b'Z' as i8));
        let is_upper = ge_a & le_z;
        let folded = _mm512_mask_add_epi8(v, is_upper, v, _mm512_set1_epi8(32));
        _mm512_storeu_si512(ptr as *mut __m512i, folded);
        i += 64;
    }
    fold_scalar(&mut block[i..]);
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn fold_avx2(block: &mut [u8]) {
    use std::arch::x86_64::*;

    let mut i = 0;
    while i + 32 <= block.len() {
        let ptr = block.as_mut_ptr().add(i) as *const __m256i;
        let v = _mm256_loadu_si256(ptr);
        // Unsigned range test via `cmpgt` on values shifted into signed
        // range: (b - 'A') as i8 < 26 after biasing, using saturating
        // subtraction so bytes below 'A' don't wrap and false-positive.
        let lower_bound = _mm256_set1_epi8(b'A' as i8 - 1);
        let upper_bound = _mm256_set1_epi8(b'Z' as i8 + 1);
        let above_lower = _mm256_cmpgt_epi8(
            _mm256_xor_si256(v, _mm256_set1_epi8(-128i8)),
            _mm256_xor_si256(lower_bound, _mm256_set1_epi8(-128i8)),
        );
        let below_upper = _mm256_cmpgt_epi8(
            _mm256_xor_si256(upper_bound, _mm256_set1_epi8(-128i8)),
            _mm256_xor_si256(v, _mm256_set1_epi8(-128i8)),
        );
        let is_upper = _mm256_and_si256(above_lower, below_upper);
        let addend = _mm256_and_si256(is_upper, _mm256_set1_epi8(32));
        let folded = _mm256_add_epi8(v, addend);
        _mm256_storeu_si256(block.as_mut_ptr().add(i) as *mut __m256i, folded);
        i += 32;
    }
    fold_scalar(&mut block[i..]);
}

#[cfg(target_arch = "aarch64")]
unsafe fn fold_neon(block: &mut [u8]) {
    use std::arch::aarch64::*;

    let mut i = 0;
    while i + 16 <= block.len() {
        let ptr = block.as_mut_ptr().add(i);
        let v = vld1q_u8(ptr);
        let ge_a = vcgeq_u8(v, vdupq_n_u8(b'A'));
        let le_z = vcleq_u8(v, vdupq_n_u8(b'Z'));
        let is_upper = vandq_u8(ge_a, le_z);
        let addend = vandq_u8(is_upper, vdupq_n_u8(32));
        let folded = vaddq_u8(v, addend);
        vst1q_u8(ptr, folded);
        i += 16;
    }
    fold_scalar(&mut block[i..]);
}

/// Issue a prefetch hint for a state's transition row. A no-op on targets
/// with no stable prefetch intrinsic (the hint is purely a latency-hiding
/// optimization, never required for correctness).
#[cfg(target_arch = "x86_64")]
#[inline]
fn prefetch_row(ptr: *const u32) {
    use std::arch::x86_64::{_mm_prefetch, _MM_HINT_T0};
    unsafe { _mm_prefetch(ptr as *const i8, _MM_HINT_T0) };
}

#[cfg(not(target_arch = "x86_64"))]
#[inline]
fn prefetch_row(_ptr: *const u32) {}

/// The automaton walk, byte-identical to [`crate::search::scalar`]'s, except
/// that once a byte's arrival state is known, the *next* row it will need is
/// prefetched through [`StateArray::next_row_ptr`] — hiding that row's load
/// latency behind the rest of this iteration's work instead of stalling on
/// it at the top of the next one.
fn search_with_prefetch(
    states: &StateArray,
    text: &[u8],
    out: &mut [MatchRecord],
    length_of: impl Fn(u32) -> u64,
) -> usize {
    let mut state = ROOT;
    let mut count = 0usize;

    for (i, &raw) in text.iter().enumerate() {
        let b = ascii_lowercase_byte(raw);

        while state != ROOT && states.get(state).next[b as usize] == ROOT {
            state = states.get(state).failure;
        }
        state = states.get(state).next[b as usize];
        prefetch_row(states.next_row_ptr(state));

        for id in states.output_ids(state) {
            if count < out.len() {
                let length = length_of(id);
                out[count] = MatchRecord::new(i as u64 + 1 - length, length, id);
                count += 1;
            }
        }
    }

    count
}

/// Run the SIMD-accelerated search: fold the buffer block-wise, then walk
/// the automaton over the folded bytes with prefetching ahead of the state
/// walk. `text` is never mutated — folding happens on a scratch copy so
/// repeated searches over the same buffer stay side-effect-free.
pub fn search(
    states: &StateArray,
    text: &[u8],
    out: &mut [MatchRecord],
    length_of: impl Fn(u32) -> u64,
) -> usize {
    let mut folded = text.to_vec();
    fold_block(&mut folded);
    search_with_prefetch(states, &folded, out, length_of)
}
