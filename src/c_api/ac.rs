//! C API for the Aho-Corasick automaton.
//!
//! Follows the opaque-handle pattern: a handle is a `Box` leaked with
//! `Box::into_raw` and reclaimed with `Box::from_raw`, matching the original
//! C library's `ac_create`/`ac_destroy` pair and the crate's own earlier
//! `matchy_builder_t`/`matchy_t` handles.

use std::os::raw::c_char;
use std::ptr;
use std::slice;

use crate::automaton::{Automaton, Limits};
use crate::error::MatchError;
use crate::match_record::MatchRecord;

/// Success code (`AC_SUCCESS`).
pub const AC_SUCCESS: i32 = 0;
/// Allocation failed.
pub const AC_ERROR_OUT_OF_MEMORY: i32 = -1;
/// Pattern or state capacity exceeded.
pub const AC_ERROR_CAPACITY: i32 = -2;
/// A pattern was empty.
pub const AC_ERROR_EMPTY_PATTERN: i32 = -3;
/// `build` was called with no patterns.
pub const AC_ERROR_NO_PATTERNS: i32 = -4;
/// A caller-supplied argument was invalid (usually a null pointer).
pub const AC_ERROR_BAD_ARGUMENT: i32 = -5;
/// `search` was called before `build`.
pub const AC_ERROR_NOT_INITIALIZED: i32 = -6;
/// Reserved for a future strict-mutation mode; unused by this API today.
pub const AC_ERROR_NOT_MUTABLE: i32 = -7;
/// An I/O error surfaced from the pattern loader.
pub const AC_ERROR_IO: i32 = -8;

fn error_code(err: MatchError) -> i32 {
    match err {
        MatchError::OutOfMemory => AC_ERROR_OUT_OF_MEMORY,
        MatchError::Capacity | MatchError::CapacityExceeded => AC_ERROR_CAPACITY,
        MatchError::EmptyPattern => AC_ERROR_EMPTY_PATTERN,
        MatchError::NoPatterns => AC_ERROR_NO_PATTERNS,
        MatchError::BadArgument => AC_ERROR_BAD_ARGUMENT,
        MatchError::NotInitialized => AC_ERROR_NOT_INITIALIZED,
        MatchError::NotMutable => AC_ERROR_NOT_MUTABLE,
        MatchError::Io(_) => AC_ERROR_IO,
    }
}

/// Opaque automaton handle.
#[repr(C)]
pub struct ac_automaton_t {
    _private: [u8; 0],
}

impl ac_automaton_t {
    fn from_box(automaton: Box<Automaton>) -> *mut Self {
        Box::into_raw(automaton) as *mut Self
    }

    unsafe fn as_ref<'a>(ptr: *const Self) -> &'a Automaton {
        &*(ptr as *const Automaton)
    }

    unsafe fn as_mut<'a>(ptr: *mut Self) -> &'a mut Automaton {
        &mut *(ptr as *mut Automaton)
    }
}

/// Create an automaton with the default ("simple engine") capacity limits.
///
/// Returns a non-null handle on success, or NULL on allocation failure.
#[no_mangle]
pub extern "C" fn ac_create() -> *mut ac_automaton_t {
    ac_automaton_t::from_box(Box::new(Automaton::new()))
}

/// Create an automaton with the "extended engine" capacity limits
/// (`max_patterns = 2_000_000`, `max_states = 10_000_000`).
#[no_mangle]
pub extern "C" fn ac_create_extended() -> *mut ac_automaton_t {
    ac_automaton_t::from_box(Box::new(Automaton::with_limits(Limits::extended())))
}

/// Destroy an automaton created by [`ac_create`] or [`ac_create_extended`].
///
/// # Safety
/// `automaton` must be a pointer returned by this module's `ac_create*`
/// functions, not already destroyed, and not null.
#[no_mangle]
pub unsafe extern "C" fn ac_destroy(automaton: *mut ac_automaton_t) {
    if automaton.is_null() {
        return;
    }
    drop(Box::from_raw(automaton as *mut Automaton));
}

/// Add a pattern, writing its assigned id to `*out_id` on success.
///
/// # Safety
/// `automaton` and `bytes` must be valid, non-null, and `bytes` must point
/// to at least `len` readable bytes. `out_id` may be null if the caller
/// doesn't need the assigned id.
#[no_mangle]
pub unsafe extern "C" fn ac_add_pattern(
    automaton: *mut ac_automaton_t,
    bytes: *const u8,
    len: usize,
    out_id: *mut u32,
) -> i32 {
    if automaton.is_null() || bytes.is_null() {
        return AC_ERROR_BAD_ARGUMENT;
    }
    let automaton = ac_automaton_t::as_mut(automaton);
    let slice = slice::from_raw_parts(bytes, len);
    match automaton.add_pattern(slice) {
        Ok(id) => {
            if !out_id.is_null() {
                *out_id = id;
            }
            AC_SUCCESS
        }
        Err(e) => error_code(e),
    }
}

/// Load patterns from an in-memory, line-oriented buffer (not a filename —
/// the core never opens files itself). Writes the number of accepted
/// patterns to `*out_count`.
///
/// # Safety
/// `automaton` and `data` must be valid and non-null; `data` must point to
/// at least `len` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn ac_load_patterns_from_lines(
    automaton: *mut ac_automaton_t,
    data: *const u8,
    len: usize,
    out_count: *mut usize,
) -> i32 {
    if automaton.is_null() || data.is_null() {
        return AC_ERROR_BAD_ARGUMENT;
    }
    let automaton = ac_automaton_t::as_mut(automaton);
    let slice = slice::from_raw_parts(data, len);
    match crate::loader::load_from_lines(automaton, slice, 0, |_| {}) {
        Ok(count) => {
            if !out_count.is_null() {
                *out_count = count;
            }
            AC_SUCCESS
        }
        Err(e) => error_code(e),
    }
}

/// Build the automaton over the patterns added so far.
///
/// # Safety
/// `automaton` must be a valid, non-null handle.
#[no_mangle]
pub unsafe extern "C" fn ac_build(automaton: *mut ac_automaton_t) -> i32 {
    if automaton.is_null() {
        return AC_ERROR_BAD_ARGUMENT;
    }
    let automaton = ac_automaton_t::as_mut(automaton);
    match automaton.build() {
        Ok(()) => AC_SUCCESS,
        Err(e) => error_code(e),
    }
}

/// Search `text` and write up to `max` matches into `out`. Returns the
/// number of matches written, or a negative error code.
///
/// # Safety
/// `automaton` and `text` must be valid and non-null; `text` must point to
/// at least `text_len` readable bytes; `out` must point to at least `max`
/// writable [`MatchRecord`]s (it may be null iff `max == 0`).
#[no_mangle]
pub unsafe extern "C" fn ac_search(
    automaton: *const ac_automaton_t,
    text: *const u8,
    text_len: usize,
    out: *mut MatchRecord,
    max: usize,
) -> i64 {
    if automaton.is_null() || text.is_null() || (out.is_null() && max > 0) {
        return AC_ERROR_BAD_ARGUMENT as i64;
    }
    let automaton = ac_automaton_t::as_ref(automaton);
    let text = slice::from_raw_parts(text, text_len);
    let out_slice = if max == 0 {
        &mut []
    } else {
        slice::from_raw_parts_mut(out, max)
    };
    match automaton.search(text, out_slice) {
        Ok(count) => count as i64,
        Err(e) => error_code(e) as i64,
    }
}

/// Stats snapshot laid out for C consumers.
#[repr(C)]
pub struct ac_stats_t {
    pub searches: u64,
    pub matches: u64,
    pub bytes: u64,
    pub simd_ops: u64,
    pub scalar_ops: u64,
    pub avg_search_nanos: u64,
}

/// Copy the automaton's current stats snapshot into `*out`.
///
/// # Safety
/// `automaton` and `out` must be valid and non-null.
#[no_mangle]
pub unsafe extern "C" fn ac_get_stats(automaton: *const ac_automaton_t, out: *mut ac_stats_t) -> i32 {
    if automaton.is_null() || out.is_null() {
        return AC_ERROR_BAD_ARGUMENT;
    }
    let snap = ac_automaton_t::as_ref(automaton).get_stats();
    *out = ac_stats_t {
        searches: snap.searches,
        matches: snap.matches,
        bytes: snap.bytes,
        simd_ops: snap.simd_ops,
        scalar_ops: snap.scalar_ops,
        avg_search_nanos: snap.avg_search_nanos,
    };
    AC_SUCCESS
}

/// Reset an automaton's stats counters to zero.
///
/// # Safety
/// `automaton` must be a valid, non-null handle.
#[no_mangle]
pub unsafe extern "C" fn ac_reset_stats(automaton: *const ac_automaton_t) -> i32 {
    if automaton.is_null() {
        return AC_ERROR_BAD_ARGUMENT;
    }
    ac_automaton_t::as_ref(automaton).reset_stats();
    AC_SUCCESS
}

/// Returns non-zero if any SIMD search path (AVX-512, AVX2, or NEON) is
/// available on this CPU.
#[no_mangle]
pub extern "C" fn ac_has_simd_support() -> i32 {
    crate::cpu_features::detected().any_simd() as i32
}

/// Write a human-readable CPU feature summary into `buf` (NUL-terminated if
/// it fits). Returns the number of bytes the full string would need
/// (excluding the NUL), matching `snprintf`'s return convention, so callers
/// can detect truncation.
///
/// # Safety
/// `buf` must point to at least `buf_len` writable bytes, or be null if
/// `buf_len == 0`.
#[no_mangle]
pub unsafe extern "C" fn ac_get_simd_info(buf: *mut c_char, buf_len: usize) -> usize {
    let info = crate::cpu_features::detected().info_string();
    let bytes = info.as_bytes();
    if buf_len > 0 && !buf.is_null() {
        let copy_len = bytes.len().min(buf_len - 1);
        ptr::copy_nonoverlapping(bytes.as_ptr(), buf as *mut u8, copy_len);
        *buf.add(copy_len) = 0;
    }
    bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_add_build_search_destroy_roundtrip() {
        unsafe {
            let a = ac_create();
            assert!(!a.is_null());

            let pattern = b"he";
            let mut id = 0u32;
            let rc = ac_add_pattern(a, pattern.as_ptr(), pattern.len(), &mut id);
            assert_eq!(rc, AC_SUCCESS);
            assert_eq!(id, 0);

            assert_eq!(ac_build(a), AC_SUCCESS);

            let text = b"ushers";
            let mut out = vec![
                MatchRecord::new(0, 0, 0);
                4
            ];
            let n = ac_search(a, text.as_ptr(), text.len(), out.as_mut_ptr(), out.len());
            assert_eq!(n, 1);

            ac_destroy(a);
        }
    }

    #[test]
    fn null_automaton_is_bad_argument() {
        unsafe {
            let mut id = 0u32;
            let rc = ac_add_pattern(ptr::null_mut(), b"x".as_ptr(), 1, &mut id);
            assert_eq!(rc, AC_ERROR_BAD_ARGUMENT);
        }
    }

    #[test]
    fn simd_info_reports_length() {
        unsafe {
            let mut buf = [0i8; 4];
            let needed = ac_get_simd_info(buf.as_mut_ptr(), buf.len());
            assert!(needed >= 3);
        }
    }
}
