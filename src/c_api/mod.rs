//! C API for ac-match
//!
//! Provides stable C FFI bindings for building automata and searching text
//! from C/C++ and other languages. The API uses opaque handles and integer
//! error codes for maximum compatibility across language boundaries.
//!
//! # Safety Guarantees
//!
//! All C functions follow these rules:
//! - Null pointer checks on all inputs
//! - Opaque handles for resource management
//! - Integer error codes (no exceptions, no panics crossing the boundary)
//! - Memory ownership clearly documented per function
//!
//! # Basic Usage Pattern
//!
//! ```c
//! #include <ac_match/ac_match.h>
//!
//! ac_automaton_t *a = ac_create();
//!
//! uint32_t id;
//! ac_add_pattern(a, (const uint8_t *)"he", 2, &id);
//! ac_add_pattern(a, (const uint8_t *)"she", 3, &id);
//!
//! if (ac_build(a) != AC_SUCCESS) { /* handle error */ }
//!
//! ac_match_t matches[16];
//! int64_t n = ac_search(a, (const uint8_t *)"ushers", 6, matches, 16);
//! for (int64_t i = 0; i < n; i++) {
//!     printf("offset=%llu length=%llu id=%u\n",
//!            matches[i].offset, matches[i].length, matches[i].pattern_id);
//! }
//!
//! ac_destroy(a);
//! ```
//!
//! # Thread Safety
//!
//! A built automaton is safe for concurrent `ac_search` calls from any
//! number of threads. `ac_add_pattern`/`ac_build` must not run concurrently
//! with searches on the same handle.

pub mod ac;
