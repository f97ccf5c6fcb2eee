//! The wire-stable match record (`ac_match_t` in the C reference).

/// Reserved confidence value filled into every emitted match, matching the
/// C source's hardcoded `95`. Consumers must not depend on this value.
pub const RESERVED_CONFIDENCE: u32 = 95;

/// A single pattern occurrence found during a search.
///
/// Layout is fixed at 24 bytes (`repr(C)`) so this struct can be written
/// directly into a caller-provided buffer across the C ABI: `{ u64 offset;
/// u64 length; u32 pattern_id; u32 confidence }`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRecord {
    /// Byte offset in the searched buffer at which the match begins.
    pub offset: u64,
    /// Length of the match in bytes (equal to the matched pattern's length).
    pub length: u64,
    /// Id of the pattern that matched, as returned by `PatternSet::add`.
    pub pattern_id: u32,
    /// Reserved; always `RESERVED_CONFIDENCE`. Ignore this field.
    pub confidence: u32,
}

impl MatchRecord {
    pub fn new(offset: u64, length: u64, pattern_id: u32) -> Self {
        MatchRecord {
            offset,
            length,
            pattern_id,
            confidence: RESERVED_CONFIDENCE,
        }
    }
}
