//! Pattern loader (C9): an external-collaborator adapter between a
//! line-oriented byte source and [`PatternSet`]. Kept free of any output
//! side effects (no printing) — callers that want progress reporting pass
//! a callback.

use crate::automaton::Automaton;
use crate::error::Result;

/// Split `data` into lines on `\n` (tolerating a preceding `\r`), trim
/// leading/trailing whitespace, skip empty lines and lines whose first
/// non-whitespace byte is `#`, and add each surviving line to `automaton`.
///
/// `on_progress`, if given, is called with the running count of accepted
/// patterns every `progress_every` patterns (the reference loader's
/// "every 100,000" reporting, made caller-configurable instead of hardcoded
/// and printf-based).
pub fn load_from_lines(
    automaton: &mut Automaton,
    data: &[u8],
    progress_every: usize,
    mut on_progress: impl FnMut(usize),
) -> Result<usize> {
    let mut accepted = 0usize;

    for raw_line in memchr::memchr_iter(b'\n', data)
        .scan(0usize, |start, nl| {
            let line = &data[*start..nl];
            *start = nl + 1;
            Some(line)
        })
        .chain(std::iter::once_with(|| {
            let last_nl = memchr::memrchr(b'\n', data).map(|i| i + 1).unwrap_or(0);
            &data[last_nl..]
        }))
    {
        let line = trim(raw_line);
        if line.is_empty() || line[0] == b'#' {
            continue;
        }
        automaton.add_pattern(line)?;
        accepted += 1;
        if progress_every > 0 && accepted % progress_every == 0 {
            on_progress(accepted);
        }
    }

    Ok(accepted)
}

fn trim(line: &[u8]) -> &[u8] {
    let is_ws = |b: &u8| matches!(*b, b' ' | b'\t' | b'\r' | b'\n');
    let start = line.iter().position(|b| !is_ws(b)).unwrap_or(line.len());
    let end = line.iter().rposition(|b| !is_ws(b)).map(|i| i + 1).unwrap_or(start);
    &line[start..end]
}
