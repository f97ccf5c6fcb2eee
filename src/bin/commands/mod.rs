use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use ac_match::{Automaton, Limits, MatchRecord};

/// Build an automaton from `patterns_path`, then scan every file in
/// `inputs` (or stdin for "-"), printing one NDJSON line per match.
pub fn cmd_match(
    patterns_path: PathBuf,
    inputs: Vec<PathBuf>,
    extended: bool,
    max_matches: usize,
    show_stats: bool,
) -> Result<()> {
    let pattern_data = fs::read(&patterns_path)
        .with_context(|| format!("reading pattern file {}", patterns_path.display()))?;

    let limits = if extended { Limits::extended() } else { Limits::default() };
    let mut automaton = Automaton::with_limits(limits);

    let count = ac_match::loader::load_from_lines(&mut automaton, &pattern_data, 100_000, |n| {
        eprintln!("  ... {n} patterns loaded");
    })
    .map_err(|e| anyhow::anyhow!("loading patterns: {e}"))?;
    eprintln!("loaded {count} patterns from {}", patterns_path.display());

    automaton
        .build()
        .map_err(|e| anyhow::anyhow!("building automaton: {e}"))?;

    let cap = if max_matches == 0 { 1_000_000 } else { max_matches.min(1_000_000) };
    let mut out = vec![MatchRecord::new(0, 0, 0); cap];
    let stdout = io::stdout();
    let mut writer = stdout.lock();

    for input in &inputs {
        let text = read_input(input)?;
        let n = automaton
            .search(&text, &mut out)
            .map_err(|e| anyhow::anyhow!("searching {}: {e}", input.display()))?;
        for m in &out[..n] {
            writeln!(
                writer,
                "{{\"file\":\"{}\",\"offset\":{},\"length\":{},\"pattern_id\":{}}}",
                input.display(),
                m.offset,
                m.length,
                m.pattern_id
            )?;
        }
    }

    if show_stats {
        let snap = automaton.get_stats();
        eprintln!(
            "searches={} matches={} bytes={} simd_ops={} scalar_ops={} avg_search_ns={}",
            snap.searches, snap.matches, snap.bytes, snap.simd_ops, snap.scalar_ops, snap.avg_search_nanos
        );
    }

    Ok(())
}

/// Print the detected CPU SIMD support to stdout.
pub fn cmd_info() -> Result<()> {
    let features = ac_match::cpu_features::detected();
    println!("{}", features.info_string());
    println!("any_simd: {}", features.any_simd());
    Ok(())
}

fn read_input(path: &PathBuf) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("reading stdin")?;
        Ok(buf)
    } else {
        fs::read(path).with_context(|| format!("reading input file {}", path.display()))
    }
}
