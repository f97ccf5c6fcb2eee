use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create an ac-match command
fn ac_match_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("ac-match"))
}

#[test]
fn test_help() {
    ac_match_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("SIMD-accelerated multi-pattern byte matcher"));
}

#[test]
fn test_version() {
    ac_match_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ac-match"));
}

#[test]
fn test_match_help() {
    ac_match_cmd()
        .arg("match")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Files to scan"));
}

#[test]
fn test_info_reports_simd_support() {
    ac_match_cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("AVX-512"))
        .stdout(predicate::str::contains("any_simd"));
}

#[test]
fn test_match_finds_patterns_in_file() {
    let temp_dir = TempDir::new().unwrap();
    let patterns_file = temp_dir.path().join("patterns.txt");
    let input_file = temp_dir.path().join("input.txt");

    fs::write(&patterns_file, "he\nshe\nhis\nhers\n").unwrap();
    fs::write(&input_file, "ushers").unwrap();

    ac_match_cmd()
        .arg("match")
        .arg(&patterns_file)
        .arg(&input_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"pattern_id\":0"))
        .stdout(predicate::str::contains("\"pattern_id\":1"))
        .stdout(predicate::str::contains("\"pattern_id\":3"));
}

#[test]
fn test_match_skips_comments_and_blank_lines() {
    let temp_dir = TempDir::new().unwrap();
    let patterns_file = temp_dir.path().join("patterns.txt");
    let input_file = temp_dir.path().join("input.txt");

    fs::write(&patterns_file, "# a comment\n\nabc\n  \n").unwrap();
    fs::write(&input_file, "xabcx").unwrap();

    ac_match_cmd()
        .arg("match")
        .arg(&patterns_file)
        .arg(&input_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"offset\":1,\"length\":3,\"pattern_id\":0"));
}

#[test]
fn test_match_is_case_insensitive() {
    let temp_dir = TempDir::new().unwrap();
    let patterns_file = temp_dir.path().join("patterns.txt");
    let input_file = temp_dir.path().join("input.txt");

    fs::write(&patterns_file, "abc\n").unwrap();
    fs::write(&input_file, "ABCabcAbC").unwrap();

    let output = ac_match_cmd()
        .arg("match")
        .arg(&patterns_file)
        .arg(&input_file)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let line_count = String::from_utf8(output).unwrap().lines().count();
    assert_eq!(line_count, 3);
}

#[test]
fn test_match_with_no_matches_prints_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let patterns_file = temp_dir.path().join("patterns.txt");
    let input_file = temp_dir.path().join("input.txt");

    fs::write(&patterns_file, "zzz\n").unwrap();
    fs::write(&input_file, "no matches here").unwrap();

    ac_match_cmd()
        .arg("match")
        .arg(&patterns_file)
        .arg(&input_file)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_match_stats_flag_prints_to_stderr() {
    let temp_dir = TempDir::new().unwrap();
    let patterns_file = temp_dir.path().join("patterns.txt");
    let input_file = temp_dir.path().join("input.txt");

    fs::write(&patterns_file, "abc\n").unwrap();
    fs::write(&input_file, "abcabc").unwrap();

    ac_match_cmd()
        .arg("match")
        .arg(&patterns_file)
        .arg(&input_file)
        .arg("--stats")
        .assert()
        .success()
        .stderr(predicate::str::contains("searches=1"))
        .stderr(predicate::str::contains("matches=2"));
}

#[test]
fn test_match_missing_pattern_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("does_not_exist.txt");
    let input_file = temp_dir.path().join("input.txt");
    fs::write(&input_file, "text").unwrap();

    ac_match_cmd()
        .arg("match")
        .arg(&missing)
        .arg(&input_file)
        .assert()
        .failure();
}

#[test]
fn test_match_reads_multiple_inputs() {
    let temp_dir = TempDir::new().unwrap();
    let patterns_file = temp_dir.path().join("patterns.txt");
    let a = temp_dir.path().join("a.txt");
    let b = temp_dir.path().join("b.txt");

    fs::write(&patterns_file, "abc\n").unwrap();
    fs::write(&a, "abc").unwrap();
    fs::write(&b, "xabc").unwrap();

    ac_match_cmd()
        .arg("match")
        .arg(&patterns_file)
        .arg(&a)
        .arg(&b)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("\"file\":\"{}\"", a.display())))
        .stdout(predicate::str::contains(format!("\"file\":\"{}\"", b.display())));
}
