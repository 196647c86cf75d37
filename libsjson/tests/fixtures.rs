//! Test harness for the parser against fixture files.
//!
//! Reads every .json file in test/pass/ (expected to parse) and compares the
//! native conversion against the sibling .native file when one exists. Reads
//! every .json file in test/fail/ (expected to fail) and compares the error
//! message against the sibling .error file.

use std::fs;
use std::path::{Path, PathBuf};

use libsjson::{loads, parse, NativeValue};

/// Root test directory.
fn test_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("test")
}

/// All .json files in a subdirectory of test/, sorted.
fn get_json_files(subdir: &str) -> Vec<PathBuf> {
    let pattern = test_root().join(subdir).join("*.json");
    let mut files: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())
        .expect("valid glob pattern")
        .flatten()
        .collect();
    files.sort();
    files
}

/// Read a sibling file with the given extension, if present.
fn read_sibling(path: &Path, ext: &str) -> Option<String> {
    fs::read_to_string(path.with_extension(ext)).ok()
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().to_string()
}

/// Run a single pass fixture (expected to succeed).
fn run_pass_test(path: &Path) -> Result<(), String> {
    let filename = file_name(path);
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", filename, e))?;

    let value = parse(&content)
        .map_err(|e| format!("{}: Unexpected parse error: {}", filename, e))?;

    // Conversion must be stable across parses
    let native = value.to_native();
    let again = loads(&content).map_err(|e| format!("{}: loads failed: {}", filename, e))?;
    if native != again {
        return Err(format!("{}: native conversion is not deterministic", filename));
    }

    match read_sibling(path, "native") {
        Some(expected) => {
            let expected: NativeValue = serde_json::from_str(&expected)
                .map_err(|e| format!("{}: bad .native file: {}", filename, e))?;
            if native != expected {
                return Err(format!(
                    "{}: Output mismatch\n    expected: {}\n    actual:   {}",
                    filename, expected, native
                ));
            }
            println!("  {} => {}", filename, native);
        }
        None => println!("  {} => {:?} (no expected output)", filename, value),
    }
    Ok(())
}

/// Run a single fail fixture (expected to fail with a specific error).
fn run_fail_test(path: &Path) -> Result<(), String> {
    let filename = file_name(path);
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", filename, e))?;

    match parse(&content) {
        Ok(value) => Err(format!(
            "{}: Expected parse error, but got success: {:?}",
            filename, value
        )),
        Err(e) => {
            let actual_error = e.to_string();
            match read_sibling(path, "error") {
                Some(expected) if expected.trim() == actual_error => {
                    println!("  {} => error (as expected)", filename);
                    Ok(())
                }
                Some(expected) => Err(format!(
                    "{}: Error mismatch\n    expected: {}\n    actual:   {}",
                    filename,
                    expected.trim(),
                    actual_error
                )),
                None => {
                    println!(
                        "  {} => error: {} (no .error file to compare)",
                        filename, actual_error
                    );
                    Ok(())
                }
            }
        }
    }
}

fn run_all(subdir: &str, run: fn(&Path) -> Result<(), String>) {
    let files = get_json_files(subdir);
    assert!(!files.is_empty(), "no fixtures found in test/{}", subdir);

    println!("\nRunning {} test/{} fixtures:", files.len(), subdir);

    let mut passed = 0;
    let mut errors: Vec<String> = Vec::new();

    for file in &files {
        match run(file) {
            Ok(()) => passed += 1,
            Err(e) => errors.push(e),
        }
    }

    println!("\nResults: {} passed, {} failed", passed, errors.len());

    if !errors.is_empty() {
        println!("\nErrors:");
        for error in &errors {
            println!("  - {}", error);
        }
    }

    assert!(errors.is_empty(), "{} {} fixtures failed", errors.len(), subdir);
}

#[test]
fn test_all_pass_fixtures() {
    run_all("pass", run_pass_test);
}

#[test]
fn test_all_fail_fixtures() {
    run_all("fail", run_fail_test);
}

#[test]
fn test_every_fail_fixture_has_an_error_file() {
    for file in get_json_files("fail") {
        assert!(
            file.with_extension("error").exists(),
            "{} has no .error file",
            file_name(&file)
        );
    }
}
