//! Hygiene — keeps production sources free of panic paths and debug
//! leftovers.
//!
//! Scans `src/` at test time. Unit-test siblings (`*_test.rs`) are exempt;
//! everything else must stay clean. Navigation in this crate is specified to
//! degrade to clamped no-ops, so a panic path in production code is always a
//! bug.

use std::fs;
use std::path::Path;

/// Patterns that must not appear in production sources.
const BANNED: &[(&str, &str)] = &[
    (".unwrap()", "panics on None/Err"),
    (".expect(", "panics with message"),
    ("panic!(", "explicit panic"),
    ("unreachable!(", "explicit panic"),
    ("todo!(", "unfinished stub"),
    ("unimplemented!(", "unfinished stub"),
    ("dbg!(", "debug leftover"),
];

fn collect_sources(dir: &Path, out: &mut Vec<(String, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_sources(&path, out);
            continue;
        }
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        if !name.ends_with(".rs") || name.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push((path.to_string_lossy().into_owned(), content));
        }
    }
}

#[test]
fn production_sources_are_free_of_banned_patterns() {
    let mut sources = Vec::new();
    collect_sources(Path::new("src"), &mut sources);
    assert!(!sources.is_empty(), "no sources found; run from the crate root");

    let mut violations = Vec::new();
    for (path, content) in &sources {
        for (line_no, line) in content.lines().enumerate() {
            for (pattern, why) in BANNED {
                if line.contains(pattern) {
                    violations.push(format!("{path}:{}: {pattern} ({why})", line_no + 1));
                }
            }
        }
    }

    assert!(
        violations.is_empty(),
        "banned patterns in production code:\n{}",
        violations.join("\n")
    );
}
