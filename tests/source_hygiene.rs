use std::fs;
use std::path::{Path, PathBuf};

/// a finding: file, 1-based line number, offending line
type Finding = (String, usize, String);

#[test]
fn no_todo_comments() {
    let findings = scan(|line, _| is_todo_in_comment(line));
    assert_clean("TODO comment", &findings);
}

#[test]
fn no_debug_macros() {
    let findings = scan(|line, _| line.contains("dbg!("));
    assert_clean("dbg! call", &findings);
}

#[test]
fn no_unwrap_outside_tests() {
    // everything from the first #[cfg(test)] on is test code
    let findings = scan(|line, in_tests| {
        !in_tests && !line.trim_start().starts_with("//") && line.contains(".unwrap()")
    });
    assert_clean(".unwrap() in non-test code", &findings);
}

fn assert_clean(what: &str, findings: &[Finding]) {
    if findings.is_empty() {
        return;
    }
    eprintln!("\nfound {} {}(s):", findings.len(), what);
    for (file, line_num, line) in findings {
        eprintln!("  {}:{}: {}", file, line_num, line.trim());
    }
    panic!("{what} must be removed before tests pass");
}

/// run `check` over every source line, skipping dedicated test files
fn scan(check: impl Fn(&str, bool) -> bool) -> Vec<Finding> {
    let mut files = Vec::new();
    collect_sources(Path::new("src"), &mut files);

    let mut findings = Vec::new();
    for path in files {
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        let test_file = path.file_name().and_then(|s| s.to_str()) == Some("tests.rs");
        let mut in_tests = test_file;
        for (line_num, line) in content.lines().enumerate() {
            if line.trim_start().starts_with("#[cfg(test)]") {
                in_tests = true;
            }
            if check(line, in_tests) {
                findings.push((path.display().to_string(), line_num + 1, line.to_string()));
            }
        }
    }
    findings
}

fn collect_sources(dir: &Path, files: &mut Vec<PathBuf>) {
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                collect_sources(&path, files);
            } else if path.extension().and_then(|s| s.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
}

fn is_todo_in_comment(line: &str) -> bool {
    let comment_start = line.find("//").or_else(|| line.find("/*"));
    if let Some(pos) = comment_start
        && line[pos..].to_uppercase().contains("TODO")
    {
        return true;
    }
    // block comment continuation lines (" * TODO")
    let trimmed = line.trim_start();
    trimmed.starts_with('*') && !trimmed.starts_with("*/") && trimmed.to_uppercase().contains("TODO")
}
