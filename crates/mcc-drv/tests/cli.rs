//! End-to-end tests driving the `mccc` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn source_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn test_compiles_minimal_program_and_prints_assembly_by_default() {
    let file = source_file("int main() { return 0; }");
    Command::cargo_bin("mccc")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(".data"))
        .stdout(predicate::str::contains("main:"));
}

#[test]
fn test_emit_tokens_prints_one_line_per_token() {
    let file = source_file("int main() { return 0; }");
    Command::cargo_bin("mccc")
        .unwrap()
        .args(["--emit", "tokens"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Keyword"));
}

#[test]
fn test_emit_ir_prints_label_and_enter() {
    let file = source_file("int main() { return 0; }");
    Command::cargo_bin("mccc")
        .unwrap()
        .args(["--emit", "ir"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("LABEL main"))
        .stdout(predicate::str::contains("ENTER"));
}

#[test]
fn test_semantic_error_exits_nonzero_and_reports_on_stderr() {
    let file = source_file("int main() { return x; }");
    Command::cargo_bin("mccc")
        .unwrap()
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Undefined symbol 'x'"));
}

#[test]
fn test_missing_file_is_reported_as_an_io_error_not_a_panic() {
    Command::cargo_bin("mccc")
        .unwrap()
        .arg("/nonexistent/path/does/not/exist.mc")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_unknown_emit_value_is_a_usage_error() {
    let file = source_file("int main() { return 0; }");
    Command::cargo_bin("mccc")
        .unwrap()
        .args(["--emit", "bogus"])
        .arg(file.path())
        .assert()
        .failure();
}
