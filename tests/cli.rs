use assert_cmd::Command;
use predicates::prelude::*;

/// With both categories disabled the run needs no network at all: the
/// generated file is just the header, written to --output and mirrored on
/// stdout.
#[test]
fn generate_with_everything_disabled_writes_the_header_only_file() {
    let out_dir = tempfile::tempdir().expect("Creating temp dir failed");
    let out_path = out_dir.path().join("translation-strings.php");

    let mut cmd = Command::cargo_bin("wp-translation-strings").expect("Binary exists");
    cmd.arg("generate")
        .arg("--no-taxonomies")
        .arg("--no-post-types")
        .arg("--output")
        .arg(&out_path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Generated file for translation strings"))
        .stderr(predicate::str::contains("Done."));

    let written = std::fs::read_to_string(&out_path).expect("Output file exists");
    assert!(written.starts_with("<?php\n"));
    assert!(written.ends_with("*/\n\n"));
    assert!(!written.contains("_x("));
}

#[test]
fn generate_rejects_an_invalid_base_url() {
    let mut cmd = Command::cargo_bin("wp-translation-strings").expect("Binary exists");
    cmd.arg("generate")
        .arg("--no-taxonomies")
        .arg("--no-post-types")
        .arg("--url")
        .arg("not a url");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid base URL"));
}
