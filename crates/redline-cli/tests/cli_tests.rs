//! Integration tests for all CLI commands
//!
//! Tests each command with real invocations over synthesized fixtures.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a CLI command
fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_redline"))
}

const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body>
<w:p>
<w:r><w:t xml:space="preserve">one two three four </w:t></w:r>
<w:del w:author="reviewer"><w:r><w:delText>fiev</w:delText></w:r></w:del>
<w:ins w:author="reviewer"><w:r><w:t>five</w:t></w:r></w:ins>
<w:r><w:t xml:space="preserve"> six seven eight nine</w:t></w:r>
</w:p>
<w:p><w:r><w:t>untouched paragraph</w:t></w:r></w:p>
</w:body>
</w:document>"#;

// ============ EXTRACT COMMAND TESTS ============

#[test]
fn test_extract_help() {
    cli()
        .arg("extract")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("paragraph JSON intermediate"));
}

#[test]
fn test_extract_writes_intermediate() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("document.xml");
    let output = dir.path().join("revisions.json");
    fs::write(&input, DOCUMENT_XML).unwrap();

    cli()
        .arg("extract")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 paragraphs"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let paragraphs = json.as_array().unwrap();
    assert_eq!(paragraphs.len(), 2);
    assert_eq!(paragraphs[0]["entries"][1]["type"], "deletion");
    assert_eq!(paragraphs[0]["entries"][1]["content"], "fiev");
    assert_eq!(paragraphs[0]["entries"][1]["author"], "reviewer");
}

#[test]
fn test_extract_missing_input_fails() {
    let dir = TempDir::new().unwrap();

    cli()
        .arg("extract")
        .arg(dir.path().join("missing.docx"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"));
}

#[test]
fn test_extract_malformed_document_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("document.xml");
    fs::write(&input, "<w:document><w:nothing/></w:document>").unwrap();

    cli()
        .arg("extract")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("w:body"));
}

// ============ DATASET COMMAND TESTS ============

#[test]
fn test_dataset_builds_jsonl() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("document.xml");
    let revisions = dir.path().join("revisions.json");
    let dataset = dir.path().join("dataset.jsonl");
    fs::write(&input, DOCUMENT_XML).unwrap();

    cli()
        .arg("extract")
        .arg(&input)
        .arg("-o")
        .arg(&revisions)
        .assert()
        .success();

    cli()
        .arg("dataset")
        .arg(&revisions)
        .arg("-o")
        .arg(&dataset)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 records"));

    let content = fs::read_to_string(&dataset).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1);

    let record: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(record["original"], "one two three fourfievsix seven eight nine");
    assert_eq!(record["correction"], "one two three fourfivesix seven eight nine");
    assert!(record.get("error_type").is_none());
}

#[test]
fn test_dataset_context_words_flag() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("document.xml");
    let revisions = dir.path().join("revisions.json");
    let dataset = dir.path().join("dataset.jsonl");
    fs::write(&input, DOCUMENT_XML).unwrap();

    cli()
        .arg("extract")
        .arg(&input)
        .arg("-o")
        .arg(&revisions)
        .assert()
        .success();

    cli()
        .arg("dataset")
        .arg(&revisions)
        .arg("-o")
        .arg(&dataset)
        .arg("--context-words")
        .arg("1")
        .assert()
        .success();

    let content = fs::read_to_string(&dataset).unwrap();
    let record: serde_json::Value = serde_json::from_str(content.lines().next().unwrap()).unwrap();
    assert_eq!(record["original"], "fourfievsix");
    assert_eq!(record["correction"], "fourfivesix");
}

#[test]
fn test_dataset_rejects_invalid_intermediate() {
    let dir = TempDir::new().unwrap();
    let revisions = dir.path().join("revisions.json");
    let dataset = dir.path().join("dataset.jsonl");
    fs::write(&revisions, "{ not valid json").unwrap();

    cli()
        .arg("dataset")
        .arg(&revisions)
        .arg("-o")
        .arg(&dataset)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to decode"));

    // Fatal decode: no partial output left behind.
    assert!(!dataset.exists());
}

// ============ RUN COMMAND TESTS ============

#[test]
fn test_run_writes_both_outputs() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("document.xml");
    let out_dir = dir.path().join("outputs");
    fs::write(&input, DOCUMENT_XML).unwrap();

    cli()
        .arg("run")
        .arg(&input)
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .success();

    assert!(out_dir.join("revisions_grouped.json").exists());
    assert!(out_dir.join("dataset.jsonl").exists());
}

// ============ SHOW COMMAND TESTS ============

#[test]
fn test_show_prints_corrected_reading() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("document.xml");
    let revisions = dir.path().join("revisions.json");
    fs::write(&input, DOCUMENT_XML).unwrap();

    cli()
        .arg("extract")
        .arg(&input)
        .arg("-o")
        .arg(&revisions)
        .assert()
        .success();

    cli()
        .arg("show")
        .arg(&revisions)
        .assert()
        .success()
        .stdout(
            predicate::str::contains(
                "Paragraph 1: one two three four five six seven eight nine",
            )
            .and(predicate::str::contains("Paragraph 2: untouched paragraph")),
        );
}
