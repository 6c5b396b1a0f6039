use std::fs;
use std::path::{Path, PathBuf};

use firebot_variables::catalog::Catalog;
use firebot_variables::checking;
use firebot_variables::language::DocumentKind;

fn sample_files(dir: &Path) -> Vec<PathBuf> {
    assert!(dir.exists(), "samples directory {:?} missing", dir);

    let entries = fs::read_dir(dir).expect("Failed to read samples directory");

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.expect("Failed to read directory entry");
        let path = entry.path();

        if DocumentKind::from_path(&path).is_some() {
            files.push(path);
        }
    }

    assert!(!files.is_empty(), "No sample files found in {:?}", dir);
    files.sort();
    files
}

#[test]
fn ensure_pass() {
    let catalog = Catalog::embedded();
    let mut failures = Vec::new();

    for file in sample_files(Path::new("tests/samples/good/")) {
        let content = checking::load(&file)
            .unwrap_or_else(|e| panic!("Failed to load file {:?}: {}", file, e));
        let kind = DocumentKind::from_path(&file).unwrap();

        let findings = checking::check(&content, kind, &catalog);
        if !findings.is_empty() {
            println!("File {:?} had findings: {:?}", file, findings);
            failures.push(file);
        }
    }

    if !failures.is_empty() {
        panic!(
            "Good samples should be free of findings, but {} files were not",
            failures.len()
        );
    }
}

#[test]
fn ensure_fail() {
    let catalog = Catalog::embedded();
    let mut unexpected_successes = Vec::new();

    for file in sample_files(Path::new("tests/samples/broken/")) {
        let content = checking::load(&file)
            .unwrap_or_else(|e| panic!("Failed to load file {:?}: {}", file, e));
        let kind = DocumentKind::from_path(&file).unwrap();

        if checking::check(&content, kind, &catalog).is_empty() {
            println!("File {:?} unexpectedly passed", file);
            unexpected_successes.push(file);
        }
    }

    if !unexpected_successes.is_empty() {
        panic!(
            "Broken samples should produce findings, but {} files passed",
            unexpected_successes.len()
        );
    }
}
