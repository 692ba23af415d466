use jobmatch_core::corpus::{index_from_csv, load_postings};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const CSV: &str = "\
title,description,skills_desc,skill_name,industry_name,company_name,location,job_posting_url
Data Engineer,Build pipelines,Python SQL Spark,Python,Tech,Acme,Remote,https://jobs.example/1
Web Developer,Ship frontends,JavaScript React,JavaScript,Tech,Initech,Austin,https://jobs.example/2
,,,,,,,
";

fn write_corpus(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("postings.csv");
    fs::write(&path, CSV).unwrap();
    path
}

#[test]
fn rows_load_in_order_with_empty_fields_normalized() {
    let dir = tempdir().unwrap();
    let postings = load_postings(&write_corpus(dir.path())).unwrap();

    assert_eq!(postings.len(), 3);
    assert_eq!(postings[0].id, 0);
    assert_eq!(postings[0].title, "Data Engineer");
    assert_eq!(postings[1].id, 1);
    assert_eq!(postings[1].company_name, "Initech");
    // fully empty row still ingests as a posting of empty strings
    assert_eq!(postings[2].title, "");
    assert_eq!(postings[2].job_posting_url, "");
}

#[test]
fn csv_startup_builds_a_ready_index() {
    let dir = tempdir().unwrap();
    let state = index_from_csv(&write_corpus(dir.path()));
    assert!(state.is_ready());

    let index = state.get().unwrap();
    assert_eq!(index.postings().len(), 3);
    assert!(index.contains_term("python"));
}

#[test]
fn missing_csv_degrades_to_unavailable() {
    let state = index_from_csv(Path::new("/nonexistent/postings.csv"));
    assert!(!state.is_ready());
    assert!(state.get().is_err());
}
