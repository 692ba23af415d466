use jobmatch_core::normalize::normalize;
use jobmatch_core::{
    analyze, rank, IndexState, JobPosting, MatchError, VocabularyIndex, DEFAULT_TOP_K,
};

fn posting(id: u32, title: &str, description: &str, skills_desc: &str, skill_name: &str) -> JobPosting {
    JobPosting {
        id,
        title: title.into(),
        description: description.into(),
        skills_desc: skills_desc.into(),
        skill_name: skill_name.into(),
        industry_name: String::new(),
        company_name: String::new(),
        location: String::new(),
        job_posting_url: String::new(),
    }
}

fn sample_corpus() -> Vec<JobPosting> {
    vec![
        posting(
            0,
            "Data Engineer",
            "Build data pipelines and warehouses",
            "Python SQL Spark",
            "Python",
        ),
        posting(
            1,
            "Web Developer",
            "Frontend development in modern frameworks",
            "JavaScript React CSS",
            "JavaScript",
        ),
        posting(
            2,
            "Accountant",
            "Prepare financial statements and reports",
            "Excel bookkeeping",
            "Excel",
        ),
    ]
}

const RESUME: &str = "Python developer with SQL and AWS experience";

#[test]
fn normalize_handles_empty_and_messy_input() {
    assert_eq!(normalize(""), "");
    assert_eq!(normalize("  \t\n "), "");
    assert_eq!(normalize("Data-Driven; C++ & SQL!"), "data driven c sql");
}

#[test]
fn normalize_is_idempotent() {
    for text in ["", "Hello, World!", "résumé / senior dev", "a  b   c"] {
        let once = normalize(text);
        assert_eq!(normalize(&once), once);
    }
}

#[test]
fn projection_is_a_pure_read() {
    let index = VocabularyIndex::build(sample_corpus()).unwrap();
    let vocab_before = index.vocabulary_len();
    let vectors_before = index.doc_vectors().to_vec();

    index.project(RESUME);
    index.project("entirely novel words zzzz qqqq");

    assert_eq!(index.vocabulary_len(), vocab_before);
    assert_eq!(index.doc_vectors(), &vectors_before[..]);
}

#[test]
fn scores_are_bounded_and_sorted() {
    let index = VocabularyIndex::build(sample_corpus()).unwrap();
    let resume = index.project(RESUME);
    let results = rank(&resume, &index, DEFAULT_TOP_K);

    assert_eq!(results.len(), 3.min(DEFAULT_TOP_K));
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    for r in &results {
        assert!((0.0..=1.0).contains(&r.score), "score {} out of bounds", r.score);
    }
}

#[test]
fn top_k_truncates() {
    let index = VocabularyIndex::build(sample_corpus()).unwrap();
    let resume = index.project(RESUME);
    assert_eq!(rank(&resume, &index, 2).len(), 2);
    assert_eq!(rank(&resume, &index, 100).len(), 3);
}

#[test]
fn stopword_only_resume_projects_to_zero() {
    let index = VocabularyIndex::build(sample_corpus()).unwrap();
    let resume = index.project("the and of to with");
    assert!(resume.is_zero());
    for r in rank(&resume, &index, DEFAULT_TOP_K) {
        assert_eq!(r.score, 0.0);
    }
}

#[test]
fn equal_scores_keep_corpus_order() {
    let corpus = vec![
        posting(0, "Rust Engineer", "", "Rust tokio", "Rust"),
        posting(1, "Rust Engineer", "", "Rust tokio", "Rust"),
        posting(2, "Florist", "", "flower arranging", "floristry"),
    ];
    let index = VocabularyIndex::build(corpus).unwrap();
    let resume = index.project("Rust and tokio experience");
    let results = rank(&resume, &index, DEFAULT_TOP_K);

    assert_eq!(results[0].score, results[1].score);
    assert_eq!(results[0].posting.id, 0);
    assert_eq!(results[1].posting.id, 1);
}

// Resume mentioning Python/SQL against a data engineering posting.
#[test]
fn relevant_posting_ranks_first_with_keyword_gaps() {
    let index = VocabularyIndex::build(sample_corpus()).unwrap();
    let resume_text = normalize(RESUME);
    let resume = index.project(&resume_text);
    let results = rank(&resume, &index, DEFAULT_TOP_K);

    assert_eq!(results[0].posting.title, "Data Engineer");
    assert!(results[0].score > 0.0);

    let report = analyze(&resume_text, results.iter().map(|r| r.posting));
    assert!(report.matched.contains(&"python".to_string()));
    assert!(report.matched.contains(&"sql".to_string()));
    assert!(report.suggested.contains(&"spark".to_string()));
    assert!(!report.suggested.contains(&"python".to_string()));
    assert!(!report.suggested.contains(&"sql".to_string()));
}

#[test]
fn empty_resume_yields_zero_scores_and_full_suggestions() {
    let index = VocabularyIndex::build(sample_corpus()).unwrap();
    let resume_text = normalize("");
    let resume = index.project(&resume_text);
    let results = rank(&resume, &index, DEFAULT_TOP_K);

    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.score == 0.0));

    let report = analyze(&resume_text, results.iter().map(|r| r.posting));
    assert!(report.matched.is_empty());
    assert!(!report.suggested.is_empty());
    assert!(report.suggested.len() <= 10);
    // with no resume words, every job word is a suggestion candidate
    assert!(report.suggested.contains(&"accountant".to_string()));
}

#[test]
fn keyword_sets_are_sorted_disjoint_and_capped() {
    let index = VocabularyIndex::build(sample_corpus()).unwrap();
    let resume_text = normalize("Python SQL javascript react bookkeeping");
    let resume = index.project(&resume_text);
    let results = rank(&resume, &index, DEFAULT_TOP_K);
    let report = analyze(&resume_text, results.iter().map(|r| r.posting));

    for pair in report.matched.windows(2) {
        assert!(pair[0] < pair[1]);
    }
    for pair in report.suggested.windows(2) {
        assert!(pair[0] < pair[1]);
    }
    assert!(report.suggested.len() <= 10);
    for word in &report.suggested {
        assert!(!resume_text.split_whitespace().any(|w| w == word));
    }
}

// A term the vocabulary never indexed can still surface as a matched
// keyword: the keyword sets are built from raw tokens.
#[test]
fn out_of_vocabulary_term_still_matches_keywords() {
    let corpus = vec![posting(0, "C Developer", "Systems programming roles", "C", "C")];
    let index = VocabularyIndex::build(corpus).unwrap();
    assert!(!index.contains_term("c"));

    let resume_text = normalize("C programmer");
    let resume = index.project(&resume_text);
    let results = rank(&resume, &index, DEFAULT_TOP_K);
    let report = analyze(&resume_text, results.iter().map(|r| r.posting));

    assert!(report.matched.contains(&"c".to_string()));
}

#[test]
fn empty_corpus_reports_unavailable() {
    let state = IndexState::from_corpus(Vec::new());
    assert!(!state.is_ready());
    match state.get() {
        Err(MatchError::CorpusUnavailable(_)) => {}
        Err(other) => panic!("unexpected error {other:?}"),
        Ok(_) => panic!("expected CorpusUnavailable"),
    }
}

#[test]
fn stopword_only_corpus_reports_unavailable() {
    let corpus = vec![posting(0, "the and", "of to", "with", "")];
    let state = IndexState::from_corpus(corpus);
    assert!(!state.is_ready());
}
