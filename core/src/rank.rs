use crate::index::{JobPosting, SparseVector, VocabularyIndex};
use std::cmp::Ordering;

/// Number of postings returned when the caller does not override it.
pub const DEFAULT_TOP_K: usize = 5;

/// One ranked posting. Request-local: scores live here and are discarded
/// with the response, never written back onto the shared index.
#[derive(Debug, Clone, Copy)]
pub struct MatchResult<'a> {
    pub posting: &'a JobPosting,
    pub score: f32,
}

/// Rank every posting by cosine similarity to the resume vector, descending.
/// The sort is stable, so equal scores keep corpus order. Returns at most
/// `k` results, zero scores included.
pub fn rank<'a>(
    resume: &SparseVector,
    index: &'a VocabularyIndex,
    k: usize,
) -> Vec<MatchResult<'a>> {
    let mut results: Vec<MatchResult<'a>> = index
        .postings()
        .iter()
        .zip(index.doc_vectors())
        .map(|(posting, vector)| MatchResult {
            posting,
            score: resume.dot(vector).clamp(0.0, 1.0),
        })
        .collect();
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    results.truncate(k);
    results
}
