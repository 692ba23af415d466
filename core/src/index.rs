use crate::error::MatchError;
use crate::normalize::{index_terms, is_stopword, normalize};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Vocabulary cap; terms ranked below this never receive a column.
pub const MAX_VOCABULARY: usize = 10_000;

/// One job posting from the corpus. Immutable after ingestion; missing
/// source fields arrive as empty strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub skills_desc: String,
    pub skill_name: String,
    pub industry_name: String,
    pub company_name: String,
    pub location: String,
    pub job_posting_url: String,
}

impl JobPosting {
    /// Text the vocabulary and weight vectors are fit on.
    pub fn corpus_text(&self) -> String {
        [
            self.title.as_str(),
            self.description.as_str(),
            self.skills_desc.as_str(),
            self.skill_name.as_str(),
            self.industry_name.as_str(),
        ]
        .join(" ")
    }

    /// Title and skill fields only; tokenized raw by the keyword analyzer.
    pub fn keyword_text(&self) -> String {
        [
            self.title.as_str(),
            self.skills_desc.as_str(),
            self.skill_name.as_str(),
        ]
        .join(" ")
    }
}

/// L2-normalized tf-idf weights over vocabulary columns, sorted by column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f32)>,
}

impl SparseVector {
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge-join dot product. Equals cosine similarity for normalized
    /// vectors, and 0 when either side is the zero vector.
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let mut sum = 0.0;
        let (mut i, mut j) = (0, 0);
        while i < self.entries.len() && j < other.entries.len() {
            let (ca, wa) = self.entries[i];
            let (cb, wb) = other.entries[j];
            if ca == cb {
                sum += wa * wb;
                i += 1;
                j += 1;
            } else if ca < cb {
                i += 1;
            } else {
                j += 1;
            }
        }
        sum
    }
}

/// Frozen term-weighting space over the job corpus: vocabulary columns,
/// per-term inverse document weights, and one normalized weight vector per
/// posting. Never re-fit within a process lifetime.
pub struct VocabularyIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    doc_vectors: Vec<SparseVector>,
    postings: Vec<JobPosting>,
}

impl VocabularyIndex {
    /// Fit the weighting space over the full corpus. Vocabulary is the top
    /// `MAX_VOCABULARY` non-stopword terms by document frequency (ties
    /// alphabetical), with columns assigned in alphabetical order.
    pub fn build(postings: Vec<JobPosting>) -> Result<Self> {
        if postings.is_empty() {
            bail!("job corpus is empty");
        }

        let corpus_texts: Vec<String> = postings
            .iter()
            .map(|p| normalize(&p.corpus_text()))
            .collect();

        let mut df: HashMap<String, u32> = HashMap::new();
        for text in &corpus_texts {
            let unique: HashSet<&str> = index_terms(text).filter(|t| !is_stopword(t)).collect();
            for term in unique {
                *df.entry(term.to_string()).or_insert(0) += 1;
            }
        }
        if df.is_empty() {
            bail!("vocabulary is empty after stopword removal");
        }

        let mut ranked: Vec<(String, u32)> = df.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(MAX_VOCABULARY);
        ranked.sort_by(|a, b| a.0.cmp(&b.0));

        let n = postings.len() as f32;
        let mut vocabulary = HashMap::with_capacity(ranked.len());
        let mut idf = Vec::with_capacity(ranked.len());
        for (col, (term, df_t)) in ranked.into_iter().enumerate() {
            vocabulary.insert(term, col);
            // smoothed idf; strictly positive, so stored weights never vanish
            idf.push(((1.0 + n) / (1.0 + df_t as f32)).ln() + 1.0);
        }

        let doc_vectors: Vec<SparseVector> = corpus_texts
            .iter()
            .map(|text| vectorize(&vocabulary, &idf, text))
            .collect();

        tracing::info!(
            postings = postings.len(),
            vocabulary = vocabulary.len(),
            "vocabulary index built"
        );

        Ok(Self { vocabulary, idf, doc_vectors, postings })
    }

    /// Project arbitrary text into the frozen space. Terms outside the
    /// vocabulary contribute nothing; the vocabulary itself never changes.
    pub fn project(&self, text: &str) -> SparseVector {
        vectorize(&self.vocabulary, &self.idf, &normalize(text))
    }

    pub fn postings(&self) -> &[JobPosting] {
        &self.postings
    }

    pub fn posting(&self, id: u32) -> Option<&JobPosting> {
        self.postings.iter().find(|p| p.id == id)
    }

    pub fn doc_vectors(&self) -> &[SparseVector] {
        &self.doc_vectors
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }
}

fn vectorize(vocabulary: &HashMap<String, usize>, idf: &[f32], normalized: &str) -> SparseVector {
    let mut tf: HashMap<usize, f32> = HashMap::new();
    for term in index_terms(normalized) {
        if let Some(&col) = vocabulary.get(term) {
            *tf.entry(col).or_insert(0.0) += 1.0;
        }
    }
    let mut entries: Vec<(usize, f32)> = tf
        .into_iter()
        .map(|(col, count)| (col, count * idf[col]))
        .collect();
    entries.sort_unstable_by_key(|&(col, _)| col);
    let norm = entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
    if norm > 0.0 {
        for (_, w) in entries.iter_mut() {
            *w /= norm;
        }
    }
    SparseVector { entries }
}

/// Lifecycle state of the corpus index. Built once before any request is
/// served; a corpus that fails to load or fit leaves an explicit
/// `Unavailable` state behind instead of partial data.
pub enum IndexState {
    Ready(VocabularyIndex),
    Unavailable { reason: String },
}

impl IndexState {
    /// Build from an already-loaded corpus, degrading to `Unavailable` on
    /// failure rather than raising past this boundary.
    pub fn from_corpus(postings: Vec<JobPosting>) -> Self {
        match VocabularyIndex::build(postings) {
            Ok(index) => IndexState::Ready(index),
            Err(e) => {
                tracing::error!(error = %e, "failed to build vocabulary index");
                IndexState::Unavailable { reason: e.to_string() }
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, IndexState::Ready(_))
    }

    /// Fail-fast accessor used by every per-request operation.
    pub fn get(&self) -> Result<&VocabularyIndex, MatchError> {
        match self {
            IndexState::Ready(index) => Ok(index),
            IndexState::Unavailable { reason } => {
                Err(MatchError::CorpusUnavailable(reason.clone()))
            }
        }
    }
}
