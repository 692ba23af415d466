//! Resume-to-job matching pipeline: text normalization, a frozen TF-IDF
//! vocabulary over the job corpus, cosine ranking, and keyword gap analysis.

pub mod corpus;
pub mod error;
pub mod index;
pub mod keywords;
pub mod normalize;
pub mod rank;

pub use error::MatchError;
pub use index::{IndexState, JobPosting, SparseVector, VocabularyIndex, MAX_VOCABULARY};
pub use keywords::{analyze, KeywordReport, MAX_SUGGESTIONS};
pub use rank::{rank, MatchResult, DEFAULT_TOP_K};
