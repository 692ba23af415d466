use crate::index::{IndexState, JobPosting};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// One row of the postings CSV. Any field may be absent or empty; absent
/// fields reach the core as empty strings.
#[derive(Debug, Deserialize)]
struct PostingRecord {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    skills_desc: Option<String>,
    #[serde(default)]
    skill_name: Option<String>,
    #[serde(default)]
    industry_name: Option<String>,
    #[serde(default)]
    company_name: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    job_posting_url: Option<String>,
}

impl PostingRecord {
    fn into_posting(self, id: u32) -> JobPosting {
        JobPosting {
            id,
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            skills_desc: self.skills_desc.unwrap_or_default(),
            skill_name: self.skill_name.unwrap_or_default(),
            industry_name: self.industry_name.unwrap_or_default(),
            company_name: self.company_name.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            job_posting_url: self.job_posting_url.unwrap_or_default(),
        }
    }
}

/// Load the ordered posting sequence from a CSV file. Row position becomes
/// the posting id.
pub fn load_postings(path: &Path) -> Result<Vec<JobPosting>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("open corpus csv {}", path.display()))?;
    let mut postings = Vec::new();
    for (row, record) in reader.deserialize::<PostingRecord>().enumerate() {
        let record = record.with_context(|| format!("corpus csv row {row}"))?;
        postings.push(record.into_posting(row as u32));
    }
    tracing::info!(postings = postings.len(), path = %path.display(), "loaded job corpus");
    Ok(postings)
}

/// Startup entry point: load the corpus and fit the index. Any failure
/// leaves the service in the queryable `Unavailable` state instead of
/// aborting.
pub fn index_from_csv(path: &Path) -> IndexState {
    match load_postings(path) {
        Ok(postings) => IndexState::from_corpus(postings),
        Err(e) => {
            tracing::error!(error = %e, "failed to load job corpus");
            IndexState::Unavailable { reason: e.to_string() }
        }
    }
}
