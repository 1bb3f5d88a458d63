use std::collections::HashSet;

use async_trait::async_trait;

use crate::config::Config;
use crate::constants::papers::papers_for;
use crate::errors::{AppError, AppResult};
use crate::models::{ProfYear, Question};

/// Which (stage, paper) combinations responded to a presence probe. Rebuilt
/// wholesale on every sync; never merged incrementally.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArchiveAvailabilityIndex {
    keys: HashSet<(ProfYear, String)>,
}

impl ArchiveAvailabilityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, year: ProfYear, paper: &str) {
        self.keys.insert((year, paper.to_string()));
    }

    pub fn is_available(&self, year: ProfYear, paper: &str) -> bool {
        self.keys.contains(&(year, paper.to_string()))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Outcome of probing one stage. A transport failure during the fan-out is
/// reported here without discarding probes that already completed.
#[derive(Clone, Debug)]
pub struct ProbeReport {
    pub available: ArchiveAvailabilityIndex,
    pub error: Option<AppError>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArchiveService: Send + Sync {
    async fn fetch_paper(
        &self,
        repo: &str,
        year: ProfYear,
        paper: &str,
    ) -> AppResult<Vec<Question>>;

    async fn probe_stage(&self, repo: &str, year: ProfYear) -> ProbeReport;
}

/// Remote archive addressed by conventionally-named raw-file paths.
pub struct HttpArchiveClient {
    http: reqwest::Client,
    base_url: String,
    branch: String,
}

impl HttpArchiveClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.archive_base_url.clone(),
            branch: config.archive_branch.clone(),
        }
    }

    pub fn paper_url(&self, repo: &str, year: ProfYear, paper: &str) -> String {
        format!(
            "{}/{}/{}/{}-{}.json",
            self.base_url,
            repo,
            self.branch,
            year.slug(),
            slug(paper)
        )
    }
}

#[async_trait]
impl ArchiveService for HttpArchiveClient {
    async fn fetch_paper(
        &self,
        repo: &str,
        year: ProfYear,
        paper: &str,
    ) -> AppResult<Vec<Question>> {
        let url = self.paper_url(repo, year, paper);
        log::info!("Fetching archive paper from {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::RetrievalError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::RetrievalError(format!(
                "archive returned status {} for {}",
                status, url
            )));
        }

        response
            .json::<Vec<Question>>()
            .await
            .map_err(|e| AppError::RetrievalError(format!("invalid paper payload: {}", e)))
    }

    async fn probe_stage(&self, repo: &str, year: ProfYear) -> ProbeReport {
        let papers = papers_for(year);
        log::info!("Probing {} papers for {}", papers.len(), year);

        let checks = papers.iter().map(|paper| {
            let url = self.paper_url(repo, year, paper);
            let http = self.http.clone();
            async move {
                let outcome = http
                    .head(&url)
                    .send()
                    .await
                    .map(|response| response.status().is_success())
                    .map_err(|e| e.to_string());
                (*paper, outcome)
            }
        });

        let outcomes = futures::future::join_all(checks).await;
        collect_report(year, outcomes)
    }
}

fn slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Settle-all aggregation: successes populate the index, a non-2xx probe is
/// simply unavailable, and the first transport error becomes the stage's
/// single `SyncError`.
fn collect_report(year: ProfYear, outcomes: Vec<(&str, Result<bool, String>)>) -> ProbeReport {
    let mut available = ArchiveAvailabilityIndex::new();
    let mut error = None;

    for (paper, outcome) in outcomes {
        match outcome {
            Ok(true) => available.insert(year, paper),
            Ok(false) => {}
            Err(message) => {
                log::warn!("Probe for {} / {} failed: {}", year, paper, message);
                error.get_or_insert(AppError::SyncError(message));
            }
        }
    }

    ProbeReport { available, error }
}
