use std::sync::Arc;

use crate::acquisition::{
    Acquirer, AcquisitionRequest, ArchiveAvailabilityIndex, ArchiveService,
};
use crate::config::Config;
use crate::constants::REPO_PATH_KEY;
use crate::engine::QuizSession;
use crate::errors::{AppError, AppResult};
use crate::models::{Difficulty, ProfYear, RegistrationInput, UserProfile};
use crate::storage::KeyValueStore;

/// Lifecycle of one candidate's visit: identity capture, mode selection,
/// content acquisition, quiz traversal, review.
#[derive(Clone, Debug)]
pub enum SessionState {
    Registration,
    ModeSelect,
    Loading,
    ArchiveBrowsing {
        year: ProfYear,
        available: ArchiveAvailabilityIndex,
        sync_error: Option<String>,
    },
    Active(QuizSession),
    Review(QuizSession),
    Error {
        message: String,
    },
}

pub struct Session {
    acquirer: Acquirer,
    archive: Arc<dyn ArchiveService>,
    store: Arc<dyn KeyValueStore>,
    profile: Option<UserProfile>,
    repo_path: String,
    state: SessionState,
}

impl Session {
    /// The persisted repository-path default is read exactly once, here.
    pub fn new(config: &Config, acquirer: Acquirer, store: Arc<dyn KeyValueStore>) -> Self {
        let repo_path = store
            .get(REPO_PATH_KEY)
            .ok()
            .flatten()
            .unwrap_or_else(|| config.default_repo_path.clone());

        let archive = acquirer.archive();
        Self {
            acquirer,
            archive,
            store,
            profile: None,
            repo_path,
            state: SessionState::Registration,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn repo_path(&self) -> &str {
        &self.repo_path
    }

    /// Registration → ModeSelect. The only point a profile is created.
    pub fn register(&mut self, input: RegistrationInput) -> AppResult<()> {
        if !matches!(self.state, SessionState::Registration) {
            return Err(invalid_transition("register"));
        }
        self.profile = Some(UserProfile::register(input)?);
        self.state = SessionState::ModeSelect;
        Ok(())
    }

    /// ModeSelect → Loading → Active, or → Error on any acquisition failure.
    pub async fn start_generated(&mut self, difficulty: Difficulty, topic: &str) -> AppResult<()> {
        let profile = self.require_profile()?;
        if !matches!(self.state, SessionState::ModeSelect) {
            return Err(invalid_transition("start_generated"));
        }

        let request = AcquisitionRequest::Generated {
            category: profile.category,
            year: profile.year,
            difficulty,
            topic: topic.to_string(),
        };
        self.load(request).await
    }

    pub async fn start_from_file(&mut self, data: String, mime_type: String) -> AppResult<()> {
        self.require_profile()?;
        if !matches!(self.state, SessionState::ModeSelect) {
            return Err(invalid_transition("start_from_file"));
        }

        self.load(AcquisitionRequest::FromFile { data, mime_type })
            .await
    }

    /// ModeSelect → ArchiveBrowsing, seeded with the profile's stage and an
    /// immediate availability probe.
    pub async fn open_archive(&mut self) -> AppResult<()> {
        let year = self.require_profile()?.year;
        if !matches!(self.state, SessionState::ModeSelect) {
            return Err(invalid_transition("open_archive"));
        }
        self.sync_archive(year).await
    }

    /// Switching the stage tab replaces the whole index for that stage.
    pub async fn select_year(&mut self, year: ProfYear) -> AppResult<()> {
        let category = self.require_profile()?.category;
        if !matches!(self.state, SessionState::ArchiveBrowsing { .. }) {
            return Err(invalid_transition("select_year"));
        }
        if !category.relevant_years().contains(&year) {
            return Err(AppError::ValidationError(format!(
                "{} is not offered for {}",
                year, category
            )));
        }
        self.sync_archive(year).await
    }

    pub fn set_repo_path(&mut self, repo_path: &str) {
        self.repo_path = repo_path.trim().to_string();
    }

    /// Re-probe the currently browsed stage.
    pub async fn sync(&mut self) -> AppResult<()> {
        let SessionState::ArchiveBrowsing { year, .. } = self.state else {
            return Err(invalid_transition("sync"));
        };
        self.sync_archive(year).await
    }

    async fn sync_archive(&mut self, year: ProfYear) -> AppResult<()> {
        // Every sync persists the repo path as the future default.
        self.store.set(REPO_PATH_KEY, &self.repo_path)?;

        let report = self.archive.probe_stage(&self.repo_path, year).await;
        self.state = SessionState::ArchiveBrowsing {
            year,
            available: report.available,
            sync_error: report.error.map(|e| e.to_string()),
        };
        Ok(())
    }

    /// ArchiveBrowsing → Loading → Active. The availability index gates
    /// which papers may start a session.
    pub async fn start_paper(&mut self, paper: &str) -> AppResult<()> {
        let SessionState::ArchiveBrowsing {
            year,
            ref available,
            ..
        } = self.state
        else {
            return Err(invalid_transition("start_paper"));
        };
        if !available.is_available(year, paper) {
            return Err(AppError::ValidationError(format!(
                "{} is not available for {}",
                paper, year
            )));
        }

        let request = AcquisitionRequest::Archive {
            repo: self.repo_path.clone(),
            year,
            paper: paper.to_string(),
        };
        self.load(request).await
    }

    async fn load(&mut self, request: AcquisitionRequest) -> AppResult<()> {
        self.state = SessionState::Loading;

        match self.acquirer.acquire(request).await {
            Ok(questions) => {
                let quiz = QuizSession::new(questions)?;
                log::info!("Starting quiz session {} ({} questions)", quiz.id, quiz.questions().len());
                self.state = SessionState::Active(quiz);
                Ok(())
            }
            Err(err) => {
                log::warn!("Acquisition failed: {}", err);
                self.state = SessionState::Error {
                    message: err.to_string(),
                };
                Err(err)
            }
        }
    }

    /// ArchiveBrowsing → ModeSelect, profile kept.
    pub fn close_archive(&mut self) -> AppResult<()> {
        if !matches!(self.state, SessionState::ArchiveBrowsing { .. }) {
            return Err(invalid_transition("close_archive"));
        }
        self.state = SessionState::ModeSelect;
        Ok(())
    }

    /// Records the answer for the current question; exhaustion moves the
    /// session to Review.
    pub fn answer(&mut self, selection: Option<usize>) -> AppResult<()> {
        let SessionState::Active(ref mut quiz) = self.state else {
            return Err(invalid_transition("answer"));
        };
        quiz.record_answer(selection)?;

        if quiz.is_finished() {
            if let SessionState::Active(quiz) =
                std::mem::replace(&mut self.state, SessionState::ModeSelect)
            {
                self.state = SessionState::Review(quiz);
            }
        }
        Ok(())
    }

    /// Review → ModeSelect, profile kept.
    pub fn new_quiz(&mut self) -> AppResult<()> {
        if !matches!(self.state, SessionState::Review(_)) {
            return Err(invalid_transition("new_quiz"));
        }
        self.state = SessionState::ModeSelect;
        Ok(())
    }

    /// Any state → Registration; the profile and any quiz are discarded.
    pub fn go_home(&mut self) {
        self.profile = None;
        self.state = SessionState::Registration;
    }

    /// Error → ModeSelect recovery.
    pub fn dismiss_error(&mut self) -> AppResult<()> {
        if !matches!(self.state, SessionState::Error { .. }) {
            return Err(invalid_transition("dismiss_error"));
        }
        self.state = SessionState::ModeSelect;
        Ok(())
    }

    fn require_profile(&self) -> AppResult<&UserProfile> {
        self.profile
            .as_ref()
            .ok_or_else(|| AppError::ValidationError("no registered profile".to_string()))
    }
}

fn invalid_transition(operation: &str) -> AppError {
    AppError::ValidationError(format!("{} is not valid in the current state", operation))
}
