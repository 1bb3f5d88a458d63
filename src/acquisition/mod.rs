pub mod archive;
pub mod generation;

use std::sync::Arc;

pub use archive::{ArchiveAvailabilityIndex, ArchiveService, HttpArchiveClient, ProbeReport};
pub use generation::{GeminiClient, GenerationService};

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{validate_question_set, Category, Difficulty, ProfYear, Question};

/// The three interchangeable question sources, each carrying only the
/// parameters it needs.
#[derive(Clone, Debug)]
pub enum AcquisitionRequest {
    Generated {
        category: Category,
        year: ProfYear,
        difficulty: Difficulty,
        topic: String,
    },
    FromFile {
        /// Base64-encoded document body.
        data: String,
        mime_type: String,
    },
    Archive {
        repo: String,
        year: ProfYear,
        paper: String,
    },
}

/// Dispatches a request to its strategy and validates the result before it
/// may become a session. Validation failures carry the strategy's error
/// flavor, so an empty generated array is a `GenerationError`, not a bare
/// validation message.
pub struct Acquirer {
    generation: Arc<dyn GenerationService>,
    archive: Arc<dyn ArchiveService>,
}

impl Acquirer {
    pub fn new(generation: Arc<dyn GenerationService>, archive: Arc<dyn ArchiveService>) -> Self {
        Self {
            generation,
            archive,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(GeminiClient::new(config.clone())),
            Arc::new(HttpArchiveClient::new(config)),
        )
    }

    pub fn archive(&self) -> Arc<dyn ArchiveService> {
        Arc::clone(&self.archive)
    }

    pub async fn acquire(&self, request: AcquisitionRequest) -> AppResult<Vec<Question>> {
        match request {
            AcquisitionRequest::Generated {
                category,
                year,
                difficulty,
                topic,
            } => {
                let questions = self
                    .generation
                    .generate_quiz(category, year, difficulty, &topic)
                    .await?;
                validate_question_set(&questions)
                    .map_err(|e| rewrap(e, AppError::GenerationError))?;
                Ok(questions)
            }
            AcquisitionRequest::FromFile { data, mime_type } => {
                let questions = self
                    .generation
                    .extract_from_file(&data, &mime_type)
                    .await?;
                validate_question_set(&questions)
                    .map_err(|e| rewrap(e, AppError::ExtractionError))?;
                Ok(questions)
            }
            AcquisitionRequest::Archive { repo, year, paper } => {
                let questions = self.archive.fetch_paper(&repo, year, &paper).await?;
                validate_question_set(&questions)
                    .map_err(|e| rewrap(e, AppError::RetrievalError))?;
                Ok(questions)
            }
        }
    }
}

fn rewrap(err: AppError, wrap: fn(String) -> AppError) -> AppError {
    match err {
        AppError::ValidationError(message) => wrap(message),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::archive::MockArchiveService;
    use super::generation::MockGenerationService;
    use super::*;
    use crate::test_utils::fixtures::sample_questions;

    fn acquirer(
        generation: MockGenerationService,
        archive: MockArchiveService,
    ) -> Acquirer {
        Acquirer::new(Arc::new(generation), Arc::new(archive))
    }

    #[tokio::test]
    async fn generated_request_passes_parameters_through() {
        let mut generation = MockGenerationService::new();
        generation
            .expect_generate_quiz()
            .withf(|category, year, difficulty, topic| {
                *category == Category::MBBS
                    && *year == ProfYear::Second
                    && *difficulty == Difficulty::Standard
                    && topic == "Cardiology"
            })
            .returning(|_, _, _, _| Ok(sample_questions(10)));

        let questions = acquirer(generation, MockArchiveService::new())
            .acquire(AcquisitionRequest::Generated {
                category: Category::MBBS,
                year: ProfYear::Second,
                difficulty: Difficulty::Standard,
                topic: "Cardiology".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(questions.len(), 10);
    }

    #[tokio::test]
    async fn empty_generated_set_is_a_generation_error() {
        let mut generation = MockGenerationService::new();
        generation
            .expect_generate_quiz()
            .returning(|_, _, _, _| Ok(Vec::new()));

        let err = acquirer(generation, MockArchiveService::new())
            .acquire(AcquisitionRequest::Generated {
                category: Category::MBBS,
                year: ProfYear::Second,
                difficulty: Difficulty::Standard,
                topic: "Cardiology".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.error_code(), "GENERATION_ERROR");
    }

    #[tokio::test]
    async fn malformed_extracted_question_is_an_extraction_error() {
        let mut generation = MockGenerationService::new();
        generation.expect_extract_from_file().returning(|_, _| {
            let mut questions = sample_questions(2);
            questions[0].options.truncate(3);
            Ok(questions)
        });

        let err = acquirer(generation, MockArchiveService::new())
            .acquire(AcquisitionRequest::FromFile {
                data: "ZmFrZQ==".to_string(),
                mime_type: "application/pdf".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.error_code(), "EXTRACTION_ERROR");
    }

    #[tokio::test]
    async fn archive_fetch_failure_propagates_as_retrieval_error() {
        let mut archive = MockArchiveService::new();
        archive
            .expect_fetch_paper()
            .returning(|_, _, _| Err(AppError::RetrievalError("status 404".to_string())));

        let err = acquirer(MockGenerationService::new(), archive)
            .acquire(AcquisitionRequest::Archive {
                repo: "umaiskhan/kmu-mcqs".to_string(),
                year: ProfYear::Final,
                paper: "Paper M".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.error_code(), "RETRIEVAL_ERROR");
    }

    #[tokio::test]
    async fn archive_empty_paper_is_a_retrieval_error() {
        let mut archive = MockArchiveService::new();
        archive.expect_fetch_paper().returning(|_, _, _| Ok(vec![]));

        let err = acquirer(MockGenerationService::new(), archive)
            .acquire(AcquisitionRequest::Archive {
                repo: "umaiskhan/kmu-mcqs".to_string(),
                year: ProfYear::Final,
                paper: "Paper M".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.error_code(), "RETRIEVAL_ERROR");
    }
}
