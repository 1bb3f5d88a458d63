use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Generation failed: {0}")]
    GenerationError(String),

    #[error("Extraction failed: {0}")]
    ExtractionError(String),

    #[error("Retrieval failed: {0}")]
    RetrievalError(String),

    #[error("Archive sync failed: {0}")]
    SyncError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::GenerationError(_) => "GENERATION_ERROR",
            AppError::ExtractionError(_) => "EXTRACTION_ERROR",
            AppError::RetrievalError(_) => "RETRIEVAL_ERROR",
            AppError::SyncError(_) => "SYNC_ERROR",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::ConfigError(_) => "CONFIG_ERROR",
            AppError::StorageError(_) => "STORAGE_ERROR",
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::StorageError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::GenerationError("test".into()).error_code(),
            "GENERATION_ERROR"
        );
        assert_eq!(
            AppError::RetrievalError("test".into()).error_code(),
            "RETRIEVAL_ERROR"
        );
        assert_eq!(
            AppError::SyncError("test".into()).error_code(),
            "SYNC_ERROR"
        );
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::GenerationError("service unreachable".into());
        assert_eq!(err.to_string(), "Generation failed: service unreachable");

        let err = AppError::ValidationError("name is required".into());
        assert_eq!(err.to_string(), "Validation error: name is required");
    }
}
