use std::env;

use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug)]
pub struct Config {
    pub gemini_api_key: Option<SecretString>,
    pub gemini_api_base: String,
    pub gemini_model: String,
    pub archive_base_url: String,
    pub archive_branch: String,
    pub default_repo_path: String,
    pub store_path: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: env::var("GEMINI_API_KEY").ok().map(SecretString::from),
            gemini_api_base: env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-3-flash-preview".to_string()),
            archive_base_url: env::var("ARCHIVE_BASE_URL")
                .unwrap_or_else(|_| "https://raw.githubusercontent.com".to_string()),
            archive_branch: env::var("ARCHIVE_BRANCH").unwrap_or_else(|_| "main".to_string()),
            default_repo_path: env::var("DEFAULT_REPO_PATH")
                .unwrap_or_else(|_| "umaiskhan/kmu-mcqs".to_string()),
            store_path: env::var("STORE_PATH")
                .unwrap_or_else(|_| "medquiz_store.json".to_string()),
        }
    }

    /// The API key is only required once a generation request is actually
    /// issued, not at startup.
    pub fn require_api_key(&self) -> AppResult<&SecretString> {
        self.gemini_api_key.as_ref().ok_or_else(|| {
            AppError::ConfigError(
                "GEMINI_API_KEY is not set; generation is unavailable".to_string(),
            )
        })
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            gemini_api_key: Some(SecretString::from("test_api_key".to_string())),
            gemini_api_base: "https://generativelanguage.googleapis.com".to_string(),
            gemini_model: "gemini-3-flash-preview".to_string(),
            archive_base_url: "https://raw.githubusercontent.com".to_string(),
            archive_branch: "main".to_string(),
            default_repo_path: "umaiskhan/kmu-mcqs".to_string(),
            store_path: "medquiz_store.json".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        assert!(!config.gemini_api_base.is_empty());
        assert!(!config.archive_base_url.is_empty());
        assert_eq!(config.archive_branch, "main");
    }

    #[test]
    fn test_missing_api_key_is_a_config_error() {
        let mut config = Config::test_config();
        config.gemini_api_key = None;

        let err = config.require_api_key().unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_test_config() {
        let config = Config::test_config();

        assert!(config.require_api_key().is_ok());
        assert_eq!(config.default_repo_path, "umaiskhan/kmu-mcqs");
        assert_eq!(config.gemini_model, "gemini-3-flash-preview");
    }
}
