use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Every question carries options A through E.
pub const OPTION_COUNT: usize = 5;

/// Canonical question shape shared by all acquisition sources. The wire
/// format (generation service output and archive files) uses camelCase keys.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
}

impl Question {
    pub fn validate(&self) -> AppResult<()> {
        if self.options.len() != OPTION_COUNT {
            return Err(AppError::ValidationError(format!(
                "expected {} options, got {}",
                OPTION_COUNT,
                self.options.len()
            )));
        }
        if self.correct_index >= OPTION_COUNT {
            return Err(AppError::ValidationError(format!(
                "correct index {} is out of range",
                self.correct_index
            )));
        }
        Ok(())
    }
}

/// Rejects empty sets and malformed entries outright; entries are never
/// repaired or silently dropped.
pub fn validate_question_set(questions: &[Question]) -> AppResult<()> {
    if questions.is_empty() {
        return Err(AppError::ValidationError(
            "question set is empty".to_string(),
        ));
    }
    for (i, question) in questions.iter().enumerate() {
        question
            .validate()
            .map_err(|e| AppError::ValidationError(format!("question {}: {}", i + 1, e)))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::{sample_question, sample_questions};

    #[test]
    fn well_formed_question_passes_validation() {
        assert!(sample_question(2).validate().is_ok());
    }

    #[test]
    fn question_with_four_options_is_rejected() {
        let mut question = sample_question(0);
        question.options.pop();

        let err = question.validate().unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn out_of_range_correct_index_is_rejected() {
        let mut question = sample_question(0);
        question.correct_index = 5;

        assert!(question.validate().is_err());
    }

    #[test]
    fn empty_question_set_is_rejected() {
        let err = validate_question_set(&[]).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn malformed_entry_identifies_position() {
        let mut questions = sample_questions(3);
        questions[1].options.truncate(2);

        let err = validate_question_set(&questions).unwrap_err();
        assert!(err.to_string().contains("question 2"));
    }

    #[test]
    fn question_wire_format_uses_camel_case() {
        let question = sample_question(3);
        let json = serde_json::to_value(&question).unwrap();

        assert!(json.get("correctIndex").is_some());
        assert!(json.get("question").is_some());
        assert!(json.get("options").is_some());
        assert!(json.get("explanation").is_some());
    }
}
