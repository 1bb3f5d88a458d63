#[cfg(test)]
pub mod fixtures {
    use crate::models::{Category, ProfYear, Question, RegistrationInput};

    /// A well-formed five-option question whose answer sits at `correct_index`.
    pub fn sample_question(correct_index: usize) -> Question {
        Question {
            question: format!("Which option is correct (answer {})?", correct_index),
            options: (0..5).map(|i| format!("Option {}", i)).collect(),
            correct_index,
            explanation: "Stem written for engine tests.".to_string(),
        }
    }

    /// `count` questions with correct answers cycling through positions 0-4.
    pub fn sample_questions(count: usize) -> Vec<Question> {
        (0..count).map(|i| sample_question(i % 5)).collect()
    }

    pub fn registration() -> RegistrationInput {
        RegistrationInput {
            name: "Ayesha".to_string(),
            roll_number: "241-B".to_string(),
            category: Category::MBBS,
            year: ProfYear::First,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_sample_question() {
        let question = sample_question(3);
        assert_eq!(question.options.len(), 5);
        assert_eq!(question.correct_index, 3);
        assert!(question.validate().is_ok());
    }

    #[test]
    fn test_fixtures_sample_questions_cycle() {
        let questions = sample_questions(7);
        assert_eq!(questions.len(), 7);
        assert_eq!(questions[0].correct_index, 0);
        assert_eq!(questions[4].correct_index, 4);
        assert_eq!(questions[5].correct_index, 0);
    }
}
