use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{Question, OPTION_COUNT};

/// One-pass quiz traversal. Answers are recorded exactly once per question,
/// in order; there is deliberately no operation to revisit a prior index.
#[derive(Clone, Debug)]
pub struct QuizSession {
    pub id: Uuid,
    questions: Vec<Question>,
    current_index: usize,
    score: usize,
    skipped: usize,
    answers: Vec<Option<usize>>,
    finished: bool,
    started_at: DateTime<Utc>,
}

impl QuizSession {
    /// Acquisition validates sets before a session is built; an empty set
    /// reaching this constructor is still refused.
    pub fn new(questions: Vec<Question>) -> AppResult<Self> {
        if questions.is_empty() {
            return Err(AppError::ValidationError(
                "cannot start a session with no questions".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            questions,
            current_index: 0,
            score: 0,
            skipped: 0,
            answers: Vec::new(),
            finished: false,
            started_at: Utc::now(),
        })
    }

    /// Records the answer for the current question and advances. `None` is a
    /// first-class skip, distinct from selecting option 0.
    pub fn record_answer(&mut self, selection: Option<usize>) -> AppResult<()> {
        if self.finished {
            return Err(AppError::ValidationError(
                "session is already finished".to_string(),
            ));
        }
        if let Some(index) = selection {
            if index >= OPTION_COUNT {
                return Err(AppError::ValidationError(format!(
                    "option index {} is out of range",
                    index
                )));
            }
        }

        let question = &self.questions[self.current_index];
        match selection {
            Some(index) if index == question.correct_index => self.score += 1,
            Some(_) => {}
            None => self.skipped += 1,
        }

        self.answers.push(selection);
        self.current_index += 1;
        if self.current_index == self.questions.len() {
            self.finished = true;
        }
        Ok(())
    }

    /// Pure recount of recorded answers; equals `score()` once finished.
    pub fn final_score(&self) -> usize {
        self.answers
            .iter()
            .zip(&self.questions)
            .filter(|(answer, question)| **answer == Some(question.correct_index))
            .count()
    }

    pub fn report(&self) -> ScoreReport {
        let total = self.questions.len();
        let score = self.final_score();
        let percentage = ((score * 100) as f64 / total as f64).round() as u32;

        let rows = self
            .questions
            .iter()
            .zip(&self.answers)
            .map(|(question, answer)| ReviewRow {
                question: question.question.clone(),
                options: question.options.clone(),
                chosen: *answer,
                correct_index: question.correct_index,
                explanation: question.explanation.clone(),
            })
            .collect();

        ScoreReport {
            score,
            total,
            percentage,
            skipped: self.skipped,
            rows,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

#[derive(Clone, Debug)]
pub struct ScoreReport {
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
    pub skipped: usize,
    pub rows: Vec<ReviewRow>,
}

#[derive(Clone, Debug)]
pub struct ReviewRow {
    pub question: String,
    pub options: Vec<String>,
    pub chosen: Option<usize>,
    pub correct_index: usize,
    pub explanation: String,
}

impl ReviewRow {
    pub fn is_correct(&self) -> bool {
        self.chosen == Some(self.correct_index)
    }
}
