pub mod profile;
pub mod question;

pub use profile::{Category, Difficulty, ProfYear, RegistrationInput, UserProfile};
pub use question::{validate_question_set, Question, OPTION_COUNT};
