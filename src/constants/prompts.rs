use crate::models::{Category, Difficulty, ProfYear};

/// System instruction for topic-based quiz generation. The service is asked
/// for 10-15 items but any non-empty, well-formed count is accepted.
pub fn quiz_system_instruction(
    category: Category,
    year: ProfYear,
    difficulty: Difficulty,
    topic: &str,
) -> String {
    format!(
        "You are a medical education expert. Generate 10-15 high-yield MCQs for {category} {year} level.\n\
         Topic: {topic}. Difficulty: {difficulty}.\n\
         Ensure questions focus on clinical scenarios and textbook accuracy.\n\
         Format: 5 options (A, B, C, D, E)."
    )
}

pub fn quiz_user_prompt(
    category: Category,
    year: ProfYear,
    difficulty: Difficulty,
    topic: &str,
) -> String {
    format!("Generate a {difficulty} medical quiz on {topic} for {year} {category} students.")
}

pub const FILE_EXTRACTION_PROMPT: &str =
    "Extract medical MCQs from this document. Ensure each has 5 options and a clinical explanation.";
