use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{AppError, AppResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Category {
    MBBS,
    BDS,
}

impl Category {
    /// BDS tracks stop at 4th Prof; MBBS runs through Final Prof.
    pub fn relevant_years(&self) -> &'static [ProfYear] {
        match self {
            Category::MBBS => &ProfYear::ALL,
            Category::BDS => &ProfYear::ALL[..4],
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::MBBS => write!(f, "MBBS"),
            Category::BDS => write!(f, "BDS"),
        }
    }
}

/// The five ordered curricular stages gating which papers are relevant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum ProfYear {
    #[serde(rename = "1st Prof")]
    First,
    #[serde(rename = "2nd Prof")]
    Second,
    #[serde(rename = "3rd Prof")]
    Third,
    #[serde(rename = "4th Prof")]
    Fourth,
    #[serde(rename = "Final Prof")]
    Final,
}

impl ProfYear {
    pub const ALL: [ProfYear; 5] = [
        ProfYear::First,
        ProfYear::Second,
        ProfYear::Third,
        ProfYear::Fourth,
        ProfYear::Final,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProfYear::First => "1st Prof",
            ProfYear::Second => "2nd Prof",
            ProfYear::Third => "3rd Prof",
            ProfYear::Fourth => "4th Prof",
            ProfYear::Final => "Final Prof",
        }
    }

    /// Lowercase, space-to-hyphen form used in archive file names.
    pub fn slug(&self) -> String {
        self.label().to_lowercase().replace(' ', "-")
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|y| y.label() == label)
    }
}

impl std::fmt::Display for ProfYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Difficulty {
    Standard,
    Clinical,
    Elite,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Standard => write!(f, "Standard"),
            Difficulty::Clinical => write!(f, "Clinical"),
            Difficulty::Elite => write!(f, "Elite"),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct RegistrationInput {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "roll number is required"))]
    pub roll_number: String,
    pub category: Category,
    pub year: ProfYear,
}

/// Candidate identity captured once at registration, immutable afterwards.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct UserProfile {
    pub name: String,
    pub roll_number: String,
    pub category: Category,
    pub year: ProfYear,
    pub joined_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn register(input: RegistrationInput) -> AppResult<Self> {
        let input = RegistrationInput {
            name: input.name.trim().to_string(),
            roll_number: input.roll_number.trim().to_string(),
            ..input
        };
        input.validate()?;

        if !input.category.relevant_years().contains(&input.year) {
            return Err(AppError::ValidationError(format!(
                "{} is not offered for {}",
                input.year, input.category
            )));
        }

        Ok(UserProfile {
            name: input.name,
            roll_number: input.roll_number,
            category: input.category,
            year: input.year,
            joined_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_builds_profile_with_exact_fields() {
        let profile = UserProfile::register(RegistrationInput {
            name: "Ayesha".to_string(),
            roll_number: "241-B".to_string(),
            category: Category::MBBS,
            year: ProfYear::First,
        })
        .unwrap();

        assert_eq!(profile.name, "Ayesha");
        assert_eq!(profile.roll_number, "241-B");
        assert_eq!(profile.category, Category::MBBS);
        assert_eq!(profile.year, ProfYear::First);
        assert!(!profile.joined_at.to_rfc3339().is_empty());
    }

    #[test]
    fn registration_rejects_empty_name() {
        let result = UserProfile::register(RegistrationInput {
            name: "   ".to_string(),
            roll_number: "241-B".to_string(),
            category: Category::MBBS,
            year: ProfYear::First,
        });

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn registration_rejects_empty_roll_number() {
        let result = UserProfile::register(RegistrationInput {
            name: "Ayesha".to_string(),
            roll_number: "".to_string(),
            category: Category::MBBS,
            year: ProfYear::First,
        });

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn bds_has_no_final_prof() {
        assert!(!Category::BDS.relevant_years().contains(&ProfYear::Final));
        assert_eq!(Category::MBBS.relevant_years().len(), 5);
        assert_eq!(Category::BDS.relevant_years().len(), 4);

        let result = UserProfile::register(RegistrationInput {
            name: "Ayesha".to_string(),
            roll_number: "241-B".to_string(),
            category: Category::BDS,
            year: ProfYear::Final,
        });
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn prof_year_labels_round_trip() {
        for year in ProfYear::ALL {
            let json = serde_json::to_string(&year).expect("year should serialize");
            let parsed: ProfYear =
                serde_json::from_str(&json).expect("year should deserialize");
            assert_eq!(year, parsed);
            assert_eq!(ProfYear::from_label(year.label()), Some(year));
        }
    }

    #[test]
    fn prof_year_rejects_unknown_variant() {
        let parsed = serde_json::from_str::<ProfYear>("\"6th Prof\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn prof_year_slugs() {
        assert_eq!(ProfYear::First.slug(), "1st-prof");
        assert_eq!(ProfYear::Final.slug(), "final-prof");
    }
}
