use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::models::ProfYear;

/// Papers published per curricular stage in the community archive.
pub static YEAR_PAPERS: Lazy<HashMap<ProfYear, Vec<&'static str>>> = Lazy::new(|| {
    HashMap::from([
        (ProfYear::First, vec!["Paper A", "Paper B", "Paper C"]),
        (ProfYear::Second, vec!["Paper D", "Paper E", "Paper F"]),
        (ProfYear::Third, vec!["Paper G", "Paper H", "Paper I"]),
        (
            ProfYear::Fourth,
            vec!["Paper J", "Paper K", "Paper L", "Eye", "ENT"],
        ),
        (
            ProfYear::Final,
            vec!["Paper M", "Paper N", "Paper O", "Paper P", "Paper Q"],
        ),
    ])
});

pub fn papers_for(year: ProfYear) -> &'static [&'static str] {
    YEAR_PAPERS
        .get(&year)
        .map(Vec::as_slice)
        .unwrap_or_default()
}
