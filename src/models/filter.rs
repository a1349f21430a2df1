// src/models/filter.rs

use serde::Deserialize;

use crate::{error::AppError, models::question::Difficulty};

/// Sentinel meaning "no constraint" for category and difficulty.
pub const ALL: &str = "all";

/// Filter specification. Every present constraint must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// Category id to match exactly. `None` means all categories.
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
    /// Case-insensitive substring over title, content and tags.
    pub search_text: Option<String>,
    pub favorites_only: bool,
}

impl FilterSpec {
    pub fn category(category: impl Into<String>) -> Self {
        Self::default().with_category(category)
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category: String = category.into();
        self.category = constraint(&category).map(str::to_owned);
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.search_text = (!text.is_empty()).then_some(text);
        self
    }

    pub fn favorites_only(mut self) -> Self {
        self.favorites_only = true;
        self
    }
}

/// Query parameters for listing questions.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuestionsParams {
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub search: Option<String>,
    pub favorites_only: Option<bool>,
}

impl TryFrom<ListQuestionsParams> for FilterSpec {
    type Error = AppError;

    fn try_from(params: ListQuestionsParams) -> Result<Self, Self::Error> {
        let difficulty = params
            .difficulty
            .as_deref()
            .and_then(constraint)
            .map(str::parse)
            .transpose()?;

        Ok(FilterSpec {
            category: params
                .category
                .as_deref()
                .and_then(constraint)
                .map(str::to_owned),
            difficulty,
            search_text: params.search.filter(|s| !s.is_empty()),
            favorites_only: params.favorites_only.unwrap_or(false),
        })
    }
}

/// Drops empty values and the `"all"` sentinel.
pub fn constraint(value: &str) -> Option<&str> {
    match value {
        "" | ALL => None,
        other => Some(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_means_unconstrained() {
        let spec = FilterSpec::try_from(ListQuestionsParams {
            category: Some("all".into()),
            difficulty: Some("all".into()),
            search: Some(String::new()),
            favorites_only: None,
        })
        .unwrap();
        assert_eq!(spec, FilterSpec::default());
    }

    #[test]
    fn unknown_difficulty_is_rejected() {
        let params = ListQuestionsParams {
            difficulty: Some("expert".into()),
            ..Default::default()
        };
        assert!(matches!(
            FilterSpec::try_from(params),
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[test]
    fn params_carry_through() {
        let spec = FilterSpec::try_from(ListQuestionsParams {
            category: Some("css".into()),
            difficulty: Some("hard".into()),
            search: Some("Grid".into()),
            favorites_only: Some(true),
        })
        .unwrap();
        assert_eq!(
            spec,
            FilterSpec::category("css")
                .with_difficulty(Difficulty::Hard)
                .with_search("Grid")
                .favorites_only()
        );
    }
}
