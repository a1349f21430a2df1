// src/models/category.rs

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Represents the 'categories' table in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,

    /// Unique machine slug, e.g. "data_structure".
    pub name: String,

    /// Human-readable display text.
    pub label: String,

    /// Presentation order, ascending. Not required to be contiguous.
    pub sort_order: i32,
}

/// Normalizes a category slug: trimmed, lower-cased, whitespace runs become `_`.
pub fn normalize_name(raw: &str) -> Result<String, AppError> {
    let name = WHITESPACE
        .replace_all(raw.trim(), "_")
        .to_lowercase();
    if name.is_empty() {
        return Err(AppError::InvalidArgument(
            "Category name must not be empty".to_string(),
        ));
    }
    Ok(name)
}

/// Validated input for creating a category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub label: String,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub label: Option<String>,
    pub sort_order: Option<i32>,
}

/// DTO for creating a new category.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub label: String,
    pub sort_order: Option<i32>,
}

impl TryFrom<CreateCategoryRequest> for NewCategory {
    type Error = AppError;

    fn try_from(req: CreateCategoryRequest) -> Result<Self, Self::Error> {
        req.validate()?;
        Ok(NewCategory {
            name: normalize_name(&req.name)?,
            label: req.label.trim().to_string(),
            sort_order: req.sort_order.unwrap_or(0),
        })
    }
}

/// DTO for updating a category. Fields are optional.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub label: Option<String>,
    pub sort_order: Option<i32>,
}

impl TryFrom<UpdateCategoryRequest> for CategoryPatch {
    type Error = AppError;

    fn try_from(req: UpdateCategoryRequest) -> Result<Self, Self::Error> {
        req.validate()?;
        Ok(CategoryPatch {
            name: req.name.as_deref().map(normalize_name).transpose()?,
            label: req.label.map(|l| l.trim().to_string()),
            sort_order: req.sort_order,
        })
    }
}

/// Per-category question count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category_id: String,
    pub name: String,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCounts {
    pub total: usize,
    pub categories: Vec<CategoryCount>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_slugged() {
        assert_eq!(normalize_name("  Data  Structure ").unwrap(), "data_structure");
        assert_eq!(normalize_name("JavaScript").unwrap(), "javascript");
        assert_eq!(normalize_name("data-structure").unwrap(), "data-structure");
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(matches!(
            normalize_name("   "),
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[test]
    fn sort_order_defaults_to_zero() {
        let new = NewCategory::try_from(CreateCategoryRequest {
            name: "Web Network".into(),
            label: "Network".into(),
            sort_order: None,
        })
        .unwrap();
        assert_eq!(new.name, "web_network");
        assert_eq!(new.sort_order, 0);
    }
}
