// src/models/question.rs

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;

/// Closed difficulty enumeration. Stored as lower-case text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(AppError::InvalidArgument(format!(
                "Unknown difficulty '{}', expected one of easy, medium, hard",
                other
            ))),
        }
    }
}

/// Ordered tag set. Insertion order is kept, duplicates and blanks are dropped.
///
/// Persisted as a single comma-delimited string; an empty set is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Tags(Vec<String>);

impl Tags {
    pub const DELIMITER: char = ',';

    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for raw in tags {
            for piece in raw.as_ref().split(Self::DELIMITER) {
                let piece = piece.trim();
                if !piece.is_empty() && !out.iter().any(|t| t == piece) {
                    out.push(piece.to_string());
                }
            }
        }
        Tags(out)
    }

    pub fn from_storage(stored: &str) -> Self {
        Self::new(std::iter::once(stored))
    }

    pub fn to_storage(&self) -> String {
        self.0.join(",")
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for Tags {
    fn from(tags: Vec<String>) -> Self {
        Tags::new(tags)
    }
}

impl From<Tags> for Vec<String> {
    fn from(tags: Tags) -> Self {
        tags.0
    }
}

/// A catalog entry. `content` and `answer` are opaque pre-rendered markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub title: String,
    pub content: String,
    pub answer: String,
    pub category_id: String,
    pub difficulty: Difficulty,
    pub tags: Tags,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a question.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub title: String,
    pub content: String,
    pub answer: String,
    pub category_id: String,
    pub difficulty: Difficulty,
    pub tags: Tags,
    pub is_favorite: bool,
}

/// Partial update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct QuestionPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub answer: Option<String>,
    pub category_id: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub tags: Option<Tags>,
    pub is_favorite: Option<bool>,
}

impl QuestionPatch {
    pub fn favorite(is_favorite: bool) -> Self {
        Self {
            is_favorite: Some(is_favorite),
            ..Default::default()
        }
    }

    /// True when the patch touches anything besides `is_favorite`.
    pub fn touches_content(&self) -> bool {
        self.title.is_some()
            || self.content.is_some()
            || self.answer.is_some()
            || self.category_id.is_some()
            || self.difficulty.is_some()
            || self.tags.is_some()
    }

    /// Writes the present fields onto `question`, leaving the rest as stored.
    pub fn apply(&self, question: &mut Question) {
        if let Some(title) = &self.title {
            question.title.clone_from(title);
        }
        if let Some(content) = &self.content {
            question.content.clone_from(content);
        }
        if let Some(answer) = &self.answer {
            question.answer.clone_from(answer);
        }
        if let Some(category_id) = &self.category_id {
            question.category_id.clone_from(category_id);
        }
        if let Some(difficulty) = self.difficulty {
            question.difficulty = difficulty;
        }
        if let Some(tags) = &self.tags {
            question.tags = tags.clone();
        }
        if let Some(is_favorite) = self.is_favorite {
            question.is_favorite = is_favorite;
        }
    }
}

/// DTO for creating a new question.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 20000))]
    pub content: String,
    #[validate(length(min = 1, max = 50000))]
    pub answer: String,
    #[validate(length(min = 1, max = 64))]
    pub category_id: String,
    pub difficulty: String,
    #[serde(default)]
    #[validate(custom(function = validate_tags))]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl TryFrom<CreateQuestionRequest> for NewQuestion {
    type Error = AppError;

    fn try_from(req: CreateQuestionRequest) -> Result<Self, Self::Error> {
        req.validate()?;
        Ok(NewQuestion {
            difficulty: req.difficulty.parse()?,
            tags: Tags::new(&req.tags),
            title: req.title,
            content: req.content,
            answer: req.answer,
            category_id: req.category_id,
            is_favorite: req.is_favorite,
        })
    }
}

/// DTO for updating a question. Fields are optional.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 20000))]
    pub content: Option<String>,
    #[validate(length(min = 1, max = 50000))]
    pub answer: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub category_id: Option<String>,
    pub difficulty: Option<String>,
    #[validate(custom(function = validate_tags))]
    pub tags: Option<Vec<String>>,
    pub is_favorite: Option<bool>,
}

impl TryFrom<UpdateQuestionRequest> for QuestionPatch {
    type Error = AppError;

    fn try_from(req: UpdateQuestionRequest) -> Result<Self, Self::Error> {
        req.validate()?;
        Ok(QuestionPatch {
            difficulty: req.difficulty.as_deref().map(str::parse).transpose()?,
            tags: req.tags.as_ref().map(Tags::new),
            title: req.title,
            content: req.content,
            answer: req.answer,
            category_id: req.category_id,
            is_favorite: req.is_favorite,
        })
    }
}

fn validate_tags(tags: &[String]) -> Result<(), validator::ValidationError> {
    if tags.len() > 32 {
        return Err(validator::ValidationError::new("too_many_tags"));
    }
    for tag in tags {
        if tag.len() > 50 {
            return Err(validator::ValidationError::new("tag_too_long"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_rejects_unknown_values() {
        assert_eq!("hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!(matches!(
            "extreme".parse::<Difficulty>(),
            Err(AppError::InvalidArgument(_))
        ));
        assert!("Easy".parse::<Difficulty>().is_err());
    }

    #[test]
    fn tags_keep_first_occurrence_order() {
        let tags = Tags::new(["react", " hooks ", "", "react", "state,effects"]);
        assert_eq!(tags.as_slice(), ["react", "hooks", "state", "effects"]);
        assert_eq!(tags.to_storage(), "react,hooks,state,effects");
    }

    #[test]
    fn empty_tags_store_as_empty_string() {
        assert_eq!(Tags::default().to_storage(), "");
        assert!(Tags::from_storage("").is_empty());
        assert_eq!(Tags::from_storage("a,b").as_slice(), ["a", "b"]);
    }

    #[test]
    fn create_request_with_bad_difficulty_is_invalid_argument() {
        let req = CreateQuestionRequest {
            title: "Closures".into(),
            content: "Explain closures".into(),
            answer: "A function plus its environment".into(),
            category_id: "javascript".into(),
            difficulty: "impossible".into(),
            tags: vec![],
            is_favorite: false,
        };
        assert!(matches!(
            NewQuestion::try_from(req),
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[test]
    fn patch_reports_content_changes() {
        assert!(!QuestionPatch::favorite(true).touches_content());
        let patch = QuestionPatch {
            title: Some("x".into()),
            ..Default::default()
        };
        assert!(patch.touches_content());
    }
}
