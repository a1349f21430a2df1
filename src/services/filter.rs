// src/services/filter.rs
//
// Query/filter engine. Pure functions over an in-memory collection; never fails.

use std::cmp::Ordering;

use crate::models::{
    filter::{FilterSpec, constraint},
    question::Question,
};

/// True when `question` satisfies every active constraint of `spec`.
pub fn matches(question: &Question, spec: &FilterSpec) -> bool {
    if let Some(category) = spec.category.as_deref().and_then(constraint) {
        if question.category_id != category {
            return false;
        }
    }

    if let Some(difficulty) = spec.difficulty {
        if question.difficulty != difficulty {
            return false;
        }
    }

    if spec.favorites_only && !question.is_favorite {
        return false;
    }

    match spec.search_text.as_deref() {
        Some(text) if !text.is_empty() => matches_search(question, &text.to_lowercase()),
        _ => true,
    }
}

/// `needle` must already be lower-cased.
fn matches_search(question: &Question, needle: &str) -> bool {
    question.title.to_lowercase().contains(needle)
        || question.content.to_lowercase().contains(needle)
        || question.tags.to_storage().to_lowercase().contains(needle)
}

/// Matching subset, in input order.
pub fn filter(questions: &[Question], spec: &FilterSpec) -> Vec<Question> {
    questions
        .iter()
        .filter(|q| matches(q, spec))
        .cloned()
        .collect()
}

/// Newest first by `created_at`; ties broken by ascending `id`.
pub fn newest_first(a: &Question, b: &Question) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.id.cmp(&b.id))
}

pub fn sort_newest_first(questions: &mut [Question]) {
    questions.sort_by(newest_first);
}

/// Questions whose category is `category_id`, or all of them for `"all"`.
pub fn count_by_category(questions: &[Question], category_id: &str) -> usize {
    match constraint(category_id) {
        None => questions.len(),
        Some(id) => questions.iter().filter(|q| q.category_id == id).count(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::models::question::{Difficulty, Tags};

    fn question(
        id: &str,
        category: &str,
        difficulty: Difficulty,
        title: &str,
        tags: &[&str],
        is_favorite: bool,
    ) -> Question {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        Question {
            id: id.to_string(),
            title: title.to_string(),
            content: format!("About {}", title),
            answer: String::new(),
            category_id: category.to_string(),
            difficulty,
            tags: Tags::new(tags),
            is_favorite,
            created_at: at,
            updated_at: at,
        }
    }

    fn seed() -> Vec<Question> {
        vec![
            question("1", "javascript", Difficulty::Easy, "Closures", &["js"], false),
            question("2", "css", Difficulty::Hard, "Grid", &["css"], true),
        ]
    }

    fn ids(questions: &[Question]) -> Vec<&str> {
        questions.iter().map(|q| q.id.as_str()).collect()
    }

    fn catalog() -> Vec<Question> {
        vec![
            question("a", "javascript", Difficulty::Easy, "var vs let", &["ES6"], true),
            question("b", "javascript", Difficulty::Medium, "Closures", &["scope"], true),
            question("c", "react", Difficulty::Medium, "useEffect deps", &["hooks"], false),
            question("d", "css", Difficulty::Medium, "Flex vs Grid", &["layout"], false),
            question("e", "css", Difficulty::Hard, "Stacking context", &["z-index"], true),
            question("f", "network", Difficulty::Hard, "HTTP/2", &["protocol"], false),
        ]
    }

    #[test]
    fn favorites_only_scenario() {
        let qs = seed();
        assert_eq!(ids(&filter(&qs, &FilterSpec::default().favorites_only())), ["2"]);
    }

    #[test]
    fn search_scenario() {
        let qs = seed();
        assert_eq!(ids(&filter(&qs, &FilterSpec::default().with_search("clos"))), ["1"]);
    }

    #[test]
    fn favorites_after_toggle_scenario() {
        let mut qs = seed();
        qs[0].is_favorite = !qs[0].is_favorite;
        assert_eq!(
            ids(&filter(&qs, &FilterSpec::default().favorites_only())),
            ["1", "2"]
        );
    }

    #[test]
    fn empty_spec_returns_everything() {
        let qs = catalog();
        assert_eq!(filter(&qs, &FilterSpec::default()), qs);
        assert_eq!(filter(&qs, &FilterSpec::category("all")), qs);
    }

    #[test]
    fn search_is_case_insensitive_over_title_content_and_tags() {
        let qs = catalog();
        assert_eq!(ids(&filter(&qs, &FilterSpec::default().with_search("GRID"))), ["d"]);
        assert_eq!(ids(&filter(&qs, &FilterSpec::default().with_search("about http"))), ["f"]);
        assert_eq!(ids(&filter(&qs, &FilterSpec::default().with_search("es6"))), ["a"]);
        assert!(filter(&qs, &FilterSpec::default().with_search("kubernetes")).is_empty());
    }

    #[test]
    fn search_composes_with_other_predicates() {
        let qs = catalog();
        // "Closures" matches the search but is not in css.
        let spec = FilterSpec::category("css").with_search("clos");
        assert!(filter(&qs, &spec).is_empty());

        let spec = FilterSpec::category("javascript")
            .with_search("scope")
            .favorites_only();
        assert_eq!(ids(&filter(&qs, &spec)), ["b"]);
    }

    #[test]
    fn predicates_commute() {
        let qs = catalog();
        let categories = ["javascript", "react", "css", "network", "missing"];
        for category in categories {
            for difficulty in Difficulty::ALL {
                let both = filter(
                    &qs,
                    &FilterSpec::category(category).with_difficulty(difficulty),
                );
                let staged = filter(
                    &filter(&qs, &FilterSpec::category(category)),
                    &FilterSpec::default().with_difficulty(difficulty),
                );
                let reversed = filter(
                    &filter(&qs, &FilterSpec::default().with_difficulty(difficulty)),
                    &FilterSpec::category(category),
                );
                assert_eq!(both, staged);
                assert_eq!(both, reversed);
            }
        }
    }

    #[test]
    fn counts_partition_the_collection() {
        let qs = catalog();
        assert_eq!(count_by_category(&qs, "all"), qs.len());
        assert_eq!(count_by_category(&qs, "css"), 2);
        assert_eq!(count_by_category(&qs, "vue"), 0);

        let distinct: HashSet<&str> = qs.iter().map(|q| q.category_id.as_str()).collect();
        let sum: usize = distinct.iter().map(|c| count_by_category(&qs, c)).sum();
        assert_eq!(sum, qs.len());
    }

    #[test]
    fn newest_first_breaks_ties_by_id() {
        let mut qs = catalog();
        qs[5].created_at += Duration::days(1);
        qs[0].created_at -= Duration::days(1);
        sort_newest_first(&mut qs);
        assert_eq!(ids(&qs), ["f", "b", "c", "d", "e", "a"]);
    }
}
