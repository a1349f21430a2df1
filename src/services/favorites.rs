// src/services/favorites.rs
//
// Client-side half of favorite reconciliation. The store toggles atomically
// (see `QuestionService::toggle_favorite`); holders of cached copies patch
// them from the returned record, keyed by id.

use crate::models::question::Question;

/// Copies the favorite state of `updated` onto every view holding the same
/// id. Returns how many copies were patched.
pub fn reconcile_views<'a, I>(views: I, updated: &Question) -> usize
where
    I: IntoIterator<Item = &'a mut Question>,
{
    let mut patched = 0;
    for view in views {
        if view.id == updated.id {
            view.is_favorite = updated.is_favorite;
            view.updated_at = updated.updated_at;
            patched += 1;
        }
    }
    patched
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::models::question::{Difficulty, Tags};

    fn question(id: &str, is_favorite: bool) -> Question {
        let now = Utc::now();
        Question {
            id: id.into(),
            title: format!("Question {}", id),
            content: String::new(),
            answer: String::new(),
            category_id: "javascript".into(),
            difficulty: Difficulty::Easy,
            tags: Tags::default(),
            is_favorite,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn every_copy_of_the_toggled_question_is_patched() {
        let mut list_view = vec![question("1", false), question("2", true)];
        let mut detail_view = Some(question("1", false));

        let mut updated = question("1", true);
        updated.updated_at += Duration::seconds(5);

        let patched = reconcile_views(
            list_view.iter_mut().chain(detail_view.iter_mut()),
            &updated,
        );

        assert_eq!(patched, 2);
        assert!(list_view[0].is_favorite);
        assert!(list_view[1].is_favorite);
        assert_eq!(detail_view.unwrap().updated_at, updated.updated_at);
    }

    #[test]
    fn unrelated_views_are_untouched() {
        let mut views = vec![question("2", false)];
        assert_eq!(reconcile_views(views.iter_mut(), &question("1", true)), 0);
        assert!(!views[0].is_favorite);
    }
}
