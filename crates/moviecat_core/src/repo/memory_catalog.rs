//! In-memory catalog backend.
//!
//! # Responsibility
//! - Hold the authoritative ID-to-entity maps in process memory.
//! - Enforce parent-movie existence before any review mutation.
//!
//! # Invariants
//! - Movie and review IDs come from the owned allocator and are strictly
//!   increasing across the catalog's lifetime, deletions included.
//! - Every failure path returns before any map or counter is touched.
//! - Reviews live only inside their parent movie's map; removing the movie
//!   drops them with it.

use crate::model::movie::{Movie, MovieDraft, MovieId};
use crate::model::review::{Review, ReviewDraft, ReviewId};
use crate::model::user::{User, UserDraft, UserId};
use crate::repo::catalog::{Catalog, CatalogError, CatalogResult, EntityKind};
use crate::repo::id_alloc::IdAllocator;
use std::collections::BTreeMap;

/// Map-backed catalog holding all state in process memory.
///
/// `BTreeMap` keys are allocator-assigned and strictly increasing, so key
/// order equals insertion order and `list_movies` needs no extra
/// bookkeeping.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    alloc: IdAllocator,
    movies: BTreeMap<MovieId, Movie>,
    users: BTreeMap<UserId, User>,
}

impl MemoryCatalog {
    /// Creates an empty catalog with fresh counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of movies currently stored.
    pub fn movie_count(&self) -> usize {
        self.movies.len()
    }

    /// The ID the next review allocation would receive. Exposed so tests
    /// can assert that failed inserts do not burn IDs.
    pub fn next_review_id(&self) -> ReviewId {
        self.alloc.peek(EntityKind::Review)
    }

    fn movie(&self, id: MovieId) -> CatalogResult<&Movie> {
        self.movies
            .get(&id)
            .ok_or(CatalogError::not_found(EntityKind::Movie, id))
    }

    fn movie_mut(&mut self, id: MovieId) -> CatalogResult<&mut Movie> {
        self.movies
            .get_mut(&id)
            .ok_or(CatalogError::not_found(EntityKind::Movie, id))
    }
}

impl Catalog for MemoryCatalog {
    fn insert_movie(&mut self, draft: &MovieDraft) -> CatalogResult<Movie> {
        let id = self.alloc.next_id(EntityKind::Movie);
        let movie = Movie::from_draft(id, draft);
        self.movies.insert(id, movie.clone());
        Ok(movie)
    }

    fn get_movie(&self, id: MovieId) -> CatalogResult<Option<Movie>> {
        Ok(self.movies.get(&id).cloned())
    }

    fn list_movies(&self) -> CatalogResult<Vec<Movie>> {
        Ok(self.movies.values().cloned().collect())
    }

    fn replace_movie(&mut self, id: MovieId, draft: &MovieDraft) -> CatalogResult<Movie> {
        let movie = self.movie_mut(id)?;
        movie.apply_draft(draft);
        Ok(movie.clone())
    }

    fn remove_movie(&mut self, id: MovieId) -> CatalogResult<Movie> {
        self.movies
            .remove(&id)
            .ok_or(CatalogError::not_found(EntityKind::Movie, id))
    }

    fn insert_review(&mut self, movie_id: MovieId, draft: &ReviewDraft) -> CatalogResult<Review> {
        // Parent check must precede allocation so a missing movie does not
        // burn a review ID.
        if !self.movies.contains_key(&movie_id) {
            return Err(CatalogError::not_found(EntityKind::Movie, movie_id));
        }
        let id = self.alloc.next_id(EntityKind::Review);
        let review = Review::from_draft(id, draft);
        if let Some(movie) = self.movies.get_mut(&movie_id) {
            movie.reviews.insert(id, review.clone());
        }
        Ok(review)
    }

    fn list_reviews(&self, movie_id: MovieId) -> CatalogResult<Vec<Review>> {
        let movie = self.movie(movie_id)?;
        Ok(movie.reviews.values().cloned().collect())
    }

    fn get_review(&self, movie_id: MovieId, review_id: ReviewId) -> CatalogResult<Option<Review>> {
        let movie = self.movie(movie_id)?;
        Ok(movie.reviews.get(&review_id).cloned())
    }

    fn replace_review(
        &mut self,
        movie_id: MovieId,
        review_id: ReviewId,
        draft: &ReviewDraft,
    ) -> CatalogResult<Review> {
        let movie = self.movie_mut(movie_id)?;
        let review = movie
            .reviews
            .get_mut(&review_id)
            .ok_or(CatalogError::not_found(EntityKind::Review, review_id))?;
        review.apply_draft(draft);
        Ok(review.clone())
    }

    fn remove_review(&mut self, movie_id: MovieId, review_id: ReviewId) -> CatalogResult<Review> {
        let movie = self.movie_mut(movie_id)?;
        movie
            .reviews
            .remove(&review_id)
            .ok_or(CatalogError::not_found(EntityKind::Review, review_id))
    }

    fn insert_user(&mut self, draft: &UserDraft) -> CatalogResult<User> {
        let id = self.alloc.next_id(EntityKind::User);
        let user = User::from_draft(id, draft);
        self.users.insert(id, user.clone());
        Ok(user)
    }

    fn get_user(&self, id: UserId) -> CatalogResult<Option<User>> {
        Ok(self.users.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryCatalog;
    use crate::model::movie::MovieDraft;
    use crate::model::review::ReviewDraft;
    use crate::repo::catalog::{Catalog, CatalogError, EntityKind};

    fn movie_draft(title: &str) -> MovieDraft {
        MovieDraft {
            title: title.to_string(),
            studio: "Warner Bros.".to_string(),
            description: None,
            year: 1999,
        }
    }

    #[test]
    fn failed_review_insert_does_not_burn_an_id() {
        let mut catalog = MemoryCatalog::new();
        let movie = catalog.insert_movie(&movie_draft("The Matrix")).unwrap();

        let draft = ReviewDraft {
            n_stars: 4.6,
            text: "Great movie!".to_string(),
            user_id: 0,
        };
        let err = catalog.insert_review(movie.id + 1, &draft).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::NotFound {
                kind: EntityKind::Movie,
                ..
            }
        ));
        assert_eq!(catalog.next_review_id(), 0);

        let review = catalog.insert_review(movie.id, &draft).unwrap();
        assert_eq!(review.id, 0);
    }

    #[test]
    fn remove_movie_returns_its_reviews() {
        let mut catalog = MemoryCatalog::new();
        let movie = catalog.insert_movie(&movie_draft("Inception")).unwrap();
        catalog
            .insert_review(
                movie.id,
                &ReviewDraft {
                    n_stars: 5.0,
                    text: "mind-bending".to_string(),
                    user_id: 0,
                },
            )
            .unwrap();

        let removed = catalog.remove_movie(movie.id).unwrap();
        assert_eq!(removed.reviews.len(), 1);
        assert_eq!(catalog.movie_count(), 0);
    }
}
