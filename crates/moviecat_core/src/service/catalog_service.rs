//! Catalog use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for transport callers.
//! - Add the cross-entity referential checks that sit above any single
//!   backend operation.
//!
//! # Invariants
//! - Service APIs never bypass the backend's own existence checks.
//! - Service layer remains storage-agnostic: everything is expressed over
//!   the `Catalog` trait.
//! - When a review references both a movie and a user, the movie is
//!   checked first, so dual-missing references always report the movie.

use crate::model::movie::{Movie, MovieDraft, MovieId};
use crate::model::review::{Review, ReviewDraft, ReviewId};
use crate::model::user::{User, UserDraft, UserId};
use crate::repo::catalog::{Catalog, CatalogError, CatalogResult, EntityKind};

/// Use-case service wrapper over an interchangeable catalog backend.
pub struct CatalogService<C: Catalog> {
    catalog: C,
}

impl<C: Catalog> CatalogService<C> {
    /// Creates a service using the provided backend implementation.
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// Creates a new movie; the backend assigns its ID.
    pub fn create_movie(&mut self, draft: &MovieDraft) -> CatalogResult<Movie> {
        self.catalog.insert_movie(draft)
    }

    /// Gets one movie by ID, reviews included.
    pub fn get_movie(&self, id: MovieId) -> CatalogResult<Option<Movie>> {
        self.catalog.get_movie(id)
    }

    /// Lists all movies in insertion order.
    pub fn list_movies(&self) -> CatalogResult<Vec<Movie>> {
        self.catalog.list_movies()
    }

    /// Replaces every mutable movie field, preserving ID and reviews.
    pub fn update_movie(&mut self, id: MovieId, draft: &MovieDraft) -> CatalogResult<Movie> {
        self.catalog.replace_movie(id, draft)
    }

    /// Deletes a movie and cascades its reviews. Terminal: the ID is never
    /// handed out again.
    pub fn delete_movie(&mut self, id: MovieId) -> CatalogResult<Movie> {
        self.catalog.remove_movie(id)
    }

    /// Adds a review under the movie path, validating only the movie.
    pub fn add_review(&mut self, movie_id: MovieId, draft: &ReviewDraft) -> CatalogResult<Review> {
        self.catalog.insert_review(movie_id, draft)
    }

    /// Creates a review from an independent payload that references both a
    /// movie and a user.
    ///
    /// # Contract
    /// - Movie existence is checked first, then user existence; nothing is
    ///   written unless both hold.
    pub fn create_review(&mut self, movie_id: MovieId, draft: &ReviewDraft) -> CatalogResult<Review> {
        if self.catalog.get_movie(movie_id)?.is_none() {
            return Err(CatalogError::not_found(EntityKind::Movie, movie_id));
        }
        if self.catalog.get_user(draft.user_id)?.is_none() {
            return Err(CatalogError::not_found(EntityKind::User, draft.user_id));
        }
        self.catalog.insert_review(movie_id, draft)
    }

    /// Lists all reviews of one movie.
    pub fn get_reviews(&self, movie_id: MovieId) -> CatalogResult<Vec<Review>> {
        self.catalog.list_reviews(movie_id)
    }

    /// Gets one review scoped to its movie.
    pub fn get_review(
        &self,
        movie_id: MovieId,
        review_id: ReviewId,
    ) -> CatalogResult<Option<Review>> {
        self.catalog.get_review(movie_id, review_id)
    }

    /// Replaces the mutable fields of one review.
    pub fn update_review(
        &mut self,
        movie_id: MovieId,
        review_id: ReviewId,
        draft: &ReviewDraft,
    ) -> CatalogResult<Review> {
        self.catalog.replace_review(movie_id, review_id, draft)
    }

    /// Removes one review and returns the detached record.
    pub fn delete_review(&mut self, movie_id: MovieId, review_id: ReviewId) -> CatalogResult<Review> {
        self.catalog.remove_review(movie_id, review_id)
    }

    /// Creates a new user; the backend assigns its ID.
    pub fn create_user(&mut self, draft: &UserDraft) -> CatalogResult<User> {
        self.catalog.insert_user(draft)
    }

    /// Gets one user by ID.
    pub fn get_user(&self, id: UserId) -> CatalogResult<Option<User>> {
        self.catalog.get_user(id)
    }
}
