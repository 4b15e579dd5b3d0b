//! Movie aggregate root.
//!
//! # Responsibility
//! - Define the `Movie` record and its create/replace payload.
//! - Own the nested review collection on behalf of the catalog.
//!
//! # Invariants
//! - `id` is stable once assigned and never reused for another movie.
//! - `reviews` is exclusively owned: removing a movie removes every review
//!   stored under it, and no other structure holds review state.

use crate::model::review::{Review, ReviewId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stable identifier for a movie.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type MovieId = u64;

/// Fully populated movie record as stored and returned by a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Catalog-assigned stable ID.
    pub id: MovieId,
    /// Movie title.
    pub title: String,
    /// Studio that produced the movie.
    pub studio: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Release year.
    pub year: i32,
    /// Reviews owned by this movie, keyed by review ID.
    ///
    /// A `BTreeMap` keeps iteration in ID order, which equals insertion
    /// order because review IDs are strictly increasing.
    pub reviews: BTreeMap<ReviewId, Review>,
}

impl Movie {
    /// Builds a movie record from a draft and a freshly assigned ID.
    ///
    /// The review map starts empty; reviews are attached only through
    /// catalog review operations.
    pub fn from_draft(id: MovieId, draft: &MovieDraft) -> Self {
        Self {
            id,
            title: draft.title.clone(),
            studio: draft.studio.clone(),
            description: draft.description.clone(),
            year: draft.year,
            reviews: BTreeMap::new(),
        }
    }

    /// Overwrites every caller-mutable field from a draft.
    ///
    /// `id` and `reviews` are preserved untouched.
    pub fn apply_draft(&mut self, draft: &MovieDraft) {
        self.title = draft.title.clone();
        self.studio = draft.studio.clone();
        self.description = draft.description.clone();
        self.year = draft.year;
    }
}

/// Create/replace payload for a movie.
///
/// Field shape follows the upstream transport contract:
/// `{title, studio, description?, year}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDraft {
    pub title: String,
    pub studio: String,
    #[serde(default)]
    pub description: Option<String>,
    pub year: i32,
}
