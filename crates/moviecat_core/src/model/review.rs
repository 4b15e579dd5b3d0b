//! Review record, child entity of a movie.
//!
//! # Invariants
//! - A review exists only inside a parent movie's review map; its creation
//!   implies the movie existed at that moment.
//! - `id` comes from one store-wide counter, so review IDs never collide
//!   across movies and are never reused after removal.

use crate::model::user::UserId;
use serde::{Deserialize, Serialize};

/// Stable identifier for a review, unique across the whole store.
pub type ReviewId = u64;

/// Fully populated review record as stored under its parent movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Catalog-assigned stable ID from the store-wide review counter.
    pub id: ReviewId,
    /// Star rating. The transport layer bounds this to `[0.0, 5.0]`
    /// before it reaches the core; the core treats it as opaque.
    pub n_stars: f64,
    /// Review body text.
    pub text: String,
    /// Author reference.
    pub user_id: UserId,
}

impl Review {
    /// Builds a review record from a draft and a freshly assigned ID.
    pub fn from_draft(id: ReviewId, draft: &ReviewDraft) -> Self {
        Self {
            id,
            n_stars: draft.n_stars,
            text: draft.text.clone(),
            user_id: draft.user_id,
        }
    }

    /// Overwrites the mutable fields from a draft, keeping `id`.
    pub fn apply_draft(&mut self, draft: &ReviewDraft) {
        self.n_stars = draft.n_stars;
        self.text = draft.text.clone();
        self.user_id = draft.user_id;
    }
}

/// Create/replace payload for a review: `{n_stars, text, user_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewDraft {
    pub n_stars: f64,
    pub text: String,
    pub user_id: UserId,
}
