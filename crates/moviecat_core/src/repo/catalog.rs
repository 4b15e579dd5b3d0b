//! Canonical catalog contract shared by all backends.
//!
//! # Responsibility
//! - Define one CRUD interface for movies, their reviews, and users.
//! - Define the semantic error taxonomy callers observe.
//!
//! # Invariants
//! - Referential absence is the only failure the in-memory backend can
//!   produce; storage transport errors exist only for persistent backends.
//! - Mutating operations take `&mut self`: a backend instance is a single
//!   mutual-exclusion domain, so ID allocation and writes cannot race.

use crate::db::DbError;
use crate::model::movie::{Movie, MovieDraft, MovieId};
use crate::model::review::{Review, ReviewDraft, ReviewId};
use crate::model::user::{User, UserDraft, UserId};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Entity kinds the catalog manages; used for ID allocation and for
/// reporting which reference was absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Movie,
    Review,
    User,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Movie => "movie",
            Self::Review => "review",
            Self::User => "user",
        };
        write!(f, "{name}")
    }
}

/// Semantic error taxonomy for catalog operations.
#[derive(Debug)]
pub enum CatalogError {
    /// A referenced entity does not exist. Field validation never surfaces
    /// here; only referential absence does.
    NotFound { kind: EntityKind, id: u64 },
    /// Underlying storage failure (persistent backend only).
    Db(DbError),
    /// The connection has not been migrated to the schema this binary
    /// expects (persistent backend only).
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// A required table is absent despite a matching schema version
    /// (persistent backend only).
    MissingRequiredTable(&'static str),
    /// A required column is absent despite a matching schema version
    /// (persistent backend only).
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted state failed to parse back into a domain record
    /// (persistent backend only).
    InvalidData(String),
}

impl CatalogError {
    /// Shorthand for the common not-found construction.
    pub fn not_found(kind: EntityKind, id: u64) -> Self {
        Self::NotFound { kind, id }
    }
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
            Self::InvalidData(message) => {
                write!(f, "invalid persisted catalog data: {message}")
            }
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for CatalogError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for CatalogError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// One canonical CRUD interface for the movie-review catalog.
///
/// Both backends (in-memory, SQLite) satisfy this contract and are meant
/// to be interchangeable behind it. Review operations are scoped to the
/// owning movie and validate it first; `get_*` reads report plain absence
/// of the target entity as `Ok(None)` while mutations report it as
/// `NotFound`.
pub trait Catalog {
    /// Creates a movie with a fresh ID and an empty review map.
    fn insert_movie(&mut self, draft: &MovieDraft) -> CatalogResult<Movie>;
    /// Gets one movie by ID, reviews included.
    fn get_movie(&self, id: MovieId) -> CatalogResult<Option<Movie>>;
    /// Lists all movies in insertion order.
    fn list_movies(&self) -> CatalogResult<Vec<Movie>>;
    /// Overwrites every field except `id` and `reviews`.
    fn replace_movie(&mut self, id: MovieId, draft: &MovieDraft) -> CatalogResult<Movie>;
    /// Removes a movie and, by cascade, every review it owns.
    /// Returns the removed record.
    fn remove_movie(&mut self, id: MovieId) -> CatalogResult<Movie>;

    /// Creates a review under an existing movie. The parent is validated
    /// before the review ID counter advances.
    fn insert_review(&mut self, movie_id: MovieId, draft: &ReviewDraft) -> CatalogResult<Review>;
    /// Lists all reviews of one movie in insertion order.
    fn list_reviews(&self, movie_id: MovieId) -> CatalogResult<Vec<Review>>;
    /// Gets one review under one movie. A missing movie is `NotFound`; a
    /// missing review under an existing movie is `Ok(None)`.
    fn get_review(&self, movie_id: MovieId, review_id: ReviewId) -> CatalogResult<Option<Review>>;
    /// Overwrites the mutable review fields, keeping its ID and parent.
    fn replace_review(
        &mut self,
        movie_id: MovieId,
        review_id: ReviewId,
        draft: &ReviewDraft,
    ) -> CatalogResult<Review>;
    /// Detaches one review from its movie and returns it.
    fn remove_review(&mut self, movie_id: MovieId, review_id: ReviewId) -> CatalogResult<Review>;

    /// Creates a user with a fresh ID.
    fn insert_user(&mut self, draft: &UserDraft) -> CatalogResult<User>;
    /// Gets one user by ID.
    fn get_user(&self, id: UserId) -> CatalogResult<Option<User>>;
}
