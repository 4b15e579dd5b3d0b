//! SQLite-backed catalog implementation.
//!
//! # Responsibility
//! - Satisfy the `Catalog` contract over the relational schema.
//! - Keep SQL details inside this persistence boundary.
//!
//! # Invariants
//! - Primary keys use AUTOINCREMENT, so IDs stay monotonic and are never
//!   reused after deletes, matching the in-memory allocator contract.
//! - Review cascade is delegated to `ON DELETE CASCADE`; connections must
//!   come from `db::open_db*` so `foreign_keys=ON` holds.
//! - Each operation is a single statement batch; SQLite's per-statement
//!   atomicity stands in for explicit transactions.

use crate::db::migrations::latest_version;
use crate::model::movie::{Movie, MovieDraft, MovieId};
use crate::model::review::{Review, ReviewDraft, ReviewId};
use crate::model::user::{User, UserDraft, UserId};
use crate::repo::catalog::{Catalog, CatalogError, CatalogResult, EntityKind};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::BTreeMap;

const MOVIE_SELECT_SQL: &str = "SELECT movie_id, title, studio, description, year FROM movies";
const REVIEW_SELECT_SQL: &str =
    "SELECT review_id, movie_id, user_id, n_stars, review FROM movie_reviews";

/// Tables and columns the catalog requires. Checked at construction so a
/// stale or foreign database fails fast instead of mid-operation.
const REQUIRED_SCHEMA: &[(&str, &[&str])] = &[
    ("users", &["user_id", "username", "fullname", "password"]),
    (
        "movies",
        &["movie_id", "title", "studio", "description", "year"],
    ),
    (
        "movie_reviews",
        &["review_id", "movie_id", "user_id", "n_stars", "review"],
    ),
];

/// SQLite-backed catalog.
pub struct SqliteCatalog<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCatalog<'conn> {
    /// Constructs a catalog from a migrated/ready connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` does not
    ///   match the schema version this binary expects.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema
    ///   version matches but the layout does not.
    pub fn try_new(conn: &'conn Connection) -> CatalogResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    fn ensure_movie_exists(&self, movie_id: MovieId) -> CatalogResult<()> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM movies WHERE movie_id = ?1;",
                params![movie_id],
                |row| row.get(0),
            )
            .optional()?;
        match found {
            Some(_) => Ok(()),
            None => Err(CatalogError::not_found(EntityKind::Movie, movie_id)),
        }
    }

    fn reviews_for(&self, movie_id: MovieId) -> CatalogResult<BTreeMap<ReviewId, Review>> {
        let mut stmt = self.conn.prepare(&format!(
            "{REVIEW_SELECT_SQL} WHERE movie_id = ?1 ORDER BY review_id ASC;"
        ))?;
        let mut rows = stmt.query(params![movie_id])?;
        let mut reviews = BTreeMap::new();

        while let Some(row) = rows.next()? {
            let review = parse_review_row(row)?;
            reviews.insert(review.id, review);
        }

        Ok(reviews)
    }

    fn movie_with_reviews(&self, id: MovieId) -> CatalogResult<Option<Movie>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MOVIE_SELECT_SQL} WHERE movie_id = ?1;"))?;
        let mut rows = stmt.query(params![id])?;

        let Some(row) = rows.next()? else {
            return Ok(None);
        };
        let mut movie = parse_movie_row(row)?;
        movie.reviews = self.reviews_for(id)?;
        Ok(Some(movie))
    }
}

impl Catalog for SqliteCatalog<'_> {
    fn insert_movie(&mut self, draft: &MovieDraft) -> CatalogResult<Movie> {
        self.conn.execute(
            "INSERT INTO movies (title, studio, description, year)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                draft.title.as_str(),
                draft.studio.as_str(),
                draft.description.as_deref(),
                draft.year,
            ],
        )?;

        let id = row_id(self.conn.last_insert_rowid(), "movies.movie_id")?;
        Ok(Movie::from_draft(id, draft))
    }

    fn get_movie(&self, id: MovieId) -> CatalogResult<Option<Movie>> {
        self.movie_with_reviews(id)
    }

    fn list_movies(&self) -> CatalogResult<Vec<Movie>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MOVIE_SELECT_SQL} ORDER BY movie_id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut movies = Vec::new();

        while let Some(row) = rows.next()? {
            movies.push(parse_movie_row(row)?);
        }
        for movie in &mut movies {
            movie.reviews = self.reviews_for(movie.id)?;
        }

        Ok(movies)
    }

    fn replace_movie(&mut self, id: MovieId, draft: &MovieDraft) -> CatalogResult<Movie> {
        let changed = self.conn.execute(
            "UPDATE movies
             SET title = ?2, studio = ?3, description = ?4, year = ?5
             WHERE movie_id = ?1;",
            params![
                id,
                draft.title.as_str(),
                draft.studio.as_str(),
                draft.description.as_deref(),
                draft.year,
            ],
        )?;
        if changed == 0 {
            return Err(CatalogError::not_found(EntityKind::Movie, id));
        }

        self.movie_with_reviews(id)?.ok_or_else(|| {
            CatalogError::InvalidData(format!("movie {id} vanished during replace"))
        })
    }

    fn remove_movie(&mut self, id: MovieId) -> CatalogResult<Movie> {
        let movie = self
            .movie_with_reviews(id)?
            .ok_or(CatalogError::not_found(EntityKind::Movie, id))?;

        // Cascade drops the movie's reviews with it.
        self.conn
            .execute("DELETE FROM movies WHERE movie_id = ?1;", params![id])?;
        Ok(movie)
    }

    fn insert_review(&mut self, movie_id: MovieId, draft: &ReviewDraft) -> CatalogResult<Review> {
        self.ensure_movie_exists(movie_id)?;

        self.conn.execute(
            "INSERT INTO movie_reviews (movie_id, user_id, n_stars, review)
             VALUES (?1, ?2, ?3, ?4);",
            params![movie_id, draft.user_id, draft.n_stars, draft.text.as_str()],
        )?;

        let id = row_id(self.conn.last_insert_rowid(), "movie_reviews.review_id")?;
        Ok(Review::from_draft(id, draft))
    }

    fn list_reviews(&self, movie_id: MovieId) -> CatalogResult<Vec<Review>> {
        self.ensure_movie_exists(movie_id)?;
        Ok(self.reviews_for(movie_id)?.into_values().collect())
    }

    fn get_review(&self, movie_id: MovieId, review_id: ReviewId) -> CatalogResult<Option<Review>> {
        self.ensure_movie_exists(movie_id)?;

        let mut stmt = self.conn.prepare(&format!(
            "{REVIEW_SELECT_SQL} WHERE movie_id = ?1 AND review_id = ?2;"
        ))?;
        let mut rows = stmt.query(params![movie_id, review_id])?;

        match rows.next()? {
            Some(row) => Ok(Some(parse_review_row(row)?)),
            None => Ok(None),
        }
    }

    fn replace_review(
        &mut self,
        movie_id: MovieId,
        review_id: ReviewId,
        draft: &ReviewDraft,
    ) -> CatalogResult<Review> {
        self.ensure_movie_exists(movie_id)?;

        let changed = self.conn.execute(
            "UPDATE movie_reviews
             SET user_id = ?3, n_stars = ?4, review = ?5
             WHERE movie_id = ?1 AND review_id = ?2;",
            params![
                movie_id,
                review_id,
                draft.user_id,
                draft.n_stars,
                draft.text.as_str(),
            ],
        )?;
        if changed == 0 {
            return Err(CatalogError::not_found(EntityKind::Review, review_id));
        }

        Ok(Review::from_draft(review_id, draft))
    }

    fn remove_review(&mut self, movie_id: MovieId, review_id: ReviewId) -> CatalogResult<Review> {
        let review = self
            .get_review(movie_id, review_id)?
            .ok_or(CatalogError::not_found(EntityKind::Review, review_id))?;

        self.conn.execute(
            "DELETE FROM movie_reviews WHERE movie_id = ?1 AND review_id = ?2;",
            params![movie_id, review_id],
        )?;
        Ok(review)
    }

    fn insert_user(&mut self, draft: &UserDraft) -> CatalogResult<User> {
        self.conn.execute(
            "INSERT INTO users (username, fullname, password) VALUES (?1, ?2, ?3);",
            params![
                draft.username.as_str(),
                draft.fullname.as_deref(),
                draft.password.as_str(),
            ],
        )?;

        let id = row_id(self.conn.last_insert_rowid(), "users.user_id")?;
        Ok(User::from_draft(id, draft))
    }

    fn get_user(&self, id: UserId) -> CatalogResult<Option<User>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id, username, fullname, password FROM users WHERE user_id = ?1;",
        )?;
        let mut rows = stmt.query(params![id])?;

        match rows.next()? {
            Some(row) => Ok(Some(parse_user_row(row)?)),
            None => Ok(None),
        }
    }
}

fn ensure_connection_ready(conn: &Connection) -> CatalogResult<()> {
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected_version = latest_version();
    if actual_version != expected_version {
        return Err(CatalogError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &(table, columns) in REQUIRED_SCHEMA {
        if !table_exists(conn, table)? {
            return Err(CatalogError::MissingRequiredTable(table));
        }

        let existing = table_columns(conn, table)?;
        for &column in columns {
            if !existing.iter().any(|name| name == column) {
                return Err(CatalogError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> CatalogResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1;",
        params![table],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn table_columns(conn: &Connection, table: &str) -> CatalogResult<Vec<String>> {
    // PRAGMA arguments cannot be bound; `table` only ever comes from the
    // static REQUIRED_SCHEMA list.
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();

    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>("name")?);
    }

    Ok(columns)
}

fn parse_movie_row(row: &Row<'_>) -> CatalogResult<Movie> {
    Ok(Movie {
        id: row_id(row.get("movie_id")?, "movies.movie_id")?,
        title: row.get("title")?,
        studio: row.get("studio")?,
        description: row.get("description")?,
        year: row.get("year")?,
        reviews: BTreeMap::new(),
    })
}

fn parse_review_row(row: &Row<'_>) -> CatalogResult<Review> {
    Ok(Review {
        id: row_id(row.get("review_id")?, "movie_reviews.review_id")?,
        n_stars: row.get("n_stars")?,
        text: row.get("review")?,
        user_id: row_id(row.get("user_id")?, "movie_reviews.user_id")?,
    })
}

fn parse_user_row(row: &Row<'_>) -> CatalogResult<User> {
    Ok(User {
        id: row_id(row.get("user_id")?, "users.user_id")?,
        username: row.get("username")?,
        fullname: row.get("fullname")?,
        password: row.get("password")?,
    })
}

fn row_id(value: i64, source: &str) -> CatalogResult<u64> {
    u64::try_from(value)
        .map_err(|_| CatalogError::InvalidData(format!("negative id value `{value}` in {source}")))
}
