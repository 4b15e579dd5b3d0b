//! Core domain logic for the movie-review catalog.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::movie::{Movie, MovieDraft, MovieId};
pub use model::review::{Review, ReviewDraft, ReviewId};
pub use model::user::{User, UserDraft, UserId};
pub use repo::catalog::{Catalog, CatalogError, CatalogResult, EntityKind};
pub use repo::id_alloc::IdAllocator;
pub use repo::memory_catalog::MemoryCatalog;
pub use repo::sqlite_catalog::SqliteCatalog;
pub use service::catalog_service::CatalogService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
