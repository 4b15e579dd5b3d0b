//! Domain records for the movie-review catalog.
//!
//! # Responsibility
//! - Define the canonical entity shapes shared by both catalog backends.
//! - Define the draft (create/replace payload) shapes accepted from callers.
//!
//! # Invariants
//! - Every entity is identified by a dense integer ID assigned by the
//!   owning catalog, never by the caller.
//! - A `Review` lives inside its parent `Movie`'s review map and has no
//!   standalone identity outside it.

pub mod movie;
pub mod review;
pub mod user;
