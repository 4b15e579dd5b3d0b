//! Catalog contract and its interchangeable backends.
//!
//! # Responsibility
//! - Define the use-case oriented data access contract (`Catalog`).
//! - Provide the in-memory and SQLite implementations of that contract.
//!
//! # Invariants
//! - Review operations validate the owning movie before any review-level
//!   check and before any ID allocation.
//! - Failed operations leave backend state exactly as it was.

pub mod catalog;
pub mod id_alloc;
pub mod memory_catalog;
pub mod sqlite_catalog;
