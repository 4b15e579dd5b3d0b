//! Per-kind ID allocation for the in-memory catalog.
//!
//! # Responsibility
//! - Produce unique, monotonically increasing IDs per entity kind.
//!
//! # Invariants
//! - Counters only move forward; deleting an entity never resets or frees
//!   its ID, so external references can never collide with a later entity.
//! - The allocator is owned by its catalog, never shared process-wide.

use crate::repo::catalog::EntityKind;

/// Monotonic ID source with one counter per entity kind.
///
/// `next_id` is the single mutation entry point; the read-then-increment
/// is not atomic on its own, which is why the owning catalog serializes
/// all mutations through `&mut self`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    next_movie: u64,
    next_review: u64,
    next_user: u64,
}

impl IdAllocator {
    /// Creates an allocator with every counter at zero, matching the
    /// first-entity-gets-ID-0 convention of the upstream contract.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next ID for `kind` and advances that kind's counter.
    pub fn next_id(&mut self, kind: EntityKind) -> u64 {
        let counter = match kind {
            EntityKind::Movie => &mut self.next_movie,
            EntityKind::Review => &mut self.next_review,
            EntityKind::User => &mut self.next_user,
        };
        let id = *counter;
        *counter += 1;
        id
    }

    /// Returns the ID the next allocation for `kind` would produce,
    /// without advancing anything.
    pub fn peek(&self, kind: EntityKind) -> u64 {
        match kind {
            EntityKind::Movie => self.next_movie,
            EntityKind::Review => self.next_review,
            EntityKind::User => self.next_user,
        }
    }
}
