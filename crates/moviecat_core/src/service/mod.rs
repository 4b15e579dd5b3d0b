//! Catalog use-case services.
//!
//! # Responsibility
//! - Orchestrate catalog calls into use-case level APIs.
//! - Keep transport layers decoupled from storage details.

pub mod catalog_service;
