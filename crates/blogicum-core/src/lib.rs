//! # Blogicum Core
//!
//! The domain layer of the Blogicum blog.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! entities, the visibility filter, the ownership rule, pagination and form cleaning.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, FieldErrors, RepoError};
