//! # Blogicum Infrastructure
//!
//! Concrete implementations of the ports defined in `blogicum-core`:
//! PostgreSQL repositories, an in-memory store and JWT + Argon2 auth.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL database support via SeaORM
//! - `minimal` - No external database, in-memory only

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{DatabaseConfig, InMemoryBlog};

#[cfg(feature = "postgres")]
pub use database::DatabaseConnections;
