//! Application state - shared across all handlers.

use std::sync::Arc;

use blogicum_core::domain::{NewCategory, NewLocation};
use blogicum_core::ports::{
    CategoryRepository, CommentRepository, LocationRepository, PasswordService, PostRepository,
    TokenService, UserRepository,
};
use blogicum_infra::{Argon2PasswordService, InMemoryBlog, JwtConfig, JwtTokenService};

#[cfg(feature = "postgres")]
use blogicum_infra::DatabaseConnections;
#[cfg(feature = "postgres")]
use blogicum_infra::database::{
    PostgresCategoryRepository, PostgresCommentRepository, PostgresLocationRepository,
    PostgresPostRepository, PostgresUserRepository,
};

use crate::config::{AppConfig, SeedConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub locations: Arc<dyn LocationRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    /// Which backend the repositories talk to, reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        {
            if let Some(db_config) = &config.database {
                match DatabaseConnections::init(db_config).await {
                    Ok(connections) => {
                        tracing::info!("Application state initialized (postgres)");
                        return Self::postgres(&connections, config.jwt.clone());
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!(
                    "DATABASE_URL not set. Running without database (in-memory mode)."
                );
            }
        }

        #[cfg(not(feature = "postgres"))]
        tracing::info!("Running without postgres feature - using in-memory repositories");

        tracing::info!("Application state initialized (memory)");
        let state = Self::in_memory(config.jwt.clone());
        state.seed(&config.seed).await;
        state
    }

    /// Create the configured categories and locations.
    ///
    /// Categories whose slug already exists are skipped. Returns how many
    /// records were created.
    pub async fn seed(&self, seed: &SeedConfig) -> usize {
        let mut created = 0;

        for (slug, title) in &seed.categories {
            match self.categories.find_by_slug(slug).await {
                Ok(Some(_)) => continue,
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(%slug, "Skipping seed category: {}", e);
                    continue;
                }
            }
            match self
                .categories
                .create(NewCategory::new(title.clone(), slug.clone()))
                .await
            {
                Ok(_) => created += 1,
                Err(e) => tracing::warn!(%slug, "Skipping seed category: {}", e),
            }
        }

        for name in &seed.locations {
            match self.locations.create(NewLocation::new(name.clone())).await {
                Ok(_) => created += 1,
                Err(e) => tracing::warn!(%name, "Skipping seed location: {}", e),
            }
        }

        if created > 0 {
            tracing::info!(created, "Seeded categories and locations");
        }
        created
    }

    /// State backed by a fresh [`InMemoryBlog`].
    pub fn in_memory(jwt: JwtConfig) -> Self {
        let store = Arc::new(InMemoryBlog::new());

        Self {
            users: store.clone(),
            categories: store.clone(),
            locations: store.clone(),
            posts: store.clone(),
            comments: store,
            tokens: Arc::new(JwtTokenService::new(jwt)),
            passwords: Arc::new(Argon2PasswordService::new()),
            storage: "memory",
        }
    }

    #[cfg(feature = "postgres")]
    fn postgres(connections: &DatabaseConnections, jwt: JwtConfig) -> Self {
        let db = &connections.main;

        Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            categories: Arc::new(PostgresCategoryRepository::new(db.clone())),
            locations: Arc::new(PostgresLocationRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db.clone())),
            tokens: Arc::new(JwtTokenService::new(jwt)),
            passwords: Arc::new(Argon2PasswordService::new()),
            storage: "postgres",
        }
    }
}
