//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{
    CategoryRepository, Clock, CommentRepository, PostRepository, UserRepository,
};
use quill_infra::clock::SystemClock;
use quill_infra::database::{
    DatabaseConfig, DatabaseConnections, InMemoryCategoryRepository, InMemoryCommentRepository,
    InMemoryDb, InMemoryPostRepository, InMemoryUserRepository, PostgresCategoryRepository,
    PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        if let Some(config) = db_config {
            match DatabaseConnections::init(config).await {
                Ok(connections) => {
                    let db = connections.main;
                    tracing::info!("Application state initialized (postgres)");
                    return Self {
                        users: Arc::new(PostgresUserRepository::new(db.clone())),
                        categories: Arc::new(PostgresCategoryRepository::new(db.clone())),
                        posts: Arc::new(PostgresPostRepository::new(db.clone())),
                        comments: Arc::new(PostgresCommentRepository::new(db)),
                        clock,
                    };
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }

        tracing::info!("Application state initialized (in-memory)");
        Self::in_memory(InMemoryDb::new(), clock)
    }

    /// Wire every repository to the shared in-memory store. Used as the
    /// no-database fallback and by the endpoint tests.
    pub fn in_memory(db: Arc<InMemoryDb>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new(db.clone())),
            categories: Arc::new(InMemoryCategoryRepository::new(db.clone())),
            posts: Arc::new(InMemoryPostRepository::new(db.clone())),
            comments: Arc::new(InMemoryCommentRepository::new(db)),
            clock,
        }
    }
}
