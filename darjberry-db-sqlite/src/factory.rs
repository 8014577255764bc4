use async_trait::async_trait;
use darjberry_core::db::{DbConfig, FarmRepository, RepositoryError, RepositoryFactory};
use tracing::debug;

use crate::repository::SqliteRepository;

/// Turn a `DbConfig` connection string into a sqlx URL.
///
/// * `:memory:` becomes `sqlite::memory:`.
/// * Anything already starting with `sqlite:` is used unchanged.
/// * A bare path is opened read-write and created when missing.
pub fn database_url(connection_string: &str) -> String {
    let trimmed = connection_string.trim();
    if trimmed == ":memory:" {
        "sqlite::memory:".to_string()
    } else if trimmed.starts_with("sqlite:") {
        trimmed.to_string()
    } else {
        format!("sqlite:{}?mode=rwc", trimmed)
    }
}

/// [`RepositoryFactory`] for SQLite.
///
/// ```rust,no_run
/// use darjberry_core::db::RepositoryRegistry;
/// use darjberry_db_sqlite::SqliteRepositoryFactory;
///
/// let mut registry = RepositoryRegistry::new();
/// registry.register(Box::new(SqliteRepositoryFactory));
/// ```
pub struct SqliteRepositoryFactory;

#[async_trait]
impl RepositoryFactory for SqliteRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Connects and runs migrations.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn FarmRepository>, RepositoryError> {
        let url = database_url(&config.connection_string);
        debug!(%url, "Opening SQLite database");

        let repo = SqliteRepository::new(&url)
            .await
            .map_err(|e| RepositoryError::Connection(format!("{e:#}")))?;
        repo.run_migrations()
            .await
            .map_err(|e| RepositoryError::Database(format!("{e:#}")))?;
        Ok(Box::new(repo))
    }
}
