use std::collections::HashMap;

use async_trait::async_trait;
use tracing::debug;

use super::repository::{FarmRepository, RepositoryError};

/// Backend-agnostic connection configuration.
///
/// `backend` must match the [`RepositoryFactory::backend_name`] of a
/// registered factory. `connection_string` is handed to that factory as-is.
///
/// | backend    | connection_string examples                      |
/// |------------|-------------------------------------------------|
/// | `sqlite`   | `darjberry.db`, `sqlite:farm.db?mode=rwc`, `:memory:` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"sqlite"`).
    pub backend: String,
    pub connection_string: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: ":memory:".to_string(),
        }
    }
}

/// One implementation per database backend, registered with a
/// [`RepositoryRegistry`] at startup.
#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Open (or create) a database and return a ready-to-use repository.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn FarmRepository>, RepositoryError>;
}

/// Registry of [`RepositoryFactory`] instances, keyed by backend name.
pub struct RepositoryRegistry {
    factories: HashMap<&'static str, Box<dyn RepositoryFactory>>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a backend factory, replacing any with the same name.
    pub fn register(
        &mut self,
        factory: Box<dyn RepositoryFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the factory that matches `config.backend`.
    ///
    /// # Errors
    /// * [`RepositoryError::Configuration`] when no factory is registered
    ///   under the requested name.
    /// * Any error the chosen factory returns.
    pub async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn FarmRepository>, RepositoryError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                RepositoryError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        debug!(backend = %config.backend, "Creating repository");
        factory.create(config).await
    }
}

impl Default for RepositoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::{DbConfig, FarmRepository, RepositoryError, RepositoryFactory, RepositoryRegistry};
    use crate::models::{InvestmentRecord, LocationCheck, NewInvestmentRecord, NewLocationCheck};

    // Never called; the registry tests only check routing.
    struct StubRepository;

    #[async_trait]
    impl FarmRepository for StubRepository {
        async fn create_investment(
            &self,
            _record: NewInvestmentRecord,
        ) -> Result<InvestmentRecord, RepositoryError> {
            unimplemented!()
        }
        async fn get_investment(
            &self,
            _id: i64,
        ) -> Result<InvestmentRecord, RepositoryError> {
            unimplemented!()
        }
        async fn update_investment(
            &self,
            _record: &InvestmentRecord,
        ) -> Result<(), RepositoryError> {
            unimplemented!()
        }
        async fn delete_investment(
            &self,
            _id: i64,
        ) -> Result<(), RepositoryError> {
            unimplemented!()
        }
        async fn list_investments(&self) -> Result<Vec<InvestmentRecord>, RepositoryError> {
            unimplemented!()
        }
        async fn create_location_check(
            &self,
            _check: NewLocationCheck,
        ) -> Result<LocationCheck, RepositoryError> {
            unimplemented!()
        }
        async fn list_location_checks(
            &self,
            _district: Option<&str>,
        ) -> Result<Vec<LocationCheck>, RepositoryError> {
            unimplemented!()
        }
    }

    /// Flips `called` when `create` runs.
    struct StubFactory {
        name: &'static str,
        called: Arc<AtomicBool>,
    }

    #[async_trait]
    impl RepositoryFactory for StubFactory {
        fn backend_name(&self) -> &'static str {
            self.name
        }
        async fn create(
            &self,
            _config: &DbConfig,
        ) -> Result<Box<dyn FarmRepository>, RepositoryError> {
            self.called.store(true, Ordering::SeqCst);
            Ok(Box::new(StubRepository))
        }
    }

    struct FailingFactory;

    #[async_trait]
    impl RepositoryFactory for FailingFactory {
        fn backend_name(&self) -> &'static str {
            "failing"
        }
        async fn create(
            &self,
            _config: &DbConfig,
        ) -> Result<Box<dyn FarmRepository>, RepositoryError> {
            Err(RepositoryError::Connection("intentional failure".to_string()))
        }
    }

    fn stub_factory(name: &'static str) -> (Box<dyn RepositoryFactory>, Arc<AtomicBool>) {
        let flag = Arc::new(AtomicBool::new(false));
        (
            Box::new(StubFactory {
                name,
                called: flag.clone(),
            }),
            flag,
        )
    }

    fn config(backend: &str) -> DbConfig {
        DbConfig {
            backend: backend.to_string(),
            connection_string: ":memory:".to_string(),
        }
    }

    // =========================================================================
    // DbConfig / registration
    // =========================================================================

    #[test]
    fn dbconfig_default_is_sqlite_memory() {
        let cfg = DbConfig::default();
        assert_eq!(cfg.backend, "sqlite");
        assert_eq!(cfg.connection_string, ":memory:");
    }

    #[test]
    fn default_registry_is_empty() {
        assert!(RepositoryRegistry::default().available_backends().is_empty());
    }

    #[test]
    fn available_backends_is_sorted() {
        let mut reg = RepositoryRegistry::new();
        let (f1, _) = stub_factory("sqlite");
        let (f2, _) = stub_factory("postgres");
        reg.register(f1);
        reg.register(f2);

        assert_eq!(reg.available_backends(), vec!["postgres", "sqlite"]);
    }

    #[test]
    fn duplicate_registration_replaces_previous() {
        let mut reg = RepositoryRegistry::new();
        let (old, _) = stub_factory("sqlite");
        let (new, _) = stub_factory("sqlite");
        reg.register(old);
        reg.register(new);

        assert_eq!(reg.available_backends(), vec!["sqlite"]);
    }

    // =========================================================================
    // dispatch
    // =========================================================================

    #[tokio::test]
    async fn create_calls_only_matching_factory() {
        let mut reg = RepositoryRegistry::new();
        let (sqlite, sqlite_called) = stub_factory("sqlite");
        let (postgres, postgres_called) = stub_factory("postgres");
        reg.register(sqlite);
        reg.register(postgres);

        let result = reg.create(&config("sqlite")).await;

        assert!(result.is_ok());
        assert!(sqlite_called.load(Ordering::SeqCst));
        assert!(!postgres_called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn unknown_backend_names_requested_and_available() {
        let mut reg = RepositoryRegistry::new();
        let (f, _) = stub_factory("sqlite");
        reg.register(f);

        match reg.create(&config("postgres")).await {
            Err(RepositoryError::Configuration(msg)) => {
                assert!(msg.contains("postgres"), "should name the requested backend");
                assert!(msg.contains("sqlite"), "should list available backends");
            }
            Err(other) => panic!("expected Configuration error, got {other:?}"),
            Ok(_) => panic!("expected Configuration error, got a repository"),
        }
    }

    #[tokio::test]
    async fn create_propagates_factory_error() {
        let mut reg = RepositoryRegistry::new();
        reg.register(Box::new(FailingFactory));

        assert!(matches!(
            reg.create(&config("failing")).await,
            Err(RepositoryError::Connection(msg)) if msg == "intentional failure"
        ));
    }
}
