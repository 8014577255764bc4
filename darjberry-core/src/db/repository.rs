use async_trait::async_trait;
use thiserror::Error;

use crate::models::{InvestmentRecord, LocationCheck, NewInvestmentRecord, NewLocationCheck};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

#[async_trait]
pub trait FarmRepository: Send + Sync {
    // Saved investment calculations
    async fn create_investment(
        &self,
        record: NewInvestmentRecord,
    ) -> Result<InvestmentRecord, RepositoryError>;

    async fn get_investment(
        &self,
        id: i64,
    ) -> Result<InvestmentRecord, RepositoryError>;

    async fn update_investment(
        &self,
        record: &InvestmentRecord,
    ) -> Result<(), RepositoryError>;

    async fn delete_investment(
        &self,
        id: i64,
    ) -> Result<(), RepositoryError>;

    /// Newest first.
    async fn list_investments(&self) -> Result<Vec<InvestmentRecord>, RepositoryError>;

    // Location checks
    async fn create_location_check(
        &self,
        check: NewLocationCheck,
    ) -> Result<LocationCheck, RepositoryError>;

    /// Newest first, optionally limited to one district (case-insensitive).
    async fn list_location_checks(
        &self,
        district: Option<&str>,
    ) -> Result<Vec<LocationCheck>, RepositoryError>;
}
