use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use darjberry_core::{
    FarmRepository, InvestmentRecord, LocationCheck, NewInvestmentRecord, NewLocationCheck,
    RepositoryError, Suitability,
};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use tracing::info;

use crate::decimal::{decimal_to_text, get_decimal};

const INVESTMENT_COLUMNS: &str = "id, investor_name, notes, acres, price_per_kg, plants,
    setup_cost, total_cost, net_profit, payback_period, irr, created_at, updated_at";

const LOCATION_CHECK_COLUMNS: &str = "id, latitude, longitude, district, suitability,
    climate_score, suitability_score, created_at";

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    pub fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn db_err(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(e.to_string())
}

fn get_score(
    row: &SqliteRow,
    column: &str,
) -> Result<u8, RepositoryError> {
    let raw: i64 = row.try_get(column).map_err(db_err)?;
    u8::try_from(raw).map_err(|_| {
        RepositoryError::Database(format!("Score {} in '{}' is out of range", raw, column))
    })
}

fn row_to_investment(row: &SqliteRow) -> Result<InvestmentRecord, RepositoryError> {
    Ok(InvestmentRecord {
        id: row.try_get("id").map_err(db_err)?,
        investor_name: row.try_get("investor_name").map_err(db_err)?,
        notes: row.try_get("notes").map_err(db_err)?,
        acres: get_decimal(row, "acres")?,
        price_per_kg: get_decimal(row, "price_per_kg")?,
        plants: row.try_get("plants").map_err(db_err)?,
        setup_cost: get_decimal(row, "setup_cost")?,
        total_cost: get_decimal(row, "total_cost")?,
        net_profit: get_decimal(row, "net_profit")?,
        payback_period: get_decimal(row, "payback_period")?,
        irr: get_decimal(row, "irr")?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get created_at: {}", e)))?,
        updated_at: row
            .try_get::<DateTime<Utc>, _>("updated_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get updated_at: {}", e)))?,
    })
}

fn row_to_location_check(row: &SqliteRow) -> Result<LocationCheck, RepositoryError> {
    let suitability: String = row.try_get("suitability").map_err(db_err)?;

    Ok(LocationCheck {
        id: row.try_get("id").map_err(db_err)?,
        latitude: row.try_get("latitude").map_err(db_err)?,
        longitude: row.try_get("longitude").map_err(db_err)?,
        district: row.try_get("district").map_err(db_err)?,
        suitability: Suitability::parse(&suitability).ok_or_else(|| {
            RepositoryError::Database(format!("Unknown suitability '{}'", suitability))
        })?,
        climate_score: get_score(row, "climate_score")?,
        suitability_score: get_score(row, "suitability_score")?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get created_at: {}", e)))?,
    })
}

impl SqliteRepository {
    async fn get_location_check(
        &self,
        id: i64,
    ) -> Result<LocationCheck, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {LOCATION_CHECK_COLUMNS} FROM location_check WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?
        .ok_or(RepositoryError::NotFound)?;

        row_to_location_check(&row)
    }
}

#[async_trait]
impl FarmRepository for SqliteRepository {
    async fn create_investment(
        &self,
        record: NewInvestmentRecord,
    ) -> Result<InvestmentRecord, RepositoryError> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO investment (
                investor_name, notes, acres, price_per_kg, plants,
                setup_cost, total_cost, net_profit, payback_period, irr,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&record.investor_name)
        .bind(&record.notes)
        .bind(decimal_to_text(record.acres))
        .bind(decimal_to_text(record.price_per_kg))
        .bind(record.plants)
        .bind(decimal_to_text(record.setup_cost))
        .bind(decimal_to_text(record.total_cost))
        .bind(decimal_to_text(record.net_profit))
        .bind(decimal_to_text(record.payback_period))
        .bind(decimal_to_text(record.irr))
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        let id = result.last_insert_rowid();
        info!(id, acres = %record.acres, "Saved investment calculation");
        self.get_investment(id).await
    }

    async fn get_investment(
        &self,
        id: i64,
    ) -> Result<InvestmentRecord, RepositoryError> {
        let row = sqlx::query(&format!("SELECT {INVESTMENT_COLUMNS} FROM investment WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?
            .ok_or(RepositoryError::NotFound)?;

        row_to_investment(&row)
    }

    async fn update_investment(
        &self,
        record: &InvestmentRecord,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE investment SET
                investor_name = ?, notes = ?, acres = ?, price_per_kg = ?, plants = ?,
                setup_cost = ?, total_cost = ?, net_profit = ?, payback_period = ?, irr = ?,
                updated_at = ?
             WHERE id = ?",
        )
        .bind(&record.investor_name)
        .bind(&record.notes)
        .bind(decimal_to_text(record.acres))
        .bind(decimal_to_text(record.price_per_kg))
        .bind(record.plants)
        .bind(decimal_to_text(record.setup_cost))
        .bind(decimal_to_text(record.total_cost))
        .bind(decimal_to_text(record.net_profit))
        .bind(decimal_to_text(record.payback_period))
        .bind(decimal_to_text(record.irr))
        .bind(Utc::now())
        .bind(record.id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete_investment(
        &self,
        id: i64,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM investment WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!(id, "Deleted investment calculation");
        Ok(())
    }

    async fn list_investments(&self) -> Result<Vec<InvestmentRecord>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {INVESTMENT_COLUMNS} FROM investment ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(row_to_investment).collect()
    }

    async fn create_location_check(
        &self,
        check: NewLocationCheck,
    ) -> Result<LocationCheck, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO location_check (
                latitude, longitude, district, suitability,
                climate_score, suitability_score, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(check.latitude)
        .bind(check.longitude)
        .bind(&check.district)
        .bind(check.suitability.as_str())
        .bind(i64::from(check.climate_score))
        .bind(i64::from(check.suitability_score))
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        let id = result.last_insert_rowid();
        info!(id, district = %check.district, "Saved location check");
        self.get_location_check(id).await
    }

    async fn list_location_checks(
        &self,
        district: Option<&str>,
    ) -> Result<Vec<LocationCheck>, RepositoryError> {
        let rows = match district {
            Some(district) => {
                sqlx::query(&format!(
                    "SELECT {LOCATION_CHECK_COLUMNS} FROM location_check
                     WHERE district = ? COLLATE NOCASE
                     ORDER BY created_at DESC, id DESC"
                ))
                .bind(district)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(&format!(
                    "SELECT {LOCATION_CHECK_COLUMNS} FROM location_check
                     ORDER BY created_at DESC, id DESC"
                ))
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(db_err)?;

        rows.iter().map(row_to_location_check).collect()
    }
}

#[cfg(test)]
mod tests {
    use darjberry_core::calculations::calculate;
    use darjberry_core::location::analyze;
    use darjberry_core::Coordinates;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn setup_test_db() -> SqliteRepository {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");

        let repo = SqliteRepository::new_with_pool(pool);
        repo.run_migrations().await.expect("Failed to run migrations");
        repo
    }

    fn one_acre_record() -> NewInvestmentRecord {
        NewInvestmentRecord::from_calculation(
            &calculate(dec!(1), None),
            Some("Asha Tamang".to_string()),
            None,
        )
    }

    fn check_at(
        latitude: f64,
        longitude: f64,
    ) -> NewLocationCheck {
        NewLocationCheck::from_analysis(
            Coordinates::new(latitude, longitude),
            &analyze(latitude, longitude),
        )
    }

    // =========================================================================
    // investments
    // =========================================================================

    #[tokio::test]
    async fn test_create_and_get_investment() {
        let repo = setup_test_db().await;

        let created = repo
            .create_investment(one_acre_record())
            .await
            .expect("Should create investment");

        assert!(created.id > 0);
        assert_eq!(created.investor_name.as_deref(), Some("Asha Tamang"));
        assert_eq!(created.notes, None);
        assert_eq!(created.plants, 2200);
        assert_eq!(created.setup_cost, dec!(6050000));
        assert_eq!(created.payback_period, dec!(3.61));
        assert_eq!(created.irr, dec!(60));

        let fetched = repo.get_investment(created.id).await.expect("Should fetch investment");
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_fractional_acres_are_stored_exactly() {
        let repo = setup_test_db().await;
        let record = NewInvestmentRecord::from_calculation(&calculate(dec!(0.004), None), None, None);

        let created = repo.create_investment(record).await.expect("Should create investment");

        assert_eq!(created.acres, dec!(0.004));
        assert_eq!(created.plants, 9);
        assert_eq!(created.payback_period, dec!(21));
    }

    #[tokio::test]
    async fn test_get_investment_not_found() {
        let repo = setup_test_db().await;

        assert_eq!(repo.get_investment(99999).await, Err(RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_update_investment() {
        let repo = setup_test_db().await;
        let mut created = repo
            .create_investment(one_acre_record())
            .await
            .expect("Should create investment");

        created.notes = Some("revisit after soil test".to_string());
        created.price_per_kg = dec!(900);
        repo.update_investment(&created).await.expect("Should update investment");

        let fetched = repo.get_investment(created.id).await.expect("Should fetch investment");
        assert_eq!(fetched.notes.as_deref(), Some("revisit after soil test"));
        assert_eq!(fetched.price_per_kg, dec!(900));
        assert!(fetched.updated_at >= created.created_at);
    }

    #[tokio::test]
    async fn test_update_investment_not_found() {
        let repo = setup_test_db().await;
        let mut created = repo
            .create_investment(one_acre_record())
            .await
            .expect("Should create investment");
        created.id = 99999;

        assert_eq!(repo.update_investment(&created).await, Err(RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_investment() {
        let repo = setup_test_db().await;
        let created = repo
            .create_investment(one_acre_record())
            .await
            .expect("Should create investment");

        repo.delete_investment(created.id).await.expect("Should delete investment");

        assert_eq!(repo.get_investment(created.id).await, Err(RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_investment_not_found() {
        let repo = setup_test_db().await;

        assert_eq!(repo.delete_investment(99999).await, Err(RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_list_investments_newest_first() {
        let repo = setup_test_db().await;
        let first = repo.create_investment(one_acre_record()).await.expect("create");
        let second = repo.create_investment(one_acre_record()).await.expect("create");

        let all = repo.list_investments().await.expect("Should list investments");

        let ids: Vec<i64> = all.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_list_investments_empty() {
        let repo = setup_test_db().await;

        assert!(repo.list_investments().await.expect("list").is_empty());
    }

    // =========================================================================
    // location checks
    // =========================================================================

    #[tokio::test]
    async fn test_create_location_check() {
        let repo = setup_test_db().await;

        let created = repo
            .create_location_check(check_at(27.036, 88.2627))
            .await
            .expect("Should create location check");

        assert!(created.id > 0);
        assert_eq!(created.district, "Darjeeling");
        assert_eq!(created.suitability, Suitability::Excellent);
        assert_eq!(created.climate_score, 95);
        assert_eq!(created.suitability_score, 95);
        assert_eq!(created.latitude, 27.036);
    }

    #[tokio::test]
    async fn test_list_location_checks_by_district() {
        let repo = setup_test_db().await;
        repo.create_location_check(check_at(27.036, 88.2627)).await.expect("create");
        repo.create_location_check(check_at(26.71, 88.43)).await.expect("create");
        repo.create_location_check(check_at(27.10, 88.30)).await.expect("create");

        let all = repo.list_location_checks(None).await.expect("list all");
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].latitude, 27.10);

        let darjeeling = repo
            .list_location_checks(Some("darjeeling"))
            .await
            .expect("list darjeeling");
        assert_eq!(darjeeling.len(), 2);
        assert!(darjeeling.iter().all(|c| c.district == "Darjeeling"));

        let none = repo.list_location_checks(Some("Mirik")).await.expect("list mirik");
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_suitability_in_row_is_an_error() {
        let repo = setup_test_db().await;
        sqlx::query("PRAGMA ignore_check_constraints = ON")
            .execute(repo.pool())
            .await
            .expect("pragma");
        sqlx::query(
            "INSERT INTO location_check (latitude, longitude, district, suitability,
                climate_score, suitability_score, created_at)
             VALUES (1.0, 2.0, 'X', 'GREAT', 10, 10, '2025-01-01T00:00:00Z')",
        )
        .execute(repo.pool())
        .await
        .expect("insert");

        assert!(matches!(
            repo.list_location_checks(None).await,
            Err(RepositoryError::Database(msg)) if msg.contains("GREAT")
        ));
    }
}
