use anyhow::{Context, Result};
use darjberry_core::calculations::{
    InvestmentCalculator, InvestmentConfig, LoanEligibility, ScaleRecommendation, SubsidyBenefit,
    TeaEstateComparison, calculate_loan_eligibility, calculate_subsidy_benefit,
    compare_with_tea_estate, get_scale_recommendation,
};
use darjberry_core::db::RepositoryRegistry;
use darjberry_core::location::{GeospatialService, LocationAnalyzer};
use darjberry_core::{
    Coordinates, FarmRepository, InvestmentCalculation, LocationAnalysis, NewInvestmentRecord,
    NewLocationCheck,
};
use darjberry_db_sqlite::SqliteRepositoryFactory;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::cli::{
    AnalyzeArgs, BatchArgs, CalculateArgs, ChecksArgs, Command, CompareArgs, DeleteArgs, LoanArgs,
    OutputArgs, SatelliteArgs,
};
use crate::config::AppConfig;
use crate::csv_loader;
use crate::render;

/// Registers every compiled-in database backend.
pub fn build_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(SqliteRepositoryFactory));
    registry
}

/// Command-line input rejected before it reaches the calculators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("acres must be between 0 and {max}, got {acres}")]
    AcresOutOfRange { acres: Decimal, max: Decimal },

    #[error("price per kg must be positive, got {0}")]
    NonPositivePrice(Decimal),

    #[error("{field} must not be negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    #[error("latitude must be between -90 and 90, got {0}")]
    LatitudeOutOfRange(String),

    #[error("longitude must be between -180 and 180, got {0}")]
    LongitudeOutOfRange(String),
}

pub fn validate_acres(
    acres: Decimal,
    max: Decimal,
) -> Result<(), InputError> {
    if acres < Decimal::ZERO || acres > max {
        return Err(InputError::AcresOutOfRange { acres, max });
    }
    Ok(())
}

pub fn validate_price(price: Decimal) -> Result<(), InputError> {
    if price <= Decimal::ZERO {
        return Err(InputError::NonPositivePrice(price));
    }
    Ok(())
}

pub fn validate_coordinates(
    latitude: f64,
    longitude: f64,
) -> Result<Coordinates, InputError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(InputError::LatitudeOutOfRange(latitude.to_string()));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(InputError::LongitudeOutOfRange(longitude.to_string()));
    }
    Ok(Coordinates::new(latitude, longitude))
}

fn validate_amount(
    field: &'static str,
    value: Decimal,
) -> Result<(), InputError> {
    if value < Decimal::ZERO {
        return Err(InputError::NegativeAmount { field, value });
    }
    Ok(())
}

// --- Reports ---

#[derive(Debug, Clone, Serialize)]
pub struct CalculationReport {
    pub calculation: InvestmentCalculation,
    pub subsidy: SubsidyBenefit,
    pub scale: ScaleRecommendation,
    pub saved_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationReport {
    pub label: Option<String>,
    pub coordinates: Coordinates,
    pub analysis: LocationAnalysis,
    pub suitability_score: u8,
    pub recommendations: Vec<String>,
    pub saved_id: Option<i64>,
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output")
}

// --- App ---

/// Holds the calculators and a lazily opened repository for one run.
pub struct App {
    config: AppConfig,
    registry: RepositoryRegistry,
    calculator: InvestmentCalculator,
    analyzer: LocationAnalyzer,
    geospatial: GeospatialService,
    repo: Option<Box<dyn FarmRepository>>,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        Self::with_registry(config, build_registry())
    }

    pub fn with_registry(
        config: AppConfig,
        registry: RepositoryRegistry,
    ) -> Result<Self> {
        let calculator = InvestmentCalculator::new(InvestmentConfig {
            default_price_per_kg: config.calculator.default_price_per_kg,
            ..InvestmentConfig::default()
        })
        .context("Invalid calculator configuration")?;

        Ok(Self {
            config,
            registry,
            calculator,
            analyzer: LocationAnalyzer::new(),
            geospatial: GeospatialService::new(),
            repo: None,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    async fn repository(&mut self) -> Result<&dyn FarmRepository> {
        let repo = match self.repo.take() {
            Some(repo) => repo,
            None => {
                let db_config = self.config.db_config();
                debug!(backend = %db_config.backend, "Opening repository");
                self.registry
                    .create(&db_config)
                    .await
                    .with_context(|| format!("Failed to open '{}' database", db_config.backend))?
            }
        };
        Ok(&**self.repo.insert(repo))
    }

    /// Runs one command and returns what should be printed.
    pub async fn execute(
        &mut self,
        command: Command,
    ) -> Result<String> {
        match command {
            Command::Calculate(args) => self.calculate(args).await,
            Command::Compare(args) => self.compare(args),
            Command::Loan(args) => self.loan(args),
            Command::Analyze(args) => self.analyze(args).await,
            Command::Batch(args) => self.batch(args),
            Command::Satellite(args) => self.satellite(args),
            Command::History(output) => self.history(output).await,
            Command::Checks(args) => self.checks(args).await,
            Command::Delete(args) => self.delete(args).await,
        }
    }

    fn resolve_price(
        &self,
        price: Option<Decimal>,
    ) -> Result<Decimal, InputError> {
        let price = price.unwrap_or(self.calculator.config().default_price_per_kg);
        validate_price(price)?;
        Ok(price)
    }

    pub async fn calculate(
        &mut self,
        args: CalculateArgs,
    ) -> Result<String> {
        validate_acres(args.acres, self.config.calculator.max_acres)?;
        let price = self.resolve_price(args.price)?;

        let calculation = self.calculator.calculate(args.acres, Some(price));
        let subsidy = calculate_subsidy_benefit(&calculation);
        let scale = get_scale_recommendation(args.acres);

        let saved_id = if args.save {
            let record =
                NewInvestmentRecord::from_calculation(&calculation, args.investor, args.notes);
            let saved = self.repository().await?.create_investment(record).await?;
            Some(saved.id)
        } else {
            None
        };

        let report = CalculationReport {
            calculation,
            subsidy,
            scale,
            saved_id,
        };
        if args.output.json {
            to_json(&report)
        } else {
            render::calculation(&report).context("Failed to render output")
        }
    }

    pub fn compare(
        &self,
        args: CompareArgs,
    ) -> Result<String> {
        validate_acres(args.acres, self.config.calculator.max_acres)?;
        let price = self.resolve_price(args.price)?;

        let comparison: TeaEstateComparison = compare_with_tea_estate(args.acres, Some(price));
        if args.output.json {
            to_json(&comparison)
        } else {
            render::comparison(&comparison).context("Failed to render output")
        }
    }

    pub fn loan(
        &self,
        args: LoanArgs,
    ) -> Result<String> {
        validate_amount("investment", args.investment)?;
        validate_amount("income", args.income)?;

        let eligibility: LoanEligibility = calculate_loan_eligibility(args.investment, args.income);
        if args.output.json {
            to_json(&eligibility)
        } else {
            render::loan(&eligibility).context("Failed to render output")
        }
    }

    fn location_report(
        &self,
        coordinates: Coordinates,
        label: Option<String>,
    ) -> LocationReport {
        let analysis = self.analyzer.analyze_coordinates(coordinates);
        LocationReport {
            label,
            coordinates,
            suitability_score: self.analyzer.suitability_score(&analysis),
            recommendations: self.analyzer.recommendations(&analysis),
            analysis,
            saved_id: None,
        }
    }

    pub async fn analyze(
        &mut self,
        args: AnalyzeArgs,
    ) -> Result<String> {
        let coordinates = validate_coordinates(args.lat, args.lng)?;
        let mut report = self.location_report(coordinates, None);

        if args.save {
            let check = NewLocationCheck::from_analysis(coordinates, &report.analysis);
            let saved = self.repository().await?.create_location_check(check).await?;
            report.saved_id = Some(saved.id);
        }

        if args.output.json {
            to_json(&report)
        } else {
            render::location(&report).context("Failed to render output")
        }
    }

    pub fn batch(
        &self,
        args: BatchArgs,
    ) -> Result<String> {
        let points = csv_loader::load_from_file(&args.file)
            .with_context(|| format!("Failed to load '{}'", args.file.display()))?;
        info!(count = points.len(), "Analyzing coordinate batch");

        let coordinates: Vec<Coordinates> = points.iter().map(|p| p.coordinates).collect();
        let reports: Vec<LocationReport> = self
            .analyzer
            .analyze_batch(&coordinates)
            .into_iter()
            .zip(points)
            .map(|(analysis, point)| LocationReport {
                label: point.label,
                coordinates: point.coordinates,
                suitability_score: self.analyzer.suitability_score(&analysis),
                recommendations: self.analyzer.recommendations(&analysis),
                analysis,
                saved_id: None,
            })
            .collect();

        if args.output.json {
            to_json(&reports)
        } else {
            render::batch(&reports).context("Failed to render output")
        }
    }

    pub fn satellite(
        &mut self,
        args: SatelliteArgs,
    ) -> Result<String> {
        let coordinates = validate_coordinates(args.lat, args.lng)?;
        let report = self.geospatial.suitability(coordinates);

        if args.output.json {
            to_json(&report)
        } else {
            render::satellite(&report).context("Failed to render output")
        }
    }

    pub async fn history(
        &mut self,
        output: OutputArgs,
    ) -> Result<String> {
        let records = self.repository().await?.list_investments().await?;
        if output.json {
            to_json(&records)
        } else {
            render::history(&records).context("Failed to render output")
        }
    }

    pub async fn checks(
        &mut self,
        args: ChecksArgs,
    ) -> Result<String> {
        let checks = self
            .repository()
            .await?
            .list_location_checks(args.district.as_deref())
            .await?;
        if args.output.json {
            to_json(&checks)
        } else {
            render::checks(&checks).context("Failed to render output")
        }
    }

    pub async fn delete(
        &mut self,
        args: DeleteArgs,
    ) -> Result<String> {
        self.repository()
            .await?
            .delete_investment(args.id)
            .await
            .with_context(|| format!("Failed to delete calculation {}", args.id))?;
        Ok(format!("Deleted calculation {}\n", args.id))
    }
}
