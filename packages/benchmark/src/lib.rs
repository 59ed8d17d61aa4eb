#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Service charge benchmarking engine.
//!
//! Composes the postcode locator, dataset store, aggregation, trend,
//! verdict, and forecast pieces into one query path: a raw postcode
//! string in, a [`BenchmarkResult`] out. The citywide reference
//! statistics and trend are computed once at construction and held as
//! immutable state; every query after that is a pure read over the
//! loaded dataset, so queries can run on any thread without
//! coordination.

pub mod forecast;
pub mod stats;
pub mod trend;
pub mod verdict;

use charge_check_benchmark_models::{BenchmarkConfig, BenchmarkResult, StatsSnapshot, TrendPoint};
use charge_check_dataset::DatasetStore;
use charge_check_postcode::PostcodeError;
use charge_check_record_models::ChargeRecord;
use thiserror::Error;

/// Errors a benchmark query can return.
///
/// All of these are recoverable: they describe a bad query, never a
/// broken process. Absence of data for a valid postcode is not an
/// error at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BenchmarkError {
    /// The query string was empty or all whitespace.
    #[error("enter a postcode")]
    EmptyInput,

    /// The postcode could not be parsed into a sector.
    #[error(transparent)]
    Postcode(#[from] PostcodeError),
}

/// The benchmarking engine: immutable dataset plus precomputed
/// citywide reference statistics.
#[derive(Debug, Clone)]
pub struct BenchmarkEngine {
    store: DatasetStore,
    config: BenchmarkConfig,
    reference_stats: StatsSnapshot,
    reference_trend: Vec<TrendPoint>,
}

impl BenchmarkEngine {
    /// Builds an engine over a loaded dataset, precomputing the
    /// citywide reference statistics and trend.
    #[must_use]
    pub fn new(store: DatasetStore, config: BenchmarkConfig) -> Self {
        let all: Vec<&ChargeRecord> = store.records().iter().collect();
        let reference_stats = stats::compute_stats(&all, &config.excluded_reliability);
        let reference_trend = trend::trend_by_year(&all, &config.excluded_reliability);

        log::info!(
            "Benchmark engine ready: {} records, {} verified with annual amounts, {} trend years",
            store.len(),
            reference_stats.n,
            reference_trend.len()
        );

        Self {
            store,
            config,
            reference_stats,
            reference_trend,
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Citywide statistics over the entire verified dataset.
    #[must_use]
    pub const fn reference_stats(&self) -> &StatsSnapshot {
        &self.reference_stats
    }

    /// Runs one benchmark query for a free-text postcode.
    ///
    /// An unknown or sparsely covered sector is not an error: the
    /// result comes back with `n = 0`, undefined medians, a
    /// `NotApplicable` verdict, and empty forecast/trend sequences.
    ///
    /// # Errors
    ///
    /// * [`BenchmarkError::EmptyInput`] for blank queries.
    /// * [`BenchmarkError::Postcode`] when the postcode fails shape
    ///   matching or sector derivation.
    pub fn run_query(&self, raw_postcode: &str) -> Result<BenchmarkResult, BenchmarkError> {
        if raw_postcode.trim().is_empty() {
            return Err(BenchmarkError::EmptyInput);
        }

        let location = charge_check_postcode::derive_sector(raw_postcode)?;
        log::debug!(
            "Benchmarking {} against sector {}",
            location.postcode,
            location.sector
        );

        let sector_records = self.store.by_sector(&location.sector);
        let excluded = &self.config.excluded_reliability;

        let sector_stats = stats::compute_stats(&sector_records, excluded);

        let verdict = verdict::classify(
            sector_stats.median_annual,
            self.reference_stats.median_annual,
            self.config.low_band,
            self.config.high_band,
        );

        let forecast = forecast::forecast_years(
            sector_stats.median_annual,
            self.config.inflation_rate,
            self.config.forecast_years,
        );

        let mut sector_trend = trend::trend_by_year(&sector_records, excluded);
        trend::add_yoy(&mut sector_trend);

        let aligned = trend::align_years(&sector_trend, &self.reference_trend);

        Ok(BenchmarkResult {
            query: raw_postcode.to_string(),
            postcode: location.postcode,
            district: location.district,
            sector: location.sector,
            small_sample: sector_stats.n < self.config.min_sector_sample,
            sector_stats,
            reference_stats: self.reference_stats.clone(),
            verdict,
            forecast,
            trend: sector_trend,
            aligned,
        })
    }
}
