#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Benchmark result, trend, and configuration types.
//!
//! These types are what the benchmarking engine hands back to whatever
//! presentation layer sits in front of it. A missing metric is always
//! `None`, never zero: "not enough data" is a valid result state the
//! consumer must render, not an error.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Summary statistics over one record subset.
///
/// Each median is defined only over the numeric values present in its
/// column; a subset with no numeric values yields `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    /// Number of records with a numeric annual amount.
    pub n: usize,
    /// Median annual charge in pounds.
    pub median_annual: Option<f64>,
    /// Median monthly charge in pounds.
    pub median_monthly: Option<f64>,
    /// Median annualised charge per square foot.
    pub median_per_sqft: Option<f64>,
    /// Median annualised charge per square metre.
    pub median_per_sqm: Option<f64>,
}

/// One point of a median-by-year trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Calendar year.
    pub year: i32,
    /// Median annual charge for that year.
    pub median_annual: f64,
    /// Number of records with a numeric annual amount in that year.
    pub n: usize,
    /// Percent change vs the previous point in the series, `None` for
    /// the first point or when the previous median is zero.
    pub yoy_pct: Option<f64>,
}

/// One row of the inflation forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    /// Years from now (1-based).
    pub year_offset: u32,
    /// Projected annual charge in pounds.
    pub projected: f64,
}

/// Three-way classification of a sector median against the citywide
/// reference, using a tolerance band.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// At or below the lower band edge.
    Low,
    /// Within the tolerance band.
    Fair,
    /// Above the upper band edge.
    High,
    /// Either median is undefined; no comparison possible.
    NotApplicable,
}

/// Sector and reference trend series aligned onto a shared year axis.
///
/// The two value vectors are parallel to `years`; a `None` marks a year
/// present in one series but not the other, so the consumer can chart
/// both lines side by side with gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignedTrends {
    /// Sorted union of the years in both series.
    pub years: Vec<i32>,
    /// Sector median annual per year.
    pub sector: Vec<Option<f64>>,
    /// Reference median annual per year.
    pub reference: Vec<Option<f64>>,
}

/// Tunable constants the benchmarking engine is parameterized by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkConfig {
    /// Annual inflation rate applied by the forecast (0.03 = 3%).
    pub inflation_rate: f64,
    /// Forecast horizon in years.
    pub forecast_years: u32,
    /// Lower tolerance band multiplier for the verdict.
    pub low_band: f64,
    /// Upper tolerance band multiplier for the verdict.
    pub high_band: f64,
    /// Sector sample size below which results carry a small-sample flag.
    pub min_sector_sample: usize,
    /// Reliability tags excluded from the verified subset.
    pub excluded_reliability: Vec<String>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            inflation_rate: 0.03,
            forecast_years: 5,
            low_band: 0.90,
            high_band: 1.10,
            min_sector_sample: 5,
            excluded_reliability: vec!["LOW".to_string()],
        }
    }
}

/// Everything the engine computes for one postcode query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkResult {
    /// The raw query string as received.
    pub query: String,
    /// Normalized postcode for display.
    pub postcode: String,
    /// Outward district (e.g. "E14").
    pub district: String,
    /// Peer-grouping sector (e.g. "E14 9").
    pub sector: String,
    /// Statistics over the verified sector subset.
    pub sector_stats: StatsSnapshot,
    /// Statistics over the entire verified dataset.
    pub reference_stats: StatsSnapshot,
    /// Whether the sector sample is below the configured minimum.
    pub small_sample: bool,
    /// Sector median vs reference median classification.
    pub verdict: Verdict,
    /// Compounding inflation forecast off the sector median.
    pub forecast: Vec<ForecastPoint>,
    /// Sector median-by-year trend with year-over-year changes.
    pub trend: Vec<TrendPoint>,
    /// Sector and reference trends on a shared year axis.
    pub aligned: AlignedTrends,
}
