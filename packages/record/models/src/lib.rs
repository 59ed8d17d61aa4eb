#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Service charge record types and field normalization.
//!
//! This crate defines the canonical in-memory representation of one row
//! of the service charge dataset, plus the normalization and coercion
//! rules every consumer applies: sector strings are uppercased with
//! collapsed whitespace, reliability tags are uppercased, and free-text
//! amount columns are coerced to numbers with silent drop-on-failure.

pub mod columns;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the service charge dataset.
///
/// Records are parsed once at startup and never mutated afterwards. All
/// amount fields hold already-annualised values from the source table;
/// `None` means the source cell was blank or non-numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeRecord {
    /// Full postcode as it appeared in the source (e.g. "E14 9AZ").
    pub postcode: String,
    /// Postcode sector this record belongs to, normalized (e.g. "E14 9").
    pub sector: String,
    /// Reliability/coverage tag, normalized to uppercase (e.g. "HIGH", "LOW").
    pub reliability: String,
    /// Annual service charge amount in pounds.
    pub annual: Option<f64>,
    /// Monthly service charge amount in pounds.
    pub monthly: Option<f64>,
    /// Annualised charge per square foot.
    pub per_sqft: Option<f64>,
    /// Annualised charge per square metre.
    pub per_sqm: Option<f64>,
    /// End date of the billing period this record was derived from.
    pub period_end: Option<NaiveDate>,
    /// Vintage year as stated in the source.
    pub vintage_year: Option<i32>,
    /// Year used for trend grouping, resolved dataset-wide at load time.
    pub year: Option<i32>,
}

/// Normalizes a postcode sector string: uppercase, trimmed, with runs of
/// whitespace collapsed to a single space.
///
/// Applied symmetrically to the sector column at load time and to
/// derived sector keys at query time, so exact string equality is the
/// sector match.
#[must_use]
pub fn normalize_sector(input: &str) -> String {
    input
        .to_uppercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalizes a reliability tag: trimmed and uppercased.
#[must_use]
pub fn normalize_tag(input: &str) -> String {
    input.trim().to_uppercase()
}

/// Coerces a free-text cell to a number.
///
/// Returns `None` for blank cells, unparseable text, and non-finite
/// values. Absence propagates to the caller; it is never defaulted to
/// zero.
#[must_use]
pub fn coerce_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
