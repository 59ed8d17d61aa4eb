#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the charge-check server.
//!
//! The benchmark payload itself is the engine's `BenchmarkResult`,
//! serialized as-is; this crate only holds the thin envelope types the
//! HTTP layer adds around it.

use serde::{Deserialize, Serialize};

/// Query parameters for the benchmark endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkQueryParams {
    /// Free-text postcode to benchmark.
    pub postcode: Option<String>,
}

/// Error envelope for failed benchmark queries.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Human-readable reason.
    pub error: String,
    /// Stable machine-readable error kind.
    pub kind: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}
