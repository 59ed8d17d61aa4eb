#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web JSON API server for the charge-check application.
//!
//! Thin glue only: the endpoints parse query parameters, call the
//! benchmark engine, and serialize the result. All benchmarking logic
//! lives in `charge_check_benchmark`.

pub mod handlers;

use std::sync::Arc;

use charge_check_benchmark::BenchmarkEngine;

/// Shared application state.
pub struct AppState {
    /// Benchmark engine, constructed once at startup.
    pub engine: Arc<BenchmarkEngine>,
}
