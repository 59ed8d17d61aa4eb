//! HTTP handler functions for the charge-check API.

use actix_web::{HttpResponse, web};
use charge_check_benchmark::BenchmarkError;
use charge_check_postcode::PostcodeError;
use charge_check_server_models::{ApiError, ApiHealth, BenchmarkQueryParams};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/benchmark?postcode=E14+9AZ`
///
/// Runs one benchmark query and returns the full result. Query-time
/// failures come back as `400` with a stable error kind; a postcode
/// with no data is a normal `200` result the client renders as "not
/// enough data".
pub async fn benchmark(
    state: web::Data<AppState>,
    params: web::Query<BenchmarkQueryParams>,
) -> HttpResponse {
    let postcode = params.postcode.as_deref().unwrap_or_default();

    match state.engine.run_query(postcode) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::debug!("Benchmark query rejected: {e}");
            HttpResponse::BadRequest().json(ApiError {
                error: e.to_string(),
                kind: error_kind(&e).to_string(),
            })
        }
    }
}

/// `GET /api/config`
///
/// Echoes the active benchmark configuration.
pub async fn config(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.engine.config())
}

/// Stable machine-readable kind for each query-time error.
const fn error_kind(error: &BenchmarkError) -> &'static str {
    match error {
        BenchmarkError::EmptyInput => "EMPTY_INPUT",
        BenchmarkError::Postcode(PostcodeError::InvalidFormat { .. }) => "INVALID_FORMAT",
        BenchmarkError::Postcode(PostcodeError::SectorDerivationFailed { .. }) => {
            "SECTOR_DERIVATION_FAILED"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_are_distinct() {
        let kinds = [
            error_kind(&BenchmarkError::EmptyInput),
            error_kind(&BenchmarkError::Postcode(PostcodeError::InvalidFormat {
                input: "ZZZZ".to_string(),
            })),
            error_kind(&BenchmarkError::Postcode(
                PostcodeError::SectorDerivationFailed {
                    input: "N16AB".to_string(),
                },
            )),
        ];
        assert_eq!(kinds[0], "EMPTY_INPUT");
        assert_eq!(kinds[1], "INVALID_FORMAT");
        assert_eq!(kinds[2], "SECTOR_DERIVATION_FAILED");
    }
}
