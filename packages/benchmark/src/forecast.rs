//! Compounding inflation forecast.

use charge_check_benchmark_models::ForecastPoint;

/// Projects a base annual charge forward under compound inflation.
///
/// Returns one point per year offset 1..=`horizon`. An undefined base
/// yields an empty sequence: "not enough data to forecast" is a valid
/// result, not an error.
#[must_use]
pub fn forecast_years(base: Option<f64>, rate: f64, horizon: u32) -> Vec<ForecastPoint> {
    let Some(base) = base else {
        return Vec::new();
    };

    let mut projected = base;
    (1..=horizon)
        .map(|year_offset| {
            projected *= 1.0 + rate;
            ForecastPoint {
                year_offset,
                projected,
            }
        })
        .collect()
}
