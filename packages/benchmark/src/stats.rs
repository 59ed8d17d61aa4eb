//! Median aggregation over record subsets.

use charge_check_benchmark_models::StatsSnapshot;
use charge_check_dataset::verified_only;
use charge_check_record_models::ChargeRecord;

/// Median of a set of values; even counts average the two central
/// values. `None` for an empty set.
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some(f64::midpoint(sorted[mid - 1], sorted[mid]))
    } else {
        Some(sorted[mid])
    }
}

/// Computes summary statistics over a record subset.
///
/// The verified filter is applied here, so callers can hand over a raw
/// sector slice (or the whole dataset) directly. Each median covers
/// only the numeric values of its column; `n` counts numeric annual
/// amounts.
#[must_use]
pub fn compute_stats(records: &[&ChargeRecord], excluded_tags: &[String]) -> StatsSnapshot {
    let verified = verified_only(records, excluded_tags);

    let column = |field: fn(&ChargeRecord) -> Option<f64>| -> Vec<f64> {
        verified.iter().filter_map(|r| field(r)).collect()
    };

    let annual = column(|r| r.annual);

    StatsSnapshot {
        n: annual.len(),
        median_annual: median(&annual),
        median_monthly: median(&column(|r| r.monthly)),
        median_per_sqft: median(&column(|r| r.per_sqft)),
        median_per_sqm: median(&column(|r| r.per_sqm)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(reliability: &str, annual: Option<f64>, monthly: Option<f64>) -> ChargeRecord {
        ChargeRecord {
            postcode: "E14 9AZ".to_string(),
            sector: "E14 9".to_string(),
            reliability: reliability.to_string(),
            annual,
            monthly,
            per_sqft: None,
            per_sqm: None,
            period_end: None,
            vintage_year: None,
            year: None,
        }
    }

    #[test]
    fn median_of_odd_count() {
        assert_eq!(median(&[300.0, 100.0, 200.0]), Some(200.0));
    }

    #[test]
    fn median_of_even_count_averages_central_pair() {
        assert_eq!(median(&[100.0, 200.0, 300.0, 400.0]), Some(250.0));
    }

    #[test]
    fn median_of_empty_set_is_undefined() {
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn empty_subset_yields_zero_count_and_undefined_medians() {
        let stats = compute_stats(&[], &["LOW".to_string()]);
        assert_eq!(stats.n, 0);
        assert_eq!(stats.median_annual, None);
        assert_eq!(stats.median_monthly, None);
        assert_eq!(stats.median_per_sqft, None);
        assert_eq!(stats.median_per_sqm, None);
    }

    #[test]
    fn unverified_records_never_contribute() {
        let records = vec![
            record("HIGH", Some(1000.0), Some(80.0)),
            record("LOW", Some(9000.0), Some(700.0)),
            record("MEDIUM", Some(2000.0), None),
        ];
        let refs: Vec<&ChargeRecord> = records.iter().collect();

        let stats = compute_stats(&refs, &["LOW".to_string()]);
        assert_eq!(stats.n, 2);
        assert_eq!(stats.median_annual, Some(1500.0));
        assert_eq!(stats.median_monthly, Some(80.0));
    }

    #[test]
    fn count_covers_annual_column_only() {
        let records = vec![
            record("HIGH", Some(1000.0), None),
            record("HIGH", None, Some(90.0)),
        ];
        let refs: Vec<&ChargeRecord> = records.iter().collect();

        let stats = compute_stats(&refs, &[]);
        assert_eq!(stats.n, 1);
        assert_eq!(stats.median_monthly, Some(90.0));
    }
}
