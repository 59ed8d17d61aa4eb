//! Median-by-year trend series.

use std::collections::{BTreeMap, BTreeSet};

use charge_check_benchmark_models::{AlignedTrends, TrendPoint};
use charge_check_dataset::is_verified;
use charge_check_record_models::ChargeRecord;

use crate::stats::median;

/// Groups verified records by resolved year and computes the median and
/// count of the annual amount for each year.
///
/// Years with no numeric annual amount are omitted rather than emitted
/// as empty points. The result is sorted ascending by year with
/// `yoy_pct` unset; call [`add_yoy`] to fill it in.
#[must_use]
pub fn trend_by_year(records: &[&ChargeRecord], excluded_tags: &[String]) -> Vec<TrendPoint> {
    let mut by_year: BTreeMap<i32, Vec<f64>> = BTreeMap::new();

    for record in records
        .iter()
        .filter(|r| is_verified(r, excluded_tags))
    {
        if let (Some(year), Some(annual)) = (record.year, record.annual) {
            by_year.entry(year).or_default().push(annual);
        }
    }

    by_year
        .into_iter()
        .filter_map(|(year, annuals)| {
            median(&annuals).map(|median_annual| TrendPoint {
                year,
                median_annual,
                n: annuals.len(),
                yoy_pct: None,
            })
        })
        .collect()
}

/// Fills in the year-over-year percent change for a year-sorted series.
///
/// The first point, and any point whose predecessor has a median of
/// exactly zero, stays `None`.
pub fn add_yoy(points: &mut [TrendPoint]) {
    let mut prev: Option<f64> = None;
    for point in points {
        point.yoy_pct = match prev {
            Some(p) if p != 0.0 => Some((point.median_annual - p) / p * 100.0),
            _ => None,
        };
        prev = Some(point.median_annual);
    }
}

/// Aligns two trend series onto the sorted union of their years.
///
/// Each output vector is parallel to the shared year axis; a year
/// missing from one series yields `None` at that position so both lines
/// chart side by side with gaps.
#[must_use]
pub fn align_years(sector: &[TrendPoint], reference: &[TrendPoint]) -> AlignedTrends {
    let sector_by_year: BTreeMap<i32, f64> = sector
        .iter()
        .map(|p| (p.year, p.median_annual))
        .collect();
    let reference_by_year: BTreeMap<i32, f64> = reference
        .iter()
        .map(|p| (p.year, p.median_annual))
        .collect();

    let years: Vec<i32> = sector_by_year
        .keys()
        .chain(reference_by_year.keys())
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    AlignedTrends {
        sector: years
            .iter()
            .map(|y| sector_by_year.get(y).copied())
            .collect(),
        reference: years
            .iter()
            .map(|y| reference_by_year.get(y).copied())
            .collect(),
        years,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(reliability: &str, year: Option<i32>, annual: Option<f64>) -> ChargeRecord {
        ChargeRecord {
            postcode: "E14 9AZ".to_string(),
            sector: "E14 9".to_string(),
            reliability: reliability.to_string(),
            annual,
            monthly: None,
            per_sqft: None,
            per_sqm: None,
            period_end: None,
            vintage_year: year,
            year,
        }
    }

    fn point(year: i32, median_annual: f64) -> TrendPoint {
        TrendPoint {
            year,
            median_annual,
            n: 1,
            yoy_pct: None,
        }
    }

    #[test]
    fn groups_by_year_sorted_ascending() {
        let records = vec![
            record("HIGH", Some(2023), Some(1200.0)),
            record("HIGH", Some(2021), Some(1000.0)),
            record("HIGH", Some(2023), Some(1400.0)),
        ];
        let refs: Vec<&ChargeRecord> = records.iter().collect();

        let trend = trend_by_year(&refs, &[]);
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].year, 2021);
        assert_eq!(trend[0].median_annual, 1000.0);
        assert_eq!(trend[0].n, 1);
        assert_eq!(trend[1].year, 2023);
        assert_eq!(trend[1].median_annual, 1300.0);
        assert_eq!(trend[1].n, 2);
    }

    #[test]
    fn skips_unverified_rows_and_unresolved_years() {
        let records = vec![
            record("LOW", Some(2021), Some(999.0)),
            record("HIGH", None, Some(1000.0)),
            record("HIGH", Some(2021), None),
        ];
        let refs: Vec<&ChargeRecord> = records.iter().collect();

        let trend = trend_by_year(&refs, &["LOW".to_string()]);
        assert!(trend.is_empty());
    }

    #[test]
    fn yoy_walks_the_series_once() {
        let mut points = vec![point(2021, 1000.0), point(2022, 1100.0), point(2023, 990.0)];
        add_yoy(&mut points);

        assert_eq!(points[0].yoy_pct, None);
        assert!((points[1].yoy_pct.unwrap() - 10.0).abs() < 1e-9);
        assert!((points[2].yoy_pct.unwrap() - -10.0).abs() < 1e-9);
    }

    #[test]
    fn yoy_undefined_after_zero_median() {
        let mut points = vec![point(2021, 0.0), point(2022, 500.0)];
        add_yoy(&mut points);

        assert_eq!(points[0].yoy_pct, None);
        assert_eq!(points[1].yoy_pct, None);
    }

    #[test]
    fn aligns_series_onto_shared_year_axis() {
        let sector = vec![point(2021, 100.0), point(2023, 120.0)];
        let reference = vec![point(2021, 110.0), point(2022, 115.0)];

        let aligned = align_years(&sector, &reference);
        assert_eq!(aligned.years, vec![2021, 2022, 2023]);
        assert_eq!(aligned.sector, vec![Some(100.0), None, Some(120.0)]);
        assert_eq!(aligned.reference, vec![Some(110.0), Some(115.0), None]);
    }

    #[test]
    fn aligns_empty_series() {
        let aligned = align_years(&[], &[]);
        assert!(aligned.years.is_empty());
        assert!(aligned.sector.is_empty());
        assert!(aligned.reference.is_empty());
    }
}
