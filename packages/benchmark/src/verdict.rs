//! Tolerance-band verdict classification.

use charge_check_benchmark_models::Verdict;

/// Classifies a sector median against the reference median.
///
/// Both band edges are inclusive, so ties always land on the
/// lower-cost side: a sector exactly at `reference * low_band` is
/// `Low`, exactly at `reference * high_band` is `Fair`.
#[must_use]
pub fn classify(
    subject: Option<f64>,
    reference: Option<f64>,
    low_band: f64,
    high_band: f64,
) -> Verdict {
    let (Some(subject), Some(reference)) = (subject, reference) else {
        return Verdict::NotApplicable;
    };

    if subject <= reference * low_band {
        Verdict::Low
    } else if subject <= reference * high_band {
        Verdict::Fair
    } else {
        Verdict::High
    }
}
