//! Source table column headers.
//!
//! The dataset ships as a CSV export with fixed headers; these constants
//! are the single place the header spelling lives. Schema validation at
//! load time checks every name in [`REQUIRED`] against the file.

/// Full postcode column.
pub const POSTCODE: &str = "Postcode";
/// Postcode sector column.
pub const SECTOR: &str = "Sector";
/// Reliability/coverage tag column.
pub const RELIABILITY: &str = "Coverage/Reliability";
/// Annual service charge amount column.
pub const ANNUAL: &str = "Service Charge Annual Amount (£)";
/// Monthly service charge amount column.
pub const MONTHLY: &str = "Service Charge Monthly Amount (£)";
/// Annualised charge per square foot column.
pub const PER_SQFT: &str = "£/sqft annualised";
/// Annualised charge per square metre column.
pub const PER_SQM: &str = "£/sqm annualised";
/// Billing period end date column.
pub const PERIOD_END: &str = "Service Charge Period End";
/// Vintage year column.
pub const VINTAGE_YEAR: &str = "Vintage Year";

/// Every column the loader requires to be present.
pub const REQUIRED: &[&str] = &[
    POSTCODE,
    SECTOR,
    RELIABILITY,
    ANNUAL,
    MONTHLY,
    PER_SQFT,
    PER_SQM,
    PERIOD_END,
    VINTAGE_YEAR,
];
