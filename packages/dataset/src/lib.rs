#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! In-memory service charge dataset loading and filtering.
//!
//! The dataset is a CSV export loaded once at process start into an
//! immutable table of [`ChargeRecord`]s. Loading validates the schema
//! (missing required columns are fatal), coerces amount cells to typed
//! values, and resolves the trend year once for the whole dataset.
//! Request handling only ever filters and reads; nothing is mutated
//! after load.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use charge_check_record_models::{
    ChargeRecord, coerce_numeric, columns, normalize_sector, normalize_tag,
};
use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Errors that can occur while loading the dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The source file is missing required columns. Fatal at startup:
    /// the process cannot serve any query without the full schema.
    #[error("dataset columns missing: {missing:?}; columns present: {present:?}")]
    SchemaMismatch {
        /// Required columns absent from the file header.
        missing: Vec<String>,
        /// Columns the file actually has.
        present: Vec<String>,
    },

    /// The source file could not be opened.
    #[error("failed to open dataset: {0}")]
    Io(#[from] std::io::Error),

    /// The source file could not be parsed as CSV.
    #[error("failed to parse dataset: {0}")]
    Csv(#[from] csv::Error),
}

/// Immutable in-memory table of charge records.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    records: Vec<ChargeRecord>,
}

impl DatasetStore {
    /// Loads the dataset from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::SchemaMismatch`] if any required column
    /// is missing, or an I/O or CSV error if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        log::info!("Loading dataset from {}", path.display());
        let file = File::open(path)?;
        let store = Self::from_reader(file)?;
        log::info!("Loaded {} charge records", store.len());
        Ok(store)
    }

    /// Loads the dataset from any CSV reader.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::SchemaMismatch`] if any required column
    /// is missing, or a CSV error if parsing fails.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut csv_reader = csv::Reader::from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let index = column_index(&headers)?;

        let mut records = Vec::new();
        for row in csv_reader.records() {
            let row = row?;
            let cell = |col: &str| row.get(index[col]).unwrap_or_default();

            records.push(ChargeRecord {
                postcode: cell(columns::POSTCODE).trim().to_string(),
                sector: normalize_sector(cell(columns::SECTOR)),
                reliability: normalize_tag(cell(columns::RELIABILITY)),
                annual: coerce_numeric(cell(columns::ANNUAL)),
                monthly: coerce_numeric(cell(columns::MONTHLY)),
                per_sqft: coerce_numeric(cell(columns::PER_SQFT)),
                per_sqm: coerce_numeric(cell(columns::PER_SQM)),
                period_end: parse_period_end(cell(columns::PERIOD_END)),
                vintage_year: parse_year(cell(columns::VINTAGE_YEAR)),
                year: None,
            });
        }

        resolve_years(&mut records);

        Ok(Self { records })
    }

    /// All records in the dataset.
    #[must_use]
    pub fn records(&self) -> &[ChargeRecord] {
        &self.records
    }

    /// Records whose sector exactly matches the given sector key after
    /// normalization.
    #[must_use]
    pub fn by_sector(&self, sector: &str) -> Vec<&ChargeRecord> {
        let key = normalize_sector(sector);
        self.records.iter().filter(|r| r.sector == key).collect()
    }

    /// Number of records in the dataset.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset contains no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Whether a record counts as verified: its reliability tag is not in
/// the exclusion set. Only verified records feed statistics and trends.
#[must_use]
pub fn is_verified(record: &ChargeRecord, excluded_tags: &[String]) -> bool {
    !excluded_tags.iter().any(|tag| tag == &record.reliability)
}

/// Filters a record subset down to its verified records.
#[must_use]
pub fn verified_only<'a>(
    records: &[&'a ChargeRecord],
    excluded_tags: &[String],
) -> Vec<&'a ChargeRecord> {
    records
        .iter()
        .copied()
        .filter(|r| is_verified(r, excluded_tags))
        .collect()
}

/// Maps each required column name to its position in the header row.
fn column_index(headers: &csv::StringRecord) -> Result<BTreeMap<&'static str, usize>, DatasetError> {
    let mut index = BTreeMap::new();
    let mut missing = Vec::new();

    for &col in columns::REQUIRED {
        match headers.iter().position(|h| h == col) {
            Some(pos) => {
                index.insert(col, pos);
            }
            None => missing.push(col.to_string()),
        }
    }

    if missing.is_empty() {
        Ok(index)
    } else {
        Err(DatasetError::SchemaMismatch {
            missing,
            present: headers.iter().map(ToString::to_string).collect(),
        })
    }
}

/// Accepted billing period end date formats.
const PERIOD_END_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];

fn parse_period_end(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    PERIOD_END_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

#[allow(clippy::cast_possible_truncation)]
fn parse_year(raw: &str) -> Option<i32> {
    coerce_numeric(raw).map(|v| v as i32)
}

/// Resolves the trend year for every record.
///
/// This is a single dataset-wide branch, decided once: if the vintage
/// year column is numeric anywhere in the dataset it is used for every
/// record; only when it is entirely absent does the billing period end
/// date supply the year instead. A per-record fallback would silently
/// shift peer-group membership across years.
fn resolve_years(records: &mut [ChargeRecord]) {
    let has_vintage = records.iter().any(|r| r.vintage_year.is_some());

    if has_vintage {
        for record in records {
            record.year = record.vintage_year;
        }
    } else {
        log::info!("Vintage year column empty; deriving trend years from period end dates");
        for record in records {
            record.year = record.period_end.map(|d| d.year());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Postcode,Sector,Coverage/Reliability,Service Charge Annual Amount (£),Service Charge Monthly Amount (£),£/sqft annualised,£/sqm annualised,Service Charge Period End,Vintage Year";

    fn store_from(rows: &[&str]) -> DatasetStore {
        let csv = format!("{HEADER}\n{}", rows.join("\n"));
        DatasetStore::from_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn loads_and_normalizes_records() {
        let store = store_from(&[
            "E14 9AZ,e14 9,high,1850,154.17,2.5,26.9,2023-12-31,2023",
            "E14 9XY, E14  9 , Low ,2100,,,,2022-06-30,2022",
        ]);

        assert_eq!(store.len(), 2);
        let first = &store.records()[0];
        assert_eq!(first.sector, "E14 9");
        assert_eq!(first.reliability, "HIGH");
        assert_eq!(first.annual, Some(1850.0));
        assert_eq!(first.year, Some(2023));

        let second = &store.records()[1];
        assert_eq!(second.sector, "E14 9");
        assert_eq!(second.reliability, "LOW");
        assert_eq!(second.monthly, None);
    }

    #[test]
    fn missing_columns_is_schema_mismatch() {
        let csv = "Postcode,Sector\nE14 9AZ,E14 9";
        let err = DatasetStore::from_reader(csv.as_bytes()).unwrap_err();
        match err {
            DatasetError::SchemaMismatch { missing, present } => {
                assert!(missing.contains(&"Coverage/Reliability".to_string()));
                assert!(missing.contains(&"Vintage Year".to_string()));
                assert_eq!(present, vec!["Postcode", "Sector"]);
            }
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn filters_by_normalized_sector() {
        let store = store_from(&[
            "E14 9AZ,E14 9,HIGH,1850,,,,2023-12-31,2023",
            "N1 6AB,N1 6,HIGH,900,,,,2023-12-31,2023",
        ]);

        assert_eq!(store.by_sector(" e14  9 ").len(), 1);
        assert_eq!(store.by_sector("SW1A 1").len(), 0);
    }

    #[test]
    fn verified_predicate_excludes_tags() {
        let store = store_from(&[
            "E14 9AZ,E14 9,HIGH,1850,,,,2023-12-31,2023",
            "E14 9XY,E14 9,LOW,2100,,,,2023-12-31,2023",
        ]);
        let excluded = vec!["LOW".to_string()];

        let verified: Vec<_> = store
            .records()
            .iter()
            .filter(|r| is_verified(r, &excluded))
            .collect();
        assert_eq!(verified.len(), 1);
        assert_eq!(verified[0].reliability, "HIGH");
    }

    #[test]
    fn vintage_year_wins_when_present_anywhere() {
        // One numeric vintage value keeps the vintage column for every
        // record, even those without one.
        let store = store_from(&[
            "E14 9AZ,E14 9,HIGH,1850,,,,2020-12-31,2023",
            "E14 9XY,E14 9,HIGH,2100,,,,2021-12-31,",
        ]);

        assert_eq!(store.records()[0].year, Some(2023));
        assert_eq!(store.records()[1].year, None);
    }

    #[test]
    fn falls_back_to_period_end_when_vintage_entirely_absent() {
        let store = store_from(&[
            "E14 9AZ,E14 9,HIGH,1850,,,,2020-12-31,",
            "E14 9XY,E14 9,HIGH,2100,,,,31/12/2021,",
        ]);

        assert_eq!(store.records()[0].year, Some(2020));
        assert_eq!(store.records()[1].year, Some(2021));
    }
}
