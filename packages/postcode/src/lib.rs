#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! UK postcode parsing and sector derivation.
//!
//! A postcode sector is the outward district plus the first digit of the
//! inward code (e.g. "E14 9AZ" belongs to sector "E14 9"). The sector is
//! the peer-grouping unit for benchmarking: two postcodes in the same
//! sector are compared against the same peer group.
//!
//! Derivation is deliberately two-step: the full postcode shape is
//! validated first, then the inward first digit is extracted separately.
//! A string can pass the shape check and still fail digit extraction,
//! and the two failures are reported distinctly.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Full postcode shape: outward district (one or two letters, one or two
/// digits, optional trailing letter) followed by the inward code (digit
/// plus two letters).
static POSTCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]{1,2}\d{1,2}[A-Z]?)\s*\d[A-Z]{2}$").expect("valid regex"));

/// Inward code start: a single digit immediately followed by two letters
/// at a word boundary.
static INWARD_DIGIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d)[A-Z]{2}\b").expect("valid regex"));

/// Regex to collapse multiple whitespace characters into a single space.
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

/// Errors that can occur while deriving a sector from a postcode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostcodeError {
    /// The input does not look like a UK postcode at all.
    #[error("invalid postcode format: {input:?} (try e.g. \"E14 9AZ\")")]
    InvalidFormat {
        /// The offending input, after normalization.
        input: String,
    },

    /// The input matched the postcode shape but the inward first digit
    /// could not be extracted.
    #[error("could not derive sector from postcode: {input:?}")]
    SectorDerivationFailed {
        /// The offending input, after normalization.
        input: String,
    },
}

/// A successfully derived postcode location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorMatch {
    /// Normalized form of the input postcode (e.g. "E14 9AZ").
    pub postcode: String,
    /// Outward district (e.g. "E14").
    pub district: String,
    /// Peer-grouping sector: district plus inward first digit (e.g. "E14 9").
    pub sector: String,
}

/// Normalizes a raw postcode string: trim, uppercase, collapse runs of
/// whitespace to a single space. Idempotent.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    WHITESPACE_RE.replace_all(&upper, " ").into_owned()
}

/// Derives the district and sector from a free-text postcode.
///
/// # Errors
///
/// * [`PostcodeError::InvalidFormat`] if the input does not match the
///   UK postcode shape.
/// * [`PostcodeError::SectorDerivationFailed`] if the shape matches but
///   no inward first digit can be found.
pub fn derive_sector(raw: &str) -> Result<SectorMatch, PostcodeError> {
    let pc = normalize(raw);

    let district = POSTCODE_RE
        .captures(&pc)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| PostcodeError::InvalidFormat { input: pc.clone() })?;

    let digit = INWARD_DIGIT_RE
        .captures(&pc)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| PostcodeError::SectorDerivationFailed { input: pc.clone() })?;

    let sector = format!("{district} {digit}");

    Ok(SectorMatch {
        postcode: pc,
        district,
        sector,
    })
}
