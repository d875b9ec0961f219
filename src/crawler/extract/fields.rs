//! Field derivation patterns for hotel listing data
//!
//! Each derived field is an independent pure function over the raw text the
//! listing page exposes. A pattern that fails to match yields None, never an
//! error; extraction of the remaining fields continues.

use once_cell::sync::Lazy;
use regex::Regex;

static POSTAL_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{5}").expect("valid pattern"));

// The address string arrives from a JSON blob that itself carries the
// literal "&nbsp;" entity between postal code and city; the decoded
// U+00A0 and a plain space are accepted as well.
static CITY_AFTER_POSTAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{5}(?:&nbsp;|\x{A0}| )(.*)$").expect("valid pattern"));

static DISTANCE_KM: Lazy<Regex> = Lazy::new(|| Regex::new(r": ([0-9.]+) km").expect("valid pattern"));

static LEADING_FLOAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(?:\.[0-9]+)?").expect("valid pattern"));

static LEADING_INT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+").expect("valid pattern"));

static STAR_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"sw-icon-stars-([0-5.]+)").expect("valid pattern"));

/// First 5-digit run in a raw address string
pub fn postal_code(address: &str) -> Option<String> {
    POSTAL_CODE.find(address).map(|m| m.as_str().to_string())
}

/// Substring following the first 5-digit run and its separator
///
/// Returns None when the pattern does not match; the caller falls back to
/// the full raw address.
pub fn city_after_postal(address: &str) -> Option<String> {
    CITY_AFTER_POSTAL
        .captures(address)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Kilometers following a ": " separator in a raw distance string
pub fn distance_km(raw: &str) -> Option<f64> {
    DISTANCE_KM
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Leading floating-point prefix of a raw string
pub fn leading_float(raw: &str) -> Option<f64> {
    LEADING_FLOAT
        .find(raw.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Leading integer run of a raw count string
pub fn leading_int(raw: &str) -> Option<u32> {
    LEADING_INT
        .find(raw.trim_start())
        .and_then(|m| m.as_str().parse::<u32>().ok())
}

/// Numeric suffix of a star-icon CSS class, e.g. "sw-icon-stars-4.5" → "4.5"
pub fn star_rating(class_attr: &str) -> Option<String> {
    STAR_CLASS
        .captures(class_attr)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Price and currency, space-separated
///
/// No validation that either part is present: a missing part renders as the
/// literal "undefined", so a hotel with neither shows "undefined undefined".
/// Known quirk, left uncorrected so existing dataset consumers keep working.
pub fn price_tag(price: Option<String>, currency: Option<String>) -> String {
    format!(
        "{} {}",
        price.unwrap_or_else(|| "undefined".to_string()),
        currency.unwrap_or_else(|| "undefined".to_string())
    )
}
