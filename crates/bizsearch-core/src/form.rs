//! Search form input rules: zip code gating and radius unit conversion.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::{DISTANCE_METERS_MAX, DISTANCE_METERS_PER_MILE, DISTANCE_MILES_MAX};

/// Partial zip codes accepted while typing: `9`, `9040`, `90402-`, `90402-12`.
static ZIP_TYPING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,5}(-[0-9]{0,4})?$").expect("valid zip regex"));

/// Complete zip codes: `90402` or `90402-1234`.
static ZIP_FINAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}(-[0-9]{4})?$").expect("valid zip regex"));

/// Returns `true` if `raw` may be stored as the in-progress zip value.
///
/// Input that fails this check is rejected outright; the previous value stays.
#[must_use]
pub fn accepts_zip_input(raw: &str) -> bool {
    ZIP_TYPING_RE.is_match(raw)
}

/// Derives the submittable zip from the typed one.
///
/// `None` unless `raw` is a complete 5-digit (optionally `-4-digit`) zip, in
/// which case it is returned unchanged.
#[must_use]
pub fn compute_zip_final(raw: Option<&str>) -> Option<String> {
    raw.filter(|z| ZIP_FINAL_RE.is_match(z)).map(str::to_string)
}

/// Converts the selected radius to meters, clamping at the service ceiling.
#[must_use]
pub fn miles_to_meters(miles: f64) -> f64 {
    if miles >= f64::from(DISTANCE_MILES_MAX) {
        return DISTANCE_METERS_MAX;
    }
    miles * DISTANCE_METERS_PER_MILE
}

/// Converts a reported distance to miles, rounded to one decimal place.
///
/// Rounding works on the exact binary value, so `0.35` (stored just below
/// the tie) rounds down to `0.3`.
#[must_use]
pub fn meters_to_miles(meters: f64) -> f64 {
    if meters >= DISTANCE_METERS_MAX {
        return f64::from(DISTANCE_MILES_MAX);
    }
    let miles = meters / DISTANCE_METERS_PER_MILE;
    format!("{miles:.1}").parse().unwrap_or(miles)
}
