//! Field-level validation rules for ship records.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::domain::{NewShip, ShipType};
use crate::error::{HangarError, Result};

/// Maximum length of `name` and `planet`, in UTF-16 code units.
pub const MAX_STRING_LENGTH: usize = 50;
/// Production dates must fall after the start of this year.
pub const MIN_PROD_YEAR: i32 = 2800;
/// Production dates must fall before the start of this year.
pub const MAX_PROD_YEAR: i32 = 3019;
/// Lowest accepted speed.
pub const MIN_SPEED: f64 = 0.01;
/// Highest accepted speed.
pub const MAX_SPEED: f64 = 0.99;
/// Smallest accepted crew.
pub const MIN_CREW_SIZE: i32 = 1;
/// Largest accepted crew.
pub const MAX_CREW_SIZE: i32 = 9999;

/// Returns true if the candidate would be accepted by [`validate_new_ship`].
pub fn is_valid_ship(candidate: &NewShip) -> bool {
    validate_new_ship(candidate).is_ok()
}

/// Check every field of a creation payload, reporting the first failure.
pub fn validate_new_ship(candidate: &NewShip) -> Result<()> {
    check_new_ship(candidate).map(|_| ())
}

/// Required fields of a creation payload that passed validation.
pub(crate) struct CheckedShip<'a> {
    pub(crate) name: &'a str,
    pub(crate) planet: &'a str,
    pub(crate) ship_type: ShipType,
    pub(crate) prod_date: DateTime<Utc>,
    pub(crate) speed: f64,
    pub(crate) crew_size: i32,
}

pub(crate) fn check_new_ship(candidate: &NewShip) -> Result<CheckedShip<'_>> {
    Ok(CheckedShip {
        name: require(candidate.name.as_deref(), "name", is_string_valid)?,
        planet: require(candidate.planet.as_deref(), "planet", is_string_valid)?,
        ship_type: require(candidate.ship_type, "shipType", |_| true)?,
        prod_date: require(candidate.prod_date, "prodDate", is_prod_date_valid)?,
        speed: require(candidate.speed, "speed", is_speed_valid)?,
        crew_size: require(candidate.crew_size, "crewSize", is_crew_size_valid)?,
    })
}

/// Non-empty and at most [`MAX_STRING_LENGTH`] UTF-16 code units, so a
/// character outside the Basic Multilingual Plane counts twice.
pub fn is_string_valid(value: &str) -> bool {
    !value.is_empty() && value.encode_utf16().count() <= MAX_STRING_LENGTH
}

/// Strictly between the start of [`MIN_PROD_YEAR`] and the start of [`MAX_PROD_YEAR`].
pub fn is_prod_date_valid(prod_date: DateTime<Utc>) -> bool {
    match (year_start(MIN_PROD_YEAR), year_start(MAX_PROD_YEAR)) {
        (Some(start), Some(end)) => prod_date > start && prod_date < end,
        _ => false,
    }
}

/// Within `[MIN_SPEED, MAX_SPEED]`. NaN is rejected.
pub fn is_speed_valid(speed: f64) -> bool {
    (MIN_SPEED..=MAX_SPEED).contains(&speed)
}

/// Within `[MIN_CREW_SIZE, MAX_CREW_SIZE]`.
pub fn is_crew_size_valid(crew_size: i32) -> bool {
    (MIN_CREW_SIZE..=MAX_CREW_SIZE).contains(&crew_size)
}

/// Unwrap a required field, failing with `InvalidField` when it is absent or rejected.
fn require<T>(
    value: Option<T>,
    field: &'static str,
    valid: impl Fn(T) -> bool,
) -> Result<T>
where
    T: Copy,
{
    match value {
        Some(value) if valid(value) => Ok(value),
        _ => Err(HangarError::invalid_field(field)),
    }
}

/// Midnight UTC on January 1st of `year`.
pub(crate) fn year_start(year: i32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
