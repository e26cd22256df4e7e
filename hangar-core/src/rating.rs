//! Rating derivation for ships.

use chrono::{DateTime, Datelike, Utc};

/// The year the rating formula treats as "now" unless configured otherwise.
pub const DEFAULT_CURRENT_YEAR: i32 = 3019;

const RATING_SCALE: f64 = 80.0;
const USED_COEFFICIENT: f64 = 0.5;
const NEW_COEFFICIENT: f64 = 1.0;

/// Parameters of the rating formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingConfig {
    /// Year used as the present when computing a ship's age.
    pub current_year: i32,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            current_year: DEFAULT_CURRENT_YEAR,
        }
    }
}

impl RatingConfig {
    /// Create a config anchored at `current_year`.
    pub fn new(current_year: i32) -> Self {
        Self { current_year }
    }

    /// Rate a ship under this config.
    pub fn rate(&self, speed: f64, is_used: bool, prod_date: DateTime<Utc>) -> f64 {
        calculate_rating(speed, is_used, prod_date, self.current_year)
    }
}

/// `80 * speed * k / (current_year - prod_year + 1)` rounded to hundredths,
/// with `k` halved for used ships.
pub fn calculate_rating(
    speed: f64,
    is_used: bool,
    prod_date: DateTime<Utc>,
    current_year: i32,
) -> f64 {
    let k = if is_used {
        USED_COEFFICIENT
    } else {
        NEW_COEFFICIENT
    };
    // Only reachable below 1 when the epoch predates the production year.
    let age = (current_year - prod_date.year() + 1).max(1);
    round2(RATING_SCALE * speed * k / f64::from(age))
}

/// Round half up to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}
