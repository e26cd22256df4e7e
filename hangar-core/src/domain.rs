//! Domain entities for Hangar.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::HangarError;

/// Category of a ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipType {
    /// Cargo and passenger transport.
    Transport,
    /// Armed military vessel.
    Military,
    /// Trading vessel.
    Merchant,
}

impl ShipType {
    /// Every ship type, in declaration order.
    pub const ALL: [ShipType; 3] = [Self::Transport, Self::Military, Self::Merchant];

    /// Wire token for the ship type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "TRANSPORT",
            Self::Military => "MILITARY",
            Self::Merchant => "MERCHANT",
        }
    }
}

impl fmt::Display for ShipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipType {
    type Err = HangarError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| HangarError::invalid_field("shipType"))
    }
}

/// Sort key for ship listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipOrder {
    /// Ascending by identifier.
    Id,
    /// Ascending by speed.
    Speed,
    /// Ascending by production date.
    Date,
    /// Ascending by rating.
    Rating,
}

impl ShipOrder {
    /// Wire token for the sort key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Speed => "SPEED",
            Self::Date => "DATE",
            Self::Rating => "RATING",
        }
    }
}

/// A persisted ship record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ship {
    /// Store-assigned identifier.
    pub id: i64,
    /// Ship name.
    pub name: String,
    /// Planet of manufacture.
    pub planet: String,
    /// Ship category.
    pub ship_type: ShipType,
    /// Production date, serialized as epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    #[schema(value_type = i64)]
    pub prod_date: DateTime<Utc>,
    /// Whether the ship has had a previous owner.
    pub is_used: bool,
    /// Cruising speed as a fraction of light speed.
    pub speed: f64,
    /// Number of crew members.
    pub crew_size: i32,
    /// Derived desirability score.
    pub rating: f64,
}

/// A validated ship that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipDraft {
    /// Ship name.
    pub name: String,
    /// Planet of manufacture.
    pub planet: String,
    /// Ship category.
    pub ship_type: ShipType,
    /// Production date.
    pub prod_date: DateTime<Utc>,
    /// Whether the ship has had a previous owner.
    pub is_used: bool,
    /// Cruising speed.
    pub speed: f64,
    /// Number of crew members.
    pub crew_size: i32,
    /// Derived desirability score.
    pub rating: f64,
}

impl ShipDraft {
    /// Attach a store-assigned identifier.
    pub fn with_id(self, id: i64) -> Ship {
        Ship {
            id,
            name: self.name,
            planet: self.planet,
            ship_type: self.ship_type,
            prod_date: self.prod_date,
            is_used: self.is_used,
            speed: self.speed,
            crew_size: self.crew_size,
            rating: self.rating,
        }
    }
}

/// Creation payload. Missing required fields make the candidate invalid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewShip {
    /// Ship name.
    #[serde(default)]
    pub name: Option<String>,
    /// Planet of manufacture.
    #[serde(default)]
    pub planet: Option<String>,
    /// Ship category.
    #[serde(default)]
    pub ship_type: Option<ShipType>,
    /// Production date as epoch milliseconds.
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<i64>)]
    pub prod_date: Option<DateTime<Utc>>,
    /// Whether the ship is used; defaults to `false`.
    #[serde(default)]
    pub is_used: Option<bool>,
    /// Cruising speed.
    #[serde(default)]
    pub speed: Option<f64>,
    /// Number of crew members.
    #[serde(default)]
    pub crew_size: Option<i32>,
}

/// Partial update payload. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipUpdate {
    /// Replacement name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement planet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planet: Option<String>,
    /// Replacement category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_type: Option<ShipType>,
    /// Replacement production date as epoch milliseconds.
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<i64>)]
    pub prod_date: Option<DateTime<Utc>>,
    /// Replacement used flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_used: Option<bool>,
    /// Replacement speed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// Replacement crew size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew_size: Option<i32>,
}

/// Optional filter constraints for ship queries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipCriteria {
    /// Substring the name must contain.
    pub name: Option<String>,
    /// Substring the planet must contain.
    pub planet: Option<String>,
    /// Exact ship type.
    pub ship_type: Option<ShipType>,
    /// Earliest production date, inclusive.
    pub after: Option<DateTime<Utc>>,
    /// Latest production date, inclusive.
    pub before: Option<DateTime<Utc>>,
    /// Exact used flag.
    pub is_used: Option<bool>,
    /// Minimum speed, inclusive.
    pub min_speed: Option<f64>,
    /// Maximum speed, inclusive.
    pub max_speed: Option<f64>,
    /// Minimum crew size, inclusive.
    pub min_crew_size: Option<i32>,
    /// Maximum crew size, inclusive.
    pub max_crew_size: Option<i32>,
    /// Minimum rating, inclusive.
    pub min_rating: Option<f64>,
    /// Maximum rating, inclusive.
    pub max_rating: Option<f64>,
}
