//! Database models for Hangar server.

use chrono::{NaiveDateTime, TimeZone, Utc};
use diesel::prelude::*;
use hangar_core::{HangarError, Ship, ShipDraft, ShipType};

use crate::schema::ships;

#[derive(Debug, Clone, Queryable, Identifiable, Selectable, AsChangeset)]
#[diesel(table_name = ships)]
/// Ship database record.
pub struct ShipRow {
    /// Ship identifier.
    pub id: i64,
    /// Ship name.
    pub name: String,
    /// Planet of manufacture.
    pub planet: String,
    /// Ship type token.
    pub ship_type: String,
    /// Production timestamp (UTC).
    pub prod_date: NaiveDateTime,
    /// Used flag.
    pub is_used: bool,
    /// Cruising speed.
    pub speed: f64,
    /// Crew size.
    pub crew_size: i32,
    /// Derived rating.
    pub rating: f64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ships)]
/// Insertable ship record.
pub struct NewShipRow {
    /// Ship name.
    pub name: String,
    /// Planet of manufacture.
    pub planet: String,
    /// Ship type token.
    pub ship_type: String,
    /// Production timestamp (UTC).
    pub prod_date: NaiveDateTime,
    /// Used flag.
    pub is_used: bool,
    /// Cruising speed.
    pub speed: f64,
    /// Crew size.
    pub crew_size: i32,
    /// Derived rating.
    pub rating: f64,
}

impl TryFrom<ShipRow> for Ship {
    type Error = HangarError;

    fn try_from(row: ShipRow) -> Result<Self, Self::Error> {
        let ship_type: ShipType = row.ship_type.parse().map_err(|_| {
            HangarError::Store(format!(
                "ship {} has unknown type {:?}",
                row.id, row.ship_type
            ))
        })?;
        Ok(Ship {
            id: row.id,
            name: row.name,
            planet: row.planet,
            ship_type,
            prod_date: Utc.from_utc_datetime(&row.prod_date),
            is_used: row.is_used,
            speed: row.speed,
            crew_size: row.crew_size,
            rating: row.rating,
        })
    }
}

impl From<Ship> for ShipRow {
    fn from(ship: Ship) -> Self {
        Self {
            id: ship.id,
            name: ship.name,
            planet: ship.planet,
            ship_type: ship.ship_type.as_str().to_string(),
            prod_date: ship.prod_date.naive_utc(),
            is_used: ship.is_used,
            speed: ship.speed,
            crew_size: ship.crew_size,
            rating: ship.rating,
        }
    }
}

impl From<ShipDraft> for NewShipRow {
    fn from(draft: ShipDraft) -> Self {
        Self {
            name: draft.name,
            planet: draft.planet,
            ship_type: draft.ship_type.as_str().to_string(),
            prod_date: draft.prod_date.naive_utc(),
            is_used: draft.is_used,
            speed: draft.speed,
            crew_size: draft.crew_size,
            rating: draft.rating,
        }
    }
}
