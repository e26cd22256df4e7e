//! Criteria evaluation for ship queries.

use crate::domain::{Ship, ShipCriteria};

impl ShipCriteria {
    /// Returns true when the ship satisfies every present constraint.
    pub fn matches(&self, ship: &Ship) -> bool {
        contains(self.name.as_deref(), &ship.name)
            && contains(self.planet.as_deref(), &ship.planet)
            && self.ship_type.is_none_or(|kind| ship.ship_type == kind)
            && self.after.is_none_or(|after| ship.prod_date >= after)
            && self.before.is_none_or(|before| ship.prod_date <= before)
            && self.is_used.is_none_or(|used| ship.is_used == used)
            && within(self.min_speed, self.max_speed, ship.speed)
            && within(self.min_crew_size, self.max_crew_size, ship.crew_size)
            && within(self.min_rating, self.max_rating, ship.rating)
    }

    /// Returns true when no constraint is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Keep the ships matching `criteria`, preserving their relative order.
pub fn filter_ships(ships: Vec<Ship>, criteria: &ShipCriteria) -> Vec<Ship> {
    if criteria.is_empty() {
        return ships;
    }
    ships
        .into_iter()
        .filter(|ship| criteria.matches(ship))
        .collect()
}

fn contains(needle: Option<&str>, haystack: &str) -> bool {
    needle.is_none_or(|needle| haystack.contains(needle))
}

fn within<T: PartialOrd>(min: Option<T>, max: Option<T>, value: T) -> bool {
    min.is_none_or(|min| value >= min) && max.is_none_or(|max| value <= max)
}
