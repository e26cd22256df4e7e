//! Ordering of ship listings.

use std::cmp::Ordering;

use crate::domain::{Ship, ShipOrder};

impl ShipOrder {
    /// Compare two ships by this key, ascending.
    pub fn compare(self, left: &Ship, right: &Ship) -> Ordering {
        match self {
            Self::Id => left.id.cmp(&right.id),
            Self::Speed => left.speed.total_cmp(&right.speed),
            Self::Date => left.prod_date.cmp(&right.prod_date),
            Self::Rating => left.rating.total_cmp(&right.rating),
        }
    }
}

/// Sort ships in place by `order`. `None` leaves the sequence untouched.
///
/// The sort is stable: ships with equal keys keep their incoming order.
pub fn sort_ships(ships: &mut [Ship], order: Option<ShipOrder>) {
    if let Some(order) = order {
        ships.sort_by(|left, right| order.compare(left, right));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ShipType;
    use chrono::{TimeZone, Utc};

    fn ship(id: i64, speed: f64, year: i32, rating: f64) -> Ship {
        Ship {
            id,
            name: format!("ship-{id}"),
            planet: "Vega".to_string(),
            ship_type: ShipType::Merchant,
            prod_date: Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap(),
            is_used: false,
            speed,
            crew_size: 5,
            rating,
        }
    }

    fn ids(ships: &[Ship]) -> Vec<i64> {
        ships.iter().map(|ship| ship.id).collect()
    }

    #[test]
    fn sorts_by_id() {
        let mut ships = vec![
            ship(3, 0.1, 2900, 1.0),
            ship(1, 0.2, 2900, 1.0),
            ship(2, 0.3, 2900, 1.0),
        ];
        sort_ships(&mut ships, Some(ShipOrder::Id));
        assert_eq!(ids(&ships), [1, 2, 3]);
    }

    #[test]
    fn sorts_by_speed_date_and_rating() {
        let fleet = vec![
            ship(1, 0.9, 2950, 0.5),
            ship(2, 0.1, 3010, 2.5),
            ship(3, 0.5, 2900, 1.5),
        ];

        let mut ships = fleet.clone();
        sort_ships(&mut ships, Some(ShipOrder::Speed));
        assert_eq!(ids(&ships), [2, 3, 1]);

        let mut ships = fleet.clone();
        sort_ships(&mut ships, Some(ShipOrder::Date));
        assert_eq!(ids(&ships), [3, 1, 2]);

        let mut ships = fleet;
        sort_ships(&mut ships, Some(ShipOrder::Rating));
        assert_eq!(ids(&ships), [1, 3, 2]);
    }

    #[test]
    fn missing_order_keeps_input() {
        let mut ships = vec![ship(2, 0.1, 2900, 1.0), ship(1, 0.2, 2900, 1.0)];
        sort_ships(&mut ships, None);
        assert_eq!(ids(&ships), [2, 1]);
    }

    #[test]
    fn ties_keep_input_order() {
        let mut ships = vec![
            ship(5, 0.3, 2900, 1.0),
            ship(2, 0.3, 2900, 1.0),
            ship(9, 0.1, 2900, 1.0),
        ];
        sort_ships(&mut ships, Some(ShipOrder::Speed));
        assert_eq!(ids(&ships), [9, 5, 2]);
    }
}
