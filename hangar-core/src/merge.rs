//! Preparation of new ships and merging of partial updates.

use crate::domain::{NewShip, Ship, ShipDraft, ShipUpdate};
use crate::error::{HangarError, Result};
use crate::rating::RatingConfig;
use crate::validator::{
    check_new_ship, is_crew_size_valid, is_prod_date_valid, is_speed_valid, is_string_valid,
};

/// Validate a creation payload and derive its rating.
///
/// `isUsed` defaults to `false` when omitted.
pub fn prepare_new_ship(candidate: &NewShip, rating: &RatingConfig) -> Result<ShipDraft> {
    let checked = check_new_ship(candidate)?;
    let is_used = candidate.is_used.unwrap_or(false);

    Ok(ShipDraft {
        name: checked.name.to_string(),
        planet: checked.planet.to_string(),
        ship_type: checked.ship_type,
        prod_date: checked.prod_date,
        is_used,
        speed: checked.speed,
        crew_size: checked.crew_size,
        rating: rating.rate(checked.speed, is_used, checked.prod_date),
    })
}

/// Merge a partial update into a copy of `existing`.
///
/// Every present field is validated before anything is assigned, so a
/// rejected update never yields a half-merged ship. The rating is
/// re-derived only when `prodDate`, `isUsed` or `speed` is present.
pub fn apply_update(existing: &Ship, update: &ShipUpdate, rating: &RatingConfig) -> Result<Ship> {
    check(update.name.as_deref(), "name", is_string_valid)?;
    check(update.planet.as_deref(), "planet", is_string_valid)?;
    check(update.prod_date, "prodDate", is_prod_date_valid)?;
    check(update.speed, "speed", is_speed_valid)?;
    check(update.crew_size, "crewSize", is_crew_size_valid)?;

    let mut merged = existing.clone();
    if let Some(name) = &update.name {
        merged.name.clone_from(name);
    }
    if let Some(planet) = &update.planet {
        merged.planet.clone_from(planet);
    }
    if let Some(ship_type) = update.ship_type {
        merged.ship_type = ship_type;
    }
    if let Some(prod_date) = update.prod_date {
        merged.prod_date = prod_date;
    }
    if let Some(is_used) = update.is_used {
        merged.is_used = is_used;
    }
    if let Some(speed) = update.speed {
        merged.speed = speed;
    }
    if let Some(crew_size) = update.crew_size {
        merged.crew_size = crew_size;
    }

    if affects_rating(update) {
        merged.rating = rating.rate(merged.speed, merged.is_used, merged.prod_date);
    }
    Ok(merged)
}

/// Whether the update touches a field the rating depends on.
pub fn affects_rating(update: &ShipUpdate) -> bool {
    update.prod_date.is_some() || update.is_used.is_some() || update.speed.is_some()
}

fn check<T: Copy>(value: Option<T>, field: &'static str, valid: impl Fn(T) -> bool) -> Result<()> {
    match value {
        Some(value) if !valid(value) => Err(HangarError::invalid_field(field)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ShipType;
    use crate::validator::is_valid_ship;
    use chrono::{TimeZone, Utc};

    fn candidate() -> NewShip {
        NewShip {
            name: Some("Enterprise".to_string()),
            planet: Some("Earth".to_string()),
            ship_type: Some(ShipType::Military),
            prod_date: Some(Utc.with_ymd_and_hms(3018, 6, 1, 0, 0, 0).unwrap()),
            is_used: None,
            speed: Some(0.5),
            crew_size: Some(430),
        }
    }

    fn existing() -> Ship {
        prepare_new_ship(&candidate(), &RatingConfig::default())
            .expect("valid candidate")
            .with_id(7)
    }

    #[test]
    fn new_ship_defaults_to_unused_and_is_rated() {
        let draft = prepare_new_ship(&candidate(), &RatingConfig::default()).expect("draft");
        assert!(!draft.is_used);
        assert_eq!(draft.rating, 20.0);
    }

    #[test]
    fn used_new_ship_is_rated_lower() {
        let candidate = NewShip {
            is_used: Some(true),
            ..candidate()
        };
        let draft = prepare_new_ship(&candidate, &RatingConfig::default()).expect("draft");
        assert_eq!(draft.rating, 10.0);
    }

    #[test]
    fn invalid_new_ship_names_field() {
        let candidate = NewShip {
            crew_size: Some(0),
            ..candidate()
        };
        assert_eq!(
            prepare_new_ship(&candidate, &RatingConfig::default()),
            Err(HangarError::invalid_field("crewSize"))
        );
    }

    #[test]
    fn creation_agrees_with_validator() {
        let long_name = NewShip {
            name: Some("\u{1F680}".repeat(26)),
            ..candidate()
        };
        let untyped = NewShip {
            ship_type: None,
            ..candidate()
        };
        for payload in [candidate(), long_name, untyped] {
            assert_eq!(
                prepare_new_ship(&payload, &RatingConfig::default()).is_ok(),
                is_valid_ship(&payload),
                "{payload:?}"
            );
        }
    }

    #[test]
    fn update_rejects_name_over_utf16_limit() {
        let update = ShipUpdate {
            name: Some("\u{1F680}".repeat(26)),
            ..ShipUpdate::default()
        };
        assert_eq!(
            apply_update(&existing(), &update, &RatingConfig::default()),
            Err(HangarError::invalid_field("name"))
        );
    }

    #[test]
    fn crew_update_keeps_rating() {
        let ship = existing();
        let update = ShipUpdate {
            crew_size: Some(12),
            ..ShipUpdate::default()
        };
        let merged = apply_update(&ship, &update, &RatingConfig::default()).expect("merge");

        assert_eq!(merged.crew_size, 12);
        assert_eq!(merged.rating, ship.rating);
        assert_eq!(merged.id, ship.id);
    }

    #[test]
    fn stale_rating_is_kept_without_rating_fields() {
        let mut ship = existing();
        ship.rating = 1.23;
        let update = ShipUpdate {
            name: Some("Defiant".to_string()),
            ship_type: Some(ShipType::Transport),
            ..ShipUpdate::default()
        };
        let merged = apply_update(&ship, &update, &RatingConfig::default()).expect("merge");

        assert_eq!(merged.name, "Defiant");
        assert_eq!(merged.ship_type, ShipType::Transport);
        assert_eq!(merged.rating, 1.23);
    }

    #[test]
    fn used_flag_recomputes_rating() {
        let ship = existing();
        let update = ShipUpdate {
            is_used: Some(true),
            ..ShipUpdate::default()
        };
        let merged = apply_update(&ship, &update, &RatingConfig::default()).expect("merge");
        assert!(merged.is_used);
        assert_eq!(merged.rating, 10.0);
    }

    #[test]
    fn invalid_speed_rejects_whole_update() {
        let ship = existing();
        let update = ShipUpdate {
            name: Some("Voyager".to_string()),
            speed: Some(1.5),
            ..ShipUpdate::default()
        };
        let result = apply_update(&ship, &update, &RatingConfig::default());

        assert_eq!(result, Err(HangarError::invalid_field("speed")));
        assert_eq!(ship, existing());
    }

    #[test]
    fn empty_strings_are_rejected() {
        let update = ShipUpdate {
            planet: Some(String::new()),
            ..ShipUpdate::default()
        };
        assert_eq!(
            apply_update(&existing(), &update, &RatingConfig::default()),
            Err(HangarError::invalid_field("planet"))
        );
    }

    #[test]
    fn empty_update_is_identity() {
        let ship = existing();
        let merged =
            apply_update(&ship, &ShipUpdate::default(), &RatingConfig::default()).expect("merge");
        assert_eq!(merged, ship);
    }
}
