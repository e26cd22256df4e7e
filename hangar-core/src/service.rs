//! Ship registry operations over a [`ShipStore`].

use crate::domain::{NewShip, Ship, ShipCriteria, ShipOrder, ShipUpdate};
use crate::error::{HangarError, Result};
use crate::filter::filter_ships;
use crate::merge::{apply_update, prepare_new_ship};
use crate::pagination::{PageRequest, paginate};
use crate::rating::RatingConfig;
use crate::sort::sort_ships;
use crate::store::ShipStore;

/// Validates, rates, queries and persists ships through a store.
pub struct ShipService<S: ShipStore> {
    store: S,
    rating: RatingConfig,
}

impl<S: ShipStore> ShipService<S> {
    /// Create a service with the default rating epoch.
    pub fn new(store: S) -> Self {
        Self::with_rating(store, RatingConfig::default())
    }

    /// Create a service with a custom rating epoch.
    pub fn with_rating(store: S, rating: RatingConfig) -> Self {
        Self { store, rating }
    }

    /// The rating parameters in effect.
    pub fn rating_config(&self) -> RatingConfig {
        self.rating
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate and persist a new ship.
    pub fn create_ship(&self, candidate: &NewShip) -> Result<Ship> {
        let draft = prepare_new_ship(candidate, &self.rating)?;
        self.store.insert(draft)
    }

    /// Fetch a ship, failing with `NotFound` when it does not exist.
    pub fn get_ship(&self, id: i64) -> Result<Ship> {
        self.store
            .find_by_id(id)?
            .ok_or(HangarError::NotFound(id))
    }

    /// Apply a partial update. The stored ship is untouched if any field is invalid.
    pub fn update_ship(&self, id: i64, update: &ShipUpdate) -> Result<Ship> {
        let existing = self.get_ship(id)?;
        let merged = apply_update(&existing, update, &self.rating)?;
        self.store.update(merged)
    }

    /// Delete a ship, failing with `NotFound` when it does not exist.
    pub fn delete_ship(&self, id: i64) -> Result<()> {
        if self.store.delete(id)? {
            Ok(())
        } else {
            Err(HangarError::NotFound(id))
        }
    }

    /// Filter, sort and paginate the stored ships.
    pub fn query_ships(
        &self,
        criteria: &ShipCriteria,
        order: Option<ShipOrder>,
        page: &PageRequest,
    ) -> Result<Vec<Ship>> {
        let mut ships = filter_ships(self.store.find_all()?, criteria);
        sort_ships(&mut ships, order);
        paginate(ships, page)
    }

    /// Count the stored ships matching `criteria`.
    pub fn count_ships(&self, criteria: &ShipCriteria) -> Result<usize> {
        Ok(filter_ships(self.store.find_all()?, criteria).len())
    }
}
