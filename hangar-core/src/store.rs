//! Storage abstraction for ship records.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::domain::{Ship, ShipDraft};
use crate::error::{HangarError, Result};

/// Persistence collaborator for ships.
#[cfg_attr(test, mockall::automock)]
pub trait ShipStore {
    /// Return every stored ship as a fresh, independently owned list.
    fn find_all(&self) -> Result<Vec<Ship>>;
    /// Look up a ship by identifier.
    fn find_by_id(&self, id: i64) -> Result<Option<Ship>>;
    /// Persist a new ship, assigning its identifier.
    fn insert(&self, draft: ShipDraft) -> Result<Ship>;
    /// Replace an existing ship. Fails with `NotFound` if it is gone.
    fn update(&self, ship: Ship) -> Result<Ship>;
    /// Remove a ship, returning whether it existed.
    fn delete(&self, id: i64) -> Result<bool>;
}

impl<T: ShipStore + ?Sized> ShipStore for Arc<T> {
    fn find_all(&self) -> Result<Vec<Ship>> {
        (**self).find_all()
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Ship>> {
        (**self).find_by_id(id)
    }

    fn insert(&self, draft: ShipDraft) -> Result<Ship> {
        (**self).insert(draft)
    }

    fn update(&self, ship: Ship) -> Result<Ship> {
        (**self).update(ship)
    }

    fn delete(&self, id: i64) -> Result<bool> {
        (**self).delete(id)
    }
}

/// Process-local store backed by an ordered map.
#[derive(Debug, Default)]
pub struct InMemoryShipStore {
    state: RwLock<InMemoryState>,
}

#[derive(Debug, Default)]
struct InMemoryState {
    last_id: i64,
    ships: BTreeMap<i64, Ship>,
}

impl InMemoryShipStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `ships`; later inserts continue after the highest id.
    pub fn with_ships(ships: impl IntoIterator<Item = Ship>) -> Self {
        let ships: BTreeMap<i64, Ship> = ships.into_iter().map(|ship| (ship.id, ship)).collect();
        let last_id = ships.keys().next_back().copied().unwrap_or(0);
        Self {
            state: RwLock::new(InMemoryState { last_id, ships }),
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, InMemoryState>> {
        self.state.read().map_err(|_| poisoned())
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, InMemoryState>> {
        self.state.write().map_err(|_| poisoned())
    }
}

fn poisoned() -> HangarError {
    HangarError::store("ship store lock poisoned")
}

impl ShipStore for InMemoryShipStore {
    fn find_all(&self) -> Result<Vec<Ship>> {
        Ok(self.read()?.ships.values().cloned().collect())
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Ship>> {
        Ok(self.read()?.ships.get(&id).cloned())
    }

    fn insert(&self, draft: ShipDraft) -> Result<Ship> {
        let mut state = self.write()?;
        state.last_id += 1;
        let ship = draft.with_id(state.last_id);
        state.ships.insert(ship.id, ship.clone());
        Ok(ship)
    }

    fn update(&self, ship: Ship) -> Result<Ship> {
        let mut state = self.write()?;
        let Some(slot) = state.ships.get_mut(&ship.id) else {
            return Err(HangarError::NotFound(ship.id));
        };
        *slot = ship.clone();
        Ok(ship)
    }

    fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.write()?.ships.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ShipType;
    use chrono::{TimeZone, Utc};

    fn draft(name: &str) -> ShipDraft {
        ShipDraft {
            name: name.to_string(),
            planet: "Io".to_string(),
            ship_type: ShipType::Transport,
            prod_date: Utc.with_ymd_and_hms(2990, 5, 5, 0, 0, 0).unwrap(),
            is_used: false,
            speed: 0.3,
            crew_size: 3,
            rating: 0.8,
        }
    }

    #[test]
    fn insert_assigns_sequential_ids() {
        let store = InMemoryShipStore::new();
        let first = store.insert(draft("a")).expect("insert");
        let second = store.insert(draft("b")).expect("insert");

        assert_eq!((first.id, second.id), (1, 2));
        assert_eq!(store.find_all().expect("all").len(), 2);
        assert_eq!(store.find_by_id(2).expect("find"), Some(second));
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let store = InMemoryShipStore::new();
        let first = store.insert(draft("a")).expect("insert");
        assert!(store.delete(first.id).expect("delete"));
        assert!(!store.delete(first.id).expect("delete"));

        let next = store.insert(draft("b")).expect("insert");
        assert_eq!(next.id, 2);
    }

    #[test]
    fn seeded_store_continues_after_highest_id() {
        let store = InMemoryShipStore::with_ships([draft("a").with_id(40), draft("b").with_id(4)]);
        let next = store.insert(draft("c")).expect("insert");
        assert_eq!(next.id, 41);
        let ids: Vec<i64> = store.find_all().expect("all").iter().map(|s| s.id).collect();
        assert_eq!(ids, [4, 40, 41]);
    }

    #[test]
    fn update_replaces_existing_and_rejects_missing() {
        let store = InMemoryShipStore::new();
        let mut ship = store.insert(draft("a")).expect("insert");
        ship.crew_size = 99;
        store.update(ship.clone()).expect("update");
        assert_eq!(store.find_by_id(ship.id).expect("find"), Some(ship.clone()));

        ship.id = 500;
        assert_eq!(store.update(ship), Err(HangarError::NotFound(500)));
    }

    #[test]
    fn find_all_returns_independent_copies() {
        let store = InMemoryShipStore::new();
        store.insert(draft("a")).expect("insert");
        let mut listed = store.find_all().expect("all");
        listed[0].name = "mutated".to_string();

        assert_eq!(store.find_by_id(1).expect("find").expect("ship").name, "a");
    }

    #[test]
    fn arc_store_delegates() {
        let store: Arc<dyn ShipStore + Send + Sync> = Arc::new(InMemoryShipStore::new());
        store.insert(draft("a")).expect("insert");
        assert_eq!(store.find_all().expect("all").len(), 1);
    }
}
