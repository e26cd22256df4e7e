//! PostgreSQL-backed ship store.

use diesel::prelude::*;
use hangar_core::{HangarError, Result, Ship, ShipDraft, ShipStore};

use crate::db::DbPool;
use crate::models::{NewShipRow, ShipRow};
use crate::schema::ships;

/// [`ShipStore`] over a Diesel connection pool.
#[derive(Clone)]
pub struct PgShipStore {
    pool: DbPool,
}

impl PgShipStore {
    /// Wrap an initialised pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(
        &self,
    ) -> Result<diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<PgConnection>>>
    {
        self.pool.get().map_err(HangarError::store)
    }
}

impl ShipStore for PgShipStore {
    fn find_all(&self) -> Result<Vec<Ship>> {
        let mut conn = self.conn()?;
        ships::table
            .order(ships::id.asc())
            .select(ShipRow::as_select())
            .load(&mut conn)
            .map_err(HangarError::store)?
            .into_iter()
            .map(Ship::try_from)
            .collect()
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Ship>> {
        let mut conn = self.conn()?;
        ships::table
            .find(id)
            .select(ShipRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(HangarError::store)?
            .map(Ship::try_from)
            .transpose()
    }

    fn insert(&self, draft: ShipDraft) -> Result<Ship> {
        let mut conn = self.conn()?;
        let row: ShipRow = diesel::insert_into(ships::table)
            .values(NewShipRow::from(draft))
            .returning(ShipRow::as_returning())
            .get_result(&mut conn)
            .map_err(HangarError::store)?;
        Ship::try_from(row)
    }

    fn update(&self, ship: Ship) -> Result<Ship> {
        let mut conn = self.conn()?;
        let id = ship.id;
        let row = ShipRow::from(ship);
        let updated: Option<ShipRow> = diesel::update(ships::table.find(id))
            .set(&row)
            .returning(ShipRow::as_returning())
            .get_result(&mut conn)
            .optional()
            .map_err(HangarError::store)?;
        updated
            .map(Ship::try_from)
            .transpose()?
            .ok_or(HangarError::NotFound(id))
    }

    fn delete(&self, id: i64) -> Result<bool> {
        let mut conn = self.conn()?;
        let removed = diesel::delete(ships::table.find(id))
            .execute(&mut conn)
            .map_err(HangarError::store)?;
        Ok(removed > 0)
    }
}
