//! Brigade records and the table that owns them.
//!
//! Water levels only change through [`BrigadeTable`] methods, which keep every
//! level within `0..=capacity`.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::LocationId;

/// Identifier of a brigade; brigades are numbered densely from zero.
pub type BrigadeId = usize;

/// A mobile suppression unit with a finite water tank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Brigade {
    pub id: BrigadeId,
    /// Station the brigade was created at.
    pub home: LocationId,
    pub position: LocationId,
    pub water_level: u32,
    pub capacity: u32,
    pub consumption_per_fire: u32,
}

impl Brigade {
    /// Whether the tank holds enough water for one suppression.
    pub fn can_suppress(&self) -> bool {
        self.water_level >= self.consumption_per_fire
    }

    pub fn is_empty(&self) -> bool {
        self.water_level == 0
    }
}

/// Owned store of every brigade in a simulation, iterated by ascending id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrigadeTable {
    brigades: Vec<Brigade>,
}

impl BrigadeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a brigade at `station` with a full tank.
    pub fn spawn(
        &mut self,
        station: LocationId,
        capacity: u32,
        consumption_per_fire: u32,
    ) -> BrigadeId {
        let id = self.brigades.len();
        self.brigades.push(Brigade {
            id,
            home: station,
            position: station,
            water_level: capacity,
            capacity,
            consumption_per_fire,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.brigades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brigades.is_empty()
    }

    pub fn get(&self, id: BrigadeId) -> Option<&Brigade> {
        self.brigades.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Brigade> {
        self.brigades.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = BrigadeId> {
        0..self.brigades.len()
    }

    /// Move a brigade and record its new water level. Levels above capacity
    /// are rejected.
    pub fn relocate(&mut self, id: BrigadeId, position: LocationId, water_level: u32) -> Result<()> {
        let brigade = self.get_mut(id)?;
        if water_level > brigade.capacity {
            return Err(Error::WaterOverflow {
                id,
                level: water_level,
                capacity: brigade.capacity,
            });
        }
        brigade.position = position;
        brigade.water_level = water_level;
        Ok(())
    }

    /// Fill a brigade's tank to capacity at `position`.
    pub fn refill_at(&mut self, id: BrigadeId, position: LocationId) -> Result<()> {
        let brigade = self.get_mut(id)?;
        brigade.position = position;
        brigade.water_level = brigade.capacity;
        Ok(())
    }

    /// Overwrite a brigade's water level, clamped to `0..=capacity`.
    pub fn set_water_level(&mut self, id: BrigadeId, water_level: u32) -> Result<()> {
        let brigade = self.get_mut(id)?;
        brigade.water_level = water_level.min(brigade.capacity);
        Ok(())
    }

    fn get_mut(&mut self, id: BrigadeId) -> Result<&mut Brigade> {
        self.brigades
            .get_mut(id)
            .ok_or(Error::UnknownBrigade { id })
    }
}
