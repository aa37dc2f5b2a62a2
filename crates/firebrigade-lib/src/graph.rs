use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifier of a location. Locations are numbered densely from zero in the
/// order they were added.
pub type LocationId = usize;

/// Traversal cost of a connection. Always positive.
pub type Weight = u32;

/// Boolean attributes carried by every location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationFlag {
    OnFire,
    HasWater,
    IsBurned,
    IsStation,
}

impl fmt::Display for LocationFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            LocationFlag::OnFire => "on_fire",
            LocationFlag::HasWater => "has_water",
            LocationFlag::IsBurned => "is_burned",
            LocationFlag::IsStation => "is_station",
        };
        f.write_str(value)
    }
}

/// Flag set of a single location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationFlags {
    #[serde(default)]
    pub on_fire: bool,
    #[serde(default)]
    pub has_water: bool,
    #[serde(default)]
    pub is_burned: bool,
    #[serde(default)]
    pub is_station: bool,
}

impl LocationFlags {
    /// Flags of a station: a station always doubles as a water point.
    pub fn station() -> Self {
        Self {
            has_water: true,
            is_station: true,
            ..Self::default()
        }
    }

    /// Flags of a plain water point.
    pub fn water() -> Self {
        Self {
            has_water: true,
            ..Self::default()
        }
    }

    /// Read a single flag.
    pub fn get(&self, flag: LocationFlag) -> bool {
        match flag {
            LocationFlag::OnFire => self.on_fire,
            LocationFlag::HasWater => self.has_water,
            LocationFlag::IsBurned => self.is_burned,
            LocationFlag::IsStation => self.is_station,
        }
    }

    /// Whether fire may take hold here.
    pub fn is_flammable(&self) -> bool {
        !self.on_fire && !self.has_water && !self.is_burned && !self.is_station
    }

    /// Whether a brigade can refill its tank here.
    pub fn is_refill_point(&self) -> bool {
        self.has_water || self.is_station
    }

    /// Validate a write of `value` to `flag` against the current flags.
    fn check_write(&self, flag: LocationFlag, value: bool) -> std::result::Result<(), &'static str> {
        match (flag, value) {
            (LocationFlag::OnFire, true) if self.has_water => Err("location holds water"),
            (LocationFlag::OnFire, true) if self.is_station => Err("location is a station"),
            (LocationFlag::OnFire, true) if self.is_burned => Err("location has already burned"),
            (LocationFlag::HasWater, true) if self.on_fire => Err("location is burning"),
            (LocationFlag::HasWater, false) if self.is_station => {
                Err("stations always hold water")
            }
            (LocationFlag::IsBurned, true) if self.on_fire => Err("location is still burning"),
            (LocationFlag::IsBurned, false) if self.is_burned => Err("burned is permanent"),
            (LocationFlag::IsStation, true) if self.on_fire => Err("location is burning"),
            (LocationFlag::IsStation, true) if !self.has_water => {
                Err("stations must hold water")
            }
            _ => Ok(()),
        }
    }

    fn set(&mut self, flag: LocationFlag, value: bool) {
        match flag {
            LocationFlag::OnFire => self.on_fire = value,
            LocationFlag::HasWater => self.has_water = value,
            LocationFlag::IsBurned => self.is_burned = value,
            LocationFlag::IsStation => self.is_station = value,
        }
    }

    fn first_conflict(&self) -> Option<(LocationFlag, &'static str)> {
        if self.on_fire && self.has_water {
            return Some((LocationFlag::OnFire, "location holds water"));
        }
        if self.on_fire && self.is_station {
            return Some((LocationFlag::OnFire, "location is a station"));
        }
        if self.on_fire && self.is_burned {
            return Some((LocationFlag::OnFire, "location has already burned"));
        }
        if self.is_station && !self.has_water {
            return Some((LocationFlag::IsStation, "stations must hold water"));
        }
        None
    }
}

/// Neighbour entry returned by [`LocationGraph::neighbours`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub target: LocationId,
    pub weight: Weight,
}

/// Undirected connection between two locations, reported with `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub a: LocationId,
    pub b: LocationId,
    pub weight: Weight,
}

/// Weighted undirected graph of locations.
///
/// Adjacency is kept in ordered maps so neighbours always iterate by ascending
/// id, which keeps every traversal built on top of the graph reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationGraph {
    flags: Vec<LocationFlags>,
    adjacency: Vec<BTreeMap<LocationId, Weight>>,
    connection_count: usize,
}

impl LocationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph of `count` unconnected locations with no flags set.
    pub fn with_locations(count: usize) -> Self {
        Self {
            flags: vec![LocationFlags::default(); count],
            adjacency: vec![BTreeMap::new(); count],
            connection_count: 0,
        }
    }

    /// Add a location and return its identifier.
    pub fn add_location(&mut self, flags: LocationFlags) -> Result<LocationId> {
        let id = self.flags.len();
        if let Some((flag, reason)) = flags.first_conflict() {
            return Err(Error::FlagConflict { id, flag, reason });
        }
        self.flags.push(flags);
        self.adjacency.push(BTreeMap::new());
        Ok(id)
    }

    /// Connect `a` and `b` with a positive traversal cost.
    pub fn add_connection(&mut self, a: LocationId, b: LocationId, weight: i64) -> Result<()> {
        self.ensure_location(a)?;
        self.ensure_location(b)?;
        if a == b {
            return Err(Error::topology(format!(
                "self loop on location {a} is not allowed"
            )));
        }
        let weight = match Weight::try_from(weight) {
            Ok(weight) if weight > 0 => weight,
            _ => {
                return Err(Error::topology(format!(
                    "connection {a}-{b} has non-positive or oversized weight {weight}"
                )))
            }
        };
        if self.adjacency[a].contains_key(&b) {
            return Err(Error::topology(format!(
                "connection {a}-{b} already exists"
            )));
        }

        self.adjacency[a].insert(b, weight);
        self.adjacency[b].insert(a, weight);
        self.connection_count += 1;
        Ok(())
    }

    /// Number of locations.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn contains(&self, id: LocationId) -> bool {
        id < self.flags.len()
    }

    /// All location identifiers in ascending order.
    pub fn locations(&self) -> impl Iterator<Item = LocationId> {
        0..self.flags.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connection_count
    }

    /// Every connection once, ordered by `(a, b)`.
    pub fn connections(&self) -> impl Iterator<Item = Connection> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(a, edges)| {
            edges
                .range(a + 1..)
                .map(move |(&b, &weight)| Connection { a, b, weight })
        })
    }

    /// Return the neighbours of a location by ascending id. Unknown ids have
    /// no neighbours.
    pub fn neighbours(&self, id: LocationId) -> impl Iterator<Item = Edge> + '_ {
        self.adjacency
            .get(id)
            .into_iter()
            .flat_map(|edges| edges.iter())
            .map(|(&target, &weight)| Edge { target, weight })
    }

    /// Weight of the connection between `a` and `b`, if any.
    pub fn weight(&self, a: LocationId, b: LocationId) -> Option<Weight> {
        self.adjacency.get(a)?.get(&b).copied()
    }

    pub fn flags(&self, id: LocationId) -> Option<LocationFlags> {
        self.flags.get(id).copied()
    }

    pub fn get_flag(&self, id: LocationId, flag: LocationFlag) -> Result<bool> {
        self.flags
            .get(id)
            .map(|flags| flags.get(flag))
            .ok_or(Error::UnknownLocation { id })
    }

    /// Write a single flag, refusing writes that would break a location
    /// invariant. Nothing else on the location changes.
    pub fn set_flag(&mut self, id: LocationId, flag: LocationFlag, value: bool) -> Result<()> {
        let flags = self
            .flags
            .get_mut(id)
            .ok_or(Error::UnknownLocation { id })?;
        flags
            .check_write(flag, value)
            .map_err(|reason| Error::FlagConflict { id, flag, reason })?;
        flags.set(flag, value);
        Ok(())
    }

    pub fn is_flammable(&self, id: LocationId) -> bool {
        self.flags
            .get(id)
            .is_some_and(LocationFlags::is_flammable)
    }

    pub fn is_on_fire(&self, id: LocationId) -> bool {
        self.flags.get(id).is_some_and(|flags| flags.on_fire)
    }

    pub fn has_water(&self, id: LocationId) -> bool {
        self.flags.get(id).is_some_and(|flags| flags.has_water)
    }

    /// Locations currently on fire, by ascending id.
    pub fn burning(&self) -> impl Iterator<Item = LocationId> + '_ {
        self.flags
            .iter()
            .enumerate()
            .filter(|(_, flags)| flags.on_fire)
            .map(|(id, _)| id)
    }

    /// Set fire to a flammable location. Returns whether it caught.
    pub(crate) fn ignite(&mut self, id: LocationId) -> bool {
        match self.flags.get_mut(id) {
            Some(flags) if flags.is_flammable() => {
                flags.on_fire = true;
                true
            }
            _ => false,
        }
    }

    /// Put out a burning location and mark it burned. Returns whether it was
    /// burning.
    pub(crate) fn extinguish(&mut self, id: LocationId) -> bool {
        match self.flags.get_mut(id) {
            Some(flags) if flags.on_fire => {
                flags.on_fire = false;
                flags.is_burned = true;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn ensure_location(&self, id: LocationId) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(Error::UnknownLocation { id })
        }
    }
}
