use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::{LocationId, Weight};
use crate::topology::DEFAULT_MAX_WEIGHT;

fn default_consumption() -> u32 {
    1
}

fn default_max_weight() -> Weight {
    DEFAULT_MAX_WEIGHT
}

/// Settings for building a simulation.
///
/// `location_count` and `connection_count` are only read when the graph is
/// generated; a supplied graph brings its own size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default)]
    pub location_count: Option<usize>,
    #[serde(default)]
    pub connection_count: Option<usize>,
    /// Locations holding a brigade station. Each one gets a brigade.
    #[serde(default)]
    pub station_locations: BTreeSet<LocationId>,
    /// Extra water points besides the stations.
    #[serde(default)]
    pub water_locations: BTreeSet<LocationId>,
    /// Water each brigade carries when full.
    pub truck_capacity: u32,
    /// Water spent putting out one location.
    #[serde(default = "default_consumption")]
    pub consumption_per_fire: u32,
    /// Seed for topology generation.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Largest generated connection weight.
    #[serde(default = "default_max_weight")]
    pub max_weight: Weight,
}

impl SimulationConfig {
    pub fn new(truck_capacity: u32) -> Self {
        Self {
            location_count: None,
            connection_count: None,
            station_locations: BTreeSet::new(),
            water_locations: BTreeSet::new(),
            truck_capacity,
            consumption_per_fire: default_consumption(),
            seed: None,
            max_weight: default_max_weight(),
        }
    }

    /// Read a JSON configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn with_sizing(mut self, location_count: usize, connection_count: usize) -> Self {
        self.location_count = Some(location_count);
        self.connection_count = Some(connection_count);
        self
    }

    pub fn with_stations(mut self, stations: impl IntoIterator<Item = LocationId>) -> Self {
        self.station_locations.extend(stations);
        self
    }

    pub fn with_water(mut self, water: impl IntoIterator<Item = LocationId>) -> Self {
        self.water_locations.extend(water);
        self
    }

    pub fn with_consumption(mut self, consumption_per_fire: u32) -> Self {
        self.consumption_per_fire = consumption_per_fire;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_weight(mut self, max_weight: Weight) -> Self {
        self.max_weight = max_weight;
        self
    }

    /// Check the brigade and weight settings.
    pub fn validate(&self) -> Result<()> {
        if self.consumption_per_fire == 0 {
            return Err(Error::config("consumption_per_fire must be at least 1"));
        }
        if self.truck_capacity < self.consumption_per_fire {
            return Err(Error::config(format!(
                "truck_capacity {} cannot cover one fire (consumption_per_fire {})",
                self.truck_capacity, self.consumption_per_fire
            )));
        }
        if self.max_weight == 0 {
            return Err(Error::config("max_weight must be at least 1"));
        }
        Ok(())
    }

    /// Sizing required to generate a graph.
    pub fn sizing(&self) -> Result<(usize, usize)> {
        match (self.location_count, self.connection_count) {
            (Some(locations), Some(connections)) => Ok((locations, connections)),
            (None, _) => Err(Error::config(
                "location_count is required when no graph is supplied",
            )),
            (_, None) => Err(Error::config(
                "connection_count is required when no graph is supplied",
            )),
        }
    }
}
