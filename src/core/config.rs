//! Engine configuration with documented constants
//!
//! All tunable numbers for the turn engine live here. The defaults reproduce
//! the legacy rules; a TOML file may override any subset of them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};
use crate::core::types::TileDirection;

/// Configuration for turn resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === BARBARIANS ===
    /// Upper bound (exclusive) of the per-camp spawn roll
    ///
    /// Exactly one roll in `[0, spawn_roll_range)` is drawn per camp per turn.
    pub spawn_roll_range: u32,

    /// Rolls below this spawn a basic land barbarian
    ///
    /// At the default of 4 with a range of 100, a camp spawns a land unit
    /// on 4% of turns.
    pub land_spawn_below: u32,

    /// Rolls below this (and not below `land_spawn_below`) spawn a sea
    /// barbarian, but only at camps next to water
    ///
    /// At 6, coastal camps add a further 2% chance of a galley.
    pub sea_spawn_below: u32,

    /// Hit points given to freshly spawned barbarians
    pub barbarian_hit_points: i32,

    /// Whether freshly spawned barbarians start fortified
    ///
    /// Fortified units are skipped by unit selection, which keeps camp
    /// defenders from being cycled through as if awaiting orders.
    pub barbarians_fortified: bool,

    // === PRODUCTION ===
    /// Facing assigned to units completed by city production
    pub produced_unit_facing: TileDirection,

    /// Food eaten by each resident per turn
    pub food_per_resident: i32,

    /// Food yielded by a worked land tile
    ///
    /// Equal to `food_per_resident`, so only the city center yields surplus.
    pub food_per_worked_tile: i32,

    /// Food produced by the city center tile itself
    pub city_center_food: i32,

    /// Food needed to grow a size-0 city; grows with size
    pub food_box_base: i32,

    /// Additional food box capacity per point of city size
    pub food_box_per_size: i32,

    /// Shields contributed by each resident working a tile
    pub shields_per_resident: i32,

    /// Shields contributed by the city center tile
    pub city_center_shields: i32,

    /// Radius (in tiles, chebyshev distance) a city may work
    pub work_radius: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            // Barbarians (4% land, +2% sea on coasts)
            spawn_roll_range: 100,
            land_spawn_below: 4,
            sea_spawn_below: 6,
            barbarian_hit_points: 3,
            barbarians_fortified: true,

            // Production
            produced_unit_facing: TileDirection::SouthWest,
            food_per_resident: 2,
            food_per_worked_tile: 2,
            city_center_food: 2,
            food_box_base: 10,
            food_box_per_size: 2,
            shields_per_resident: 1,
            city_center_shields: 1,
            work_radius: 2,
        }
    }
}

impl EngineConfig {
    /// Parse a config from TOML; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.spawn_roll_range == 0 {
            return Err(EngineError::InvalidConfig(
                "spawn_roll_range must be positive".into(),
            ));
        }

        if self.land_spawn_below > self.sea_spawn_below {
            return Err(EngineError::InvalidConfig(format!(
                "land_spawn_below ({}) should be <= sea_spawn_below ({})",
                self.land_spawn_below, self.sea_spawn_below
            )));
        }

        if self.sea_spawn_below > self.spawn_roll_range {
            return Err(EngineError::InvalidConfig(format!(
                "sea_spawn_below ({}) should be <= spawn_roll_range ({})",
                self.sea_spawn_below, self.spawn_roll_range
            )));
        }

        if self.barbarian_hit_points <= 0 {
            return Err(EngineError::InvalidConfig(
                "barbarian_hit_points must be positive".into(),
            ));
        }

        if self.food_box_base <= 0 || self.work_radius < 0 {
            return Err(EngineError::InvalidConfig(
                "food_box_base must be positive and work_radius non-negative".into(),
            ));
        }

        Ok(())
    }
}
