//! Reference data: unit prototypes, buildings, experience levels
//!
//! Immutable once the game starts. Units refer to prototypes by
//! `UnitTypeId`, an index into `Rules::unit_types`.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};
use crate::core::types::UnitTypeId;

/// Where a unit may move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitDomain {
    Land,
    Sea,
}

/// Static template for a kind of unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitPrototype {
    pub name: String,
    pub shield_cost: i32,
    /// Residents removed from the producing city when the unit is built
    pub population_cost: i32,
    pub attack: i32,
    pub defense: i32,
    pub movement: i32,
    pub domain: UnitDomain,
    pub can_found_city: bool,
}

impl UnitPrototype {
    pub fn land(name: &str, shield_cost: i32, attack: i32, defense: i32, movement: i32) -> Self {
        Self {
            name: name.to_string(),
            shield_cost,
            population_cost: 0,
            attack,
            defense,
            movement,
            domain: UnitDomain::Land,
            can_found_city: false,
        }
    }

    pub fn sea(name: &str, shield_cost: i32, attack: i32, defense: i32, movement: i32) -> Self {
        Self {
            domain: UnitDomain::Sea,
            ..Self::land(name, shield_cost, attack, defense, movement)
        }
    }

    pub fn with_population_cost(mut self, cost: i32) -> Self {
        self.population_cost = cost;
        self
    }

    pub fn founder(mut self) -> Self {
        self.can_found_city = true;
        self
    }
}

/// A city improvement that can be produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingPrototype {
    pub name: String,
    pub shield_cost: i32,
}

/// Veterancy tier; determines starting hit points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceLevel {
    pub key: String,
    pub name: String,
    pub base_hit_points: i32,
}

/// Unit types used by barbarian spawning and the barbarian AI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarbarianInfo {
    pub basic_barbarian: UnitTypeId,
    pub barbarian_sea_unit: UnitTypeId,
}

/// The rule set a game is played under
#[derive(Debug, Clone)]
pub struct Rules {
    pub unit_types: Vec<UnitPrototype>,
    pub buildings: Vec<BuildingPrototype>,
    pub experience_levels: Vec<ExperienceLevel>,
    pub default_experience_level: String,
    pub barbarian_info: BarbarianInfo,
    unit_index: AHashMap<String, UnitTypeId>,
}

fn index_units(unit_types: &[UnitPrototype]) -> AHashMap<String, UnitTypeId> {
    unit_types
        .iter()
        .enumerate()
        .map(|(i, u)| (u.name.clone(), UnitTypeId(i as u16)))
        .collect()
}

impl Rules {
    /// Build a rule set; fails if the barbarian unit types or the default
    /// experience level don't exist
    pub fn new(
        unit_types: Vec<UnitPrototype>,
        buildings: Vec<BuildingPrototype>,
        experience_levels: Vec<ExperienceLevel>,
        default_experience_level: &str,
        basic_barbarian: &str,
        barbarian_sea_unit: &str,
    ) -> Result<Self> {
        let unit_index = index_units(&unit_types);

        let lookup = |name: &str| {
            unit_index
                .get(name)
                .copied()
                .ok_or_else(|| EngineError::UnknownUnitType(name.to_string()))
        };
        let barbarian_info = BarbarianInfo {
            basic_barbarian: lookup(basic_barbarian)?,
            barbarian_sea_unit: lookup(barbarian_sea_unit)?,
        };

        if !experience_levels
            .iter()
            .any(|level| level.key == default_experience_level)
        {
            return Err(EngineError::InvalidConfig(format!(
                "default experience level '{}' is not defined",
                default_experience_level
            )));
        }

        Ok(Self {
            unit_types,
            buildings,
            experience_levels,
            default_experience_level: default_experience_level.to_string(),
            barbarian_info,
            unit_index,
        })
    }

    /// The built-in ancient-era rule set
    pub fn with_defaults() -> Self {
        let unit_types = vec![
            UnitPrototype::land("Warrior", 10, 1, 1, 1),
            UnitPrototype::land("Settler", 30, 0, 0, 1)
                .with_population_cost(2)
                .founder(),
            UnitPrototype::land("Worker", 10, 0, 0, 1),
            UnitPrototype::land("Spearman", 20, 1, 2, 1),
            UnitPrototype::land("Archer", 20, 2, 1, 1),
            UnitPrototype::land("Horseman", 20, 2, 1, 2),
            UnitPrototype::sea("Galley", 30, 1, 1, 3),
        ];
        let buildings = vec![
            BuildingPrototype { name: "Barracks".into(), shield_cost: 40 },
            BuildingPrototype { name: "Granary".into(), shield_cost: 60 },
            BuildingPrototype { name: "Temple".into(), shield_cost: 40 },
        ];
        let experience_levels = vec![
            ExperienceLevel { key: "conscript".into(), name: "Conscript".into(), base_hit_points: 2 },
            ExperienceLevel { key: "regular".into(), name: "Regular".into(), base_hit_points: 3 },
            ExperienceLevel { key: "veteran".into(), name: "Veteran".into(), base_hit_points: 4 },
            ExperienceLevel { key: "elite".into(), name: "Elite".into(), base_hit_points: 5 },
        ];

        Self {
            buildings,
            experience_levels,
            default_experience_level: "regular".into(),
            barbarian_info: BarbarianInfo {
                basic_barbarian: UnitTypeId(0),
                barbarian_sea_unit: UnitTypeId(6),
            },
            unit_index: index_units(&unit_types),
            unit_types,
        }
    }

    pub fn unit_type(&self, id: UnitTypeId) -> Option<&UnitPrototype> {
        self.unit_types.get(id.0 as usize)
    }

    pub fn unit_type_id(&self, name: &str) -> Result<UnitTypeId> {
        self.unit_index
            .get(name)
            .copied()
            .ok_or_else(|| EngineError::UnknownUnitType(name.to_string()))
    }

    pub fn building(&self, name: &str) -> Option<&BuildingPrototype> {
        self.buildings.iter().find(|b| b.name == name)
    }

    pub fn experience_level(&self, key: &str) -> Option<&ExperienceLevel> {
        self.experience_levels.iter().find(|level| level.key == key)
    }

    pub fn default_experience(&self) -> Option<&ExperienceLevel> {
        self.experience_level(&self.default_experience_level)
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::with_defaults()
    }
}
