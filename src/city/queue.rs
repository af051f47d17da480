//! Picking what a city builds next

use crate::core::types::{CityId, UnitTypeId};
use crate::world::city::Producible;
use crate::world::game::GameData;

/// Production-queue policy, consulted after an item completes
pub trait ProductionPlanner {
    fn next_item_to_produce(&self, game: &GameData, city: CityId, just_produced: &Producible) -> Producible;
}

/// Keeps building the same unit while the city can afford it; after a
/// building, moves on to the next missing building, then to defenders
#[derive(Debug, Default, Clone, Copy)]
pub struct RepeatingPlanner;

impl RepeatingPlanner {
    /// Cheapest unit with an attack that costs no population
    fn default_unit(game: &GameData) -> Option<UnitTypeId> {
        game.rules
            .unit_types
            .iter()
            .enumerate()
            .filter(|(_, p)| p.population_cost == 0 && p.attack > 0)
            .min_by_key(|(i, p)| (p.shield_cost, *i))
            .map(|(i, _)| UnitTypeId(i as u16))
    }
}

impl ProductionPlanner for RepeatingPlanner {
    fn next_item_to_produce(&self, game: &GameData, city: CityId, just_produced: &Producible) -> Producible {
        let Ok(city) = game.city(city) else {
            return just_produced.clone();
        };

        match just_produced {
            Producible::Unit(unit_type) => {
                let population_cost = game
                    .rules
                    .unit_type(*unit_type)
                    .map(|p| p.population_cost)
                    .unwrap_or(0);
                if population_cost > 0 && city.size() <= population_cost {
                    if let Some(fallback) = Self::default_unit(game) {
                        return Producible::Unit(fallback);
                    }
                }
                just_produced.clone()
            }
            Producible::Building(_) => {
                let missing = game.rules.buildings.iter().find(|b| !city.has_building(&b.name));
                match (missing, Self::default_unit(game)) {
                    (Some(building), _) => Producible::Building(building.name.clone()),
                    (None, Some(unit)) => Producible::Unit(unit),
                    (None, None) => just_produced.clone(),
                }
            }
        }
    }
}
