//! Growth and production computation
//!
//! These are pure functions of the current state: they report what should
//! happen and the resolver applies it.

use crate::world::city::{City, Producible};
use crate::world::game::GameData;

/// Result of one turn of food accounting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CityGrowth {
    /// Size the city should become; may be zero or negative when the
    /// computation asks for more shrinkage than the city can take
    pub new_size: i32,
    pub food_stored: i32,
}

/// Result of one turn of shield accounting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnProduction {
    pub shields_stored: i32,
    pub completed: Option<Producible>,
}

/// Rule engine consulted once per city per turn
pub trait CityRules {
    fn compute_city_growth(&self, city: &City, game: &GameData) -> CityGrowth;
    fn compute_turn_production(&self, city: &City, game: &GameData) -> TurnProduction;
}

/// Food and shields from the city center plus one yield per worked tile,
/// with every resident eating the same ration
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardCityRules;

impl StandardCityRules {
    pub fn food_surplus(city: &City, game: &GameData) -> i32 {
        let config = &game.config;
        let worked = city.worked_tiles().count() as i32;
        config.city_center_food + worked * config.food_per_worked_tile
            - city.size() * config.food_per_resident
    }

    pub fn food_box(city: &City, game: &GameData) -> i32 {
        game.config.food_box_base + city.size() * game.config.food_box_per_size
    }

    pub fn shields_per_turn(city: &City, game: &GameData) -> i32 {
        let config = &game.config;
        let worked_land = city
            .worked_tiles()
            .filter(|&t| game.map.tile(t).is_some_and(|tile| tile.is_land()))
            .count() as i32;
        config.city_center_shields + worked_land * config.shields_per_resident
    }

    pub fn cost_of(item: &Producible, game: &GameData) -> Option<i32> {
        match item {
            Producible::Unit(unit_type) => game.rules.unit_type(*unit_type).map(|p| p.shield_cost),
            Producible::Building(name) => game.rules.building(name).map(|b| b.shield_cost),
        }
    }
}

impl CityRules for StandardCityRules {
    fn compute_city_growth(&self, city: &City, game: &GameData) -> CityGrowth {
        let stored = city.food_stored + Self::food_surplus(city, game);
        let food_box = Self::food_box(city, game);

        if stored >= food_box {
            CityGrowth {
                new_size: city.size() + 1,
                food_stored: stored - food_box,
            }
        } else if stored < 0 {
            CityGrowth {
                new_size: city.size() - 1,
                food_stored: 0,
            }
        } else {
            CityGrowth {
                new_size: city.size(),
                food_stored: stored,
            }
        }
    }

    fn compute_turn_production(&self, city: &City, game: &GameData) -> TurnProduction {
        let stored = city.shields_stored + Self::shields_per_turn(city, game);
        match Self::cost_of(&city.producing, game) {
            Some(cost) if stored >= cost => TurnProduction {
                shields_stored: stored - cost,
                completed: Some(city.producing.clone()),
            },
            _ => TurnProduction {
                shields_stored: stored,
                completed: None,
            },
        }
    }
}
