//! Generic computer player
//!
//! Deliberately simple: settlers found cities where there is room, one
//! unit garrisons each city, everything else explores at random. All
//! random choices come from the game's shared stream, so a replay with the
//! same seed makes the same moves.

use crate::ai::{wander, AiExecutor};
use crate::core::error::{EngineError, Result};
use crate::core::types::{PlayerId, UnitId};
use crate::world::city::{City, Producible};
use crate::world::game::GameData;

#[derive(Debug, Clone)]
pub struct PlayerAi {
    /// Minimum distance kept between a new city and any existing one
    pub city_spacing: i32,
}

impl Default for PlayerAi {
    fn default() -> Self {
        Self { city_spacing: 3 }
    }
}

impl PlayerAi {
    pub fn new() -> Self {
        Self::default()
    }

    fn can_found_here(&self, game: &GameData, unit: UnitId) -> bool {
        let Ok(unit) = game.unit(unit) else {
            return false;
        };
        let founder = game
            .rules
            .unit_type(unit.unit_type)
            .is_some_and(|p| p.can_found_city);
        let on_land = game.map.tile(unit.location).is_some_and(|t| t.is_land());
        let crowded = game.cities.iter_ordered().any(|(_, c)| {
            game.map
                .distance(c.location, unit.location)
                .is_some_and(|d| d < self.city_spacing)
        });
        founder && on_land && !crowded
    }

    fn found_city(&self, game: &mut GameData, player: PlayerId, settler: UnitId) -> Result<()> {
        let location = game.unit(settler)?.location;
        let owner = game.player(player)?;
        let name = format!("{} {}", owner.name, game.cities_of(player).len() + 1);
        let civilization = owner.civilization;
        let first_build = game
            .rules
            .unit_types
            .iter()
            .position(|p| p.population_cost == 0 && p.attack > 0)
            .ok_or_else(|| EngineError::AiError("rules define no buildable military unit".into()))?;

        let mut city = City::new(
            name.clone(),
            player,
            location,
            civilization,
            Producible::Unit(crate::core::types::UnitTypeId(first_build as u16)),
        );
        let radius = game.config.work_radius;
        if let Some(tile) = game.free_tile_near(location, radius) {
            if let Some(resident) = city.first_resident_mut() {
                resident.tile_worked = Some(tile);
            }
        }

        game.add_city(city)?;
        game.remove_unit(settler)?;
        tracing::info!("{:?} founded {} at {:?}", player, name, location);
        Ok(())
    }
}

impl AiExecutor for PlayerAi {
    fn play_turn(&mut self, player: PlayerId, game: &mut GameData) -> Result<()> {
        for unit_id in game.units_of(player) {
            if self.can_found_here(game, unit_id) {
                self.found_city(game, player, unit_id)?;
                continue;
            }

            let unit = game.unit(unit_id)?;
            if unit.is_fortified {
                continue;
            }

            let location = unit.location;
            let city_here = game
                .cities
                .iter_ordered()
                .any(|(_, c)| c.owner == player && c.location == location);
            let garrisoned = game
                .units_on_tile(location)
                .iter()
                .any(|&other| game.unit(other).is_ok_and(|u| u.is_fortified));
            if city_here && !garrisoned {
                game.unit_mut(unit_id)?.is_fortified = true;
                continue;
            }

            wander(game, unit_id)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EngineConfig;
    use crate::core::rng::GameRng;
    use crate::core::types::{CivilizationId, TileCoord};
    use crate::world::map::{GameMap, Terrain};
    use crate::world::player::Player;
    use crate::world::rules::Rules;

    fn game(seed: u64) -> GameData {
        let map = GameMap::new(10, 10, false, Terrain::Grassland);
        let mut game = GameData::new(map, Rules::with_defaults(), EngineConfig::default(), GameRng::seeded(seed));
        game.add_player(Player::ai(PlayerId(1), "Rome", CivilizationId(4)));
        game
    }

    #[test]
    fn test_settler_founds_city() {
        let mut game = game(1);
        let settler = game.rules.unit_type_id("Settler").unwrap();
        let tile = game.map.tile_id_at(TileCoord::new(5, 5)).unwrap();
        let unit = game.spawn_unit(settler, PlayerId(1), tile).unwrap();

        PlayerAi::new().play_turn(PlayerId(1), &mut game).unwrap();

        assert!(!game.units.contains(unit));
        let cities = game.cities_of(PlayerId(1));
        assert_eq!(cities.len(), 1);
        let city = game.city(cities[0]).unwrap();
        assert_eq!(city.location, tile);
        assert_eq!(city.size(), 1);
        assert_eq!(city.residents()[0].nationality, CivilizationId(4));
        assert!(city.residents()[0].tile_worked.is_some());
    }

    #[test]
    fn test_unit_in_city_garrisons() {
        let mut game = game(1);
        let tile = game.map.tile_id_at(TileCoord::new(5, 5)).unwrap();
        game.add_city(City::new("Roma", PlayerId(1), tile, CivilizationId(4), Producible::Building("Temple".into())))
            .unwrap();
        let warrior = game.rules.unit_type_id("Warrior").unwrap();
        let guard = game.spawn_unit(warrior, PlayerId(1), tile).unwrap();
        let scout = game.spawn_unit(warrior, PlayerId(1), tile).unwrap();

        PlayerAi::new().play_turn(PlayerId(1), &mut game).unwrap();

        assert!(game.unit(guard).unwrap().is_fortified);
        assert_eq!(game.unit(guard).unwrap().location, tile);
        assert_ne!(game.unit(scout).unwrap().location, tile);
    }

    #[test]
    fn test_same_seed_same_moves() {
        let run = |seed| {
            let mut game = game(seed);
            let warrior = game.rules.unit_type_id("Horseman").unwrap();
            let tile = game.map.tile_id_at(TileCoord::new(5, 5)).unwrap();
            let ids: Vec<UnitId> = (0..4)
                .map(|_| game.spawn_unit(warrior, PlayerId(1), tile).unwrap())
                .collect();
            PlayerAi::new().play_turn(PlayerId(1), &mut game).unwrap();
            ids.iter().map(|&id| game.unit(id).unwrap().location).collect::<Vec<_>>()
        };
        assert_eq!(run(11), run(11));
    }
}
