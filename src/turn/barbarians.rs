//! Barbarian spawning at camps
//!
//! Each camp draws exactly one roll per turn, in camp-list order, whether or
//! not anything spawns. Keeping the draw count independent of the outcome is
//! what lets two games with the same seed but different camps stay in step.

use crate::core::config::EngineConfig;
use crate::core::error::Result;
use crate::core::types::UnitId;
use crate::turn::events::TurnEvent;
use crate::world::game::GameData;

/// Outcome of one camp's roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnDecision {
    Land,
    Sea,
    Nothing,
}

/// Map a roll to a spawn: low rolls give a land unit, the next band gives
/// a sea unit at coastal camps
pub fn decide_spawn(draw: u32, water_adjacent: bool, config: &EngineConfig) -> SpawnDecision {
    if draw < config.land_spawn_below {
        SpawnDecision::Land
    } else if water_adjacent && draw < config.sea_spawn_below {
        SpawnDecision::Sea
    } else {
        SpawnDecision::Nothing
    }
}

/// Roll every camp once and spawn the resulting barbarians.
///
/// Fails before drawing anything if camps exist but no barbarian player
/// does; that is a broken scenario, not a turn-local condition.
pub fn spawn_barbarians(game: &mut GameData) -> Result<Vec<UnitId>> {
    let camps = game.map.barbarian_camps().to_vec();
    if camps.is_empty() {
        return Ok(Vec::new());
    }
    let barbarians = game.barbarian_player()?;
    let info = game.rules.barbarian_info;

    let mut spawned = Vec::new();
    for tile in camps {
        let draw = game.rng.next_below(game.config.spawn_roll_range);
        tracing::trace!("Barbarian roll at {:?} = {}", tile, draw);

        let decision = decide_spawn(draw, game.map.neighbors_water(tile), &game.config);
        let (unit_type, sea) = match decision {
            SpawnDecision::Land => (info.basic_barbarian, false),
            SpawnDecision::Sea => (info.barbarian_sea_unit, true),
            SpawnDecision::Nothing => continue,
        };

        let mut unit = game.new_unit(unit_type, barbarians, tile)?;
        unit.hit_points_remaining = game.config.barbarian_hit_points;
        unit.is_fortified = game.config.barbarians_fortified;
        let id = game.insert_unit(unit)?;

        tracing::debug!("New barbarian {} added at {:?}", if sea { "galley" } else { "unit" }, tile);
        game.log.record(game.turn, TurnEvent::BarbarianSpawned { unit: id, tile, sea });
        spawned.push(id);
    }

    Ok(spawned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::EngineError;
    use crate::core::rng::GameRng;
    use crate::core::types::{CivilizationId, PlayerId, TileCoord, TileId};
    use crate::world::map::{GameMap, Terrain};
    use crate::world::player::Player;
    use crate::world::rules::{ExperienceLevel, Rules, UnitPrototype};

    fn game_with_camps(draws: Vec<u32>, coastal: bool) -> GameData {
        let mut map = GameMap::new(6, 4, false, Terrain::Grassland);
        if coastal {
            let sea = map.tile_id_at(TileCoord::new(2, 0)).unwrap();
            map.set_terrain(sea, Terrain::Coast);
        }
        map.add_barbarian_camp(map.tile_id_at(TileCoord::new(1, 1)).unwrap());
        map.add_barbarian_camp(map.tile_id_at(TileCoord::new(4, 3)).unwrap());

        let mut game = GameData::new(map, Rules::with_defaults(), EngineConfig::default(), GameRng::scripted(draws));
        game.add_player(Player::human(PlayerId(1), "Ada", CivilizationId(1)));
        game.add_player(Player::barbarians(PlayerId(7)));
        game
    }

    #[test]
    fn test_decide_spawn_bands() {
        let config = EngineConfig::default();
        assert_eq!(decide_spawn(0, false, &config), SpawnDecision::Land);
        assert_eq!(decide_spawn(3, true, &config), SpawnDecision::Land);
        assert_eq!(decide_spawn(4, false, &config), SpawnDecision::Nothing);
        assert_eq!(decide_spawn(4, true, &config), SpawnDecision::Sea);
        assert_eq!(decide_spawn(5, true, &config), SpawnDecision::Sea);
        assert_eq!(decide_spawn(6, true, &config), SpawnDecision::Nothing);
        assert_eq!(decide_spawn(99, true, &config), SpawnDecision::Nothing);
    }

    #[test]
    fn test_land_spawn_owned_by_barbarians() {
        let mut game = game_with_camps(vec![3, 50], false);
        let spawned = spawn_barbarians(&mut game).unwrap();
        assert_eq!(spawned.len(), 1);

        let unit = game.unit(spawned[0]).unwrap();
        let camp = game.map.barbarian_camps()[0];
        assert_eq!(unit.owner, PlayerId(7));
        assert_eq!(unit.location, camp);
        assert_eq!(unit.hit_points_remaining, 3);
        assert!(unit.is_fortified);
        assert_eq!(unit.unit_type, game.rules.barbarian_info.basic_barbarian);
        assert_eq!(game.units_of(PlayerId(7)), spawned);
        assert_eq!(game.units_on_tile(camp), spawned);
    }

    #[test]
    fn test_sea_spawn_only_at_coastal_camps() {
        // First camp is next to the coast tile, second is inland
        let mut game = game_with_camps(vec![5, 5], true);
        let spawned = spawn_barbarians(&mut game).unwrap();
        assert_eq!(spawned.len(), 1);
        let unit = game.unit(spawned[0]).unwrap();
        assert_eq!(unit.unit_type, game.rules.barbarian_info.barbarian_sea_unit);
        assert_eq!(unit.location, game.map.barbarian_camps()[0]);
    }

    #[test]
    fn test_spawn_kind_follows_roll_not_unit_type() {
        let mut game = game_with_camps(vec![2, 5], true);
        game.rules = Rules::new(
            vec![UnitPrototype::land("Raider", 10, 1, 1, 1)],
            vec![],
            vec![ExperienceLevel {
                key: "regular".into(),
                name: "Regular".into(),
                base_hit_points: 3,
            }],
            "regular",
            "Raider",
            "Raider",
        )
        .unwrap();

        // Coastal camp rolls a land spawn; the inland camp's 5 is nothing
        let spawned = spawn_barbarians(&mut game).unwrap();
        assert_eq!(spawned.len(), 1);
        let events: Vec<_> = game.log.events_for_turn(0).cloned().collect();
        assert_eq!(
            events,
            vec![TurnEvent::BarbarianSpawned {
                unit: spawned[0],
                tile: game.map.barbarian_camps()[0],
                sea: false,
            }]
        );
    }

    #[test]
    fn test_one_draw_per_camp_regardless_of_outcome() {
        let mut game = game_with_camps(vec![0, 0], false);
        spawn_barbarians(&mut game).unwrap();
        assert_eq!(game.rng.draws(), 2);

        let mut quiet = game_with_camps(vec![90, 90], false);
        spawn_barbarians(&mut quiet).unwrap();
        assert_eq!(quiet.rng.draws(), 2);
        assert!(quiet.units.is_empty());
    }

    #[test]
    fn test_missing_barbarian_player_fails_before_drawing() {
        let mut game = game_with_camps(vec![0], false);
        game.players.retain(|p| !p.is_barbarians());
        let result = spawn_barbarians(&mut game);
        assert!(matches!(result, Err(EngineError::NoBarbarianPlayer)));
        assert_eq!(game.rng.draws(), 0);
    }

    #[test]
    fn test_no_camps_no_draws() {
        let mut game = game_with_camps(vec![], false);
        for camp in game.map.barbarian_camps().to_vec() {
            game.map.remove_barbarian_camp(camp);
        }
        game.players.clear();
        assert!(spawn_barbarians(&mut game).unwrap().is_empty());
        assert_eq!(game.rng.draws(), 0);
        assert!(game.map.tile(TileId(0)).is_some());
    }
}
