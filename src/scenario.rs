//! Scenario setup - random worlds for the driver, benches and tests

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::config::EngineConfig;
use crate::core::error::{EngineError, Result};
use crate::core::rng::GameRng;
use crate::core::types::{CivilizationId, PlayerId, TileId};
use crate::world::game::GameData;
use crate::world::map::{GameMap, Terrain};
use crate::world::player::Player;
use crate::world::rules::Rules;

const NATIONS: [&str; 8] = [
    "Rome", "Carthage", "Egypt", "Babylon", "Greece", "Persia", "China", "Aztecs",
];

/// Minimum distance between two starting positions
const START_SPACING: i32 = 4;
/// Camps keep at least this far from any start
const CAMP_SPACING: i32 = 3;

#[derive(Clone, Debug)]
pub struct ScenarioConfig {
    pub seed: u64,
    pub width: i32,
    pub height: i32,
    pub water_fraction: f32,
    /// Include a human player at the UI
    pub human: bool,
    pub ai_players: u32,
    pub camps: u32,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            width: 24,
            height: 16,
            water_fraction: 0.25,
            human: true,
            ai_players: 3,
            camps: 4,
        }
    }
}

/// Random terrain with a horizontal wrap. Water touching land becomes coast.
pub fn generate_map(config: &ScenarioConfig) -> GameMap {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut map = GameMap::new(config.width, config.height, true, Terrain::Grassland);

    let ids: Vec<TileId> = map.tiles().map(|t| t.id).collect();
    for &id in &ids {
        let roll: f32 = rng.gen();
        let land_roll = (roll - config.water_fraction) / (1.0 - config.water_fraction).max(f32::EPSILON);
        let terrain = if roll < config.water_fraction {
            Terrain::Ocean
        } else if land_roll < 0.1 {
            Terrain::Mountains
        } else if land_roll < 0.25 {
            Terrain::Hills
        } else if land_roll < 0.6 {
            Terrain::Plains
        } else {
            Terrain::Grassland
        };
        map.set_terrain(id, terrain);
    }

    let shore: Vec<TileId> = ids
        .iter()
        .copied()
        .filter(|&id| map.tile(id).is_some_and(|t| t.is_water()))
        .filter(|&id| {
            map.neighbors(id)
                .into_iter()
                .any(|(_, n)| map.tile(n).is_some_and(|t| t.is_land()))
        })
        .collect();
    for id in shore {
        map.set_terrain(id, Terrain::Coast);
    }

    map
}

/// Pick up to `count` land tiles, each at least `spacing` from the others
/// and from everything in `avoid`
fn spread_tiles(
    map: &GameMap,
    rng: &mut ChaCha8Rng,
    count: usize,
    spacing: i32,
    avoid: &[TileId],
) -> Vec<TileId> {
    let mut land: Vec<TileId> = map.tiles().filter(|t| t.is_land()).map(|t| t.id).collect();
    land.shuffle(rng);

    let mut chosen: Vec<TileId> = Vec::with_capacity(count);
    for tile in land {
        if chosen.len() == count {
            break;
        }
        let clear = avoid
            .iter()
            .chain(chosen.iter())
            .all(|&other| map.distance(tile, other).is_some_and(|d| d >= spacing));
        if clear {
            chosen.push(tile);
        }
    }
    chosen
}

/// Build a ready-to-play game: barbarians first, then the human (if any),
/// then the computer players, each starting with a settler and a warrior.
pub fn build_game(config: &ScenarioConfig, engine_config: EngineConfig) -> Result<GameData> {
    engine_config.validate()?;
    if config.ai_players as usize > NATIONS.len() {
        return Err(EngineError::InvalidConfig(format!(
            "at most {} computer players are supported",
            NATIONS.len()
        )));
    }

    let mut map = generate_map(config);
    // Placement uses its own stream so the game's draws start fresh
    let mut placement_rng = ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(1));

    let civ_count = config.ai_players as usize + usize::from(config.human);
    let starts = spread_tiles(&map, &mut placement_rng, civ_count, START_SPACING, &[]);
    if starts.len() < civ_count {
        return Err(EngineError::InvalidConfig(format!(
            "map has room for {} starting positions, {} needed",
            starts.len(),
            civ_count
        )));
    }
    let camps = spread_tiles(&map, &mut placement_rng, config.camps as usize, CAMP_SPACING, &starts);
    if camps.len() < config.camps as usize {
        tracing::warn!("Only placed {} of {} barbarian camps", camps.len(), config.camps);
    }
    for &camp in &camps {
        map.add_barbarian_camp(camp);
    }

    let mut game = GameData::new(map, Rules::with_defaults(), engine_config, GameRng::seeded(config.seed));
    game.add_player(Player::barbarians(PlayerId(0)));

    let mut civs = Vec::with_capacity(civ_count);
    if config.human {
        let id = game.add_player(Player::human(PlayerId(1), "Player", CivilizationId(1)));
        game.set_ui_controller(Some(id));
        civs.push(id);
    }
    for (i, name) in NATIONS.iter().take(config.ai_players as usize).enumerate() {
        let n = civs.len() as u32 + 1;
        let id = game.add_player(Player::ai(PlayerId(n), *name, CivilizationId(i as u32 + 2)));
        civs.push(id);
    }

    let settler = game.rules.unit_type_id("Settler")?;
    let warrior = game.rules.unit_type_id("Warrior")?;
    for (&player, &start) in civs.iter().zip(&starts) {
        game.spawn_unit(settler, player, start)?;
        game.spawn_unit(warrior, player, start)?;
    }

    tracing::info!(
        "Scenario ready: {}x{} map, {} players, {} camps",
        config.width,
        config.height,
        game.players.len(),
        camps.len()
    );
    Ok(game)
}
