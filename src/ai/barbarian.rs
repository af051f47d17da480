//! Barbarian AI
//!
//! Each camp keeps one fortified defender. Every other barbarian roams.

use ahash::AHashSet;

use crate::ai::{wander, AiExecutor};
use crate::core::error::Result;
use crate::core::types::{PlayerId, TileId};
use crate::world::game::GameData;

#[derive(Debug, Default)]
pub struct BarbarianAi;

impl BarbarianAi {
    pub fn new() -> Self {
        Self
    }
}

impl AiExecutor for BarbarianAi {
    fn play_turn(&mut self, player: PlayerId, game: &mut GameData) -> Result<()> {
        let info = game.rules.barbarian_info;
        let mut guarded: AHashSet<TileId> = AHashSet::new();

        for unit_id in game.units_of(player) {
            let unit = game.unit(unit_id)?;
            let location = unit.location;
            let is_camp = game.map.tile(location).is_some_and(|t| t.is_barbarian_camp);

            // First land unit found on a camp holds it
            if is_camp && unit.unit_type == info.basic_barbarian && guarded.insert(location) {
                game.unit_mut(unit_id)?.is_fortified = true;
                continue;
            }

            game.unit_mut(unit_id)?.is_fortified = false;
            let steps = wander(game, unit_id)?;
            tracing::debug!("Barbarian {:?} moved {} tiles", unit_id, steps);
        }

        Ok(())
    }
}
