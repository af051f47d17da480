//! Computer players
//!
//! The scheduler calls an `AiExecutor` once per computer player per turn.
//! Executors move the player's units but never touch the player's
//! "has played" flag; the scheduler owns that.

pub mod barbarian;
pub mod player;

pub use barbarian::BarbarianAi;
pub use player::PlayerAi;

use crate::core::error::Result;
use crate::core::types::{PlayerId, UnitId};
use crate::world::game::GameData;

/// Strategy that plays one computer player's movement phase
pub trait AiExecutor {
    fn play_turn(&mut self, player: PlayerId, game: &mut GameData) -> Result<()>;
}

/// Spend a unit's movement stepping to random enterable neighbors.
///
/// One draw per step from the shared stream. A unit with nowhere to go
/// simply stays put. Returns the number of steps taken.
pub fn wander(game: &mut GameData, unit: UnitId) -> Result<u32> {
    let mut steps = 0;
    while game.unit(unit)?.can_move() {
        let location = game.unit(unit)?.location;
        let options: Vec<_> = game
            .map
            .neighbors(location)
            .into_iter()
            .filter(|&(_, tile)| game.can_enter(unit, tile))
            .map(|(dir, _)| dir)
            .collect();

        let Some(choice) = game.rng.pick(options.len()) else {
            tracing::debug!("{:?} has no legal move, staying idle", unit);
            break;
        };
        game.move_unit(unit, options[choice])?;
        steps += 1;
    }
    Ok(steps)
}
