//! Turn scheduler - the re-entrant driver of the game
//!
//! A turn is:
//! 1. Scan players in list order, playing every computer player and
//!    passive human that has not yet played
//! 2. Clear the wait queue
//! 3. Roll barbarian spawns at every camp
//! 4. Resolve every city
//! 5. Advance the counter and start the next turn
//!
//! Meeting the UI controller during the scan suspends the driver: it
//! returns `TurnOutcome::AwaitingPlayer` and changes nothing else. All
//! progress lives in `GameData` (the per-player "has played" flags and the
//! turn counter), so resuming is just calling `advance_turn` again.

use crate::ai::{AiExecutor, BarbarianAi, PlayerAi};
use crate::city::assignment::{NearestTileAssigner, TileAssigner};
use crate::city::growth::{CityRules, StandardCityRules};
use crate::city::production::{resolve_cities, CityPolicies};
use crate::city::queue::{ProductionPlanner, RepeatingPlanner};
use crate::core::error::Result;
use crate::core::types::{PlayerId, Turn};
use crate::turn::barbarians::spawn_barbarians;
use crate::turn::events::TurnEvent;
use crate::turn::notify::{NullListener, TurnListener};
use crate::world::game::GameData;
use crate::world::player::TurnRole;

/// Where a turn stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// Some player still has to move
    ScanningPlayers,
    /// Every player has moved (or sits this turn out)
    ProductionPhase,
    /// Barbarians and cities are resolved; the counter is about to advance
    TurnComplete,
}

/// Why `advance_turn` returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Suspended for the UI controller
    AwaitingPlayer(PlayerId),
    /// A full turn finished with no UI controller among the players
    TurnCompleted { turn: Turn },
}

/// Phase a call to `advance_turn` would start in. Derived from the
/// persisted flags alone; `TurnComplete` exists only inside a running cycle.
pub fn turn_phase(game: &GameData) -> TurnPhase {
    let pending = game
        .players
        .iter()
        .any(|p| !p.has_played_this_turn && !p.exempt_on(game.turn));
    if pending {
        TurnPhase::ScanningPlayers
    } else {
        TurnPhase::ProductionPhase
    }
}

/// Start-of-turn reset: every player is unplayed again and every unit gets
/// its turn-start effects
pub fn on_begin_turn(game: &mut GameData) {
    for player in &mut game.players {
        player.has_played_this_turn = false;
    }

    let GameData { units, rules, map, .. } = &mut *game;
    for (id, unit) in units.iter_ordered_mut() {
        match (rules.unit_type(unit.unit_type), map.tile(unit.location)) {
            (Some(prototype), Some(tile)) => unit.on_begin_turn(prototype, tile),
            _ => tracing::warn!("{:?} has a dangling type or location, skipping turn start", id),
        }
    }

    game.log.record(game.turn, TurnEvent::TurnBegan { turn: game.turn });
    tracing::info!("Turn {} begins", game.turn);
}

/// Drives turns. Owns the pluggable policies; the world itself is passed
/// in on every call.
pub struct TurnEngine<L: TurnListener = NullListener> {
    barbarian_ai: Box<dyn AiExecutor>,
    player_ai: Box<dyn AiExecutor>,
    city_rules: Box<dyn CityRules>,
    assigner: Box<dyn TileAssigner>,
    planner: Box<dyn ProductionPlanner>,
    pub listener: L,
}

impl TurnEngine<NullListener> {
    pub fn new() -> Self {
        Self::with_listener(NullListener)
    }
}

impl Default for TurnEngine<NullListener> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: TurnListener> TurnEngine<L> {
    /// Engine with the standard policies reporting to `listener`
    pub fn with_listener(listener: L) -> Self {
        Self {
            barbarian_ai: Box::new(BarbarianAi::new()),
            player_ai: Box::new(PlayerAi::new()),
            city_rules: Box::new(StandardCityRules),
            assigner: Box::new(NearestTileAssigner),
            planner: Box::new(RepeatingPlanner),
            listener,
        }
    }

    pub fn with_barbarian_ai(mut self, ai: impl AiExecutor + 'static) -> Self {
        self.barbarian_ai = Box::new(ai);
        self
    }

    pub fn with_player_ai(mut self, ai: impl AiExecutor + 'static) -> Self {
        self.player_ai = Box::new(ai);
        self
    }

    pub fn with_city_rules(mut self, rules: impl CityRules + 'static) -> Self {
        self.city_rules = Box::new(rules);
        self
    }

    pub fn with_tile_assigner(mut self, assigner: impl TileAssigner + 'static) -> Self {
        self.assigner = Box::new(assigner);
        self
    }

    pub fn with_planner(mut self, planner: impl ProductionPlanner + 'static) -> Self {
        self.planner = Box::new(planner);
        self
    }

    /// Run turns until the UI controller has to act, or until one turn
    /// completes if no player is the UI controller.
    ///
    /// Only a broken world (camps without a barbarian player) is an error;
    /// faults inside a player's turn or a city are logged and skipped.
    pub fn advance_turn(&mut self, game: &mut GameData) -> Result<TurnOutcome> {
        let mut phase = turn_phase(game);
        loop {
            phase = match phase {
                TurnPhase::ScanningPlayers => match self.scan_players(game) {
                    Some(player) => return Ok(TurnOutcome::AwaitingPlayer(player)),
                    None => TurnPhase::ProductionPhase,
                },
                TurnPhase::ProductionPhase => {
                    self.run_production_phase(game)?;
                    TurnPhase::TurnComplete
                }
                TurnPhase::TurnComplete => {
                    let finished = game.turn;
                    game.turn += 1;
                    on_begin_turn(game);

                    let has_ui_player = game.players.iter().any(|p| Some(p.id) == game.ui_controller);
                    if !has_ui_player {
                        return Ok(TurnOutcome::TurnCompleted { turn: finished });
                    }
                    TurnPhase::ScanningPlayers
                }
            };
        }
    }

    /// The UI controller is done: mark it played and carry on. A controller
    /// that is not in the player list is ignored, as in `advance_turn`.
    pub fn end_turn(&mut self, game: &mut GameData) -> Result<TurnOutcome> {
        if let Some(id) = game.ui_controller {
            let pending = game.players.iter().any(|p| p.id == id && !p.has_played_this_turn);
            if pending {
                mark_played(game, id)?;
            }
        }
        self.advance_turn(game)
    }

    /// Play every pending player in list order. Returns the player to
    /// suspend for, if any.
    fn scan_players(&mut self, game: &mut GameData) -> Option<PlayerId> {
        for index in 0..game.players.len() {
            let player = &game.players[index];
            if player.has_played_this_turn || player.exempt_on(game.turn) {
                continue;
            }
            let id = player.id;

            let observed = match player.turn_role(game.ui_controller) {
                TurnRole::ActiveHuman => {
                    self.suspend_for(game, id);
                    return Some(id);
                }
                TurnRole::PassiveHuman => false,
                TurnRole::Barbarian { observed } => {
                    run_ai(self.barbarian_ai.as_mut(), id, game);
                    observed
                }
                TurnRole::GenericAi { observed } => {
                    run_ai(self.player_ai.as_mut(), id, game);
                    observed
                }
            };

            game.players[index].has_played_this_turn = true;
            game.log.record(game.turn, TurnEvent::PlayerPlayed { player: id });

            // Observer mode: let the UI look at the computer's move
            if observed {
                self.suspend_for(game, id);
                return Some(id);
            }
        }
        None
    }

    fn suspend_for(&mut self, game: &mut GameData, player: PlayerId) {
        tracing::debug!("Waiting on {:?} for turn {}", player, game.turn);
        game.log.record(game.turn, TurnEvent::AwaitingPlayer { player });
        self.listener.on_turn_started(player, game.turn);
    }

    fn run_production_phase(&mut self, game: &mut GameData) -> Result<()> {
        game.wait_queue.clear();
        self.listener.on_production_phase(game);

        spawn_barbarians(game)?;

        let policies = CityPolicies {
            rules: self.city_rules.as_ref(),
            assigner: self.assigner.as_ref(),
            planner: self.planner.as_ref(),
        };
        let results = resolve_cities(game, policies);
        tracing::info!(
            "Turn {} resolved: {} cities, {} units",
            game.turn,
            results.len(),
            game.units.len()
        );
        Ok(())
    }
}

/// Play one computer turn. A failing executor costs that player its turn,
/// not the whole game.
fn run_ai(executor: &mut dyn AiExecutor, player: PlayerId, game: &mut GameData) {
    if let Err(e) = executor.play_turn(player, game) {
        tracing::warn!("AI for {:?} failed on turn {}: {}", player, game.turn, e);
        game.log.record(
            game.turn,
            TurnEvent::AiFault {
                player,
                message: e.to_string(),
            },
        );
    }
}

fn mark_played(game: &mut GameData, player: PlayerId) -> Result<()> {
    game.player_mut(player)?.has_played_this_turn = true;
    game.log.record(game.turn, TurnEvent::PlayerPlayed { player });
    Ok(())
}
