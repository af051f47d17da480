//! Hooks for the presentation layer

use crate::core::types::{PlayerId, Turn};
use crate::world::game::GameData;

/// Signals the scheduler emits. Both are fire-and-forget: the scheduler
/// never waits on the listener.
pub trait TurnListener {
    /// The scheduler has suspended for `player`, the UI controller
    fn on_turn_started(&mut self, player: PlayerId, turn: Turn);

    /// Every player has moved; barbarians and cities are about to resolve
    fn on_production_phase(&mut self, _game: &GameData) {}
}

/// Discards every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NullListener;

impl TurnListener for NullListener {
    fn on_turn_started(&mut self, _player: PlayerId, _turn: Turn) {}
}

/// Keeps what it was told, for tests and the headless driver
#[derive(Debug, Default, Clone)]
pub struct RecordingListener {
    pub turns_started: Vec<(PlayerId, Turn)>,
    /// `has_played_this_turn` of every player, in list order, each time
    /// the production phase began
    pub production_snapshots: Vec<Vec<bool>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TurnListener for RecordingListener {
    fn on_turn_started(&mut self, player: PlayerId, turn: Turn) {
        self.turns_started.push((player, turn));
    }

    fn on_production_phase(&mut self, game: &GameData) {
        self.production_snapshots
            .push(game.players.iter().map(|p| p.has_played_this_turn).collect());
    }
}
