//! Turnwright - turn engine for a turn-based strategy game
//!
//! `GameData` holds the world; `TurnEngine` advances it one turn at a
//! time, suspending whenever the player at the UI has to act.

pub mod ai;
pub mod city;
pub mod core;
pub mod scenario;
pub mod turn;
pub mod world;

pub use crate::core::{EngineConfig, EngineError, GameRng, Result};
pub use crate::turn::{TurnEngine, TurnOutcome};
pub use crate::world::GameData;
