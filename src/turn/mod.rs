//! Turn processing - scheduling, barbarian spawns and the event record

pub mod barbarians;
pub mod events;
pub mod notify;
pub mod scheduler;

pub use barbarians::{decide_spawn, spawn_barbarians, SpawnDecision};
pub use events::{EventLog, LoggedEvent, TurnEvent};
pub use notify::{NullListener, RecordingListener, TurnListener};
pub use scheduler::{on_begin_turn, turn_phase, TurnEngine, TurnOutcome, TurnPhase};
