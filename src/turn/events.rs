//! Events and turn logging

use serde::{Deserialize, Serialize};

use crate::core::types::{CityId, PlayerId, TileId, Turn, UnitId, UnitTypeId};
use crate::world::city::Producible;

/// Something the engine did (or refused to do) while resolving a turn
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TurnEvent {
    // Scheduling
    TurnBegan { turn: Turn },
    PlayerPlayed { player: PlayerId },
    AwaitingPlayer { player: PlayerId },
    AiFault { player: PlayerId, message: String },

    // Barbarians
    BarbarianSpawned { unit: UnitId, tile: TileId, sea: bool },

    // Cities
    CityGrew { city: CityId, size: i32 },
    CityShrank { city: CityId, size: i32 },
    CitizenUnassigned { city: CityId },
    ResidentRemovalBlocked { city: CityId, requested: i32 },
    UnitProduced { city: CityId, unit: UnitId, unit_type: UnitTypeId },
    PopulationCostUnpaid { city: CityId, unit: UnitId, unpaid: i32 },
    BuildingCompleted { city: CityId, building: String },
    ProductionChanged { city: CityId, item: Producible },
}

impl TurnEvent {
    /// Events recording an invariant guard or a fault rather than an
    /// ordinary outcome
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::AiFault { .. }
                | Self::ResidentRemovalBlocked { .. }
                | Self::PopulationCostUnpaid { .. }
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggedEvent {
    pub turn: Turn,
    pub event: TurnEvent,
}

/// Append-only record of every turn's events
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventLog {
    pub events: Vec<LoggedEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, turn: Turn, event: TurnEvent) {
        self.events.push(LoggedEvent { turn, event });
    }

    pub fn events_for_turn(&self, turn: Turn) -> impl Iterator<Item = &TurnEvent> {
        self.events
            .iter()
            .filter(move |e| e.turn == turn)
            .map(|e| &e.event)
    }

    pub fn errors(&self) -> impl Iterator<Item = &LoggedEvent> {
        self.events.iter().filter(|e| e.event.is_error())
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn to_json(&self) -> crate::core::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
