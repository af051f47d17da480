//! GameData - the session's authoritative world state
//!
//! Units and cities live in generational arenas. A player's units and a
//! tile's units are queries over the unit arena, so registering or removing
//! a unit happens in exactly one place and the views cannot drift apart.

use crate::core::config::EngineConfig;
use crate::core::error::{EngineError, Result};
use crate::core::rng::GameRng;
use crate::core::types::{CityId, PlayerId, TileDirection, TileId, Turn, UnitId, UnitTypeId};
use crate::turn::events::EventLog;
use crate::world::city::City;
use crate::world::map::GameMap;
use crate::world::player::Player;
use crate::world::rules::{Rules, UnitDomain};
use crate::world::store::EntityStore;
use crate::world::unit::MapUnit;
use crate::world::wait_queue::WaitQueue;

pub struct GameData {
    /// Current turn (starts at 0)
    pub turn: Turn,
    /// Players in scheduling order
    pub players: Vec<Player>,
    pub units: EntityStore<UnitId, MapUnit>,
    pub cities: EntityStore<CityId, City>,
    pub map: GameMap,
    pub rules: Rules,
    pub config: EngineConfig,
    /// The one shared random stream
    pub rng: GameRng,
    /// Player whose unplayed turn hands control to the UI
    pub ui_controller: Option<PlayerId>,
    pub wait_queue: WaitQueue,
    pub log: EventLog,
}

impl GameData {
    pub fn new(map: GameMap, rules: Rules, config: EngineConfig, rng: GameRng) -> Self {
        Self {
            turn: 0,
            players: Vec::new(),
            units: EntityStore::new(),
            cities: EntityStore::new(),
            map,
            rules,
            config,
            rng,
            ui_controller: None,
            wait_queue: WaitQueue::new(),
            log: EventLog::new(),
        }
    }

    // === PLAYERS ===

    pub fn add_player(&mut self, player: Player) -> PlayerId {
        let id = player.id;
        self.players.push(player);
        id
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or(EngineError::PlayerNotFound(id))
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(EngineError::PlayerNotFound(id))
    }

    /// The designated barbarian player (the first one in list order)
    pub fn barbarian_player(&self) -> Result<PlayerId> {
        self.players
            .iter()
            .find(|p| p.is_barbarians())
            .map(|p| p.id)
            .ok_or(EngineError::NoBarbarianPlayer)
    }

    pub fn set_ui_controller(&mut self, player: Option<PlayerId>) {
        self.ui_controller = player;
    }

    // === UNITS ===

    /// Register a unit. This is the only way units enter the world.
    pub fn insert_unit(&mut self, unit: MapUnit) -> Result<UnitId> {
        self.player(unit.owner)?;
        if self.map.tile(unit.location).is_none() {
            return Err(EngineError::TileNotFound(unit.location));
        }
        if self.rules.unit_type(unit.unit_type).is_none() {
            return Err(EngineError::UnknownUnitType(format!("{:?}", unit.unit_type)));
        }
        Ok(self.units.insert(unit))
    }

    /// Create a unit of `unit_type` at the default experience level with
    /// full movement
    pub fn spawn_unit(&mut self, unit_type: UnitTypeId, owner: PlayerId, location: TileId) -> Result<UnitId> {
        let unit = self.new_unit(unit_type, owner, location)?;
        self.insert_unit(unit)
    }

    /// Build (but don't register) a unit at the default experience level
    pub fn new_unit(&self, unit_type: UnitTypeId, owner: PlayerId, location: TileId) -> Result<MapUnit> {
        let prototype = self
            .rules
            .unit_type(unit_type)
            .ok_or_else(|| EngineError::UnknownUnitType(format!("{:?}", unit_type)))?;
        let tile = self.map.tile(location).ok_or(EngineError::TileNotFound(location))?;
        let level = self.rules.default_experience().ok_or_else(|| {
            EngineError::InvalidConfig(format!(
                "default experience level '{}' is not defined",
                self.rules.default_experience_level
            ))
        })?;

        let mut unit = MapUnit::new(unit_type, owner, location, level.key.clone(), level.base_hit_points);
        unit.on_begin_turn(prototype, tile);
        Ok(unit)
    }

    /// Remove a unit from the world (death, disband)
    pub fn remove_unit(&mut self, id: UnitId) -> Result<MapUnit> {
        let unit = self.units.remove(id).ok_or(EngineError::UnitNotFound(id))?;
        self.wait_queue.remove(id);
        Ok(unit)
    }

    pub fn unit(&self, id: UnitId) -> Result<&MapUnit> {
        self.units.get(id).ok_or(EngineError::UnitNotFound(id))
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Result<&mut MapUnit> {
        self.units.get_mut(id).ok_or(EngineError::UnitNotFound(id))
    }

    pub fn units_on_tile(&self, tile: TileId) -> Vec<UnitId> {
        self.units
            .iter_ordered()
            .filter(|(_, u)| u.location == tile)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn units_of(&self, player: PlayerId) -> Vec<UnitId> {
        self.units
            .iter_ordered()
            .filter(|(_, u)| u.owner == player)
            .map(|(id, _)| id)
            .collect()
    }

    /// Whether `unit` could enter `tile` (domain and existence checks only)
    pub fn can_enter(&self, unit: UnitId, tile: TileId) -> bool {
        let (Some(unit), Some(tile)) = (self.units.get(unit), self.map.tile(tile)) else {
            return false;
        };
        match self.rules.unit_type(unit.unit_type).map(|p| p.domain) {
            Some(UnitDomain::Land) => tile.is_land(),
            Some(UnitDomain::Sea) => tile.is_water(),
            None => false,
        }
    }

    /// Move a unit one step, spending a movement point and turning it to
    /// face the direction of travel
    pub fn move_unit(&mut self, id: UnitId, direction: TileDirection) -> Result<TileId> {
        let unit = self.unit(id)?;
        if !unit.can_move() {
            return Err(EngineError::InvalidMove(format!("{:?} has no movement left", id)));
        }
        let target = self
            .map
            .neighbor(unit.location, direction)
            .ok_or_else(|| EngineError::InvalidMove(format!("{:?} off the map edge", direction)))?;
        if !self.can_enter(id, target) {
            return Err(EngineError::InvalidMove(format!("{:?} cannot enter {:?}", id, target)));
        }

        let unit = self.unit_mut(id)?;
        unit.location = target;
        unit.facing = direction;
        unit.is_fortified = false;
        unit.movement_points_remaining -= 1;
        Ok(target)
    }

    /// Defer a unit until the player has handled the others
    pub fn wait_unit(&mut self, id: UnitId) -> Result<()> {
        self.unit(id)?;
        self.wait_queue.push(id);
        Ok(())
    }

    /// Next unit to select for `player`: units needing orders in arena
    /// order, then waited units in the order they were deferred
    pub fn next_unit_awaiting_orders(&self, player: PlayerId) -> Option<UnitId> {
        let fresh = self.units.iter_ordered().find(|(id, u)| {
            u.owner == player && u.awaiting_orders() && !self.wait_queue.contains(*id)
        });
        if let Some((id, _)) = fresh {
            return Some(id);
        }
        self.wait_queue
            .iter()
            .find(|&id| self.units.get(id).is_some_and(|u| u.owner == player && u.awaiting_orders()))
    }

    // === CITIES ===

    pub fn add_city(&mut self, city: City) -> Result<CityId> {
        self.player(city.owner)?;
        if self.map.tile(city.location).is_none() {
            return Err(EngineError::TileNotFound(city.location));
        }
        Ok(self.cities.insert(city))
    }

    pub fn city(&self, id: CityId) -> Result<&City> {
        self.cities.get(id).ok_or(EngineError::CityNotFound(id))
    }

    pub fn city_mut(&mut self, id: CityId) -> Result<&mut City> {
        self.cities.get_mut(id).ok_or(EngineError::CityNotFound(id))
    }

    pub fn cities_of(&self, player: PlayerId) -> Vec<CityId> {
        self.cities
            .iter_ordered()
            .filter(|(_, c)| c.owner == player)
            .map(|(id, _)| id)
            .collect()
    }

    /// Tiles currently worked by any city's residents
    pub fn is_tile_worked(&self, tile: TileId) -> bool {
        self.cities
            .iter_ordered()
            .any(|(_, c)| c.location == tile || c.worked_tiles().any(|t| t == tile))
    }

    /// Nearest unworked land tile within `radius` of `center`, ties broken
    /// by tile id
    pub fn free_tile_near(&self, center: TileId, radius: i32) -> Option<TileId> {
        self.map.tiles_within(center, radius).into_iter().find(|&tile| {
            self.map.tile(tile).is_some_and(|t| t.is_land()) && !self.is_tile_worked(tile)
        })
    }

    /// World-state invariants that must hold between turns; returns one
    /// message per violation
    pub fn invariant_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();
        for (id, unit) in self.units.iter_ordered() {
            if self.player(unit.owner).is_err() {
                violations.push(format!("{:?} owned by missing {:?}", id, unit.owner));
            }
            if self.map.tile(unit.location).is_none() {
                violations.push(format!("{:?} located on missing {:?}", id, unit.location));
            }
        }
        for (id, city) in self.cities.iter_ordered() {
            if city.size() < 1 {
                violations.push(format!("{:?} ({}) has size {}", id, city.name, city.size()));
            }
        }
        violations
    }
}
