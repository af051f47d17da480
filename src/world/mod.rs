//! World state store - players, units, cities and the map

pub mod city;
pub mod game;
pub mod map;
pub mod player;
pub mod rules;
pub mod store;
pub mod unit;
pub mod wait_queue;

pub use city::{City, CityResident, Producible};
pub use game::GameData;
pub use map::{GameMap, Terrain, Tile};
pub use player::{Player, PlayerKind, TurnRole};
pub use rules::{BarbarianInfo, BuildingPrototype, ExperienceLevel, Rules, UnitDomain, UnitPrototype};
pub use store::EntityStore;
pub use unit::{MapUnit, UnitAction};
pub use wait_queue::WaitQueue;
