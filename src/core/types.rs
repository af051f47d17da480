//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Turn counter (monotonic, starts at 0)
pub type Turn = u32;

/// Stable identifier for a player in the game's player list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Generational handle into the unit arena
///
/// A handle stays valid for the lifetime of the unit; once the unit is
/// removed its slot generation is bumped and stale handles resolve to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId {
    pub index: u32,
    pub generation: u32,
}

impl UnitId {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

/// Generational handle into the city arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CityId {
    pub index: u32,
    pub generation: u32,
}

impl CityId {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

/// Arena handles share one shape so the store can be generic over them
pub trait ArenaId: Copy {
    fn from_parts(index: u32, generation: u32) -> Self;
    fn index(&self) -> u32;
    fn generation(&self) -> u32;
}

impl ArenaId for UnitId {
    fn from_parts(index: u32, generation: u32) -> Self {
        Self::new(index, generation)
    }
    fn index(&self) -> u32 {
        self.index
    }
    fn generation(&self) -> u32 {
        self.generation
    }
}

impl ArenaId for CityId {
    fn from_parts(index: u32, generation: u32) -> Self {
        Self::new(index, generation)
    }
    fn index(&self) -> u32 {
        self.index
    }
    fn generation(&self) -> u32 {
        self.generation
    }
}

/// Index of a tile in the map's row-major tile list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u32);

/// Civilization a player leads; residents take it as their nationality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CivilizationId(pub u32);

/// Index into the rules' unit prototype table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitTypeId(pub u16);

/// Grid position (x grows east, y grows south)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(&self, direction: TileDirection) -> Self {
        let (dx, dy) = direction.coord_diff();
        Self::new(self.x + dx, self.y + dy)
    }
}

/// The eight compass directions a unit can face or move in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileDirection {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    #[default]
    SouthWest,
    West,
    NorthWest,
}

impl TileDirection {
    pub const ALL: [TileDirection; 8] = [
        TileDirection::North,
        TileDirection::NorthEast,
        TileDirection::East,
        TileDirection::SouthEast,
        TileDirection::South,
        TileDirection::SouthWest,
        TileDirection::West,
        TileDirection::NorthWest,
    ];

    pub fn coord_diff(&self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::NorthEast => (1, -1),
            Self::East => (1, 0),
            Self::SouthEast => (1, 1),
            Self::South => (0, 1),
            Self::SouthWest => (-1, 1),
            Self::West => (-1, 0),
            Self::NorthWest => (-1, -1),
        }
    }

    pub fn reversed(&self) -> Self {
        match self {
            Self::North => Self::South,
            Self::NorthEast => Self::SouthWest,
            Self::East => Self::West,
            Self::SouthEast => Self::NorthWest,
            Self::South => Self::North,
            Self::SouthWest => Self::NorthEast,
            Self::West => Self::East,
            Self::NorthWest => Self::SouthEast,
        }
    }
}
