use thiserror::Error;

use crate::core::types::{CityId, PlayerId, TileId, UnitId};

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Player not found: {0:?}")]
    PlayerNotFound(PlayerId),

    #[error("Unit not found: {0:?}")]
    UnitNotFound(UnitId),

    #[error("City not found: {0:?}")]
    CityNotFound(CityId),

    #[error("Tile not found: {0:?}")]
    TileNotFound(TileId),

    #[error("Barbarian camps exist but no barbarian player is present")]
    NoBarbarianPlayer,

    #[error("Unknown unit type: {0}")]
    UnknownUnitType(String),

    #[error("Invalid move: {0}")]
    InvalidMove(String),

    #[error("AI error: {0}")]
    AiError(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
