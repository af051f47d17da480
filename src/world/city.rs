//! Cities, their residents and what they are producing

use serde::{Deserialize, Serialize};

use crate::core::types::{CivilizationId, PlayerId, TileId, UnitTypeId};

/// Something a city can spend shields on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Producible {
    Unit(UnitTypeId),
    Building(String),
}

/// One point of city population
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityResident {
    pub nationality: CivilizationId,
    /// `None` for residents with no tile to work
    pub tile_worked: Option<TileId>,
}

impl CityResident {
    pub fn new(nationality: CivilizationId) -> Self {
        Self {
            nationality,
            tile_worked: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub owner: PlayerId,
    pub location: TileId,
    /// City size is the resident count; it never drops below one
    residents: Vec<CityResident>,
    pub producing: Producible,
    pub shields_stored: i32,
    pub food_stored: i32,
    pub buildings: Vec<String>,
}

impl City {
    /// A freshly founded size-1 city
    pub fn new(
        name: impl Into<String>,
        owner: PlayerId,
        location: TileId,
        founder: CivilizationId,
        producing: Producible,
    ) -> Self {
        Self {
            name: name.into(),
            owner,
            location,
            residents: vec![CityResident::new(founder)],
            producing,
            shields_stored: 0,
            food_stored: 0,
            buildings: Vec::new(),
        }
    }

    pub fn size(&self) -> i32 {
        self.residents.len() as i32
    }

    pub fn residents(&self) -> &[CityResident] {
        &self.residents
    }

    pub fn first_resident_mut(&mut self) -> Option<&mut CityResident> {
        self.residents.first_mut()
    }

    pub fn add_resident(&mut self, resident: CityResident) {
        self.residents.push(resident);
    }

    /// Remove the most recently added resident, refusing to empty the city
    pub fn remove_resident(&mut self) -> Option<CityResident> {
        if self.residents.len() <= 1 {
            return None;
        }
        self.residents.pop()
    }

    pub fn worked_tiles(&self) -> impl Iterator<Item = TileId> + '_ {
        self.residents.iter().filter_map(|r| r.tile_worked)
    }

    pub fn has_building(&self, name: &str) -> bool {
        self.buildings.iter().any(|b| b == name)
    }
}
