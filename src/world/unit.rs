//! Units on the map (not to be confused with unit prototypes)

use serde::{Deserialize, Serialize};

use crate::core::types::{PlayerId, TileDirection, TileId, UnitTypeId};
use crate::world::map::Tile;
use crate::world::rules::{UnitDomain, UnitPrototype};

/// Orders a unit can be given from its current tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitAction {
    Fortify,
    Wait,
    Skip,
    Disband,
    BuildCity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapUnit {
    pub unit_type: UnitTypeId,
    pub owner: PlayerId,
    pub location: TileId,
    pub movement_points_remaining: i32,
    pub hit_points_remaining: i32,
    pub is_fortified: bool,
    pub facing: TileDirection,
    pub experience_level: String,
    pub available_actions: Vec<UnitAction>,
}

impl MapUnit {
    pub fn new(
        unit_type: UnitTypeId,
        owner: PlayerId,
        location: TileId,
        experience_level: impl Into<String>,
        hit_points: i32,
    ) -> Self {
        Self {
            unit_type,
            owner,
            location,
            movement_points_remaining: 0,
            hit_points_remaining: hit_points,
            is_fortified: false,
            facing: TileDirection::default(),
            experience_level: experience_level.into(),
            available_actions: Vec::new(),
        }
    }

    pub fn fortified(mut self) -> Self {
        self.is_fortified = true;
        self
    }

    /// Turn-start effects: movement is replenished and the action list
    /// rebuilt for the unit's current tile
    pub fn on_begin_turn(&mut self, prototype: &UnitPrototype, tile: &Tile) {
        self.movement_points_remaining = prototype.movement;
        self.refresh_actions(prototype, tile);
    }

    pub fn refresh_actions(&mut self, prototype: &UnitPrototype, tile: &Tile) {
        let mut actions = Vec::with_capacity(5);
        if !self.is_fortified && prototype.domain == UnitDomain::Land {
            actions.push(UnitAction::Fortify);
        }
        actions.push(UnitAction::Wait);
        actions.push(UnitAction::Skip);
        if prototype.can_found_city && tile.is_land() {
            actions.push(UnitAction::BuildCity);
        }
        actions.push(UnitAction::Disband);
        self.available_actions = actions;
    }

    pub fn can_move(&self) -> bool {
        self.movement_points_remaining > 0
    }

    /// A unit needs orders when it can still move and hasn't dug in
    pub fn awaiting_orders(&self) -> bool {
        self.can_move() && !self.is_fortified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::TileCoord;
    use crate::world::map::Terrain;

    fn tile(terrain: Terrain) -> Tile {
        Tile {
            id: TileId(0),
            coord: TileCoord::new(0, 0),
            terrain,
            is_barbarian_camp: false,
        }
    }

    #[test]
    fn test_begin_turn_restores_movement() {
        let proto = UnitPrototype::land("Horseman", 20, 2, 1, 2);
        let mut unit = MapUnit::new(UnitTypeId(5), PlayerId(1), TileId(0), "regular", 3);
        assert!(!unit.can_move());

        unit.on_begin_turn(&proto, &tile(Terrain::Plains));
        assert_eq!(unit.movement_points_remaining, 2);
        assert!(unit.awaiting_orders());
    }

    #[test]
    fn test_founder_actions_on_land_only() {
        let settler = UnitPrototype::land("Settler", 30, 0, 0, 1).founder();
        let mut unit = MapUnit::new(UnitTypeId(1), PlayerId(1), TileId(0), "regular", 3);

        unit.refresh_actions(&settler, &tile(Terrain::Grassland));
        assert!(unit.available_actions.contains(&UnitAction::BuildCity));

        unit.refresh_actions(&settler, &tile(Terrain::Coast));
        assert!(!unit.available_actions.contains(&UnitAction::BuildCity));
    }

    #[test]
    fn test_fortified_unit_has_no_fortify_action() {
        let proto = UnitPrototype::land("Warrior", 10, 1, 1, 1);
        let mut unit = MapUnit::new(UnitTypeId(0), PlayerId(0), TileId(0), "regular", 3).fortified();
        unit.on_begin_turn(&proto, &tile(Terrain::Grassland));
        assert!(!unit.available_actions.contains(&UnitAction::Fortify));
        assert!(!unit.awaiting_orders());
    }
}
