//! Choosing tiles for new residents

use crate::core::types::CityId;
use crate::world::city::CityResident;
use crate::world::game::GameData;

/// Policy placing a new resident on a tile. Leaving `tile_worked` empty is
/// allowed (no free tile); the resident still joins the city.
pub trait TileAssigner {
    fn assign_new_citizen(&self, game: &GameData, city: CityId, resident: &mut CityResident);
}

/// Picks the closest unworked land tile in the city's radius
#[derive(Debug, Default, Clone, Copy)]
pub struct NearestTileAssigner;

impl TileAssigner for NearestTileAssigner {
    fn assign_new_citizen(&self, game: &GameData, city: CityId, resident: &mut CityResident) {
        let Ok(city) = game.city(city) else {
            return;
        };
        resident.tile_worked = game.free_tile_near(city.location, game.config.work_radius);
    }
}
