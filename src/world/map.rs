//! Game map - square tile grid with optional east-west wrap
//!
//! Units and cities refer to tiles by `TileId`; the units standing on a
//! tile are a query over the unit arena rather than a list kept here.

use serde::{Deserialize, Serialize};

use crate::core::types::{TileCoord, TileDirection, TileId};

/// Terrain types relevant to movement and yields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Terrain {
    #[default]
    Grassland,
    Plains,
    Hills,
    Mountains,
    Coast,
    Ocean,
}

impl Terrain {
    pub fn is_water(&self) -> bool {
        matches!(self, Self::Coast | Self::Ocean)
    }
}

/// A single map tile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub coord: TileCoord,
    pub terrain: Terrain,
    pub is_barbarian_camp: bool,
}

impl Tile {
    pub fn is_water(&self) -> bool {
        self.terrain.is_water()
    }

    pub fn is_land(&self) -> bool {
        !self.terrain.is_water()
    }
}

/// The world map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMap {
    pub width: i32,
    pub height: i32,
    /// Whether x wraps around (the map is a cylinder)
    pub wrap_x: bool,
    tiles: Vec<Tile>,
    /// Camp tiles in spawn order; the order fixes the random draw order
    barbarian_camps: Vec<TileId>,
}

impl GameMap {
    pub fn new(width: i32, height: i32, wrap_x: bool, terrain: Terrain) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let mut tiles = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                tiles.push(Tile {
                    id: TileId((y * width + x) as u32),
                    coord: TileCoord::new(x, y),
                    terrain,
                    is_barbarian_camp: false,
                });
            }
        }
        Self {
            width,
            height,
            wrap_x,
            tiles,
            barbarian_camps: Vec::new(),
        }
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.0 as usize)
    }

    pub fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(id.0 as usize)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Resolve a coordinate, applying horizontal wrap when enabled
    pub fn tile_id_at(&self, coord: TileCoord) -> Option<TileId> {
        if coord.y < 0 || coord.y >= self.height {
            return None;
        }
        let x = if self.wrap_x {
            coord.x.rem_euclid(self.width)
        } else if coord.x < 0 || coord.x >= self.width {
            return None;
        } else {
            coord.x
        };
        Some(TileId((coord.y * self.width + x) as u32))
    }

    pub fn set_terrain(&mut self, id: TileId, terrain: Terrain) {
        if let Some(tile) = self.tile_mut(id) {
            tile.terrain = terrain;
        }
    }

    /// Neighbor of `id` one step in `direction`, if it exists
    pub fn neighbor(&self, id: TileId, direction: TileDirection) -> Option<TileId> {
        let tile = self.tile(id)?;
        self.tile_id_at(tile.coord.step(direction))
    }

    /// All existing neighbors with the direction that reaches them
    pub fn neighbors(&self, id: TileId) -> Vec<(TileDirection, TileId)> {
        TileDirection::ALL
            .iter()
            .filter_map(|&dir| self.neighbor(id, dir).map(|n| (dir, n)))
            .collect()
    }

    /// True when any adjacent tile is water
    pub fn neighbors_water(&self, id: TileId) -> bool {
        self.neighbors(id)
            .iter()
            .any(|(_, n)| self.tile(*n).is_some_and(Tile::is_water))
    }

    /// Chebyshev distance, accounting for wrap
    pub fn distance(&self, a: TileId, b: TileId) -> Option<i32> {
        let a = self.tile(a)?.coord;
        let b = self.tile(b)?.coord;
        let mut dx = (a.x - b.x).abs();
        if self.wrap_x {
            dx = dx.min(self.width - dx);
        }
        Some(dx.max((a.y - b.y).abs()))
    }

    /// Tiles within `radius` of `center` (excluding the center), in
    /// ascending distance then ascending id
    pub fn tiles_within(&self, center: TileId, radius: i32) -> Vec<TileId> {
        let Some(origin) = self.tile(center).map(|t| t.coord) else {
            return Vec::new();
        };
        let mut found = Vec::new();
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let coord = TileCoord::new(origin.x + dx, origin.y + dy);
                if let Some(id) = self.tile_id_at(coord) {
                    if !found.contains(&id) {
                        found.push(id);
                    }
                }
            }
        }
        found.sort_by_key(|&id| (self.distance(center, id).unwrap_or(i32::MAX), id));
        found
    }

    /// Mark a tile as a barbarian camp; camps spawn in insertion order
    pub fn add_barbarian_camp(&mut self, id: TileId) -> bool {
        match self.tile_mut(id) {
            Some(tile) if !tile.is_barbarian_camp => {
                tile.is_barbarian_camp = true;
                self.barbarian_camps.push(id);
                true
            }
            _ => false,
        }
    }

    pub fn remove_barbarian_camp(&mut self, id: TileId) {
        if let Some(tile) = self.tile_mut(id) {
            tile.is_barbarian_camp = false;
        }
        self.barbarian_camps.retain(|&camp| camp != id);
    }

    pub fn barbarian_camps(&self) -> &[TileId] {
        &self.barbarian_camps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_neighbors() {
        let map = GameMap::new(5, 3, true, Terrain::Grassland);
        let west_edge = map.tile_id_at(TileCoord::new(0, 1)).unwrap();
        let wrapped = map.neighbor(west_edge, TileDirection::West).unwrap();
        assert_eq!(map.tile(wrapped).unwrap().coord, TileCoord::new(4, 1));
        assert_eq!(map.neighbors(west_edge).len(), 8);
    }

    #[test]
    fn test_no_wrap_at_edges() {
        let map = GameMap::new(5, 3, false, Terrain::Grassland);
        let corner = map.tile_id_at(TileCoord::new(0, 0)).unwrap();
        assert_eq!(map.neighbor(corner, TileDirection::West), None);
        assert_eq!(map.neighbor(corner, TileDirection::North), None);
        assert_eq!(map.neighbors(corner).len(), 3);
    }

    #[test]
    fn test_neighbors_water() {
        let mut map = GameMap::new(4, 4, false, Terrain::Grassland);
        let camp = map.tile_id_at(TileCoord::new(1, 1)).unwrap();
        assert!(!map.neighbors_water(camp));

        let sea = map.tile_id_at(TileCoord::new(2, 2)).unwrap();
        map.set_terrain(sea, Terrain::Coast);
        assert!(map.neighbors_water(camp));
    }

    #[test]
    fn test_wrapped_distance() {
        let map = GameMap::new(10, 3, true, Terrain::Grassland);
        let a = map.tile_id_at(TileCoord::new(0, 0)).unwrap();
        let b = map.tile_id_at(TileCoord::new(9, 1)).unwrap();
        assert_eq!(map.distance(a, b), Some(1));
    }

    #[test]
    fn test_tiles_within_sorted_by_distance() {
        let map = GameMap::new(7, 7, false, Terrain::Grassland);
        let center = map.tile_id_at(TileCoord::new(3, 3)).unwrap();
        let ring = map.tiles_within(center, 2);
        assert_eq!(ring.len(), 24);
        assert!(ring[..8].iter().all(|&t| map.distance(center, t) == Some(1)));
    }

    #[test]
    fn test_camp_registration_is_ordered_and_unique() {
        let mut map = GameMap::new(4, 4, false, Terrain::Grassland);
        assert!(map.add_barbarian_camp(TileId(5)));
        assert!(map.add_barbarian_camp(TileId(2)));
        assert!(!map.add_barbarian_camp(TileId(5)));
        assert_eq!(map.barbarian_camps(), &[TileId(5), TileId(2)]);

        map.remove_barbarian_camp(TileId(5));
        assert_eq!(map.barbarian_camps(), &[TileId(2)]);
        assert!(!map.tile(TileId(5)).unwrap().is_barbarian_camp);
    }
}
