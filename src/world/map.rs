//! The tile grid and its depletion tracking
//!
//! Tiles are allocated once and re-initialized on every reset. Depleted
//! tiles are tracked in an insertion-ordered queue so regeneration is
//! visited in the same order on every run with the same seed.

use rand::RngCore;

use crate::core::config::{RealmConfig, RegenConfig};
use crate::core::error::{RealmError, Result};
use crate::core::types::{EntityId, Position};
use crate::world::drop_table::DropTable;
use crate::world::pathfinding::{AStar, PathCache, PathSearch};
use crate::world::terrain::{center_metric, process_border, RawTerrain, TerrainGenerator};
use crate::world::tile::Tile;

pub struct TileMap {
    size: usize,
    tiles: Vec<Tile>,
    habitable: Vec<bool>,
    regen: RegenConfig,
    /// Depleted tiles in the order they were depleted
    pending: Vec<usize>,
    in_pending: Vec<bool>,
    path_cache: PathCache,
    search: Box<dyn PathSearch + Send + Sync>,
}

impl TileMap {
    pub fn new(config: &RealmConfig) -> Self {
        Self::with_search(config, Box::new(AStar))
    }

    pub fn with_search(config: &RealmConfig, search: Box<dyn PathSearch + Send + Sync>) -> Self {
        let size = config.map.size;
        let tiles = (0..size * size)
            .map(|idx| Tile::new(Position::new(idx / size, idx % size)))
            .collect();

        Self {
            size,
            tiles,
            habitable: vec![false; size * size],
            regen: config.regen.clone(),
            pending: Vec::new(),
            in_pending: vec![false; size * size],
            path_cache: PathCache::new(),
            search,
        }
    }

    /// Load a new episode's terrain into the existing tiles
    pub fn reset(
        &mut self,
        config: &RealmConfig,
        raw: &RawTerrain,
        terrain: &dyn TerrainGenerator,
        rng: &mut dyn RngCore,
    ) -> Result<()> {
        if raw.size != self.size || raw.map.len() != self.size * self.size {
            return Err(RealmError::ConfigMismatch {
                expected: self.size,
                actual: raw.size,
            });
        }

        let metric = center_metric(self.size);
        let mut materials = terrain.generate(config, raw, &metric, rng);
        if materials.len() != self.tiles.len() {
            return Err(RealmError::ConfigMismatch {
                expected: self.size,
                actual: (materials.len() as f64).sqrt() as usize,
            });
        }
        process_border(config, &mut materials);

        for (idx, material) in materials.into_iter().enumerate() {
            let tile = &mut self.tiles[idx];
            tile.reset(material);
            self.habitable[idx] = tile.habitable;
        }

        self.regen = config.regen.clone();
        self.pending.clear();
        self.in_pending.iter_mut().for_each(|flag| *flag = false);
        self.path_cache.invalidate();

        tracing::info!(
            "Map reset: {}x{} grid, {} habitable tiles",
            self.size,
            self.size,
            self.habitable.iter().filter(|h| **h).count()
        );
        Ok(())
    }

    #[inline]
    fn index(&self, pos: Position) -> Option<usize> {
        self.is_valid_pos(pos.row, pos.col)
            .then(|| pos.row * self.size + pos.col)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_valid_pos(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        self.index(pos).map(|idx| &self.tiles[idx])
    }

    pub fn tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        self.index(pos).map(|idx| &mut self.tiles[idx])
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn habitable(&self, pos: Position) -> bool {
        self.index(pos).map_or(false, |idx| self.habitable[idx])
    }

    /// Habitable and unoccupied
    pub fn is_free(&self, pos: Position) -> bool {
        self.tile(pos)
            .map_or(false, |tile| tile.habitable && !tile.is_occupied())
    }

    pub fn add_entity(&mut self, pos: Position, id: EntityId) {
        if let Some(tile) = self.tile_mut(pos) {
            tile.add_entity(id);
        }
    }

    pub fn remove_entity(&mut self, pos: Position, id: EntityId) {
        if let Some(tile) = self.tile_mut(pos) {
            tile.remove_entity(id);
        }
    }

    /// Called by actions that harvest a resource tile
    ///
    /// The returned table reflects the tile before depletion.
    pub fn harvest(&mut self, row: usize, col: usize, deplete: bool) -> Option<DropTable> {
        let idx = self.index(Position::new(row, col))?;
        let regen_ticks = self.regen.ticks_for(self.tiles[idx].material);
        let table = self.tiles[idx].harvest(deplete, regen_ticks)?;

        if deplete && !self.in_pending[idx] {
            self.in_pending[idx] = true;
            self.pending.push(idx);
        }
        Some(table)
    }

    /// Advance regeneration of every depleted tile. Returns how many were restored.
    pub fn step(&mut self) -> usize {
        let mut restored = 0;
        for idx in self.pending.clone() {
            if self.tiles[idx].step() {
                restored += 1;
            }
        }

        let tiles = &self.tiles;
        let in_pending = &mut self.in_pending;
        self.pending.retain(|&idx| {
            let keep = tiles[idx].depleted;
            if !keep {
                in_pending[idx] = false;
            }
            keep
        });

        if restored > 0 {
            tracing::debug!("Regenerated {} tiles, {} still depleted", restored, self.pending.len());
        }
        restored
    }

    /// Positions of depleted tiles in depletion order
    pub fn pending(&self) -> Vec<Position> {
        self.pending.iter().map(|&idx| self.tiles[idx].pos).collect()
    }

    /// Memoized path between two positions
    pub fn find_path(&mut self, start: Position, goal: Position) -> Option<&[Position]> {
        self.path_cache
            .get_or_search(self.search.as_ref(), &self.habitable, self.size, start, goal)
    }

    pub fn cached_paths(&self) -> usize {
        self.path_cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::material::Material;
    use crate::world::terrain::FractalTerrain;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn config_3x3() -> RealmConfig {
        let mut config = RealmConfig::default();
        config.map.size = 5;
        config.map.center = 3;
        config.map.border = 1;
        config.map.vision_radius = 0;
        config.map.reset_from_fractal = false;
        config.regen.forest = 3;
        config
    }

    fn loaded_map(center: Material) -> TileMap {
        let config = config_3x3();
        let mut raw = RawTerrain::flat(5, Material::Grass);
        raw.set(2, 2, center);
        let mut map = TileMap::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        map.reset(&config, &raw, &FractalTerrain, &mut rng).unwrap();
        map
    }

    #[test]
    fn test_reset_rejects_wrong_size() {
        let config = config_3x3();
        let mut map = TileMap::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let raw = RawTerrain::flat(6, Material::Grass);
        let err = map.reset(&config, &raw, &FractalTerrain, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            RealmError::ConfigMismatch {
                expected: 5,
                actual: 6
            }
        ));
    }

    #[test]
    fn test_reset_applies_border() {
        let map = loaded_map(Material::Forest);
        assert_eq!(map.tile(Position::new(0, 0)).unwrap().material, Material::Void);
        assert_eq!(map.tile(Position::new(1, 1)).unwrap().material, Material::Grass);
        assert_eq!(map.tile(Position::new(2, 2)).unwrap().material, Material::Forest);
        assert!(!map.habitable(Position::new(4, 4)));
        assert!(map.habitable(Position::new(3, 3)));
    }

    #[test]
    fn test_harvest_grass_returns_nothing() {
        let mut map = loaded_map(Material::Forest);
        assert!(map.harvest(1, 1, true).is_none());
        assert!(map.pending().is_empty());
    }

    #[test]
    fn test_harvest_out_of_bounds() {
        let mut map = loaded_map(Material::Forest);
        assert!(map.harvest(9, 9, true).is_none());
        assert!(!map.is_valid_pos(5, 0));
        assert!(map.is_valid_pos(4, 4));
    }

    #[test]
    fn test_deplete_then_regenerate() {
        let mut map = loaded_map(Material::Forest);
        assert!(map.harvest(2, 2, true).is_some());
        assert!(map.harvest(2, 2, true).is_none());
        assert_eq!(map.pending(), vec![Position::new(2, 2)]);

        assert_eq!(map.step(), 0);
        assert_eq!(map.step(), 0);
        assert!(map.harvest(2, 2, false).is_none());
        assert_eq!(map.step(), 1);
        assert!(map.pending().is_empty());
        assert!(map.harvest(2, 2, false).is_some());
    }

    #[test]
    fn test_harvest_without_deplete_is_not_tracked() {
        let mut map = loaded_map(Material::Forest);
        assert!(map.harvest(2, 2, false).is_some());
        assert!(map.pending().is_empty());
    }

    #[test]
    fn test_reset_clears_pending_and_paths() {
        let config = config_3x3();
        let mut map = loaded_map(Material::Forest);
        map.harvest(2, 2, true);
        map.find_path(Position::new(1, 1), Position::new(3, 3));
        assert_eq!(map.cached_paths(), 1);

        let mut raw = RawTerrain::flat(5, Material::Grass);
        raw.set(2, 2, Material::Forest);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        map.reset(&config, &raw, &FractalTerrain, &mut rng).unwrap();

        assert!(map.pending().is_empty());
        assert_eq!(map.cached_paths(), 0);
        assert!(map.harvest(2, 2, false).is_some());
    }

    #[test]
    fn test_is_free_tracks_occupancy() {
        let mut map = loaded_map(Material::Forest);
        let pos = Position::new(1, 2);
        assert!(map.is_free(pos));
        map.add_entity(pos, EntityId(1));
        assert!(!map.is_free(pos));
        map.remove_entity(pos, EntityId(1));
        assert!(map.is_free(pos));
        assert!(!map.is_free(Position::new(0, 0)));
    }
}
