//! Tile grid, materials, terrain loading and path search

pub mod drop_table;
pub mod map;
pub mod material;
pub mod pathfinding;
pub mod terrain;
pub mod tile;

pub use drop_table::{DropTable, ItemDrop};
pub use map::TileMap;
pub use material::Material;
pub use pathfinding::{AStar, PathCache, PathSearch};
pub use terrain::{FractalTerrain, RawTerrain, TerrainGenerator};
pub use tile::Tile;
