//! Raw terrain input and conversion to materials
//!
//! The generator turns whatever an episode was seeded with (a material grid
//! or a fractal heightmap) into materials for the whole square grid. Border
//! processing runs afterwards and always wins, so generators never need to
//! know where the play area ends.

use rand::{Rng, RngCore};

use crate::core::config::RealmConfig;
use crate::world::material::Material;

/// Terrain an episode is loaded from, row-major and square
#[derive(Debug, Clone)]
pub struct RawTerrain {
    pub size: usize,
    /// Material indices
    pub map: Vec<u8>,
    /// Heightmap in [0, 1], used when the config asks for fractal reset
    pub fractal: Option<Vec<f32>>,
}

impl RawTerrain {
    /// A grid filled with one material
    pub fn flat(size: usize, material: Material) -> Self {
        Self {
            size,
            map: vec![material.index(); size * size],
            fractal: None,
        }
    }

    pub fn from_fractal(size: usize, fractal: Vec<f32>) -> Self {
        Self {
            size,
            map: vec![Material::Grass.index(); size * size],
            fractal: Some(fractal),
        }
    }

    /// Smoothed value noise, enough to give the headless runner varied terrain
    pub fn noise(size: usize, rng: &mut dyn RngCore) -> Self {
        let mut values: Vec<f32> = (0..size * size).map(|_| rng.gen::<f32>()).collect();

        for _ in 0..3 {
            let prev = values.clone();
            for r in 0..size {
                for c in 0..size {
                    let mut sum = 0.0;
                    let mut n = 0.0;
                    for dr in r.saturating_sub(1)..=(r + 1).min(size - 1) {
                        for dc in c.saturating_sub(1)..=(c + 1).min(size - 1) {
                            sum += prev[dr * size + dc];
                            n += 1.0;
                        }
                    }
                    values[r * size + c] = sum / n;
                }
            }
        }

        let (lo, hi) = values
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        let span = (hi - lo).max(f32::EPSILON);
        for v in &mut values {
            *v = (*v - lo) / span;
        }

        Self::from_fractal(size, values)
    }

    pub fn set(&mut self, row: usize, col: usize, material: Material) {
        self.map[row * self.size + col] = material.index();
    }
}

/// Converts raw terrain into a material grid
pub trait TerrainGenerator {
    /// `border_metric` holds each tile's Chebyshev distance to the map center.
    fn generate(
        &self,
        config: &RealmConfig,
        raw: &RawTerrain,
        border_metric: &[usize],
        rng: &mut dyn RngCore,
    ) -> Vec<Material>;
}

/// Default generator: threshold the heightmap, then scatter profession resources
#[derive(Debug, Clone, Default)]
pub struct FractalTerrain;

impl FractalTerrain {
    fn threshold(height: f32) -> Material {
        match height {
            h if h < 0.25 => Material::Water,
            h if h < 0.55 => Material::Grass,
            h if h < 0.70 => Material::Forest,
            h if h < 0.80 => Material::Tree,
            h if h < 0.88 => Material::Grass,
            h if h < 0.94 => Material::Ore,
            _ => Material::Stone,
        }
    }
}

impl TerrainGenerator for FractalTerrain {
    fn generate(
        &self,
        config: &RealmConfig,
        raw: &RawTerrain,
        border_metric: &[usize],
        rng: &mut dyn RngCore,
    ) -> Vec<Material> {
        let map = &config.map;
        if !map.terrain_enabled {
            return vec![Material::Grass; raw.size * raw.size];
        }

        let mut materials: Vec<Material> = match (&raw.fractal, map.reset_from_fractal) {
            (Some(fractal), true) => {
                let half = (map.center / 2).max(1);
                let mut materials: Vec<Material> =
                    fractal.iter().map(|&h| Self::threshold(h)).collect();
                for (idx, material) in materials.iter_mut().enumerate() {
                    let roll = rng.gen::<f32>();
                    // Rarer resources cluster toward the center
                    let depth = 1.0 - (border_metric[idx] as f32 / half as f32).min(1.0);
                    *material = match *material {
                        Material::Water if roll < 0.15 => Material::Fish,
                        Material::Grass if roll < 0.02 => Material::Herb,
                        Material::Grass if roll < 0.02 + 0.02 * depth => Material::Crystal,
                        other => other,
                    };
                }
                materials
            }
            _ => raw
                .map
                .iter()
                .map(|&idx| Material::from_index(idx).unwrap_or(Material::Void))
                .collect(),
        };

        if map.disable_stone {
            for material in materials.iter_mut().filter(|m| **m == Material::Stone) {
                *material = Material::Grass;
            }
        }

        materials
    }
}

/// Chebyshev distance from every tile to the map center
pub fn center_metric(size: usize) -> Vec<usize> {
    let center = size / 2;
    (0..size * size)
        .map(|idx| {
            let (r, c) = (idx / size, idx % size);
            r.abs_diff(center).max(c.abs_diff(center))
        })
        .collect()
}

/// Void everything outside the play area and force a habitable ring on its edge
pub fn process_border(config: &RealmConfig, materials: &mut [Material]) {
    let map = &config.map;
    let lo = map.border;
    let hi = map.border + map.center;

    for (idx, material) in materials.iter_mut().enumerate() {
        let (r, c) = (idx / map.size, idx % map.size);
        let inside = (lo..hi).contains(&r) && (lo..hi).contains(&c);
        if !inside {
            *material = Material::Void;
        } else if r == lo || r == hi - 1 || c == lo || c == hi - 1 {
            *material = Material::Grass;
        }
    }
}
