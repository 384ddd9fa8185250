//! Placement policies
//!
//! Danger grows with Chebyshev distance from the map center: 0.0 at the
//! center, 1.0 on the edge of the play area. Autonomous entities that die
//! far out respawn far out.

use rand::{Rng, RngCore};

use crate::core::config::MapConfig;
use crate::core::types::Position;

fn center(map: &MapConfig) -> Position {
    let mid = map.border + map.center.saturating_sub(1) / 2;
    Position::new(mid, mid)
}

/// Largest ring radius that stays inside the play area on every side
fn max_radius(map: &MapConfig) -> usize {
    (map.center.saturating_sub(1) / 2).max(1)
}

/// Normalized danger of a position
pub fn danger(map: &MapConfig, pos: Position) -> f32 {
    let dist = pos.linf(&center(map)) as f32;
    (dist / max_radius(map) as f32).clamp(0.0, 1.0)
}

/// Uniform position inside the play area
pub fn uniform_position(map: &MapConfig, rng: &mut dyn RngCore) -> Position {
    let lo = map.border;
    let hi = map.border + map.center;
    Position::new(rng.gen_range(lo..hi), rng.gen_range(lo..hi))
}

/// Random position on the square ring whose danger matches `danger`
pub fn danger_position(map: &MapConfig, danger: f32, rng: &mut dyn RngCore) -> Position {
    let mid = center(map);
    let radius = (danger.clamp(0.0, 1.0) * max_radius(map) as f32).round() as usize;
    let last = map.border + map.center.saturating_sub(1);
    let radius = radius.min(mid.row - map.border).min(last - mid.row);
    if radius == 0 {
        return mid;
    }

    let lo = mid.row - radius;
    let hi = mid.row + radius;
    let offset = rng.gen_range(lo..=hi);
    match rng.gen_range(0..4) {
        0 => Position::new(lo, offset),
        1 => Position::new(hi, offset),
        2 => Position::new(offset, lo),
        _ => Position::new(offset, hi),
    }
}

/// Habitable ring on the edge of the play area, clockwise from the top-left corner
pub fn perimeter(map: &MapConfig) -> Vec<Position> {
    let lo = map.border;
    let hi = map.border + map.center - 1;
    if map.center <= 1 {
        return vec![Position::new(lo, lo)];
    }

    let mut ring = Vec::with_capacity(4 * (hi - lo));
    ring.extend((lo..hi).map(|c| Position::new(lo, c)));
    ring.extend((lo..hi).map(|r| Position::new(r, hi)));
    ring.extend((lo + 1..=hi).rev().map(|c| Position::new(hi, c)));
    ring.extend((lo + 1..=hi).rev().map(|r| Position::new(r, lo)));
    ring
}
