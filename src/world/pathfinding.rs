//! Path search over habitable tiles, memoized per episode
//!
//! Terrain habitability is fixed for an episode, so a path between two
//! points never changes until the next map reset. The cache is keyed purely
//! by endpoints and cleared wholesale on reset.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ahash::AHashMap;

use crate::core::types::{Direction, Position};

/// Search collaborator consulted through [`PathCache`]
pub trait PathSearch {
    /// `habitable` is the row-major passability grid of side `size`.
    fn search(
        &self,
        habitable: &[bool],
        size: usize,
        start: Position,
        goal: Position,
    ) -> Option<Vec<Position>>;
}

/// Node in the A* open set
#[derive(Debug, Clone)]
struct PathNode {
    pos: Position,
    f_cost: usize,
}

impl PartialEq for PathNode {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos && self.f_cost == other.f_cost
    }
}

impl Eq for PathNode {}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap, ties broken by position for determinism
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.pos.cmp(&self.pos))
    }
}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* with unit step cost and Manhattan heuristic
#[derive(Debug, Clone, Copy, Default)]
pub struct AStar;

impl PathSearch for AStar {
    fn search(
        &self,
        habitable: &[bool],
        size: usize,
        start: Position,
        goal: Position,
    ) -> Option<Vec<Position>> {
        if start == goal {
            return Some(vec![start]);
        }

        let passable = |p: Position| p.row < size && p.col < size && habitable[p.row * size + p.col];
        if !passable(goal) {
            return None;
        }

        let mut open_set = BinaryHeap::new();
        let mut came_from: AHashMap<Position, Position> = AHashMap::new();
        let mut g_scores: AHashMap<Position, usize> = AHashMap::new();

        g_scores.insert(start, 0);
        open_set.push(PathNode {
            pos: start,
            f_cost: start.l1(&goal),
        });

        while let Some(current) = open_set.pop() {
            if current.pos == goal {
                return Some(reconstruct_path(&came_from, current.pos));
            }

            let current_g = g_scores.get(&current.pos).copied().unwrap_or(usize::MAX);

            for dir in Direction::ALL {
                let Some(neighbor) = current.pos.step(dir) else {
                    continue;
                };
                if !passable(neighbor) {
                    continue;
                }

                let tentative_g = current_g + 1;
                let neighbor_g = g_scores.get(&neighbor).copied().unwrap_or(usize::MAX);

                if tentative_g < neighbor_g {
                    came_from.insert(neighbor, current.pos);
                    g_scores.insert(neighbor, tentative_g);
                    open_set.push(PathNode {
                        pos: neighbor,
                        f_cost: tentative_g + neighbor.l1(&goal),
                    });
                }
            }
        }

        None // No path found
    }
}

/// Reconstruct path from came_from map
fn reconstruct_path(came_from: &AHashMap<Position, Position>, mut current: Position) -> Vec<Position> {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Memoized paths keyed by (start, goal)
#[derive(Debug, Default)]
pub struct PathCache {
    entries: AHashMap<(Position, Position), Option<Vec<Position>>>,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_search<S: PathSearch + ?Sized>(
        &mut self,
        search: &S,
        habitable: &[bool],
        size: usize,
        start: Position,
        goal: Position,
    ) -> Option<&[Position]> {
        self.entries
            .entry((start, goal))
            .or_insert_with(|| search.search(habitable, size, start, goal))
            .as_deref()
    }

    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn open_grid(size: usize) -> Vec<bool> {
        vec![true; size * size]
    }

    struct CountingSearch {
        calls: Cell<usize>,
    }

    impl PathSearch for CountingSearch {
        fn search(&self, h: &[bool], s: usize, a: Position, b: Position) -> Option<Vec<Position>> {
            self.calls.set(self.calls.get() + 1);
            AStar.search(h, s, a, b)
        }
    }

    #[test]
    fn test_pathfind_straight_line() {
        let grid = open_grid(6);
        let path = AStar
            .search(&grid, 6, Position::new(0, 0), Position::new(0, 5))
            .unwrap();
        assert_eq!(path.len(), 6);
        assert_eq!(path.first(), Some(&Position::new(0, 0)));
        assert_eq!(path.last(), Some(&Position::new(0, 5)));
    }

    #[test]
    fn test_pathfind_around_wall() {
        let size = 5;
        let mut grid = open_grid(size);
        // Wall down column 2 except the bottom row
        for r in 0..4 {
            grid[r * size + 2] = false;
        }
        let path = AStar
            .search(&grid, size, Position::new(0, 0), Position::new(0, 4))
            .unwrap();
        assert!(path.contains(&Position::new(4, 2)));
        assert!(path.iter().all(|p| grid[p.row * size + p.col]));
    }

    #[test]
    fn test_no_path_when_blocked() {
        let size = 3;
        let mut grid = open_grid(size);
        for r in 0..size {
            grid[r * size + 1] = false;
        }
        assert!(AStar
            .search(&grid, size, Position::new(0, 0), Position::new(0, 2))
            .is_none());
    }

    #[test]
    fn test_cache_searches_once_per_pair() {
        let grid = open_grid(4);
        let search = CountingSearch { calls: Cell::new(0) };
        let mut cache = PathCache::new();
        let (a, b) = (Position::new(0, 0), Position::new(3, 3));

        let first = cache.get_or_search(&search, &grid, 4, a, b).map(|p| p.to_vec());
        let second = cache.get_or_search(&search, &grid, 4, a, b).map(|p| p.to_vec());
        assert_eq!(first, second);
        assert_eq!(search.calls.get(), 1);

        // Reverse direction is a different key
        cache.get_or_search(&search, &grid, 4, b, a);
        assert_eq!(search.calls.get(), 2);

        cache.invalidate();
        assert!(cache.is_empty());
        cache.get_or_search(&search, &grid, 4, a, b);
        assert_eq!(search.calls.get(), 3);
    }
}
