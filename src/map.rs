//! Overworld tile grid: walkability checks and breadth-first pathfinding for
//! click-to-move travel.

use crate::errors::{MapError, MapResult};
use schema::TileKind;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs;
use std::path::Path;

/// A grid coordinate. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub fn new(x: usize, y: usize) -> Pos {
        Pos { x, y }
    }
}

/// Raw map file contents: rows of numeric tile codes.
#[derive(Debug, Deserialize)]
struct MapData {
    grid: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileMap {
    grid: Vec<Vec<TileKind>>,
}

impl TileMap {
    /// Load the map from `<data_path>/map.ron`.
    pub fn load(data_path: &Path) -> MapResult<TileMap> {
        let file = data_path.join("map.ron");
        if !file.exists() {
            return Err(MapError::FileNotFound(file));
        }
        let content = fs::read_to_string(&file)?;
        let data: MapData = ron::from_str(&content)?;
        TileMap::from_codes(&data.grid)
    }

    /// Build a map from raw tile codes, rejecting unknown codes and ragged
    /// or empty grids.
    pub fn from_codes(codes: &[Vec<u8>]) -> MapResult<TileMap> {
        let width = codes.first().map(|row| row.len()).unwrap_or(0);
        if width == 0 {
            return Err(MapError::InvalidGrid);
        }

        let mut grid = Vec::with_capacity(codes.len());
        for (y, row) in codes.iter().enumerate() {
            if row.len() != width {
                return Err(MapError::InvalidGrid);
            }
            let mut tiles = Vec::with_capacity(width);
            for (x, &code) in row.iter().enumerate() {
                let tile =
                    TileKind::from_code(code).ok_or(MapError::UnknownTileCode { code, x, y })?;
                tiles.push(tile);
            }
            grid.push(tiles);
        }
        Ok(TileMap { grid })
    }

    pub fn width(&self) -> usize {
        self.grid[0].len()
    }

    pub fn height(&self) -> usize {
        self.grid.len()
    }

    pub fn tile_at(&self, pos: Pos) -> Option<TileKind> {
        self.grid.get(pos.y).and_then(|row| row.get(pos.x)).copied()
    }

    /// Out-of-bounds and walls are impassable; everything else is walkable.
    pub fn is_walkable(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        match self.tile_at(Pos::new(x as usize, y as usize)) {
            Some(TileKind::Wall) | None => false,
            Some(_) => true,
        }
    }

    /// All healing-tile coordinates; defeat resolution respawns on one.
    pub fn heal_tiles(&self) -> Vec<Pos> {
        let mut tiles = Vec::new();
        for (y, row) in self.grid.iter().enumerate() {
            for (x, &tile) in row.iter().enumerate() {
                if tile == TileKind::Heal {
                    tiles.push(Pos::new(x, y));
                }
            }
        }
        tiles
    }

    /// Breadth-first shortest path from `start` to `goal` over 4-directional
    /// neighbors, excluding `start` itself. Returns `None` when the goal is
    /// unreachable or equal to the start.
    pub fn find_path(&self, start: Pos, goal: Pos) -> Option<Vec<Pos>> {
        if start == goal || !self.is_walkable(goal.x as i64, goal.y as i64) {
            return None;
        }

        let width = self.width();
        let height = self.height();
        let index = |p: Pos| p.y * width + p.x;

        let mut visited = vec![false; width * height];
        let mut parent: Vec<Option<Pos>> = vec![None; width * height];
        let mut queue = VecDeque::new();

        visited[index(start)] = true;
        queue.push_back(start);

        const DIRS: [(i64, i64); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

        while let Some(current) = queue.pop_front() {
            if current == goal {
                // Walk the parent chain back to the start.
                let mut path = Vec::new();
                let mut at = current;
                while at != start {
                    path.push(at);
                    at = parent[index(at)].expect("visited node has a parent");
                }
                path.reverse();
                return Some(path);
            }

            for (dx, dy) in DIRS {
                let nx = current.x as i64 + dx;
                let ny = current.y as i64 + dy;
                if !self.is_walkable(nx, ny) {
                    continue;
                }
                let next = Pos::new(nx as usize, ny as usize);
                if visited[index(next)] {
                    continue;
                }
                visited[index(next)] = true;
                parent[index(next)] = Some(current);
                queue.push_back(next);
            }
        }

        None
    }
}
