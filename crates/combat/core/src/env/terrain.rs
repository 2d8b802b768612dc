use std::collections::BTreeSet;

use crate::state::Position;

/// Read-only terrain queries supplied by the dungeon layer.
///
/// Targeting trusts these answers and never re-derives geometry.
pub trait TerrainOracle: Send + Sync {
    fn is_passable(&self, position: Position) -> bool;

    /// Whether `to` is visible from `from`.
    ///
    /// The default walks a Bresenham line and requires every intermediate tile
    /// to be passable. Endpoints are not checked.
    fn line_of_sight(&self, from: Position, to: Position) -> bool {
        bresenham(from, to)
            .into_iter()
            .skip(1)
            .take_while(|p| *p != to)
            .all(|p| self.is_passable(p))
    }
}

/// Terrain without walls.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenTerrain;

impl TerrainOracle for OpenTerrain {
    fn is_passable(&self, _position: Position) -> bool {
        true
    }

    fn line_of_sight(&self, _from: Position, _to: Position) -> bool {
        true
    }
}

/// Bounded rectangular grid with wall tiles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridTerrain {
    pub width: u32,
    pub height: u32,
    pub walls: BTreeSet<Position>,
}

impl GridTerrain {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            walls: BTreeSet::new(),
        }
    }

    pub fn with_wall(mut self, position: Position) -> Self {
        self.walls.insert(position);
        self
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }
}

impl TerrainOracle for GridTerrain {
    fn is_passable(&self, position: Position) -> bool {
        self.contains(position) && !self.walls.contains(&position)
    }
}

/// Tiles on the line from `from` to `to`, both ends included.
pub fn bresenham(from: Position, to: Position) -> Vec<Position> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = (to.x - from.x).signum();
    let sy = (to.y - from.y).signum();

    let mut points = Vec::with_capacity(dx.max(-dy) as usize + 1);
    let (mut x, mut y) = (from.x, from.y);
    let mut err = dx + dy;

    loop {
        points.push(Position::new(x, y));
        if x == to.x && y == to.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    points
}
