use std::fmt;

/// Unique identifier for a combatant on the roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the controllable player character.
    pub const PLAYER: Self = Self(0);

    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::PLAYER
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed in tile coordinates.
///
/// `y` grows southwards, matching screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring tile in `direction`. Saturates at the coordinate limits.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// King-move distance.
    pub fn chebyshev(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Eight-way facing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    #[default]
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    const RING: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    fn ring_index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::NorthEast => 1,
            Direction::East => 2,
            Direction::SouthEast => 3,
            Direction::South => 4,
            Direction::SouthWest => 5,
            Direction::West => 6,
            Direction::NorthWest => 7,
        }
    }

    /// Next direction clockwise (45°).
    pub fn clockwise(self) -> Self {
        Self::RING[(self.ring_index() + 1) % 8]
    }

    /// Next direction counter-clockwise (45°).
    pub fn counter_clockwise(self) -> Self {
        Self::RING[(self.ring_index() + 7) % 8]
    }

    /// Direction from `from` that points at `to`.
    ///
    /// Returns `None` when both positions coincide.
    pub fn toward(from: Position, to: Position) -> Option<Self> {
        let dx = (to.x - from.x).signum();
        let dy = (to.y - from.y).signum();
        Self::RING.into_iter().find(|dir| dir.delta() == (dx, dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toward_uses_sign_of_offset() {
        let from = Position::new(5, 5);
        assert_eq!(
            Direction::toward(from, Position::new(5, 1)),
            Some(Direction::North)
        );
        assert_eq!(
            Direction::toward(from, Position::new(9, 7)),
            Some(Direction::SouthEast)
        );
        assert_eq!(Direction::toward(from, from), None);
    }

    #[test]
    fn rotation_wraps_around_the_ring() {
        assert_eq!(Direction::North.counter_clockwise(), Direction::NorthWest);
        assert_eq!(Direction::NorthWest.clockwise(), Direction::North);
        assert_eq!(Direction::East.clockwise(), Direction::SouthEast);
    }

    #[test]
    fn chebyshev_counts_diagonals_once() {
        assert_eq!(Position::new(0, 0).chebyshev(Position::new(3, -2)), 3);
        assert_eq!(
            Position::new(1, 1).step(Direction::SouthWest),
            Position::new(0, 2)
        );
    }

    #[test]
    fn step_saturates_at_the_edge() {
        let corner = Position::new(i32::MAX, i32::MIN);
        assert_eq!(corner.step(Direction::NorthEast), corner);
        assert_eq!(
            corner.step(Direction::SouthWest),
            Position::new(i32::MAX - 1, i32::MIN + 1)
        );
    }
}
