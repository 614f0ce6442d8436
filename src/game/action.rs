use crate::error::{EnvError, Result};

/// Compass direction the snake can move in.
///
/// The board's y axis points north, so `North` increases `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions in action-index order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }

    /// Map a discrete action index to a direction.
    ///
    /// - 0 → North
    /// - 1 → East
    /// - 2 → South
    /// - 3 → West
    pub fn from_action(action: usize) -> Result<Self> {
        Self::ALL
            .get(action)
            .copied()
            .ok_or(EnvError::InvalidAction(action))
    }

    /// Discrete action index of this direction.
    pub fn action_index(&self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::North.delta(), (0, 1));
        assert_eq!(Direction::East.delta(), (1, 0));
        assert_eq!(Direction::South.delta(), (0, -1));
        assert_eq!(Direction::West.delta(), (-1, 0));
    }

    #[test]
    fn test_action_mapping() {
        assert_eq!(Direction::from_action(0).unwrap(), Direction::North);
        assert_eq!(Direction::from_action(1).unwrap(), Direction::East);
        assert_eq!(Direction::from_action(2).unwrap(), Direction::South);
        assert_eq!(Direction::from_action(3).unwrap(), Direction::West);
        assert!(matches!(
            Direction::from_action(4),
            Err(EnvError::InvalidAction(4))
        ));

        for direction in Direction::ALL {
            assert_eq!(
                Direction::from_action(direction.action_index()).unwrap(),
                direction
            );
        }
    }
}
