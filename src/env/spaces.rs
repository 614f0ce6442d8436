//! Action and observation spaces

use rand::Rng;

use crate::game::Board;

/// A finite set of actions `0..n`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discrete {
    pub n: usize,
}

impl Discrete {
    pub fn new(n: usize) -> Self {
        Self { n }
    }

    pub fn contains(&self, action: usize) -> bool {
        action < self.n
    }

    /// Draw a uniformly random action
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.gen_range(0..self.n)
    }
}

/// A bounded box of cell codes with a fixed shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxSpace {
    pub low: u8,
    pub high: u8,
    /// `(height, width, channels)`
    pub shape: [usize; 3],
}

impl BoxSpace {
    pub fn new(low: u8, high: u8, shape: [usize; 3]) -> Self {
        Self { low, high, shape }
    }

    pub fn contains(&self, board: &Board) -> bool {
        board.shape() == self.shape
            && board
                .as_slice()
                .iter()
                .all(|cell| (self.low..=self.high).contains(cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Position};
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_discrete_contains() {
        let space = Discrete::new(4);
        assert!(space.contains(0));
        assert!(space.contains(3));
        assert!(!space.contains(4));
    }

    #[test]
    fn test_discrete_sample_in_range() {
        let space = Discrete::new(4);
        let mut rng = StdRng::seed_from_u64(0);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let action = space.sample(&mut rng);
            assert!(space.contains(action));
            seen[action] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_box_contains() {
        let space = BoxSpace::new(0, Cell::MAX, [3, 4, 1]);
        let mut board = Board::new(4, 3);
        board.set(Position::new(1, 1), Cell::Food);
        assert!(space.contains(&board));

        // transposed board does not match the shape
        assert!(!space.contains(&Board::new(3, 4)));

        let narrow = BoxSpace::new(0, 1, [3, 4, 1]);
        assert!(!narrow.contains(&board));
    }
}
