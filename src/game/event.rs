use super::state::Position;

/// A change produced by a single game step.
///
/// The viewer replays these to keep its scene in sync with the board, and the
/// environment uses them to shape the reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// The snake left the board or ran into itself.
    Dead,
    /// The snake ate the food on this square.
    Eat(Position),
    /// Fresh food was placed on this square.
    NewFood(Position),
    /// The snake's head moved onto this square.
    Add(Position),
    /// The snake's tail left this square.
    Remove(Position),
    /// The snake fills the whole board.
    Win,
}

impl Event {
    /// Whether this event ends the game.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Event::Dead | Event::Win)
    }
}
