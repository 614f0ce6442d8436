use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use tracing::debug;

use super::{
    action::Direction,
    config::GameConfig,
    event::Event,
    state::{Board, Cell, Position, Snake},
};
use crate::error::{EnvError, Result};

/// State of a single Snake game and its transitions.
///
/// The snake starts as a single segment heading north. Each step moves the
/// head one square; eating food grows the snake by one and spawns new food on
/// a random empty square. Leaving the board or running into the body ends the
/// game, as does filling the whole board.
pub struct SnakeGame {
    config: GameConfig,
    board: Board,
    snake: Snake,
    food: Position,
    current_dir: Direction,
    game_over: bool,
    won: bool,
    score: u32,
    steps: u32,
    rng: StdRng,
}

impl SnakeGame {
    /// Create a game and place the snake on a random square
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut game = Self {
            board: Board::new(config.grid_width, config.grid_height),
            snake: Snake::default(),
            food: Position::new(0, 0),
            current_dir: Direction::North,
            game_over: false,
            won: false,
            score: 0,
            steps: 0,
            rng,
            config,
        };
        game.reset(None)?;
        Ok(game)
    }

    /// Start a new game with the head at `head`, or on a random square when
    /// `None`. Food is placed on a random empty square.
    pub fn reset(&mut self, head: Option<Position>) -> Result<()> {
        let head = match head {
            Some(pos) if self.board.is_in_bounds(pos) => pos,
            Some(pos) => return Err(EnvError::InvalidSquare { x: pos.x, y: pos.y }),
            None => Position::new(
                self.rng.gen_range(0..self.config.grid_width) as i32,
                self.rng.gen_range(0..self.config.grid_height) as i32,
            ),
        };

        self.game_over = false;
        self.won = false;
        self.score = 0;
        self.steps = 0;
        self.current_dir = Direction::North;
        self.board.clear();
        self.board.set(head, Cell::Snake);
        self.snake = Snake::new(head);

        // Both sides are at least 2, so a 1-segment snake always leaves room.
        self.food = self
            .random_empty_square()
            .ok_or(EnvError::InvalidGrid {
                width: self.config.grid_width,
                height: self.config.grid_height,
            })?;
        self.board.set(self.food, Cell::Food);

        debug!(?head, food = ?self.food, "game reset");
        Ok(())
    }

    /// Current head and food squares
    pub fn state(&self) -> (Position, Position) {
        let head = self.snake.head().unwrap_or(self.food);
        (head, self.food)
    }

    /// Every square currently occupied by the snake, in row-major order
    pub fn snake_squares(&self) -> Vec<Position> {
        self.board.positions_of(Cell::Snake).collect()
    }

    /// Advance the game by one move.
    ///
    /// Asking the snake to turn back onto its own neck keeps it moving in the
    /// current direction instead. A finished game ignores further steps and
    /// returns no events.
    pub fn step(&mut self, direction: Direction) -> Vec<Event> {
        if self.game_over {
            return Vec::new();
        }
        let Some(old_head) = self.snake.head() else {
            return Vec::new();
        };

        let mut direction = direction;
        let mut new_head = old_head.moved_in_direction(direction);
        if self.snake.neck() == Some(new_head) {
            direction = self.current_dir;
            new_head = old_head.moved_in_direction(direction);
        }
        self.current_dir = direction;
        self.steps += 1;

        if !self.board.is_in_bounds(new_head) {
            return self.die(new_head);
        }

        let mut events = Vec::with_capacity(3);
        if new_head == self.food {
            self.score += 1;
            let Some(new_food) = self.random_empty_square() else {
                self.game_over = true;
                self.won = true;
                debug!(score = self.score, "board filled");
                return vec![Event::Eat(self.food), Event::Win];
            };

            events.push(Event::Eat(self.food));
            events.push(Event::NewFood(new_food));
            self.food = new_food;
            self.board.set(new_food, Cell::Food);
        } else if let Some(tail) = self.snake.pop_tail() {
            self.board.set(tail, Cell::Empty);
            events.push(Event::Remove(tail));
        }

        // Checked after the tail moves, so following the tail is legal.
        if self.board.is(new_head, Cell::Snake) {
            return self.die(new_head);
        }

        self.board.set(new_head, Cell::Snake);
        self.snake.push_head(new_head);
        events.push(Event::Add(new_head));
        events
    }

    fn die(&mut self, at: Position) -> Vec<Event> {
        self.game_over = true;
        debug!(?at, score = self.score, steps = self.steps, "snake died");
        vec![Event::Dead]
    }

    fn random_empty_square(&mut self) -> Option<Position> {
        let empty: Vec<Position> = self.board.positions_of(Cell::Empty).collect();
        empty.choose(&mut self.rng).copied()
    }

    /// Move the food to `pos`, which must be an empty square (or the current
    /// food square).
    pub fn set_food(&mut self, pos: Position) -> Result<()> {
        if pos != self.food && !self.board.is(pos, Cell::Empty) {
            return Err(EnvError::InvalidSquare { x: pos.x, y: pos.y });
        }
        if self.board.is(self.food, Cell::Food) {
            self.board.set(self.food, Cell::Empty);
        }
        self.food = pos;
        self.board.set(pos, Cell::Food);
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn current_direction(&self) -> Direction {
        self.current_dir
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// Whether the game ended with the snake filling the board
    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Food eaten this game
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn width(&self) -> usize {
        self.config.grid_width
    }

    pub fn height(&self) -> usize {
        self.config.grid_height
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
