use std::collections::BTreeSet;
use std::io::{stderr, Stderr};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color as TermColor, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame, Terminal,
};
use tracing::debug;

use crate::error::Result;
use crate::game::{Color, Event, Position, SnakeGame, ViewerConfig};

const BACKGROUND: Color = [1.0, 1.0, 1.0];

/// An RGB image, row-major, three bytes per pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbFrame {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl RgbFrame {
    fn filled(width: usize, height: usize, color: Color) -> Self {
        let rgb = to_rgb(color);
        let pixels = rgb.iter().copied().cycle().take(width * height * 3).collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// `(height, width, 3)`
    pub fn shape(&self) -> [usize; 3] {
        [self.height, self.width, 3]
    }

    /// RGB bytes of the pixel at column `x`, row `y` (row 0 is the top)
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let idx = (y * self.width + x) * 3;
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }

    fn fill_rect(&mut self, x0: usize, x1: usize, y0: usize, y1: usize, color: Color) {
        let rgb = to_rgb(color);
        for y in y0..y1.min(self.height) {
            for x in x0..x1.min(self.width) {
                let idx = (y * self.width + x) * 3;
                self.pixels[idx..idx + 3].copy_from_slice(&rgb);
            }
        }
    }
}

fn to_rgb(color: Color) -> [u8; 3] {
    color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

fn to_term_color(color: Color) -> TermColor {
    let [r, g, b] = to_rgb(color);
    TermColor::Rgb(r, g, b)
}

/// Status line drawn above the board
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hud {
    pub score: u32,
    pub steps: u32,
    pub game_over: bool,
    /// Extra text drawn under the board, such as key bindings
    pub footer: Option<String>,
}

impl Hud {
    pub fn from_game(game: &SnakeGame) -> Self {
        Self {
            score: game.score(),
            steps: game.steps(),
            game_over: game.is_over(),
            footer: None,
        }
    }
}

/// Renderer for the Snake game.
///
/// The viewer keeps its own scene of filled squares (the food plus one square
/// per snake segment) and updates it from the [`Event`]s each step emits, so
/// it never has to rescan the board. The scene can be rasterised into an
/// [`RgbFrame`] or drawn into a terminal.
pub struct SnakeViewer {
    config: ViewerConfig,
    grid_width: usize,
    grid_height: usize,
    square_width: f32,
    square_height: f32,
    food: Option<Position>,
    snake: BTreeSet<Position>,
    terminal: Option<Terminal<CrosstermBackend<Stderr>>>,
}

impl SnakeViewer {
    pub fn new(game: &SnakeGame, config: ViewerConfig) -> Self {
        let mut viewer = Self {
            square_width: config.screen_width as f32 / game.width() as f32,
            square_height: config.screen_height as f32 / game.height() as f32,
            grid_width: game.width(),
            grid_height: game.height(),
            config,
            food: None,
            snake: BTreeSet::new(),
            terminal: None,
        };
        viewer.reset(game);
        viewer
    }

    /// Rebuild the scene from the current game state
    pub fn reset(&mut self, game: &SnakeGame) {
        self.food = Some(game.food());
        self.snake = game.snake_squares().into_iter().collect();
    }

    /// Apply one step event to the scene
    pub fn process_event(&mut self, event: &Event) {
        match *event {
            Event::Eat(_) => self.food = None,
            Event::NewFood(pos) => self.food = Some(pos),
            Event::Add(pos) => {
                self.snake.insert(pos);
            }
            Event::Remove(pos) => {
                self.snake.remove(&pos);
            }
            Event::Dead | Event::Win => {}
        }
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn snake_squares(&self) -> impl Iterator<Item = &Position> {
        self.snake.iter()
    }

    /// Rasterise the scene. Board row `y = 0` is the bottom of the image.
    pub fn rgb_array(&self) -> RgbFrame {
        let mut frame = RgbFrame::filled(
            self.config.screen_width,
            self.config.screen_height,
            BACKGROUND,
        );

        if let Some(food) = self.food {
            self.paint_square(&mut frame, food, self.config.food_color);
        }
        for &square in &self.snake {
            self.paint_square(&mut frame, square, self.config.snake_color);
        }

        frame
    }

    fn paint_square(&self, frame: &mut RgbFrame, square: Position, color: Color) {
        let x0 = (square.x as f32 * self.square_width).round() as usize;
        let x1 = ((square.x + 1) as f32 * self.square_width).round() as usize;
        let y0 = (square.y as f32 * self.square_height).round() as usize;
        let y1 = ((square.y + 1) as f32 * self.square_height).round() as usize;

        let rows = frame.height;
        frame.fill_rect(x0, x1, rows.saturating_sub(y1), rows.saturating_sub(y0), color);
    }

    /// Draw the board into a terminal frame, north at the top
    pub fn draw(&self, frame: &mut Frame, hud: &Hud) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.stats_line(hud), chunks[0]);
        frame.render_widget(self.board_widget(hud), chunks[1]);
        if let Some(footer) = &hud.footer {
            frame.render_widget(
                Paragraph::new(footer.as_str()).alignment(Alignment::Center),
                chunks[2],
            );
        }
    }

    fn board_widget(&self, hud: &Hud) -> Paragraph<'_> {
        let snake_style = Style::default().fg(to_term_color(self.config.snake_color));
        let food_style = Style::default()
            .fg(to_term_color(self.config.food_color))
            .add_modifier(Modifier::BOLD);
        let empty_style = Style::default().fg(TermColor::DarkGray);

        let lines: Vec<Line> = (0..self.grid_height)
            .rev()
            .map(|y| {
                let spans: Vec<Span> = (0..self.grid_width)
                    .map(|x| {
                        let pos = Position::new(x as i32, y as i32);
                        if self.snake.contains(&pos) {
                            Span::styled("■ ", snake_style)
                        } else if self.food == Some(pos) {
                            Span::styled("O ", food_style)
                        } else {
                            Span::styled(". ", empty_style)
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        let border = if hud.game_over {
            TermColor::Red
        } else {
            TermColor::White
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn stats_line(&self, hud: &Hud) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("Score: ", Style::default().fg(TermColor::Yellow)),
            Span::styled(
                hud.score.to_string(),
                Style::default()
                    .fg(TermColor::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Steps: ", Style::default().fg(TermColor::Yellow)),
            Span::styled(hud.steps.to_string(), Style::default().fg(TermColor::White)),
        ];
        if hud.game_over {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                "GAME OVER",
                Style::default()
                    .fg(TermColor::Red)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    /// Draw to the process's terminal, taking it over on first use
    pub fn render_human(&mut self, hud: &Hud) -> Result<()> {
        let mut terminal = match self.terminal.take() {
            Some(terminal) => terminal,
            None => {
                let mut stderr = stderr();
                execute!(stderr, EnterAlternateScreen)?;
                let mut terminal = Terminal::new(CrosstermBackend::new(stderr))?;
                terminal.hide_cursor()?;
                terminal.clear()?;
                debug!("viewer terminal opened");
                terminal
            }
        };

        // Put the terminal back before propagating, so close() still restores it.
        let drawn = terminal.draw(|frame| self.draw(frame, hud)).map(|_| ());
        self.terminal = Some(terminal);
        Ok(drawn?)
    }

    /// Give the terminal back if the viewer took it over
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut terminal) = self.terminal.take() {
            execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
            terminal.show_cursor()?;
            debug!("viewer terminal closed");
        }
        Ok(())
    }
}

impl Drop for SnakeViewer {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
