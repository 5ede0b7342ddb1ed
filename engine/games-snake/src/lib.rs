//! Snake game model used by the MCTS agent
//!
//! This crate provides the authoritative transition function for a single
//! snake on a bounded grid: movement, collision detection, food placement and
//! scoring. It also hosts the deterministic helpers the agent layers on top of
//! the model: the one-step safety filter and the breadth-first path finder.
//!
//! # Usage
//!
//! ```rust
//! use games_snake::{Action, SnakeGame};
//!
//! let mut game = SnakeGame::new(12, 12, 42).expect("12x12 is a valid grid");
//! let legal = game.legal_actions();
//! assert_eq!(legal.len(), 4);
//!
//! let result = game.step(Action::Right);
//! assert!(!result.done);
//! ```
//!
//! Collisions are not errors: they end the game through the returned
//! [`StepEvent`] with a reward of [`COLLISION_PENALTY`].

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;

mod pathfinding;

pub use pathfinding::{
    find_path_to_food, is_safe, manhattan_distance, safe_actions, safe_subset,
    DEFAULT_NODE_BUDGET,
};

/// Reward for eating a food item.
pub const FOOD_REWARD: f32 = 10.0;

/// Reward for hitting a wall or the snake's own body.
pub const COLLISION_PENALTY: f32 = -10.0;

/// Errors raised when constructing or editing a game with invalid data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Snake must have at least one segment")]
    EmptySnake,

    #[error("Cell ({x}, {y}) lies outside the grid")]
    OutOfBounds { x: i32, y: i32 },

    #[error("Snake occupies cell ({x}, {y}) more than once")]
    OverlappingSegments { x: i32, y: i32 },

    #[error("Food at ({x}, {y}) overlaps the snake")]
    FoodOnSnake { x: i32, y: i32 },
}

/// Movement direction. The discriminant is the action index exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Action {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Action {
    /// All actions in index order. Search and path finding iterate in this order.
    pub const ALL: [Action; 4] = [Action::Up, Action::Right, Action::Down, Action::Left];

    /// Get the action index (0=up, 1=right, 2=down, 3=left)
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Decode an action index. Returns None for indices above 3.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Unit delta applied to the head, with y growing downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Action::Up => (0, -1),
            Action::Right => (1, 0),
            Action::Down => (0, 1),
            Action::Left => (-1, 0),
        }
    }

    /// The 180° reverse of this action.
    pub fn opposite(self) -> Self {
        Self::ALL[(self.index() as usize + 2) % 4]
    }
}

/// A grid coordinate. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell in the given direction.
    pub fn step(self, action: Action) -> Self {
        let (dx, dy) = action.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Content of a cell in the observable grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Body,
    Food,
}

impl Cell {
    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Body => 'o',
            Cell::Food => '*',
        }
    }
}

/// Row-major H×W view of the board. This is the only state handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservableGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl ObservableGrid {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at column `x`, row `y`, or None outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y * self.width + x])
    }

    /// Iterate over rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Number of cells holding the given content.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }
}

impl fmt::Display for ObservableGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|c| c.symbol()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Why a step ended the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    OutOfBounds,
    SelfCollision,
}

/// What a single transition did. This is the step's side channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    /// Head moved onto an empty cell, tail followed.
    Moved,
    /// Head moved onto the food; the snake grew and new food was placed.
    AteFood,
    /// The snake ate the last food and now covers every cell.
    BoardFilled,
    /// The move was fatal.
    Collision(Collision),
    /// The game was already over; nothing changed.
    AlreadyOver,
}

/// Outcome of [`SnakeGame::advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub reward: f32,
    pub done: bool,
    pub event: StepEvent,
}

impl Transition {
    fn collision(kind: Collision) -> Self {
        Self {
            reward: COLLISION_PENALTY,
            done: true,
            event: StepEvent::Collision(kind),
        }
    }
}

/// Outcome of [`SnakeGame::step`]: the transition plus the resulting board.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub grid: ObservableGrid,
    pub reward: f32,
    pub done: bool,
    pub event: StepEvent,
}

/// Complete state of a snake game.
///
/// The game owns its food-placement random stream, so a clone replays exactly
/// the same future as the original when fed the same actions.
#[derive(Debug, Clone)]
pub struct SnakeGame {
    width: i32,
    height: i32,
    /// Body segments, head first
    snake: VecDeque<Point>,
    food: Point,
    /// Last committed action, used only to forbid reversals
    direction: Action,
    done: bool,
    score: u32,
    rng: ChaCha20Rng,
}

impl SnakeGame {
    /// Create a game on a `width`×`height` grid and reset it.
    pub fn new(width: u32, height: u32, seed: u64) -> Result<Self, GameError> {
        let (w, h) = check_dimensions(width, height)?;
        let mut game = Self {
            width: w,
            height: h,
            snake: VecDeque::new(),
            food: Point::new(0, 0),
            direction: Action::Up,
            done: false,
            score: 0,
            rng: ChaCha20Rng::seed_from_u64(seed),
        };
        game.reset();
        Ok(game)
    }

    /// Create a game with an explicit body (head first), food and direction.
    pub fn with_snake<I, P>(
        width: u32,
        height: u32,
        body: I,
        food: Point,
        direction: Action,
        seed: u64,
    ) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = P>,
        P: Into<Point>,
    {
        let (w, h) = check_dimensions(width, height)?;
        let mut game = Self {
            width: w,
            height: h,
            snake: VecDeque::new(),
            food,
            direction,
            done: false,
            score: 0,
            rng: ChaCha20Rng::seed_from_u64(seed),
        };

        for segment in body.into_iter().map(Into::into) {
            if !game.in_bounds(segment) {
                return Err(GameError::OutOfBounds {
                    x: segment.x,
                    y: segment.y,
                });
            }
            if game.occupies(segment) {
                return Err(GameError::OverlappingSegments {
                    x: segment.x,
                    y: segment.y,
                });
            }
            game.snake.push_back(segment);
        }

        if game.snake.is_empty() {
            return Err(GameError::EmptySnake);
        }
        game.set_food(food)?;
        Ok(game)
    }

    /// Reset to a single segment at the grid centre heading up, with fresh food.
    pub fn reset(&mut self) -> ObservableGrid {
        self.snake.clear();
        self.snake
            .push_back(Point::new(self.width / 2, self.height / 2));
        self.direction = Action::Up;
        self.done = false;
        self.score = 0;

        match self.random_free_cell() {
            Some(food) => self.food = food,
            None => {
                // 1x1 grid: the snake already fills the board
                self.food = self.head();
                self.done = true;
            }
        }

        self.observe()
    }

    /// Actions that are not an immediate reversal. A lone head may reverse.
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.snake.len() <= 1 {
            return Action::ALL.to_vec();
        }
        let reverse = self.direction.opposite();
        Action::ALL
            .iter()
            .copied()
            .filter(|&a| a != reverse)
            .collect()
    }

    /// Apply an action and return the resulting board with the transition.
    pub fn step(&mut self, action: Action) -> StepResult {
        let transition = self.advance(action);
        StepResult {
            grid: self.observe(),
            reward: transition.reward,
            done: transition.done,
            event: transition.event,
        }
    }

    /// Apply an action without building the observable grid.
    ///
    /// The candidate head is checked against every segment, tail included,
    /// since the tail has not moved yet when the collision is evaluated.
    pub fn advance(&mut self, action: Action) -> Transition {
        if self.done {
            return Transition {
                reward: 0.0,
                done: true,
                event: StepEvent::AlreadyOver,
            };
        }

        let head = self.head().step(action);

        if !self.in_bounds(head) {
            self.done = true;
            return Transition::collision(Collision::OutOfBounds);
        }

        if self.occupies(head) {
            self.done = true;
            return Transition::collision(Collision::SelfCollision);
        }

        self.snake.push_front(head);
        self.direction = action;

        if head != self.food {
            self.snake.pop_back();
            return Transition {
                reward: 0.0,
                done: false,
                event: StepEvent::Moved,
            };
        }

        self.score += 1;
        match self.random_free_cell() {
            Some(food) => {
                self.food = food;
                Transition {
                    reward: FOOD_REWARD,
                    done: false,
                    event: StepEvent::AteFood,
                }
            }
            None => {
                self.done = true;
                Transition {
                    reward: FOOD_REWARD,
                    done: true,
                    event: StepEvent::BoardFilled,
                }
            }
        }
    }

    /// Render the board as an H×W grid of cells.
    pub fn observe(&self) -> ObservableGrid {
        let width = self.width as usize;
        let height = self.height as usize;
        let mut cells = vec![Cell::Empty; width * height];

        for p in &self.snake {
            if self.in_bounds(*p) {
                cells[p.y as usize * width + p.x as usize] = Cell::Body;
            }
        }
        if !self.occupies(self.food) {
            cells[self.food.y as usize * width + self.food.x as usize] = Cell::Food;
        }

        ObservableGrid {
            width,
            height,
            cells,
        }
    }

    /// Move the food to a specific free cell.
    pub fn set_food(&mut self, food: Point) -> Result<(), GameError> {
        if !self.in_bounds(food) {
            return Err(GameError::OutOfBounds {
                x: food.x,
                y: food.y,
            });
        }
        if self.occupies(food) {
            return Err(GameError::FoodOnSnake {
                x: food.x,
                y: food.y,
            });
        }
        self.food = food;
        Ok(())
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn snake(&self) -> &VecDeque<Point> {
        &self.snake
    }

    pub fn head(&self) -> Point {
        self.snake[0]
    }

    pub fn tail(&self) -> Point {
        self.snake[self.snake.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    pub fn food(&self) -> Point {
        self.food
    }

    pub fn direction(&self) -> Action {
        self.direction
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Total number of cells on the board.
    pub fn cell_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    /// Cells not covered by the snake.
    pub fn free_cell_count(&self) -> usize {
        self.cell_count().saturating_sub(self.snake.len())
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    /// Whether any segment, tail included, sits on `p`.
    pub fn occupies(&self, p: Point) -> bool {
        self.snake.contains(&p)
    }

    /// Whether a segment other than the tail sits on `p`.
    ///
    /// The tail vacates on the same step the head would arrive, so it is not
    /// a hazard for one-step lookahead.
    pub fn body_without_tail_contains(&self, p: Point) -> bool {
        let body_len = self.snake.len().saturating_sub(1);
        self.snake.iter().take(body_len).any(|&s| s == p)
    }

    /// Uniform free cell, preferring the interior (cells off the border).
    fn random_free_cell(&mut self) -> Option<Point> {
        let interior: Vec<Point> = (1..self.height - 1)
            .flat_map(|y| (1..self.width - 1).map(move |x| Point::new(x, y)))
            .filter(|p| !self.occupies(*p))
            .collect();

        let candidates = if interior.is_empty() {
            (0..self.height)
                .flat_map(|y| (0..self.width).map(move |x| Point::new(x, y)))
                .filter(|p| !self.occupies(*p))
                .collect()
        } else {
            interior
        };

        candidates.choose(&mut self.rng).copied()
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<(i32, i32), GameError> {
    let invalid = GameError::InvalidDimensions { width, height };
    if width == 0 || height == 0 {
        return Err(invalid);
    }
    let w = i32::try_from(width).map_err(|_| invalid.clone())?;
    let h = i32::try_from(height).map_err(|_| invalid)?;
    Ok((w, h))
}
