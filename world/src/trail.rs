//! Self-growing trail engine on a toroidal board.

use std::collections::VecDeque;

use grid_arcade_core::{
    BoardSize, Direction, Point, TrailCommand, TrailEvent, TrailPhase, TrailStep, MIN_TRAIL_LENGTH,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::debug;

/// Reasons a trail session cannot be created.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum TrailError {
    /// The board cannot hold the initial trail.
    #[error(
        "trail board must be at least {min}x1 cells, got {width}x{height}",
        min = MIN_TRAIL_LENGTH
    )]
    BoardTooSmall {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}

/// Authoritative state of a trail session.
///
/// The body is stored head first. Between calls its length matches the
/// logical `length`; inside a step it may briefly hold one extra segment.
#[derive(Clone, Debug)]
pub struct TrailState {
    board: BoardSize,
    body: VecDeque<Point>,
    length: u32,
    direction: Direction,
    food: Point,
    phase: TrailPhase,
    rng: ChaCha8Rng,
}

#[derive(Clone, Copy, Debug)]
struct StepRecord {
    from: Point,
    to: Point,
    ate: Option<(Point, Point)>,
    bitten: Option<u32>,
}

impl TrailState {
    /// Creates a running trail centred on the board, heading right.
    ///
    /// The seed drives every food placement so identical seeds and inputs
    /// replay identically.
    pub fn new(board: BoardSize, seed: u64) -> Result<Self, TrailError> {
        let too_small = TrailError::BoardTooSmall {
            width: board.width(),
            height: board.height(),
        };
        if board.width() < MIN_TRAIL_LENGTH
            || board.height() == 0
            || i32::try_from(board.width()).is_err()
            || i32::try_from(board.height()).is_err()
        {
            return Err(too_small);
        }

        let centre_x = i32::try_from(board.width() / 2).map_err(|_| too_small)?;
        let centre_y = i32::try_from(board.height() / 2).map_err(|_| too_small)?;
        let body: VecDeque<Point> = (0..MIN_TRAIL_LENGTH as i32)
            .map(|offset| board.wrap(Point::new(centre_x - offset, centre_y)))
            .collect();

        let mut state = Self {
            board,
            body,
            length: MIN_TRAIL_LENGTH,
            direction: Direction::Right,
            food: Point::default(),
            phase: TrailPhase::Running,
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        state.food = state.random_cell();
        Ok(state)
    }

    /// Moves the food to `food`, wrapped onto the board.
    ///
    /// Setup hook for tests and recorded replays. It consumes the state, so
    /// a session handed to [`apply`] only changes through commands.
    #[must_use]
    pub fn with_food(mut self, food: Point) -> Self {
        self.food = self.board.wrap(food);
        self
    }

    /// Board dimensions.
    #[must_use]
    pub const fn board(&self) -> BoardSize {
        self.board
    }

    /// Segments, head first.
    #[must_use]
    pub fn body(&self) -> &VecDeque<Point> {
        &self.body
    }

    /// Most recently computed head.
    #[must_use]
    pub fn head(&self) -> Option<Point> {
        self.body.front().copied()
    }

    /// Logical length of the trail.
    #[must_use]
    pub const fn length(&self) -> u32 {
        self.length
    }

    /// Heading used by the next step.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Current food position.
    #[must_use]
    pub const fn food(&self) -> Point {
        self.food
    }

    /// Current run state.
    #[must_use]
    pub const fn phase(&self) -> TrailPhase {
        self.phase
    }

    /// Reports whether steps are currently ignored.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        matches!(self.phase, TrailPhase::Paused)
    }

    /// Overwrites the heading. Reversing onto the body is allowed.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Switches between running and paused, returning whether the trail is now paused.
    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            TrailPhase::Running => TrailPhase::Paused,
            TrailPhase::Paused => TrailPhase::Running,
        };
        self.is_paused()
    }

    /// Advances the trail by one tick.
    ///
    /// A requested heading is accepted even while paused, but only a running
    /// trail moves.
    pub fn step(&mut self, input: Option<Direction>) -> TrailStep {
        match self.advance(input) {
            None => TrailStep::Paused,
            Some(StepRecord {
                bitten: Some(previous_length),
                ..
            }) => TrailStep::Bitten { previous_length },
            Some(StepRecord { ate: Some(_), .. }) => TrailStep::Grew,
            Some(_) => TrailStep::Advanced,
        }
    }

    fn advance(&mut self, input: Option<Direction>) -> Option<StepRecord> {
        if let Some(direction) = input {
            self.set_direction(direction);
        }
        if self.is_paused() {
            return None;
        }

        let from = self.head()?;
        let to = self.board.wrap(from.offset(self.direction));
        self.body.push_front(to);

        let ate = if to == self.food {
            self.length += 1;
            self.food = self.random_cell();
            Some((to, self.food))
        } else {
            let _ = self.body.pop_back();
            None
        };

        let limit = usize::try_from(self.length).unwrap_or(usize::MAX);
        let bitten = if self
            .body
            .iter()
            .take(limit)
            .skip(2)
            .any(|segment| *segment == to)
        {
            let previous_length = self.length;
            self.length = MIN_TRAIL_LENGTH;
            self.body.truncate(MIN_TRAIL_LENGTH as usize);
            debug!(%to, previous_length, "trail bit itself");
            Some(previous_length)
        } else {
            None
        };

        Some(StepRecord {
            from,
            to,
            ate,
            bitten,
        })
    }

    fn random_cell(&mut self) -> Point {
        let width = i32::try_from(self.board.width()).unwrap_or(i32::MAX);
        let height = i32::try_from(self.board.height()).unwrap_or(i32::MAX);
        Point::new(self.rng.gen_range(0..width), self.rng.gen_range(0..height))
    }
}

/// Applies the provided command to the trail, mutating state deterministically.
pub fn apply(state: &mut TrailState, command: TrailCommand, out_events: &mut Vec<TrailEvent>) {
    match command {
        TrailCommand::SetDirection { direction } => state.set_direction(direction),
        TrailCommand::TogglePause => {
            let paused = state.toggle_pause();
            out_events.push(TrailEvent::PauseToggled { paused });
        }
        TrailCommand::Step { input } => {
            let Some(record) = state.advance(input) else {
                return;
            };
            out_events.push(TrailEvent::HeadAdvanced {
                from: record.from,
                to: record.to,
            });
            if let Some((cell, food)) = record.ate {
                out_events.push(TrailEvent::FoodEaten {
                    cell,
                    length: record.bitten.unwrap_or(state.length()),
                });
                out_events.push(TrailEvent::FoodPlaced { cell: food });
            }
            if let Some(previous_length) = record.bitten {
                out_events.push(TrailEvent::SelfBitten {
                    cell: record.to,
                    previous_length,
                });
            }
        }
    }
}
