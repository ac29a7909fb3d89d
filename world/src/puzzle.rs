//! Box-pushing puzzle engine and the session that sequences its levels.

use grid_arcade_core::{
    BoardSize, Cell, Direction, MoveOutcome, Point, PuzzleCommand, PuzzleEvent,
};
use tracing::debug;

use crate::{
    grid::Grid,
    level::{LevelFileError, LevelSet},
};

/// Authoritative state of a single puzzle level.
///
/// `remaining_goals` always equals the number of goal cells without a box. It
/// is adjusted on every push and never recomputed from the cells.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PuzzleGrid {
    cells: Grid<Cell>,
    actor: Point,
    remaining_goals: u32,
}

impl PuzzleGrid {
    pub(crate) fn from_parts(cells: Grid<Cell>, actor: Point, remaining_goals: u32) -> Self {
        Self {
            cells,
            actor,
            remaining_goals,
        }
    }

    /// Dimensions of the level.
    #[must_use]
    pub const fn size(&self) -> BoardSize {
        self.cells.size()
    }

    /// Current actor position.
    #[must_use]
    pub const fn actor(&self) -> Point {
        self.actor
    }

    /// Goals still lacking a box.
    #[must_use]
    pub const fn remaining_goals(&self) -> u32 {
        self.remaining_goals
    }

    /// Reports whether every goal is covered.
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        self.remaining_goals == 0
    }

    /// Returns the cell at `point`, if it lies on the grid.
    #[must_use]
    pub fn cell(&self, point: Point) -> Option<Cell> {
        self.cells.get(point).copied()
    }

    /// Underlying cell storage.
    #[must_use]
    pub fn cells(&self) -> &Grid<Cell> {
        &self.cells
    }

    /// Attempts to move the actor one cell, pushing a box if one is in the way.
    ///
    /// Walls, the grid edge, and boxes backed by a wall or another box block
    /// the move without mutating anything.
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        let destination = self.actor.offset(direction);
        let Some(target) = self.cell(destination) else {
            return MoveOutcome::Blocked;
        };
        if target.is_wall() {
            return MoveOutcome::Blocked;
        }

        if !target.has_box() {
            self.actor = destination;
            return MoveOutcome::Moved;
        }

        let beyond = destination.offset(direction);
        let Some(landing) = self.cell(beyond) else {
            return MoveOutcome::Blocked;
        };
        if landing.is_wall() || landing.has_box() {
            return MoveOutcome::Blocked;
        }

        self.shift_box(destination, beyond);
        self.actor = destination;

        if self.is_solved() {
            MoveOutcome::Solved
        } else {
            MoveOutcome::Pushed
        }
    }

    fn shift_box(&mut self, from: Point, to: Point) {
        if let Some(cell) = self.cells.get_mut(from) {
            cell.clear_box();
            if cell.is_goal() {
                self.remaining_goals += 1;
            }
        }
        if let Some(cell) = self.cells.get_mut(to) {
            if cell.place_box() && cell.is_goal() {
                self.remaining_goals = self.remaining_goals.saturating_sub(1);
            }
        }
    }
}

/// Sequence of levels played one after another.
///
/// The session owns the live grid exclusively. Restarting and advancing both
/// replace the grid with a freshly loaded one.
#[derive(Clone, Debug)]
pub struct PuzzleSession {
    levels: LevelSet,
    level: usize,
    grid: PuzzleGrid,
    solved: bool,
    completed: bool,
}

impl PuzzleSession {
    /// Starts a session on the first level of the set.
    pub fn new(levels: LevelSet) -> Result<Self, LevelFileError> {
        let grid = levels.load(0)?;
        Ok(Self {
            levels,
            level: 0,
            grid,
            solved: false,
            completed: false,
        })
    }

    /// Zero-based index of the level being played.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Number of levels in the session.
    #[must_use]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Live grid of the current level.
    #[must_use]
    pub const fn grid(&self) -> &PuzzleGrid {
        &self.grid
    }

    /// Reports whether the current level was solved and awaits advancing.
    #[must_use]
    pub const fn is_level_solved(&self) -> bool {
        self.solved
    }

    /// Reports whether the last level has been solved and advanced past.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    fn load(
        &mut self,
        level: usize,
        out_events: &mut Vec<PuzzleEvent>,
    ) -> Result<(), LevelFileError> {
        self.grid = self.levels.load(level)?;
        self.level = level;
        self.solved = false;
        debug!(
            level,
            remaining_goals = self.grid.remaining_goals(),
            "level loaded"
        );
        out_events.push(PuzzleEvent::LevelLoaded {
            level,
            remaining_goals: self.grid.remaining_goals(),
        });
        Ok(())
    }

    fn handle_move(&mut self, direction: Direction, out_events: &mut Vec<PuzzleEvent>) {
        if self.completed || self.solved {
            return;
        }

        let from = self.grid.actor();
        let goals_before = self.grid.remaining_goals();
        let outcome = self.grid.apply_move(direction);

        if !outcome.actor_moved() {
            out_events.push(PuzzleEvent::MoveBlocked { direction });
            return;
        }

        let to = self.grid.actor();
        if outcome.box_pushed() {
            out_events.push(PuzzleEvent::BoxPushed {
                from: to,
                to: to.offset(direction),
            });
        }
        out_events.push(PuzzleEvent::ActorMoved { from, to });

        let remaining = self.grid.remaining_goals();
        if remaining != goals_before {
            out_events.push(PuzzleEvent::GoalsChanged { remaining });
        }
        if outcome == MoveOutcome::Solved {
            self.solved = true;
            debug!(level = self.level, "level solved");
            out_events.push(PuzzleEvent::LevelSolved { level: self.level });
        }
    }
}

/// Applies the provided command to the session, mutating state deterministically.
///
/// Loading can only fail if a definition stopped validating after the set was
/// built, which [`LevelSet`] construction rules out.
pub fn apply(
    session: &mut PuzzleSession,
    command: PuzzleCommand,
    out_events: &mut Vec<PuzzleEvent>,
) -> Result<(), LevelFileError> {
    match command {
        PuzzleCommand::Move { direction } => {
            session.handle_move(direction, out_events);
        }
        PuzzleCommand::Restart => {
            if !session.completed {
                session.load(session.level, out_events)?;
            }
        }
        PuzzleCommand::AdvanceLevel => {
            if session.completed {
                return Ok(());
            }
            let next = session.level + 1;
            if next < session.levels.len() {
                session.load(next, out_events)?;
            } else {
                session.completed = true;
                debug!(levels = session.levels.len(), "session completed");
                out_events.push(PuzzleEvent::SessionCompleted);
            }
        }
    }
    Ok(())
}
