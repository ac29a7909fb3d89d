#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure progression system that sequences puzzle levels and tracks per-level counters.

use grid_arcade_core::{PuzzleCommand, PuzzleEvent};

/// Progression system that turns solved levels into advance commands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Progression {
    level: usize,
    moves: u32,
    pushes: u32,
    completed: bool,
}

impl Progression {
    /// Creates a progression tracker positioned on the first level.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            level: 0,
            moves: 0,
            pushes: 0,
            completed: false,
        }
    }

    /// Consumes session events and emits the commands needed to keep the session moving.
    ///
    /// Counters restart whenever a level is (re)loaded, so a restart also
    /// clears the move and push tallies.
    pub fn handle(&mut self, events: &[PuzzleEvent], out: &mut Vec<PuzzleCommand>) {
        for event in events {
            match event {
                PuzzleEvent::LevelLoaded { level, .. } => {
                    self.level = *level;
                    self.moves = 0;
                    self.pushes = 0;
                }
                PuzzleEvent::ActorMoved { .. } => {
                    self.moves = self.moves.saturating_add(1);
                }
                PuzzleEvent::BoxPushed { .. } => {
                    self.pushes = self.pushes.saturating_add(1);
                }
                PuzzleEvent::LevelSolved { .. } => {
                    if !self.completed {
                        out.push(PuzzleCommand::AdvanceLevel);
                    }
                }
                PuzzleEvent::SessionCompleted => self.completed = true,
                PuzzleEvent::GoalsChanged { .. } | PuzzleEvent::MoveBlocked { .. } => {}
            }
        }
    }

    /// Zero-based index of the level most recently loaded.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Successful actor moves since the level was loaded.
    #[must_use]
    pub const fn moves(&self) -> u32 {
        self.moves
    }

    /// Box pushes since the level was loaded.
    #[must_use]
    pub const fn pushes(&self) -> u32 {
        self.pushes
    }

    /// Reports whether the session has run out of levels.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }
}
