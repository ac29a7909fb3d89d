#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative engine state for the Grid Arcade games.
//!
//! [`puzzle::apply`] and [`trail::apply`] are the only entry points that
//! mutate a session in response to adapter commands; [`query`] hands out
//! read-only snapshots for rendering. [`TrailState::with_food`] is a
//! construction-time hook for pinning food in tests and replays.

mod grid;
pub mod level;
pub mod puzzle;
pub mod trail;

pub use grid::Grid;
pub use level::{LevelFileError, LevelSet, MalformedLevelError};
pub use puzzle::{PuzzleGrid, PuzzleSession};
pub use trail::{TrailError, TrailState};

/// Query functions that provide read-only access to engine state.
pub mod query {
    use grid_arcade_core::{PuzzleView, TrailView};

    use super::{PuzzleGrid, PuzzleSession, TrailState};

    /// Captures a view of the session's current level.
    #[must_use]
    pub fn puzzle_view(session: &PuzzleSession) -> PuzzleView<'_> {
        let grid = session.grid();
        PuzzleView::new(
            grid.cells().cells(),
            grid.size(),
            grid.actor(),
            grid.remaining_goals(),
            session.level(),
            session.level_count(),
        )
    }

    /// Captures a view of a standalone grid, reported as level 1 of 1.
    #[must_use]
    pub fn grid_view(grid: &PuzzleGrid) -> PuzzleView<'_> {
        PuzzleView::new(
            grid.cells().cells(),
            grid.size(),
            grid.actor(),
            grid.remaining_goals(),
            0,
            1,
        )
    }

    /// Captures a snapshot of the trail, truncated to its logical length.
    #[must_use]
    pub fn trail_view(state: &TrailState) -> TrailView {
        let visible = usize::try_from(state.length()).unwrap_or(usize::MAX);
        TrailView {
            board: state.board(),
            body: state.body().iter().copied().take(visible).collect(),
            length: state.length(),
            direction: state.direction(),
            food: state.food(),
            phase: state.phase(),
        }
    }
}
