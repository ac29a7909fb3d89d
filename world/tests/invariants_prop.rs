//! Property tests for invariants that must hold after any input sequence.

use grid_arcade_core::{BoardSize, Direction, MoveOutcome, PuzzleCommand, MIN_TRAIL_LENGTH};
use grid_arcade_world::{self as world, level, LevelSet, PuzzleGrid, PuzzleSession, TrailState};
use proptest::prelude::*;

const ARENA: &str = "########|#  .   #|# $$ * #|#.@ $. #|#  .$  #|#      #|########";

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn recount_open_goals(grid: &PuzzleGrid) -> u32 {
    let open = grid
        .cells()
        .cells()
        .iter()
        .filter(|cell| cell.is_goal() && !cell.has_box())
        .count();
    u32::try_from(open).expect("count fits")
}

fn box_count(grid: &PuzzleGrid) -> usize {
    grid.cells().cells().iter().filter(|cell| cell.has_box()).count()
}

proptest! {
    #[test]
    fn goal_counter_matches_recount(moves in prop::collection::vec(direction(), 0..120)) {
        let mut grid = level::parse(ARENA).expect("arena parses");
        let boxes = box_count(&grid);

        for direction in moves {
            let before = grid.clone();
            let outcome = grid.apply_move(direction);

            prop_assert_eq!(grid.remaining_goals(), recount_open_goals(&grid));
            prop_assert_eq!(box_count(&grid), boxes);
            prop_assert_eq!(outcome == MoveOutcome::Solved, outcome.box_pushed() && grid.is_solved());
            if outcome == MoveOutcome::Blocked {
                prop_assert_eq!(&grid, &before);
            }

            let actor = grid.cell(grid.actor()).expect("actor stays on the grid");
            prop_assert!(!actor.is_wall());
            prop_assert!(!actor.has_box());
        }
    }

    #[test]
    fn restart_always_restores_the_loaded_level(
        moves in prop::collection::vec(direction(), 0..60),
    ) {
        let levels = LevelSet::from_definitions([ARENA]).expect("arena parses");
        let mut session = PuzzleSession::new(levels).expect("session starts");
        let initial = session.grid().clone();
        let mut events = Vec::new();

        for direction in moves {
            world::puzzle::apply(&mut session, PuzzleCommand::Move { direction }, &mut events)
                .expect("move applies");
        }
        world::puzzle::apply(&mut session, PuzzleCommand::Restart, &mut events)
            .expect("restart applies");

        prop_assert_eq!(session.grid(), &initial);
        prop_assert!(!session.is_level_solved());
    }

    #[test]
    fn trail_length_matches_body(
        seed in any::<u64>(),
        width in 3u32..16,
        height in 1u32..16,
        inputs in prop::collection::vec(prop::option::of(direction()), 0..200),
    ) {
        let board = BoardSize::new(width, height);
        let mut state = TrailState::new(board, seed).expect("board fits");

        for input in inputs {
            let _ = state.step(input);

            prop_assert!(state.length() >= MIN_TRAIL_LENGTH);
            prop_assert_eq!(state.body().len(), state.length() as usize);
            prop_assert!(state.body().iter().all(|segment| board.contains(*segment)));
            prop_assert!(board.contains(state.food()));
        }
    }
}
