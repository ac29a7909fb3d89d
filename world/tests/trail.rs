use grid_arcade_core::{BoardSize, Direction, Point, TrailCommand, TrailEvent, TrailStep};
use grid_arcade_world::{self as world, query, TrailState};

fn body(state: &TrailState) -> Vec<Point> {
    state.body().iter().copied().collect()
}

fn step_to(state: &mut TrailState, input: Option<Direction>, expected_head: Point) {
    assert_eq!(state.step(input), TrailStep::Advanced);
    assert_eq!(state.head(), Some(expected_head));
    assert_eq!(state.length(), 3);
}

#[test]
fn head_wraps_across_every_edge() {
    let mut state = TrailState::new(BoardSize::new(5, 5), 4)
        .expect("board fits")
        .with_food(Point::new(2, 4));
    assert_eq!(state.head(), Some(Point::new(2, 2)));

    step_to(&mut state, None, Point::new(3, 2));
    step_to(&mut state, None, Point::new(4, 2));
    step_to(&mut state, None, Point::new(0, 2));
    step_to(&mut state, Some(Direction::Up), Point::new(0, 1));
    step_to(&mut state, None, Point::new(0, 0));
    step_to(&mut state, None, Point::new(0, 4));
    step_to(&mut state, Some(Direction::Left), Point::new(4, 4));
    step_to(&mut state, Some(Direction::Down), Point::new(4, 0));

    assert_eq!(
        body(&state),
        vec![Point::new(4, 0), Point::new(4, 4), Point::new(0, 4)]
    );
}

#[test]
fn right_edge_of_standard_board_wraps_to_column_zero() {
    let mut state = TrailState::new(BoardSize::new(20, 20), 11)
        .expect("board fits")
        .with_food(Point::new(3, 0));
    for _ in 0..9 {
        let _ = state.step(None);
    }
    assert_eq!(state.head(), Some(Point::new(19, 10)));

    let _ = state.step(None);
    assert_eq!(state.head(), Some(Point::new(0, 10)));
}

#[test]
fn eating_keeps_the_tail_in_place() {
    let mut state = TrailState::new(BoardSize::new(10, 10), 2)
        .expect("board fits")
        .with_food(Point::new(6, 5));

    assert_eq!(state.step(None), TrailStep::Grew);
    assert_eq!(state.length(), 4);
    assert_eq!(
        body(&state),
        vec![
            Point::new(6, 5),
            Point::new(5, 5),
            Point::new(4, 5),
            Point::new(3, 5),
        ]
    );
    assert!(state.board().contains(state.food()));
}

#[test]
fn biting_a_long_trail_resets_it_to_minimum_length() {
    let mut state = TrailState::new(BoardSize::new(20, 20), 5).expect("board fits");
    for x in 11..=17 {
        state = state.with_food(Point::new(x, 10));
        assert_eq!(state.step(None), TrailStep::Grew);
    }
    state = state.with_food(Point::new(0, 0));
    assert_eq!(state.length(), 10);
    assert_eq!(state.body().len(), 10);

    let _ = state.step(Some(Direction::Down));
    let _ = state.step(Some(Direction::Left));
    let mut events = Vec::new();
    world::trail::apply(
        &mut state,
        TrailCommand::Step {
            input: Some(Direction::Up),
        },
        &mut events,
    );

    assert_eq!(
        events,
        vec![
            TrailEvent::HeadAdvanced {
                from: Point::new(16, 11),
                to: Point::new(16, 10),
            },
            TrailEvent::SelfBitten {
                cell: Point::new(16, 10),
                previous_length: 10,
            },
        ]
    );
    assert_eq!(state.length(), 3);
    assert_eq!(
        body(&state),
        vec![Point::new(16, 10), Point::new(16, 11), Point::new(17, 11)]
    );
}

#[test]
fn reversing_onto_the_neck_counts_as_a_bite() {
    let mut state = TrailState::new(BoardSize::new(20, 20), 6)
        .expect("board fits")
        .with_food(Point::new(0, 0));

    assert_eq!(
        state.step(Some(Direction::Left)),
        TrailStep::Bitten { previous_length: 3 }
    );
    assert_eq!(state.head(), Some(Point::new(9, 10)));
    assert_eq!(state.length(), 3);
    assert_eq!(state.body().len(), 3);
}

#[test]
fn eating_into_the_tail_still_counts_as_a_bite() {
    // On a 3x1 board the head's next cell is the tail.
    let mut state = TrailState::new(BoardSize::new(3, 1), 0)
        .expect("board fits")
        .with_food(Point::new(2, 0));
    assert_eq!(state.head(), Some(Point::new(1, 0)));

    let mut events = Vec::new();
    world::trail::apply(&mut state, TrailCommand::Step { input: None }, &mut events);

    assert_eq!(
        events,
        vec![
            TrailEvent::HeadAdvanced {
                from: Point::new(1, 0),
                to: Point::new(2, 0),
            },
            TrailEvent::FoodEaten {
                cell: Point::new(2, 0),
                length: 4,
            },
            TrailEvent::FoodPlaced { cell: state.food() },
            TrailEvent::SelfBitten {
                cell: Point::new(2, 0),
                previous_length: 4,
            },
        ]
    );
    assert_eq!(state.length(), 3);
    assert_eq!(state.body().len(), 3);

    let mut replay = TrailState::new(BoardSize::new(3, 1), 0)
        .expect("board fits")
        .with_food(Point::new(2, 0));
    assert_eq!(replay.step(None), TrailStep::Bitten { previous_length: 4 });
    assert_eq!(replay.length(), 3);
}

#[test]
fn food_may_be_placed_under_the_body() {
    // Every cell of a 3x1 board is occupied by the initial trail.
    for seed in 0..16 {
        let mut state = TrailState::new(BoardSize::new(3, 1), seed).expect("board fits");
        assert!(state.body().contains(&state.food()));

        let _ = state.step(None);
        assert_eq!(state.body().len(), state.length() as usize);
        assert!(state.length() >= 3);
    }
}

#[test]
fn paused_trail_ignores_steps_but_keeps_heading() {
    let mut state = TrailState::new(BoardSize::new(8, 8), 7).expect("board fits");
    let mut events = Vec::new();

    world::trail::apply(&mut state, TrailCommand::TogglePause, &mut events);
    world::trail::apply(
        &mut state,
        TrailCommand::Step {
            input: Some(Direction::Up),
        },
        &mut events,
    );
    assert_eq!(events, vec![TrailEvent::PauseToggled { paused: true }]);
    assert_eq!(state.direction(), Direction::Up);
    assert_eq!(state.head(), Some(Point::new(4, 4)));

    events.clear();
    world::trail::apply(&mut state, TrailCommand::TogglePause, &mut events);
    world::trail::apply(&mut state, TrailCommand::Step { input: None }, &mut events);
    assert_eq!(events[0], TrailEvent::PauseToggled { paused: false });
    assert_eq!(
        events[1],
        TrailEvent::HeadAdvanced {
            from: Point::new(4, 4),
            to: Point::new(4, 3),
        }
    );
}

#[test]
fn view_reports_logical_body() {
    let state = TrailState::new(BoardSize::new(20, 20), 8).expect("board fits");
    let view = query::trail_view(&state);

    assert_eq!(view.length, 3);
    assert_eq!(view.body, body(&state));
    assert_eq!(view.head(), Some(Point::new(10, 10)));
    assert_eq!(view.food, state.food());
}
