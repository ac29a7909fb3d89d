#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Grid Arcade engines.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative engine state, and pure systems. Adapters submit
//! [`PuzzleCommand`] or [`TrailCommand`] values describing desired mutations,
//! the engines execute those commands via their `apply` entry points, and then
//! broadcast [`PuzzleEvent`] or [`TrailEvent`] values for systems to react to
//! deterministically. Adapters only ever read state through the
//! [`PuzzleView`] and [`TrailView`] snapshots.

use std::{
    fmt,
    ops::{Add, Sub},
};

use serde::{Deserialize, Serialize};

/// Number of segments a trail starts with and shrinks back to after a self-bite.
pub const MIN_TRAIL_LENGTH: u32 = 3;

/// Location of a single grid cell expressed as column (`x`) and row (`y`).
///
/// Coordinates are signed so that a step off the edge of a board can be
/// represented before it is rejected or wrapped.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Point {
    x: i32,
    y: i32,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column of the point.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row of the point.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the neighbouring point one step in the provided direction.
    #[must_use]
    pub fn offset(self, direction: Direction) -> Self {
        self + direction.delta()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal directions accepted by both engines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in a stable order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit offset applied to a point when stepping in this direction.
    #[must_use]
    pub const fn delta(self) -> Point {
        match self {
            Self::Up => Point::new(0, -1),
            Self::Down => Point::new(0, 1),
            Self::Left => Point::new(-1, 0),
            Self::Right => Point::new(1, 0),
        }
    }

    /// Direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Dimensions of a rectangular board measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardSize {
    width: u32,
    height: u32,
}

impl BoardSize {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells on the board.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let count = u64::from(self.width) * u64::from(self.height);
        usize::try_from(count).unwrap_or(usize::MAX)
    }

    /// Reports whether the board has no area.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Reports whether the point lies on the board.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x() >= 0
            && point.y() >= 0
            && i64::from(point.x()) < i64::from(self.width)
            && i64::from(point.y()) < i64::from(self.height)
    }

    /// Wraps the point onto the board, treating both axes as toroidal.
    ///
    /// An empty board leaves the point untouched.
    #[must_use]
    pub fn wrap(&self, point: Point) -> Point {
        if self.is_empty() {
            return point;
        }
        Point::new(
            wrap_axis(point.x(), self.width),
            wrap_axis(point.y(), self.height),
        )
    }
}

fn wrap_axis(value: i32, extent: u32) -> i32 {
    let wrapped = i64::from(value).rem_euclid(i64::from(extent));
    i32::try_from(wrapped).unwrap_or(0)
}

/// Static terrain of a puzzle cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    /// Walkable cell that may host a goal or a box.
    Floor,
    /// Impassable cell.
    Wall,
}

/// Single cell of the puzzle grid.
///
/// Walls never carry a goal or a box; the constructors and mutators keep that
/// true.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    terrain: Terrain,
    is_goal: bool,
    has_box: bool,
}

impl Cell {
    /// Plain floor.
    #[must_use]
    pub const fn floor() -> Self {
        Self {
            terrain: Terrain::Floor,
            is_goal: false,
            has_box: false,
        }
    }

    /// Empty goal cell.
    #[must_use]
    pub const fn goal() -> Self {
        Self {
            terrain: Terrain::Floor,
            is_goal: true,
            has_box: false,
        }
    }

    /// Floor carrying a box.
    #[must_use]
    pub const fn boxed() -> Self {
        Self {
            terrain: Terrain::Floor,
            is_goal: false,
            has_box: true,
        }
    }

    /// Goal already covered by a box.
    #[must_use]
    pub const fn boxed_goal() -> Self {
        Self {
            terrain: Terrain::Floor,
            is_goal: true,
            has_box: true,
        }
    }

    /// Impassable wall.
    #[must_use]
    pub const fn wall() -> Self {
        Self {
            terrain: Terrain::Wall,
            is_goal: false,
            has_box: false,
        }
    }

    /// Terrain of the cell.
    #[must_use]
    pub const fn terrain(&self) -> Terrain {
        self.terrain
    }

    /// Reports whether the cell is a wall.
    #[must_use]
    pub const fn is_wall(&self) -> bool {
        matches!(self.terrain, Terrain::Wall)
    }

    /// Reports whether the cell is a goal.
    #[must_use]
    pub const fn is_goal(&self) -> bool {
        self.is_goal
    }

    /// Reports whether a box rests on the cell.
    #[must_use]
    pub const fn has_box(&self) -> bool {
        self.has_box
    }

    /// Reports whether a box rests on a goal in this cell.
    #[must_use]
    pub const fn on_goal(&self) -> bool {
        self.has_box && self.is_goal
    }

    /// Places a box on the cell. Returns `false` for walls, leaving them untouched.
    pub fn place_box(&mut self) -> bool {
        if self.is_wall() {
            return false;
        }
        self.has_box = true;
        true
    }

    /// Removes any box from the cell.
    pub fn clear_box(&mut self) {
        self.has_box = false;
    }
}

/// Classification of a single puzzle move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The actor stepped onto an empty floor cell.
    Moved,
    /// The actor pushed a box one cell and followed it.
    Pushed,
    /// A wall, the board edge, or an immovable box stopped the move. Nothing changed.
    Blocked,
    /// A push covered the last open goal.
    Solved,
}

impl MoveOutcome {
    /// Reports whether the actor changed position.
    #[must_use]
    pub const fn actor_moved(self) -> bool {
        !matches!(self, Self::Blocked)
    }

    /// Reports whether a box was pushed.
    #[must_use]
    pub const fn box_pushed(self) -> bool {
        matches!(self, Self::Pushed | Self::Solved)
    }
}

/// Commands that express every permissible puzzle session mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PuzzleCommand {
    /// Attempts to move the actor one cell.
    Move {
        /// Direction of the attempted step.
        direction: Direction,
    },
    /// Reloads the current level from its definition.
    Restart,
    /// Discards the current level and loads the next one.
    AdvanceLevel,
}

/// Events broadcast by the puzzle session after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PuzzleEvent {
    /// A level was (re)loaded from its definition.
    LevelLoaded {
        /// Zero-based index of the level within the level set.
        level: usize,
        /// Open goals in the freshly loaded level.
        remaining_goals: u32,
    },
    /// The actor moved between two cells.
    ActorMoved {
        /// Cell occupied before the move.
        from: Point,
        /// Cell occupied after the move.
        to: Point,
    },
    /// A box was pushed between two cells.
    BoxPushed {
        /// Cell the box left.
        from: Point,
        /// Cell the box now occupies.
        to: Point,
    },
    /// The open goal counter changed.
    GoalsChanged {
        /// Goals still lacking a box.
        remaining: u32,
    },
    /// A move was rejected.
    MoveBlocked {
        /// Direction of the rejected move.
        direction: Direction,
    },
    /// Every goal of the current level is covered.
    LevelSolved {
        /// Zero-based index of the solved level.
        level: usize,
    },
    /// The last level was solved and advanced past.
    SessionCompleted,
}

/// Commands accepted by the trail engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrailCommand {
    /// Overwrites the heading used by the next step.
    SetDirection {
        /// New heading.
        direction: Direction,
    },
    /// Switches between running and paused.
    TogglePause,
    /// Advances the trail by one tick, optionally changing heading first.
    Step {
        /// Heading requested during this tick, if any.
        input: Option<Direction>,
    },
}

/// Events broadcast by the trail engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrailEvent {
    /// The head moved to a new cell.
    HeadAdvanced {
        /// Previous head cell.
        from: Point,
        /// New head cell.
        to: Point,
    },
    /// The head reached the food.
    FoodEaten {
        /// Cell where the food was eaten.
        cell: Point,
        /// Logical length after growing.
        length: u32,
    },
    /// Food was relocated.
    FoodPlaced {
        /// New food cell.
        cell: Point,
    },
    /// The head ran into the body and the trail shrank back to its minimum.
    SelfBitten {
        /// Cell where the collision happened.
        cell: Point,
        /// Logical length before shrinking.
        previous_length: u32,
    },
    /// The pause state flipped.
    PauseToggled {
        /// Whether the trail is now paused.
        paused: bool,
    },
}

/// Run state of the trail engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrailPhase {
    /// Steps advance the trail.
    Running,
    /// Steps are ignored until the trail is resumed.
    Paused,
}

/// Result of a single trail step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrailStep {
    /// The trail is paused; nothing moved.
    Paused,
    /// The head advanced and the tail followed.
    Advanced,
    /// The head ate the food and the trail grew by one.
    Grew,
    /// The head hit the body; the trail shrank back to its minimum length.
    Bitten {
        /// Logical length before shrinking.
        previous_length: u32,
    },
}

/// Read-only view of the puzzle grid handed to adapters.
#[derive(Clone, Copy, Debug)]
pub struct PuzzleView<'a> {
    cells: &'a [Cell],
    size: BoardSize,
    actor: Point,
    remaining_goals: u32,
    level: usize,
    level_count: usize,
}

impl<'a> PuzzleView<'a> {
    /// Captures a new puzzle view backed by the provided row-major cell slice.
    #[must_use]
    pub fn new(
        cells: &'a [Cell],
        size: BoardSize,
        actor: Point,
        remaining_goals: u32,
        level: usize,
        level_count: usize,
    ) -> Self {
        Self {
            cells,
            size,
            actor,
            remaining_goals,
            level,
            level_count,
        }
    }

    /// Dimensions of the grid.
    #[must_use]
    pub const fn size(&self) -> BoardSize {
        self.size
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

    /// Zero-based index of the level on display.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Number of levels in the session.
    #[must_use]
    pub const fn level_count(&self) -> usize {
        self.level_count
    }

    /// Returns the cell at the provided point, if it lies on the grid.
    #[must_use]
    pub fn cell(&self, point: Point) -> Option<Cell> {
        if !self.size.contains(point) {
            return None;
        }
        let width = usize::try_from(self.size.width()).ok()?;
        let index = usize::try_from(point.y()).ok()? * width + usize::try_from(point.x()).ok()?;
        self.cells.get(index).copied()
    }

    /// Iterates over every cell together with its position, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Cell)> + 'a {
        let width = self.size.width().max(1) as usize;
        self.cells.iter().enumerate().map(move |(index, cell)| {
            let x = i32::try_from(index % width).unwrap_or(i32::MAX);
            let y = i32::try_from(index / width).unwrap_or(i32::MAX);
            (Point::new(x, y), *cell)
        })
    }
}

/// Read-only snapshot of the trail handed to adapters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrailView {
    /// Board dimensions.
    pub board: BoardSize,
    /// Visible segments, head first, truncated to the logical length.
    pub body: Vec<Point>,
    /// Logical trail length.
    pub length: u32,
    /// Current heading.
    pub direction: Direction,
    /// Food position.
    pub food: Point,
    /// Current run state.
    pub phase: TrailPhase,
}

impl TrailView {
    /// Head segment, if the trail has one.
    #[must_use]
    pub fn head(&self) -> Option<Point> {
        self.body.first().copied()
    }
}
