#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Grid Arcade adapters.
//!
//! Engines never draw. Adapters capture a view, turn it into a [`Scene`],
//! fit it to their surface with a [`RenderContext`] and hand both to a
//! [`RenderingBackend`].

use anyhow::Result as AnyResult;
use glam::Vec2;
use grid_arcade_core::{BoardSize, Point, PuzzleView, TrailPhase, TrailView};
use std::{error::Error, fmt};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Fixed palette shared by both games.
pub mod palette {
    use super::Color;

    /// Puzzle background.
    pub const BLACK: Color = Color::from_rgb_u8(0, 0, 0);
    /// Trail window background outside the board.
    pub const GRAY: Color = Color::from_rgb_u8(128, 128, 128);
    /// Walls.
    pub const WHITE: Color = Color::from_rgb_u8(255, 255, 255);
    /// Goals, boxes off a goal, and food.
    pub const RED: Color = Color::from_rgb_u8(255, 0, 0);
    /// Boxes resting on a goal, and trail body segments.
    pub const GREEN: Color = Color::from_rgb_u8(0, 255, 0);
    /// Trail head.
    pub const DARK_GREEN: Color = Color::from_rgb_u8(0, 128, 0);
    /// Puzzle actor.
    pub const BLUE: Color = Color::from_rgb_u8(0, 0, 255);
}

/// Errors that can occur when fitting a board to a surface.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// The board has no cells to draw.
    EmptyBoard,
    /// The surface cannot give every cell at least one pixel.
    WindowTooSmall {
        /// Surface width in pixels.
        window_width: u32,
        /// Surface height in pixels.
        window_height: u32,
        /// Board that failed to fit.
        board: BoardSize,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBoard => write!(f, "cannot render a board without cells"),
            Self::WindowTooSmall {
                window_width,
                window_height,
                board,
            } => write!(
                f,
                "a {window_width}x{window_height} window cannot fit a {}x{} board",
                board.width(),
                board.height()
            ),
        }
    }
}

impl Error for RenderingError {}

/// Pixel geometry that centres a board inside a window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderContext {
    window_width: u32,
    window_height: u32,
    board: BoardSize,
    cell_length: u32,
    padding_x: u32,
    padding_y: u32,
}

impl RenderContext {
    /// Picks the largest square cell that fits the board into the window.
    pub fn fit(
        window_width: u32,
        window_height: u32,
        board: BoardSize,
    ) -> Result<Self, RenderingError> {
        if board.is_empty() {
            return Err(RenderingError::EmptyBoard);
        }

        let cell_length = (window_width / board.width()).min(window_height / board.height());
        if cell_length == 0 {
            return Err(RenderingError::WindowTooSmall {
                window_width,
                window_height,
                board,
            });
        }

        Ok(Self {
            window_width,
            window_height,
            board,
            cell_length,
            padding_x: (window_width - cell_length * board.width()) / 2,
            padding_y: (window_height - cell_length * board.height()) / 2,
        })
    }

    /// Side length of one cell in pixels.
    #[must_use]
    pub const fn cell_length(&self) -> u32 {
        self.cell_length
    }

    /// Board the context was fitted to.
    #[must_use]
    pub const fn board(&self) -> BoardSize {
        self.board
    }

    /// Window dimensions in pixels.
    #[must_use]
    pub fn window(&self) -> Vec2 {
        Vec2::new(self.window_width as f32, self.window_height as f32)
    }

    /// Offset of the board's top-left corner from the window's.
    #[must_use]
    pub fn padding(&self) -> Vec2 {
        Vec2::new(self.padding_x as f32, self.padding_y as f32)
    }

    /// Top-left pixel of the cell at `point`.
    #[must_use]
    pub fn cell_origin(&self, point: Point) -> Vec2 {
        self.padding() + Vec2::new(point.x() as f32, point.y() as f32) * self.cell_length as f32
    }

    /// Size of the whole board in pixels.
    #[must_use]
    pub fn board_extent(&self) -> Vec2 {
        Vec2::new(self.board.width() as f32, self.board.height() as f32) * self.cell_length as f32
    }
}

/// Visual category of a single scene tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    /// Impassable cell.
    Wall,
    /// Goal cell without a box.
    Goal,
    /// Pushable box.
    Box {
        /// Whether the box rests on a goal.
        on_goal: bool,
    },
    /// Puzzle actor.
    Actor,
    /// Leading trail segment.
    TrailHead,
    /// Any other trail segment.
    TrailBody,
    /// Trail food.
    Food,
}

impl TileKind {
    /// Fill color used when drawing the tile.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Wall => palette::WHITE,
            Self::Goal | Self::Food | Self::Box { on_goal: false } => palette::RED,
            Self::Box { on_goal: true } | Self::TrailBody => palette::GREEN,
            Self::Actor => palette::BLUE,
            Self::TrailHead => palette::DARK_GREEN,
        }
    }
}

/// Tile placed on a board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SceneTile {
    /// Cell the tile occupies.
    pub position: Point,
    /// What the tile depicts.
    pub kind: TileKind,
}

impl SceneTile {
    /// Creates a new tile descriptor.
    #[must_use]
    pub const fn new(position: Point, kind: TileKind) -> Self {
        Self { position, kind }
    }
}

/// Filled rectangle in window pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawRect {
    /// Top-left corner.
    pub origin: Vec2,
    /// Width and height.
    pub size: Vec2,
    /// Fill color.
    pub color: Color,
}

/// Backend-agnostic description of one frame.
///
/// Tiles are listed in paint order; later tiles cover earlier ones on the
/// same cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Board the tiles are laid out on.
    pub board: BoardSize,
    /// Color used to clear the whole window.
    pub clear_color: Color,
    /// Optional fill drawn behind the board area only.
    pub board_color: Option<Color>,
    /// Tiles in paint order.
    pub tiles: Vec<SceneTile>,
    /// One-line summary shown alongside the board.
    pub status: String,
}

impl Scene {
    /// Builds the scene for a puzzle level.
    #[must_use]
    pub fn from_puzzle(view: &PuzzleView<'_>) -> Self {
        let mut tiles: Vec<SceneTile> = view
            .iter()
            .filter_map(|(position, cell)| {
                let kind = if cell.is_wall() {
                    TileKind::Wall
                } else if cell.has_box() {
                    TileKind::Box {
                        on_goal: cell.on_goal(),
                    }
                } else if cell.is_goal() {
                    TileKind::Goal
                } else {
                    return None;
                };
                Some(SceneTile::new(position, kind))
            })
            .collect();
        tiles.push(SceneTile::new(view.actor(), TileKind::Actor));

        Self {
            board: view.size(),
            clear_color: palette::BLACK,
            board_color: None,
            tiles,
            status: format!(
                "Level {}/{}  goals left: {}",
                view.level() + 1,
                view.level_count(),
                view.remaining_goals()
            ),
        }
    }

    /// Builds the scene for a trail snapshot.
    #[must_use]
    pub fn from_trail(view: &TrailView) -> Self {
        let mut tiles = Vec::with_capacity(view.body.len() + 1);
        if let Some((head, body)) = view.body.split_first() {
            tiles.push(SceneTile::new(*head, TileKind::TrailHead));
            tiles.extend(
                body.iter()
                    .map(|segment| SceneTile::new(*segment, TileKind::TrailBody)),
            );
        }
        tiles.push(SceneTile::new(view.food, TileKind::Food));

        let mut status = format!("Length {}", view.length);
        if view.phase == TrailPhase::Paused {
            status.push_str("  (paused)");
        }

        Self {
            board: view.board,
            clear_color: palette::GRAY,
            board_color: Some(palette::BLACK),
            tiles,
            status,
        }
    }

    /// Replaces the status line.
    #[must_use]
    pub fn with_status<T>(mut self, status: T) -> Self
    where
        T: Into<String>,
    {
        self.status = status.into();
        self
    }

    /// Lowers the scene into filled rectangles for pixel backends.
    ///
    /// Tiles leave a one pixel seam to their right and bottom neighbours and
    /// goals shrink by a quarter cell on every side.
    #[must_use]
    pub fn draw_list(&self, context: &RenderContext) -> Vec<DrawRect> {
        let cell = context.cell_length() as f32;
        let quarter = (context.cell_length() / 4) as f32;
        let mut rects = Vec::with_capacity(self.tiles.len() + 1);

        if let Some(color) = self.board_color {
            rects.push(DrawRect {
                origin: context.padding(),
                size: context.board_extent(),
                color,
            });
        }

        for tile in &self.tiles {
            let origin = context.cell_origin(tile.position);
            let rect = if tile.kind == TileKind::Goal {
                DrawRect {
                    origin: origin + Vec2::splat(quarter),
                    size: Vec2::splat(cell - quarter * 2.0 - 1.0),
                    color: tile.kind.color(),
                }
            } else {
                DrawRect {
                    origin,
                    size: Vec2::splat(cell - 1.0),
                    color: tile.kind.color(),
                }
            };
            rects.push(rect);
        }

        rects
    }
}

/// Rendering backend capable of presenting Grid Arcade scenes.
pub trait RenderingBackend {
    /// Presents a single frame.
    fn present(&mut self, scene: &Scene, context: &RenderContext) -> AnyResult<()>;
}
