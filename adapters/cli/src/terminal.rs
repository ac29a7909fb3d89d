//! Character-cell rendering backend.

use std::io::Write;

use anyhow::{Context, Result};
use grid_arcade_rendering::{RenderContext, RenderingBackend, Scene, TileKind};
use tracing::trace;

const FLOOR: char = ' ';

/// Backend that prints each frame as rows of characters followed by the status line.
#[derive(Debug)]
pub(crate) struct TextBackend<W> {
    out: W,
    frames: u64,
}

impl<W: Write> TextBackend<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out, frames: 0 }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}

fn glyph(kind: TileKind, under: char) -> char {
    match kind {
        TileKind::Wall => '#',
        TileKind::Goal => '.',
        TileKind::Box { on_goal: false } => '$',
        TileKind::Box { on_goal: true } => '*',
        TileKind::Actor if under == '.' => '&',
        TileKind::Actor => '@',
        TileKind::TrailHead => 'O',
        TileKind::TrailBody if under == 'O' => 'O',
        TileKind::TrailBody => 'o',
        TileKind::Food => '%',
    }
}

/// Rasterizes the scene's tiles in paint order, one string per board row.
pub(crate) fn rasterize(scene: &Scene) -> Vec<String> {
    let width = scene.board.width() as usize;
    let height = scene.board.height() as usize;
    let mut rows = vec![vec![FLOOR; width]; height];

    for tile in &scene.tiles {
        if !scene.board.contains(tile.position) {
            continue;
        }
        let (Ok(x), Ok(y)) = (
            usize::try_from(tile.position.x()),
            usize::try_from(tile.position.y()),
        ) else {
            continue;
        };
        let cell = &mut rows[y][x];
        *cell = glyph(tile.kind, *cell);
    }

    rows.into_iter()
        .map(|row| row.into_iter().collect::<String>().trim_end().to_owned())
        .collect()
}

impl<W: Write> RenderingBackend for TextBackend<W> {
    fn present(&mut self, scene: &Scene, context: &RenderContext) -> Result<()> {
        self.frames += 1;
        trace!(
            frame = self.frames,
            cell_length = context.cell_length(),
            "presenting frame"
        );

        for row in rasterize(scene) {
            writeln!(self.out, "{row}").context("failed to write board row")?;
        }
        writeln!(self.out, "{}", scene.status).context("failed to write status line")?;
        writeln!(self.out).context("failed to write frame separator")?;
        self.out.flush().context("failed to flush terminal output")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_arcade_core::{BoardSize, Cell, Direction, Point, PuzzleView, TrailPhase, TrailView};

    #[test]
    fn puzzle_scene_uses_level_file_symbols() {
        let cells = [
            Cell::wall(),
            Cell::goal(),
            Cell::boxed(),
            Cell::boxed_goal(),
            Cell::floor(),
            Cell::goal(),
        ];
        let view = PuzzleView::new(&cells, BoardSize::new(6, 1), Point::new(5, 0), 2, 0, 1);

        assert_eq!(rasterize(&Scene::from_puzzle(&view)), vec!["#.$* &"]);
    }

    #[test]
    fn trail_head_survives_overlapping_body() {
        let view = TrailView {
            board: BoardSize::new(4, 2),
            body: vec![Point::new(1, 0), Point::new(2, 0), Point::new(1, 0)],
            length: 3,
            direction: Direction::Left,
            food: Point::new(3, 1),
            phase: TrailPhase::Running,
        };

        assert_eq!(
            rasterize(&Scene::from_trail(&view)),
            vec![" Oo".to_owned(), "   %".to_owned()]
        );
    }

    #[test]
    fn present_writes_rows_then_status() {
        let cells = [Cell::wall(), Cell::floor(), Cell::goal()];
        let view = PuzzleView::new(&cells, BoardSize::new(3, 1), Point::new(1, 0), 1, 0, 1);
        let scene = Scene::from_puzzle(&view);
        let context = RenderContext::fit(800, 600, view.size()).expect("board fits");
        let mut backend = TextBackend::new(Vec::new());

        backend.present(&scene, &context).expect("write to memory");

        let text = String::from_utf8(backend.into_inner()).expect("utf8 output");
        assert_eq!(text, "#@.\nLevel 1/1  goals left: 1\n\n");
    }
}
