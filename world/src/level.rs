//! Level loader that turns textual level definitions into puzzle grids.

use grid_arcade_core::{BoardSize, Cell, Point};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{grid::Grid, puzzle::PuzzleGrid};

/// Separates rows inside a single level definition.
pub const ROW_DELIMITER: char = '|';
/// Line that terminates a level inside a level file.
pub const LEVEL_TERMINATOR: &str = ",";

const GOAL: char = '.';
const BOX: char = '$';
const BOX_ON_GOAL: char = '*';
const WALL: char = '#';
const ACTOR: char = '@';
const ACTOR_ON_GOAL: char = '&';

/// Reasons a level definition cannot be turned into a grid.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MalformedLevelError {
    /// The definition contained no rows at all.
    #[error("level definition is empty")]
    Empty,
    /// A row between two delimiters contained no cells.
    #[error("row {row} of the level definition is empty")]
    EmptyRow {
        /// Zero-based index of the empty row.
        row: usize,
    },
    /// No `@` or `&` marker was found.
    #[error("level definition has no actor start marker")]
    MissingActor,
    /// More than one `@` or `&` marker was found.
    #[error("level definition has a second actor start marker at {second} (first at {first})")]
    DuplicateActor {
        /// Position of the first marker.
        first: Point,
        /// Position of the offending marker.
        second: Point,
    },
    /// The level does not fit signed cell coordinates.
    #[error("level definition is too large")]
    TooLarge,
}

/// Reasons a level file cannot be turned into a playable level set.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LevelFileError {
    /// No comma-terminated level was found.
    #[error("level file contains no comma-terminated levels")]
    NoLevels,
    /// A level failed validation.
    #[error("level {} is malformed", .index + 1)]
    Malformed {
        /// Zero-based index of the offending level.
        index: usize,
        /// Underlying parse failure.
        #[source]
        source: MalformedLevelError,
    },
    /// A level index past the end of the set was requested.
    #[error("level {} does not exist", .index + 1)]
    MissingLevel {
        /// Zero-based index that was requested.
        index: usize,
    },
}

/// Parses a `|`-delimited level definition into a fresh puzzle grid.
///
/// Width is the longest row and shorter rows are padded with floor. A single
/// trailing delimiter is ignored. Box-on-goal cells start satisfied and do not
/// count toward the open goals.
pub fn parse(definition: &str) -> Result<PuzzleGrid, MalformedLevelError> {
    let body = definition
        .strip_suffix(ROW_DELIMITER)
        .unwrap_or(definition);
    if body.is_empty() {
        return Err(MalformedLevelError::Empty);
    }

    let rows: Vec<&str> = body.split(ROW_DELIMITER).collect();
    if let Some(row) = rows.iter().position(|row| row.is_empty()) {
        return Err(MalformedLevelError::EmptyRow { row });
    }

    let width = rows
        .iter()
        .map(|row| row.chars().count())
        .max()
        .unwrap_or(0);
    let width = u32::try_from(width).map_err(|_| MalformedLevelError::TooLarge)?;
    let height = u32::try_from(rows.len()).map_err(|_| MalformedLevelError::TooLarge)?;
    if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
        return Err(MalformedLevelError::TooLarge);
    }

    let size = BoardSize::new(width, height);
    let mut cells = Grid::new(size, Cell::floor());
    let mut actor: Option<Point> = None;
    let mut remaining_goals: u32 = 0;

    for (y, row) in rows.iter().enumerate() {
        for (x, symbol) in row.chars().enumerate() {
            let point = Point::new(
                i32::try_from(x).map_err(|_| MalformedLevelError::TooLarge)?,
                i32::try_from(y).map_err(|_| MalformedLevelError::TooLarge)?,
            );

            if matches!(symbol, ACTOR | ACTOR_ON_GOAL) {
                if let Some(first) = actor {
                    return Err(MalformedLevelError::DuplicateActor {
                        first,
                        second: point,
                    });
                }
                actor = Some(point);
            }
            if matches!(symbol, GOAL | ACTOR_ON_GOAL) {
                remaining_goals += 1;
            }

            if let Some(slot) = cells.get_mut(point) {
                *slot = cell_for(symbol);
            }
        }
    }

    let actor = actor.ok_or(MalformedLevelError::MissingActor)?;
    debug!(width, height, remaining_goals, %actor, "parsed level definition");
    Ok(PuzzleGrid::from_parts(cells, actor, remaining_goals))
}

fn cell_for(symbol: char) -> Cell {
    match symbol {
        GOAL | ACTOR_ON_GOAL => Cell::goal(),
        BOX => Cell::boxed(),
        BOX_ON_GOAL => Cell::boxed_goal(),
        WALL => Cell::wall(),
        _ => Cell::floor(),
    }
}

/// Ordered, validated collection of level definitions.
///
/// Definitions are kept as text so that restarting a level re-runs the loader
/// instead of copying live state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelSet {
    definitions: Vec<String>,
}

impl LevelSet {
    /// Splits the contents of a level file into level definitions.
    ///
    /// Lines are separated by `\r\n`, `\r` or `\n`. A line holding a single
    /// comma terminates the current level; every other line becomes a row.
    /// Blank lines before a level's first row are skipped. Rows after the last
    /// terminator are discarded.
    pub fn parse(text: &str) -> Result<Self, LevelFileError> {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        let mut definitions = Vec::new();
        let mut current = String::new();

        for line in normalized.split('\n') {
            if line == LEVEL_TERMINATOR {
                definitions.push(std::mem::take(&mut current));
            } else if !(line.is_empty() && current.is_empty()) {
                current.push_str(line);
                current.push(ROW_DELIMITER);
            }
        }

        if !current.is_empty() {
            warn!(
                rows = current.matches(ROW_DELIMITER).count(),
                "discarding rows after the last level terminator"
            );
        }

        Self::from_definitions(definitions)
    }

    /// Validates already-joined level definitions.
    pub fn from_definitions<I, S>(definitions: I) -> Result<Self, LevelFileError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let definitions: Vec<String> = definitions.into_iter().map(Into::into).collect();
        if definitions.is_empty() {
            return Err(LevelFileError::NoLevels);
        }

        for (index, definition) in definitions.iter().enumerate() {
            let _ = parse(definition)
                .map_err(|source| LevelFileError::Malformed { index, source })?;
        }

        Ok(Self { definitions })
    }

    /// Number of levels in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Always `false`; construction rejects empty sets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Definition text of the level at `index`.
    #[must_use]
    pub fn definition(&self, index: usize) -> Option<&str> {
        self.definitions.get(index).map(String::as_str)
    }

    /// Runs the loader on the level at `index`, producing a fresh grid.
    pub fn load(&self, index: usize) -> Result<PuzzleGrid, LevelFileError> {
        let definition = self
            .definition(index)
            .ok_or(LevelFileError::MissingLevel { index })?;
        parse(definition).map_err(|source| LevelFileError::Malformed { index, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reference_level() {
        let grid = parse("#####|#@..#|#$..#|#####").expect("level parses");

        assert_eq!(grid.size(), BoardSize::new(5, 4));
        assert_eq!(grid.actor(), Point::new(1, 1));
        assert_eq!(grid.remaining_goals(), 2);
        assert_eq!(grid.cell(Point::new(1, 2)), Some(Cell::boxed()));
        assert_eq!(grid.cell(Point::new(2, 1)), Some(Cell::goal()));
        assert_eq!(grid.cell(Point::new(0, 0)), Some(Cell::wall()));
    }

    #[test]
    fn box_on_goal_does_not_count_as_open_goal() {
        let grid = parse("#####|#@*.#|#####").expect("level parses");
        assert_eq!(grid.remaining_goals(), 1);
        assert!(grid
            .cell(Point::new(2, 1))
            .is_some_and(|cell| cell.on_goal()));
    }

    #[test]
    fn actor_on_goal_counts_as_open_goal() {
        let grid = parse("####|#&$#|####").expect("level parses");
        assert_eq!(grid.actor(), Point::new(1, 1));
        assert_eq!(grid.remaining_goals(), 1);
        assert_eq!(grid.cell(Point::new(1, 1)), Some(Cell::goal()));
    }

    #[test]
    fn unknown_symbols_become_floor() {
        let grid = parse("#@ -x#").expect("level parses");
        for x in 2..5 {
            assert_eq!(grid.cell(Point::new(x, 0)), Some(Cell::floor()));
        }
    }

    #[test]
    fn ragged_rows_are_padded_with_floor() {
        let grid = parse("####|#@|####").expect("level parses");
        assert_eq!(grid.size(), BoardSize::new(4, 3));
        assert_eq!(grid.cell(Point::new(3, 1)), Some(Cell::floor()));
    }

    #[test]
    fn trailing_delimiter_is_ignored() {
        let with = parse("###|#@#|###|").expect("level parses");
        let without = parse("###|#@#|###").expect("level parses");
        assert_eq!(with, without);
    }

    #[test]
    fn rejects_malformed_definitions() {
        assert_eq!(parse(""), Err(MalformedLevelError::Empty));
        assert_eq!(parse("|"), Err(MalformedLevelError::Empty));
        assert_eq!(
            parse("###||#@#"),
            Err(MalformedLevelError::EmptyRow { row: 1 })
        );
        assert_eq!(parse("###|#.#|###"), Err(MalformedLevelError::MissingActor));
        assert_eq!(
            parse("#@#|#&#"),
            Err(MalformedLevelError::DuplicateActor {
                first: Point::new(1, 0),
                second: Point::new(1, 1),
            })
        );
    }

    #[test]
    fn level_file_splits_on_comma_lines() {
        let text = "#####\n#@$.#\n#####\n,\n\n####\r\n#&*#\r\n####\r\n,\r\n";
        let levels = LevelSet::parse(text).expect("levels parse");

        assert_eq!(levels.len(), 2);
        assert_eq!(levels.definition(0), Some("#####|#@$.#|#####|"));
        assert_eq!(levels.definition(1), Some("####|#&*#|####|"));
    }

    #[test]
    fn level_file_accepts_bare_carriage_returns() {
        let levels = LevelSet::parse("###\r#@#\r###\r,\r").expect("levels parse");
        assert_eq!(levels.definition(0), Some("###|#@#|###|"));
    }

    #[test]
    fn unterminated_rows_are_discarded() {
        let levels = LevelSet::parse("###\n#@#\n###\n,\n###\n#@#\n").expect("levels parse");
        assert_eq!(levels.len(), 1);
    }

    #[test]
    fn level_file_without_terminator_has_no_levels() {
        assert_eq!(
            LevelSet::parse("###\n#@#\n###\n"),
            Err(LevelFileError::NoLevels)
        );
    }

    #[test]
    fn malformed_level_reports_its_index() {
        let error = LevelSet::parse("#@#\n,\n###\n,\n").expect_err("second level lacks actor");
        assert_eq!(
            error,
            LevelFileError::Malformed {
                index: 1,
                source: MalformedLevelError::MissingActor,
            }
        );
        assert_eq!(error.to_string(), "level 2 is malformed");
    }

    #[test]
    fn load_past_the_end_is_reported() {
        let levels = LevelSet::from_definitions(["#@#"]).expect("levels parse");
        assert_eq!(
            levels.load(1),
            Err(LevelFileError::MissingLevel { index: 1 })
        );
    }
}
