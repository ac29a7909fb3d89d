#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays the Grid Arcade games in a terminal.

mod config;
mod divergence;
mod error;
mod input;
mod slither;
mod terminal;

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use grid_arcade_core::BoardSize;
use grid_arcade_world::LevelSet;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    config::ArcadeConfig, divergence::DivergenceRun, input::Token, slither::SlitherRun,
    terminal::TextBackend,
};

/// Grid Arcade: a box-pushing puzzle and a wrap-around trail game.
#[derive(Debug, Parser)]
#[command(name = "grid-arcade", version, about)]
struct Cli {
    /// TOML configuration file layered over the built-in defaults.
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (e.g. `info`, `grid_arcade_world=debug`).
    #[arg(long, value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    game: Game,
}

#[derive(Debug, Subcommand)]
enum Game {
    /// Push every box onto a goal, level after level.
    Divergence(DivergenceArgs),
    /// Steer a growing trail around a wrap-around board.
    Slither(SlitherArgs),
}

#[derive(Debug, Args)]
struct DivergenceArgs {
    /// Level file to play.
    #[arg(long, value_name = "FILE")]
    levels: Option<PathBuf>,

    /// Moves to play instead of reading standard input (e.g. `RRDL r up`).
    #[arg(long, value_name = "SCRIPT")]
    moves: Option<String>,
}

#[derive(Debug, Args)]
struct SlitherArgs {
    /// Board width in cells. Each cell needs at least one pixel of the `[window]` width.
    #[arg(long)]
    width: Option<u32>,

    /// Board height in cells. Each cell needs at least one pixel of the `[window]` height.
    #[arg(long)]
    height: Option<u32>,

    /// Seed for food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Ticks to play instead of reading standard input.
    #[arg(long, value_name = "SCRIPT")]
    moves: Option<String>,
}

/// How a game session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// Every level was solved.
    Completed,
    /// The player asked to stop.
    Quit,
    /// The input ended first.
    InputExhausted,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(error = %format!("{error:#}"), "grid-arcade failed");
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(default_level: &str) {
    let (filter, rejected) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, false),
        Err(_) => match EnvFilter::try_new(default_level) {
            Ok(filter) => (filter, false),
            Err(_) => (EnvFilter::new("warn"), true),
        },
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    if rejected {
        warn!(level = default_level, "invalid log level, using `warn`");
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = ArcadeConfig::load(cli.config.as_deref())?;
    let stdout = io::stdout();
    let mut backend = TextBackend::new(stdout.lock());

    match cli.game {
        Game::Divergence(args) => {
            if let Some(levels) = args.levels {
                config.divergence.levels = levels;
            }
            let text = config::read_level_file(&config.divergence.levels)?;
            let levels = LevelSet::parse(&text).with_context(|| {
                format!(
                    "failed to parse level file `{}`",
                    config.divergence.levels.display()
                )
            })?;

            // Scripts skip the pause after a solved level.
            let (tokens, delay) = match args.moves {
                Some(script) => (scripted(&script)?, Duration::ZERO),
                None => (
                    token_lines(io::stdin().lock()),
                    config.divergence.advance_delay(),
                ),
            };
            let outcome =
                DivergenceRun::new(levels, &mut backend, config.window, delay)?.play(tokens)?;
            if outcome == Outcome::Completed {
                drop(backend);
                writeln!(io::stdout(), "All levels completed.")
                    .context("failed to write completion message")?;
            }
        }
        Game::Slither(args) => {
            let slither = &mut config.slither;
            slither.width = args.width.unwrap_or(slither.width);
            slither.height = args.height.unwrap_or(slither.height);
            let seed = args
                .seed
                .or(slither.seed)
                .unwrap_or_else(rand::random::<u64>);
            info!(seed, "trail seed");

            let tokens = match args.moves {
                Some(script) => scripted(&script)?,
                None => token_lines(io::stdin().lock()),
            };
            let board = BoardSize::new(slither.width, slither.height);
            let _ = SlitherRun::new(board, seed, &mut backend, config.window)?.play(tokens)?;
        }
    }

    Ok(())
}

type TokenStream = Box<dyn Iterator<Item = Token>>;

fn scripted(script: &str) -> Result<TokenStream> {
    let tokens = input::parse_script(script).context("invalid move script")?;
    Ok(Box::new(tokens.into_iter()))
}

fn token_lines<R: BufRead + 'static>(reader: R) -> TokenStream {
    Box::new(
        reader
            .lines()
            .map_while(|line| match line {
                Ok(line) => Some(line),
                Err(error) => {
                    warn!(%error, "failed to read input, ending the game");
                    None
                }
            })
            .flat_map(|line| input::parse_line_lenient(&line)),
    )
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use grid_arcade_core::Direction;

    use super::*;

    #[test]
    fn unreadable_input_ends_the_token_stream() {
        let bytes = b"R\nU q\n\xff\xfe\nL\n".to_vec();

        let tokens: Vec<Token> = token_lines(Cursor::new(bytes)).collect();

        assert_eq!(
            tokens,
            vec![
                Token::Move(Direction::Right),
                Token::Move(Direction::Up),
                Token::Quit,
            ]
        );
    }
}
