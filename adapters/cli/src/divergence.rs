//! Terminal driver for the box-pushing puzzle.

use std::{thread, time::Duration};

use anyhow::{Context, Result};
use grid_arcade_core::{PuzzleCommand, PuzzleEvent};
use grid_arcade_rendering::{RenderContext, RenderingBackend, Scene};
use grid_arcade_system_progression::Progression;
use grid_arcade_world::{self as world, query, LevelSet, PuzzleSession};
use tracing::{debug, info};

use crate::{config::WindowConfig, input::Token, Outcome};

/// Owns a puzzle session together with the systems and backend that drive it.
pub(crate) struct DivergenceRun<'a, B> {
    session: PuzzleSession,
    progression: Progression,
    backend: &'a mut B,
    window: WindowConfig,
    advance_delay: Duration,
}

impl<'a, B: RenderingBackend> DivergenceRun<'a, B> {
    pub(crate) fn new(
        levels: LevelSet,
        backend: &'a mut B,
        window: WindowConfig,
        advance_delay: Duration,
    ) -> Result<Self> {
        info!(levels = levels.len(), "starting divergence");
        let session = PuzzleSession::new(levels).context("failed to load the first level")?;
        Ok(Self {
            session,
            progression: Progression::new(),
            backend,
            window,
            advance_delay,
        })
    }

    /// Plays until the input runs out, the player quits, or every level is solved.
    pub(crate) fn play<I>(mut self, tokens: I) -> Result<Outcome>
    where
        I: IntoIterator<Item = Token>,
    {
        self.present()?;

        for token in tokens {
            let command = match token {
                Token::Move(direction) => PuzzleCommand::Move { direction },
                Token::Restart => PuzzleCommand::Restart,
                Token::Quit => {
                    info!(level = self.session.level(), "player quit");
                    return Ok(Outcome::Quit);
                }
                Token::Pause | Token::Wait => {
                    debug!(?token, "input has no meaning in divergence");
                    continue;
                }
            };

            self.drive(command)?;
            if self.progression.completed() {
                return Ok(Outcome::Completed);
            }
            self.present()?;
        }

        Ok(Outcome::InputExhausted)
    }

    fn drive(&mut self, command: PuzzleCommand) -> Result<()> {
        let mut pending = vec![command];

        while !pending.is_empty() {
            let mut events = Vec::new();
            for command in pending.drain(..) {
                world::puzzle::apply(&mut self.session, command, &mut events)
                    .context("failed to apply puzzle command")?;
            }

            self.progression.handle(&events, &mut pending);

            for event in &events {
                match event {
                    PuzzleEvent::LevelSolved { level } => {
                        info!(
                            level = level + 1,
                            moves = self.progression.moves(),
                            pushes = self.progression.pushes(),
                            "level solved"
                        );
                        self.present()?;
                        if !self.advance_delay.is_zero() {
                            thread::sleep(self.advance_delay);
                        }
                    }
                    PuzzleEvent::SessionCompleted => info!("all levels completed"),
                    other => debug!(event = ?other, "puzzle event"),
                }
            }
        }

        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        let view = query::puzzle_view(&self.session);
        let context = RenderContext::fit(self.window.width, self.window.height, view.size())
            .context("level does not fit the configured window; raise `[window]` width or height")?;
        let scene = Scene::from_puzzle(&view).with_status(format!(
            "Level {}/{}  moves: {}  pushes: {}  goals left: {}",
            view.level() + 1,
            view.level_count(),
            self.progression.moves(),
            self.progression.pushes(),
            view.remaining_goals()
        ));
        self.backend.present(&scene, &context)
    }
}
