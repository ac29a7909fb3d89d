//! Terminal driver for the trail game. Every token is one tick.

use anyhow::{Context, Result};
use grid_arcade_core::{BoardSize, TrailCommand, TrailEvent};
use grid_arcade_rendering::{RenderContext, RenderingBackend, Scene};
use grid_arcade_world::{self as world, query, TrailState};
use tracing::{debug, info};

use crate::{config::WindowConfig, input::Token, Outcome};

pub(crate) struct SlitherRun<'a, B> {
    state: TrailState,
    context: RenderContext,
    backend: &'a mut B,
    longest: u32,
}

impl<'a, B: RenderingBackend> SlitherRun<'a, B> {
    pub(crate) fn new(
        board: BoardSize,
        seed: u64,
        backend: &'a mut B,
        window: WindowConfig,
    ) -> Result<Self> {
        info!(
            width = board.width(),
            height = board.height(),
            seed,
            "starting slither"
        );
        let state = TrailState::new(board, seed).context("invalid trail board")?;
        let context = RenderContext::fit(window.width, window.height, board)
            .context("board does not fit the configured window; raise `[window]` width or height")?;
        Ok(Self {
            longest: state.length(),
            state,
            context,
            backend,
        })
    }

    /// Ticks once per token until the input runs out or the player quits.
    pub(crate) fn play<I>(mut self, tokens: I) -> Result<Outcome>
    where
        I: IntoIterator<Item = Token>,
    {
        self.present()?;

        for token in tokens {
            let command = match token {
                Token::Move(direction) => TrailCommand::Step {
                    input: Some(direction),
                },
                Token::Wait => TrailCommand::Step { input: None },
                Token::Pause => TrailCommand::TogglePause,
                Token::Quit => {
                    info!(length = self.state.length(), "player quit");
                    return Ok(Outcome::Quit);
                }
                Token::Restart => {
                    debug!("input has no meaning in slither");
                    continue;
                }
            };

            let mut events = Vec::new();
            world::trail::apply(&mut self.state, command, &mut events);
            for event in &events {
                match event {
                    TrailEvent::FoodEaten { length, .. } => {
                        self.longest = self.longest.max(*length);
                        debug!(length, "trail grew");
                    }
                    TrailEvent::SelfBitten {
                        cell,
                        previous_length,
                    } => info!(%cell, previous_length, "trail bit itself"),
                    TrailEvent::PauseToggled { paused } => info!(paused, "pause toggled"),
                    TrailEvent::HeadAdvanced { .. } | TrailEvent::FoodPlaced { .. } => {}
                }
            }
            self.present()?;
        }

        info!(
            length = self.state.length(),
            longest = self.longest,
            "input exhausted"
        );
        Ok(Outcome::InputExhausted)
    }

    fn present(&mut self) -> Result<()> {
        let view = query::trail_view(&self.state);
        let mut scene = Scene::from_trail(&view);
        scene.status = format!("{}  best: {}", scene.status, self.longest);
        self.backend.present(&scene, &self.context)
    }
}
