//! Per-frame orchestration.
//!
//! [`Game::tick`] takes one pointer sample, runs the dwell selector over the
//! targets that are eligible in the current phase, applies whatever got
//! activated and returns a [`RenderState`] for the presentation layer.

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Instant;
use tracing::info;

use crate::config::GameConfig;
use crate::dwell::{DwellOutcome, DwellSelector};
use crate::error::ConfigResult;
use crate::session::{GuessOutcome, Phase, WordSession};
use crate::targets::{
    layout_letters, GameOverLayout, Point, Target, TargetId, TargetRegistry, ALPHABET,
};
use crate::words::WordBank;

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Playing {
        category: String,
        revealed: Vec<Option<char>>,
        /// Sorted, lowercase.
        guessed: Vec<char>,
        wrong_count: u32,
        move_count: u32,
        hovered_letter: Option<char>,
        hover_progress: f32,
    },
    Finished {
        secret: String,
        wrong_count: u32,
        play_again_progress: f32,
        layout: GameOverLayout,
    },
}

/// Everything the presentation layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub phase: Phase,
    /// Where to draw the pointer marker.
    pub pointer: Option<Point>,
    pub view: View,
}

impl RenderState {
    pub fn hover_progress(&self) -> f32 {
        match self.view {
            View::Playing { hover_progress, .. } => hover_progress,
            View::Finished {
                play_again_progress,
                ..
            } => play_again_progress,
        }
    }
}

pub struct Game<R: Rng = StdRng> {
    config: GameConfig,
    bank: WordBank,
    rng: R,
    session: WordSession,
    registry: TargetRegistry,
    selector: DwellSelector,
    game_over: GameOverLayout,
}

impl Game<StdRng> {
    pub fn new(config: GameConfig, bank: WordBank) -> ConfigResult<Self> {
        Self::with_rng(config, bank, StdRng::from_entropy())
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(config: GameConfig, bank: WordBank, mut rng: R) -> ConfigResult<Self> {
        config.validate()?;
        let session = WordSession::random(&bank, &mut rng, config.loss_threshold);
        Ok(Self::assemble(config, bank, rng, session))
    }

    /// Starts with a known first word; later rounds are drawn from `bank`.
    pub fn with_session(
        config: GameConfig,
        bank: WordBank,
        rng: R,
        session: WordSession,
    ) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::assemble(config, bank, rng, session))
    }

    fn assemble(config: GameConfig, bank: WordBank, rng: R, session: WordSession) -> Self {
        let registry = layout_letters(ALPHABET, &config.grid, config.canvas);
        let selector = DwellSelector::new(config.dwell());
        let game_over = GameOverLayout::new(config.canvas, config.play_again);
        info!(
            category = session.category(),
            letters = session.secret().len(),
            "new round"
        );

        Self {
            config,
            bank,
            rng,
            session,
            registry,
            selector,
            game_over,
        }
    }

    /// Advances one frame.
    ///
    /// A sample with non-finite coordinates counts as no pointer.
    pub fn tick(&mut self, pointer: Option<Point>, now: Instant) -> RenderState {
        let pointer = pointer.filter(|p| p.x.is_finite() && p.y.is_finite());

        match self.session.phase() {
            Phase::Active => {
                let outcome = self.selector.update(pointer, self.registry.iter(), now);
                if let Some(id) = outcome.activated_target() {
                    self.activate_letter(id);
                }
                self.render(pointer, outcome)
            }
            Phase::Won | Phase::Lost => {
                self.game_over = GameOverLayout::new(self.config.canvas, self.config.play_again);
                let play_again = [self.game_over.play_again_target()];
                let outcome = self.selector.update(pointer, play_again.iter(), now);

                if outcome.activated_target() == Some(TargetId::PlayAgain) {
                    self.reset();
                    // the reset ends the tick; the new round starts idle
                    return self.render(pointer, DwellOutcome::IDLE);
                }
                self.render(pointer, outcome)
            }
        }
    }

    fn activate_letter(&mut self, id: TargetId) {
        let Some(letter) = id.letter() else {
            return;
        };

        let outcome = self.session.apply_guess(letter);
        self.registry.consume(&id);

        match outcome {
            GuessOutcome::Hit { positions } => {
                info!(%letter, positions, word = %self.session.masked(), "hit")
            }
            GuessOutcome::Miss => info!(%letter, wrong = self.session.wrong_count(), "miss"),
            GuessOutcome::Rejected | GuessOutcome::Ignored => {}
        }

        if !self.session.is_active() {
            info!(
                phase = %self.session.phase(),
                secret = %self.session.secret(),
                moves = self.session.move_count(),
                "round over"
            );
            self.selector.clear();
        }
    }

    fn reset(&mut self) {
        self.session.reset(&self.bank, &mut self.rng);
        self.registry = layout_letters(ALPHABET, &self.config.grid, self.config.canvas);
        self.selector.clear();
        info!(
            category = self.session.category(),
            letters = self.session.secret().len(),
            "new round"
        );
    }

    fn render(&self, pointer: Option<Point>, outcome: DwellOutcome) -> RenderState {
        let session = &self.session;
        let view = if session.is_active() {
            View::Playing {
                category: session.category().to_string(),
                revealed: session.revealed().to_vec(),
                guessed: session.guessed(),
                wrong_count: session.wrong_count(),
                move_count: session.move_count(),
                hovered_letter: outcome.hovered.and_then(|id| id.letter()),
                hover_progress: outcome.progress,
            }
        } else {
            View::Finished {
                secret: session.secret(),
                wrong_count: session.wrong_count(),
                play_again_progress: match outcome.hovered {
                    Some(TargetId::PlayAgain) => outcome.progress,
                    _ => 0.0,
                },
                layout: self.game_over,
            }
        };

        RenderState {
            phase: session.phase(),
            pointer,
            view,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> &WordSession {
        &self.session
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    pub fn selector(&self) -> &DwellSelector {
        &self.selector
    }

    pub fn game_over_layout(&self) -> &GameOverLayout {
        &self.game_over
    }

    /// Target with the given id among those that can be hovered right now.
    pub fn target(&self, id: TargetId) -> Option<Target> {
        match id {
            TargetId::PlayAgain if !self.session.is_active() => {
                Some(self.game_over.play_again_target())
            }
            TargetId::PlayAgain => None,
            TargetId::Letter(_) => self.registry.get(&id).cloned(),
        }
    }
}
