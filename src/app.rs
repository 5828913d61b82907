use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;

use crate::game::{Game, RenderState};
use crate::runtime::GameEvent;
use crate::viewport::{PointerTracker, Viewport};

/// Terminal front end state: the game plus where the mouse is.
pub struct App {
    pub game: Game,
    pub pointer: PointerTracker,
    pub viewport: Viewport,
    pub render_state: RenderState,
    pub should_quit: bool,
}

impl App {
    pub fn new(mut game: Game, area: Rect, now: Instant) -> Self {
        let viewport = Viewport::new(area, game.config().canvas);
        let render_state = game.tick(None, now);
        Self {
            game,
            pointer: PointerTracker::default(),
            viewport,
            render_state,
            should_quit: false,
        }
    }

    pub fn resize(&mut self, area: Rect) {
        self.viewport = Viewport::new(area, self.game.config().canvas);
    }

    /// Feeds one runtime event. Only ticks advance the game.
    pub fn handle(&mut self, event: GameEvent, now: Instant) {
        match event {
            GameEvent::Key(key) => {
                if is_quit_key(&key) {
                    self.should_quit = true;
                }
            }
            GameEvent::Mouse(mouse) => self.pointer.on_mouse(mouse),
            GameEvent::FocusLost => self.pointer.on_focus_lost(),
            GameEvent::Resize => {}
            GameEvent::Tick => self.tick(now),
        }
    }

    pub fn tick(&mut self, now: Instant) {
        let sample = self.pointer.sample(&self.viewport);
        self.render_state = self.game.tick(sample, now);
    }
}

fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
