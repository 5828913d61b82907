use ratatui::{
    buffer::Buffer,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use super::figure::{self, Figure};
use crate::game::View;
use crate::session::Phase;
use crate::viewport::Viewport;
use crate::App;

pub const WON_BACKGROUND: Color = Color::Rgb(232, 190, 214);
pub const WON_TEXT: Color = Color::Rgb(30, 92, 26);
pub const LOST_BACKGROUND: Color = Color::Rgb(106, 153, 222);
pub const LOST_TEXT: Color = Color::Rgb(196, 57, 57);

/// A UI Screen boundary: draws one phase of the game
pub trait Screen {
    fn render(&self, app: &App, viewport: &Viewport, buf: &mut Buffer);
}

/// Header, letter grid and figure while the round is being played
pub struct PlayingScreen;

impl Screen for PlayingScreen {
    fn render(&self, app: &App, viewport: &Viewport, buf: &mut Buffer) {
        let state = &app.render_state;
        let View::Playing {
            category,
            revealed,
            guessed,
            wrong_count,
            move_count,
            hovered_letter,
            hover_progress,
        } = &state.view
        else {
            return;
        };

        super::render_header(buf, viewport, category, revealed, guessed, *move_count);
        super::render_letters(
            buf,
            viewport,
            app.game.registry(),
            *hovered_letter,
            *hover_progress,
        );
        render_figure(app, viewport, *wrong_count, buf);
        super::render_pointer(buf, viewport, state.pointer);

        let legend = format!(
            "hold the pointer on a letter for {:.1}s to guess / (q)uit",
            app.game.config().dwell_secs
        );
        super::render_legend(buf, viewport.area(), &legend);
    }
}

/// End-of-round overlay with the play-again button
pub struct GameOverScreen;

impl Screen for GameOverScreen {
    fn render(&self, app: &App, viewport: &Viewport, buf: &mut Buffer) {
        let state = &app.render_state;
        let View::Finished {
            secret,
            wrong_count,
            play_again_progress,
            layout,
        } = &state.view
        else {
            return;
        };

        let (title, background, text) = match state.phase {
            Phase::Won => ("YOU WON!", WON_BACKGROUND, WON_TEXT),
            _ => ("GAME OVER!", LOST_BACKGROUND, LOST_TEXT),
        };

        buf.set_style(viewport.area(), Style::default().bg(background));
        // the overlay tints the board; the finished figure stays visible under it
        render_figure(app, viewport, *wrong_count, buf);

        let text_style = Style::default().fg(text).add_modifier(Modifier::BOLD);
        super::centered_text(buf, viewport, layout.title_y, title, text_style);
        super::centered_text(
            buf,
            viewport,
            layout.word_y,
            &format!("the word was: {secret}"),
            text_style,
        );
        super::render_button(
            buf,
            viewport,
            layout.play_again,
            "play again!",
            super::BUTTON_COLOR,
            *play_again_progress,
        );
        super::render_pointer(buf, viewport, state.pointer);
        super::render_legend(
            buf,
            viewport.area(),
            "hold the pointer on play again! to start a new word / (q)uit",
        );
    }
}

fn render_figure(app: &App, viewport: &Viewport, wrong_count: u32, buf: &mut Buffer) {
    let config = app.game.config();
    Figure {
        wrong_count,
        anchor: figure::anchor(config),
        canvas: config.canvas,
    }
    .render(viewport.area(), buf);
}

/// Helper to construct the appropriate screen for the current phase
pub fn current_screen(phase: Phase) -> Box<dyn Screen> {
    match phase {
        Phase::Active => Box::new(PlayingScreen),
        Phase::Won | Phase::Lost => Box::new(GameOverScreen),
    }
}
