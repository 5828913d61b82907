pub mod figure;
pub mod screen;

use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::bar,
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::targets::{Bounds, Point, TargetRegistry};
use crate::viewport::Viewport;
use crate::App;

pub const BUTTON_COLOR: Color = Color::Rgb(0xdb, 0xa3, 0x72);
pub const BUTTON_TEXT_COLOR: Color = Color::Rgb(0x54, 0x41, 0x7a);
pub const CONSUMED_COLOR: Color = Color::Rgb(128, 128, 128);
pub const PROGRESS_COLOR: Color = Color::Rgb(180, 180, 180);
pub const POINTER_COLOR: Color = Color::Green;

pub const POINTER_SYMBOL: &str = "●";

// canvas baselines of the header lines
const CATEGORY_Y: f32 = 50.0;
const WORD_Y: f32 = 85.0;
const GUESSED_Y: f32 = 115.0;
const MOVES_Y: f32 = 30.0;
const MOVES_FROM_RIGHT: f32 = 120.0;

const PARTIAL_ROWS: [&str; 8] = [
    " ",
    bar::ONE_EIGHTH,
    bar::ONE_QUARTER,
    bar::THREE_EIGHTHS,
    bar::HALF,
    bar::FIVE_EIGHTHS,
    bar::THREE_QUARTERS,
    bar::SEVEN_EIGHTHS,
];

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let viewport = Viewport::new(area, self.game.config().canvas);
        let screen = screen::current_screen(self.render_state.phase);
        screen.render(self, &viewport, buf);
    }
}

/// Masked word as shown in the header, e.g. `c _ t`.
pub fn masked_word(revealed: &[Option<char>]) -> String {
    revealed.iter().map(|c| c.unwrap_or('_')).join(" ")
}

pub fn guessed_line(guessed: &[char]) -> String {
    format!("guessed: {}", guessed.iter().join(", "))
}

/// Writes `text` horizontally centred on the row holding canvas height `y`.
fn centered_text(buf: &mut Buffer, viewport: &Viewport, y: f32, text: &str, style: Style) {
    let canvas = viewport.canvas();
    let Some(cell) = viewport.to_cell(Point::new(canvas.width / 2.0, y)) else {
        return;
    };
    let area = viewport.area();
    let width = (text.width() as u16).min(area.width);
    let x = area.x + (area.width - width) / 2;
    buf.set_stringn(x, cell.y, text, width as usize, style);
}

/// Category, masked word, guessed letters and the move counter.
fn render_header(
    buf: &mut Buffer,
    viewport: &Viewport,
    category: &str,
    revealed: &[Option<char>],
    guessed: &[char],
    move_count: u32,
) {
    let bold = Style::default().add_modifier(Modifier::BOLD);

    centered_text(buf, viewport, CATEGORY_Y, &format!("category: {category}"), bold);
    centered_text(buf, viewport, WORD_Y, &masked_word(revealed), bold);
    centered_text(buf, viewport, GUESSED_Y, &guessed_line(guessed), Style::default());

    let canvas = viewport.canvas();
    let moves = Point::new(canvas.width - MOVES_FROM_RIGHT, MOVES_Y);
    if let Some(cell) = viewport.to_cell(moves) {
        let area = viewport.area();
        let room = (area.right() - cell.x) as usize;
        buf.set_stringn(cell.x, cell.y, format!("moves: {move_count}"), room, bold);
    }
}

/// Paints `rect` with `color` from the bottom up, `progress` of its height,
/// using eighth blocks for the partly filled row.
fn fill_from_bottom(buf: &mut Buffer, rect: Rect, progress: f32, color: Color) {
    if rect.is_empty() || progress <= 0.0 {
        return;
    }
    let eighths = (progress.min(1.0) * rect.height as f32 * 8.0).round() as u16;
    let full = (eighths / 8).min(rect.height);
    let partial = (eighths % 8) as usize;

    for i in 0..full {
        let row = rect.bottom() - 1 - i;
        for col in rect.left()..rect.right() {
            buf[(col, row)].set_bg(color);
        }
    }
    if partial > 0 && full < rect.height {
        let row = rect.bottom() - 1 - full;
        for col in rect.left()..rect.right() {
            buf[(col, row)].set_symbol(PARTIAL_ROWS[partial]).set_fg(color);
        }
    }
}

/// A filled button with a centred label and an optional progress fill.
fn render_button(
    buf: &mut Buffer,
    viewport: &Viewport,
    bounds: Bounds,
    label: &str,
    fill: Color,
    progress: f32,
) {
    let Some(rect) = viewport.cells_for(bounds) else {
        return;
    };
    buf.set_style(rect, Style::default().bg(fill));
    fill_from_bottom(buf, rect, progress, PROGRESS_COLOR);

    let width = (label.width() as u16).min(rect.width);
    let x = rect.x + (rect.width - width) / 2;
    let y = rect.y + (rect.height - 1) / 2;
    buf.set_stringn(
        x,
        y,
        label,
        width as usize,
        Style::default()
            .fg(BUTTON_TEXT_COLOR)
            .add_modifier(Modifier::BOLD),
    );
}

fn render_letters(
    buf: &mut Buffer,
    viewport: &Viewport,
    registry: &TargetRegistry,
    hovered: Option<char>,
    progress: f32,
) {
    for target in registry.iter() {
        let Some(letter) = target.id.letter() else {
            continue;
        };
        let (fill, progress) = match (target.consumed, hovered == Some(letter)) {
            (true, _) => (CONSUMED_COLOR, 0.0),
            (false, true) => (BUTTON_COLOR, progress),
            (false, false) => (BUTTON_COLOR, 0.0),
        };
        render_button(
            buf,
            viewport,
            target.bounds,
            &letter.to_string(),
            fill,
            progress,
        );
    }
}

fn render_pointer(buf: &mut Buffer, viewport: &Viewport, pointer: Option<Point>) {
    if let Some(cell) = pointer.and_then(|p| viewport.to_cell(p)) {
        buf[(cell.x, cell.y)]
            .set_symbol(POINTER_SYMBOL)
            .set_fg(POINTER_COLOR);
    }
}

fn render_legend(buf: &mut Buffer, area: Rect, text: &str) {
    if area.is_empty() {
        return;
    }
    buf.set_stringn(
        area.x,
        area.bottom() - 1,
        text,
        area.width as usize,
        Style::default().add_modifier(Modifier::ITALIC),
    );
}
