//! Mapping between terminal cells and canvas coordinates.
//!
//! A cell stands for the canvas point at its centre. The renderer fills
//! exactly the cells whose centres fall inside a target, so what is drawn
//! under the mouse is what the hit-test sees.

use crossterm::event::{MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use crate::config::Canvas;
use crate::targets::{Bounds, Point};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    area: Rect,
    canvas: Canvas,
}

impl Viewport {
    pub fn new(area: Rect, canvas: Canvas) -> Self {
        Self { area, canvas }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn scale(&self) -> (f32, f32) {
        (
            self.canvas.width / self.area.width.max(1) as f32,
            self.canvas.height / self.area.height.max(1) as f32,
        )
    }

    /// Canvas point under the terminal cell, or `None` outside the viewport.
    pub fn to_canvas(&self, column: u16, row: u16) -> Option<Point> {
        if !self.area.contains(Position::new(column, row)) {
            return None;
        }
        let (sx, sy) = self.scale();
        let col = (column - self.area.x) as f32;
        let row = (row - self.area.y) as f32;
        Some(Point::new((col + 0.5) * sx, (row + 0.5) * sy))
    }

    /// Cell holding a canvas point, clamped to the viewport.
    pub fn to_cell(&self, p: Point) -> Option<Position> {
        if self.area.is_empty() || !(0.0..=self.canvas.width).contains(&p.x) {
            return None;
        }
        if !(0.0..=self.canvas.height).contains(&p.y) {
            return None;
        }
        let (sx, sy) = self.scale();
        let col = ((p.x / sx) as u16).min(self.area.width - 1);
        let row = ((p.y / sy) as u16).min(self.area.height - 1);
        Some(Position::new(self.area.x + col, self.area.y + row))
    }

    /// Cells whose centres lie inside `b`; `None` when the box is too small
    /// to cover any cell centre.
    pub fn cells_for(&self, b: Bounds) -> Option<Rect> {
        if self.area.is_empty() {
            return None;
        }
        let (sx, sy) = self.scale();
        let span = |start: f32, len: f32, scale: f32, cells: u16| -> Option<(u16, u16)> {
            let first = (start / scale - 0.5).ceil().max(0.0);
            let last = ((start + len) / scale - 0.5).floor().min(cells as f32 - 1.0);
            (first <= last).then_some((first as u16, last as u16))
        };

        let (c0, c1) = span(b.x, b.width, sx, self.area.width)?;
        let (r0, r1) = span(b.y, b.height, sy, self.area.height)?;
        Some(Rect::new(
            self.area.x + c0,
            self.area.y + r0,
            c1 - c0 + 1,
            r1 - r0 + 1,
        ))
    }
}

/// Last known mouse position, in terminal cells.
///
/// The mouse stands in for the tracked fingertip: it is present while the
/// terminal has focus and disappears when focus is lost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerTracker {
    cell: Option<(u16, u16)>,
}

impl PointerTracker {
    pub fn on_mouse(&mut self, event: MouseEvent) {
        match event.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_) => {
                self.cell = Some((event.column, event.row));
            }
            _ => {}
        }
    }

    pub fn on_focus_lost(&mut self) {
        self.cell = None;
    }

    pub fn cell(&self) -> Option<(u16, u16)> {
        self.cell
    }

    /// Current pointer sample in canvas coordinates.
    pub fn sample(&self, viewport: &Viewport) -> Option<Point> {
        self.cell
            .and_then(|(column, row)| viewport.to_canvas(column, row))
    }
}
