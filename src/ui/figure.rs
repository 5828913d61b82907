//! The hanged-man figure, drawn one part per wrong guess.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Circle, Line},
        Widget,
    },
};
use strum_macros::Display;

use crate::config::{Canvas as CanvasSize, GameConfig};
use crate::targets::{letter_grid_bounds, Point, ALPHABET};

pub const FIGURE_COLOR: Color = Color::Rgb(0x54, 0x41, 0x7a);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FigurePart {
    Ground,
    Post,
    Head,
    Body,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl FigurePart {
    /// Drawing order; the n-th wrong guess adds `ALL[n - 1]`.
    pub const ALL: [FigurePart; 8] = [
        FigurePart::Ground,
        FigurePart::Post,
        FigurePart::Head,
        FigurePart::Body,
        FigurePart::LeftArm,
        FigurePart::RightArm,
        FigurePart::LeftLeg,
        FigurePart::RightLeg,
    ];

    pub fn visible(wrong_count: u32) -> &'static [FigurePart] {
        let n = (wrong_count as usize).min(Self::ALL.len());
        &Self::ALL[..n]
    }

    /// Strokes in canvas coordinates relative to the anchor at the foot of the post.
    pub fn strokes(self, anchor: Point) -> Vec<Stroke> {
        let Point { x, y } = anchor;
        let at = |dx: f32, dy: f32| Point::new(x + dx, y - dy);
        let line = |a: Point, b: Point| Stroke::Line { from: a, to: b };

        match self {
            FigurePart::Ground => vec![line(at(-75.0, 0.0), at(75.0, 0.0))],
            FigurePart::Post => vec![
                line(at(0.0, 0.0), at(0.0, 250.0)),
                line(at(0.0, 250.0), at(75.0, 250.0)),
                line(at(75.0, 250.0), at(75.0, 195.0)),
            ],
            FigurePart::Head => vec![Stroke::Circle {
                center: at(75.0, 170.0),
                radius: 25.0,
            }],
            FigurePart::Body => vec![line(at(75.0, 145.0), at(75.0, 70.0))],
            FigurePart::LeftArm => vec![line(at(75.0, 120.0), at(45.0, 90.0))],
            FigurePart::RightArm => vec![line(at(75.0, 120.0), at(105.0, 90.0))],
            FigurePart::LeftLeg => vec![line(at(75.0, 70.0), at(45.0, 30.0))],
            FigurePart::RightLeg => vec![line(at(75.0, 70.0), at(105.0, 30.0))],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stroke {
    Line { from: Point, to: Point },
    Circle { center: Point, radius: f32 },
}

/// Foot of the post: mirrored across the canvas from the letter grid and
/// 80 units above the bottom edge.
pub fn anchor(config: &GameConfig) -> Point {
    let grid = letter_grid_bounds(&config.grid, config.canvas, ALPHABET.len());
    Point::new(
        config.canvas.width - grid.center_x() - 15.0,
        config.canvas.height - 80.0,
    )
}

pub struct Figure {
    pub wrong_count: u32,
    pub anchor: Point,
    pub canvas: CanvasSize,
}

impl Widget for Figure {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let parts = FigurePart::visible(self.wrong_count);
        if parts.is_empty() {
            return;
        }

        let (w, h) = (self.canvas.width as f64, self.canvas.height as f64);
        // ratatui's canvas grows upwards
        let flip = |p: Point| (p.x as f64, h - p.y as f64);

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, w])
            .y_bounds([0.0, h])
            .paint(|ctx| {
                for part in parts {
                    for stroke in part.strokes(self.anchor) {
                        match stroke {
                            Stroke::Line { from, to } => {
                                let (x1, y1) = flip(from);
                                let (x2, y2) = flip(to);
                                ctx.draw(&Line::new(x1, y1, x2, y2, FIGURE_COLOR));
                            }
                            Stroke::Circle { center, radius } => {
                                let (x, y) = flip(center);
                                ctx.draw(&Circle {
                                    x,
                                    y,
                                    radius: radius as f64,
                                    color: FIGURE_COLOR,
                                });
                            }
                        }
                    }
                }
            })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FIGURE_PARTS;

    #[test]
    fn one_part_per_allowed_miss() {
        assert_eq!(FigurePart::ALL.len(), FIGURE_PARTS as usize);
    }

    #[test]
    fn parts_appear_in_order() {
        assert!(FigurePart::visible(0).is_empty());
        assert_eq!(FigurePart::visible(1), &[FigurePart::Ground]);
        assert_eq!(
            FigurePart::visible(3),
            &[FigurePart::Ground, FigurePart::Post, FigurePart::Head]
        );
        assert_eq!(FigurePart::visible(8).last(), Some(&FigurePart::RightLeg));
        assert_eq!(FigurePart::visible(12).len(), 8);
    }

    #[test]
    fn anchor_mirrors_the_letter_grid() {
        let anchor = anchor(&GameConfig::default());
        assert_eq!(anchor, Point::new(535.0, 520.0));
    }

    #[test]
    fn head_hangs_from_the_rope() {
        let anchor = Point::new(535.0, 520.0);
        let rope = FigurePart::Post.strokes(anchor)[2];
        let head = FigurePart::Head.strokes(anchor)[0];
        match (rope, head) {
            (Stroke::Line { to, .. }, Stroke::Circle { center, radius }) => {
                assert_eq!(to.x, center.x);
                assert_eq!(to.y, center.y - radius);
            }
            other => panic!("unexpected strokes {other:?}"),
        }
    }

    #[test]
    fn figure_stays_inside_the_canvas() {
        let cfg = GameConfig::default();
        let anchor = anchor(&cfg);
        for part in FigurePart::ALL {
            for stroke in part.strokes(anchor) {
                let points = match stroke {
                    Stroke::Line { from, to } => vec![from, to],
                    Stroke::Circle { center, .. } => vec![center],
                };
                for p in points {
                    assert!((0.0..=cfg.canvas.width).contains(&p.x), "{part} {p:?}");
                    assert!((0.0..=cfg.canvas.height).contains(&p.y), "{part} {p:?}");
                }
            }
        }
    }

    #[test]
    fn no_wrong_guesses_draws_nothing() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        Figure {
            wrong_count: 0,
            anchor: Point::new(535.0, 520.0),
            canvas: CanvasSize::default(),
        }
        .render(area, &mut buf);
        assert!(buf.content().iter().all(|c| c.symbol() == " "));
    }

    #[test]
    fn ground_is_drawn_near_the_bottom() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        Figure {
            wrong_count: 1,
            anchor: Point::new(535.0, 520.0),
            canvas: CanvasSize::default(),
        }
        .render(area, &mut buf);

        let mut drawn = Vec::new();
        for row in area.top()..area.bottom() {
            for col in area.left()..area.right() {
                if buf[(col, row)].symbol() != " " {
                    drawn.push((col, row));
                }
            }
        }
        assert!(!drawn.is_empty());
        assert!(drawn.iter().all(|&(_, row)| row == 20 || row == 21));
        assert!(drawn.iter().all(|&(col, _)| (45..=61).contains(&col)));
    }
}
