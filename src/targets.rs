//! Hit-targets and the layout that places them on the canvas.
//!
//! Letter buttons are laid out once per game in a fixed-column grid; the
//! play-again button is re-positioned every frame from [`GameOverLayout`]
//! so it always sits under the end-of-game message.

use crate::config::{ButtonSize, Canvas, GridGeometry};

/// Letters offered by the grid, in reading order.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Edges count as inside.
    pub fn contains(&self, p: Point) -> bool {
        self.x <= p.x && p.x <= self.right() && self.y <= p.y && p.y <= self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetId {
    /// Uppercase letter shown on the button.
    Letter(char),
    PlayAgain,
}

impl TargetId {
    pub fn letter(&self) -> Option<char> {
        match self {
            TargetId::Letter(c) => Some(*c),
            TargetId::PlayAgain => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub id: TargetId,
    pub bounds: Bounds,
    /// Set once the letter has been guessed; consumed targets are not hoverable.
    pub consumed: bool,
}

impl Target {
    pub fn new(id: TargetId, bounds: Bounds) -> Self {
        Self {
            id,
            bounds,
            consumed: false,
        }
    }

    pub fn is_hoverable(&self) -> bool {
        !self.consumed
    }
}

/// Currently hoverable targets, kept in reading order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetRegistry {
    targets: Vec<Target>,
}

/// Lays out one button per letter of `alphabet`, six to a row by default.
pub fn layout_letters(alphabet: &str, grid: &GridGeometry, canvas: Canvas) -> TargetRegistry {
    let count = alphabet.chars().count();
    let origin = letter_grid_bounds(grid, canvas, count);
    let pitch = grid.button_size + grid.spacing;

    let targets = alphabet
        .chars()
        .enumerate()
        .map(|(i, letter)| {
            let col = i % grid.columns;
            let row = i / grid.columns;
            let bounds = Bounds::new(
                origin.x + col as f32 * pitch,
                origin.y + row as f32 * pitch,
                grid.button_size,
                grid.button_size,
            );
            Target::new(TargetId::Letter(letter.to_ascii_uppercase()), bounds)
        })
        .collect();

    TargetRegistry { targets }
}

impl TargetRegistry {
    pub fn get(&self, id: &TargetId) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == *id)
    }

    /// Marks the target as used. Returns false if there is no such target.
    pub fn consume(&mut self, id: &TargetId) -> bool {
        match self.targets.iter_mut().find(|t| t.id == *id) {
            Some(target) => {
                target.consumed = true;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> + Clone {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Bounding box of a grid of `count` buttons.
///
/// Centred vertically between the header and the canvas bottom, centred
/// horizontally and then shifted left by `left_bias`.
pub fn letter_grid_bounds(grid: &GridGeometry, canvas: Canvas, count: usize) -> Bounds {
    let (width, height) = grid.grid_size(count);
    let available = canvas.height - grid.header_bottom;
    let x = ((canvas.width - width) / 2.0).floor() - grid.left_bias;
    let y = grid.header_bottom + ((available - height) / 2.0).floor();
    Bounds::new(x, y, width, height)
}

/// Where the end-of-game text lines and the play-again button go.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameOverLayout {
    /// Baseline of the "won"/"lost" headline.
    pub title_y: f32,
    /// Baseline of the line revealing the secret word.
    pub word_y: f32,
    pub play_again: Bounds,
}

impl GameOverLayout {
    const TITLE_ABOVE_CENTER: f32 = 80.0;
    const LINE_GAP: f32 = 60.0;

    pub fn new(canvas: Canvas, button: ButtonSize) -> Self {
        let title_y = (canvas.height / 2.0).floor() - Self::TITLE_ABOVE_CENTER;
        let word_y = title_y + Self::LINE_GAP;
        let button_y = word_y + Self::LINE_GAP;
        let button_x = ((canvas.width - button.width) / 2.0).floor();

        Self {
            title_y,
            word_y,
            play_again: Bounds::new(button_x, button_y, button.width, button.height),
        }
    }

    pub fn play_again_target(&self) -> Target {
        Target::new(TargetId::PlayAgain, self.play_again)
    }
}
