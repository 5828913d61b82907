use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};
use crate::targets::{letter_grid_bounds, ALPHABET};

/// Number of stick-figure parts; a game is lost when all of them are drawn.
pub const FIGURE_PARTS: u32 = 8;

/// Logical drawing surface shared by targets, pointer samples and the renderer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GridGeometry {
    pub columns: usize,
    pub button_size: f32,
    pub spacing: f32,
    /// Bottom edge of the header text block; the grid never starts above it.
    pub header_bottom: f32,
    /// How far the centred grid is pushed left to make room for the figure.
    pub left_bias: f32,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            columns: 6,
            button_size: 40.0,
            spacing: 10.0,
            header_bottom: 115.0,
            left_bias: 150.0,
        }
    }
}

impl GridGeometry {
    pub fn rows_for(&self, count: usize) -> usize {
        count.div_ceil(self.columns.max(1))
    }

    /// Width and height of a grid holding `count` buttons.
    pub fn grid_size(&self, count: usize) -> (f32, f32) {
        let pitch = self.button_size + self.spacing;
        let columns = self.columns.min(count.max(1));
        let width = columns as f32 * pitch - self.spacing;
        let height = self.rows_for(count) as f32 * pitch - self.spacing;
        (width, height)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ButtonSize {
    pub width: f32,
    pub height: f32,
}

impl Default for ButtonSize {
    fn default() -> Self {
        Self {
            width: 200.0,
            height: 60.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub dwell_secs: f64,
    pub loss_threshold: u32,
    pub canvas: Canvas,
    pub grid: GridGeometry,
    pub play_again: ButtonSize,
    /// Optional JSON file replacing the built-in category table.
    pub words_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            dwell_secs: 1.0,
            loss_threshold: FIGURE_PARTS,
            canvas: Canvas::default(),
            grid: GridGeometry::default(),
            play_again: ButtonSize::default(),
            words_file: None,
        }
    }
}

impl GameConfig {
    pub fn dwell(&self) -> Duration {
        Duration::from_secs_f64(self.dwell_secs)
    }

    /// Checks every value a session depends on; called once at startup.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.dwell_secs.is_finite() && self.dwell_secs > 0.0) {
            return Err(ConfigError::NonPositiveDwell(self.dwell_secs));
        }
        match Duration::try_from_secs_f64(self.dwell_secs) {
            // below one nanosecond
            Ok(d) if d.is_zero() => return Err(ConfigError::NonPositiveDwell(self.dwell_secs)),
            Ok(_) => {}
            Err(_) => return Err(ConfigError::DwellOutOfRange(self.dwell_secs)),
        }

        if self.loss_threshold != FIGURE_PARTS {
            return Err(ConfigError::LossThresholdMismatch {
                threshold: self.loss_threshold,
                parts: FIGURE_PARTS,
            });
        }

        if !(is_positive(self.canvas.width) && is_positive(self.canvas.height)) {
            return Err(ConfigError::InvalidGeometry(format!(
                "canvas must have a positive size, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }

        let grid = &self.grid;
        if grid.columns == 0
            || !is_positive(grid.button_size)
            || !(grid.spacing.is_finite() && grid.spacing >= 0.0)
            || !grid.header_bottom.is_finite()
            || !grid.left_bias.is_finite()
        {
            return Err(ConfigError::InvalidGeometry(
                "grid needs at least one column, a positive button size and finite offsets"
                    .to_string(),
            ));
        }

        let bounds = letter_grid_bounds(grid, self.canvas, ALPHABET.len());
        if bounds.x < 0.0 || bounds.right() > self.canvas.width {
            return Err(ConfigError::InvalidGeometry(format!(
                "letter grid spans x {:.0}..{:.0}, outside the {:.0} wide canvas",
                bounds.x,
                bounds.right(),
                self.canvas.width
            )));
        }
        if bounds.y < grid.header_bottom || bounds.bottom() > self.canvas.height {
            return Err(ConfigError::InvalidGeometry(format!(
                "letter grid spans y {:.0}..{:.0}, outside {:.0}..{:.0}",
                bounds.y,
                bounds.bottom(),
                grid.header_bottom,
                self.canvas.height
            )));
        }

        if !is_positive(self.play_again.width)
            || !is_positive(self.play_again.height)
            || self.play_again.width > self.canvas.width
        {
            return Err(ConfigError::InvalidGeometry(
                "play-again button must fit the canvas".to_string(),
            ));
        }

        Ok(())
    }
}

fn is_positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

pub trait ConfigStore {
    fn load(&self) -> ConfigResult<GameConfig>;
    fn save(&self, cfg: &GameConfig) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "dwell-hangman") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("dwell_hangman_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    /// A missing file means defaults; anything else that goes wrong is fatal.
    fn load(&self) -> ConfigResult<GameConfig> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(GameConfig::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_slice::<GameConfig>(&bytes).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, cfg: &GameConfig) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).map_err(std::io::Error::other)?;
        fs::write(&self.path, data)
    }
}
