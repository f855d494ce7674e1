// Every tunable of the board in one immutable value.
// Components get their section at construction; nothing reads globals.
// Defaults are the numbers the board was tuned with on a 30 FPS webcam.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::shape::ShapeKind;
use crate::types::{rgb, Color};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub stabilizer: StabilizerConfig,
    pub smoother: SmootherConfig,
    pub canvas: CanvasConfig,
    pub shapes: ShapeConfig,
    pub display: DisplayConfig,
    pub auto_save: AutoSaveConfig,
}

/// Majority vote over recent raw gesture labels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilizerConfig {
    pub buffer_size: usize,        // B: raw labels remembered
    pub confirmation_window: usize, // W: most recent labels that vote
    pub confirmation_count: usize,  // C: votes needed to confirm
    pub extension_threshold: f32,   // normalized tip-vs-joint distance for "extended"
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            buffer_size: 12,
            confirmation_window: 6,
            confirmation_count: 4,
            extension_threshold: 0.04,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmootherConfig {
    pub buffer_size: usize, // S
    pub span: usize,        // most recent points averaged
}

impl Default for SmootherConfig {
    fn default() -> Self {
        Self { buffer_size: 4, span: 3 }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedColor {
    pub name: String,
    pub color: Color,
}

impl NamedColor {
    fn new(name: &str, color: Color) -> Self {
        Self { name: name.to_owned(), color }
    }
}

/// Raster, history and the drawing attribute tables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub history_capacity: usize, // H
    pub background: Color,
    pub palette: Vec<NamedColor>,
    pub default_color: usize,
    pub brush_sizes: Vec<u32>,
    pub default_brush: usize,
    pub eraser_radius: u32,
    pub trail_length: usize,
    pub show_trail: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            history_capacity: 10,
            background: rgb(0, 0, 0),
            palette: vec![
                NamedColor::new("red", rgb(255, 0, 0)),
                NamedColor::new("green", rgb(0, 255, 0)),
                NamedColor::new("blue", rgb(0, 0, 255)),
                NamedColor::new("yellow", rgb(255, 255, 0)),
                NamedColor::new("purple", rgb(255, 0, 255)),
                NamedColor::new("cyan", rgb(0, 255, 255)),
                NamedColor::new("white", rgb(255, 255, 255)),
                NamedColor::new("orange", rgb(255, 165, 0)),
            ],
            default_color: 1,
            brush_sizes: vec![3, 5, 8, 12, 16],
            default_brush: 1,
            eraser_radius: 50,
            trail_length: 8,
            show_trail: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    pub default_shape: ShapeKind,
    pub arrow_head_length: f64,
    pub arrow_head_angle: f64, // radians, measured from the reversed shaft
    pub preview_color: Color,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            default_shape: ShapeKind::Line,
            arrow_head_length: 20.0,
            arrow_head_angle: std::f64::consts::FRAC_PI_6,
            preview_color: rgb(0, 255, 255),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub blend_alpha: f32, // weight of the camera frame where ink exists
    pub mirror: bool,     // flip the camera horizontally so it behaves like a mirror
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { blend_alpha: 0.7, mirror: true }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoSaveConfig {
    pub enabled: bool,
    pub interval_secs: u64,
    pub directory: PathBuf,
    pub max_files: usize,
}

impl AutoSaveConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for AutoSaveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 30,
            directory: PathBuf::from("auto_saves"),
            max_files: 10,
        }
    }
}

impl Config {
    /// Read a JSON config file; missing fields fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = fs::read(path.as_ref()).map_err(Error::ConfigRead)?;
        let config: Config = serde_json::from_slice(&bytes)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject tunables the components cannot honour.
    pub fn validate(&self) -> Result<()> {
        let s = &self.stabilizer;
        if s.buffer_size == 0 || s.confirmation_window == 0 || s.confirmation_count == 0 {
            return Err(Error::Config("stabilizer sizes must be non-zero".into()));
        }
        if s.confirmation_window > s.buffer_size {
            return Err(Error::Config(format!(
                "confirmation_window {} exceeds buffer_size {}",
                s.confirmation_window, s.buffer_size
            )));
        }
        if s.confirmation_count > s.confirmation_window {
            return Err(Error::Config(format!(
                "confirmation_count {} exceeds confirmation_window {}",
                s.confirmation_count, s.confirmation_window
            )));
        }
        if self.smoother.buffer_size == 0 || self.smoother.span == 0 {
            return Err(Error::Config("smoother sizes must be non-zero".into()));
        }

        let c = &self.canvas;
        if c.history_capacity == 0 {
            return Err(Error::Config("history_capacity must be non-zero".into()));
        }
        if c.default_color >= c.palette.len() {
            return Err(Error::Config(format!(
                "default_color {} outside a palette of {}",
                c.default_color,
                c.palette.len()
            )));
        }
        if c.default_brush >= c.brush_sizes.len() {
            return Err(Error::Config(format!(
                "default_brush {} outside {} brush sizes",
                c.default_brush,
                c.brush_sizes.len()
            )));
        }
        if !(0.0..=1.0).contains(&self.display.blend_alpha) {
            return Err(Error::Config("blend_alpha must lie in [0, 1]".into()));
        }
        Ok(())
    }
}
