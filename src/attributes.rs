// Current colour / brush / eraser / shape selection.

use tracing::info;

use crate::config::{CanvasConfig, NamedColor, ShapeConfig};
use crate::shape::ShapeKind;
use crate::types::Color;

pub struct DrawingAttributes {
    palette: Vec<NamedColor>,
    color_index: usize,
    brush_sizes: Vec<u32>,
    brush_index: usize,
    pub eraser_radius: u32,
    pub background: Color,
    pub shape: ShapeKind,
}

impl DrawingAttributes {
    pub fn new(canvas: &CanvasConfig, shapes: &ShapeConfig) -> Self {
        Self {
            palette: canvas.palette.clone(),
            color_index: canvas.default_color,
            brush_sizes: canvas.brush_sizes.clone(),
            brush_index: canvas.default_brush,
            eraser_radius: canvas.eraser_radius,
            background: canvas.background,
            shape: shapes.default_shape,
        }
    }

    pub fn color(&self) -> Color {
        self.palette[self.color_index].color
    }

    pub fn color_name(&self) -> &str {
        &self.palette[self.color_index].name
    }

    pub fn color_index(&self) -> usize {
        self.color_index
    }

    pub fn palette(&self) -> &[NamedColor] {
        &self.palette
    }

    /// Select palette entry `index`; false if there is no such entry.
    pub fn set_color(&mut self, index: usize) -> bool {
        if index >= self.palette.len() {
            return false;
        }
        self.color_index = index;
        info!(color = self.color_name(), "colour selected");
        true
    }

    pub fn brush_thickness(&self) -> u32 {
        self.brush_sizes[self.brush_index]
    }

    /// Next size up, clamped at the largest.
    pub fn increase_brush_size(&mut self) -> u32 {
        if self.brush_index + 1 < self.brush_sizes.len() {
            self.brush_index += 1;
        }
        info!(size = self.brush_thickness(), "brush size");
        self.brush_thickness()
    }

    /// Next size down, clamped at the smallest.
    pub fn decrease_brush_size(&mut self) -> u32 {
        self.brush_index = self.brush_index.saturating_sub(1);
        info!(size = self.brush_thickness(), "brush size");
        self.brush_thickness()
    }

    pub fn cycle_shape(&mut self) -> ShapeKind {
        self.shape = self.shape.next();
        info!(shape = self.shape.as_str(), "shape selected");
        self.shape
    }
}
