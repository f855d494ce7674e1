// The live drawing surface and its undo/redo history.
//
// Every mutation of the raster goes through `CanvasEngine`. Strokes and
// erases paint immediately but only become undo checkpoints when the caller
// ends the episode (`end_stroke` / `commit_pending`); shape commits and
// clears checkpoint on their own.

use tracing::{debug, info};

use crate::attributes::DrawingAttributes;
use crate::config::{CanvasConfig, ShapeConfig};
use crate::history::History;
use crate::raster;
use crate::ring::Ring;
use crate::shape::{ArrowHead, Outline, ShapeBuilder, ShapePreview, ShapeState};
use crate::types::{Color, FrameBuffer, Point};

/// Snapshot counters for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryInfo {
    pub cursor: usize,
    pub depth: usize,
    pub capacity: usize,
    pub can_undo: bool,
    pub can_redo: bool,
}

pub struct CanvasEngine {
    raster: FrameBuffer,
    history: History,
    pub attributes: DrawingAttributes,
    shapes: ShapeBuilder,
    arrow: ArrowHead,
    preview_color: Color,
    /// Last stroke point; None between strokes.
    prev: Option<Point>,
    /// Raster differs from the entry under the history cursor.
    dirty: bool,
    trail: Ring<Point>,
    show_trail: bool,
}

impl CanvasEngine {
    /// A blank `width`×`height` canvas whose history holds the blank raster as entry 0.
    pub fn new(width: usize, height: usize, canvas: &CanvasConfig, shapes: &ShapeConfig) -> Self {
        let raster = FrameBuffer::filled(width, height, canvas.background);
        let history = History::new(&raster, canvas.history_capacity);
        Self {
            raster,
            history,
            attributes: DrawingAttributes::new(canvas, shapes),
            shapes: ShapeBuilder::new(),
            arrow: ArrowHead::from(shapes),
            preview_color: shapes.preview_color,
            prev: None,
            dirty: false,
            trail: Ring::with_capacity(canvas.trail_length.max(1)),
            show_trail: canvas.show_trail,
        }
    }

    /// Read-only view for compositing and export.
    pub fn raster(&self) -> &FrameBuffer {
        &self.raster
    }

    pub fn width(&self) -> usize {
        self.raster.width
    }

    pub fn height(&self) -> usize {
        self.raster.height
    }

    /* ---------------------------- strokes & erasing ---------------------------- */

    /// Stroke from `from` to `to` in the current colour and brush size.
    /// With no `from` nothing is painted; `to` still becomes the previous point.
    pub fn draw_segment(&mut self, from: Option<Point>, to: Point) {
        if let Some(from) = from {
            let (thickness, color) = (self.attributes.brush_thickness(), self.attributes.color());
            raster::thick_line(&mut self.raster, from, to, thickness, color);
            self.dirty = true;
        }
        self.prev = Some(to);
        if self.show_trail {
            self.trail.push(to);
        }
    }

    /// Continue the current stroke to `to`.
    pub fn stroke_to(&mut self, to: Point) {
        self.draw_segment(self.prev, to);
    }

    pub fn prev_point(&self) -> Option<Point> {
        self.prev
    }

    /// Close the running stroke and checkpoint whatever it painted.
    pub fn end_stroke(&mut self) -> bool {
        self.prev = None;
        self.commit_pending()
    }

    /// Paint a background-coloured disc of `radius` at `point`.
    pub fn erase(&mut self, point: Point, radius: u32) {
        let radius = i32::try_from(radius).unwrap_or(i32::MAX);
        raster::fill_disc(&mut self.raster, point, radius, self.attributes.background);
        self.dirty = true;
    }

    /// Erase with the configured eraser radius.
    pub fn erase_at(&mut self, point: Point) {
        self.erase(point, self.attributes.eraser_radius);
    }

    /// Blank the whole raster and checkpoint it.
    pub fn clear(&mut self) {
        self.raster.fill(self.attributes.background);
        self.prev = None;
        self.save_state();
        info!("canvas cleared");
    }

    /* --------------------------------- history --------------------------------- */

    /// Deep-copy the raster into history as the newest entry.
    pub fn save_state(&mut self) {
        self.history.push(&self.raster);
        self.dirty = false;
        debug!(cursor = self.history.cursor(), depth = self.history.len(), "canvas state saved");
    }

    /// Checkpoint painted-but-unsaved edits. Returns whether a checkpoint was taken.
    pub fn commit_pending(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        self.save_state();
        true
    }

    pub fn has_pending(&self) -> bool {
        self.dirty
    }

    /// Step back one checkpoint. Unsaved edits are checkpointed first so a
    /// following `redo` brings them back.
    pub fn undo(&mut self) -> bool {
        self.commit_pending();
        let Some(entry) = self.history.step_back() else {
            return false;
        };
        self.raster.copy_from(entry);
        self.prev = None;
        debug!(cursor = self.history.cursor(), "undo");
        true
    }

    /// Step forward one checkpoint. Unsaved edits are checkpointed first,
    /// which drops the redo branch.
    pub fn redo(&mut self) -> bool {
        self.commit_pending();
        let Some(entry) = self.history.step_forward() else {
            return false;
        };
        self.raster.copy_from(entry);
        self.prev = None;
        debug!(cursor = self.history.cursor(), "redo");
        true
    }

    pub fn history_info(&self) -> HistoryInfo {
        HistoryInfo {
            cursor: self.history.cursor(),
            depth: self.history.len(),
            capacity: self.history.capacity(),
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        }
    }

    /* ---------------------------------- shapes --------------------------------- */

    /// Anchor a shape at `p`; ignored while another is pending.
    pub fn start_shape(&mut self, p: Point) -> bool {
        self.shapes.start(p)
    }

    /// Commit the pending shape ending at `end`.
    ///
    /// The pre-shape raster is saved first so it is the undo target.
    pub fn complete_shape(&mut self, end: Point) -> bool {
        let kind = self.attributes.shape;
        let Some(shape) = self.shapes.complete(kind, end) else {
            return false;
        };
        self.save_state();

        let (thickness, color) = (self.attributes.brush_thickness(), self.attributes.color());
        shape.outline(self.arrow).draw(&mut self.raster, thickness, color);
        self.dirty = true;
        info!(shape = kind.as_str(), start = ?shape.start, end = ?shape.end, "shape drawn");
        true
    }

    pub fn cancel_shape(&mut self) -> bool {
        self.shapes.cancel()
    }

    pub fn shape_state(&self) -> ShapeState {
        self.shapes.state()
    }

    /// What the renderer should draw transiently for a pending shape.
    pub fn shape_preview(&self, end: Point) -> Option<ShapePreview> {
        self.shapes.preview(self.attributes.shape, end, self.preview_color)
    }

    /// Outline of a preview, using the same geometry a commit would.
    pub fn preview_outline(&self, preview: &ShapePreview) -> Outline {
        preview.shape().outline(self.arrow)
    }

    /* ---------------------------------- trail ---------------------------------- */

    /// Recent stroke points, oldest first; empty while the trail is off.
    pub fn trail(&self) -> impl Iterator<Item = Point> + '_ {
        self.trail.recent(self.trail.capacity())
    }

    pub fn show_trail(&self) -> bool {
        self.show_trail
    }

    pub fn toggle_trail(&mut self) -> bool {
        self.show_trail = !self.show_trail;
        if !self.show_trail {
            self.trail.clear();
        }
        info!(on = self.show_trail, "trail");
        self.show_trail
    }
}
