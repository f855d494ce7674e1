// One frame of the drawing loop.
//
// hand pose → classify → stabilize → label
// fingertip → smooth → cursor
// {label, cursor, palm} → canvas stroke / erase / shape anchor
//
// Stroke and erase episodes become one undo checkpoint each, taken when the
// stabilized label leaves Drawing or PalmErase, or when tracking is lost.

use tracing::debug;

use crate::canvas::{CanvasEngine, HistoryInfo};
use crate::config::Config;
use crate::error::Result;
use crate::gesture::{classify, FingerState, GestureLabel, HandPositions, Landmark, LANDMARK_COUNT};
use crate::shape::ShapePreview;
use crate::smoother::CoordinateSmoother;
use crate::stabilizer::GestureStabilizer;
use crate::types::Point;

/// Everything the pose provider reports for one tracked hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandFrame {
    pub fingers: FingerState,
    /// Raw index fingertip, frame pixels.
    pub cursor: Point,
    /// Palm centre, frame pixels.
    pub palm: Point,
}

impl HandFrame {
    pub fn from_landmarks(lm: &[Landmark; LANDMARK_COUNT], width: usize, height: usize, threshold: f32) -> Self {
        let HandPositions { index, palm } = HandPositions::from_landmarks(lm, width, height);
        Self { fingers: FingerState::from_landmarks(lm, threshold), cursor: index, palm }
    }
}

/// What the UI needs after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameOutput {
    pub gesture: GestureLabel,
    /// Smoothed cursor; None while no hand is tracked.
    pub cursor: Option<Point>,
    pub palm: Option<Point>,
    /// Present only while a shape is pending.
    pub preview: Option<ShapePreview>,
    pub history: HistoryInfo,
}

pub struct Board {
    stabilizer: GestureStabilizer,
    smoother: CoordinateSmoother,
    canvas: CanvasEngine,
    gesture: GestureLabel,
    cursor: Option<Point>,
    /// Tip-vs-joint distance for a finger to count as extended.
    extension_threshold: f32,
}

impl Board {
    /// Canvas sized to the camera frame; fails on an inconsistent config.
    pub fn new(config: &Config, width: usize, height: usize) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            stabilizer: GestureStabilizer::new(&config.stabilizer),
            smoother: CoordinateSmoother::new(&config.smoother),
            canvas: CanvasEngine::new(width, height, &config.canvas, &config.shapes),
            gesture: GestureLabel::None,
            cursor: None,
            extension_threshold: config.stabilizer.extension_threshold,
        })
    }

    pub fn canvas(&self) -> &CanvasEngine {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut CanvasEngine {
        &mut self.canvas
    }

    pub fn gesture(&self) -> GestureLabel {
        self.gesture
    }

    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    /// Run one frame. `None` means the provider lost the hand this frame.
    pub fn process(&mut self, hand: Option<HandFrame>) -> FrameOutput {
        let Some(hand) = hand else {
            return self.tracking_lost();
        };

        let raw = classify(hand.fingers);
        let label = self.stabilizer.stabilize(raw);
        let cursor = self.smoother.smooth(hand.cursor);

        if label != self.gesture {
            self.leave(self.gesture, label);
        }
        self.gesture = label;
        self.cursor = Some(cursor);

        match label {
            GestureLabel::Drawing => self.canvas.stroke_to(cursor),
            GestureLabel::PalmErase => self.canvas.erase_at(hand.palm),
            GestureLabel::ShapeMode => {
                self.canvas.start_shape(cursor);
            }
            GestureLabel::Pause | GestureLabel::None => {}
        }

        FrameOutput {
            gesture: label,
            cursor: Some(cursor),
            palm: Some(hand.palm),
            preview: self.preview(),
            history: self.canvas.history_info(),
        }
    }

    /// Run one frame from raw landmarks, scaled onto the canvas size.
    pub fn process_landmarks(&mut self, landmarks: Option<&[Landmark; LANDMARK_COUNT]>) -> FrameOutput {
        let (w, h) = (self.canvas.width(), self.canvas.height());
        let threshold = self.extension_threshold;
        self.process(landmarks.map(|lm| HandFrame::from_landmarks(lm, w, h, threshold)))
    }

    /// Commit the pending shape at the current cursor. Only honoured in ShapeMode.
    pub fn complete_shape(&mut self) -> bool {
        match (self.gesture, self.cursor) {
            (GestureLabel::ShapeMode, Some(end)) => self.canvas.complete_shape(end),
            _ => false,
        }
    }

    /// Shape preview at the current cursor, if a shape is pending.
    pub fn preview(&self) -> Option<ShapePreview> {
        self.cursor.and_then(|end| self.canvas.shape_preview(end))
    }

    /// Close whatever the old label had going before switching to `next`.
    fn leave(&mut self, old: GestureLabel, next: GestureLabel) {
        debug!(from = old.as_str(), to = next.as_str(), "gesture change");
        match old {
            GestureLabel::Drawing | GestureLabel::PalmErase => {
                self.canvas.end_stroke();
            }
            GestureLabel::ShapeMode => {
                self.canvas.cancel_shape();
            }
            GestureLabel::Pause | GestureLabel::None => {}
        }
    }

    fn tracking_lost(&mut self) -> FrameOutput {
        if self.cursor.is_some() {
            debug!("hand lost");
        }
        self.stabilizer.reset();
        self.smoother.reset();
        self.leave(self.gesture, GestureLabel::None);
        self.gesture = GestureLabel::None;
        self.cursor = None;
        FrameOutput {
            gesture: GestureLabel::None,
            cursor: None,
            palm: None,
            preview: None,
            history: self.canvas.history_info(),
        }
    }
}
