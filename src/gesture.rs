// Hand pose → discrete gesture label.
//
// The pose provider hands us either 21 normalized landmarks or the five
// "finger extended" flags directly. Classification is a pure priority table.

use crate::types::Point;

// Hand landmark indices (21-point hand model).
pub const WRIST: usize = 0;
pub const THUMB_MCP: usize = 2;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_TIP: usize = 20;
pub const LANDMARK_COUNT: usize = 21;

const FINGER_TIPS: [usize; 4] = [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];
const FINGER_MCPS: [usize; 4] = [INDEX_MCP, MIDDLE_MCP, RING_MCP, PINKY_MCP];

/// What the current hand pose asks the board to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureLabel {
    /// Index finger alone: ink follows the fingertip.
    Drawing,
    /// Open hand: erase under the palm.
    PalmErase,
    /// Index + middle ("peace"): anchor and preview a shape.
    ShapeMode,
    /// Fist: hand visible, nothing happens.
    Pause,
    /// Any other pose.
    None,
}

impl GestureLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Drawing => "DRAWING",
            Self::PalmErase => "PALM ERASE",
            Self::ShapeMode => "SHAPE MODE",
            Self::Pause => "PAUSE",
            Self::None => "NONE",
        }
    }
}

/// Normalized landmark, x/y in [0, 1] of the frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }
}

/// Which fingers are extended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FingerState {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerState {
    /// From `[thumb, index, middle, ring, pinky]`.
    pub const fn from_flags(flags: [bool; 5]) -> Self {
        let [thumb, index, middle, ring, pinky] = flags;
        Self { thumb, index, middle, ring, pinky }
    }

    /// The thumb is compared horizontally (tip against its MCP); other fingers
    /// count as extended when the tip sits above the MCP by more than `threshold`.
    pub fn from_landmarks(lm: &[Landmark; LANDMARK_COUNT], threshold: f32) -> Self {
        let thumb = (lm[THUMB_TIP].x - lm[THUMB_MCP].x).abs() > threshold;
        let mut fingers = [false; 4];
        for (slot, (tip, mcp)) in fingers.iter_mut().zip(FINGER_TIPS.iter().zip(FINGER_MCPS)) {
            *slot = lm[mcp].y - lm[*tip].y > threshold;
        }
        let [index, middle, ring, pinky] = fingers;
        Self { thumb, index, middle, ring, pinky }
    }

    /// Extended fingers, thumb excluded.
    pub fn extended_count(&self) -> usize {
        [self.index, self.middle, self.ring, self.pinky].iter().filter(|f| **f).count()
    }
}

/// Map a finger vector to its raw label. First matching rule wins.
pub fn classify(fingers: FingerState) -> GestureLabel {
    match fingers.extended_count() {
        4 => GestureLabel::PalmErase,
        1 if fingers.index => GestureLabel::Drawing,
        2 if fingers.index && fingers.middle => GestureLabel::ShapeMode,
        0 => GestureLabel::Pause,
        _ => GestureLabel::None,
    }
}

/// Pixel positions the board cares about: the index tip (cursor) and the palm centre (eraser).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandPositions {
    pub index: Point,
    pub palm: Point,
}

impl HandPositions {
    /// Scale normalized landmarks onto a `width`×`height` frame.
    /// The palm centre is the midpoint of the wrist and the middle-finger MCP.
    pub fn from_landmarks(lm: &[Landmark; LANDMARK_COUNT], width: usize, height: usize) -> Self {
        let (w, h) = (width as f32, height as f32);
        let tip = lm[INDEX_TIP];
        let index = Point::new((tip.x * w) as i32, (tip.y * h) as i32);
        let (wrist, mcp) = (lm[WRIST], lm[MIDDLE_MCP]);
        let palm = Point::new(
            ((wrist.x + mcp.x) * w / 2.0) as i32,
            ((wrist.y + mcp.y) * h / 2.0) as i32,
        );
        Self { index, palm }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(flags: [bool; 5]) -> GestureLabel {
        classify(FingerState::from_flags(flags))
    }

    #[test]
    fn rule_table() {
        assert_eq!(f([false, true, true, true, true]), GestureLabel::PalmErase);
        assert_eq!(f([true, true, true, true, true]), GestureLabel::PalmErase);
        assert_eq!(f([false, true, false, false, false]), GestureLabel::Drawing);
        assert_eq!(f([true, true, false, false, false]), GestureLabel::Drawing);
        assert_eq!(f([false, true, true, false, false]), GestureLabel::ShapeMode);
        assert_eq!(f([false, false, false, false, false]), GestureLabel::Pause);
        assert_eq!(f([true, false, false, false, false]), GestureLabel::Pause);
    }

    #[test]
    fn unlisted_poses_are_none() {
        // single finger other than index
        assert_eq!(f([false, false, true, false, false]), GestureLabel::None);
        // two fingers that aren't index+middle
        assert_eq!(f([false, true, false, false, true]), GestureLabel::None);
        assert_eq!(f([false, true, true, true, false]), GestureLabel::None);
    }

    /// Open hand: every tip well above its MCP, thumb swung out.
    fn open_hand() -> [Landmark; LANDMARK_COUNT] {
        let mut lm = [Landmark::new(0.5, 0.6); LANDMARK_COUNT];
        lm[WRIST] = Landmark::new(0.5, 0.9);
        lm[THUMB_MCP] = Landmark::new(0.40, 0.7);
        lm[THUMB_TIP] = Landmark::new(0.30, 0.65);
        for (tip, mcp) in FINGER_TIPS.iter().zip(FINGER_MCPS) {
            lm[mcp].y = 0.6;
            lm[*tip].y = 0.4;
        }
        lm
    }

    #[test]
    fn landmarks_of_an_open_hand() {
        let fingers = FingerState::from_landmarks(&open_hand(), 0.04);
        assert_eq!(fingers, FingerState::from_flags([true; 5]));
        assert_eq!(classify(fingers), GestureLabel::PalmErase);
    }

    #[test]
    fn curled_fingers_stay_within_threshold() {
        let mut lm = open_hand();
        for tip in [MIDDLE_TIP, RING_TIP, PINKY_TIP] {
            lm[tip].y = 0.58; // only 0.02 above the MCP
        }
        let fingers = FingerState::from_landmarks(&lm, 0.04);
        assert_eq!(classify(fingers), GestureLabel::Drawing);
    }

    #[test]
    fn positions_scale_to_pixels() {
        let mut lm = open_hand();
        lm[INDEX_TIP] = Landmark::new(0.25, 0.5);
        lm[WRIST] = Landmark::new(0.4, 1.0);
        lm[MIDDLE_MCP] = Landmark::new(0.6, 0.5);
        let pos = HandPositions::from_landmarks(&lm, 640, 480);
        assert_eq!(pos.index, Point::new(160, 240));
        assert_eq!(pos.palm, Point::new(320, 360));
    }
}
