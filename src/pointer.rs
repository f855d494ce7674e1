// Stands in for a hand-pose provider: the mouse plays the tracked hand.
// Visual: hold a button and the board reacts as if you raised those fingers.
//
//   left   → index only       → DRAWING
//   right  → all five         → PALM_ERASE
//   middle → index + middle   → SHAPE_MODE
//   none   → fist             → PAUSE
//   pointer outside the window → no hand (tracking lost)

use gesture_board::{FingerState, HandFrame, Point};

use crate::draw::Buttons;

const FIST: [bool; 5] = [false; 5];
const INDEX: [bool; 5] = [false, true, false, false, false];
const PEACE: [bool; 5] = [false, true, true, false, false];
const OPEN: [bool; 5] = [true; 5];

/// Translate pointer state into the hand the board would have been told about.
/// Left wins over right, right over middle, when several are held.
pub fn hand_from_pointer(pos: Option<(f32, f32)>, buttons: Buttons) -> Option<HandFrame> {
    let (x, y) = pos?;
    let at = Point::new(x as i32, y as i32);
    let flags = if buttons.left {
        INDEX
    } else if buttons.right {
        OPEN
    } else if buttons.middle {
        PEACE
    } else {
        FIST
    };
    Some(HandFrame { fingers: FingerState::from_flags(flags), cursor: at, palm: at })
}
