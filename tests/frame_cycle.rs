// Whole-frame behaviour through the public API: a hand goes in, the canvas
// and its history come out.

use gesture_board::config::{SmootherConfig, StabilizerConfig};
use gesture_board::gesture::{Landmark, INDEX_MCP, INDEX_TIP, LANDMARK_COUNT, WRIST, MIDDLE_MCP};
use gesture_board::smoother::CoordinateSmoother;
use gesture_board::stabilizer::GestureStabilizer;
use gesture_board::{Board, Config, FingerState, GestureLabel, HandFrame, Point};

const W: usize = 200;
const H: usize = 200;

const INDEX: [bool; 5] = [false, true, false, false, false];
const PEACE: [bool; 5] = [false, true, true, false, false];
const OPEN: [bool; 5] = [true; 5];
const FIST: [bool; 5] = [false; 5];

fn board() -> Board {
    Board::new(&Config::default(), W, H).unwrap()
}

fn hand(flags: [bool; 5], x: i32, y: i32) -> Option<HandFrame> {
    let at = Point::new(x, y);
    Some(HandFrame { fingers: FingerState::from_flags(flags), cursor: at, palm: at })
}

fn ink_at(b: &Board, x: i32, y: i32) -> bool {
    b.canvas().raster().get(x, y) != Some(b.canvas().attributes.background)
}

/// A horizontal stroke along y = 100, x = 20..=90.
fn draw_stroke(b: &mut Board) {
    for x in (20..=90).step_by(10) {
        b.process(hand(INDEX, x, 100));
    }
}

/// Enough fist frames to outvote whatever came before.
fn settle(b: &mut Board, x: i32, y: i32) {
    for _ in 0..6 {
        b.process(hand(FIST, x, y));
    }
}

#[test]
fn a_stroke_is_one_undo_step() {
    let mut b = board();
    draw_stroke(&mut b);
    assert_eq!(b.gesture(), GestureLabel::Drawing);
    assert!(ink_at(&b, 50, 100));
    // still painting: nothing checkpointed yet
    assert_eq!(b.canvas().history_info().depth, 1);

    settle(&mut b, 90, 100);
    assert_eq!(b.gesture(), GestureLabel::Pause);
    assert_eq!(b.canvas().history_info().depth, 2);
    assert!(!b.canvas().has_pending());

    assert!(b.canvas_mut().undo());
    assert!(!ink_at(&b, 50, 100));
    assert!(b.canvas_mut().redo());
    assert!(ink_at(&b, 50, 100));
}

#[test]
fn losing_the_hand_closes_the_stroke() {
    let mut b = board();
    draw_stroke(&mut b);
    let out = b.process(None);
    assert_eq!(out.gesture, GestureLabel::None);
    assert_eq!(out.history.depth, 2);

    // the next stroke does not connect back to the old one
    for _ in 0..4 {
        b.process(hand(INDEX, 150, 180));
    }
    assert!(!ink_at(&b, 120, 140));
}

#[test]
fn undo_mid_stroke_brings_back_what_was_painted() {
    let mut b = board();
    draw_stroke(&mut b);
    assert!(b.canvas_mut().undo());
    assert!(!ink_at(&b, 50, 100));
    assert!(b.canvas_mut().redo());
    assert!(ink_at(&b, 50, 100));
}

#[test]
fn palm_erase_is_its_own_undo_step() {
    let mut b = board();
    draw_stroke(&mut b);
    settle(&mut b, 50, 100);

    for _ in 0..6 {
        b.process(hand(OPEN, 50, 100));
    }
    assert_eq!(b.gesture(), GestureLabel::PalmErase);
    assert!(!ink_at(&b, 50, 100));
    settle(&mut b, 50, 100);
    assert_eq!(b.canvas().history_info().depth, 3);

    b.canvas_mut().undo();
    assert!(ink_at(&b, 50, 100));
}

#[test]
fn shape_mode_places_a_line_and_undo_removes_it() {
    let mut b = board();
    for _ in 0..4 {
        b.process(hand(PEACE, 50, 50));
    }
    assert_eq!(b.gesture(), GestureLabel::ShapeMode);
    for _ in 0..4 {
        b.process(hand(PEACE, 150, 50));
    }
    let preview = b.preview().unwrap();
    assert_eq!((preview.start, preview.end), (Point::new(50, 50), Point::new(150, 50)));
    // preview is not ink
    assert!(!ink_at(&b, 100, 50));

    assert!(b.complete_shape());
    assert!(ink_at(&b, 100, 50));
    let info = b.canvas().history_info();
    assert_eq!((info.cursor, info.depth), (1, 2));

    b.canvas_mut().undo();
    assert!(!ink_at(&b, 100, 50));
}

#[test]
fn leaving_shape_mode_drops_the_pending_shape() {
    let mut b = board();
    for _ in 0..4 {
        b.process(hand(PEACE, 50, 50));
    }
    settle(&mut b, 50, 50);
    assert!(b.preview().is_none());
    assert!(!b.complete_shape());
    assert_eq!(b.canvas().history_info().depth, 1);
}

/// Index finger up by 0.25 of the frame, everything else folded.
fn pointing_pose() -> [Landmark; LANDMARK_COUNT] {
    let mut lm = [Landmark::new(0.5, 0.5); LANDMARK_COUNT];
    lm[INDEX_TIP] = Landmark::new(0.5, 0.25);
    lm[INDEX_MCP] = Landmark::new(0.5, 0.5);
    lm[WRIST] = Landmark::new(0.5, 0.75);
    lm[MIDDLE_MCP] = Landmark::new(0.5, 0.25);
    lm
}

#[test]
fn landmarks_drive_the_board() {
    let lm = pointing_pose();
    let frame = HandFrame::from_landmarks(&lm, W, H, 0.04);
    assert_eq!(frame.cursor, Point::new(100, 50));
    assert_eq!(frame.palm, Point::new(100, 100));

    let mut b = board();
    let out = b.process_landmarks(Some(&lm));
    assert_eq!(out.gesture, GestureLabel::Drawing);
    assert_eq!(out.cursor, Some(Point::new(100, 50)));
    assert_eq!(b.process_landmarks(None).gesture, GestureLabel::None);
}

#[test]
fn extension_threshold_comes_from_the_config() {
    let mut config = Config::default();
    config.stabilizer.extension_threshold = 0.3;
    let mut b = Board::new(&config, W, H).unwrap();
    // 0.25 of lift is no longer enough: the hand reads as a fist
    assert_eq!(b.process_landmarks(Some(&pointing_pose())).gesture, GestureLabel::Pause);
}

#[test]
fn default_stabilizer_confirms_a_four_of_six_majority() {
    use GestureLabel::{Drawing, None as NoHand};
    let mut s = GestureStabilizer::new(&StabilizerConfig::default());
    let out: Vec<_> = [Drawing, Drawing, Drawing, Drawing, NoHand, NoHand]
        .into_iter()
        .map(|g| s.stabilize(g))
        .collect();
    assert_eq!(out.last(), Some(&Drawing));
}

#[test]
fn default_smoother_averages_what_it_has() {
    let mut s = CoordinateSmoother::new(&SmootherConfig::default());
    s.smooth(Point::new(0, 0));
    s.smooth(Point::new(10, 10));
    assert_eq!(s.smooth(Point::new(20, 20)), Point::new(10, 10));
}
