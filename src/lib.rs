// Gesture-driven drawing board.
// The camera feed is the backdrop; a tracked hand draws, erases and places
// shapes on a persistent canvas with bounded undo/redo.
//
// Per frame:  pose → gesture::classify → stabilizer → label
//             fingertip → smoother → cursor
//             {label, cursor} → board → canvas (+ history)

pub mod attributes;
pub mod board;
pub mod canvas;
pub mod config;
pub mod error;
pub mod export;
pub mod gesture;
pub mod history;
pub mod raster;
pub mod ring;
pub mod shape;
pub mod smoother;
pub mod stabilizer;
pub mod types;

pub use board::{Board, FrameOutput, HandFrame};
pub use config::Config;
pub use error::{Error, Result};
pub use gesture::{FingerState, GestureLabel};
pub use types::{FrameBuffer, Point};
