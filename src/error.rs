// One error type for the whole crate.
// Every variant states *where* things went wrong. The drawing core itself never
// fails; only construction, file I/O and the window/camera surfaces return these.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Updating the window buffer failed
    #[error("Camera init error: {0}")]
    CameraInit(String), // Opening/starting the camera failed
    #[error("Camera frame error: {0}")]
    CameraFrame(String), // Grabbing/decoding a frame failed

    #[error("Invalid config: {0}")]
    Config(String), // Tunables that contradict each other (W > B, empty palette, ...)
    #[error("Config read error: {0}")]
    ConfigRead(#[source] io::Error),
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Export to {} failed: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
