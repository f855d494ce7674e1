// Canvas → PNG on disk: on demand, and on a timer with a bounded number of auto-saves.
// History is never written; only the live raster is.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use image::{ImageBuffer, Rgb};
use tracing::{info, warn};

use crate::config::AutoSaveConfig;
use crate::error::{Error, Result};
use crate::types::{channels, FrameBuffer};

const AUTO_SAVE_PREFIX: &str = "auto_save_";
const DRAWING_PREFIX: &str = "finger_drawing_";

/// Write `raster` to `path`; the format follows the extension.
pub fn save_image(raster: &FrameBuffer, path: &Path) -> Result<()> {
    let img = ImageBuffer::from_fn(raster.width as u32, raster.height as u32, |x, y| {
        let (r, g, b) = channels(raster.pixels[y as usize * raster.width + x as usize]);
        Rgb([r, g, b])
    });
    img.save(path).map_err(|source| Error::Export { path: path.to_path_buf(), source })
}

/// Save a manual snapshot as `finger_drawing_<millis>.png` under `dir`.
pub fn save_drawing(raster: &FrameBuffer, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let (path, _) = unique_path(dir, DRAWING_PREFIX, 0);
    save_image(raster, &path)?;
    info!(path = %path.display(), "canvas saved");
    Ok(path)
}

/// Milliseconds-since-epoch file name in `dir`, no lower than `min_stamp`
/// and bumped until unused. Returns the path and the stamp it used.
fn unique_path(dir: &Path, prefix: &str, min_stamp: u128) -> (PathBuf, u128) {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let mut stamp = now.max(min_stamp);
    loop {
        let path = dir.join(format!("{prefix}{stamp:013}.png"));
        if !path.exists() {
            return (path, stamp);
        }
        stamp += 1;
    }
}

pub struct AutoSaver {
    directory: PathBuf,
    interval: Duration,
    max_files: usize,
    last_save: Instant,
    /// Names must keep increasing even when saves land in the same millisecond.
    last_stamp: u128,
}

impl AutoSaver {
    pub fn new(config: &AutoSaveConfig, now: Instant) -> Self {
        Self {
            directory: config.directory.clone(),
            interval: config.interval(),
            max_files: config.max_files,
            last_save: now,
            last_stamp: 0,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Save once `interval` has passed since the last save. Returns the new file, if any.
    pub fn tick(&mut self, now: Instant, raster: &FrameBuffer) -> Result<Option<PathBuf>> {
        if now.duration_since(self.last_save) < self.interval {
            return Ok(None);
        }
        let path = self.save_now(raster)?;
        self.last_save = now;
        Ok(Some(path))
    }

    /// Save immediately and prune old auto-saves.
    pub fn save_now(&mut self, raster: &FrameBuffer) -> Result<PathBuf> {
        fs::create_dir_all(&self.directory)?;
        let (path, stamp) = unique_path(&self.directory, AUTO_SAVE_PREFIX, self.last_stamp + 1);
        save_image(raster, &path)?;
        self.last_stamp = stamp;
        info!(path = %path.display(), "auto-saved");
        self.prune();
        Ok(path)
    }

    /// Auto-save files, newest first.
    pub fn list(&self) -> Result<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = fs::read_dir(&self.directory)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(AUTO_SAVE_PREFIX) && n.ends_with(".png"))
            })
            .collect();
        // zero-padded timestamps sort lexically
        files.sort_unstable_by(|a, b| b.cmp(a));
        Ok(files)
    }

    /// Delete all but the newest `max_files` auto-saves. Failures are logged, not returned.
    fn prune(&self) -> usize {
        let files = match self.list() {
            Ok(files) => files,
            Err(e) => {
                warn!(error = %e, "could not list auto-saves");
                return 0;
            }
        };
        let mut deleted = 0;
        for old in files.iter().skip(self.max_files) {
            match fs::remove_file(old) {
                Ok(()) => deleted += 1,
                Err(e) => warn!(path = %old.display(), error = %e, "could not delete old auto-save"),
            }
        }
        deleted
    }
}
