// Opens a camera and converts frames into a buffer suitable for the window.
// Visual expectation: when main.rs calls `next_frame()`, you get a
// Vec<u32> where each pixel is 0x00RRGGBB, mirrored if asked, ready to composite.

use gesture_board::{Error, FrameBuffer};
use tracing::{info, warn};

// Bring in nokhwa types for camera control.
use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

/// Resolutions tried after the preferred one, largest first.
const FALLBACK_RESOLUTIONS: [(u32, u32); 4] = [(1280, 720), (1024, 768), (800, 600), (640, 480)];
/// Device indices probed when the requested one does not open.
const PROBE_INDICES: u32 = 4;

// A small wrapper around nokhwa::Camera so our main loop stays clean.
pub struct CameraCapture {
    cam: Camera,
    width: u32,
    height: u32,
    mirror: bool,
}

impl CameraCapture {
    /// Open camera `index` (or the first other index that works) near `width`×`height`.
    /// On success, nothing is shown on screen yet; we just hold an open stream.
    pub fn open(index: u32, width: u32, height: u32, mirror: bool) -> Result<Self, Error> {
        let mut last_err = None;
        let candidates = std::iter::once(index).chain((0..PROBE_INDICES).filter(|i| *i != index));
        for idx in candidates {
            match Self::open_at(idx, width, height) {
                Ok((cam, w, h)) => {
                    info!(index = idx, width = w, height = h, "camera initialized");
                    return Ok(Self { cam, width: w, height: h, mirror });
                }
                Err(e) => {
                    warn!(index = idx, error = %e, "camera did not open");
                    last_err = Some(e);
                }
            }
        }
        Err(last_err.unwrap_or_else(|| Error::CameraInit("no camera found".into())))
    }

    fn open_at(index: u32, width: u32, height: u32) -> Result<(Camera, u32, u32), Error> {
        let idx = CameraIndex::Index(index);

        // Preferred resolution first, then the fallbacks.
        let resolutions = std::iter::once((width, height))
            .chain(FALLBACK_RESOLUTIONS.into_iter().filter(|r| *r != (width, height)));

        let mut last_err = String::from("no resolution accepted");
        for (w, h) in resolutions {
            let fmt = CameraFormat::new(
                Resolution::new(w, h),
                FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
                30,                // target FPS
            );
            let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

            // This might fail if no device exists or the format is refused.
            let mut cam = match Camera::new(idx.clone(), req) {
                Ok(cam) => cam,
                Err(e) => {
                    last_err = format!("Create camera: {e}");
                    continue;
                }
            };
            if let Err(e) = cam.open_stream() {
                last_err = format!("Open stream: {e}");
                continue;
            }

            // The actual stream might choose a slightly different resolution.
            let actual = cam.resolution();
            if (actual.width(), actual.height()) != (w, h) {
                warn!(requested = ?(w, h), actual = ?(actual.width(), actual.height()), "camera chose another resolution");
            }
            return Ok((cam, actual.width(), actual.height()));
        }
        Err(Error::CameraInit(last_err))
    }

    /// Grab one frame from the camera and convert it to 0x00RRGGBB pixels.
    /// What you’ll see: after main.rs composites this buffer, the live
    /// camera image updates by one frame.
    pub fn next_frame(&mut self) -> Result<FrameBuffer, Error> {
        // 1) Pull a frame from the camera (this blocks until a new frame is ready).
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        // 2) Decode to an ImageBuffer<Rgb<u8>, Vec<u8>>.
        let rgb_img = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        // 3) Pack into u32 rows, flipping horizontally when mirroring.
        let (w, h) = rgb_img.dimensions();
        let mut out = vec![0u32; (w as usize) * (h as usize)];
        for (x, y, pixel) in rgb_img.enumerate_pixels() {
            let col = if self.mirror { w - 1 - x } else { x };
            let [r, g, b] = pixel.0;
            out[(y * w + col) as usize] = ((r as u32) << 16) | ((g as u32) << 8) | b as u32;
        }

        Ok(FrameBuffer {
            width: w as usize,
            height: h as usize,
            pixels: out,
        })
    }

    /// Report the actual resolution the camera is delivering.
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
