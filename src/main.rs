// What you SEE:
// • Live (mirrored) camera is the backdrop; your drawing is blended over it.
// • Hold Left Mouse: draw with the index-finger cursor.
// • Hold Right Mouse: open-palm eraser. Middle Mouse: shape mode, Enter places the shape.
// • No button = paused fist. Moving out of the window = hand lost.
// • 1-8 colour, -/= brush, Space shape kind, Z/X undo/redo, C clear, S save, T trail, Q/ESC quit.

mod camera;
mod draw;
mod pointer;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use gesture_board::export::{self, AutoSaver};
use gesture_board::{Board, Config, Error, FrameBuffer, GestureLabel, Point};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use camera::CameraCapture;
use draw::{Action, Drawer, Status};

#[derive(Parser, Debug)]
#[command(name = "gesture-board", about = "Draw over your camera feed with hand gestures")]
struct Args {
    /// JSON config file; defaults are used for anything it leaves out.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Camera device index.
    #[arg(long, default_value_t = 0)]
    camera: u32,
    /// Requested capture width.
    #[arg(long, default_value_t = 1280)]
    width: u32,
    /// Requested capture height.
    #[arg(long, default_value_t = 720)]
    height: u32,
    /// Where `S` writes snapshots.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
    /// Show the camera unmirrored.
    #[arg(long)]
    no_mirror: bool,
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    /* --- Camera + window setup ---
       Visual: window opens with live camera feed. */
    let mirror = config.display.mirror && !args.no_mirror;
    let mut cam = CameraCapture::open(args.camera, args.width, args.height, mirror)?;
    let (w, h) = cam.resolution();
    let (w, h) = (w as usize, h as usize);
    let mut drawer = Drawer::new("Gesture Board", w, h)?;

    /* --- Board sized to the frame ---
       Visual: an empty black canvas; nothing is blended in until you draw. */
    let mut board = Board::new(&config, w, h)?;
    let mut auto_saver = config
        .auto_save
        .enabled
        .then(|| AutoSaver::new(&config.auto_save, Instant::now()));

    /* --- Reusable screen buffer ---
       Visual: this is the image you actually see each frame. */
    let mut screen = FrameBuffer::filled(w, h, 0);

    /* --- HUD / FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    info!(width = w, height = h, mirror, "gesture board ready");
    if let Some(saver) = &auto_saver {
        info!(dir = %saver.directory().display(), every = ?config.auto_save.interval(), "auto-save on");
    }

    /* ------------------------------ Main loop ------------------------------ */
    'frames: while drawer.is_open() {
        /* 1) Grab a fresh live frame. */
        let live = cam.next_frame()?;

        /* 2) The pointer plays the hand; the board runs one frame. */
        let hand = pointer::hand_from_pointer(drawer.mouse_pos(), drawer.buttons());
        let out = board.process(hand);

        /* 3) Keys */
        for action in drawer.actions() {
            match action {
                Action::Quit => break 'frames,
                Action::Color(i) => {
                    board.canvas_mut().attributes.set_color(i);
                }
                Action::BrushUp => {
                    board.canvas_mut().attributes.increase_brush_size();
                }
                Action::BrushDown => {
                    board.canvas_mut().attributes.decrease_brush_size();
                }
                Action::CycleShape => {
                    board.canvas_mut().attributes.cycle_shape();
                }
                Action::CompleteShape => {
                    board.complete_shape();
                }
                Action::Undo => {
                    board.canvas_mut().undo();
                }
                Action::Redo => {
                    board.canvas_mut().redo();
                }
                Action::Clear => board.canvas_mut().clear(),
                Action::Save => {
                    if let Err(e) = export::save_drawing(board.canvas().raster(), &args.output_dir) {
                        warn!(error = %e, "save failed");
                    }
                }
                Action::ToggleTrail => {
                    board.canvas_mut().toggle_trail();
                }
            }
        }

        /* 4) Auto-save on its own clock. */
        if let Some(saver) = auto_saver.as_mut() {
            if let Err(e) = saver.tick(Instant::now(), board.canvas().raster()) {
                warn!(error = %e, "auto-save failed");
            }
        }

        /* 5) Compose: camera + canvas, then overlays on top.
           Visual: ink over a slightly dimmed camera image. */
        let canvas = board.canvas();
        draw::composite(&mut screen, &live, canvas.raster(), config.display.blend_alpha);

        if canvas.show_trail() {
            let trail: Vec<Point> = canvas.trail().collect();
            draw::draw_trail(&mut screen, &trail, canvas.attributes.color());
        }
        if let Some(preview) = board.preview() {
            draw::draw_shape_preview(&mut screen, canvas, &preview);
        }
        match (board.gesture(), out.palm, board.cursor()) {
            (GestureLabel::PalmErase, Some(palm), _) => {
                draw::draw_eraser_indicator(&mut screen, palm, canvas.attributes.eraser_radius);
            }
            (gesture, _, Some(cursor)) => {
                draw::draw_crosshair(&mut screen, cursor, 10, draw::gesture_color(gesture));
            }
            _ => {}
        }

        /* 6) HUD */
        frames_this_second += 1;
        let since = last_fps_time.elapsed();
        if since >= Duration::from_secs(1) {
            let fps = frames_this_second as f32 / since.as_secs_f32();
            hud_fps_text = format!("FPS: {fps:.1}");
            info!(fps = f64::from(fps), "frame rate");
            frames_this_second = 0;
            last_fps_time = Instant::now();
        }
        draw::draw_status_panel(
            &mut screen,
            &Status { gesture: board.gesture(), canvas, cursor: board.cursor(), fps: &hud_fps_text },
        );
        draw::draw_palette(&mut screen, canvas, 124);
        draw::draw_instructions(&mut screen);

        /* 7) Present */
        drawer.present(&screen)?;
    }

    info!("bye");
    Ok(())
}
