// Window + on-screen overlays.
// Visual effects provided here:
// 1) A window that shows the camera image with the canvas blended over it.
// 2) Cursor crosshair + fading trail, eraser ring and the pending-shape preview.
// 3) A tiny 5x7 bitmap font for the status panel and hints.

use gesture_board::canvas::CanvasEngine;
use gesture_board::raster::{self, put_pixel};
use gesture_board::shape::ShapePreview;
use gesture_board::types::{channels, rgb, Color};
use gesture_board::{Error, FrameBuffer, GestureLabel, Point};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

/// Keyboard actions the app understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Color(usize),
    BrushUp,
    BrushDown,
    CycleShape,
    CompleteShape,
    Undo,
    Redo,
    Clear,
    Save,
    ToggleTrail,
    Quit,
}

/// Map one key press onto an action.
pub fn action_for(key: Key) -> Option<Action> {
    let action = match key {
        Key::Key1 => Action::Color(0),
        Key::Key2 => Action::Color(1),
        Key::Key3 => Action::Color(2),
        Key::Key4 => Action::Color(3),
        Key::Key5 => Action::Color(4),
        Key::Key6 => Action::Color(5),
        Key::Key7 => Action::Color(6),
        Key::Key8 => Action::Color(7),
        Key::Minus | Key::NumPadMinus => Action::BrushDown,
        Key::Equal | Key::NumPadPlus => Action::BrushUp,
        Key::Space => Action::CycleShape,
        Key::Enter | Key::NumPadEnter => Action::CompleteShape,
        Key::Z => Action::Undo,
        Key::X => Action::Redo,
        Key::C => Action::Clear,
        Key::S => Action::Save,
        Key::T => Action::ToggleTrail,
        Key::Q | Key::Escape => Action::Quit,
        _ => return None,
    };
    Some(action)
}

/// Mouse buttons held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons {
    pub left: bool,
    pub right: bool,
    pub middle: bool,
}

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window sized to the camera feed.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    /// Visual: the window immediately displays the new image.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Mouse position, or None while the pointer is outside the window.
    /// Visual: None means "no hand"; the cursor overlay disappears.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    pub fn buttons(&self) -> Buttons {
        Buttons {
            left: self.window.get_mouse_down(MouseButton::Left),
            right: self.window.get_mouse_down(MouseButton::Right),
            middle: self.window.get_mouse_down(MouseButton::Middle),
        }
    }

    /// Actions for keys pressed since the last frame (no auto-repeat).
    pub fn actions(&self) -> Vec<Action> {
        self.window
            .get_keys_pressed(KeyRepeat::No)
            .into_iter()
            .filter_map(action_for)
            .collect()
    }
}

/* ---------- Compositing ---------- */

/// screen = alpha·frame + (1−alpha)·canvas per channel.
/// Visual: ink shows through a slightly dimmed camera image.
pub fn composite(screen: &mut FrameBuffer, frame: &FrameBuffer, canvas: &FrameBuffer, alpha: f32) {
    let wf = (alpha.clamp(0.0, 1.0) * 256.0) as u32;
    let wc = 256 - wf;
    let mix = |a: u8, b: u8| ((a as u32 * wf + b as u32 * wc) >> 8) as u8;
    for ((out, &f), &c) in screen.pixels.iter_mut().zip(&frame.pixels).zip(&canvas.pixels) {
        let (fr, fg, fb_) = channels(f);
        let (cr, cg, cb) = channels(c);
        *out = rgb(mix(fr, cr), mix(fg, cg), mix(fb_, cb));
    }
}

/// Scale a colour's channels by `k` in [0, 1].
fn dim(color: Color, k: f32) -> Color {
    let (r, g, b) = channels(color);
    let s = |v: u8| (v as f32 * k) as u8;
    rgb(s(r), s(g), s(b))
}

pub fn gesture_color(g: GestureLabel) -> Color {
    match g {
        GestureLabel::Drawing => rgb(0, 255, 0),
        GestureLabel::PalmErase => rgb(255, 0, 0),
        GestureLabel::ShapeMode => rgb(0, 255, 255),
        GestureLabel::Pause | GestureLabel::None => rgb(255, 255, 255),
    }
}

/* ---------- Overlays ---------- */

/// Draw a small crosshair centered at (cx,cy) with a ring around it.
/// Visual: a “+” with a circle follows your fingertip.
pub fn draw_crosshair(fb: &mut FrameBuffer, c: Point, size: i32, color: Color) {
    raster::thick_line(fb, Point::new(c.x - size, c.y), Point::new(c.x + size, c.y), 2, color);
    raster::thick_line(fb, Point::new(c.x, c.y - size), Point::new(c.x, c.y + size), 2, color);
    raster::circle(fb, c, 8, 2, color);
}

/// Fading polyline through the recent stroke points, oldest faintest.
pub fn draw_trail(fb: &mut FrameBuffer, points: &[Point], color: Color) {
    let n = points.len();
    for (i, pair) in points.windows(2).enumerate() {
        let k = (i + 1) as f32 / n as f32;
        raster::thick_line(fb, pair[0], pair[1], 2, dim(color, k));
    }
}

/// Visual: red ring the size of the eraser and an "ERASING" tag above it.
pub fn draw_eraser_indicator(fb: &mut FrameBuffer, palm: Point, radius: u32) {
    let red = rgb(255, 0, 0);
    raster::circle(fb, palm, radius as i32, 3, red);
    draw_text_5x7(fb, palm.x - 20, palm.y - radius as i32 - 14, "ERASING", red);
}

/// Visual: the pending shape in the preview colour, 2 px wide, not yet on the canvas.
pub fn draw_shape_preview(fb: &mut FrameBuffer, canvas: &CanvasEngine, preview: &ShapePreview) {
    canvas.preview_outline(preview).draw(fb, 2, preview.color);
}

/// Filled rectangle, clipped.
fn fill_rect(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32, color: Color) {
    for yy in y..y + h {
        for xx in x..x + w {
            put_pixel(fb, xx, yy, color);
        }
    }
}

/// Swatches for the palette; the selected one gets a white frame.
pub fn draw_palette(fb: &mut FrameBuffer, canvas: &CanvasEngine, y: i32) {
    let selected = canvas.attributes.color_index();
    for (i, entry) in canvas.attributes.palette().iter().enumerate() {
        let x = 20 + i as i32 * 35;
        fill_rect(fb, x, y, 30, 20, entry.color);
        if i == selected {
            raster::rectangle(fb, Point::new(x - 2, y - 2), Point::new(x + 31, y + 21), 2, rgb(255, 255, 255));
        }
    }
}

/// Everything the status panel shows this frame.
pub struct Status<'a> {
    pub gesture: GestureLabel,
    pub canvas: &'a CanvasEngine,
    pub cursor: Option<Point>,
    pub fps: &'a str,
}

/// Visual: dark panel in the top-left with mode, colour, brush, shape, position, FPS, history.
pub fn draw_status_panel(fb: &mut FrameBuffer, status: &Status<'_>) {
    let (x, y) = (10, 10);
    fill_rect(fb, x, y, 230, 104, rgb(50, 50, 50));

    let attrs = &status.canvas.attributes;
    let history = status.canvas.history_info();
    let position = match status.cursor {
        Some(p) => format!("POS: ({}, {})", p.x, p.y),
        None => String::from("POS: NO HAND"),
    };
    let lines: [(String, Color); 7] = [
        (format!("MODE: {}", status.gesture.as_str()), gesture_color(status.gesture)),
        (format!("COLOR: {}", attrs.color_name()), attrs.color()),
        (format!("BRUSH: {}", attrs.brush_thickness()), rgb(255, 255, 255)),
        (format!("SHAPE: {}", attrs.shape.as_str()), rgb(0, 255, 255)),
        (position, rgb(200, 200, 200)),
        (status.fps.to_owned(), rgb(200, 200, 200)),
        (
            format!(
                "HISTORY: {}/{} {}{}",
                history.depth,
                history.capacity,
                if history.can_undo { "Z" } else { "-" },
                if history.can_redo { "X" } else { "-" },
            ),
            rgb(200, 200, 200),
        ),
    ];
    for (i, (text, color)) in lines.iter().enumerate() {
        draw_text_5x7(fb, x + 8, y + 8 + i as i32 * 13, text, *color);
    }
}

/// Two hint lines along the bottom edge.
pub fn draw_instructions(fb: &mut FrameBuffer) {
    let h = fb.height as i32;
    let grey = rgb(200, 200, 200);
    draw_text_5x7(fb, 10, h - 30, "LMB=DRAW | RMB=ERASE | MMB=SHAPE | NO BUTTON=PAUSE", grey);
    draw_text_5x7(fb, 10, h - 16, "1-8 COLOR | -/+ BRUSH | SPACE SHAPE | ENTER PLACE | Z/X UNDO/REDO | C CLEAR | S SAVE | T TRAIL", grey);
}

/* ---------- 5x7 bitmap font (uppercase ASCII, digits, HUD punctuation) ---------- */

/// Return a 5x7 glyph bitmap; lowercase maps to uppercase.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        // Punctuation used by the HUD
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        ',' => g!(0b00000,0b00000,0b00000,0b00000,0b00110,0b00100,0b01000),
        '/' => g!(0b00001,0b00010,0b00010,0b00100,0b01000,0b01000,0b10000),
        '(' => g!(0b00010,0b00100,0b01000,0b01000,0b01000,0b00100,0b00010),
        ')' => g!(0b01000,0b00100,0b00010,0b00010,0b00010,0b00100,0b01000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '+' => g!(0b00000,0b00100,0b00100,0b11111,0b00100,0b00100,0b00000),
        '=' => g!(0b00000,0b00000,0b11111,0b00000,0b11111,0b00000,0b00000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y).
/// Visual: a tiny glyph appears with a 1-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: Color) {
    let Some(rows) = glyph5x7(ch) else { return };
    // Shadow pass first, then the glyph on top.
    for (dx, dy, c) in [(1, 1, 0x00000000), (0, 0, color)] {
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx + dx, y + ry as i32 + dy, c);
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs.
/// Visual: a compact HUD string appears; each glyph is 5x7 with 1-pixel spacing.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: Color) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hud_characters_all_have_glyphs() {
        for ch in "MODE: PALM ERASE | HISTORY: 10/10 Z- POS: (-3, 42) FPS: 29.9 +=".chars() {
            assert!(glyph5x7(ch).is_some(), "missing glyph for {ch:?}");
        }
        assert_eq!(glyph5x7('g'), glyph5x7('G'));
    }

    #[test]
    fn composite_weights_frame_and_canvas() {
        let frame = FrameBuffer::filled(1, 1, rgb(200, 200, 200));
        let canvas = FrameBuffer::filled(1, 1, rgb(0, 255, 0));
        let mut screen = FrameBuffer::filled(1, 1, 0);
        composite(&mut screen, &frame, &canvas, 1.0);
        assert_eq!(screen.pixels[0], rgb(200, 200, 200));
        composite(&mut screen, &frame, &canvas, 0.0);
        assert_eq!(screen.pixels[0], rgb(0, 255, 0));
        composite(&mut screen, &frame, &canvas, 0.5);
        assert_eq!(channels(screen.pixels[0]), (100, 227, 100));
    }

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(action_for(Key::Key3), Some(Action::Color(2)));
        assert_eq!(action_for(Key::Z), Some(Action::Undo));
        assert_eq!(action_for(Key::Enter), Some(Action::CompleteShape));
        assert_eq!(action_for(Key::F1), None);
    }
}
