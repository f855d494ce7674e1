// Software drawing primitives on a FrameBuffer.
// Every primitive clips: the visible part is drawn and pixels that fall
// off the buffer are dropped, so callers may pass any coordinates.

use crate::types::{Color, FrameBuffer, Point};

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
pub fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: Color) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Visit every Bresenham step from `a` to `b`, endpoints included.
fn walk_line(a: Point, b: Point, mut visit: impl FnMut(i32, i32)) {
    let (mut x0, mut y0) = (a.x, a.y);
    let dx = (b.x - x0).abs();
    let sx = if x0 < b.x { 1 } else { -1 };
    let dy = -(b.y - y0).abs();
    let sy = if y0 < b.y { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        visit(x0, y0);
        if x0 == b.x && y0 == b.y { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Cut segment a→b down to the part inside the buffer grown by `pad` pixels
/// (Liang–Barsky). None when the segment misses it entirely.
fn clip_segment(fb: &FrameBuffer, a: Point, b: Point, pad: i32) -> Option<(Point, Point)> {
    if fb.width == 0 || fb.height == 0 {
        return None;
    }
    let pad = f64::from(pad);
    let (x_min, y_min) = (-pad, -pad);
    let x_max = fb.width as f64 - 1.0 + pad;
    let y_max = fb.height as f64 - 1.0 + pad;

    let (x0, y0) = (f64::from(a.x), f64::from(a.y));
    let (dx, dy) = (f64::from(b.x) - x0, f64::from(b.y) - y0);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [(-dx, x0 - x_min), (dx, x_max - x0), (-dy, y0 - y_min), (dy, y_max - y0)] {
        if p == 0.0 {
            if q < 0.0 { return None; } // parallel and outside
            continue;
        }
        let t = q / p;
        if p < 0.0 { t0 = t0.max(t); } else { t1 = t1.min(t); }
        if t0 > t1 { return None; }
    }

    let at = |t: f64| Point::new((x0 + t * dx).round() as i32, (y0 + t * dy).round() as i32);
    // keep exact endpoints when nothing was cut
    let from = if t0 == 0.0 { a } else { at(t0) };
    let to = if t1 == 1.0 { b } else { at(t1) };
    Some((from, to))
}

/// 1-pixel line between `a` and `b`.
pub fn line(fb: &mut FrameBuffer, a: Point, b: Point, color: Color) {
    if let Some((a, b)) = clip_segment(fb, a, b, 0) {
        walk_line(a, b, |x, y| put_pixel(fb, x, y, color));
    }
}

/// Line with round caps, `thickness` pixels across.
pub fn thick_line(fb: &mut FrameBuffer, a: Point, b: Point, thickness: u32, color: Color) {
    if thickness <= 1 {
        line(fb, a, b, color);
        return;
    }
    let radius = (thickness / 2).max(1) as i32;
    if let Some((a, b)) = clip_segment(fb, a, b, radius) {
        walk_line(a, b, |x, y| fill_disc(fb, Point::new(x, y), radius, color));
    }
}

/// Solid disc; the bounding box is clipped before scanning.
pub fn fill_disc(fb: &mut FrameBuffer, center: Point, radius: i32, color: Color) {
    if radius < 0 || fb.width == 0 || fb.height == 0 {
        return;
    }
    let r2 = i64::from(radius) * i64::from(radius);
    let x_lo = center.x.saturating_sub(radius).max(0);
    let x_hi = center.x.saturating_add(radius).min(fb.width as i32 - 1);
    let y_lo = center.y.saturating_sub(radius).max(0);
    let y_hi = center.y.saturating_add(radius).min(fb.height as i32 - 1);
    for y in y_lo..=y_hi {
        let dy = i64::from(y) - i64::from(center.y);
        for x in x_lo..=x_hi {
            let dx = i64::from(x) - i64::from(center.x);
            if dx * dx + dy * dy <= r2 {
                fb.pixels[y as usize * fb.width + x as usize] = color;
            }
        }
    }
}

/// Circle outline `thickness` pixels wide, centred on the nominal radius.
pub fn circle(fb: &mut FrameBuffer, center: Point, radius: i32, thickness: u32, color: Color) {
    if radius < 0 || fb.width == 0 || fb.height == 0 {
        return;
    }
    let half = f64::from(thickness.max(1)) / 2.0;
    let inner = (f64::from(radius) - half).max(0.0);
    let outer = f64::from(radius) + half;
    let (inner2, outer2) = (inner * inner, outer * outer);

    let reach = outer.ceil() as i32;
    let x_lo = center.x.saturating_sub(reach).max(0);
    let x_hi = center.x.saturating_add(reach).min(fb.width as i32 - 1);
    let y_lo = center.y.saturating_sub(reach).max(0);
    let y_hi = center.y.saturating_add(reach).min(fb.height as i32 - 1);
    for y in y_lo..=y_hi {
        let dy = f64::from(y) - f64::from(center.y);
        for x in x_lo..=x_hi {
            let dx = f64::from(x) - f64::from(center.x);
            let d2 = dx * dx + dy * dy;
            if d2 >= inner2 && d2 < outer2 {
                fb.pixels[y as usize * fb.width + x as usize] = color;
            }
        }
    }
}

/// Axis-aligned rectangle outline with opposite corners `a` and `b`.
pub fn rectangle(fb: &mut FrameBuffer, a: Point, b: Point, thickness: u32, color: Color) {
    let (tl, tr) = (Point::new(a.x, a.y), Point::new(b.x, a.y));
    let (br, bl) = (Point::new(b.x, b.y), Point::new(a.x, b.y));
    for (from, to) in [(tl, tr), (tr, br), (br, bl), (bl, tl)] {
        thick_line(fb, from, to, thickness, color);
    }
}
