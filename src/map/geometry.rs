use glam::DVec2;

use crate::braille::BrailleCanvas;
use crate::geo::point_in_rings;

/// Draw a line between two dot positions (Bresenham)
pub fn draw_line(canvas: &mut BrailleCanvas, from: DVec2, to: DVec2) {
    let (mut x, mut y) = (from.x.round() as i32, from.y.round() as i32);
    let (x1, y1) = (to.x.round() as i32, to.y.round() as i32);

    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = (x1 - x).signum();
    let sy = (y1 - y).signum();
    let mut err = dx + dy;

    loop {
        canvas.set_pixel(x, y);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Stroke every segment of a polyline, closing it when asked
pub fn draw_polyline(canvas: &mut BrailleCanvas, points: &[DVec2], closed: bool) {
    for w in points.windows(2) {
        draw_line(canvas, w[0], w[1]);
    }
    if closed && points.len() > 2 {
        draw_line(canvas, points[points.len() - 1], points[0]);
    }
}

/// Filled disc (city markers)
pub fn draw_disc(canvas: &mut BrailleCanvas, centre: DVec2, radius: i32) {
    let (cx, cy) = (centre.x.round() as i32, centre.y.round() as i32);
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                canvas.set_pixel(cx + dx, cy + dy);
            }
        }
    }
}

/// Stipple the inside of `rings`, keeping only dots that also fall inside
/// `clip`. Alternate dots are left off so overlapping bands stay readable.
pub fn stipple_polygon(canvas: &mut BrailleCanvas, rings: &[Vec<DVec2>], clip: &[Vec<DVec2>]) {
    let mut min = DVec2::splat(f64::INFINITY);
    let mut max = DVec2::splat(f64::NEG_INFINITY);
    for p in rings.iter().flatten() {
        min = min.min(*p);
        max = max.max(*p);
    }
    if !min.is_finite() || !max.is_finite() {
        return;
    }

    let x0 = min.x.floor().max(0.0) as i32;
    let y0 = min.y.floor().max(0.0) as i32;
    let x1 = max.x.ceil().min(canvas.pixel_width() as f64) as i32;
    let y1 = max.y.ceil().min(canvas.pixel_height() as f64) as i32;

    for y in y0..y1 {
        for x in x0..x1 {
            if (x + y) % 2 != 0 {
                continue;
            }
            let p = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
            if point_in_rings(p, rings) && point_in_rings(p, clip) {
                canvas.set_pixel(x, y);
            }
        }
    }
}
