use super::core::Im;

/// 1 px wide line from `(x0, y0)` to `(x1, y1)` inclusive, clipped to the image.
pub fn draw_line<T: Copy, const N_CH: usize>(
    im: &mut Im<T, N_CH>,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: [T; N_CH],
) {
    // Bresenham's line algorithm
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let mut x = x0;
    let mut y = y0;

    loop {
        im.set_px(x, y, color);
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

/// Circle outline of the given `thickness` centred on `(cx, cy)`.
/// A `thickness <= 0` fills the disc instead.
pub fn draw_circle<T: Copy, const N_CH: usize>(
    im: &mut Im<T, N_CH>,
    cx: i32,
    cy: i32,
    radius: i32,
    thickness: i32,
    color: [T; N_CH],
) {
    if radius < 0 {
        return;
    }

    let (r_in, r_out) = if thickness <= 0 {
        (0.0, radius as f32 + 0.5)
    } else {
        let half = thickness as f32 / 2.0;
        ((radius as f32 - half).max(0.0), radius as f32 + half)
    };
    let r_in2 = r_in * r_in;
    let r_out2 = r_out * r_out;

    let reach = r_out.ceil() as i32;
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let d2 = (dx * dx + dy * dy) as f32;
            let inside = if thickness <= 0 {
                d2 <= r_out2
            } else {
                d2 >= r_in2 && d2 <= r_out2
            };
            if inside {
                im.set_px(cx + dx, cy + dy, color);
            }
        }
    }
}
