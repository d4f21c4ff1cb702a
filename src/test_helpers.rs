use std::cell::Cell;

use crate::error::HandResult;
use crate::features::{Contour, ContourSet, ConvexityDefect, Iv2};
use crate::geometry::{Geometry, NativeGeometry, Rgb};
use crate::im::{Lum8Im, MaskIm, RGBIm};

/// `#` is foreground (255), anything else background. Leading/trailing blank lines and
/// indentation are ignored.
pub fn mask_from_ascii(grid: &str) -> MaskIm {
    let rows: Vec<&str> = grid
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let h = rows.len();
    assert!(h > 0, "grid must have at least one non-empty row");
    let w = rows[0].len();
    assert!(w > 0, "grid rows must be non-empty");
    for r in &rows {
        assert_eq!(r.len(), w, "all rows must have equal length");
    }

    let mut mask = MaskIm::new(w, h);
    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            mask.arr[y * mask.s + x] = if ch == '#' { 255 } else { 0 };
        }
    }
    mask
}

pub fn frame_from_ascii(grid: &str) -> RGBIm {
    mask_from_ascii(grid).to_rgb()
}

/// Axis aligned rectangle contour, `w * h` area.
pub fn rect_contour(x: i32, y: i32, w: i32, h: i32) -> Contour {
    Contour::new(vec![
        Iv2::new(x, y),
        Iv2::new(x, y + h),
        Iv2::new(x + w, y + h),
        Iv2::new(x + w, y),
    ])
}

pub fn count_color(im: &RGBIm, color: Rgb) -> usize {
    im.arr.chunks_exact(3).filter(|px| *px == &color[..]).count()
}

/// Wraps `NativeGeometry` and counts the calls the pipeline makes.
#[derive(Default)]
pub struct CountingGeometry {
    pub inner: NativeGeometry,
    pub area_calls: Cell<usize>,
    pub hull_point_calls: Cell<usize>,
    pub hull_index_calls: Cell<usize>,
    pub defect_calls: Cell<usize>,
    pub line_calls: Cell<usize>,
    pub circle_calls: Cell<usize>,
}

fn bump(c: &Cell<usize>) {
    c.set(c.get() + 1);
}

impl Geometry for CountingGeometry {
    fn to_intensity(&self, frame: &RGBIm) -> HandResult<Lum8Im> {
        self.inner.to_intensity(frame)
    }

    fn find_contours(&self, im: &Lum8Im) -> HandResult<ContourSet> {
        self.inner.find_contours(im)
    }

    fn contour_area(&self, contour: &Contour) -> f64 {
        bump(&self.area_calls);
        self.inner.contour_area(contour)
    }

    fn convex_hull_points(&self, contour: &Contour) -> Vec<Iv2> {
        bump(&self.hull_point_calls);
        self.inner.convex_hull_points(contour)
    }

    fn convex_hull_indices(&self, contour: &Contour) -> Vec<usize> {
        bump(&self.hull_index_calls);
        self.inner.convex_hull_indices(contour)
    }

    fn convexity_defects(
        &self,
        contour: &Contour,
        hull_indices: &[usize],
    ) -> HandResult<Vec<ConvexityDefect>> {
        bump(&self.defect_calls);
        self.inner.convexity_defects(contour, hull_indices)
    }

    fn draw_line(&self, im: &mut RGBIm, a: Iv2, b: Iv2, color: Rgb) {
        bump(&self.line_calls);
        self.inner.draw_line(im, a, b, color)
    }

    fn draw_circle(&self, im: &mut RGBIm, center: Iv2, radius: i32, thickness: i32, color: Rgb) {
        bump(&self.circle_calls);
        self.inner.draw_circle(im, center, radius, thickness, color)
    }
}
