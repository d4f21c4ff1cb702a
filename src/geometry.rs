//! The image and polygon primitives the hand pipeline is built on.
//!
//! Everything in `extract`, `rank` and `visualize` goes through [`Geometry`] so a backend can be
//! swapped (or instrumented in tests) without touching the pipeline.

use crate::error::{HandError, HandResult};
use crate::features::{Contour, ContourSet, ConvexityDefect, Iv2};
use crate::hull;
use crate::im::{Lum8Im, RGBIm, draw};
use crate::trace::{self, ChainApprox};

pub type Rgb = [u8; 3];

pub trait Geometry {
    /// Single channel intensity image from an RGB frame.
    fn to_intensity(&self, frame: &RGBIm) -> HandResult<Lum8Im>;

    /// Every border in a binary image (nonzero = foreground), with hierarchy.
    fn find_contours(&self, im: &Lum8Im) -> HandResult<ContourSet>;

    /// Enclosed area, always >= 0.
    fn contour_area(&self, contour: &Contour) -> f64;

    fn convex_hull_points(&self, contour: &Contour) -> Vec<Iv2>;

    fn convex_hull_indices(&self, contour: &Contour) -> Vec<usize>;

    /// Requires at least four valid hull indices.
    fn convexity_defects(
        &self,
        contour: &Contour,
        hull_indices: &[usize],
    ) -> HandResult<Vec<ConvexityDefect>>;

    fn draw_line(&self, im: &mut RGBIm, a: Iv2, b: Iv2, color: Rgb);

    /// Outline of `thickness` pixels, or a filled disc when `thickness <= 0`.
    fn draw_circle(&self, im: &mut RGBIm, center: Iv2, radius: i32, thickness: i32, color: Rgb);
}

/// In-crate implementation of [`Geometry`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NativeGeometry {
    pub chain_approx: ChainApprox,
}

impl NativeGeometry {
    pub fn new(chain_approx: ChainApprox) -> Self {
        Self { chain_approx }
    }
}

impl Geometry for NativeGeometry {
    fn to_intensity(&self, frame: &RGBIm) -> HandResult<Lum8Im> {
        if frame.is_empty() {
            return Err(HandError::geometry(format!(
                "cannot convert an empty {}x{} frame",
                frame.w, frame.h
            )));
        }
        if !frame.is_consistent() {
            return Err(HandError::geometry(format!(
                "frame buffer of {} bytes does not cover {}x{} RGB",
                frame.arr.len(),
                frame.w,
                frame.h
            )));
        }
        Ok(frame.to_lum8())
    }

    fn find_contours(&self, im: &Lum8Im) -> HandResult<ContourSet> {
        trace::find_contours(im, self.chain_approx)
    }

    fn contour_area(&self, contour: &Contour) -> f64 {
        hull::signed_area(&contour.points).abs()
    }

    fn convex_hull_points(&self, contour: &Contour) -> Vec<Iv2> {
        hull::convex_hull_points(&contour.points)
    }

    fn convex_hull_indices(&self, contour: &Contour) -> Vec<usize> {
        hull::convex_hull_indices(&contour.points)
    }

    fn convexity_defects(
        &self,
        contour: &Contour,
        hull_indices: &[usize],
    ) -> HandResult<Vec<ConvexityDefect>> {
        hull::convexity_defects(&contour.points, hull_indices)
    }

    fn draw_line(&self, im: &mut RGBIm, a: Iv2, b: Iv2, color: Rgb) {
        draw::draw_line(im, a.x, a.y, b.x, b.y, color);
    }

    fn draw_circle(&self, im: &mut RGBIm, center: Iv2, radius: i32, thickness: i32, color: Rgb) {
        draw::draw_circle(im, center.x, center.y, radius, thickness, color);
    }
}
