use serde::Serialize;

use crate::error::{HandError, HandResult};

/// Convexity defect depths are fixed point with this many units per pixel.
pub const DEPTH_FIXED_POINT_SCALE: i32 = 256;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Iv2 {
    pub x: i32,
    pub y: i32,
}

impl Iv2 {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Traced boundary of one connected region. Point order is the traversal order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Contour {
    pub points: Vec<Iv2>,
}

impl Contour {
    pub fn new(points: Vec<Iv2>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, i: usize) -> HandResult<Iv2> {
        self.points.get(i).copied().ok_or_else(|| {
            HandError::invalid(format!(
                "point index {i} out of range for contour of {} points",
                self.points.len()
            ))
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ContourLink {
    /// Index into the owning `ContourSet`.
    pub parent: Option<usize>,
    pub is_hole: bool,
}

/// Every contour found in one frame, in detection order, with the parallel hierarchy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContourSet {
    pub contours: Vec<Contour>,
    pub hierarchy: Vec<ContourLink>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ConvexityDefect {
    pub start: usize,
    pub end: usize,
    pub far: usize,
    /// Depth in 1/256 px.
    pub raw_depth: i32,
}

impl ConvexityDefect {
    pub fn depth(&self) -> f32 {
        self.raw_depth as f32 / DEPTH_FIXED_POINT_SCALE as f32
    }
}

/// One retained contour with everything derived from it.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct HandRegion {
    pub contour: Contour,
    pub hull: Vec<Iv2>,
    /// Same hull as `hull`, as indices into `contour.points`.
    pub hull_indices: Vec<usize>,
    pub defects: Vec<ConvexityDefect>,
}

impl HandRegion {
    /// Resolve `(start, far, end)` for a defect, failing if any index is outside the contour.
    pub fn defect_points(&self, defect: &ConvexityDefect) -> HandResult<(Iv2, Iv2, Iv2)> {
        defect_points(&self.contour, defect)
    }
}

pub fn defect_points(contour: &Contour, defect: &ConvexityDefect) -> HandResult<(Iv2, Iv2, Iv2)> {
    Ok((
        contour.point(defect.start)?,
        contour.point(defect.far)?,
        contour.point(defect.end)?,
    ))
}
