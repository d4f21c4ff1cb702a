use log::trace;

use crate::error::HandResult;
use crate::features::{Contour, ConvexityDefect, HandRegion, Iv2, defect_points};

/// Slope `dy / dx` of the chord from `a` to `b`.
///
/// Exactly `0.0` whenever either displacement is zero, so vertical chords never divide by zero.
/// This loses the difference between vertical and horizontal chords; the angle heuristic
/// accepts that.
///
/// The division is real-valued, not truncating integer division.
pub fn chord_slope(a: Iv2, b: Iv2) -> f32 {
    let dy = b.y - a.y;
    let dx = b.x - a.x;
    if dx == 0 || dy == 0 {
        0.0
    } else {
        dy as f32 / dx as f32
    }
}

/// The three chord slopes of a defect triangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChordSlopes {
    pub start_end: f32,
    pub start_far: f32,
    pub far_end: f32,
}

impl ChordSlopes {
    pub fn new(start: Iv2, far: Iv2, end: Iv2) -> Self {
        Self {
            start_end: chord_slope(start, end),
            start_far: chord_slope(start, far),
            far_end: chord_slope(far, end),
        }
    }

    /// `atan((m1 + m2) / (1 - m1 * m2))` with m1 = start–end and m2 = far–end, in radians.
    /// `start_far` does not take part.
    pub fn included_angle(&self) -> f32 {
        let m1 = self.start_end;
        let m2 = self.far_end;
        ((m1 + m2) / (1.0 - m1 * m2)).atan()
    }
}

/// Defects of one contour whose included angle is at most `angle_threshold`, in input order.
pub fn filter_defects(
    contour: &Contour,
    defects: &[ConvexityDefect],
    angle_threshold: f32,
) -> HandResult<Vec<ConvexityDefect>> {
    let mut kept = Vec::with_capacity(defects.len());
    for defect in defects {
        let (start, far, end) = defect_points(contour, defect)?;
        let slopes = ChordSlopes::new(start, far, end);
        let angle = slopes.included_angle();
        trace!("defect {defect:?}: {slopes:?} angle {angle:.3}");
        if angle <= angle_threshold {
            kept.push(*defect);
        }
    }
    Ok(kept)
}

/// Replace every region's defects with the ones passing `filter_defects`.
/// On error no region is modified.
pub fn filter_by_angle(regions: &mut [HandRegion], angle_threshold: f32) -> HandResult<()> {
    let filtered = regions
        .iter()
        .map(|r| filter_defects(&r.contour, &r.defects, angle_threshold))
        .collect::<HandResult<Vec<_>>>()?;

    for (region, defects) in regions.iter_mut().zip(filtered) {
        region.defects = defects;
    }
    Ok(())
}
