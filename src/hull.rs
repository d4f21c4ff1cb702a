use clipper2::{One, Path, Point};

use crate::error::{HandError, HandResult};
use crate::features::{ConvexityDefect, DEPTH_FIXED_POINT_SCALE, Iv2};

pub type IntPoint = Point<One>;
pub type IntPath = Path<One>;

/// Defect extraction needs at least this many hull vertices.
pub const MIN_DEFECT_HULL_LEN: usize = 4;

fn path_from_points(points: &[Iv2]) -> IntPath {
    IntPath::new(
        points
            .iter()
            .map(|p| IntPoint::from_scaled(p.x as i64, p.y as i64))
            .collect(),
    )
}

/// Shoelace area of the closed polygon through `points`. The sign follows the winding.
pub fn signed_area(points: &[Iv2]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    path_from_points(points).signed_area()
}

#[inline]
fn cross(o: Iv2, a: Iv2, b: Iv2) -> i64 {
    (a.x - o.x) as i64 * (b.y - o.y) as i64 - (a.y - o.y) as i64 * (b.x - o.x) as i64
}

// Andrew's monotone chain. Returns indices into `points` in hull order, collinear points dropped.
fn hull_order(points: &[Iv2]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by_key(|&i| (points[i].x, points[i].y, i));
    order.dedup_by_key(|i| points[*i]);
    if order.len() < 3 {
        return order;
    }

    let mut hull: Vec<usize> = Vec::with_capacity(order.len() * 2);
    for &i in &order {
        while hull.len() >= 2
            && cross(points[hull[hull.len() - 2]], points[hull[hull.len() - 1]], points[i]) <= 0
        {
            hull.pop();
        }
        hull.push(i);
    }

    let lower_len = hull.len() + 1;
    for &i in order.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && cross(points[hull[hull.len() - 2]], points[hull[hull.len() - 1]], points[i]) <= 0
        {
            hull.pop();
        }
        hull.push(i);
    }

    // The upper chain ends where the lower one began.
    hull.pop();
    hull
}

/// Convex hull as points.
pub fn convex_hull_points(points: &[Iv2]) -> Vec<Iv2> {
    hull_order(points).into_iter().map(|i| points[i]).collect()
}

/// Convex hull as indices into `points`, ascending so it runs in contour order.
pub fn convex_hull_indices(points: &[Iv2]) -> Vec<usize> {
    let mut indices = hull_order(points);
    indices.sort_unstable();
    indices
}

/// Convexity defects of the closed contour `points` against its index-form hull.
///
/// For each hull edge the contour points strictly between its two vertices are scanned and the
/// one farthest from the edge becomes the defect's `far` point. Edges with nothing strictly
/// inside them produce no defect.
pub fn convexity_defects(
    points: &[Iv2],
    hull_indices: &[usize],
) -> HandResult<Vec<ConvexityDefect>> {
    let n = points.len();
    if let Some(&bad) = hull_indices.iter().find(|&&i| i >= n) {
        return Err(HandError::invalid(format!(
            "hull index {bad} out of range for contour of {n} points"
        )));
    }

    let mut hull = hull_indices.to_vec();
    hull.sort_unstable();
    hull.dedup();
    if hull.len() < MIN_DEFECT_HULL_LEN {
        return Err(HandError::invalid(format!(
            "convexity defects need at least {MIN_DEFECT_HULL_LEN} distinct hull indices, got {}",
            hull.len()
        )));
    }

    let mut defects = Vec::new();
    for (k, &start) in hull.iter().enumerate() {
        let end = hull[(k + 1) % hull.len()];
        let p0 = points[start];
        let p1 = points[end];

        let dx0 = (p1.x - p0.x) as f64;
        let dy0 = (p1.y - p0.y) as f64;
        let len = dx0.hypot(dy0);
        if len == 0.0 {
            continue;
        }
        let scale = 1.0 / len;

        let mut depth = 0.0_f64;
        let mut far = None;
        let mut j = (start + 1) % n;
        while j != end {
            let dx = (points[j].x - p0.x) as f64;
            let dy = (points[j].y - p0.y) as f64;
            let dist = (dx0 * dy - dy0 * dx).abs() * scale;
            if dist > depth {
                depth = dist;
                far = Some(j);
            }
            j = (j + 1) % n;
        }

        if let Some(far) = far {
            defects.push(ConvexityDefect {
                start,
                end,
                far,
                raw_depth: (depth * DEPTH_FIXED_POINT_SCALE as f64).round() as i32,
            });
        }
    }

    Ok(defects)
}
