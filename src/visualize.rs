use crate::error::{HandError, HandResult};
use crate::features::HandRegion;
use crate::geometry::{Geometry, Rgb};
use crate::im::RGBIm;

pub const START_END_COLOR: Rgb = [0, 0, 255];
pub const START_FAR_COLOR: Rgb = [0, 255, 0];
pub const END_FAR_COLOR: Rgb = [255, 0, 0];
pub const FAR_MARKER_COLOR: Rgb = [255, 255, 255];
pub const FAR_MARKER_RADIUS: i32 = 4;
pub const FAR_MARKER_THICKNESS: i32 = 2;

/// Debug overlay of every defect deeper than `min_depth` pixels on a fresh black `(w, h)` image.
///
/// Each drawn defect gets its triangle (start–end blue, start–far green, end–far red) and a
/// white ring on the far point.
pub fn render_defects<G: Geometry + ?Sized>(
    geom: &G,
    (w, h): (usize, usize),
    regions: &[HandRegion],
    min_depth: f32,
) -> HandResult<RGBIm> {
    if w == 0 || h == 0 {
        return Err(HandError::invalid(format!("cannot render a {w}x{h} overlay")));
    }

    let mut im = RGBIm::new(w, h);
    for region in regions {
        for defect in &region.defects {
            if defect.depth() <= min_depth {
                continue;
            }
            let (start, far, end) = region.defect_points(defect)?;

            geom.draw_line(&mut im, start, end, START_END_COLOR);
            geom.draw_line(&mut im, start, far, START_FAR_COLOR);
            geom.draw_line(&mut im, end, far, END_FAR_COLOR);
            geom.draw_circle(
                &mut im,
                far,
                FAR_MARKER_RADIUS,
                FAR_MARKER_THICKNESS,
                FAR_MARKER_COLOR,
            );
        }
    }

    Ok(im)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MIN_DEFECT_DEPTH;
    use crate::features::{Contour, ConvexityDefect, Iv2};
    use crate::geometry::NativeGeometry;
    use crate::test_helpers::{CountingGeometry, count_color};

    // Square-ish contour with a 4 point hull and two notches on the bottom edge.
    fn two_notch_region() -> HandRegion {
        let contour = Contour::new(vec![
            Iv2::new(2, 2),   // 0
            Iv2::new(2, 40),  // 1
            Iv2::new(10, 40), // 2
            Iv2::new(14, 28), // 3 deep notch
            Iv2::new(18, 40), // 4
            Iv2::new(28, 40), // 5
            Iv2::new(32, 32), // 6 shallow notch
            Iv2::new(36, 40), // 7
            Iv2::new(40, 40), // 8
            Iv2::new(40, 2),  // 9
        ]);
        HandRegion {
            hull_indices: vec![0, 1, 8, 9],
            hull: vec![contour.points[0], contour.points[1], contour.points[8], contour.points[9]],
            defects: vec![
                ConvexityDefect { start: 2, end: 4, far: 3, raw_depth: 3000 },
                ConvexityDefect { start: 5, end: 7, far: 6, raw_depth: 2000 },
            ],
            contour,
        }
    }

    #[test]
    fn only_deep_defects_are_drawn() {
        let geom = CountingGeometry::default();
        let region = two_notch_region();
        let im = render_defects(&geom, (48, 48), &[region], DEFAULT_MIN_DEFECT_DEPTH).unwrap();

        assert_eq!(geom.line_calls.get(), 3);
        assert_eq!(geom.circle_calls.get(), 1);

        // Deep notch overlay present.
        assert_eq!(im.px(12, 40), Some(START_END_COLOR));
        assert_eq!(im.px(14, 24), Some(FAR_MARKER_COLOR));
        assert!(count_color(&im, START_FAR_COLOR) > 0);
        assert!(count_color(&im, END_FAR_COLOR) > 0);

        // Shallow notch left black.
        assert_eq!(im.px(30, 40), Some([0, 0, 0]));
        assert_eq!(im.px(32, 32), Some([0, 0, 0]));
    }

    #[test]
    fn depth_threshold_is_configurable_and_strict() {
        let geom = NativeGeometry::default();
        let region = two_notch_region();

        let all = render_defects(&geom, (48, 48), std::slice::from_ref(&region), 5.0).unwrap();
        assert_eq!(all.px(30, 40), Some(START_END_COLOR));

        // 3000 / 256 = 11.71875 exactly: not strictly greater.
        let none = render_defects(&geom, (48, 48), &[region], 11.71875).unwrap();
        assert!(none.arr.iter().all(|&v| v == 0));
    }

    #[test]
    fn no_regions_renders_blank_image_of_requested_size() {
        let im = render_defects(&NativeGeometry::default(), (7, 3), &[], 10.0).unwrap();
        assert_eq!((im.w, im.h), (7, 3));
        assert!(im.arr.iter().all(|&v| v == 0));
    }

    #[test]
    fn invalid_index_and_size_are_rejected() {
        let geom = NativeGeometry::default();
        let mut region = two_notch_region();
        region.defects[0].far = 99;
        assert!(matches!(
            render_defects(&geom, (48, 48), &[region], 10.0),
            Err(HandError::InvalidArgument(_))
        ));
        assert!(matches!(
            render_defects(&geom, (0, 48), &[], 10.0),
            Err(HandError::InvalidArgument(_))
        ));
    }
}
