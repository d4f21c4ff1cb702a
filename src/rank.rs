use log::trace;

use crate::error::{HandError, HandResult};
use crate::features::Contour;
use crate::geometry::Geometry;

/// The `n` largest contours by area, largest first.
///
/// Repeated max scan over the remaining candidates. On equal areas the contour seen first
/// (detection order) wins. Fails when asked for more contours than there are.
pub fn select_top_n<G: Geometry + ?Sized>(
    geom: &G,
    contours: Vec<Contour>,
    n: usize,
) -> HandResult<Vec<Contour>> {
    if n > contours.len() {
        return Err(HandError::invalid(format!(
            "asked for the {n} largest contours but only {} were found",
            contours.len()
        )));
    }

    let mut remaining: Vec<(f64, Contour)> = contours
        .into_iter()
        .map(|c| (geom.contour_area(&c), c))
        .collect();

    let mut selected = Vec::with_capacity(n);
    for _ in 0..n {
        let mut best = 0;
        for (i, (area, _)) in remaining.iter().enumerate().skip(1) {
            if *area > remaining[best].0 {
                best = i;
            }
        }
        let (area, contour) = remaining.remove(best);
        trace!("rank {}: area {area:.1}, {} points", selected.len(), contour.len());
        selected.push(contour);
    }

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::Iv2;
    use crate::geometry::NativeGeometry;
    use crate::test_helpers::{CountingGeometry, rect_contour};

    fn areas(geom: &NativeGeometry, contours: &[Contour]) -> Vec<f64> {
        contours.iter().map(|c| geom.contour_area(c)).collect()
    }

    #[test]
    fn picks_two_largest_in_descending_order() {
        let geom = NativeGeometry::default();
        // 50, 400, 120
        let set = vec![
            rect_contour(0, 0, 5, 10),
            rect_contour(20, 0, 20, 20),
            rect_contour(50, 0, 10, 12),
        ];

        let top = select_top_n(&geom, set, 2).unwrap();
        assert_eq!(areas(&geom, &top), vec![400.0, 120.0]);
    }

    #[test]
    fn selected_dominate_unselected() {
        let geom = NativeGeometry::default();
        let set: Vec<Contour> = [7, 3, 9, 1, 9, 4, 6]
            .iter()
            .enumerate()
            .map(|(i, &side)| rect_contour(i as i32 * 20, 0, side, side))
            .collect();

        for n in 0..=set.len() {
            let top = select_top_n(&geom, set.clone(), n).unwrap();
            assert_eq!(top.len(), n);

            let top_areas = areas(&geom, &top);
            assert!(top_areas.windows(2).all(|w| w[0] >= w[1]));

            let rest: Vec<f64> = set
                .iter()
                .filter(|c| !top.contains(c))
                .map(|c| geom.contour_area(c))
                .collect();
            for a in &top_areas {
                assert!(rest.iter().all(|r| a >= r));
            }
        }
    }

    #[test]
    fn ties_keep_detection_order() {
        let geom = NativeGeometry::default();
        let first = rect_contour(0, 0, 4, 4);
        let second = rect_contour(10, 10, 4, 4);
        let top = select_top_n(&geom, vec![first.clone(), second.clone()], 2).unwrap();
        assert_eq!(top, vec![first, second]);
    }

    #[test]
    fn asking_for_too_many_fails() {
        let geom = CountingGeometry::default();
        let set = vec![rect_contour(0, 0, 2, 2), rect_contour(5, 5, 3, 3)];
        assert!(matches!(
            select_top_n(&geom, set, 3),
            Err(HandError::InvalidArgument(_))
        ));
        assert_eq!(geom.area_calls.get(), 0);
    }

    #[test]
    fn zero_selects_nothing() {
        let geom = NativeGeometry::default();
        let set = vec![Contour::new(vec![Iv2::new(0, 0)])];
        assert!(select_top_n(&geom, set, 0).unwrap().is_empty());
    }
}
