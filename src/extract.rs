use log::debug;

use crate::error::{HandError, HandResult};
use crate::features::HandRegion;
use crate::geometry::{Geometry, NativeGeometry};
use crate::hull::MIN_DEFECT_HULL_LEN;
use crate::im::RGBIm;
use crate::rank::select_top_n;
use crate::trace::ChainApprox;

/// Per-frame contour → hull → defect extraction.
#[derive(Clone, Debug, Default)]
pub struct HandPropertyExtractor<G = NativeGeometry> {
    geom: G,
}

impl HandPropertyExtractor {
    pub fn native(chain_approx: ChainApprox) -> Self {
        Self::new(NativeGeometry::new(chain_approx))
    }
}

impl<G: Geometry> HandPropertyExtractor<G> {
    pub fn new(geom: G) -> Self {
        Self { geom }
    }

    pub fn geometry(&self) -> &G {
        &self.geom
    }

    /// Regions for the `top_n` largest contours of `frame`, largest first.
    ///
    /// Regions whose index hull has fewer than four vertices get no defects.
    pub fn extract(&self, frame: &RGBIm, top_n: usize) -> HandResult<Vec<HandRegion>> {
        if top_n == 0 {
            return Err(HandError::invalid("top_n must be at least 1"));
        }

        let lum = self.geom.to_intensity(frame)?;
        // The hierarchy is not needed, every border competes on area.
        let traced = self.geom.find_contours(&lum)?;
        debug!(
            "traced {} contours ({} holes) in {}x{} frame",
            traced.contours.len(),
            traced.hierarchy.iter().filter(|l| l.is_hole).count(),
            frame.w,
            frame.h
        );

        let contours = select_top_n(&self.geom, traced.contours, top_n)?;

        let mut regions = Vec::with_capacity(contours.len());
        for contour in contours {
            let hull = self.geom.convex_hull_points(&contour);
            let hull_indices = self.geom.convex_hull_indices(&contour);

            let defects = if hull_indices.len() >= MIN_DEFECT_HULL_LEN {
                self.geom.convexity_defects(&contour, &hull_indices)?
            } else {
                Vec::new()
            };

            debug!(
                "region {}: {} points, hull {}, {} raw defects",
                regions.len(),
                contour.len(),
                hull_indices.len(),
                defects.len()
            );
            regions.push(HandRegion { contour, hull, hull_indices, defects });
        }

        Ok(regions)
    }
}
