use log::{debug, warn};

use crate::angle_filter::filter_by_angle;
use crate::config::HandConfig;
use crate::error::HandResult;
use crate::extract::HandPropertyExtractor;
use crate::features::HandRegion;
use crate::geometry::{Geometry, NativeGeometry};
use crate::im::RGBIm;
use crate::visualize::render_defects;

/// Extraction followed by angle filtering, configured once and run per frame.
#[derive(Clone, Debug)]
pub struct HandPipeline<G = NativeGeometry> {
    config: HandConfig,
    extractor: HandPropertyExtractor<G>,
}

impl HandPipeline<NativeGeometry> {
    pub fn from_config(config: HandConfig) -> Self {
        Self::with_geometry(config, NativeGeometry::new(config.chain_approx))
    }
}

impl<G: Geometry> HandPipeline<G> {
    pub fn with_geometry(config: HandConfig, geom: G) -> Self {
        Self {
            config,
            extractor: HandPropertyExtractor::new(geom),
        }
    }

    pub fn config(&self) -> &HandConfig {
        &self.config
    }

    pub fn geometry(&self) -> &G {
        self.extractor.geometry()
    }

    /// Regions for `frame` with only the finger-gap-like defects left.
    pub fn process(&self, frame: &RGBIm) -> HandResult<Vec<HandRegion>> {
        let mut regions = self.extractor.extract(frame, self.config.top_n)?;
        let raw: usize = regions.iter().map(|r| r.defects.len()).sum();
        filter_by_angle(&mut regions, self.config.angle_threshold)?;
        let kept: usize = regions.iter().map(|r| r.defects.len()).sum();
        debug!("{} regions, kept {kept} of {raw} defects", regions.len());
        Ok(regions)
    }

    /// Like `process`, but a failed frame just yields no regions.
    pub fn process_or_empty(&self, frame: &RGBIm) -> Vec<HandRegion> {
        self.process(frame).unwrap_or_else(|err| {
            warn!("no hand features this frame: {err}");
            Vec::new()
        })
    }

    /// Defect overlay sized like `frame`.
    pub fn render(&self, frame: &RGBIm, regions: &[HandRegion]) -> HandResult<RGBIm> {
        render_defects(
            self.extractor.geometry(),
            (frame.w, frame.h),
            regions,
            self.config.min_defect_depth,
        )
    }
}
