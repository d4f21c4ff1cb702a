// Library crate root.
//
// The hand feature pipeline is used both by the CLI demo (src/main.rs) and as a library by
// capture/display applications.

pub mod error;
pub mod features;
pub mod config;
pub mod im;
pub mod trace;
pub mod hull;
pub mod geometry;
pub mod rank;
pub mod extract;
pub mod angle_filter;
pub mod visualize;
pub mod pipeline;

pub use config::{HandConfig, parse_config_json};
pub use error::{HandError, HandResult};
pub use extract::HandPropertyExtractor;
pub use features::{Contour, ContourSet, ConvexityDefect, HandRegion, Iv2};
pub use geometry::{Geometry, NativeGeometry};
pub use pipeline::HandPipeline;

#[cfg(test)]
pub mod test_helpers;
