pub mod core;
#[allow(unused_imports)]
pub use core::{Im, Lum8Im, MaskIm, RGBIm};

pub mod draw;
pub use draw::{draw_circle, draw_line};

// Optional extras
// -----------------------------------------------------------------------------

#[cfg(feature = "im-io")]
pub mod io;
