pub mod core;
#[allow(unused_imports)]
pub use self::core::{Im, Lum8Im, RGBAIm};

// Optional extras
// -----------------------------------------------------------------------------

#[cfg(feature = "im-io")]
pub mod io;
