// End-to-end pipeline: SampleField -> marching sweep -> loop stitching ->
// fixed-point polygons.
//
// One `TraceCfg` drives a whole invocation. Threshold comparison, saddle
// resolution, and interpolation all read the same config, so a single run
// can never mix conventions.

use crate::field::{SampleField, Scalar};
use crate::march::{self, InterpMode, MarchCfg, Segment};
use crate::mpoly::MPoly;
use crate::stitch::{self, Loop, NeighborLookup, StitchOpts};

#[derive(Clone, Copy, Debug)]
pub struct TraceCfg {
    pub threshold: f32,
    pub interp: InterpMode,
    /// Tag stamped on every emitted segment (e.g. a render color).
    pub tag: u32,
    pub lookup: NeighborLookup,
    pub max_loops: Option<usize>,
    /// Fixed-point scale for polygon output (e.g. 1000 keeps 3 sub-pixel
    /// decimal digits).
    pub poly_scale: i64,
}

impl Default for TraceCfg {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            interp: InterpMode::Value,
            tag: 0,
            lookup: NeighborLookup::EndpointIndex,
            max_loops: None,
            poly_scale: 1000,
        }
    }
}

impl TraceCfg {
    fn march_cfg(&self) -> MarchCfg {
        MarchCfg {
            threshold: self.threshold,
            interp: self.interp,
            tag: self.tag,
        }
    }

    fn stitch_opts(&self) -> StitchOpts {
        StitchOpts {
            lookup: self.lookup,
            max_loops: self.max_loops,
        }
    }
}

/// Sweep only: the unordered segment bag in row-major scan order.
pub fn extract_segments<T: Scalar>(field: &SampleField<T>, cfg: &TraceCfg) -> Vec<Segment> {
    march::march_segments(field, &cfg.march_cfg())
}

/// Sweep + stitch: ordered point loops.
pub fn extract_loops<T: Scalar>(field: &SampleField<T>, cfg: &TraceCfg) -> Vec<Loop> {
    let segments = extract_segments(field, cfg);
    stitch::stitch_loops(&segments, &cfg.stitch_opts())
}

/// Full pipeline: fixed-point integer polygons for the clipper.
pub fn extract_polygons<T: Scalar>(field: &SampleField<T>, cfg: &TraceCfg) -> MPoly {
    let loops = extract_loops(field, cfg);
    MPoly::from_loops(&loops, cfg.poly_scale)
}
