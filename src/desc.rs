use serde::Deserialize;

use crate::march::InterpMode;
use crate::pipeline::TraceCfg;
use crate::stitch::NeighborLookup;

// JSON job descriptor for a trace run. Parsed once, converted to the
// per-invocation `TraceCfg`; callers never mix conventions mid-pipeline.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpDesc {
    Value,
    Ratio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupDesc {
    Linear,
    Indexed,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TraceDesc {
    pub version: u32,
    pub threshold: f32,
    #[serde(default = "default_interp")]
    pub interp: InterpDesc,
    #[serde(default = "default_lookup")]
    pub lookup: LookupDesc,
    /// Build the field over a 1-pixel padded copy of the source.
    #[serde(default)]
    pub pad: bool,
    /// Fill value for the padded border.
    #[serde(default)]
    pub pad_fill: u8,
    #[serde(default = "default_poly_scale")]
    pub poly_scale: i64,
    #[serde(default)]
    pub max_loops: Option<usize>,
    /// RGBA tag stamped on emitted segments.
    #[serde(default)]
    pub tag: u32,
}

fn default_interp() -> InterpDesc {
    InterpDesc::Value
}

fn default_lookup() -> LookupDesc {
    LookupDesc::Indexed
}

fn default_poly_scale() -> i64 {
    1000
}

pub fn parse_trace_json(json_text: &str) -> Result<TraceDesc, serde_json::Error> {
    serde_json::from_str(json_text)
}

impl TraceDesc {
    pub fn to_cfg(&self) -> TraceCfg {
        TraceCfg {
            threshold: self.threshold,
            interp: match self.interp {
                InterpDesc::Value => InterpMode::Value,
                InterpDesc::Ratio => InterpMode::ChannelRatio,
            },
            tag: self.tag,
            lookup: match self.lookup {
                LookupDesc::Linear => NeighborLookup::LinearScan,
                LookupDesc::Indexed => NeighborLookup::EndpointIndex,
            },
            max_loops: self.max_loops,
            poly_scale: self.poly_scale,
        }
    }
}
