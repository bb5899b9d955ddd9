// Marching-squares sweep: per-cell classification, saddle resolution,
// sub-pixel edge interpolation, and segment emission from a fixed case table.
//
// Corner layout for the cell at (x, y), matching the bit order of the
// configuration code (p0 is the high bit):
//
//   p0 (x, y+1) ---- p1 (x+1, y+1)
//    |                 |
//   p3 (x, y)   ---- p2 (x+1, y)
//
// A corner is "inside" when its sample is strictly greater than the
// threshold. Codes 0 and 15 are uniform cells and emit nothing.

use crate::field::{SampleField, Scalar};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fv2 {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub a: Fv2,
    pub b: Fv2,
    /// Caller-supplied tag (e.g. an RGBA color) for downstream rendering.
    /// Not used by the geometry itself.
    pub tag: u32,
}

/// Sub-pixel placement convention for crossing points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterpMode {
    /// `t` from the two scored sample values against the threshold.
    Value,
    /// `t` from the captured 8-bit ratio channel against the fixed 127.5
    /// midpoint, plus a 0.5 pixel-center offset on both axes.
    ChannelRatio,
}

#[derive(Clone, Copy, Debug)]
pub struct MarchCfg {
    pub threshold: f32,
    pub interp: InterpMode,
    pub tag: u32,
}

impl Default for MarchCfg {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            interp: InterpMode::Value,
            tag: 0,
        }
    }
}

// Cell edges. Each edge runs between two of the four corners; the order
// fixes the (v0, v1) direction used by the interpolator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Left,   // p3 -> p0
    Top,    // p0 -> p1
    Right,  // p2 -> p1
    Bottom, // p3 -> p2
}

// Corner grid offsets in p0..p3 order.
const CORNER_OFFS: [(usize, usize); 4] = [(0, 1), (1, 1), (1, 0), (0, 0)];

// Corner index pairs (into p0..p3) for each edge.
const fn edge_corners(edge: Edge) -> (usize, usize) {
    match edge {
        Edge::Left => (3, 0),
        Edge::Top => (0, 1),
        Edge::Right => (2, 1),
        Edge::Bottom => (3, 2),
    }
}

// Configuration code -> segment edge pairs.
//
// Single-corner and three-corner codes hug the lone odd corner; two-corner
// codes cut straight across. The two saddle entries (5 and 10) hold the
// connected-diagonal interpretation; `resolve_saddle` swaps them when the
// center estimate reads outside, which yields the separated pair.
const CASE_EDGES: [&[(Edge, Edge)]; 16] = [
    &[],                                              // 0
    &[(Edge::Left, Edge::Bottom)],                    // 1: p3
    &[(Edge::Bottom, Edge::Right)],                   // 2: p2
    &[(Edge::Left, Edge::Right)],                     // 3: p2 p3
    &[(Edge::Top, Edge::Right)],                      // 4: p1
    &[(Edge::Left, Edge::Top), (Edge::Bottom, Edge::Right)], // 5: p1 p3 (saddle)
    &[(Edge::Top, Edge::Bottom)],                     // 6: p1 p2
    &[(Edge::Left, Edge::Top)],                       // 7: p1 p2 p3
    &[(Edge::Left, Edge::Top)],                       // 8: p0
    &[(Edge::Top, Edge::Bottom)],                     // 9: p0 p3
    &[(Edge::Left, Edge::Bottom), (Edge::Top, Edge::Right)], // 10: p0 p2 (saddle)
    &[(Edge::Top, Edge::Right)],                      // 11: p0 p2 p3
    &[(Edge::Left, Edge::Right)],                     // 12: p0 p1
    &[(Edge::Bottom, Edge::Right)],                   // 13: p0 p1 p3
    &[(Edge::Left, Edge::Bottom)],                    // 14: p0 p1 p2
    &[],                                              // 15
];

/// Corner samples of the cell at (x, y), in p0..p3 order.
#[inline]
pub fn cell_corners<T: Scalar>(field: &SampleField<T>, x: usize, y: usize) -> [f32; 4] {
    [
        field.sample_f32(x, y + 1),
        field.sample_f32(x + 1, y + 1),
        field.sample_f32(x + 1, y),
        field.sample_f32(x, y),
    ]
}

/// 4-bit configuration code, p0 in the high bit. Strict `>` throughout.
#[inline]
pub fn classify_cell(corners: [f32; 4], threshold: f32) -> u8 {
    let mut code = (corners[0] > threshold) as u8;
    code = (code << 1) | (corners[1] > threshold) as u8;
    code = (code << 1) | (corners[2] > threshold) as u8;
    (code << 1) | (corners[3] > threshold) as u8
}

/// Reassign the two ambiguous saddle codes from the corner average.
///
/// When the center estimate reads outside (`avg <= threshold`, the
/// complement of the strict corner test) the diagonal connection flips:
/// 5 -> 10 and 10 -> 5. All other codes pass through.
#[inline]
pub fn resolve_saddle(code: u8, corners: [f32; 4], threshold: f32) -> u8 {
    if code != 5 && code != 10 {
        return code;
    }
    let avg = (corners[0] + corners[1] + corners[2] + corners[3]) / 4.0;
    if avg <= threshold { 15 - code } else { code }
}

/// Sub-pixel crossing point on one edge of the cell at (cx, cy).
///
/// A zero denominator (flat edge exactly at threshold) is guarded to
/// `t = 0`, placing the point at the edge's first endpoint; `t` is clamped
/// to [0, 1] in all cases.
pub fn interp_edge<T: Scalar>(
    field: &SampleField<T>,
    cx: usize,
    cy: usize,
    edge: Edge,
    cfg: &MarchCfg,
) -> Fv2 {
    let (ci0, ci1) = edge_corners(edge);
    let (ox0, oy0) = CORNER_OFFS[ci0];
    let (ox1, oy1) = CORNER_OFFS[ci1];
    let (x0, y0) = (cx + ox0, cy + oy0);
    let (x1, y1) = (cx + ox1, cy + oy1);

    let (v0, v1, iso, center_off) = match cfg.interp {
        InterpMode::Value => (
            field.sample_f32(x0, y0),
            field.sample_f32(x1, y1),
            cfg.threshold,
            0.0,
        ),
        InterpMode::ChannelRatio => (
            field.ratio_at(x0, y0) as f32,
            field.ratio_at(x1, y1) as f32,
            127.5,
            0.5,
        ),
    };

    let denom = v1 - v0;
    let t = if denom == 0.0 {
        0.0
    } else {
        ((iso - v0) / denom).clamp(0.0, 1.0)
    };

    Fv2 {
        x: x0 as f32 + (x1 as f32 - x0 as f32) * t + center_off,
        y: y0 as f32 + (y1 as f32 - y0 as f32) * t + center_off,
    }
}

/// Full row-major sweep over all cells, collecting iso-boundary segments.
///
/// Coordinates are reported in the caller's original pixel space: when the
/// field was built padded, the padding offset is subtracted here, exactly
/// once. Grids with fewer than 2 samples on either axis have no cells and
/// produce an empty set.
pub fn march_segments<T: Scalar>(field: &SampleField<T>, cfg: &MarchCfg) -> Vec<Segment> {
    if field.w() < 2 || field.h() < 2 {
        return Vec::new();
    }
    if cfg.interp == InterpMode::ChannelRatio {
        assert!(
            field.has_ratio(),
            "ChannelRatio interpolation needs a field built with a ratio channel"
        );
    }

    let off = field.pad() as f32;
    let mut segments: Vec<Segment> = Vec::new();

    for y in 0..field.h() - 1 {
        for x in 0..field.w() - 1 {
            let corners = cell_corners(field, x, y);
            let code = classify_cell(corners, cfg.threshold);
            if code == 0 || code == 15 {
                // Uniform cell: no boundary, and no interpolation work.
                continue;
            }
            let code = resolve_saddle(code, corners, cfg.threshold);

            for &(ea, eb) in CASE_EDGES[code as usize] {
                let a = interp_edge(field, x, y, ea, cfg);
                let b = interp_edge(field, x, y, eb, cfg);
                if a == b {
                    // A corner sample exactly at threshold clamps both
                    // crossings onto the same lattice point; a zero-length
                    // segment carries no boundary and would stitch into a
                    // bogus one-point chain.
                    continue;
                }
                segments.push(Segment {
                    a: Fv2 {
                        x: a.x - off,
                        y: a.y - off,
                    },
                    b: Fv2 {
                        x: b.x - off,
                        y: b.y - off,
                    },
                    tag: cfg.tag,
                });
            }
        }
    }

    segments
}
