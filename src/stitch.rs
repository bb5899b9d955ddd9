// LoopStitcher: reassemble the unordered segment bag into ordered point
// chains by matching endpoints with exact floating-point equality.
//
// Segments are addressed by index with a parallel visited mask; every
// segment is consumed into exactly one loop. Two neighbor-lookup strategies
// produce identical loops on well-formed (non-branching) contours:
//
//   - LinearScan: O(n^2) rescan of the unvisited tail. Reference/oracle.
//   - EndpointIndex: hash index from endpoint bit patterns to the segment
//     indices touching that point. The production path for large fields.

use std::collections::HashMap;

use crate::march::{Fv2, Segment};

/// One stitched chain. `closed` is true when the chain returned to its
/// starting point (the repeated closing point is kept in `points`, matching
/// the raw chain walk).
#[derive(Clone, Debug, PartialEq)]
pub struct Loop {
    pub points: Vec<Fv2>,
    pub closed: bool,
    /// Tag of the first segment consumed into this loop.
    pub tag: u32,
}

impl Loop {
    /// Number of segments consumed into this chain.
    pub fn seg_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NeighborLookup {
    LinearScan,
    EndpointIndex,
}

#[derive(Clone, Copy, Debug)]
pub struct StitchOpts {
    pub lookup: NeighborLookup,
    /// Stop after this many loops have been emitted (partial results for
    /// callers that only need the first few chains).
    pub max_loops: Option<usize>,
}

impl Default for StitchOpts {
    fn default() -> Self {
        Self {
            lookup: NeighborLookup::EndpointIndex,
            max_loops: None,
        }
    }
}

// Exact-equality hash key. NaN never occurs here (interpolation is guarded),
// and 0.0/-0.0 have distinct bit patterns, which is exactly the "no epsilon"
// contract: only bit-identical endpoints connect.
#[inline]
fn point_key(p: Fv2) -> (u32, u32) {
    (p.x.to_bits(), p.y.to_bits())
}

// Segment endpoint "other than" the one matched at `at`. Returns None when
// neither endpoint equals `at`.
#[inline]
fn other_end(seg: &Segment, at: Fv2) -> Option<Fv2> {
    if seg.a == at {
        Some(seg.b)
    } else if seg.b == at {
        Some(seg.a)
    } else {
        None
    }
}

/// Stitch all segments into maximal chains. Every input segment appears in
/// exactly one returned loop (unless `max_loops` cuts the run short).
pub fn stitch_loops(segments: &[Segment], opts: &StitchOpts) -> Vec<Loop> {
    let index = match opts.lookup {
        NeighborLookup::LinearScan => None,
        NeighborLookup::EndpointIndex => {
            let mut index: HashMap<(u32, u32), Vec<usize>> = HashMap::new();
            for (i, seg) in segments.iter().enumerate() {
                index.entry(point_key(seg.a)).or_default().push(i);
                index.entry(point_key(seg.b)).or_default().push(i);
            }
            Some(index)
        }
    };

    let mut visited = vec![false; segments.len()];
    let mut loops: Vec<Loop> = Vec::new();

    for start in 0..segments.len() {
        if visited[start] {
            continue;
        }
        if let Some(cap) = opts.max_loops {
            if loops.len() >= cap {
                break;
            }
        }

        visited[start] = true;
        let seg = &segments[start];
        let first = seg.a;
        let mut points = vec![seg.a, seg.b];
        let mut connection = seg.b;

        loop {
            let next = match &index {
                None => {
                    // Naive rescan of every unvisited segment.
                    let mut found = None;
                    for (i, cand) in segments.iter().enumerate() {
                        if visited[i] {
                            continue;
                        }
                        if let Some(far) = other_end(cand, connection) {
                            found = Some((i, far));
                            break;
                        }
                    }
                    found
                }
                Some(index) => {
                    // Only segments touching the current connection point.
                    let mut found = None;
                    if let Some(candidates) = index.get(&point_key(connection)) {
                        for &i in candidates {
                            if visited[i] {
                                continue;
                            }
                            if let Some(far) = other_end(&segments[i], connection) {
                                found = Some((i, far));
                                break;
                            }
                        }
                    }
                    found
                }
            };

            match next {
                Some((i, far)) => {
                    visited[i] = true;
                    points.push(far);
                    connection = far;
                }
                None => break,
            }
        }

        let closed = points.len() > 2 && *points.last().unwrap() == first;
        loops.push(Loop {
            points,
            closed,
            tag: seg.tag,
        });
    }

    loops
}
