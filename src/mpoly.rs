// Fixed-point integer polygons for the external clipping/offsetting library.
//
// `MPoly::from_loops` is the final pipeline stage: stitched floating-point
// loops are scaled by an integer factor and truncated into clipper2's
// integer coordinate space. Inflate/simplify passthroughs are kept so
// downstream boolean/offset consumers work directly on the wrapper.

use clipper2::{EndType, JoinType, One, Path, Paths, Point};

use crate::stitch::Loop;

pub type IntPoint = Point<One>;
pub type IntPath = Path<One>;
pub type IntPaths = Paths<One>;

#[derive(Clone, Debug)]
pub struct MPoly {
    paths: IntPaths,
}

impl MPoly {
    pub fn new(paths: Vec<IntPath>) -> Self {
        Self {
            paths: IntPaths::new(paths),
        }
    }

    pub fn from_paths(paths: IntPaths) -> Self {
        Self { paths }
    }

    /// Convert stitched loops into integer paths. Each point is multiplied
    /// by `scale` and truncated. Closed loops drop their duplicated closing
    /// point; open chains are emitted as-is (clipper treats the ring as
    /// implicitly closed — see the open-chain note in DESIGN.md).
    ///
    /// Loops too small to form a ring (fewer than 3 distinct points) are
    /// skipped.
    pub fn from_loops(loops: &[Loop], scale: i64) -> Self {
        assert!(scale > 0, "polygon scale must be positive");

        let mut paths: Vec<IntPath> = Vec::with_capacity(loops.len());
        for lp in loops {
            let pts = if lp.closed {
                &lp.points[..lp.points.len() - 1]
            } else {
                &lp.points[..]
            };
            if pts.len() < 3 {
                continue;
            }

            let path: Vec<IntPoint> = pts
                .iter()
                .map(|p| {
                    IntPoint::from_scaled(
                        (p.x as f64 * scale as f64) as i64,
                        (p.y as f64 * scale as f64) as i64,
                    )
                })
                .collect();
            paths.push(IntPath::new(path));
        }

        Self::new(paths)
    }

    pub fn paths(&self) -> &IntPaths {
        &self.paths
    }

    pub fn into_paths(self) -> IntPaths {
        self.paths
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IntPath> {
        self.paths.iter()
    }

    pub fn inflate(&self, delta: f64, join: JoinType, end: EndType, miter_limit: f64) -> Self {
        Self {
            paths: self.paths.inflate(delta, join, end, miter_limit),
        }
    }

    pub fn simplify(&self, epsilon: f64, preserve_collinear: bool) -> Self {
        Self {
            paths: self.paths.simplify(epsilon, preserve_collinear),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::march::Fv2;

    fn lp(points: Vec<(f32, f32)>, closed: bool) -> Loop {
        Loop {
            points: points.into_iter().map(|(x, y)| Fv2 { x, y }).collect(),
            closed,
            tag: 0,
        }
    }

    #[test]
    fn from_loops_scales_and_truncates() {
        // 1.25 * 1000 = 1250 exactly; 0.3333.. truncates.
        let loops = vec![lp(
            vec![(0.0, 0.0), (1.25, 0.0), (1.25, 1.0), (0.0, 1.0), (0.0, 0.0)],
            true,
        )];
        let mpoly = MPoly::from_loops(&loops, 1000);
        assert_eq!(mpoly.len(), 1);

        let path = mpoly.iter().next().unwrap();
        let pts: Vec<(i64, i64)> = path.iter().map(|p| (p.x_scaled(), p.y_scaled())).collect();
        // Closing point dropped: 4 vertices, not 5.
        assert_eq!(
            pts,
            vec![(0, 0), (1250, 0), (1250, 1000), (0, 1000)]
        );
    }

    #[test]
    fn open_chain_keeps_all_points() {
        let loops = vec![lp(vec![(0.0, 0.0), (2.0, 0.0), (2.0, 2.0)], false)];
        let mpoly = MPoly::from_loops(&loops, 10);
        assert_eq!(mpoly.len(), 1);
        let path = mpoly.iter().next().unwrap();
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn tiny_chains_are_skipped() {
        let loops = vec![lp(vec![(0.0, 0.0), (1.0, 0.0)], false)];
        let mpoly = MPoly::from_loops(&loops, 1000);
        assert!(mpoly.is_empty());
    }

    #[test]
    fn emitted_polygons_survive_a_clip_roundtrip() {
        // Output must be consumable by the boolean/offset library: erode a
        // 10x10 square by 2 and check it's still there, then by 6 (past the
        // half-width) and check it vanishes.
        let loops = vec![lp(
            vec![
                (0.0, 0.0),
                (10.0, 0.0),
                (10.0, 10.0),
                (0.0, 10.0),
                (0.0, 0.0),
            ],
            true,
        )];
        let mpoly = MPoly::from_loops(&loops, 1);

        let eroded = mpoly
            .inflate(-2.0, JoinType::Square, EndType::Polygon, 2.0)
            .simplify(0.001, false);
        assert!(!eroded.is_empty());

        let gone = mpoly
            .inflate(-6.0, JoinType::Square, EndType::Polygon, 2.0)
            .simplify(0.001, false);
        assert!(gone.is_empty());
    }
}
