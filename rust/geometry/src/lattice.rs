// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixed-precision lattice codec.
//!
//! The boolean engine operates on an integer millimetre lattice: model
//! coordinates are scaled by [`LatticeScale::mm_per_unit`] and truncated
//! to whole numbers. The forward conversion is lossy on purpose —
//! collapsing sub-millimetre differences is what makes the downstream
//! boolean arithmetic numerically stable. Round-tripping a contour
//! therefore introduces redundant vertices at lattice seams, which
//! [`remove_collinear_repeats`] strips out again.

use curveloop_core::{Curve, CurveLoop, Tolerance};
use nalgebra::Point2;

/// Millimetres per model-space foot
pub const MM_PER_FOOT: f64 = 25.4 * 12.0;

/// Lattice vertex in whole millimetres
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LatticePoint {
    pub x: i64,
    pub y: i64,
}

impl LatticePoint {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Ordered sequence of lattice vertices
pub type LatticePath = Vec<LatticePoint>;

/// Conversion between model-space coordinates and the integer lattice.
///
/// The default multiplier turns model-space feet into millimetres. The
/// multiplier should not be made much larger: the lattice spans the whole
/// model, and oversized scales overflow the backend's working range on
/// large sites.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeScale {
    pub mm_per_unit: f64,
}

impl Default for LatticeScale {
    fn default() -> Self {
        Self {
            mm_per_unit: MM_PER_FOOT,
        }
    }
}

impl LatticeScale {
    /// Scale a model-space point onto the lattice, truncating toward zero.
    ///
    /// Lossy: two points less than one lattice unit apart collapse onto
    /// the same vertex and cannot be told apart afterwards.
    pub fn to_lattice(&self, p: &Point2<f64>) -> LatticePoint {
        LatticePoint::new(
            (self.mm_per_unit * p.x) as i64,
            (self.mm_per_unit * p.y) as i64,
        )
    }

    /// Map a lattice vertex back into model space
    pub fn from_lattice(&self, p: &LatticePoint) -> Point2<f64> {
        Point2::new(p.x as f64 / self.mm_per_unit, p.y as f64 / self.mm_per_unit)
    }

    /// Assemble a loop into a lattice path: each curve contributes its
    /// start point, and an open loop appends the final curve's end once.
    /// Arcs contribute their chord endpoints only.
    pub fn path_from_loop(&self, curve_loop: &CurveLoop) -> LatticePath {
        curve_loop
            .vertices()
            .iter()
            .map(|p| self.to_lattice(p))
            .collect()
    }

    /// Map a lattice path back to model-space points
    pub fn points_from_path(&self, path: &[LatticePoint]) -> Vec<Point2<f64>> {
        path.iter().map(|p| self.from_lattice(p)).collect()
    }

    /// Rebuild curves from a lattice path: inverse conversion, collinear
    /// repeat clean-up, then segment construction.
    ///
    /// Spans below `min_length` are skipped outright — they are expected
    /// snapping artifacts, not errors. When `closed` and the path does not
    /// already end where it starts, a closing segment is appended.
    pub fn curves_from_path(
        &self,
        path: &[LatticePoint],
        closed: bool,
        tol: &Tolerance,
    ) -> Vec<Curve> {
        let points = remove_collinear_repeats(&self.points_from_path(path), tol);
        let mut curves = Vec::with_capacity(points.len());
        for pair in points.windows(2) {
            if let Some(curve) = Curve::line(pair[0], pair[1], tol) {
                curves.push(curve);
            }
        }
        if closed && points.len() >= 3 {
            let first = points[0];
            let last = points[points.len() - 1];
            if !tol.points_equal(&last, &first) {
                if let Some(curve) = Curve::line(last, first, tol) {
                    curves.push(curve);
                }
            }
        }
        curves
    }
}

/// Strip redundant interior vertices from a round-tripped contour.
///
/// A vertex whose directions toward both neighbours are equal within
/// tolerance is a lattice-snapping artifact and is dropped; a vertex
/// coinciding with a neighbour is a plain repeat and is dropped too. The
/// first and last points are always kept verbatim so chain endpoints
/// survive unchanged.
pub fn remove_collinear_repeats(points: &[Point2<f64>], tol: &Tolerance) -> Vec<Point2<f64>> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let mut output = Vec::with_capacity(points.len());
    output.push(points[0]);
    for i in 1..points.len() - 1 {
        let prev = points[i - 1];
        let here = points[i];
        let next = points[i + 1];
        if tol.points_equal(&here, &prev) || tol.points_equal(&here, &next) {
            continue;
        }
        let back = (prev - here).normalize();
        let forward = (next - here).normalize();
        if (back.x - forward.x).abs() <= tol.point_eps && (back.y - forward.y).abs() <= tol.point_eps
        {
            continue;
        }
        output.push(here);
    }
    output.push(points[points.len() - 1]);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use curveloop_core::contiguity;

    fn loop_from_points(points: &[Point2<f64>], tol: &Tolerance) -> CurveLoop {
        let n = points.len();
        let curves: Vec<Curve> = (0..n)
            .map(|i| Curve::line(points[i], points[(i + 1) % n], tol).unwrap())
            .collect();
        CurveLoop::new(curves, false)
    }

    #[test]
    fn test_forward_conversion_truncates() {
        let scale = LatticeScale::default();
        let p = scale.to_lattice(&Point2::new(1.0, -1.0));
        // 1 ft = 304.8 mm, truncated toward zero in both directions
        assert_eq!(p.x, 304);
        assert_eq!(p.y, -304);
    }

    #[test]
    fn test_round_trip_within_one_lattice_unit() {
        let scale = LatticeScale::default();
        let tol = Tolerance::default();
        let unit = 1.0 / scale.mm_per_unit;
        let original = [
            Point2::new(0.0, 0.0),
            Point2::new(12.5, 0.0),
            Point2::new(12.5, 7.25),
            Point2::new(0.0, 7.25),
        ];
        let square = loop_from_points(&original, &tol);
        let path = scale.path_from_loop(&square);
        assert_eq!(path.len(), 4);

        let curves = scale.curves_from_path(&path, true, &tol);
        assert_eq!(curves.len(), 4);
        for (curve, point) in curves.iter().zip(original.iter()) {
            assert!(nalgebra::distance(&curve.start(), point) <= 2.0 * unit);
        }
    }

    #[test]
    fn test_open_loop_path_keeps_trailing_end() {
        let scale = LatticeScale::default();
        let tol = Tolerance::default();
        let chain = CurveLoop::new(
            vec![
                Curve::line(Point2::new(0.0, 0.0), Point2::new(5.0, 0.0), &tol).unwrap(),
                Curve::line(Point2::new(5.0, 0.0), Point2::new(5.0, 5.0), &tol).unwrap(),
            ],
            true,
        );
        let path = scale.path_from_loop(&chain);
        assert_eq!(path.len(), 3);
        assert_eq!(path[2], scale.to_lattice(&Point2::new(5.0, 5.0)));
    }

    #[test]
    fn test_remove_collinear_repeats_drops_spikes_keeps_corners() {
        let tol = Tolerance::default();
        let contour = [
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 0.0),
            // spike: walks out to (6,0) and straight back through (5,0)
            Point2::new(6.0, 0.0),
            Point2::new(5.0, 0.0),
            Point2::new(5.0, 5.0),
            Point2::new(0.0, 5.0),
        ];
        let cleaned = remove_collinear_repeats(&contour, &tol);
        assert!(cleaned.len() < contour.len());
        assert_eq!(cleaned[0], contour[0]);
        assert_eq!(cleaned[cleaned.len() - 1], contour[contour.len() - 1]);
    }

    #[test]
    fn test_remove_collinear_repeats_preserves_clean_polygon() {
        let tol = Tolerance::default();
        let contour = [
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 0.0),
            Point2::new(5.0, 5.0),
            Point2::new(0.0, 5.0),
        ];
        let cleaned = remove_collinear_repeats(&contour, &tol);
        assert_eq!(cleaned.len(), 4);
    }

    #[test]
    fn test_round_tripped_contour_reorders_cleanly() {
        let scale = LatticeScale::default();
        let tol = Tolerance::default();
        let square = loop_from_points(
            &[
                Point2::new(0.0, 0.0),
                Point2::new(10.0, 0.0),
                Point2::new(10.0, 10.0),
                Point2::new(0.0, 10.0),
            ],
            &tol,
        );
        let path = scale.path_from_loop(&square);
        let curves = scale.curves_from_path(&path, true, &tol);
        let rebuilt = contiguity::order(&curves, &tol).unwrap();
        assert!(!rebuilt.is_open());
        assert_eq!(rebuilt.len(), 4);
    }
}
