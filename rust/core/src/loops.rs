// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ordered curve loops

use crate::curve::Curve;
use nalgebra::Point2;

/// Ordered sequence of curves in which consecutive curves share an
/// endpoint within tolerance.
///
/// A closed loop's last curve ends where its first curve starts. Use
/// [`crate::contiguity::order`] to build one from an unordered curve set;
/// `new` trusts the caller on ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveLoop {
    curves: Vec<Curve>,
    open: bool,
}

impl CurveLoop {
    /// Wrap an already-ordered curve sequence.
    ///
    /// Contiguity is not re-checked here; callers with unordered input go
    /// through the resolver instead.
    pub fn new(curves: Vec<Curve>, open: bool) -> Self {
        Self { curves, open }
    }

    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    pub fn into_curves(self) -> Vec<Curve> {
        self.curves
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Curve> {
        self.curves.iter()
    }

    /// Loop vertices: each curve's start point, plus the final curve's end
    /// point once when the loop is open. This is also the lattice path
    /// assembly rule, so closed loops yield no duplicated seam vertex.
    pub fn vertices(&self) -> Vec<Point2<f64>> {
        let mut points: Vec<Point2<f64>> = self.curves.iter().map(|c| c.start()).collect();
        if self.open {
            if let Some(last) = self.curves.last() {
                points.push(last.end());
            }
        }
        points
    }

    /// Shoelace area over the loop vertices.
    /// Positive = counter-clockwise. Only meaningful for closed loops.
    pub fn signed_area(&self) -> f64 {
        let points = self.vertices();
        if points.len() < 3 {
            return 0.0;
        }
        let n = points.len();
        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            area += points[i].x * points[j].y;
            area -= points[j].x * points[i].y;
        }
        area * 0.5
    }

    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Reverse traversal order and the direction of every curve
    pub fn flip(&mut self) {
        self.curves.reverse();
        for curve in &mut self.curves {
            *curve = curve.reversed();
        }
    }

    /// Normalize a closed loop to clockwise winding. Open loops are left
    /// untouched.
    pub fn ensure_clockwise(&mut self) {
        if !self.open && self.is_counter_clockwise() {
            self.flip();
        }
    }
}

impl<'a> IntoIterator for &'a CurveLoop {
    type Item = &'a Curve;
    type IntoIter = std::slice::Iter<'a, Curve>;

    fn into_iter(self) -> Self::IntoIter {
        self.curves.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tolerance::Tolerance;
    use approx::assert_relative_eq;

    fn unit_square_ccw(tol: &Tolerance) -> CurveLoop {
        let p = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        let curves = (0..4)
            .map(|i| Curve::line(p[i], p[(i + 1) % 4], tol).unwrap())
            .collect();
        CurveLoop::new(curves, false)
    }

    #[test]
    fn test_vertices_closed_vs_open() {
        let tol = Tolerance::default();
        let square = unit_square_ccw(&tol);
        assert_eq!(square.vertices().len(), 4);

        let open = CurveLoop::new(square.curves()[..3].to_vec(), true);
        let vertices = open.vertices();
        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[3], Point2::new(0.0, 1.0));
    }

    #[test]
    fn test_signed_area_and_orientation() {
        let tol = Tolerance::default();
        let mut square = unit_square_ccw(&tol);
        assert_relative_eq!(square.signed_area(), 1.0);
        assert!(square.is_counter_clockwise());

        square.ensure_clockwise();
        assert_relative_eq!(square.signed_area(), -1.0);
        assert!(!square.is_counter_clockwise());
    }

    #[test]
    fn test_flip_reverses_curves_and_order() {
        let tol = Tolerance::default();
        let mut square = unit_square_ccw(&tol);
        let first_start = square.curves()[0].start();
        square.flip();
        assert_eq!(square.curves()[3].end(), first_start);
        // Still contiguous after flipping
        for pair in square.curves().windows(2) {
            assert!(tol.points_equal(&pair[0].end(), &pair[1].start()));
        }
    }
}
