// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon measurement and containment helpers

use crate::lattice::{LatticePoint, LatticeScale};
use curveloop_core::Tolerance;
use nalgebra::Point2;

/// Signed area of a contour.
/// Positive = counter-clockwise, negative = clockwise.
pub fn signed_area(contour: &[Point2<f64>]) -> f64 {
    if contour.len() < 3 {
        return 0.0;
    }
    let n = contour.len();
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += contour[i].x * contour[j].y;
        area -= contour[j].x * contour[i].y;
    }
    area * 0.5
}

/// Signed area of a lattice contour in square lattice units.
/// Accumulated in i128 so large-site contours cannot overflow.
pub fn lattice_area(path: &[LatticePoint]) -> f64 {
    if path.len() < 3 {
        return 0.0;
    }
    let n = path.len();
    let mut doubled: i128 = 0;
    for i in 0..n {
        let j = (i + 1) % n;
        doubled += path[i].x as i128 * path[j].y as i128;
        doubled -= path[j].x as i128 * path[i].y as i128;
    }
    doubled as f64 * 0.5
}

/// Lattice contour area expressed in square model units
pub fn area_in_model_units(path: &[LatticePoint], scale: &LatticeScale) -> f64 {
    lattice_area(path) / (scale.mm_per_unit * scale.mm_per_unit)
}

/// Ray-cast containment test. The boundary itself does not count as
/// inside; use [`point_strictly_inside`] when that distinction matters.
pub fn point_in_polygon(point: &Point2<f64>, contour: &[Point2<f64>]) -> bool {
    if contour.len() < 3 {
        return false;
    }
    let mut inside = false;
    let n = contour.len();
    let mut j = n - 1;
    for i in 0..n {
        let pi = &contour[i];
        let pj = &contour[j];
        if ((pi.y > point.y) != (pj.y > point.y))
            && (point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Distance from a point to a segment
pub fn distance_to_segment(point: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return nalgebra::distance(point, a);
    }
    let t = ((point - a).dot(&ab) / len2).clamp(0.0, 1.0);
    nalgebra::distance(point, &(a + ab * t))
}

/// Whether the point lies on the contour boundary within tolerance
pub fn point_on_boundary(point: &Point2<f64>, contour: &[Point2<f64>], tol: &Tolerance) -> bool {
    let n = contour.len();
    if n < 2 {
        return false;
    }
    for i in 0..n {
        let j = (i + 1) % n;
        if distance_to_segment(point, &contour[i], &contour[j]) <= tol.point_eps {
            return true;
        }
    }
    false
}

/// Containment excluding the boundary: inside the region and not on any
/// boundary segment
pub fn point_strictly_inside(
    point: &Point2<f64>,
    contour: &[Point2<f64>],
    tol: &Tolerance,
) -> bool {
    point_in_polygon(point, contour) && !point_on_boundary(point, contour, tol)
}

/// Axis-aligned bounds of a point set
pub fn bounds(contour: &[Point2<f64>]) -> Option<(Point2<f64>, Point2<f64>)> {
    if contour.is_empty() {
        return None;
    }
    let mut min = contour[0];
    let mut max = contour[0];
    for p in contour.iter().skip(1) {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some((min, max))
}

/// Whether two axis-aligned bounds overlap
pub fn bounds_overlap(
    a_min: &Point2<f64>,
    a_max: &Point2<f64>,
    b_min: &Point2<f64>,
    b_max: &Point2<f64>,
) -> bool {
    a_min.x <= b_max.x && a_max.x >= b_min.x && a_min.y <= b_max.y && a_max.y >= b_min.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(size: f64) -> Vec<Point2<f64>> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(size, 0.0),
            Point2::new(size, size),
            Point2::new(0.0, size),
        ]
    }

    #[test]
    fn test_signed_area_orientation() {
        let ccw = square(2.0);
        assert_relative_eq!(signed_area(&ccw), 4.0);
        let cw: Vec<_> = ccw.iter().rev().cloned().collect();
        assert_relative_eq!(signed_area(&cw), -4.0);
    }

    #[test]
    fn test_lattice_area_matches_model_area() {
        let scale = LatticeScale::default();
        let path: Vec<LatticePoint> = square(10.0).iter().map(|p| scale.to_lattice(p)).collect();
        let area = area_in_model_units(&path, &scale);
        // truncation shaves a fraction of a lattice unit off each edge
        assert_relative_eq!(area, 100.0, epsilon = 0.2);
    }

    #[test]
    fn test_point_in_polygon() {
        let contour = square(10.0);
        assert!(point_in_polygon(&Point2::new(5.0, 5.0), &contour));
        assert!(!point_in_polygon(&Point2::new(15.0, 5.0), &contour));
        assert!(!point_in_polygon(&Point2::new(-1.0, 5.0), &contour));
    }

    #[test]
    fn test_boundary_handling() {
        let tol = Tolerance::default();
        let contour = square(10.0);
        let on_edge = Point2::new(5.0, 0.0);
        assert!(point_on_boundary(&on_edge, &contour, &tol));
        assert!(!point_strictly_inside(&on_edge, &contour, &tol));
        assert!(point_strictly_inside(&Point2::new(5.0, 5.0), &contour, &tol));
    }

    #[test]
    fn test_distance_to_segment_clamps_to_endpoints() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(10.0, 0.0);
        assert_relative_eq!(distance_to_segment(&Point2::new(5.0, 3.0), &a, &b), 3.0);
        assert_relative_eq!(distance_to_segment(&Point2::new(-4.0, 3.0), &a, &b), 5.0);
    }

    #[test]
    fn test_bounds_and_overlap() {
        let (min, max) = bounds(&square(10.0)).unwrap();
        assert_eq!(min, Point2::new(0.0, 0.0));
        assert_eq!(max, Point2::new(10.0, 10.0));

        let b_min = Point2::new(5.0, 5.0);
        let b_max = Point2::new(15.0, 15.0);
        let c_min = Point2::new(20.0, 20.0);
        let c_max = Point2::new(30.0, 30.0);
        assert!(bounds_overlap(&min, &max, &b_min, &b_max));
        assert!(!bounds_overlap(&min, &max, &c_min, &c_max));
    }
}
