// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar curve primitives: directed line segments and circular arcs.
//!
//! Contiguity resolution only ever consults curve endpoints; the concrete
//! geometry is carried through untouched so downstream consumers receive
//! the full curve, not just its chord.

use crate::tolerance::Tolerance;
use nalgebra::{Point2, Vector2};

/// Directed line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
}

impl Line {
    /// Create a segment between two points.
    ///
    /// Returns `None` when the span is shorter than `min_length` — the
    /// explicit pre-check that replaces constructing a degenerate segment
    /// and failing.
    pub fn between(start: Point2<f64>, end: Point2<f64>, tol: &Tolerance) -> Option<Self> {
        if nalgebra::distance(&start, &end) < tol.min_length {
            return None;
        }
        Some(Self { start, end })
    }

    pub fn length(&self) -> f64 {
        nalgebra::distance(&self.start, &self.end)
    }

    /// Unit direction from start to end
    pub fn direction(&self) -> Vector2<f64> {
        (self.end - self.start).normalize()
    }

    /// Interior point at normalized parameter `t` in `[0, 1]`
    pub fn point_at(&self, t: f64) -> Point2<f64> {
        self.start + (self.end - self.start) * t
    }

    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }
}

/// Circular arc through three points.
///
/// Stored as start/mid/end; center and radius are derived on demand.
/// Full circles (coincident start and end) are not representable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub start: Point2<f64>,
    pub mid: Point2<f64>,
    pub end: Point2<f64>,
}

impl Arc {
    /// Create an arc through three points.
    ///
    /// Returns `None` when two of the points coincide within `point_eps`
    /// or the mid point deviates from the start-end chord by less than
    /// `point_eps` (collinear input has no finite circumcircle).
    pub fn from_three_points(
        start: Point2<f64>,
        mid: Point2<f64>,
        end: Point2<f64>,
        tol: &Tolerance,
    ) -> Option<Self> {
        if tol.points_equal(&start, &mid)
            || tol.points_equal(&mid, &end)
            || tol.points_equal(&start, &end)
        {
            return None;
        }
        let chord = end - start;
        let cross = chord.x * (mid.y - start.y) - chord.y * (mid.x - start.x);
        if cross.abs() <= tol.point_eps * chord.norm() {
            return None;
        }
        Some(Self { start, mid, end })
    }

    /// Circumcenter of the three defining points
    pub fn center(&self) -> Point2<f64> {
        let (a, b, c) = (self.start, self.mid, self.end);
        let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
        let a2 = a.x * a.x + a.y * a.y;
        let b2 = b.x * b.x + b.y * b.y;
        let c2 = c.x * c.x + c.y * c.y;
        Point2::new(
            (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d,
            (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d,
        )
    }

    pub fn radius(&self) -> f64 {
        nalgebra::distance(&self.center(), &self.start)
    }

    /// Start angle and signed sweep, chosen so the arc passes through `mid`
    fn angles(&self) -> (f64, f64) {
        let c = self.center();
        let angle_of = |p: Point2<f64>| (p.y - c.y).atan2(p.x - c.x);
        let a0 = angle_of(self.start);
        let sweep_ccw = (angle_of(self.end) - a0).rem_euclid(std::f64::consts::TAU);
        let mid_ccw = (angle_of(self.mid) - a0).rem_euclid(std::f64::consts::TAU);
        if mid_ccw <= sweep_ccw {
            (a0, sweep_ccw)
        } else {
            (a0, sweep_ccw - std::f64::consts::TAU)
        }
    }

    /// Arc length
    pub fn length(&self) -> f64 {
        let (_, sweep) = self.angles();
        self.radius() * sweep.abs()
    }

    /// Interior point at normalized parameter `t` in `[0, 1]`
    pub fn point_at(&self, t: f64) -> Point2<f64> {
        let (a0, sweep) = self.angles();
        let angle = a0 + sweep * t;
        let c = self.center();
        let r = self.radius();
        Point2::new(c.x + r * angle.cos(), c.y + r * angle.sin())
    }

    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            mid: self.mid,
            end: self.start,
        }
    }

    /// Flatten the arc into chord points, first and last exactly on the
    /// arc endpoints. `max_deviation` bounds the sagitta of each chord.
    pub fn tessellate(&self, max_deviation: f64) -> Vec<Point2<f64>> {
        let r = self.radius();
        let (_, sweep) = self.angles();
        let cos_half = (1.0 - max_deviation.max(f64::EPSILON) / r).clamp(-1.0, 1.0);
        let max_step = 2.0 * cos_half.acos();
        let steps = if max_step > 0.0 {
            // capped so an absurdly small deviation cannot blow up memory
            (sweep.abs() / max_step).ceil().clamp(1.0, 1024.0) as usize
        } else {
            1
        };
        let mut points = Vec::with_capacity(steps + 1);
        points.push(self.start);
        for i in 1..steps {
            points.push(self.point_at(i as f64 / steps as f64));
        }
        points.push(self.end);
        points
    }
}

/// Planar curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    Line(Line),
    Arc(Arc),
}

impl Curve {
    /// Line segment between two points; `None` for sub-`min_length` spans
    pub fn line(start: Point2<f64>, end: Point2<f64>, tol: &Tolerance) -> Option<Self> {
        Line::between(start, end, tol).map(Curve::Line)
    }

    /// Circular arc through three points; `None` for degenerate input
    pub fn arc(
        start: Point2<f64>,
        mid: Point2<f64>,
        end: Point2<f64>,
        tol: &Tolerance,
    ) -> Option<Self> {
        Arc::from_three_points(start, mid, end, tol).map(Curve::Arc)
    }

    pub fn start(&self) -> Point2<f64> {
        match self {
            Curve::Line(line) => line.start,
            Curve::Arc(arc) => arc.start,
        }
    }

    pub fn end(&self) -> Point2<f64> {
        match self {
            Curve::Line(line) => line.end,
            Curve::Arc(arc) => arc.end,
        }
    }

    pub fn reversed(&self) -> Self {
        match self {
            Curve::Line(line) => Curve::Line(line.reversed()),
            Curve::Arc(arc) => Curve::Arc(arc.reversed()),
        }
    }

    pub fn length(&self) -> f64 {
        match self {
            Curve::Line(line) => line.length(),
            Curve::Arc(arc) => arc.length(),
        }
    }

    /// Interior point at normalized parameter `t` in `[0, 1]`
    pub fn point_at(&self, t: f64) -> Point2<f64> {
        match self {
            Curve::Line(line) => line.point_at(t),
            Curve::Arc(arc) => arc.point_at(t),
        }
    }

    /// Same endpoints in the same order, within tolerance.
    /// Checks the two endpoints only.
    pub fn is_identical_to(&self, other: &Curve, tol: &Tolerance) -> bool {
        tol.points_equal(&self.start(), &other.start()) && tol.points_equal(&self.end(), &other.end())
    }

    /// Same endpoints in swapped order, within tolerance.
    /// Checks the two endpoints only.
    pub fn is_reversal_of(&self, other: &Curve, tol: &Tolerance) -> bool {
        tol.points_equal(&self.start(), &other.end()) && tol.points_equal(&self.end(), &other.start())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_line_min_length_precheck() {
        let tol = Tolerance::default();
        assert!(Line::between(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), &tol).is_some());
        assert!(Line::between(Point2::new(0.0, 0.0), Point2::new(5.0e-4, 0.0), &tol).is_none());
    }

    #[test]
    fn test_line_evaluation_and_reversal() {
        let tol = Tolerance::default();
        let line = Line::between(Point2::new(0.0, 0.0), Point2::new(2.0, 2.0), &tol).unwrap();
        let mid = line.point_at(0.5);
        assert_relative_eq!(mid.x, 1.0);
        assert_relative_eq!(mid.y, 1.0);
        assert_eq!(line.reversed().start, line.end);
    }

    #[test]
    fn test_arc_through_three_points() {
        let tol = Tolerance::default();
        // Upper half of the unit circle
        let arc = Arc::from_three_points(
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(-1.0, 0.0),
            &tol,
        )
        .unwrap();
        let c = arc.center();
        assert_relative_eq!(c.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(c.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(arc.radius(), 1.0, epsilon = 1e-12);

        // Halfway along the arc is the defining mid point
        let halfway = arc.point_at(0.5);
        assert_relative_eq!(halfway.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(halfway.y, 1.0, epsilon = 1e-9);
        assert_relative_eq!(arc.length(), std::f64::consts::PI, epsilon = 1e-9);
    }

    #[test]
    fn test_arc_reversal_keeps_geometry() {
        let tol = Tolerance::default();
        let arc = Arc::from_three_points(
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(-1.0, 0.0),
            &tol,
        )
        .unwrap();
        let rev = arc.reversed();
        assert_eq!(rev.start, arc.end);
        assert_eq!(rev.end, arc.start);
        let halfway = rev.point_at(0.5);
        assert_relative_eq!(halfway.y, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_arc_rejects_collinear_points() {
        let tol = Tolerance::default();
        assert!(Arc::from_three_points(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
            &tol,
        )
        .is_none());
    }

    #[test]
    fn test_arc_tessellation_bounds_deviation() {
        let tol = Tolerance::default();
        let arc = Arc::from_three_points(
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(-1.0, 0.0),
            &tol,
        )
        .unwrap();
        let points = arc.tessellate(0.01);
        assert!(points.len() > 5);
        assert_eq!(points[0], arc.start);
        assert_eq!(points[points.len() - 1], arc.end);
        // Every interior point sits on the circle
        for p in &points {
            assert_relative_eq!(nalgebra::distance(&arc.center(), p), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_identity_and_reversal_checks() {
        let tol = Tolerance::default();
        let a = Curve::line(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), &tol).unwrap();
        let b = Curve::line(Point2::new(0.00005, 0.0), Point2::new(1.0, 0.00005), &tol).unwrap();
        let r = Curve::line(Point2::new(1.0, 0.0), Point2::new(0.0, 0.0), &tol).unwrap();
        assert!(a.is_identical_to(&b, &tol));
        assert!(a.is_reversal_of(&r, &tol));
        assert!(!a.is_identical_to(&r, &tol));
    }
}
