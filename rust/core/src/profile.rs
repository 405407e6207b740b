// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Capability interface for host-side elements that carry a planar
//! profile.
//!
//! Walls, grids, and linear components all reduce to the same two facts
//! at this layer: a defining curve and a thickness. Host adapters
//! implement [`PlanarProfile`] for their element wrappers; nothing in the
//! core ever needs the concrete element type.

use crate::curve::Curve;
use crate::loops::CurveLoop;
use crate::tolerance::Tolerance;
use nalgebra::Vector2;

/// Anything with a planar defining curve and a thickness
pub trait PlanarProfile {
    /// The element's defining curve (a wall's location line, a grid's
    /// axis)
    fn defining_curve(&self) -> Curve;

    /// Profile thickness, centered on the defining curve
    fn thickness(&self) -> f64;

    /// Closed rectangular outline: the defining curve's chord offset to
    /// both sides by half the thickness.
    ///
    /// Arc-based defining curves are offset by their chord. Returns
    /// `None` when the defining curve or the thickness is too short to
    /// produce a valid outline.
    fn outline(&self, tol: &Tolerance) -> Option<CurveLoop> {
        let curve = self.defining_curve();
        let half = self.thickness() / 2.0;
        if half < tol.min_length / 2.0 {
            return None;
        }
        let start = curve.start();
        let end = curve.end();
        let span = end - start;
        if span.norm() < tol.min_length {
            return None;
        }
        let direction = span.normalize();
        let normal = Vector2::new(-direction.y, direction.x);

        let corners = [
            start + normal * half,
            end + normal * half,
            end - normal * half,
            start - normal * half,
        ];
        let mut sides = Vec::with_capacity(4);
        for i in 0..4 {
            sides.push(Curve::line(corners[i], corners[(i + 1) % 4], tol)?);
        }
        let mut outline = CurveLoop::new(sides, false);
        outline.ensure_clockwise();
        Some(outline)
    }
}
