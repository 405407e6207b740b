// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Precision configuration for tolerance-based geometry

use nalgebra::Point2;

/// Precision parameters shared by all loop operations.
///
/// Every operation takes a `Tolerance` explicitly instead of reading
/// ambient statics, so test suites can exercise several precision regimes
/// side by side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Point coincidence tolerance, compared per component
    pub point_eps: f64,
    /// Decimal digits kept when bucketing endpoints for incidence counting.
    /// Deliberately much coarser than `point_eps`.
    pub key_digits: u32,
    /// Spans shorter than this are not constructible as segments
    pub min_length: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            point_eps: 1.0e-4,
            key_digits: 2,
            min_length: 1.0e-3,
        }
    }
}

impl Tolerance {
    /// Component-wise coincidence test for two points
    pub fn points_equal(&self, a: &Point2<f64>, b: &Point2<f64>) -> bool {
        (a.x - b.x).abs() <= self.point_eps && (a.y - b.y).abs() <= self.point_eps
    }

    /// Bucketing key for an endpoint: both coordinates rounded to
    /// `key_digits` decimals and scaled to integers
    pub(crate) fn bucket_key(&self, p: &Point2<f64>) -> (i64, i64) {
        let scale = 10f64.powi(self.key_digits as i32);
        (
            (p.x * scale).round() as i64,
            (p.y * scale).round() as i64,
        )
    }
}
