// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Curveloop Core
//!
//! Planar curve and loop primitives with tolerance-based contiguity
//! resolution.
//!
//! The central problem this crate solves: given an unordered collection of
//! disconnected curve segments, decide whether they form exactly one
//! closed loop, one open chain, or an invalid configuration, and emit a
//! correctly ordered and oriented [`CurveLoop`].
//!
//! ```rust
//! use curveloop_core::{contiguity, Curve, LoopKind, Point2, Tolerance};
//!
//! let tol = Tolerance::default();
//! let sides = vec![
//!     Curve::line(Point2::new(10.0, 10.0), Point2::new(0.0, 10.0), &tol).unwrap(),
//!     Curve::line(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0), &tol).unwrap(),
//!     Curve::line(Point2::new(0.0, 10.0), Point2::new(0.0, 0.0), &tol).unwrap(),
//!     Curve::line(Point2::new(10.0, 0.0), Point2::new(10.0, 10.0), &tol).unwrap(),
//! ];
//!
//! assert_eq!(contiguity::classify(&sides, &tol), LoopKind::Closed);
//! let ordered = contiguity::order(&sides, &tol).unwrap();
//! assert_eq!(ordered.len(), 4);
//! ```
//!
//! All operations are pure transformations: input curves are borrowed
//! immutably and every call owns its own working state, so concurrent use
//! is safe without synchronization.

pub mod contiguity;
pub mod curve;
pub mod error;
pub mod loops;
pub mod profile;
pub mod tolerance;

pub use contiguity::{classify, is_single_loop, order, LoopKind};
pub use curve::{Arc, Curve, Line};
pub use error::{Error, Result};
pub use loops::CurveLoop;
pub use profile::PlanarProfile;
pub use tolerance::Tolerance;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Vector2};
