// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Curveloop Geometry
//!
//! Integer-lattice coordinate codec and 2D polygon boolean engine for
//! curve loops.
//!
//! Model-space loops are quantized onto a millimetre lattice
//! ([`LatticeScale`]), run through the i_overlay clipping backend
//! ([`bool2d`]), and the resulting contours are cleaned of snapping
//! degeneracies and rebuilt into ordered loops by the
//! [`curveloop_core::contiguity`] resolver.
//!
//! The codec is lossy by design: sub-millimetre detail does not survive
//! the round trip. That is the price of numerically stable boolean
//! arithmetic and it is paid once, at the conversion boundary.

pub mod bool2d;
pub mod error;
pub mod lattice;
pub mod polygon;

pub use bool2d::{clip, clip_many, subtract_all, union_all, ClipMode};
pub use error::{Error, Result};
pub use lattice::{
    remove_collinear_repeats, LatticePath, LatticePoint, LatticeScale, MM_PER_FOOT,
};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Vector2};
