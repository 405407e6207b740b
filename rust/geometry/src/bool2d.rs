// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D polygon boolean engine.
//!
//! Wraps the i_overlay clipping backend: closed-region overlay for
//! union/difference and string-line clipping for cutting a loop (treated
//! as a curve, not a filled region) against closed cutters. Coordinates
//! cross the backend boundary as lattice integers carried in `f64` —
//! exactly representable, so the arithmetic stays integer-robust — and
//! every result contour is snapped back to the lattice, cleaned of
//! snapping degeneracies, and re-ordered through the contiguity resolver
//! before it is returned.

use crate::error::{Error, Result};
use crate::lattice::{LatticePath, LatticePoint, LatticeScale};
use crate::polygon;
use curveloop_core::{contiguity, CurveLoop, Tolerance};
use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::clip::FloatClip;
use i_overlay::float::single::SingleFloatOverlay;
use i_overlay::string::clip::ClipRule;
use rayon::prelude::*;

/// Boolean mode for clipping a subject loop against a cutter.
///
/// The subject is always submitted to the backend as an open path — a
/// curve to be cut, not a filled region — so `Intersect` keeps the
/// fragments inside the cutter while `Difference` keeps the fragments
/// outside. `Union` and `Xor` have no filled subject to merge and follow
/// the backend's open-path convention: they reduce to the outside
/// fragments, same as `Difference`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipMode {
    Union,
    Intersect,
    Difference,
    Xor,
}

/// Closed result contours below this lattice area are snapping artifacts
/// and are dropped before reconstruction (square lattice units, i.e.
/// square millimetres at the default scale).
const MIN_CONTOUR_AREA: f64 = 1.0;

/// Union one or more closed loops into a flat list of closed loops.
///
/// All loops are submitted as subject contours under a non-zero fill
/// rule. The result tree is flattened: disjoint regions come back as
/// separate loops and nesting information is not preserved — callers that
/// need hole semantics can test containment with
/// [`polygon::point_in_polygon`] over the results.
pub fn union_all(
    loops: &[CurveLoop],
    tol: &Tolerance,
    scale: &LatticeScale,
) -> Result<Vec<CurveLoop>> {
    if loops.is_empty() {
        return Err(Error::InvalidInput(
            "union of an empty loop collection".to_string(),
        ));
    }
    let subject = closed_region_paths(loops, scale)?;
    let clip: Vec<Vec<[f64; 2]>> = Vec::new();

    tracing::debug!(loops = loops.len(), "running closed union");
    let shapes = subject.overlay(&clip, OverlayRule::Union, FillRule::NonZero);
    rebuild_closed(&shapes, tol, scale)
}

/// Subtract the cutter loops from the subject loops, both treated as
/// closed regions, returning a flat list of closed loops.
pub fn subtract_all(
    subjects: &[CurveLoop],
    cutters: &[CurveLoop],
    tol: &Tolerance,
    scale: &LatticeScale,
) -> Result<Vec<CurveLoop>> {
    if subjects.is_empty() {
        return Err(Error::InvalidInput(
            "subtraction with no subject loops".to_string(),
        ));
    }
    if cutters.is_empty() {
        return union_all(subjects, tol, scale);
    }
    let subject = closed_region_paths(subjects, scale)?;
    let clip = closed_region_paths(cutters, scale)?;

    tracing::debug!(
        subjects = subjects.len(),
        cutters = cutters.len(),
        "running closed difference"
    );
    let shapes = subject.overlay(&clip, OverlayRule::Difference, FillRule::NonZero);
    rebuild_closed(&shapes, tol, scale)
}

/// Clip a subject loop against a single closed cutter loop.
///
/// The subject travels into the backend as an open path even when it is
/// logically closed (its seam vertex is re-appended explicitly), so the
/// backend cuts it as a curve and the cut locations survive as distinct
/// fragments instead of being merged into polygon fill. The cutter uses
/// an even-odd fill rule. Every fragment is reconstructed independently
/// through the contiguity resolver.
pub fn clip(
    subject: &CurveLoop,
    cutter: &CurveLoop,
    mode: ClipMode,
    tol: &Tolerance,
    scale: &LatticeScale,
) -> Result<Vec<CurveLoop>> {
    let cutter_paths = closed_cutter_paths(std::slice::from_ref(cutter), scale)?;
    clip_against(subject, &cutter_paths, mode, tol, scale)
}

/// Clip every subject loop against all cutter loops at once.
///
/// Structure-preserving: the result carries one list per input subject,
/// in input order. Each subject is clipped in a single pass against the
/// whole cutter set — clipping cutter-by-cutter would make the outcome
/// depend on cutter order. Subjects are processed in parallel.
pub fn clip_many(
    subjects: &[CurveLoop],
    cutters: &[CurveLoop],
    mode: ClipMode,
    tol: &Tolerance,
    scale: &LatticeScale,
) -> Result<Vec<Vec<CurveLoop>>> {
    if subjects.is_empty() {
        return Err(Error::InvalidInput("clip with no subject loops".to_string()));
    }
    let cutter_paths = closed_cutter_paths(cutters, scale)?;
    subjects
        .par_iter()
        .map(|subject| clip_against(subject, &cutter_paths, mode, tol, scale))
        .collect()
}

/// Convert loops into contours for a region-valued operand. An open loop
/// is closed implicitly by the fill rule; loops too small to bound a
/// region are rejected.
fn closed_region_paths(loops: &[CurveLoop], scale: &LatticeScale) -> Result<Vec<Vec<[f64; 2]>>> {
    loops
        .iter()
        .map(|l| {
            let path = float_path(&scale.path_from_loop(l));
            if path.len() < 3 {
                return Err(Error::InvalidInput(format!(
                    "a region loop needs at least 3 vertices, got {}",
                    path.len()
                )));
            }
            Ok(path)
        })
        .collect()
}

fn closed_cutter_paths(cutters: &[CurveLoop], scale: &LatticeScale) -> Result<Vec<Vec<[f64; 2]>>> {
    if cutters.is_empty() {
        return Err(Error::InvalidInput("clip with no cutter loops".to_string()));
    }
    if let Some(open) = cutters.iter().find(|c| c.is_open()) {
        return Err(Error::InvalidInput(format!(
            "cutter loops must be closed, got an open chain of {} curves",
            open.len()
        )));
    }
    closed_region_paths(cutters, scale)
}

fn clip_against(
    subject: &CurveLoop,
    cutter_paths: &[Vec<[f64; 2]>],
    mode: ClipMode,
    tol: &Tolerance,
    scale: &LatticeScale,
) -> Result<Vec<CurveLoop>> {
    let mut path = float_path(&scale.path_from_loop(subject));
    if !subject.is_open() {
        // a logically closed subject still travels as an open path; close
        // it explicitly so the last edge is not lost
        if let Some(first) = path.first().copied() {
            path.push(first);
        }
    }

    let clip_rule = match mode {
        ClipMode::Intersect => ClipRule {
            invert: false,
            boundary_included: true,
        },
        ClipMode::Union | ClipMode::Difference | ClipMode::Xor => ClipRule {
            invert: true,
            boundary_included: false,
        },
    };
    let fragments = path.clip_by(&cutter_paths, FillRule::EvenOdd, clip_rule);

    tracing::debug!(
        mode = ?mode,
        fragments = fragments.len(),
        "clipped subject path"
    );
    rebuild_open(&fragments, tol, scale)
}

/// Rebuild closed loops from the backend's shape output, dropping
/// degenerate contours before they ever reach the resolver.
fn rebuild_closed(
    shapes: &[Vec<Vec<[f64; 2]>>],
    tol: &Tolerance,
    scale: &LatticeScale,
) -> Result<Vec<CurveLoop>> {
    let mut result = Vec::new();
    let mut dropped = 0usize;
    for shape in shapes {
        for contour in shape {
            let path = snap_path(contour);
            if path.len() < 3 || polygon::lattice_area(&path).abs() < MIN_CONTOUR_AREA {
                dropped += 1;
                continue;
            }
            let curves = scale.curves_from_path(&path, true, tol);
            if curves.len() < 3 {
                dropped += 1;
                continue;
            }
            result.push(contiguity::order(&curves, tol)?);
        }
    }
    if dropped > 0 {
        tracing::debug!(dropped, "filtered degenerate closed contours");
    }
    Ok(result)
}

/// Rebuild loops from open clip fragments. A fragment that happens to
/// close on itself comes back as a closed loop; degenerate fragments are
/// dropped.
fn rebuild_open(
    fragments: &[Vec<[f64; 2]>],
    tol: &Tolerance,
    scale: &LatticeScale,
) -> Result<Vec<CurveLoop>> {
    let mut result = Vec::new();
    let mut dropped = 0usize;
    for fragment in fragments {
        let path = snap_path(fragment);
        if path.len() < 2 {
            dropped += 1;
            continue;
        }
        let curves = scale.curves_from_path(&path, false, tol);
        if curves.is_empty() {
            dropped += 1;
            continue;
        }
        result.push(contiguity::order(&curves, tol)?);
    }
    if dropped > 0 {
        tracing::debug!(dropped, "filtered degenerate clip fragments");
    }
    Ok(result)
}

fn float_path(path: &LatticePath) -> Vec<[f64; 2]> {
    path.iter().map(|p| [p.x as f64, p.y as f64]).collect()
}

/// Snap backend output back onto the lattice. Inputs were lattice
/// integers, so outputs are at worst one rounding away from it.
fn snap_path(path: &[[f64; 2]]) -> LatticePath {
    path.iter()
        .map(|p| LatticePoint::new(p[0].round() as i64, p[1].round() as i64))
        .collect()
}
