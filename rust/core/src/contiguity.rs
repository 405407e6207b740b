// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Contiguity resolution: classify an unordered curve set and rebuild it
//! as a correctly ordered, correctly oriented loop or chain.
//!
//! Classification is incidence-based: endpoints are bucketed under a
//! coarse rounded-coordinate key and counted. A closed loop has every
//! endpoint shared by exactly two curves; an open chain has exactly two
//! endpoints owned by a single curve. Everything else is invalid and is
//! reported as such, never repaired.

use crate::curve::Curve;
use crate::error::{Error, Result};
use crate::loops::CurveLoop;
use crate::tolerance::Tolerance;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Classification of an unordered curve collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopKind {
    /// Every endpoint is shared by exactly two curves
    Closed,
    /// Exactly two endpoints belong to a single curve each
    Open,
    /// Anything else: branching endpoints, several disconnected loops,
    /// or an empty collection
    Invalid,
}

/// Classify an unordered curve collection. Never errors.
pub fn classify(curves: &[Curve], tol: &Tolerance) -> LoopKind {
    if curves.is_empty() {
        return LoopKind::Invalid;
    }
    if !is_single_loop(curves, tol) {
        return LoopKind::Invalid;
    }

    let mut buckets: FxHashMap<(i64, i64), SmallVec<[usize; 4]>> = FxHashMap::default();
    for (index, curve) in curves.iter().enumerate() {
        buckets.entry(tol.bucket_key(&curve.start())).or_default().push(index);
        buckets.entry(tol.bucket_key(&curve.end())).or_default().push(index);
    }

    let mut single_entry_buckets = 0usize;
    for entries in buckets.values() {
        match entries.len() {
            1 => {
                single_entry_buckets += 1;
                if single_entry_buckets > 2 {
                    return LoopKind::Invalid;
                }
            }
            2 => {}
            _ => return LoopKind::Invalid,
        }
    }

    match single_entry_buckets {
        0 => LoopKind::Closed,
        2 => LoopKind::Open,
        _ => LoopKind::Invalid,
    }
}

/// Whether the curves form one connected chain rather than several.
///
/// Walks outward from every curve and keeps the longest chain reached; a
/// maximum below the curve count means at least one curve is unreachable.
/// An ambiguous walk counts as not-single.
pub fn is_single_loop(curves: &[Curve], tol: &Tolerance) -> bool {
    let mut max_chain = 0usize;
    for start_index in 0..curves.len() {
        match extend_chain(curves, start_index, curves[start_index], tol) {
            Ok(chain) => max_chain = max_chain.max(chain.len()),
            Err(_) => return false,
        }
    }
    max_chain == curves.len()
}

/// Order an unordered curve collection into a contiguous loop or chain.
///
/// Closed results are normalized to clockwise winding. Raises
/// [`Error::InvalidLoop`] when the collection classifies invalid or the
/// extension walk meets ambiguous topology.
pub fn order(curves: &[Curve], tol: &Tolerance) -> Result<CurveLoop> {
    match classify(curves, tol) {
        LoopKind::Closed => {
            let chain = extend_chain(curves, 0, curves[0], tol)?;
            let mut result = CurveLoop::new(chain, false);
            result.ensure_clockwise();
            Ok(result)
        }
        LoopKind::Open => {
            let (start_index, start) = find_terminus(curves, tol)?;
            let chain = extend_chain(curves, start_index, start, tol)?;
            Ok(CurveLoop::new(chain, true))
        }
        LoopKind::Invalid => Err(Error::InvalidLoop(
            "curve set does not form a single closed or open loop".to_string(),
        )),
    }
}

/// Locate the chain terminus for an open collection: the first curve with
/// an endpoint that matches no other curve, oriented so the free endpoint
/// comes first.
fn find_terminus(curves: &[Curve], tol: &Tolerance) -> Result<(usize, Curve)> {
    for (index, curve) in curves.iter().enumerate() {
        let mut start_connected = false;
        let mut end_connected = false;
        for (other_index, other) in curves.iter().enumerate() {
            if index == other_index
                || curve.is_identical_to(other, tol)
                || curve.is_reversal_of(other, tol)
            {
                continue;
            }
            for endpoint in [other.start(), other.end()] {
                if tol.points_equal(&curve.start(), &endpoint) {
                    start_connected = true;
                }
                if tol.points_equal(&curve.end(), &endpoint) {
                    end_connected = true;
                }
            }
        }
        match (start_connected, end_connected) {
            // interior curve
            (true, true) => continue,
            // free endpoint is the end: flip so it leads
            (true, false) => return Ok((index, curve.reversed())),
            _ => return Ok((index, *curve)),
        }
    }
    Err(Error::InvalidLoop(
        "no terminus curve found for open chain".to_string(),
    ))
}

/// Walk outward from `start` (an oriented copy of `curves[start_index]`),
/// consuming at each step the one remaining curve whose endpoint coincides
/// with the running end.
///
/// The remaining set is an owned index list, so the caller's collection is
/// never mutated. Two candidates matching at the same step is ambiguous
/// topology and errors out. If the very first step finds nothing ahead of
/// the start curve, the start curve is reversed once and the walk retried:
/// the arbitrary start may have been picked facing away from the rest of
/// the loop.
fn extend_chain(
    curves: &[Curve],
    start_index: usize,
    start: Curve,
    tol: &Tolerance,
) -> Result<Vec<Curve>> {
    let mut chain = vec![start];
    let mut remaining: Vec<usize> = (0..curves.len()).filter(|&i| i != start_index).collect();
    let mut start_retried = false;

    while !remaining.is_empty() {
        let tail = chain[chain.len() - 1];
        let mut found: Option<(usize, Curve)> = None;

        for (position, &index) in remaining.iter().enumerate() {
            let candidate = &curves[index];
            // Never walk straight back over a duplicate or the reversal of
            // the curve just placed
            if tail.is_identical_to(candidate, tol) || tail.is_reversal_of(candidate, tol) {
                continue;
            }
            let oriented = if tol.points_equal(&tail.end(), &candidate.start()) {
                *candidate
            } else if tol.points_equal(&tail.end(), &candidate.end()) {
                candidate.reversed()
            } else {
                continue;
            };
            if found.is_some() {
                return Err(Error::InvalidLoop(
                    "more than one curve extends the chain from the same endpoint".to_string(),
                ));
            }
            found = Some((position, oriented));
        }

        match found {
            Some((position, oriented)) => {
                remaining.remove(position);
                chain.push(oriented);
            }
            None if chain.len() == 1 && !start_retried => {
                start_retried = true;
                chain[0] = chain[0].reversed();
            }
            None => break,
        }
    }

    Ok(chain)
}
