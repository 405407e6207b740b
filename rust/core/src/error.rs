// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for core loop operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving curve collections into loops
#[derive(Error, Debug)]
pub enum Error {
    /// The curve set does not form a well-formed closed or open chain.
    ///
    /// Raised on ambiguous incidence, multiple disconnected loops, or a
    /// broken extension walk. Callers must not swallow this to continue
    /// processing: a guessed topology corrupts everything downstream.
    #[error("Invalid curve loop: {0}")]
    InvalidLoop(String),
}
