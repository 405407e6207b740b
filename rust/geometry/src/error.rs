// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for lattice and boolean operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during lattice conversion or boolean operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Core loop error: {0}")]
    Core(#[from] curveloop_core::Error),
}
