// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

use thiserror::Error;

/// The library's error type
#[derive(Error, Debug)]
pub enum CpaceError {
    /// Error for when a context field does not fit in a 16-bit length prefix
    #[error("context field of {0} bytes does not fit in a 16-bit length prefix")]
    ContextTooLong(usize),
    /// Error for when a protocol message has the wrong length or carries an
    /// invalid element encoding
    #[error("malformed protocol message")]
    MalformedMessage,
    /// Error for when a peer's element decodes to the group identity
    #[error("peer element is the group identity")]
    IdentityElement,
    /// Error for when the random source fails
    #[error("random source failure")]
    Rng(#[from] rand_core::Error),
    /// Error for when an input has an invalid length
    #[error(transparent)]
    InvalidLength(#[from] hkdf::hmac::digest::InvalidLength),
}
