// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

//! Password hashing into the group and secret sampling

use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::Scalar;
use hkdf::Hkdf;
use rand_core::{CryptoRng, RngCore};
use sha2::Sha256;
use zeroize::Zeroize;

use crate::errors::CpaceError;
use crate::messages::SALT_LENGTH;

/// Derive the session-specific generator from the password, the session salt,
/// and the serialized context.
///
/// HKDF keeps the three inputs in separate roles: the low-entropy password is
/// the input keying material, the public per-session salt is the extraction
/// salt, and the variable-length context is the expansion info. The 64-byte
/// output feeds ristretto255's map from uniform bytes, which never yields the
/// identity element.
pub(crate) fn derive_generator(
    password: &[u8],
    salt: &[u8; SALT_LENGTH],
    context_bytes: &[u8],
) -> RistrettoPoint {
    let hkdf = Hkdf::<Sha256>::new(Some(salt), password);
    let mut uniform = [0u8; 64];
    hkdf.expand(context_bytes, &mut uniform)
        .expect("64 bytes is a valid HKDF-SHA-256 output length");
    let generator = RistrettoPoint::from_uniform_bytes(&uniform);
    uniform.zeroize();
    generator
}

/// Sample a uniform scalar by wide reduction of 64 random bytes.
pub(crate) fn random_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Scalar, CpaceError> {
    let mut wide = [0u8; 64];
    rng.try_fill_bytes(&mut wide)?;
    let scalar = Scalar::from_bytes_mod_order_wide(&wide);
    wide.zeroize();
    Ok(scalar)
}

/// Sample a fresh session salt.
pub(crate) fn random_salt<R: RngCore + CryptoRng>(
    rng: &mut R,
) -> Result<[u8; SALT_LENGTH], CpaceError> {
    let mut salt = [0u8; SALT_LENGTH];
    rng.try_fill_bytes(&mut salt)?;
    Ok(salt)
}
