// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

//! Final key derivation with transcript binding

use core::fmt;

use curve25519_dalek::ristretto::RistrettoPoint;
use hkdf::hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::CpaceError;
use crate::messages::{ELEMENT_LENGTH, SALT_LENGTH};

/// The length of the derived session key
pub const KEY_LENGTH: usize = 32;

/// The derived high-entropy session key.
///
/// Two honest parties that ran the protocol with matching passwords and
/// contexts hold equal keys; otherwise the keys are uncorrelated. Equality
/// comparison runs in constant time, and the contents are zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SessionKey([u8; KEY_LENGTH]);

impl SessionKey {
    /// The key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.0
    }
}

impl AsRef<[u8]> for SessionKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq for SessionKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for SessionKey {}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionKey([REDACTED])")
    }
}

/// Derive the session key from the shared element and the transcript.
///
/// The HMAC key is salt || Aenc || Benc, so reordering or substituting either
/// exchanged message yields a different key; the message is the canonical
/// encoding of the shared element.
pub(crate) fn derive_key(
    salt: &[u8; SALT_LENGTH],
    element_a: &[u8; ELEMENT_LENGTH],
    element_b: &[u8; ELEMENT_LENGTH],
    shared: &RistrettoPoint,
) -> Result<SessionKey, CpaceError> {
    let mut transcript = [0u8; SALT_LENGTH + 2 * ELEMENT_LENGTH];
    transcript[..SALT_LENGTH].copy_from_slice(salt);
    transcript[SALT_LENGTH..SALT_LENGTH + ELEMENT_LENGTH].copy_from_slice(element_a);
    transcript[SALT_LENGTH + ELEMENT_LENGTH..].copy_from_slice(element_b);

    let mut mac = Hmac::<Sha256>::new_from_slice(&transcript)?;
    let mut shared_bytes = shared.compress().to_bytes();
    mac.update(&shared_bytes);
    shared_bytes.zeroize();

    Ok(SessionKey(mac.finalize().into_bytes().into()))
}
