// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

//! The two wire messages and their validation

use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use curve25519_dalek::traits::IsIdentity;

use crate::errors::CpaceError;

/// The length of the session salt carried in [`MessageA`]
pub const SALT_LENGTH: usize = 16;
/// The length of a canonical ristretto255 element encoding
pub(crate) const ELEMENT_LENGTH: usize = 32;
/// The length of the initiator's message: the salt followed by one element
pub const MESSAGE_A_LENGTH: usize = SALT_LENGTH + ELEMENT_LENGTH;
/// The length of the responder's message: one element
pub const MESSAGE_B_LENGTH: usize = ELEMENT_LENGTH;

/// The first message in the protocol, created by the initiator: the session
/// salt followed by the initiator's public element
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageA([u8; MESSAGE_A_LENGTH]);

impl MessageA {
    pub(crate) fn new(salt: &[u8; SALT_LENGTH], element: &[u8; ELEMENT_LENGTH]) -> Self {
        let mut bytes = [0u8; MESSAGE_A_LENGTH];
        bytes[..SALT_LENGTH].copy_from_slice(salt);
        bytes[SALT_LENGTH..].copy_from_slice(element);
        Self(bytes)
    }

    /// The wire encoding of this message
    pub fn as_bytes(&self) -> &[u8; MESSAGE_A_LENGTH] {
        &self.0
    }

    /// The wire encoding of this message, by value
    pub fn to_bytes(&self) -> [u8; MESSAGE_A_LENGTH] {
        self.0
    }
}

impl AsRef<[u8]> for MessageA {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// The second message in the protocol, created by the responder: the
/// responder's public element
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageB([u8; MESSAGE_B_LENGTH]);

impl MessageB {
    pub(crate) fn new(element: &[u8; ELEMENT_LENGTH]) -> Self {
        Self(*element)
    }

    /// The wire encoding of this message
    pub fn as_bytes(&self) -> &[u8; MESSAGE_B_LENGTH] {
        &self.0
    }

    /// The wire encoding of this message, by value
    pub fn to_bytes(&self) -> [u8; MESSAGE_B_LENGTH] {
        self.0
    }
}

impl AsRef<[u8]> for MessageB {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// The validated contents of an initiator message received off the wire.
pub(crate) struct ReceivedMessageA {
    pub(crate) salt: [u8; SALT_LENGTH],
    pub(crate) element_bytes: [u8; ELEMENT_LENGTH],
    pub(crate) element: RistrettoPoint,
}

pub(crate) fn decode_message_a(bytes: &[u8]) -> Result<ReceivedMessageA, CpaceError> {
    if bytes.len() != MESSAGE_A_LENGTH {
        return Err(CpaceError::MalformedMessage);
    }
    let mut salt = [0u8; SALT_LENGTH];
    salt.copy_from_slice(&bytes[..SALT_LENGTH]);
    let mut element_bytes = [0u8; ELEMENT_LENGTH];
    element_bytes.copy_from_slice(&bytes[SALT_LENGTH..]);
    let element = decode_element(&element_bytes)?;
    Ok(ReceivedMessageA {
        salt,
        element_bytes,
        element,
    })
}

pub(crate) fn decode_message_b(
    bytes: &[u8],
) -> Result<([u8; ELEMENT_LENGTH], RistrettoPoint), CpaceError> {
    let element_bytes: [u8; ELEMENT_LENGTH] = bytes
        .try_into()
        .map_err(|_| CpaceError::MalformedMessage)?;
    let element = decode_element(&element_bytes)?;
    Ok((element_bytes, element))
}

/// Decode a canonical element encoding.
///
/// Ristretto255 decoding rejects non-canonical encodings and byte strings
/// that are not elements; the identity is rejected here as an explicit check,
/// since a peer sending it would collapse the shared secret.
fn decode_element(bytes: &[u8; ELEMENT_LENGTH]) -> Result<RistrettoPoint, CpaceError> {
    let element = CompressedRistretto(*bytes)
        .decompress()
        .ok_or(CpaceError::MalformedMessage)?;
    if element.is_identity() {
        return Err(CpaceError::IdentityElement);
    }
    Ok(element)
}
