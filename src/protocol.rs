// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

//! The protocol implementation

use curve25519_dalek::Scalar;
use rand_core::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::context::ContextInfo;
use crate::errors::CpaceError;
use crate::group::{derive_generator, random_salt, random_scalar};
use crate::kdf::{derive_key, SessionKey};
use crate::messages::{
    decode_message_a, decode_message_b, MessageA, MessageB, ELEMENT_LENGTH, MESSAGE_A_LENGTH,
    SALT_LENGTH,
};

type Result<T> = core::result::Result<T, CpaceError>;

/// The first step of the protocol, where the initiator samples a fresh salt
/// and secret scalar and produces [`MessageA`].
///
/// The returned [`InitiatorState`] must be retained until the responder's
/// message arrives, then consumed by a single call to
/// [`finish`](InitiatorState::finish). On any error the caller discards the
/// state and restarts the protocol with a fresh session.
pub fn start<R: RngCore + CryptoRng>(
    password: &[u8],
    context: &ContextInfo,
    rng: &mut R,
) -> Result<(MessageA, InitiatorState)> {
    let context_bytes = context.serialize()?;
    let salt = random_salt(rng)?;
    let mut scalar = random_scalar(rng)?;
    let generator = derive_generator(password, &salt, &context_bytes);
    let element = (generator * scalar).compress().to_bytes();
    let message_a = MessageA::new(&salt, &element);

    let state = InitiatorState {
        scalar,
        message_a: message_a.to_bytes(),
        context: context.clone(),
    };
    // Scalar is Copy; the state holds its own copy, so scrub the local one.
    scalar.zeroize();
    Ok((message_a, state))
}

/// The responder's single-shot side of the protocol: validate the initiator's
/// message, produce [`MessageB`], and derive the responder's session key.
///
/// No state is retained; the responder's key is complete as soon as this
/// returns. On any error, neither a message nor a key is produced.
pub fn exchange<R: RngCore + CryptoRng>(
    password: &[u8],
    context: &ContextInfo,
    message_a: &[u8],
    rng: &mut R,
) -> Result<(MessageB, SessionKey)> {
    let received = decode_message_a(message_a)?;
    let context_bytes = context.serialize()?;
    let mut scalar = random_scalar(rng)?;
    let generator = derive_generator(password, &received.salt, &context_bytes);
    let element_b = (generator * scalar).compress().to_bytes();
    let mut shared = received.element * scalar;
    scalar.zeroize();

    let key = derive_key(&received.salt, &received.element_bytes, &element_b, &shared);
    shared.zeroize();

    Ok((MessageB::new(&element_b), key?))
}

/// The initiator's retained state between [`start`] and
/// [`finish`](InitiatorState::finish).
///
/// Holds the session's secret scalar. The state is single-use: `finish`
/// consumes it by value, and the scalar is zeroized when the state drops,
/// whether the session completed or was abandoned.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct InitiatorState {
    scalar: Scalar,
    message_a: [u8; MESSAGE_A_LENGTH],
    #[zeroize(skip)]
    context: ContextInfo,
}

impl InitiatorState {
    /// The third step of the protocol, where the initiator validates the
    /// responder's message and derives its session key, consuming the state.
    pub fn finish(self, message_b: &[u8]) -> Result<SessionKey> {
        let (element_b, element) = decode_message_b(message_b)?;
        let mut shared = element * self.scalar;

        let mut salt = [0u8; SALT_LENGTH];
        salt.copy_from_slice(&self.message_a[..SALT_LENGTH]);
        let mut element_a = [0u8; ELEMENT_LENGTH];
        element_a.copy_from_slice(&self.message_a[SALT_LENGTH..]);

        let key = derive_key(&salt, &element_a, &element_b, &shared);
        shared.zeroize();
        key
    }

    /// The context this session was started with
    pub fn context(&self) -> &ContextInfo {
        &self.context
    }
}
