// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

//! An implementation of the CPace password-authenticated key exchange (PAKE)
//! over the ristretto255 prime-order group
//!
//! ⚠️ **Warning**: This implementation has not been audited. Use at your own risk!
//!
//! # Overview
//!
//! cpace-r255 is a protocol between two parties: an initiator and a
//! responder. Each party holds a low-entropy password, and after exchanging
//! two messages over an untrusted network they each derive a high-entropy
//! [`SessionKey`]. If the two participants held matching passwords and
//! constructed matching [`ContextInfo`]s, then they end up with the same key.
//! Otherwise, their keys will not match, and in fact be (computationally)
//! uncorrelated — an active attacker learns nothing beyond one online
//! password guess per session.
//!
//! The protocol yields implicit authentication only: neither party learns
//! whether the peer actually held the password until the derived keys are
//! used and compared. Callers that need explicit authentication should run a
//! key-confirmation exchange over the derived key before releasing it to
//! application code.
//!
//! # Setup
//!
//! Both parties must agree on a [`ContextInfo`] binding the initiator's
//! identity, the responder's identity, and optional associated data into the
//! key. A higher-level protocol with its own session identifier should fold
//! that identifier into the associated data:
//!
//! ```
//! use cpace_r255::ContextInfo;
//! let context = ContextInfo::new(b"192.0.2.1:12345", b"192.0.2.2:42", None);
//! ```
//!
//! # Protocol Execution
//!
//! The protocol occurs over three steps, involving two messages between the
//! initiator and responder.
//!
//! ## Initiator Start
//!
//! The initiator begins the protocol by invoking the following with the
//! password, a context, and a source of randomness:
//!
//! ```
//! # use cpace_r255::ContextInfo;
//! # let context = ContextInfo::new(b"192.0.2.1:12345", b"192.0.2.2:42", None);
//! use cpace_r255::rand_core::OsRng;
//!
//! let (message_a, state) = cpace_r255::start(b"password", &context, &mut OsRng)
//!     .expect("Error with start()");
//! // Send message_a.as_bytes() over the wire to the responder
//! ```
//!
//! The initiator retains the [`InitiatorState`] object for the
//! [third step](#initiator-finish), and sends the 48-byte [`MessageA`]
//! encoding over the wire to the responder.
//!
//! ## Responder Exchange
//!
//! Next, the responder invokes the following with its password, its own view
//! of the context, the received message bytes, and a source of randomness:
//!
//! ```
//! # use cpace_r255::ContextInfo;
//! # let context = ContextInfo::new(b"192.0.2.1:12345", b"192.0.2.2:42", None);
//! # use cpace_r255::rand_core::OsRng;
//! # let (message_a, state) = cpace_r255::start(b"password", &context, &mut OsRng)
//! #     .expect("Error with start()");
//! # // Send message_a.as_bytes() over the wire to the responder
//! let (message_b, responder_key) =
//!     cpace_r255::exchange(b"password", &context, message_a.as_bytes(), &mut OsRng)
//!         .expect("Error with exchange()");
//! // Send message_b.as_bytes() over the wire to the initiator
//! ```
//!
//! The exchange is single-shot: the responder retains no state, holds its
//! [`SessionKey`] immediately, and sends the 32-byte [`MessageB`] encoding
//! over the wire to the initiator.
//!
//! ## Initiator Finish
//!
//! Finally, the initiator invokes the following on the state retained from
//! [the first step](#initiator-start), with the message bytes received from
//! the responder:
//!
//! ```
//! # use cpace_r255::ContextInfo;
//! # let context = ContextInfo::new(b"192.0.2.1:12345", b"192.0.2.2:42", None);
//! # use cpace_r255::rand_core::OsRng;
//! # let (message_a, state) = cpace_r255::start(b"password", &context, &mut OsRng)
//! #     .expect("Error with start()");
//! # // Send message_a.as_bytes() over the wire to the responder
//! # let (message_b, responder_key) =
//! #     cpace_r255::exchange(b"password", &context, message_a.as_bytes(), &mut OsRng)
//! #         .expect("Error with exchange()");
//! # // Send message_b.as_bytes() over the wire to the initiator
//! let initiator_key = state
//!     .finish(message_b.as_bytes())
//!     .expect("Error with finish()");
//!
//! assert_eq!(initiator_key, responder_key);
//! ```
//!
//! Calling [`finish`](InitiatorState::finish) consumes the state, so a state
//! can never be used for more than one response. On any error the session is
//! dead: callers discard the state and restart the protocol with a fresh
//! salt and scalar.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(clippy::doc_markdown, missing_docs, rustdoc::all)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod context;
mod errors;
mod group;
mod kdf;
mod messages;
mod protocol;
#[cfg(test)]
mod tests;

pub use context::ContextInfo;
pub use errors::CpaceError;
pub use kdf::{SessionKey, KEY_LENGTH};
pub use messages::{MessageA, MessageB, MESSAGE_A_LENGTH, MESSAGE_B_LENGTH, SALT_LENGTH};
pub use protocol::{exchange, start, InitiatorState};
pub use rand_core;
