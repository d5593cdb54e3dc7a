// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

use rand_core::{CryptoRng, OsRng, RngCore};

use crate::{
    exchange, start, ContextInfo, CpaceError, SessionKey, KEY_LENGTH, MESSAGE_A_LENGTH,
    MESSAGE_B_LENGTH,
};

fn run_protocol(
    initiator_password: &[u8],
    responder_password: &[u8],
    initiator_context: &ContextInfo,
    responder_context: &ContextInfo,
) -> (SessionKey, SessionKey) {
    let (message_a, state) =
        start(initiator_password, initiator_context, &mut OsRng).expect("Error with start()");
    let (message_b, responder_key) = exchange(
        responder_password,
        responder_context,
        message_a.as_bytes(),
        &mut OsRng,
    )
    .expect("Error with exchange()");
    let initiator_key = state
        .finish(message_b.as_bytes())
        .expect("Error with finish()");
    (initiator_key, responder_key)
}

#[test]
fn test_agreement() {
    let context = ContextInfo::new(b"192.0.2.1:12345", b"192.0.2.2:42", None);
    let (initiator_key, responder_key) =
        run_protocol(b"password", b"password", &context, &context);
    assert_eq!(initiator_key, responder_key);
    assert_eq!(initiator_key.as_bytes().len(), KEY_LENGTH);
}

struct ResultCase {
    name: &'static str,
    password_a: &'static [u8],
    password_b: &'static [u8],
    context_a: ContextInfo,
    context_b: ContextInfo,
    equal: bool,
}

#[test]
fn test_results() {
    let cases = [
        ResultCase {
            name: "valid, without ad",
            password_a: b"p",
            password_b: b"p",
            context_a: ContextInfo::new(b"a", b"b", None),
            context_b: ContextInfo::new(b"a", b"b", None),
            equal: true,
        },
        ResultCase {
            name: "valid, with ad",
            password_a: b"p",
            password_b: b"p",
            context_a: ContextInfo::new(b"a", b"b", Some(b"x")),
            context_b: ContextInfo::new(b"a", b"b", Some(b"x")),
            equal: true,
        },
        ResultCase {
            name: "valid, equal identities",
            password_a: b"p",
            password_b: b"p",
            context_a: ContextInfo::new(b"a", b"a", None),
            context_b: ContextInfo::new(b"a", b"a", None),
            equal: true,
        },
        ResultCase {
            name: "different passwords",
            password_a: b"p",
            password_b: b"P",
            context_a: ContextInfo::new(b"a", b"b", None),
            context_b: ContextInfo::new(b"a", b"b", None),
            equal: false,
        },
        ResultCase {
            name: "different initiator identity",
            password_a: b"p",
            password_b: b"p",
            context_a: ContextInfo::new(b"a", b"b", None),
            context_b: ContextInfo::new(b"x", b"b", None),
            equal: false,
        },
        ResultCase {
            name: "different responder identity",
            password_a: b"p",
            password_b: b"p",
            context_a: ContextInfo::new(b"a", b"b", None),
            context_b: ContextInfo::new(b"a", b"x", None),
            equal: false,
        },
        ResultCase {
            name: "different ad",
            password_a: b"p",
            password_b: b"p",
            context_a: ContextInfo::new(b"a", b"b", Some(b"foo")),
            context_b: ContextInfo::new(b"a", b"b", Some(b"bar")),
            equal: false,
        },
        ResultCase {
            name: "swapped identities",
            password_a: b"p",
            password_b: b"p",
            context_a: ContextInfo::new(b"a", b"b", None),
            context_b: ContextInfo::new(b"b", b"a", None),
            equal: false,
        },
        ResultCase {
            name: "missing ad",
            password_a: b"p",
            password_b: b"p",
            context_a: ContextInfo::new(b"a", b"b", Some(b"x")),
            context_b: ContextInfo::new(b"a", b"b", None),
            equal: false,
        },
        ResultCase {
            name: "identity concatenation",
            password_a: b"p",
            password_b: b"p",
            context_a: ContextInfo::new(b"ax", b"b", None),
            context_b: ContextInfo::new(b"a", b"xb", None),
            equal: false,
        },
        ResultCase {
            name: "empty password",
            password_a: b"p",
            password_b: b"",
            context_a: ContextInfo::new(b"a", b"b", None),
            context_b: ContextInfo::new(b"a", b"b", None),
            equal: false,
        },
    ];

    for case in cases {
        let (initiator_key, responder_key) = run_protocol(
            case.password_a,
            case.password_b,
            &case.context_a,
            &case.context_b,
        );
        assert_eq!(initiator_key.as_bytes().len(), KEY_LENGTH, "{}", case.name);
        assert_eq!(responder_key.as_bytes().len(), KEY_LENGTH, "{}", case.name);
        assert_eq!(
            initiator_key == responder_key,
            case.equal,
            "unexpected key comparison result for case: {}",
            case.name
        );
    }
}

#[test]
fn test_message_sizes() {
    let context = ContextInfo::new(b"a", b"b", Some(b"ad"));
    let (message_a, state) = start(b"password", &context, &mut OsRng).unwrap();
    assert_eq!(message_a.as_bytes().len(), MESSAGE_A_LENGTH);

    let (message_b, _) =
        exchange(b"password", &context, message_a.as_bytes(), &mut OsRng).unwrap();
    assert_eq!(message_b.as_bytes().len(), MESSAGE_B_LENGTH);

    let key = state.finish(message_b.as_bytes()).unwrap();
    assert_eq!(key.as_bytes().len(), KEY_LENGTH);
}

#[test]
fn test_large_context_values() {
    let max_id = vec![b'a'; (1 << 16) - 1];
    let valid_context = ContextInfo::new(&max_id, b"b", None);
    let over_id = vec![b'a'; 1 << 16];
    let bad_context = ContextInfo::new(&over_id, b"b", None);

    let (message_a, _) = start(b"password", &valid_context, &mut OsRng).unwrap();
    exchange(b"password", &valid_context, message_a.as_bytes(), &mut OsRng).unwrap();

    match start(b"password", &bad_context, &mut OsRng) {
        Err(CpaceError::ContextTooLong(_)) => {}
        _ => panic!("Expected CpaceError::ContextTooLong"),
    }
    match exchange(b"password", &bad_context, message_a.as_bytes(), &mut OsRng) {
        Err(CpaceError::ContextTooLong(_)) => {}
        _ => panic!("Expected CpaceError::ContextTooLong"),
    }
}

#[test]
fn test_truncated_messages() {
    let context = ContextInfo::new(b"192.0.2.1:12345", b"192.0.2.2:42", None);
    let (message_a, state) = start(b"password", &context, &mut OsRng).unwrap();

    let message_a_bytes = message_a.as_bytes();
    match exchange(
        b"password",
        &context,
        &message_a_bytes[..MESSAGE_A_LENGTH - 1],
        &mut OsRng,
    ) {
        Err(CpaceError::MalformedMessage) => {}
        _ => panic!("Expected CpaceError::MalformedMessage"),
    }

    let (message_b, _) =
        exchange(b"password", &context, message_a_bytes, &mut OsRng).unwrap();
    match state.finish(&message_b.as_bytes()[..MESSAGE_B_LENGTH - 1]) {
        Err(CpaceError::MalformedMessage) => {}
        _ => panic!("Expected CpaceError::MalformedMessage"),
    }
}

#[test]
fn test_tampered_element_in_message_a() {
    let context = ContextInfo::new(b"192.0.2.1:12345", b"192.0.2.2:42", None);
    let (message_a, state) = start(b"password", &context, &mut OsRng).unwrap();

    let mut tampered = message_a.to_bytes();
    tampered[MESSAGE_A_LENGTH - 1] ^= 0x01;
    // Flipping a bit of the element encoding either breaks decoding or lands
    // on a different element; in the latter case the two keys must disagree.
    match exchange(b"password", &context, &tampered, &mut OsRng) {
        Err(CpaceError::MalformedMessage) | Err(CpaceError::IdentityElement) => {}
        Ok((message_b, responder_key)) => {
            let initiator_key = state.finish(message_b.as_bytes()).unwrap();
            assert_ne!(initiator_key, responder_key);
        }
        Err(err) => panic!("unexpected error: {err}"),
    }
}

#[test]
fn test_tampered_salt_in_message_a() {
    let context = ContextInfo::new(b"192.0.2.1:12345", b"192.0.2.2:42", None);
    let (message_a, state) = start(b"password", &context, &mut OsRng).unwrap();

    let mut tampered = message_a.to_bytes();
    tampered[0] ^= 0x01;
    let (message_b, responder_key) =
        exchange(b"password", &context, &tampered, &mut OsRng).unwrap();
    let initiator_key = state.finish(message_b.as_bytes()).unwrap();
    assert_ne!(initiator_key, responder_key);
}

#[test]
fn test_tampered_message_b() {
    let context = ContextInfo::new(b"192.0.2.1:12345", b"192.0.2.2:42", None);
    let (message_a, state) = start(b"password", &context, &mut OsRng).unwrap();
    let (message_b, responder_key) =
        exchange(b"password", &context, message_a.as_bytes(), &mut OsRng).unwrap();

    let mut tampered = message_b.to_bytes();
    tampered[MESSAGE_B_LENGTH - 1] ^= 0x01;
    match state.finish(&tampered) {
        Err(CpaceError::MalformedMessage) | Err(CpaceError::IdentityElement) => {}
        Ok(initiator_key) => assert_ne!(initiator_key, responder_key),
        Err(err) => panic!("unexpected error: {err}"),
    }
}

#[test]
fn test_identity_rejection() {
    let context = ContextInfo::new(b"192.0.2.1:12345", b"192.0.2.2:42", None);
    let (message_a, state) = start(b"password", &context, &mut OsRng).unwrap();

    // salt || identity encoding
    let mut identity_message_a = [0u8; MESSAGE_A_LENGTH];
    identity_message_a[..16].copy_from_slice(&message_a.as_bytes()[..16]);
    match exchange(b"password", &context, &identity_message_a, &mut OsRng) {
        Err(CpaceError::IdentityElement) => {}
        _ => panic!("Expected CpaceError::IdentityElement"),
    }

    let identity_message_b = [0u8; MESSAGE_B_LENGTH];
    match state.finish(&identity_message_b) {
        Err(CpaceError::IdentityElement) => {}
        _ => panic!("Expected CpaceError::IdentityElement"),
    }
}

struct FailingRng;

impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 {
        unreachable!()
    }

    fn next_u64(&mut self) -> u64 {
        unreachable!()
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        unreachable!()
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand_core::Error> {
        Err(rand_core::Error::from(
            core::num::NonZeroU32::new(rand_core::Error::CUSTOM_START).unwrap(),
        ))
    }
}

impl CryptoRng for FailingRng {}

#[test]
fn test_rng_failure() {
    let context = ContextInfo::new(b"a", b"b", None);

    match start(b"password", &context, &mut FailingRng) {
        Err(CpaceError::Rng(_)) => {}
        _ => panic!("Expected CpaceError::Rng"),
    }

    let (message_a, _) = start(b"password", &context, &mut OsRng).unwrap();
    match exchange(b"password", &context, message_a.as_bytes(), &mut FailingRng) {
        Err(CpaceError::Rng(_)) => {}
        _ => panic!("Expected CpaceError::Rng"),
    }
}

#[test]
fn test_state_retains_context() {
    let context = ContextInfo::new(b"a", b"b", Some(b"ad"));
    let (_, state) = start(b"password", &context, &mut OsRng).unwrap();
    assert_eq!(state.context(), &context);
}
