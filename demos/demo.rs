// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

use cpace_r255::rand_core::OsRng;
use cpace_r255::ContextInfo;

fn main() {
    let context = ContextInfo::new(b"192.0.2.1:12345", b"192.0.2.2:42", None);

    let (message_a, state) =
        cpace_r255::start(b"password", &context, &mut OsRng).expect("Error with start()");
    println!(
        "message_a bytes ({} bytes): {:?}",
        message_a.as_bytes().len(),
        hex::encode(message_a.as_bytes())
    );
    // Send message_a over the wire to the responder

    let (message_b, responder_key) =
        cpace_r255::exchange(b"password", &context, message_a.as_bytes(), &mut OsRng)
            .expect("Error with exchange()");
    println!(
        "message_b bytes ({} bytes): {:?}",
        message_b.as_bytes().len(),
        hex::encode(message_b.as_bytes())
    );
    // Send message_b over the wire to the initiator

    let initiator_key = state
        .finish(message_b.as_bytes())
        .expect("Error with finish()");

    assert_eq!(initiator_key, responder_key);
    println!(
        "both parties derived the same {}-byte key",
        initiator_key.as_bytes().len()
    );
}
