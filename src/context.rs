// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

//! The session context shared by both parties

use crate::errors::CpaceError;

/// Protocol label mixed into every derived generator, written without a
/// length prefix.
const CONTEXT_LABEL: &[u8; 10] = b"cpace-r255";

/// Contextual data bound to the derived session key.
///
/// Both parties must construct byte-identical contexts to agree on a key: the
/// initiator's identity, the responder's identity, and optional associated
/// data all feed the password hashing step. A [`ContextInfo`] is immutable
/// once constructed and may be reused across sessions and shared between
/// threads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextInfo {
    initiator_id: Vec<u8>,
    responder_id: Vec<u8>,
    associated_data: Option<Vec<u8>>,
}

impl ContextInfo {
    /// Create a new [`ContextInfo`] object
    pub fn new(initiator_id: &[u8], responder_id: &[u8], associated_data: Option<&[u8]>) -> Self {
        Self {
            initiator_id: initiator_id.to_vec(),
            responder_id: responder_id.to_vec(),
            associated_data: associated_data.map(|ad| ad.to_vec()),
        }
    }

    /// Canonical serialization fed into password hashing.
    ///
    /// Each field carries a 2-byte big-endian length prefix, so no two
    /// distinct contexts serialize to the same byte string. An absent
    /// associated-data field encodes as a zero-length field.
    pub(crate) fn serialize(&self) -> Result<Vec<u8>, CpaceError> {
        let associated_data = self.associated_data.as_deref().unwrap_or_default();

        let mut bytes = Vec::with_capacity(
            CONTEXT_LABEL.len()
                + 6
                + self.initiator_id.len()
                + self.responder_id.len()
                + associated_data.len(),
        );
        bytes.extend_from_slice(CONTEXT_LABEL);
        push_length_prefixed(&mut bytes, &self.initiator_id)?;
        push_length_prefixed(&mut bytes, &self.responder_id)?;
        push_length_prefixed(&mut bytes, associated_data)?;
        Ok(bytes)
    }
}

fn push_length_prefixed(bytes: &mut Vec<u8>, field: &[u8]) -> Result<(), CpaceError> {
    let len = u16::try_from(field.len()).map_err(|_| CpaceError::ContextTooLong(field.len()))?;
    bytes.extend_from_slice(&len.to_be_bytes());
    bytes.extend_from_slice(field);
    Ok(())
}
