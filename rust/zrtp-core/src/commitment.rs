/*
 * Copyright 2026 - Francisco F. Pinochet
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *         http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! The Initiator's hash commitment (`hvi`).
//!
//! The Commit carries `hvi = H(pvi || responder Hello algorithm block)`.
//! Once DHPart2 reveals `pvi`, the Responder recomputes the value over its own
//! Hello. A mismatch means either the public value or the offer the Initiator
//! negotiated against was altered in transit.

use crate::error::ZrtpError;
use zrtp_crypto::{constant_time_eq, Hash, HASH_LEN};
use zrtp_proto::HelloPacket;

/// Computes `hvi` over a public value and the Responder's Hello.
pub fn compute_hvi(hash: &dyn Hash, public_value: &[u8], responder_hello: &HelloPacket) -> [u8; HASH_LEN] {
    let block = responder_hello.algorithm_block();
    hash.digest(&[public_value, block.as_slice()])
}

/// Recomputes `hvi` for the Initiator's revealed public value and compares it
/// with the committed one.
pub fn verify_hvi(
    hash: &dyn Hash,
    initiator_public_value: &[u8],
    own_hello: &HelloPacket,
    committed_hvi: &[u8; HASH_LEN],
) -> Result<(), ZrtpError> {
    let expected = compute_hvi(hash, initiator_public_value, own_hello);
    if constant_time_eq(&expected, committed_hvi) {
        Ok(())
    } else {
        Err(ZrtpError::HviMismatch)
    }
}

/// Resolves a Commit collision: the side holding the larger `hvi` keeps the
/// Initiator role.
pub fn keeps_initiator_role(own_hvi: &[u8; HASH_LEN], peer_hvi: &[u8; HASH_LEN]) -> bool {
    own_hvi > peer_hvi
}
