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

//! Building and checking Confirm messages.

use crate::error::ZrtpError;
use zrtp_crypto::{constant_time_eq, Hash, HASH_LEN};
use zrtp_proto::{ConfirmPacket, GenericAckPacket, GoClearPacket, PLAIN_TEXT_LEN, SAS_VERIFIED_FLAG};

/// Marker both sides place in every Confirm.
pub const KNOWN_PLAINTEXT: [u8; PLAIN_TEXT_LEN] = *b"known plaintext";

/// Builds a Confirm of `message_type` authenticated with `hmac_key`.
pub fn build_confirm(
    hash: &dyn Hash,
    hmac_key: &[u8; HASH_LEN],
    message_type: [u8; 8],
    sas_verified: bool,
) -> ConfirmPacket {
    let flag = if sas_verified { SAS_VERIFIED_FLAG } else { 0 };
    let mut confirm = ConfirmPacket::new(message_type, KNOWN_PLAINTEXT, flag);
    confirm.hmac = hash.hmac(hmac_key, &[confirm.authenticated_bytes().as_slice()]);
    confirm
}

/// Checks the marker, then the HMAC, of a received Confirm.
pub fn validate_confirm(
    hash: &dyn Hash,
    hmac_key: &[u8; HASH_LEN],
    confirm: &ConfirmPacket,
) -> Result<(), ZrtpError> {
    if !constant_time_eq(&confirm.plain_text, &KNOWN_PLAINTEXT) {
        return Err(ZrtpError::ConfirmUnreadable);
    }
    let expected = hash.hmac(hmac_key, &[confirm.authenticated_bytes().as_slice()]);
    if !constant_time_eq(&expected, &confirm.hmac) {
        return Err(ZrtpError::ConfirmHmacMismatch);
    }
    Ok(())
}

/// Answers a GoClear request. Always refused: encryption is never dropped.
pub fn prepare_clear_ack(_go_clear: &GoClearPacket) -> Result<GenericAckPacket, ZrtpError> {
    Err(ZrtpError::GoClearUnsupported)
}
