/*
 * Copyright 2006 - 2018, Werner Dittmann
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

use crate::traits::{Hash, HASH_LEN};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Label for the Initiator's SRTP master key.
pub const LABEL_INITIATOR_KEY: &[u8] = b"Initiator SRTP master key";
/// Label for the Initiator's SRTP master salt.
pub const LABEL_INITIATOR_SALT: &[u8] = b"Initiator SRTP master salt";
/// Label for the Responder's SRTP master key.
pub const LABEL_RESPONDER_KEY: &[u8] = b"Responder SRTP master key";
/// Label for the Responder's SRTP master salt.
pub const LABEL_RESPONDER_SALT: &[u8] = b"Responder SRTP master salt";
/// Label for the key protecting Confirm messages.
pub const LABEL_HMAC_KEY: &[u8] = b"HMAC key";
/// Label for the retained secret carried into the next session.
pub const LABEL_RETAINED_SECRET: &[u8] = b"retained secret";

/// A structure holding all keys derived from `s0` for a ZRTP session.
///
/// Every field is wiped when the structure is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ZrtpKeys {
    /// SRTP master key for initiator.
    pub srtp_key_i: [u8; HASH_LEN],
    /// SRTP master salt for initiator.
    pub srtp_salt_i: [u8; HASH_LEN],
    /// SRTP master key for responder.
    pub srtp_key_r: [u8; HASH_LEN],
    /// SRTP master salt for responder.
    pub srtp_salt_r: [u8; HASH_LEN],
    /// HMAC key protecting Confirm packets.
    pub hmac_key: [u8; HASH_LEN],
    /// New retained secret RS1.
    pub new_rs1: [u8; HASH_LEN],
}

/// Derives the root secret `s0`.
///
/// s0 = hash(hash(DHss) | s1 | s2 | ...)
///
/// `retained` must already be in canonical order; it holds between zero and
/// two matching retained secrets. The hashed DH secret is wiped before
/// returning.
pub fn derive_s0(
    hash: &dyn Hash,
    dh_result: &[u8],
    retained: &[&[u8; HASH_LEN]],
) -> Zeroizing<[u8; HASH_LEN]> {
    let hashed_dh = Zeroizing::new(hash.digest(&[dh_result]));

    let mut chunks: Vec<&[u8]> = Vec::with_capacity(1 + retained.len());
    chunks.push(hashed_dh.as_slice());
    for secret in retained {
        chunks.push(secret.as_slice());
    }

    Zeroizing::new(hash.digest(&chunks))
}

/// Derives all session keys from `s0`.
pub fn derive_session_keys(hash: &dyn Hash, s0: &[u8; HASH_LEN]) -> ZrtpKeys {
    ZrtpKeys {
        srtp_key_i: hash.hmac(s0, &[LABEL_INITIATOR_KEY]),
        srtp_salt_i: hash.hmac(s0, &[LABEL_INITIATOR_SALT]),
        srtp_key_r: hash.hmac(s0, &[LABEL_RESPONDER_KEY]),
        srtp_salt_r: hash.hmac(s0, &[LABEL_RESPONDER_SALT]),
        hmac_key: hash.hmac(s0, &[LABEL_HMAC_KEY]),
        new_rs1: hash.hmac(s0, &[LABEL_RETAINED_SECRET]),
    }
}

/// Runs the whole derivation from the raw DH secret, so that `s0` never
/// leaves this function.
pub fn derive_keys(hash: &dyn Hash, dh_result: &[u8], retained: &[&[u8; HASH_LEN]]) -> ZrtpKeys {
    let s0 = derive_s0(hash, dh_result, retained);
    derive_session_keys(hash, &s0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::Sha256;

    #[test]
    fn test_s0_without_retained_secrets() {
        let hash = Sha256;
        let dh_result = vec![0xAA; 384];
        let s0 = derive_s0(&hash, &dh_result, &[]);

        let inner = hash.digest(&[dh_result.as_slice()]);
        assert_eq!(*s0, hash.digest(&[inner.as_slice()]));
    }

    #[test]
    fn test_retained_secrets_change_s0() {
        let hash = Sha256;
        let dh_result = vec![0xAA; 384];
        let rs1 = [0x11; 32];
        let rs2 = [0x22; 32];

        let plain = derive_s0(&hash, &dh_result, &[]);
        let one = derive_s0(&hash, &dh_result, &[&rs1]);
        let both = derive_s0(&hash, &dh_result, &[&rs1, &rs2]);
        let swapped = derive_s0(&hash, &dh_result, &[&rs2, &rs1]);

        assert_ne!(*plain, *one);
        assert_ne!(*one, *both);
        assert_ne!(*both, *swapped);
    }

    #[test]
    fn test_session_keys_are_distinct() {
        let keys = derive_keys(&Sha256, &[0x5A; 384], &[]);
        let all = [
            keys.srtp_key_i,
            keys.srtp_salt_i,
            keys.srtp_key_r,
            keys.srtp_salt_r,
            keys.hmac_key,
            keys.new_rs1,
        ];
        for i in 0..all.len() {
            for j in i + 1..all.len() {
                assert_ne!(all[i], all[j]);
            }
        }
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let rs1 = [0x33; 32];
        let a = derive_keys(&Sha256, &[0x01; 512], &[&rs1]);
        let b = derive_keys(&Sha256, &[0x01; 512], &[&rs1]);
        assert_eq!(a.srtp_key_i, b.srtp_key_i);
        assert_eq!(a.new_rs1, b.new_rs1);
    }
}
