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

//! SAS (Short Authentication String) rendering.

use crate::traits::Hash;

/// Constant string mixed into the SAS hash.
pub const SAS_STRING: &[u8] = b"Short Authentication String";

/// Number of hash bits fed to the base32 encoder.
const SAS_HASH_BITS: usize = 160;

const BASE32_CHARS: &[u8; 32] = b"ybndrfg8ejkmcpqxot1uwisza345h769";

/// Encodes the first `bits` bits of `data` in z-base-32, 5 bits per character.
///
/// `bits` is rounded up to a whole character; missing input bits read as zero.
pub fn base32_encode(data: &[u8], bits: usize) -> String {
    let chars = bits.div_ceil(5);
    let mut out = String::with_capacity(chars);

    for i in 0..chars {
        let mut value = 0usize;
        for bit in i * 5..i * 5 + 5 {
            let byte = data.get(bit / 8).copied().unwrap_or(0);
            value = (value << 1) | ((byte >> (7 - bit % 8)) & 1) as usize;
        }
        out.push(BASE32_CHARS[value] as char);
    }

    out
}

/// Computes the 4-character SAS for a DH exchange.
///
/// Both peers feed the Initiator's public value first, then the Responder's,
/// so the result does not depend on which side computes it.
pub fn compute_sas(hash: &dyn Hash, pv_initiator: &[u8], pv_responder: &[u8]) -> String {
    let sas_hash = hash.digest(&[pv_initiator, pv_responder, SAS_STRING]);
    let encoded = base32_encode(&sas_hash, SAS_HASH_BITS);
    encoded[encoded.len() - 4..].to_string()
}
