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

use anyhow::Result;
use zeroize::Zeroizing;

/// Output length of the negotiated hash (SHA-256) in bytes.
pub const HASH_LEN: usize = 32;

/// Trait for cryptographic hash functions used in ZRTP.
///
/// Inputs are given as an ordered list of chunks; the result is the hash of
/// their concatenation without materializing one contiguous buffer.
pub trait Hash {
    /// Computes the message digest over the concatenation of `chunks`.
    fn digest(&self, chunks: &[&[u8]]) -> [u8; HASH_LEN];
    /// Computes the HMAC over the concatenation of `chunks` using `key`.
    fn hmac(&self, key: &[u8], chunks: &[&[u8]]) -> [u8; HASH_LEN];
    /// Returns the algorithm name (e.g., "SHA256").
    fn name(&self) -> &'static str;
}

/// Trait for Diffie-Hellman key agreement algorithms.
///
/// One instance holds exactly one ephemeral key pair. Dropping the instance
/// destroys the private value.
pub trait DiffieHellman {
    /// Generates a new ephemeral keypair and returns the public value.
    fn generate_keypair(&mut self) -> Result<Vec<u8>>;
    /// Computes the raw shared secret from our private value and the peer's
    /// public value.
    fn compute_shared_secret(&mut self, peer_public_key: &[u8]) -> Result<Zeroizing<Vec<u8>>>;
    /// Largest public value this group may produce, in bytes.
    fn max_public_key_len(&self) -> usize;
    /// Returns the algorithm name (e.g., "DH3072").
    fn name(&self) -> &'static str;
}
