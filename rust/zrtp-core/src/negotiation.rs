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

//! Algorithm negotiation.
//!
//! The Initiator picks one algorithm per category from the peer's Hello by
//! walking its *own* preference list and taking the first entry the peer
//! offers anywhere. Local policy therefore always wins over the peer's
//! ordering. The Responder then checks that every algorithm named in the
//! Commit is one it is configured to accept.
//!
//! Only the first [`MAX_ALGORITHMS`] tags of each offered list count, since
//! no more are covered by the Hello commitment.

use crate::algorithms::{
    Algorithm, AuthLength, CipherAlgorithm, HashAlgorithm, PubKeyAlgorithm, SasAlgorithm,
};
use crate::config::ZrtpConfig;
use crate::error::ZrtpError;
use zrtp_proto::{AlgorithmTag, CommitPacket, HelloPacket, MAX_ALGORITHMS};

/// One chosen algorithm per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NegotiatedAlgorithms {
    /// Hash for hvi, the transcript, s0 and the KDF.
    pub hash: HashAlgorithm,
    /// SRTP cipher; its key length sizes the exported SRTP keys.
    pub cipher: CipherAlgorithm,
    /// SRTP authentication tag length.
    pub auth_length: AuthLength,
    /// DH group for the key agreement.
    pub pub_key: PubKeyAlgorithm,
    /// How the SAS is rendered.
    pub sas: SasAlgorithm,
}

impl NegotiatedAlgorithms {
    /// AES-256 without the 4096-bit group leaves the key agreement as the
    /// weaker link.
    pub fn weak_key_agreement(&self) -> bool {
        self.cipher == CipherAlgorithm::Aes256 && self.pub_key != PubKeyAlgorithm::Dh4096
    }

    /// Writes the selection into a Commit.
    pub fn apply_to(&self, commit: &mut CommitPacket) {
        commit.hash_type = self.hash.tag();
        commit.cipher_type = self.cipher.tag();
        commit.auth_length = self.auth_length.tag();
        commit.pub_key_type = self.pub_key.tag();
        commit.sas_type = self.sas.tag();
    }
}

/// Returns the first entry of `local` that appears among the first
/// [`MAX_ALGORITHMS`] tags of `offered`.
pub fn select<A: Algorithm>(local: &[A], offered: &[AlgorithmTag]) -> Result<A, ZrtpError> {
    let offered = &offered[..offered.len().min(MAX_ALGORITHMS)];
    local
        .iter()
        .copied()
        .find(|alg| offered.contains(&alg.tag()))
        .ok_or(ZrtpError::NoCommonAlgorithm { category: A::CATEGORY })
}

/// Selects the algorithms for a Commit answering `peer`'s Hello.
pub fn negotiate(config: &ZrtpConfig, peer: &HelloPacket) -> Result<NegotiatedAlgorithms, ZrtpError> {
    let cipher = select(&config.ciphers, &peer.cipher_types)?;
    let hash = select(&config.hashes, &peer.hash_types)?;
    let pub_key = select(&config.pub_keys, &peer.pub_key_types)?;
    let sas = select(&config.sas_types, &peer.sas_types)?;
    let auth_length = select(&config.auth_lengths, &peer.auth_lengths)?;
    Ok(NegotiatedAlgorithms { hash, cipher, auth_length, pub_key, sas })
}

fn accept<A: Algorithm>(local: &[A], tag: &AlgorithmTag) -> Result<A, ZrtpError> {
    A::from_tag(tag)
        .filter(|alg| local.contains(alg))
        .ok_or(ZrtpError::UnsupportedCommit { category: A::CATEGORY })
}

/// Checks a received Commit against the local configuration.
pub fn accept_commit(
    config: &ZrtpConfig,
    commit: &CommitPacket,
) -> Result<NegotiatedAlgorithms, ZrtpError> {
    let cipher = accept(&config.ciphers, &commit.cipher_type)?;
    let auth_length = accept(&config.auth_lengths, &commit.auth_length)?;
    let hash = accept(&config.hashes, &commit.hash_type)?;
    let pub_key = accept(&config.pub_keys, &commit.pub_key_type)?;
    let sas = accept(&config.sas_types, &commit.sas_type)?;
    Ok(NegotiatedAlgorithms { hash, cipher, auth_length, pub_key, sas })
}
