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

use crate::algorithms::{
    Algorithm, AuthLength, CipherAlgorithm, HashAlgorithm, PubKeyAlgorithm, SasAlgorithm,
};
use crate::error::ZrtpError;
use zrtp_proto::{HelloPacket, MAX_ALGORITHMS};

/// Client identifier announced when none is configured.
pub const DEFAULT_CLIENT_ID: &str = "ZRTP-Rust";

/// Options for configuring a ZRTP endpoint.
///
/// Each list is a preference order, most preferred first. The local Hello
/// advertises exactly these lists and the negotiator walks them in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZrtpConfig {
    /// Client identifier, space padded to 16 bytes.
    pub client_id: [u8; 16],
    pub hashes: Vec<HashAlgorithm>,
    pub ciphers: Vec<CipherAlgorithm>,
    pub auth_lengths: Vec<AuthLength>,
    pub pub_keys: Vec<PubKeyAlgorithm>,
    pub sas_types: Vec<SasAlgorithm>,
    /// Timer events tolerated for one outstanding message before giving up.
    pub max_retransmits: u32,
    /// Set the SAS verified flag in outgoing Confirm messages.
    pub sas_verified: bool,
}

impl Default for ZrtpConfig {
    fn default() -> Self {
        Self {
            client_id: pad_client_id(DEFAULT_CLIENT_ID),
            hashes: vec![HashAlgorithm::Sha256],
            ciphers: vec![CipherAlgorithm::Aes128, CipherAlgorithm::Aes256],
            auth_lengths: vec![AuthLength::Hs32, AuthLength::Hs80],
            pub_keys: vec![PubKeyAlgorithm::Dh3072, PubKeyAlgorithm::Dh4096],
            sas_types: vec![SasAlgorithm::Base32],
            max_retransmits: 10,
            sas_verified: false,
        }
    }
}

/// Pads or truncates `id` to the 16-byte client identifier field.
pub fn pad_client_id(id: &str) -> [u8; 16] {
    let mut out = [b' '; 16];
    let bytes = id.as_bytes();
    let len = bytes.len().min(16);
    out[..len].copy_from_slice(&bytes[..len]);
    out
}

fn check_list<A: Algorithm>(list: &[A]) -> Result<(), ZrtpError> {
    if list.is_empty() || list.len() > MAX_ALGORITHMS {
        return Err(ZrtpError::InvalidConfig(format!(
            "{} list must hold 1 to {} entries, has {}",
            A::CATEGORY,
            MAX_ALGORITHMS,
            list.len()
        )));
    }
    for (i, alg) in list.iter().enumerate() {
        if list[..i].contains(alg) {
            return Err(ZrtpError::InvalidConfig(format!(
                "{:?} listed twice in {} list",
                alg,
                A::CATEGORY
            )));
        }
    }
    Ok(())
}

impl ZrtpConfig {
    /// Returns a high-security profile: AES-256, DH-4096 and 80-bit tags first.
    pub fn high_security() -> Self {
        Self {
            ciphers: vec![CipherAlgorithm::Aes256, CipherAlgorithm::Aes128],
            auth_lengths: vec![AuthLength::Hs80, AuthLength::Hs32],
            pub_keys: vec![PubKeyAlgorithm::Dh4096, PubKeyAlgorithm::Dh3072],
            ..Self::default()
        }
    }

    pub fn with_client_id(mut self, id: &str) -> Self {
        self.client_id = pad_client_id(id);
        self
    }

    /// Checks list sizes and rejects duplicated entries.
    pub fn validate(&self) -> Result<(), ZrtpError> {
        check_list(&self.hashes)?;
        check_list(&self.ciphers)?;
        check_list(&self.auth_lengths)?;
        check_list(&self.pub_keys)?;
        check_list(&self.sas_types)?;
        Ok(())
    }

    /// Builds the Hello advertising this configuration.
    pub fn to_hello(&self, zid: [u8; 12]) -> HelloPacket {
        fn tags<A: Algorithm>(list: &[A]) -> Vec<zrtp_proto::AlgorithmTag> {
            list.iter().map(|alg| alg.tag()).collect()
        }

        let mut hello = HelloPacket::new(self.client_id, zid);
        hello.hash_types = tags(&self.hashes);
        hello.cipher_types = tags(&self.ciphers);
        hello.auth_lengths = tags(&self.auth_lengths);
        hello.pub_key_types = tags(&self.pub_keys);
        hello.sas_types = tags(&self.sas_types);
        hello
    }
}
