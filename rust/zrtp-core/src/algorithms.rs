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

//! The algorithm catalogue and its 8-byte wire tags.

use std::fmt;

use zrtp_crypto::backends::DhGroup;
use zrtp_proto::AlgorithmTag;

/// The five negotiable categories, in Hello slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmCategory {
    Hash,
    Cipher,
    AuthLength,
    PubKey,
    Sas,
}

impl fmt::Display for AlgorithmCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlgorithmCategory::Hash => "hash",
            AlgorithmCategory::Cipher => "cipher",
            AlgorithmCategory::AuthLength => "authentication length",
            AlgorithmCategory::PubKey => "public key",
            AlgorithmCategory::Sas => "SAS",
        };
        f.write_str(name)
    }
}

/// An algorithm identified on the wire by an 8-byte tag.
pub trait Algorithm: Copy + Eq + fmt::Debug + 'static {
    /// Category this algorithm is negotiated in.
    const CATEGORY: AlgorithmCategory;
    /// Every supported member, strongest first.
    const ALL: &'static [Self];

    /// The wire tag.
    fn tag(self) -> AlgorithmTag;

    /// Looks up a supported algorithm by its wire tag.
    fn from_tag(tag: &AlgorithmTag) -> Option<Self> {
        Self::ALL.iter().copied().find(|alg| alg.tag() == *tag)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha256,
}

impl Algorithm for HashAlgorithm {
    const CATEGORY: AlgorithmCategory = AlgorithmCategory::Hash;
    const ALL: &'static [Self] = &[HashAlgorithm::Sha256];

    fn tag(self) -> AlgorithmTag {
        match self {
            HashAlgorithm::Sha256 => *b"SHA256  ",
        }
    }
}

/// Symmetric ciphers for the media stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherAlgorithm {
    Aes256,
    Aes128,
}

impl CipherAlgorithm {
    /// SRTP master key length in bytes.
    pub fn key_len(self) -> usize {
        match self {
            CipherAlgorithm::Aes256 => 32,
            CipherAlgorithm::Aes128 => 16,
        }
    }
}

impl Algorithm for CipherAlgorithm {
    const CATEGORY: AlgorithmCategory = AlgorithmCategory::Cipher;
    const ALL: &'static [Self] = &[CipherAlgorithm::Aes256, CipherAlgorithm::Aes128];

    fn tag(self) -> AlgorithmTag {
        match self {
            CipherAlgorithm::Aes256 => *b"AES256  ",
            CipherAlgorithm::Aes128 => *b"AES128  ",
        }
    }
}

/// Key agreement groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PubKeyAlgorithm {
    Dh4096,
    Dh3072,
}

impl PubKeyAlgorithm {
    pub fn group(self) -> DhGroup {
        match self {
            PubKeyAlgorithm::Dh4096 => DhGroup::Dh4096,
            PubKeyAlgorithm::Dh3072 => DhGroup::Dh3072,
        }
    }
}

impl Algorithm for PubKeyAlgorithm {
    const CATEGORY: AlgorithmCategory = AlgorithmCategory::PubKey;
    const ALL: &'static [Self] = &[PubKeyAlgorithm::Dh4096, PubKeyAlgorithm::Dh3072];

    fn tag(self) -> AlgorithmTag {
        match self {
            PubKeyAlgorithm::Dh4096 => *b"DH4096  ",
            PubKeyAlgorithm::Dh3072 => *b"DH3072  ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SasAlgorithm {
    Base32,
}

impl Algorithm for SasAlgorithm {
    const CATEGORY: AlgorithmCategory = AlgorithmCategory::Sas;
    const ALL: &'static [Self] = &[SasAlgorithm::Base32];

    fn tag(self) -> AlgorithmTag {
        match self {
            SasAlgorithm::Base32 => *b"libase32",
        }
    }
}

/// SRTP authentication tag lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthLength {
    Hs80,
    Hs32,
}

impl AuthLength {
    /// Tag length in bits.
    pub fn tag_bits(self) -> usize {
        match self {
            AuthLength::Hs80 => 80,
            AuthLength::Hs32 => 32,
        }
    }
}

impl Algorithm for AuthLength {
    const CATEGORY: AlgorithmCategory = AlgorithmCategory::AuthLength;
    const ALL: &'static [Self] = &[AuthLength::Hs80, AuthLength::Hs32];

    fn tag(self) -> AlgorithmTag {
        match self {
            AuthLength::Hs80 => *b"HS80    ",
            AuthLength::Hs32 => *b"HS32    ",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_resolve_back() {
        for cipher in CipherAlgorithm::ALL {
            assert_eq!(CipherAlgorithm::from_tag(&cipher.tag()), Some(*cipher));
        }
        for group in PubKeyAlgorithm::ALL {
            assert_eq!(PubKeyAlgorithm::from_tag(&group.tag()), Some(*group));
        }
        assert_eq!(CipherAlgorithm::from_tag(b"TWOFISH "), None);
        // Tags are matched on all 8 bytes
        assert_eq!(AuthLength::from_tag(b"HS32\0\0\0\0"), None);
    }

    #[test]
    fn test_parameters() {
        assert_eq!(CipherAlgorithm::Aes128.key_len(), 16);
        assert_eq!(CipherAlgorithm::Aes256.key_len(), 32);
        assert_eq!(AuthLength::Hs32.tag_bits(), 32);
        assert_eq!(PubKeyAlgorithm::Dh3072.group().public_value_len(), 384);
        assert_eq!(PubKeyAlgorithm::Dh4096.group().public_value_len(), 512);
    }
}
