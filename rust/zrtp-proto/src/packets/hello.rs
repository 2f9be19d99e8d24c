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

use super::header::{ZrtpPacketHeader, HEADER_LEN};
use nom::{
    bytes::complete::take,
    IResult,
};

/// Number of algorithm slots per category in a Hello.
pub const MAX_ALGORITHMS: usize = 5;

/// Size of an algorithm tag in bytes.
pub const ALGORITHM_TAG_LEN: usize = 8;

/// Size of the whole algorithm offer (five categories of five slots).
pub const ALGORITHM_BLOCK_LEN: usize = 5 * MAX_ALGORITHMS * ALGORITHM_TAG_LEN;

/// An 8-byte algorithm identifier such as `b"SHA256  "`.
pub type AlgorithmTag = [u8; ALGORITHM_TAG_LEN];

const HELLO_LEN: usize = HEADER_LEN + 4 + 16 + 12 + ALGORITHM_BLOCK_LEN;

/// The Hello packet is used in the discovery phase to find peer capabilities.
///
/// Each algorithm list holds at most [`MAX_ALGORITHMS`] tags, most preferred
/// first. On the wire every list occupies exactly five slots; unused slots
/// are zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelloPacket {
    /// Common ZRTP header.
    pub header: ZrtpPacketHeader,
    /// The ZRTP protocol version supported.
    pub version: [u8; 4],
    /// Client identifier string.
    pub client_id: [u8; 16],
    /// The ZID of the endpoint.
    pub zid: [u8; 12],
    /// Offered hash algorithms.
    pub hash_types: Vec<AlgorithmTag>,
    /// Offered symmetric ciphers.
    pub cipher_types: Vec<AlgorithmTag>,
    /// Offered SRTP authentication tag lengths.
    pub auth_lengths: Vec<AlgorithmTag>,
    /// Offered public key (DH group) types.
    pub pub_key_types: Vec<AlgorithmTag>,
    /// Offered SAS rendering types.
    pub sas_types: Vec<AlgorithmTag>,
}

impl HelloPacket {
    /// The message type identifier for Hello packets.
    pub const MESSAGE_TYPE: [u8; 8] = *b"Hello   ";

    /// Protocol version announced in Hello.
    pub const VERSION: [u8; 4] = *b"0.01";

    /// Creates a Hello with empty algorithm lists.
    pub fn new(client_id: [u8; 16], zid: [u8; 12]) -> Self {
        Self {
            header: ZrtpPacketHeader::new(Self::MESSAGE_TYPE, HELLO_LEN),
            version: Self::VERSION,
            client_id,
            zid,
            hash_types: Vec::new(),
            cipher_types: Vec::new(),
            auth_lengths: Vec::new(),
            pub_key_types: Vec::new(),
            sas_types: Vec::new(),
        }
    }

    fn lists(&self) -> [&[AlgorithmTag]; 5] {
        [
            &self.hash_types,
            &self.cipher_types,
            &self.auth_lengths,
            &self.pub_key_types,
            &self.sas_types,
        ]
    }

    /// The algorithm offer exactly as laid out on the wire.
    ///
    /// This block is what the Initiator folds into its `hvi` commitment.
    pub fn algorithm_block(&self) -> [u8; ALGORITHM_BLOCK_LEN] {
        let mut block = [0u8; ALGORITHM_BLOCK_LEN];
        for (category, list) in self.lists().iter().enumerate() {
            for (slot, tag) in list.iter().take(MAX_ALGORITHMS).enumerate() {
                let offset = (category * MAX_ALGORITHMS + slot) * ALGORITHM_TAG_LEN;
                block[offset..offset + ALGORITHM_TAG_LEN].copy_from_slice(tag);
            }
        }
        block
    }

    /// Parses a Hello packet from the given input bytes.
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, header) = ZrtpPacketHeader::parse(input)?;
        let (input, version_bytes) = take(4usize)(input)?;
        let (input, client_id_bytes) = take(16usize)(input)?;
        let (input, zid_bytes) = take(12usize)(input)?;
        let (input, block) = take(ALGORITHM_BLOCK_LEN)(input)?;

        let mut version = [0u8; 4];
        version.copy_from_slice(version_bytes);
        let mut client_id = [0u8; 16];
        client_id.copy_from_slice(client_id_bytes);
        let mut zid = [0u8; 12];
        zid.copy_from_slice(zid_bytes);

        let category = |index: usize| -> Vec<AlgorithmTag> {
            block[index * MAX_ALGORITHMS * ALGORITHM_TAG_LEN..][..MAX_ALGORITHMS * ALGORITHM_TAG_LEN]
                .chunks_exact(ALGORITHM_TAG_LEN)
                .filter(|slot| slot.iter().any(|b| *b != 0))
                .map(|slot| {
                    let mut tag = [0u8; ALGORITHM_TAG_LEN];
                    tag.copy_from_slice(slot);
                    tag
                })
                .collect()
        };

        Ok((input, Self {
            header,
            version,
            client_id,
            zid,
            hash_types: category(0),
            cipher_types: category(1),
            auth_lengths: category(2),
            pub_key_types: category(3),
            sas_types: category(4),
        }))
    }

    /// Serializes the Hello packet into its byte representation.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.header.to_bytes();
        bytes.extend_from_slice(&self.version);
        bytes.extend_from_slice(&self.client_id);
        bytes.extend_from_slice(&self.zid);
        bytes.extend_from_slice(&self.algorithm_block());
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HelloPacket {
        let mut hello = HelloPacket::new(*b"ZRTP-Rust-Tester", [0x11; 12]);
        hello.hash_types.push(*b"SHA256  ");
        hello.cipher_types.push(*b"AES128  ");
        hello.cipher_types.push(*b"AES256  ");
        hello.auth_lengths.push(*b"HS32    ");
        hello.pub_key_types.push(*b"DH3072  ");
        hello.sas_types.push(*b"libase32");
        hello
    }

    #[test]
    fn test_hello_packet_codec() {
        let hello = sample();
        let bytes = hello.to_bytes();
        assert_eq!(bytes.len(), hello.header.length as usize * 4);

        let (rem, parsed) = HelloPacket::parse(&bytes).unwrap();
        assert_eq!(rem.len(), 0);
        assert_eq!(parsed, hello);
    }

    #[test]
    fn test_algorithm_block_slots() {
        let block = sample().algorithm_block();
        assert_eq!(&block[..8], b"SHA256  ");
        assert_eq!(&block[8..40], &[0u8; 32]);
        // Second cipher sits in slot 1 of category 1
        assert_eq!(&block[48..56], b"AES256  ");
        assert_eq!(&block[160..168], b"libase32");
    }

    #[test]
    fn test_truncated_hello_is_rejected() {
        let bytes = sample().to_bytes();
        assert!(HelloPacket::parse(&bytes[..bytes.len() - 1]).is_err());
    }
}
