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
use super::hello::AlgorithmTag;
use nom::{
    bytes::complete::take,
    IResult,
};

const COMMIT_LEN: usize = HEADER_LEN + 12 + 5 * 8 + 32;

/// The Commit packet carries the Initiator's algorithm choice and its
/// commitment (`hvi`) to the DH public value it will reveal in DHPart2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitPacket {
    /// Common ZRTP header.
    pub header: ZrtpPacketHeader,
    /// The ZID of the Initiator.
    pub zid: [u8; 12],
    /// Selected hash algorithm.
    pub hash_type: AlgorithmTag,
    /// Selected cipher algorithm.
    pub cipher_type: AlgorithmTag,
    /// Selected SRTP auth tag length.
    pub auth_length: AlgorithmTag,
    /// Selected public key (DH group) type.
    pub pub_key_type: AlgorithmTag,
    /// Selected SAS type.
    pub sas_type: AlgorithmTag,
    /// Hash value of the Initiator.
    pub hvi: [u8; 32],
}

impl CommitPacket {
    /// The message type identifier for Commit packets.
    pub const MESSAGE_TYPE: [u8; 8] = *b"Commit  ";

    /// Creates a Commit with zeroed algorithm fields and `hvi`.
    pub fn new(zid: [u8; 12]) -> Self {
        Self {
            header: ZrtpPacketHeader::new(Self::MESSAGE_TYPE, COMMIT_LEN),
            zid,
            hash_type: [0u8; 8],
            cipher_type: [0u8; 8],
            auth_length: [0u8; 8],
            pub_key_type: [0u8; 8],
            sas_type: [0u8; 8],
            hvi: [0u8; 32],
        }
    }

    /// Parses a Commit packet from the given input bytes.
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, header) = ZrtpPacketHeader::parse(input)?;
        let (input, zid_bytes) = take(12usize)(input)?;
        let (input, hash_bytes) = take(8usize)(input)?;
        let (input, cipher_bytes) = take(8usize)(input)?;
        let (input, auth_bytes) = take(8usize)(input)?;
        let (input, pub_key_bytes) = take(8usize)(input)?;
        let (input, sas_bytes) = take(8usize)(input)?;
        let (input, hvi_bytes) = take(32usize)(input)?;

        let tag = |bytes: &[u8]| {
            let mut tag = [0u8; 8];
            tag.copy_from_slice(bytes);
            tag
        };

        let mut zid = [0u8; 12];
        zid.copy_from_slice(zid_bytes);

        let mut hvi = [0u8; 32];
        hvi.copy_from_slice(hvi_bytes);

        Ok((input, Self {
            header,
            zid,
            hash_type: tag(hash_bytes),
            cipher_type: tag(cipher_bytes),
            auth_length: tag(auth_bytes),
            pub_key_type: tag(pub_key_bytes),
            sas_type: tag(sas_bytes),
            hvi,
        }))
    }

    /// Serializes the Commit packet into its byte representation.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.header.to_bytes();
        bytes.extend_from_slice(&self.zid);
        bytes.extend_from_slice(&self.hash_type);
        bytes.extend_from_slice(&self.cipher_type);
        bytes.extend_from_slice(&self.auth_length);
        bytes.extend_from_slice(&self.pub_key_type);
        bytes.extend_from_slice(&self.sas_type);
        bytes.extend_from_slice(&self.hvi);
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_packet_codec() {
        let mut commit = CommitPacket::new([0x33; 12]);
        commit.hash_type = *b"SHA256  ";
        commit.cipher_type = *b"AES128  ";
        commit.auth_length = *b"HS32    ";
        commit.pub_key_type = *b"DH3072  ";
        commit.sas_type = *b"libase32";
        commit.hvi = [0x44; 32];

        let bytes = commit.to_bytes();
        assert_eq!(bytes.len(), 96);
        assert_eq!(commit.header.length, 24);

        let (rem, parsed) = CommitPacket::parse(&bytes).unwrap();
        assert_eq!(rem.len(), 0);
        assert_eq!(parsed, commit);
    }
}
