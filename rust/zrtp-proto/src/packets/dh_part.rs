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

/// Header plus the five retained-secret identifiers.
const DH_PART_FIXED_LEN: usize = HEADER_LEN + 5 * 8;

/// The DHPart packet is used to exchange Diffie-Hellman public values.
///
/// DHPart1 goes from Responder to Initiator, DHPart2 the other way. Both carry
/// the sender's identifiers for each retained-secret category so the peer can
/// find which secrets they share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DHPartPacket {
    /// Common ZRTP header.
    pub header: ZrtpPacketHeader,
    /// Retained secret 1 ID.
    pub rs1_id: [u8; 8],
    /// Retained secret 2 ID.
    pub rs2_id: [u8; 8],
    /// Signaling secret ID.
    pub sigs_id: [u8; 8],
    /// SRTP secret ID.
    pub srtps_id: [u8; 8],
    /// Other secret ID.
    pub other_secret_id: [u8; 8],
    /// The DH public value, big-endian and padded to the group size.
    pub public_value: Vec<u8>,
}

impl DHPartPacket {
    /// The message type identifier for DHPart1 packets.
    pub const MESSAGE_TYPE_DH1: [u8; 8] = *b"DHPart1 ";
    /// The message type identifier for DHPart2 packets.
    pub const MESSAGE_TYPE_DH2: [u8; 8] = *b"DHPart2 ";

    /// Creates a DHPart of the given type carrying `public_value`.
    ///
    /// The public value must be a multiple of four bytes long, which holds for
    /// every supported group.
    pub fn new(message_type: [u8; 8], public_value: Vec<u8>) -> Self {
        Self {
            header: ZrtpPacketHeader::new(message_type, DH_PART_FIXED_LEN + public_value.len()),
            rs1_id: [0u8; 8],
            rs2_id: [0u8; 8],
            sigs_id: [0u8; 8],
            srtps_id: [0u8; 8],
            other_secret_id: [0u8; 8],
            public_value,
        }
    }

    /// Parses a DHPart packet from the given input bytes.
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, header) = ZrtpPacketHeader::parse(input)?;
        let (input, rs1_id_bytes) = take(8usize)(input)?;
        let (input, rs2_id_bytes) = take(8usize)(input)?;
        let (input, sigs_id_bytes) = take(8usize)(input)?;
        let (input, srtps_id_bytes) = take(8usize)(input)?;
        let (input, other_secret_id_bytes) = take(8usize)(input)?;

        let id = |bytes: &[u8]| {
            let mut id = [0u8; 8];
            id.copy_from_slice(bytes);
            id
        };

        // Public value length: Total - Header(12) - 5IDs(40)
        let pub_val_len = (header.length as usize * 4).saturating_sub(DH_PART_FIXED_LEN);
        let (input, public_value_bytes) = take(pub_val_len)(input)?;

        Ok((input, Self {
            header,
            rs1_id: id(rs1_id_bytes),
            rs2_id: id(rs2_id_bytes),
            sigs_id: id(sigs_id_bytes),
            srtps_id: id(srtps_id_bytes),
            other_secret_id: id(other_secret_id_bytes),
            public_value: public_value_bytes.to_vec(),
        }))
    }

    /// Serializes the DHPart packet into its byte representation.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.header.to_bytes();
        bytes.extend_from_slice(&self.rs1_id);
        bytes.extend_from_slice(&self.rs2_id);
        bytes.extend_from_slice(&self.sigs_id);
        bytes.extend_from_slice(&self.srtps_id);
        bytes.extend_from_slice(&self.other_secret_id);
        bytes.extend_from_slice(&self.public_value);
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dh_part_packet_codec() {
        let mut dh = DHPartPacket::new(DHPartPacket::MESSAGE_TYPE_DH1, vec![0xBB; 384]);
        dh.rs1_id = [0x77; 8];
        dh.rs2_id = [0x88; 8];
        dh.other_secret_id = [0x99; 8];
        assert_eq!(dh.header.length, (52 + 384) / 4);

        let bytes = dh.to_bytes();
        let (rem, parsed) = DHPartPacket::parse(&bytes).unwrap();

        assert_eq!(rem.len(), 0);
        assert_eq!(parsed, dh);
    }

    #[test]
    fn test_public_value_length_follows_header() {
        let dh = DHPartPacket::new(DHPartPacket::MESSAGE_TYPE_DH2, vec![0x01; 512]);
        let mut bytes = dh.to_bytes();
        bytes.extend_from_slice(&[0xEE; 4]);

        let (rem, parsed) = DHPartPacket::parse(&bytes).unwrap();
        assert_eq!(parsed.public_value.len(), 512);
        assert_eq!(rem, &[0xEE; 4]);
    }
}
