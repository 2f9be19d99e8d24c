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

/// The GoClear packet asks the peer to switch back to unencrypted media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoClearPacket {
    /// Common ZRTP header.
    pub header: ZrtpPacketHeader,
    /// HMAC protecting the GoClear request.
    pub clear_hmac: [u8; 8],
}

impl GoClearPacket {
    /// The message type identifier for GoClear packets.
    pub const MESSAGE_TYPE: [u8; 8] = *b"GoClear ";

    pub fn new(clear_hmac: [u8; 8]) -> Self {
        Self {
            header: ZrtpPacketHeader::new(Self::MESSAGE_TYPE, HEADER_LEN + 8),
            clear_hmac,
        }
    }

    /// Parses a GoClear packet from the given input bytes.
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, header) = ZrtpPacketHeader::parse(input)?;
        let (input, clear_hmac_bytes) = take(8usize)(input)?;
        let mut clear_hmac = [0u8; 8];
        clear_hmac.copy_from_slice(clear_hmac_bytes);
        Ok((input, Self { header, clear_hmac }))
    }

    /// Serializes the GoClear packet into its byte representation.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.header.to_bytes();
        bytes.extend_from_slice(&self.clear_hmac);
        bytes
    }
}

/// A header-only acknowledgment (HelloAck, Conf2Ack, ClearAck).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericAckPacket {
    /// Common ZRTP header.
    pub header: ZrtpPacketHeader,
}

impl GenericAckPacket {
    /// The message type identifier for HelloAck packets.
    pub const MESSAGE_TYPE_HELLO_ACK: [u8; 8] = *b"HelloAck";
    /// The message type identifier for Conf2Ack packets.
    pub const MESSAGE_TYPE_CONF2_ACK: [u8; 8] = *b"Conf2Ack";
    /// The message type identifier for ClearAck packets.
    pub const MESSAGE_TYPE_CLEAR_ACK: [u8; 8] = *b"ClearAck";

    pub fn new(message_type: [u8; 8]) -> Self {
        Self {
            header: ZrtpPacketHeader::new(message_type, HEADER_LEN),
        }
    }

    /// Parses a Generic Ack packet from the given input bytes.
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, header) = ZrtpPacketHeader::parse(input)?;
        Ok((input, Self { header }))
    }

    /// Serializes the Generic Ack packet into its byte representation.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.header.to_bytes()
    }
}
