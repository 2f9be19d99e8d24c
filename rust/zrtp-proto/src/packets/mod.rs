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

//! ZRTP Packet types and their implementations.

pub mod header;
pub mod hello;
pub mod commit;
pub mod dh_part;
pub mod confirm;
pub mod other;

pub use header::{ZrtpPacketHeader, HEADER_LEN, ZRTP_ID};
pub use hello::{AlgorithmTag, HelloPacket, ALGORITHM_BLOCK_LEN, MAX_ALGORITHMS};
pub use commit::CommitPacket;
pub use dh_part::DHPartPacket;
pub use confirm::{ConfirmPacket, PLAIN_TEXT_LEN, SAS_VERIFIED_FLAG};
pub use other::{GenericAckPacket, GoClearPacket};

use nom::{
    error::{Error, ErrorKind},
    IResult,
};

/// Any protocol message the key-agreement engine consumes or produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZrtpMessage {
    Hello(HelloPacket),
    HelloAck(GenericAckPacket),
    Commit(CommitPacket),
    DHPart1(DHPartPacket),
    DHPart2(DHPartPacket),
    Confirm1(ConfirmPacket),
    Confirm2(ConfirmPacket),
    Conf2Ack(GenericAckPacket),
    GoClear(GoClearPacket),
    ClearAck(GenericAckPacket),
}

impl ZrtpMessage {
    pub fn hello_ack() -> Self {
        Self::HelloAck(GenericAckPacket::new(GenericAckPacket::MESSAGE_TYPE_HELLO_ACK))
    }

    pub fn conf2_ack() -> Self {
        Self::Conf2Ack(GenericAckPacket::new(GenericAckPacket::MESSAGE_TYPE_CONF2_ACK))
    }

    fn header(&self) -> &ZrtpPacketHeader {
        match self {
            Self::Hello(p) => &p.header,
            Self::Commit(p) => &p.header,
            Self::DHPart1(p) | Self::DHPart2(p) => &p.header,
            Self::Confirm1(p) | Self::Confirm2(p) => &p.header,
            Self::GoClear(p) => &p.header,
            Self::HelloAck(p) | Self::Conf2Ack(p) | Self::ClearAck(p) => &p.header,
        }
    }

    /// The 8-byte type identifier carried in the header.
    pub fn message_type(&self) -> [u8; 8] {
        self.header().message_type
    }

    /// A printable name for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hello(_) => "Hello",
            Self::HelloAck(_) => "HelloAck",
            Self::Commit(_) => "Commit",
            Self::DHPart1(_) => "DHPart1",
            Self::DHPart2(_) => "DHPart2",
            Self::Confirm1(_) => "Confirm1",
            Self::Confirm2(_) => "Confirm2",
            Self::Conf2Ack(_) => "Conf2Ack",
            Self::GoClear(_) => "GoClear",
            Self::ClearAck(_) => "ClearAck",
        }
    }

    /// Parses any known message, dispatching on the header's type field.
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (_, header) = ZrtpPacketHeader::parse(input)?;
        if header.zrtp_id != ZRTP_ID {
            return Err(nom::Err::Error(Error::new(input, ErrorKind::Verify)));
        }
        match &header.message_type {
            t if *t == HelloPacket::MESSAGE_TYPE => {
                HelloPacket::parse(input).map(|(rest, p)| (rest, Self::Hello(p)))
            }
            t if *t == CommitPacket::MESSAGE_TYPE => {
                CommitPacket::parse(input).map(|(rest, p)| (rest, Self::Commit(p)))
            }
            t if *t == DHPartPacket::MESSAGE_TYPE_DH1 => {
                DHPartPacket::parse(input).map(|(rest, p)| (rest, Self::DHPart1(p)))
            }
            t if *t == DHPartPacket::MESSAGE_TYPE_DH2 => {
                DHPartPacket::parse(input).map(|(rest, p)| (rest, Self::DHPart2(p)))
            }
            t if *t == ConfirmPacket::MESSAGE_TYPE_CONF1 => {
                ConfirmPacket::parse(input).map(|(rest, p)| (rest, Self::Confirm1(p)))
            }
            t if *t == ConfirmPacket::MESSAGE_TYPE_CONF2 => {
                ConfirmPacket::parse(input).map(|(rest, p)| (rest, Self::Confirm2(p)))
            }
            t if *t == GoClearPacket::MESSAGE_TYPE => {
                GoClearPacket::parse(input).map(|(rest, p)| (rest, Self::GoClear(p)))
            }
            t if *t == GenericAckPacket::MESSAGE_TYPE_HELLO_ACK => {
                GenericAckPacket::parse(input).map(|(rest, p)| (rest, Self::HelloAck(p)))
            }
            t if *t == GenericAckPacket::MESSAGE_TYPE_CONF2_ACK => {
                GenericAckPacket::parse(input).map(|(rest, p)| (rest, Self::Conf2Ack(p)))
            }
            t if *t == GenericAckPacket::MESSAGE_TYPE_CLEAR_ACK => {
                GenericAckPacket::parse(input).map(|(rest, p)| (rest, Self::ClearAck(p)))
            }
            _ => Err(nom::Err::Error(Error::new(input, ErrorKind::Tag))),
        }
    }

    /// Serializes the message into its byte representation.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Hello(p) => p.to_bytes(),
            Self::Commit(p) => p.to_bytes(),
            Self::DHPart1(p) | Self::DHPart2(p) => p.to_bytes(),
            Self::Confirm1(p) | Self::Confirm2(p) => p.to_bytes(),
            Self::GoClear(p) => p.to_bytes(),
            Self::HelloAck(p) | Self::Conf2Ack(p) | Self::ClearAck(p) => p.to_bytes(),
        }
    }
}
