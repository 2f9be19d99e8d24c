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
    number::complete::u8 as byte,
    IResult,
};

/// Length of the known plaintext marker.
pub const PLAIN_TEXT_LEN: usize = 15;

/// Length of the Confirm HMAC.
pub const CONFIRM_HMAC_LEN: usize = 32;

const CONFIRM_LEN: usize = HEADER_LEN + PLAIN_TEXT_LEN + 1 + CONFIRM_HMAC_LEN;

/// SAS flag bit: the sender's user has verified the SAS.
pub const SAS_VERIFIED_FLAG: u8 = 0x01;

/// The Confirm packet proves possession of the derived keys.
///
/// The HMAC covers the 16 bytes formed by the known plaintext and the SAS
/// flag byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPacket {
    /// Common ZRTP header.
    pub header: ZrtpPacketHeader,
    /// Fixed marker both sides expect.
    pub plain_text: [u8; PLAIN_TEXT_LEN],
    /// Flags (bit 0: SAS verified).
    pub sas_flag: u8,
    /// HMAC over `plain_text || sas_flag`.
    pub hmac: [u8; CONFIRM_HMAC_LEN],
}

impl ConfirmPacket {
    /// The message type identifier for Confirm1 packets.
    pub const MESSAGE_TYPE_CONF1: [u8; 8] = *b"Confirm1";
    /// The message type identifier for Confirm2 packets.
    pub const MESSAGE_TYPE_CONF2: [u8; 8] = *b"Confirm2";

    /// Creates a Confirm of the given type with an empty HMAC.
    pub fn new(message_type: [u8; 8], plain_text: [u8; PLAIN_TEXT_LEN], sas_flag: u8) -> Self {
        Self {
            header: ZrtpPacketHeader::new(message_type, CONFIRM_LEN),
            plain_text,
            sas_flag,
            hmac: [0u8; CONFIRM_HMAC_LEN],
        }
    }

    /// The bytes protected by [`ConfirmPacket::hmac`].
    pub fn authenticated_bytes(&self) -> [u8; PLAIN_TEXT_LEN + 1] {
        let mut bytes = [0u8; PLAIN_TEXT_LEN + 1];
        bytes[..PLAIN_TEXT_LEN].copy_from_slice(&self.plain_text);
        bytes[PLAIN_TEXT_LEN] = self.sas_flag;
        bytes
    }

    /// Whether the sender reported a verified SAS.
    pub fn is_sas_verified(&self) -> bool {
        self.sas_flag & SAS_VERIFIED_FLAG != 0
    }

    /// Parses a Confirm packet from the given input bytes.
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, header) = ZrtpPacketHeader::parse(input)?;
        let (input, plain_text_bytes) = take(PLAIN_TEXT_LEN)(input)?;
        let (input, sas_flag) = byte(input)?;
        let (input, hmac_bytes) = take(CONFIRM_HMAC_LEN)(input)?;

        let mut plain_text = [0u8; PLAIN_TEXT_LEN];
        plain_text.copy_from_slice(plain_text_bytes);

        let mut hmac = [0u8; CONFIRM_HMAC_LEN];
        hmac.copy_from_slice(hmac_bytes);

        Ok((input, Self {
            header,
            plain_text,
            sas_flag,
            hmac,
        }))
    }

    /// Serializes the Confirm packet into its byte representation.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.header.to_bytes();
        bytes.extend_from_slice(&self.plain_text);
        bytes.push(self.sas_flag);
        bytes.extend_from_slice(&self.hmac);
        bytes
    }
}
