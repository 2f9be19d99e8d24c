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

//! Protocol states, the events that drive them and the actions they produce.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Severity, ZrtpError};
use zrtp_proto::{GoClearPacket, ZrtpMessage};

/// Represents the various states of the ZRTP protocol state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZrtpState {
    /// Initial state before any protocol interaction.
    Initial,
    /// Hello sent, nothing received yet.
    Detect,
    /// We sent a HelloAck and are waiting for the peer's.
    AckSent,
    /// The peer acknowledged our Hello; waiting for its Hello.
    AckDetected,
    /// Commit sent, waiting for DHPart1.
    CommitSent,
    /// DHPart1 sent, waiting for DHPart2.
    WaitDHPart2,
    /// DHPart2 sent, waiting for Confirm1.
    WaitConfirm1,
    /// Confirm1 sent, waiting for Confirm2.
    WaitConfirm2,
    /// Confirm2 sent, waiting for Conf2Ack.
    WaitConf2Ack,
    /// Handshake completed, SRTP keys are in use.
    Secure,
    /// The exchange was aborted.
    Error,
    /// The session was closed and its secrets wiped.
    Closed,
}

/// The role of the endpoint in the key exchange.
///
/// The side that sends Commit and receives DHPart1 is the Initiator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Sent the Commit that won; computes hvi and sends DHPart2 and Confirm2.
    Initiator,
    /// Answered the Commit with DHPart1; sends Confirm1 and Conf2Ack.
    Responder,
}

/// Which half of the SRTP session a set of secrets enables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnableSecurity {
    ForReceiver,
    ForSender,
}

/// Inputs to the engine, delivered one at a time.
#[derive(Debug, Clone)]
pub enum ZrtpEvent {
    /// Start the protocol engine.
    Start,
    /// A protocol message arrived from the peer.
    Received(ZrtpMessage),
    /// The retransmission timer fired.
    Timeout,
    /// Tear the session down.
    Close,
    /// A legacy GoClear request arrived.
    GoClear(GoClearPacket),
}

/// What the engine asks its caller to do after an event.
#[derive(Debug)]
pub enum ZrtpAction {
    /// Transmit a message to the peer.
    Send(ZrtpMessage),
    /// Report progress or a non-fatal condition.
    Info { severity: Severity, message: String },
    /// Hand keys to the media layer.
    SecretsReady { secrets: SrtpSecrets, part: EnableSecurity },
    /// Stop using the keys previously delivered for `part`.
    SecretsOff(EnableSecurity),
    /// The exchange failed and the session is dead.
    Abort(ZrtpError),
}

/// Key material for the SRTP layer.
///
/// Key lengths follow the negotiated cipher; salts are always 112 bits.
/// Everything is wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SrtpSecrets {
    pub key_initiator: Vec<u8>,
    pub salt_initiator: Vec<u8>,
    pub key_responder: Vec<u8>,
    pub salt_responder: Vec<u8>,
    /// Key length in bits.
    pub key_len: usize,
    /// Salt length in bits.
    pub salt_len: usize,
    /// SRTP authentication tag length in bits.
    pub auth_tag_len: usize,
    /// Four character short authentication string.
    pub sas: String,
    #[zeroize(skip)]
    pub role: Role,
    /// Whether the peer reported a verified SAS in its Confirm.
    pub peer_sas_verified: bool,
}

impl fmt::Debug for SrtpSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SrtpSecrets")
            .field("key_len", &self.key_len)
            .field("auth_tag_len", &self.auth_tag_len)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Callbacks the engine reports through.
pub trait ZrtpCallback {
    /// Progress, warnings and failures with their severity.
    fn send_info(&mut self, severity: Severity, message: &str);
    /// Keys for `part` are ready.
    fn srtp_secrets_ready(&mut self, secrets: &SrtpSecrets, part: EnableSecurity);
    /// Keys for `part` must no longer be used.
    fn srtp_secrets_off(&mut self, part: EnableSecurity);
}

impl ZrtpEvent {
    /// A printable name for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            ZrtpEvent::Start => "Start",
            ZrtpEvent::Received(message) => message.name(),
            ZrtpEvent::Timeout => "Timeout",
            ZrtpEvent::Close => "Close",
            ZrtpEvent::GoClear(_) => "GoClear",
        }
    }
}
