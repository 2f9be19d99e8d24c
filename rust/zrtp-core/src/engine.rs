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

use zeroize::Zeroizing;

use crate::commitment::{compute_hvi, keeps_initiator_role, verify_hvi};
use crate::config::ZrtpConfig;
use crate::confirm::{build_confirm, prepare_clear_ack, validate_confirm};
use crate::error::{Severity, ZrtpError};
use crate::negotiation::{accept_commit, negotiate, NegotiatedAlgorithms};
use crate::shared_secrets::SharedSecretSet;
use crate::state::{
    EnableSecurity, Role, SrtpSecrets, ZrtpAction, ZrtpCallback, ZrtpEvent, ZrtpState,
};
use zrtp_cache::{ZidCache, ZidRecord};
use zrtp_crypto::backends::{new_dh, DhGroup};
use zrtp_crypto::{compute_sas, derive_keys, DiffieHellman, Hash, ZrtpKeys, HASH_LEN};
use zrtp_proto::{CommitPacket, ConfirmPacket, DHPartPacket, GoClearPacket, HelloPacket, ZrtpMessage};

/// SRTP master salt length in bytes (112 bits).
const SALT_LEN: usize = 14;

/// Creates the DH context for a negotiated group.
pub type DhFactory = fn(DhGroup) -> anyhow::Result<Box<dyn DiffieHellman>>;

/// The main ZRTP protocol engine context.
///
/// Performs no I/O: every event returns the actions the caller must carry
/// out. Events for one context must be delivered one at a time.
pub struct ZrtpContext {
    state: ZrtpState,
    role: Option<Role>,
    zid: [u8; 12],
    peer_zid: Option<[u8; 12]>,
    config: ZrtpConfig,
    hash: Box<dyn Hash>,
    cache: Box<dyn ZidCache>,
    dh_factory: DhFactory,

    own_hello: HelloPacket,
    peer_hello: Option<HelloPacket>,
    algorithms: Option<NegotiatedAlgorithms>,

    /// Ephemeral key pair; dropped as soon as the shared secret exists.
    dh: Option<Box<dyn DiffieHellman>>,
    own_public_value: Vec<u8>,
    own_hvi: [u8; HASH_LEN],
    peer_hvi: [u8; HASH_LEN],

    record: Option<ZidRecord>,
    secret_set: Option<SharedSecretSet>,
    matched_secrets: usize,
    keys: Option<ZrtpKeys>,
    sas: Option<String>,
    peer_sas_verified: bool,
    secrets_delivered: bool,

    /// The last sent packet, for retransmission or re-answering.
    last_sent: Option<ZrtpMessage>,
    /// Whether `last_sent` is re-sent when the timer fires.
    awaiting_reply: bool,
    retransmits: u32,
}

fn report(actions: &mut Vec<ZrtpAction>, severity: Severity, message: impl Into<String>) {
    let message = message.into();
    match severity {
        Severity::Info => log::info!("{}", message),
        Severity::Warning => log::warn!("{}", message),
        Severity::Error | Severity::Alert => log::error!("{}", message),
    }
    actions.push(ZrtpAction::Info { severity, message });
}

fn generate_key_pair(
    factory: DhFactory,
    algorithms: &NegotiatedAlgorithms,
) -> Result<(Box<dyn DiffieHellman>, Vec<u8>), ZrtpError> {
    let mut dh = factory(algorithms.pub_key.group())
        .map_err(|e| ZrtpError::KeyGeneration(e.to_string()))?;
    let public_value = dh
        .generate_keypair()
        .map_err(|e| ZrtpError::KeyGeneration(e.to_string()))?;

    let max = dh.max_public_key_len();
    if public_value.len() > max {
        return Err(ZrtpError::PublicKeyTooLarge { len: public_value.len(), max });
    }
    Ok((dh, public_value))
}

fn shared_secret(
    dh: &mut dyn DiffieHellman,
    peer_public_value: &[u8],
) -> Result<Zeroizing<Vec<u8>>, ZrtpError> {
    dh.compute_shared_secret(peer_public_value).map_err(|e| {
        log::warn!("Rejecting peer public value: {}", e);
        ZrtpError::InvalidPublicValue
    })
}

impl ZrtpContext {
    /// Creates a new ZRTP context.
    ///
    /// `cache` is read once when the peer is known and written once after the
    /// peer's Confirm has been verified.
    pub fn new(
        zid: [u8; 12],
        config: ZrtpConfig,
        hash: Box<dyn Hash>,
        cache: Box<dyn ZidCache>,
    ) -> Result<Self, ZrtpError> {
        config.validate()?;
        let own_hello = config.to_hello(zid);
        Ok(Self {
            state: ZrtpState::Initial,
            role: None,
            zid,
            peer_zid: None,
            config,
            hash,
            cache,
            dh_factory: new_dh,
            own_hello,
            peer_hello: None,
            algorithms: None,
            dh: None,
            own_public_value: Vec::new(),
            own_hvi: [0u8; HASH_LEN],
            peer_hvi: [0u8; HASH_LEN],
            record: None,
            secret_set: None,
            matched_secrets: 0,
            keys: None,
            sas: None,
            peer_sas_verified: false,
            secrets_delivered: false,
            last_sent: None,
            awaiting_reply: false,
            retransmits: 0,
        })
    }

    /// Replaces the DH backend, which defaults to the built-in MODP groups.
    pub fn with_dh_factory(mut self, factory: DhFactory) -> Self {
        self.dh_factory = factory;
        self
    }

    pub fn state(&self) -> ZrtpState {
        self.state
    }

    /// Our role, once the Commit exchange has settled it.
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn zid(&self) -> &[u8; 12] {
        &self.zid
    }

    pub fn peer_zid(&self) -> Option<&[u8; 12]> {
        self.peer_zid.as_ref()
    }

    /// The SAS, available once the DH exchange completed.
    pub fn sas(&self) -> Option<&str> {
        self.sas.as_deref()
    }

    pub fn algorithms(&self) -> Option<&NegotiatedAlgorithms> {
        self.algorithms.as_ref()
    }

    /// Number of retained secrets shared with the peer in this session.
    pub fn retained_secret_matches(&self) -> usize {
        self.matched_secrets
    }

    /// Whether the peer's Confirm carried the SAS verified flag.
    pub fn peer_sas_verified(&self) -> bool {
        self.peer_sas_verified
    }

    /// Runs one event through the state machine and returns what to do.
    pub fn handle_event(&mut self, event: ZrtpEvent) -> Vec<ZrtpAction> {
        let mut actions = Vec::new();
        if let Err(err) = self.dispatch(event, &mut actions) {
            self.abort(err, &mut actions);
        }
        actions
    }

    /// Like [`handle_event`](Self::handle_event), routing reports and secrets
    /// to `callback` and returning only the messages to transmit.
    pub fn process(&mut self, event: ZrtpEvent, callback: &mut dyn ZrtpCallback) -> Vec<ZrtpMessage> {
        let mut outgoing = Vec::new();
        for action in self.handle_event(event) {
            match action {
                ZrtpAction::Send(message) => outgoing.push(message),
                ZrtpAction::Info { severity, message } => callback.send_info(severity, &message),
                ZrtpAction::SecretsReady { secrets, part } => {
                    callback.srtp_secrets_ready(&secrets, part)
                }
                ZrtpAction::SecretsOff(part) => callback.srtp_secrets_off(part),
                ZrtpAction::Abort(err) => callback.send_info(err.severity(), &err.to_string()),
            }
        }
        outgoing
    }

    fn dispatch(&mut self, event: ZrtpEvent, actions: &mut Vec<ZrtpAction>) -> Result<(), ZrtpError> {
        match (self.state, event) {
            (_, ZrtpEvent::Close) => {
                self.close(actions);
                Ok(())
            }
            (ZrtpState::Closed | ZrtpState::Error, event) => {
                log::debug!("Ignoring {} after the session ended", event.name());
                Ok(())
            }
            (_, ZrtpEvent::GoClear(packet))
            | (_, ZrtpEvent::Received(ZrtpMessage::GoClear(packet))) => {
                self.go_clear(&packet, actions);
                Ok(())
            }
            (ZrtpState::Initial, ZrtpEvent::Start) => {
                log::info!("Starting ZRTP engine");
                self.send_request(ZrtpMessage::Hello(self.own_hello.clone()), actions);
                self.state = ZrtpState::Detect;
                Ok(())
            }
            (_, ZrtpEvent::Timeout) => self.retransmit(actions),
            (state, ZrtpEvent::Received(message)) => self.on_message(state, message, actions),
            (state, ZrtpEvent::Start) => {
                log::warn!("Start ignored in state {:?}", state);
                Ok(())
            }
        }
    }

    fn on_message(
        &mut self,
        state: ZrtpState,
        message: ZrtpMessage,
        actions: &mut Vec<ZrtpAction>,
    ) -> Result<(), ZrtpError> {
        use ZrtpState::*;

        match (state, message) {
            (Detect, ZrtpMessage::Hello(hello)) => {
                self.peer_hello = Some(hello);
                actions.push(ZrtpAction::Send(ZrtpMessage::hello_ack()));
                self.state = AckSent;
            }
            (Detect, ZrtpMessage::HelloAck(_)) => {
                self.awaiting_reply = false;
                self.state = AckDetected;
            }
            (AckSent, ZrtpMessage::Hello(_)) => {
                actions.push(ZrtpAction::Send(ZrtpMessage::hello_ack()));
            }
            (AckSent, ZrtpMessage::HelloAck(_)) => self.send_commit(actions)?,
            (AckDetected, ZrtpMessage::Hello(hello)) => {
                // Our Commit acknowledges the peer's Hello.
                self.peer_hello = Some(hello);
                self.send_commit(actions)?;
            }
            (Detect | AckSent | AckDetected, ZrtpMessage::Commit(commit)) => {
                self.answer_commit(commit, actions)?
            }
            (CommitSent, ZrtpMessage::Commit(commit)) => {
                if keeps_initiator_role(&self.own_hvi, &commit.hvi) {
                    report(actions, Severity::Info, "Commit collision, keeping the Initiator role");
                } else {
                    report(actions, Severity::Info, "Commit collision, switching to the Responder role");
                    self.dh = None;
                    self.answer_commit(commit, actions)?;
                }
            }
            (CommitSent, ZrtpMessage::DHPart1(dh_part1)) => self.answer_dh_part1(dh_part1, actions)?,
            (WaitDHPart2, ZrtpMessage::DHPart2(dh_part2)) => self.answer_dh_part2(dh_part2, actions)?,
            (WaitConfirm1, ZrtpMessage::Confirm1(confirm1)) => self.answer_confirm1(confirm1, actions)?,
            (WaitConfirm2, ZrtpMessage::Confirm2(confirm2)) => self.answer_confirm2(confirm2, actions)?,
            (WaitConf2Ack, ZrtpMessage::Conf2Ack(_)) => {
                report(actions, Severity::Info, "Initiator: Conf2Ack received, secure state reached");
                self.deliver_secrets(EnableSecurity::ForSender, actions);
                self.awaiting_reply = false;
                self.state = Secure;
            }
            // The peer repeated its request, so our answer was lost.
            (WaitDHPart2, ZrtpMessage::Commit(_)) | (WaitConfirm2, ZrtpMessage::DHPart2(_)) => {
                self.resend_last(actions)
            }
            (Secure, ZrtpMessage::Confirm2(confirm2)) if self.role == Some(Role::Responder) => {
                let valid = self
                    .keys
                    .as_ref()
                    .map(|keys| validate_confirm(&*self.hash, &keys.hmac_key, &confirm2).is_ok())
                    .unwrap_or(false);
                if valid {
                    actions.push(ZrtpAction::Send(ZrtpMessage::conf2_ack()));
                } else {
                    log::warn!("Ignoring unverifiable Confirm2 in secure state");
                }
            }
            (state, message) => {
                log::warn!("Ignoring {} in state {:?}", message.name(), state);
            }
        }
        Ok(())
    }

    /// Sends a message the peer must answer; the timer re-sends it.
    fn send_request(&mut self, message: ZrtpMessage, actions: &mut Vec<ZrtpAction>) {
        self.last_sent = Some(message.clone());
        self.awaiting_reply = true;
        self.retransmits = 0;
        actions.push(ZrtpAction::Send(message));
    }

    /// Sends an answer; it is repeated only when the peer repeats its request.
    fn send_response(&mut self, message: ZrtpMessage, actions: &mut Vec<ZrtpAction>) {
        self.last_sent = Some(message.clone());
        self.awaiting_reply = false;
        self.retransmits = 0;
        actions.push(ZrtpAction::Send(message));
    }

    fn resend_last(&mut self, actions: &mut Vec<ZrtpAction>) {
        if let Some(message) = &self.last_sent {
            log::debug!("Peer repeated its request, re-sending {}", message.name());
            actions.push(ZrtpAction::Send(message.clone()));
        }
    }

    fn retransmit(&mut self, actions: &mut Vec<ZrtpAction>) -> Result<(), ZrtpError> {
        if !self.awaiting_reply {
            log::debug!("Timer fired in state {:?} with nothing outstanding", self.state);
            return Ok(());
        }
        let Some(message) = self.last_sent.clone() else {
            return Ok(());
        };
        if self.retransmits >= self.config.max_retransmits {
            return Err(ZrtpError::RetransmitLimit(self.retransmits));
        }
        self.retransmits += 1;
        log::debug!(
            "Retransmitting {} ({}/{})",
            message.name(),
            self.retransmits,
            self.config.max_retransmits
        );
        actions.push(ZrtpAction::Send(message));
        Ok(())
    }

    fn warn_if_weak(algorithms: &NegotiatedAlgorithms, what: &str, actions: &mut Vec<ZrtpAction>) {
        if algorithms.weak_key_agreement() {
            report(
                actions,
                Severity::Warning,
                format!("{} an AES256 cipher but does not offer a Diffie-Hellman 4096", what),
            );
        }
    }

    fn load_record(&self, peer_zid: &[u8; 12]) -> Result<ZidRecord, ZrtpError> {
        self.cache
            .load_for_peer(peer_zid)
            .map_err(|e| ZrtpError::RetainedSecrets(e.to_string()))
    }

    /// Initiator: negotiate against the peer's Hello and commit to a fresh
    /// public value.
    fn send_commit(&mut self, actions: &mut Vec<ZrtpAction>) -> Result<(), ZrtpError> {
        let Some(peer_hello) = self.peer_hello.clone() else {
            log::warn!("Cannot commit before the peer's Hello arrived");
            return Ok(());
        };
        report(actions, Severity::Info, "Hello received, preparing a Commit");

        let algorithms = negotiate(&self.config, &peer_hello)?;
        Self::warn_if_weak(&algorithms, "Hello offers", actions);

        let (dh, public_value) = generate_key_pair(self.dh_factory, &algorithms)?;
        report(
            actions,
            Severity::Info,
            format!("Generated a public DH key of size: {}", public_value.len()),
        );
        self.own_hvi = compute_hvi(&*self.hash, &public_value, &peer_hello);

        let mut commit = CommitPacket::new(self.zid);
        algorithms.apply_to(&mut commit);
        commit.hvi = self.own_hvi;

        self.peer_zid = Some(peer_hello.zid);
        self.algorithms = Some(algorithms);
        self.dh = Some(dh);
        self.own_public_value = public_value;
        self.send_request(ZrtpMessage::Commit(commit), actions);
        self.state = ZrtpState::CommitSent;
        Ok(())
    }

    /// Responder: accept the Commit and answer with DHPart1.
    fn answer_commit(&mut self, commit: CommitPacket, actions: &mut Vec<ZrtpAction>) -> Result<(), ZrtpError> {
        report(actions, Severity::Info, "Responder: Commit received, preparing DHPart1");

        let algorithms = accept_commit(&self.config, &commit)?;
        Self::warn_if_weak(&algorithms, "Commit contains", actions);

        let (dh, public_value) = generate_key_pair(self.dh_factory, &algorithms)?;
        let record = self.load_record(&commit.zid)?;
        let secret_set = SharedSecretSet::compute(&*self.hash, &record)?;

        let mut dh_part1 = DHPartPacket::new(DHPartPacket::MESSAGE_TYPE_DH1, public_value.clone());
        secret_set.own_ids(Role::Responder).write_to(&mut dh_part1);

        self.role = Some(Role::Responder);
        self.peer_zid = Some(commit.zid);
        self.peer_hvi = commit.hvi;
        self.algorithms = Some(algorithms);
        self.dh = Some(dh);
        self.own_public_value = public_value;
        self.record = Some(record);
        self.secret_set = Some(secret_set);
        self.send_response(ZrtpMessage::DHPart1(dh_part1), actions);
        self.state = ZrtpState::WaitDHPart2;
        Ok(())
    }

    /// Initiator: derive the session keys and reveal our public value.
    fn answer_dh_part1(&mut self, dh_part1: DHPartPacket, actions: &mut Vec<ZrtpAction>) -> Result<(), ZrtpError> {
        report(actions, Severity::Info, "Initiator: DHPart1 received, preparing DHPart2");
        let (Some(mut dh), Some(peer_zid)) = (self.dh.take(), self.peer_zid) else {
            log::error!("DHPart1 received without a pending Commit");
            return Ok(());
        };

        let dh_result = shared_secret(dh.as_mut(), &dh_part1.public_value)?;
        let sas = compute_sas(&*self.hash, &self.own_public_value, &dh_part1.public_value);

        let record = self.load_record(&peer_zid)?;
        let secret_set = SharedSecretSet::compute(&*self.hash, &record)?;
        let matched = secret_set.resolve(Role::Initiator, &dh_part1, &record);
        let retained: Vec<&[u8; HASH_LEN]> = matched.iter().collect();
        let keys = derive_keys(&*self.hash, &dh_result, &retained);
        drop(dh_result);
        drop(dh);

        let mut dh_part2 = DHPartPacket::new(DHPartPacket::MESSAGE_TYPE_DH2, self.own_public_value.clone());
        secret_set.own_ids(Role::Initiator).write_to(&mut dh_part2);

        log::info!("Retained secrets shared with peer: {}", matched.len());
        self.role = Some(Role::Initiator);
        self.matched_secrets = matched.len();
        self.keys = Some(keys);
        self.sas = Some(sas);
        self.record = Some(record);
        self.secret_set = Some(secret_set);
        self.send_request(ZrtpMessage::DHPart2(dh_part2), actions);
        self.state = ZrtpState::WaitConfirm1;
        Ok(())
    }

    /// Responder: check the commitment, derive the session keys and prove it
    /// with Confirm1.
    fn answer_dh_part2(&mut self, dh_part2: DHPartPacket, actions: &mut Vec<ZrtpAction>) -> Result<(), ZrtpError> {
        report(actions, Severity::Info, "Responder: DHPart2 received, preparing Confirm1");
        verify_hvi(&*self.hash, &dh_part2.public_value, &self.own_hello, &self.peer_hvi)?;

        let (Some(record), Some(secret_set)) = (&self.record, &self.secret_set) else {
            log::error!("DHPart2 received without retained secret state");
            return Ok(());
        };
        let Some(mut dh) = self.dh.take() else {
            log::error!("DHPart2 received without a DH context");
            return Ok(());
        };

        let dh_result = shared_secret(dh.as_mut(), &dh_part2.public_value)?;
        let sas = compute_sas(&*self.hash, &dh_part2.public_value, &self.own_public_value);
        let matched = secret_set.resolve(Role::Responder, &dh_part2, record);
        let retained: Vec<&[u8; HASH_LEN]> = matched.iter().collect();
        let keys = derive_keys(&*self.hash, &dh_result, &retained);
        drop(dh_result);

        let confirm1 = build_confirm(
            &*self.hash,
            &keys.hmac_key,
            ConfirmPacket::MESSAGE_TYPE_CONF1,
            self.config.sas_verified,
        );
        drop(dh);

        log::info!("Retained secrets shared with peer: {}", matched.len());
        self.matched_secrets = matched.len();
        self.keys = Some(keys);
        self.sas = Some(sas);
        self.send_response(ZrtpMessage::Confirm1(confirm1), actions);
        self.state = ZrtpState::WaitConfirm2;
        Ok(())
    }

    /// Initiator: verify the Responder's proof, enable receiving and answer
    /// with Confirm2.
    fn answer_confirm1(&mut self, confirm1: ConfirmPacket, actions: &mut Vec<ZrtpAction>) -> Result<(), ZrtpError> {
        report(actions, Severity::Info, "Initiator: Confirm1 received, preparing Confirm2");
        let Some(keys) = self.keys.as_ref() else {
            log::error!("Confirm1 received without session keys");
            return Ok(());
        };

        validate_confirm(&*self.hash, &keys.hmac_key, &confirm1)?;
        let confirm2 = build_confirm(
            &*self.hash,
            &keys.hmac_key,
            ConfirmPacket::MESSAGE_TYPE_CONF2,
            self.config.sas_verified,
        );

        self.peer_sas_verified = confirm1.is_sas_verified();
        self.save_retained_secret()?;
        self.deliver_secrets(EnableSecurity::ForReceiver, actions);
        self.send_request(ZrtpMessage::Confirm2(confirm2), actions);
        self.state = ZrtpState::WaitConf2Ack;
        Ok(())
    }

    /// Responder: verify the Initiator's proof and enable both directions.
    fn answer_confirm2(&mut self, confirm2: ConfirmPacket, actions: &mut Vec<ZrtpAction>) -> Result<(), ZrtpError> {
        report(actions, Severity::Info, "Responder: Confirm2 received, preparing Conf2Ack");
        let Some(keys) = self.keys.as_ref() else {
            log::error!("Confirm2 received without session keys");
            return Ok(());
        };

        validate_confirm(&*self.hash, &keys.hmac_key, &confirm2)?;

        self.peer_sas_verified = confirm2.is_sas_verified();
        self.save_retained_secret()?;
        self.deliver_secrets(EnableSecurity::ForReceiver, actions);
        self.deliver_secrets(EnableSecurity::ForSender, actions);
        self.send_response(ZrtpMessage::conf2_ack(), actions);
        self.state = ZrtpState::Secure;
        Ok(())
    }

    /// Rotates the retained secret once the peer proved it holds the keys.
    fn save_retained_secret(&mut self) -> Result<(), ZrtpError> {
        let (Some(keys), Some(record)) = (self.keys.as_ref(), self.record.as_mut()) else {
            return Ok(());
        };
        record.set_new_rs1(&keys.new_rs1);
        self.cache
            .save(record)
            .map_err(|e| ZrtpError::RetainedSecrets(e.to_string()))
    }

    fn srtp_secrets(&self) -> Option<SrtpSecrets> {
        let keys = self.keys.as_ref()?;
        let algorithms = self.algorithms.as_ref()?;
        let role = self.role?;
        let key_len = algorithms.cipher.key_len();

        Some(SrtpSecrets {
            key_initiator: keys.srtp_key_i[..key_len].to_vec(),
            salt_initiator: keys.srtp_salt_i[..SALT_LEN].to_vec(),
            key_responder: keys.srtp_key_r[..key_len].to_vec(),
            salt_responder: keys.srtp_salt_r[..SALT_LEN].to_vec(),
            key_len: key_len * 8,
            salt_len: SALT_LEN * 8,
            auth_tag_len: algorithms.auth_length.tag_bits(),
            sas: self.sas.clone().unwrap_or_default(),
            role,
            peer_sas_verified: self.peer_sas_verified,
        })
    }

    fn deliver_secrets(&mut self, part: EnableSecurity, actions: &mut Vec<ZrtpAction>) {
        if let Some(secrets) = self.srtp_secrets() {
            self.secrets_delivered = true;
            actions.push(ZrtpAction::SecretsReady { secrets, part });
        }
    }

    fn go_clear(&mut self, packet: &GoClearPacket, actions: &mut Vec<ZrtpAction>) {
        match prepare_clear_ack(packet) {
            Ok(ack) => actions.push(ZrtpAction::Send(ZrtpMessage::ClearAck(ack))),
            Err(err) => report(actions, err.severity(), format!("Received a GoClear message: {}", err)),
        }
    }

    fn secrets_off(&mut self, actions: &mut Vec<ZrtpAction>) {
        if self.secrets_delivered {
            actions.push(ZrtpAction::SecretsOff(EnableSecurity::ForSender));
            actions.push(ZrtpAction::SecretsOff(EnableSecurity::ForReceiver));
            self.secrets_delivered = false;
        }
    }

    /// Drops the DH context and every derived secret.
    fn wipe(&mut self) {
        self.dh = None;
        self.keys = None;
        self.record = None;
        self.secret_set = None;
        self.sas = None;
        self.own_public_value.clear();
        self.last_sent = None;
        self.awaiting_reply = false;
    }

    fn close(&mut self, actions: &mut Vec<ZrtpAction>) {
        log::info!("Closing ZRTP session in state {:?}", self.state);
        self.secrets_off(actions);
        self.wipe();
        self.state = ZrtpState::Closed;
    }

    fn abort(&mut self, err: ZrtpError, actions: &mut Vec<ZrtpAction>) {
        log::error!("Key agreement aborted in state {:?}: {}", self.state, err);
        self.secrets_off(actions);
        self.wipe();
        self.state = ZrtpState::Error;
        actions.push(ZrtpAction::Abort(err));
    }
}
