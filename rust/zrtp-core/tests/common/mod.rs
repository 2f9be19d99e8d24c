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

//! A loopback harness that runs two engines against each other.
#![allow(dead_code)]

use std::collections::VecDeque;

use zrtp_cache::ZidCache;
use zrtp_core::{
    DhFactory, EnableSecurity, Severity, SrtpSecrets, ZrtpAction, ZrtpConfig, ZrtpContext,
    ZrtpError, ZrtpEvent,
};
use zrtp_crypto::backends::Sha256;
use zrtp_proto::ZrtpMessage;

pub const ALICE_ZID: [u8; 12] = [0x11; 12];
pub const BOB_ZID: [u8; 12] = [0x22; 12];

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One engine plus everything it asked its caller to do.
pub struct Endpoint {
    pub ctx: ZrtpContext,
    pub secrets: Vec<(EnableSecurity, SrtpSecrets)>,
    pub secrets_off: Vec<EnableSecurity>,
    pub infos: Vec<(Severity, String)>,
    pub aborts: Vec<ZrtpError>,
    outbox: VecDeque<ZrtpMessage>,
}

impl Endpoint {
    pub fn new(zid: [u8; 12], config: ZrtpConfig, cache: impl ZidCache + 'static) -> Self {
        let ctx = ZrtpContext::new(zid, config, Box::new(Sha256), Box::new(cache)).unwrap();
        Self {
            ctx,
            secrets: Vec::new(),
            secrets_off: Vec::new(),
            infos: Vec::new(),
            aborts: Vec::new(),
            outbox: VecDeque::new(),
        }
    }

    pub fn with_dh_factory(mut self, factory: DhFactory) -> Self {
        self.ctx = self.ctx.with_dh_factory(factory);
        self
    }

    pub fn handle(&mut self, event: ZrtpEvent) {
        for action in self.ctx.handle_event(event) {
            match action {
                ZrtpAction::Send(message) => self.outbox.push_back(message),
                ZrtpAction::Info { severity, message } => self.infos.push((severity, message)),
                ZrtpAction::SecretsReady { secrets, part } => self.secrets.push((part, secrets)),
                ZrtpAction::SecretsOff(part) => self.secrets_off.push(part),
                ZrtpAction::Abort(err) => self.aborts.push(err),
            }
        }
    }

    /// Delivers a message after a trip through the byte codec.
    pub fn receive(&mut self, message: &ZrtpMessage) {
        self.handle(ZrtpEvent::Received(over_the_wire(message)));
    }

    pub fn take_outgoing(&mut self) -> Vec<ZrtpMessage> {
        self.outbox.drain(..).collect()
    }

    pub fn has_warning(&self, needle: &str) -> bool {
        self.infos
            .iter()
            .any(|(severity, message)| *severity == Severity::Warning && message.contains(needle))
    }
}

pub fn over_the_wire(message: &ZrtpMessage) -> ZrtpMessage {
    let bytes = message.to_bytes();
    let (rest, parsed) = ZrtpMessage::parse(&bytes).unwrap();
    assert!(rest.is_empty(), "{} left trailing bytes", message.name());
    parsed
}

/// Discovery in an order that makes `alice` the Initiator without a Commit
/// collision: Bob acknowledges Alice's Hello, and Alice commits as soon as
/// Bob's Hello arrives.
pub fn discover(alice: &mut Endpoint, bob: &mut Endpoint) {
    alice.handle(ZrtpEvent::Start);
    bob.handle(ZrtpEvent::Start);
    let hello_a = alice.take_outgoing();
    let hello_b = bob.take_outgoing();

    for message in &hello_a {
        bob.receive(message);
    }
    for message in &bob.take_outgoing() {
        alice.receive(message);
    }
    for message in &hello_b {
        alice.receive(message);
    }
}

/// Shuttles queued messages both ways until both sides go quiet.
///
/// `tamper` sees every message in transit and may rewrite it.
pub fn pump(alice: &mut Endpoint, bob: &mut Endpoint, tamper: &mut dyn FnMut(&mut ZrtpMessage)) {
    for _ in 0..32 {
        let from_alice = alice.take_outgoing();
        let from_bob = bob.take_outgoing();
        if from_alice.is_empty() && from_bob.is_empty() {
            return;
        }
        for mut message in from_alice {
            tamper(&mut message);
            bob.receive(&message);
        }
        for mut message in from_bob {
            tamper(&mut message);
            alice.receive(&message);
        }
    }
    panic!("endpoints did not settle");
}

/// A complete exchange with Alice as Initiator.
pub fn connect(alice: &mut Endpoint, bob: &mut Endpoint) {
    discover(alice, bob);
    pump(alice, bob, &mut |_| {});
}

/// The secrets delivered for `part`, if any.
pub fn secrets_for(endpoint: &Endpoint, part: EnableSecurity) -> Option<&SrtpSecrets> {
    endpoint
        .secrets
        .iter()
        .find(|(p, _)| *p == part)
        .map(|(_, secrets)| secrets)
}
