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

mod common;

use common::*;
use zeroize::Zeroizing;
use zrtp_cache::{InMemoryCache, ZidCache};
use zrtp_core::{
    AlgorithmCategory, EnableSecurity, Severity, ZrtpConfig, ZrtpError, ZrtpEvent, ZrtpState,
};
use zrtp_crypto::backends::{new_dh, DhGroup};
use zrtp_crypto::DiffieHellman;
use zrtp_proto::{GoClearPacket, ZrtpMessage};

fn endpoints() -> (Endpoint, Endpoint) {
    (
        Endpoint::new(ALICE_ZID, ZrtpConfig::default(), InMemoryCache::new()),
        Endpoint::new(BOB_ZID, ZrtpConfig::default(), InMemoryCache::new()),
    )
}

#[test]
fn test_substituted_public_value_raises_alert() {
    init_logging();
    let bob_cache = InMemoryCache::new();
    let mut alice = Endpoint::new(ALICE_ZID, ZrtpConfig::default(), InMemoryCache::new());
    let mut bob = Endpoint::new(BOB_ZID, ZrtpConfig::default(), bob_cache.clone());

    // A valid public value, just not the one Alice committed to
    let forged = new_dh(DhGroup::Dh3072).unwrap().generate_keypair().unwrap();

    discover(&mut alice, &mut bob);
    pump(&mut alice, &mut bob, &mut |message| {
        if let ZrtpMessage::DHPart2(dh_part2) = message {
            dh_part2.public_value = forged.clone();
        }
    });

    assert_eq!(bob.ctx.state(), ZrtpState::Error);
    assert_eq!(bob.aborts, vec![ZrtpError::HviMismatch]);
    assert_eq!(bob.aborts[0].severity(), Severity::Alert);
    assert!(bob.secrets.is_empty());
    assert!(bob.ctx.sas().is_none());
    assert!(!bob_cache.load_for_peer(&ALICE_ZID).unwrap().is_rs1_valid());

    // Alice never gets a Confirm1 and keeps waiting
    assert_eq!(alice.ctx.state(), ZrtpState::WaitConfirm1);
    assert!(alice.secrets.is_empty());
}

#[test]
fn test_unsupported_commit_raises_alert() {
    let (mut alice, mut bob) = endpoints();
    discover(&mut alice, &mut bob);
    pump(&mut alice, &mut bob, &mut |message| {
        if let ZrtpMessage::Commit(commit) = message {
            commit.cipher_type = *b"TWOFISH ";
        }
    });

    assert_eq!(
        bob.aborts,
        vec![ZrtpError::UnsupportedCommit { category: AlgorithmCategory::Cipher }]
    );
    assert_eq!(bob.aborts[0].severity(), Severity::Alert);
    assert_eq!(bob.ctx.state(), ZrtpState::Error);
}

#[test]
fn test_tampered_confirm1_is_rejected() {
    let alice_cache = InMemoryCache::new();
    let mut alice = Endpoint::new(ALICE_ZID, ZrtpConfig::default(), alice_cache.clone());
    let mut bob = Endpoint::new(BOB_ZID, ZrtpConfig::default(), InMemoryCache::new());

    discover(&mut alice, &mut bob);
    pump(&mut alice, &mut bob, &mut |message| {
        if let ZrtpMessage::Confirm1(confirm) = message {
            confirm.hmac[0] ^= 0x01;
        }
    });

    assert_eq!(alice.aborts, vec![ZrtpError::ConfirmHmacMismatch]);
    assert_eq!(alice.ctx.state(), ZrtpState::Error);
    assert!(alice.secrets.is_empty());
    assert!(alice.secrets_off.is_empty());
    // The retained secret only rotates after a verified Confirm
    assert!(!alice_cache.load_for_peer(&BOB_ZID).unwrap().is_rs1_valid());
}

#[test]
fn test_flipped_sas_flag_is_rejected() {
    let (mut alice, mut bob) = endpoints();
    discover(&mut alice, &mut bob);
    pump(&mut alice, &mut bob, &mut |message| {
        if let ZrtpMessage::Confirm2(confirm) = message {
            confirm.sas_flag ^= 0x01;
        }
    });

    assert_eq!(bob.aborts, vec![ZrtpError::ConfirmHmacMismatch]);
    assert!(bob.secrets.is_empty());
    // Alice already enabled her receiving side and is waiting for Conf2Ack
    assert_eq!(alice.ctx.state(), ZrtpState::WaitConf2Ack);
    assert_eq!(alice.secrets.len(), 1);
    assert_eq!(alice.secrets[0].0, EnableSecurity::ForReceiver);
}

#[test]
fn test_garbled_confirm_is_unreadable() {
    let (mut alice, mut bob) = endpoints();
    discover(&mut alice, &mut bob);
    pump(&mut alice, &mut bob, &mut |message| {
        if let ZrtpMessage::Confirm1(confirm) = message {
            confirm.plain_text = *b"unknown message";
        }
    });

    assert_eq!(alice.aborts, vec![ZrtpError::ConfirmUnreadable]);
}

#[test]
fn test_go_clear_is_refused() {
    let (mut alice, mut bob) = endpoints();
    connect(&mut alice, &mut bob);

    alice.handle(ZrtpEvent::GoClear(GoClearPacket::new([0; 8])));
    bob.receive(&ZrtpMessage::GoClear(GoClearPacket::new([0xAB; 8])));

    for endpoint in [&mut alice, &mut bob] {
        assert!(endpoint.take_outgoing().is_empty());
        assert_eq!(endpoint.ctx.state(), ZrtpState::Secure);
        assert!(endpoint.has_warning("GoClear"));
        assert!(endpoint.secrets_off.is_empty());
        assert!(endpoint.aborts.is_empty());
    }
}

/// Hands out a public value one byte longer than it claims to allow.
struct OversizedDh;

impl DiffieHellman for OversizedDh {
    fn generate_keypair(&mut self) -> anyhow::Result<Vec<u8>> {
        Ok(vec![0x02; 385])
    }

    fn compute_shared_secret(&mut self, _: &[u8]) -> anyhow::Result<Zeroizing<Vec<u8>>> {
        Err(anyhow::anyhow!("no key pair"))
    }

    fn max_public_key_len(&self) -> usize {
        384
    }

    fn name(&self) -> &'static str {
        "DH3072"
    }
}

/// Fails like an allocation failure during key generation.
struct FailingDh;

impl DiffieHellman for FailingDh {
    fn generate_keypair(&mut self) -> anyhow::Result<Vec<u8>> {
        Err(anyhow::anyhow!("out of memory"))
    }

    fn compute_shared_secret(&mut self, _: &[u8]) -> anyhow::Result<Zeroizing<Vec<u8>>> {
        Err(anyhow::anyhow!("no key pair"))
    }

    fn max_public_key_len(&self) -> usize {
        384
    }

    fn name(&self) -> &'static str {
        "DH3072"
    }
}

fn oversized_dh(_: DhGroup) -> anyhow::Result<Box<dyn DiffieHellman>> {
    Ok(Box::new(OversizedDh))
}

fn failing_dh(_: DhGroup) -> anyhow::Result<Box<dyn DiffieHellman>> {
    Ok(Box::new(FailingDh))
}

fn is_dh_part(message: &ZrtpMessage) -> bool {
    matches!(message, ZrtpMessage::DHPart1(_) | ZrtpMessage::DHPart2(_))
}

#[test]
fn test_oversized_public_value_aborts_initiator() {
    let mut alice = Endpoint::new(ALICE_ZID, ZrtpConfig::default(), InMemoryCache::new())
        .with_dh_factory(oversized_dh);
    let mut bob = Endpoint::new(BOB_ZID, ZrtpConfig::default(), InMemoryCache::new());
    discover(&mut alice, &mut bob);

    assert_eq!(alice.aborts, vec![ZrtpError::PublicKeyTooLarge { len: 385, max: 384 }]);
    assert_eq!(alice.aborts[0].severity(), Severity::Error);
    assert_eq!(alice.ctx.state(), ZrtpState::Error);
    // Neither a Commit nor a DHPart leaves Alice
    assert!(alice.take_outgoing().is_empty());

    let mut sent = Vec::new();
    pump(&mut alice, &mut bob, &mut |message| sent.push(message.clone()));
    assert!(!sent.iter().any(is_dh_part));
    assert!(bob.secrets.is_empty());
}

#[test]
fn test_key_generation_failure_aborts_responder() {
    let mut alice = Endpoint::new(ALICE_ZID, ZrtpConfig::default(), InMemoryCache::new());
    let mut bob = Endpoint::new(BOB_ZID, ZrtpConfig::default(), InMemoryCache::new())
        .with_dh_factory(failing_dh);
    discover(&mut alice, &mut bob);

    let mut sent = Vec::new();
    pump(&mut alice, &mut bob, &mut |message| sent.push(message.clone()));

    assert!(matches!(bob.aborts.as_slice(), [ZrtpError::KeyGeneration(_)]));
    assert_eq!(bob.aborts[0].severity(), Severity::Error);
    assert_eq!(bob.ctx.state(), ZrtpState::Error);
    assert!(!sent.iter().any(is_dh_part));
    // Alice committed and is still waiting for DHPart1
    assert_eq!(alice.ctx.state(), ZrtpState::CommitSent);
}
