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

//! Retained secret identifiers and their intersection.
//!
//! Each side derives, per secret category, an identifier for the Initiator
//! role and one for the Responder role: `HMAC(secret, "Initiator")` and
//! `HMAC(secret, "Responder")`. A missing secret is replaced by fresh random
//! bytes so its identifiers never match. Each side sends the identifiers of its
//! own role in its DHPart message and checks the peer's against the ones it
//! expects for the peer's role.

use rand_core::{OsRng, RngCore};
use zeroize::Zeroizing;

use crate::error::ZrtpError;
use crate::state::Role;
use zrtp_cache::{ZidRecord, RS_LENGTH};
use zrtp_crypto::{constant_time_eq, Hash, HASH_LEN};
use zrtp_proto::DHPartPacket;

const INITIATOR: &[u8] = b"Initiator";
const RESPONDER: &[u8] = b"Responder";

/// Number of leading identifier bytes carried in a DHPart message.
pub const ID_WIRE_LEN: usize = 8;

/// The five identifiers for one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretIds {
    /// Keyed with the newest retained secret, or with a random value if
    /// that secret is not valid.
    pub rs1: [u8; HASH_LEN],
    /// Same for the previous retained secret.
    pub rs2: [u8; HASH_LEN],
    /// Signaling secret ID; always random.
    pub sigs: [u8; HASH_LEN],
    /// SRTP secret ID; always random.
    pub srtps: [u8; HASH_LEN],
    pub other: [u8; HASH_LEN],
}

impl SecretIds {
    /// Stores the wire prefix of each identifier in `packet`.
    pub fn write_to(&self, packet: &mut DHPartPacket) {
        packet.rs1_id.copy_from_slice(&self.rs1[..ID_WIRE_LEN]);
        packet.rs2_id.copy_from_slice(&self.rs2[..ID_WIRE_LEN]);
        packet.sigs_id.copy_from_slice(&self.sigs[..ID_WIRE_LEN]);
        packet.srtps_id.copy_from_slice(&self.srtps[..ID_WIRE_LEN]);
        packet.other_secret_id.copy_from_slice(&self.other[..ID_WIRE_LEN]);
    }
}

/// Identifiers for both roles, computed once per session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedSecretSet {
    /// MACs over "Initiator"; the Initiator sends these in DHPart2.
    pub initiator: SecretIds,
    /// MACs over "Responder"; the Responder sends these in DHPart1.
    pub responder: SecretIds,
}

fn random_secret() -> Result<Zeroizing<[u8; RS_LENGTH]>, ZrtpError> {
    let mut buf = Zeroizing::new([0u8; RS_LENGTH]);
    OsRng
        .try_fill_bytes(buf.as_mut_slice())
        .map_err(|e| ZrtpError::KeyGeneration(e.to_string()))?;
    Ok(buf)
}

impl SharedSecretSet {
    /// Derives the identifiers from the peer's retained secrets.
    ///
    /// Signaling, SRTP and other secrets are not supported and always get
    /// random identifiers.
    pub fn compute(hash: &dyn Hash, record: &ZidRecord) -> Result<Self, ZrtpError> {
        let pair = |secret: &[u8]| {
            (hash.hmac(secret, &[INITIATOR]), hash.hmac(secret, &[RESPONDER]))
        };
        let retained = |valid: bool, secret: &[u8; RS_LENGTH]| -> Result<_, ZrtpError> {
            if valid {
                Ok(pair(secret))
            } else {
                Ok(pair(random_secret()?.as_slice()))
            }
        };

        let (rs1_i, rs1_r) = retained(record.is_rs1_valid(), record.rs1())?;
        let (rs2_i, rs2_r) = retained(record.is_rs2_valid(), record.rs2())?;
        let (sigs_i, sigs_r) = pair(random_secret()?.as_slice());
        let (srtps_i, srtps_r) = pair(random_secret()?.as_slice());
        let (other_i, other_r) = pair(random_secret()?.as_slice());

        Ok(Self {
            initiator: SecretIds {
                rs1: rs1_i,
                rs2: rs2_i,
                sigs: sigs_i,
                srtps: srtps_i,
                other: other_i,
            },
            responder: SecretIds {
                rs1: rs1_r,
                rs2: rs2_r,
                sigs: sigs_r,
                srtps: srtps_r,
                other: other_r,
            },
        })
    }

    /// Identifiers this side sends for `role`.
    pub fn own_ids(&self, role: Role) -> &SecretIds {
        match role {
            Role::Initiator => &self.initiator,
            Role::Responder => &self.responder,
        }
    }

    /// Returns the retained secrets both sides hold, in canonical order.
    ///
    /// `peer` is the DHPart received from the other side. Matches are ordered
    /// by the full Initiator identifier, which both sides know, so the result
    /// is identical on both ends.
    pub fn resolve(
        &self,
        role: Role,
        peer: &DHPartPacket,
        record: &ZidRecord,
    ) -> Zeroizing<Vec<[u8; RS_LENGTH]>> {
        let expected = match role {
            Role::Initiator => &self.responder,
            Role::Responder => &self.initiator,
        };
        let matches_peer = |ours: &[u8; HASH_LEN], theirs: &[u8; ID_WIRE_LEN]| {
            constant_time_eq(&ours[..ID_WIRE_LEN], theirs)
        };

        let mut matched: Vec<(&[u8; HASH_LEN], &[u8; RS_LENGTH])> = Vec::with_capacity(2);
        if matches_peer(&expected.rs1, &peer.rs1_id) {
            matched.push((&self.initiator.rs1, record.rs1()));
        }
        if matches_peer(&expected.rs2, &peer.rs2_id) {
            matched.push((&self.initiator.rs2, record.rs2()));
        }
        // sigs, srtps and other are random on both sides and cannot match.

        matched.sort_by(|a, b| a.0.cmp(b.0));
        Zeroizing::new(matched.into_iter().map(|(_, secret)| *secret).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use zrtp_crypto::backends::Sha256;

    fn record_with(rs1: Option<[u8; 32]>, rs2: Option<[u8; 32]>) -> ZidRecord {
        let mut record = ZidRecord::new([3; 12]);
        // set_new_rs1 shifts, so install rs2 first
        if let Some(rs2) = rs2 {
            record.set_new_rs1(&rs2);
        }
        if let Some(rs1) = rs1 {
            record.set_new_rs1(&rs1);
        }
        record
    }

    fn dh_part(ids: &SecretIds, message_type: [u8; 8]) -> DHPartPacket {
        let mut packet = DHPartPacket::new(message_type, vec![0x02; 384]);
        ids.write_to(&mut packet);
        packet
    }

    /// Runs both sides' resolution and returns (initiator view, responder view).
    fn exchange(
        initiator_record: &ZidRecord,
        responder_record: &ZidRecord,
    ) -> (Vec<[u8; 32]>, Vec<[u8; 32]>) {
        let hash = Sha256;
        let i_set = SharedSecretSet::compute(&hash, initiator_record).unwrap();
        let r_set = SharedSecretSet::compute(&hash, responder_record).unwrap();

        let dh1 = dh_part(r_set.own_ids(Role::Responder), DHPartPacket::MESSAGE_TYPE_DH1);
        let dh2 = dh_part(i_set.own_ids(Role::Initiator), DHPartPacket::MESSAGE_TYPE_DH2);

        let at_initiator = i_set.resolve(Role::Initiator, &dh1, initiator_record).to_vec();
        let at_responder = r_set.resolve(Role::Responder, &dh2, responder_record).to_vec();
        (at_initiator, at_responder)
    }

    #[test]
    fn test_first_contact_has_no_match() {
        let empty = ZidRecord::new([3; 12]);
        let (i, r) = exchange(&empty, &empty);
        assert!(i.is_empty());
        assert!(r.is_empty());
    }

    #[test]
    fn test_only_shared_secrets_match() {
        let shared = [0x41; 32];
        let initiator = record_with(Some(shared), Some([0x01; 32]));
        let responder = record_with(Some(shared), Some([0x02; 32]));
        let (i, r) = exchange(&initiator, &responder);
        assert_eq!(i, vec![shared]);
        assert_eq!(r, vec![shared]);
    }

    #[test]
    fn test_wire_ids_are_role_specific() {
        let hash = Sha256;
        let set = SharedSecretSet::compute(&hash, &record_with(Some([0x41; 32]), None)).unwrap();
        assert_eq!(set.initiator.rs1, hash.hmac(&[0x41; 32], &[b"Initiator".as_slice()]));
        assert_eq!(set.responder.rs1, hash.hmac(&[0x41; 32], &[b"Responder".as_slice()]));

        let packet = dh_part(set.own_ids(Role::Responder), DHPartPacket::MESSAGE_TYPE_DH1);
        assert_eq!(packet.rs1_id[..], set.responder.rs1[..8]);
    }

    proptest! {
        #[test]
        fn prop_both_sides_agree_on_order(
            rs1 in proptest::option::of(any::<[u8; 32]>()),
            rs2 in proptest::option::of(any::<[u8; 32]>()),
        ) {
            let record = record_with(rs1, rs2);
            let (i, r) = exchange(&record, &record);

            let valid = usize::from(record.is_rs1_valid()) + usize::from(record.is_rs2_valid());
            prop_assert_eq!(i.len(), valid);
            prop_assert_eq!(&i, &r);

            if valid == 2 {
                let hash = Sha256;
                let id1 = hash.hmac(record.rs1(), &[b"Initiator".as_slice()]);
                let id2 = hash.hmac(record.rs2(), &[b"Initiator".as_slice()]);
                let expected = if id1 <= id2 {
                    vec![*record.rs1(), *record.rs2()]
                } else {
                    vec![*record.rs2(), *record.rs1()]
                };
                prop_assert_eq!(i, expected);
            }
        }
    }
}
