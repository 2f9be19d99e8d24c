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
use zrtp_cache::{InMemoryCache, SqliteCache, ZidCache};
use zrtp_core::{EnableSecurity, ZrtpConfig, ZrtpState};

fn call(alice_cache: impl ZidCache + 'static, bob_cache: impl ZidCache + 'static) -> (Endpoint, Endpoint) {
    let mut alice = Endpoint::new(ALICE_ZID, ZrtpConfig::default(), alice_cache);
    let mut bob = Endpoint::new(BOB_ZID, ZrtpConfig::default(), bob_cache);
    connect(&mut alice, &mut bob);
    assert_eq!(alice.ctx.state(), ZrtpState::Secure);
    assert_eq!(bob.ctx.state(), ZrtpState::Secure);
    (alice, bob)
}

#[test]
fn test_retained_secrets_carry_over() {
    init_logging();
    let alice_cache = InMemoryCache::new();
    let bob_cache = InMemoryCache::new();

    let (alice, _) = call(alice_cache.clone(), bob_cache.clone());
    assert_eq!(alice.ctx.retained_secret_matches(), 0);

    let first = alice_cache.load_for_peer(&BOB_ZID).unwrap();
    assert!(first.is_rs1_valid());
    assert!(!first.is_rs2_valid());
    assert_eq!(first.rs1(), bob_cache.load_for_peer(&ALICE_ZID).unwrap().rs1());

    // Second call: only rs1 is shared
    let (alice, bob) = call(alice_cache.clone(), bob_cache.clone());
    assert_eq!(alice.ctx.retained_secret_matches(), 1);
    assert_eq!(bob.ctx.retained_secret_matches(), 1);

    let second = alice_cache.load_for_peer(&BOB_ZID).unwrap();
    assert_ne!(second.rs1(), first.rs1());
    assert_eq!(second.rs2(), first.rs1());
    assert!(second.is_rs2_valid());

    // Third call: rs1 and rs2 both match
    let (alice, bob) = call(alice_cache.clone(), bob_cache.clone());
    assert_eq!(alice.ctx.retained_secret_matches(), 2);
    assert_eq!(bob.ctx.retained_secret_matches(), 2);
    assert_eq!(alice.ctx.sas(), bob.ctx.sas());
    assert_eq!(
        secrets_for(&alice, EnableSecurity::ForSender).unwrap().key_initiator,
        secrets_for(&bob, EnableSecurity::ForReceiver).unwrap().key_initiator
    );
}

#[test]
fn test_lost_cache_still_completes() {
    let alice_cache = InMemoryCache::new();
    let bob_cache = InMemoryCache::new();
    call(alice_cache.clone(), bob_cache.clone());

    // Bob forgot Alice; the call still succeeds without continuity
    let (alice, bob) = call(alice_cache.clone(), InMemoryCache::new());
    assert_eq!(alice.ctx.retained_secret_matches(), 0);
    assert_eq!(bob.ctx.retained_secret_matches(), 0);
    assert_eq!(alice.ctx.sas(), bob.ctx.sas());
}

#[test]
fn test_sqlite_cache_across_sessions() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let alice_db = dir.path().join("alice.db");
    let bob_db = dir.path().join("bob.db");

    let (alice, _) = call(
        SqliteCache::new(&alice_db).unwrap(),
        SqliteCache::new(&bob_db).unwrap(),
    );
    assert_eq!(alice.ctx.retained_secret_matches(), 0);
    drop(alice);
    let first_rs1 = *SqliteCache::new(&alice_db)
        .unwrap()
        .load_for_peer(&BOB_ZID)
        .unwrap()
        .rs1();

    let (alice, bob) = call(
        SqliteCache::new(&alice_db).unwrap(),
        SqliteCache::new(&bob_db).unwrap(),
    );
    assert!(alice.ctx.retained_secret_matches() > 0);
    assert_eq!(alice.ctx.retained_secret_matches(), bob.ctx.retained_secret_matches());
    drop((alice, bob));

    let alice_record = SqliteCache::new(&alice_db).unwrap().load_for_peer(&BOB_ZID).unwrap();
    let bob_record = SqliteCache::new(&bob_db).unwrap().load_for_peer(&ALICE_ZID).unwrap();
    assert_ne!(alice_record.rs1(), &first_rs1);
    assert_eq!(alice_record.rs1(), bob_record.rs1());
}
