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

//! Retained secret storage for ZRTP peers.
//!
//! A [`ZidRecord`] is read once when an exchange with a peer starts and
//! written back once when it completes. Serializing concurrent sessions with
//! the same peer is left to the caller.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use rusqlite::{params, OptionalExtension};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of a retained secret in bytes.
pub const RS_LENGTH: usize = 32;

/// Retained secrets shared with one peer.
///
/// Holds up to two secrets. Each new session shifts `rs1` into `rs2` and
/// stores a fresh `rs1`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ZidRecord {
    identifier: [u8; 12],
    rs1: [u8; RS_LENGTH],
    rs1_valid: bool,
    rs2: [u8; RS_LENGTH],
    rs2_valid: bool,
}

impl ZidRecord {
    /// Creates a record without any valid secret for `peer_zid`.
    pub fn new(peer_zid: [u8; 12]) -> Self {
        Self {
            identifier: peer_zid,
            rs1: [0u8; RS_LENGTH],
            rs1_valid: false,
            rs2: [0u8; RS_LENGTH],
            rs2_valid: false,
        }
    }

    /// The peer this record belongs to.
    pub fn identifier(&self) -> &[u8; 12] {
        &self.identifier
    }

    pub fn is_rs1_valid(&self) -> bool {
        self.rs1_valid
    }

    pub fn is_rs2_valid(&self) -> bool {
        self.rs2_valid
    }

    pub fn rs1(&self) -> &[u8; RS_LENGTH] {
        &self.rs1
    }

    pub fn rs2(&self) -> &[u8; RS_LENGTH] {
        &self.rs2
    }

    /// Stores a freshly derived `rs1`, moving the previous one into `rs2`.
    pub fn set_new_rs1(&mut self, value: &[u8; RS_LENGTH]) {
        self.rs2 = self.rs1;
        self.rs2_valid = self.rs1_valid;
        self.rs1 = *value;
        self.rs1_valid = true;
    }
}

impl std::fmt::Debug for ZidRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZidRecord")
            .field("identifier", &self.identifier)
            .field("rs1_valid", &self.rs1_valid)
            .field("rs2_valid", &self.rs2_valid)
            .finish_non_exhaustive()
    }
}

/// Trait for ZID cache (retained secret storage).
///
/// The cache persists secrets across sessions so a later exchange with the
/// same peer can prove continuity.
pub trait ZidCache {
    /// Reads the record for `peer_zid`, or an empty record if none exists.
    fn load_for_peer(&self, peer_zid: &[u8; 12]) -> anyhow::Result<ZidRecord>;
    /// Writes `record` back, replacing any previous record for the same peer.
    fn save(&mut self, record: &ZidRecord) -> anyhow::Result<()>;
}

/// A simple in-memory implementation of the [`ZidCache`] trait.
///
/// Clones share the same storage, so a test or an embedding application can
/// keep a handle while the engine owns another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCache {
    cache: Arc<Mutex<HashMap<[u8; 12], ZidRecord>>>,
}

impl InMemoryCache {
    /// Creates a new, empty in-memory cache.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ZidCache for InMemoryCache {
    fn load_for_peer(&self, peer_zid: &[u8; 12]) -> anyhow::Result<ZidRecord> {
        let cache = self.cache.lock().map_err(|_| anyhow!("ZID cache lock poisoned"))?;
        Ok(cache
            .get(peer_zid)
            .cloned()
            .unwrap_or_else(|| ZidRecord::new(*peer_zid)))
    }

    fn save(&mut self, record: &ZidRecord) -> anyhow::Result<()> {
        let mut cache = self.cache.lock().map_err(|_| anyhow!("ZID cache lock poisoned"))?;
        cache.insert(record.identifier, record.clone());
        Ok(())
    }
}

/// A persistent implementation of the [`ZidCache`] trait using SQLite.
pub struct SqliteCache {
    conn: rusqlite::Connection,
}

impl SqliteCache {
    /// Opens (or creates) a SQLite cache at the given path.
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let conn = rusqlite::Connection::open(path)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS zrtp_retained (
                zid BLOB PRIMARY KEY NOT NULL,
                rs1 BLOB NOT NULL,
                rs1_valid INTEGER NOT NULL,
                rs2 BLOB NOT NULL,
                rs2_valid INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(Self { conn })
    }
}

fn to_secret(blob: &[u8]) -> anyhow::Result<[u8; RS_LENGTH]> {
    blob.try_into()
        .map_err(|_| anyhow!("Stored retained secret has length {}", blob.len()))
}

impl ZidCache for SqliteCache {
    fn load_for_peer(&self, peer_zid: &[u8; 12]) -> anyhow::Result<ZidRecord> {
        let row = self
            .conn
            .query_row(
                "SELECT rs1, rs1_valid, rs2, rs2_valid FROM zrtp_retained WHERE zid = ?",
                params![peer_zid.as_slice()],
                |row| {
                    Ok((
                        row.get::<_, Vec<u8>>(0)?,
                        row.get::<_, bool>(1)?,
                        row.get::<_, Vec<u8>>(2)?,
                        row.get::<_, bool>(3)?,
                    ))
                },
            )
            .optional()?;

        let mut record = ZidRecord::new(*peer_zid);
        if let Some((mut rs1, rs1_valid, mut rs2, rs2_valid)) = row {
            record.rs1 = to_secret(&rs1)?;
            record.rs1_valid = rs1_valid;
            record.rs2 = to_secret(&rs2)?;
            record.rs2_valid = rs2_valid;
            rs1.zeroize();
            rs2.zeroize();
        } else {
            log::debug!("No retained secrets for peer, starting fresh");
        }
        Ok(record)
    }

    fn save(&mut self, record: &ZidRecord) -> anyhow::Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO zrtp_retained (zid, rs1, rs1_valid, rs2, rs2_valid)
             VALUES (?, ?, ?, ?, ?)",
            params![
                record.identifier.as_slice(),
                record.rs1.as_slice(),
                record.rs1_valid,
                record.rs2.as_slice(),
                record.rs2_valid
            ],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rs1_shifts_previous() {
        let mut rec = ZidRecord::new([0x22; 12]);
        assert!(!rec.is_rs1_valid());
        assert!(!rec.is_rs2_valid());

        rec.set_new_rs1(&[0xAA; 32]);
        assert!(rec.is_rs1_valid());
        assert!(!rec.is_rs2_valid());
        assert_eq!(rec.rs1(), &[0xAA; 32]);

        rec.set_new_rs1(&[0xBB; 32]);
        assert!(rec.is_rs2_valid());
        assert_eq!(rec.rs1(), &[0xBB; 32]);
        assert_eq!(rec.rs2(), &[0xAA; 32]);
    }

    #[test]
    fn test_in_memory_clones_share_storage() {
        let mut cache = InMemoryCache::new();
        let observer = cache.clone();

        let mut rec = cache.load_for_peer(&[0x11; 12]).unwrap();
        rec.set_new_rs1(&[0x42; 32]);
        cache.save(&rec).unwrap();

        let loaded = observer.load_for_peer(&[0x11; 12]).unwrap();
        assert!(loaded.is_rs1_valid());
        assert_eq!(loaded.rs1(), &[0x42; 32]);
        assert!(!observer.load_for_peer(&[0x33; 12]).unwrap().is_rs1_valid());
    }

    #[test]
    fn test_sqlite_persists_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zrtp.db");

        {
            let mut cache = SqliteCache::new(&path).unwrap();
            let mut rec = cache.load_for_peer(&[0x11; 12]).unwrap();
            assert!(!rec.is_rs1_valid());
            rec.set_new_rs1(&[0x01; 32]);
            rec.set_new_rs1(&[0x02; 32]);
            cache.save(&rec).unwrap();
        }

        let cache = SqliteCache::new(&path).unwrap();
        let rec = cache.load_for_peer(&[0x11; 12]).unwrap();
        assert!(rec.is_rs1_valid());
        assert!(rec.is_rs2_valid());
        assert_eq!(rec.rs1(), &[0x02; 32]);
        assert_eq!(rec.rs2(), &[0x01; 32]);
    }
}
