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

use crate::traits::{Hash, HASH_LEN};
use ring::digest::{self, SHA256};
use ring::hmac;

/// SHA-256 implementation of the [`Hash`] trait using the `ring` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256;

impl Hash for Sha256 {
    fn digest(&self, chunks: &[&[u8]]) -> [u8; HASH_LEN] {
        let mut ctx = digest::Context::new(&SHA256);
        for chunk in chunks {
            ctx.update(chunk);
        }
        let mut out = [0u8; HASH_LEN];
        out.copy_from_slice(ctx.finish().as_ref());
        out
    }

    fn hmac(&self, key: &[u8], chunks: &[&[u8]]) -> [u8; HASH_LEN] {
        let hmac_key = hmac::Key::new(hmac::HMAC_SHA256, key);
        let mut ctx = hmac::Context::with_key(&hmac_key);
        for chunk in chunks {
            ctx.update(chunk);
        }
        let mut out = [0u8; HASH_LEN];
        out.copy_from_slice(ctx.sign().as_ref());
        out
    }

    fn name(&self) -> &'static str {
        "SHA256"
    }
}
