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

//! Concrete implementations of the primitive traits.

mod modp;
mod sha256;

pub use modp::{DhGroup, ModpDh};
pub use sha256::Sha256;

use crate::traits::DiffieHellman;
use anyhow::Result;

/// Creates a fresh, keyless DH context for the negotiated group.
pub fn new_dh(group: DhGroup) -> Result<Box<dyn DiffieHellman>> {
    Ok(Box::new(ModpDh::new(group)?))
}
