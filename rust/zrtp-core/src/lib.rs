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

//! ZRTP key agreement engine.
//!
//! [`ZrtpContext`] runs one endpoint of the exchange: discovery, algorithm
//! negotiation, the committed Diffie-Hellman exchange, retained secret
//! matching and the confirmation step. It performs no I/O. Callers feed it
//! [`ZrtpEvent`]s and execute the returned [`ZrtpAction`]s, or route them
//! through a [`ZrtpCallback`] with [`ZrtpContext::process`].

pub mod algorithms;
pub mod commitment;
pub mod config;
pub mod confirm;
pub mod engine;
pub mod error;
pub mod negotiation;
pub mod shared_secrets;
pub mod state;

pub use algorithms::{
    Algorithm, AlgorithmCategory, AuthLength, CipherAlgorithm, HashAlgorithm, PubKeyAlgorithm,
    SasAlgorithm,
};
pub use config::ZrtpConfig;
pub use engine::{DhFactory, ZrtpContext};
pub use error::{Severity, ZrtpError};
pub use negotiation::NegotiatedAlgorithms;
pub use state::{
    EnableSecurity, Role, SrtpSecrets, ZrtpAction, ZrtpCallback, ZrtpEvent, ZrtpState,
};
