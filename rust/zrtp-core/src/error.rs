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

use crate::algorithms::AlgorithmCategory;

/// How serious a reported condition is.
///
/// `Alert` marks conditions that point at an active attack; the application
/// should present a trust warning rather than just fail the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
    Alert,
}

/// Errors raised by the key agreement engine.
///
/// None of these are retried inside the engine; every one except
/// [`ZrtpError::GoClearUnsupported`] ends the session attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ZrtpError {
    #[error("Hello message does not contain a supported {category} algorithm")]
    NoCommonAlgorithm { category: AlgorithmCategory },

    #[error("Cannot find a supported {category} algorithm in Commit message")]
    UnsupportedCommit { category: AlgorithmCategory },

    #[error("DH key generation failed: {0}")]
    KeyGeneration(String),

    #[error("Generated DH public key too big: {len}, max: {max}")]
    PublicKeyTooLarge { len: usize, max: usize },

    #[error("Invalid DH public value from peer")]
    InvalidPublicValue,

    #[error("Mismatch of HVI values, possible man-in-the-middle")]
    HviMismatch,

    #[error("Cannot read confirm message")]
    ConfirmUnreadable,

    #[error("HMAC verification of confirm message failed")]
    ConfirmHmacMismatch,

    #[error("GoClear is not supported, encryption stays on")]
    GoClearUnsupported,

    #[error("Retained secret store failure: {0}")]
    RetainedSecrets(String),

    #[error("No answer from peer after {0} retransmissions")]
    RetransmitLimit(u32),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ZrtpError {
    /// Severity reported alongside this error.
    pub fn severity(&self) -> Severity {
        match self {
            ZrtpError::UnsupportedCommit { .. } | ZrtpError::HviMismatch => Severity::Alert,
            ZrtpError::GoClearUnsupported => Severity::Warning,
            _ => Severity::Error,
        }
    }
}
