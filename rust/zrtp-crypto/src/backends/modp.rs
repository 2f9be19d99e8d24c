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

//! Finite field Diffie-Hellman over the RFC 3526 MODP groups.

use crate::traits::DiffieHellman;
use anyhow::{anyhow, Result};
use num_bigint::BigUint;
use rand_core::{OsRng, RngCore};
use zeroize::Zeroizing;

/// RFC 3526 3072-bit MODP prime (group 15).
const MODP_3072: &str = concat!(
    "FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD129024E08",
    "8A67CC74020BBEA63B139B22514A08798E3404DDEF9519B3CD3A431B",
    "302B0A6DF25F14374FE1356D6D51C245E485B576625E7EC6F44C42E9",
    "A637ED6B0BFF5CB6F406B7EDEE386BFB5A899FA5AE9F24117C4B1FE6",
    "49286651ECE45B3DC2007CB8A163BF0598DA48361C55D39A69163FA8",
    "FD24CF5F83655D23DCA3AD961C62F356208552BB9ED529077096966D",
    "670C354E4ABC9804F1746C08CA18217C32905E462E36CE3BE39E772C",
    "180E86039B2783A2EC07A28FB5C55DF06F4C52C9DE2BCBF695581718",
    "3995497CEA956AE515D2261898FA051015728E5A8AAAC42DAD33170D",
    "04507A33A85521ABDF1CBA64ECFB850458DBEF0A8AEA71575D060C7D",
    "B3970F85A6E1E4C7ABF5AE8CDB0933D71E8C94E04A25619DCEE3D226",
    "1AD2EE6BF12FFA06D98A0864D87602733EC86A64521F2B18177B200C",
    "BBE117577A615D6C770988C0BAD946E208E24FA074E5AB3143DB5BFC",
    "E0FD108E4B82D120A93AD2CAFFFFFFFFFFFFFFFF"
);

/// RFC 3526 4096-bit MODP prime (group 16).
const MODP_4096: &str = concat!(
    "FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD129024E08",
    "8A67CC74020BBEA63B139B22514A08798E3404DDEF9519B3CD3A431B",
    "302B0A6DF25F14374FE1356D6D51C245E485B576625E7EC6F44C42E9",
    "A637ED6B0BFF5CB6F406B7EDEE386BFB5A899FA5AE9F24117C4B1FE6",
    "49286651ECE45B3DC2007CB8A163BF0598DA48361C55D39A69163FA8",
    "FD24CF5F83655D23DCA3AD961C62F356208552BB9ED529077096966D",
    "670C354E4ABC9804F1746C08CA18217C32905E462E36CE3BE39E772C",
    "180E86039B2783A2EC07A28FB5C55DF06F4C52C9DE2BCBF695581718",
    "3995497CEA956AE515D2261898FA051015728E5A8AAAC42DAD33170D",
    "04507A33A85521ABDF1CBA64ECFB850458DBEF0A8AEA71575D060C7D",
    "B3970F85A6E1E4C7ABF5AE8CDB0933D71E8C94E04A25619DCEE3D226",
    "1AD2EE6BF12FFA06D98A0864D87602733EC86A64521F2B18177B200C",
    "BBE117577A615D6C770988C0BAD946E208E24FA074E5AB3143DB5BFC",
    "E0FD108E4B82D120A92108011A723C12A787E6D788719A10BDBA5B26",
    "99C327186AF4E23C1A946834B6150BDA2583E9CA2AD44CE8DBBBC2DB",
    "04DE8EF92E8EFC141FBECAA6287C59474E6BC05D99B2964FA090C3A2",
    "233BA186515BE7ED1F612970CEE2D7AFB81BDD762170481CD0069127",
    "D5B05AA993B4EA988D8FDDC186FFB7DC90A6C08F4DF435C934063199",
    "FFFFFFFFFFFFFFFF"
);

/// Length of the random private exponent in bytes.
const EXPONENT_LEN: usize = 64;

/// The finite field groups a ZRTP endpoint can negotiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DhGroup {
    /// 3072-bit MODP group; public values are 384 bytes.
    Dh3072,
    /// 4096-bit MODP group; public values are 512 bytes.
    Dh4096,
}

impl DhGroup {
    /// Size of a public value (and of the raw shared secret) in bytes.
    pub fn public_value_len(&self) -> usize {
        match self {
            DhGroup::Dh3072 => 384,
            DhGroup::Dh4096 => 512,
        }
    }

    fn prime_hex(&self) -> &'static str {
        match self {
            DhGroup::Dh3072 => MODP_3072,
            DhGroup::Dh4096 => MODP_4096,
        }
    }
}

/// MODP implementation of the [`DiffieHellman`] trait using `num-bigint`.
///
/// The private exponent lives only inside this struct and is wiped when the
/// shared secret is computed or the instance is dropped.
pub struct ModpDh {
    group: DhGroup,
    prime: BigUint,
    generator: BigUint,
    secret: Option<Zeroizing<Vec<u8>>>,
}

impl ModpDh {
    /// Creates a DH context for `group` without a key pair.
    pub fn new(group: DhGroup) -> Result<Self> {
        let prime = BigUint::parse_bytes(group.prime_hex().as_bytes(), 16)
            .ok_or_else(|| anyhow!("Invalid MODP prime constant"))?;
        Ok(Self {
            group,
            prime,
            generator: BigUint::from(2u32),
            secret: None,
        })
    }

    /// The group this context was created for.
    pub fn group(&self) -> DhGroup {
        self.group
    }

    /// Left-pads `value` to the group size. The intermediate big-endian
    /// bytes are wiped on return.
    fn to_fixed_len(&self, value: &BigUint) -> Result<Zeroizing<Vec<u8>>> {
        let len = self.group.public_value_len();
        let bytes = Zeroizing::new(value.to_bytes_be());
        if bytes.len() > len {
            return Err(anyhow!("DH value of {} bytes exceeds group size {}", bytes.len(), len));
        }
        let mut out = Zeroizing::new(vec![0u8; len]);
        out[len - bytes.len()..].copy_from_slice(&bytes);
        Ok(out)
    }
}

/// Overwrites the digits of `value` in place before it is dropped.
///
/// `assign_from_slice` reuses the existing allocation, so the zeros land on
/// the memory that held the secret.
fn wipe(value: &mut BigUint) {
    let digits = (value.bits() as usize + 31) / 32;
    value.assign_from_slice(&vec![0u32; digits]);
}

impl DiffieHellman for ModpDh {
    fn generate_keypair(&mut self) -> Result<Vec<u8>> {
        let mut secret = Zeroizing::new(vec![0u8; EXPONENT_LEN]);
        OsRng
            .try_fill_bytes(&mut secret)
            .map_err(|e| anyhow!("Random source failed: {}", e))?;
        // Keep the exponent at full length.
        secret[0] |= 0x80;

        let mut exponent = BigUint::from_bytes_be(&secret);
        let public = self.generator.modpow(&exponent, &self.prime);
        wipe(&mut exponent);
        self.secret = Some(secret);
        Ok(self.to_fixed_len(&public)?.to_vec())
    }

    fn compute_shared_secret(&mut self, peer_public_key: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        if peer_public_key.len() != self.group.public_value_len() {
            log::warn!(
                "{}: peer public value has {} bytes",
                self.name(),
                peer_public_key.len()
            );
            return Err(anyhow!(
                "Invalid public value length {} for {}",
                peer_public_key.len(),
                self.name()
            ));
        }
        let peer = BigUint::from_bytes_be(peer_public_key);
        let one = BigUint::from(1u32);
        let upper = &self.prime - &one;
        if peer <= one || peer >= upper {
            log::warn!("{}: peer public value out of range", self.name());
            return Err(anyhow!("Public value out of range"));
        }

        let secret = self.secret.take().ok_or_else(|| anyhow!("Keypair not generated"))?;
        let mut exponent = BigUint::from_bytes_be(&secret);
        drop(secret);
        let mut shared = peer.modpow(&exponent, &self.prime);
        wipe(&mut exponent);
        let result = self.to_fixed_len(&shared);
        wipe(&mut shared);
        result
    }

    fn max_public_key_len(&self) -> usize {
        self.group.public_value_len()
    }

    fn name(&self) -> &'static str {
        match self.group {
            DhGroup::Dh3072 => "DH3072",
            DhGroup::Dh4096 => "DH4096",
        }
    }
}
