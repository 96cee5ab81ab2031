//! Digest dispatch over a closed set of algorithms.
//!
//! `sha256` and `blake3` are cryptographic digests of the UTF-8 bytes. `murmur3`,
//! `simhash` and `minhash` are similarity-oriented and make no collision-resistance claims.

pub mod murmur;

use crate::error::{DomHashError, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

pub use murmur::{murmur3_32, murmur3_str};

/// Shingle length used by [`HashAlgorithm::Minhash`]
pub const MINHASH_SHINGLE_LEN: usize = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Murmur3,
    Blake3,
    Simhash,
    Minhash,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 5] = [
        HashAlgorithm::Sha256,
        HashAlgorithm::Murmur3,
        HashAlgorithm::Blake3,
        HashAlgorithm::Simhash,
        HashAlgorithm::Minhash,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Murmur3 => "murmur3",
            HashAlgorithm::Blake3 => "blake3",
            HashAlgorithm::Simhash => "simhash",
            HashAlgorithm::Minhash => "minhash",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = DomHashError;

    fn from_str(s: &str) -> Result<Self> {
        HashAlgorithm::ALL
            .into_iter()
            .find(|algo| algo.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomHashError::UnsupportedAlgorithm(s.to_string()))
    }
}

/// Hex digest of `input` under the algorithm named `algorithm`
pub fn digest_by_name(input: &str, algorithm: &str) -> Result<String> {
    digest(input, algorithm.parse()?)
}

/// Hex digest of `input` under `algorithm`
pub fn digest(input: &str, algorithm: HashAlgorithm) -> Result<String> {
    match algorithm {
        HashAlgorithm::Sha256 => Ok(format!("{:x}", Sha256::digest(input.as_bytes()))),
        HashAlgorithm::Blake3 => blake3_hex(input),
        HashAlgorithm::Murmur3 => Ok(format!("{:08x}", murmur3_str(input))),
        HashAlgorithm::Simhash => Ok(format!("{:x}", simhash(input))),
        HashAlgorithm::Minhash => Ok(format!("{:x}", minhash(input, MINHASH_SHINGLE_LEN)?)),
    }
}

#[cfg(feature = "blake3")]
fn blake3_hex(input: &str) -> Result<String> {
    Ok(blake3::hash(input.as_bytes()).to_hex().to_string())
}

#[cfg(not(feature = "blake3"))]
fn blake3_hex(_input: &str) -> Result<String> {
    Err(DomHashError::EnvironmentUnavailable(
        "blake3 support was not compiled in (enable the `blake3` feature)".to_string(),
    ))
}

/// 32-bit simhash: every character's murmur3 hash votes on each bit
pub fn simhash(text: &str) -> u32 {
    let mut tally = [0i64; 32];
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        let hash = murmur3_str(ch.encode_utf8(&mut buf));
        for (bit, count) in tally.iter_mut().enumerate() {
            *count += if (hash >> bit) & 1 == 1 { 1 } else { -1 };
        }
    }

    tally
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .fold(0u32, |acc, (bit, _)| acc | (1 << bit))
}

/// Minimum murmur3 hash over all `k`-character shingles of `text`
pub fn minhash(text: &str, k: usize) -> Result<u32> {
    let chars: Vec<char> = text.chars().collect();
    if k == 0 || chars.len() < k {
        return Err(DomHashError::InvalidInput(format!(
            "minhash needs at least {} characters, got {}",
            k,
            chars.len()
        )));
    }

    chars
        .windows(k)
        .map(|shingle| murmur3_str(&shingle.iter().collect::<String>()))
        .min()
        .ok_or_else(|| DomHashError::InvalidInput("minhash produced no shingles".to_string()))
}
