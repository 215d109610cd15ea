//! Checksum verification for downloaded artifacts.

use std::path::Path;

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use tokio::io::AsyncReadExt;

use crate::error::Result;

/// Digest algorithms the `checksum` config key may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumType {
    Md5,
    Sha1,
    Sha256,
}

impl ChecksumType {
    /// Detect the algorithm from the hex digest length.
    pub fn from_hex_length(len: usize) -> Option<Self> {
        match len {
            32 => Some(ChecksumType::Md5),
            40 => Some(ChecksumType::Sha1),
            64 => Some(ChecksumType::Sha256),
            _ => None,
        }
    }
}

/// Compare a file's digest against an expected hex string.
pub async fn verify_checksum(path: &Path, expected: &str) -> Result<bool> {
    let checksum_type = match ChecksumType::from_hex_length(expected.len()) {
        Some(checksum_type) => checksum_type,
        None => return Ok(false),
    };

    let mut file = tokio::fs::File::open(path).await?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer).await?;

    let actual = match checksum_type {
        ChecksumType::Md5 => {
            let mut hasher = Md5::new();
            hasher.update(&buffer);
            format!("{:x}", hasher.finalize())
        }
        ChecksumType::Sha1 => {
            let mut hasher = Sha1::new();
            hasher.update(&buffer);
            format!("{:x}", hasher.finalize())
        }
        ChecksumType::Sha256 => {
            let mut hasher = Sha256::new();
            hasher.update(&buffer);
            format!("{:x}", hasher.finalize())
        }
    };

    Ok(actual.eq_ignore_ascii_case(expected))
}
