//! SHA1 digests of requirement input files
//!
//! Two digests are accepted as proof that an output file is current:
//! the raw digest of the trimmed file bytes (written by older generators)
//! and the robust digest, which ignores comments, surrounding whitespace
//! and line order.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Serialize;
use sha1::{Digest, Sha1};

use crate::error::VerifyError;

/// Whitespace stripped from both ends of the raw content.
const ASCII_WHITESPACE: &[u8] = b" \t\n\r\x0b\x0c";

/// Lowercase hex SHA1 of `data`.
pub fn sha1_hex(data: &[u8]) -> String {
    format!("{:x}", Sha1::digest(data))
}

/// Digest of the whole content with leading/trailing whitespace removed.
pub fn raw_digest(content: &[u8]) -> String {
    sha1_hex(trim_ascii_whitespace(content))
}

/// Digest of the content with comments stripped, lines trimmed and sorted.
///
/// `\n`, `\r\n` and a lone `\r` all end a line; the empty pieces between
/// `\r` and `\n` vanish in the concatenation.
pub fn robust_digest(content: &str) -> String {
    let mut lines: Vec<&str> = content
        .split(['\n', '\r'])
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .collect();
    lines.sort_unstable();
    sha1_hex(lines.concat().as_bytes())
}

/// Raw digest of the file at `path`.
pub fn raw_hash(path: &Path) -> Result<String, VerifyError> {
    let bytes = fs::read(path).map_err(|e| VerifyError::input(path, e))?;
    Ok(raw_digest(&bytes))
}

/// Robust digest of the file at `path`. The file must be valid UTF-8.
pub fn robust_hash(path: &Path) -> Result<String, VerifyError> {
    let text = fs::read_to_string(path).map_err(|e| VerifyError::input(path, e))?;
    Ok(robust_digest(&text))
}

fn trim_ascii_whitespace(mut bytes: &[u8]) -> &[u8] {
    while let [first, rest @ ..] = bytes {
        if !ASCII_WHITESPACE.contains(first) {
            break;
        }
        bytes = rest;
    }
    while let [rest @ .., last] = bytes {
        if !ASCII_WHITESPACE.contains(last) {
            break;
        }
        bytes = rest;
    }
    bytes
}

/// Digest algorithm whose hash comment is accepted by the verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HashStrategy {
    Robust,
    Raw,
}

impl HashStrategy {
    /// Accepted strategies, in the order they are tried.
    pub const ALL: [Self; 2] = [Self::Robust, Self::Raw];

    pub fn name(self) -> &'static str {
        match self {
            Self::Robust => "robust",
            Self::Raw => "raw",
        }
    }

    /// Digest of the file at `path`.
    pub fn compute(self, path: &Path) -> Result<String, VerifyError> {
        match self {
            Self::Robust => robust_hash(path),
            Self::Raw => raw_hash(path),
        }
    }
}

impl fmt::Display for HashStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
