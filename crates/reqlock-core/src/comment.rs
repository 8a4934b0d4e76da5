//! `# SHA1:<hex>` marker lines embedded in generated lock files

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::error::VerifyError;

/// Literal prefix of a hash comment line.
pub const PREFIX: &str = "# SHA1:";

/// Hash comment recording the digest of the input a file was generated from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HashComment {
    digest: String,
}

impl HashComment {
    pub fn new(digest: impl Into<String>) -> Result<Self, VerifyError> {
        let digest = digest.into();
        if digest.is_empty() {
            return Err(VerifyError::EmptyDigest);
        }
        Ok(Self { digest })
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Line form written into generated files, newline included.
    pub fn encode(&self) -> String {
        format!("{PREFIX}{}\n", self.digest)
    }

    /// First hash comment in `content`, if any.
    ///
    /// The digest is everything after the prefix up to the line terminator.
    pub fn decode(content: &str) -> Option<Self> {
        content
            .lines()
            .find_map(|line| line.strip_prefix(PREFIX))
            .and_then(|digest| Self::new(digest).ok())
    }
}

impl fmt::Display for HashComment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{}", self.digest)
    }
}

/// Read the hash comment of a generated file.
///
/// A missing file has no hash comment yet and yields `None`.
pub fn read_hash_comment(path: &Path) -> Result<Option<HashComment>, VerifyError> {
    match fs::read(path) {
        Ok(bytes) => Ok(HashComment::decode(&String::from_utf8_lossy(&bytes))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("{} does not exist", path.display());
            Ok(None)
        }
        Err(source) => Err(VerifyError::Output {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIGEST: &str = "c93d71964e14b04f3c8327d16dbc4d6b1bbc3b1d";

    #[test]
    fn encode_format() {
        let c = HashComment::new(DIGEST).unwrap();
        assert_eq!(c.encode(), format!("# SHA1:{DIGEST}\n"));
        assert_eq!(c.to_string(), format!("# SHA1:{DIGEST}"));
    }

    #[test]
    fn empty_digest_rejected() {
        assert!(matches!(
            HashComment::new(""),
            Err(VerifyError::EmptyDigest)
        ));
    }

    #[test]
    fn decode_encoded() {
        let c = HashComment::new(DIGEST).unwrap();
        assert_eq!(HashComment::decode(&c.encode()), Some(c));
    }

    #[test]
    fn decode_first_match_wins() {
        let content = "# SHA1:aaaa\n#\n# SHA1:bbbb\nsix==1.16.0\n";
        let c = HashComment::decode(content).unwrap();
        assert_eq!(c.digest(), "aaaa");
    }

    #[test]
    fn decode_after_header() {
        let content = format!(
            "#\n# This file is autogenerated\n# SHA1:{DIGEST}\nclick==8.1.7\n"
        );
        assert_eq!(HashComment::decode(&content).unwrap().digest(), DIGEST);
    }

    #[test]
    fn decode_requires_line_start() {
        assert_eq!(HashComment::decode(" # SHA1:aaaa\nsix\n"), None);
        assert_eq!(HashComment::decode("#SHA1:aaaa\n"), None);
        assert_eq!(HashComment::decode("# sha1:aaaa\n"), None);
    }

    #[test]
    fn decode_without_hash_line() {
        assert_eq!(HashComment::decode("six==1.16.0\nclick==8.1.7\n"), None);
        assert_eq!(HashComment::decode(""), None);
    }

    #[test]
    fn decode_crlf_and_missing_newline() {
        assert_eq!(
            HashComment::decode("# SHA1:abcd\r\nsix\r\n").unwrap().digest(),
            "abcd"
        );
        assert_eq!(HashComment::decode("six\n# SHA1:abcd").unwrap().digest(), "abcd");
    }

    #[test]
    fn decode_empty_digest_is_none() {
        assert_eq!(HashComment::decode("# SHA1:\nsix\n"), None);
    }

    #[test]
    fn read_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let found = read_hash_comment(&dir.path().join("base.txt")).unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn read_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("base.txt");
        std::fs::write(&path, format!("# SHA1:{DIGEST}\nsix==1.16.0\n")).unwrap();
        let found = read_hash_comment(&path).unwrap().unwrap();
        assert_eq!(found.digest(), DIGEST);
    }

    #[test]
    fn read_non_utf8_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("base.txt");
        std::fs::write(&path, b"# SHA1:abcd\ncaf\xe9==1.0\n").unwrap();
        assert_eq!(read_hash_comment(&path).unwrap().unwrap().digest(), "abcd");
    }

    #[test]
    fn read_directory_is_output_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_hash_comment(dir.path()).unwrap_err();
        assert!(matches!(err, VerifyError::Output { .. }));
    }
}
