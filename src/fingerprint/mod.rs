//! Content fingerprinting using blake3.
//!
//! A fingerprint is a truncated content hash embedded in a published
//! filename. Identical bytes always produce the same name; any content
//! change produces a new one, so clients may cache published assets
//! indefinitely.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Hex chars of the hash kept in published filenames (128 bits).
const FINGERPRINT_LEN: usize = 32;

/// A 256-bit content hash (blake3 output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Create a new ContentHash from raw bytes.
    #[inline]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to full hex string (for debugging/display).
    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }

    /// Truncated hex form used in published filenames.
    pub fn fingerprint(self) -> String {
        hex::encode(&self.0[..FINGERPRINT_LEN / 2])
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Display first 16 chars of hex for brevity
        write!(f, "{}", &self.to_hex()[..16])
    }
}

/// Compute blake3 hash of file contents (streaming).
///
/// A source that cannot be opened or read aborts the publish; there is no
/// fallback for a file that cannot be hashed.
pub fn hash_file(path: &Path) -> Result<ContentHash> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let mut reader = BufReader::with_capacity(64 * 1024, file);
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; 64 * 1024];

    loop {
        match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => {
                hasher.update(&buffer[..n]);
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read {}", path.display()));
            }
        }
    }

    Ok(ContentHash::new(*hasher.finalize().as_bytes()))
}

/// Extract the extension from a file name.
///
/// The extension is the substring from the last `.` to the end of the
/// name, dot included; a name without a dot has the empty extension.
pub fn file_extension(name: &str) -> &str {
    name.rfind('.').map_or("", |i| &name[i..])
}

/// Compose the published filename for a source file: fingerprint + extension.
pub fn fingerprinted_name(path: &Path) -> Result<String> {
    let hash = hash_file(path)?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    Ok(format!("{}{}", hash.fingerprint(), file_extension(name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_hash_file_deterministic() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.txt");
        fs::write(&path, "hello world").unwrap();

        let hash1 = hash_file(&path).unwrap();
        let hash2 = hash_file(&path).unwrap();

        // Same content = same hash
        assert_eq!(hash1, hash2);

        // Different content = different hash
        fs::write(&path, "goodbye world").unwrap();
        let hash3 = hash_file(&path).unwrap();
        assert_ne!(hash1, hash3);
    }

    #[test]
    fn test_hash_file_missing() {
        let err = hash_file(Path::new("/nonexistent/file.txt")).unwrap_err();
        assert!(err.to_string().contains("Failed to open"));
    }

    #[test]
    fn test_fingerprint_length() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.txt");
        fs::write(&path, "content").unwrap();

        let hash = hash_file(&path).unwrap();
        assert_eq!(hash.fingerprint().len(), 32);
        assert!(hash.to_hex().starts_with(&hash.fingerprint()));
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("bundle.js"), ".js");
        assert_eq!(file_extension("style.css"), ".css");
        assert_eq!(file_extension("archive.tar.gz"), ".gz");
        assert_eq!(file_extension("README"), "");
        assert_eq!(file_extension(".gitignore"), ".gitignore");
        assert_eq!(file_extension(""), "");
    }

    #[test]
    fn test_fingerprinted_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("style.css");
        fs::write(&path, "body {}").unwrap();

        let name = fingerprinted_name(&path).unwrap();
        assert!(name.ends_with(".css"));
        assert_eq!(name.len(), 32 + ".css".len());

        // Content change produces a different name
        fs::write(&path, "body { color: red; }").unwrap();
        let changed = fingerprinted_name(&path).unwrap();
        assert_ne!(name, changed);
        assert!(changed.ends_with(".css"));
    }

    #[test]
    fn test_fingerprinted_name_no_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("CNAME");
        fs::write(&path, "example.com").unwrap();

        let name = fingerprinted_name(&path).unwrap();
        assert_eq!(name.len(), 32);
        assert!(!name.contains('.'));
    }
}
