use std::{
    fs::File,
    io::{self, Read},
    path::Path,
};

use sha2::{Digest, Sha256};
use tracing::trace;

const HASH_CHUNK: usize = 64 * 1024;

/// Read at most `limit` bytes of `path` as text, dropping invalid UTF-8.
///
/// Any I/O failure yields an empty string; callers treat that as "no signal".
pub fn read_text_lossy(path: &Path, limit: usize) -> String {
    match read_prefix(path, limit) {
        Ok(bytes) => decode_dropping_invalid(&bytes),
        Err(err) => {
            trace!(path = %path.display(), %err, "unreadable file treated as empty");
            String::new()
        }
    }
}

fn read_prefix(path: &Path, limit: usize) -> io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut buf = Vec::new();
    file.take(limit as u64).read_to_end(&mut buf)?;
    Ok(buf)
}

fn decode_dropping_invalid(bytes: &[u8]) -> String {
    // a truncated sequence at the end of the buffer lands in the last `invalid()`
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

/// Hex SHA-256 of a file's full content. Bytes read before an I/O error are
/// still hashed, so an unreadable file hashes like an empty one.
pub fn file_sha256(path: &Path) -> String {
    let mut hasher = Sha256::new();
    if let Err(err) = hash_into(path, &mut hasher) {
        trace!(path = %path.display(), %err, "hash sample truncated by read error");
    }
    hex::encode(hasher.finalize())
}

fn hash_into(path: &Path, hasher: &mut Sha256) -> io::Result<()> {
    let mut file = File::open(path)?;
    let mut chunk = vec![0u8; HASH_CHUNK];
    loop {
        let read = file.read(&mut chunk)?;
        if read == 0 {
            return Ok(());
        }
        hasher.update(&chunk[..read]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn drops_invalid_sequences() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("mixed.txt");
        fs::write(&path, b"open\xffai \xc3\xa9t\xe9").unwrap();
        assert_eq!(read_text_lossy(&path, 1024), "openai ét");
    }

    #[test]
    fn decoding_keeps_every_valid_run() {
        let bytes = b"\xe2\x82gpt-\xc0\xaf4 \xf0\x9f\xa6\x80 rag\xf0\x9f";
        assert_eq!(decode_dropping_invalid(bytes), "gpt-4 \u{1f980} rag");
        assert_eq!(decode_dropping_invalid(b""), "");
        assert_eq!(decode_dropping_invalid(b"\xff\xfe"), "");
    }

    #[test]
    fn respects_read_limit() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("big.txt");
        fs::write(&path, "a".repeat(64) + "langchain").unwrap();
        let text = read_text_lossy(&path, 64);
        assert_eq!(text.len(), 64);
        assert!(!text.contains("langchain"));
    }

    #[test]
    fn limit_splitting_a_multibyte_char_drops_it() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("utf8.txt");
        fs::write(&path, "abé").unwrap();
        assert_eq!(read_text_lossy(&path, 3), "ab");
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let temp = tempfile::tempdir().unwrap();
        assert_eq!(read_text_lossy(&temp.path().join("absent.md"), 1024), "");
    }

    #[test]
    fn hashes_content_and_missing_files() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("hello.txt");
        fs::write(&path, "hello").unwrap();
        assert_eq!(
            file_sha256(&path),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert_eq!(file_sha256(&temp.path().join("absent")), EMPTY_SHA256);
    }
}
