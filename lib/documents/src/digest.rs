use sha2::{Digest, Sha256};

/// Computes the content digest of a document: the lower-case hexadecimal SHA-256 of its bytes.
pub fn content_digest(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}
