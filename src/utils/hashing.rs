//! Stable short digests for payload identity

use sha2::{Digest, Sha256};

/// First 16 hex characters of SHA-256 over `parts`, each terminated by a NUL
/// so that `["ab", "c"]` and `["a", "bc"]` differ.
pub fn stable_hash<S: AsRef<str>>(parts: &[S]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_ref().as_bytes());
        hasher.update([0u8]);
    }
    let result = hasher.finalize();
    format!("{:x}", result)[..16].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_stable_and_short() {
        let a = stable_hash(&["Acme", "a.pdf"]);
        assert_eq!(a, stable_hash(&["Acme", "a.pdf"]));
        assert_eq!(a.len(), 16);
    }

    #[test]
    fn part_boundaries_matter() {
        assert_ne!(stable_hash(&["ab", "c"]), stable_hash(&["a", "bc"]));
    }
}
