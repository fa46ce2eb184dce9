//! Stable fingerprints of classifier inputs

use crate::domain::RepositoryRecord;
use sha2::{Digest, Sha256};

/// SHA-256 over exactly the fields the classifier reads, truncated to 16 hex
/// chars. Pass-through metadata (stars, url, ...) does not affect it.
pub fn record_fingerprint(record: &RepositoryRecord) -> String {
    let mut hasher = Sha256::new();
    hasher.update(record.name.as_bytes());
    hasher.update([0u8]);
    hasher.update(record.description.as_deref().unwrap_or("").as_bytes());
    hasher.update([0u8]);
    for topic in &record.topics {
        hasher.update(topic.as_bytes());
        hasher.update([0x1fu8]);
    }
    hasher.update([0u8]);
    hasher.update(record.language.as_deref().unwrap_or("").as_bytes());
    let result = hasher.finalize();
    format!("{:x}", result)[..16].to_string()
}
