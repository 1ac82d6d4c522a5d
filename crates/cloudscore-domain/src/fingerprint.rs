use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a compliance result.
///
/// Identity fields:
/// - provider
/// - asset name
/// - control id
/// - check id
pub fn fingerprint_for_result(
    provider: &str,
    asset_name: &str,
    control_id: &str,
    check_id: &str,
) -> String {
    let canonical = [provider, asset_name, control_id, check_id].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
