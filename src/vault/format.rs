//! On-disk encoding of the vault: one JSON object, name -> envelope.
//!
//! ```json
//! {
//!   "aws": "q2V0...==",
//!   "github": "8xkM...=="
//! }
//! ```
//!
//! There is no version field and no header.  Any document that is not
//! exactly an object of string values is corrupt and is rejected rather
//! than repaired.

use std::collections::BTreeMap;
use std::path::Path;

use crate::errors::{Result, VaultError};

/// In-memory vault: secret name -> base64 envelope.
///
/// A `BTreeMap` keeps the written file sorted by name, which makes the
/// JSON stable and easy to diff.
pub type SecretMap = BTreeMap<String, String>;

/// Decode raw file bytes into a mapping.
///
/// A zero-length file is an empty vault.  `path` is only used to label
/// the `StoreCorrupt` error.
pub fn decode(path: &Path, bytes: &[u8]) -> Result<SecretMap> {
    if bytes.is_empty() {
        return Ok(SecretMap::new());
    }

    serde_json::from_slice(bytes).map_err(|e| VaultError::StoreCorrupt {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Encode a mapping as pretty-printed JSON with a trailing newline.
pub fn encode(secrets: &SecretMap) -> Result<Vec<u8>> {
    let mut buf = serde_json::to_vec_pretty(secrets)
        .map_err(|e| VaultError::Serialization(format!("vault: {e}")))?;
    buf.push(b'\n');
    Ok(buf)
}
