//! Key validation shared by all backends.

use crate::error::{StorageError, StorageResult};

/// Maximum key length in bytes.
pub const MAX_KEY_LEN: usize = 128;

/// Checks that `key` can be stored by every backend.
///
/// Keys are restricted to ASCII letters, digits, `_`, `-` and `.`, may not
/// start with `.`, and must be between 1 and [`MAX_KEY_LEN`] bytes. The
/// file backend maps keys directly to file names, so the same rule applies
/// everywhere to keep backends interchangeable.
///
/// # Errors
///
/// Returns [`StorageError::InvalidKey`] describing the first violation.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::invalid_key(key, "key is empty"));
    }
    if key.len() > MAX_KEY_LEN {
        return Err(StorageError::invalid_key(key, "key is too long"));
    }
    if key.starts_with('.') {
        return Err(StorageError::invalid_key(key, "key starts with '.'"));
    }
    let valid = key
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.'));
    if !valid {
        return Err(StorageError::invalid_key(
            key,
            "key contains characters other than [A-Za-z0-9_.-]",
        ));
    }
    Ok(())
}
