//! Constant-time operations to prevent timing attacks
//!
//! Padding checks and MAC comparisons run here. Their execution time must not depend
//! on where the first mismatching byte sits, otherwise a network attacker who can
//! observe failures gets a padding or MAC oracle.

use subtle::{Choice, ConstantTimeEq, ConstantTimeGreater, ConstantTimeLess};

/// Constant-time comparison of byte slices
///
/// Returns true if slices are equal, false otherwise.
/// Execution time is independent of the contents.
///
/// # Example
///
/// ```rust
/// use crypto_kit::constant_time::ct_eq;
///
/// assert!(ct_eq(b"tag", b"tag"));
/// assert!(!ct_eq(b"tag", b"tab"));
/// ```
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    // Early length check is safe - length is not secret
    if a.len() != b.len() {
        return false;
    }

    a.ct_eq(b).into()
}

/// Constant-time MAC/HMAC verification
pub fn verify_mac(expected_tag: &[u8], computed_tag: &[u8]) -> bool {
    ct_eq(expected_tag, computed_tag)
}

/// Checks a PKCS#7-style padding tail in constant time.
///
/// `tail` holds the last `max_len` bytes of the decrypted buffer, `claimed` is the
/// value of the final byte. The padding is valid when `1 <= claimed <= max_len` and the
/// last `claimed` bytes of `tail` all equal `claimed`. Every byte of `tail` is inspected
/// regardless of the outcome.
pub fn ct_padding_valid(tail: &[u8], claimed: u8) -> bool {
    let max_len = match u8::try_from(tail.len()) {
        Ok(len) => len,
        Err(_) => return false,
    };

    let mut valid: Choice = !claimed.ct_eq(&0) & !claimed.ct_gt(&max_len);

    for (offset, byte) in tail.iter().rev().enumerate() {
        // tail.len() fits in u8, so offset does too
        let offset = offset as u8;
        let in_padding = offset.ct_lt(&claimed);
        valid &= !in_padding | byte.ct_eq(&claimed);
    }

    valid.into()
}
