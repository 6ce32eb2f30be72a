pub mod url_validator;

/// Alphabet for generated short codes: 26 uppercase, 26 lowercase, 10 digits
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Upper bound on any short code, generated or custom (matches the column width)
pub const MAX_SHORT_CODE_LEN: usize = 16;

/// Generate a random short code of `length` characters
///
/// Every character is drawn independently and uniformly from [`CODE_ALPHABET`]
/// using the thread-local CSPRNG. Collisions are the caller's problem.
pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    iter::repeat_with(|| CODE_ALPHABET[rand::random_range(0..CODE_ALPHABET.len())] as char)
        .take(length)
        .collect()
}

/// Check a user supplied short code against the slug format
///
/// Allowed: ASCII letters, digits, `-` and `_`, 1 to [`MAX_SHORT_CODE_LEN`] characters.
#[inline]
pub fn is_valid_slug(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_SHORT_CODE_LEN
        && code
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
