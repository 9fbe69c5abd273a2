//! BIN input checks.

pub const BIN_LENGTH: usize = 6;

/// Strict check used before any lookup: exactly six ASCII digits.
pub fn is_exact_bin(bin: &str) -> bool {
    bin.len() == BIN_LENGTH && bin.bytes().all(|b| b.is_ascii_digit())
}

/// Loose check exposed as the `validate_bin` tool: at least six characters.
///
/// Digit content is not inspected, so this accepts inputs that
/// [`is_exact_bin`] rejects (e.g. full card numbers).
pub fn validate_bin(bin: &str) -> bool {
    bin.chars().count() >= BIN_LENGTH
}
