//! Shared helpers

pub mod hashing;

pub use hashing::record_fingerprint;

/// Format an integer with thousands separators (`1234567` -> `1,234,567`).
pub fn format_with_commas(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
