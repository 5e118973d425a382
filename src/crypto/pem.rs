//! PEM text encoding
//!
//! Wraps DER bytes between `-----BEGIN {label}-----` / `-----END {label}-----`
//! markers with the base64 body broken into 64-character lines.

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Label for PKCS#1 private keys
pub const RSA_PRIVATE_KEY_LABEL: &str = "RSA PRIVATE KEY";

/// Label for password-encrypted PKCS#8 private keys
pub const ENCRYPTED_PRIVATE_KEY_LABEL: &str = "ENCRYPTED PRIVATE KEY";

/// Characters of base64 per PEM body line
pub const LINE_WIDTH: usize = 64;

/// Encode `der` as a PEM block with the given label.
///
/// Every line, including the footer, ends with `\n`. The label is passed
/// through verbatim.
pub fn encode(label: &str, der: &[u8]) -> String {
    let body = STANDARD.encode(der);

    let line_count = body.len().div_ceil(LINE_WIDTH);
    let mut out = String::with_capacity(body.len() + line_count + 2 * (label.len() + 17));

    out.push_str("-----BEGIN ");
    out.push_str(label);
    out.push_str("-----\n");

    // base64 output is ASCII, so byte chunks are always valid str slices
    for chunk in body.as_bytes().chunks(LINE_WIDTH) {
        out.push_str(std::str::from_utf8(chunk).unwrap_or_default());
        out.push('\n');
    }

    out.push_str("-----END ");
    out.push_str(label);
    out.push_str("-----\n");
    out
}
