//! OpenSSH public key encoding for RSA
//!
//! The public key blob follows the SSH wire format (RFC 4253 §6.6):
//! [string: "ssh-rsa"][mpint: e][mpint: n]
//!
//! Every field carries a 4-byte big-endian length prefix. An mpint whose
//! leading byte has the high bit set gets a `0x00` pad so it stays positive
//! when read as two's complement.

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Key type tag for RSA keys
pub const SSH_RSA: &str = "ssh-rsa";

/// Strip leading zero bytes, keeping at least one byte.
///
/// A zero-valued integer normalizes to `[0x00]`.
pub fn normalize_unsigned(value: &[u8]) -> &[u8] {
    let leading = value
        .iter()
        .take(value.len().saturating_sub(1))
        .take_while(|&&b| b == 0)
        .count();
    &value[leading..]
}

/// Append an SSH `string` field
pub fn put_string(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    buf.extend_from_slice(bytes);
}

/// Append an SSH `mpint` field for a non-negative big-endian integer
pub fn put_mpint(buf: &mut Vec<u8>, value: &[u8]) {
    let value = normalize_unsigned(value);
    let pad = value.first().is_some_and(|b| b & 0x80 != 0);

    let len = value.len() + usize::from(pad);
    buf.extend_from_slice(&(len as u32).to_be_bytes());
    if pad {
        buf.push(0x00);
    }
    buf.extend_from_slice(value);
}

/// Build the raw `ssh-rsa` public key blob.
///
/// Exponent comes before modulus, matching the wire layout.
pub fn public_key_blob(modulus: &[u8], exponent: &[u8]) -> Vec<u8> {
    let mut blob = Vec::with_capacity(4 + SSH_RSA.len() + 8 + exponent.len() + modulus.len() + 2);
    put_string(&mut blob, SSH_RSA.as_bytes());
    put_mpint(&mut blob, exponent);
    put_mpint(&mut blob, modulus);
    blob
}

/// Format the public key as an OpenSSH line.
/// Format: "ssh-rsa <base64-encoded-blob> <comment>"
///
/// With an empty comment no trailing space is left.
pub fn encode(modulus: &[u8], exponent: &[u8], comment: &str) -> String {
    let encoded = STANDARD.encode(public_key_blob(modulus, exponent));
    format!("{} {} {}", SSH_RSA, encoded, comment)
        .trim_end()
        .to_string()
}
