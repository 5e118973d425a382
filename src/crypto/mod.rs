//! Key material for ssh-keysmith
//!
//! This module provides:
//! - RSA key generation (PKCS#1 and encrypted PKCS#8 DER)
//! - PEM encoding of DER bytes
//! - OpenSSH `ssh-rsa` public key lines
//! - Assembly of all text artifacts into one bundle

pub mod bundle;
pub mod openssh;
pub mod pem;
mod rsa_keys;

pub use bundle::{assemble, KeyMaterialBundle};
pub use rsa_keys::{RawKeyMaterial, PBKDF2_ITERATIONS};
