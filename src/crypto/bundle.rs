//! Key material assembly
//!
//! Turns raw key generation output into the text artifacts written to disk.

use zeroize::Zeroize;

use super::pem::{self, ENCRYPTED_PRIVATE_KEY_LABEL, RSA_PRIVATE_KEY_LABEL};
use super::{openssh, RawKeyMaterial};

/// Text encodings of a generated key pair
#[derive(Clone)]
pub struct KeyMaterialBundle {
    /// PKCS#1 PEM
    private_key_pem: String,
    /// PKCS#8 encrypted PEM, present only when a passphrase was used
    encrypted_private_key_pem: Option<String>,
    /// "ssh-rsa <base64> <comment>"
    public_key_openssh: String,
    key_name: String,
    comment: String,
}

impl KeyMaterialBundle {
    pub fn from_raw(raw: &RawKeyMaterial, key_name: &str, comment: &str) -> Self {
        assemble(
            raw.private_der(),
            raw.encrypted_der(),
            raw.modulus(),
            raw.exponent(),
            key_name,
            comment,
        )
    }

    pub fn private_key_pem(&self) -> &str {
        &self.private_key_pem
    }

    pub fn encrypted_private_key_pem(&self) -> Option<&str> {
        self.encrypted_private_key_pem.as_deref()
    }

    pub fn public_key_openssh(&self) -> &str {
        &self.public_key_openssh
    }

    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }
}

impl Zeroize for KeyMaterialBundle {
    fn zeroize(&mut self) {
        self.private_key_pem.zeroize();
        self.encrypted_private_key_pem.zeroize();
    }
}

impl Drop for KeyMaterialBundle {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl std::fmt::Debug for KeyMaterialBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterialBundle")
            .field("private_key_pem", &"[REDACTED]")
            .field("encrypted", &self.encrypted_private_key_pem.is_some())
            .field("public_key_openssh", &self.public_key_openssh)
            .field("key_name", &self.key_name)
            .field("comment", &self.comment)
            .finish()
    }
}

/// Build the PEM and OpenSSH encodings of a key.
///
/// The encrypted PEM is produced only when `encrypted_der` is present; its
/// absence means no passphrase was requested.
pub fn assemble(
    private_der: &[u8],
    encrypted_der: Option<&[u8]>,
    modulus: &[u8],
    exponent: &[u8],
    key_name: &str,
    comment: &str,
) -> KeyMaterialBundle {
    KeyMaterialBundle {
        private_key_pem: pem::encode(RSA_PRIVATE_KEY_LABEL, private_der),
        encrypted_private_key_pem: encrypted_der
            .map(|der| pem::encode(ENCRYPTED_PRIVATE_KEY_LABEL, der)),
        public_key_openssh: openssh::encode(modulus, exponent, comment),
        key_name: key_name.to_string(),
        comment: comment.to_string(),
    }
}
