//! RSA key generation
//!
//! Key generation and DER export are delegated to the `rsa` crate. This module
//! only collects what the encoders need:
//! - PKCS#1 DER of the private key
//! - PKCS#8 DER encrypted with PBES2 (PBKDF2-SHA256 + AES-256-CBC), when a
//!   passphrase is given
//! - modulus and public exponent as big-endian bytes

use log::debug;
use pkcs8::{pkcs5::pbes2, EncodePrivateKey, PrivateKeyInfo};
use rand::rngs::OsRng;
use rand::RngCore;
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::traits::PublicKeyParts;
use rsa::RsaPrivateKey;
use zeroize::Zeroizing;

use crate::error::{KeysmithError, Result};

/// PBKDF2 iteration count for the encrypted private key
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// PBKDF2 salt length in bytes
pub const SALT_LEN: usize = 16;

/// AES-CBC block / IV length
const IV_LEN: usize = 16;

/// Output of the key generation primitive
pub struct RawKeyMaterial {
    /// PKCS#1 DER, zeroed on drop
    private_der: Zeroizing<Vec<u8>>,
    /// Encrypted PKCS#8 DER, only when a passphrase was supplied
    encrypted_der: Option<Vec<u8>>,
    modulus: Vec<u8>,
    exponent: Vec<u8>,
}

impl RawKeyMaterial {
    /// Generate a new RSA key of `bits` size.
    ///
    /// An empty passphrase is treated the same as no passphrase.
    pub fn generate(bits: usize, passphrase: Option<&str>) -> Result<Self> {
        debug!(
            "generating {}-bit RSA key (passphrase: {})",
            bits,
            passphrase.is_some_and(|p| !p.is_empty())
        );

        let private_key = RsaPrivateKey::new(&mut OsRng, bits)
            .map_err(|e| KeysmithError::KeyGenerationFailed(e.to_string()))?;

        Self::from_private_key(&private_key, passphrase)
    }

    /// Export an existing key
    pub fn from_private_key(private_key: &RsaPrivateKey, passphrase: Option<&str>) -> Result<Self> {
        let pkcs1 = private_key
            .to_pkcs1_der()
            .map_err(|e| KeysmithError::KeyGenerationFailed(format!("PKCS#1 export failed: {}", e)))?;

        let encrypted_der = match passphrase {
            Some(passphrase) if !passphrase.is_empty() => {
                Some(encrypt_pkcs8(private_key, passphrase)?)
            }
            _ => None,
        };

        Ok(Self {
            private_der: Zeroizing::new(pkcs1.as_bytes().to_vec()),
            encrypted_der,
            modulus: private_key.n().to_bytes_be(),
            exponent: private_key.e().to_bytes_be(),
        })
    }

    /// PKCS#1 DER of the private key
    pub fn private_der(&self) -> &[u8] {
        &self.private_der
    }

    /// Encrypted PKCS#8 DER, if a passphrase was used
    pub fn encrypted_der(&self) -> Option<&[u8]> {
        self.encrypted_der.as_deref()
    }

    /// Modulus `n`, big-endian
    pub fn modulus(&self) -> &[u8] {
        &self.modulus
    }

    /// Public exponent `e`, big-endian
    pub fn exponent(&self) -> &[u8] {
        &self.exponent
    }
}

impl std::fmt::Debug for RawKeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawKeyMaterial")
            .field("private_der", &"[REDACTED]")
            .field("encrypted", &self.encrypted_der.is_some())
            .field("modulus_len", &self.modulus.len())
            .finish()
    }
}

/// Export the key as PKCS#8 and encrypt it with PBES2
fn encrypt_pkcs8(private_key: &RsaPrivateKey, passphrase: &str) -> Result<Vec<u8>> {
    let mut salt = [0u8; SALT_LEN];
    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut salt);
    OsRng.fill_bytes(&mut iv);

    let params = pbes2::Parameters::pbkdf2_sha256_aes256cbc(PBKDF2_ITERATIONS, &salt, &iv)
        .map_err(|e| KeysmithError::KeyGenerationFailed(format!("PBES2 parameters: {}", e)))?;

    let document = private_key
        .to_pkcs8_der()
        .map_err(|e| KeysmithError::KeyGenerationFailed(format!("PKCS#8 export failed: {}", e)))?;

    let info = PrivateKeyInfo::try_from(document.as_bytes())
        .map_err(|e| KeysmithError::KeyGenerationFailed(format!("PKCS#8 export failed: {}", e)))?;

    let encrypted = info
        .encrypt_with_params(params, passphrase.as_bytes())
        .map_err(|e| KeysmithError::KeyGenerationFailed(format!("PKCS#8 encryption failed: {}", e)))?;

    Ok(encrypted.as_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkcs8::{DecodePrivateKey, EncryptedPrivateKeyInfo};
    use rsa::pkcs1::DecodeRsaPrivateKey;

    // Small keys keep debug-mode tests fast
    const TEST_BITS: usize = 1024;

    #[test]
    fn test_generate_without_passphrase() {
        let raw = RawKeyMaterial::generate(TEST_BITS, None).unwrap();

        assert!(raw.encrypted_der().is_none());
        assert_eq!(raw.modulus().len(), TEST_BITS / 8);
        assert_eq!(raw.exponent(), &[0x01, 0x00, 0x01]);
    }

    #[test]
    fn test_empty_passphrase_means_none() {
        let raw = RawKeyMaterial::generate(TEST_BITS, Some("")).unwrap();
        assert!(raw.encrypted_der().is_none());
    }

    #[test]
    fn test_private_der_is_pkcs1() {
        let raw = RawKeyMaterial::generate(TEST_BITS, None).unwrap();
        let key = RsaPrivateKey::from_pkcs1_der(raw.private_der()).unwrap();

        assert_eq!(key.n().to_bytes_be(), raw.modulus());
        assert_eq!(key.e().to_bytes_be(), raw.exponent());
    }

    #[test]
    fn test_encrypted_der_decrypts_with_passphrase() {
        let raw = RawKeyMaterial::generate(TEST_BITS, Some("secret123")).unwrap();
        let encrypted = raw.encrypted_der().unwrap();

        let info = EncryptedPrivateKeyInfo::try_from(encrypted).unwrap();
        assert!(info.decrypt("wrong-pass").is_err());

        let document = info.decrypt("secret123").unwrap();
        let key = RsaPrivateKey::from_pkcs8_der(document.as_bytes()).unwrap();
        assert_eq!(key.n().to_bytes_be(), raw.modulus());
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let raw = RawKeyMaterial::generate(TEST_BITS, None).unwrap();
        let printed = format!("{:?}", raw);
        assert!(printed.contains("[REDACTED]"));
    }
}
