//! Key generation options

use std::path::{Path, PathBuf};

use crate::error::{KeysmithError, Result};

/// Default base filename of the key pair
pub const DEFAULT_KEY_NAME: &str = "id_rsa_ado";

/// Default OpenSSH public key comment
pub const DEFAULT_COMMENT: &str = "AzureDevOps";

/// Default RSA modulus size in bits
pub const DEFAULT_KEY_SIZE: usize = 4096;

/// Accepted key sizes
pub const MIN_KEY_SIZE: usize = 2048;
pub const MAX_KEY_SIZE: usize = 16384;

const PUBLIC_KEY_EXT: &str = ".pub";
const ENCRYPTED_KEY_EXT: &str = ".pkcs8.enc.pem";
const CONFIG_FILE: &str = "config";

/// Everything a single generation run needs
#[derive(Clone)]
pub struct KeyGenOptions {
    /// Base filename, no extension
    pub name: String,
    /// Directory receiving the key files and the SSH config
    pub output_dir: PathBuf,
    /// Public key comment
    pub comment: String,
    /// Passphrase for the encrypted PKCS#8 copy
    pub passphrase: Option<String>,
    pub copy_to_clipboard: bool,
    pub update_config: bool,
    pub key_size: usize,
    /// Whether questions may be asked on stdin
    pub interactive: bool,
}

impl KeyGenOptions {
    /// Options with defaults, writing into `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: DEFAULT_KEY_NAME.to_string(),
            output_dir: output_dir.into(),
            comment: DEFAULT_COMMENT.to_string(),
            passphrase: None,
            copy_to_clipboard: true,
            update_config: true,
            key_size: DEFAULT_KEY_SIZE,
            interactive: true,
        }
    }

    /// Options with defaults, writing into `~/.ssh`
    pub fn with_default_dir() -> Result<Self> {
        Ok(Self::new(default_ssh_dir()?))
    }

    /// Set the passphrase; an empty string clears it
    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        let passphrase = passphrase.into();
        self.passphrase = if passphrase.is_empty() { None } else { Some(passphrase) };
        self
    }

    /// Passphrase, if a non-empty one was given
    pub fn passphrase(&self) -> Option<&str> {
        self.passphrase.as_deref().filter(|p| !p.is_empty())
    }

    /// Check the options before anything is generated or written
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(KeysmithError::InvalidOptions("key name cannot be empty".into()));
        }

        if self.name.contains(['/', '\\']) || self.name == "." || self.name == ".." {
            return Err(KeysmithError::InvalidOptions(format!(
                "key name '{}' must be a plain file name",
                self.name
            )));
        }

        if !(MIN_KEY_SIZE..=MAX_KEY_SIZE).contains(&self.key_size) || self.key_size % 8 != 0 {
            return Err(KeysmithError::InvalidOptions(format!(
                "key size must be a multiple of 8 between {} and {} bits, got {}",
                MIN_KEY_SIZE, MAX_KEY_SIZE, self.key_size
            )));
        }

        if self.comment.contains(['\n', '\r']) {
            return Err(KeysmithError::InvalidOptions(
                "comment cannot contain line breaks".into(),
            ));
        }

        Ok(())
    }

    /// `<dir>/<name>`
    pub fn private_key_path(&self) -> PathBuf {
        self.output_dir.join(&self.name)
    }

    /// `<dir>/<name>.pub`
    pub fn public_key_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}{}", self.name, PUBLIC_KEY_EXT))
    }

    /// `<dir>/<name>.pkcs8.enc.pem`, only when a passphrase is set
    pub fn encrypted_key_path(&self) -> Option<PathBuf> {
        self.passphrase()
            .map(|_| self.output_dir.join(format!("{}{}", self.name, ENCRYPTED_KEY_EXT)))
    }

    /// `<dir>/config`
    pub fn config_path(&self) -> PathBuf {
        self.output_dir.join(CONFIG_FILE)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

// Keep the passphrase out of debug output
impl std::fmt::Debug for KeyGenOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyGenOptions")
            .field("name", &self.name)
            .field("output_dir", &self.output_dir)
            .field("comment", &self.comment)
            .field("passphrase", &self.passphrase().map(|_| "[REDACTED]"))
            .field("copy_to_clipboard", &self.copy_to_clipboard)
            .field("update_config", &self.update_config)
            .field("key_size", &self.key_size)
            .field("interactive", &self.interactive)
            .finish()
    }
}

/// `~/.ssh`
pub fn default_ssh_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".ssh"))
        .ok_or(KeysmithError::NoHomeDirectory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = KeyGenOptions::new("/tmp/keys");

        assert_eq!(options.name, "id_rsa_ado");
        assert_eq!(options.comment, "AzureDevOps");
        assert_eq!(options.key_size, 4096);
        assert!(options.copy_to_clipboard);
        assert!(options.update_config);
        assert!(options.interactive);
        assert!(options.passphrase().is_none());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_paths() {
        let options = KeyGenOptions::new("/tmp/keys").with_passphrase("pw");

        assert_eq!(options.private_key_path(), Path::new("/tmp/keys/id_rsa_ado"));
        assert_eq!(options.public_key_path(), Path::new("/tmp/keys/id_rsa_ado.pub"));
        assert_eq!(
            options.encrypted_key_path(),
            Some(PathBuf::from("/tmp/keys/id_rsa_ado.pkcs8.enc.pem"))
        );
        assert_eq!(options.config_path(), Path::new("/tmp/keys/config"));
    }

    #[test]
    fn test_empty_passphrase_is_none() {
        let options = KeyGenOptions::new("/tmp").with_passphrase("");
        assert!(options.passphrase().is_none());
        assert!(options.encrypted_key_path().is_none());
    }

    #[test]
    fn test_validate_rejects_bad_names() {
        for name in ["", "  ", "a/b", r"a\b", "..", "."] {
            let mut options = KeyGenOptions::new("/tmp");
            options.name = name.to_string();
            assert!(
                matches!(options.validate(), Err(KeysmithError::InvalidOptions(_))),
                "accepted {:?}",
                name
            );
        }
    }

    #[test]
    fn test_validate_key_size() {
        let mut options = KeyGenOptions::new("/tmp");

        for size in [1024, 2047, 2049, 16392, 0] {
            options.key_size = size;
            assert!(options.validate().is_err(), "accepted {}", size);
        }
        for size in [2048, 3072, 4096, 8192, 16384] {
            options.key_size = size;
            assert!(options.validate().is_ok(), "rejected {}", size);
        }
    }

    #[test]
    fn test_validate_rejects_multiline_comment() {
        let mut options = KeyGenOptions::new("/tmp");
        options.comment = "a\nb".to_string();
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_passphrase() {
        let options = KeyGenOptions::new("/tmp").with_passphrase("hunter2hunter2");
        assert!(!format!("{:?}", options).contains("hunter2"));
    }
}
