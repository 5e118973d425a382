//! Key pair generation command
//!
//! Generates the key, writes the key files, updates the SSH config and copies
//! the public key to the clipboard. Key generation and key file writes are
//! fatal on failure; config and clipboard failures are reported as warnings.

use std::path::PathBuf;

use log::debug;
use serde::Serialize;

use super::clipboard::Clipboard;
use super::reporter::Reporter;
use crate::config::{self, HostEntry, KeyFileSet, KeyGenOptions};
use crate::crypto::{KeyMaterialBundle, RawKeyMaterial};
use crate::error::Result;

/// Outcome of a generation run
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub key_name: String,
    pub comment: String,
    pub private_key_path: PathBuf,
    pub public_key_path: PathBuf,
    pub encrypted_key_path: Option<PathBuf>,
    /// Set only when the config was actually updated
    pub config_path: Option<PathBuf>,
    pub config_updated: bool,
    /// Host entry merged into the config
    pub host_entry: Option<HostEntry>,
    pub copied_to_clipboard: bool,
    /// SHA-256 fingerprint ("SHA256:...")
    pub fingerprint: Option<String>,
    /// OpenSSH public key line
    pub public_key: String,
}

/// Generate a key pair with the `rsa` crate and write everything out
pub fn run(
    options: &KeyGenOptions,
    reporter: &mut dyn Reporter,
    clipboard: &mut dyn Clipboard,
) -> Result<GenerationReport> {
    run_with_generator(options, reporter, clipboard, RawKeyMaterial::generate)
}

/// Same as [`run`], with the key generation primitive supplied by the caller
pub fn run_with_generator<G>(
    options: &KeyGenOptions,
    reporter: &mut dyn Reporter,
    clipboard: &mut dyn Clipboard,
    generate: G,
) -> Result<GenerationReport>
where
    G: FnOnce(usize, Option<&str>) -> Result<RawKeyMaterial>,
{
    options.validate()?;
    config::ensure_dir(options.output_dir())?;

    reporter.status(&format!("Creating {}-bit RSA key...", options.key_size));
    let bundle = {
        let raw = generate(options.key_size, options.passphrase())?;
        KeyMaterialBundle::from_raw(&raw, &options.name, &options.comment)
    };

    let encrypted_key_path = write_key_files(options, &bundle, reporter)?;

    let host_entry = if options.update_config {
        update_ssh_config(options, reporter)
    } else {
        None
    };
    let config_updated = host_entry.is_some();

    let public_key = bundle.public_key_openssh().trim_end().to_string();

    let mut copied_to_clipboard = false;
    if options.copy_to_clipboard {
        reporter.status("Copying public key to clipboard...");
        match clipboard.set_text(&public_key) {
            Ok(()) => copied_to_clipboard = true,
            Err(e) => reporter.warn(&format!("Could not copy to clipboard: {}", e)),
        }
    }

    let mut report = GenerationReport {
        key_name: bundle.key_name().to_string(),
        comment: bundle.comment().to_string(),
        private_key_path: options.private_key_path(),
        public_key_path: options.public_key_path(),
        encrypted_key_path,
        config_path: config_updated.then(|| options.config_path()),
        config_updated,
        host_entry,
        copied_to_clipboard,
        fingerprint: fingerprint(&public_key),
        public_key,
    };

    reporter.summary(&report);

    if !options.copy_to_clipboard
        && options.interactive
        && reporter.confirm("Would you like to copy the public key to clipboard now?")
    {
        match clipboard.set_text(&report.public_key) {
            Ok(()) => {
                report.copied_to_clipboard = true;
                reporter.success("Public key copied to clipboard!");
            }
            Err(e) => reporter.error(&format!("Error copying to clipboard: {}", e)),
        }
    }

    Ok(report)
}

/// Write private, encrypted and public key files.
///
/// The files are staged next to their targets and moved into place together,
/// so a failed write keeps any key pair already stored under the same name.
/// Returns the encrypted key path when one was written.
fn write_key_files(
    options: &KeyGenOptions,
    bundle: &KeyMaterialBundle,
    reporter: &mut dyn Reporter,
) -> Result<Option<PathBuf>> {
    let mut files = KeyFileSet::new();

    reporter.status("Exporting private key (PKCS#1)...");
    files.stage_secret(&options.private_key_path(), bundle.private_key_pem())?;

    let mut encrypted_key_path = None;
    if let (Some(path), Some(pem)) = (options.encrypted_key_path(), bundle.encrypted_private_key_pem()) {
        reporter.status("Exporting encrypted private key (PKCS#8)...");
        files.stage_secret(&path, pem)?;
        encrypted_key_path = Some(path);
    }

    reporter.status("Writing OpenSSH public key...");
    files.stage_public_key(&options.public_key_path(), bundle.public_key_openssh())?;

    files.commit()?;
    Ok(encrypted_key_path)
}

/// Merge the Azure DevOps host entry into `<dir>/config`
fn update_ssh_config(options: &KeyGenOptions, reporter: &mut dyn Reporter) -> Option<HostEntry> {
    reporter.status("Updating SSH config file...");

    let entry = HostEntry::azure_devops(options.output_dir(), &options.name);
    match config::update_config_file(&options.config_path(), &entry.alias, &entry.render()) {
        Ok(()) => Some(entry),
        Err(e) => {
            reporter.warn(&format!("Could not update SSH config file: {}", e));
            None
        }
    }
}

/// SHA-256 fingerprint of an OpenSSH public key line
pub fn fingerprint(public_key: &str) -> Option<String> {
    match ssh_key::PublicKey::from_openssh(public_key) {
        Ok(key) => Some(key.fingerprint(ssh_key::HashAlg::Sha256).to_string()),
        Err(e) => {
            debug!("could not parse generated public key: {}", e);
            None
        }
    }
}
