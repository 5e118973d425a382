//! CLI command implementation

pub mod clipboard;
pub mod generate;
pub mod reporter;

use colored::Colorize;

use crate::error::{KeysmithError, Result};

pub use clipboard::{Clipboard, SystemClipboard};
pub use generate::GenerationReport;
pub use reporter::{ConsoleReporter, Reporter};

/// Ask for a passphrase twice with hidden input.
///
/// An empty answer means no encrypted copy is wanted.
pub fn prompt_new_passphrase() -> Result<Option<String>> {
    eprintln!("{}", "Passphrase for the encrypted PKCS#8 key".cyan().bold());
    eprintln!("Leave empty to skip the encrypted copy.\n");

    let passphrase = rpassword::prompt_password("Enter passphrase: ")?;
    if passphrase.is_empty() {
        return Ok(None);
    }

    let confirm = rpassword::prompt_password("Confirm passphrase: ")?;
    if passphrase != confirm {
        return Err(KeysmithError::PassphraseMismatch);
    }

    Ok(Some(passphrase))
}
