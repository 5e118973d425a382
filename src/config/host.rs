//! SSH client config host entries

use std::path::Path;

use serde::Serialize;

/// Host alias used for Azure DevOps git remotes
pub const AZURE_DEVOPS_ALIAS: &str = "dev.azure.com";

/// Real SSH endpoint behind the alias
pub const AZURE_DEVOPS_HOST_NAME: &str = "ssh.dev.azure.com";

/// A `Host` block for the OpenSSH client config
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostEntry {
    /// Pattern on the `Host` line (e.g., "dev.azure.com")
    pub alias: String,
    /// Real hostname to connect to
    pub host_name: String,
    /// Login user
    pub user: String,
    /// Private key path, always with forward slashes
    pub identity_file: String,
}

impl HostEntry {
    /// Create a new host entry.
    ///
    /// Backslashes in `identity_file` are turned into forward slashes, which
    /// OpenSSH accepts on every platform.
    pub fn new(
        alias: impl Into<String>,
        host_name: impl Into<String>,
        user: impl Into<String>,
        identity_file: impl AsRef<str>,
    ) -> Self {
        Self {
            alias: alias.into(),
            host_name: host_name.into(),
            user: user.into(),
            identity_file: identity_file.as_ref().replace('\\', "/"),
        }
    }

    /// The Azure DevOps entry for a key stored as `<ssh_dir>/<key_name>`
    pub fn azure_devops(ssh_dir: &Path, key_name: &str) -> Self {
        let identity = ssh_dir.join(key_name);
        Self::new(
            AZURE_DEVOPS_ALIAS,
            AZURE_DEVOPS_HOST_NAME,
            "git",
            identity.to_string_lossy(),
        )
    }

    /// Render as config text, starting with the `Host` line and ending with a
    /// single newline.
    pub fn render(&self) -> String {
        format!(
            "Host {}\n  # Generated by ssh-keysmith\n  HostName {}\n  User {}\n  IdentityFile {}\n  IdentitiesOnly yes\n",
            self.alias, self.host_name, self.user, self.identity_file
        )
    }
}
