//! Configuration and file output for ssh-keysmith
//!
//! Handles:
//! - Key generation options and output paths
//! - Host entries and merging them into the OpenSSH client config
//! - Writing key files with restrictive permissions

mod host;
mod options;
pub mod ssh_config;
mod storage;

pub use host::{HostEntry, AZURE_DEVOPS_ALIAS, AZURE_DEVOPS_HOST_NAME};
pub use options::{
    default_ssh_dir, KeyGenOptions, DEFAULT_COMMENT, DEFAULT_KEY_NAME, DEFAULT_KEY_SIZE,
    MAX_KEY_SIZE, MIN_KEY_SIZE,
};
pub use ssh_config::merge;
pub use storage::{
    ensure_dir, read_or_empty, update_config_file, write_public_key, write_secret, KeyFileSet,
};
