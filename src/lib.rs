//! ssh-keysmith - RSA key pairs for OpenSSH clients
//!
//! This crate:
//! - Generates RSA key pairs and writes them as PKCS#1 PEM, optional
//!   encrypted PKCS#8 PEM, and an OpenSSH `ssh-rsa` public key line
//! - Merges a host entry into the OpenSSH client config without duplicating it
//! - Copies the public key to the clipboard

pub mod cli;
pub mod config;
pub mod crypto;
pub mod error;

pub use error::{KeysmithError, Result};
