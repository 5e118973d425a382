//! Writing key files and the SSH client config
//!
//! Private keys are written with 0600 permissions on Unix. The SSH config is
//! read, merged in memory and written back in one go.
//!
//! Key files of one run go through [`KeyFileSet`]: every file is written next
//! to its target first and renamed into place only when all of them were
//! written, so a failed run leaves earlier keys untouched.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::ssh_config;
use crate::error::Result;

/// Ensure the output directory exists
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
        debug!("created directory {}", dir.display());
    }
    Ok(())
}

/// Write secret key material (private keys)
pub fn write_secret(path: &Path, contents: &str) -> Result<()> {
    let mut file = File::create(path)?;

    // Set restrictive permissions on Unix before any key bytes land
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(contents.as_bytes())?;
    file.sync_all()?;

    debug!("wrote {}", path.display());
    Ok(())
}

/// Write a public key line, terminated with a newline
pub fn write_public_key(path: &Path, line: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(line.trim_end().as_bytes())?;
    file.write_all(b"\n")?;

    debug!("wrote {}", path.display());
    Ok(())
}

/// `<dir>/.<file>.<pid>.<tag>`
fn sibling_path(target: &Path, tag: &str) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{}.{}.{}", name, std::process::id(), tag))
}

struct StagedFile {
    target: PathBuf,
    temp: PathBuf,
}

/// A key file put in place by [`KeyFileSet::commit`], with the previous file
/// it replaced
struct CommittedFile {
    target: PathBuf,
    backup: Option<PathBuf>,
}

/// Key files written together or not at all
#[derive(Default)]
pub struct KeyFileSet {
    staged: Vec<StagedFile>,
}

impl KeyFileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage secret key material for `target`
    pub fn stage_secret(&mut self, target: &Path, contents: &str) -> Result<()> {
        let temp = sibling_path(target, "tmp");
        self.staged.push(StagedFile { target: target.to_path_buf(), temp: temp.clone() });
        write_secret(&temp, contents)
    }

    /// Stage a public key line for `target`
    pub fn stage_public_key(&mut self, target: &Path, line: &str) -> Result<()> {
        let temp = sibling_path(target, "tmp");
        self.staged.push(StagedFile { target: target.to_path_buf(), temp: temp.clone() });
        write_public_key(&temp, line)
    }

    /// Move every staged file into place.
    ///
    /// Existing targets are set aside first. If any rename fails, the files
    /// already moved are taken back out and the set-aside files restored.
    pub fn commit(mut self) -> Result<()> {
        let staged = std::mem::take(&mut self.staged);
        let mut committed: Vec<CommittedFile> = Vec::with_capacity(staged.len());

        for (i, file) in staged.iter().enumerate() {
            match commit_one(file) {
                Ok(done) => committed.push(done),
                Err(e) => {
                    committed.iter().rev().for_each(restore);
                    staged[i..].iter().for_each(|rest| remove_quietly(&rest.temp));
                    return Err(e);
                }
            }
        }

        for done in &committed {
            if let Some(backup) = &done.backup {
                remove_quietly(backup);
            }
            debug!("wrote {}", done.target.display());
        }
        Ok(())
    }
}

impl Drop for KeyFileSet {
    fn drop(&mut self) {
        for file in &self.staged {
            remove_quietly(&file.temp);
        }
    }
}

fn commit_one(file: &StagedFile) -> Result<CommittedFile> {
    let backup = if file.target.is_file() {
        let backup = sibling_path(&file.target, "bak");
        fs::rename(&file.target, &backup)?;
        Some(backup)
    } else {
        None
    };

    if let Err(e) = fs::rename(&file.temp, &file.target) {
        if let Some(backup) = &backup {
            if let Err(e) = fs::rename(backup, &file.target) {
                warn!("could not restore {}: {}", file.target.display(), e);
            }
        }
        return Err(e.into());
    }

    Ok(CommittedFile { target: file.target.clone(), backup })
}

fn restore(done: &CommittedFile) {
    remove_quietly(&done.target);
    if let Some(backup) = &done.backup {
        if let Err(e) = fs::rename(backup, &done.target) {
            warn!("could not restore {}: {}", done.target.display(), e);
        }
    }
}

fn remove_quietly(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != ErrorKind::NotFound {
            warn!("could not remove {}: {}", path.display(), e);
        }
    }
}

/// Read a text file, treating a missing file as empty
pub fn read_or_empty(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e.into()),
    }
}

/// Merge `block` into the SSH config at `path` as the only `Host <alias>` block
pub fn update_config_file(path: &Path, alias: &str, block: &str) -> Result<()> {
    let existing = read_or_empty(path)?;
    let merged = ssh_config::merge(&existing, alias, block);

    if merged == existing {
        debug!("{} already up to date", path.display());
        return Ok(());
    }

    let mut file = File::create(path)?;
    file.write_all(merged.as_bytes())?;
    file.sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    debug!("updated {}", path.display());
    Ok(())
}
