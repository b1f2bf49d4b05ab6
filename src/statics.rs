//! Copying static files into the output tree.
//!
//! A copy is skipped when the destination already holds identical bytes,
//! compared by SHA-256 digest, so rebuilding into an existing output tree
//! leaves unchanged files (and their timestamps) alone.

use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::Path;

/// What [`copy_file`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Unchanged,
}

/// SHA-256 of a file's contents, as lowercase hex.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    let digest = Sha256::digest(&bytes);
    Ok(format!("{:x}", digest))
}

/// Copy `src` to `dst`, creating parent directories as needed.
///
/// Does nothing if `dst` exists with the same digest as `src`.
pub fn copy_file(src: &Path, dst: &Path) -> io::Result<CopyOutcome> {
    if dst.is_file() && hash_file(dst)? == hash_file(src)? {
        return Ok(CopyOutcome::Unchanged);
    }
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, dst)?;
    Ok(CopyOutcome::Copied)
}
