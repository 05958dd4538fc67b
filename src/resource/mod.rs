//! File access for rerule.
//!
//! This module handles:
//! - Loading the target file as a single string
//! - Persisting the rewritten text with an atomic temp-file-and-rename
//! - Optional `.orig` backups of the original file

use crate::error::{Result, RewriteError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Suffix appended to the file name for backups.
pub const BACKUP_SUFFIX: &str = ".orig";

/// Read the full contents of `path`.
pub fn load_text(path: &Path) -> Result<String> {
	let text = fs::read_to_string(path).map_err(|source| RewriteError::ResourceRead {
		path: path.to_path_buf(),
		source,
	})?;

	tracing::debug!(path = %path.display(), bytes = text.len(), "Loaded source text");
	Ok(text)
}

/// Overwrite `path` with `text`.
///
/// The text goes to a temporary sibling first and is renamed into place, so the
/// destination holds either the old or the new contents, never a partial write.
/// Symlinks are written through and the existing file's permissions are kept.
pub fn persist_text(path: &Path, text: &str) -> Result<()> {
	let write_error = |source| RewriteError::ResourceWrite {
		path: path.to_path_buf(),
		source,
	};

	// Rename onto the link target, not the link itself
	let real_path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
	let permissions = fs::metadata(&real_path).ok().map(|m| m.permissions());

	let temp_path = temp_path_for(&real_path);
	let result = write_synced(&temp_path, text)
		.and_then(|()| match permissions {
			Some(permissions) => fs::set_permissions(&temp_path, permissions),
			None => Ok(()),
		})
		.and_then(|()| fs::rename(&temp_path, &real_path));

	if let Err(source) = result {
		let _ = fs::remove_file(&temp_path);
		return Err(write_error(source));
	}

	tracing::info!(path = %real_path.display(), bytes = text.len(), "Wrote rewritten text");
	Ok(())
}

/// Copy `path` to `<path>.orig`, returning the backup location.
pub fn backup_original(path: &Path) -> Result<PathBuf> {
	let backup_path = append_to_file_name(path, BACKUP_SUFFIX);

	fs::copy(path, &backup_path).map_err(|source| RewriteError::ResourceWrite {
		path: backup_path.clone(),
		source,
	})?;

	tracing::debug!(backup = %backup_path.display(), "Backed up original");
	Ok(backup_path)
}

fn write_synced(path: &Path, text: &str) -> std::io::Result<()> {
	let mut file = fs::File::create(path)?;
	file.write_all(text.as_bytes())?;
	file.sync_all()
}

fn temp_path_for(path: &Path) -> PathBuf {
	let file_name = path
		.file_name()
		.map(|n| n.to_string_lossy().into_owned())
		.unwrap_or_else(|| "rerule".to_string());
	let temp_name = format!(".{file_name}.rerule.{}.tmp", std::process::id());

	match path.parent() {
		Some(parent) => parent.join(temp_name),
		None => PathBuf::from(temp_name),
	}
}

fn append_to_file_name(path: &Path, suffix: &str) -> PathBuf {
	let mut name = path.as_os_str().to_os_string();
	name.push(suffix);
	PathBuf::from(name)
}
