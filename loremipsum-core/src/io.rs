use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use crate::error::{Error, Result};

/// Reads a whole text file (sample text or lexicon).
///
/// # Errors
/// `Error::Io` carrying the path.
pub fn read_text<P: AsRef<Path>>(filename: P) -> Result<String> {
	let path = filename.as_ref();
	fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Reads a whole file as bytes.
///
/// # Errors
/// `Error::Io` carrying the path.
pub fn read_bytes<P: AsRef<Path>>(filename: P) -> Result<Vec<u8>> {
	let path = filename.as_ref();
	fs::read(path).map_err(|e| Error::io(path, e))
}

/// Writes `contents`, replacing any existing file.
///
/// # Errors
/// `Error::Io` carrying the path.
pub fn write_bytes<P: AsRef<Path>>(filename: P, contents: &[u8]) -> Result<()> {
	let path = filename.as_ref();
	fs::write(path, contents).map_err(|e| Error::io(path, e))
}

/// Default location of a cooked model: the text path with `extension`.
///
/// `data/sample.txt` + `"bin"` gives `data/sample.bin`.
///
/// # Errors
/// `Error::Io` (`InvalidInput`) when the path names no file.
pub fn model_path<P: AsRef<Path>>(text_path: P, extension: &str) -> Result<PathBuf> {
	let path = text_path.as_ref();
	match path.file_stem() {
		Some(_) => Ok(path.with_extension(extension)),
		None => Err(Error::io(path, io::Error::from(io::ErrorKind::InvalidInput))),
	}
}

/// Name a stored model is served under: its file stem.
///
/// `None` when the path has no stem or the stem is not UTF-8.
pub fn model_name<P: AsRef<Path>>(path: P) -> Option<String> {
	path.as_ref().file_stem()?.to_str().map(str::to_owned)
}

/// Resolves a data folder against the working directory.
///
/// Absolute paths are kept; relative ones (including `.`) are joined to
/// the current directory when it is known.
pub fn resolve_folder(input: &str) -> PathBuf {
	let folder = Path::new(input);
	if folder.is_absolute() {
		return folder.to_path_buf();
	}
	match env::current_dir() {
		Ok(cwd) => cwd.join(folder),
		Err(_) => folder.to_path_buf(),
	}
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths), sorted.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();

		if path.is_file() && path.extension() == Some(OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}
