//! Document I/O for wikipath.
//!
//! This module handles:
//! - Reading the source document from a file or stdin
//! - Writing rewritten text to an output file (never over the source)
//! - Writing a preview copy to a temporary file

use crate::error::{Result, WikipathError};
use std::fmt;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Where the source document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
	Stdin,
	File(PathBuf),
}

impl Source {
	/// Interpret a command-line path, where `-` means stdin.
	pub fn from_path(path: PathBuf) -> Self {
		if path.as_os_str() == "-" {
			Source::Stdin
		} else {
			Source::File(path)
		}
	}

	fn display_path(&self) -> PathBuf {
		match self {
			Source::Stdin => PathBuf::from("<stdin>"),
			Source::File(path) => path.clone(),
		}
	}
}

impl fmt::Display for Source {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.display_path().display())
	}
}

/// Read the whole source document as UTF-8 text.
pub fn read_source(source: &Source) -> Result<String> {
	let read = match source {
		Source::File(path) => std::fs::read_to_string(path),
		Source::Stdin => {
			let mut content = String::new();
			std::io::stdin()
				.read_to_string(&mut content)
				.map(|_| content)
		}
	};

	let content = read.map_err(|source_err| WikipathError::SourceUnavailable {
		path: source.display_path(),
		source: source_err,
	})?;

	tracing::debug!(source = %source, bytes = content.len(), "read source document");
	Ok(content)
}

/// Write rewritten text to `path`.
///
/// Fails with `OutputIsSource` if `path` refers to the source document.
pub fn write_output(path: &Path, contents: &str, source: &Source) -> Result<()> {
	if let Source::File(source_path) = source
		&& same_file(path, source_path)
	{
		return Err(WikipathError::OutputIsSource {
			path: path.to_path_buf(),
		});
	}

	std::fs::write(path, contents).map_err(|source| WikipathError::OutputWriteError {
		path: path.to_path_buf(),
		source,
	})?;

	tracing::debug!(path = %path.display(), "wrote output");
	Ok(())
}

/// Write a preview copy into a temporary `.md` file that outlives the process.
///
/// Returns the path of the preview file.
pub fn write_preview(contents: &str) -> Result<PathBuf> {
	let mut file = tempfile::Builder::new()
		.prefix("wikipath-")
		.suffix(".md")
		.tempfile()
		.map_err(|source| WikipathError::PreviewError { source })?;

	file.write_all(contents.as_bytes())
		.map_err(|source| WikipathError::PreviewError { source })?;

	let (_, path) = file
		.keep()
		.map_err(|err| WikipathError::PreviewError { source: err.error })?;

	tracing::debug!(path = %path.display(), "wrote preview");
	Ok(path)
}

/// Compare two paths, resolving them when both exist.
fn same_file(a: &Path, b: &Path) -> bool {
	match (a.canonicalize(), b.canonicalize()) {
		(Ok(a), Ok(b)) => a == b,
		_ => a == b,
	}
}
