use crate::error::{Result, WikipathError};
use std::fmt;

/// Trailing segment dropped from user input, since image paths in the
/// document usually carry their own `assets/` directory.
const ASSETS_SUFFIX: &str = "/assets";

/// Normalize a user-typed base path into its canonical form.
///
/// The result always starts and ends with `/`. Surrounding whitespace and
/// trailing slashes are removed, a leading slash is added when missing and a
/// trailing `/assets` segment is dropped. This never fails: the empty string
/// normalizes to `/`.
pub fn normalize_base_path(raw: &str) -> String {
	let trimmed = raw.trim();
	let mut path = if trimmed.starts_with('/') {
		trimmed.to_string()
	} else {
		format!("/{trimmed}")
	};

	// Repeat so that normalizing an already normalized path is a no-op.
	loop {
		let len = path.trim_end_matches('/').len();
		path.truncate(len);
		match path.strip_suffix(ASSETS_SUFFIX) {
			Some(stripped) => {
				let len = stripped.len();
				path.truncate(len);
			}
			None => break,
		}
	}

	path.push('/');
	path
}

/// A normalized base path, guaranteed to start and end with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BasePath(String);

impl BasePath {
	/// Normalize raw user input into a base path.
	pub fn parse(raw: &str) -> Self {
		BasePath(normalize_base_path(raw))
	}

	/// Accept a base path the caller has already normalized.
	///
	/// Returns `InvalidBasePath` unless the value starts and ends with `/`.
	pub fn from_normalized(base_path: &str) -> Result<Self> {
		if base_path.starts_with('/') && base_path.ends_with('/') {
			Ok(BasePath(base_path.to_string()))
		} else {
			Err(WikipathError::InvalidBasePath {
				base_path: base_path.to_string(),
			})
		}
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for BasePath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
