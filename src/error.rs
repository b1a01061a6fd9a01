use std::path::PathBuf;

/// Library-level structured errors for wikipath.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum WikipathError {
	#[error("Invalid base path: {base_path:?} (must start and end with '/')")]
	InvalidBasePath { base_path: String },

	#[error("Failed to read source document: {path}")]
	SourceUnavailable {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write output file: {path}")]
	OutputWriteError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write preview file")]
	PreviewError {
		#[source]
		source: std::io::Error,
	},

	#[error("Refusing to overwrite the source document: {path}")]
	OutputIsSource { path: PathBuf },
}

/// Result type alias using WikipathError.
pub type Result<T> = std::result::Result<T, WikipathError>;
