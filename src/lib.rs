//! Wikipath - CLI tool for rewriting relative Markdown image paths.
//!
//! This library provides the core functionality for wikipath, including:
//! - Base path normalization
//! - Image path rewriting for `![alt](path)` and `<img src="path">`
//! - Fenced code block detection so code samples stay untouched
//! - Document reading, output and preview writing
//!
//! # Example
//!
//! ```
//! use wikipath_cli::rewrite::{BasePath, RewriteOptions, rewrite_document};
//!
//! let base_path = BasePath::parse("wiki/section");
//! let result = rewrite_document("![pic](img/a.png)\n", &base_path, &RewriteOptions::default());
//!
//! assert_eq!(result.text, "![pic](/wiki/section/img/a.png)\n");
//! assert_eq!(result.changes, 1);
//! ```

pub mod document;
pub mod error;
pub mod rewrite;

pub use error::{Result, WikipathError};
