//! Image path rewriting for wikipath.
//!
//! This module handles:
//! - Base path normalization
//! - Fenced code block tracking
//! - Markdown and `<img>` image path substitution

pub mod base_path;
pub mod fence;
pub mod rewriter;

pub use base_path::{BasePath, normalize_base_path};
pub use fence::FenceState;
pub use rewriter::{
	ImageSyntax, RewriteOptions, Rewritten, is_eligible, rewrite, rewrite_document, rewrite_line,
};
