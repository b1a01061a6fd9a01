use crate::error::Result;
use crate::rewrite::base_path::BasePath;
use crate::rewrite::fence::FenceState;
use regex::{Captures, Regex};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

/// `![alt](path)`; the first `)` ends the path.
static MARKDOWN_IMAGE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(!\[(.*?)\]\()(.*?)(\))").expect("valid markdown image regex"));

/// `<img ... src="path" ...>`
static HTML_IMAGE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r#"(<img\s.*?src=")(.*?)(".*?>)"#).expect("valid html image regex"));

/// The image reference syntaxes recognized in a document line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSyntax {
	/// `![alt](path)`
	Markdown,
	/// `<img src="path">`, including any other attributes.
	Html,
}

impl ImageSyntax {
	fn regex(self) -> &'static Regex {
		match self {
			ImageSyntax::Markdown => &MARKDOWN_IMAGE,
			ImageSyntax::Html => &HTML_IMAGE,
		}
	}

	/// Capture group holding the image path.
	fn path_group(self) -> usize {
		match self {
			ImageSyntax::Markdown => 3,
			ImageSyntax::Html => 2,
		}
	}
}

impl fmt::Display for ImageSyntax {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ImageSyntax::Markdown => f.write_str("markdown"),
			ImageSyntax::Html => f.write_str("html"),
		}
	}
}

/// Options controlling which references get rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteOptions {
	/// Also rewrite `<img src="...">` tags.
	pub embedded_images: bool,
}

impl Default for RewriteOptions {
	fn default() -> Self {
		RewriteOptions {
			embedded_images: true,
		}
	}
}

/// A rewritten document and the number of image paths that were changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rewritten {
	pub text: String,
	pub changes: usize,
}

/// Check whether an image path should receive the base path.
///
/// Absolute paths and anything starting with `http` are left alone. Only the
/// literal `http` prefix is checked, which also covers `https`.
pub fn is_eligible(path: &str) -> bool {
	!path.starts_with('/') && !path.starts_with("http")
}

/// Rewrite a document whose base path the caller has already normalized.
///
/// Returns `InvalidBasePath` if `base_path` does not start and end with `/`.
pub fn rewrite(text: &str, base_path: &str) -> Result<Rewritten> {
	let base_path = BasePath::from_normalized(base_path)?;
	Ok(rewrite_document(text, &base_path, &RewriteOptions::default()))
}

/// Prefix every eligible relative image path in `text` with `base_path`.
///
/// Lines inside fenced code blocks, and the fence lines themselves, are
/// copied unchanged. Line terminators are preserved exactly.
pub fn rewrite_document(text: &str, base_path: &BasePath, options: &RewriteOptions) -> Rewritten {
	let mut fence = FenceState::default();
	let mut output = String::with_capacity(text.len());
	let mut changes = 0;

	for (index, line) in text.split_inclusive('\n').enumerate() {
		let number = index + 1;

		if fence.observe(line) {
			tracing::debug!(line = number, inside = fence.is_inside(), "code fence");
			output.push_str(line);
			continue;
		}

		if fence.is_inside() {
			output.push_str(line);
			continue;
		}

		let _line = tracing::debug_span!("line", number).entered();
		let (rewritten, count) = rewrite_line(line, base_path, options);
		changes += count;
		output.push_str(&rewritten);
	}

	if fence.is_inside() {
		tracing::warn!("document ends inside an unclosed code fence");
	}
	tracing::info!(changes, base_path = %base_path, "rewrote document");

	Rewritten {
		text: output,
		changes,
	}
}

/// Rewrite the image references of a single line outside any code block.
///
/// Returns the line and the number of paths changed.
pub fn rewrite_line<'a>(
	line: &'a str,
	base_path: &BasePath,
	options: &RewriteOptions,
) -> (Cow<'a, str>, usize) {
	let mut changes = 0;
	let markdown = substitute(line, ImageSyntax::Markdown, base_path, &mut changes);

	if !options.embedded_images {
		return (markdown, changes);
	}

	let html = match substitute(&markdown, ImageSyntax::Html, base_path, &mut changes) {
		Cow::Owned(rewritten) => Some(rewritten),
		Cow::Borrowed(_) => None,
	};

	match html {
		Some(rewritten) => (Cow::Owned(rewritten), changes),
		None => (markdown, changes),
	}
}

/// Apply one syntax's substitution to a line, counting eligible paths.
fn substitute<'a>(
	line: &'a str,
	syntax: ImageSyntax,
	base_path: &BasePath,
	changes: &mut usize,
) -> Cow<'a, str> {
	let path_group = syntax.path_group();

	syntax.regex().replace_all(line, |caps: &Captures| {
		let whole = &caps[0];
		let Some(path) = caps.get(path_group) else {
			return whole.to_string();
		};
		if !is_eligible(path.as_str()) {
			return whole.to_string();
		}

		// Offsets of the path relative to the whole match.
		let offset = caps.get(0).map_or(0, |m| m.start());
		let start = path.start() - offset;
		let end = path.end() - offset;

		let prefixed = format!("{}{}", base_path, path.as_str());
		*changes += 1;
		tracing::debug!(%syntax, from = path.as_str(), to = %prefixed, "rewrote image path");

		format!("{}{}{}", &whole[..start], prefixed, &whole[end..])
	})
}
