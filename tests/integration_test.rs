#![allow(deprecated)] // assert_cmd::Command::cargo_bin is deprecated but replacement requires nightly

use predicates::prelude::*;
use std::fs;

fn wikipath_cmd() -> assert_cmd::Command {
	let mut cmd = assert_cmd::Command::cargo_bin("wikipath").unwrap();
	cmd.env_remove("WIKIPATH_BASE_PATH").env_remove("RUST_LOG");
	cmd
}

const DOCUMENT: &str = "# Guide\n\
![pic](img/a.png)\n\
<img src=\"assets/b.png\" alt=\"b\">\n\
![remote](http://example.com/c.png)\n\
```md\n\
![x](y.png)\n\
```\n";

fn write_document(dir: &std::path::Path) -> std::path::PathBuf {
	let path = dir.join("guide.md");
	fs::write(&path, DOCUMENT).unwrap();
	path
}

// ============================================================================
// CLI flag tests
// ============================================================================

#[test]
fn test_help_flag() {
	wikipath_cmd()
		.arg("--help")
		.assert()
		.success()
		.stdout(predicate::str::contains("rewriting relative Markdown image paths"));
}

#[test]
fn test_version_flag() {
	wikipath_cmd()
		.arg("--version")
		.assert()
		.success()
		.stdout(predicate::str::contains("wikipath"));
}

#[test]
fn test_no_args_shows_help() {
	wikipath_cmd()
		.assert()
		.failure()
		.stderr(predicate::str::contains("Usage"));
}

// ============================================================================
// normalize subcommand tests
// ============================================================================

#[test]
fn test_normalize_relative() {
	wikipath_cmd()
		.args(["normalize", "wiki/section"])
		.assert()
		.success()
		.stdout("/wiki/section/\n");
}

#[test]
fn test_normalize_strips_assets() {
	wikipath_cmd()
		.args(["normalize", " /docs/assets/ "])
		.assert()
		.success()
		.stdout("/docs/\n");
}

#[test]
fn test_normalize_empty() {
	wikipath_cmd()
		.args(["normalize", ""])
		.assert()
		.success()
		.stdout("/\n");
}

// ============================================================================
// rewrite subcommand tests
// ============================================================================

#[test]
fn test_rewrite_to_stdout() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_document(temp_dir.path());

	wikipath_cmd()
		.arg("rewrite")
		.arg(&path)
		.args(["--base-path", "/docs/assets"])
		.assert()
		.success()
		.stdout(predicate::str::contains("![pic](/docs/img/a.png)"))
		.stdout(predicate::str::contains("<img src=\"/docs/assets/b.png\" alt=\"b\">"))
		.stdout(predicate::str::contains("![remote](http://example.com/c.png)"))
		.stdout(predicate::str::contains("```md\n![x](y.png)\n```\n"))
		.stderr(predicate::str::contains("Total changes made: 2"));

	// The source document is never modified
	assert_eq!(fs::read_to_string(&path).unwrap(), DOCUMENT);
}

#[test]
fn test_rewrite_quiet() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_document(temp_dir.path());

	wikipath_cmd()
		.arg("rewrite")
		.arg(&path)
		.args(["-b", "wiki", "--quiet"])
		.assert()
		.success()
		.stderr(predicate::str::contains("Total changes made").not());
}

#[test]
fn test_rewrite_base_path_from_env() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_document(temp_dir.path());

	wikipath_cmd()
		.arg("rewrite")
		.arg(&path)
		.env("WIKIPATH_BASE_PATH", "team/space")
		.assert()
		.success()
		.stdout(predicate::str::contains("![pic](/team/space/img/a.png)"));
}

#[test]
fn test_rewrite_requires_base_path() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_document(temp_dir.path());

	wikipath_cmd()
		.arg("rewrite")
		.arg(&path)
		.assert()
		.failure()
		.stderr(predicate::str::contains("--base-path"));
}

#[test]
fn test_rewrite_from_stdin() {
	wikipath_cmd()
		.args(["rewrite", "-", "--base-path", "wiki/section"])
		.write_stdin("![pic](img/a.png)")
		.assert()
		.success()
		.stdout("![pic](/wiki/section/img/a.png)")
		.stderr(predicate::str::contains("Total changes made: 1"));
}

#[test]
fn test_rewrite_no_changes_is_success() {
	wikipath_cmd()
		.args(["rewrite", "-", "--base-path", "/wiki"])
		.write_stdin("Just text.\n")
		.assert()
		.success()
		.stdout("Just text.\n")
		.stderr(predicate::str::contains("Total changes made: 0"));
}

#[test]
fn test_rewrite_without_html_images() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_document(temp_dir.path());

	wikipath_cmd()
		.arg("rewrite")
		.arg(&path)
		.args(["--base-path", "/docs", "--no-html-images"])
		.assert()
		.success()
		.stdout(predicate::str::contains("<img src=\"assets/b.png\" alt=\"b\">"))
		.stderr(predicate::str::contains("Total changes made: 1"));
}

#[test]
fn test_rewrite_json_format() {
	wikipath_cmd()
		.args(["rewrite", "-", "--base-path", "/w", "--format", "json"])
		.write_stdin("![a](a.png)\n")
		.assert()
		.success()
		.stdout(predicate::str::contains("\"changes\": 1"))
		.stdout(predicate::str::contains("\"text\": \"![a](/w/a.png)\\n\""));
}

#[test]
fn test_rewrite_to_output_file() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_document(temp_dir.path());
	let out = temp_dir.path().join("wiki.md");

	wikipath_cmd()
		.arg("rewrite")
		.arg(&path)
		.args(["--base-path", "/docs"])
		.arg("--output")
		.arg(&out)
		.assert()
		.success()
		.stdout("");

	let content = fs::read_to_string(&out).unwrap();
	assert!(content.contains("![pic](/docs/img/a.png)"));
	assert!(content.contains("![x](y.png)"));
}

#[test]
fn test_rewrite_refuses_to_overwrite_source() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_document(temp_dir.path());

	wikipath_cmd()
		.arg("rewrite")
		.arg(&path)
		.args(["--base-path", "/docs"])
		.arg("--output")
		.arg(&path)
		.assert()
		.failure()
		.stderr(predicate::str::contains("Refusing to overwrite"));

	assert_eq!(fs::read_to_string(&path).unwrap(), DOCUMENT);
}

#[test]
fn test_rewrite_preview() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_document(temp_dir.path());

	let output = wikipath_cmd()
		.arg("rewrite")
		.arg(&path)
		.args(["--base-path", "/docs", "--preview"])
		.output()
		.unwrap();

	assert!(output.status.success());
	let stdout = String::from_utf8(output.stdout).unwrap();
	let preview = std::path::PathBuf::from(stdout.trim());
	assert!(preview.exists());

	let content = fs::read_to_string(&preview).unwrap();
	assert!(content.contains("![pic](/docs/img/a.png)"));

	fs::remove_file(&preview).unwrap();
}

#[test]
fn test_rewrite_missing_file() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = temp_dir.path().join("missing.md");

	wikipath_cmd()
		.arg("rewrite")
		.arg(&path)
		.args(["--base-path", "/docs"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Failed to read source document"));
}

#[test]
fn test_rewrite_verbose_logs_to_stderr() {
	wikipath_cmd()
		.args(["rewrite", "-", "--base-path", "/w", "--verbose"])
		.write_stdin("![a](a.png)\n")
		.assert()
		.success()
		.stdout("![a](/w/a.png)\n")
		.stderr(predicate::str::contains("rewrote image path"));
}

#[test]
fn test_unclosed_fence_warns_by_default() {
	wikipath_cmd()
		.args(["rewrite", "-", "--base-path", "/w"])
		.write_stdin("```\n![b](b.png)\n")
		.assert()
		.success()
		.stdout("```\n![b](b.png)\n")
		.stderr(predicate::str::contains("document ends inside an unclosed code fence"))
		.stderr(predicate::str::contains("Total changes made: 0"));
}

#[test]
fn test_piped_logs_have_no_ansi_escapes() {
	wikipath_cmd()
		.args(["rewrite", "-", "--base-path", "/w", "--verbose"])
		.write_stdin("![a](a.png)\n```\n")
		.assert()
		.success()
		.stderr(predicate::str::contains("rewrote image path"))
		.stderr(predicate::str::contains("\u{1b}[").not());
}
