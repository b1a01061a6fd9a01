use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use wikipath_cli::document::{Source, read_source, write_output, write_preview};
use wikipath_cli::rewrite::{BasePath, RewriteOptions, Rewritten, normalize_base_path, rewrite_document};

#[derive(Parser)]
#[command(name = "wikipath")]
#[command(
	author,
	version,
	about = "CLI tool for rewriting relative Markdown image paths for wiki hosting"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Enable debug logging (otherwise RUST_LOG is used)
	#[arg(short, long, global = true)]
	verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Prefix relative image paths in a Markdown document with a base path
	Rewrite(RewriteArgs),
	/// Print the normalized form of a base path
	Normalize {
		/// Base path as typed by the user
		base_path: String,
	},
}

#[derive(Args)]
struct RewriteArgs {
	/// Markdown document to rewrite ("-" reads stdin)
	#[arg(value_name = "FILE")]
	file: PathBuf,

	/// Base path for images, e.g. "wiki/section" or "/docs/assets"
	#[arg(short, long, env = "WIKIPATH_BASE_PATH")]
	base_path: String,

	/// Leave <img src="..."> tags untouched
	#[arg(long)]
	no_html_images: bool,

	/// Write the rewritten document here instead of stdout
	#[arg(short, long, value_name = "PATH", conflicts_with = "preview")]
	output: Option<PathBuf>,

	/// Write the rewritten document to a temporary file and print its path
	#[arg(long)]
	preview: bool,

	/// Output format
	#[arg(long, value_enum, default_value_t = OutputFormat::Text, conflicts_with = "preview")]
	format: OutputFormat,

	/// Don't report the number of changes on stderr
	#[arg(short, long)]
	quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
	/// The rewritten document as is
	Text,
	/// A JSON object with "text" and "changes"
	Json,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	// --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
	let filter = if cli.verbose {
		EnvFilter::new("debug")
	} else {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
	};
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(std::io::stderr().is_terminal())
		.init();

	match cli.command {
		Commands::Rewrite(args) => handle_rewrite(args),
		Commands::Normalize { base_path } => handle_normalize(&base_path),
	}
}

fn handle_normalize(base_path: &str) -> Result<ExitCode> {
	println!("{}", normalize_base_path(base_path));
	Ok(ExitCode::SUCCESS)
}

fn handle_rewrite(args: RewriteArgs) -> Result<ExitCode> {
	let source = Source::from_path(args.file);
	let base_path = BasePath::parse(&args.base_path);
	let options = RewriteOptions {
		embedded_images: !args.no_html_images,
	};

	let content =
		read_source(&source).with_context(|| format!("Failed to load document {}", source))?;

	let result = rewrite_document(&content, &base_path, &options);

	if args.preview {
		let path = write_preview(&result.text).context("Failed to create preview")?;
		println!("{}", path.display());
	} else {
		let rendered = render(&result, args.format)?;
		match args.output {
			Some(ref path) => write_output(path, &rendered, &source)
				.with_context(|| format!("Failed to save {}", path.display()))?,
			None => print!("{}", rendered),
		}
	}

	if !args.quiet {
		eprintln!("Total changes made: {}", result.changes);
	}

	Ok(ExitCode::SUCCESS)
}

fn render(result: &Rewritten, format: OutputFormat) -> Result<String> {
	match format {
		OutputFormat::Text => Ok(result.text.clone()),
		OutputFormat::Json => {
			let mut json =
				serde_json::to_string_pretty(result).context("Failed to serialize result")?;
			json.push('\n');
			Ok(json)
		}
	}
}
