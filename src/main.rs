//! Markdiff - A word-level Markdown diff editor.
//!
//! # Usage
//!
//! ```bash
//! markdiff draft.md
//! markdiff draft.md edited.md
//! markdiff --print draft.md edited.md
//! markdiff --improve draft.md > improved.md
//! ```

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use markdiff::app::App;
use markdiff::clipboard::{Clipboard, ClipboardPayload};
use markdiff::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use markdiff::diff::Granularity;
use markdiff::markdown::{export_page, render_html};
use markdiff::markup::{self, MarkupTheme};
use markdiff::rewrite::{DEFAULT_MODEL, GeminiRewriter, RewriteWorker};

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Compare two Markdown texts word by word
#[derive(Parser, Debug)]
#[command(name = "markdiff", version, about, long_about = None)]
struct Cli {
    /// The original Markdown file
    #[arg(value_name = "ORIGINAL")]
    original: PathBuf,

    /// The modified Markdown file (defaults to a copy of ORIGINAL)
    #[arg(value_name = "MODIFIED")]
    modified: Option<PathBuf>,

    /// Print the annotated Markdown and exit
    #[arg(long, group = "batch")]
    print: bool,

    /// Print the diff rendered as an HTML fragment and exit
    #[arg(long, group = "batch")]
    html: bool,

    /// Write a standalone HTML page of the diff (also the Ctrl+P target)
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// Copy the diff to the clipboard and exit
    #[arg(long, group = "batch")]
    copy: bool,

    /// Rewrite ORIGINAL with AI into MODIFIED (or stdout) and exit
    #[arg(long, group = "batch")]
    improve: bool,

    /// Diff tokens: word, line or char
    #[arg(long, value_enum)]
    granularity: Option<Granularity>,

    /// Gemini model used for rewrites
    #[arg(long, value_name = "NAME")]
    model: Option<String>,

    /// Seconds to wait for a rewrite
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Reload files when they change on disk
    #[arg(short, long)]
    watch: bool,

    /// Write debug logs to a file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::from_default_env()
                        .add_directive("markdiff=debug".parse().context("log directive")?),
                )
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
                )
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn read_inputs(cli: &Cli) -> Result<(String, String)> {
    let original = std::fs::read_to_string(&cli.original)
        .with_context(|| format!("Failed to read {}", cli.original.display()))?;
    let modified = match &cli.modified {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => original.clone(),
    };
    Ok((original, modified))
}

fn page_title(path: &Path) -> String {
    path.file_name().map_or_else(
        || "markdiff".to_string(),
        |name| name.to_string_lossy().to_string(),
    )
}

/// Run a non-interactive mode. Returns `false` when no batch flag was given.
fn run_batch(cli: &Cli, effective: &ConfigFlags) -> Result<bool> {
    let granularity = effective.granularity.unwrap_or_default();
    let mut stdout = std::io::stdout().lock();

    if cli.improve {
        let original = std::fs::read_to_string(&cli.original)
            .with_context(|| format!("Failed to read {}", cli.original.display()))?;
        let mut worker = RewriteWorker::new(make_rewriter(effective), rewrite_timeout(effective));
        worker.start(original)?;
        let improved = worker
            .wait()
            .context("Rewrite worker produced no result")??;
        match &cli.modified {
            Some(path) => std::fs::write(path, &improved)
                .with_context(|| format!("Failed to write {}", path.display()))?,
            None => stdout.write_all(improved.as_bytes())?,
        }
        return Ok(true);
    }

    let batch = cli.print || cli.html || cli.copy;
    if !batch && cli.export.is_none() {
        return Ok(false);
    }

    let (original, modified) = read_inputs(cli)?;
    let annotated = markup::annotate(&original, &modified, granularity);

    if let Some(path) = &cli.export {
        let page = export_page(&page_title(&cli.original), &annotated, &MarkupTheme::default());
        std::fs::write(path, page)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "exported diff");
    }
    if cli.print {
        stdout.write_all(annotated.as_bytes())?;
    }
    if cli.html {
        stdout.write_all(render_html(&annotated).as_bytes())?;
    }
    if cli.copy {
        let payload = ClipboardPayload::from_annotated(&annotated);
        if cfg!(target_os = "linux") {
            eprintln!("Holding the clipboard until another program copies something...");
        }
        let backend = Clipboard::for_batch().copy(&payload)?;
        eprintln!("Copied diff to the {backend}");
    }
    // --export alone still opens the editor, with Ctrl+P writing there
    Ok(batch)
}

fn rewrite_timeout(effective: &ConfigFlags) -> Duration {
    Duration::from_secs(effective.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
}

fn make_rewriter(effective: &ConfigFlags) -> Arc<GeminiRewriter> {
    let model = effective.model.as_deref().unwrap_or(DEFAULT_MODEL);
    Arc::new(GeminiRewriter::from_env(model, rewrite_timeout(effective)))
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref())?;
    tracing::debug!(?effective, "effective flags");

    // Verify file exists
    if !cli.original.exists() {
        anyhow::bail!("File not found: {}", cli.original.display());
    }

    if run_batch(&cli, &effective)? {
        return Ok(());
    }

    // Run the application
    let mut app = App::new(cli.original, cli.modified)
        .with_watch(effective.watch || cli.watch)
        .with_granularity(effective.granularity.unwrap_or_default())
        .with_rewriter(make_rewriter(&effective), rewrite_timeout(&effective))
        .with_export_path(cli.export)
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run().context("Application error")
}
