use cdocs::Error;
use cdocs::build::{SnapshotSource, build_snapshot};
use cdocs::docs::{DocsIndex, SymbolKey, codec};
use cdocs::report::{
    ReportOptions, render_comments, render_examples, render_search, render_see_also,
};
use cdocs::search::{Query, search, suggest};
use cdocs::stats::render_stats;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use terminal_size::{Width, terminal_size};

mod config;
mod init;
mod logging;

use config::Config;
use init::init_config;
use logging::initialize_logging;

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Parser)]
#[command(name = "cdocs")]
#[command(about = "Offline ClojureDocs examples, comments and see-alsos", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Snapshot file to read (overrides cdocs.toml)
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Show timestamps, authors and URLs
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log debug output to stderr
    #[arg(long, global = true)]
    debug: bool,

    /// Disable syntax highlighting of examples
    #[arg(long, global = true)]
    no_highlight: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the examples for a symbol
    Examples {
        /// Symbol as ns/name, or a bare name in the default namespace
        symbol: String,
    },
    /// Show the comments for a symbol
    Comments {
        /// Symbol as ns/name, or a bare name in the default namespace
        symbol: String,
    },
    /// Show the see-alsos for a symbol
    SeeAlso {
        /// Symbol as ns/name, or a bare name in the default namespace
        symbol: String,
    },
    /// Find symbols whose name contains QUERY
    Search {
        query: String,
        /// Only search this namespace
        #[arg(long)]
        ns: Option<String>,
        /// Treat QUERY as a regular expression
        #[arg(short, long)]
        regex: bool,
    },
    /// Show example coverage per namespace
    Stats,
    /// Show which snapshot is active
    Info,
    /// Write a new snapshot with the symbols matching QUERY
    Build {
        query: String,
        /// Where to write the new snapshot (.gz to compress)
        output: PathBuf,
        /// Snapshot to read symbols from (defaults to the active snapshot)
        #[arg(long)]
        from: Option<PathBuf>,
        /// Only include this namespace
        #[arg(long)]
        ns: Option<String>,
        /// Treat QUERY as a regular expression
        #[arg(short, long)]
        regex: bool,
    },
    /// Initialize a new cdocs.toml configuration file
    Init {
        /// Overwrite existing cdocs.toml if present
        #[arg(long)]
        force: bool,
    },
}

// ============================================================================
// Helpers
// ============================================================================

/// Terminal width when stdout is a terminal
fn terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

fn open_docs(path: &Path) -> Result<DocsIndex, String> {
    if !path.exists() {
        return Err(Error::NoSnapshot(path.to_path_buf()).to_string());
    }
    let mut docs = DocsIndex::default();
    docs.load_snapshot(path).map_err(|e| e.to_string())?;
    Ok(docs)
}

fn report_options(config: &Config, verbose: bool) -> ReportOptions {
    let term = terminal_width();
    ReportOptions {
        verbose,
        width: term.map_or(config.wrap_width, |w| w.min(config.wrap_width)),
        highlight: config.highlight && term.is_some(),
    }
}

/// Point at near names when a symbol is not in the snapshot
fn hint_unknown(docs: &DocsIndex, key: &SymbolKey) {
    if docs.lookup(&key.ns, &key.name).is_some() {
        return;
    }
    let suggestions = suggest(docs, &key.ns, &key.name);
    if suggestions.is_empty() {
        eprintln!(
            "{} {} is not in this snapshot",
            "ℹ️".blue(),
            key.to_string().yellow()
        );
    } else {
        eprintln!(
            "{} {} is not in this snapshot. Did you mean:",
            "ℹ️".blue(),
            key.to_string().yellow()
        );
        for name in suggestions {
            eprintln!("  {} {}/{}", "•".cyan(), key.ns, name.green());
        }
    }
}

fn show_info(path: &Path) -> Result<(), String> {
    let docs = open_docs(path)?;
    let meta = docs.active_meta();
    let fingerprint = codec::fingerprint(path).map_err(|e| e.to_string())?;

    println!("{} {}", "Snapshot:".bold(), meta.source);
    println!("{} {}", "Captured:".bold(), meta.captured_at);
    println!("{} {}", "Symbols: ".bold(), meta.record_count);
    println!("{} {}", "SHA-256: ".bold(), fingerprint.dimmed());
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn run(cli: Cli, config: Config) -> Result<(), String> {
    let opts = report_options(&config, cli.verbose);
    let symbol = |s: &str| SymbolKey::parse(s, &config.default_ns);

    match cli.command {
        Commands::Examples { symbol: s } => {
            let docs = open_docs(&config.snapshot)?;
            let key = symbol(&s);
            print!("{}", render_examples(&docs, &key.ns, &key.name, &opts));
            hint_unknown(&docs, &key);
        }
        Commands::Comments { symbol: s } => {
            let docs = open_docs(&config.snapshot)?;
            let key = symbol(&s);
            print!("{}", render_comments(&docs, &key.ns, &key.name, &opts));
            hint_unknown(&docs, &key);
        }
        Commands::SeeAlso { symbol: s } => {
            let docs = open_docs(&config.snapshot)?;
            let key = symbol(&s);
            print!("{}", render_see_also(&docs, &key.ns, &key.name));
            hint_unknown(&docs, &key);
        }
        Commands::Search { query, ns, regex } => {
            let docs = open_docs(&config.snapshot)?;
            let query = Query::from_input(&query, regex).map_err(|e| e.to_string())?;
            let found = search(&docs, ns.as_deref(), &query);
            print!("{}", render_search(&found));
        }
        Commands::Stats => {
            let docs = open_docs(&config.snapshot)?;
            print!("{}", render_stats(&docs));
        }
        Commands::Info => show_info(&config.snapshot)?,
        Commands::Build {
            query,
            output,
            from,
            ns,
            regex,
        } => {
            let from = from.unwrap_or_else(|| config.snapshot.clone());
            println!("{} Reading {}...", "🔄".cyan(), from.display());
            let docs = open_docs(&from)?;
            let query = Query::from_input(&query, regex).map_err(|e| e.to_string())?;

            let source = SnapshotSource::new(&docs);
            let snapshot = build_snapshot(&source, ns.as_deref(), &query, &output)
                .map_err(|e| e.to_string())?;
            println!(
                "{} Wrote {} symbol(s) to {}",
                "✅".green(),
                snapshot.records.len().to_string().bold(),
                output.display()
            );
        }
        Commands::Init { force } => init_config(force)?,
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = initialize_logging(cli.debug) {
        eprintln!("{} {}", "⚠️".yellow(), e);
    }

    let mut config = Config::load();

    // CLI flags override config file
    if let Some(snapshot) = &cli.snapshot {
        config.snapshot = snapshot.clone();
    }
    if cli.no_highlight {
        config.highlight = false;
    }

    if let Err(e) = run(cli, config) {
        eprintln!("\n{} {}", "❌".red(), e.red());
        std::process::exit(1);
    }
}
