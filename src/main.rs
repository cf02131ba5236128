use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, IsTerminal, Write};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use magictree::config::{Config, OutputFormat};
use magictree::file::loader::{load_tree_file, load_tree_from_stdin};
use magictree::file::saver::{render, save_tree_file};
use magictree::{Branch, KeyPath, Node};

/// MagicTree - reshape JSON/YAML trees and render them as outline, JSON or YAML
#[derive(Parser, Debug)]
#[command(name = "magictree")]
#[command(version)]
#[command(about = "Reshape nested documents and render them as an outline, JSON or YAML", long_about = None)]
struct Cli {
    /// JSON or YAML file to load (omit to read from stdin)
    file: Option<String>,

    /// Output format (default: from config, else outline)
    #[arg(short, long, value_enum, ignore_case = true)]
    format: Option<OutputFormat>,

    /// Render only the subtree at this dotted path
    #[arg(short, long, value_name = "PATH")]
    select: Option<String>,

    /// Move a node, e.g. --move colors.red=colors.crimson (repeatable)
    #[arg(short, long = "move", value_name = "FROM=TO", value_parser = parse_move)]
    moves: Vec<(String, String)>,

    /// Remove the node at a dotted path (repeatable)
    #[arg(short, long = "remove", value_name = "PATH")]
    removes: Vec<String>,

    /// Sort keys case-insensitively at every level
    #[arg(long)]
    sort_keys: bool,

    /// Drop branches that hold no leaves
    #[arg(long)]
    prune_empty: bool,

    /// Write the result to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,
}

fn parse_move(arg: &str) -> std::result::Result<(String, String), String> {
    match arg.split_once('=') {
        Some((from, to)) if !from.is_empty() && !to.is_empty() => {
            Ok((from.to_string(), to.to_string()))
        }
        _ => Err(format!("expected FROM=TO, got '{}'", arg)),
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    // RUST_LOG wins over -d when set
    let env_filter = EnvFilter::builder()
        .with_default_directive(filter.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(fmt_layer).init();
}

/// Applies the requested edits in order: moves, removes, prune, sort.
fn apply_edits(tree: &mut Branch, cli: &Cli) -> Result<()> {
    for (from, to) in &cli.moves {
        tree.move_node(from.as_str(), to.as_str())
            .with_context(|| format!("Failed to move '{}' to '{}'", from, to))?;
    }

    for path in &cli.removes {
        if tree.remove_path(path.as_str()).is_none() {
            tracing::warn!("Nothing to remove at '{}'", path);
        }
    }

    if cli.prune_empty {
        tree.prune_empty();
    }

    if cli.sort_keys {
        tree.sort_keys_recursive_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));
    }

    Ok(())
}

/// Narrows `tree` to the subtree at `path`. A selected leaf is wrapped under its own key.
fn select(tree: Branch, path: &str) -> Result<Branch> {
    let path = KeyPath::from(path);
    let Some((key, _)) = path.split_last() else {
        return Ok(tree);
    };

    match tree.find(&path) {
        Some(Node::Branch(branch)) => Ok(branch.clone()),
        Some(leaf @ Node::Leaf(_)) => {
            let mut wrapper = Branch::new();
            wrapper.set_node(key, leaf.clone());
            Ok(wrapper)
        }
        None => anyhow::bail!("Nothing found at '{}'", path),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    let config = Config::load();
    let format = cli.format.unwrap_or(config.format);

    let mut tree = match &cli.file {
        Some(file_path) => load_tree_file(file_path)
            .with_context(|| format!("Failed to load {}", file_path))?,
        None if !io::stdin().is_terminal() => load_tree_from_stdin()?,
        None => anyhow::bail!("No input: pass a file or pipe a document on stdin"),
    };

    apply_edits(&mut tree, &cli)?;

    if let Some(path) = &cli.select {
        tree = select(tree, path)?;
    }

    match &cli.output {
        Some(output) => save_tree_file(output, &tree, format, &config)?,
        None => {
            let rendered = render(&tree, format, &config)?;
            io::stdout()
                .write_all(rendered.as_bytes())
                .context("Failed to write to stdout")?;
        }
    }

    Ok(())
}
