//! Rendering trees and saving them to files.
//!
//! Writes are atomic (temp file, then rename) and optionally gzip-compressed
//! when the target name ends in `.gz`.

use crate::config::{Config, OutputFormat};
use crate::tree::{Branch, TreeNode};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Renders `tree` in `format`.
///
/// JSON honours `config.pretty` and `config.indent_size`. Every rendering
/// ends with a newline.
///
/// ```
/// use magictree::Branch;
/// use magictree::config::{Config, OutputFormat};
/// use magictree::file::saver::render;
///
/// let mut tree = Branch::new();
/// tree.get("things").unwrap().set("a", "first");
///
/// let config = Config { pretty: false, ..Config::default() };
/// assert_eq!(render(&tree, OutputFormat::Json, &config).unwrap(), "{\"things\":{\"a\":\"first\"}}\n");
/// assert_eq!(render(&tree, OutputFormat::Outline, &config).unwrap(), "- things\n  |- a: \"first\"\n");
/// ```
pub fn render(tree: &Branch, format: OutputFormat, config: &Config) -> Result<String> {
    match format {
        OutputFormat::Outline => Ok(tree.to_ascii(0)),
        OutputFormat::Json => {
            let mut out = serialize_json(tree, config)?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Yaml => serde_yaml::to_string(tree).context("Failed to serialize YAML"),
    }
}

fn serialize_json(tree: &Branch, config: &Config) -> Result<String> {
    if !config.pretty {
        return serde_json::to_string(tree).context("Failed to serialize JSON");
    }

    let indent = " ".repeat(config.indent_size);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    tree.serialize(&mut serializer)
        .context("Failed to serialize JSON")?;
    String::from_utf8(buffer).context("Serialized JSON is not valid UTF-8")
}

/// Saves `tree` to `path` in `format`.
///
/// Creates a `.bak` copy of an existing target first when
/// `config.create_backup` is set.
///
/// # Errors
///
/// Returns an error if the backup, the serialization, the temp-file write or
/// the final rename fails.
pub fn save_tree_file<P: AsRef<Path>>(
    path: P,
    tree: &Branch,
    format: OutputFormat,
    config: &Config,
) -> Result<()> {
    let path = path.as_ref();
    let should_compress = path.to_string_lossy().ends_with(".gz");

    if config.create_backup && path.exists() {
        create_backup(path)?;
    }

    let rendered = render(tree, format, config)?;
    write_file_atomic(path, rendered.as_bytes(), should_compress)?;
    tracing::debug!(path = %path.display(), %format, "saved tree");

    Ok(())
}

/// Creates a backup of a file by copying it with a .bak extension.
fn create_backup<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let mut backup_path = path.to_path_buf();
    let original_name = backup_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid file name"))?;
    backup_path.set_file_name(format!("{}.bak", original_name));
    fs::copy(path, backup_path).context("Failed to create backup")?;
    Ok(())
}

/// Writes data to a temp file, then renames it over the target.
fn write_file_atomic<P: AsRef<Path>>(path: P, data: &[u8], compress: bool) -> Result<()> {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    let path = path.as_ref();
    let temp_path = temp_path_for(path);

    if compress {
        let file = fs::File::create(&temp_path).context("Failed to create temp file")?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder
            .write_all(data)
            .context("Failed to write compressed data")?;
        encoder.finish().context("Failed to finish compression")?;
    } else {
        fs::write(&temp_path, data).context("Failed to write temp file")?;
    }

    fs::rename(&temp_path, path).context("Failed to rename temp file")?;

    Ok(())
}

/// `tree.json` -> `tree.json.tmp`, so the temp file never equals the target.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}
