//! Tree loading from JSON and YAML documents.
//!
//! Documents are parsed with serde and imported into a root [`Branch`]. The
//! document root must be a mapping; `null` values anywhere are rejected.

use crate::tree::Branch;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Source document syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

/// Loads a tree from a `.json`, `.yaml` or `.yml` file, optionally gzipped.
///
/// # Examples
///
/// ```no_run
/// use magictree::file::loader::load_tree_file;
///
/// let tree = load_tree_file("planets.json").unwrap();
/// println!("{}", tree);
/// ```
///
/// # Errors
///
/// Returns an error if the file cannot be read or decompressed, if it is not
/// valid JSON/YAML, or if its contents cannot be represented as a tree.
pub fn load_tree_file<P: AsRef<Path>>(path: P) -> Result<Branch> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read {}", path_ref.display()))?
    };

    let format = determine_format(path_ref);
    debug!(path = %path_ref.display(), ?format, "loading tree");
    parse_tree(&content, format)
}

/// Loads a tree from standard input.
///
/// Gzip input is detected by its magic bytes. JSON is tried first, then YAML.
pub fn load_tree_from_stdin() -> Result<Branch> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    let content = if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)?
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in stdin")?
    };

    parse_any(&content)
}

/// Parses `content` as JSON, falling back to YAML.
pub fn parse_any(content: &str) -> Result<Branch> {
    if let Ok(tree) = parse_tree(content, InputFormat::Json) {
        return Ok(tree);
    }
    parse_tree(content, InputFormat::Yaml)
        .context("Failed to parse input: it is neither a valid JSON nor a valid YAML tree")
}

/// Parses `content` in the given syntax into a root branch.
pub fn parse_tree(content: &str, format: InputFormat) -> Result<Branch> {
    let tree = match format {
        InputFormat::Json => {
            let value: serde_json::Value =
                serde_json::from_str(content).context("Failed to parse JSON")?;
            Branch::try_from(value)?
        }
        InputFormat::Yaml => {
            let value: serde_yaml::Value =
                serde_yaml::from_str(content).context("Failed to parse YAML")?;
            Branch::try_from(value)?
        }
    };
    Ok(tree)
}

/// Picks the syntax from the file name, ignoring a trailing `.gz`.
///
/// - `data.yaml` → Yaml
/// - `data.yml.gz` → Yaml
/// - anything else → Json
fn determine_format<P: AsRef<Path>>(path: P) -> InputFormat {
    let path_str = path.as_ref().to_string_lossy();
    let base = path_str.strip_suffix(".gz").unwrap_or(&path_str);

    if base.ends_with(".yaml") || base.ends_with(".yml") {
        InputFormat::Yaml
    } else {
        InputFormat::Json
    }
}

fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped stdin")?;
    Ok(content)
}
