//! Spectrum-comment editor
//!
//! Comments out every line of a supernova list file that mentions a given
//! spectrum identifier. Matching is plain substring containment over the whole
//! line, and a line that is already commented is commented again (`##`).

use crate::core::list_file::{list_file_path, ListVariant};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Marker prepended to each matching line.
pub const COMMENT_MARKER: char = '#';

/// Explicit settings for one editor invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Directory holding the `.list` files
    pub list_dir: PathBuf,
    /// Replace the file through a temporary sibling and a rename instead of
    /// truncating it in place
    pub atomic_write: bool,
}

impl EditorConfig {
    /// Create an editor configuration rooted at `list_dir` with atomic writes enabled.
    #[must_use]
    pub fn new(list_dir: impl Into<PathBuf>) -> Self {
        Self {
            list_dir: list_dir.into(),
            atomic_write: true,
        }
    }

    /// Toggle atomic replacement of the list file.
    #[must_use]
    pub const fn with_atomic_write(mut self, atomic_write: bool) -> Self {
        self.atomic_write = atomic_write;
        self
    }

    /// Path of the list file this configuration points at for `supernova_name`.
    #[must_use]
    pub fn list_path(&self, supernova_name: &str, variant: ListVariant) -> PathBuf {
        list_file_path(&self.list_dir, supernova_name, variant)
    }
}

/// Failure of a list-file edit
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    /// The resolved list file does not exist
    #[error("list file not found: {}", .path.display())]
    NotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Reading or rewriting the list file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

impl EditError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// The list file the error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path } | Self::Io { path, .. } => path,
        }
    }

    /// Whether this is a missing-file error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// A line that received a comment marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentedLine {
    /// Zero-based line number within the file
    pub index: usize,
    /// New text of the line, without its line terminator
    pub text: String,
}

impl fmt::Display for CommentedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Result of commenting a list file's contents in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentedText {
    /// Full rewritten contents
    pub content: String,
    /// Lines that were changed, in file order
    pub changed: Vec<CommentedLine>,
}

/// Prefix every line of `content` that contains `identifier` with [`COMMENT_MARKER`].
///
/// Line terminators are kept byte-for-byte, including a missing final newline.
/// The test runs against the full line text, terminator included. An empty
/// identifier matches every line.
#[must_use]
pub fn comment_lines(content: &str, identifier: &str) -> CommentedText {
    let mut rewritten = String::with_capacity(content.len());
    let mut changed = Vec::new();

    for (index, line) in content.split_inclusive('\n').enumerate() {
        if line.contains(identifier) {
            rewritten.push(COMMENT_MARKER);
            rewritten.push_str(line);
            changed.push(CommentedLine {
                index,
                text: format!("{COMMENT_MARKER}{}", strip_terminator(line)),
            });
        } else {
            rewritten.push_str(line);
        }
    }

    CommentedText {
        content: rewritten,
        changed,
    }
}

fn strip_terminator(line: &str) -> &str {
    line.strip_suffix('\n')
        .map_or(line, |l| l.strip_suffix('\r').unwrap_or(l))
}

/// Comment out every line mentioning `spectrum_identifier` in a supernova's list file.
///
/// The whole file is read before anything is written, so a read failure leaves it
/// untouched. With `atomic_write` off the file is truncated and rewritten in place,
/// and a failed write can leave it empty or partial. With it on, the file a symlink
/// resolves to is replaced through a temporary sibling; if its directory is not
/// writable the in-place rewrite is used instead.
///
/// # Returns
/// The lines that were commented, in file order.
///
/// # Errors
/// - [`EditError::NotFound`] if the list file does not exist; nothing is created.
/// - [`EditError::Io`] if the file cannot be read or rewritten.
///
/// # Examples
/// ```ignore
/// let config = EditorConfig::new("/data/coco/lists");
/// let changed = comment_spectra(&config, "SN2011dh", "2011dh_20110603", ListVariant::Annotated)?;
/// for line in &changed {
///     println!("{line}");
/// }
/// ```
pub fn comment_spectra(
    config: &EditorConfig,
    supernova_name: &str,
    spectrum_identifier: &str,
    variant: ListVariant,
) -> Result<Vec<CommentedLine>, EditError> {
    let path = config.list_path(supernova_name, variant);
    let original = read_list(&path)?;
    let edited = comment_lines(&original, spectrum_identifier);

    write_list(&path, &edited.content, config.atomic_write)
        .map_err(|e| EditError::from_io(&path, e))?;

    Ok(edited.changed)
}

/// Report which lines [`comment_spectra`] would change without touching the file.
///
/// # Errors
/// Same read errors as [`comment_spectra`].
pub fn preview_spectra(
    config: &EditorConfig,
    supernova_name: &str,
    spectrum_identifier: &str,
    variant: ListVariant,
) -> Result<Vec<CommentedLine>, EditError> {
    let path = config.list_path(supernova_name, variant);
    let original = read_list(&path)?;
    Ok(comment_lines(&original, spectrum_identifier).changed)
}

fn read_list(path: &Path) -> Result<String, EditError> {
    fs::read_to_string(path).map_err(|e| EditError::from_io(path, e))
}

fn write_list(path: &Path, content: &str, atomic: bool) -> io::Result<()> {
    if !atomic {
        return fs::write(path, content);
    }

    // Replace the file a symlink points at, never the link itself
    let target = fs::canonicalize(path)?;
    if replace_atomically(&target, content).is_err() {
        return fs::write(&target, content);
    }
    Ok(())
}

/// Write `content` to a sibling temporary file and rename it over `target`.
///
/// Needs write access to the target's directory; callers fall back to an
/// in-place write when this fails.
fn replace_atomically(target: &Path, content: &str) -> io::Result<()> {
    // Same directory keeps the rename on one filesystem
    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let permissions = fs::metadata(target)?.permissions();

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(content.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.as_file().set_permissions(permissions)?;
    temp.persist(target).map_err(|e| e.error)?;
    Ok(())
}
