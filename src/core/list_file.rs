//! Naming and location of per-supernova list files

use std::fmt;
use std::path::{Path, PathBuf};

/// File extension shared by every list file.
pub const LIST_EXTENSION: &str = "list";

/// Suffix marking the manually curated copy of a list.
pub const ANNOTATED_SUFFIX: &str = "-B";

/// Which of the two list files kept for a supernova to operate on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ListVariant {
    /// The curated copy, `<name>-B.list`.
    #[default]
    Annotated,
    /// The unsuffixed original, `<name>.list`.
    Plain,
}

impl ListVariant {
    /// Pick a variant from a "use the plain file" flag, as the CLI exposes it.
    #[must_use]
    pub const fn from_plain_flag(plain: bool) -> Self {
        if plain {
            Self::Plain
        } else {
            Self::Annotated
        }
    }

    /// File name of this variant for `supernova_name`.
    ///
    /// The name is used verbatim; nothing is escaped or validated.
    #[must_use]
    pub fn file_name(self, supernova_name: &str) -> String {
        match self {
            Self::Annotated => format!("{supernova_name}{ANNOTATED_SUFFIX}.{LIST_EXTENSION}"),
            Self::Plain => format!("{supernova_name}.{LIST_EXTENSION}"),
        }
    }
}

impl fmt::Display for ListVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Annotated => write!(f, "annotated"),
            Self::Plain => write!(f, "plain"),
        }
    }
}

/// Full path of a supernova's list file under `list_dir`.
#[must_use]
pub fn list_file_path(list_dir: &Path, supernova_name: &str, variant: ListVariant) -> PathBuf {
    list_dir.join(variant.file_name(supernova_name))
}
