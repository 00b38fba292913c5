//! Core list-file handling, independent of the CLI

pub mod editor;
pub mod list_file;

pub use editor::{
    comment_lines, comment_spectra, preview_spectra, CommentedLine, CommentedText, EditError,
    EditorConfig,
};
pub use list_file::{list_file_path, ListVariant};
