//! Path command handler

use sn_lists::core::{EditorConfig, ListVariant};
use sn_lists::warn;

/// Print the resolved list file path, warning when it does not exist yet.
pub fn run(editor: &EditorConfig, sn_name: &str, variant: ListVariant) -> bool {
    let path = editor.list_path(sn_name, variant);
    if !path.exists() {
        warn!("{variant} list file does not exist: {}", path.display());
    }
    println!("{}", path.display());
    true
}
