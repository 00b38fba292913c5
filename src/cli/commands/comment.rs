//! Comment command handler

use sn_lists::core::{comment_spectra, preview_spectra, EditorConfig, ListVariant};
use sn_lists::{debug, error, info, verbose};

/// Comment out `spectrum_id` in the supernova's list file and echo the changed lines.
///
/// With `dry_run` the file is only read.
pub fn run(
    editor: &EditorConfig,
    sn_name: &str,
    spectrum_id: &str,
    variant: ListVariant,
    dry_run: bool,
) -> bool {
    let path = editor.list_path(sn_name, variant);
    debug!(
        "Commenting '{spectrum_id}' in {} (atomic_write={}, dry_run={dry_run})",
        path.display(),
        editor.atomic_write
    );

    let result = if dry_run {
        preview_spectra(editor, sn_name, spectrum_id, variant)
    } else {
        comment_spectra(editor, sn_name, spectrum_id, variant)
    };

    let changed = match result {
        Ok(changed) => changed,
        Err(e) => {
            error!("Failed to edit {variant} list for {sn_name}: {e}");
            eprintln!("✗ {e}");
            return false;
        }
    };

    for line in &changed {
        verbose!("line {}:", line.index + 1);
        println!("{line}");
    }

    let action = if dry_run { "Would comment" } else { "Commented" };
    if changed.is_empty() {
        info!("No lines in {} contain '{spectrum_id}'", path.display());
    } else {
        info!("{action} {} line(s) in {}", changed.len(), path.display());
    }
    println!("✓ {action} {} line(s) in {}", changed.len(), path.display());
    true
}
