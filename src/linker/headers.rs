// Thu Oct 15 2026 - Alex

use crate::linker::LinkerError;
use std::collections::BTreeSet;
use std::path::Path;
use walkdir::WalkDir;

/// Canonical paths of every file under `dirs`, recursively.
pub fn collect_exported_headers<P: AsRef<Path>>(dirs: &[P]) -> Result<BTreeSet<String>, LinkerError> {
    let mut headers = BTreeSet::new();

    for dir in dirs {
        let dir = dir.as_ref();
        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = std::fs::canonicalize(entry.path())?;
            headers.insert(path.to_string_lossy().into_owned());
        }
        log::debug!("Collected exported headers under {}", dir.display());
    }

    Ok(headers)
}
