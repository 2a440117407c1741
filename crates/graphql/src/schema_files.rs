use std::collections::HashSet;
use std::path::PathBuf;
use walkdir::WalkDir;

#[derive(Debug, Default)]
pub(crate) struct FoundSchemaFiles {
    pub errors: Vec<walkdir::Error>,
    pub file_paths: Vec<PathBuf>,
    pub num_skipped_files: usize,
}

/// Finds every schema file located at or under each of `paths`.
///
/// A directory is walked recursively and only files whose extension is in
/// `file_exts` are kept. A single file path passed on its own is always
/// kept, whatever its extension.
pub(crate) fn find_schema_files(paths: &[PathBuf], file_exts: &[String]) -> FoundSchemaFiles {
    let file_exts: HashSet<String> =
        file_exts.iter()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .collect();

    log::debug!("Scanning {} input paths...", paths.len());
    let mut found = FoundSchemaFiles::default();
    for path in paths {
        for entry in WalkDir::new(path.as_path()).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::trace!(
                        "Encountered an error while iterating recursive \
                        filesystem entities at/under {path:#?}."
                    );
                    found.errors.push(err);
                    continue
                },
            };

            let entry_path = entry.path();
            if !entry.file_type().is_file() {
                log::trace!("Skipping non-file: {entry_path:#?}.");
                continue
            }

            let has_schema_ext = entry_path.extension()
                .map(|ext| file_exts.contains(&*ext.to_string_lossy()))
                .unwrap_or(false);
            if has_schema_ext {
                log::trace!("Found schema file at {entry_path:#?}.");
                found.file_paths.push(entry_path.to_path_buf());
            } else {
                found.num_skipped_files += 1;
            }
        }
    }

    if found.file_paths.is_empty()
        && let [only_path] = paths
        && only_path.is_file() {
        log::warn!(
            "Proceeding with {only_path:#?} even though it doesn't match any \
            of the schema file extensions ({}).",
            file_exts.iter()
                .map(|ext| format!("`.{ext}`"))
                .collect::<Vec<_>>()
                .join(", "),
        );
        found.num_skipped_files = 0;
        found.file_paths.push(only_path.clone());
    }

    log::debug!("Found {} schema files.", found.file_paths.len());
    found
}
