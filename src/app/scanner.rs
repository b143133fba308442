use crate::app::models::{ContentBlock, RuntimeConfig, Snapshot, StructureLine, TextEncoding};
use ignore::{DirEntry, WalkBuilder};
use pathdiff::diff_paths;
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

pub struct Scanner {
    base: PathBuf,
    targets: Vec<String>,
    encoding: TextEncoding,
}

impl Scanner {
    pub fn new(config: &RuntimeConfig) -> Self {
        Self {
            base: config.base.clone(),
            targets: config.targets.clone(),
            encoding: config.encoding,
        }
    }

    /// Walks every configured target in order and collects both reports in a single pass.
    pub fn scan(&self) -> Snapshot {
        let mut snapshot = Snapshot::default();

        for target in &self.targets {
            let target_path = self.base.join(target);
            if !target_path.is_dir() {
                log::debug!("Target {:?} is not a directory", target_path);
                snapshot.skipped.push(target.clone());
                continue;
            }
            self.scan_target(&target_path, &mut snapshot);
        }

        log::info!(
            "Scanned {} files across {} targets ({} skipped)",
            snapshot.content.len(),
            self.targets.len() - snapshot.skipped.len(),
            snapshot.skipped.len()
        );
        snapshot
    }

    fn scan_target(&self, target_path: &Path, snapshot: &mut Snapshot) {
        // Every file is included: no hidden-file, .gitignore or .ignore filtering.
        let walker = WalkBuilder::new(target_path)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_path(files_before_folders)
            .build();

        for result in walker {
            match result {
                Ok(entry) => self.process_entry(&entry, snapshot),
                Err(err) => log::warn!("Error walking entry: {}", err),
            }
        }
    }

    fn process_entry(&self, entry: &DirEntry, snapshot: &mut Snapshot) {
        let path = entry.path();
        let Some(relative) = diff_paths(path, &self.base) else {
            log::warn!("Cannot express {:?} relative to {:?}", path, self.base);
            return;
        };
        let depth = self.separator_depth(path, &relative);
        let name = entry_name(path);

        // The target root is always a directory, even when reached through a symlink.
        let is_dir = entry.depth() == 0 || entry.file_type().is_some_and(|t| t.is_dir());
        if is_dir {
            // The walker reports the folder before failing to list it; such folders are left out.
            if let Err(err) = fs::read_dir(path) {
                log::warn!("Cannot list {}: {}", relative.display(), err);
                return;
            }
            log::debug!("Entering {}", relative.display());
            snapshot.structure.push(StructureLine { name, depth, is_dir: true });
            return;
        }

        // Symlinks are not followed. One that resolves to a regular file is read through,
        // a dangling one is listed with a read error.
        let dangling = entry.path_is_symlink() && fs::metadata(path).is_err();
        if !path.is_file() && !dangling {
            log::debug!("Skipping {}: not a regular file", relative.display());
            return;
        }

        snapshot.structure.push(StructureLine { name, depth, is_dir: false });
        snapshot.content.push(ContentBlock {
            relative_path: to_slash_path(&relative),
            body: self.read_text(path),
        });
    }

    /// Separators left in the joined path once the base prefix is stripped.
    fn separator_depth(&self, path: &Path, relative: &Path) -> usize {
        let raw = path.to_string_lossy();
        let base = self.base.to_string_lossy();
        match raw.strip_prefix(base.as_ref()) {
            Some(rest) => rest.matches(MAIN_SEPARATOR).count(),
            None => relative.components().count(),
        }
    }

    fn read_text(&self, path: &Path) -> Result<String, String> {
        let text = fs::read(path)
            .map_err(anyhow::Error::from)
            .and_then(|bytes| self.encoding.decode(bytes));
        text.map_err(|e| {
            log::warn!("Could not read {}: {}", path.display(), e);
            e.to_string()
        })
    }
}

/// Orders siblings so a folder's files are listed before any of its subfolders are entered.
fn files_before_folders(a: &Path, b: &Path) -> Ordering {
    (a.is_dir(), a.file_name()).cmp(&(b.is_dir(), b.file_name()))
}

/// Last segment of the path as written, so a `.` target keeps its name.
fn entry_name(path: &Path) -> String {
    let raw = path.to_string_lossy();
    match raw.rsplit(MAIN_SEPARATOR).next() {
        Some(last) if !last.is_empty() => last.to_string(),
        _ => path.file_name().unwrap_or_default().to_string_lossy().to_string(),
    }
}

fn to_slash_path(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
