use std::path::{Path, PathBuf};

use tracing::trace;
use walkdir::{DirEntry, WalkDir};

/// Enumerates regular files below a root directory.
///
/// Entries are visited sorted by file name, so the sequence is stable for an
/// unchanged filesystem. Each call to [`FileWalker::files`] starts a fresh walk.
#[derive(Debug, Clone)]
pub struct FileWalker {
    root: PathBuf,
    include_hidden: bool,
    skipped_files: Vec<PathBuf>,
}

impl FileWalker {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            include_hidden: false,
            skipped_files: Vec::new(),
        }
    }

    pub fn include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Never yield the regular file at `path`. Directories are always
    /// descended. Paths are compared as given, so callers should pass paths
    /// rooted the same way as the walk root.
    pub fn skip_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.skipped_files.push(path.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily yield every regular file below the root.
    ///
    /// Unreadable entries are skipped. Symlinked directories are not followed;
    /// symlinks resolving to regular files are yielded.
    pub fn files(&self) -> impl Iterator<Item = PathBuf> + '_ {
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| entry.depth() == 0 || self.keep(entry))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    trace!(%err, "skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| {
                entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
            })
            .filter(move |entry| !self.skipped_files.iter().any(|f| entry.path() == f))
            .map(DirEntry::into_path)
    }

    fn keep(&self, entry: &DirEntry) -> bool {
        self.include_hidden || !is_hidden(entry)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}
