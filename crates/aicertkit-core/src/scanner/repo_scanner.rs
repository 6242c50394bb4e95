use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use super::{
    detector::{collect_metadata, detect_signals},
    walker::FileWalker,
    ScanError, ScanOptions,
};
use crate::report::{format_timestamp, Report};
use crate::rules::RuleRepository;
use crate::{checklist, triage};

/// Runs the full scan pipeline against a repository on disk.
pub struct RepoScanner<R: RuleRepository> {
    rule_repo: Arc<R>,
    options: ScanOptions,
}

impl<R: RuleRepository> RepoScanner<R> {
    pub fn new(rule_repo: Arc<R>) -> Self {
        Self::with_options(rule_repo, ScanOptions::default())
    }

    pub fn with_options(rule_repo: Arc<R>, options: ScanOptions) -> Self {
        Self { rule_repo, options }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Scan `repo`, stamping the report with the current time.
    pub fn scan(&self, repo: &Path) -> Result<Report> {
        self.scan_at(repo, Utc::now())
    }

    /// Scan `repo` with a caller-supplied timestamp.
    ///
    /// Fails with [`ScanError`] before touching the filesystem further when
    /// `repo` is missing or not a directory.
    #[instrument(name = "scan_repo", skip_all, fields(repo = %repo.display()))]
    pub fn scan_at(&self, repo: &Path, generated: DateTime<Utc>) -> Result<Report> {
        let root = resolve_repo(repo)?;
        let rules = self
            .rule_repo
            .load_rules()
            .context("failed to load rule table")?;
        rules.validate().context("rule table is invalid")?;

        let walker = self.walker(&root);
        let files: Vec<PathBuf> = walker.files().collect();
        debug!(files = files.len(), "walked repository");

        let metadata = collect_metadata(&root, &files);
        let detections = detect_signals(&root, &files, self.options.read_limit)?;
        let ai_act = triage::assess(&detections, &rules);
        let owasp_llm = checklist::evaluate(&detections);

        Ok(Report {
            metadata,
            detections,
            ai_act,
            owasp_llm,
            generated: format_timestamp(generated),
        })
    }

    fn walker(&self, root: &Path) -> FileWalker {
        self.options
            .skip_files
            .iter()
            // a file that does not exist yet has nothing to skip
            .filter_map(|file| file.canonicalize().ok())
            .fold(
                FileWalker::new(root).include_hidden(self.options.include_hidden),
                |walker, file| walker.skip_file(file),
            )
    }
}

fn resolve_repo(repo: &Path) -> Result<PathBuf, ScanError> {
    let root = repo
        .canonicalize()
        .map_err(|_| ScanError::RepoNotFound(repo.to_path_buf()))?;
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(repo.to_path_buf()));
    }
    Ok(root)
}
