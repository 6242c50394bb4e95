use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use aho_corasick::AhoCorasick;
use anyhow::{Context, Result};
use tracing::{debug, trace};

use super::{
    reader::{file_sha256, read_text_lossy},
    Detections, Hit, RepoMetadata, DATA_EXTENSIONS, LLM_TERMS, MAX_DATA_FILES, MAX_TERM_HITS,
    SENSITIVE_TERMS, TEXT_EXTENSIONS,
};

/// A term list compiled into a single overlapping-match automaton.
///
/// Overlapping search keeps every term independent: `llama.cpp` still reports
/// `llama`, and `llm` matches inside longer tokens.
struct Vocabulary {
    terms: &'static [&'static str],
    automaton: AhoCorasick,
}

impl Vocabulary {
    fn compile(label: &str, terms: &'static [&'static str]) -> Result<Self> {
        let automaton = AhoCorasick::new(terms)
            .with_context(|| format!("failed to build {label} term automaton"))?;
        Ok(Self { terms, automaton })
    }

    /// Terms present in `text`, each once, in vocabulary order.
    fn matched_terms<'a>(&'a self, text: &str) -> impl Iterator<Item = &'static str> + 'a {
        let mut seen = vec![false; self.terms.len()];
        for mat in self.automaton.find_overlapping_iter(text) {
            seen[mat.pattern().as_usize()] = true;
        }
        self.terms
            .iter()
            .zip(seen)
            .filter_map(|(term, hit)| hit.then_some(*term))
    }
}

/// Scan `files` (in walk order) for vocabulary hits and data files.
///
/// Lists stop growing at their caps, which keeps exactly the first entries
/// encountered in walk order.
pub fn detect_signals(root: &Path, files: &[PathBuf], read_limit: usize) -> Result<Detections> {
    let llm = Vocabulary::compile("llm", LLM_TERMS)?;
    let sensitive = Vocabulary::compile("sensitive", SENSITIVE_TERMS)?;

    let mut llm_hits = Vec::new();
    let mut sensitive_hits = Vec::new();
    let mut data_files = Vec::new();

    for path in files {
        let rel = relative_path(root, path);
        if is_data_file(&rel) && data_files.len() < MAX_DATA_FILES {
            data_files.push(rel.clone());
        }
        if !is_text_like(path) {
            continue;
        }
        let text = read_text_lossy(path, read_limit).to_lowercase();
        if text.is_empty() {
            continue;
        }
        trace!(path = %rel, len = text.len(), "matching vocabularies");
        for term in llm.matched_terms(&text) {
            if llm_hits.len() < MAX_TERM_HITS {
                llm_hits.push(Hit::new(rel.as_str(), term));
            }
        }
        for term in sensitive.matched_terms(&text) {
            if sensitive_hits.len() < MAX_TERM_HITS {
                sensitive_hits.push(Hit::new(rel.as_str(), term));
            }
        }
    }

    debug!(
        llm_hits = llm_hits.len(),
        sensitive_hits = sensitive_hits.len(),
        data_files = data_files.len(),
        "signal detection finished"
    );

    Ok(Detections {
        llm_detected: !llm_hits.is_empty(),
        llm_hits,
        sensitive_hits,
        data_files,
        license_present: root.join("LICENSE").exists(),
    })
}

/// Summarise the walked files. Unreadable sizes count as zero bytes.
pub fn collect_metadata(root: &Path, files: &[PathBuf]) -> RepoMetadata {
    let bytes = files
        .iter()
        .map(|path| fs::metadata(path).map(|m| m.len()).unwrap_or(0))
        .sum();
    RepoMetadata {
        repo_name: root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string()),
        files_count: files.len(),
        bytes,
        has_readme: root.join("README.md").exists(),
        hash_sample: files.first().map(|path| file_sha256(path)),
    }
}

/// Path of `path` relative to `root`, `/`-separated on every platform.
pub fn relative_path(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) => rel
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => path.display().to_string(),
    }
}

fn is_data_file(rel: &str) -> bool {
    let lower = rel.to_lowercase();
    DATA_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

fn is_text_like(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext.as_str()))
}
