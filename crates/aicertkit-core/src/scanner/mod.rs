use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod detector;
pub mod reader;
pub mod repo_scanner;
pub mod walker;

/// Maximum number of bytes read from a single file.
pub const DEFAULT_READ_LIMIT: usize = 1_000_000;
/// Cap applied to both `llm_hits` and `sensitive_hits`.
pub const MAX_TERM_HITS: usize = 50;
/// Cap applied to `data_files`.
pub const MAX_DATA_FILES: usize = 100;

/// Vocabulary of LLM-technology terms, in match-reporting order.
pub const LLM_TERMS: &[&str] = &[
    "transformers",
    "langchain",
    "openai",
    "anthropic",
    "gpt-",
    "llama",
    "mistral",
    "vllm",
    "llama.cpp",
    "llm",
    "rag",
    "prompt",
    "chain of thought",
];

/// Vocabulary of sensitive-domain terms, in match-reporting order.
pub const SENSITIVE_TERMS: &[&str] = &[
    "biometric",
    "employment",
    "recruit",
    "credit scoring",
    "lending",
    "admission",
    "education",
    "medical diagnosis",
    "critical infrastructure",
    "law enforcement",
    "border control",
    "facial recognition",
    "social scoring",
];

/// Suffixes (matched case-insensitively against the relative path) marking data files.
pub const DATA_EXTENSIONS: &[&str] = &[".csv", ".json", ".parquet", ".tsv", ".xlsx"];

/// File extensions whose content is read and matched against the vocabularies.
pub const TEXT_EXTENSIONS: &[&str] = &[
    "py", "md", "txt", "toml", "json", "yaml", "yml", "js", "ts",
];

/// A vocabulary term found in a file, serialized as `[relative_path, term]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit(pub String, pub String);

impl Hit {
    pub fn new(path: impl Into<String>, term: impl Into<String>) -> Self {
        Self(path.into(), term.into())
    }

    pub fn path(&self) -> &str {
        &self.0
    }

    pub fn term(&self) -> &str {
        &self.1
    }
}

/// Structural facts about the scanned repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoMetadata {
    pub repo_name: String,
    pub files_count: usize,
    pub bytes: u64,
    pub has_readme: bool,
    /// SHA-256 of the first walked file, `None` for an empty repository.
    pub hash_sample: Option<String>,
}

/// Heuristic signals gathered from file contents and names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Detections {
    pub llm_detected: bool,
    pub llm_hits: Vec<Hit>,
    pub sensitive_hits: Vec<Hit>,
    pub data_files: Vec<String>,
    pub license_present: bool,
}

/// Tunables for a repository scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOptions {
    /// Descend into dot-prefixed files and directories.
    pub include_hidden: bool,
    pub read_limit: usize,
    /// Individual files left out of the walk (e.g. artifacts of a previous bundle).
    pub skip_files: Vec<PathBuf>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            include_hidden: false,
            read_limit: DEFAULT_READ_LIMIT,
            skip_files: Vec::new(),
        }
    }
}

/// Errors caused by invalid scan input. Per-file access problems never surface here.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("repo path not found: {}", .0.display())]
    RepoNotFound(PathBuf),
    #[error("repo path not found: {}", .0.display())]
    NotADirectory(PathBuf),
}
