pub mod bundle;
pub mod checklist;
pub mod report;
pub mod rules;
pub mod scanner;
pub mod triage;

pub use bundle::{artifact_paths, render_bundle, WrittenArtifact, DEFAULT_BUNDLE_DIR};
pub use checklist::{CheckStatus, ChecklistItem, OwaspLlmChecks};
pub use report::Report;
pub use rules::{
    embedded::EmbeddedRuleRepository, Obligation, RuleRepository, RuleSet, RuleValidationError,
    Severity,
};
pub use scanner::{
    repo_scanner::RepoScanner, walker::FileWalker, Detections, Hit, RepoMetadata, ScanError,
    ScanOptions,
};
pub use triage::{AiActAssessment, ObligationState, ObligationStatus, RiskTier};
