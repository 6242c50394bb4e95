use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::{debug, instrument};

use crate::report::Report;

pub mod cards;
pub mod risk_yaml;

pub use cards::{render_data_card, render_model_card};
pub use risk_yaml::{render_risk_yaml, yaml_escape};

pub const MODEL_CARD: &str = "model_card.md";
pub const DATA_CARD: &str = "data_card.md";
pub const RISK_YAML: &str = "risk.yaml";
pub const OWASP_CHECKS: &str = "owasp_llm_checks.json";

/// File names of every artifact, in write order.
pub const ARTIFACTS: [&str; 4] = [MODEL_CARD, DATA_CARD, RISK_YAML, OWASP_CHECKS];

/// Default bundle directory name, created inside the scanned repository.
pub const DEFAULT_BUNDLE_DIR: &str = "compliance_bundle";

/// A file written by [`render_bundle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifact {
    pub name: &'static str,
    pub path: PathBuf,
}

/// Paths the bundle occupies inside `out_dir`. A scan skips exactly these
/// files so a previous bundle never feeds back into the next one.
pub fn artifact_paths(out_dir: &Path) -> Vec<PathBuf> {
    ARTIFACTS.iter().map(|name| out_dir.join(name)).collect()
}

/// Pretty-printed (two-space) checklist JSON, without a trailing newline.
pub fn render_owasp_checks(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(&report.owasp_llm).context("failed to serialize OWASP checks")
}

/// Write the four bundle artifacts into `out_dir`, creating it as needed.
///
/// Artifacts are written one after another; a failure leaves earlier files in place.
#[instrument(skip_all, fields(out_dir = %out_dir.display()))]
pub fn render_bundle(report: &Report, out_dir: &Path) -> Result<Vec<WrittenArtifact>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create bundle directory {}", out_dir.display()))?;

    let documents = [
        (MODEL_CARD, render_model_card(report)),
        (DATA_CARD, render_data_card(report)),
        (RISK_YAML, render_risk_yaml(report)),
        (OWASP_CHECKS, render_owasp_checks(report)?),
    ];

    let mut written = Vec::with_capacity(documents.len());
    for (name, contents) in documents {
        let path = out_dir.join(name);
        fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        debug!(artifact = name, "wrote bundle artifact");
        written.push(WrittenArtifact { name, path });
    }
    Ok(written)
}
