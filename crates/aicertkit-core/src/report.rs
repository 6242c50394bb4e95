use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::checklist::OwaspLlmChecks;
use crate::scanner::{Detections, RepoMetadata};
use crate::triage::AiActAssessment;

/// Everything one scan produced, consumed by the bundle renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub metadata: RepoMetadata,
    pub detections: Detections,
    pub ai_act: AiActAssessment,
    pub owasp_llm: OwaspLlmChecks,
    /// ISO-8601 UTC, microsecond precision, `Z` suffix.
    pub generated: String,
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}
