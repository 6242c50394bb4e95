use crate::report::Report;

/// Version stamped into generated model cards.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");
const DATA_PREVIEW_LEN: usize = 10;

pub fn render_model_card(report: &Report) -> String {
    let preview = report
        .detections
        .data_files
        .iter()
        .take(DATA_PREVIEW_LEN)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let data_summary = if preview.is_empty() {
        "None"
    } else {
        preview.as_str()
    };

    format!(
        "# Model Card: {repo}

**Version:** {version}
**Generated:** {generated}

## Overview
Auto-generated draft based on repository scan.

## Intended Use
To be filled by maintainers.

## Data Summary
Detected data files (heuristic): {data_summary}

## Evaluation
- Metrics: N/A
- Test data: N/A

## Risks & Limitations
Initial risk level (heuristic): {risk_level}
This card is a starting point; complete it with project-specific details.

## Ethical Considerations
Consider fairness, bias, and potential misuse.

## Security & Robustness
Document robustness, adversarial testing, and monitoring.

## Human Oversight
Describe human-in-the-loop mechanisms if any.
",
        repo = report.metadata.repo_name,
        version = TOOL_VERSION,
        generated = report.generated,
        risk_level = report.ai_act.risk_level,
    )
}

pub fn render_data_card(report: &Report) -> String {
    format!(
        "# Data Card: {repo}

**Generated:** {generated}

## Dataset Overview
Dataset(s) referenced in the repository (detected heuristically).

## Collection & Provenance
Describe data sources and consent/collection processes.

## Preprocessing
List cleaning, filtering, augmentation steps.

## Licensing & Usage
Specify dataset licenses and any restrictions.

## PII & Privacy
Document PII handling, anonymization, retention, deletion.

## Bias & Representativeness
Describe sampling and representativeness considerations.

## Quality & Validation
Mention validation, labeling QA, and known issues.

## Governance
Roles, approvals, change management, and access control.
",
        repo = report.metadata.repo_name,
        generated = report.generated,
    )
}
