use crate::report::Report;

/// Characters that force a scalar to be double-quoted.
const QUOTE_TRIGGERS: &[char] = &[
    ':', '#', '-', '{', '}', '[', ']', ',', '&', '*', '?', '|', '>', '%', '@', '!', '\n', '\r',
    '\t',
];

const NOTES_LINE: &str = "notes: \"Heuristic triage. Review with your compliance team.\"";

/// Quote `value` when it contains a YAML indicator; only `"` is escaped.
pub fn yaml_escape(value: &str) -> String {
    if value.contains(QUOTE_TRIGGERS) {
        format!("\"{}\"", value.replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

/// Render `risk.yaml`: header scalars, one block entry per obligation, trailing note.
pub fn render_risk_yaml(report: &Report) -> String {
    let ai_act = &report.ai_act;
    let mut lines = vec![
        format!("generated: {}", yaml_escape(&report.generated)),
        format!("repo: {}", yaml_escape(&report.metadata.repo_name)),
        format!("risk_level: {}", yaml_escape(ai_act.risk_level.as_str())),
        "obligations:".to_string(),
    ];
    for ob in &ai_act.obligations {
        lines.push(format!("  - id: {}", yaml_escape(&ob.id)));
        lines.push(format!("    name: {}", yaml_escape(&ob.name)));
        lines.push(format!("    severity: {}", yaml_escape(ob.severity.as_str())));
        lines.push(format!("    applies: {}", ob.applies));
        lines.push(format!("    status: {}", yaml_escape(ob.status.as_str())));
    }
    lines.push(NOTES_LINE.to_string());
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
