use serde::{Deserialize, Serialize};

use crate::scanner::{Detections, Hit};

/// OWASP Top 10 for LLM applications, in output order.
pub const OWASP_LLM_TOP10: [(&str, &str); 10] = [
    ("LLM01", "Prompt Injection"),
    ("LLM02", "Insecure Output Handling"),
    ("LLM03", "Training Data Poisoning"),
    ("LLM04", "Model Denial of Service"),
    ("LLM05", "Supply Chain Vulnerabilities"),
    ("LLM06", "Sensitive Information Disclosure"),
    ("LLM07", "Insecure Plugin/Tool Design"),
    ("LLM08", "Excessive Agency"),
    ("LLM09", "Overreliance"),
    ("LLM10", "Model Theft"),
];

/// Item that fails on any sensitive-domain hit.
pub const SENSITIVE_DISCLOSURE: &str = "LLM06";
pub const MAX_EVIDENCE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckStatus {
    #[serde(rename = "n/a")]
    NotApplicable,
    #[serde(rename = "warn")]
    Warn,
    #[serde(rename = "fail")]
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub name: String,
    pub applicable: bool,
    pub status: CheckStatus,
    pub evidence: Vec<Hit>,
}

/// Serialized as the `owasp_llm_checks.json` artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwaspLlmChecks {
    pub checks: Vec<ChecklistItem>,
}

pub fn evaluate(detections: &Detections) -> OwaspLlmChecks {
    let applicable = detections.llm_detected;
    let checks = OWASP_LLM_TOP10
        .iter()
        .map(|(id, name)| {
            let (status, evidence) = if *id == SENSITIVE_DISCLOSURE
                && !detections.sensitive_hits.is_empty()
            {
                (CheckStatus::Fail, first_evidence(&detections.sensitive_hits))
            } else if applicable {
                (CheckStatus::Warn, first_evidence(&detections.llm_hits))
            } else {
                (CheckStatus::NotApplicable, Vec::new())
            };
            ChecklistItem {
                id: (*id).to_string(),
                name: (*name).to_string(),
                applicable,
                status,
                evidence,
            }
        })
        .collect();
    OwaspLlmChecks { checks }
}

fn first_evidence(hits: &[Hit]) -> Vec<Hit> {
    hits.iter().take(MAX_EVIDENCE).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hits(n: usize, term: &str) -> Vec<Hit> {
        (0..n).map(|i| Hit::new(format!("f{i}.py"), term)).collect()
    }

    fn item<'a>(checks: &'a OwaspLlmChecks, id: &str) -> &'a ChecklistItem {
        checks.checks.iter().find(|c| c.id == id).unwrap()
    }

    #[test]
    fn always_ten_items_in_order() {
        for detections in [
            Detections::default(),
            Detections {
                llm_detected: true,
                llm_hits: hits(3, "llm"),
                sensitive_hits: hits(2, "lending"),
                ..Detections::default()
            },
        ] {
            let ids: Vec<_> = evaluate(&detections)
                .checks
                .into_iter()
                .map(|c| c.id)
                .collect();
            let expected: Vec<_> = (1..=10).map(|i| format!("LLM{i:02}")).collect();
            assert_eq!(ids, expected);
        }
    }

    #[test]
    fn no_llm_means_not_applicable() {
        let checks = evaluate(&Detections::default());
        assert!(checks
            .checks
            .iter()
            .all(|c| !c.applicable && c.status == CheckStatus::NotApplicable && c.evidence.is_empty()));
    }

    #[test]
    fn llm_hits_warn_with_capped_evidence() {
        let detections = Detections {
            llm_detected: true,
            llm_hits: hits(25, "openai"),
            ..Detections::default()
        };
        let checks = evaluate(&detections);
        let first = item(&checks, "LLM01");
        assert!(first.applicable);
        assert_eq!(first.status, CheckStatus::Warn);
        assert_eq!(first.evidence, hits(10, "openai"));
        assert_eq!(item(&checks, "LLM06").status, CheckStatus::Warn);
    }

    #[test]
    fn sensitive_hits_fail_disclosure_even_without_llm() {
        let detections = Detections {
            sensitive_hits: hits(12, "biometric"),
            ..Detections::default()
        };
        let checks = evaluate(&detections);
        let disclosure = item(&checks, SENSITIVE_DISCLOSURE);
        assert!(!disclosure.applicable);
        assert_eq!(disclosure.status, CheckStatus::Fail);
        assert_eq!(disclosure.evidence, hits(10, "biometric"));
        assert_eq!(item(&checks, "LLM05").status, CheckStatus::NotApplicable);
    }

    #[test]
    fn statuses_serialize_as_short_codes() {
        assert_eq!(
            serde_json::to_value(CheckStatus::NotApplicable).unwrap(),
            serde_json::json!("n/a")
        );
        assert_eq!(
            serde_json::to_value(CheckStatus::Fail).unwrap(),
            serde_json::json!("fail")
        );
    }
}
