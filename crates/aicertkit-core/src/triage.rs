use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::rules::{RuleSet, Severity};
use crate::scanner::Detections;

/// Sensitive term that makes a repository `prohibited` outright.
pub const SOCIAL_SCORING: &str = "social scoring";

/// Regulatory risk classification assigned to a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Prohibited,
    HighRisk,
    LimitedRisk,
    MinimalRisk,
    Gpai,
}

impl RiskTier {
    pub const ALL: [RiskTier; 5] = [
        Self::Prohibited,
        Self::HighRisk,
        Self::LimitedRisk,
        Self::MinimalRisk,
        Self::Gpai,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prohibited => "prohibited",
            Self::HighRisk => "high_risk",
            Self::LimitedRisk => "limited_risk",
            Self::MinimalRisk => "minimal_risk",
            Self::Gpai => "gpai",
        }
    }

    /// First matching rule wins: social scoring, any sensitive hit, any LLM
    /// hit, otherwise minimal.
    pub fn classify(detections: &Detections) -> Self {
        if detections
            .sensitive_hits
            .iter()
            .any(|hit| hit.term().contains(SOCIAL_SCORING))
        {
            Self::Prohibited
        } else if !detections.sensitive_hits.is_empty() {
            Self::HighRisk
        } else if detections.llm_detected {
            Self::Gpai
        } else {
            Self::MinimalRisk
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown risk tier `{0}`")]
pub struct ParseRiskTierError(pub String);

impl FromStr for RiskTier {
    type Err = ParseRiskTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str() == s)
            .ok_or_else(|| ParseRiskTierError(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObligationState {
    #[serde(rename = "todo")]
    Todo,
    #[serde(rename = "n/a")]
    NotApplicable,
}

impl ObligationState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::NotApplicable => "n/a",
        }
    }
}

/// An obligation evaluated against the computed tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObligationStatus {
    pub id: String,
    pub name: String,
    pub severity: Severity,
    pub applies: bool,
    pub status: ObligationState,
}

/// AI Act section of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiActAssessment {
    pub rules_version: String,
    pub risk_level: RiskTier,
    pub obligations: Vec<ObligationStatus>,
}

/// Classify `detections` and expand every obligation of `rules`, keeping table order.
pub fn assess(detections: &Detections, rules: &RuleSet) -> AiActAssessment {
    let risk_level = RiskTier::classify(detections);
    let obligations: Vec<_> = rules
        .obligations
        .iter()
        .map(|ob| {
            let applies = ob.applies_to(risk_level);
            ObligationStatus {
                id: ob.id.clone(),
                name: ob.name.clone(),
                severity: ob.severity,
                applies,
                status: if applies {
                    ObligationState::Todo
                } else {
                    ObligationState::NotApplicable
                },
            }
        })
        .collect();
    debug!(
        %risk_level,
        applicable = obligations.iter().filter(|o| o.applies).count(),
        "triage completed"
    );
    AiActAssessment {
        rules_version: rules.version.clone(),
        risk_level,
        obligations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{embedded::EmbeddedRuleRepository, RuleRepository};
    use crate::scanner::{Hit, LLM_TERMS, SENSITIVE_TERMS};
    use proptest::prelude::*;

    fn detections(llm: &[&str], sensitive: &[&str]) -> Detections {
        let llm_hits: Vec<_> = llm.iter().map(|t| Hit::new("src/app.py", *t)).collect();
        Detections {
            llm_detected: !llm_hits.is_empty(),
            llm_hits,
            sensitive_hits: sensitive
                .iter()
                .map(|t| Hit::new("src/app.py", *t))
                .collect(),
            ..Detections::default()
        }
    }

    fn status<'a>(assessment: &'a AiActAssessment, id: &str) -> &'a ObligationStatus {
        assessment
            .obligations
            .iter()
            .find(|o| o.id == id)
            .unwrap_or_else(|| panic!("obligation {id} missing"))
    }

    #[test]
    fn no_signals_is_minimal_risk() {
        assert_eq!(
            RiskTier::classify(&Detections::default()),
            RiskTier::MinimalRisk
        );
    }

    #[test]
    fn gpai_marks_training_data_summary_todo() {
        let rules = EmbeddedRuleRepository.load_rules().unwrap();
        let assessment = assess(&detections(&["transformers"], &[]), &rules);
        assert_eq!(assessment.risk_level, RiskTier::Gpai);
        assert_eq!(assessment.rules_version, "0.1.0");
        let ob = status(&assessment, "TRAIN_DATA_SUM");
        assert!(ob.applies);
        assert_eq!(ob.status, ObligationState::Todo);
        assert!(!status(&assessment, "RECORDS").applies);
    }

    #[test]
    fn prohibited_triggers_no_obligation() {
        let rules = EmbeddedRuleRepository.load_rules().unwrap();
        let assessment = assess(
            &detections(&["llm"], &["facial recognition", "social scoring"]),
            &rules,
        );
        assert_eq!(assessment.risk_level, RiskTier::Prohibited);
        let risk_mgmt = status(&assessment, "RISK_MGMT");
        assert!(!risk_mgmt.applies);
        assert_eq!(risk_mgmt.status, ObligationState::NotApplicable);
        assert!(assessment.obligations.iter().all(|o| !o.applies));
    }

    #[test]
    fn high_risk_applies_high_risk_obligations_in_table_order() {
        let rules = EmbeddedRuleRepository.load_rules().unwrap();
        let assessment = assess(&detections(&[], &["employment"]), &rules);
        assert_eq!(assessment.risk_level, RiskTier::HighRisk);
        let ids: Vec<_> = assessment.obligations.iter().map(|o| o.id.as_str()).collect();
        let expected: Vec<_> = rules.obligations.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, expected);
        assert!(status(&assessment, "HUMAN_OVERSIGHT").applies);
        assert!(!status(&assessment, "SYSTEMIC_RISK").applies);
    }

    #[test]
    fn tier_round_trips_through_str() {
        for tier in RiskTier::ALL {
            assert_eq!(tier.as_str().parse::<RiskTier>(), Ok(tier));
        }
        assert!("medium".parse::<RiskTier>().is_err());
    }

    fn term_subset(terms: &'static [&'static str]) -> impl Strategy<Value = Vec<&'static str>> {
        proptest::sample::subsequence(terms.to_vec(), 0..=terms.len())
    }

    proptest! {
        #[test]
        fn social_scoring_always_prohibited(llm in term_subset(LLM_TERMS), other in term_subset(SENSITIVE_TERMS)) {
            let mut sensitive = other;
            sensitive.push(SOCIAL_SCORING);
            prop_assert_eq!(RiskTier::classify(&detections(&llm, &sensitive)), RiskTier::Prohibited);
        }

        #[test]
        fn sensitive_without_social_scoring_is_high_risk(
            llm in term_subset(LLM_TERMS),
            sensitive in term_subset(&SENSITIVE_TERMS[..SENSITIVE_TERMS.len() - 1])
                .prop_filter("need a sensitive hit", |s| !s.is_empty())
        ) {
            prop_assert_eq!(RiskTier::classify(&detections(&llm, &sensitive)), RiskTier::HighRisk);
        }

        #[test]
        fn llm_only_is_gpai(llm in term_subset(LLM_TERMS).prop_filter("need an llm hit", |l| !l.is_empty())) {
            prop_assert_eq!(RiskTier::classify(&detections(&llm, &[])), RiskTier::Gpai);
        }
    }
}
