use anyhow::Result;
use once_cell::sync::Lazy;

use super::{Obligation, RuleRepository, RuleSet, Severity};
use crate::triage::RiskTier;

pub const DEFAULT_RULES_VERSION: &str = "0.1.0";

static DEFAULT_RULES: Lazy<RuleSet> = Lazy::new(|| RuleSet {
    version: DEFAULT_RULES_VERSION.to_string(),
    categories: RiskTier::ALL.to_vec(),
    obligations: vec![
        Obligation::new(
            "RISK_MGMT",
            "Risk management process documented",
            Severity::High,
            &["high_risk|gpai"],
        ),
        Obligation::new(
            "DATA_GOV",
            "Data governance + lineage documented",
            Severity::High,
            &["high_risk|gpai"],
        ),
        Obligation::new(
            "TECH_DOC",
            "Technical documentation prepared",
            Severity::High,
            &["high_risk|gpai"],
        ),
        Obligation::new(
            "RECORDS",
            "Logging & traceability implemented",
            Severity::Medium,
            &["high_risk"],
        ),
        Obligation::new(
            "TRANSPARENCY",
            "User transparency & labeling of AI output",
            Severity::Medium,
            &["high_risk", "limited_risk", "gpai"],
        ),
        Obligation::new(
            "HUMAN_OVERSIGHT",
            "Human oversight defined",
            Severity::High,
            &["high_risk"],
        ),
        Obligation::new(
            "ACCURACY",
            "Accuracy metrics & evaluation documented",
            Severity::High,
            &["high_risk|gpai"],
        ),
        Obligation::new(
            "ROBUSTNESS",
            "Robustness & cybersecurity controls",
            Severity::High,
            &["high_risk|gpai"],
        ),
        Obligation::new(
            "POST_MARKET",
            "Post-market monitoring plan",
            Severity::Medium,
            &["high_risk"],
        ),
        Obligation::new(
            "TRAIN_DATA_SUM",
            "Training data summary for GPAI",
            Severity::Medium,
            &["gpai"],
        ),
        Obligation::new(
            "SYSTEMIC_RISK",
            "Systemic risk assessment (if applicable)",
            Severity::High,
            &["gpai"],
        ),
    ],
});

/// Serves the rule table compiled into the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedRuleRepository;

impl RuleRepository for EmbeddedRuleRepository {
    fn load_rules(&self) -> Result<RuleSet> {
        Ok(DEFAULT_RULES.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_table_is_valid() {
        let rules = EmbeddedRuleRepository.load_rules().unwrap();
        rules.validate().expect("embedded rules must validate");
        assert_eq!(rules.version, DEFAULT_RULES_VERSION);
        assert_eq!(rules.obligations.len(), 11);
        assert_eq!(rules.obligations[0].id, "RISK_MGMT");
        assert_eq!(rules.obligations[10].id, "SYSTEMIC_RISK");
    }

    // No obligation names `prohibited`, so that tier triggers nothing.
    #[test]
    fn no_embedded_obligation_targets_prohibited() {
        let rules = EmbeddedRuleRepository.load_rules().unwrap();
        assert!(rules
            .obligations
            .iter()
            .all(|ob| !ob.applies_to(RiskTier::Prohibited)));
    }
}
