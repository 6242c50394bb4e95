use std::{collections::HashSet, fmt};

use anyhow::Result as AnyResult;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::triage::RiskTier;

pub mod embedded;

/// Severity attached to an obligation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compliance requirement and the tiers that trigger it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obligation {
    /// Unique identifier (e.g. `RISK_MGMT`).
    pub id: String,
    pub name: String,
    pub severity: Severity,
    /// Tier tags; a single entry may hold alternatives separated by `|`.
    pub applies_if: Vec<String>,
}

impl Obligation {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        severity: Severity,
        applies_if: &[&str],
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            severity,
            applies_if: applies_if.iter().map(|tag| tag.to_string()).collect(),
        }
    }

    /// Whether `tier` equals any `|`-separated tag of any `applies_if` entry.
    pub fn applies_to(&self, tier: RiskTier) -> bool {
        self.applies_if
            .iter()
            .flat_map(|entry| entry.split('|'))
            .any(|tag| tag == tier.as_str())
    }
}

/// A versioned, ordered obligation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Semantic version carried into every report for auditing.
    pub version: String,
    pub categories: Vec<RiskTier>,
    pub obligations: Vec<Obligation>,
}

impl RuleSet {
    pub fn validate(&self) -> Result<(), RuleValidationError> {
        if self.version.trim().is_empty() {
            return Err(RuleValidationError::EmptyVersion);
        }
        let mut seen = HashSet::new();
        for obligation in &self.obligations {
            if obligation.id.trim().is_empty() {
                return Err(RuleValidationError::EmptyId);
            }
            if !seen.insert(obligation.id.as_str()) {
                return Err(RuleValidationError::DuplicateId {
                    id: obligation.id.clone(),
                });
            }
            for tag in obligation.applies_if.iter().flat_map(|e| e.split('|')) {
                if tag.parse::<RiskTier>().is_err() {
                    return Err(RuleValidationError::UnknownTier {
                        id: obligation.id.clone(),
                        tag: tag.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Errors emitted while validating a rule table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleValidationError {
    #[error("rule table version must not be blank")]
    EmptyVersion,
    #[error("obligation id must not be blank")]
    EmptyId,
    #[error("duplicate obligation id `{id}`")]
    DuplicateId { id: String },
    #[error("obligation `{id}` references unknown tier `{tag}`")]
    UnknownTier { id: String, tag: String },
}

/// Source of the active rule table, so the embedded default can be swapped
/// for another backend without touching the scanner.
pub trait RuleRepository: Send + Sync {
    fn load_rules(&self) -> AnyResult<RuleSet>;
}
