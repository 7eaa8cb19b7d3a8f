//! Claims Types - the shared data model for case analysis
#![deny(unsafe_code)]

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A citation-bearing fragment of policy or regulatory text eligible for
/// retrieval. Part of the read-only knowledge table; `keywords` are stored
/// lowercase and exist only for retrieval matching.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicyExcerpt {
    pub id: u32,
    pub source_document: String,
    pub page: u32,
    pub paragraph: u32,
    pub content: String,
    pub keywords: Vec<String>,
    pub category: ExcerptCategory,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExcerptCategory {
    Policy,
    Sop,
    Regulation,
    Compliance,
}

impl std::fmt::Display for ExcerptCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExcerptCategory::Policy => write!(f, "policy"),
            ExcerptCategory::Sop => write!(f, "sop"),
            ExcerptCategory::Regulation => write!(f, "regulation"),
            ExcerptCategory::Compliance => write!(f, "compliance"),
        }
    }
}

/// A past claim decision and its eventual outcome. Part of the read-only
/// decision history table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoricalCase {
    pub case_type: String,
    pub jurisdiction: String,
    pub claim_amount: f64,
    pub decision_made: String,
    pub outcome: CaseOutcome,
    pub days_to_resolve: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    pub recorded_at: NaiveDate,
}

/// The recorded outcome of a historical case. The outcome set is open, but
/// two exact strings mark a failed review and are the only values the memory
/// analyzer counts as failures.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseOutcome(pub String);

impl CaseOutcome {
    pub const APPROVED: &'static str = "Approved";
    pub const REJECTED_BY_MANAGER: &'static str = "Rejected by manager";
    pub const AUDIT_FAILURE: &'static str = "Audit failure";

    pub fn new(outcome: impl Into<String>) -> Self {
        Self(outcome.into())
    }

    pub fn approved() -> Self {
        Self(Self::APPROVED.to_string())
    }

    pub fn rejected_by_manager() -> Self {
        Self(Self::REJECTED_BY_MANAGER.to_string())
    }

    pub fn audit_failure() -> Self {
        Self(Self::AUDIT_FAILURE.to_string())
    }

    /// Exact, case-sensitive match against the two failure outcomes.
    /// Differently worded rejections are not recognized.
    pub fn is_failure(&self) -> bool {
        self.0 == Self::REJECTED_BY_MANAGER || self.0 == Self::AUDIT_FAILURE
    }
}

impl std::fmt::Display for CaseOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A policy excerpt paired with its per-query match score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankedExcerpt {
    pub excerpt: PolicyExcerpt,
    pub match_score: u32,
}

/// Aggregate statistics over historical cases similar to the one under
/// review. Recomputed per analysis request, never persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemorySummary {
    pub total_cases: u32,
    pub failed_cases: u32,
    /// Percentage 0-100, rounded to the nearest integer.
    pub failure_rate: u32,
    /// Mean days to resolve across similar cases, one decimal. Zero when
    /// there are no similar cases.
    pub avg_resolution_days: f64,
    /// Issue texts with occurrence counts, most frequent first. Ties keep
    /// encounter order.
    pub issue_frequency: Vec<IssueCount>,
}

impl MemorySummary {
    /// The all-zero summary produced when no similar cases exist.
    pub fn empty() -> Self {
        Self {
            total_cases: 0,
            failed_cases: 0,
            failure_rate: 0,
            avg_resolution_days: 0.0,
            issue_frequency: vec![],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IssueCount {
    pub issue: String,
    pub count: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Impact::Low => write!(f, "Low"),
            Impact::Medium => write!(f, "Medium"),
            Impact::High => write!(f, "High"),
        }
    }
}

/// One contributing reason a review decision may later be regretted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub description: String,
    pub impact: Impact,
    /// Likelihood 0-100 that this factor leads to a reversal or flag.
    pub probability: u8,
}

/// Severity bucket derived from the regret score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskTier {
    Moderate,
    High,
    Critical,
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskTier::Moderate => write!(f, "MODERATE"),
            RiskTier::High => write!(f, "HIGH"),
            RiskTier::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// The composite risk estimate for the case under review. Factors appear in
/// the order their rules fired.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Regret score 0-100 (contributions are summed, then capped).
    pub score: u8,
    pub tier: RiskTier,
    pub factors: Vec<RiskFactor>,
}

/// The claim amount as supplied by the caller. The presentation layer hands
/// over whatever the form held, so the amount arrives as a number or as raw
/// text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountField {
    Number(f64),
    Text(String),
}

impl AmountField {
    /// Numeric value of the amount. Text that does not parse as a float
    /// yields NaN, so every numeric comparison downstream is false.
    pub fn as_f64(&self) -> f64 {
        match self {
            AmountField::Number(n) => *n,
            AmountField::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
        }
    }

    /// Textual form of the amount, as used when building retrieval queries.
    pub fn display(&self) -> String {
        match self {
            AmountField::Number(n) => n.to_string(),
            AmountField::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for AmountField {
    fn from(n: f64) -> Self {
        AmountField::Number(n)
    }
}

impl From<u32> for AmountField {
    fn from(n: u32) -> Self {
        AmountField::Number(n.into())
    }
}

impl From<&str> for AmountField {
    fn from(s: &str) -> Self {
        AmountField::Text(s.to_string())
    }
}

impl From<String> for AmountField {
    fn from(s: String) -> Self {
        AmountField::Text(s)
    }
}

/// The three scalar inputs a caller supplies for one analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaseInput {
    pub claim_type: String,
    pub jurisdiction: String,
    pub amount: AmountField,
}

impl CaseInput {
    pub fn new(
        claim_type: impl Into<String>,
        jurisdiction: impl Into<String>,
        amount: impl Into<AmountField>,
    ) -> Self {
        Self {
            claim_type: claim_type.into(),
            jurisdiction: jurisdiction.into(),
            amount: amount.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportId(pub String);

impl ReportId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for ReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
