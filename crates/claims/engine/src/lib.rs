//! Claims Engine - the case analysis facade
//!
//! Wires the knowledge catalog, the decision history, and the risk scorer
//! into a single call: the caller supplies a case input and the current
//! local hour and receives ranked excerpts, a memory summary, and a risk
//! assessment. The three analytical operations are pure; this crate only
//! adds report decoration, table loading, and tracing.

#![deny(unsafe_code)]

pub mod tables;

use chrono::{DateTime, Utc};
use claims_knowledge::KnowledgeStore;
use claims_memory::DecisionHistory;
use claims_risk::RiskScorer;
use claims_types::{
    CaseInput, MemorySummary, RankedExcerpt, ReportId, RiskAssessment,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Regret score above which recommended actions are attached.
const ACTION_THRESHOLD: u8 = 50;

/// The analysis facade over the two read-only tables and the scorer.
///
/// Stores are injected at construction so a deployment can substitute a
/// document repository and a case-management system without touching the
/// analysis itself. The analyzer holds no mutable state and is safe to call
/// from many threads.
pub struct CaseAnalyzer {
    knowledge: KnowledgeStore,
    history: DecisionHistory,
    scorer: RiskScorer,
}

impl CaseAnalyzer {
    pub fn new(knowledge: KnowledgeStore, history: DecisionHistory, scorer: RiskScorer) -> Self {
        Self {
            knowledge,
            history,
            scorer,
        }
    }

    /// An analyzer over the built-in sample tables with default scoring.
    pub fn with_defaults() -> Self {
        Self::new(
            KnowledgeStore::with_defaults(),
            DecisionHistory::with_defaults(),
            RiskScorer::default(),
        )
    }

    pub fn knowledge(&self) -> &KnowledgeStore {
        &self.knowledge
    }

    pub fn history(&self) -> &DecisionHistory {
        &self.history
    }

    /// Rank the catalog excerpts against this case.
    pub fn retrieve_knowledge(&self, input: &CaseInput) -> Vec<RankedExcerpt> {
        self.knowledge.retrieve(input)
    }

    /// Summarize how similar past cases were judged.
    pub fn analyze_memory(&self, input: &CaseInput) -> MemorySummary {
        self.history.analyze(input)
    }

    /// Score this case against a memory summary already computed for it.
    pub fn assess_risk(
        &self,
        input: &CaseInput,
        memory: &MemorySummary,
        clock_hour: u8,
    ) -> RiskAssessment {
        self.scorer.score(input, memory, clock_hour)
    }

    /// Run the full analysis for one case.
    ///
    /// The memory summary is computed once and shared with the risk scorer.
    /// `clock_hour` is the caller's current local hour (0-23); it is a
    /// parameter so repeated calls with the same inputs yield the same
    /// factors.
    pub fn analyze(&self, input: &CaseInput, clock_hour: u8) -> CaseReport {
        debug!(
            claim_type = %input.claim_type,
            jurisdiction = %input.jurisdiction,
            "analyzing case"
        );

        let knowledge = self.knowledge.retrieve(input);
        let memory = self.history.analyze(input);
        let risk = self.scorer.score(input, &memory, clock_hour);
        let recommended_actions = recommended_actions(&risk);

        info!(
            excerpts = knowledge.len(),
            similar_cases = memory.total_cases,
            score = risk.score,
            tier = %risk.tier,
            "case analysis complete"
        );

        CaseReport {
            report_id: ReportId::generate(),
            knowledge,
            memory,
            risk,
            recommended_actions,
            generated_at: Utc::now(),
        }
    }
}

impl Default for CaseAnalyzer {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Everything one analysis produced, ready for the caller to render.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaseReport {
    pub report_id: ReportId,
    pub knowledge: Vec<RankedExcerpt>,
    pub memory: MemorySummary,
    pub risk: RiskAssessment,
    /// Present only when the score warrants reviewer action.
    pub recommended_actions: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

/// Reviewer actions suggested when the regret score exceeds the action
/// threshold.
pub fn recommended_actions(risk: &RiskAssessment) -> Vec<String> {
    if risk.score > ACTION_THRESHOLD {
        vec![
            "Request secondary inspection before approval".to_string(),
            "Reduce claim amount to company maximum ($250K)".to_string(),
            "Escalate to regional manager for review".to_string(),
        ]
    } else {
        vec![]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims_types::RiskTier;

    #[test]
    fn scenario_flood_florida_280k_morning() {
        let analyzer = CaseAnalyzer::with_defaults();
        let input = CaseInput::new("Flood", "Florida", 280_000.0);

        let report = analyzer.analyze(&input, 10);

        // Both amount rules fire; the history rule does not (25% < 50%),
        // nor does the end-of-day rule at hour 10.
        assert_eq!(report.risk.score, 65);
        assert_eq!(report.risk.tier, RiskTier::High);
        assert_eq!(report.risk.factors.len(), 2);

        assert_eq!(report.memory.total_cases, 4);
        assert_eq!(report.memory.failed_cases, 1);
        assert_eq!(report.memory.failure_rate, 25);

        assert!(!report.knowledge.is_empty());
        assert!(report.knowledge.len() <= claims_knowledge::MAX_RESULTS);
        assert_eq!(report.knowledge[0].excerpt.id, 1);

        // Score 65 exceeds the action threshold.
        assert_eq!(report.recommended_actions.len(), 3);
    }

    #[test]
    fn scenario_storm_texas_100k_is_quiet() {
        let analyzer = CaseAnalyzer::with_defaults();
        let input = CaseInput::new("Storm", "Texas", 100_000.0);

        let report = analyzer.analyze(&input, 10);

        assert!(report.knowledge.is_empty());
        assert_eq!(report.memory.total_cases, 0);
        assert_eq!(report.memory.failure_rate, 0);
        assert!(report.risk.factors.is_empty());
        assert_eq!(report.risk.score, 0);
        assert_eq!(report.risk.tier, RiskTier::Moderate);
        assert!(report.recommended_actions.is_empty());
    }

    #[test]
    fn scenario_non_numeric_amount_only_time_rule_applies() {
        let analyzer = CaseAnalyzer::with_defaults();
        let input = CaseInput::new("Flood", "Florida", "abc");

        let morning = analyzer.analyze(&input, 9);
        assert_eq!(morning.memory.total_cases, 0);
        assert!(morning.risk.factors.is_empty());

        let evening = analyzer.analyze(&input, 16);
        assert_eq!(evening.risk.factors.len(), 1);
        assert_eq!(evening.risk.score, 10);
    }

    #[test]
    fn analysis_is_idempotent_for_fixed_inputs() {
        let analyzer = CaseAnalyzer::with_defaults();
        let input = CaseInput::new("Flood", "Florida", 280_000.0);

        let first = analyzer.analyze(&input, 10);
        let second = analyzer.analyze(&input, 10);

        // Report ids and timestamps differ; the analytical results do not.
        assert_eq!(first.knowledge, second.knowledge);
        assert_eq!(first.memory, second.memory);
        assert_eq!(first.risk, second.risk);
        assert_ne!(first.report_id, second.report_id);
    }

    #[test]
    fn end_of_day_pushes_borderline_case_over() {
        let analyzer = CaseAnalyzer::with_defaults();
        let input = CaseInput::new("Flood", "Florida", 280_000.0);

        let report = analyzer.analyze(&input, 16);
        assert_eq!(report.risk.score, 75);
        assert_eq!(report.risk.tier, RiskTier::Critical);
        assert_eq!(report.risk.factors.len(), 3);
    }

    #[test]
    fn report_serializes_to_json() {
        let analyzer = CaseAnalyzer::with_defaults();
        let report = analyzer.analyze(&CaseInput::new("Flood", "Florida", 280_000.0), 10);

        let json = serde_json::to_string(&report).expect("report serializes");
        assert!(json.contains("\"score\":65"));
        assert!(json.contains("Amount exceeds company maximum"));
    }

    #[test]
    fn recommended_actions_threshold_is_strict() {
        let mid = RiskAssessment {
            score: 50,
            tier: RiskTier::High,
            factors: vec![],
        };
        assert!(recommended_actions(&mid).is_empty());

        let over = RiskAssessment {
            score: 51,
            tier: RiskTier::High,
            factors: vec![],
        };
        assert_eq!(recommended_actions(&over).len(), 3);
    }
}
