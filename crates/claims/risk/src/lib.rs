//! Claims Risk - regret-aware risk scoring
//!
//! Combines static policy thresholds, the outcome history of similar cases,
//! and a time-of-day factor into a bounded regret score with the factors
//! that produced it. The clock hour is injected so scoring stays a pure,
//! testable function.

#![deny(unsafe_code)]

use claims_types::{CaseInput, Impact, MemorySummary, RiskAssessment, RiskFactor, RiskTier};
use serde::{Deserialize, Serialize};

/// Thresholds, weights, and probabilities behind the scoring rules.
///
/// The defaults are the observed domain constants; they are surfaced here so
/// a deployment can externalize them, not because they are expected to vary.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Company maximum payout; amounts above it fire the first rule.
    pub company_maximum: f64,
    /// Amounts above this require secondary inspection per policy.
    pub inspection_threshold: f64,
    /// Failure rate (percent) above which the history rule fires.
    pub failure_rate_trigger: u32,
    /// Local hour from which a decision counts as end-of-business-day.
    pub end_of_day_hour: u8,

    pub over_maximum_weight: u8,
    pub over_maximum_probability: u8,
    pub inspection_weight: u8,
    pub inspection_probability: u8,
    pub failed_history_weight: u8,
    pub end_of_day_weight: u8,
    pub end_of_day_probability: u8,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            company_maximum: 250_000.0,
            inspection_threshold: 200_000.0,
            failure_rate_trigger: 50,
            end_of_day_hour: 16,
            over_maximum_weight: 35,
            over_maximum_probability: 85,
            inspection_weight: 30,
            inspection_probability: 90,
            failed_history_weight: 25,
            end_of_day_weight: 10,
            end_of_day_probability: 45,
        }
    }
}

/// The regret-aware risk scorer.
pub struct RiskScorer {
    config: ScoringConfig,
}

impl RiskScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score the likelihood that approving this case will later be
    /// overturned or flagged.
    ///
    /// Rules are evaluated in a fixed order; each one that fires appends one
    /// factor and adds its weight. The amount rules are independent, so a
    /// sufficiently large amount fires both. The total is capped at 100 at
    /// the end; individual contributions are not. A non-numeric amount fails
    /// every numeric comparison, leaving only the time-of-day rule.
    pub fn score(
        &self,
        input: &CaseInput,
        memory: &MemorySummary,
        clock_hour: u8,
    ) -> RiskAssessment {
        let amount = input.amount.as_f64();
        let mut factors = vec![];
        let mut total: u32 = 0;

        if amount > self.config.company_maximum {
            factors.push(RiskFactor {
                description: "Amount exceeds company maximum ($250K)".to_string(),
                impact: Impact::High,
                probability: self.config.over_maximum_probability,
            });
            total += u32::from(self.config.over_maximum_weight);
        }

        if amount > self.config.inspection_threshold {
            factors.push(RiskFactor {
                description: "Requires secondary inspection per policy".to_string(),
                impact: Impact::High,
                probability: self.config.inspection_probability,
            });
            total += u32::from(self.config.inspection_weight);
        }

        if memory.failure_rate > self.config.failure_rate_trigger {
            factors.push(RiskFactor {
                description: format!(
                    "{}% of similar cases failed review",
                    memory.failure_rate
                ),
                impact: Impact::High,
                probability: memory.failure_rate.min(100) as u8,
            });
            total += u32::from(self.config.failed_history_weight);
        }

        if clock_hour >= self.config.end_of_day_hour {
            factors.push(RiskFactor {
                description: "Decision made near end of business day".to_string(),
                impact: Impact::Medium,
                probability: self.config.end_of_day_probability,
            });
            total += u32::from(self.config.end_of_day_weight);
        }

        let score = total.min(100) as u8;
        RiskAssessment {
            score,
            tier: tier_for(score),
            factors,
        }
    }
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

/// Severity bucket for a score. Boundaries are strict: 70 is HIGH, 40 is
/// MODERATE.
fn tier_for(score: u8) -> RiskTier {
    if score > 70 {
        RiskTier::Critical
    } else if score > 40 {
        RiskTier::High
    } else {
        RiskTier::Moderate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_history() -> MemorySummary {
        MemorySummary::empty()
    }

    fn failing_history(failure_rate: u32) -> MemorySummary {
        MemorySummary {
            total_cases: 4,
            failed_cases: 3,
            failure_rate,
            avg_resolution_days: 5.0,
            issue_frequency: vec![],
        }
    }

    #[test]
    fn over_maximum_amount_fires_first_rule() {
        let scorer = RiskScorer::default();
        let input = CaseInput::new("Flood", "Florida", 260_000.0);

        let assessment = scorer.score(&input, &no_history(), 10);

        // 260k exceeds both thresholds.
        assert_eq!(assessment.score, 65);
        assert_eq!(assessment.tier, RiskTier::High);
        assert_eq!(assessment.factors.len(), 2);
        assert_eq!(
            assessment.factors[0].description,
            "Amount exceeds company maximum ($250K)"
        );
        assert_eq!(assessment.factors[0].impact, Impact::High);
        assert_eq!(assessment.factors[0].probability, 85);
        assert_eq!(
            assessment.factors[1].description,
            "Requires secondary inspection per policy"
        );
    }

    #[test]
    fn inspection_rule_fires_alone_in_between_thresholds() {
        let scorer = RiskScorer::default();
        let input = CaseInput::new("Flood", "Florida", 210_000.0);

        let assessment = scorer.score(&input, &no_history(), 10);
        assert_eq!(assessment.score, 30);
        assert_eq!(assessment.tier, RiskTier::Moderate);
        assert_eq!(assessment.factors.len(), 1);
        assert_eq!(
            assessment.factors[0].description,
            "Requires secondary inspection per policy"
        );
    }

    #[test]
    fn failed_history_rule_uses_failure_rate_as_probability() {
        let scorer = RiskScorer::default();
        let input = CaseInput::new("Flood", "Florida", 100_000.0);

        let assessment = scorer.score(&input, &failing_history(75), 10);
        assert_eq!(assessment.score, 25);
        assert_eq!(assessment.factors.len(), 1);
        assert_eq!(
            assessment.factors[0].description,
            "75% of similar cases failed review"
        );
        assert_eq!(assessment.factors[0].probability, 75);
    }

    #[test]
    fn failure_rate_at_trigger_does_not_fire() {
        let scorer = RiskScorer::default();
        let input = CaseInput::new("Flood", "Florida", 100_000.0);

        let assessment = scorer.score(&input, &failing_history(50), 10);
        assert!(assessment.factors.is_empty());
        assert_eq!(assessment.score, 0);
    }

    #[test]
    fn end_of_day_rule_fires_from_sixteen_hundred() {
        let scorer = RiskScorer::default();
        let input = CaseInput::new("Flood", "Florida", 100_000.0);

        assert!(scorer.score(&input, &no_history(), 15).factors.is_empty());

        let assessment = scorer.score(&input, &no_history(), 16);
        assert_eq!(assessment.score, 10);
        assert_eq!(assessment.factors.len(), 1);
        assert_eq!(
            assessment.factors[0].description,
            "Decision made near end of business day"
        );
        assert_eq!(assessment.factors[0].impact, Impact::Medium);
        assert_eq!(assessment.factors[0].probability, 45);
    }

    #[test]
    fn all_rules_firing_caps_score_at_one_hundred() {
        let scorer = RiskScorer::default();
        let input = CaseInput::new("Flood", "Florida", 300_000.0);

        let assessment = scorer.score(&input, &failing_history(80), 17);
        assert_eq!(assessment.score, 100);
        assert_eq!(assessment.tier, RiskTier::Critical);
        assert_eq!(assessment.factors.len(), 4);
    }

    #[test]
    fn factors_fire_in_rule_order_without_duplicates() {
        let scorer = RiskScorer::default();
        let input = CaseInput::new("Flood", "Florida", 300_000.0);

        let assessment = scorer.score(&input, &failing_history(80), 17);
        let descriptions: Vec<&str> = assessment
            .factors
            .iter()
            .map(|f| f.description.as_str())
            .collect();
        assert_eq!(
            descriptions,
            vec![
                "Amount exceeds company maximum ($250K)",
                "Requires secondary inspection per policy",
                "80% of similar cases failed review",
                "Decision made near end of business day",
            ]
        );
        for factor in &assessment.factors {
            assert!(factor.probability <= 100);
        }
    }

    #[test]
    fn tier_boundaries_are_strict() {
        assert_eq!(tier_for(100), RiskTier::Critical);
        assert_eq!(tier_for(71), RiskTier::Critical);
        assert_eq!(tier_for(70), RiskTier::High);
        assert_eq!(tier_for(41), RiskTier::High);
        assert_eq!(tier_for(40), RiskTier::Moderate);
        assert_eq!(tier_for(0), RiskTier::Moderate);
    }

    #[test]
    fn non_numeric_amount_leaves_only_the_time_rule() {
        let scorer = RiskScorer::default();
        let input = CaseInput::new("Flood", "Florida", "abc");

        let morning = scorer.score(&input, &no_history(), 10);
        assert!(morning.factors.is_empty());
        assert_eq!(morning.score, 0);
        assert_eq!(morning.tier, RiskTier::Moderate);

        let evening = scorer.score(&input, &no_history(), 17);
        assert_eq!(evening.factors.len(), 1);
        assert_eq!(
            evening.factors[0].description,
            "Decision made near end of business day"
        );
    }

    #[test]
    fn amounts_at_thresholds_do_not_fire() {
        let scorer = RiskScorer::default();

        let at_max = scorer.score(
            &CaseInput::new("Flood", "Florida", 250_000.0),
            &no_history(),
            10,
        );
        assert_eq!(at_max.factors.len(), 1); // inspection rule only
        assert_eq!(at_max.score, 30);

        let at_inspection = scorer.score(
            &CaseInput::new("Flood", "Florida", 200_000.0),
            &no_history(),
            10,
        );
        assert!(at_inspection.factors.is_empty());
    }

    #[test]
    fn scoring_is_deterministic() {
        let scorer = RiskScorer::default();
        let input = CaseInput::new("Flood", "Florida", 280_000.0);
        let memory = failing_history(60);

        let first = scorer.score(&input, &memory, 12);
        let second = scorer.score(&input, &memory, 12);
        assert_eq!(first, second);
    }
}
