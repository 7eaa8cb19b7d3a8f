//! Claims Memory - decision history and similar-case analysis
//!
//! Filters the log of past claim decisions for cases similar to the one
//! under review and summarizes how those cases were ultimately judged.
//! The analyzer only reads history; it never learns from outcomes.

#![deny(unsafe_code)]

use chrono::NaiveDate;
use claims_types::{CaseInput, CaseOutcome, HistoricalCase, IssueCount, MemorySummary};
use serde::{Deserialize, Serialize};

/// Absolute claim-amount distance within which a past case counts as similar.
pub const DEFAULT_SIMILARITY_WINDOW: f64 = 50_000.0;

/// The read-only log of past claim decisions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DecisionHistory {
    cases: Vec<HistoricalCase>,
    similarity_window: f64,
}

impl DecisionHistory {
    /// Create a history over an injected case table with the default
    /// similarity window. In production the table comes from an external
    /// case-management system; tests pass small fixtures.
    pub fn new(cases: Vec<HistoricalCase>) -> Self {
        Self::with_window(cases, DEFAULT_SIMILARITY_WINDOW)
    }

    /// Create a history with an explicit similarity window.
    pub fn with_window(cases: Vec<HistoricalCase>, similarity_window: f64) -> Self {
        Self {
            cases,
            similarity_window,
        }
    }

    /// Create a history with the built-in sample decision log.
    pub fn with_defaults() -> Self {
        Self::new(default_cases())
    }

    pub fn cases(&self) -> &[HistoricalCase] {
        &self.cases
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Summarize the outcomes of past cases similar to this one.
    ///
    /// A case is similar when its type and jurisdiction match
    /// case-insensitively and its claim amount is within the similarity
    /// window of the amount under review. A non-numeric amount parses to
    /// NaN, every distance comparison against NaN is false, and the
    /// summary comes back all-zero.
    pub fn analyze(&self, input: &CaseInput) -> MemorySummary {
        let amount = input.amount.as_f64();
        let similar: Vec<&HistoricalCase> = self
            .cases
            .iter()
            .filter(|case| {
                case.case_type.eq_ignore_ascii_case(&input.claim_type)
                    && case.jurisdiction.eq_ignore_ascii_case(&input.jurisdiction)
                    && (case.claim_amount - amount).abs() < self.similarity_window
            })
            .collect();

        if similar.is_empty() {
            return MemorySummary::empty();
        }

        let total_cases = similar.len() as u32;
        let failed_cases = similar.iter().filter(|c| c.outcome.is_failure()).count() as u32;
        let failure_rate =
            (f64::from(failed_cases) / f64::from(total_cases) * 100.0).round() as u32;

        let day_sum: u32 = similar.iter().map(|c| c.days_to_resolve).sum();
        let avg_resolution_days =
            (f64::from(day_sum) / f64::from(total_cases) * 10.0).round() / 10.0;

        MemorySummary {
            total_cases,
            failed_cases,
            failure_rate,
            avg_resolution_days,
            issue_frequency: issue_frequency(&similar),
        }
    }
}

/// Count occurrences per distinct issue text, most frequent first.
///
/// Counting walks the cases in order and the sort is stable, so issues with
/// equal counts keep encounter order.
fn issue_frequency(similar: &[&HistoricalCase]) -> Vec<IssueCount> {
    let mut counts: Vec<IssueCount> = vec![];
    for case in similar {
        if let Some(issue) = &case.issue {
            match counts.iter_mut().find(|c| c.issue == *issue) {
                Some(entry) => entry.count += 1,
                None => counts.push(IssueCount {
                    issue: issue.clone(),
                    count: 1,
                }),
            }
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// The built-in sample decision log: Florida flood claims and how they fared.
pub fn default_cases() -> Vec<HistoricalCase> {
    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid sample date")
    }

    vec![
        HistoricalCase {
            case_type: "Flood".to_string(),
            jurisdiction: "Florida".to_string(),
            claim_amount: 350_000.0,
            decision_made: "Approved without inspection".to_string(),
            outcome: CaseOutcome::rejected_by_manager(),
            days_to_resolve: 5,
            issue: Some("Missing secondary inspection report".to_string()),
            recorded_at: date(2024, 1, 15),
        },
        HistoricalCase {
            case_type: "Flood".to_string(),
            jurisdiction: "Florida".to_string(),
            claim_amount: 245_000.0,
            decision_made: "Approved with inspection".to_string(),
            outcome: CaseOutcome::approved(),
            days_to_resolve: 2,
            issue: None,
            recorded_at: date(2024, 1, 20),
        },
        HistoricalCase {
            case_type: "Flood".to_string(),
            jurisdiction: "Florida".to_string(),
            claim_amount: 290_000.0,
            decision_made: "Approved at $250K (reduced)".to_string(),
            outcome: CaseOutcome::approved(),
            days_to_resolve: 3,
            issue: None,
            recorded_at: date(2024, 1, 22),
        },
        HistoricalCase {
            case_type: "Flood".to_string(),
            jurisdiction: "Florida".to_string(),
            claim_amount: 275_000.0,
            decision_made: "Approved without inspection".to_string(),
            outcome: CaseOutcome::audit_failure(),
            days_to_resolve: 10,
            issue: Some("Compliance violation - missing inspection".to_string()),
            recorded_at: date(2024, 2, 1),
        },
        HistoricalCase {
            case_type: "Flood".to_string(),
            jurisdiction: "Florida".to_string(),
            claim_amount: 230_000.0,
            decision_made: "Approved with inspection".to_string(),
            outcome: CaseOutcome::approved(),
            days_to_resolve: 2,
            issue: None,
            recorded_at: date(2024, 2, 5),
        },
    ]
}
