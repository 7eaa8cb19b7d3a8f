//! Claims Knowledge - policy excerpt catalog and context-aware retrieval
//!
//! Scores a fixed catalog of policy, SOP, regulation, and compliance
//! excerpts against the case under review and surfaces the best matches.
//! Matching is literal keyword containment - no search index, no NLP.

#![deny(unsafe_code)]

use claims_types::{CaseInput, ExcerptCategory, PolicyExcerpt, RankedExcerpt};
use serde::{Deserialize, Serialize};

/// How many excerpts a retrieval returns at most.
pub const MAX_RESULTS: usize = 5;

/// The read-only catalog of policy excerpts.
///
/// The catalog order is arbitrary but meaningful: it is the tie-break for
/// excerpts with equal match scores.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KnowledgeStore {
    excerpts: Vec<PolicyExcerpt>,
}

impl KnowledgeStore {
    /// Create a store over an injected excerpt table. In production the
    /// table comes from an external document repository; tests pass small
    /// fixtures.
    pub fn new(excerpts: Vec<PolicyExcerpt>) -> Self {
        Self { excerpts }
    }

    /// Create a store with the built-in sample catalog.
    pub fn with_defaults() -> Self {
        Self::new(default_excerpts())
    }

    pub fn excerpts(&self) -> &[PolicyExcerpt] {
        &self.excerpts
    }

    pub fn len(&self) -> usize {
        self.excerpts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.excerpts.is_empty()
    }

    /// Retrieve the excerpts most relevant to a case.
    ///
    /// The query is the claim type, jurisdiction, and amount text joined,
    /// lowercased, and split on whitespace. An excerpt scores one point per
    /// query token contained as a substring in at least one of its keywords.
    /// Zero-score excerpts are dropped; the rest are sorted by score
    /// descending (catalog order breaks ties) and capped at [`MAX_RESULTS`].
    ///
    /// Empty or absent inputs simply tokenize to fewer tokens; an empty
    /// result is valid, not a failure.
    pub fn retrieve(&self, input: &CaseInput) -> Vec<RankedExcerpt> {
        let query = format!(
            "{} {} {}",
            input.claim_type,
            input.jurisdiction,
            input.amount.display()
        )
        .to_lowercase();
        let tokens: Vec<&str> = query.split_whitespace().collect();

        let mut ranked: Vec<RankedExcerpt> = self
            .excerpts
            .iter()
            .map(|excerpt| {
                let match_score = tokens
                    .iter()
                    .filter(|token| excerpt.keywords.iter().any(|kw| kw.contains(**token)))
                    .count() as u32;
                RankedExcerpt {
                    excerpt: excerpt.clone(),
                    match_score,
                }
            })
            .filter(|r| r.match_score > 0)
            .collect();

        // Vec::sort_by is stable, so equal scores keep catalog order.
        ranked.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        ranked.truncate(MAX_RESULTS);
        ranked
    }
}

/// The built-in sample catalog: flood policy, claims SOP, federal guidance,
/// and audit compliance excerpts.
pub fn default_excerpts() -> Vec<PolicyExcerpt> {
    vec![
        PolicyExcerpt {
            id: 1,
            source_document: "Florida_Flood_Policy_2024.pdf".to_string(),
            page: 12,
            paragraph: 3,
            content: "All flood damage claims exceeding $200,000 in Florida require mandatory \
                      secondary inspection by a certified structural engineer before approval."
                .to_string(),
            keywords: vec![
                "flood".to_string(),
                "florida".to_string(),
                "secondary inspection".to_string(),
                "200000".to_string(),
            ],
            category: ExcerptCategory::Policy,
        },
        PolicyExcerpt {
            id: 2,
            source_document: "Company_SOP_Claims_v3.pdf".to_string(),
            page: 8,
            paragraph: 2,
            content: "Maximum payout for residential flood claims is capped at $250,000 per \
                      policy year, regardless of damage assessment."
                .to_string(),
            keywords: vec![
                "flood".to_string(),
                "maximum".to_string(),
                "250000".to_string(),
                "residential".to_string(),
            ],
            category: ExcerptCategory::Sop,
        },
        PolicyExcerpt {
            id: 3,
            source_document: "FEMA_Guidelines_2024.pdf".to_string(),
            page: 45,
            paragraph: 7,
            content: "Federal flood insurance permits payouts up to $300,000 for residential \
                      properties in designated high-risk zones."
                .to_string(),
            keywords: vec![
                "flood".to_string(),
                "federal".to_string(),
                "300000".to_string(),
                "residential".to_string(),
            ],
            category: ExcerptCategory::Regulation,
        },
        PolicyExcerpt {
            id: 4,
            source_document: "Florida_Flood_Policy_2024.pdf".to_string(),
            page: 15,
            paragraph: 1,
            content: "Claims submitted without complete damage assessment reports have a \
                      mandatory 5-business-day review period before processing."
                .to_string(),
            keywords: vec![
                "damage assessment".to_string(),
                "report".to_string(),
                "review period".to_string(),
            ],
            category: ExcerptCategory::Policy,
        },
        PolicyExcerpt {
            id: 5,
            source_document: "Audit_Compliance_Guide.pdf".to_string(),
            page: 23,
            paragraph: 4,
            content: "All claims approved in the final 30 minutes of business hours must \
                      undergo secondary review the following business day."
                .to_string(),
            keywords: vec![
                "audit".to_string(),
                "end of day".to_string(),
                "secondary review".to_string(),
            ],
            category: ExcerptCategory::Compliance,
        },
    ]
}
