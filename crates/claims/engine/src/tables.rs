//! Loading the two read-only tables from JSON.
//!
//! Production deployments replace the built-in samples with exports from a
//! document repository and a case-management system; this module parses that
//! interchange shape.

use claims_knowledge::KnowledgeStore;
use claims_memory::DecisionHistory;
use claims_types::{HistoricalCase, PolicyExcerpt};
use serde::Deserialize;
use thiserror::Error;

/// The interchange document: both tables in one object.
#[derive(Debug, Deserialize)]
struct TableFile {
    knowledge: Vec<PolicyExcerpt>,
    history: Vec<HistoricalCase>,
}

/// Parse both tables from a JSON document of the form
/// `{ "knowledge": [...], "history": [...] }`.
pub fn from_json_str(json: &str) -> Result<(KnowledgeStore, DecisionHistory), TableError> {
    let file: TableFile = serde_json::from_str(json)?;
    if file.knowledge.is_empty() {
        return Err(TableError::Empty("knowledge"));
    }
    if file.history.is_empty() {
        return Err(TableError::Empty("history"));
    }
    Ok((
        KnowledgeStore::new(file.knowledge),
        DecisionHistory::new(file.history),
    ))
}

/// Table loading errors.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to parse tables: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("table is empty: {0}")]
    Empty(&'static str),
}
