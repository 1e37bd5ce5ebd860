//! Narrow (server-side search filter) parsing.
//!
//! A narrow expression is a whitespace separated list of `operator:operand`
//! terms, e.g. `streams:public has:reaction`. Each term is split on its first
//! colon so operands may contain further colons (`search:a:b`).

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{ExportError, ExportResult};

/// Default narrow: every message in every public channel.
pub const DEFAULT_NARROW: &str = "streams:public";

/// A single filter clause as sent to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NarrowTerm {
    pub operator: String,
    pub operand: String,
}

/// Ordered list of filter clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Narrow(Vec<NarrowTerm>);

impl Narrow {
    /// Parse a narrow expression.
    ///
    /// Fails on the first term that has no colon. An empty expression yields
    /// an empty narrow, which the server treats as "all messages the API user
    /// can see".
    pub fn parse(expr: &str) -> ExportResult<Self> {
        expr.split_whitespace()
            .map(|term| match term.split_once(':') {
                Some((operator, operand)) => Ok(NarrowTerm {
                    operator: operator.to_string(),
                    operand: operand.to_string(),
                }),
                None => Err(ExportError::InvalidNarrow {
                    term: term.to_string(),
                }),
            })
            .collect::<ExportResult<Vec<_>>>()
            .map(Narrow)
    }

    pub fn terms(&self) -> &[NarrowTerm] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// JSON encoding used in the `narrow` query parameter.
    pub fn to_json(&self) -> String {
        // Serializing a Vec of string pairs cannot fail
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
    }
}

impl FromStr for Narrow {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Narrow::parse(s)
    }
}

impl fmt::Display for Narrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms: Vec<String> = self
            .0
            .iter()
            .map(|t| format!("{}:{}", t.operator, t.operand))
            .collect();
        write!(f, "{}", terms.join(" "))
    }
}
