//! The outcome of a solve, and its JSON rendering.
use serde::Deserialize;
use serde::Serialize;

use crate::decoding::Solution;

/// The report of a single solve. Exactly one variant is produced per solve.
///
/// Execution times are in whole milliseconds, measured from the start of formalisation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SolveResult {
    Satisfiable {
        solution: Solution,
        execution_time: u64,
        constraints_count: usize,
    },
    Unsatisfiable {
        unsat_core: Vec<String>,
        execution_time: u64,
        constraints_count: usize,
    },
    Timeout {
        execution_time: u64,
    },
    Error {
        error: String,
        execution_time: u64,
    },
}

impl SolveResult {
    /// The value of the `status` field of the JSON rendering.
    pub fn status(&self) -> &'static str {
        match self {
            SolveResult::Satisfiable { .. } => "satisfiable",
            SolveResult::Unsatisfiable { .. } => "unsatisfiable",
            SolveResult::Timeout { .. } => "timeout",
            SolveResult::Error { .. } => "error",
        }
    }

    pub fn execution_time(&self) -> u64 {
        match self {
            SolveResult::Satisfiable { execution_time, .. }
            | SolveResult::Unsatisfiable { execution_time, .. }
            | SolveResult::Timeout { execution_time }
            | SolveResult::Error { execution_time, .. } => *execution_time,
        }
    }

    /// The number of named constraints, for the variants which report it.
    pub fn constraints_count(&self) -> Option<usize> {
        match self {
            SolveResult::Satisfiable {
                constraints_count, ..
            }
            | SolveResult::Unsatisfiable {
                constraints_count, ..
            } => Some(*constraints_count),
            SolveResult::Timeout { .. } | SolveResult::Error { .. } => None,
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
