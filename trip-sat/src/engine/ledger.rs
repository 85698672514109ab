use log::trace;
use thiserror::Error;

use super::VariableRegistry;
use crate::containers::HashMap;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::expression::Expression;
use crate::solver::SolverAdapter;
use crate::solver::SolverError;

/// Errors related to recording constraints in the [`ConstraintLedger`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("constraint name '{name}' is already in use")]
    DuplicateConstraintName { name: String },
    #[error("failed to assert constraint '{name}': {source}")]
    Solver {
        name: String,
        #[source]
        source: SolverError,
    },
}

/// How a recorded constraint is handed to the solver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Asserted unconditionally. It can make the problem infeasible but never shows up in an
    /// unsatisfiable core.
    Hard,
    /// Asserted under its name, so the solver can report it as part of an unsatisfiable core.
    #[default]
    Tracked,
}

/// Position of a record in the [`ConstraintLedger`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintId(u32);

impl StorageKey for ConstraintId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        ConstraintId(index as u32)
    }
}

/// A named constraint as it was added to the solver.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstraintRecord {
    pub name: String,
    pub expression: Expression,
    pub severity: Severity,
    /// The expression rendered with variable names, for diagnostics.
    pub description: String,
}

/// Append-only record of every named constraint of a problem instance, in insertion order.
#[derive(Debug, Default)]
pub struct ConstraintLedger {
    records: KeyedVec<ConstraintId, ConstraintRecord>,
    by_name: HashMap<String, ConstraintId>,
}

impl ConstraintLedger {
    /// Records `expression` under `name` and forwards it to the solver: hard constraints are
    /// asserted unconditionally, tracked constraints are asserted under their name.
    ///
    /// Returns [`LedgerError::DuplicateConstraintName`] if `name` is already recorded; the
    /// solver is not touched in that case.
    pub fn record(
        &mut self,
        adapter: &mut impl SolverAdapter,
        registry: &VariableRegistry,
        expression: Expression,
        name: impl Into<String>,
        severity: Severity,
    ) -> Result<ConstraintId, LedgerError> {
        let name = name.into();
        if self.contains(&name) {
            return Err(LedgerError::DuplicateConstraintName { name });
        }

        let forwarded = match severity {
            Severity::Hard => adapter.assert_hard(&expression),
            Severity::Tracked => adapter.assert_tracked(&expression, &name),
        };
        if let Err(source) = forwarded {
            return Err(LedgerError::Solver { name, source });
        }

        let description = expression.describe(registry);
        trace!("recorded {severity:?} constraint '{name}': {description}");

        let id = self.records.push(ConstraintRecord {
            name: name.clone(),
            expression,
            severity,
            description,
        });
        let _ = self.by_name.insert(name, id);

        Ok(id)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&ConstraintRecord> {
        self.by_name.get(name).map(|&id| &self.records[id])
    }

    /// The insertion position of the constraint called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).map(|id| id.index())
    }

    /// Iterate over the records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ConstraintRecord> {
        self.records.iter()
    }

    /// The names of all records in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|record| record.name.as_str())
    }

    /// The number of recorded constraints.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn num_tracked(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.severity == Severity::Tracked)
            .count()
    }
}
