use super::ConstraintId;
use super::ConstraintLedger;
use super::LedgerError;
use super::RegistryError;
use super::Severity;
use super::VariableRegistry;
use crate::expression::Expression;
use crate::solver::SolverAdapter;
use crate::variables::Bounds;
use crate::variables::VariableId;
use crate::variables::VariableKind;

/// Everything that belongs to a single solve: the solver, the declared variables, and the
/// recorded constraints.
///
/// A session is constructed per call and is never shared; dropping it releases the solver state.
#[derive(Debug)]
pub struct Session<Adapter> {
    adapter: Adapter,
    registry: VariableRegistry,
    ledger: ConstraintLedger,
    /// The severity with which [`Session::record`] adds constraints.
    rule_severity: Severity,
}

impl<Adapter: SolverAdapter> Session<Adapter> {
    pub fn new(adapter: Adapter, rule_severity: Severity) -> Self {
        Session {
            adapter,
            registry: VariableRegistry::default(),
            ledger: ConstraintLedger::default(),
            rule_severity,
        }
    }

    /// Declares a variable; see [`VariableRegistry::declare`].
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        kind: VariableKind,
        bounds: Bounds,
    ) -> Result<VariableId, RegistryError> {
        self.registry
            .declare(&mut self.adapter, name, kind, bounds)
    }

    /// Records a constraint with the session's rule severity.
    pub fn record(
        &mut self,
        expression: Expression,
        name: impl Into<String>,
    ) -> Result<ConstraintId, LedgerError> {
        self.record_with_severity(expression, name, self.rule_severity)
    }

    /// Records a constraint with an explicit severity; see [`ConstraintLedger::record`].
    pub fn record_with_severity(
        &mut self,
        expression: Expression,
        name: impl Into<String>,
        severity: Severity,
    ) -> Result<ConstraintId, LedgerError> {
        self.ledger
            .record(&mut self.adapter, &self.registry, expression, name, severity)
    }

    pub fn registry(&self) -> &VariableRegistry {
        &self.registry
    }

    pub fn ledger(&self) -> &ConstraintLedger {
        &self.ledger
    }

    pub fn adapter(&self) -> &Adapter {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut Adapter {
        &mut self.adapter
    }
}
