use std::time::Duration;

use crate::engine::Severity;

/// Options which influence a single solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolveOptions {
    /// The time the solver may spend on the satisfiability check. If it runs out, the result is a
    /// timeout. `None` means the check runs to completion.
    pub time_limit: Option<Duration>,
    /// Whether the named constraints are tracked, so that an unsatisfiable result names the
    /// constraints responsible. If disabled, they are asserted as hard constraints and every
    /// unsatisfiable core is empty.
    pub explain_infeasibility: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        SolveOptions {
            time_limit: None,
            explain_infeasibility: true,
        }
    }
}

impl SolveOptions {
    /// The severity with which the formaliser records its constraints.
    pub fn rule_severity(&self) -> Severity {
        if self.explain_infeasibility {
            Severity::Tracked
        } else {
            Severity::Hard
        }
    }
}
