//! The per-solve state: the [`VariableRegistry`], the [`ConstraintLedger`], and the
//! [`Session`] tying both to a [`SolverAdapter`](crate::solver::SolverAdapter).
mod ledger;
mod registry;
mod session;

pub use ledger::*;
pub use registry::*;
pub use session::*;
