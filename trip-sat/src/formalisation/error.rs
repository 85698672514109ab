use thiserror::Error;

use crate::engine::LedgerError;
use crate::engine::RegistryError;
use crate::solver::SolverError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormalisationError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Solver(#[from] SolverError),
}
