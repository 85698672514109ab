//! # trip-sat
//! trip-sat checks whether a travel plan is feasible. A trip description (dates, budget, hotels,
//! attractions, and preferences) is turned into a satisfiability modulo theories problem over
//! integer, real, and boolean variables, which is handed to the [Z3](https://github.com/Z3Prover/z3)
//! solver. The answer comes back as one of four results:
//! * satisfiable, with a value for every variable;
//! * unsatisfiable, with the names of the constraints which together make the trip infeasible;
//! * a timeout, if the solver ran out of time;
//! * an error, if the problem could not be built.
//!
//! The crate does not optimise anything; it only establishes feasibility.
//!
//! # Solving a trip
//! ```rust,no_run
//! # use trip_sat::SolveOptions;
//! # use trip_sat::SolveResult;
//! # use trip_sat::Trip;
//! let trip = Trip::from_json(
//!     r#"{"budget": 200, "duration": 5, "hotels": [{"price_per_night": 300}]}"#,
//! )
//! .expect("a valid trip description");
//!
//! let result = trip_sat::solve(&trip, &SolveOptions::default());
//!
//! // Five nights at 300 exceed the budget.
//! if let SolveResult::Unsatisfiable { unsat_core, .. } = result {
//!     assert!(unsat_core.contains(&"budget_limit".to_owned()));
//! }
//! ```
//!
//! # Structure
//! The [`formalisation`] declares variables in a [`VariableRegistry`](engine::VariableRegistry)
//! and records named constraints in a [`ConstraintLedger`](engine::ConstraintLedger). Both
//! forward everything to a [`SolverAdapter`](solver::SolverAdapter), the only place which knows
//! about the solver. After the check, the [`decoding`] module translates the model or the
//! unsatisfiable core back into names and values. The [`orchestrator`] ties these steps together.
pub mod containers;
pub mod decoding;
pub mod engine;
pub mod expression;
pub mod formalisation;
pub mod options;
pub mod orchestrator;
pub mod results;
pub mod solver;
pub mod statistics;
pub mod trip;
pub mod variables;

pub use crate::options::SolveOptions;
pub use crate::orchestrator::solve;
pub use crate::orchestrator::solve_with;
pub use crate::results::SolveResult;
pub use crate::trip::Trip;
