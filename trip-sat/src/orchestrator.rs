//! Runs a single solve from trip description to [`SolveResult`].
//!
//! A solve moves through the phases
//!
//! ```text
//! Formalizing -> Solving -> { DecodingSat | DecodingUnsat | TimedOut } -> Done
//! ```
//!
//! and ends in [`Phase::Errored`] instead if any phase fails. Both `Done` and `Errored` produce
//! exactly one [`SolveResult`], stamped with the time elapsed since formalisation started.
use std::fmt::Display;
use std::time::Duration;
use std::time::Instant;

use log::debug;
use log::info;
use thiserror::Error;
use z3::Config;
use z3::Context;

use crate::decoding::decode_core;
use crate::decoding::decode_solution;
use crate::decoding::Solution;
use crate::engine::Session;
use crate::formalisation::formalise;
use crate::formalisation::FormalisationError;
use crate::options::SolveOptions;
use crate::results::SolveResult;
use crate::solver::SatisfiabilityOutcome;
use crate::solver::SolverAdapter;
use crate::solver::SolverError;
use crate::solver::Z3Adapter;
use crate::statistics::SolveStatistics;
use crate::trip::Trip;

/// The phases of a solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Formalizing,
    Solving,
    DecodingSat,
    DecodingUnsat,
    TimedOut,
    Done,
    Errored,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Done | Phase::Errored)
    }
}

#[derive(Debug, Error)]
enum SolveError {
    #[error(transparent)]
    Formalisation(#[from] FormalisationError),
    #[error(transparent)]
    Solver(#[from] SolverError),
    #[error("the solver reported a satisfiable problem but produced no model")]
    MissingModel,
}

/// What the solver said, decoded but not yet stamped with a time.
#[derive(Debug)]
enum Verdict {
    Satisfiable(Solution),
    Unsatisfiable(Vec<String>),
    Timeout,
}

/// Keeps track of the current phase and the time since the solve started.
#[derive(Debug)]
struct PhaseTracker {
    phase: Phase,
    start: Instant,
}

impl PhaseTracker {
    fn start() -> Self {
        debug!("entering {:?}", Phase::Formalizing);
        PhaseTracker {
            phase: Phase::Formalizing,
            start: Instant::now(),
        }
    }

    fn enter(&mut self, next: Phase) {
        debug!(
            "{:?} -> {:?} after {}ms",
            self.phase,
            next,
            self.start.elapsed().as_millis()
        );
        self.phase = next;
    }

    fn fail(&mut self, reason: impl Display) {
        debug!("{:?} failed: {reason}", self.phase);
        self.enter(Phase::Errored);
    }
}

/// Solves `trip` with a fresh Z3 solver.
///
/// Every call creates its own solver context, so calls are independent of each other.
pub fn solve(trip: &Trip, options: &SolveOptions) -> SolveResult {
    let config = Config::new();
    let context = Context::new(&config);
    let adapter = Z3Adapter::new(&context, options.time_limit);

    solve_with(adapter, trip, options)
}

/// Solves `trip` with the given adapter.
///
/// The adapter should be fresh; the constraints of `trip` are added to whatever it already
/// contains. The time limit of `options` is not applied here, since it is a property of the
/// adapter.
pub fn solve_with<Adapter: SolverAdapter>(
    adapter: Adapter,
    trip: &Trip,
    options: &SolveOptions,
) -> SolveResult {
    info!("solving '{}'", trip.label());

    let mut tracker = PhaseTracker::start();
    let mut session = Session::new(adapter, options.rule_severity());

    let verdict = run_phases(trip, &mut session, &mut tracker);
    let execution_time = tracker.start.elapsed();
    let constraints_count = session.ledger().len();

    let result = match verdict {
        Ok(verdict) => {
            tracker.enter(Phase::Done);
            match verdict {
                Verdict::Satisfiable(solution) => SolveResult::Satisfiable {
                    solution,
                    execution_time: as_millis(execution_time),
                    constraints_count,
                },
                Verdict::Unsatisfiable(unsat_core) => SolveResult::Unsatisfiable {
                    unsat_core,
                    execution_time: as_millis(execution_time),
                    constraints_count,
                },
                Verdict::Timeout => SolveResult::Timeout {
                    execution_time: as_millis(execution_time),
                },
            }
        }
        Err(error) => {
            tracker.fail(&error);
            SolveResult::Error {
                error: error.to_string(),
                execution_time: as_millis(execution_time),
            }
        }
    };

    SolveStatistics {
        num_variables: session.registry().len(),
        num_constraints: constraints_count,
        num_tracked_constraints: session.ledger().num_tracked(),
        status: result.status(),
        time_spent: execution_time,
    }
    .log();

    result
}

fn run_phases<Adapter: SolverAdapter>(
    trip: &Trip,
    session: &mut Session<Adapter>,
    tracker: &mut PhaseTracker,
) -> Result<Verdict, SolveError> {
    formalise(trip, session)?;

    tracker.enter(Phase::Solving);
    let outcome = session.adapter_mut().check_satisfiability()?;

    match outcome {
        SatisfiabilityOutcome::Satisfiable => {
            tracker.enter(Phase::DecodingSat);
            let model = session
                .adapter()
                .current_model()
                .ok_or(SolveError::MissingModel)?;
            Ok(Verdict::Satisfiable(decode_solution(
                session.registry(),
                &model,
            )))
        }
        SatisfiabilityOutcome::Unsatisfiable => {
            tracker.enter(Phase::DecodingUnsat);
            Ok(Verdict::Unsatisfiable(decode_core(
                session.adapter(),
                session.ledger(),
            )))
        }
        SatisfiabilityOutcome::Unknown => {
            tracker.enter(Phase::TimedOut);
            Ok(Verdict::Timeout)
        }
    }
}

fn as_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
