//! Formalisation pass for the travel dates.
//!
//! The dates themselves are not interpreted; the pass only requires the trip to end after it
//! starts, somewhere within the planning horizon.

use super::defaults;
use super::names;
use super::FormalisationError;
use crate::engine::Session;
use crate::expression::Expression;
use crate::solver::SolverAdapter;
use crate::trip::Trip;
use crate::variables::Bounds;
use crate::variables::VariableKind;

pub(crate) fn run<Adapter: SolverAdapter>(
    trip: &Trip,
    session: &mut Session<Adapter>,
) -> Result<(), FormalisationError> {
    if trip.dates().is_none() {
        return Ok(());
    }

    let horizon = Bounds::between(0.0, defaults::PLANNING_HORIZON_DAYS);
    let start_day = session.declare(names::START_DAY, VariableKind::Integer, horizon)?;
    let end_day = session.declare(names::END_DAY, VariableKind::Integer, horizon)?;

    let _ = session.record(
        Expression::greater_than(end_day, start_day),
        names::VALID_DATE_RANGE,
    )?;

    Ok(())
}
