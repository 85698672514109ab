//! Formalisation pass requiring a hotel to be booked whenever hotels are offered.

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
    if trip.hotels().is_empty() {
        return Ok(());
    }

    let hotel_selected =
        session.declare(names::HOTEL_SELECTED, VariableKind::Boolean, Bounds::UNBOUNDED)?;
    let _ = session.record(
        Expression::is_true(hotel_selected),
        names::HOTEL_AVAILABILITY,
    )?;

    Ok(())
}
