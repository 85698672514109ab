//! Formalisation pass for the density of the activity schedule.
//!
//! The plan spreads between [`defaults::MIN_ACTIVITIES_PER_DAY`] and
//! [`defaults::MAX_ACTIVITIES_PER_DAY`] activities over the days of the trip, never schedules an
//! attraction twice, and contains at least half an activity per day. That minimum is capped at
//! the number of attractions, since a trip cannot be required to visit more attractions than it
//! has.

use super::defaults;
use super::names;
use super::FormalisationError;
use crate::engine::Session;
use crate::expression::Expression;
use crate::expression::LinearExpression;
use crate::solver::SolverAdapter;
use crate::trip::Trip;
use crate::variables::Bounds;
use crate::variables::VariableKind;

pub(crate) fn run<Adapter: SolverAdapter>(
    trip: &Trip,
    session: &mut Session<Adapter>,
) -> Result<(), FormalisationError> {
    let Some(duration) = trip.duration() else {
        return Ok(());
    };
    if trip.attractions().is_empty() {
        return Ok(());
    }

    let duration = duration as f64;
    let num_attractions = trip.attractions().len() as f64;

    let activities_per_day = session.declare(
        names::ACTIVITIES_PER_DAY,
        VariableKind::Real,
        Bounds::between(
            defaults::MIN_ACTIVITIES_PER_DAY,
            defaults::MAX_ACTIVITIES_PER_DAY,
        ),
    )?;
    let total_activities = session.declare(
        names::TOTAL_ACTIVITIES_PLANNED,
        VariableKind::Real,
        Bounds::at_least(defaults::MIN_TOTAL_ACTIVITIES),
    )?;

    let _ = session.record(
        Expression::less_than_or_equals(
            total_activities,
            LinearExpression::scaled(activities_per_day, duration),
        ),
        names::ACTIVITY_SCHEDULING_UPPER,
    )?;
    let _ = session.record(
        Expression::less_than_or_equals(total_activities, num_attractions),
        names::ACTIVITY_AVAILABILITY,
    )?;
    let _ = session.record(
        Expression::greater_than_or_equals(
            total_activities,
            (duration * defaults::MIN_ACTIVITIES_PER_DAY).min(num_attractions),
        ),
        names::MINIMUM_ACTIVITIES,
    )?;

    Ok(())
}
