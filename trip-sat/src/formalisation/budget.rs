//! Formalisation pass which splits the trip cost into accommodation and activities, and bounds
//! their sum by the budget.
//!
//! `total_cost` is declared for every budgeted trip but is deliberately left unconstrained; the
//! budget is enforced on `calculated_total`, the sum of the cost components which could be
//! estimated.

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
    let Some(budget) = trip.budget() else {
        return Ok(());
    };

    let _ = session.declare(names::TOTAL_COST, VariableKind::Real, Bounds::at_least(0.0))?;

    let duration = trip.duration_or_default() as f64;
    let mut cost_components = vec![];

    if !trip.hotels().is_empty() {
        let accommodation_cost = session.declare(
            names::ACCOMMODATION_COST,
            VariableKind::Real,
            Bounds::at_least(0.0),
        )?;
        cost_components.push(accommodation_cost);

        let (cheapest, most_expensive) = nightly_price_range(trip);
        let _ = session.record(
            Expression::and([
                Expression::greater_than_or_equals(accommodation_cost, cheapest * duration),
                Expression::less_than_or_equals(accommodation_cost, most_expensive * duration),
            ]),
            names::ACCOMMODATION_COST_RANGE,
        )?;
    }

    if !trip.attractions().is_empty() {
        let activity_cost = session.declare(
            names::ACTIVITY_COST,
            VariableKind::Real,
            Bounds::at_least(0.0),
        )?;
        cost_components.push(activity_cost);

        let num_activities =
            (trip.attractions().len() as f64).min(duration * defaults::ACTIVITIES_PER_DAY_ESTIMATE);
        let _ = session.record(
            Expression::less_than_or_equals(
                activity_cost,
                defaults::AVERAGE_ACTIVITY_COST * num_activities,
            ),
            names::ACTIVITY_COST_ESTIMATE,
        )?;
    }

    if cost_components.is_empty() {
        return Ok(());
    }

    let calculated_total =
        session.declare(names::CALCULATED_TOTAL, VariableKind::Real, Bounds::UNBOUNDED)?;
    let _ = session.record(
        Expression::equals(calculated_total, LinearExpression::sum(cost_components)),
        names::TOTAL_COST_CALCULATION,
    )?;
    let _ = session.record(
        Expression::less_than_or_equals(calculated_total, budget),
        names::BUDGET_LIMIT,
    )?;

    Ok(())
}

/// The cheapest and most expensive nightly price over all hotels.
fn nightly_price_range(trip: &Trip) -> (f64, f64) {
    let prices = trip.hotels().iter().map(|hotel| hotel.price_per_night());

    let cheapest = prices.clone().reduce(f64::min);
    let most_expensive = prices.reduce(f64::max);

    (
        cheapest.unwrap_or(defaults::MIN_NIGHTLY_RATE),
        most_expensive.unwrap_or(defaults::MAX_NIGHTLY_RATE),
    )
}
