//! Formalisation pass for the traveller's preferences.
//!
//! Every preference gets a boolean flag. Only the `culture` and `budget` tags are enforced, and
//! only when the trip makes them meaningful; other tags are declared but left free.

use log::debug;

use super::names;
use super::FormalisationError;
use crate::engine::Session;
use crate::expression::Expression;
use crate::solver::SolverAdapter;
use crate::trip::Trip;
use crate::variables::Bounds;
use crate::variables::VariableKind;

const CULTURE: &str = "culture";
const BUDGET: &str = "budget";

pub(crate) fn run<Adapter: SolverAdapter>(
    trip: &Trip,
    session: &mut Session<Adapter>,
) -> Result<(), FormalisationError> {
    let has_cultural_attraction = trip
        .attractions()
        .iter()
        .any(|attraction| attraction.is_cultural());

    for (index, tag) in trip.preferences().iter().enumerate() {
        let flag = session.declare(
            names::preference_flag(index, tag),
            VariableKind::Boolean,
            Bounds::UNBOUNDED,
        )?;

        match tag.as_str() {
            CULTURE if has_cultural_attraction => {
                let _ = session.record(
                    Expression::is_true(flag),
                    names::CULTURE_PREFERENCE_SATISFIED,
                )?;
            }
            BUDGET if trip.budget().is_some() => {
                let _ = session.record(
                    Expression::is_true(flag),
                    names::BUDGET_PREFERENCE_CONSIDERED,
                )?;
            }
            _ => debug!("preference '{tag}' is not enforced"),
        }
    }

    Ok(())
}
