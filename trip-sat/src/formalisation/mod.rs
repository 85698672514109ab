//! Turns a [`Trip`] into decision variables and named constraints.
//!
//! The formalisation is split into passes, one per rule. Each pass inspects only the trip fields
//! it depends on and does nothing if they are absent, so any subset of fields yields a valid
//! (possibly empty) problem. The passes run in a fixed order, which fixes the order of variables
//! in a solution and of constraints in the ledger.
mod activities;
mod budget;
mod date_range;
pub mod defaults;
mod error;
mod hotels;
pub mod names;
mod preferences;

pub use error::FormalisationError;
use log::debug;

use crate::engine::Session;
use crate::solver::SolverAdapter;
use crate::trip::Trip;

/// Declares the variables and records the constraints for `trip` in `session`.
///
/// Constraints are recorded with the session's rule severity.
pub fn formalise<Adapter: SolverAdapter>(
    trip: &Trip,
    session: &mut Session<Adapter>,
) -> Result<(), FormalisationError> {
    date_range::run(trip, session)?;
    budget::run(trip, session)?;
    preferences::run(trip, session)?;
    hotels::run(trip, session)?;
    activities::run(trip, session)?;

    debug!(
        "formalised '{}' into {} variables and {} constraints",
        trip.label(),
        session.registry().len(),
        session.ledger().len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Severity;
    use crate::solver::testing::RecordingAdapter;

    fn formalised(json: &str) -> Session<RecordingAdapter> {
        let trip = Trip::from_json(json).expect("valid trip");
        let mut session = Session::new(RecordingAdapter::default(), Severity::Tracked);
        formalise(&trip, &mut session).expect("formalisation succeeds");
        session
    }

    #[test]
    fn empty_trip_has_no_variables_or_constraints() {
        let session = formalised("{}");

        assert!(session.registry().is_empty());
        assert!(session.ledger().is_empty());
        assert!(session.adapter().hard.is_empty());
    }

    #[test]
    fn munich_trip() {
        let session = formalised(
            r#"{"destination": "Munich", "budget": 800, "duration": 3,
                "preferences": ["culture"], "hotels": [{"price_per_night": 90}],
                "attractions": [{"name": "Marienplatz"}]}"#,
        );

        assert_eq!(
            session.registry().names().collect::<Vec<_>>(),
            vec![
                names::TOTAL_COST,
                names::ACCOMMODATION_COST,
                names::ACTIVITY_COST,
                names::CALCULATED_TOTAL,
                "preference_0_culture",
                names::HOTEL_SELECTED,
                names::ACTIVITIES_PER_DAY,
                names::TOTAL_ACTIVITIES_PLANNED,
            ]
        );
        // No attraction is cultural, so the culture preference is not enforced.
        assert_eq!(
            session.ledger().names().collect::<Vec<_>>(),
            vec![
                names::ACCOMMODATION_COST_RANGE,
                names::ACTIVITY_COST_ESTIMATE,
                names::TOTAL_COST_CALCULATION,
                names::BUDGET_LIMIT,
                names::HOTEL_AVAILABILITY,
                names::ACTIVITY_SCHEDULING_UPPER,
                names::ACTIVITY_AVAILABILITY,
                names::MINIMUM_ACTIVITIES,
            ]
        );
        assert_eq!(session.adapter().tracked_names().len(), 8);
    }

    #[test]
    fn every_rule_fires_on_a_complete_trip() {
        let session = formalised(
            r#"{"start_date": "2024-06-01", "end_date": "2024-06-05", "budget": 1200,
                "duration": 4, "preferences": ["culture", "budget", "dining"],
                "hotels": [{"price_per_night": 120}, {"price_per_night": 250}],
                "attractions": [{"name": "Albertina", "category": "Museum"}]}"#,
        );

        assert_eq!(
            session.ledger().names().collect::<Vec<_>>(),
            vec![
                names::VALID_DATE_RANGE,
                names::ACCOMMODATION_COST_RANGE,
                names::ACTIVITY_COST_ESTIMATE,
                names::TOTAL_COST_CALCULATION,
                names::BUDGET_LIMIT,
                names::CULTURE_PREFERENCE_SATISFIED,
                names::BUDGET_PREFERENCE_CONSIDERED,
                names::HOTEL_AVAILABILITY,
                names::ACTIVITY_SCHEDULING_UPPER,
                names::ACTIVITY_AVAILABILITY,
                names::MINIMUM_ACTIVITIES,
            ]
        );
        assert!(session.registry().contains("preference_2_dining"));
    }

    #[test]
    fn rules_are_hard_when_explanations_are_disabled() {
        let trip = Trip::from_json(r#"{"budget": 200, "duration": 5, "hotels": [{"price_per_night": 300}]}"#)
            .expect("valid trip");
        let mut session = Session::new(RecordingAdapter::default(), Severity::Hard);
        formalise(&trip, &mut session).expect("formalisation succeeds");

        assert!(session.adapter().tracked.is_empty());
        assert_eq!(session.ledger().num_tracked(), 0);
        assert_eq!(session.ledger().len(), 4);
    }

    #[test]
    fn repeated_culture_preference_is_an_error() {
        let trip = Trip::from_json(
            r#"{"preferences": ["culture", "culture"],
                "attractions": [{"name": "Louvre", "category": "museum"}]}"#,
        )
        .expect("valid trip");
        let mut session = Session::new(RecordingAdapter::default(), Severity::Tracked);

        let result = formalise(&trip, &mut session);

        assert!(matches!(
            result,
            Err(FormalisationError::Ledger(
                crate::engine::LedgerError::DuplicateConstraintName { .. }
            ))
        ));
    }

    #[test]
    fn formalisation_is_deterministic() {
        let json = r#"{"budget": 300, "duration": 2, "preferences": ["budget"],
                       "hotels": [{"price_per_night": 60}], "attractions": [{"name": "Gate"}]}"#;

        let first = formalised(json);
        let second = formalised(json);

        assert_eq!(
            first.registry().names().collect::<Vec<_>>(),
            second.registry().names().collect::<Vec<_>>()
        );
        assert_eq!(
            first.ledger().iter().collect::<Vec<_>>(),
            second.ledger().iter().collect::<Vec<_>>()
        );
    }
}
