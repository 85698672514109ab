#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

mod helpers;

use helpers::BERLIN;
use helpers::MUNICH;
use helpers::VIENNA;
use helpers::ZURICH;
use trip_sat::decoding::DecodedValue;
use trip_sat::engine::Session;
use trip_sat::formalisation::formalise;
use trip_sat::solver::Z3Adapter;
use trip_sat::SolveOptions;
use trip_sat::SolveResult;
use trip_sat::Trip;
use z3::Config;
use z3::Context;

fn solve(json: &str) -> SolveResult {
    let trip = Trip::from_json(json).expect("valid trip");
    trip_sat::solve(&trip, &SolveOptions::default())
}

/// The variable and constraint names `json` is formalised into.
fn formalised_names(json: &str) -> (Vec<String>, Vec<String>) {
    let trip = Trip::from_json(json).expect("valid trip");
    let context = Context::new(&Config::new());
    let mut session = Session::new(
        Z3Adapter::new(&context, None),
        SolveOptions::default().rule_severity(),
    );
    formalise(&trip, &mut session).expect("formalisation succeeds");

    (
        session.registry().names().map(str::to_owned).collect(),
        session.ledger().names().map(str::to_owned).collect(),
    )
}

#[test]
fn munich_is_satisfiable() {
    let result = solve(MUNICH);

    let SolveResult::Satisfiable {
        solution,
        constraints_count,
        ..
    } = result
    else {
        panic!("expected a satisfiable result, got {result:?}");
    };
    assert_eq!(constraints_count, 8);
    assert_eq!(solution["accommodation_cost"], DecodedValue::Real(270.0));
    assert_eq!(solution["hotel_selected"], DecodedValue::Boolean(true));
    assert_eq!(solution["total_activities_planned"], DecodedValue::Real(1.0));
    // The culture preference is not enforced, so the solver leaves it open.
    assert_eq!(solution["preference_0_culture"], DecodedValue::Absent);
}

#[test]
fn zurich_is_unsatisfiable_because_of_the_budget() {
    let result = solve(ZURICH);

    let SolveResult::Unsatisfiable {
        unsat_core,
        constraints_count,
        ..
    } = result
    else {
        panic!("expected an unsatisfiable result, got {result:?}");
    };
    assert_eq!(constraints_count, 8);
    assert!(unsat_core.contains(&"budget_limit".to_owned()));
    assert!(unsat_core.contains(&"accommodation_cost_range".to_owned()));
}

#[test]
fn berlin_and_vienna_are_satisfiable() {
    for trip in [BERLIN, VIENNA] {
        let result = solve(trip);

        assert_eq!(result.status(), "satisfiable", "{trip}");
    }
}

#[test]
fn empty_trip_is_trivially_satisfiable() {
    let result = solve("{}");

    assert!(matches!(
        result,
        SolveResult::Satisfiable {
            ref solution,
            constraints_count: 0,
            ..
        } if solution.is_empty()
    ));
}

#[test]
fn budget_below_the_cheapest_stay_is_unsatisfiable() {
    for (budget, duration, price) in [(100, 2, 60), (899, 3, 300), (1, 1, 2), (449, 5, 90)] {
        let json = format!(
            r#"{{"budget": {budget}, "duration": {duration},
                 "hotels": [{{"price_per_night": {price}}}, {{"price_per_night": 500}}]}}"#
        );

        let result = solve(&json);

        let SolveResult::Unsatisfiable { unsat_core, .. } = result else {
            panic!("expected an unsatisfiable result for {json}, got {result:?}");
        };
        assert!(unsat_core.contains(&"budget_limit".to_owned()), "{json}");
    }
}

#[test]
fn repeated_culture_preference_is_an_error_result() {
    let result = solve(
        r#"{"preferences": ["culture", "culture"],
            "attractions": [{"name": "Pinakothek", "category": "Art Museum"}]}"#,
    );

    let SolveResult::Error { error, .. } = result else {
        panic!("expected an error result, got {result:?}");
    };
    assert!(error.contains("culture_preference_satisfied"));
}

#[test]
fn disabled_explanations_give_an_empty_core() {
    let trip = Trip::from_json(ZURICH).expect("valid trip");
    let options = SolveOptions {
        explain_infeasibility: false,
        ..Default::default()
    };

    let result = trip_sat::solve(&trip, &options);

    assert!(matches!(
        result,
        SolveResult::Unsatisfiable { ref unsat_core, constraints_count: 8, .. }
            if unsat_core.is_empty()
    ));
}

#[test]
fn trip_ends_after_it_starts() {
    let result = solve(r#"{"start_date": "2024-06-01", "end_date": "2024-06-05"}"#);

    let SolveResult::Satisfiable { solution, .. } = result else {
        panic!("expected a satisfiable result, got {result:?}");
    };
    let (DecodedValue::Integer(start_day), DecodedValue::Integer(end_day)) =
        (solution["start_day"], solution["end_day"])
    else {
        panic!("expected integer days, got {solution:?}");
    };
    assert!(end_day > start_day);
    assert!((0..=365).contains(&start_day));
    assert!((0..=365).contains(&end_day));
}

#[test]
fn solving_is_idempotent() {
    for trip in [MUNICH, ZURICH, BERLIN, VIENNA, "{}"] {
        assert_eq!(formalised_names(trip), formalised_names(trip));
        assert_eq!(solve(trip).status(), solve(trip).status());
    }
}

#[test]
fn every_variable_appears_in_the_solution() {
    for trip in [MUNICH, BERLIN, VIENNA] {
        let (variables, _) = formalised_names(trip);

        let SolveResult::Satisfiable { solution, .. } = solve(trip) else {
            panic!("expected a satisfiable result for {trip}");
        };
        assert_eq!(solution.keys().cloned().collect::<Vec<_>>(), variables);
    }
}

#[test]
fn constraints_count_matches_the_recorded_names() {
    for trip in [MUNICH, ZURICH, BERLIN, VIENNA, "{}"] {
        let (_, constraints) = formalised_names(trip);

        assert_eq!(solve(trip).constraints_count(), Some(constraints.len()));
    }
}

#[test]
fn preference_with_a_nul_character_is_solved() {
    let result = solve(r#"{"preferences": ["a\u0000b", "culture"]}"#);

    let SolveResult::Satisfiable { solution, .. } = result else {
        panic!("expected a satisfiable result, got {result:?}");
    };
    assert_eq!(
        solution.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["preference_0_a\0b", "preference_1_culture"]
    );
}
