//! Turns solver output back into domain values.
//!
//! A model is decoded variable by variable. A variable which cannot be decoded becomes
//! [`DecodedValue::Absent`] without affecting the others. An unsatisfiable core is reduced to the
//! names of recorded constraints, in the order in which they were recorded.
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::containers::HashSet;
use crate::engine::ConstraintLedger;
use crate::engine::VariableRegistry;
use crate::solver::ModelLookup;
use crate::solver::RawValue;
use crate::solver::SolverAdapter;
use crate::variables::Variable;
use crate::variables::VariableKind;

/// Real values are reported with at most this many fractional digits.
const REAL_PRECISION: i32 = 10;

/// A variable assignment keyed by variable name, in declaration order.
pub type Solution = IndexMap<String, DecodedValue>;

/// The value of a single variable in a [`Solution`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DecodedValue {
    Integer(i64),
    Real(f64),
    Boolean(bool),
    /// The model has no usable value for the variable. Serialised as `null`.
    Absent,
}

/// Reasons a single variable cannot be decoded. These never escape the decoder.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("the model assigns no value")]
    Missing,
    #[error("a {kind} variable cannot hold {value:?}")]
    KindMismatch { kind: VariableKind, value: RawValue },
    #[error("the value has a zero denominator")]
    ZeroDenominator,
    #[error("the value is not a finite number")]
    NonFinite,
}

/// Decodes the value of every variable in `registry`.
pub fn decode_solution(registry: &VariableRegistry, model: &impl ModelLookup) -> Solution {
    registry
        .iter()
        .map(|variable| (variable.name().to_owned(), decode_value(variable, model)))
        .collect()
}

/// Decodes the value of `variable`, or [`DecodedValue::Absent`] if that is not possible.
pub fn decode_value(variable: &Variable, model: &impl ModelLookup) -> DecodedValue {
    match try_decode_value(variable, model) {
        Ok(value) => value,
        Err(error) => {
            debug!("decoding '{}' as absent: {error}", variable.name());
            DecodedValue::Absent
        }
    }
}

fn try_decode_value(
    variable: &Variable,
    model: &impl ModelLookup,
) -> Result<DecodedValue, DecodeError> {
    let value = model.lookup(variable).ok_or(DecodeError::Missing)?;

    match (variable.kind(), value) {
        (VariableKind::Integer, RawValue::Integer(integer)) => Ok(DecodedValue::Integer(integer)),
        (VariableKind::Boolean, RawValue::Boolean(flag)) => Ok(DecodedValue::Boolean(flag)),
        (VariableKind::Real, RawValue::Integer(integer)) => {
            Ok(DecodedValue::Real(round_real(integer as f64)?))
        }
        (
            VariableKind::Real,
            RawValue::Rational {
                numerator,
                denominator,
            },
        ) => {
            if denominator == 0 {
                return Err(DecodeError::ZeroDenominator);
            }
            Ok(DecodedValue::Real(round_real(
                numerator as f64 / denominator as f64,
            )?))
        }
        (kind, value) => Err(DecodeError::KindMismatch { kind, value }),
    }
}

fn round_real(value: f64) -> Result<f64, DecodeError> {
    let scale = 10_f64.powi(REAL_PRECISION);
    let rounded = (value * scale).round() / scale;

    if rounded.is_finite() {
        Ok(rounded)
    } else if value.is_finite() {
        // Too large to scale; such a value has no fractional digits worth rounding.
        Ok(value)
    } else {
        Err(DecodeError::NonFinite)
    }
}

/// The recorded constraints which the solver blames for unsatisfiability.
///
/// Names which are not in `ledger` are dropped, duplicates are removed, and the remaining names
/// are ordered by their position in the ledger. If the adapter has no core, the result is empty.
pub fn decode_core(adapter: &impl SolverAdapter, ledger: &ConstraintLedger) -> Vec<String> {
    let Some(core) = adapter.unsatisfiable_core() else {
        debug!("no unsatisfiable core available");
        return vec![];
    };

    let mut seen: HashSet<_> = HashSet::default();
    let mut positioned = core
        .into_iter()
        .filter_map(|name| match ledger.position(&name) {
            Some(position) => Some((position, name)),
            None => {
                debug!("ignoring unknown constraint '{name}' in the core");
                None
            }
        })
        .filter(|&(position, _)| seen.insert(position))
        .collect::<Vec<_>>();
    positioned.sort_unstable_by_key(|&(position, _)| position);

    positioned.into_iter().map(|(_, name)| name).collect()
}
