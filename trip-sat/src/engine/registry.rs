use log::trace;
use thiserror::Error;

use crate::containers::HashMap;
use crate::containers::KeyedVec;
use crate::expression::Expression;
use crate::solver::SolverAdapter;
use crate::solver::SolverError;
use crate::variables::Bounds;
use crate::variables::Variable;
use crate::variables::VariableId;
use crate::variables::VariableKind;

/// Errors related to declaring variables in the [`VariableRegistry`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("variable '{name}' is already declared")]
    DuplicateVariable { name: String },
    #[error("failed to declare variable '{name}': {source}")]
    Solver {
        name: String,
        #[source]
        source: SolverError,
    },
}

/// Creates and stores the decision variables of a single problem instance, keyed by name.
///
/// Declaring a variable also declares it in the solver and asserts its bounds as hard
/// constraints. Bound assertions are not recorded in the
/// [`ConstraintLedger`](super::ConstraintLedger).
#[derive(Debug, Default)]
pub struct VariableRegistry {
    variables: KeyedVec<VariableId, Variable>,
    by_name: HashMap<String, VariableId>,
}

impl VariableRegistry {
    /// Declares a new variable.
    ///
    /// Returns [`RegistryError::DuplicateVariable`] if `name` was declared before; in that case
    /// neither the registry nor the solver is modified. Bounds on a [`VariableKind::Boolean`]
    /// are ignored.
    pub fn declare(
        &mut self,
        adapter: &mut impl SolverAdapter,
        name: impl Into<String>,
        kind: VariableKind,
        bounds: Bounds,
    ) -> Result<VariableId, RegistryError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(RegistryError::DuplicateVariable { name });
        }

        let bounds = if kind.is_numeric() {
            bounds
        } else {
            Bounds::UNBOUNDED
        };

        let slot = self.variables.new_slot();
        let variable = Variable::new(slot.key(), name.clone(), kind, bounds);

        let solver_error = |source| RegistryError::Solver {
            name: name.clone(),
            source,
        };
        adapter.declare(&variable).map_err(solver_error)?;
        if let Some(min) = bounds.min {
            adapter
                .assert_hard(&Expression::greater_than_or_equals(variable.id(), min))
                .map_err(solver_error)?;
        }
        if let Some(max) = bounds.max {
            adapter
                .assert_hard(&Expression::less_than_or_equals(variable.id(), max))
                .map_err(solver_error)?;
        }

        trace!("declared {kind} variable '{name}' with bounds {bounds:?}");
        let id = slot.populate(variable);
        let _ = self.by_name.insert(name, id);

        Ok(id)
    }

    pub fn get(&self, id: VariableId) -> Option<&Variable> {
        self.variables.get(id)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Variable> {
        self.by_name.get(name).map(|&id| &self.variables[id])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Iterate over the variables in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    /// The names of all variables in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(Variable::name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::testing::RecordingAdapter;

    #[test]
    fn bounds_are_asserted_as_hard_constraints() {
        let mut adapter = RecordingAdapter::default();
        let mut registry = VariableRegistry::default();

        let day = registry
            .declare(
                &mut adapter,
                "start_day",
                VariableKind::Integer,
                Bounds::between(0.0, 365.0),
            )
            .expect("fresh name");

        assert_eq!(adapter.declared, vec!["start_day".to_owned()]);
        assert_eq!(
            adapter.hard,
            vec![
                Expression::greater_than_or_equals(day, 0.0),
                Expression::less_than_or_equals(day, 365.0),
            ]
        );
        assert!(adapter.tracked.is_empty());
    }

    #[test]
    fn duplicate_names_are_rejected_without_side_effects() {
        let mut adapter = RecordingAdapter::default();
        let mut registry = VariableRegistry::default();

        let _ = registry
            .declare(
                &mut adapter,
                "total_cost",
                VariableKind::Real,
                Bounds::at_least(0.0),
            )
            .expect("fresh name");
        let result = registry.declare(
            &mut adapter,
            "total_cost",
            VariableKind::Integer,
            Bounds::UNBOUNDED,
        );

        assert_eq!(
            result,
            Err(RegistryError::DuplicateVariable {
                name: "total_cost".to_owned()
            })
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(adapter.declared.len(), 1);
        assert_eq!(adapter.hard.len(), 1);
        assert_eq!(
            registry
                .get_by_name("total_cost")
                .map(|variable| variable.kind()),
            Some(VariableKind::Real)
        );
    }

    #[test]
    fn boolean_bounds_are_dropped() {
        let mut adapter = RecordingAdapter::default();
        let mut registry = VariableRegistry::default();

        let flag = registry
            .declare(
                &mut adapter,
                "hotel_selected",
                VariableKind::Boolean,
                Bounds::between(0.0, 1.0),
            )
            .expect("fresh name");

        assert!(adapter.hard.is_empty());
        assert!(registry.get(flag).is_some_and(|v| v.bounds().is_unbounded()));
    }

    #[test]
    fn iteration_follows_declaration_order() {
        let mut adapter = RecordingAdapter::default();
        let mut registry = VariableRegistry::default();

        for name in ["c", "a", "b"] {
            let _ = registry
                .declare(&mut adapter, name, VariableKind::Boolean, Bounds::UNBOUNDED)
                .expect("fresh name");
        }

        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["c", "a", "b"]);
    }
}
