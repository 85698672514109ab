//! An in-memory [`SolverAdapter`] which records everything it is told and answers with a scripted
//! outcome.
use super::ModelLookup;
use super::RawValue;
use super::SatisfiabilityOutcome;
use super::SolverAdapter;
use super::SolverError;
use crate::containers::HashMap;
use crate::expression::Expression;
use crate::variables::Variable;

#[derive(Debug)]
pub(crate) struct RecordingAdapter {
    pub(crate) declared: Vec<String>,
    pub(crate) hard: Vec<Expression>,
    pub(crate) tracked: Vec<(String, Expression)>,
    pub(crate) num_checks: usize,
    /// What [`SolverAdapter::check_satisfiability`] answers.
    pub(crate) outcome: Result<SatisfiabilityOutcome, SolverError>,
    /// Values handed out by the model, by variable name.
    pub(crate) model: HashMap<String, RawValue>,
    pub(crate) core: Vec<String>,
    pub(crate) checked: Option<SatisfiabilityOutcome>,
}

impl Default for RecordingAdapter {
    fn default() -> Self {
        RecordingAdapter {
            declared: vec![],
            hard: vec![],
            tracked: vec![],
            num_checks: 0,
            outcome: Ok(SatisfiabilityOutcome::Satisfiable),
            model: HashMap::default(),
            core: vec![],
            checked: None,
        }
    }
}

impl RecordingAdapter {
    pub(crate) fn answering(outcome: SatisfiabilityOutcome) -> Self {
        RecordingAdapter {
            outcome: Ok(outcome),
            ..Default::default()
        }
    }

    pub(crate) fn with_value(mut self, name: &str, value: RawValue) -> Self {
        let _ = self.model.insert(name.to_owned(), value);
        self
    }

    pub(crate) fn with_core(mut self, core: &[&str]) -> Self {
        self.core = core.iter().map(|&name| name.to_owned()).collect();
        self
    }

    /// The names of all tracked constraints, in assertion order.
    pub(crate) fn tracked_names(&self) -> Vec<&str> {
        self.tracked.iter().map(|(name, _)| name.as_str()).collect()
    }
}

#[derive(Debug)]
pub(crate) struct RecordedModel {
    values: HashMap<String, RawValue>,
}

impl ModelLookup for RecordedModel {
    fn lookup(&self, variable: &Variable) -> Option<RawValue> {
        self.values.get(variable.name()).copied()
    }
}

impl SolverAdapter for RecordingAdapter {
    type Model = RecordedModel;

    fn declare(&mut self, variable: &Variable) -> Result<(), SolverError> {
        self.declared.push(variable.name().to_owned());
        Ok(())
    }

    fn assert_hard(&mut self, expression: &Expression) -> Result<(), SolverError> {
        self.hard.push(expression.clone());
        Ok(())
    }

    fn assert_tracked(&mut self, expression: &Expression, name: &str) -> Result<(), SolverError> {
        self.tracked.push((name.to_owned(), expression.clone()));
        Ok(())
    }

    fn check_satisfiability(&mut self) -> Result<SatisfiabilityOutcome, SolverError> {
        self.num_checks += 1;
        let outcome = self.outcome.clone()?;
        self.checked = Some(outcome);
        Ok(outcome)
    }

    fn current_model(&self) -> Option<Self::Model> {
        (self.checked == Some(SatisfiabilityOutcome::Satisfiable)).then(|| RecordedModel {
            values: self.model.clone(),
        })
    }

    fn unsatisfiable_core(&self) -> Option<Vec<String>> {
        (self.checked == Some(SatisfiabilityOutcome::Unsatisfiable)).then(|| self.core.clone())
    }
}
