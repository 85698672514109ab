use std::fmt::Debug;
use std::fmt::Formatter;
use std::time::Duration;

use log::debug;
use log::warn;
use z3::ast::Ast;
use z3::ast::Bool;
use z3::ast::Int;
use z3::ast::Real;
use z3::Context;
use z3::Params;
use z3::SatResult;
use z3::Solver;

use super::ModelLookup;
use super::RawValue;
use super::SatisfiabilityOutcome;
use super::SolverAdapter;
use super::SolverError;
use crate::containers::HashMap;
use crate::expression::Comparator;
use crate::expression::Expression;
use crate::expression::LinearExpression;
use crate::variables::Variable;
use crate::variables::VariableId;
use crate::variables::VariableKind;

/// Largest magnitude for which an integral `f64` is an exact integer.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// The solver constant standing in for a declared variable.
#[derive(Clone, Debug)]
enum Constant<'ctx> {
    Integer(Int<'ctx>),
    Real(Real<'ctx>),
    Boolean(Bool<'ctx>),
}

/// A [`SolverAdapter`] backed by the Z3 SMT solver.
///
/// Integer, real, and boolean variables map onto the corresponding Z3 sorts. Tracked constraints
/// are asserted with `assert_and_track`, using a fresh boolean tracking constant per name.
/// Solver symbols are derived from variable ids and tracking positions, never from names.
pub struct Z3Adapter<'ctx> {
    context: &'ctx Context,
    solver: Solver<'ctx>,
    constants: HashMap<VariableId, (String, Constant<'ctx>)>,
    /// Tracking constants in the order the tracked constraints were asserted.
    tracking: Vec<(Bool<'ctx>, String)>,
    last_outcome: Option<SatisfiabilityOutcome>,
}

impl Debug for Z3Adapter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Z3Adapter")
            .field("num_constants", &self.constants.len())
            .field("num_tracked", &self.tracking.len())
            .field("last_outcome", &self.last_outcome)
            .finish()
    }
}

impl<'ctx> Z3Adapter<'ctx> {
    /// Creates a solver in `context`. If a `time_limit` is given, a check which exceeds it
    /// reports [`SatisfiabilityOutcome::Unknown`].
    pub fn new(context: &'ctx Context, time_limit: Option<Duration>) -> Self {
        let solver = Solver::new(context);

        if let Some(time_limit) = time_limit {
            let milliseconds = u32::try_from(time_limit.as_millis()).unwrap_or(u32::MAX);
            let mut params = Params::new(context);
            params.set_u32("timeout", milliseconds);
            solver.set_params(&params);
        }

        Z3Adapter {
            context,
            solver,
            constants: HashMap::default(),
            tracking: vec![],
            last_outcome: None,
        }
    }

    fn constant(&self, variable: VariableId) -> Result<&(String, Constant<'ctx>), SolverError> {
        self.constants
            .get(&variable)
            .ok_or(SolverError::UnknownVariable(variable))
    }

    fn translate(&self, expression: &Expression) -> Result<Bool<'ctx>, SolverError> {
        match expression {
            Expression::Compare {
                lhs,
                comparator,
                rhs,
            } => {
                if self.is_integral(lhs)? && self.is_integral(rhs)? {
                    let lhs = self.integer_term(lhs)?;
                    let rhs = self.integer_term(rhs)?;
                    Ok(match comparator {
                        Comparator::Less => lhs.lt(&rhs),
                        Comparator::LessOrEqual => lhs.le(&rhs),
                        Comparator::Equal => lhs._eq(&rhs),
                        Comparator::GreaterOrEqual => lhs.ge(&rhs),
                        Comparator::Greater => lhs.gt(&rhs),
                    })
                } else {
                    let lhs = self.real_term(lhs)?;
                    let rhs = self.real_term(rhs)?;
                    Ok(match comparator {
                        Comparator::Less => lhs.lt(&rhs),
                        Comparator::LessOrEqual => lhs.le(&rhs),
                        Comparator::Equal => lhs._eq(&rhs),
                        Comparator::GreaterOrEqual => lhs.ge(&rhs),
                        Comparator::Greater => lhs.gt(&rhs),
                    })
                }
            }
            Expression::BooleanEquals { variable, value } => match self.constant(*variable)? {
                (_, Constant::Boolean(flag)) => {
                    Ok(flag._eq(&Bool::from_bool(self.context, *value)))
                }
                (name, _) => Err(SolverError::NotBoolean(name.clone())),
            },
            Expression::And(conjuncts) => {
                let conjuncts = conjuncts
                    .iter()
                    .map(|conjunct| self.translate(conjunct))
                    .collect::<Result<Vec<_>, _>>()?;
                let conjuncts = conjuncts.iter().collect::<Vec<_>>();
                Ok(Bool::and(self.context, &conjuncts))
            }
        }
    }

    /// Whether `expression` can be expressed in the integer sort: every variable is an integer
    /// and every number is an exact integer.
    fn is_integral(&self, expression: &LinearExpression) -> Result<bool, SolverError> {
        let is_exact_integer = |value: f64| value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER;

        for &(coefficient, variable) in expression.terms() {
            match self.constant(variable)? {
                (_, Constant::Integer(_)) => {}
                (_, Constant::Real(_)) => return Ok(false),
                (name, Constant::Boolean(_)) => return Err(SolverError::NotNumeric(name.clone())),
            }
            if !is_exact_integer(coefficient) {
                return Ok(false);
            }
        }

        Ok(is_exact_integer(expression.constant_term()))
    }

    fn integer_term(&self, expression: &LinearExpression) -> Result<Int<'ctx>, SolverError> {
        let mut summands = vec![];
        for &(coefficient, variable) in expression.terms() {
            let Constant::Integer(constant) = &self.constant(variable)?.1 else {
                return Err(SolverError::UnknownVariable(variable));
            };
            if coefficient == 1.0 {
                summands.push(constant.clone());
            } else {
                let coefficient = Int::from_i64(self.context, coefficient as i64);
                summands.push(Int::mul(self.context, &[&coefficient, constant]));
            }
        }
        if expression.constant_term() != 0.0 || summands.is_empty() {
            summands.push(Int::from_i64(
                self.context,
                expression.constant_term() as i64,
            ));
        }

        let summands = summands.iter().collect::<Vec<_>>();
        Ok(if summands.len() == 1 {
            summands[0].clone()
        } else {
            Int::add(self.context, &summands)
        })
    }

    fn real_term(&self, expression: &LinearExpression) -> Result<Real<'ctx>, SolverError> {
        let mut summands = vec![];
        for &(coefficient, variable) in expression.terms() {
            let term = match self.constant(variable)? {
                (_, Constant::Real(constant)) => constant.clone(),
                (_, Constant::Integer(constant)) => Real::from_int(constant),
                (name, Constant::Boolean(_)) => {
                    return Err(SolverError::NotNumeric(name.clone()));
                }
            };
            if coefficient == 1.0 {
                summands.push(term);
            } else {
                let coefficient = self.real_constant(coefficient)?;
                summands.push(Real::mul(self.context, &[&coefficient, &term]));
            }
        }
        if expression.constant_term() != 0.0 || summands.is_empty() {
            summands.push(self.real_constant(expression.constant_term())?);
        }

        let summands = summands.iter().collect::<Vec<_>>();
        Ok(if summands.len() == 1 {
            summands[0].clone()
        } else {
            Real::add(self.context, &summands)
        })
    }

    /// The exact rational value of the shortest decimal representation of `value`.
    fn real_constant(&self, value: f64) -> Result<Real<'ctx>, SolverError> {
        let (numerator, denominator) = decimal_fraction(value)?;
        let magnitude = Real::from_real_str(self.context, &numerator, &denominator)
            .ok_or_else(|| SolverError::UnrepresentableConstant(value.to_string()))?;

        Ok(if value < 0.0 {
            magnitude.unary_minus()
        } else {
            magnitude
        })
    }
}

/// Splits the magnitude of `value` into decimal numerator and denominator strings, e.g. `-800.5`
/// becomes `("8005", "10")`.
fn decimal_fraction(value: f64) -> Result<(String, String), SolverError> {
    if !value.is_finite() {
        return Err(SolverError::UnrepresentableConstant(value.to_string()));
    }

    // `Display` for `f64` never uses scientific notation.
    let text = value.abs().to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let digits = format!("{whole}{fraction}");
    let numerator = match digits.trim_start_matches('0') {
        "" => "0".to_owned(),
        trimmed => trimmed.to_owned(),
    };
    let denominator = format!("1{}", "0".repeat(fraction.len()));

    Ok((numerator, denominator))
}

impl<'ctx> SolverAdapter for Z3Adapter<'ctx> {
    type Model = Z3Model<'ctx>;

    fn declare(&mut self, variable: &Variable) -> Result<(), SolverError> {
        // Solver symbols are named after the id; variable names may hold any text, including
        // NUL characters which Z3 symbols cannot.
        let symbol = variable.id().to_string();
        let constant = match variable.kind() {
            VariableKind::Integer => Constant::Integer(Int::new_const(self.context, symbol)),
            VariableKind::Real => Constant::Real(Real::new_const(self.context, symbol)),
            VariableKind::Boolean => Constant::Boolean(Bool::new_const(self.context, symbol)),
        };

        let _ = self
            .constants
            .insert(variable.id(), (variable.name().to_owned(), constant));
        Ok(())
    }

    fn assert_hard(&mut self, expression: &Expression) -> Result<(), SolverError> {
        let assertion = self.translate(expression)?;
        self.solver.assert(&assertion);
        Ok(())
    }

    fn assert_tracked(&mut self, expression: &Expression, name: &str) -> Result<(), SolverError> {
        let assertion = self.translate(expression)?;
        let tracking = Bool::new_const(self.context, format!("track!{}", self.tracking.len()));
        self.solver.assert_and_track(&assertion, &tracking);
        self.tracking.push((tracking, name.to_owned()));
        Ok(())
    }

    fn check_satisfiability(&mut self) -> Result<SatisfiabilityOutcome, SolverError> {
        let outcome = match self.solver.check() {
            SatResult::Sat => SatisfiabilityOutcome::Satisfiable,
            SatResult::Unsat => SatisfiabilityOutcome::Unsatisfiable,
            SatResult::Unknown => {
                debug!(
                    "solver gave up: {}",
                    self.solver
                        .get_reason_unknown()
                        .unwrap_or_else(|| "no reason given".to_owned())
                );
                SatisfiabilityOutcome::Unknown
            }
        };

        self.last_outcome = Some(outcome);
        Ok(outcome)
    }

    fn current_model(&self) -> Option<Self::Model> {
        if self.last_outcome != Some(SatisfiabilityOutcome::Satisfiable) {
            return None;
        }

        let model = self.solver.get_model();
        if model.is_none() {
            warn!("the solver reported satisfiable but produced no model");
        }

        model.map(|model| Z3Model {
            model,
            constants: self
                .constants
                .iter()
                .map(|(&id, (_, constant))| (id, constant.clone()))
                .collect(),
        })
    }

    fn unsatisfiable_core(&self) -> Option<Vec<String>> {
        if self.last_outcome != Some(SatisfiabilityOutcome::Unsatisfiable) {
            return None;
        }

        let core = self.solver.get_unsat_core();
        Some(
            core.iter()
                .filter_map(|literal| {
                    let name = self
                        .tracking
                        .iter()
                        .find(|(tracking, _)| tracking == literal)
                        .map(|(_, name)| name.clone());
                    if name.is_none() {
                        debug!("ignoring untracked core literal {literal}");
                    }
                    name
                })
                .collect(),
        )
    }
}

/// A satisfying assignment produced by a [`Z3Adapter`].
#[derive(Debug)]
pub struct Z3Model<'ctx> {
    model: z3::Model<'ctx>,
    constants: HashMap<VariableId, Constant<'ctx>>,
}

impl ModelLookup for Z3Model<'_> {
    fn lookup(&self, variable: &Variable) -> Option<RawValue> {
        // Without model completion, a constant the model does not mention evaluates to itself,
        // which is not a numeral and therefore yields `None` below.
        match self.constants.get(&variable.id())? {
            Constant::Integer(constant) => self
                .model
                .eval(constant, false)
                .and_then(|value| value.as_i64())
                .map(RawValue::Integer),
            Constant::Real(constant) => self
                .model
                .eval(constant, false)
                .and_then(|value| value.as_real())
                .map(|(numerator, denominator)| RawValue::Rational {
                    numerator,
                    denominator,
                }),
            Constant::Boolean(constant) => self
                .model
                .eval(constant, false)
                .and_then(|value| value.as_bool())
                .map(RawValue::Boolean),
        }
    }
}
