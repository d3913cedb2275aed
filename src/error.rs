use thiserror::Error;

use crate::Rule;

/// Errors raised while evaluating, simplifying, or plotting an expression
/// tree. All of these are terminal for the current call; there are no
/// retries and no partial results.
///
/// Floating-point edge cases (division by zero, negative base to a
/// fractional power) follow IEEE-754 propagation and are never reported
/// through this enum.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
  #[error("Undefined variable: {0}")]
  UndefinedVariable(String),
  #[error("Unknown operation: {0}")]
  UnknownOperation(String),
  #[error("{name} expects {expected} argument(s), got {found}")]
  MalformedArity {
    name: String,
    expected: usize,
    found: usize,
  },
  #[error("Variable already defined: {0}")]
  VariableAlreadyDefined(String),
  #[error("Plot range is inverted: min {min} is not below max {max}")]
  RangeInverted { min: f64, max: f64 },
  #[error("Plot step must be positive, got {0}")]
  NonPositiveStep(f64),
}

/// Errors surfaced by the statement layer on top of [`EvalError`].
#[derive(Error, Debug)]
pub enum CalcError {
  #[error("Parse error: {0}")]
  ParseError(#[from] Box<pest::error::Error<Rule>>),
  #[error("Empty input")]
  EmptyInput,
  #[error("Evaluation error: {0}")]
  EvaluationError(#[from] EvalError),
}
