use std::collections::HashMap;

use crate::error::EvalError;
use crate::syntax::AstNode;

/// Expected child count for each recognized operator name. `simplify` and
/// `plot` are deliberately absent: the statement layer strips them before
/// evaluation, so here they are just unknown operations.
fn expected_arity(name: &str) -> Option<usize> {
  match name {
    "negate" | "sin" | "cos" | "toDouble" => Some(1),
    "+" | "-" | "*" | "/" | "^" => Some(2),
    _ => None,
  }
}

/// Recursively reduce `node` to a double, resolving variable references
/// through `variables`. Purely functional over its inputs; recursion depth
/// is bounded by the depth of the tree.
pub fn evaluate_to_number(
  variables: &HashMap<String, AstNode>,
  node: &AstNode,
) -> Result<f64, EvalError> {
  match node {
    AstNode::Number(value) => Ok(*value),
    AstNode::Variable(name) => match variables.get(name) {
      None => Err(EvalError::UndefinedVariable(name.clone())),
      // Chained variable-to-variable bindings resolve transitively.
      Some(bound) => evaluate_to_number(variables, bound),
    },
    AstNode::Operation { name, children } => {
      evaluate_operation(variables, name, children)
    }
  }
}

fn evaluate_operation(
  variables: &HashMap<String, AstNode>,
  name: &str,
  children: &[AstNode],
) -> Result<f64, EvalError> {
  match (name, children) {
    // Pass-through marker at evaluation time.
    ("toDouble", [inner]) => evaluate_to_number(variables, inner),
    ("negate", [inner]) => Ok(-evaluate_to_number(variables, inner)?),
    ("sin", [inner]) => Ok(evaluate_to_number(variables, inner)?.sin()),
    ("cos", [inner]) => Ok(evaluate_to_number(variables, inner)?.cos()),
    ("+", [lhs, rhs]) => Ok(
      evaluate_to_number(variables, lhs)? + evaluate_to_number(variables, rhs)?,
    ),
    ("-", [lhs, rhs]) => Ok(
      evaluate_to_number(variables, lhs)? - evaluate_to_number(variables, rhs)?,
    ),
    ("*", [lhs, rhs]) => Ok(
      evaluate_to_number(variables, lhs)? * evaluate_to_number(variables, rhs)?,
    ),
    // Division by zero follows IEEE-754 (infinity/NaN), never an error.
    ("/", [lhs, rhs]) => Ok(
      evaluate_to_number(variables, lhs)? / evaluate_to_number(variables, rhs)?,
    ),
    ("^", [lhs, rhs]) => Ok(
      evaluate_to_number(variables, lhs)?
        .powf(evaluate_to_number(variables, rhs)?),
    ),
    _ => match expected_arity(name) {
      Some(expected) => Err(EvalError::MalformedArity {
        name: name.to_string(),
        expected,
        found: children.len(),
      }),
      None => Err(EvalError::UnknownOperation(name.to_string())),
    },
  }
}
