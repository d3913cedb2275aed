use std::collections::HashMap;

use crate::environment::Environment;
use crate::error::EvalError;
use crate::evaluator::evaluate_to_number;
use crate::series::Series;
use crate::simplify::simplify_node;
use crate::syntax::AstNode;

/// Sweep `variable` from `min` to `max` (inclusive) at `step`, evaluating
/// `target` at each sample, and hand the resulting coordinate series to the
/// environment's rendering sink.
///
/// `min`, `max`, and `step` may be arbitrary expressions; they are evaluated
/// against the environment's bindings before the sweep. The loop variable
/// must not already be bound.
///
/// Returns a placeholder `Number(1)` so plot invocations compose wherever an
/// expression is expected; the value carries no meaning.
pub fn plot(
  env: &mut Environment,
  target: AstNode,
  variable: &str,
  min: &AstNode,
  max: &AstNode,
  step: &AstNode,
) -> Result<AstNode, EvalError> {
  if env.is_bound(variable) {
    return Err(EvalError::VariableAlreadyDefined(variable.to_string()));
  }
  let min = evaluate_to_number(&env.variables, min)?;
  let max = evaluate_to_number(&env.variables, max)?;
  if min >= max {
    return Err(EvalError::RangeInverted { min, max });
  }
  let step = evaluate_to_number(&env.variables, step)?;
  if step <= 0.0 {
    return Err(EvalError::NonPositiveStep(step));
  }

  // Fold constant subexpressions once, not on every sample. Environment
  // bindings are substituted here, so the sweep below only needs the loop
  // variable in scope.
  let function = simplify_node(&env.variables, target)?;

  let mut xs: Series<f64> = Series::new();
  let mut ys: Series<f64> = Series::new();
  let mut shadow: HashMap<String, AstNode> = HashMap::with_capacity(1);

  // Inclusive upper bound; floating-point accumulation error at the
  // boundary is accepted rather than corrected by step counting.
  let mut value = min;
  while value <= max {
    shadow.insert(variable.to_string(), AstNode::Number(value));
    let result = evaluate_to_number(&shadow, &function)?;
    xs.push(value);
    ys.push(result);
    value += step;
  }

  let caption = function.to_string();
  env
    .renderer
    .draw_scatter_plot(&caption, variable, &caption, &xs, &ys);

  Ok(AstNode::Number(1.0))
}
