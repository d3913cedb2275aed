use plotcalc::parse;
use plotcalc::parser::{Statement, lower_program};
use plotcalc::syntax::AstNode;

fn lower(input: &str) -> Statement {
  let program = parse(input).unwrap().next().unwrap();
  lower_program(program)
}

fn expr(input: &str) -> AstNode {
  match lower(input) {
    Statement::Expression(node) => node,
    other => panic!("expected an expression, got {other:?}"),
  }
}

fn num(value: f64) -> AstNode {
  AstNode::number(value)
}

#[cfg(test)]
mod tests {
  use plotcalc::Rule;

  use super::*;

  #[test]
  fn test_parse_calculation() {
    let pair = parse("1 + 2").unwrap().next().unwrap();
    assert_eq!(pair.as_rule(), Rule::Program);
  }

  #[test]
  fn test_parse_assignment() {
    let pair = parse("x := 5").unwrap().next().unwrap();
    assert_eq!(pair.as_rule(), Rule::Program);
  }

  #[test]
  fn test_parse_plot_call() {
    let pair = parse("plot(3*x, x, 2, 5, 0.5)").unwrap().next().unwrap();
    assert_eq!(pair.as_rule(), Rule::Program);
  }

  #[test]
  fn test_parse_rejects_trailing_operator() {
    assert!(parse("3 +").is_err());
    assert!(parse("1 2").is_err());
  }

  #[test]
  fn test_scientific_notation() {
    assert_eq!(expr("1e3"), num(1000.0));
    assert_eq!(expr("2.5E-1"), num(0.25));
  }

  #[test]
  fn test_precedence() {
    assert_eq!(
      expr("2 + 3*4"),
      AstNode::binary("+", num(2.0), AstNode::binary("*", num(3.0), num(4.0)))
    );
    assert_eq!(
      expr("(2 + 3)*4"),
      AstNode::binary("*", AstNode::binary("+", num(2.0), num(3.0)), num(4.0))
    );
  }

  #[test]
  fn test_left_associative_subtraction() {
    assert_eq!(
      expr("10 - 3 - 2"),
      AstNode::binary("-", AstNode::binary("-", num(10.0), num(3.0)), num(2.0))
    );
  }

  #[test]
  fn test_right_associative_power() {
    assert_eq!(
      expr("2^3^2"),
      AstNode::binary("^", num(2.0), AstNode::binary("^", num(3.0), num(2.0)))
    );
  }

  #[test]
  fn test_negation_lowers_to_negate() {
    assert_eq!(
      expr("-x"),
      AstNode::unary("negate", AstNode::variable("x"))
    );
    assert_eq!(expr("--5"), AstNode::unary("negate", AstNode::unary("negate", num(5.0))));
  }

  #[test]
  fn test_call_lowering() {
    assert_eq!(
      expr("sin(x)"),
      AstNode::unary("sin", AstNode::variable("x"))
    );
    // Any name may be called; validation happens at evaluation time.
    let plot = expr("plot(y, y, 0, 1, 1)");
    match plot {
      AstNode::Operation { name, children } => {
        assert_eq!(name, "plot");
        assert_eq!(children.len(), 5);
      }
      other => panic!("expected an operation, got {other:?}"),
    }
  }

  #[test]
  fn test_assignment_lowering() {
    match lower("x := 2 + 3") {
      Statement::Assignment { name, expr } => {
        assert_eq!(name, "x");
        assert_eq!(expr, AstNode::binary("+", num(2.0), num(3.0)));
      }
      other => panic!("expected an assignment, got {other:?}"),
    }
  }
}
