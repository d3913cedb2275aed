/// A node in the expression tree. Operations carry their operator name and
/// an ordered list of children; unary and binary operators are distinguished
/// solely by child count.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
  Number(f64),
  Variable(String),
  Operation { name: String, children: Vec<AstNode> },
}

impl AstNode {
  pub fn number(value: f64) -> Self {
    AstNode::Number(value)
  }

  pub fn variable(name: impl Into<String>) -> Self {
    AstNode::Variable(name.into())
  }

  pub fn unary(name: impl Into<String>, child: AstNode) -> Self {
    AstNode::Operation {
      name: name.into(),
      children: vec![child],
    }
  }

  pub fn binary(name: impl Into<String>, lhs: AstNode, rhs: AstNode) -> Self {
    AstNode::Operation {
      name: name.into(),
      children: vec![lhs, rhs],
    }
  }

  pub fn as_number(&self) -> Option<f64> {
    match self {
      AstNode::Number(value) => Some(*value),
      _ => None,
    }
  }
}

/// Format a numeric value for display: integral values print without a
/// trailing ".0", everything else uses the shortest round-trip form.
pub fn format_number(value: f64) -> String {
  if value.fract() == 0.0 && value.abs() < 1e15 {
    format!("{}", value as i64)
  } else {
    format!("{value}")
  }
}

fn infix_precedence(name: &str) -> Option<u8> {
  match name {
    "+" | "-" => Some(1),
    "*" | "/" => Some(2),
    "^" => Some(3),
    _ => None,
  }
}

fn node_precedence(node: &AstNode) -> Option<u8> {
  match node {
    AstNode::Operation { name, children } if children.len() == 2 => {
      infix_precedence(name)
    }
    _ => None,
  }
}

fn write_child(
  f: &mut std::fmt::Formatter<'_>,
  child: &AstNode,
  parenthesize: bool,
) -> std::fmt::Result {
  if parenthesize {
    write!(f, "({child})")
  } else {
    write!(f, "{child}")
  }
}

impl std::fmt::Display for AstNode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      AstNode::Number(value) => write!(f, "{}", format_number(*value)),
      AstNode::Variable(name) => write!(f, "{name}"),
      AstNode::Operation { name, children } => {
        match (name.as_str(), children.as_slice()) {
          ("negate", [child]) => {
            write!(f, "-")?;
            write_child(f, child, node_precedence(child).is_some())
          }
          (op, [lhs, rhs]) if infix_precedence(op).is_some() => {
            let prec = infix_precedence(op).unwrap_or(0);
            let left_parens = node_precedence(lhs)
              .is_some_and(|lp| lp < prec || (lp == prec && op == "^"));
            let right_parens = node_precedence(rhs)
              .is_some_and(|rp| rp < prec || (rp == prec && op != "^"));
            write_child(f, lhs, left_parens)?;
            if prec == 1 {
              write!(f, " {op} ")?;
            } else {
              write!(f, "{op}")?;
            }
            write_child(f, rhs, right_parens)
          }
          _ => {
            write!(f, "{name}(")?;
            for (i, child) in children.iter().enumerate() {
              if i > 0 {
                write!(f, ", ")?;
              }
              write!(f, "{child}")?;
            }
            write!(f, ")")
          }
        }
      }
    }
  }
}
