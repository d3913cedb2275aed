use std::collections::HashMap;

use crate::error::EvalError;
use crate::evaluator::evaluate_to_number;
use crate::syntax::AstNode;

/// Top-level simplification entry. Takes a `simplify(inner)` wrapper node
/// and returns the simplified form of `inner`; the wrapper is discarded and
/// never re-emitted. Anything else is rejected as a malformed tree.
pub fn simplify(
  variables: &HashMap<String, AstNode>,
  wrapper: AstNode,
) -> Result<AstNode, EvalError> {
  match wrapper {
    AstNode::Operation { name, mut children } if name == "simplify" => {
      if children.len() != 1 {
        return Err(EvalError::MalformedArity {
          name,
          expected: 1,
          found: children.len(),
        });
      }
      match children.pop() {
        Some(target) => simplify_node(variables, target),
        None => Err(EvalError::MalformedArity {
          name,
          expected: 1,
          found: 0,
        }),
      }
    }
    AstNode::Operation { name, .. } => Err(EvalError::UnknownOperation(name)),
    AstNode::Number(_) | AstNode::Variable(_) => {
      Err(EvalError::UnknownOperation("simplify".to_string()))
    }
  }
}

/// Recursive rewrite: one-level variable substitution plus constant folding
/// of `+`, `-`, `*` over two numeric children. `/`, `^`, and the unary
/// operators are never folded, even with constant operands. Non-folded
/// operations are rebuilt with their (possibly folded) children; the tree is
/// never mutated in place.
pub fn simplify_node(
  variables: &HashMap<String, AstNode>,
  node: AstNode,
) -> Result<AstNode, EvalError> {
  match node {
    AstNode::Number(_) => Ok(node),
    AstNode::Variable(name) => match variables.get(&name) {
      // One level only: the substituted subtree is returned as bound.
      Some(bound) => Ok(bound.clone()),
      None => Ok(AstNode::Variable(name)),
    },
    AstNode::Operation { name, children } => {
      let children = children
        .into_iter()
        .map(|child| simplify_node(variables, child))
        .collect::<Result<Vec<_>, _>>()?;
      let foldable = matches!(name.as_str(), "+" | "-" | "*")
        && children.len() == 2
        && children.iter().all(|child| child.as_number().is_some());
      let rebuilt = AstNode::Operation { name, children };
      if foldable {
        let value = evaluate_to_number(variables, &rebuilt)?;
        Ok(AstNode::Number(value))
      } else {
        Ok(rebuilt)
      }
    }
  }
}
