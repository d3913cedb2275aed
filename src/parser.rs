use pest::iterators::Pair;

use crate::Rule;
use crate::syntax::AstNode;

/// A lowered top-level statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
  Assignment { name: String, expr: AstNode },
  Expression(AstNode),
}

// The unwraps below rely on shapes the grammar guarantees: a matched rule
// always carries the inner pairs its production names.

pub fn lower_program(program: Pair<Rule>) -> Statement {
  let statement = program
    .into_inner()
    .find(|pair| pair.as_rule() == Rule::Statement)
    .unwrap();
  lower_statement(statement)
}

fn lower_statement(pair: Pair<Rule>) -> Statement {
  let inner = pair.into_inner().next().unwrap();
  match inner.as_rule() {
    Rule::Assignment => {
      let mut parts = inner.into_inner();
      let name = parts.next().unwrap().as_str().to_string();
      let expr = lower_expression(parts.next().unwrap());
      Statement::Assignment { name, expr }
    }
    _ => Statement::Expression(lower_expression(inner)),
  }
}

pub fn lower_expression(pair: Pair<Rule>) -> AstNode {
  let mut inner = pair.into_inner();
  let mut node = lower_term(inner.next().unwrap());
  while let Some(op) = inner.next() {
    let rhs = lower_term(inner.next().unwrap());
    node = AstNode::binary(op.as_str(), node, rhs);
  }
  node
}

fn lower_term(pair: Pair<Rule>) -> AstNode {
  let mut inner = pair.into_inner();
  let mut node = lower_power(inner.next().unwrap());
  while let Some(op) = inner.next() {
    let rhs = lower_power(inner.next().unwrap());
    node = AstNode::binary(op.as_str(), node, rhs);
  }
  node
}

fn lower_power(pair: Pair<Rule>) -> AstNode {
  let mut operands: Vec<AstNode> = pair.into_inner().map(lower_unary).collect();
  let mut node = operands.pop().unwrap();
  while let Some(lhs) = operands.pop() {
    node = AstNode::binary("^", lhs, node);
  }
  node
}

fn lower_unary(pair: Pair<Rule>) -> AstNode {
  let inner = pair.into_inner().next().unwrap();
  match inner.as_rule() {
    Rule::Negate => {
      let operand = lower_unary(inner.into_inner().next().unwrap());
      AstNode::unary("negate", operand)
    }
    _ => lower_primary(inner),
  }
}

fn lower_primary(pair: Pair<Rule>) -> AstNode {
  let inner = pair.into_inner().next().unwrap();
  match inner.as_rule() {
    Rule::Number => AstNode::Number(inner.as_str().parse().unwrap()),
    Rule::Call => lower_call(inner),
    Rule::Identifier => AstNode::variable(inner.as_str()),
    _ => lower_expression(inner),
  }
}

fn lower_call(pair: Pair<Rule>) -> AstNode {
  let mut inner = pair.into_inner();
  let name = inner.next().unwrap().as_str().to_string();
  let children = match inner.next() {
    Some(arguments) => arguments.into_inner().map(lower_expression).collect(),
    None => Vec::new(),
  };
  AstNode::Operation { name, children }
}
