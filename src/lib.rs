use pest::Parser;
use pest_derive::Parser;

pub mod environment;
pub mod error;
pub mod evaluator;
pub mod parser;
pub mod plot;
pub mod render;
pub mod series;
pub mod simplify;
pub mod syntax;

pub use environment::Environment;
pub use error::{CalcError, EvalError};
pub use series::Series;
pub use syntax::AstNode;

use parser::Statement;
use render::{Renderer, SvgRenderer};

#[derive(Parser)]
#[grammar = "calculator.pest"]
pub struct CalculatorParser;

impl CalculatorParser {
  pub fn parse_statement(
    input: &str,
  ) -> Result<pest::iterators::Pairs<'_, Rule>, Box<pest::error::Error<Rule>>>
  {
    Self::parse(Rule::Program, input).map_err(Box::new)
  }
}

pub fn parse(
  input: &str,
) -> Result<pest::iterators::Pairs<'_, Rule>, Box<pest::error::Error<Rule>>> {
  CalculatorParser::parse_statement(input)
}

/// A stateful calculator session: one environment, fed one statement at a
/// time. Assignments persist across statements; every plain expression is
/// implicitly simplified before display.
pub struct Session {
  env: Environment,
}

impl Session {
  /// A session that renders plots to in-memory SVG.
  pub fn new() -> Self {
    Session::with_renderer(Box::new(SvgRenderer::new()))
  }

  /// A session whose plots are discarded. Useful for tests and piping.
  pub fn headless() -> Self {
    Session {
      env: Environment::headless(),
    }
  }

  pub fn with_renderer(renderer: Box<dyn Renderer>) -> Self {
    Session {
      env: Environment::new(renderer),
    }
  }

  pub fn environment(&self) -> &Environment {
    &self.env
  }

  /// The SVG produced by the most recent plot, if any.
  pub fn take_svg(&mut self) -> Option<String> {
    self.env.renderer.take_svg()
  }

  /// The most recent rendering failure, if any.
  pub fn take_warning(&mut self) -> Option<String> {
    self.env.renderer.take_warning()
  }

  /// Parse and run one statement, returning its display form.
  pub fn run(&mut self, input: &str) -> Result<String, CalcError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
      return Err(CalcError::EmptyInput);
    }
    let mut pairs = parse(trimmed)?;
    let program = pairs.next().ok_or(CalcError::EmptyInput)?;
    let result = match parser::lower_program(program) {
      Statement::Assignment { name, expr } => {
        let simplified = simplify::simplify_node(&self.env.variables, expr)?;
        self.env.bind(name, simplified.clone());
        simplified
      }
      Statement::Expression(expr) => self.dispatch(expr)?,
    };
    Ok(result.to_string())
  }

  /// Route a plain expression by its top node: plot and toDouble are
  /// special forms handled here; an explicit simplify wrapper passes
  /// through; everything else gets wrapped and implicitly simplified.
  fn dispatch(&mut self, expr: AstNode) -> Result<AstNode, EvalError> {
    match expr {
      AstNode::Operation { name, children } if name == "plot" => {
        let [target, variable, min, max, step] =
          match <[AstNode; 5]>::try_from(children) {
            Ok(args) => args,
            Err(children) => {
              return Err(EvalError::MalformedArity {
                name,
                expected: 5,
                found: children.len(),
              });
            }
          };
        let variable = match variable {
          AstNode::Variable(variable) => variable,
          // Loop argument must be a plain identifier.
          _ => return Err(EvalError::UnknownOperation(name)),
        };
        plot::plot(&mut self.env, target, &variable, &min, &max, &step)
      }
      AstNode::Operation { name, children } if name == "toDouble" => {
        if children.len() != 1 {
          return Err(EvalError::MalformedArity {
            name,
            expected: 1,
            found: children.len(),
          });
        }
        let value = evaluator::evaluate_to_number(
          &self.env.variables,
          &children[0],
        )?;
        Ok(AstNode::Number(value))
      }
      AstNode::Operation { name, children } if name == "simplify" => {
        let wrapper = AstNode::Operation { name, children };
        simplify::simplify(&self.env.variables, wrapper)
      }
      other => {
        let wrapper = AstNode::unary("simplify", other);
        simplify::simplify(&self.env.variables, wrapper)
      }
    }
  }
}

impl Default for Session {
  fn default() -> Self {
    Session::new()
  }
}

/// Run a headless session over one or more statements (separated by `;` or
/// newlines) and return the display form of the last one.
pub fn interpret(input: &str) -> Result<String, CalcError> {
  let mut session = Session::headless();
  let mut last = None;
  for statement in input.split([';', '\n']) {
    let statement = statement.trim();
    if statement.is_empty() {
      continue;
    }
    last = Some(session.run(statement)?);
  }
  last.ok_or(CalcError::EmptyInput)
}
