use std::collections::HashMap;

use crate::render::{NullRenderer, Renderer};
use crate::syntax::AstNode;

/// The active variable-binding context plus the rendering sink handle.
/// Bindings are added by top-level assignments and read-only during any
/// single evaluation, simplification, or plot call.
pub struct Environment {
  pub variables: HashMap<String, AstNode>,
  pub renderer: Box<dyn Renderer>,
}

impl Environment {
  pub fn new(renderer: Box<dyn Renderer>) -> Self {
    Environment {
      variables: HashMap::new(),
      renderer,
    }
  }

  /// An environment whose renderer discards every plot request.
  pub fn headless() -> Self {
    Environment::new(Box::new(NullRenderer))
  }

  /// Bind `name` to `node`; rebinding replaces the previous value.
  pub fn bind(&mut self, name: impl Into<String>, node: AstNode) {
    self.variables.insert(name.into(), node);
  }

  pub fn lookup(&self, name: &str) -> Option<&AstNode> {
    self.variables.get(name)
  }

  pub fn is_bound(&self, name: &str) -> bool {
    self.variables.contains_key(name)
  }
}
