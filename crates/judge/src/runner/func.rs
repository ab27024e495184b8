use async_trait::async_trait;

use super::{ExecutionError, ExecutionResult, LanguageRunner};

/// A runner backed by an in-process function of `(code, stdin)`.
///
/// Useful for native handlers that need no sandbox, and for tests.
pub struct FnRunner<F> {
  name: String,
  version: String,
  f: F,
}

impl<F> FnRunner<F>
where
  F: Fn(&str, &str) -> Result<ExecutionResult, ExecutionError> + Send + Sync,
{
  pub fn new(name: &str, version: &str, f: F) -> Self {
    Self {
      name: name.to_string(),
      version: version.to_string(),
      f,
    }
  }
}

#[async_trait]
impl<F> LanguageRunner for FnRunner<F>
where
  F: Fn(&str, &str) -> Result<ExecutionResult, ExecutionError> + Send + Sync,
{
  fn name(&self) -> &str {
    &self.name
  }

  fn version(&self) -> &str {
    &self.version
  }

  async fn execute(&self, code: &str, stdin: &str) -> Result<ExecutionResult, ExecutionError> {
    (self.f)(code, stdin)
  }
}
