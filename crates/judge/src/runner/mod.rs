//! Language runners.
//!
//! A runner executes a piece of code of one language with some standard input
//! in a fresh, isolated runtime and captures its standard output.

mod command;
mod func;
mod group;
mod registry;
mod stdin;
mod workdir;

use std::{io, time};

use async_trait::async_trait;
use thiserror::Error;

pub use self::{
  command::CommandRunner, func::FnRunner, group::ProcessGroup, registry::Registry,
  stdin::StdinCursor, workdir::WorkDir,
};

/// Capability to run code of one language.
#[async_trait]
pub trait LanguageRunner: Send + Sync {
  /// Language name this runner is registered under.
  fn name(&self) -> &str;

  fn version(&self) -> &str;

  /// Time limit of one execution, `None` to use the registry default.
  fn time_limit(&self) -> Option<time::Duration> {
    None
  }

  /// Run `code` with `stdin` as standard input.
  ///
  /// Every call must start a fresh runtime, no state is shared between calls.
  ///
  /// # Errors
  ///
  /// Returns an [`ExecutionError`] if the code fails to compile, raises,
  /// or the runtime itself fails.
  async fn execute(&self, code: &str, stdin: &str) -> Result<ExecutionResult, ExecutionError>;
}

/// Result of a normal run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
  /// Everything the program wrote to standard output.
  pub stdout: String,

  pub stderr: String,

  pub exit_code: Option<i32>,

  /// Wall time of the run.
  pub time: time::Duration,
}

impl ExecutionResult {
  pub fn from_stdout(stdout: impl Into<String>) -> Self {
    Self {
      stdout: stdout.into(),
      exit_code: Some(0),
      ..Default::default()
    }
  }
}

/// Error when a program does not run normally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecutionError {
  /// The program does not compile.
  #[error("compile failed: {message}")]
  Compile { message: String },

  /// The program raised, exited with a non-zero code or was signalled.
  #[error("runtime error (exit code: {exit_code:?}): {stderr}")]
  Runtime {
    exit_code: Option<i32>,
    stderr: String,
  },

  #[error("time limit exceeded ({0:?})")]
  Timeout(time::Duration),

  #[error("output limit exceeded ({0} bytes)")]
  OutputLimitExceeded(u64),

  /// The runtime could not be started or failed itself.
  #[error("sandbox error: {0}")]
  Sandbox(String),
}

impl ExecutionError {
  pub fn is_compile(&self) -> bool {
    matches!(self, ExecutionError::Compile { .. })
  }
}

impl From<io::Error> for ExecutionError {
  fn from(err: io::Error) -> Self {
    ExecutionError::Sandbox(err.to_string())
  }
}
