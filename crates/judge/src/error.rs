use thiserror::Error;

use crate::{dsl, lang, runner};

/// Any error the judging core reports to its caller.
#[derive(Debug, Error, Clone)]
pub enum Error {
  #[error(transparent)]
  Dsl(#[from] dsl::Error),

  #[error(transparent)]
  UnsupportedLanguage(#[from] lang::UnsupportedLanguageError),

  #[error(transparent)]
  Execution(#[from] runner::ExecutionError),

  /// The caller broke a contract, e.g. asked for zero test cases.
  #[error("validation error: {0}")]
  Validation(String),
}

impl Error {
  /// Short snake_case name of the error kind, used in error responses.
  pub fn kind(&self) -> &'static str {
    match self {
      Error::Dsl(e) => e.kind(),
      Error::UnsupportedLanguage(_) => "unsupported_language",
      Error::Execution(_) => "execution_error",
      Error::Validation(_) => "validation_error",
    }
  }
}
