//! Input DSL.
//!
//! A DSL source is a chain of calls, e.g. `int(1..100).array(3..5, unique=true)`.
//! It is split into call expressions, parsed into [`CallNode`]s and evaluated
//! into a [`Generator`] producing one random [`Value`] per call.

mod builtin;
mod dictionary;
mod eval;
mod parse;
mod split;
mod value;

use thiserror::Error;

pub use self::{
  builtin::Builtin,
  eval::{evaluate, evaluate_seeded, Evaluator, Generator, Sampler},
  parse::{parse, Arg, CallNode, Literal, OptionValue},
  split::split,
  value::{format, Value},
};

/// Parse and evaluate a DSL source with the default builtins.
pub fn compile(source: &str) -> Result<Generator, Error> {
  evaluate(&parse(source)?)
}

/// Errors when parsing or evaluating a DSL source.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
  #[error("syntax error at `{segment}`: {reason}")]
  Syntax { segment: String, reason: String },

  #[error("unknown function: {0}")]
  UnknownFunction(String),

  #[error("invalid argument of `{function}`: {reason}")]
  InvalidArgument { function: String, reason: String },

  /// A unique array could not collect enough distinct elements.
  #[error("cannot draw {wanted} distinct values, only found {found}")]
  Exhausted { wanted: usize, found: usize },
}

impl Error {
  pub(crate) fn syntax(segment: &str, reason: &str) -> Self {
    Self::Syntax {
      segment: segment.to_string(),
      reason: reason.to_string(),
    }
  }

  pub(crate) fn invalid(function: &str, reason: impl Into<String>) -> Self {
    Self::InvalidArgument {
      function: function.to_string(),
      reason: reason.into(),
    }
  }

  pub fn kind(&self) -> &'static str {
    match self {
      Error::Syntax { .. } => "syntax_error",
      Error::UnknownFunction(_) => "unknown_function",
      Error::InvalidArgument { .. } => "invalid_argument",
      Error::Exhausted { .. } => "exhausted",
    }
  }
}
