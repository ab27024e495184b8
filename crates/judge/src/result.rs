use serde::{Deserialize, Serialize};

/// Outcome of a program on a single test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TestOutcome {
  Passed,
  Failed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
  },
}

impl TestOutcome {
  pub fn failed(message: impl Into<String>) -> Self {
    TestOutcome::Failed {
      message: Some(message.into()),
    }
  }

  pub fn is_passed(&self) -> bool {
    matches!(self, TestOutcome::Passed)
  }

  pub fn message(&self) -> Option<&str> {
    match self {
      TestOutcome::Passed => None,
      TestOutcome::Failed { message } => message.as_deref(),
    }
  }
}

/// Overall result of a submission.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  strum::EnumString,
  strum::Display,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
  Accepted,
  WrongAnswer,
  RuntimeError,
  CompileError,
}

/// Limit a message to 1024 characters.
pub fn limit_message(s: &str) -> String {
  const LIMIT: usize = 1024;
  if s.chars().count() <= LIMIT {
    return s.to_string();
  }
  return s.chars().take(LIMIT - 3).collect::<String>() + "...";
}

/// Describe where `output` first differs from `expected`.
pub(crate) fn diff_message(expected: &str, output: &str) -> String {
  let mut expected_lines = expected.split('\n');
  let mut output_lines = output.split('\n');
  let mut line = 1;

  loop {
    match (expected_lines.next(), output_lines.next()) {
      (Some(e), Some(o)) if e == o => line += 1,
      (Some(e), Some(o)) => {
        return limit_message(&format!(
          "line {}: expected {:?}, found {:?}",
          line, e, o
        ))
      }
      (Some(e), None) => {
        return limit_message(&format!("line {}: expected {:?}, found end of output", line, e))
      }
      (None, Some(o)) => {
        return limit_message(&format!("line {}: expected end of output, found {:?}", line, o))
      }
      (None, None) => return "output differs from the expected output".to_string(),
    }
  }
}
