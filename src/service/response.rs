use arbiter_judge::generator::GeneratedCase;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCodeResponse {
  /// Standard output of the program.
  pub output: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateTestCaseResponse {
  pub results: Vec<GeneratedCase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleResponse {
  pub inputs: Vec<String>,
}

/// Body printed instead of a response when a request fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
  /// Snake case error kind, e.g. `syntax_error`.
  pub error: String,

  pub message: String,
}
