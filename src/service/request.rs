use arbiter_judge::{submission::TestCase, SupportedLanguage};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunCodeRequest {
  pub code: String,

  #[serde(default)]
  pub input: String,

  pub language: SupportedLanguage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTestCaseRequest {
  /// Reference program.
  pub code: String,

  pub count: i64,

  /// Input DSL, e.g. `int(1..100).array(3..5)`.
  pub input_status: String,

  pub language: SupportedLanguage,

  /// Seed of the input generator, random if omitted.
  #[serde(default)]
  pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
  pub code: String,

  pub language: SupportedLanguage,

  pub test_cases: Vec<TestCase>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleRequest {
  pub input_status: String,

  pub count: i64,

  #[serde(default)]
  pub seed: Option<u64>,
}
