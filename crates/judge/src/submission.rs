use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};

use crate::{
  judge, lang,
  result::{TestOutcome, Verdict},
  runner::{self, ExecutionError},
  Error,
};

/// A pair of input and expected output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
  pub input: String,
  pub expected_output: String,
}

/// Judgement of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
  pub verdict: Verdict,

  /// Outcome of each test case, in test case order.
  pub per_test: Vec<TestOutcome>,
}

/// Judge a program on every test case and reduce the outcomes into a verdict.
///
/// At most `concurrency` test cases run at the same time; the outcomes keep the
/// order of `cases` anyway.
///
/// # Errors
///
/// Returns an error if `cases` is empty or the language is not supported.
/// Execution errors of single test cases are reported in the verdict instead.
pub async fn aggregate(
  registry: &runner::Registry,
  code: &str,
  lang: &lang::SupportedLanguage,
  cases: &[TestCase],
  concurrency: usize,
) -> Result<Submission, Error> {
  if cases.is_empty() {
    return Err(Error::Validation(
      "a submission needs at least one test case".to_string(),
    ));
  }
  let runner = registry.get(lang)?;

  let records: Vec<_> = stream::iter(cases.iter().enumerate())
    .map(|(i, case)| {
      let runner = runner.clone();
      async move {
        let record = judge::judge_with(
          registry,
          runner.as_ref(),
          code,
          &case.input,
          &case.expected_output,
        )
        .await;
        log::debug!("test case #{} of {} judged: {:?}", i, lang, record);
        record
      }
    })
    .buffered(concurrency.max(1))
    .collect()
    .await;

  let verdict = reduce(&records);
  log::info!(
    "submission in {} judged {} on {} test cases",
    lang,
    verdict,
    records.len()
  );

  return Ok(Submission {
    verdict,
    per_test: records
      .into_iter()
      .map(|record| match record {
        Ok(outcome) => outcome,
        Err(err) => TestOutcome::failed(err.to_string()),
      })
      .collect(),
  });
}

/// Reduce per test records into a verdict.
///
/// - Any compile failure => CompileError.
/// - Any other execution error => RuntimeError.
/// - All passed => Accepted.
/// - Otherwise => WrongAnswer.
pub fn reduce(records: &[Result<TestOutcome, ExecutionError>]) -> Verdict {
  if records
    .iter()
    .any(|r| matches!(r, Err(err) if err.is_compile()))
  {
    return Verdict::CompileError;
  }
  if records.iter().any(|r| r.is_err()) {
    return Verdict::RuntimeError;
  }
  if records
    .iter()
    .all(|r| matches!(r, Ok(outcome) if outcome.is_passed()))
  {
    return Verdict::Accepted;
  }
  return Verdict::WrongAnswer;
}
