use crate::{lang, result, runner, Error};

/// Run a program on one test case and compare its output with the expected output.
///
/// The comparison is an exact string equality: no trimming, no line ending
/// normalization.
///
/// # Errors
///
/// Returns an error if the language is not supported or the program does not
/// run normally. Those are never reported as a failed test.
pub async fn judge(
  registry: &runner::Registry,
  code: &str,
  input: &str,
  expected_output: &str,
  lang: &lang::SupportedLanguage,
) -> Result<result::TestOutcome, Error> {
  let runner = registry.get(lang)?;
  return Ok(judge_with(registry, runner.as_ref(), code, input, expected_output).await?);
}

/// Same as [`judge`] with an already resolved runner.
pub async fn judge_with(
  registry: &runner::Registry,
  runner: &dyn runner::LanguageRunner,
  code: &str,
  input: &str,
  expected_output: &str,
) -> Result<result::TestOutcome, runner::ExecutionError> {
  let res = registry.run(runner, code, input).await?;
  return Ok(compare(&res.stdout, expected_output));
}

/// Compare an output with the expected output.
pub fn compare(output: &str, expected_output: &str) -> result::TestOutcome {
  if output == expected_output {
    result::TestOutcome::Passed
  } else {
    result::TestOutcome::failed(result::diff_message(expected_output, output))
  }
}
