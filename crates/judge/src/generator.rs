use futures::{
  stream::{self, StreamExt},
  TryStreamExt,
};
use serde::{Deserialize, Serialize};

use crate::{dsl, etc, lang, runner, Error};

/// A generated test case: an input and the output of the reference program on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCase {
  pub input: String,
  pub output: String,
}

/// Generate `count` test cases from an input DSL and a reference program.
///
/// It will do these following:
///
/// 1. Check `count` and the language before doing anything else.
/// 2. Parse and evaluate the DSL into a single generator.
/// 3. Draw `count` inputs from the generator and format them.
/// 4. Run the reference program on every input, at most `cfg.concurrency` at a time,
///    and pair each input with the program's output, in input order.
///
/// With a `seed`, the same inputs are generated on every call.
///
/// # Errors
///
/// This function will return an error if `count` is out of range, the language is not
/// supported, the DSL is malformed, or the reference program fails on any input.
/// No partial results are returned.
pub async fn generate(
  registry: &runner::Registry,
  evaluator: &dsl::Evaluator,
  code: &str,
  lang: &lang::SupportedLanguage,
  input_dsl: &str,
  count: i64,
  seed: Option<u64>,
  cfg: &etc::JudgeCfg,
) -> Result<Vec<GeneratedCase>, Error> {
  let count = check_count(count, cfg.max_generate_count)?;
  let runner = registry.get(lang)?;

  let inputs = sample(evaluator, input_dsl, count, seed)?;
  log::info!(
    "generating {} test cases with {} from `{}`",
    count,
    lang,
    input_dsl
  );

  let cases: Vec<GeneratedCase> = stream::iter(inputs)
    .map(|input| {
      let runner = runner.clone();
      async move {
        let res = registry.run(runner.as_ref(), code, &input).await?;
        Ok::<_, Error>(GeneratedCase {
          input,
          output: res.stdout,
        })
      }
    })
    .buffered(cfg.concurrency.max(1))
    .try_collect()
    .await?;

  return Ok(cases);
}

/// Draw `count` formatted inputs from an input DSL, without running anything.
pub fn sample(
  evaluator: &dsl::Evaluator,
  input_dsl: &str,
  count: usize,
  seed: Option<u64>,
) -> Result<Vec<String>, Error> {
  let nodes = dsl::parse(input_dsl)?;
  let generator = evaluator.evaluate(&nodes, seed)?;

  return Ok(
    generator
      .take(count)
      .map(|v| v.map(|v| dsl::format(&v)))
      .collect::<Result<_, _>>()?,
  );
}

/// Check the requested number of test cases.
pub fn check_count(count: i64, max: usize) -> Result<usize, Error> {
  if count <= 0 {
    return Err(Error::Validation(format!(
      "count must be a positive integer, got {}",
      count
    )));
  }
  let count = count as usize;
  if count > max {
    return Err(Error::Validation(format!(
      "count must not exceed {}, got {}",
      max, count
    )));
  }
  Ok(count)
}
