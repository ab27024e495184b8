//! The call sites of the judging core, one per command.

pub mod args;
pub mod request;
pub mod response;

use std::path::Path;

use arbiter_judge::{
  dsl, etc, generator,
  runner::Registry,
  submission::{self, Submission},
};
use thiserror::Error;
use tokio::io::AsyncReadExt;

use self::{
  args::Command,
  request::{GenerateTestCaseRequest, RunCodeRequest, SampleRequest, SubmitRequest},
  response::{ErrorResponse, GenerateTestCaseResponse, RunCodeResponse, SampleResponse},
};

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Judge(#[from] arbiter_judge::Error),

  #[error("invalid request: {0}")]
  Request(#[from] serde_json::Error),

  #[error("failed to read request: {0}")]
  Io(#[from] std::io::Error),

  #[error("invalid config: {0}")]
  Config(String),
}

impl Error {
  pub fn kind(&self) -> &'static str {
    match self {
      Error::Judge(e) => e.kind(),
      Error::Request(_) => "validation_error",
      Error::Io(_) => "io_error",
      Error::Config(_) => "config_error",
    }
  }

  pub fn to_response(&self) -> ErrorResponse {
    ErrorResponse {
      error: self.kind().to_string(),
      message: self.to_string(),
    }
  }
}

/// Judging service holding the runners and the input DSL evaluator.
pub struct Service {
  registry: Registry,
  evaluator: dsl::Evaluator,
  judge: etc::JudgeCfg,
}

impl Service {
  /// A service running every configured language.
  pub fn new(cfg: &etc::Cfg) -> Self {
    return Self::with_registry(Registry::from_config(cfg), cfg);
  }

  pub fn with_registry(registry: Registry, cfg: &etc::Cfg) -> Self {
    log::info!("supported languages: {}", registry.languages().join(", "));
    return Self {
      registry,
      evaluator: dsl::Evaluator::new(&cfg.dsl),
      judge: cfg.judge.clone(),
    };
  }

  pub async fn run_code(
    &self,
    req: &RunCodeRequest,
  ) -> Result<RunCodeResponse, arbiter_judge::Error> {
    let res = self
      .registry
      .execute(&req.language, &req.code, &req.input)
      .await?;
    return Ok(RunCodeResponse { output: res.stdout });
  }

  pub async fn generate_test_case(
    &self,
    req: &GenerateTestCaseRequest,
  ) -> Result<GenerateTestCaseResponse, arbiter_judge::Error> {
    let results = generator::generate(
      &self.registry,
      &self.evaluator,
      &req.code,
      &req.language,
      &req.input_status,
      req.count,
      req.seed,
      &self.judge,
    )
    .await?;
    return Ok(GenerateTestCaseResponse { results });
  }

  pub async fn submit(&self, req: &SubmitRequest) -> Result<Submission, arbiter_judge::Error> {
    return submission::aggregate(
      &self.registry,
      &req.code,
      &req.language,
      &req.test_cases,
      self.judge.concurrency,
    )
    .await;
  }

  pub fn sample(&self, req: &SampleRequest) -> Result<SampleResponse, arbiter_judge::Error> {
    let count = generator::check_count(req.count, self.judge.max_generate_count)?;
    let inputs = generator::sample(&self.evaluator, &req.input_status, count, req.seed)?;
    return Ok(SampleResponse { inputs });
  }

  /// Handle the JSON request of a command and give the JSON response.
  pub async fn handle(&self, command: Command, body: &str) -> Result<serde_json::Value, Error> {
    log::debug!("handle {:?}", command);
    let res = match command {
      Command::RunCode => serde_json::to_value(self.run_code(&serde_json::from_str(body)?).await?)?,
      Command::GenerateTestCase => {
        serde_json::to_value(self.generate_test_case(&serde_json::from_str(body)?).await?)?
      }
      Command::Submit => serde_json::to_value(self.submit(&serde_json::from_str(body)?).await?)?,
      Command::Sample => serde_json::to_value(self.sample(&serde_json::from_str(body)?)?)?,
    };
    return Ok(res);
  }
}

/// Read a request from a file, or from standard input if there is none.
pub async fn read_request(path: Option<&Path>) -> Result<String, Error> {
  match path {
    Some(path) => Ok(tokio::fs::read_to_string(path).await?),
    None => {
      let mut body = String::new();
      tokio::io::stdin().read_to_string(&mut body).await?;
      Ok(body)
    }
  }
}
