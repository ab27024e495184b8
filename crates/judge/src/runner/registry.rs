use std::{collections::HashMap, sync::Arc, time};

use super::{CommandRunner, ExecutionError, ExecutionResult, LanguageRunner};
use crate::{
  etc,
  lang::{SupportedLanguage, UnsupportedLanguageError},
};

/// Language runners keyed by lowercase language name.
#[derive(Clone)]
pub struct Registry {
  runners: HashMap<String, Arc<dyn LanguageRunner>>,

  /// Time limit of runners without their own.
  time_limit: time::Duration,
}

impl Registry {
  /// An empty registry.
  pub fn new(time_limit: time::Duration) -> Self {
    Self {
      runners: HashMap::new(),
      time_limit,
    }
  }

  /// A registry with a [`CommandRunner`] for every configured language.
  pub fn from_config(cfg: &etc::Cfg) -> Self {
    let mut registry = Self::new(cfg.judge.time_limit);
    for (name, lang) in &cfg.lang {
      registry.register(CommandRunner::new(name, lang.clone(), cfg.judge.clone()));
    }
    registry
  }

  /// Register a runner under its name, replacing the previous one.
  pub fn register(&mut self, runner: impl LanguageRunner + 'static) {
    let key = runner.name().trim().to_lowercase();
    log::debug!("register runner {} {}", &key, runner.version());
    self.runners.insert(key, Arc::new(runner));
  }

  /// Registered language names, sorted.
  pub fn languages(&self) -> Vec<&str> {
    let mut names: Vec<_> = self.runners.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
  }

  /// Get the runner of a language.
  ///
  /// # Errors
  ///
  /// Returns [`UnsupportedLanguageError`] if no runner is registered under the language name.
  pub fn get(&self, lang: &SupportedLanguage) -> Result<Arc<dyn LanguageRunner>, UnsupportedLanguageError> {
    let runner = self
      .runners
      .get(&lang.key())
      .ok_or_else(|| UnsupportedLanguageError { lang: lang.clone() })?;

    if !lang.version.is_empty() && lang.version != runner.version() {
      log::warn!(
        "requested {} but the registered runner is version {}",
        lang,
        runner.version()
      );
    }
    Ok(runner.clone())
  }

  /// Run code of a language, bounded by the runner's time limit.
  ///
  /// When the limit is hit the execution is dropped, which kills the program
  /// and removes its files.
  pub async fn execute(
    &self,
    lang: &SupportedLanguage,
    code: &str,
    stdin: &str,
  ) -> Result<ExecutionResult, crate::Error> {
    let runner = self.get(lang)?;
    Ok(self.run(runner.as_ref(), code, stdin).await?)
  }

  pub(crate) async fn run(
    &self,
    runner: &dyn LanguageRunner,
    code: &str,
    stdin: &str,
  ) -> Result<ExecutionResult, ExecutionError> {
    let limit = runner.time_limit().unwrap_or(self.time_limit);
    log::debug!("execute {} start", runner.name());

    let res = match tokio::time::timeout(limit, runner.execute(code, stdin)).await {
      Ok(res) => res,
      Err(_) => Err(ExecutionError::Timeout(limit)),
    };

    match &res {
      Ok(r) => log::debug!("execute {} finished in {:?}", runner.name(), r.time),
      Err(err) => log::debug!("execute {} failed: {}", runner.name(), err),
    }
    res
  }
}
