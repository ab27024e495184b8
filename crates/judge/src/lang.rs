use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// Programming language of a piece of code.
///
/// Runners are looked up by `name`, case insensitively. `version` is informational.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct SupportedLanguage {
  pub name: String,

  #[serde(default)]
  pub version: String,
}

impl SupportedLanguage {
  pub fn new(name: &str, version: &str) -> Self {
    Self {
      name: name.to_string(),
      version: version.to_string(),
    }
  }

  /// The registry key of this language.
  pub fn key(&self) -> String {
    self.name.trim().to_lowercase()
  }
}

impl Display for SupportedLanguage {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    if self.version.is_empty() {
      write!(f, "{}", &self.name)
    } else {
      write!(f, "{} {}", &self.name, &self.version)
    }
  }
}

/// Error when no runner is registered for a language.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported language: {lang}")]
pub struct UnsupportedLanguageError {
  pub lang: SupportedLanguage,
}
