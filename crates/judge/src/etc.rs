use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};
use std::{collections::HashMap, path::PathBuf, time};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
/// Arbiter judge config.
pub struct Cfg {
  /// Language runners, keyed by language name.
  pub lang: HashMap<String, LangCfg>,

  pub judge: JudgeCfg,

  pub dsl: DslCfg,
}

impl Default for Cfg {
  // Set default values for config
  fn default() -> Self {
    return Cfg {
      lang: HashMap::from([
        (
          "python".to_string(),
          LangCfg::interpreted("3", &["python3", "main.py"], "main.py"),
        ),
        (
          "javascript".to_string(),
          LangCfg::interpreted("18", &["node", "main.js"], "main.js"),
        ),
        (
          "shell".to_string(),
          LangCfg::interpreted("posix", &["sh", "main.sh"], "main.sh"),
        ),
        (
          "c".to_string(),
          LangCfg {
            version: "c11".to_string(),
            compile_cmd: ["gcc", "main.c", "-o", "main", "-O2", "-lm"]
              .iter()
              .map(|&s| s.into())
              .collect(),
            run_cmd: vec!["./main".to_string()],
            source_name: "main.c".to_string(),
            time_limit: None,
          },
        ),
        (
          "cpp".to_string(),
          LangCfg {
            version: "c++17".to_string(),
            compile_cmd: ["g++", "main.cpp", "-o", "main", "-O2", "-std=c++17"]
              .iter()
              .map(|&s| s.into())
              .collect(),
            run_cmd: vec!["./main".to_string()],
            source_name: "main.cpp".to_string(),
            time_limit: None,
          },
        ),
      ]),
      judge: JudgeCfg::default(),
      dsl: DslCfg::default(),
    };
  }
}

/// Programming language config.
#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct LangCfg {
  /// Reported runtime version, e.g. `3` for python.
  pub version: String,

  /// Compile command, empty for interpreted languages.
  pub compile_cmd: Vec<String>,

  pub run_cmd: Vec<String>,

  /// Name of source file
  pub source_name: String,

  /// Overrides `judge.time_limit` for this language.
  #[serde_as(as = "Option<DurationMilliSeconds<u64>>")]
  pub time_limit: Option<time::Duration>,
}

impl LangCfg {
  fn interpreted(version: &str, run_cmd: &[&str], source_name: &str) -> Self {
    Self {
      version: version.to_string(),
      compile_cmd: vec![],
      run_cmd: run_cmd.iter().map(|&s| s.into()).collect(),
      source_name: source_name.to_string(),
      time_limit: None,
    }
  }
}

/// Judge config.
#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct JudgeCfg {
  /// Environment variables of every program, in `KEY=VALUE` form.
  pub env: Vec<String>,

  /// Wall time limit of one execution, compilation included.
  #[serde_as(as = "DurationMilliSeconds<u64>")]
  pub time_limit: time::Duration,

  /// Stdout limit, in bytes.
  pub stdout_limit: u64,

  /// Stderr limit, in bytes.
  pub stderr_limit: u64,

  /// Max executions running at the same time for one submission or generation.
  pub concurrency: usize,

  /// Max test cases generated by one request.
  pub max_generate_count: usize,

  /// Directory holding the per-execution work directories.
  pub work_dir: PathBuf,
}

impl Default for JudgeCfg {
  fn default() -> Self {
    Self {
      env: vec![
        "PATH=/usr/local/sbin:/usr/local/bin:/usr/sbin:/usr/bin:/sbin:/bin".to_string(),
        "HOME=/tmp".to_string(),
      ],
      time_limit: time::Duration::from_secs(10),
      stdout_limit: 64 * 1024 * 1024, // 64 MB
      stderr_limit: 16 * 1024,        // 16 kB
      concurrency: 4,
      max_generate_count: 1000,
      work_dir: std::env::temp_dir().join("arbiter"),
    }
  }
}

/// Input DSL config.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DslCfg {
  /// Draws allowed for each element of a `unique=true` array.
  pub unique_retries: usize,

  /// Max length of one array.
  pub max_array_len: usize,
}

impl Default for DslCfg {
  fn default() -> Self {
    Self {
      unique_retries: 1000,
      max_array_len: 100_000,
    }
  }
}

/// Load the config.
///
/// Sources are merged in order: `/etc/arbiter/config`, then every search path,
/// then `ARBITER__*` environment variables.
pub fn load_config(search_paths: &[String]) -> Result<Cfg, config::ConfigError> {
  let mut builder = config::Config::builder()
    .add_source(config::File::with_name("/etc/arbiter/config").required(false));

  for p in search_paths {
    builder = builder.add_source(config::File::with_name(p.as_str()).required(false));
  }

  builder = builder.add_source(
    config::Environment::with_prefix("ARBITER")
      .prefix_separator("__")
      .separator("__"),
  );

  return builder.build()?.try_deserialize::<Cfg>();
}
