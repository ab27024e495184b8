mod runner;

use std::time;

use crate::{etc, runner as r, SupportedLanguage};

fn init() {
  let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
    .is_test(true)
    .try_init();
}

/// Judge config with a work directory of its own.
fn judge_cfg() -> etc::JudgeCfg {
  etc::JudgeCfg {
    work_dir: std::env::temp_dir()
      .join("arbiter-test")
      .join(uuid::Uuid::new_v4().to_string()),
    ..Default::default()
  }
}

/// Whether a process with `marker` in its command line is alive.
fn running(marker: &str) -> bool {
  let entries = match std::fs::read_dir("/proc") {
    Ok(entries) => entries,
    Err(_) => return false,
  };
  entries.filter_map(Result::ok).any(|entry| {
    std::fs::read(entry.path().join("cmdline"))
      .map(|cmdline| String::from_utf8_lossy(&cmdline).contains(marker))
      .unwrap_or(false)
  })
}

/// Wait up to 2 seconds for `check` to hold.
async fn eventually(check: impl Fn() -> bool) -> bool {
  for _ in 0..40 {
    if check() {
      return true;
    }
    tokio::time::sleep(time::Duration::from_millis(50)).await;
  }
  check()
}

fn shell() -> SupportedLanguage {
  SupportedLanguage::new("shell", "posix")
}

fn mock() -> SupportedLanguage {
  SupportedLanguage::new("mock", "1")
}

/// Runner of POSIX shell scripts from the default config.
fn shell_runner(judge: etc::JudgeCfg) -> r::CommandRunner {
  r::CommandRunner::new("shell", etc::Cfg::default().lang["shell"].clone(), judge)
}

fn shell_registry() -> r::Registry {
  let mut registry = r::Registry::new(time::Duration::from_secs(10));
  registry.register(shell_runner(judge_cfg()));
  registry
}

/// In-process runner interpreting the code as one of these programs:
///
/// - `echo`: writes stdin back.
/// - `hello`: writes `Hello, ` followed by stdin.
/// - `crash-on:<x>`: raises if stdin is `<x>`, echoes otherwise.
/// - `syntax error`: does not compile.
fn mock_runner() -> impl r::LanguageRunner {
  r::FnRunner::new("mock", "1", |code: &str, stdin: &str| {
    if code.contains("syntax error") {
      return Err(r::ExecutionError::Compile {
        message: "expected `;`".to_string(),
      });
    }
    if let Some(bad) = code.strip_prefix("crash-on:") {
      if stdin == bad {
        return Err(r::ExecutionError::Runtime {
          exit_code: Some(1),
          stderr: "boom".to_string(),
        });
      }
      return Ok(r::ExecutionResult::from_stdout(stdin));
    }
    match code {
      "echo" => Ok(r::ExecutionResult::from_stdout(stdin)),
      "hello" => Ok(r::ExecutionResult::from_stdout(format!("Hello, {}", stdin))),
      _ => Err(r::ExecutionError::Runtime {
        exit_code: Some(127),
        stderr: format!("unknown program {}", code),
      }),
    }
  })
}

fn mock_registry() -> r::Registry {
  let mut registry = r::Registry::new(time::Duration::from_secs(10));
  registry.register(mock_runner());
  registry
}
