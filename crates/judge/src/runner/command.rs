use std::{
  path::{Path, PathBuf},
  process::{ExitStatus, Stdio},
  time,
};

use async_trait::async_trait;
use tokio::{
  io::{self, AsyncRead, AsyncReadExt},
  process::Command,
};

use super::{ExecutionError, ExecutionResult, LanguageRunner, ProcessGroup, StdinCursor, WorkDir};
use crate::{etc, result};

/// Runs code as a child process, compiling it first when the language needs it.
///
/// Every execution gets its own work directory, a cleared environment and its
/// own stdin cursor. The program runs in its own process group, which is killed
/// if the execution is dropped.
#[derive(Debug, Clone)]
pub struct CommandRunner {
  name: String,
  lang: etc::LangCfg,
  judge: etc::JudgeCfg,
}

impl CommandRunner {
  pub fn new(name: &str, lang: etc::LangCfg, judge: etc::JudgeCfg) -> Self {
    Self {
      name: name.to_string(),
      lang,
      judge,
    }
  }

  /// Build a command from `args` running in `dir`.
  fn command(&self, args: &[String], dir: &Path) -> Result<Command, ExecutionError> {
    let (program, args) = args
      .split_first()
      .ok_or_else(|| ExecutionError::Sandbox(format!("empty command for {}", &self.name)))?;

    // Relative paths like `./main` point into the work directory.
    let program = if program.contains('/') && Path::new(program).is_relative() {
      dir.join(program)
    } else {
      PathBuf::from(program)
    };

    let mut cmd = Command::new(program);
    cmd
      .args(args)
      .current_dir(dir)
      .env_clear()
      .kill_on_drop(true);
    for kv in &self.judge.env {
      if let Some((key, value)) = kv.split_once('=') {
        cmd.env(key, value);
      }
    }
    return Ok(cmd);
  }

  async fn compile(&self, dir: &Path) -> Result<(), ExecutionError> {
    let output = self
      .spawn(&self.lang.compile_cmd, dir, None, self.judge.stderr_limit)
      .await?;

    if !output.status.success() {
      let mut message = String::from_utf8_lossy(&output.stderr).to_string();
      if message.trim().is_empty() {
        message = String::from_utf8_lossy(&output.stdout).to_string();
      }
      return Err(ExecutionError::Compile {
        message: result::limit_message(&message),
      });
    }
    Ok(())
  }

  /// Run `args` in a new process group until it exits, feeding `stdin` if any.
  ///
  /// Processes left in the group are killed once the program exits, and when
  /// the returned future is dropped.
  async fn spawn(
    &self,
    args: &[String],
    dir: &Path,
    stdin: Option<StdinCursor>,
    stdout_limit: u64,
  ) -> Result<Output, ExecutionError> {
    let mut child = self
      .command(args, dir)?
      .process_group(0)
      .stdin(if stdin.is_some() {
        Stdio::piped()
      } else {
        Stdio::null()
      })
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .spawn()?;
    let mut group = ProcessGroup::of(&child);

    let child_stdin = child.stdin.take();
    let child_stdout = child
      .stdout
      .take()
      .ok_or_else(|| ExecutionError::Sandbox("stdout is not captured".to_string()))?;
    let child_stderr = child
      .stderr
      .take()
      .ok_or_else(|| ExecutionError::Sandbox("stderr is not captured".to_string()))?;

    let feed = async move {
      if let (Some(cursor), Some(mut writer)) = (stdin, child_stdin) {
        // The program may exit without reading everything.
        if let Err(err) = cursor.feed(&mut writer).await {
          log::debug!("stdin closed early: {}", err);
        }
      }
    };
    let wait = async {
      let status = child.wait().await;
      // Background processes would keep the output pipes open.
      group.kill();
      status
    };

    let (_, stdout, stderr, status) = tokio::join!(
      feed,
      collect(child_stdout, stdout_limit),
      collect(child_stderr, self.judge.stderr_limit),
      wait,
    );
    let (stdout, stdout_truncated) = stdout?;
    let (stderr, _) = stderr?;

    return Ok(Output {
      status: status?,
      stdout,
      stdout_truncated,
      stderr,
    });
  }

  async fn run(
    &self,
    work_dir: &WorkDir,
    code: &str,
    stdin: &str,
  ) -> Result<ExecutionResult, ExecutionError> {
    tokio::fs::write(work_dir.path().join(&self.lang.source_name), code).await?;

    if !self.lang.compile_cmd.is_empty() {
      log::debug!("compile {} in {}", &self.name, work_dir.path().display());
      self.compile(work_dir.path()).await?;
    }

    let start = time::Instant::now();
    let output = self
      .spawn(
        &self.lang.run_cmd,
        work_dir.path(),
        Some(StdinCursor::new(stdin)),
        self.judge.stdout_limit,
      )
      .await?;
    let time = start.elapsed();

    log::debug!(
      "{} exited with {} after {:?}",
      &self.name,
      output.status,
      time
    );

    if output.stdout_truncated {
      return Err(ExecutionError::OutputLimitExceeded(self.judge.stdout_limit));
    }

    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    if !output.status.success() {
      return Err(ExecutionError::Runtime {
        exit_code: output.status.code(),
        stderr: result::limit_message(&stderr),
      });
    }

    return Ok(ExecutionResult {
      stdout: String::from_utf8_lossy(&output.stdout).to_string(),
      stderr,
      exit_code: output.status.code(),
      time,
    });
  }
}

/// What a finished process wrote, within the limits.
struct Output {
  status: ExitStatus,
  stdout: Vec<u8>,
  stdout_truncated: bool,
  stderr: Vec<u8>,
}

#[async_trait]
impl LanguageRunner for CommandRunner {
  fn name(&self) -> &str {
    &self.name
  }

  fn version(&self) -> &str {
    &self.lang.version
  }

  fn time_limit(&self) -> Option<time::Duration> {
    self.lang.time_limit
  }

  async fn execute(&self, code: &str, stdin: &str) -> Result<ExecutionResult, ExecutionError> {
    let work_dir = WorkDir::create(&self.judge.work_dir).await?;
    let res = self.run(&work_dir, code, stdin).await;
    if let Err(err) = work_dir.remove().await {
      log::warn!("failed to remove work dir: {}", err);
    }
    return res;
  }
}

/// Read at most `limit` bytes, then drain the rest so the writer never blocks.
///
/// The flag is true if some bytes were dropped.
async fn collect<R: AsyncRead + Unpin>(mut reader: R, limit: u64) -> io::Result<(Vec<u8>, bool)> {
  let mut buf = Vec::new();
  (&mut reader).take(limit).read_to_end(&mut buf).await?;
  let dropped = io::copy(&mut reader, &mut io::sink()).await?;
  Ok((buf, dropped > 0))
}
