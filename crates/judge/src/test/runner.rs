use std::time;

use futures::future;

use crate::{
  etc,
  runner::{ExecutionError, LanguageRunner, Registry, StdinCursor},
  Error, SupportedLanguage,
};

#[test]
fn test_stdin_cursor() {
  let mut cursor = StdinCursor::new("3\n1 2 3\n");
  assert_eq!(cursor.remaining(), 2);
  assert_eq!(cursor.next().as_deref(), Some("3"));
  assert_eq!(cursor.next().as_deref(), Some("1 2 3"));
  assert_eq!(cursor.next(), None);
  assert_eq!(cursor.next(), None);
  assert_eq!(cursor.remaining(), 0);
}

#[tokio::test]
async fn test_stdin_feed() {
  for stdin in ["Alice", "a\nb", "a\nb\n", "", "x\r\ny"] {
    let mut buf: Vec<u8> = vec![];
    StdinCursor::new(stdin).feed(&mut buf).await.unwrap();
    assert_eq!(
      String::from_utf8(buf).unwrap(),
      stdin.replace("\r\n", "\n"),
      "{:?}",
      stdin
    );
  }
}

#[test]
fn test_unsupported_language() {
  let registry = super::shell_registry();
  let cobol = SupportedLanguage::new("Cobol", "1");

  assert_eq!(registry.get(&cobol).err().unwrap().lang, cobol);
}

#[tokio::test]
async fn test_execute_unsupported_language() {
  let registry = super::shell_registry();

  match registry
    .execute(&SupportedLanguage::new("Cobol", "1"), "DISPLAY 'HI'.", "")
    .await
  {
    Err(Error::UnsupportedLanguage(e)) => assert_eq!(e.lang.name, "Cobol"),
    res => panic!("unexpected result: {:?}", res),
  }
}

#[test]
fn test_registry_lookup() {
  let registry = Registry::from_config(&etc::Cfg::default());
  assert_eq!(
    registry.languages(),
    vec!["c", "cpp", "javascript", "python", "shell"]
  );

  // Names are case insensitive and versions are informational.
  let runner = registry
    .get(&SupportedLanguage::new("Python", "2.7"))
    .unwrap();
  assert_eq!(runner.name(), "python");
}

#[tokio::test]
async fn test_shell_hello() {
  super::init();

  let res = super::shell_registry()
    .execute(
      &super::shell(),
      "line=$(cat); printf 'Hello, %s' \"$line\"",
      "Alice",
    )
    .await
    .unwrap();

  assert_eq!(res.stdout, "Hello, Alice");
  assert_eq!(res.exit_code, Some(0));
}

#[tokio::test]
async fn test_shell_reads_lines() {
  let res = super::shell_registry()
    .execute(
      &super::shell(),
      "read n; read a b; echo $((n * (a + b)))",
      "3\n4 5",
    )
    .await
    .unwrap();

  assert_eq!(res.stdout, "27\n");
}

#[tokio::test]
async fn test_shell_runtime_error() {
  match super::shell_registry()
    .execute(&super::shell(), "echo oops >&2; exit 3", "")
    .await
  {
    Err(Error::Execution(ExecutionError::Runtime { exit_code, stderr })) => {
      assert_eq!(exit_code, Some(3));
      assert_eq!(stderr, "oops\n");
    }
    res => panic!("unexpected result: {:?}", res),
  }
}

#[tokio::test]
async fn test_shell_compile_error() {
  let mut lang = etc::Cfg::default().lang["shell"].clone();
  lang.compile_cmd = vec!["sh".to_string(), "-n".to_string(), "main.sh".to_string()];

  let mut registry = Registry::new(time::Duration::from_secs(10));
  registry.register(crate::runner::CommandRunner::new(
    "shell",
    lang,
    super::judge_cfg(),
  ));

  let res = registry
    .execute(&super::shell(), "if then fi (", "")
    .await;
  assert!(
    matches!(res, Err(Error::Execution(ExecutionError::Compile { .. }))),
    "{:?}",
    res
  );

  let res = registry
    .execute(&super::shell(), "printf ok", "")
    .await
    .unwrap();
  assert_eq!(res.stdout, "ok");
}

#[tokio::test]
async fn test_shell_timeout() {
  let mut lang = etc::Cfg::default().lang["shell"].clone();
  lang.time_limit = Some(time::Duration::from_millis(300));
  let judge = super::judge_cfg();
  let work_dir = judge.work_dir.clone();

  let mut registry = Registry::new(time::Duration::from_secs(10));
  registry.register(crate::runner::CommandRunner::new("shell", lang, judge));

  // Both sleeps are children of the shell, not the shell itself.
  let marker = "7.4321";
  let start = time::Instant::now();
  let res = registry
    .execute(
      &super::shell(),
      &format!("sleep {} & sleep {}; printf late", marker, marker),
      "",
    )
    .await;

  match res {
    Err(Error::Execution(ExecutionError::Timeout(limit))) => {
      assert_eq!(limit, time::Duration::from_millis(300))
    }
    res => panic!("unexpected result: {:?}", res),
  }
  assert!(start.elapsed() < time::Duration::from_secs(4));

  // Every process of the program is killed and its work directory is gone.
  assert!(super::eventually(|| !super::running(marker)).await);
  assert!(
    super::eventually(|| std::fs::read_dir(&work_dir).map_or(false, |d| d.count() == 0)).await
  );
}

#[tokio::test]
async fn test_shell_background_processes_are_killed() {
  let marker = "8.5432";
  let res = super::shell_registry()
    .execute(
      &super::shell(),
      &format!("(sleep {}; echo late) & printf done", marker),
      "",
    )
    .await
    .unwrap();

  // The run does not wait for the background process to close its output.
  assert_eq!(res.stdout, "done");
  assert!(res.time < time::Duration::from_secs(4));
  assert!(super::eventually(|| !super::running(marker)).await);
}

#[tokio::test]
async fn test_shell_compile_output_limit() {
  let mut lang = etc::Cfg::default().lang["shell"].clone();
  // The compiler prints its own source, then fails.
  lang.compile_cmd = vec![
    "sh".to_string(),
    "-c".to_string(),
    "cat main.sh >&2; exit 1".to_string(),
  ];
  let mut judge = super::judge_cfg();
  judge.stderr_limit = 64;

  let mut registry = Registry::new(time::Duration::from_secs(10));
  registry.register(crate::runner::CommandRunner::new("shell", lang, judge));

  match registry
    .execute(&super::shell(), &"x".repeat(100_000), "")
    .await
  {
    Err(Error::Execution(ExecutionError::Compile { message })) => {
      assert_eq!(message, "x".repeat(64))
    }
    res => panic!("unexpected result: {:?}", res),
  }
}

#[tokio::test]
async fn test_shell_output_limit() {
  let mut judge = super::judge_cfg();
  judge.stdout_limit = 16;

  let mut registry = Registry::new(time::Duration::from_secs(10));
  registry.register(super::shell_runner(judge));

  match registry
    .execute(&super::shell(), "printf '%s' 01234567890123456789", "")
    .await
  {
    Err(Error::Execution(ExecutionError::OutputLimitExceeded(16))) => {}
    res => panic!("unexpected result: {:?}", res),
  }
}

#[tokio::test]
async fn test_shell_clean_environment() {
  let judge = super::judge_cfg();
  let work_dir = judge.work_dir.clone();

  let mut registry = Registry::new(time::Duration::from_secs(10));
  registry.register(super::shell_runner(judge));

  let res = registry
    .execute(&super::shell(), "printf '%s' \"$HOME\"; ls", "")
    .await
    .unwrap();

  // Only the configured variables are set and the program sees its own files only.
  assert_eq!(res.stdout, "/tmpmain.sh\n");
  assert_eq!(std::fs::read_dir(&work_dir).unwrap().count(), 0);
}

#[tokio::test]
async fn test_concurrent_executions_are_isolated() {
  let registry = super::shell_registry();
  let lang = super::shell();

  let inputs: Vec<String> = (0..8).map(|i| format!("input {}\nline {}", i, i * i)).collect();
  let results = future::join_all(
    inputs
      .iter()
      .map(|input| registry.execute(&lang, "echo started > state; cat", input)),
  )
  .await;

  for (input, res) in inputs.iter().zip(results) {
    assert_eq!(&res.unwrap().stdout, input);
  }
}
