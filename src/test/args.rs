use std::path::PathBuf;

use clap::Parser;

use crate::service::args::{Args, Command};

#[test]
fn test_parse_args() {
  let args = Args::try_parse_from([
    "arbiter",
    "-c",
    "a.toml",
    "--config-search-path",
    "b.toml",
    "generate-test-case",
    "--request",
    "req.json",
  ])
  .unwrap();

  assert_eq!(args.config_search_path, vec!["a.toml", "b.toml"]);
  assert_eq!(args.request, Some(PathBuf::from("req.json")));
  assert_eq!(args.command, Command::GenerateTestCase);

  let args = Args::try_parse_from(["arbiter", "submit"]).unwrap();
  assert_eq!(args.request, None);
  assert_eq!(args.command, Command::Submit);

  assert!(Args::try_parse_from(["arbiter"]).is_err());
  assert!(Args::try_parse_from(["arbiter", "judge"]).is_err());
}
