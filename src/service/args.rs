use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shadow_rs::shadow;

shadow!(build);

// Command line args
#[derive(Parser, Debug)]
#[clap(version = build::CLAP_LONG_VERSION)]
#[clap(about = "Test case generation and judging service of arbiter.", long_about = None)]
pub struct Args {
  #[clap(short, long, value_parser)]
  pub config_search_path: Vec<String>,

  /// JSON request file, standard input if omitted.
  #[clap(short, long, value_parser, global = true)]
  pub request: Option<PathBuf>,

  #[clap(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
  /// Run code with an input: `{ code, input, language }`.
  RunCode,

  /// Generate test cases with a reference program: `{ code, count, inputStatus, language, seed? }`.
  GenerateTestCase,

  /// Judge a program on test cases: `{ code, language, testCases }`.
  Submit,

  /// Preview inputs of an input DSL without running anything: `{ inputStatus, count, seed? }`.
  Sample,
}
