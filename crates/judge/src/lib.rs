//! Test input generation and program judging.
//!
//! - [`dsl`] turns an input DSL like `int(1..100).array(3..5)` into a random value generator.
//! - [`runner`] runs code of a language in a fresh runtime and captures its output.
//! - [`judge`] checks one program on one test case.
//! - [`submission`] judges a program on every test case and gives a verdict.
//! - [`generator`] generates test cases from an input DSL and a reference program.

#[macro_use]
extern crate lazy_static;

#[cfg(test)]
mod test;

pub mod dsl;
pub mod error;
pub mod etc;
pub mod generator;
pub mod judge;
pub mod lang;
pub mod result;
pub mod runner;
pub mod submission;

pub use crate::{
  error::Error,
  lang::SupportedLanguage,
  result::{TestOutcome, Verdict},
};
