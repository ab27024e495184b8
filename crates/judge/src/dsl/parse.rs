use regex::Regex;

use super::{split, Error};

/// One call of the DSL, e.g. `int(1..100)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallNode {
  pub function: String,
  pub args: Vec<Arg>,
}

/// A parsed argument of a call.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
  /// A bare value, e.g. `5` or `abc`.
  Literal(Literal),

  /// An inclusive range, e.g. `1..100`.
  Range { min: f64, max: f64 },

  /// A named option, e.g. `unique=true`.
  Option { key: String, value: OptionValue },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
  Number(f64),
  Str(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
  Bool(bool),
  Number(f64),
  Str(String),
}

impl CallNode {
  /// The first range argument.
  pub fn range(&self) -> Option<(f64, f64)> {
    self.args.iter().find_map(|arg| match arg {
      Arg::Range { min, max } => Some((*min, *max)),
      _ => None,
    })
  }

  /// The value of the option named `key`, the last one wins.
  pub fn option(&self, key: &str) -> Option<&OptionValue> {
    self.args.iter().rev().find_map(|arg| match arg {
      Arg::Option { key: k, value } if k == key => Some(value),
      _ => None,
    })
  }
}

lazy_static! {
  static ref CALL_PAT: Regex = Regex::new(r"(?s)\A([A-Za-z_]\w*)\s*\((.*)\)\z").unwrap();
  static ref RANGE_PAT: Regex =
    Regex::new(r"\A(-?\d+(?:\.\d+)?)\s*\.\.\s*(-?\d+(?:\.\d+)?)\z").unwrap();
  static ref OPTION_PAT: Regex = Regex::new(r"(?s)\A([A-Za-z_]\w*)\s*=\s*(.+)\z").unwrap();
  static ref NUMBER_PAT: Regex = Regex::new(r"\A-?\d+(?:\.\d+)?\z").unwrap();
}

/// Parse a DSL source into its calls, in source order.
///
/// # Errors
///
/// Returns [`Error::Syntax`] if the source is empty or a call expression does not
/// match `identifier "(" args? ")"`.
pub fn parse(source: &str) -> Result<Vec<CallNode>, Error> {
  let segments = split(source);
  if segments.is_empty() {
    return Err(Error::syntax(source, "empty expression"));
  }

  segments.iter().map(|s| parse_call(s)).collect()
}

fn parse_call(segment: &str) -> Result<CallNode, Error> {
  let cap = CALL_PAT
    .captures(segment)
    .ok_or_else(|| Error::syntax(segment, "expected `name(args)`"))?;

  let body = cap[2].trim();
  if body.contains(|c: char| c == '(' || c == ')') {
    return Err(Error::syntax(segment, "nested calls are not allowed"));
  }

  let args = if body.is_empty() {
    vec![]
  } else {
    body
      .split(',')
      .map(|token| parse_arg(segment, token.trim()))
      .collect::<Result<_, _>>()?
  };

  return Ok(CallNode {
    function: cap[1].to_string(),
    args,
  });
}

fn parse_arg(segment: &str, token: &str) -> Result<Arg, Error> {
  if token.is_empty() {
    return Err(Error::syntax(segment, "empty argument"));
  }

  if let Some(cap) = RANGE_PAT.captures(token) {
    return Ok(Arg::Range {
      min: parse_number(segment, &cap[1])?,
      max: parse_number(segment, &cap[2])?,
    });
  }

  if let Some(cap) = OPTION_PAT.captures(token) {
    let raw = cap[2].trim();
    let value = match raw {
      "true" => OptionValue::Bool(true),
      "false" => OptionValue::Bool(false),
      _ if NUMBER_PAT.is_match(raw) => OptionValue::Number(parse_number(segment, raw)?),
      _ => OptionValue::Str(raw.to_string()),
    };
    return Ok(Arg::Option {
      key: cap[1].to_string(),
      value,
    });
  }

  if NUMBER_PAT.is_match(token) {
    return Ok(Arg::Literal(Literal::Number(parse_number(segment, token)?)));
  }
  Ok(Arg::Literal(Literal::Str(token.to_string())))
}

fn parse_number(segment: &str, s: &str) -> Result<f64, Error> {
  s.parse::<f64>()
    .map_err(|_| Error::syntax(segment, &format!("invalid number `{}`", s)))
}
