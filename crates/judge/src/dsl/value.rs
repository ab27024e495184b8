use std::fmt::Display;

/// A generated value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
  Int(i64),
  Float(f64),
  Str(String),
  Array(Vec<Value>),
}

/// Format a generated value as program input.
///
/// Arrays are joined by single spaces, recursively.
pub fn format(value: &Value) -> String {
  value.to_string()
}

impl Display for Value {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Value::Int(x) => write!(f, "{}", x),
      // `+ 0.0` turns a negative zero into zero.
      Value::Float(x) => write!(f, "{}", x + 0.0),
      Value::Str(s) => write!(f, "{}", s),
      Value::Array(items) => {
        for (i, item) in items.iter().enumerate() {
          if i > 0 {
            write!(f, " ")?;
          }
          write!(f, "{}", item)?;
        }
        Ok(())
      }
    }
  }
}

impl From<i64> for Value {
  fn from(x: i64) -> Self {
    Value::Int(x)
  }
}

impl From<f64> for Value {
  fn from(x: f64) -> Self {
    Value::Float(x)
  }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self {
    Value::Str(s.to_string())
  }
}

impl From<Vec<Value>> for Value {
  fn from(items: Vec<Value>) -> Self {
    Value::Array(items)
  }
}
