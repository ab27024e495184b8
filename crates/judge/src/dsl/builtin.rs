use std::sync::Arc;

use rand::{rngs::StdRng, seq::SliceRandom, Rng};

use super::{dictionary::WORDS, CallNode, Error, OptionValue, Sampler, Value};

/// A function callable from the DSL.
pub trait Builtin: Send + Sync {
  /// Name used to call the function.
  fn name(&self) -> &'static str;

  /// Build the sampler of a call.
  ///
  /// `current` is the sampler built by the calls on the left. Leaf functions
  /// ignore it and replace it, combinators wrap it.
  fn build(&self, call: &CallNode, current: Option<Sampler>) -> Result<Sampler, Error>;
}

/// `int(min..max)`: uniform integer in `[min, max]`, default `1..100`.
pub(super) struct Int;

impl Builtin for Int {
  fn name(&self) -> &'static str {
    "int"
  }

  fn build(&self, call: &CallNode, _current: Option<Sampler>) -> Result<Sampler, Error> {
    let (min, max) = integer_range(self.name(), call, (1., 100.))?;
    return Ok(Arc::new(move |rng: &mut StdRng| -> Result<Value, Error> {
      Ok(Value::Int(rng.gen_range(min..=max)))
    }));
  }
}

/// `float(min..max)`: uniform float in `[min, max]` with 4 fractional digits, default `0..1`.
pub(super) struct Float;

impl Builtin for Float {
  fn name(&self) -> &'static str {
    "float"
  }

  fn build(&self, call: &CallNode, _current: Option<Sampler>) -> Result<Sampler, Error> {
    let (min, max) = call.range().unwrap_or((0., 1.));
    if !min.is_finite() || !max.is_finite() || !(max - min).is_finite() {
      return Err(Error::invalid(
        self.name(),
        format!("range {}..{} is too large", min, max),
      ));
    }
    if min > max {
      return Err(Error::invalid(self.name(), format!("empty range {}..{}", min, max)));
    }
    return Ok(Arc::new(move |rng: &mut StdRng| -> Result<Value, Error> {
      let x: f64 = rng.gen_range(min..=max);
      Ok(Value::Float((x * 10000.).round() / 10000.))
    }));
  }
}

/// `word()`: a random dictionary word.
pub(super) struct Word;

impl Builtin for Word {
  fn name(&self) -> &'static str {
    "word"
  }

  fn build(&self, _call: &CallNode, _current: Option<Sampler>) -> Result<Sampler, Error> {
    if WORDS.is_empty() {
      return Err(Error::invalid(self.name(), "dictionary is empty"));
    }
    return Ok(Arc::new(|rng: &mut StdRng| -> Result<Value, Error> {
      WORDS
        .choose(rng)
        .map(|w| Value::Str(w.clone()))
        .ok_or_else(|| Error::invalid("word", "dictionary is empty"))
    }));
  }
}

/// `array(min..max, unique=bool)`: a list of values drawn from the generator on the left.
///
/// Length defaults to `1..1` and must not exceed `max_len`. With `unique=true` every
/// element is redrawn until it differs from the previous ones, at most `unique_retries`
/// times per element.
pub(super) struct Array {
  pub unique_retries: usize,
  pub max_len: usize,
}

impl Builtin for Array {
  fn name(&self) -> &'static str {
    "array"
  }

  fn build(&self, call: &CallNode, current: Option<Sampler>) -> Result<Sampler, Error> {
    let inner = current.ok_or_else(|| {
      Error::invalid(self.name(), "must follow a generator, e.g. `int(1..9).array(3..5)`")
    })?;
    let (min, max) = integer_range(self.name(), call, (1., 1.))?;
    if min < 0 {
      return Err(Error::invalid(self.name(), "length must not be negative"));
    }
    if max as u64 > self.max_len as u64 {
      return Err(Error::invalid(
        self.name(),
        format!("length must not exceed {}, got {}", self.max_len, max),
      ));
    }
    let (min, max) = (min as usize, max as usize);

    let unique = match call.option("unique") {
      None => false,
      Some(OptionValue::Bool(b)) => *b,
      Some(v) => {
        return Err(Error::invalid(
          self.name(),
          format!("`unique` must be true or false, got {:?}", v),
        ))
      }
    };
    let retries = self.unique_retries.max(1);

    return Ok(Arc::new(move |rng: &mut StdRng| -> Result<Value, Error> {
      let len = rng.gen_range(min..=max);
      let mut items = Vec::with_capacity(len);
      while items.len() < len {
        let item = if unique {
          draw_distinct(&inner, rng, &items, retries).ok_or(Error::Exhausted {
            wanted: len,
            found: items.len(),
          })??
        } else {
          inner(rng)?
        };
        items.push(item);
      }
      Ok(Value::Array(items))
    }));
  }
}

/// Draw a value not in `seen`, or `None` when every attempt collided.
fn draw_distinct(
  sampler: &Sampler,
  rng: &mut StdRng,
  seen: &[Value],
  attempts: usize,
) -> Option<Result<Value, Error>> {
  for _ in 0..attempts {
    match sampler(rng) {
      Ok(v) if seen.contains(&v) => continue,
      res => return Some(res),
    }
  }
  None
}

/// The range argument of `call` as integers, or `default` if there is none.
fn integer_range(function: &str, call: &CallNode, default: (f64, f64)) -> Result<(i64, i64), Error> {
  let (min, max) = call.range().unwrap_or(default);
  if min.fract() != 0. || max.fract() != 0. {
    return Err(Error::invalid(function, format!("range {}..{} must be integral", min, max)));
  }
  // `i64::MAX as f64` rounds up to 2^63, which is already out of range.
  if min < i64::MIN as f64 || max >= i64::MAX as f64 {
    return Err(Error::invalid(function, format!("range {}..{} is too large", min, max)));
  }
  if min > max {
    return Err(Error::invalid(function, format!("empty range {}..{}", min, max)));
  }
  return Ok((min as i64, max as i64));
}
