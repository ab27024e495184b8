use std::{collections::HashMap, fmt::Debug, sync::Arc};

use rand::{rngs::StdRng, SeedableRng};

use super::{builtin, Builtin, CallNode, Error, Value};
use crate::etc;

/// Draws one value from the given random source.
pub type Sampler = Arc<dyn Fn(&mut StdRng) -> Result<Value, Error> + Send + Sync>;

/// Produces one random value per call.
///
/// A generator owns its random source, so two generators never share state.
pub struct Generator {
  sampler: Sampler,
  rng: StdRng,
}

impl Generator {
  /// Draw the next value.
  pub fn generate(&mut self) -> Result<Value, Error> {
    (self.sampler)(&mut self.rng)
  }
}

impl Iterator for Generator {
  type Item = Result<Value, Error>;

  fn next(&mut self) -> Option<Self::Item> {
    Some(self.generate())
  }
}

impl Debug for Generator {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Generator").finish_non_exhaustive()
  }
}

/// Registry of DSL functions.
pub struct Evaluator {
  builtins: HashMap<&'static str, Box<dyn Builtin>>,
}

impl Evaluator {
  /// An evaluator without any function.
  pub fn empty() -> Self {
    Self {
      builtins: HashMap::new(),
    }
  }

  /// An evaluator with the builtin `int`, `float`, `word` and `array` functions.
  pub fn new(cfg: &etc::DslCfg) -> Self {
    let mut evaluator = Self::empty();
    evaluator.register(builtin::Int);
    evaluator.register(builtin::Float);
    evaluator.register(builtin::Word);
    evaluator.register(builtin::Array {
      unique_retries: cfg.unique_retries,
      max_len: cfg.max_array_len,
    });
    evaluator
  }

  /// Register a function, replacing the one with the same name.
  pub fn register(&mut self, builtin: impl Builtin + 'static) {
    self.builtins.insert(builtin.name(), Box::new(builtin));
  }

  /// Evaluate the calls from left to right into a generator.
  ///
  /// With a `seed`, the generator yields the same values on every evaluation.
  ///
  /// # Errors
  ///
  /// Returns [`Error::UnknownFunction`] for an unregistered function,
  /// or the error of the first call whose arguments are invalid.
  pub fn evaluate(&self, nodes: &[CallNode], seed: Option<u64>) -> Result<Generator, Error> {
    let sampler = nodes
      .iter()
      .try_fold(None, |current: Option<Sampler>, node| {
        let builtin = self
          .builtins
          .get(node.function.as_str())
          .ok_or_else(|| Error::UnknownFunction(node.function.clone()))?;
        builtin.build(node, current).map(Some)
      })?
      .ok_or_else(|| Error::syntax("", "empty expression"))?;

    return Ok(Generator {
      sampler,
      rng: match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
      },
    });
  }
}

impl Default for Evaluator {
  fn default() -> Self {
    Self::new(&etc::DslCfg::default())
  }
}

/// Evaluate the calls with the default builtins.
pub fn evaluate(nodes: &[CallNode]) -> Result<Generator, Error> {
  Evaluator::default().evaluate(nodes, None)
}

/// Same as [`evaluate`], with a fixed random seed.
pub fn evaluate_seeded(nodes: &[CallNode], seed: u64) -> Result<Generator, Error> {
  Evaluator::default().evaluate(nodes, Some(seed))
}
