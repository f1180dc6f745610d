//! First-success combinator over ordered fetch strategies.

use crate::error::{AcquireError, Error, Result};

type Tier<'a, I, T> = Box<dyn Fn(&I) -> std::result::Result<T, AcquireError> + 'a>;

/// An ordered list of strategies sharing one `(input) -> Result<T, AcquireError>`
/// contract, tried in sequence until one succeeds.
///
/// # Example
///
/// ```
/// use unsection::acquire::FallbackChain;
/// use unsection::AcquireError;
///
/// let chain = FallbackChain::new()
///     .then("cache", |_: &str| Err(AcquireError::not_found("cold cache")))
///     .then("origin", |key: &str| Ok(key.len()));
///
/// assert_eq!(chain.run("abc").unwrap(), 3);
/// ```
pub struct FallbackChain<'a, I: ?Sized, T> {
    tiers: Vec<(String, Tier<'a, I, T>)>,
}

impl<'a, I: ?Sized, T> FallbackChain<'a, I, T> {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self { tiers: Vec::new() }
    }

    /// Append a tier and return self.
    pub fn then<F>(mut self, name: impl Into<String>, tier: F) -> Self
    where
        F: Fn(&I) -> std::result::Result<T, AcquireError> + 'a,
    {
        self.tiers.push((name.into(), Box::new(tier)));
        self
    }

    /// Number of tiers.
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Check if the chain has no tiers.
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Tier names in trial order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tiers.iter().map(|(name, _)| name.as_str())
    }

    /// Try every tier in order; the first success wins.
    ///
    /// When all tiers fail, the last failure is returned.
    pub fn run(&self, input: &I) -> Result<T> {
        self.run_until(input, |_| false)
    }

    /// Like [`run`](Self::run), but stops at the first failure matching
    /// `abort` and returns it without trying the remaining tiers.
    pub fn run_until<P>(&self, input: &I, abort: P) -> Result<T>
    where
        P: Fn(&AcquireError) -> bool,
    {
        let mut last_error = None;

        for (index, (name, tier)) in self.tiers.iter().enumerate() {
            log::debug!("Trying tier {}/{}: {}", index + 1, self.tiers.len(), name);
            match tier(input) {
                Ok(value) => return Ok(value),
                Err(err) if abort(&err) => {
                    log::warn!("Tier '{}' aborted the chain: {}", name, err);
                    return Err(err.into());
                }
                Err(err) => {
                    log::warn!("Tier '{}' failed: {}", name, err);
                    last_error = Some(err);
                }
            }
        }

        match last_error {
            Some(err) => Err(err.into()),
            None => Err(Error::PolicyViolation(
                "no acquisition strategy configured".to_string(),
            )),
        }
    }
}

impl<I: ?Sized, T> Default for FallbackChain<'_, I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ?Sized, T> std::fmt::Debug for FallbackChain<'_, I, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackChain")
            .field("tiers", &self.names().collect::<Vec<_>>())
            .finish()
    }
}
