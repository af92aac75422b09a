pub use fixed_map::Key as Term;
pub use fixed_map::Key;
use fixed_map::Map as FixedMap;

use crate::error::Result;
use crate::membership::Triangle;

/// The term set of one linguistic variable, keyed by a term enum.
pub struct Terms<K: Term>(pub(crate) FixedMap<K, Triangle>);

impl<K: Term> Default for Terms<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Term> Terms<K> {
    pub fn new() -> Self {
        Self(FixedMap::new())
    }

    pub fn insert(&mut self, key: K, value: Triangle) {
        self.0.insert(key, value);
    }

    /// Adds a triangular term from its `(a, b, c)` breakpoints.
    pub fn triangle(mut self, key: K, (a, b, c): (f64, f64, f64)) -> Result<Self> {
        self.insert(key, Triangle::new(a, b, c)?);

        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
