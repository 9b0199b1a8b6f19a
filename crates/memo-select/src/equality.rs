#![forbid(unsafe_code)]

//! Pairwise equality policies for memoized selectors.

use std::fmt;
use std::rc::Rc;

use crate::value::Value;

/// Binary predicate deciding whether a stored dependency output and a fresh
/// one at the same position count as unchanged.
///
/// Cloning shares the underlying function.
#[derive(Clone)]
pub struct Equality {
    eq: Rc<dyn Fn(&Value, &Value) -> bool>,
    name: &'static str,
}

impl Equality {
    /// Custom policy.
    pub fn new(eq: impl Fn(&Value, &Value) -> bool + 'static) -> Self {
        Self {
            eq: Rc::new(eq),
            name: "custom",
        }
    }

    /// The default: [`Value::same`].
    #[must_use]
    pub fn identity() -> Self {
        Self {
            eq: Rc::new(Value::same),
            name: "identity",
        }
    }

    /// Two values are equal when they have the same [`Value::kind`].
    #[must_use]
    pub fn same_kind() -> Self {
        Self {
            eq: Rc::new(|a: &Value, b: &Value| a.kind() == b.kind()),
            name: "same_kind",
        }
    }

    /// Attach a name shown in `Debug` output and build logs.
    #[must_use]
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    #[must_use]
    pub fn eq(&self, stored: &Value, fresh: &Value) -> bool {
        (self.eq)(stored, fresh)
    }

    /// Positional comparison of two equally long output lists.
    pub(crate) fn all_eq(&self, stored: &[Value], fresh: &[Value]) -> bool {
        stored.len() == fresh.len()
            && stored
                .iter()
                .zip(fresh)
                .all(|(stored, fresh)| self.eq(stored, fresh))
    }
}

impl Default for Equality {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for Equality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Equality").field(&self.name).finish()
    }
}
