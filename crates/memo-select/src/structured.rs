#![forbid(unsafe_code)]

//! Named sub-selectors reduced to one record-producing selector.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::dependency::Dependency;
use crate::error::{Result, SelectorError};
use crate::memo::Combiner;
use crate::resolve::Input;
use crate::value::{Record, Value};

/// Ordered mapping from output key to sub-selector.
///
/// The built selector returns a [`Record`] whose keys appear in the order the
/// fields were first added.
pub struct StructuredSpec<S, P> {
    fields: Vec<(Arc<str>, Input<S, P>)>,
}

impl<S, P> Default for StructuredSpec<S, P> {
    fn default() -> Self {
        Self { fields: Vec::new() }
    }
}

impl<S, P> StructuredSpec<S, P> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field. Re-adding a key replaces its sub-selector in place.
    #[must_use]
    pub fn field(mut self, key: impl Into<Arc<str>>, input: impl Into<Input<S, P>>) -> Self {
        self.insert(key, input);
        self
    }

    pub fn insert(&mut self, key: impl Into<Arc<str>>, input: impl Into<Input<S, P>>) {
        let key = key.into();
        let input = input.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = input,
            None => self.fields.push((key, input)),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| &**k)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Split into the flat form: one dependency per field, and a combiner
    /// zipping their outputs back onto the keys.
    ///
    /// Every field must be a single dependency. A sequence or plain value in
    /// any field rejects the whole mapping with the kind of every field.
    pub(crate) fn into_parts(self) -> Result<(Vec<Dependency<S, P>>, Combiner)> {
        if !self
            .fields
            .iter()
            .all(|(_, input)| matches!(input, Input::Dependency(_)))
        {
            return Err(SelectorError::InvalidDependencyType {
                kinds: self.fields.iter().map(|(_, input)| input.kind()).collect(),
            });
        }

        let mut keys = Vec::with_capacity(self.fields.len());
        let mut dependencies = Vec::with_capacity(self.fields.len());
        for (key, input) in self.fields {
            if let Input::Dependency(dep) = input {
                keys.push(key);
                dependencies.push(dep);
            }
        }

        let combiner: Combiner = Rc::new(move |values: &[Value]| {
            Value::from(Record::from_unique(
                keys.iter().map(Arc::clone).zip(values.iter().cloned()),
            ))
        });
        Ok((dependencies, combiner))
    }
}

impl<S, P, K, I> FromIterator<(K, I)> for StructuredSpec<S, P>
where
    K: Into<Arc<str>>,
    I: Into<Input<S, P>>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut spec = Self::new();
        for (key, input) in iter {
            spec.insert(key, input);
        }
        spec
    }
}

impl<S, P> fmt::Debug for StructuredSpec<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.fields.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}
