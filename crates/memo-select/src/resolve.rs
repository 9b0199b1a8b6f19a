#![forbid(unsafe_code)]

//! Normalization and validation of dependency arguments.
//!
//! Dependencies arrive either as a flat list of [`Input`]s (the variadic
//! form) or as a single [`Input::Sequence`] holding them (the sequence form).
//! [`resolve`] reduces both to one ordered `Vec<Dependency>` or rejects the
//! arguments.

use std::fmt;

use crate::dependency::Dependency;
use crate::error::{Result, SelectorError};
use crate::value::Value;

/// One dependency argument as supplied by a caller.
pub enum Input<S, P> {
    Dependency(Dependency<S, P>),
    /// The sequence form. Only valid as the sole dependency argument.
    Sequence(Vec<Input<S, P>>),
    /// A non-callable value. Always rejected, but reported by kind.
    Value(Value),
}

impl<S, P> Input<S, P> {
    /// Shorthand for a state-only dependency input.
    pub fn state(f: impl Fn(&S) -> Value + 'static) -> Self {
        Self::Dependency(Dependency::state(f))
    }

    /// Shorthand for a state-and-params dependency input.
    pub fn with_params(f: impl Fn(&S, Option<&P>) -> Value + 'static) -> Self {
        Self::Dependency(Dependency::with_params(f))
    }

    /// Kind name reported by [`SelectorError::InvalidDependencyType`].
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Dependency(_) => "function",
            Self::Sequence(_) => "list",
            Self::Value(v) => v.kind(),
        }
    }
}

impl<S, P> From<Dependency<S, P>> for Input<S, P> {
    fn from(dep: Dependency<S, P>) -> Self {
        Self::Dependency(dep)
    }
}

impl<S, P> From<Vec<Input<S, P>>> for Input<S, P> {
    fn from(inputs: Vec<Input<S, P>>) -> Self {
        Self::Sequence(inputs)
    }
}

impl<S, P> From<Value> for Input<S, P> {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl<S, P> fmt::Debug for Input<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dependency(dep) => fmt::Debug::fmt(dep, f),
            Self::Sequence(items) => f.debug_tuple("Sequence").field(items).finish(),
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
        }
    }
}

/// Resolve dependency arguments into an ordered dependency list.
///
/// A leading [`Input::Sequence`] is unwrapped and resolved on its own; any
/// argument after it is an [`SelectorError::InvalidSignature`]. Otherwise
/// every input must be a dependency, and a failure reports the kind of every
/// input, not only the offending ones.
pub fn resolve<S, P>(mut inputs: Vec<Input<S, P>>) -> Result<Vec<Dependency<S, P>>> {
    if matches!(inputs.first(), Some(Input::Sequence(_))) {
        if inputs.len() > 1 {
            return Err(SelectorError::InvalidSignature {
                extra: inputs.len() - 1,
            });
        }
        if let Some(Input::Sequence(inner)) = inputs.pop() {
            return resolve(inner);
        }
    }

    if inputs.iter().all(|input| matches!(input, Input::Dependency(_))) {
        return Ok(inputs
            .into_iter()
            .filter_map(|input| match input {
                Input::Dependency(dep) => Some(dep),
                _ => None,
            })
            .collect());
    }

    Err(SelectorError::InvalidDependencyType {
        kinds: inputs.iter().map(Input::kind).collect(),
    })
}
