#![forbid(unsafe_code)]

//! Dependencies and their state-only / state-and-params classification.
//!
//! Each [`Dependency`] declares up front whether it reads call props. The
//! declaration is the whole classification: a props-taking dependency counts
//! as [`Purity::StateAndParams`] even if it never looks at its props.

use std::fmt;
use std::rc::Rc;

use crate::value::Value;

/// A function deriving a [`Value`] from state `S` and, optionally, props `P`.
pub enum Dependency<S, P> {
    /// Reads state only. Never receives props.
    StateOnly(Rc<dyn Fn(&S) -> Value>),
    /// Reads state and the caller's props (`None` when the call had none).
    StateAndParams(Rc<dyn Fn(&S, Option<&P>) -> Value>),
}

impl<S, P> Dependency<S, P> {
    /// Wrap a state-only function.
    pub fn state(f: impl Fn(&S) -> Value + 'static) -> Self {
        Self::StateOnly(Rc::new(f))
    }

    /// Wrap a function that also takes the call's props.
    pub fn with_params(f: impl Fn(&S, Option<&P>) -> Value + 'static) -> Self {
        Self::StateAndParams(Rc::new(f))
    }

    #[must_use]
    pub fn purity(&self) -> Purity {
        match self {
            Self::StateOnly(_) => Purity::StateOnly,
            Self::StateAndParams(_) => Purity::StateAndParams,
        }
    }

    #[inline]
    pub(crate) fn evaluate(&self, state: &S, props: Option<&P>) -> Value {
        match self {
            Self::StateOnly(f) => f(state),
            Self::StateAndParams(f) => f(state, props),
        }
    }
}

impl<S, P> Clone for Dependency<S, P> {
    fn clone(&self) -> Self {
        match self {
            Self::StateOnly(f) => Self::StateOnly(Rc::clone(f)),
            Self::StateAndParams(f) => Self::StateAndParams(Rc::clone(f)),
        }
    }
}

impl<S, P> fmt::Debug for Dependency<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Dependency").field(&self.purity()).finish()
    }
}

/// Whether a dependency list needs the call's props threaded through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Purity {
    StateOnly,
    StateAndParams,
}

impl Purity {
    /// `StateOnly` iff every dependency is state-only. An empty list is
    /// state-only.
    #[must_use]
    pub fn classify<S, P>(dependencies: &[Dependency<S, P>]) -> Self {
        if dependencies
            .iter()
            .all(|dep| dep.purity() == Purity::StateOnly)
        {
            Purity::StateOnly
        } else {
            Purity::StateAndParams
        }
    }

    #[must_use]
    pub fn is_state_only(self) -> bool {
        self == Purity::StateOnly
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Purity::StateOnly => "state_only",
            Purity::StateAndParams => "state_and_params",
        }
    }
}

impl fmt::Display for Purity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
