#![forbid(unsafe_code)]

//! The selector handle returned by every constructor.

use std::fmt;
use std::rc::Rc;

use crate::config::SelectorConfig;
use crate::dependency::{Dependency, Purity};
use crate::memo::{Memo, SelectorCore};
use crate::value::Value;

/// A built selector: `(state, props?) -> Value`.
///
/// Cloning a `Selector` creates a new handle to the **same** instance, cache
/// slot included. Build a second selector to get an independent cache.
///
/// Selectors are single-threaded (`!Send`, `!Sync`): the check-then-store on
/// the cache slot is not atomic. Give each thread its own instance.
pub struct Selector<S, P = ()> {
    inner: Rc<SelectorCore<S, P>>,
}

impl<S, P> Clone for Selector<S, P> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S, P> fmt::Debug for Selector<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner, f)
    }
}

impl<S, P> Selector<S, P> {
    pub(crate) fn from_core(core: SelectorCore<S, P>) -> Self {
        Self {
            inner: Rc::new(core),
        }
    }

    /// Call without props.
    pub fn select(&self, state: &S) -> Value {
        self.inner.evaluate(state, None)
    }

    /// Call with props. A state-only selector ignores them.
    pub fn select_with(&self, state: &S, props: &P) -> Value {
        self.inner.evaluate(state, Some(props))
    }

    /// Call with optional props, as a dependency would.
    pub fn select_opt(&self, state: &S, props: Option<&P>) -> Value {
        self.inner.evaluate(state, props)
    }

    #[must_use]
    pub fn purity(&self) -> Purity {
        self.inner.purity()
    }

    #[must_use]
    pub fn is_memoized(&self) -> bool {
        self.inner.memo().is_memoized()
    }

    #[must_use]
    pub fn memo(&self) -> &Memo {
        self.inner.memo()
    }

    /// Number of dependencies.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.inner.arity()
    }

    #[must_use]
    pub fn config(&self) -> &SelectorConfig {
        self.inner.config()
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.inner.config().label
    }

    /// How many times the combiner has run.
    #[must_use]
    pub fn recomputations(&self) -> u64 {
        self.inner.recomputations()
    }

    /// True when both handles point at the same instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<S: 'static, P: 'static> Selector<S, P> {
    /// Use this selector as a dependency of another.
    ///
    /// The dependency keeps this selector's classification, and calling it
    /// goes through this selector's own cache.
    #[must_use]
    pub fn to_dependency(&self) -> Dependency<S, P> {
        let selector = self.clone();
        match self.purity() {
            Purity::StateOnly => Dependency::state(move |state: &S| selector.select(state)),
            Purity::StateAndParams => {
                Dependency::with_params(move |state: &S, props: Option<&P>| {
                    selector.select_opt(state, props)
                })
            }
        }
    }
}

impl<S: 'static, P: 'static> From<Selector<S, P>> for Dependency<S, P> {
    fn from(selector: Selector<S, P>) -> Self {
        selector.to_dependency()
    }
}

impl<S: 'static, P: 'static> From<&Selector<S, P>> for Dependency<S, P> {
    fn from(selector: &Selector<S, P>) -> Self {
        selector.to_dependency()
    }
}
