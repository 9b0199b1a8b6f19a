#![forbid(unsafe_code)]

//! Selector constructors.
//!
//! A [`SelectorCreator`] pairs a [`Memo`] mode with a [`SelectorConfig`] and
//! builds selectors from any of the accepted argument shapes:
//!
//! - variadic: dependencies followed by a combiner ([`SelectorCreator::from_inputs`]),
//! - sequence: one list of dependencies plus a combiner ([`SelectorCreator::from_sequence`]),
//! - typed: already-built [`Dependency`] values ([`SelectorCreator::from_dependencies`]),
//! - structured: named sub-selectors ([`SelectorCreator::structured`]).
//!
//! [`SelectorCreator::create`] accepts the dynamic [`SelectorArgs`] form and
//! dispatches on its shape. Validation happens here, once; a built selector
//! never fails.
//!
//! ```
//! use memo_select::{Input, Value, build_memoized_selector};
//!
//! let total = build_memoized_selector::<Value, ()>((
//!     vec![
//!         Input::state(|s: &Value| s.get("a")),
//!         Input::state(|s: &Value| s.get("b")),
//!     ],
//!     |v: &[Value]| Value::from(v[0].as_f64().unwrap_or(0.0) + v[1].as_f64().unwrap_or(0.0)),
//! ))
//! .unwrap();
//!
//! let state = Value::record([("a", Value::from(1)), ("b", Value::from(2))]);
//! assert_eq!(total.select(&state), Value::from(3));
//! ```

use std::fmt;
use std::rc::Rc;

use crate::config::SelectorConfig;
use crate::dependency::Dependency;
use crate::equality::Equality;
use crate::error::{Result, SelectorError};
use crate::memo::{Combiner, Memo, SelectorCore};
use crate::resolve::{Input, resolve};
use crate::selector::Selector;
use crate::structured::StructuredSpec;
use crate::value::Value;

/// The argument shapes a constructor accepts.
pub enum SelectorArgs<S, P> {
    /// Dependency inputs (variadic, or a single leading sequence) and a combiner.
    Inputs {
        inputs: Vec<Input<S, P>>,
        combiner: Combiner,
    },
    /// Named sub-selectors; the result is a record.
    Structured(StructuredSpec<S, P>),
}

impl<S, P, F> From<(Vec<Input<S, P>>, F)> for SelectorArgs<S, P>
where
    F: Fn(&[Value]) -> Value + 'static,
{
    fn from((inputs, combiner): (Vec<Input<S, P>>, F)) -> Self {
        Self::Inputs {
            inputs,
            combiner: Rc::new(combiner),
        }
    }
}

impl<S, P> From<StructuredSpec<S, P>> for SelectorArgs<S, P> {
    fn from(spec: StructuredSpec<S, P>) -> Self {
        Self::Structured(spec)
    }
}

impl<S, P> fmt::Debug for SelectorArgs<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inputs { inputs, .. } => f
                .debug_struct("Inputs")
                .field("inputs", inputs)
                .finish_non_exhaustive(),
            Self::Structured(spec) => f.debug_tuple("Structured").field(spec).finish(),
        }
    }
}

/// A selector constructor bound to one memo policy and configuration.
///
/// Every selector built through a creator shares its [`Equality`]; other
/// creators are unaffected by it.
#[derive(Debug, Clone)]
pub struct SelectorCreator {
    memo: Memo,
    config: SelectorConfig,
}

impl Default for SelectorCreator {
    /// Memoized, identity equality.
    fn default() -> Self {
        Self::memoized(Equality::identity())
    }
}

impl SelectorCreator {
    /// Non-memoized: the combiner runs on every call.
    #[must_use]
    pub fn simple() -> Self {
        Self {
            memo: Memo::Never,
            config: SelectorConfig::default(),
        }
    }

    /// Memoized with the given equality.
    #[must_use]
    pub fn memoized(eq: Equality) -> Self {
        Self {
            memo: Memo::LastCall(eq),
            config: SelectorConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: SelectorConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn memo(&self) -> &Memo {
        &self.memo
    }

    #[must_use]
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Build from either argument shape.
    ///
    /// Closures passed in the tuple form need an explicit `&[Value]`
    /// parameter type.
    pub fn create<S, P>(&self, args: impl Into<SelectorArgs<S, P>>) -> Result<Selector<S, P>> {
        match args.into() {
            SelectorArgs::Inputs { inputs, combiner } => self.resolve_and_build(inputs, combiner),
            SelectorArgs::Structured(spec) => self.structured(spec),
        }
    }

    /// Variadic form. A leading [`Input::Sequence`] switches to the sequence
    /// form and must then be the only input.
    pub fn from_inputs<S, P>(
        &self,
        inputs: Vec<Input<S, P>>,
        combiner: impl Fn(&[Value]) -> Value + 'static,
    ) -> Result<Selector<S, P>> {
        self.resolve_and_build(inputs, Rc::new(combiner))
    }

    /// Sequence form.
    pub fn from_sequence<S, P>(
        &self,
        dependencies: Vec<Input<S, P>>,
        combiner: impl Fn(&[Value]) -> Value + 'static,
    ) -> Result<Selector<S, P>> {
        self.resolve_and_build(vec![Input::Sequence(dependencies)], Rc::new(combiner))
    }

    /// Typed form. Nothing to validate, so nothing can fail.
    pub fn from_dependencies<S, P>(
        &self,
        dependencies: Vec<Dependency<S, P>>,
        combiner: impl Fn(&[Value]) -> Value + 'static,
    ) -> Selector<S, P> {
        self.build(dependencies, Rc::new(combiner))
    }

    /// Structured form: the result is a record keyed like `spec`, and is
    /// memoized under this creator's policy like any other selector.
    pub fn structured<S, P>(&self, spec: StructuredSpec<S, P>) -> Result<Selector<S, P>> {
        match spec.into_parts() {
            Ok((dependencies, combiner)) => Ok(self.build(dependencies, combiner)),
            Err(err) => Err(self.reject(err)),
        }
    }

    fn resolve_and_build<S, P>(
        &self,
        inputs: Vec<Input<S, P>>,
        combiner: Combiner,
    ) -> Result<Selector<S, P>> {
        match resolve(inputs) {
            Ok(dependencies) => Ok(self.build(dependencies, combiner)),
            Err(err) => Err(self.reject(err)),
        }
    }

    fn reject(&self, err: SelectorError) -> SelectorError {
        tracing::debug!(
            message = "selector.reject",
            label = %self.config.label,
            error = %err
        );
        err
    }

    fn build<S, P>(&self, dependencies: Vec<Dependency<S, P>>, combiner: Combiner) -> Selector<S, P> {
        let core = SelectorCore::new(dependencies, combiner, self.memo.clone(), self.config.clone());
        tracing::debug!(
            message = "selector.build",
            label = %self.config.label,
            arity = core.arity(),
            purity = %core.purity(),
            memoized = self.memo.is_memoized()
        );
        Selector::from_core(core)
    }
}

/// Non-memoized selector.
pub fn build_selector<S, P>(args: impl Into<SelectorArgs<S, P>>) -> Result<Selector<S, P>> {
    SelectorCreator::simple().create(args)
}

/// Memoized selector with identity equality.
pub fn build_memoized_selector<S, P>(
    args: impl Into<SelectorArgs<S, P>>,
) -> Result<Selector<S, P>> {
    SelectorCreator::default().create(args)
}

/// A memoized creator bound to `eq`.
#[must_use]
pub fn create_memoized_selector_factory(eq: Equality) -> SelectorCreator {
    SelectorCreator::memoized(eq)
}
