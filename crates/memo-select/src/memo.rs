#![forbid(unsafe_code)]

//! Single-slot memoization over dependency outputs.
//!
//! # Design
//!
//! A [`SelectorCore`] owns its dependencies, a combiner and one private
//! cache slot. Every call evaluates all dependencies, then compares the
//! fresh outputs position by position against the outputs stored by the
//! previous call. Only a mismatch (or an empty slot) runs the combiner.
//!
//! Outputs are collected into a `SmallVec<[Value; 3]>`, so selectors with up
//! to three dependencies never allocate for the comparison.
//!
//! # Invariants
//!
//! 1. The slot holds at most one `(inputs, result)` pair.
//! 2. The first call always runs the combiner (the slot starts as `None`).
//! 3. The combiner runs iff the slot is empty or some position fails
//!    `eq(stored[i], fresh[i])`.
//! 4. A cache hit does not touch the slot.
//! 5. Purity is fixed at construction; state-only cores never forward props.
//!
//! # Failure Modes
//!
//! - **Combiner panics**: the slot keeps the previous pair, so the next call
//!   compares against the last successful inputs.
//! - **Re-entrant call** (a dependency or combiner calling the same
//!   selector): dependency evaluation and the combiner run without a borrow
//!   on the slot, so the nested call completes; the outer call then
//!   overwrites the slot with its own pair.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::config::SelectorConfig;
use crate::dependency::{Dependency, Purity};
use crate::equality::Equality;
use crate::value::Value;

/// Merges dependency outputs (in dependency order) into a selector result.
pub type Combiner = Rc<dyn Fn(&[Value]) -> Value>;

/// Dependency outputs of one call.
pub(crate) type Outputs = SmallVec<[Value; 3]>;

/// Whether and how a selector reuses its previous result.
#[derive(Debug, Clone)]
pub enum Memo {
    /// Run the combiner on every call.
    Never,
    /// Reuse the last result while every dependency output is unchanged
    /// under the given equality.
    LastCall(Equality),
}

impl Memo {
    #[must_use]
    pub fn is_memoized(&self) -> bool {
        matches!(self, Memo::LastCall(_))
    }
}

struct CacheEntry {
    inputs: Outputs,
    result: Value,
}

/// Shared interior of a [`Selector`](crate::Selector).
pub(crate) struct SelectorCore<S, P> {
    dependencies: Vec<Dependency<S, P>>,
    combiner: Combiner,
    purity: Purity,
    memo: Memo,
    config: SelectorConfig,
    /// `None` until the first call.
    slot: RefCell<Option<CacheEntry>>,
    /// Combiner invocations so far.
    recomputations: Cell<u64>,
}

impl<S, P> SelectorCore<S, P> {
    pub(crate) fn new(
        dependencies: Vec<Dependency<S, P>>,
        combiner: Combiner,
        memo: Memo,
        config: SelectorConfig,
    ) -> Self {
        let purity = Purity::classify(&dependencies);
        Self {
            dependencies,
            combiner,
            purity,
            memo,
            config,
            slot: RefCell::new(None),
            recomputations: Cell::new(0),
        }
    }

    pub(crate) fn evaluate(&self, state: &S, props: Option<&P>) -> Value {
        let props = if self.purity.is_state_only() {
            None
        } else {
            props
        };
        let fresh: Outputs = self
            .dependencies
            .iter()
            .map(|dep| dep.evaluate(state, props))
            .collect();

        match &self.memo {
            Memo::Never => self.recompute(&fresh),
            Memo::LastCall(eq) => {
                if let Some(entry) = self.slot.borrow().as_ref()
                    && eq.all_eq(&entry.inputs, &fresh)
                {
                    if self.config.log_cache_events {
                        tracing::trace!(
                            message = "selector.hit",
                            label = %self.config.label,
                            arity = fresh.len()
                        );
                    }
                    return entry.result.clone();
                }
                if self.config.log_cache_events {
                    tracing::trace!(
                        message = "selector.miss",
                        label = %self.config.label,
                        arity = fresh.len(),
                        first_call = self.slot.borrow().is_none()
                    );
                }
                let result = self.recompute(&fresh);
                *self.slot.borrow_mut() = Some(CacheEntry {
                    inputs: fresh,
                    result: result.clone(),
                });
                result
            }
        }
    }

    fn recompute(&self, fresh: &[Value]) -> Value {
        let result = (self.combiner)(fresh);
        self.recomputations.set(self.recomputations.get() + 1);
        result
    }

    pub(crate) fn purity(&self) -> Purity {
        self.purity
    }

    pub(crate) fn memo(&self) -> &Memo {
        &self.memo
    }

    pub(crate) fn arity(&self) -> usize {
        self.dependencies.len()
    }

    pub(crate) fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub(crate) fn recomputations(&self) -> u64 {
        self.recomputations.get()
    }
}

impl<S, P> fmt::Debug for SelectorCore<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selector")
            .field("label", &self.config.label)
            .field("arity", &self.arity())
            .field("purity", &self.purity)
            .field("memo", &self.memo)
            .field("recomputations", &self.recomputations.get())
            .finish()
    }
}
